// THEORY:
// The `RegionGrower` is the flood-fill engine of the tracker. Given a seed pixel it
// expands breadth-first over marker pixels and reports the bounding box of
// everything it accepted.
//
// Key architectural principles & algorithm steps:
// 1.  **Work Queue**: A FIFO queue starts with the seed. Every dequeued coordinate is
//     accepted when the classifier matches it and it is not yet claimed.
// 2.  **Claiming**: An accepted pixel is marked in the caller's claimed mask, so no
//     later growth in the same pass can attribute it to another blob.
// 3.  **Radius Dilation**: Instead of the 4 or 8 direct neighbours, every coordinate in
//     the square of radius `R` around an accepted pixel is enqueued (clamped to the
//     frame). This bridges small dark gaps inside one marker's reflection.
// 4.  **No Duplicate Work**: A second "enqueued" mask guarantees a coordinate enters the
//     queue at most once per growth.
// 5.  **Geometry Only**: The grower holds no state between calls. It reads the frame,
//     writes the claimed mask and returns a box.

use crate::core_modules::bounding_box::{BoundingBox, Extent, Point};
use crate::core_modules::frame::FrameView;
use crate::core_modules::occupancy::OccupancyMask;
use crate::core_modules::pixel::pixel::PixelClassifier;
use crate::error::TrackerError;

pub mod region_grower {
    use super::*;
    use std::collections::VecDeque;

    /// Bounded-radius breadth-first region growing over classifier-matching pixels.
    #[derive(Debug, Clone, Copy)]
    pub struct RegionGrower {
        classifier: PixelClassifier,
        radius: usize,
    }

    impl RegionGrower {
        pub fn new(classifier: PixelClassifier, radius: usize) -> Self {
            Self { classifier, radius }
        }

        pub fn classifier(&self) -> &PixelClassifier {
            &self.classifier
        }

        /// Grows a region from `seed`, allocating its own scratch mask.
        ///
        /// Returns `None` when the seed itself is not an unclaimed marker pixel.
        pub fn grow(
            &self,
            seed: Point,
            claimed: &mut OccupancyMask,
            frame: &FrameView,
        ) -> Result<Option<BoundingBox>, TrackerError> {
            let mut enqueued = OccupancyMask::new(frame.width(), frame.height())?;
            Ok(self.grow_with_scratch(seed, claimed, &mut enqueued, frame))
        }

        /// Grows a region from `seed` using a caller-provided, all-false scratch mask.
        /// The scratch mask is all-false again when this returns, so one mask can serve
        /// many growths in the same pass.
        pub fn grow_with_scratch(
            &self,
            seed: Point,
            claimed: &mut OccupancyMask,
            enqueued: &mut OccupancyMask,
            frame: &FrameView,
        ) -> Option<BoundingBox> {
            let width = frame.width();
            let height = frame.height();

            let mut extent = Extent::default();
            let mut touched: Vec<Point> = vec![seed];
            let mut queue: VecDeque<Point> = VecDeque::from([seed]);
            enqueued.set(seed.x, seed.y, true);

            while let Some(current) = queue.pop_front() {
                if claimed.get(current.x, current.y)
                    || !self
                        .classifier
                        .is_marker_pixel(frame.get_pixel(current.x, current.y))
                {
                    continue;
                }

                claimed.set(current.x, current.y, true);
                extent.include(current);

                let begin_x = current.x.saturating_sub(self.radius);
                let begin_y = current.y.saturating_sub(self.radius);
                let end_x = (current.x + self.radius).min(width - 1);
                let end_y = (current.y + self.radius).min(height - 1);

                for y in begin_y..=end_y {
                    for x in begin_x..=end_x {
                        if !claimed.get(x, y) && !enqueued.get(x, y) {
                            enqueued.set(x, y, true);
                            touched.push(Point::new(x, y));
                            queue.push_back(Point::new(x, y));
                        }
                    }
                }
            }

            for point in touched {
                enqueued.set(point.x, point.y, false);
            }

            extent.to_box()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::region_grower::RegionGrower;
    use super::*;
    use crate::core_modules::frame::OwnedFrame;
    use crate::core_modules::pixel::pixel::Rgb;

    fn paint(frame: &mut OwnedFrame, x0: usize, y0: usize, x1: usize, y1: usize) {
        let mut view = frame.view_mut().unwrap();
        for y in y0..=y1 {
            for x in x0..=x1 {
                view.set_pixel(x, y, Rgb::WHITE);
            }
        }
    }

    fn grower() -> RegionGrower {
        RegionGrower::new(PixelClassifier::default(), 3)
    }

    #[test]
    fn grows_a_square_from_its_corner() {
        let mut frame = OwnedFrame::filled(32, 32, Rgb::BLACK);
        paint(&mut frame, 10, 10, 14, 14);
        let view = frame.view_mut().unwrap();
        let mut claimed = OccupancyMask::new(32, 32).unwrap();

        let bbox = grower()
            .grow(Point::new(10, 10), &mut claimed, &view)
            .unwrap();

        assert_eq!(bbox, Some(BoundingBox::new(10, 10, 4, 4)));
        assert_eq!(claimed.count(), 25);
    }

    #[test]
    fn seed_in_the_middle_finds_the_full_extent() {
        let mut frame = OwnedFrame::filled(32, 32, Rgb::BLACK);
        paint(&mut frame, 3, 20, 12, 22);
        let view = frame.view_mut().unwrap();
        let mut claimed = OccupancyMask::new(32, 32).unwrap();

        let bbox = grower()
            .grow(Point::new(8, 21), &mut claimed, &view)
            .unwrap();
        assert_eq!(bbox, Some(BoundingBox::new(3, 20, 9, 2)));
    }

    #[test]
    fn growth_is_deterministic() {
        let mut frame = OwnedFrame::filled(40, 40, Rgb::BLACK);
        paint(&mut frame, 5, 5, 9, 7);
        paint(&mut frame, 11, 6, 13, 12);
        let view = frame.view_mut().unwrap();

        let mut first_mask = OccupancyMask::new(40, 40).unwrap();
        let first = grower().grow(Point::new(5, 5), &mut first_mask, &view).unwrap();
        let mut second_mask = OccupancyMask::new(40, 40).unwrap();
        let second = grower().grow(Point::new(5, 5), &mut second_mask, &view).unwrap();

        assert_eq!(first, second);
        assert_eq!(first, Some(BoundingBox::new(5, 5, 8, 7)));
    }

    #[test]
    fn bridges_gaps_within_the_radius() {
        let mut frame = OwnedFrame::filled(40, 10, Rgb::BLACK);
        // Two dark columns between the squares: reachable with radius 3.
        paint(&mut frame, 2, 2, 4, 4);
        paint(&mut frame, 7, 2, 9, 4);
        // Three dark columns before this one: out of reach.
        paint(&mut frame, 13, 2, 15, 4);
        let view = frame.view_mut().unwrap();
        let mut claimed = OccupancyMask::new(40, 10).unwrap();

        let bbox = grower().grow(Point::new(2, 2), &mut claimed, &view).unwrap();
        assert_eq!(bbox, Some(BoundingBox::new(2, 2, 7, 2)));
        assert!(!claimed.get(13, 2));
    }

    #[test]
    fn single_pixel_degenerates_to_a_point() {
        let mut frame = OwnedFrame::filled(8, 8, Rgb::BLACK);
        paint(&mut frame, 0, 7, 0, 7);
        let view = frame.view_mut().unwrap();
        let mut claimed = OccupancyMask::new(8, 8).unwrap();

        let bbox = grower().grow(Point::new(0, 7), &mut claimed, &view).unwrap();
        assert_eq!(bbox, Some(BoundingBox::new(0, 7, 0, 0)));
    }

    #[test]
    fn claimed_or_dark_seed_yields_nothing() {
        let mut frame = OwnedFrame::filled(8, 8, Rgb::BLACK);
        paint(&mut frame, 2, 2, 3, 3);
        let view = frame.view_mut().unwrap();
        let mut claimed = OccupancyMask::new(8, 8).unwrap();

        assert_eq!(grower().grow(Point::new(6, 6), &mut claimed, &view).unwrap(), None);

        claimed.set(2, 2, true);
        let bbox = grower().grow(Point::new(2, 2), &mut claimed, &view).unwrap();
        assert_eq!(bbox, None);
    }

    #[test]
    fn claimed_pixels_are_not_absorbed() {
        let mut frame = OwnedFrame::filled(16, 8, Rgb::BLACK);
        paint(&mut frame, 2, 2, 10, 2);
        let view = frame.view_mut().unwrap();
        let mut claimed = OccupancyMask::new(16, 8).unwrap();
        claimed.fill_rect(6, 2, 10, 2);

        let bbox = grower().grow(Point::new(2, 2), &mut claimed, &view).unwrap();
        assert_eq!(bbox, Some(BoundingBox::new(2, 2, 3, 0)));
    }

    #[test]
    fn scratch_mask_is_left_clear() {
        let mut frame = OwnedFrame::filled(16, 16, Rgb::BLACK);
        paint(&mut frame, 4, 4, 6, 6);
        let view = frame.view_mut().unwrap();
        let mut claimed = OccupancyMask::new(16, 16).unwrap();
        let mut scratch = OccupancyMask::new(16, 16).unwrap();

        let bbox = grower().grow_with_scratch(Point::new(4, 4), &mut claimed, &mut scratch, &view);
        assert_eq!(bbox, Some(BoundingBox::new(4, 4, 2, 2)));
        assert_eq!(scratch.count(), 0);
    }
}

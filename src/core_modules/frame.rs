// THEORY:
// `FrameView` is the only way the tracker touches pixel memory. It wraps a packed,
// row-major RGB888 buffer handed over by the frame source and exposes bounds-checked
// get/set accessors using 0-based coordinates. Growth and scan logic never see the
// raw buffer.
//
// Key principles:
// 1.  **Fail Loudly**: An out-of-range coordinate is a programming error. The accessors
//     panic with the offending coordinate instead of touching adjacent memory.
// 2.  **Borrowed, Not Owned**: The view borrows the buffer for the duration of one pass.
//     Ownership stays with the frame source (`OwnedFrame` when the buffer is moved
//     between tasks).
// 3.  **Debug Drawing Only**: `draw_line` exists for the overlay. Detection never writes
//     into the frame.

use crate::core_modules::pixel::pixel::{CHANNELS, Rgb};
use crate::error::TrackerError;

/// A bounds-checked view over a packed 3-channel pixel buffer.
#[derive(Debug)]
pub struct FrameView<'a> {
    width: usize,
    height: usize,
    data: &'a mut [u8],
}

impl<'a> FrameView<'a> {
    /// Wraps an RGB888 buffer. The buffer must hold exactly `width * height * 3` bytes.
    pub fn from_rgb888(width: usize, height: usize, data: &'a mut [u8]) -> Result<Self, TrackerError> {
        if width == 0 || height == 0 {
            return Err(TrackerError::EmptyFrame);
        }
        let expected = width * height * CHANNELS;
        if data.len() != expected {
            return Err(TrackerError::FrameSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> usize {
        assert!(
            x < self.width && y < self.height,
            "pixel ({x}, {y}) is outside the {}x{} frame",
            self.width,
            self.height
        );
        (y * self.width + x) * CHANNELS
    }

    #[inline]
    pub fn get_pixel(&self, x: usize, y: usize) -> Rgb {
        let offset = self.offset(x, y);
        Rgb::from(&self.data[offset..offset + CHANNELS])
    }

    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Rgb) {
        let offset = self.offset(x, y);
        self.data[offset..offset + CHANNELS].copy_from_slice(&<[u8; CHANNELS]>::from(color));
    }

    /// Rasterizes a line between two in-frame points with Bresenham's algorithm.
    /// Every cell on the line is written, stepping along the major axis so the line
    /// has no gaps.
    pub fn draw_line(&mut self, p0: (usize, usize), p1: (usize, usize), color: Rgb) {
        let (mut x0, mut y0) = (p0.0 as i64, p0.1 as i64);
        let (x1, y1) = (p1.0 as i64, p1.1 as i64);

        let dx = (x1 - x0).abs();
        let dy = (y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx - dy;

        loop {
            self.set_pixel(x0 as usize, y0 as usize, color);

            if x0 == x1 && y0 == y1 {
                break;
            }

            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x0 += sx;
            }
            if e2 < dx {
                err += dx;
                y0 += sy;
            }
        }
    }
}

/// An owned RGB888 frame, used to move a buffer between the frame source and the
/// worker that processes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnedFrame {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl OwnedFrame {
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            data,
        }
    }

    /// A frame filled with a single colour.
    pub fn filled(width: usize, height: usize, color: Rgb) -> Self {
        let pixel: [u8; CHANNELS] = color.into();
        let data = pixel.repeat(width * height);
        Self::new(width, height, data)
    }

    pub fn view_mut(&mut self) -> Result<FrameView<'_>, TrackerError> {
        FrameView::from_rgb888(self.width, self.height, &mut self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_wrong_buffer_length() {
        let mut data = vec![0u8; 10];
        let result = FrameView::from_rgb888(2, 2, &mut data);
        assert!(matches!(
            result,
            Err(TrackerError::FrameSizeMismatch {
                expected: 12,
                actual: 10
            })
        ));
    }

    #[test]
    fn rejects_empty_frame() {
        let mut data = Vec::new();
        assert!(matches!(
            FrameView::from_rgb888(0, 4, &mut data),
            Err(TrackerError::EmptyFrame)
        ));
    }

    #[test]
    fn set_then_get_pixel() {
        let mut frame = OwnedFrame::filled(4, 3, Rgb::BLACK);
        let mut view = frame.view_mut().unwrap();
        view.set_pixel(3, 2, Rgb::new(10, 20, 30));

        assert_eq!(view.get_pixel(3, 2), Rgb::new(10, 20, 30));
        assert_eq!(view.get_pixel(2, 2), Rgb::BLACK);
        // Last pixel of a row-major buffer.
        assert_eq!(&frame.data[33..36], &[10, 20, 30]);
    }

    #[test]
    #[should_panic(expected = "outside the 4x3 frame")]
    fn out_of_bounds_read_panics() {
        let mut frame = OwnedFrame::filled(4, 3, Rgb::BLACK);
        let view = frame.view_mut().unwrap();
        view.get_pixel(4, 0);
    }

    #[test]
    #[should_panic]
    fn out_of_bounds_write_panics() {
        let mut frame = OwnedFrame::filled(4, 3, Rgb::BLACK);
        let mut view = frame.view_mut().unwrap();
        view.set_pixel(0, 3, Rgb::WHITE);
    }

    #[test]
    fn horizontal_line_covers_every_cell() {
        let mut frame = OwnedFrame::filled(10, 5, Rgb::BLACK);
        let mut view = frame.view_mut().unwrap();
        view.draw_line((7, 2), (1, 2), Rgb::GREEN);

        for x in 0..10 {
            let expected = if (1..=7).contains(&x) { Rgb::GREEN } else { Rgb::BLACK };
            assert_eq!(view.get_pixel(x, 2), expected, "x = {x}");
        }
    }

    #[test]
    fn steep_line_has_no_gaps() {
        let mut frame = OwnedFrame::filled(10, 10, Rgb::BLACK);
        let mut view = frame.view_mut().unwrap();
        view.draw_line((2, 0), (4, 9), Rgb::GREEN);

        for y in 0..10 {
            let lit = (0..10).filter(|&x| view.get_pixel(x, y) == Rgb::GREEN).count();
            assert_eq!(lit, 1, "row {y}");
        }
        assert_eq!(view.get_pixel(2, 0), Rgb::GREEN);
        assert_eq!(view.get_pixel(4, 9), Rgb::GREEN);
    }

    #[test]
    fn single_point_line() {
        let mut frame = OwnedFrame::filled(3, 3, Rgb::BLACK);
        let mut view = frame.view_mut().unwrap();
        view.draw_line((1, 1), (1, 1), Rgb::GREEN);
        assert_eq!(view.get_pixel(1, 1), Rgb::GREEN);
    }
}

// THEORY:
// The `tracker` module adds memory to the detector. It owns the list of tracked
// boxes and, every frame, looks for each of them again close to where it was last
// seen instead of searching the whole frame.
//
// Key architectural principles:
// 1.  **Local Re-localization**: A track is searched for only inside its last box
//     expanded by a fixed margin (clamped to the frame). A marker that moved less than
//     the margin between frames is found again in the same list slot.
// 2.  **Lifecycle Management**:
//     - **Birth**: new tracks are appended by the incremental scanner through `push`.
//     - **Tracking**: a track whose window still holds unclaimed marker pixels takes the
//       extent of those pixels as its new box.
//     - **Death**: a track whose window holds none is removed that same frame. There is
//       no grace period.
// 3.  **Shared Claims**: Once a track is re-localized, its whole new box is claimed in
//     the frame-wide mask. Later tracks in list order and the band scan that follows
//     cannot attribute those pixels again. Overlapping windows are resolved by list
//     order only.
// 4.  **Bounded**: The list never holds more than `max_tracks` entries.

use crate::config::TrackerConfig;
use crate::core_modules::bounding_box::{BoundingBox, Extent, Point};
use crate::core_modules::frame::FrameView;
use crate::core_modules::occupancy::OccupancyMask;
use crate::core_modules::pixel::pixel::PixelClassifier;
use log::trace;

/// A box being tracked across frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    /// A unique ID for this track, stable for as long as the track lives.
    pub id: u64,
    /// The box found in the most recent frame.
    pub bbox: BoundingBox,
    /// The number of frames this track has been successfully re-localized.
    pub age: u32,
}

/// Owns the cross-frame track list.
#[derive(Debug)]
pub struct BlobTracker {
    /// The list of boxes currently being tracked, in creation order.
    tracks: Vec<Track>,
    /// A counter to ensure each new track gets a unique ID.
    next_id: u64,
    classifier: PixelClassifier,
    margin: usize,
    max_tracks: usize,
}

impl BlobTracker {
    pub fn new(config: &TrackerConfig) -> Self {
        Self {
            tracks: Vec::with_capacity(config.max_tracks),
            next_id: 0,
            classifier: PixelClassifier::new(config.brightness_threshold),
            margin: config.track_margin,
            max_tracks: config.max_tracks,
        }
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.tracks.len() >= self.max_tracks
    }

    pub fn max_tracks(&self) -> usize {
        self.max_tracks
    }

    /// Appends a newly discovered box. Returns `None` when the list is already full.
    pub fn push(&mut self, bbox: BoundingBox) -> Option<&Track> {
        if self.is_full() {
            return None;
        }
        let track = Track {
            id: self.next_id,
            bbox,
            age: 0,
        };
        self.next_id += 1;
        trace!("track {} born at {:?}", track.id, track.bbox);
        self.tracks.push(track);
        self.tracks.last()
    }

    /// Drops every track. IDs keep counting up.
    pub fn clear(&mut self) {
        self.tracks.clear();
    }

    /// Re-localizes every track in list order, removing those that were not found.
    /// Each surviving track's new box is claimed in `claimed`. Returns the lost tracks.
    pub fn update(&mut self, frame: &FrameView, claimed: &mut OccupancyMask) -> Vec<Track> {
        let mut lost = Vec::new();
        let mut survivors = Vec::with_capacity(self.tracks.len());

        for mut track in self.tracks.drain(..) {
            match relocalize(&self.classifier, self.margin, track.bbox, frame, claimed) {
                Some(bbox) => {
                    claimed.fill_rect(bbox.x, bbox.y, bbox.x + bbox.w, bbox.y + bbox.h);
                    track.bbox = bbox;
                    track.age += 1;
                    survivors.push(track);
                }
                None => {
                    trace!("track {} lost at {:?}", track.id, track.bbox);
                    lost.push(track);
                }
            }
        }

        self.tracks = survivors;
        lost
    }
}

/// Scans the search window around `last` and returns the extent of the unclaimed
/// marker pixels inside it.
fn relocalize(
    classifier: &PixelClassifier,
    margin: usize,
    last: BoundingBox,
    frame: &FrameView,
    claimed: &OccupancyMask,
) -> Option<BoundingBox> {
    let window = last.expanded(margin, frame.width(), frame.height());
    let max = window.max();
    let mut extent = Extent::default();

    for y in window.y..=max.y {
        for x in window.x..=max.x {
            if !claimed.get(x, y) && classifier.is_marker_pixel(frame.get_pixel(x, y)) {
                extent.include(Point::new(x, y));
            }
        }
    }

    extent.to_box()
}

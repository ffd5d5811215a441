// THEORY:
// The `IncrementalScanner` discovers markers that no track knows about yet. A full
// frame scan every frame is too expensive for the device, so the frame is split into
// a fixed number of horizontal bands and each call scans only the band under the
// cursor. Full-frame coverage is amortized over `bands` calls.
//
// Algorithm:
// 1.  Rows of band `k` are `k * H / bands .. (k + 1) * H / bands`. The split is
//     proportional, so every row belongs to exactly one band whatever the height.
// 2.  Pixels are visited left-to-right, top-to-bottom. An unclaimed marker pixel seeds
//     a region growth; the resulting box becomes a new track and its whole extent is
//     claimed.
// 3.  When the track list reaches its cap the rest of the band is abandoned.
// 4.  The cursor advances by one band per call, whatever happened, and wraps.

use crate::config::TrackerConfig;
use crate::core_modules::bounding_box::Point;
use crate::core_modules::frame::FrameView;
use crate::core_modules::occupancy::OccupancyMask;
use crate::core_modules::pixel::pixel::PixelClassifier;
use crate::core_modules::region_grower::region_grower::RegionGrower;
use crate::core_modules::tracker::{BlobTracker, Track};
use std::ops::Range;

/// The outcome of scanning one band.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BandScan {
    /// Index of the band that was scanned.
    pub band: usize,
    /// Frame rows the band covers.
    pub rows: Range<usize>,
    /// Tracks created by this scan, in discovery order.
    pub discovered: Vec<Track>,
    /// The scan stopped early because the track list was full.
    pub capped: bool,
}

/// Round-robin band scanner. Owns the scan cursor for the whole session.
#[derive(Debug)]
pub struct IncrementalScanner {
    grower: RegionGrower,
    bands: usize,
    cursor: usize,
}

impl IncrementalScanner {
    pub fn new(config: &TrackerConfig) -> Self {
        let classifier = PixelClassifier::new(config.brightness_threshold);
        Self {
            grower: RegionGrower::new(classifier, config.search_radius),
            bands: config.scan_bands.max(1),
            cursor: 0,
        }
    }

    /// The band the next call will scan.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn bands(&self) -> usize {
        self.bands
    }

    /// Rows covered by `band` in a frame of the given height.
    pub fn band_rows(&self, band: usize, height: usize) -> Range<usize> {
        (band * height / self.bands)..((band + 1) * height / self.bands)
    }

    /// Scans the band under the cursor for unclaimed markers and appends them to the
    /// tracker. `scratch` must be an all-false mask of the frame's size; it is left
    /// all-false.
    pub fn scan_next_band(
        &mut self,
        frame: &FrameView,
        tracker: &mut BlobTracker,
        claimed: &mut OccupancyMask,
        scratch: &mut OccupancyMask,
    ) -> BandScan {
        let band = self.cursor;
        let rows = self.band_rows(band, frame.height());
        self.cursor = (self.cursor + 1) % self.bands;

        let mut discovered = Vec::new();
        let mut capped = tracker.is_full();

        'band: for y in rows.clone() {
            if capped {
                break;
            }
            for x in 0..frame.width() {
                if claimed.get(x, y)
                    || !self
                        .grower
                        .classifier()
                        .is_marker_pixel(frame.get_pixel(x, y))
                {
                    continue;
                }

                let Some(bbox) =
                    self.grower
                        .grow_with_scratch(Point::new(x, y), claimed, scratch, frame)
                else {
                    continue;
                };
                claimed.fill_rect(bbox.x, bbox.y, bbox.x + bbox.w, bbox.y + bbox.h);

                if let Some(track) = tracker.push(bbox) {
                    discovered.push(track.clone());
                }
                if tracker.is_full() {
                    capped = true;
                    break 'band;
                }
            }
        }

        BandScan {
            band,
            rows,
            discovered,
            capped,
        }
    }
}

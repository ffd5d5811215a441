// THEORY:
// The `pipeline` module is the top-level API of the tracker. `MarkerPipeline` is the
// single per-frame driver: it owns the tracker context (track list and scan cursor)
// and composes the stages of one pass in a fixed order.
//
// Stage order per frame:
// 1.  Mask allocation. If it fails the pass is abandoned before any state changes.
// 2.  Track update: every known track is re-localized and its box claimed.
// 3.  Band scan: new markers are discovered in one band, skipping claimed pixels.
//     Both stages share the same claimed mask, track update first.
// 4.  Overlay (optional): box diagonals on re-localized tracks, crosshair on all.
// 5.  Actuator command derived from the resulting track list.
//
// The pass runs to completion on the calling thread. Nothing from a pass survives
// except the track list and the cursor.

use crate::config::TrackerConfig;
use crate::core_modules::actuator::ActuatorCommand;
use crate::core_modules::frame::FrameView;
use crate::core_modules::occupancy::{HeapAllocator, MaskAllocator, OccupancyMask};
use crate::core_modules::overlay;
use crate::core_modules::scanner::IncrementalScanner;
use crate::core_modules::tracker::BlobTracker;
use crate::error::TrackerError;
use log::{debug, warn};
use std::ops::Range;
use std::time::{Duration, Instant};

// Re-export key data structures for the public API.
pub use crate::core_modules::bounding_box::BoundingBox;
pub use crate::core_modules::tracker::Track;

/// The output of the pipeline for a single frame.
#[derive(Debug, Clone)]
pub struct FrameReport {
    /// Sequence number of the processed frame, starting at 0.
    pub frame_index: u64,
    /// The full track list after this pass.
    pub tracks: Vec<Track>,
    /// Tracks removed this pass because their marker was not found again.
    pub lost: Vec<Track>,
    /// Tracks created by this pass's band scan.
    pub discovered: Vec<Track>,
    /// Band scanned for new markers and the rows it covered.
    pub band: usize,
    pub scanned_rows: Range<usize>,
    /// Actuator command aimed at the tracked centroid.
    pub command: ActuatorCommand,
    /// Wall-clock duration of the pass.
    pub elapsed: Duration,
}

/// The per-frame detection and tracking driver.
pub struct MarkerPipeline<A: MaskAllocator = HeapAllocator> {
    config: TrackerConfig,
    tracker: BlobTracker,
    scanner: IncrementalScanner,
    allocator: A,
    frame_count: u64,
    frame_size: Option<(usize, usize)>,
}

impl MarkerPipeline<HeapAllocator> {
    pub fn new(config: TrackerConfig) -> Result<Self, TrackerError> {
        Self::with_allocator(config, HeapAllocator)
    }
}

impl<A: MaskAllocator> MarkerPipeline<A> {
    /// Creates a pipeline that takes its mask storage from `allocator`.
    pub fn with_allocator(config: TrackerConfig, allocator: A) -> Result<Self, TrackerError> {
        config.validate()?;
        Ok(Self {
            tracker: BlobTracker::new(&config),
            scanner: IncrementalScanner::new(&config),
            config,
            allocator,
            frame_count: 0,
            frame_size: None,
        })
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// The current track list.
    pub fn tracks(&self) -> &[Track] {
        self.tracker.tracks()
    }

    pub fn allocator(&self) -> &A {
        &self.allocator
    }

    /// Runs one full detection and tracking pass over `frame`.
    pub fn process_frame(&mut self, frame: &mut FrameView) -> Result<FrameReport, TrackerError> {
        let started = Instant::now();
        let (width, height) = (frame.width(), frame.height());

        // --- 1. Mask Allocation ---
        let mut claimed = match OccupancyMask::with_allocator(width, height, &mut self.allocator) {
            Ok(mask) => mask,
            Err(err) => {
                warn!("frame {} skipped: {err}", self.frame_count);
                return Err(err);
            }
        };
        let mut scratch = match OccupancyMask::with_allocator(width, height, &mut self.allocator) {
            Ok(mask) => mask,
            Err(err) => {
                claimed.release(&mut self.allocator);
                warn!("frame {} skipped: {err}", self.frame_count);
                return Err(err);
            }
        };

        if self.frame_size.is_some_and(|size| size != (width, height)) {
            warn!(
                "frame size changed to {width}x{height}, dropping {} tracks",
                self.tracker.len()
            );
            self.tracker.clear();
        }
        self.frame_size = Some((width, height));

        // --- 2. Track Update ---
        let lost = self.tracker.update(frame, &mut claimed);
        let relocalized = self.tracker.len();

        // --- 3. Band Scan ---
        let scan = self
            .scanner
            .scan_next_band(frame, &mut self.tracker, &mut claimed, &mut scratch);

        claimed.release(&mut self.allocator);
        scratch.release(&mut self.allocator);

        // --- 4. Overlay ---
        if self.config.draw_overlay {
            for track in &self.tracker.tracks()[..relocalized] {
                overlay::draw_box_cross(frame, &track.bbox);
            }
            for track in self.tracker.tracks() {
                overlay::draw_crosshair(frame, &track.bbox);
            }
        }

        // --- 5. Actuator Command ---
        let command = ActuatorCommand::from_tracks(self.tracker.tracks(), width, height);

        let report = FrameReport {
            frame_index: self.frame_count,
            tracks: self.tracker.tracks().to_vec(),
            lost,
            discovered: scan.discovered,
            band: scan.band,
            scanned_rows: scan.rows,
            command,
            elapsed: started.elapsed(),
        };
        self.frame_count += 1;

        debug!(
            "frame {}: {} tracks ({} lost, {} new, band {}{}) in {:?}",
            report.frame_index,
            report.tracks.len(),
            report.lost.len(),
            report.discovered.len(),
            report.band,
            if scan.capped { ", capped" } else { "" },
            report.elapsed
        );

        Ok(report)
    }
}

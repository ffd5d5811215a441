// THEORY:
// This file is the main entry point for the `marker_tracker` library crate. It
// exports the `MarkerPipeline` (one detection and tracking pass per frame) and the
// `FrameWorker` that confines those passes to a single task, together with the
// configuration and error types they use.
//
// The building blocks in `core_modules` are public as well: the pixel classifier,
// the bounds-checked frame view, occupancy masks, the region grower, the blob
// tracker and the incremental band scanner.

pub mod config;
pub mod core_modules;
pub mod error;
pub mod frame_worker;
pub mod pipeline;

pub use config::TrackerConfig;
pub use core_modules::frame::{FrameView, OwnedFrame};
pub use error::TrackerError;
pub use frame_worker::{FrameOutcome, FrameWorker};
pub use pipeline::{BoundingBox, FrameReport, MarkerPipeline, Track};

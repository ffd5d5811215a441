// THEORY:
// Every fallible operation of the tracker reports through a single error type.
// Out-of-bounds pixel or mask access is not represented here: it is a contract
// violation and panics at the accessor. "No markers found" is not an error either;
// it is an empty track list.

/// Errors produced by the marker tracking pipeline.
#[derive(thiserror::Error, Debug)]
pub enum TrackerError {
    /// The frame buffer length does not match `width * height * 3`.
    #[error("Frame buffer length ({actual}) does not match the frame size ({expected})")]
    FrameSizeMismatch { expected: usize, actual: usize },

    /// The frame has zero width or zero height.
    #[error("Frame has zero width or height")]
    EmptyFrame,

    /// Mask storage could not be reserved. The pass is aborted.
    #[error("Failed to allocate occupancy mask of {cells} cells")]
    MaskAllocation { cells: usize },

    /// A configuration value is out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The configuration file could not be parsed.
    #[error(transparent)]
    Config(#[from] serde_json::Error),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    /// The frame worker task has shut down.
    #[error("Frame worker is no longer running")]
    WorkerClosed,
}

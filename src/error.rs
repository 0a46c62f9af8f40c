//! Error type shared by the tracker and its integration layer.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrackerError {
    /// A frame dimension was zero, so positions cannot be normalised.
    #[error("invalid frame size {width}x{height}: both dimensions must be non-zero")]
    InvalidFrameSize { width: u32, height: u32 },

    /// The tracker configuration is inconsistent.
    #[error("invalid tracker configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, TrackerError>;

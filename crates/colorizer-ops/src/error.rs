//! Error types for the colorizer.

use thiserror::Error;

/// Error type for colorizer operations.
///
/// Every failure is returned to the caller; nothing is retried or logged
/// here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorizeError {
    /// Unknown preset or unparsable settings. The previous configuration
    /// stays active.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Format or geometry the engine cannot process, or frames that do not
    /// match the negotiated stream.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Missing or inconsistent frame planes.
    #[error("invalid frame: {0}")]
    InvalidFrame(String),
}

/// Result type for colorizer operations.
pub type ColorizeResult<T> = Result<T, ColorizeError>;

impl From<colorizer_lut::LutError> for ColorizeError {
    fn from(err: colorizer_lut::LutError) -> Self {
        Self::InvalidConfiguration(err.to_string())
    }
}

impl From<colorizer_core::Error> for ColorizeError {
    fn from(err: colorizer_core::Error) -> Self {
        match err {
            colorizer_core::Error::InvalidFrame(msg) => Self::InvalidFrame(msg),
            other => Self::UnsupportedFormat(other.to_string()),
        }
    }
}

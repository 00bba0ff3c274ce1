//! Error types for colorizer-core operations.
//!
//! Covers the failure modes of describing video data: unknown or unsupported
//! pixel formats, impossible geometry, and frame descriptors whose planes do
//! not match what their format requires.
//!
//! # Usage
//!
//! ```rust
//! use colorizer_core::{Error, Result};
//!
//! fn check_width(width: u32, height: u32) -> Result<()> {
//!     if width == 0 {
//!         return Err(Error::invalid_dimensions(width, height, "width is zero"));
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Used By
//!
//! - [`crate::format::VideoInfo`] - geometry validation
//! - [`crate::frame::VideoFrame`] - plane validation
//! - `colorizer-ops` - wrapped into the colorizer error taxonomy

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while describing video formats and frames.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The format exists but cannot be used for the requested role.
    ///
    /// For example, a color format offered as the luma source.
    #[error("unsupported pixel format: {format}")]
    UnsupportedFormat {
        /// Format name or description
        format: String,
    },

    /// A format name could not be parsed.
    #[error("unknown pixel format name: {0}")]
    UnknownFormat(String),

    /// Width or height is zero, or the buffer size overflows.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// Two frames or infos that must agree in geometry do not.
    #[error("dimension mismatch: {a_width}x{a_height} vs {b_width}x{b_height}")]
    DimensionMismatch {
        /// First width
        a_width: u32,
        /// First height
        a_height: u32,
        /// Second width
        b_width: u32,
        /// Second height
        b_height: u32,
    },

    /// A frame descriptor is missing planes or its planes are too small.
    #[error("invalid frame: {0}")]
    InvalidFrame(String),
}

impl Error {
    /// Creates an [`Error::UnsupportedFormat`] error.
    #[inline]
    pub fn unsupported_format(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::DimensionMismatch`] error.
    #[inline]
    pub fn dimension_mismatch(a: (u32, u32), b: (u32, u32)) -> Self {
        Self::DimensionMismatch {
            a_width: a.0,
            a_height: a.1,
            b_width: b.0,
            b_height: b.1,
        }
    }

    /// Creates an [`Error::InvalidFrame`] error.
    #[inline]
    pub fn invalid_frame(msg: impl Into<String>) -> Self {
        Self::InvalidFrame(msg.into())
    }

    /// Returns `true` if this error is about a format or geometry the
    /// caller asked for, as opposed to a malformed frame buffer.
    #[inline]
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedFormat { .. }
                | Self::UnknownFormat(_)
                | Self::InvalidDimensions { .. }
                | Self::DimensionMismatch { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch() {
        let err = Error::dimension_mismatch((640, 480), (320, 240));
        let msg = err.to_string();
        assert!(msg.contains("640x480"));
        assert!(msg.contains("320x240"));
        assert!(err.is_format_error());
    }

    #[test]
    fn test_invalid_frame_is_not_format_error() {
        let err = Error::invalid_frame("plane 0 too short");
        assert!(err.to_string().contains("plane 0"));
        assert!(!err.is_format_error());
    }
}

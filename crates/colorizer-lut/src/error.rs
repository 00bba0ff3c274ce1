//! LUT error types.

use thiserror::Error;

/// Result type for LUT operations.
pub type LutResult<T> = Result<T, LutError>;

/// Errors that can occur while selecting a palette.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LutError {
    /// Preset name is not one of the known nicks.
    #[error("unknown preset: {0:?}")]
    UnknownPreset(String),

    /// Preset value is outside the known enumeration.
    #[error("unknown preset value: {0}")]
    UnknownPresetValue(u32),
}

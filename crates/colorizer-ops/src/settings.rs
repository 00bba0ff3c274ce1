//! Colorizer configuration.
//!
//! The three user-facing properties (`preset`, `near_cut`, `far_cut`) as one
//! serializable value. Missing fields take their defaults; unknown fields
//! are rejected so typos do not pass silently.
//!
//! ```rust
//! use colorizer_lut::Preset;
//! use colorizer_ops::ColorizerSettings;
//!
//! let settings = ColorizerSettings::from_yaml_str("preset: jet\nfar_cut: 4000\n").unwrap();
//! assert_eq!(settings.preset, Preset::Jet);
//! assert_eq!(settings.near_cut, 0);
//! assert_eq!(settings.far_cut, 4000);
//! ```

use std::path::Path;

use colorizer_lut::Preset;
use serde::{Deserialize, Serialize};

use crate::{ColorizeError, ColorizeResult, CutRange};

/// Preset and cut range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorizerSettings {
    /// Palette preset. Default: `none`.
    pub preset: Preset,
    /// Intensity mapped to the first table entry. Default: 0.
    pub near_cut: u16,
    /// Intensity mapped to the last table entry. Default: 65535.
    pub far_cut: u16,
}

impl Default for ColorizerSettings {
    fn default() -> Self {
        Self {
            preset: Preset::None,
            near_cut: 0,
            far_cut: u16::MAX,
        }
    }
}

impl ColorizerSettings {
    /// The cut range described by `near_cut` and `far_cut`.
    #[inline]
    pub fn cut(&self) -> CutRange {
        CutRange::new(self.near_cut, self.far_cut)
    }

    /// Parses settings from YAML.
    pub fn from_yaml_str(yaml: &str) -> ColorizeResult<Self> {
        serde_yaml::from_str(yaml).map_err(|e| ColorizeError::InvalidConfiguration(e.to_string()))
    }

    /// Reads settings from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> ColorizeResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            ColorizeError::InvalidConfiguration(format!("{}: {}", path.display(), e))
        })?;
        Self::from_yaml_str(&text)
    }

    /// Serializes settings to YAML.
    pub fn to_yaml_string(&self) -> ColorizeResult<String> {
        serde_yaml::to_string(self).map_err(|e| ColorizeError::InvalidConfiguration(e.to_string()))
    }
}

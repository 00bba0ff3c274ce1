//! Palette presets.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{LutError, LutResult};

/// Selects the palette used to convert grayscale to color.
///
/// Serializes as its lowercase nick (`"none"`, `"jet"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Do nothing: intensity is copied to every color channel.
    #[default]
    None,
    /// Classic jet map: dark blue, cyan, yellow, dark red.
    Jet,
}

impl Preset {
    /// All presets, in enumeration order.
    pub fn all() -> &'static [Self] {
        &[Self::None, Self::Jet]
    }

    /// Lowercase nick used in configuration.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Jet => "jet",
        }
    }

    /// Human-readable description.
    pub const fn description(&self) -> &'static str {
        match self {
            Self::None => "Do nothing preset",
            Self::Jet => "Apply jet color map to image",
        }
    }

    /// Numeric value of the enumeration.
    pub const fn value(&self) -> u32 {
        match self {
            Self::None => 0,
            Self::Jet => 1,
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = LutError;

    fn from_str(s: &str) -> LutResult<Self> {
        let s = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| LutError::UnknownPreset(s.to_string()))
    }
}

impl TryFrom<u32> for Preset {
    type Error = LutError;

    fn try_from(value: u32) -> LutResult<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|p| p.value() == value)
            .ok_or(LutError::UnknownPresetValue(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("jet".parse::<Preset>().unwrap(), Preset::Jet);
        assert_eq!(" JET ".parse::<Preset>().unwrap(), Preset::Jet);
        assert_eq!("none".parse::<Preset>().unwrap(), Preset::None);
        assert_eq!(
            "viridis".parse::<Preset>(),
            Err(LutError::UnknownPreset("viridis".into()))
        );
    }

    #[test]
    fn test_values() {
        for preset in Preset::all() {
            assert_eq!(Preset::try_from(preset.value()).unwrap(), *preset);
        }
        assert_eq!(Preset::try_from(7), Err(LutError::UnknownPresetValue(7)));
    }

    #[test]
    fn test_default_is_passthrough() {
        assert_eq!(Preset::default(), Preset::None);
        assert_eq!(Preset::Jet.to_string(), "jet");
    }
}

//! 256-entry color lookup table and the palette builder.
//!
//! A [`ColorTable`] maps an 8-bit index to an RGB triple. The transform
//! engine normalizes every source intensity into this index domain, so the
//! table size is fixed regardless of source bit depth.
//!
//! # Example
//!
//! ```rust
//! use colorizer_lut::{build_table, Palette, Preset};
//!
//! let Palette::Mapped(table) = build_table(Preset::Jet) else {
//!     unreachable!()
//! };
//! assert_eq!(table.get(0), [0, 0, 128]);
//! assert_eq!(table.get(255), [128, 0, 0]);
//! ```

use std::fmt;

use crate::Preset;

/// Number of entries in every color table.
pub const TABLE_SIZE: usize = 256;

/// Rec.709 luma weights scaled by 10 000.
const LUMA_WEIGHTS: [u32; 3] = [2126, 7152, 722];

/// A fixed-size RGB lookup table.
#[derive(Clone, PartialEq, Eq)]
pub struct ColorTable {
    entries: [[u8; 3]; TABLE_SIZE],
}

impl ColorTable {
    /// Builds a table by evaluating `f` for every index.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(u8) -> [u8; 3],
    {
        let mut entries = [[0u8; 3]; TABLE_SIZE];
        for (i, entry) in entries.iter_mut().enumerate() {
            *entry = f(i as u8);
        }
        Self { entries }
    }

    /// Color at `index`.
    #[inline(always)]
    pub fn get(&self, index: u8) -> [u8; 3] {
        self.entries[index as usize]
    }

    /// All entries, index order.
    #[inline]
    pub fn entries(&self) -> &[[u8; 3]; TABLE_SIZE] {
        &self.entries
    }

    /// Rec.709 luma of the entry at `index`, scaled by 10 000.
    pub fn luminance(&self, index: u8) -> u32 {
        let [r, g, b] = self.get(index);
        r as u32 * LUMA_WEIGHTS[0] + g as u32 * LUMA_WEIGHTS[1] + b as u32 * LUMA_WEIGHTS[2]
    }
}

impl fmt::Debug for ColorTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColorTable")
            .field("first", &self.entries[0])
            .field("last", &self.entries[TABLE_SIZE - 1])
            .finish()
    }
}

/// Result of building a preset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Palette {
    /// No recoloring. Consumers copy intensity straight to the output.
    Identity,
    /// Look every index up in the table.
    Mapped(ColorTable),
}

impl Palette {
    /// Whether this palette leaves intensities unchanged.
    #[inline]
    pub fn is_identity(&self) -> bool {
        matches!(self, Self::Identity)
    }

    /// The lookup table, if any.
    #[inline]
    pub fn table(&self) -> Option<&ColorTable> {
        match self {
            Self::Identity => None,
            Self::Mapped(table) => Some(table),
        }
    }
}

/// Builds the palette for `preset`.
///
/// Pure and deterministic. `Preset::None` yields [`Palette::Identity`]
/// rather than a gray ramp so the engine can skip the lookup entirely.
pub fn build_table(preset: Preset) -> Palette {
    match preset {
        Preset::None => Palette::Identity,
        Preset::Jet => Palette::Mapped(ColorTable::from_fn(jet)),
    }
}

/// Jet color for table index `i`.
///
/// With `t = i / 255` each channel is `clamp(1.5 - |4t - c|, 0, 1)`,
/// centred at `c = 3` (red), `2` (green) and `1` (blue). Scaled to 8 bits
/// every channel lands on a half step, so the curve is evaluated in twice
/// the target resolution and rounded half up:
///
/// ```text
/// 2 * 255 * channel = 765 - 2 * |4i - 255c|
/// ```
pub fn jet(i: u8) -> [u8; 3] {
    let four_i = 4 * i as i32;
    let channel = |centre: i32| -> u8 {
        let doubled = (765 - 2 * (four_i - 255 * centre).abs()).clamp(0, 510);
        ((doubled + 1) / 2) as u8
    };
    [channel(3), channel(2), channel(1)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn jet_table() -> ColorTable {
        match build_table(Preset::Jet) {
            Palette::Mapped(table) => table,
            Palette::Identity => panic!("jet must build a table"),
        }
    }

    /// Continuous jet curve, 0..=255 per channel.
    fn reference(i: u8) -> [f32; 3] {
        let t = i as f32 / 255.0;
        let ramp = |c: f32| (1.5 - (4.0 * t - c).abs()).clamp(0.0, 1.0) * 255.0;
        [ramp(3.0), ramp(2.0), ramp(1.0)]
    }

    #[test]
    fn test_none_is_identity() {
        assert!(build_table(Preset::None).is_identity());
        assert!(build_table(Preset::None).table().is_none());
    }

    #[test]
    fn test_deterministic() {
        for preset in Preset::all() {
            assert_eq!(build_table(*preset), build_table(*preset));
        }
    }

    #[test]
    fn test_jet_endpoints() {
        let table = jet_table();
        assert_eq!(table.get(0), [0, 0, 128]);
        assert_eq!(table.get(255), [128, 0, 0]);
    }

    #[test]
    fn test_jet_breakpoints() {
        let table = jet_table();
        // Blue saturates, cyan, yellow, red plateau.
        assert_eq!(table.get(32)[2], 255);
        assert_eq!(table.get(96)[1], 255);
        assert_eq!(table.get(159)[1], 255);
        assert_eq!(table.get(160)[0], 255);
        assert_eq!(table.get(160)[2], 0);
        assert_eq!(table.get(223)[0], 255);
        assert_eq!(table.get(224), [252, 0, 0]);
    }

    #[test]
    fn test_jet_matches_reference_curve() {
        let table = jet_table();
        for i in 0..=255u8 {
            let expected = reference(i);
            let got = table.get(i);
            for c in 0..3 {
                assert_abs_diff_eq!(got[c] as f32, expected[c], epsilon = 0.501);
            }
        }
    }

    #[test]
    fn test_jet_luminance_rises_through_midpoint() {
        let table = jet_table();
        for i in 0..159u8 {
            assert!(
                table.luminance(i + 1) >= table.luminance(i),
                "luminance drops between {} and {}",
                i,
                i + 1
            );
        }
        // Past the yellow peak the red plateau is darker.
        assert!(table.luminance(200) < table.luminance(159));
    }
}

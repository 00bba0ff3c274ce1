//! Near/far cut: linear remap of source intensity onto the table index.
//!
//! The cut selects the intensity window `[near, far]` that is stretched
//! over the 256 table entries. Values below `near` map to index 0, values
//! above `far` to index 255.
//!
//! # Example
//!
//! ```rust
//! use colorizer_ops::CutRange;
//!
//! let cut = CutRange::new(100, 200);
//! assert_eq!(cut.index(0), 0);
//! assert_eq!(cut.index(128), 71);
//! assert_eq!(cut.index(255), 255);
//! ```

/// Intensity window mapped onto table indices `0..=255`.
///
/// Any pair of values is accepted. When `far <= near` the window is
/// degenerate and acts as a threshold at `near`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CutRange {
    /// Intensity mapped to index 0.
    pub near: u16,
    /// Intensity mapped to index 255.
    pub far: u16,
}

impl Default for CutRange {
    fn default() -> Self {
        Self {
            near: 0,
            far: u16::MAX,
        }
    }
}

impl CutRange {
    /// Creates a cut range.
    #[inline]
    pub const fn new(near: u16, far: u16) -> Self {
        Self { near, far }
    }

    /// Clamps both ends to the largest value the source can hold.
    #[inline]
    pub fn clamped(self, max: u16) -> Self {
        Self {
            near: self.near.min(max),
            far: self.far.min(max),
        }
    }

    /// Whether the window has no width.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.far <= self.near
    }

    /// Table index for intensity `v`.
    ///
    /// `((v - near) * 255) / (far - near)`, clamped to `0..=255`, with
    /// integer division. A degenerate window yields 0 for `v <= near` and
    /// 255 otherwise.
    #[inline(always)]
    pub fn index(&self, v: u16) -> u8 {
        if v <= self.near {
            return 0;
        }
        if v >= self.far {
            return u8::MAX;
        }
        let span = (self.far - self.near) as u32;
        (((v - self.near) as u32 * 255) / span) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_range_is_identity_for_8bit() {
        let cut = CutRange::new(0, 255);
        for v in 0..=255u16 {
            assert_eq!(cut.index(v) as u16, v);
        }
    }

    #[test]
    fn test_outside_window_clamps() {
        let cut = CutRange::new(1000, 3000);
        for v in [0u16, 1, 999, 1000] {
            assert_eq!(cut.index(v), 0);
        }
        for v in [3000u16, 3001, 40000, u16::MAX] {
            assert_eq!(cut.index(v), 255);
        }
        assert_eq!(cut.index(2000), 127);
    }

    #[test]
    fn test_degenerate_threshold() {
        let k = 42;
        let cut = CutRange::new(k, k);
        assert!(cut.is_degenerate());
        for v in 0..=u16::MAX {
            let expected = if v <= k { 0 } else { 255 };
            assert_eq!(cut.index(v), expected);
        }
    }

    #[test]
    fn test_inverted_window_thresholds_at_near() {
        let cut = CutRange::new(500, 100);
        assert!(cut.is_degenerate());
        assert_eq!(cut.index(300), 0);
        assert_eq!(cut.index(500), 0);
        assert_eq!(cut.index(501), 255);
    }

    #[test]
    fn test_clamped_to_source_max() {
        let cut = CutRange::default().clamped(255);
        assert_eq!(cut, CutRange::new(0, 255));
        assert_eq!(CutRange::new(300, 400).clamped(255), CutRange::new(255, 255));
    }

    #[test]
    fn test_full_16bit_range() {
        let cut = CutRange::default();
        assert_eq!(cut.index(0), 0);
        assert_eq!(cut.index(257), 1);
        assert_eq!(cut.index(32768), 127);
        assert_eq!(cut.index(u16::MAX), 255);
    }
}

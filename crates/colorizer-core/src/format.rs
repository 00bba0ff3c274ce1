//! Pixel formats and video geometry.
//!
//! This module is the single description of every memory layout the
//! colorizer reads or writes.
//!
//! # Types
//!
//! - [`VideoFormat`] - closed set of supported pixel layouts
//! - [`LumaSample`] - how an intensity sample is stored in a luma plane
//! - [`ColorLayout`] - where red, green and blue land in an output pixel
//! - [`VideoInfo`] - format plus width and height
//!
//! # Usage
//!
//! ```rust
//! use colorizer_core::format::{VideoFormat, VideoInfo};
//!
//! let depth: VideoFormat = "GRAY16_LE".parse().unwrap();
//! assert!(depth.is_luma_source());
//!
//! let info = VideoInfo::new(VideoFormat::Rgba, 640, 480).unwrap();
//! assert_eq!(info.row_bytes(0).unwrap(), 640 * 4);
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Supported pixel layouts.
///
/// Names follow the usual video-pipeline nicks (`GRAY16_LE`, `RGBx`, ...).
/// Luma formats are valid as input, color formats as output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VideoFormat {
    /// 8-bit grayscale, one plane.
    Gray8,
    /// 16-bit little-endian grayscale (depth sensors).
    Gray16Le,
    /// 16-bit big-endian grayscale.
    Gray16Be,
    /// Planar YUV 4:2:0. Only the Y plane is read.
    I420,
    /// Semi-planar YUV 4:2:0. Only the Y plane is read.
    Nv12,
    /// Packed 24-bit R, G, B.
    Rgb,
    /// Packed 24-bit B, G, R.
    Bgr,
    /// Packed 32-bit R, G, B, A.
    Rgba,
    /// Packed 32-bit B, G, R, A.
    Bgra,
    /// Packed 32-bit A, R, G, B.
    Argb,
    /// Packed 32-bit A, B, G, R.
    Abgr,
    /// Packed 32-bit R, G, B, filler.
    Rgbx,
    /// Packed 32-bit B, G, R, filler.
    Bgrx,
    /// Packed 32-bit filler, R, G, B.
    Xrgb,
    /// Packed 32-bit filler, B, G, R.
    Xbgr,
    /// Planar 8-bit G, B, R (three planes, in that order).
    Gbrp,
}

/// Storage of one intensity sample in a luma plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LumaSample {
    /// One byte per sample.
    U8,
    /// Two bytes per sample, little-endian.
    U16Le,
    /// Two bytes per sample, big-endian.
    U16Be,
}

impl LumaSample {
    /// Bytes occupied by one sample.
    #[inline]
    pub const fn bytes(&self) -> usize {
        match self {
            Self::U8 => 1,
            Self::U16Le | Self::U16Be => 2,
        }
    }

    /// Largest value a sample can hold.
    #[inline]
    pub const fn max_value(&self) -> u16 {
        match self {
            Self::U8 => u8::MAX as u16,
            Self::U16Le | Self::U16Be => u16::MAX,
        }
    }
}

/// Placement of color channels in an output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorLayout {
    /// All channels interleaved in plane 0.
    Packed {
        /// Bytes per pixel (3 or 4).
        pixel_stride: usize,
        /// Byte offsets of R, G and B within a pixel.
        rgb: [usize; 3],
        /// Offset of the alpha or filler byte, written opaque.
        fill: Option<usize>,
    },
    /// One 8-bit plane per channel: plane 0 = G, 1 = B, 2 = R.
    PlanarGbr,
}

const ALL_FORMATS: [VideoFormat; 16] = [
    VideoFormat::Gray8,
    VideoFormat::Gray16Le,
    VideoFormat::Gray16Be,
    VideoFormat::I420,
    VideoFormat::Nv12,
    VideoFormat::Rgb,
    VideoFormat::Bgr,
    VideoFormat::Rgba,
    VideoFormat::Bgra,
    VideoFormat::Argb,
    VideoFormat::Abgr,
    VideoFormat::Rgbx,
    VideoFormat::Bgrx,
    VideoFormat::Xrgb,
    VideoFormat::Xbgr,
    VideoFormat::Gbrp,
];

impl VideoFormat {
    /// Every supported format.
    pub fn all() -> &'static [Self] {
        &ALL_FORMATS
    }

    /// Canonical nick.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Gray8 => "GRAY8",
            Self::Gray16Le => "GRAY16_LE",
            Self::Gray16Be => "GRAY16_BE",
            Self::I420 => "I420",
            Self::Nv12 => "NV12",
            Self::Rgb => "RGB",
            Self::Bgr => "BGR",
            Self::Rgba => "RGBA",
            Self::Bgra => "BGRA",
            Self::Argb => "ARGB",
            Self::Abgr => "ABGR",
            Self::Rgbx => "RGBx",
            Self::Bgrx => "BGRx",
            Self::Xrgb => "xRGB",
            Self::Xbgr => "xBGR",
            Self::Gbrp => "GBR",
        }
    }

    /// How the luma plane stores samples, or `None` for color formats.
    #[inline]
    pub const fn luma_sample(&self) -> Option<LumaSample> {
        match self {
            Self::Gray8 | Self::I420 | Self::Nv12 => Some(LumaSample::U8),
            Self::Gray16Le => Some(LumaSample::U16Le),
            Self::Gray16Be => Some(LumaSample::U16Be),
            _ => None,
        }
    }

    /// Channel placement for color formats, `None` for luma formats.
    #[inline]
    pub const fn color_layout(&self) -> Option<ColorLayout> {
        let (pixel_stride, rgb, fill) = match self {
            Self::Rgb => (3, [0, 1, 2], None),
            Self::Bgr => (3, [2, 1, 0], None),
            Self::Rgba | Self::Rgbx => (4, [0, 1, 2], Some(3)),
            Self::Bgra | Self::Bgrx => (4, [2, 1, 0], Some(3)),
            Self::Argb | Self::Xrgb => (4, [1, 2, 3], Some(0)),
            Self::Abgr | Self::Xbgr => (4, [3, 2, 1], Some(0)),
            Self::Gbrp => return Some(ColorLayout::PlanarGbr),
            _ => return None,
        };
        Some(ColorLayout::Packed {
            pixel_stride,
            rgb,
            fill,
        })
    }

    /// Whether frames of this format can feed the colorizer.
    #[inline]
    pub const fn is_luma_source(&self) -> bool {
        self.luma_sample().is_some()
    }

    /// Whether the colorizer can write frames of this format.
    #[inline]
    pub const fn is_color_output(&self) -> bool {
        self.color_layout().is_some()
    }

    /// Whether the format carries a real alpha channel (as opposed to filler).
    #[inline]
    pub const fn has_alpha(&self) -> bool {
        matches!(self, Self::Rgba | Self::Bgra | Self::Argb | Self::Abgr)
    }

    /// Number of planes.
    #[inline]
    pub const fn n_planes(&self) -> usize {
        match self {
            Self::I420 | Self::Gbrp => 3,
            Self::Nv12 => 2,
            _ => 1,
        }
    }

    /// Bytes between horizontally adjacent pixels of `plane`.
    ///
    /// Returns 0 for planes the format does not have.
    pub const fn pixel_stride(&self, plane: usize) -> usize {
        if plane >= self.n_planes() {
            return 0;
        }
        match self {
            Self::Gray8 | Self::I420 | Self::Gbrp => 1,
            Self::Gray16Le | Self::Gray16Be => 2,
            Self::Nv12 => {
                if plane == 0 {
                    1
                } else {
                    2
                }
            }
            Self::Rgb | Self::Bgr => 3,
            _ => 4,
        }
    }

    /// Whether `plane` is chroma-subsampled by two in both directions.
    #[inline]
    pub const fn is_subsampled(&self, plane: usize) -> bool {
        plane > 0 && matches!(self, Self::I420 | Self::Nv12)
    }
}

impl fmt::Display for VideoFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for VideoFormat {
    type Err = Error;

    /// Parses a nick, ignoring ASCII case. `GBRP` and `GRAY16` (little-endian)
    /// are accepted as aliases.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("GBRP") {
            return Ok(Self::Gbrp);
        }
        if s.eq_ignore_ascii_case("GRAY16") {
            return Ok(Self::Gray16Le);
        }
        Self::all()
            .iter()
            .copied()
            .find(|f| f.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownFormat(s.to_string()))
    }
}

/// Negotiated format and geometry of a video stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VideoInfo {
    /// Pixel layout.
    pub format: VideoFormat,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl VideoInfo {
    /// Creates a video info, rejecting empty geometry.
    pub fn new(format: VideoFormat, width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::invalid_dimensions(width, height, "width and height must be > 0"));
        }
        let info = Self {
            format,
            width,
            height,
        };
        // Reject geometry whose buffer size cannot be represented.
        info.packed_size()?;
        Ok(info)
    }

    /// `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Whether `other` has the same width and height.
    #[inline]
    pub fn same_geometry(&self, other: &VideoInfo) -> bool {
        self.dimensions() == other.dimensions()
    }

    /// Pixel columns and rows of `plane`.
    pub fn plane_dimensions(&self, plane: usize) -> (usize, usize) {
        let (w, h) = (self.width as usize, self.height as usize);
        if self.format.is_subsampled(plane) {
            (w.div_ceil(2), h.div_ceil(2))
        } else {
            (w, h)
        }
    }

    /// Bytes actually occupied by pixels in one row of `plane`.
    pub fn row_bytes(&self, plane: usize) -> Result<usize> {
        let (cols, _) = self.plane_dimensions(plane);
        cols.checked_mul(self.format.pixel_stride(plane))
            .ok_or_else(|| Error::invalid_dimensions(self.width, self.height, "row size overflows"))
    }

    /// Minimum byte length of `plane` for a given `stride`.
    ///
    /// `stride * (rows - 1) + row_bytes`: the last row needs no padding.
    pub fn min_plane_len(&self, plane: usize, stride: usize) -> Result<usize> {
        let (_, rows) = self.plane_dimensions(plane);
        let row_bytes = self.row_bytes(plane)?;
        stride
            .checked_mul(rows.saturating_sub(1))
            .and_then(|v| v.checked_add(row_bytes))
            .ok_or_else(|| Error::invalid_dimensions(self.width, self.height, "plane size overflows"))
    }

    /// Total bytes of a tightly packed frame (each plane stride = row bytes).
    pub fn packed_size(&self) -> Result<usize> {
        let mut total = 0usize;
        for plane in 0..self.format.n_planes() {
            let (_, rows) = self.plane_dimensions(plane);
            let size = self
                .row_bytes(plane)?
                .checked_mul(rows)
                .ok_or_else(|| Error::invalid_dimensions(self.width, self.height, "frame size overflows"))?;
            total = total
                .checked_add(size)
                .ok_or_else(|| Error::invalid_dimensions(self.width, self.height, "frame size overflows"))?;
        }
        Ok(total)
    }
}

impl fmt::Display for VideoInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}x{}", self.format, self.width, self.height)
    }
}

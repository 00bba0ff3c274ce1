//! Borrowed frame descriptors.
//!
//! A frame is a [`VideoInfo`] plus one borrowed byte plane per format plane,
//! each with its own stride. Frames never own or allocate pixel storage;
//! the pipeline driver does.
//!
//! Construction validates every plane against the geometry, so code that
//! holds a [`VideoFrame`] or [`VideoFrameMut`] can index rows without
//! further bounds reasoning.
//!
//! # Example
//!
//! ```rust
//! use colorizer_core::{VideoFormat, VideoFrame, VideoInfo};
//!
//! let info = VideoInfo::new(VideoFormat::Gray8, 2, 2).unwrap();
//! let pixels = [0u8, 128, 200, 255];
//! let frame = VideoFrame::from_packed(info, &pixels).unwrap();
//! assert_eq!(frame.row(0, 1), &[200, 255]);
//! ```

use smallvec::SmallVec;

use crate::error::{Error, Result};
use crate::format::VideoInfo;

/// One read-only plane.
#[derive(Debug, Clone, Copy)]
pub struct Plane<'a> {
    data: &'a [u8],
    stride: usize,
}

impl<'a> Plane<'a> {
    /// Raw plane bytes.
    #[inline]
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Bytes between row starts.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }
}

/// One writable plane.
#[derive(Debug)]
pub struct PlaneMut<'a> {
    data: &'a mut [u8],
    stride: usize,
}

impl PlaneMut<'_> {
    /// Raw plane bytes.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &*self.data
    }

    /// Raw plane bytes, writable.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut *self.data
    }

    /// Bytes between row starts.
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }
}

/// Checks plane count, stride and length of every plane against `info`.
fn validate<I>(info: &VideoInfo, planes: I) -> Result<()>
where
    I: ExactSizeIterator<Item = (usize, usize)>,
{
    let expected = info.format.n_planes();
    if planes.len() != expected {
        return Err(Error::invalid_frame(format!(
            "{} expects {} plane(s), got {}",
            info.format,
            expected,
            planes.len()
        )));
    }
    for (index, (len, stride)) in planes.enumerate() {
        let row_bytes = info.row_bytes(index)?;
        if stride < row_bytes {
            return Err(Error::invalid_frame(format!(
                "plane {index}: stride {stride} is less than row size {row_bytes}"
            )));
        }
        let min_len = info.min_plane_len(index, stride)?;
        if len < min_len {
            return Err(Error::invalid_frame(format!(
                "plane {index}: {len} bytes, need at least {min_len}"
            )));
        }
    }
    Ok(())
}

/// Byte range of row `y` in a plane, clipped to the pixel bytes.
#[inline]
fn row_range(stride: usize, row_bytes: usize, y: usize) -> std::ops::Range<usize> {
    let start = y * stride;
    start..start + row_bytes
}

/// Read-only frame descriptor.
#[derive(Debug, Clone)]
pub struct VideoFrame<'a> {
    info: VideoInfo,
    planes: SmallVec<[Plane<'a>; 3]>,
}

impl<'a> VideoFrame<'a> {
    /// Wraps `(data, stride)` pairs, one per format plane.
    pub fn new(info: VideoInfo, planes: &[(&'a [u8], usize)]) -> Result<Self> {
        validate(&info, planes.iter().map(|(data, stride)| (data.len(), *stride)))?;
        Ok(Self {
            info,
            planes: planes
                .iter()
                .map(|&(data, stride)| Plane { data, stride })
                .collect(),
        })
    }

    /// Splits one contiguous, tightly packed buffer into planes.
    pub fn from_packed(info: VideoInfo, mut data: &'a [u8]) -> Result<Self> {
        let needed = info.packed_size()?;
        if data.len() < needed {
            return Err(Error::invalid_frame(format!(
                "buffer holds {} bytes, {} needs {}",
                data.len(),
                info,
                needed
            )));
        }
        let mut planes: SmallVec<[(&'a [u8], usize); 3]> = SmallVec::new();
        for plane in 0..info.format.n_planes() {
            let stride = info.row_bytes(plane)?;
            let (_, rows) = info.plane_dimensions(plane);
            let (head, tail) = data.split_at(stride * rows);
            planes.push((head, stride));
            data = tail;
        }
        Self::new(info, &planes)
    }

    /// Format and geometry.
    #[inline]
    pub fn info(&self) -> &VideoInfo {
        &self.info
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.info.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.info.height
    }

    /// Plane `index`, if the format has it.
    #[inline]
    pub fn plane(&self, index: usize) -> Option<&Plane<'a>> {
        self.planes.get(index)
    }

    /// Pixel bytes of row `y` in `plane`, without stride padding.
    ///
    /// # Panics
    ///
    /// Panics if `plane` or `y` is out of range.
    pub fn row(&self, plane: usize, y: usize) -> &'a [u8] {
        let Plane { data, stride } = self.planes[plane];
        let (cols, _) = self.info.plane_dimensions(plane);
        let row_bytes = cols * self.info.format.pixel_stride(plane);
        &data[row_range(stride, row_bytes, y)]
    }
}

/// Writable frame descriptor.
#[derive(Debug)]
pub struct VideoFrameMut<'a> {
    info: VideoInfo,
    // Vec rather than SmallVec: its Drop lets the borrow end at last use.
    planes: Vec<PlaneMut<'a>>,
}

impl<'a> VideoFrameMut<'a> {
    /// Wraps `(data, stride)` pairs, one per format plane.
    pub fn new(info: VideoInfo, planes: Vec<(&'a mut [u8], usize)>) -> Result<Self> {
        validate(&info, planes.iter().map(|(data, stride)| (data.len(), *stride)))?;
        Ok(Self {
            info,
            planes: planes
                .into_iter()
                .map(|(data, stride)| PlaneMut { data, stride })
                .collect(),
        })
    }

    /// Splits one contiguous, tightly packed buffer into planes.
    pub fn from_packed(info: VideoInfo, mut data: &'a mut [u8]) -> Result<Self> {
        let needed = info.packed_size()?;
        if data.len() < needed {
            return Err(Error::invalid_frame(format!(
                "buffer holds {} bytes, {} needs {}",
                data.len(),
                info,
                needed
            )));
        }
        let mut planes = Vec::with_capacity(info.format.n_planes());
        for plane in 0..info.format.n_planes() {
            let stride = info.row_bytes(plane)?;
            let (_, rows) = info.plane_dimensions(plane);
            let (head, tail) = std::mem::take(&mut data).split_at_mut(stride * rows);
            planes.push((head, stride));
            data = tail;
        }
        Self::new(info, planes)
    }

    /// Format and geometry.
    #[inline]
    pub fn info(&self) -> &VideoInfo {
        &self.info
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.info.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.info.height
    }

    /// Plane `index`, if the format has it.
    #[inline]
    pub fn plane(&self, index: usize) -> Option<&PlaneMut<'a>> {
        self.planes.get(index)
    }

    /// All planes, writable. Lets callers borrow several planes at once.
    #[inline]
    pub fn planes_mut(&mut self) -> &mut [PlaneMut<'a>] {
        &mut self.planes
    }

    /// Pixel bytes of row `y` in `plane`, without stride padding.
    ///
    /// # Panics
    ///
    /// Panics if `plane` or `y` is out of range.
    pub fn row_mut(&mut self, plane: usize, y: usize) -> &mut [u8] {
        let (cols, _) = self.info.plane_dimensions(plane);
        let row_bytes = cols * self.info.format.pixel_stride(plane);
        let p = &mut self.planes[plane];
        &mut p.data[row_range(p.stride, row_bytes, y)]
    }
}

//! Frame transform engine.
//!
//! Reads every luma sample of a source frame, normalizes it through the
//! [`CutRange`], looks the index up in the palette and writes the color in
//! the destination layout.
//!
//! The format-dependent parts are chosen once per stream as a [`Kernel`];
//! the inner loop is generic over the sample reader and the color map, so
//! each pixel costs one integer normalization and one table read.
//!
//! With the `parallel` feature (default) destination rows are processed
//! with Rayon. Every pixel is independent, so the output does not depend on
//! scheduling.
//!
//! # Example
//!
//! ```rust
//! use colorizer_core::{VideoFormat, VideoFrame, VideoFrameMut, VideoInfo};
//! use colorizer_lut::{build_table, Preset};
//! use colorizer_ops::{engine, CutRange};
//!
//! let src_info = VideoInfo::new(VideoFormat::Gray8, 2, 1).unwrap();
//! let dst_info = VideoInfo::new(VideoFormat::Rgb, 2, 1).unwrap();
//! let pixels = [0u8, 255];
//! let mut out = [0u8; 6];
//!
//! let source = VideoFrame::from_packed(src_info, &pixels).unwrap();
//! let mut dest = VideoFrameMut::from_packed(dst_info, &mut out).unwrap();
//! engine::transform(&build_table(Preset::Jet), CutRange::new(0, 255), &source, &mut dest).unwrap();
//! assert_eq!(out, [0, 0, 128, 128, 0, 0]);
//! ```

use colorizer_core::{
    ColorLayout, Error as CoreError, LumaSample, VideoFrame, VideoFrameMut, VideoInfo,
};
use colorizer_lut::{ColorTable, Palette};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::trace;

use crate::{ColorizeError, ColorizeResult, CutRange};

/// Value written to alpha and filler bytes.
const OPAQUE: u8 = 0xFF;

/// Per-stream choice of sample reader and pixel writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kernel {
    sample: LumaSample,
    layout: ColorLayout,
}

impl Kernel {
    /// Selects the kernel for an input/output pair.
    ///
    /// Fails with `UnsupportedFormat` if the input is not a luma format, the
    /// output is not a color format, or the geometries differ.
    pub fn select(input: &VideoInfo, output: &VideoInfo) -> ColorizeResult<Self> {
        let sample = input.format.luma_sample().ok_or_else(|| {
            ColorizeError::UnsupportedFormat(format!("{} is not a luma input format", input.format))
        })?;
        let layout = output.format.color_layout().ok_or_else(|| {
            ColorizeError::UnsupportedFormat(format!(
                "{} is not a color output format",
                output.format
            ))
        })?;
        if !input.same_geometry(output) {
            return Err(CoreError::dimension_mismatch(input.dimensions(), output.dimensions()).into());
        }
        Ok(Self { sample, layout })
    }

    /// How luma samples are stored.
    #[inline]
    pub fn sample(&self) -> LumaSample {
        self.sample
    }

    /// Where colors are written.
    #[inline]
    pub fn layout(&self) -> ColorLayout {
        self.layout
    }
}

/// Reads one luma sample.
trait SampleRead {
    fn read(row: &[u8], x: usize) -> u16;
}

struct U8Samples;
struct U16LeSamples;
struct U16BeSamples;

impl SampleRead for U8Samples {
    #[inline(always)]
    fn read(row: &[u8], x: usize) -> u16 {
        row[x] as u16
    }
}

impl SampleRead for U16LeSamples {
    #[inline(always)]
    fn read(row: &[u8], x: usize) -> u16 {
        u16::from_le_bytes([row[2 * x], row[2 * x + 1]])
    }
}

impl SampleRead for U16BeSamples {
    #[inline(always)]
    fn read(row: &[u8], x: usize) -> u16 {
        u16::from_be_bytes([row[2 * x], row[2 * x + 1]])
    }
}

/// Maps one intensity to a color.
trait ColorMap: Sync {
    fn color(&self, v: u16) -> [u8; 3];
}

/// Identity preset: intensity scaled to 8 bits on every channel.
struct Passthrough {
    max: u32,
}

impl ColorMap for Passthrough {
    #[inline(always)]
    fn color(&self, v: u16) -> [u8; 3] {
        let g = (v as u32 * 255 / self.max) as u8;
        [g, g, g]
    }
}

struct TableLookup<'a> {
    table: &'a ColorTable,
    cut: CutRange,
}

impl ColorMap for TableLookup<'_> {
    #[inline(always)]
    fn color(&self, v: u16) -> [u8; 3] {
        self.table.get(self.cut.index(v))
    }
}

/// Transforms `source` into `dest`, selecting the kernel from the frames.
///
/// Use [`crate::Colorizer`] to negotiate once and reuse the kernel.
pub fn transform(
    palette: &Palette,
    cut: CutRange,
    source: &VideoFrame<'_>,
    dest: &mut VideoFrameMut<'_>,
) -> ColorizeResult<()> {
    let kernel = Kernel::select(source.info(), dest.info())?;
    apply(kernel, palette, cut, source, dest)
}

/// Runs `kernel` over a frame pair already known to match it.
pub(crate) fn apply(
    kernel: Kernel,
    palette: &Palette,
    cut: CutRange,
    source: &VideoFrame<'_>,
    dest: &mut VideoFrameMut<'_>,
) -> ColorizeResult<()> {
    if !source.info().same_geometry(dest.info()) {
        return Err(CoreError::dimension_mismatch(
            source.info().dimensions(),
            dest.info().dimensions(),
        )
        .into());
    }
    trace!(
        width = source.width(),
        height = source.height(),
        identity = palette.is_identity(),
        "colorize frame"
    );

    let max = kernel.sample.max_value();
    match palette {
        Palette::Identity => {
            let map = Passthrough { max: max as u32 };
            with_sample(kernel, &map, source, dest)
        }
        Palette::Mapped(table) => {
            let map = TableLookup {
                table,
                cut: cut.clamped(max),
            };
            with_sample(kernel, &map, source, dest)
        }
    }
}

fn with_sample<M: ColorMap>(
    kernel: Kernel,
    map: &M,
    source: &VideoFrame<'_>,
    dest: &mut VideoFrameMut<'_>,
) -> ColorizeResult<()> {
    match kernel.sample {
        LumaSample::U8 => write_frame::<U8Samples, M>(kernel.layout, map, source, dest),
        LumaSample::U16Le => write_frame::<U16LeSamples, M>(kernel.layout, map, source, dest),
        LumaSample::U16Be => write_frame::<U16BeSamples, M>(kernel.layout, map, source, dest),
    }
}

#[cfg(feature = "parallel")]
fn rows_mut(data: &mut [u8], stride: usize, height: usize) -> impl IndexedParallelIterator<Item = &mut [u8]> {
    data.par_chunks_mut(stride).take(height)
}

#[cfg(not(feature = "parallel"))]
fn rows_mut(data: &mut [u8], stride: usize, height: usize) -> impl Iterator<Item = &mut [u8]> {
    data.chunks_mut(stride).take(height)
}

fn write_frame<S: SampleRead, M: ColorMap>(
    layout: ColorLayout,
    map: &M,
    source: &VideoFrame<'_>,
    dest: &mut VideoFrameMut<'_>,
) -> ColorizeResult<()> {
    let width = source.width() as usize;
    let height = source.height() as usize;

    match layout {
        ColorLayout::Packed {
            pixel_stride,
            rgb: [ro, go, bo],
            fill,
        } => {
            let [plane] = dest.planes_mut() else {
                return Err(ColorizeError::InvalidFrame(
                    "packed output needs exactly one plane".into(),
                ));
            };
            let stride = plane.stride();
            rows_mut(plane.data_mut(), stride, height)
                .enumerate()
                .for_each(|(y, row)| {
                    let luma = source.row(0, y);
                    let pixels = row[..width * pixel_stride].chunks_exact_mut(pixel_stride);
                    for (x, px) in pixels.enumerate() {
                        let [r, g, b] = map.color(S::read(luma, x));
                        px[ro] = r;
                        px[go] = g;
                        px[bo] = b;
                        if let Some(f) = fill {
                            px[f] = OPAQUE;
                        }
                    }
                });
        }
        ColorLayout::PlanarGbr => {
            let [g_plane, b_plane, r_plane] = dest.planes_mut() else {
                return Err(ColorizeError::InvalidFrame(
                    "planar GBR output needs exactly three planes".into(),
                ));
            };
            let (gs, bs, rs) = (g_plane.stride(), b_plane.stride(), r_plane.stride());
            rows_mut(g_plane.data_mut(), gs, height)
                .zip(rows_mut(b_plane.data_mut(), bs, height))
                .zip(rows_mut(r_plane.data_mut(), rs, height))
                .enumerate()
                .for_each(|(y, ((g_row, b_row), r_row))| {
                    let luma = source.row(0, y);
                    for x in 0..width {
                        let [r, g, b] = map.color(S::read(luma, x));
                        g_row[x] = g;
                        b_row[x] = b;
                        r_row[x] = r;
                    }
                });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use colorizer_core::VideoFormat;
    use colorizer_lut::{build_table, Preset};

    fn info(format: VideoFormat, w: u32, h: u32) -> VideoInfo {
        VideoInfo::new(format, w, h).unwrap()
    }

    fn run(
        preset: Preset,
        cut: CutRange,
        src_info: VideoInfo,
        src: &[u8],
        dst_format: VideoFormat,
    ) -> Vec<u8> {
        let dst_info = info(dst_format, src_info.width, src_info.height);
        let mut out = vec![0u8; dst_info.packed_size().unwrap()];
        let source = VideoFrame::from_packed(src_info, src).unwrap();
        let mut dest = VideoFrameMut::from_packed(dst_info, &mut out).unwrap();
        transform(&build_table(preset), cut, &source, &mut dest).unwrap();
        out
    }

    #[test]
    fn test_kernel_rejects_wrong_roles() {
        let gray = info(VideoFormat::Gray8, 4, 4);
        let rgb = info(VideoFormat::Rgb, 4, 4);
        assert!(Kernel::select(&gray, &rgb).is_ok());
        assert!(matches!(
            Kernel::select(&rgb, &gray),
            Err(ColorizeError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            Kernel::select(&gray, &info(VideoFormat::Gray16Le, 4, 4)),
            Err(ColorizeError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            Kernel::select(&gray, &info(VideoFormat::Rgb, 4, 2)),
            Err(ColorizeError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_jet_rgb_matches_table() {
        let table = build_table(Preset::Jet);
        let table = table.table().unwrap();
        let src = [0u8, 128, 200, 255];
        let out = run(
            Preset::Jet,
            CutRange::new(0, 255),
            info(VideoFormat::Gray8, 2, 2),
            &src,
            VideoFormat::Rgb,
        );
        for (i, v) in src.iter().enumerate() {
            assert_eq!(&out[i * 3..i * 3 + 3], &table.get(*v));
        }
    }

    #[test]
    fn test_channel_orders() {
        let jet = build_table(Preset::Jet);
        let [r, g, b] = jet.table().unwrap().get(0);
        let src = [0u8];
        let gray = info(VideoFormat::Gray8, 1, 1);
        let cut = CutRange::new(0, 255);

        assert_eq!(run(Preset::Jet, cut, gray, &src, VideoFormat::Bgr), [b, g, r]);
        assert_eq!(run(Preset::Jet, cut, gray, &src, VideoFormat::Rgba), [r, g, b, 255]);
        assert_eq!(run(Preset::Jet, cut, gray, &src, VideoFormat::Bgra), [b, g, r, 255]);
        assert_eq!(run(Preset::Jet, cut, gray, &src, VideoFormat::Argb), [255, r, g, b]);
        assert_eq!(run(Preset::Jet, cut, gray, &src, VideoFormat::Abgr), [255, b, g, r]);
        assert_eq!(run(Preset::Jet, cut, gray, &src, VideoFormat::Rgbx), [r, g, b, 255]);
        assert_eq!(run(Preset::Jet, cut, gray, &src, VideoFormat::Xbgr), [255, b, g, r]);
        assert_eq!(run(Preset::Jet, cut, gray, &src, VideoFormat::Gbrp), [g, b, r]);
    }

    #[test]
    fn test_16bit_sources_honor_byte_order() {
        let value: u16 = 0x1234;
        let le = value.to_le_bytes();
        let be = value.to_be_bytes();
        let cut = CutRange::default();

        let out_le = run(Preset::None, cut, info(VideoFormat::Gray16Le, 1, 1), &le, VideoFormat::Rgb);
        let out_be = run(Preset::None, cut, info(VideoFormat::Gray16Be, 1, 1), &be, VideoFormat::Rgb);
        let expected = (value as u32 * 255 / 65535) as u8;
        assert_eq!(out_le, [expected; 3]);
        assert_eq!(out_be, [expected; 3]);
    }

    #[test]
    fn test_16bit_cut_window() {
        let jet = build_table(Preset::Jet);
        let table = jet.table().unwrap();
        let src: Vec<u8> = [500u16, 1000, 1500, 2000, 9000]
            .iter()
            .flat_map(|v| v.to_le_bytes())
            .collect();
        let out = run(
            Preset::Jet,
            CutRange::new(1000, 2000),
            info(VideoFormat::Gray16Le, 5, 1),
            &src,
            VideoFormat::Rgb,
        );
        let expected: Vec<u8> = [0u8, 0, 127, 255, 255]
            .iter()
            .flat_map(|i| table.get(*i))
            .collect();
        assert_eq!(out, expected);
    }

    #[test]
    fn test_8bit_source_clamps_default_far_cut() {
        // far = 65535 would squash every 8-bit value to index 0 without clamping.
        let out = run(
            Preset::Jet,
            CutRange::default(),
            info(VideoFormat::Gray8, 1, 1),
            &[255],
            VideoFormat::Rgb,
        );
        assert_eq!(out, [128, 0, 0]);
    }

    #[test]
    fn test_i420_reads_luma_plane_only() {
        let src_info = info(VideoFormat::I420, 3, 1);
        // Y = [0, 128, 255], U and V = garbage.
        let src = [0u8, 128, 255, 77, 99, 11, 22];
        let out = run(Preset::None, CutRange::default(), src_info, &src, VideoFormat::Rgb);
        assert_eq!(out, [0, 0, 0, 128, 128, 128, 255, 255, 255]);
    }

    #[test]
    fn test_padding_left_untouched() {
        let src_info = info(VideoFormat::Gray8, 2, 2);
        let dst_info = info(VideoFormat::Rgb, 2, 2);
        let src = [10u8, 20, 0xAA, 30, 40];
        let mut out = [0xEEu8; 8 + 6];
        let source = VideoFrame::new(src_info, &[(&src[..], 3)]).unwrap();
        let mut dest = VideoFrameMut::new(dst_info, vec![(&mut out[..], 8)]).unwrap();
        transform(&Palette::Identity, CutRange::default(), &source, &mut dest).unwrap();
        assert_eq!(
            out,
            [10, 10, 10, 20, 20, 20, 0xEE, 0xEE, 30, 30, 30, 40, 40, 40]
        );
    }
}

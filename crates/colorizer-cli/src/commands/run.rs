//! Raw frame stream colorization

use crate::RunArgs;
use anyhow::{Context, Result, bail};
use colorizer_core::{VideoFrame, VideoFrameMut, VideoInfo};
use colorizer_ops::{Colorizer, ColorizerSettings, VideoFilter};
use std::io::{ErrorKind, Read, Write};
use tracing::{debug, info, trace};

pub fn run(args: RunArgs, verbose: u8) -> Result<()> {
    let settings = resolve_settings(&args)?;
    let input = VideoInfo::new(args.input_format, args.width, args.height)
        .context("Invalid input geometry")?;
    let output = VideoInfo::new(args.output_format, args.width, args.height)
        .context("Invalid output geometry")?;

    let colorizer = Colorizer::with_settings(settings);
    colorizer
        .negotiate(input, output)
        .with_context(|| format!("Cannot colorize {} into {}", input, output))?;
    info!(
        preset = %settings.preset,
        near_cut = settings.near_cut,
        far_cut = settings.far_cut,
        "colorizing {} -> {}",
        input,
        output
    );

    let mut reader = super::open_input(args.input.as_deref())?;
    let mut writer = super::open_output(args.output.as_deref())?;
    let frames = colorize_stream(&colorizer, input, output, &mut reader, &mut writer, args.frames)?;

    if verbose > 0 {
        eprintln!("Colorized {} frame(s).", frames);
    }
    Ok(())
}

/// Settings file values, overridden by command-line flags.
fn resolve_settings(args: &RunArgs) -> Result<ColorizerSettings> {
    let mut settings = match &args.config {
        Some(path) => super::load_settings(path)?,
        None => ColorizerSettings::default(),
    };
    if let Some(preset) = args.preset {
        settings.preset = preset;
    }
    if let Some(near_cut) = args.near_cut {
        settings.near_cut = near_cut;
    }
    if let Some(far_cut) = args.far_cut {
        settings.far_cut = far_cut;
    }
    debug!(?settings, "resolved settings");
    Ok(settings)
}

/// Colorizes packed frames from `reader` into `writer` until end of input
/// or `limit` frames. Returns the number of frames written.
///
/// `filter` must already be negotiated for `input` and `output`.
pub fn colorize_stream<F, R, W>(
    filter: &F,
    input: VideoInfo,
    output: VideoInfo,
    reader: &mut R,
    writer: &mut W,
    limit: Option<u64>,
) -> Result<u64>
where
    F: VideoFilter + ?Sized,
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut src = vec![0u8; input.packed_size()?];
    let mut dst = vec![0u8; output.packed_size()?];
    let mut count = 0u64;

    while limit.is_none_or(|n| count < n) {
        if !read_frame(reader, &mut src).with_context(|| format!("Failed to read frame {}", count))? {
            break;
        }
        let source = VideoFrame::from_packed(input, &src)?;
        let mut dest = VideoFrameMut::from_packed(output, &mut dst)?;
        filter
            .process(&source, &mut dest)
            .with_context(|| format!("Failed to colorize frame {}", count))?;
        writer
            .write_all(&dst)
            .with_context(|| format!("Failed to write frame {}", count))?;
        trace!(frame = count, "frame written");
        count += 1;
    }

    writer.flush().context("Failed to flush output")?;
    debug!(frames = count, "stream finished");
    Ok(count)
}

/// Fills `buf` with one frame. Returns `false` on a clean end of stream.
fn read_frame<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> Result<bool> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) if filled == 0 => return Ok(false),
            Ok(0) => bail!(
                "Truncated frame: got {} of {} bytes",
                filled,
                buf.len()
            ),
            Ok(n) => filled += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use colorizer_core::VideoFormat;
    use colorizer_lut::Preset;
    use std::io::Cursor;

    fn setup(preset: Preset, w: u32, h: u32) -> (Colorizer, VideoInfo, VideoInfo) {
        let colorizer = Colorizer::new();
        colorizer.set_preset(preset);
        let input = VideoInfo::new(VideoFormat::Gray16Le, w, h).unwrap();
        let output = VideoInfo::new(VideoFormat::Rgb, w, h).unwrap();
        colorizer.negotiate(input, output).unwrap();
        (colorizer, input, output)
    }

    fn depth_bytes(values: &[u16]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    #[test]
    fn test_stream_round_trip() {
        let (colorizer, input, output) = setup(Preset::Jet, 2, 1);
        colorizer.set_far_cut(1000);
        // Two frames.
        let mut reader = Cursor::new(depth_bytes(&[0, 1000, 1000, 0]));
        let mut out = Vec::new();
        let n = colorize_stream(&colorizer, input, output, &mut reader, &mut out, None).unwrap();
        assert_eq!(n, 2);
        assert_eq!(
            out,
            [0, 0, 128, 128, 0, 0, 128, 0, 0, 0, 0, 128]
        );
    }

    #[test]
    fn test_frame_limit() {
        let (colorizer, input, output) = setup(Preset::None, 1, 1);
        let mut reader = Cursor::new(depth_bytes(&[0, 65535, 65535]));
        let mut out = Vec::new();
        let n = colorize_stream(&colorizer, input, output, &mut reader, &mut out, Some(2)).unwrap();
        assert_eq!(n, 2);
        assert_eq!(out, [0, 0, 0, 255, 255, 255]);
    }

    #[test]
    fn test_empty_stream() {
        let (colorizer, input, output) = setup(Preset::Jet, 4, 4);
        let mut out = Vec::new();
        let n = colorize_stream(&colorizer, input, output, &mut Cursor::new(Vec::new()), &mut out, None)
            .unwrap();
        assert_eq!(n, 0);
        assert!(out.is_empty());
    }

    #[test]
    fn test_truncated_frame_is_error() {
        let (colorizer, input, output) = setup(Preset::Jet, 2, 1);
        let mut bytes = depth_bytes(&[1, 2]);
        bytes.push(7);
        let mut out = Vec::new();
        let err = colorize_stream(&colorizer, input, output, &mut Cursor::new(bytes), &mut out, None)
            .unwrap_err();
        assert!(format!("{:#}", err).contains("Truncated frame"));
        // The complete first frame was still written.
        assert_eq!(out.len(), 6);
    }

    #[test]
    fn test_unnegotiated_filter_fails() {
        let colorizer = Colorizer::new();
        let input = VideoInfo::new(VideoFormat::Gray8, 1, 1).unwrap();
        let output = VideoInfo::new(VideoFormat::Rgb, 1, 1).unwrap();
        let mut out = Vec::new();
        let result = colorize_stream(&colorizer, input, output, &mut Cursor::new(vec![9u8]), &mut out, None);
        assert!(result.is_err());
    }
}

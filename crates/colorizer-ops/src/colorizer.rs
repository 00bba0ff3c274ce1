//! The colorizer context and its driver-facing interface.
//!
//! A [`Colorizer`] holds the current configuration, the palette built from
//! it, and the kernel chosen at format negotiation. A pipeline driver calls
//! [`VideoFilter::negotiate`] whenever caps change and
//! [`VideoFilter::process`] once per frame; a control thread may change the
//! configuration at any time.
//!
//! Configuration is published as a whole: a new palette is built, then the
//! shared pointer is swapped under a short write lock. Concurrent setters
//! are applied one after another, so none of their edits is lost. `process` clones the
//! pointer under a read lock and runs the transform without holding any
//! lock, so a frame sees either the old or the new configuration, never a
//! mix.
//!
//! # Example
//!
//! ```rust
//! use colorizer_core::{VideoFormat, VideoFrame, VideoFrameMut, VideoInfo};
//! use colorizer_lut::Preset;
//! use colorizer_ops::{Colorizer, VideoFilter};
//!
//! let colorizer = Colorizer::new();
//! colorizer.set_preset(Preset::Jet);
//! colorizer.set_far_cut(4000);
//!
//! let input = VideoInfo::new(VideoFormat::Gray16Le, 2, 1).unwrap();
//! let output = VideoInfo::new(VideoFormat::Rgb, 2, 1).unwrap();
//! colorizer.negotiate(input, output).unwrap();
//!
//! let depth: Vec<u8> = [0u16, 4000].iter().flat_map(|v| v.to_le_bytes()).collect();
//! let mut rgb = [0u8; 6];
//! let source = VideoFrame::from_packed(input, &depth).unwrap();
//! let mut dest = VideoFrameMut::from_packed(output, &mut rgb).unwrap();
//! colorizer.process(&source, &mut dest).unwrap();
//! assert_eq!(rgb, [0, 0, 128, 128, 0, 0]);
//! ```

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use colorizer_core::{VideoFrame, VideoFrameMut, VideoInfo};
use colorizer_lut::{build_table, Palette, Preset};
use tracing::debug;

use crate::engine::{self, Kernel};
use crate::{ColorizeError, ColorizeResult, ColorizerSettings, CutRange};

/// Driver callbacks of a frame filter.
///
/// Decoupled from any particular pipeline framework: the driver owns the
/// frame buffers and calls these methods from its streaming thread.
pub trait VideoFilter {
    /// Accepts a new input/output format pair.
    fn negotiate(&self, input: VideoInfo, output: VideoInfo) -> ColorizeResult<()>;

    /// Transforms one frame. Both frames must match the negotiated formats.
    fn process(&self, source: &VideoFrame<'_>, dest: &mut VideoFrameMut<'_>) -> ColorizeResult<()>;
}

/// Published configuration.
#[derive(Debug)]
struct State {
    settings: ColorizerSettings,
    palette: Arc<Palette>,
}

impl State {
    fn new(settings: ColorizerSettings) -> Self {
        Self {
            settings,
            palette: Arc::new(build_table(settings.preset)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Negotiated {
    input: VideoInfo,
    output: VideoInfo,
    kernel: Kernel,
}

/// Grayscale to false-color converter.
#[derive(Debug)]
pub struct Colorizer {
    state: RwLock<Arc<State>>,
    writer: Mutex<()>,
    negotiated: RwLock<Option<Negotiated>>,
}

impl Default for Colorizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Colorizer {
    /// Creates a colorizer with default settings (passthrough, full range).
    pub fn new() -> Self {
        Self::with_settings(ColorizerSettings::default())
    }

    /// Creates a colorizer with `settings`.
    pub fn with_settings(settings: ColorizerSettings) -> Self {
        Self {
            state: RwLock::new(Arc::new(State::new(settings))),
            writer: Mutex::new(()),
            negotiated: RwLock::new(None),
        }
    }

    fn snapshot(&self) -> Arc<State> {
        Arc::clone(&self.state.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Applies `edit` to the current settings and publishes the result.
    ///
    /// Writers are serialized; the palette is built before the write lock
    /// is taken and only when the preset changes.
    fn update(&self, edit: impl FnOnce(&mut ColorizerSettings)) {
        let _writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let current = self.snapshot();
        let mut settings = current.settings;
        edit(&mut settings);
        if settings == current.settings {
            return;
        }
        let palette = if settings.preset == current.settings.preset {
            Arc::clone(&current.palette)
        } else {
            Arc::new(build_table(settings.preset))
        };
        debug!(
            preset = %settings.preset,
            near_cut = settings.near_cut,
            far_cut = settings.far_cut,
            "colorizer configuration changed"
        );
        let next = Arc::new(State { settings, palette });
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = next;
    }

    /// Current settings.
    pub fn settings(&self) -> ColorizerSettings {
        self.snapshot().settings
    }

    /// Current cut range.
    pub fn cut(&self) -> CutRange {
        self.settings().cut()
    }

    /// Replaces all settings at once.
    pub fn configure(&self, settings: ColorizerSettings) {
        self.update(|current| *current = settings);
    }

    /// Selects the palette preset.
    pub fn set_preset(&self, preset: Preset) {
        self.update(|s| s.preset = preset);
    }

    /// Selects the preset by nick (`"none"`, `"jet"`).
    ///
    /// On failure the previous configuration stays active.
    pub fn set_preset_name(&self, name: &str) -> ColorizeResult<()> {
        let preset: Preset = name.parse()?;
        self.set_preset(preset);
        Ok(())
    }

    /// Selects the preset by enumeration value.
    ///
    /// On failure the previous configuration stays active.
    pub fn set_preset_value(&self, value: u32) -> ColorizeResult<()> {
        let preset = Preset::try_from(value)?;
        self.set_preset(preset);
        Ok(())
    }

    /// Sets the intensity mapped to the first table entry.
    pub fn set_near_cut(&self, near_cut: u16) {
        self.update(|s| s.near_cut = near_cut);
    }

    /// Sets the intensity mapped to the last table entry.
    pub fn set_far_cut(&self, far_cut: u16) {
        self.update(|s| s.far_cut = far_cut);
    }

    /// Sets both cut values in one publish.
    pub fn set_cut(&self, cut: CutRange) {
        self.update(|s| {
            s.near_cut = cut.near;
            s.far_cut = cut.far;
        });
    }

    /// Negotiated input and output, if any.
    pub fn negotiated(&self) -> Option<(VideoInfo, VideoInfo)> {
        self.negotiated
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .map(|n| (n.input, n.output))
    }
}

impl VideoFilter for Colorizer {
    /// Validates the pair and caches the kernel for it.
    ///
    /// On failure the previous negotiation is kept.
    fn negotiate(&self, input: VideoInfo, output: VideoInfo) -> ColorizeResult<()> {
        let kernel = Kernel::select(&input, &output)?;
        debug!(%input, %output, "colorizer negotiated");
        *self.negotiated.write().unwrap_or_else(PoisonError::into_inner) = Some(Negotiated {
            input,
            output,
            kernel,
        });
        Ok(())
    }

    fn process(&self, source: &VideoFrame<'_>, dest: &mut VideoFrameMut<'_>) -> ColorizeResult<()> {
        let negotiated = (*self.negotiated.read().unwrap_or_else(PoisonError::into_inner))
            .ok_or_else(|| ColorizeError::UnsupportedFormat("no format negotiated".into()))?;
        if *source.info() != negotiated.input {
            return Err(ColorizeError::UnsupportedFormat(format!(
                "source {} does not match negotiated {}",
                source.info(),
                negotiated.input
            )));
        }
        if *dest.info() != negotiated.output {
            return Err(ColorizeError::UnsupportedFormat(format!(
                "destination {} does not match negotiated {}",
                dest.info(),
                negotiated.output
            )));
        }
        let state = self.snapshot();
        engine::apply(negotiated.kernel, &state.palette, state.settings.cut(), source, dest)
    }
}

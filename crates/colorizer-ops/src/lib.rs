//! # colorizer-ops
//!
//! Grayscale to false-color conversion for video frames.
//!
//! Typical input is a depth stream (16-bit millimetres from an RGB-D
//! camera); typical output is packed RGB for display.
//!
//! # Modules
//!
//! - [`cut`] - near/far window mapping intensities to table indices
//! - [`engine`] - per-format kernels and the frame transform
//! - [`settings`] - serializable configuration
//! - [`colorizer`] - the shared, reconfigurable [`Colorizer`] context
//!
//! # Example
//!
//! ```rust
//! use colorizer_core::{VideoFormat, VideoFrame, VideoFrameMut, VideoInfo};
//! use colorizer_ops::{Colorizer, ColorizerSettings, VideoFilter};
//!
//! let settings = ColorizerSettings::from_yaml_str("preset: jet\nnear_cut: 0\nfar_cut: 255\n").unwrap();
//! let colorizer = Colorizer::with_settings(settings);
//!
//! let input = VideoInfo::new(VideoFormat::Gray8, 1, 1).unwrap();
//! let output = VideoInfo::new(VideoFormat::Bgra, 1, 1).unwrap();
//! colorizer.negotiate(input, output).unwrap();
//!
//! let mut out = [0u8; 4];
//! let source = VideoFrame::from_packed(input, &[255]).unwrap();
//! let mut dest = VideoFrameMut::from_packed(output, &mut out).unwrap();
//! colorizer.process(&source, &mut dest).unwrap();
//! assert_eq!(out, [0, 0, 128, 255]);
//! ```
//!
//! # Features
//!
//! - `parallel` (default) - process rows with Rayon

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod colorizer;
pub mod cut;
pub mod engine;
pub mod settings;

pub use colorizer::{Colorizer, VideoFilter};
pub use cut::CutRange;
pub use engine::Kernel;
pub use error::{ColorizeError, ColorizeResult};
pub use settings::ColorizerSettings;

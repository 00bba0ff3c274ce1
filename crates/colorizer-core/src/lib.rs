//! # colorizer-core
//!
//! Core types for false-color video processing.
//!
//! This crate describes the video data the colorizer works on, without any
//! knowledge of palettes or pixel math:
//!
//! - [`VideoFormat`] - supported pixel layouts (luma sources, color outputs)
//! - [`VideoInfo`] - format plus geometry, with plane size arithmetic
//! - [`VideoFrame`], [`VideoFrameMut`] - borrowed, validated frame descriptors
//! - [`Error`] - format and frame errors
//!
//! ## Crate Structure
//!
//! ```text
//! colorizer-core (this crate)      colorizer-lut (palette presets and tables)
//!    ^                                 ^
//!    |                                 |
//!    +------------ colorizer-ops ------+  (cut range, transform engine, Colorizer)
//!                      ^
//!                      |
//!                  colorizer-cli  (raw frame stream driver)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod format;
pub mod frame;

pub use error::{Error, Result};
pub use format::{ColorLayout, LumaSample, VideoFormat, VideoInfo};
pub use frame::{Plane, PlaneMut, VideoFrame, VideoFrameMut};

//! # colorizer-lut
//!
//! Palette presets and color lookup tables for false-color video.
//!
//! # Types
//!
//! - [`Preset`] - named palette algorithm (`none`, `jet`)
//! - [`ColorTable`] - 256 RGB entries indexed by normalized intensity
//! - [`Palette`] - builder output: identity passthrough or a table
//!
//! # Usage
//!
//! ```rust
//! use colorizer_lut::{build_table, Preset};
//!
//! let preset: Preset = "jet".parse().unwrap();
//! let palette = build_table(preset);
//! let table = palette.table().unwrap();
//! assert_eq!(table.get(128), [130, 255, 126]);
//! ```
//!
//! # Used By
//!
//! - `colorizer-ops` - rebuilds the palette on every configuration change

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod preset;
mod table;

pub use error::{LutError, LutResult};
pub use preset::Preset;
pub use table::{build_table, jet, ColorTable, Palette, TABLE_SIZE};

//! Integration tests for the colorizer crates.
//!
//! End-to-end checks of palette building, negotiation and frame processing
//! through the public `Colorizer` interface.

//! Supported format listing

use anyhow::Result;
use colorizer_core::VideoFormat;

pub fn run() -> Result<()> {
    println!("Input (luma) formats:");
    for format in VideoFormat::all().iter().filter(|f| f.is_luma_source()) {
        let depth = format.luma_sample().map_or(0, |s| s.bytes() * 8);
        println!("  {:<10} {}-bit, {} plane(s)", format.name(), depth, format.n_planes());
    }
    println!("Output (color) formats:");
    for format in VideoFormat::all().iter().filter(|f| f.is_color_output()) {
        let alpha = if format.has_alpha() { ", alpha" } else { "" };
        println!("  {:<10} {} plane(s){}", format.name(), format.n_planes(), alpha);
    }
    Ok(())
}

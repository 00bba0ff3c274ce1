//! Palette table dump

use crate::TableArgs;
use anyhow::Result;
use colorizer_lut::{Palette, TABLE_SIZE, build_table};
use std::fmt::{self, Write as _};
use std::io::Write;

pub fn run(args: TableArgs) -> Result<()> {
    let text = render(&build_table(args.preset), args.hex)?;
    let mut out = std::io::stdout().lock();
    out.write_all(text.as_bytes())?;
    Ok(())
}

/// One line per index. The identity palette is shown as the gray ramp it produces.
fn render(palette: &Palette, hex: bool) -> Result<String, fmt::Error> {
    let mut text = String::with_capacity(TABLE_SIZE * 16);
    for i in 0..TABLE_SIZE {
        let index = i as u8;
        let [r, g, b] = match palette.table() {
            Some(table) => table.get(index),
            None => [index; 3],
        };
        if hex {
            writeln!(text, "{:3} #{:02x}{:02x}{:02x}", i, r, g, b)?;
        } else {
            writeln!(text, "{:3} {:3} {:3} {:3}", i, r, g, b)?;
        }
    }
    Ok(text)
}

//! CLI command implementations

pub mod formats;
pub mod run;
pub mod table;

use anyhow::{Context, Result};
use colorizer_ops::ColorizerSettings;
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

fn is_stdio(path: Option<&Path>) -> bool {
    path.is_none_or(|p| p.as_os_str() == "-")
}

/// Opens `path` for reading, or stdin.
pub fn open_input(path: Option<&Path>) -> Result<Box<dyn Read>> {
    match path {
        Some(p) if !is_stdio(path) => {
            let file = File::open(p).with_context(|| format!("Failed to open: {}", p.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        _ => Ok(Box::new(io::stdin().lock())),
    }
}

/// Creates `path` for writing, or stdout.
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(p) if !is_stdio(path) => {
            let file =
                File::create(p).with_context(|| format!("Failed to create: {}", p.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        _ => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}

/// Loads settings from a YAML file.
pub fn load_settings(path: &Path) -> Result<ColorizerSettings> {
    ColorizerSettings::from_yaml_file(path)
        .with_context(|| format!("Invalid settings in {}", path.display()))
}

//! colorize - false-color conversion of raw video frame streams
//!
//! Reference driver for the colorizer: negotiates formats, feeds frames
//! through a `Colorizer` and writes the result.

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use colorizer_core::VideoFormat;
use colorizer_lut::Preset;
use std::fs::File;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "colorize")]
#[command(author, version, about = "False-color conversion of raw video frames")]
#[command(long_about = "
Maps grayscale or depth frames through a color palette.

Frames are read as tightly packed raw data and written the same way.

Examples:
  colorize run depth.raw -o color.raw -W 640 -H 480 --preset jet --far-cut 4000
  cat depth.raw | colorize run -W 640 -H 480 -c settings.yaml > color.raw
  colorize run mono.raw -o out.raw -W 320 -H 240 -i GRAY8 -f BGRx
  colorize table --preset jet
  colorize formats
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Write log output to a file instead of stderr
    #[arg(long, global = true)]
    log: Option<PathBuf>,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Colorize a raw frame stream
    #[command(visible_alias = "r")]
    Run(RunArgs),

    /// Print the color table of a preset
    #[command(visible_alias = "t")]
    Table(TableArgs),

    /// List supported pixel formats
    Formats,
}

#[derive(Args)]
struct RunArgs {
    /// Input file (stdin if omitted or "-")
    input: Option<PathBuf>,

    /// Output file (stdout if omitted or "-")
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Frame width in pixels
    #[arg(short = 'W', long)]
    width: u32,

    /// Frame height in pixels
    #[arg(short = 'H', long)]
    height: u32,

    /// Input pixel format
    #[arg(short = 'i', long, default_value = "GRAY16_LE")]
    input_format: VideoFormat,

    /// Output pixel format
    #[arg(short = 'f', long, default_value = "RGB")]
    output_format: VideoFormat,

    /// YAML settings file (preset, near_cut, far_cut)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Palette preset (none, jet). Overrides the settings file.
    #[arg(short, long)]
    preset: Option<Preset>,

    /// Intensity mapped to the first palette entry. Overrides the settings file.
    #[arg(long)]
    near_cut: Option<u16>,

    /// Intensity mapped to the last palette entry. Overrides the settings file.
    #[arg(long)]
    far_cut: Option<u16>,

    /// Stop after this many frames
    #[arg(short = 'n', long)]
    frames: Option<u64>,
}

#[derive(Args)]
struct TableArgs {
    /// Palette preset
    #[arg(short, long, default_value = "jet")]
    preset: Preset,

    /// Print as hex colors
    #[arg(long)]
    hex: bool,
}

/// Installs the tracing subscriber. The returned guard flushes file logs on drop.
fn init_logging(verbose: u8, log: Option<&PathBuf>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match log {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file: {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            builder.with_writer(writer).with_ansi(false).init();
            Ok(Some(guard))
        }
        None => {
            builder.with_writer(std::io::stderr).init();
            Ok(None)
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _guard = init_logging(cli.verbose, cli.log.as_ref())?;

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Run(args) => commands::run::run(args, cli.verbose),
        Commands::Table(args) => commands::table::run(args),
        Commands::Formats => commands::formats::run(),
    }
}

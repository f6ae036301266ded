use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, info};
use vidkit_core::config::load_config;
use vidkit_core::logging::init_logging;
use vidkit_core::startup::check_ffmpeg;
use vidkit_core::{concat_videos, ConcatMode, FfmpegExecutor};

#[derive(Parser, Debug)]
#[command(name = "vidkit-concat")]
#[command(about = "Concatenate videos into one file", long_about = None)]
#[command(version)]
struct Args {
    /// Video files to concatenate, in output order
    #[arg(required = true, value_name = "VIDEO")]
    videos: Vec<PathBuf>,

    /// Output file
    #[arg(short, long, value_name = "FILE")]
    output: PathBuf,

    /// Re-encode instead of stream copy (slower, tolerates mismatched codecs)
    #[arg(long)]
    reencode: bool,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = load_config(args.config.as_deref()).context("Failed to load configuration")?;
    let executor = FfmpegExecutor;
    check_ffmpeg(&executor, &config)?;

    let mode = ConcatMode::from_reencode_flag(args.reencode);
    debug!("Concatenating {} inputs in {:?} mode", args.videos.len(), mode);

    let report = concat_videos(&executor, &config, &args.videos, &args.output, mode)?;
    info!("Done: {}", report.output.display());
    Ok(())
}

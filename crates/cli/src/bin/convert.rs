use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::{error, info, warn};
use vidkit_core::config::load_config;
use vidkit_core::convert::{batch_convert, converted_output_path, convert_video, ConvertSettings};
use vidkit_core::logging::init_logging;
use vidkit_core::startup::check_ffmpeg;
use vidkit_core::FfmpegExecutor;

#[derive(Parser, Debug)]
#[command(name = "vidkit-convert")]
#[command(about = "Batch video converter", long_about = None)]
#[command(version)]
struct Args {
    /// Input file or directory
    input: PathBuf,

    /// Output path (single-file input only)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output extension [default: from config, "mp4"]
    #[arg(short, long)]
    ext: Option<String>,

    /// Video codec [default: from config, "libx264"]
    #[arg(short, long)]
    codec: Option<String>,

    /// Constant rate factor [default: from config, 23]
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=51))]
    crf: Option<u8>,

    /// Path to configuration file
    #[arg(long, value_name = "FILE")]
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

    let mut settings = ConvertSettings::from_config(&config);
    if let Some(codec) = args.codec {
        settings.video_codec = codec;
    }
    if let Some(crf) = args.crf {
        settings.crf = crf;
    }
    let ext = args
        .ext
        .as_deref()
        .unwrap_or(&config.convert.output_ext)
        .trim_start_matches('.')
        .to_string();

    if args.input.is_dir() {
        if args.output.is_some() {
            warn!("--output is ignored for directory input");
        }
        let summary = batch_convert(&executor, &config, &args.input, &ext, &settings)?;
        if !summary.all_succeeded() {
            for (input, reason) in &summary.failed {
                error!("{}: {}", input.display(), reason);
            }
            anyhow::bail!(
                "{} of {} conversions failed",
                summary.failed.len(),
                summary.failed.len() + summary.converted.len()
            );
        }
        return Ok(());
    }

    let output = args
        .output
        .unwrap_or_else(|| converted_output_path(&args.input, &ext));
    convert_video(&executor, &config, &args.input, &output, &settings)?;
    info!("Done: {}", output.display());
    Ok(())
}

use crate::config::ToolkitConfig;
use crate::error::{Result, VidError};
use crate::executor::CommandExecutor;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};
use walkdir::WalkDir;

/// Extensions picked up by a directory batch
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "avi", "mkv", "flv", "wmv"];

/// Stem suffix given to converted outputs
pub const CONVERTED_SUFFIX: &str = "_converted";

const DIAGNOSTIC_LINES: usize = 20;

/// Per-run overrides on top of the configured profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertSettings {
    pub video_codec: String,
    pub crf: u8,
}

impl ConvertSettings {
    pub fn from_config(config: &ToolkitConfig) -> Self {
        Self {
            video_codec: config.profile.video_codec.clone(),
            crf: config.profile.crf,
        }
    }
}

#[derive(Debug, Default)]
pub struct BatchSummary {
    pub converted: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
}

impl BatchSummary {
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Check if a file has a video extension
pub fn is_video_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext_lower = ext.to_lowercase();
            VIDEO_EXTENSIONS.contains(&ext_lower.as_str())
        })
        .unwrap_or(false)
}

fn is_converted_output(path: &Path) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.ends_with(CONVERTED_SUFFIX))
        .unwrap_or(false)
}

/// `<dir>/<stem>_converted.<ext>` next to the input.
pub fn converted_output_path(input: &Path, output_ext: &str) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    input.with_file_name(format!("{}{}.{}", stem, CONVERTED_SUFFIX, output_ext))
}

pub fn build_convert_command(
    config: &ToolkitConfig,
    input: &Path,
    output: &Path,
    settings: &ConvertSettings,
) -> Vec<String> {
    let mut command = vec![config.ffmpeg_program()];
    if config.overwrite_output {
        command.push("-y".to_string());
    }
    command.push("-hide_banner".to_string());

    command.push("-i".to_string());
    command.push(input.to_string_lossy().to_string());

    command.push("-c:v".to_string());
    command.push(settings.video_codec.clone());
    command.push("-crf".to_string());
    command.push(settings.crf.to_string());
    command.push("-preset".to_string());
    command.push(config.profile.preset.clone());

    command.push("-c:a".to_string());
    command.push(config.profile.audio_codec.clone());
    command.push("-b:a".to_string());
    command.push(config.profile.audio_bitrate.clone());

    command.push(output.to_string_lossy().to_string());
    command
}

pub fn convert_video<E>(
    executor: &E,
    config: &ToolkitConfig,
    input: &Path,
    output: &Path,
    settings: &ConvertSettings,
) -> Result<()>
where
    E: CommandExecutor + ?Sized,
{
    if config.check_inputs_exist && !input.is_file() {
        return Err(VidError::InvalidInput(format!(
            "input file not found: {}",
            input.display()
        )));
    }

    let command = build_convert_command(config, input, output, settings);
    let result = executor.execute(&command)?;

    if !result.success() {
        return Err(VidError::ConvertFailed {
            input: input.to_path_buf(),
            status: result.status_text(),
            diagnostics: result.diagnostics(DIAGNOSTIC_LINES),
        });
    }

    info!("Converted: {} -> {}", input.display(), output.display());
    Ok(())
}

/// List the videos directly inside `dir`, sorted by file name.
///
/// Not recursive. Outputs of an earlier run (`*_converted.*`) are skipped.
pub fn discover_videos(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Err(VidError::InvalidInput(format!(
            "not a directory: {}",
            dir.display()
        )));
    }

    let mut videos = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        match entry {
            Ok(entry) => {
                if !entry.file_type().is_file() {
                    continue;
                }
                let path = entry.path();
                if !is_video_file(path) {
                    continue;
                }
                if is_converted_output(path) {
                    debug!("Skipping earlier output: {}", path.display());
                    continue;
                }
                videos.push(path.to_path_buf());
            }
            Err(e) => {
                warn!("Error accessing directory entry: {}", e);
                continue;
            }
        }
    }

    debug!("Found {} videos in {}", videos.len(), dir.display());
    Ok(videos)
}

/// Convert every video in `dir`, continuing past individual failures.
pub fn batch_convert<E>(
    executor: &E,
    config: &ToolkitConfig,
    dir: &Path,
    output_ext: &str,
    settings: &ConvertSettings,
) -> Result<BatchSummary>
where
    E: CommandExecutor + ?Sized,
{
    let videos = discover_videos(dir)?;
    if videos.is_empty() {
        warn!("No videos found in {}", dir.display());
    }

    let mut summary = BatchSummary::default();
    for input in videos {
        let output = converted_output_path(&input, output_ext);
        match convert_video(executor, config, &input, &output, settings) {
            Ok(()) => summary.converted.push(output),
            Err(e) => {
                error!("Error converting {}: {}", input.display(), e);
                summary.failed.push((input, e.to_string()));
            }
        }
    }

    info!(
        "Batch finished: {} converted, {} failed",
        summary.converted.len(),
        summary.failed.len()
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converted_output_path() {
        assert_eq!(
            converted_output_path(Path::new("/videos/holiday.mov"), "mp4"),
            PathBuf::from("/videos/holiday_converted.mp4")
        );
        assert_eq!(
            converted_output_path(Path::new("clip.tar.mkv"), "webm"),
            PathBuf::from("clip.tar_converted.webm")
        );
    }

    #[test]
    fn test_is_converted_output() {
        assert!(is_converted_output(Path::new("a_converted.mp4")));
        assert!(!is_converted_output(Path::new("a.mp4")));
        assert!(!is_converted_output(Path::new("converted_a.mp4")));
    }

    #[test]
    fn test_convert_command_shape() {
        let config = ToolkitConfig::default();
        let settings = ConvertSettings {
            video_codec: "libx265".to_string(),
            crf: 28,
        };
        let command = build_convert_command(
            &config,
            Path::new("in.avi"),
            Path::new("in_converted.mp4"),
            &settings,
        );
        assert_eq!(
            command,
            vec![
                "ffmpeg", "-y", "-hide_banner", "-i", "in.avi", "-c:v", "libx265", "-crf", "28",
                "-preset", "medium", "-c:a", "aac", "-b:a", "192k", "in_converted.mp4"
            ]
        );
    }
}

use crate::config::ToolkitConfig;
use crate::error::{Result, VidError};
use crate::executor::CommandExecutor;
use crate::manifest::ConcatManifest;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Lines of ffmpeg stderr kept in a failure report.
const DIAGNOSTIC_LINES: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConcatMode {
    /// Stream copy. Fast, but every input must share codec parameters.
    Copy,
    /// Normalize every input to the configured encode profile.
    Reencode,
}

impl ConcatMode {
    pub fn from_reencode_flag(reencode: bool) -> Self {
        if reencode {
            ConcatMode::Reencode
        } else {
            ConcatMode::Copy
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConcatReport {
    pub output: PathBuf,
    pub inputs: usize,
    pub mode: ConcatMode,
}

pub fn build_concat_command(
    config: &ToolkitConfig,
    manifest_path: &Path,
    output_path: &Path,
    mode: ConcatMode,
) -> Vec<String> {
    let mut command = vec![config.ffmpeg_program()];
    if config.overwrite_output {
        command.push("-y".to_string());
    }
    command.push("-hide_banner".to_string());

    // Concat demuxer; -safe 0 allows absolute and unusual paths in the list
    command.extend(
        ["-f", "concat", "-safe", "0", "-i"]
            .iter()
            .map(|s| s.to_string()),
    );
    command.push(manifest_path.to_string_lossy().to_string());

    match mode {
        ConcatMode::Copy => {
            command.push("-c".to_string());
            command.push("copy".to_string());
        }
        ConcatMode::Reencode => {
            let profile = &config.profile;
            command.push("-c:v".to_string());
            command.push(profile.video_codec.clone());
            command.push("-crf".to_string());
            command.push(profile.crf.to_string());
            command.push("-preset".to_string());
            command.push(profile.preset.clone());
            command.push("-c:a".to_string());
            command.push(profile.audio_codec.clone());
            command.push("-b:a".to_string());
            command.push(profile.audio_bitrate.clone());
        }
    }

    command.push(output_path.to_string_lossy().to_string());
    command
}

/// Concatenate `files` in order into `output_path`.
///
/// Fails with `InvalidInput` before touching the filesystem or the executor
/// when the list is empty (or references missing files, if the config asks
/// for that check). The manifest is always deleted before returning.
pub fn concat_videos<E>(
    executor: &E,
    config: &ToolkitConfig,
    files: &[PathBuf],
    output_path: &Path,
    mode: ConcatMode,
) -> Result<ConcatReport>
where
    E: CommandExecutor + ?Sized,
{
    check_inputs(files, config.check_inputs_exist)?;

    // The demuxer resolves relative entries against the manifest's directory
    let entries = absolute_inputs(files)?;
    let manifest = ConcatManifest::create(&entries, config.manifest_dir.as_deref())?;
    let command = build_concat_command(config, manifest.path(), output_path, mode);
    debug!("Concat command ({:?}): {}", mode, command.join(" "));

    let outcome = executor.execute(&command);

    if let Err(e) = manifest.close() {
        warn!("Failed to remove concat manifest: {}", e);
    }

    let output = outcome?;
    if !output.success() {
        let status = output.status_text();
        error!("Concatenation into {} failed ({})", output_path.display(), status);
        if mode == ConcatMode::Copy {
            warn!("Stream copy usually fails on mismatched codecs; try --reencode");
        }
        return Err(VidError::ConcatFailed {
            status,
            diagnostics: output.diagnostics(DIAGNOSTIC_LINES),
            suggest_reencode: mode == ConcatMode::Copy,
        });
    }

    info!(
        "Concatenated {} videos into: {}",
        files.len(),
        output_path.display()
    );

    Ok(ConcatReport {
        output: output_path.to_path_buf(),
        inputs: files.len(),
        mode,
    })
}

fn check_inputs(files: &[PathBuf], require_existing: bool) -> Result<()> {
    if files.is_empty() {
        return Err(VidError::InvalidInput("no video files provided".to_string()));
    }

    // Each path must fit on one manifest line and survive the text round trip
    for file in files {
        match file.to_str() {
            None => {
                return Err(VidError::InvalidInput(format!(
                    "input path is not valid UTF-8: {}",
                    file.display()
                )));
            }
            Some(s) if s.contains(['\n', '\r']) => {
                return Err(VidError::InvalidInput(format!(
                    "input path contains a line break: {:?}",
                    s
                )));
            }
            Some(_) => {}
        }
    }

    if require_existing {
        let missing: Vec<String> = files
            .iter()
            .filter(|f| !f.exists())
            .map(|f| f.display().to_string())
            .collect();
        if !missing.is_empty() {
            return Err(VidError::InvalidInput(format!(
                "input files not found: {}",
                missing.join(", ")
            )));
        }
    }

    let mut seen = HashSet::new();
    for file in files {
        if !seen.insert(file) {
            warn!("Input listed more than once: {}", file.display());
        }
    }

    Ok(())
}

fn absolute_inputs(files: &[PathBuf]) -> Result<Vec<PathBuf>> {
    if files.iter().all(|f| f.is_absolute()) {
        return Ok(files.to_vec());
    }
    let cwd = std::env::current_dir()?;
    Ok(files.iter().map(|f| cwd.join(f)).collect())
}

use crate::config::ToolkitConfig;
use crate::error::{Result, VidError};
use crate::executor::CommandExecutor;
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

fn version_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // "ffmpeg version 6.1.1-3ubuntu5", "ffmpeg version n7.0.2", "ffmpeg version 8.0"
    RE.get_or_init(|| {
        Regex::new(r"ffmpeg version[^\d]*(\d+)\.(\d+)(?:\.(\d+))?").expect("static regex")
    })
}

/// Parse `(major, minor, patch)` from `ffmpeg -version` output.
///
/// Git snapshot builds ("ffmpeg version N-113445-g...") carry no release
/// number and yield `None`.
pub fn parse_ffmpeg_version(output: &str) -> Option<(u32, u32, u32)> {
    let caps = version_regex().captures(output)?;
    let major = caps.get(1)?.as_str().parse().ok()?;
    let minor = caps.get(2)?.as_str().parse().ok()?;
    let patch = caps
        .get(3)
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0);
    Some((major, minor, patch))
}

/// Make sure the configured ffmpeg can be launched, returning its version if known.
pub fn check_ffmpeg<E>(executor: &E, config: &ToolkitConfig) -> Result<Option<(u32, u32, u32)>>
where
    E: CommandExecutor + ?Sized,
{
    let command = vec![config.ffmpeg_program(), "-version".to_string()];
    let output = executor.execute(&command).map_err(|e| {
        VidError::ToolUnavailable(format!(
            "{} (is ffmpeg installed and in PATH?)",
            e
        ))
    })?;

    if !output.success() {
        return Err(VidError::ToolUnavailable(format!(
            "{} -version failed ({})",
            config.ffmpeg_program(),
            output.status_text()
        )));
    }

    let version = parse_ffmpeg_version(&output.stdout);
    match version {
        Some((major, minor, patch)) => debug!("FFmpeg version: {}.{}.{}", major, minor, patch),
        None => debug!("FFmpeg version could not be determined (snapshot build?)"),
    }
    Ok(version)
}

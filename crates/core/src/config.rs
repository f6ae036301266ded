use crate::error::{Result, VidError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolkitConfig {
    pub ffmpeg_path: PathBuf,
    pub overwrite_output: bool,
    pub check_inputs_exist: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest_dir: Option<PathBuf>,
    pub profile: EncodeProfile,
    pub convert: ConvertDefaults,
}

/// Fixed re-encode target shared by concat `--reencode` and batch conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncodeProfile {
    pub video_codec: String,
    pub crf: u8,
    pub preset: String,
    pub audio_codec: String,
    pub audio_bitrate: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvertDefaults {
    pub output_ext: String,
}

impl Default for ToolkitConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: PathBuf::from("ffmpeg"),
            overwrite_output: true,
            check_inputs_exist: true,
            manifest_dir: None,
            profile: EncodeProfile::default(),
            convert: ConvertDefaults::default(),
        }
    }
}

impl Default for EncodeProfile {
    fn default() -> Self {
        Self {
            video_codec: "libx264".to_string(),
            crf: 23,
            preset: "medium".to_string(),
            audio_codec: "aac".to_string(),
            audio_bitrate: "192k".to_string(),
        }
    }
}

impl Default for ConvertDefaults {
    fn default() -> Self {
        Self {
            output_ext: "mp4".to_string(),
        }
    }
}

impl ToolkitConfig {
    pub fn ffmpeg_program(&self) -> String {
        self.ffmpeg_path.to_string_lossy().to_string()
    }
}

pub fn load_config(path: Option<&std::path::Path>) -> Result<ToolkitConfig> {
    let config = if let Some(config_path) = path {
        if config_path.exists() {
            let contents = std::fs::read_to_string(config_path).map_err(|e| {
                VidError::InvalidInput(format!("Failed to read config file: {}", e))
            })?;

            toml::from_str::<ToolkitConfig>(&contents).map_err(|e| {
                VidError::InvalidInput(format!("Failed to parse TOML config: {}", e))
            })?
        } else {
            tracing::warn!("Config file not found at {:?}, using defaults", config_path);
            ToolkitConfig::default()
        }
    } else {
        tracing::debug!("No config path provided, using defaults");
        ToolkitConfig::default()
    };

    validate_config(&config)?;
    Ok(config)
}

pub fn validate_config(config: &ToolkitConfig) -> Result<()> {
    let invalid = |msg: &str| Err(VidError::InvalidInput(msg.to_string()));

    if config.ffmpeg_path.as_os_str().is_empty() {
        return invalid("ffmpeg_path cannot be empty");
    }

    let profile = &config.profile;
    if profile.crf > 51 {
        return invalid("profile.crf must be between 0 and 51");
    }
    if profile.video_codec.trim().is_empty() || profile.audio_codec.trim().is_empty() {
        return invalid("profile codecs cannot be empty");
    }
    if profile.preset.trim().is_empty() {
        return invalid("profile.preset cannot be empty");
    }
    if profile.audio_bitrate.trim().is_empty() {
        return invalid("profile.audio_bitrate cannot be empty");
    }

    let ext = &config.convert.output_ext;
    if ext.trim().is_empty() || ext.starts_with('.') {
        return invalid("convert.output_ext must be a bare extension such as \"mp4\"");
    }

    Ok(())
}

// Core library for the vidkit command-line tools

pub mod concat;
pub mod config;
pub mod convert;
pub mod error;
pub mod executor;
pub mod logging;
pub mod manifest;
pub mod metadata;
pub mod startup;

// Re-export commonly used types
pub use concat::{concat_videos, ConcatMode, ConcatReport};
pub use config::ToolkitConfig;
pub use error::{Result, VidError};
pub use executor::{CommandExecutor, FfmpegExecutor, ToolOutput};

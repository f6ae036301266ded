use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, VidError>;

#[derive(Debug, Error)]
pub enum VidError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The concat invocation exited non-zero. `suggest_reencode` is only set
    /// for stream-copy runs, where a codec mismatch is the usual cause.
    #[error("concatenation failed ({status}){}\n{diagnostics}", reencode_hint(.suggest_reencode))]
    ConcatFailed {
        status: String,
        diagnostics: String,
        suggest_reencode: bool,
    },

    #[error("failed to convert {input:?} ({status})\n{diagnostics}")]
    ConvertFailed {
        input: PathBuf,
        status: String,
        diagnostics: String,
    },

    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("ffmpeg is not usable: {0}")]
    ToolUnavailable(String),

    #[error("only {produced} unique titles could be generated out of {requested} requested")]
    TitleSpaceExhausted { requested: usize, produced: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

fn reencode_hint(suggest: &bool) -> &'static str {
    if *suggest {
        "; try again with --reencode for codec compatibility"
    } else {
        ""
    }
}

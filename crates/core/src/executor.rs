// External tool invocation

use crate::error::{Result, VidError};
use std::process::{Command, Stdio};
use tracing::debug;

/// Captured result of one finished child process.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ToolOutput {
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    pub fn status_text(&self) -> String {
        match self.exit_code {
            Some(code) => format!("exit code {}", code),
            None => "terminated by signal".to_string(),
        }
    }

    /// Last `max_lines` lines of stderr, which is where ffmpeg puts its diagnostics.
    pub fn diagnostics(&self, max_lines: usize) -> String {
        let lines: Vec<&str> = self
            .stderr
            .lines()
            .filter(|l| !l.trim().is_empty())
            .collect();
        let start = lines.len().saturating_sub(max_lines);
        lines[start..].join("\n")
    }
}

/// Runs a fully built command line (`command[0]` is the program) and waits for it.
pub trait CommandExecutor {
    fn execute(&self, command: &[String]) -> Result<ToolOutput>;
}

/// Blocking executor backed by `std::process::Command`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FfmpegExecutor;

impl CommandExecutor for FfmpegExecutor {
    fn execute(&self, command: &[String]) -> Result<ToolOutput> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| VidError::InvalidInput("empty command line".to_string()))?;

        debug!("Running: {}", command.join(" "));

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| VidError::Spawn {
                program: program.clone(),
                source,
            })?;

        Ok(ToolOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_text() {
        let ok = ToolOutput {
            exit_code: Some(0),
            ..Default::default()
        };
        assert!(ok.success());
        assert_eq!(ok.status_text(), "exit code 0");

        let killed = ToolOutput::default();
        assert!(!killed.success());
        assert_eq!(killed.status_text(), "terminated by signal");
    }

    #[test]
    fn test_diagnostics_keeps_tail() {
        let output = ToolOutput {
            exit_code: Some(1),
            stdout: String::new(),
            stderr: "line1\n\nline2\nline3\nline4\n".to_string(),
        };
        assert_eq!(output.diagnostics(2), "line3\nline4");
        assert_eq!(output.diagnostics(10), "line1\nline2\nline3\nline4");
    }

    #[test]
    fn test_empty_command_rejected() {
        let result = FfmpegExecutor.execute(&[]);
        assert!(matches!(result, Err(VidError::InvalidInput(_))));
    }

    #[test]
    fn test_missing_program_is_spawn_error() {
        let command = vec!["/nonexistent/vidkit-no-such-tool".to_string()];
        let result = FfmpegExecutor.execute(&command);
        assert!(matches!(result, Err(VidError::Spawn { .. })));
    }
}

#![allow(dead_code)]

use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;
use vidkit_core::{CommandExecutor, Result, ToolOutput, VidError};

/// One captured invocation. `manifest` holds the playlist contents as they
/// were on disk while the tool "ran".
#[derive(Debug, Clone)]
pub struct Invocation {
    pub command: Vec<String>,
    pub manifest_path: Option<PathBuf>,
    pub manifest: Option<String>,
}

pub enum Behavior {
    Succeed,
    Fail { code: i32, stderr: String },
    FailSpawn,
}

/// Stand-in for ffmpeg that records what it was asked to do.
pub struct RecordingExecutor {
    behavior: Behavior,
    pub invocations: RefCell<Vec<Invocation>>,
}

impl RecordingExecutor {
    pub fn succeeding() -> Self {
        Self::with(Behavior::Succeed)
    }

    pub fn failing(code: i32, stderr: &str) -> Self {
        Self::with(Behavior::Fail {
            code,
            stderr: stderr.to_string(),
        })
    }

    pub fn unlaunchable() -> Self {
        Self::with(Behavior::FailSpawn)
    }

    fn with(behavior: Behavior) -> Self {
        Self {
            behavior,
            invocations: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.invocations.borrow().len()
    }

    pub fn last(&self) -> Invocation {
        self.invocations
            .borrow()
            .last()
            .cloned()
            .expect("executor was never invoked")
    }
}

impl CommandExecutor for RecordingExecutor {
    fn execute(&self, command: &[String]) -> Result<ToolOutput> {
        // The concat playlist follows "-f concat ... -i"
        let manifest_path = command
            .windows(2)
            .find(|w| w[0] == "-i" && command.iter().any(|a| a == "concat"))
            .map(|w| PathBuf::from(&w[1]));
        let manifest = manifest_path
            .as_ref()
            .map(|p| fs::read_to_string(p).expect("manifest should exist during the run"));

        self.invocations.borrow_mut().push(Invocation {
            command: command.to_vec(),
            manifest_path,
            manifest,
        });

        match &self.behavior {
            Behavior::Succeed => Ok(ToolOutput {
                exit_code: Some(0),
                stdout: String::new(),
                stderr: String::new(),
            }),
            Behavior::Fail { code, stderr } => Ok(ToolOutput {
                exit_code: Some(*code),
                stdout: String::new(),
                stderr: stderr.clone(),
            }),
            Behavior::FailSpawn => Err(VidError::Spawn {
                program: command[0].clone(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
            }),
        }
    }
}

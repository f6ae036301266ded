//! Concat demuxer playlist ("manifest") handling.
//!
//! One `file '<path>'` directive per input, in output order. Single quotes
//! inside a path are closed, backslash-escaped and reopened (`'\''`) so the
//! demuxer reads every line back as one literal path.

use crate::error::Result;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;

pub fn escape_path(path: &str) -> String {
    path.replace('\'', "'\\''")
}

pub fn manifest_line(path: &Path) -> String {
    format!("file '{}'", escape_path(&path.to_string_lossy()))
}

pub fn render_manifest(files: &[PathBuf]) -> String {
    let mut out = String::new();
    for file in files {
        out.push_str(&manifest_line(file));
        out.push('\n');
    }
    out
}

/// Read a `file` directive back using the demuxer's tokenizer rules:
/// single-quoted spans are literal, a backslash outside quotes escapes the
/// next character, and unquoted whitespace ends the token.
pub fn parse_manifest_line(line: &str) -> Option<PathBuf> {
    let rest = line.trim_start().strip_prefix("file")?;
    if !rest.starts_with(|c: char| c.is_whitespace()) {
        return None;
    }

    let mut chars = rest.trim_start().chars();
    let mut token = String::new();
    let mut saw_any = false;

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                token.push(chars.next()?);
                saw_any = true;
            }
            '\'' => {
                loop {
                    match chars.next()? {
                        '\'' => break,
                        inner => token.push(inner),
                    }
                }
                saw_any = true;
            }
            c if c.is_whitespace() => break,
            c => {
                token.push(c);
                saw_any = true;
            }
        }
    }

    if !saw_any {
        return None;
    }
    Some(PathBuf::from(token))
}

/// Temporary playlist owned by a single concat run.
///
/// The file is removed exactly once: by [`ConcatManifest::close`] on the
/// normal path, or by `Drop` on any early exit.
#[derive(Debug)]
pub struct ConcatManifest {
    file: NamedTempFile,
    entries: usize,
}

impl ConcatManifest {
    pub fn create(files: &[PathBuf], dir: Option<&Path>) -> Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("vidkit-concat-").suffix(".txt");

        let mut file = match dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        file.write_all(render_manifest(files).as_bytes())?;
        file.flush()?;

        debug!(
            "Wrote concat manifest with {} entries to {}",
            files.len(),
            file.path().display()
        );

        Ok(Self {
            file,
            entries: files.len(),
        })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn len(&self) -> usize {
        self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries == 0
    }

    /// Delete the manifest now, reporting any I/O error instead of ignoring it.
    pub fn close(self) -> Result<()> {
        let path = self.file.path().to_path_buf();
        self.file.close()?;
        debug!("Removed concat manifest {}", path.display());
        Ok(())
    }
}

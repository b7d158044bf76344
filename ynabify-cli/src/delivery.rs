//! Terminal notifications and on-disk delivery of exported ledgers.

use std::fs;
use std::path::{Path, PathBuf};
use ynabify_core::{ArtifactSink, Notifier, Severity};

#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&mut self, severity: Severity, text: &str) {
        match severity {
            Severity::Success => {
                tracing::info!("{text}");
                println!("{text}");
            }
            Severity::Error => {
                tracing::error!("{text}");
                eprintln!("error: {text}");
            }
        }
    }
}

/// Writes each artifact into one directory.
#[derive(Debug)]
pub struct DirectorySink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl ArtifactSink for DirectorySink {
    fn deliver(&mut self, bytes: &[u8], suggested_file_name: &str, mime_type: &str) {
        let path = self.dir.join(local_file_name(suggested_file_name));
        match write_artifact(&path, bytes) {
            Ok(()) => {
                tracing::debug!(path = %path.display(), %mime_type, bytes = bytes.len(), "wrote artifact");
                println!("Wrote {}", path.display());
                self.written.push(path);
            }
            Err(e) => {
                tracing::error!(path = %path.display(), error = %e, "could not write artifact");
                eprintln!("error: could not write {}: {e}", path.display());
            }
        }
    }
}

/// Suggested names carry the date as `YYYY/MM/DD`; like a browser download,
/// path separators become `_` so the file lands in the target directory.
pub fn local_file_name(suggested: &str) -> String {
    suggested.replace(['/', '\\'], "_")
}

fn write_artifact(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_file_name_flattens_date() {
        assert_eq!(local_file_name("123456789_2024/03/09.csv"), "123456789_2024_03_09.csv");
        assert_eq!(local_file_name("a\\b.csv"), "a_b.csv");
        assert_eq!(local_file_name("plain.csv"), "plain.csv");
    }

    #[test]
    fn test_directory_sink_writes_file() {
        let dir = std::env::temp_dir().join(format!("ynabify-sink-{}", std::process::id()));
        let mut sink = DirectorySink::new(&dir);
        sink.deliver(b"\"Date\"\r\n", "1_2024/03/09.csv", "text/csv");

        assert_eq!(sink.written(), &[dir.join("1_2024_03_09.csv")]);
        assert_eq!(fs::read(&sink.written()[0]).unwrap(), b"\"Date\"\r\n");
        fs::remove_dir_all(&dir).ok();
    }
}

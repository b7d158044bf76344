//! In-memory collaborators, for embedding the converter and for tests.

use ynabify_core::{ArtifactSink, Notifier, Severity};

/// A delivered export file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl Artifact {
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    pub artifacts: Vec<Artifact>,
}

impl ArtifactSink for MemorySink {
    fn deliver(&mut self, bytes: &[u8], suggested_file_name: &str, mime_type: &str) {
        self.artifacts.push(Artifact {
            file_name: suggested_file_name.to_string(),
            mime_type: mime_type.to_string(),
            bytes: bytes.to_vec(),
        });
    }
}

#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    pub messages: Vec<(Severity, String)>,
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, severity: Severity, text: &str) {
        self.messages.push((severity, text.to_string()));
    }
}

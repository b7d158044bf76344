//! Seams to the world outside the conversion pipeline.
//!
//! The converter fires notifications and hands over finished files; it never
//! looks at whether either one succeeded.

use serde::{Deserialize, Serialize};

/// MIME type attached to every exported ledger.
pub const CSV_MIME_TYPE: &str = "text/csv";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
}

/// Receives one user-visible message per terminal outcome of a file.
pub trait Notifier {
    fn notify(&mut self, severity: Severity, text: &str);
}

/// Receives finished export files (save dialog, download, directory...).
pub trait ArtifactSink {
    fn deliver(&mut self, bytes: &[u8], suggested_file_name: &str, mime_type: &str);
}

//! ynabify-core: shared transaction types and the delivery seams used by the converter

pub mod delivery;
pub mod transaction;

pub use delivery::{ArtifactSink, Notifier, Severity, CSV_MIME_TYPE};
pub use transaction::{StructuredTransaction, LEDGER_HEADER, LEDGER_WIDTH};

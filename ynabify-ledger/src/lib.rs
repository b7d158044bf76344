//! ynabify-ledger: per-account YNAB ledgers and the aggregator that drives one
//! file's conversion.

pub mod aggregator;
pub mod ledger;
pub mod memory;

pub use aggregator::{ConversionSession, ConversionStats, LedgerAggregator};
pub use ledger::AccountLedger;
pub use memory::{Artifact, MemorySink, RecordingNotifier};

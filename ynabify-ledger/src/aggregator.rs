//! Drives the conversion of one input file.
//!
//! The reader feeds batches through [`LedgerAggregator::process_batch`] and ends
//! the stream with exactly one of [`LedgerAggregator::report_error`] or
//! [`LedgerAggregator::report_complete`]. One error anywhere fails the whole
//! file: nothing is emitted, even for accounts that parsed cleanly.

use std::collections::HashMap;

use chrono::{NaiveDate, Utc};
use ynabify_core::{ArtifactSink, Notifier, Severity};
use ynabify_ingest::{BatchRow, RowBatch, StatementLineParser};

use crate::ledger::AccountLedger;

/// Row counters for one file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionStats {
    pub rows_converted: usize,
    /// Rows the reader flagged as unreadable.
    pub rows_skipped: usize,
    /// Rows too short to hold the required cells.
    pub rows_malformed: usize,
    /// Converted rows whose description matched no known micro-format.
    pub unmatched_descriptions: usize,
}

/// Per-file state: ledgers in first-seen account order plus the failure flag.
#[derive(Debug, Clone, Default)]
pub struct ConversionSession {
    ledgers: Vec<AccountLedger>,
    by_account: HashMap<String, usize>,
    failed: bool,
    stats: ConversionStats,
}

impl ConversionSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_failed(&self) -> bool {
        self.failed
    }

    pub fn stats(&self) -> &ConversionStats {
        &self.stats
    }

    pub fn ledgers(&self) -> &[AccountLedger] {
        &self.ledgers
    }

    pub fn ledger(&self, account: &str) -> Option<&AccountLedger> {
        self.by_account.get(account).map(|&i| &self.ledgers[i])
    }

    fn ledger_for(&mut self, account: &str) -> &mut AccountLedger {
        let index = match self.by_account.get(account) {
            Some(&i) => i,
            None => {
                tracing::debug!(%account, "new account");
                self.ledgers.push(AccountLedger::new(account));
                let i = self.ledgers.len() - 1;
                self.by_account.insert(account.to_string(), i);
                i
            }
        };
        &mut self.ledgers[index]
    }
}

pub struct LedgerAggregator<N, S> {
    parser: StatementLineParser,
    session: ConversionSession,
    notifier: N,
    sink: S,
    conversion_date: NaiveDate,
}

impl<N: Notifier, S: ArtifactSink> LedgerAggregator<N, S> {
    /// Files are dated with today's UTC date unless overridden.
    pub fn new(parser: StatementLineParser, notifier: N, sink: S) -> Self {
        Self {
            parser,
            session: ConversionSession::new(),
            notifier,
            sink,
            conversion_date: Utc::now().date_naive(),
        }
    }

    pub fn with_conversion_date(mut self, date: NaiveDate) -> Self {
        self.conversion_date = date;
        self
    }

    pub fn conversion_date(&self) -> NaiveDate {
        self.conversion_date
    }

    pub fn session(&self) -> &ConversionSession {
        &self.session
    }

    pub fn stats(&self) -> &ConversionStats {
        self.session.stats()
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_parts(self) -> (N, S) {
        (self.notifier, self.sink)
    }

    pub fn process_batch(&mut self, batch: &RowBatch) {
        if self.session.failed {
            return;
        }

        for row in &batch.rows {
            self.convert_row(row);
        }
    }

    fn convert_row(&mut self, row: &BatchRow) {
        if let Some(error) = &row.error {
            tracing::debug!(%error, "skipping row flagged by the reader");
            self.session.stats.rows_skipped += 1;
            return;
        }

        let line = match self.parser.parse_line(&row.data) {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!(error = %e, "skipping malformed row");
                self.session.stats.rows_malformed += 1;
                return;
            }
        };

        let txn = line.transaction;
        if line.description_format.is_none() {
            tracing::debug!(
                account = %txn.account,
                date = %txn.date,
                "description matched no known format"
            );
            self.session.stats.unmatched_descriptions += 1;
        }

        if self.session.ledger_for(&txn.account).append_row(txn.to_ledger_row()) {
            self.session.stats.rows_converted += 1;
        }
    }

    pub fn report_error(&mut self, message: &str, source_file: &str) {
        if self.session.failed {
            return;
        }
        self.session.failed = true;

        tracing::error!(file = %source_file, %message, "conversion failed");
        self.notifier.notify(
            Severity::Error,
            &format!("An error occurred in file {source_file}: {message}"),
        );
    }

    pub fn report_complete(&mut self, source_file: &str) {
        if self.session.failed {
            return;
        }

        let stats = self.session.stats;
        tracing::info!(
            file = %source_file,
            accounts = self.session.ledgers.len(),
            converted = stats.rows_converted,
            skipped = stats.rows_skipped,
            malformed = stats.rows_malformed,
            "conversion complete"
        );
        if stats.unmatched_descriptions > 0 {
            tracing::warn!(
                file = %source_file,
                rows = stats.unmatched_descriptions,
                "rows converted without payee or memo: description format not recognised"
            );
        }

        self.notifier.notify(
            Severity::Success,
            &format!(
                "{source_file} is completed successfully. Converted as {}",
                self.parser.bank()
            ),
        );

        for ledger in &self.session.ledgers {
            ledger.emit(&mut self.sink, self.conversion_date);
        }
    }
}

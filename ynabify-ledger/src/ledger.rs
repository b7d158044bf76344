//! One account's rows, rendered as a YNAB import CSV.
//!
//! Output shape:
//!   "Date","Payee","Category","Memo","Outflow","Inflow"\r\n
//!   "2024-03-01","Albert Heijn 1234","","","12.50","0"\r\n
//!
//! Fields are wrapped in quotes as-is. A field that itself contains `"` yields
//! a line YNAB will misread; nothing escapes it.

use chrono::NaiveDate;
use ynabify_core::{ArtifactSink, CSV_MIME_TYPE, LEDGER_HEADER, LEDGER_WIDTH};

const LINE_TERMINATOR: &str = "\r\n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountLedger {
    account: String,
    rows: Vec<Vec<String>>,
}

impl AccountLedger {
    pub fn new(account: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            rows: Vec::new(),
        }
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    /// Appended rows, header excluded.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append a row in header order. Rows of the wrong width are dropped and
    /// logged; returns whether the row was kept.
    pub fn append_row(&mut self, fields: Vec<String>) -> bool {
        if fields.len() != LEDGER_WIDTH {
            tracing::error!(
                account = %self.account,
                expected = LEDGER_WIDTH,
                got = fields.len(),
                "ledger row has the wrong number of fields, dropping it"
            );
            return false;
        }

        self.rows.push(fields);
        true
    }

    pub fn serialize(&self) -> String {
        let mut out = String::new();
        push_line(&mut out, LEDGER_HEADER.iter().copied());
        for row in &self.rows {
            push_line(&mut out, row.iter().map(String::as_str));
        }
        out
    }

    /// `{account}_{YYYY/MM/DD}.csv`, dated by the conversion, not the transactions.
    pub fn file_name(&self, conversion_date: NaiveDate) -> String {
        format!("{}_{}.csv", self.account, conversion_date.format("%Y/%m/%d"))
    }

    /// Hand the rendered ledger to the delivery collaborator.
    pub fn emit<S: ArtifactSink + ?Sized>(&self, sink: &mut S, conversion_date: NaiveDate) {
        let file_name = self.file_name(conversion_date);
        tracing::debug!(account = %self.account, rows = self.rows.len(), %file_name, "emitting ledger");
        sink.deliver(self.serialize().as_bytes(), &file_name, CSV_MIME_TYPE);
    }
}

fn push_line<'a>(out: &mut String, fields: impl Iterator<Item = &'a str>) {
    for (i, field) in fields.enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push('"');
        out.push_str(field);
        out.push('"');
    }
    out.push_str(LINE_TERMINATOR);
}

//! ABN AMRO tab-separated transaction export parser.
//!
//! Expected rows (tab separated, no header):
//!   123456789  EUR  20240301  1234,56  1222,06  20240301  -12,50  BEA   NR:1A2B3C   01.03.24/12.34 Albert Heijn 1234,PAS123
//!
//! Cells used: 0 account, 2 transaction date, 6 signed amount, 7 description.

use anyhow::Result;
use ynabify_core::StructuredTransaction;

use crate::date::DateTemplate;
use crate::description::{DescriptionFormat, FieldFormatExtractor};
use crate::types::RowError;

/// Bank key reported in notifications.
pub const BANK_KEY: &str = "ABN";

const ACCOUNT_CELL: usize = 0;
const DATE_CELL: usize = 2;
const AMOUNT_CELL: usize = 6;
const DESCRIPTION_CELL: usize = 7;

const DEBIT_MARKER: char = '-';
const DECIMAL_SEPARATOR: char = ',';
const ZERO_AMOUNT: &str = "0";

/// Result of parsing one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub transaction: StructuredTransaction,
    /// `None` when the description matched no known micro-format.
    pub description_format: Option<DescriptionFormat>,
}

#[derive(Debug, Clone)]
pub struct StatementLineParser {
    date_template: DateTemplate,
    extractor: FieldFormatExtractor,
}

impl StatementLineParser {
    pub fn new(date_template: DateTemplate) -> Result<Self> {
        Ok(Self {
            date_template,
            extractor: FieldFormatExtractor::new()?,
        })
    }

    pub fn bank(&self) -> &'static str {
        BANK_KEY
    }

    /// Parse one statement row into a fresh transaction record.
    ///
    /// Only a row too short to hold the required cells is an error; any other
    /// oddity produces a record with whatever fields could be recovered.
    pub fn parse_line(&self, row: &[String]) -> Result<ParsedLine, RowError> {
        let mut txn = StructuredTransaction::default();

        txn.account = cell(row, ACCOUNT_CELL, "account")?.to_string();
        txn.date = self.parse_date(cell(row, DATE_CELL, "date")?);
        (txn.outflow, txn.inflow) = parse_flow(cell(row, AMOUNT_CELL, "amount")?);

        let extraction = self
            .extractor
            .extract(cell(row, DESCRIPTION_CELL, "description")?);
        txn.payee = extraction.payee;
        txn.memo = extraction.memo;

        Ok(ParsedLine {
            transaction: txn,
            description_format: extraction.format,
        })
    }

    pub fn parse_date(&self, raw: &str) -> String {
        self.date_template.reformat(raw)
    }
}

/// Split a locale-formatted signed amount into `(outflow, inflow)`.
///
/// `-12,50` -> `("12.50", "0")`, `1234,56` -> `("0", "1234.56")`.
/// The magnitude is reformatted, never validated; an empty one reads as `0`.
pub fn parse_flow(raw: &str) -> (String, String) {
    let zero = || ZERO_AMOUNT.to_string();
    if raw.contains(DEBIT_MARKER) {
        let magnitude = raw
            .replacen(DEBIT_MARKER, "", 1)
            .replacen(DECIMAL_SEPARATOR, ".", 1);
        (or_zero(magnitude), zero())
    } else {
        (zero(), or_zero(raw.replacen(DECIMAL_SEPARATOR, ".", 1)))
    }
}

fn or_zero(amount: String) -> String {
    if amount.is_empty() {
        ZERO_AMOUNT.to_string()
    } else {
        amount
    }
}

fn cell<'a>(row: &'a [String], index: usize, field: &'static str) -> Result<&'a str, RowError> {
    row.get(index)
        .map(String::as_str)
        .ok_or(RowError::MissingCell {
            index,
            len: row.len(),
            field,
        })
}

//! Normalized transaction record, one per parsed statement row.

use serde::{Deserialize, Serialize};

/// Column header of every exported ledger file.
pub const LEDGER_HEADER: [&str; LEDGER_WIDTH] =
    ["Date", "Payee", "Category", "Memo", "Outflow", "Inflow"];

/// Number of fields in a ledger row.
pub const LEDGER_WIDTH: usize = 6;

/// A statement row decomposed into the fields personal-finance software imports.
///
/// Amounts stay as decimal strings: the converter reformats, it never does arithmetic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredTransaction {
    /// `YYYY-MM-DD`
    pub date: String,
    pub payee: String,
    /// Never filled by the ABN AMRO dialect.
    pub category: String,
    pub memo: String,
    /// Debit magnitude, `"0"` for credits.
    pub outflow: String,
    /// Credit magnitude, `"0"` for debits.
    pub inflow: String,
    pub account: String,
}

impl StructuredTransaction {
    /// Fields in [`LEDGER_HEADER`] order. The account is not part of the row;
    /// it selects which ledger the row lands in.
    pub fn to_ledger_row(&self) -> Vec<String> {
        vec![
            self.date.clone(),
            self.payee.clone(),
            self.category.clone(),
            self.memo.clone(),
            self.outflow.clone(),
            self.inflow.clone(),
        ]
    }

    pub fn is_outflow(&self) -> bool {
        self.outflow != "0" && !self.outflow.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> StructuredTransaction {
        StructuredTransaction {
            date: "2024-03-01".to_string(),
            payee: "Albert Heijn 1234".to_string(),
            category: String::new(),
            memo: String::new(),
            outflow: "12.50".to_string(),
            inflow: "0".to_string(),
            account: "123456789".to_string(),
        }
    }

    #[test]
    fn test_row_follows_header_order() {
        let row = sample().to_ledger_row();
        assert_eq!(row.len(), LEDGER_HEADER.len());
        assert_eq!(
            row,
            vec!["2024-03-01", "Albert Heijn 1234", "", "", "12.50", "0"]
        );
    }

    #[test]
    fn test_is_outflow() {
        let mut txn = sample();
        assert!(txn.is_outflow());
        txn.outflow = "0".to_string();
        txn.inflow = "12.50".to_string();
        assert!(!txn.is_outflow());
    }

    #[test]
    fn test_serde_field_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["payee"], "Albert Heijn 1234");
        assert_eq!(json["outflow"], "12.50");
        assert_eq!(json["account"], "123456789");
    }
}

//! Payee/memo extraction from the ABN AMRO description cell.
//!
//! The description column bundles several fields in one of a handful of
//! micro-formats, recognisable by how the text starts:
//!
//!   BEA   NR:1A2B3C   01.03.24/12.34 Albert Heijn 1234,PAS123
//!   /TRTP/SEPA OVERBOEKING/IBAN/NL91ABNA0417164300/BIC/ABNANL2A/NAME/J Jansen/REMI/Huur maart/
//!   ABN AMRO Bank N.V.               Basic Package              2,95
//!   STORTING BELEG. FONDS ABN AMRO Aandelen FONDSCODE:  12345  ORDER 9876543 0,5 STUKS
//!
//! Anything else yields empty payee and memo.

use anyhow::Result;
use regex::Regex;

/// Known description micro-formats, in dispatch priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DescriptionFormat {
    /// Debit card payment (`BEA`): merchant between the auth code and `,PAS`.
    CardPayment,
    /// SEPA transfer: `/TAG/value/TAG/value...`.
    TaggedFields,
    /// Bank's own charges: columns separated by runs of spaces.
    BankInternal,
    /// Investment fund deposit order.
    InvestmentOrder,
}

const CARD_PAYMENT_PREFIX: &str = "BEA";
const TAGGED_FIELDS_PREFIX: &str = "/";
const BANK_INTERNAL_PREFIX: &str = "ABN";
const INVESTMENT_ORDER_PREFIX: &str = "STORTING BELEG. FONDS ";

/// First matching prefix wins.
const DISPATCH: [(&str, DescriptionFormat); 4] = [
    (CARD_PAYMENT_PREFIX, DescriptionFormat::CardPayment),
    (TAGGED_FIELDS_PREFIX, DescriptionFormat::TaggedFields),
    (BANK_INTERNAL_PREFIX, DescriptionFormat::BankInternal),
    (INVESTMENT_ORDER_PREFIX, DescriptionFormat::InvestmentOrder),
];

/// Payee and memo pulled out of one description, plus the format that matched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub format: Option<DescriptionFormat>,
    pub payee: String,
    pub memo: String,
}

impl Extraction {
    pub fn is_matched(&self) -> bool {
        self.format.is_some()
    }
}

/// Holds the compiled patterns; build once per parser and reuse across rows.
#[derive(Debug, Clone)]
pub struct FieldFormatExtractor {
    card_payee: Regex,
    columns: Regex,
    order_columns: Regex,
}

impl FieldFormatExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            // "/<time-ish number> <merchant>,PAS"
            card_payee: Regex::new(r"/\d+\.\d+\s(.+?),PAS")?,
            columns: Regex::new(r"(.+?)(?:\s{2,}|$)")?,
            order_columns: Regex::new(r"(.+?)(?:\s{2,}|$|\sFONDSCODE)")?,
        })
    }

    pub fn classify(blob: &str) -> Option<DescriptionFormat> {
        DISPATCH
            .iter()
            .find(|(prefix, _)| blob.starts_with(*prefix))
            .map(|(_, format)| *format)
    }

    pub fn extract(&self, blob: &str) -> Extraction {
        let Some(format) = Self::classify(blob) else {
            return Extraction::default();
        };

        let (payee, memo) = match format {
            DescriptionFormat::CardPayment => (self.card_payment(blob), String::new()),
            DescriptionFormat::TaggedFields => tagged_fields(blob),
            DescriptionFormat::BankInternal => self.bank_internal(blob),
            DescriptionFormat::InvestmentOrder => self.investment_order(blob),
        };

        Extraction {
            format: Some(format),
            payee,
            memo,
        }
    }

    fn card_payment(&self, blob: &str) -> String {
        self.card_payee
            .captures(blob)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    }

    fn bank_internal(&self, blob: &str) -> (String, String) {
        let columns = split_columns(&self.columns, blob);
        // 0 is the name, 1 the description; a trailing amount column is expected
        if columns.len() >= 3 {
            (columns[0].to_string(), columns[1].to_string())
        } else {
            (String::new(), String::new())
        }
    }

    fn investment_order(&self, blob: &str) -> (String, String) {
        let columns = split_columns(&self.order_columns, blob);
        // 0 is the fund name, 1-2 the fund code, 3 the order details
        if columns.len() >= 4 {
            let fund = columns[0]
                .chars()
                .skip(INVESTMENT_ORDER_PREFIX.chars().count())
                .collect();
            (fund, columns[3].to_string())
        } else {
            (String::new(), String::new())
        }
    }
}

fn split_columns<'a>(re: &Regex, blob: &'a str) -> Vec<&'a str> {
    re.captures_iter(blob)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}

fn tagged_fields(blob: &str) -> (String, String) {
    let segments = tagged_segments(blob);
    let name = tagged_value(&segments, "NAME");
    let iban = tagged_value(&segments, "IBAN");
    let remi = tagged_value(&segments, "REMI");
    let csid = tagged_value(&segments, "CSID");

    (format!("{name} {iban}"), format!("{remi}\t{csid}"))
}

/// `/A/b/C/d` -> `["A", "b", "C", "d"]`. A final segment needs no closing slash;
/// trailing whitespace is not part of it.
fn tagged_segments(blob: &str) -> Vec<&str> {
    let body = blob.strip_prefix('/').unwrap_or(blob).trim_end();
    let mut segments: Vec<&str> = body.split('/').collect();
    if segments.last() == Some(&"") {
        segments.pop();
    }
    segments
}

/// Value following the first segment that mentions `tag`, or "".
fn tagged_value<'a>(segments: &[&'a str], tag: &str) -> &'a str {
    segments
        .iter()
        .position(|segment| segment.contains(tag))
        .and_then(|index| segments.get(index + 1))
        .copied()
        .unwrap_or("")
}

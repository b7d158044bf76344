//! ynabify-ingest: raw statement rows, description micro-format extraction, and
//! the ABN AMRO line parser.

pub mod date;
pub mod description;
pub mod parsers;
pub mod types;

pub use date::{DateTemplate, CANONICAL_DATE_TEMPLATE, DEFAULT_DATE_TEMPLATE};
pub use description::{DescriptionFormat, Extraction, FieldFormatExtractor};
pub use parsers::abn_amro::{ParsedLine, StatementLineParser};
pub use types::{BatchRow, RawRow, RowBatch, RowError};

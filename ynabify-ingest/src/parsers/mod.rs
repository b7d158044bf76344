//! Bank-specific statement line parsers.

pub mod abn_amro;

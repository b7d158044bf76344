use thiserror::Error;

/// One statement line as delivered by the reader: positional text cells.
pub type RawRow = Vec<String>;

/// A row plus the reader's verdict on it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchRow {
    pub data: RawRow,
    /// Set when the reader could not decode the line; such rows are skipped.
    pub error: Option<String>,
}

impl BatchRow {
    pub fn ok(data: RawRow) -> Self {
        Self { data, error: None }
    }

    pub fn failed(data: RawRow, error: impl Into<String>) -> Self {
        Self {
            data,
            error: Some(error.into()),
        }
    }
}

/// A chunk of consecutive rows from one input file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowBatch {
    pub rows: Vec<BatchRow>,
}

impl RowBatch {
    pub fn new(rows: Vec<BatchRow>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl FromIterator<BatchRow> for RowBatch {
    fn from_iter<I: IntoIterator<Item = BatchRow>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("row has {len} cells but the {field} cell (index {index}) is required")]
    MissingCell {
        index: usize,
        len: usize,
        field: &'static str,
    },
}

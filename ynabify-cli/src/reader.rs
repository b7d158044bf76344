//! Streams a delimited bank export as batches of raw rows.

use anyhow::Result;
use encoding_rs::WINDOWS_1252;
use std::io::Read;
use ynabify_ingest::{BatchRow, RowBatch};

#[derive(Debug, Clone, Copy)]
pub struct ReaderOptions {
    pub delimiter: u8,
    pub batch_size: usize,
}

/// Feed `input` to `on_batch` in chunks of `batch_size` rows.
///
/// Cells are read as UTF-8 and fall back to Windows-1252, the encoding ABN AMRO
/// exports use. Quote characters carry no meaning. Lines the CSV reader rejects
/// are passed along flagged rather than dropped. An I/O failure ends the stream
/// with an error; rows already delivered stay delivered.
pub fn stream_batches<R: Read>(
    input: R,
    opts: ReaderOptions,
    mut on_batch: impl FnMut(RowBatch),
) -> Result<()> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(opts.delimiter)
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(input);

    let batch_size = opts.batch_size.max(1);
    let mut pending = Vec::with_capacity(batch_size);
    let mut record = csv::ByteRecord::new();

    loop {
        match rdr.read_byte_record(&mut record) {
            Ok(false) => break,
            Ok(true) => pending.push(BatchRow::ok(decode(&record))),
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => pending.push(BatchRow::failed(Vec::new(), e.to_string())),
        }

        if pending.len() >= batch_size {
            on_batch(RowBatch::new(std::mem::take(&mut pending)));
        }
    }

    if !pending.is_empty() {
        on_batch(RowBatch::new(pending));
    }

    Ok(())
}

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

fn decode(record: &csv::ByteRecord) -> Vec<String> {
    let first_line = record.position().is_some_and(|pos| pos.line() == 1);
    record
        .iter()
        .enumerate()
        .map(|(i, field)| {
            let field = if first_line && i == 0 {
                field.strip_prefix(UTF8_BOM).unwrap_or(field)
            } else {
                field
            };
            decode_cell(field)
        })
        .collect()
}

fn decode_cell(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => {
            let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
            text.into_owned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    const TAB: ReaderOptions = ReaderOptions {
        delimiter: b'\t',
        batch_size: 2,
    };

    fn collect(input: &[u8], opts: ReaderOptions) -> (Result<()>, Vec<RowBatch>) {
        let mut batches = Vec::new();
        let res = stream_batches(input, opts, |b| batches.push(b));
        (res, batches)
    }

    #[test]
    fn test_batches_of_configured_size() {
        let input = b"1\tEUR\t20240301\n2\tEUR\t20240302\n3\tEUR\t20240303\n";
        let (res, batches) = collect(input, TAB);
        assert!(res.is_ok());
        assert_eq!(batches.iter().map(RowBatch::len).collect::<Vec<_>>(), vec![2, 1]);
        assert_eq!(batches[1].rows[0].data, vec!["3", "EUR", "20240303"]);
        assert!(batches[0].rows.iter().all(|r| r.error.is_none()));
    }

    #[test]
    fn test_rows_of_different_widths() {
        let input = b"1\tEUR\n2\tEUR\t20240302\t\t\t\t-1,00\tx\n";
        let (_, batches) = collect(input, TAB);
        assert_eq!(batches[0].rows[0].data.len(), 2);
        assert_eq!(batches[0].rows[1].data.len(), 8);
    }

    #[test]
    fn test_windows_1252_cells_are_kept() {
        let input = b"1\tEUR\tCaf\xe9 de Paris\n2\tEUR\tCaf\xc3\xa9\n";
        let (res, batches) = collect(input, TAB);
        assert!(res.is_ok());
        let rows = &batches[0].rows;
        assert!(rows.iter().all(|r| r.error.is_none()));
        assert_eq!(rows[0].data[2], "Caf\u{e9} de Paris");
        assert_eq!(rows[1].data[2], "Caf\u{e9}");
    }

    #[test]
    fn test_utf8_bom_is_stripped() {
        let (_, batches) = collect(b"\xef\xbb\xbf123\tEUR\n", TAB);
        assert_eq!(batches[0].rows[0].data, vec!["123", "EUR"]);
    }

    #[test]
    fn test_quotes_are_literal() {
        let input = b"1\tEUR\t\"Sinterklaas\" cadeau\n";
        let (_, batches) = collect(input, TAB);
        assert_eq!(batches[0].rows[0].data[2], "\"Sinterklaas\" cadeau");
    }

    #[test]
    fn test_empty_input_delivers_nothing() {
        let (res, batches) = collect(b"", TAB);
        assert!(res.is_ok());
        assert!(batches.is_empty());
    }

    struct Broken;

    impl Read for Broken {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk went away"))
        }
    }

    #[test]
    fn test_io_error_ends_stream() {
        let mut batches = Vec::new();
        let res = stream_batches(Broken, TAB, |b| batches.push(b));
        assert!(res.is_err());
        assert!(batches.is_empty());
    }
}

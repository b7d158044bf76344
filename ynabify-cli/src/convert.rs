//! One file in, one YNAB CSV per account out.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use std::fs::File;
use std::path::{Path, PathBuf};
use ynabify_ingest::{DateTemplate, StatementLineParser};
use ynabify_ledger::{ConversionStats, LedgerAggregator};

use crate::delivery::{DirectorySink, TerminalNotifier};
use crate::reader::{stream_batches, ReaderOptions};

#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub reader: ReaderOptions,
    pub date_template: DateTemplate,
    pub out_dir: PathBuf,
    pub conversion_date: NaiveDate,
}

#[derive(Debug)]
pub struct FileReport {
    pub file: String,
    pub succeeded: bool,
    pub stats: ConversionStats,
    pub written: Vec<PathBuf>,
}

/// Convert one export. Each call owns its own parser, session and sink, so
/// files can run side by side.
pub fn convert_file(path: &Path, opts: &ConvertOptions) -> Result<FileReport> {
    let parser = StatementLineParser::new(opts.date_template.clone())?;
    let mut agg = LedgerAggregator::new(parser, TerminalNotifier, DirectorySink::new(&opts.out_dir))
        .with_conversion_date(opts.conversion_date);

    let file = display_name(path);
    tracing::debug!(%file, "converting");

    let streamed = File::open(path)
        .with_context(|| format!("cannot open {}", path.display()))
        .and_then(|input| stream_batches(input, opts.reader, |batch| agg.process_batch(&batch)));

    match streamed {
        Ok(()) => agg.report_complete(&file),
        Err(e) => agg.report_error(&format!("{e:#}"), &file),
    }

    let succeeded = !agg.session().is_failed();
    let stats = *agg.stats();
    let (_, sink) = agg.into_parts();

    Ok(FileReport {
        file,
        succeeded,
        stats,
        written: sink.written().to_vec(),
    })
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

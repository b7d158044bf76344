use chrono::NaiveDate;
use std::path::PathBuf;
use ynabify_core::Severity;
use ynabify_ingest::{BatchRow, DateTemplate, RowBatch, StatementLineParser};
use ynabify_ledger::{LedgerAggregator, MemorySink, RecordingNotifier};

fn export_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("fixtures")
        .join("abn_amro_export.tab")
}

fn read_rows() -> Vec<BatchRow> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_path(export_path())
        .unwrap();

    rdr.records()
        .map(|r| BatchRow::ok(r.unwrap().iter().map(str::to_string).collect()))
        .collect()
}

fn aggregator() -> LedgerAggregator<RecordingNotifier, MemorySink> {
    let parser = StatementLineParser::new(DateTemplate::default()).unwrap();
    LedgerAggregator::new(parser, RecordingNotifier::default(), MemorySink::default())
        .with_conversion_date(NaiveDate::from_ymd_opt(2024, 4, 2).unwrap())
}

/// Real-layout regression: the export is split into two batches and converted end to end.
#[test]
fn test_convert_export_in_batches() {
    let rows = read_rows();
    assert_eq!(rows.len(), 6);

    let mut agg = aggregator();
    let (first, second) = rows.split_at(4);
    agg.process_batch(&first.iter().cloned().collect::<RowBatch>());
    agg.process_batch(&second.iter().cloned().collect::<RowBatch>());
    agg.report_complete("abn_amro_export.tab");

    let stats = *agg.stats();
    assert_eq!(stats.rows_converted, 6);
    assert_eq!(stats.unmatched_descriptions, 1);

    let (notifier, sink) = agg.into_parts();
    assert_eq!(notifier.messages.len(), 1);
    assert_eq!(notifier.messages[0].0, Severity::Success);
    assert!(notifier.messages[0].1.ends_with("Converted as ABN"));

    assert_eq!(sink.artifacts.len(), 2);

    let checking = &sink.artifacts[0];
    assert_eq!(checking.file_name, "123456789_2024/04/02.csv");
    assert_eq!(
        checking.text(),
        concat!(
            "\"Date\",\"Payee\",\"Category\",\"Memo\",\"Outflow\",\"Inflow\"\r\n",
            "\"2024-03-01\",\"Albert Heijn 1234\",\"\",\"\",\"12.50\",\"0\"\r\n",
            "\"2024-03-05\",\"Werkgever BV NL02ABNA0123456789\",\"\",\"Salaris maart\t\",\"0\",\"2500.00\"\r\n",
            "\"2024-03-10\",\"ABN AMRO Aandelen\",\"\",\"ORDER 9876543 0,5 STUKS\",\"100.00\",\"0\"\r\n",
            "\"2024-03-15\",\"Energie BV NL11INGB0001234567\",\"\",\"Termijnbedrag maart\tNL98ZZZ999999990000\",\"45.00\",\"0\"\r\n",
        )
    );

    let savings = &sink.artifacts[1];
    assert_eq!(savings.file_name, "987654321_2024/04/02.csv");
    let text = savings.text();
    let lines: Vec<&str> = text.split_terminator("\r\n").collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[1], "\"2024-03-06\",\"ABN AMRO Bank N.V.\",\"\",\"Basic Package\",\"2.95\",\"0\"");
    // unrecognised description: the row survives with empty payee and memo
    assert_eq!(lines[2], "\"2024-03-20\",\"\",\"\",\"\",\"0\",\"15.00\"");
}

#[test]
fn test_exactly_one_of_inflow_outflow_is_set() {
    let mut agg = aggregator();
    agg.process_batch(&read_rows().into_iter().collect::<RowBatch>());

    for ledger in agg.session().ledgers() {
        for row in ledger.rows() {
            let (outflow, inflow) = (&row[4], &row[5]);
            assert!(
                (outflow == "0") != (inflow == "0"),
                "row {row:?} should move money one way"
            );
        }
    }
}

#[test]
fn test_stream_error_suppresses_all_output() {
    let mut agg = aggregator();
    agg.process_batch(&read_rows().into_iter().collect::<RowBatch>());
    agg.report_error("read interrupted", "abn_amro_export.tab");
    agg.report_complete("abn_amro_export.tab");

    assert_eq!(agg.session().ledgers().len(), 2);
    assert!(agg.sink().artifacts.is_empty());
    assert_eq!(agg.notifier().messages[0].0, Severity::Error);
}

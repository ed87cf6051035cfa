mod common;

use common::{TRACKS_CSV, TestWorkspace};
use track_query::data::Value;
use track_query::error::EngineError;
use track_query::ingest::{dedupe, ingest_path, ingest_reader};

#[test]
fn every_ingested_row_matches_the_header_width() {
    let workspace = TestWorkspace::new();
    let path = workspace.write_tracks();
    let ingestion = ingest_path(&path, ',').expect("ingest");

    let width = ingestion.table.columns().len();
    assert_eq!(width, 11);
    for row in ingestion.table.rows() {
        assert_eq!(row.len(), width);
    }
}

#[test]
fn malformed_rows_are_counted_not_raised() {
    let workspace = TestWorkspace::new();
    let path = workspace.write_tracks();
    let ingestion = ingest_path(&path, ',').expect("ingest");

    // Seven data lines, one of them three fields wide.
    assert_eq!(ingestion.stats.malformed_rows, 1);
    assert_eq!(ingestion.stats.total_rows, 7);
    assert_eq!(ingestion.table.count(), 7);
}

#[test]
fn quoted_field_keeps_its_embedded_delimiter() {
    let workspace = TestWorkspace::new();
    let path = workspace.write_tracks();
    let ingestion = ingest_path(&path, ',').expect("ingest");

    let names: Vec<&Value> = ingestion.table.rows().iter().map(|row| &row[0]).collect();
    assert!(names.contains(&&Value::String("Thinking, Out Loud".into())));
}

#[test]
fn coercion_assigns_expected_types_per_cell() {
    let workspace = TestWorkspace::new();
    let path = workspace.write_tracks();
    let ingestion = ingest_path(&path, ',').expect("ingest");

    let first = &ingestion.table.rows()[0];
    assert_eq!(first[0], Value::String("Shape of You".into()));
    assert_eq!(first[2], Value::Integer(84));
    assert_eq!(first[7], Value::Float(0.83));

    // Thunder's popularity is the NA alias.
    let thunder = &ingestion.table.rows()[3];
    assert_eq!(thunder[2], Value::Null);
}

#[test]
fn dedupe_is_idempotent() {
    let workspace = TestWorkspace::new();
    let path = workspace.write_tracks();
    let mut ingestion = ingest_path(&path, ',').expect("ingest");

    let once = dedupe(ingestion.table, &mut ingestion.stats);
    assert_eq!(once.count(), 6);
    assert_eq!(ingestion.stats.duplicate_rows, 1);

    let twice = dedupe(once.clone(), &mut ingestion.stats);
    assert_eq!(twice, once);
    assert_eq!(ingestion.stats.duplicate_rows, 1);
}

#[test]
fn stats_do_not_leak_between_runs() {
    let workspace = TestWorkspace::new();
    let path = workspace.write_tracks();

    let first = ingest_path(&path, ',').expect("ingest");
    let second = ingest_path(&path, ',').expect("ingest");
    assert_eq!(first.stats, second.stats);
}

#[test]
fn missing_input_is_a_not_found_error() {
    let err = ingest_path(std::path::Path::new("/definitely/not/here.csv"), ',').unwrap_err();
    match err {
        EngineError::InputNotFound { path } => {
            assert!(path.ends_with("here.csv"));
        }
        other => panic!("expected InputNotFound, got {other:?}"),
    }
}

#[test]
fn round_trip_through_export_preserves_deduped_rows() {
    let workspace = TestWorkspace::new();
    let path = workspace.write_tracks();
    let mut ingestion = ingest_path(&path, ',').expect("ingest");
    let table = dedupe(ingestion.table, &mut ingestion.stats);

    let text = track_query::export::to_csv_string(&table, b',').expect("serialize");
    let reparsed = ingest_reader(std::io::Cursor::new(text), ',').expect("re-ingest");
    let mut stats = reparsed.stats;
    let deduped_again = dedupe(reparsed.table, &mut stats);

    assert_eq!(deduped_again.count(), table.count());
    assert_eq!(stats.duplicate_rows, 0);
}

#[test]
fn tab_delimited_input_parses_with_explicit_delimiter() {
    let tsv = TRACKS_CSV.replace(',', "\t").replace("Thinking\t Out Loud", "Thinking, Out Loud");
    let ingestion = ingest_reader(std::io::Cursor::new(tsv), '\t').expect("ingest");
    assert_eq!(ingestion.table.columns().len(), 11);
    assert_eq!(ingestion.table.count(), 7);
}

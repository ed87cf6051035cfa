//! Text-to-typed-row ingestion and duplicate removal.
//!
//! The first line of the input is the header (strings, never coerced; a
//! duplicated header name is kept as-is). Every later line is tokenized and
//! coerced; a line whose field count disagrees with the header is dropped and
//! counted, never raised. Statistics are scoped to one ingestion call so
//! independent runs stay isolated.

use std::{
    collections::HashSet,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use log::debug;
use serde::Serialize;

use crate::{
    data::{self, Value, ValueKey},
    error::{EngineError, EngineResult},
    io_utils,
    table::Table,
};

/// Counters accumulated across one ingestion run.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct IngestStats {
    pub total_rows: usize,
    pub total_fields: usize,
    pub null_values: usize,
    pub integer_values: usize,
    pub float_values: usize,
    pub string_values: usize,
    pub malformed_rows: usize,
    pub duplicate_rows: usize,
}

impl IngestStats {
    fn record(&mut self, value: &Value) {
        self.total_fields += 1;
        match value {
            Value::Null => self.null_values += 1,
            Value::Integer(_) => self.integer_values += 1,
            Value::Float(_) => self.float_values += 1,
            Value::String(_) => self.string_values += 1,
        }
    }

    /// Share of processed fields that carried a non-null value.
    pub fn non_null_percent(&self) -> f64 {
        if self.total_fields == 0 {
            return 0.0;
        }
        (1.0 - self.null_values as f64 / self.total_fields as f64) * 100.0
    }

    /// Metric/value pairs for the ASCII report.
    pub fn render_rows(&self) -> Vec<Vec<String>> {
        vec![
            vec!["rows parsed".to_string(), self.total_rows.to_string()],
            vec!["fields processed".to_string(), self.total_fields.to_string()],
            vec![
                "malformed rows skipped".to_string(),
                self.malformed_rows.to_string(),
            ],
            vec!["null values".to_string(), self.null_values.to_string()],
            vec!["integer values".to_string(), self.integer_values.to_string()],
            vec!["float values".to_string(), self.float_values.to_string()],
            vec!["string values".to_string(), self.string_values.to_string()],
            vec![
                "duplicate rows removed".to_string(),
                self.duplicate_rows.to_string(),
            ],
            vec![
                "non-null percent".to_string(),
                format!("{:.2}%", self.non_null_percent()),
            ],
        ]
    }
}

/// A parsed table together with the statistics of the run that produced it.
#[derive(Debug)]
pub struct Ingestion {
    pub table: Table,
    pub stats: IngestStats,
}

/// Ingest a delimited text file (or stdin via `-`) into a typed table.
pub fn ingest_path(path: &Path, delimiter: char) -> EngineResult<Ingestion> {
    if io_utils::is_dash(path) {
        return ingest_reader(std::io::stdin().lock(), delimiter);
    }
    let file = File::open(path).map_err(|err| match err.kind() {
        std::io::ErrorKind::NotFound => EngineError::InputNotFound {
            path: path.to_path_buf(),
        },
        _ => EngineError::Io(err),
    })?;
    ingest_reader(BufReader::new(file), delimiter)
}

/// Ingest from any buffered reader. Empty input yields an empty table.
pub fn ingest_reader<R: BufRead>(reader: R, delimiter: char) -> EngineResult<Ingestion> {
    let mut stats = IngestStats::default();
    let mut lines = reader.lines();

    let Some(header_line) = lines.next() else {
        return Ok(Ingestion {
            table: Table::empty(),
            stats,
        });
    };
    let header = crate::tokenize::split_line(&header_line?, delimiter);

    let mut rows = Vec::new();
    for line in lines {
        let fields = crate::tokenize::split_line(&line?, delimiter);
        if fields.len() != header.len() {
            stats.malformed_rows += 1;
            debug!(
                "Dropping malformed record: {} field(s), header has {}",
                fields.len(),
                header.len()
            );
            continue;
        }
        let row = fields
            .iter()
            .map(|field| {
                let value = data::coerce(field);
                stats.record(&value);
                value
            })
            .collect::<Vec<_>>();
        rows.push(row);
        stats.total_rows += 1;
    }

    Ok(Ingestion {
        table: Table::new(header, rows),
        stats,
    })
}

/// Remove exact-duplicate rows, keeping the first occurrence in input order.
///
/// Row identity is the full (column, value) pairing canonicalized by sorting
/// on column name, so column order never affects equality. Every dropped row
/// increments `stats.duplicate_rows`.
pub fn dedupe(table: Table, stats: &mut IngestStats) -> Table {
    let (columns, rows) = table.into_parts();

    // All rows share one schema, so a single name-sorted permutation
    // canonicalizes every row.
    let mut order: Vec<usize> = (0..columns.len()).collect();
    order.sort_by(|&a, &b| columns[a].cmp(&columns[b]));

    let mut seen: HashSet<Vec<ValueKey>> = HashSet::new();
    let mut kept = Vec::with_capacity(rows.len());
    for row in rows {
        let key: Vec<ValueKey> = order.iter().map(|&idx| row[idx].identity_key()).collect();
        if seen.insert(key) {
            kept.push(row);
        } else {
            stats.duplicate_rows += 1;
        }
    }
    Table::new(columns, kept)
}

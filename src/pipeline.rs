//! The query pipeline: load, filter, project, group, sort.
//!
//! Mirrors the session flow of the interactive layer: one base table feeds
//! the filtered view, the projected display columns, and the per-artist
//! aggregate summary, with counts observable at every stage.

use std::path::Path;

use log::info;

use crate::{
    columns,
    error::EngineResult,
    ingest::{self, IngestStats},
    predicate::FilterSpec,
    selectors,
    table::{Aggregate, Table},
};

/// Raw selector labels as supplied by the caller; ANY or blank leaves the
/// corresponding constraint unset.
#[derive(Debug, Clone, Default)]
pub struct Selections {
    pub popularity: String,
    pub genre: String,
    pub subgenre: String,
    pub danceability: String,
    pub energy: String,
    pub tempo: String,
    pub liveness: String,
    pub month: String,
    pub year: String,
}

impl Selections {
    /// Resolve the raw labels into typed constraints. Selector parsing fails
    /// open: unparseable text simply leaves a constraint unset.
    pub fn to_filter_spec(&self) -> FilterSpec {
        FilterSpec {
            popularity: selectors::parse_range_or_any(&self.popularity),
            genre: categorical(&self.genre),
            subgenre: categorical(&self.subgenre),
            danceability: selectors::parse_range_or_any(&self.danceability),
            energy: selectors::parse_range_or_any(&self.energy),
            tempo: selectors::parse_range_or_any(&self.tempo),
            liveness: selectors::parse_range_or_any(&self.liveness),
            month: selectors::parse_month_or_any(&self.month),
            year: selectors::parse_year_or_any(&self.year),
        }
    }
}

fn categorical(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(selectors::ANY) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Every stage of one query run, each an independent table.
#[derive(Debug)]
pub struct QueryOutcome {
    pub filtered: Table,
    pub projected: Table,
    pub grouped: Table,
    pub sorted: Option<Table>,
}

/// Ingest and deduplicate a dataset; the returned statistics cover both
/// passes of this one run.
pub fn load_table(path: &Path, delimiter: char) -> EngineResult<(Table, IngestStats)> {
    let ingestion = ingest::ingest_path(path, delimiter)?;
    let mut stats = ingestion.stats;
    let table = ingest::dedupe(ingestion.table, &mut stats);
    Ok((table, stats))
}

/// Run the full pipeline against a base table.
///
/// The filtered table feeds both the projection (fixed display columns) and
/// the per-artist summary (avg popularity, avg danceability); the optional
/// sort orders the summary ascending by one aggregate column.
pub fn apply_pipeline(
    table: &Table,
    selections: &Selections,
    sort_column: Option<&str>,
) -> EngineResult<QueryOutcome> {
    let predicate = selections.to_filter_spec().build();
    let filtered = {
        let compiled = predicate.compile(table.columns());
        table.filter(|row| compiled.matches(row))
    };
    info!(
        "Filter kept {} of {} row(s) ({} constraint(s))",
        filtered.count(),
        table.count(),
        predicate.constraints().len()
    );

    let projected = filtered.project(columns::PROJECT_COLUMNS)?;

    let aggregations = vec![
        (columns::TRACK_POPULARITY.to_string(), Aggregate::Avg),
        (columns::DANCEABILITY.to_string(), Aggregate::Avg),
    ];
    let grouped = filtered.group_by(columns::TRACK_ARTIST, &aggregations)?;
    info!("Grouped into {} artist(s)", grouped.count());

    let sorted = match sort_column {
        Some(column) => Some(grouped.sort_by(column, false)?),
        None => None,
    };

    Ok(QueryOutcome {
        filtered,
        projected,
        grouped,
        sorted,
    })
}

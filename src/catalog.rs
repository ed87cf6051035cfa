//! Selector domains derived from a loaded table.
//!
//! Read-only derivations the presentation layer turns into dropdown choices:
//! distinct categorical values, subgenres scoped to a chosen genre, evenly
//! spaced numeric buckets over the observed min/max, and the years present
//! in a date column.

use itertools::Itertools;

use crate::{columns, predicate::Range, selectors, table::Table};

pub const MONTH_LABELS: &[&str] = &[
    "Jan (1)",
    "Feb (2)",
    "Mar (3)",
    "Apr (4)",
    "May (5)",
    "Jun (6)",
    "Jul (7)",
    "Aug (8)",
    "Sep (9)",
    "Oct (10)",
    "Nov (11)",
    "Dec (12)",
];

/// Bucket width for tempo selectors, in BPM.
pub const TEMPO_BUCKET_WIDTH: f64 = 20.0;

/// Sorted distinct non-null values of a column, rendered for display.
pub fn distinct_non_null(table: &Table, column: &str) -> Vec<String> {
    let Some(index) = table.column_index(column) else {
        return Vec::new();
    };
    table
        .rows()
        .iter()
        .filter(|row| !row[index].is_null())
        .map(|row| row[index].as_display())
        .filter(|text| !text.is_empty())
        .unique()
        .sorted()
        .collect_vec()
}

/// Distinct non-null subgenres among rows matching the chosen genre.
pub fn subgenres_for_genre(table: &Table, genre: &str) -> Vec<String> {
    let Some(genre_index) = table.column_index(columns::PLAYLIST_GENRE) else {
        return Vec::new();
    };
    let Some(subgenre_index) = table.column_index(columns::PLAYLIST_SUBGENRE) else {
        return Vec::new();
    };
    table
        .rows()
        .iter()
        .filter(|row| row[genre_index].as_str() == Some(genre))
        .filter(|row| !row[subgenre_index].is_null())
        .map(|row| row[subgenre_index].as_display())
        .filter(|text| !text.is_empty())
        .unique()
        .sorted()
        .collect_vec()
}

/// Evenly spaced buckets of `width` covering the observed min/max of a
/// numeric column, rounded outward to multiples of the width. A column with
/// no numeric values yields no buckets.
pub fn bucket_edges(table: &Table, column: &str, width: f64) -> Vec<Range> {
    if width <= 0.0 {
        return Vec::new();
    }
    let Some(index) = table.column_index(column) else {
        return Vec::new();
    };
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut observed = false;
    for row in table.rows() {
        if let Some(value) = row[index].as_numeric() {
            min = min.min(value);
            max = max.max(value);
            observed = true;
        }
    }
    if !observed {
        return Vec::new();
    }
    let start = (min / width).floor() * width;
    let end = (max / width).ceil() * width;
    let count = ((end - start) / width).round() as usize;
    (0..count)
        .map(|step| {
            let low = start + step as f64 * width;
            Range::new(low, low + width)
        })
        .collect_vec()
}

/// Distinct 4-digit years found in the leading characters of a date column.
pub fn distinct_years(table: &Table, column: &str) -> Vec<i32> {
    let Some(index) = table.column_index(column) else {
        return Vec::new();
    };
    table
        .rows()
        .iter()
        .filter_map(|row| row[index].as_str())
        .filter_map(leading_year)
        .unique()
        .sorted()
        .collect_vec()
}

fn leading_year(text: &str) -> Option<i32> {
    let bytes = text.as_bytes();
    if bytes.len() < 4 || !bytes[..4].iter().all(u8::is_ascii_digit) {
        return None;
    }
    text[..4].parse().ok()
}

/// Every selector list the presentation layer offers, each fronted by ANY.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorOptions {
    pub popularity: Vec<String>,
    pub unit_buckets: Vec<String>,
    pub genres: Vec<String>,
    pub subgenres: Vec<String>,
    pub tempo: Vec<String>,
    pub months: Vec<String>,
    pub years: Vec<String>,
}

/// Compute the selector domains for a table. When a genre is chosen the
/// subgenre list narrows to that genre's subgenres.
pub fn build_options(table: &Table, genre_choice: Option<&str>) -> SelectorOptions {
    let popularity = with_any(
        (0..10).map(|step| format!("{}-{}", step * 10, (step + 1) * 10)),
    );
    let unit_buckets = with_any(
        (0..10).map(|step| format!("{:.1}-{:.1}", step as f64 / 10.0, (step + 1) as f64 / 10.0)),
    );
    let genres = with_any(distinct_non_null(table, columns::PLAYLIST_GENRE).into_iter());

    let chosen = genre_choice.filter(|choice| !choice.eq_ignore_ascii_case(selectors::ANY));
    let subgenres = match chosen {
        Some(genre) => with_any(subgenres_for_genre(table, genre).into_iter()),
        None => with_any(distinct_non_null(table, columns::PLAYLIST_SUBGENRE).into_iter()),
    };

    let tempo = with_any(
        bucket_edges(table, columns::TEMPO, TEMPO_BUCKET_WIDTH)
            .into_iter()
            .map(|range| format!("{:.0}-{:.0}", range.low, range.high)),
    );
    let months = with_any(MONTH_LABELS.iter().map(|label| (*label).to_string()));
    let years = with_any(
        distinct_years(table, columns::TRACK_ALBUM_RELEASE_DATE)
            .into_iter()
            .map(|year| year.to_string()),
    );

    SelectorOptions {
        popularity,
        unit_buckets,
        genres,
        subgenres,
        tempo,
        months,
        years,
    }
}

fn with_any(items: impl Iterator<Item = String>) -> Vec<String> {
    std::iter::once(selectors::ANY.to_string()).chain(items).collect_vec()
}

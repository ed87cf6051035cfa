//! Constraint model and predicate builder.
//!
//! User selections become a set of independent optional constraints; the
//! builder folds the present ones into a single AND predicate. An unset
//! constraint is vacuously true. Range constraints test half-open buckets
//! `[low, high)` unless the bucket is top-inclusive: the last bucket of the
//! bounded 0-100 and 0.0-1.0 domains, and every tempo range.

use serde::{Deserialize, Serialize};

use crate::{columns, data::Value};

const BOUND_EPSILON: f64 = 1e-9;
const PERCENT_TOP: f64 = 100.0;
const UNIT_TOP: f64 = 1.0;

/// Closed pair of floating-point bounds; upper-bound inclusivity is decided
/// per constraint when the predicate is built.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub low: f64,
    pub high: f64,
}

impl Range {
    pub fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    fn reaches(&self, top: f64) -> bool {
        (self.high - top).abs() < BOUND_EPSILON
    }
}

/// Bucket membership test. `[low, high)` by default, `[low, high]` when the
/// bucket is marked top-inclusive. Null and non-numeric values never match.
pub fn in_bucket(value: Option<f64>, range: Range, top_inclusive: bool) -> bool {
    let Some(value) = value else {
        return false;
    };
    if top_inclusive {
        value >= range.low && value <= range.high
    } else {
        value >= range.low && value < range.high
    }
}

/// One named, independently optional constraint over a row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Constraint {
    Bucket {
        column: String,
        range: Range,
        top_inclusive: bool,
    },
    Equals {
        column: String,
        value: String,
    },
    /// Month/year test over a `"YYYY-MM-…"` date string. A missing or
    /// malformed date fails the row whenever either part is constrained.
    ReleaseDate {
        column: String,
        month: Option<u32>,
        year: Option<i32>,
    },
}

impl Constraint {
    fn matches(&self, value: &Value) -> bool {
        match self {
            Constraint::Bucket {
                range,
                top_inclusive,
                ..
            } => in_bucket(value.as_numeric(), *range, *top_inclusive),
            Constraint::Equals { value: expected, .. } => {
                value.as_str() == Some(expected.as_str())
            }
            Constraint::ReleaseDate { month, year, .. } => {
                let Some(text) = value.as_str() else {
                    return false;
                };
                let Some((y, m)) = parse_year_month_prefix(text) else {
                    return false;
                };
                month.is_none_or(|want| m == want) && year.is_none_or(|want| y == want)
            }
        }
    }

    fn column(&self) -> &str {
        match self {
            Constraint::Bucket { column, .. }
            | Constraint::Equals { column, .. }
            | Constraint::ReleaseDate { column, .. } => column,
        }
    }
}

/// Leading `YYYY-MM` of a date string: four digits, a literal dash, then two
/// digits at positions 5-6.
fn parse_year_month_prefix(text: &str) -> Option<(i32, u32)> {
    let bytes = text.as_bytes();
    if bytes.len() < 7 || bytes[4] != b'-' {
        return None;
    }
    if !bytes[..4].iter().all(u8::is_ascii_digit) || !bytes[5..7].iter().all(u8::is_ascii_digit) {
        return None;
    }
    let year = text[..4].parse().ok()?;
    let month = text[5..7].parse().ok()?;
    Some((year, month))
}

/// The independent optional selections a caller can make; `None` means ANY.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub popularity: Option<Range>,
    pub genre: Option<String>,
    pub subgenre: Option<String>,
    pub danceability: Option<Range>,
    pub energy: Option<Range>,
    pub tempo: Option<Range>,
    pub liveness: Option<Range>,
    pub month: Option<u32>,
    pub year: Option<i32>,
}

impl FilterSpec {
    /// Fold the present selections into one AND predicate.
    pub fn build(&self) -> Predicate {
        let mut constraints = Vec::new();
        if let Some(range) = self.popularity {
            constraints.push(Constraint::Bucket {
                column: columns::TRACK_POPULARITY.to_string(),
                range,
                top_inclusive: range.reaches(PERCENT_TOP),
            });
        }
        if let Some(genre) = &self.genre {
            constraints.push(Constraint::Equals {
                column: columns::PLAYLIST_GENRE.to_string(),
                value: genre.clone(),
            });
        }
        if let Some(subgenre) = &self.subgenre {
            constraints.push(Constraint::Equals {
                column: columns::PLAYLIST_SUBGENRE.to_string(),
                value: subgenre.clone(),
            });
        }
        for (column, range) in [
            (columns::DANCEABILITY, self.danceability),
            (columns::ENERGY, self.energy),
            (columns::LIVENESS, self.liveness),
        ] {
            if let Some(range) = range {
                constraints.push(Constraint::Bucket {
                    column: column.to_string(),
                    range,
                    top_inclusive: range.reaches(UNIT_TOP),
                });
            }
        }
        if let Some(range) = self.tempo {
            // Tempo ranges are always closed on top.
            constraints.push(Constraint::Bucket {
                column: columns::TEMPO.to_string(),
                range,
                top_inclusive: true,
            });
        }
        if self.month.is_some() || self.year.is_some() {
            constraints.push(Constraint::ReleaseDate {
                column: columns::TRACK_ALBUM_RELEASE_DATE.to_string(),
                month: self.month,
                year: self.year,
            });
        }
        Predicate { constraints }
    }
}

/// A reusable row test: the conjunction of the constraints it was built from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Predicate {
    constraints: Vec<Constraint>,
}

impl Predicate {
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Resolve constraint columns against a schema once, producing a matcher
    /// reusable across every row of that table. A constrained column absent
    /// from the schema rejects all rows (fail-closed).
    pub fn compile<'a>(&'a self, schema: &[String]) -> CompiledPredicate<'a> {
        let checks = self
            .constraints
            .iter()
            .map(|constraint| {
                let index = schema.iter().position(|name| name == constraint.column());
                (index, constraint)
            })
            .collect();
        CompiledPredicate { checks }
    }
}

pub struct CompiledPredicate<'a> {
    checks: Vec<(Option<usize>, &'a Constraint)>,
}

impl CompiledPredicate<'_> {
    pub fn matches(&self, row: &[Value]) -> bool {
        self.checks.iter().all(|(index, constraint)| match index {
            Some(index) => constraint.matches(&row[*index]),
            None => false,
        })
    }
}

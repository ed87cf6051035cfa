//! In-memory table engine.
//!
//! A [`Table`] is an ordered row collection plus an explicit ordered schema.
//! Every operation returns a new table and leaves the receiver untouched, so
//! the same base table can feed several downstream queries in one session.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::{
    data::{Value, ValueKey, compare_values},
    error::{EngineError, EngineResult},
};

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Construct a table from an ordered schema and conforming rows.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        debug_assert!(
            rows.iter().all(|row| row.len() == columns.len()),
            "every row must match the schema width"
        );
        Self { columns, rows }
    }

    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn into_parts(self) -> (Vec<String>, Vec<Vec<Value>>) {
        (self.columns, self.rows)
    }

    pub fn count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|column| column == name)
    }

    /// Keep rows matching `predicate`, preserving relative order.
    pub fn filter<F>(&self, mut predicate: F) -> Table
    where
        F: FnMut(&[Value]) -> bool,
    {
        let rows = self
            .rows
            .iter()
            .filter(|row| predicate(row.as_slice()))
            .cloned()
            .collect();
        Table::new(self.columns.clone(), rows)
    }

    /// Produce a table holding exactly `columns`, in the requested order.
    ///
    /// Resolves every column before touching any row, so an unknown name
    /// fails the whole call with no partial result.
    pub fn project(&self, columns: &[&str]) -> EngineResult<Table> {
        let indices = columns
            .iter()
            .map(|name| {
                self.column_index(name).ok_or_else(|| EngineError::UnknownColumn {
                    column: (*name).to_string(),
                })
            })
            .collect::<EngineResult<Vec<_>>>()?;
        let rows = self
            .rows
            .iter()
            .map(|row| indices.iter().map(|&idx| row[idx].clone()).collect())
            .collect();
        let schema = columns.iter().map(|name| (*name).to_string()).collect();
        Ok(Table::new(schema, rows))
    }

    /// Partition rows by the exact value of `key_column` and aggregate.
    ///
    /// Groups surface in first-seen key order; Null is a distinct key. Only
    /// Integer/Float cells contribute to an aggregate, and a group with no
    /// numeric contributors for a column yields Null there. The result schema
    /// is the key column followed by the aggregate columns.
    pub fn group_by(
        &self,
        key_column: &str,
        aggregations: &[(String, Aggregate)],
    ) -> EngineResult<Table> {
        let key_index = self
            .column_index(key_column)
            .ok_or_else(|| EngineError::UnknownColumn {
                column: key_column.to_string(),
            })?;
        let value_indices = aggregations
            .iter()
            .map(|(column, _)| {
                self.column_index(column).ok_or_else(|| EngineError::UnknownColumn {
                    column: column.clone(),
                })
            })
            .collect::<EngineResult<Vec<_>>>()?;

        let mut slots: HashMap<ValueKey, usize> = HashMap::new();
        let mut groups: Vec<GroupAccumulator> = Vec::new();
        for row in &self.rows {
            let key = row[key_index].identity_key();
            let slot = *slots.entry(key).or_insert_with(|| {
                groups.push(GroupAccumulator::new(
                    row[key_index].clone(),
                    aggregations.len(),
                ));
                groups.len() - 1
            });
            for (position, &value_index) in value_indices.iter().enumerate() {
                groups[slot].observe(position, &row[value_index]);
            }
        }

        let rows = groups
            .into_iter()
            .map(|group| group.finish(aggregations))
            .collect();
        let mut schema = Vec::with_capacity(1 + aggregations.len());
        schema.push(key_column.to_string());
        schema.extend(aggregations.iter().map(|(column, _)| column.clone()));
        Ok(Table::new(schema, rows))
    }

    /// Stable sort on one column.
    ///
    /// Rows holding Null in the sort column land after every non-null row in
    /// both directions; `descending` reverses only the non-null comparison.
    pub fn sort_by(&self, column: &str, descending: bool) -> EngineResult<Table> {
        let index = self
            .column_index(column)
            .ok_or_else(|| EngineError::UnknownColumn {
                column: column.to_string(),
            })?;
        let mut rows = self.rows.clone();
        rows.sort_by(|left, right| {
            match (left[index].is_null(), right[index].is_null()) {
                (true, true) => Ordering::Equal,
                (true, false) => Ordering::Greater,
                (false, true) => Ordering::Less,
                (false, false) => {
                    let ordering = compare_values(&left[index], &right[index]);
                    if descending { ordering.reverse() } else { ordering }
                }
            }
        });
        Ok(Table::new(self.columns.clone(), rows))
    }
}

/// Reduction applied to the numeric values of one column within a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregate {
    Avg,
    Sum,
    Max,
    Min,
    Count,
}

impl Aggregate {
    pub fn as_str(&self) -> &'static str {
        match self {
            Aggregate::Avg => "avg",
            Aggregate::Sum => "sum",
            Aggregate::Max => "max",
            Aggregate::Min => "min",
            Aggregate::Count => "count",
        }
    }

    fn apply(&self, values: &[Value]) -> Value {
        if values.is_empty() {
            return Value::Null;
        }
        match self {
            Aggregate::Avg => {
                let total: f64 = values.iter().filter_map(Value::as_numeric).sum();
                Value::Float(total / values.len() as f64)
            }
            Aggregate::Sum => sum_values(values),
            Aggregate::Max => values
                .iter()
                .max_by(|a, b| compare_values(a, b))
                .cloned()
                .unwrap_or(Value::Null),
            Aggregate::Min => values
                .iter()
                .min_by(|a, b| compare_values(a, b))
                .cloned()
                .unwrap_or(Value::Null),
            Aggregate::Count => Value::Integer(values.len() as i64),
        }
    }
}

impl FromStr for Aggregate {
    type Err = EngineError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.trim().to_ascii_lowercase().as_str() {
            "avg" => Ok(Aggregate::Avg),
            "sum" => Ok(Aggregate::Sum),
            "max" => Ok(Aggregate::Max),
            "min" => Ok(Aggregate::Min),
            "count" => Ok(Aggregate::Count),
            other => Err(EngineError::UnsupportedAggregation {
                name: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Aggregate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Integer sums stay integral while they fit; anything else widens to float.
fn sum_values(values: &[Value]) -> Value {
    let all_integers = values.iter().all(|value| matches!(value, Value::Integer(_)));
    if all_integers {
        let mut total: i64 = 0;
        let mut overflowed = false;
        for value in values {
            if let Value::Integer(i) = value {
                match total.checked_add(*i) {
                    Some(next) => total = next,
                    None => {
                        overflowed = true;
                        break;
                    }
                }
            }
        }
        if !overflowed {
            return Value::Integer(total);
        }
    }
    Value::Float(values.iter().filter_map(Value::as_numeric).sum())
}

struct GroupAccumulator {
    key: Value,
    contributors: Vec<Vec<Value>>,
}

impl GroupAccumulator {
    fn new(key: Value, width: usize) -> Self {
        Self {
            key,
            contributors: vec![Vec::new(); width],
        }
    }

    fn observe(&mut self, position: usize, value: &Value) {
        if matches!(value, Value::Integer(_) | Value::Float(_)) {
            self.contributors[position].push(value.clone());
        }
    }

    fn finish(self, aggregations: &[(String, Aggregate)]) -> Vec<Value> {
        let mut row = Vec::with_capacity(1 + aggregations.len());
        row.push(self.key);
        for (position, (_, aggregate)) in aggregations.iter().enumerate() {
            row.push(aggregate.apply(&self.contributors[position]));
        }
        row
    }
}

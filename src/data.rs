use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Tokens treated as missing values, compared case-insensitively after trimming.
const NULL_ALIASES: &[&str] = &["", "na", "n/a", "null", "none"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Float(f64),
    String(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric view of the value, widening integers to `f64`.
    pub fn as_numeric(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::Null | Value::String(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_display(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Integer(i) => i.to_string(),
            Value::Float(f) => {
                if f.fract() == 0.0 {
                    format!("{f:.0}")
                } else {
                    f.to_string()
                }
            }
            Value::String(s) => s.clone(),
        }
    }

    /// Canonical identity key used for duplicate detection and grouping.
    ///
    /// Integral floats fold onto the integer key so that `Integer(1)` and
    /// `Float(1.0)` name the same group, matching the exact-value semantics of
    /// row equality.
    pub fn identity_key(&self) -> ValueKey {
        match self {
            Value::Null => ValueKey::Null,
            Value::Integer(i) => ValueKey::Integer(*i),
            Value::Float(f) => {
                if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                    ValueKey::Integer(*f as i64)
                } else {
                    ValueKey::FloatBits(f.to_bits())
                }
            }
            Value::String(s) => ValueKey::String(s.clone()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_display())
    }
}

/// Hashable stand-in for a [`Value`] with exact-value identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueKey {
    Null,
    Integer(i64),
    FloatBits(u64),
    String(String),
}

/// Coerce one raw field token into a typed value.
///
/// Decision order is fixed: null alias, integer literal, float literal,
/// string. The integer check runs before float parsing so that `"007"` stays
/// an integer and never degrades to `7.0`. An integer literal that overflows
/// `i64` falls through to the float rule.
pub fn coerce(token: &str) -> Value {
    let trimmed = token.trim();
    if NULL_ALIASES.contains(&trimmed.to_ascii_lowercase().as_str()) {
        return Value::Null;
    }
    if is_integer_literal(trimmed)
        && let Ok(parsed) = trimmed.parse::<i64>()
    {
        return Value::Integer(parsed);
    }
    if let Ok(parsed) = trimmed.parse::<f64>() {
        return Value::Float(parsed);
    }
    Value::String(trimmed.to_string())
}

fn is_integer_literal(token: &str) -> bool {
    let digits = token.strip_prefix('-').unwrap_or(token);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Total order over values for sorting within one column.
///
/// Integers compare exactly, mixed numeric pairs widen to `f64`, strings
/// compare lexicographically. Heterogeneous pairs order numerics before
/// strings and Null after everything, so the order is total even for columns
/// a caller should not be sorting.
pub fn compare_values(left: &Value, right: &Value) -> Ordering {
    match (left, right) {
        (Value::Integer(a), Value::Integer(b)) => a.cmp(b),
        (Value::Float(a), Value::Float(b)) => a.total_cmp(b),
        (Value::Integer(a), Value::Float(b)) => (*a as f64).total_cmp(b),
        (Value::Float(a), Value::Integer(b)) => a.total_cmp(&(*b as f64)),
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (a, b) => type_rank(a).cmp(&type_rank(b)),
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Integer(_) | Value::Float(_) => 0,
        Value::String(_) => 1,
        Value::Null => 2,
    }
}

//! Fail-open parsing of user-facing selector labels.
//!
//! Selector text comes from dropdowns or CLI flags: a bucket label like
//! `"20-40"`, a month label like `"Jan (1)"`, a year, or the `ANY` sentinel.
//! Every parser here returns `None` for ANY, blank, or unparseable input,
//! which downstream means "leave that constraint unset". This is deliberately
//! the opposite polarity of predicate evaluation, where a malformed date in a
//! row fails closed.

use crate::predicate::Range;

/// Sentinel meaning "no constraint" in every selector list.
pub const ANY: &str = "ANY";

fn is_any(input: &str) -> bool {
    input.is_empty() || input.eq_ignore_ascii_case(ANY)
}

/// Parse `"a-b"` into a range. Reversed bounds are unparseable, not an error.
pub fn parse_range_or_any(input: &str) -> Option<Range> {
    let trimmed = input.trim();
    if is_any(trimmed) {
        return None;
    }
    let parts: Vec<&str> = trimmed.split('-').collect();
    let [low, high] = parts.as_slice() else {
        return None;
    };
    let low: f64 = low.trim().parse().ok()?;
    let high: f64 = high.trim().parse().ok()?;
    if high < low {
        return None;
    }
    Some(Range::new(low, high))
}

/// Parse a month selector: `1`-`12`, a `"Jan (1)"` style label, or an
/// English month name (short or long).
pub fn parse_month_or_any(input: &str) -> Option<u32> {
    let lowered = input.trim().to_ascii_lowercase();
    if is_any(&lowered) {
        return None;
    }
    if lowered.bytes().all(|b| b.is_ascii_digit()) {
        let number: u32 = lowered.parse().ok()?;
        return (1..=12).contains(&number).then_some(number);
    }
    if let Some(open) = lowered.rfind('(')
        && lowered.ends_with(')')
    {
        let number: u32 = lowered[open + 1..lowered.len() - 1].parse().ok()?;
        return (1..=12).contains(&number).then_some(number);
    }
    month_name_to_number(&lowered)
}

fn month_name_to_number(name: &str) -> Option<u32> {
    let number = match name {
        "jan" | "january" => 1,
        "feb" | "february" => 2,
        "mar" | "march" => 3,
        "apr" | "april" => 4,
        "may" => 5,
        "jun" | "june" => 6,
        "jul" | "july" => 7,
        "aug" | "august" => 8,
        "sep" | "sept" | "september" => 9,
        "oct" | "october" => 10,
        "nov" | "november" => 11,
        "dec" | "december" => 12,
        _ => return None,
    };
    Some(number)
}

/// Parse a 4-digit year selector.
pub fn parse_year_or_any(input: &str) -> Option<i32> {
    let trimmed = input.trim();
    if is_any(trimmed) {
        return None;
    }
    if trimmed.len() == 4 && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        trimmed.parse().ok()
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_parsing_accepts_ints_and_floats() {
        assert_eq!(parse_range_or_any("20-40"), Some(Range::new(20.0, 40.0)));
        assert_eq!(parse_range_or_any("0.5-0.6"), Some(Range::new(0.5, 0.6)));
        assert_eq!(parse_range_or_any(" 90 - 100 "), Some(Range::new(90.0, 100.0)));
    }

    #[test]
    fn range_parsing_fails_open() {
        assert_eq!(parse_range_or_any("ANY"), None);
        assert_eq!(parse_range_or_any("any"), None);
        assert_eq!(parse_range_or_any(""), None);
        assert_eq!(parse_range_or_any("40-20"), None);
        assert_eq!(parse_range_or_any("fast"), None);
        // A leading minus produces three segments, which is unparseable.
        assert_eq!(parse_range_or_any("-10-20"), None);
    }

    #[test]
    fn month_parsing_accepts_numbers_labels_and_names() {
        assert_eq!(parse_month_or_any("3"), Some(3));
        assert_eq!(parse_month_or_any("Jan (1)"), Some(1));
        assert_eq!(parse_month_or_any("Sep (9)"), Some(9));
        assert_eq!(parse_month_or_any("december"), Some(12));
        assert_eq!(parse_month_or_any("SEPT"), Some(9));
    }

    #[test]
    fn month_parsing_fails_open() {
        assert_eq!(parse_month_or_any("ANY"), None);
        assert_eq!(parse_month_or_any("0"), None);
        assert_eq!(parse_month_or_any("13"), None);
        assert_eq!(parse_month_or_any("Smarch"), None);
        assert_eq!(parse_month_or_any("Nope (13)"), None);
    }

    #[test]
    fn year_parsing_requires_four_digits() {
        assert_eq!(parse_year_or_any("2019"), Some(2019));
        assert_eq!(parse_year_or_any(" 2020 "), Some(2020));
        assert_eq!(parse_year_or_any("ANY"), None);
        assert_eq!(parse_year_or_any("19"), None);
        assert_eq!(parse_year_or_any("20190"), None);
        assert_eq!(parse_year_or_any("twenty"), None);
    }
}

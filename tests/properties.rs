use proptest::prelude::*;

use track_query::data::Value;
use track_query::ingest::{IngestStats, dedupe};
use track_query::table::{Aggregate, Table};

fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        (0i64..5).prop_map(Value::Integer),
        (0u8..5).prop_map(|n| Value::Float(n as f64 / 2.0)),
        "[a-c]{1,2}".prop_map(Value::String),
    ]
}

fn table_strategy() -> impl Strategy<Value = Table> {
    proptest::collection::vec(
        proptest::collection::vec(value_strategy(), 3),
        0..40,
    )
    .prop_map(|rows| {
        Table::new(
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
            rows,
        )
    })
}

proptest! {
    #[test]
    fn dedupe_twice_equals_dedupe_once(table in table_strategy()) {
        let mut stats = IngestStats::default();
        let once = dedupe(table, &mut stats);
        let removed = stats.duplicate_rows;
        let twice = dedupe(once.clone(), &mut stats);
        prop_assert_eq!(&twice, &once);
        prop_assert_eq!(stats.duplicate_rows, removed);
    }

    #[test]
    fn filter_never_grows_a_table(table in table_strategy(), threshold in 0i64..5) {
        let filtered = table.filter(|row| {
            row[0].as_numeric().is_some_and(|v| v >= threshold as f64)
        });
        prop_assert!(filtered.count() <= table.count());
    }

    #[test]
    fn group_counts_partition_the_table(table in table_strategy()) {
        let grouped = table
            .group_by("a", &[("b".to_string(), Aggregate::Count)])
            .expect("group");
        let mut members = 0usize;
        for row in grouped.rows() {
            // Count aggregates only numeric cells, so tally group sizes by
            // re-filtering on the key instead.
            let key = row[0].identity_key();
            members += table
                .rows()
                .iter()
                .filter(|candidate| candidate[0].identity_key() == key)
                .count();
        }
        prop_assert_eq!(members, table.count());
    }

    #[test]
    fn sort_preserves_rows_and_pushes_nulls_last(
        table in table_strategy(),
        descending in proptest::bool::ANY,
    ) {
        let sorted = table.sort_by("b", descending).expect("sort");
        prop_assert_eq!(sorted.count(), table.count());

        let mut seen_null = false;
        for row in sorted.rows() {
            if row[1].is_null() {
                seen_null = true;
            } else {
                prop_assert!(!seen_null, "non-null value after a null in sort output");
            }
        }
    }

    #[test]
    fn projection_keeps_row_count(table in table_strategy()) {
        let projected = table.project(&["c", "a"]).expect("project");
        prop_assert_eq!(projected.count(), table.count());
        prop_assert_eq!(projected.columns().to_vec(), vec!["c".to_string(), "a".to_string()]);
    }
}

//! `TimeSeriesIndex` lookups checked against a linear scan over the same
//! entries.

use proptest::prelude::*;
use sv_repository::{ImmutabilityClass, ResolvedKey, TimeSeriesIndex};
use sv_time::Timestamp;

/// Latest-wins list of `(day, value)` pairs, unsorted.
fn scan_entries(writes: &[(i64, i64)]) -> Vec<(i64, i64)> {
    let mut entries: Vec<(i64, i64)> = Vec::new();
    for &(day, value) in writes {
        match entries.iter_mut().find(|(d, _)| *d == day) {
            Some(entry) => entry.1 = value,
            None => entries.push((day, value)),
        }
    }
    entries
}

fn scan_point(entries: &[(i64, i64)], day: i64, exact_only: bool) -> Option<i64> {
    if exact_only {
        return entries.iter().find(|(d, _)| *d == day).map(|(_, v)| *v);
    }
    entries
        .iter()
        .filter(|(d, _)| *d <= day)
        .max_by_key(|(d, _)| *d)
        .map(|(_, v)| *v)
}

fn scan_range(entries: &[(i64, i64)], from: i64, to: i64) -> Vec<i64> {
    let mut hits: Vec<(i64, i64)> = entries
        .iter()
        .copied()
        .filter(|(d, _)| from <= *d && *d <= to)
        .collect();
    hits.sort_by_key(|(d, _)| *d);
    hits.into_iter().map(|(_, v)| v).collect()
}

fn build(writes: &[(i64, i64)]) -> TimeSeriesIndex<i64> {
    let key = ResolvedKey::new("base", "simulation", "x");
    let mut index = TimeSeriesIndex::new();
    for &(day, value) in writes {
        index
            .insert_or_reject(&key, Timestamp::EPOCH.add_days(day), value, ImmutabilityClass::Mutable)
            .unwrap();
    }
    index
}

proptest! {
    #[test]
    fn point_query_matches_scan(
        writes in prop::collection::vec((0i64..400, any::<i64>()), 0..60),
        day in -10i64..420,
        exact_only in any::<bool>(),
    ) {
        let index = build(&writes);
        let entries = scan_entries(&writes);
        let got = index.point_query(Timestamp::EPOCH.add_days(day), exact_only).copied();
        prop_assert_eq!(got, scan_point(&entries, day, exact_only));
    }

    #[test]
    fn range_query_matches_scan(
        writes in prop::collection::vec((0i64..400, any::<i64>()), 0..60),
        a in -10i64..420,
        b in -10i64..420,
    ) {
        let (from, to) = (a.min(b), a.max(b));
        let index = build(&writes);
        let entries = scan_entries(&writes);
        let got: Vec<i64> = index
            .range_query(Timestamp::EPOCH.add_days(from), Timestamp::EPOCH.add_days(to))
            .unwrap()
            .into_iter()
            .copied()
            .collect();
        prop_assert_eq!(got, scan_range(&entries, from, to));
    }

    #[test]
    fn entries_stay_strictly_sorted(
        writes in prop::collection::vec((0i64..400, any::<i64>()), 0..60),
    ) {
        let index = build(&writes);
        let days: Vec<Timestamp> = index.iter().map(|(t, _)| t).collect();
        prop_assert!(days.windows(2).all(|w| w[0] < w[1]));
        prop_assert_eq!(index.len(), scan_entries(&writes).len());
    }

    #[test]
    fn with_dates_keeps_first_value_per_date(
        writes in prop::collection::vec((0i64..50, any::<i64>()), 0..40),
    ) {
        let key = ResolvedKey::new("base", "simulation", "$x");
        let mut index = TimeSeriesIndex::new();
        let mut first: Vec<(i64, i64)> = Vec::new();
        for &(day, value) in &writes {
            let accepted = index
                .insert_or_reject(&key, Timestamp::EPOCH.add_days(day), value, ImmutabilityClass::ImmutableWithDates)
                .is_ok();
            let fresh = !first.iter().any(|(d, _)| *d == day);
            prop_assert_eq!(accepted, fresh);
            if fresh {
                first.push((day, value));
            }
        }
        for (day, value) in first {
            prop_assert_eq!(index.point_query(Timestamp::EPOCH.add_days(day), true), Some(&value));
        }
    }
}

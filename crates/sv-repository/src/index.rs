//! Date-indexed series for one resolved key.
//!
//! `TimeSeriesIndex<V>` keeps `(Timestamp, V)` entries in a `Vec` sorted by
//! strictly increasing timestamp.  Inserts go in place, so the series is
//! always ready for binary search: a point lookup costs O(log n) and a range
//! scan O(log n + k).  Keys are read once per simulated day over multi-year
//! horizons, which is what makes the logarithmic lookup worthwhile.

use sv_core::errors::{Error, Result};
use sv_time::Timestamp;

use crate::immutability::ImmutabilityClass;
use crate::key::ResolvedKey;

/// Outcome of an accepted write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Insertion {
    /// A new entry was added.
    Inserted,
    /// The value of an existing entry was replaced.
    Replaced,
}

/// A sorted series of values for one key.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesIndex<V> {
    entries: Vec<(Timestamp, V)>,
}

impl<V> Default for TimeSeriesIndex<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> TimeSeriesIndex<V> {
    // ── Constructors ─────────────────────────────────────────────────────

    /// Create an empty series.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    // ── Inspectors ───────────────────────────────────────────────────────

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the series is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The earliest timestamp, or `None` if empty.
    pub fn first_timestamp(&self) -> Option<Timestamp> {
        self.entries.first().map(|(t, _)| *t)
    }

    /// The latest timestamp, or `None` if empty.
    pub fn last_timestamp(&self) -> Option<Timestamp> {
        self.entries.last().map(|(t, _)| *t)
    }

    /// Iterate over `(Timestamp, &V)` in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = (Timestamp, &V)> {
        self.entries.iter().map(|(t, v)| (*t, v))
    }

    // ── Writes ───────────────────────────────────────────────────────────

    /// Store `value` at `timestamp` under the write policy `class`.
    ///
    /// * `Mutable`: insert, or replace the entry already at `timestamp`.
    /// * `ImmutableWithDates`: insert; a present `timestamp` is a conflict.
    /// * `ImmutableWithoutDates`: only the first write ever is accepted and
    ///   it is stored at the epoch whatever `timestamp` says.
    ///
    /// # Errors
    /// [`Error::ImmutableConflict`] naming `key` and the colliding date.
    pub fn insert_or_reject(
        &mut self,
        key: &ResolvedKey,
        timestamp: Timestamp,
        value: V,
        class: ImmutabilityClass,
    ) -> Result<Insertion> {
        let timestamp = match class {
            ImmutabilityClass::ImmutableWithoutDates => {
                if let Some(existing) = self.first_timestamp() {
                    return Err(conflict(key, existing));
                }
                Timestamp::EPOCH
            }
            _ => timestamp,
        };

        match self.entries.binary_search_by_key(&timestamp, |(t, _)| *t) {
            Ok(pos) => match class {
                ImmutabilityClass::Mutable => {
                    self.entries[pos].1 = value;
                    Ok(Insertion::Replaced)
                }
                _ => Err(conflict(key, timestamp)),
            },
            Err(pos) => {
                self.entries.insert(pos, (timestamp, value));
                Ok(Insertion::Inserted)
            }
        }
    }

    // ── Queries ──────────────────────────────────────────────────────────

    /// The value in force at `timestamp`.
    ///
    /// With `exact_only == false` this is the entry with the greatest
    /// timestamp `<= timestamp`; with `exact_only == true` only an entry at
    /// exactly `timestamp` matches.
    pub fn point_query(&self, timestamp: Timestamp, exact_only: bool) -> Option<&V> {
        if exact_only {
            return self
                .entries
                .binary_search_by_key(&timestamp, |(t, _)| *t)
                .ok()
                .map(|pos| &self.entries[pos].1);
        }
        let upper = self.entries.partition_point(|(t, _)| *t <= timestamp);
        upper.checked_sub(1).map(|pos| &self.entries[pos].1)
    }

    /// The values stored in `[from, to]`, in ascending date order.
    ///
    /// # Errors
    /// [`Error::InvalidRange`] if `to < from`.
    pub fn range_query(&self, from: Timestamp, to: Timestamp) -> Result<Vec<&V>> {
        if to < from {
            return Err(Error::InvalidRange {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        let start = self.entries.partition_point(|(t, _)| *t < from);
        Ok(self.entries[start..]
            .iter()
            .take_while(|(t, _)| *t <= to)
            .map(|(_, v)| v)
            .collect())
    }
}

fn conflict(key: &ResolvedKey, timestamp: Timestamp) -> Error {
    Error::ImmutableConflict {
        key: key.to_string(),
        date: timestamp.to_string(),
    }
}

impl<V: std::fmt::Display> std::fmt::Display for TimeSeriesIndex<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (t, v) in &self.entries {
            writeln!(f, "{t} => {v}")?;
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

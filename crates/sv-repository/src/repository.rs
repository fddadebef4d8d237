//! `Repository`: the temporal store behind the drivers and settings façades.
//!
//! The repository owns one [`TimeSeriesIndex`] per resolved key, created on
//! the first write and never removed for the life of the run, plus the
//! `today` instant that bounds every read.  It is owned by a single
//! simulation loop; writes are visible to every read issued after them.

use std::collections::HashMap;
use std::fmt::Debug;

use sv_core::errors::{Error, Result};
use sv_time::Timestamp;
use tracing::{debug, trace, warn};

use crate::config::RepositoryConfig;
use crate::immutability::{ImmutabilityClass, ImmutabilityClassifier};
use crate::index::TimeSeriesIndex;
use crate::key::{KeyResolver, ResolvedKey};
use crate::record::{Lookup, Query, Record};

/// Scenario/unit keyed, date-indexed store of values of type `V`.
///
/// Values are stored as given: `V` is expected to be immutable once built
/// (a number, or a frozen [`Value`](sv_core::Value)).
#[derive(Debug, Clone)]
pub struct Repository<V> {
    config: RepositoryConfig,
    resolver: KeyResolver,
    classifier: ImmutabilityClassifier,
    series: HashMap<ResolvedKey, TimeSeriesIndex<V>>,
    today: Timestamp,
    debug_module_info: String,
}

impl<V: Clone + Debug> Repository<V> {
    /// Create an empty repository; `today` starts at the epoch.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] if `config` does not validate.
    pub fn new(config: RepositoryConfig) -> Result<Self> {
        config.validate()?;
        let resolver = KeyResolver::from_config(&config)?;
        let classifier = ImmutabilityClassifier::from_config(&config)?;
        Ok(Self {
            config,
            resolver,
            classifier,
            series: HashMap::new(),
            today: Timestamp::EPOCH,
            debug_module_info: String::new(),
        })
    }

    // ── Inspectors ───────────────────────────────────────────────────────

    /// The configuration this repository was built with.
    pub fn config(&self) -> &RepositoryConfig {
        &self.config
    }

    /// The key resolver.
    pub fn resolver(&self) -> &KeyResolver {
        &self.resolver
    }

    /// The current simulated date.
    pub fn today(&self) -> Timestamp {
        self.today
    }

    /// Number of keys holding at least one entry.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Whether nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// The series stored under exactly `key`, without fallback.
    pub fn series(&self, key: &ResolvedKey) -> Option<&TimeSeriesIndex<V>> {
        self.series.get(key)
    }

    // ── Clock and diagnostics ────────────────────────────────────────────

    /// Advance the simulated date; reads after it are rejected.
    pub fn set_today(&mut self, today: Timestamp) {
        debug!(%today, previous = %self.today, "repository today set");
        self.today = today;
    }

    /// Tag subsequent writes with the module performing them (logging only).
    pub fn set_debug_module_info(&mut self, info: impl Into<String>) {
        self.debug_module_info = info.into();
    }

    // ── Writes ───────────────────────────────────────────────────────────

    /// Apply a batch of records.
    ///
    /// Every record fans out over its `(scenario, unit)` targets; each target
    /// write is accepted or rejected on its own.  Rejections never stop the
    /// batch: the returned list holds one error per rejected write, in input
    /// order, and is empty when everything was applied.
    pub fn set<I>(&mut self, records: I) -> Vec<Error>
    where
        I: IntoIterator<Item = Record<V>>,
    {
        let mut errors = Vec::new();
        let mut accepted = 0usize;

        for record in records {
            let class = self.classifier.classify(&record.name);
            let date = record.date.unwrap_or(Timestamp::EPOCH);
            for (scenario, unit) in record.targets() {
                match self.write_one(scenario, unit, &record.name, date, &record.value, class) {
                    Ok(()) => accepted += 1,
                    Err(e) => {
                        warn!(
                            module = %self.debug_module_info,
                            name = %record.name,
                            error = %e,
                            "record rejected"
                        );
                        errors.push(e);
                    }
                }
            }
        }

        debug!(
            module = %self.debug_module_info,
            accepted,
            rejected = errors.len(),
            "batch applied"
        );
        errors
    }

    /// Apply a batch like [`set`](Self::set), then fail with the first
    /// rejection, if any.  Accepted writes stay applied.
    pub fn set_strict<I>(&mut self, records: I) -> Result<()>
    where
        I: IntoIterator<Item = Record<V>>,
    {
        match self.set(records).into_iter().next() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn write_one(
        &mut self,
        scenario: Option<&str>,
        unit: Option<&str>,
        name: &str,
        date: Timestamp,
        value: &V,
        class: ImmutabilityClass,
    ) -> Result<()> {
        let key = self.resolver.write_key(scenario, unit, name)?;
        if class == ImmutabilityClass::Mutable && !self.config.allow_mutable {
            return Err(Error::MutableNotAllowed {
                key: key.to_string(),
            });
        }
        let series = self.series.entry(key.clone()).or_default();
        let outcome = series.insert_or_reject(&key, date, value.clone(), class)?;
        trace!(%key, %date, ?class, ?outcome, ?value, "entry stored");
        Ok(())
    }

    // ── Reads ────────────────────────────────────────────────────────────

    /// Read with fallback resolution.
    ///
    /// Candidates are tried most specific first; the first one that yields
    /// a value (point query) or a non-empty list (range query) wins.
    /// `Ok(None)` means no candidate had anything for the requested dates.
    ///
    /// # Errors
    /// * [`Error::FutureDate`] if `date` or `end_date` is after `today`.
    /// * [`Error::InvalidRange`] if `end_date` is before `date`.
    /// * [`Error::InvalidArgument`] if the name is blank.
    pub fn get(&self, query: &Query) -> Result<Option<Lookup<V>>> {
        let date = query.date.unwrap_or(self.today);
        self.ensure_not_future(date)?;
        if let Some(end_date) = query.end_date {
            self.ensure_not_future(end_date)?;
            if end_date < date {
                return Err(Error::InvalidRange {
                    from: date.to_string(),
                    to: end_date.to_string(),
                });
            }
        }

        let candidates = self.resolver.read_candidates(
            query.scenario.as_deref(),
            query.unit.as_deref(),
            &query.name,
        )?;

        for key in &candidates {
            let Some(series) = self.series.get(key).filter(|s| !s.is_empty()) else {
                continue;
            };
            match query.end_date {
                None => {
                    if let Some(v) = series.point_query(date, query.exact_only) {
                        return Ok(Some(Lookup::Point(v.clone())));
                    }
                }
                Some(end_date) => {
                    let values = series.range_query(date, end_date)?;
                    if !values.is_empty() {
                        return Ok(Some(Lookup::Range(values.into_iter().cloned().collect())));
                    }
                }
            }
        }
        Ok(None)
    }

    /// Point read; `end_date` on the query is ignored.
    pub fn get_point(&self, query: &Query) -> Result<Option<V>> {
        let point = Query {
            end_date: None,
            ..query.clone()
        };
        Ok(self.get(&point)?.and_then(Lookup::into_point))
    }

    /// Range read over `[date, end_date]`; empty when nothing is found.
    ///
    /// A query without `end_date` covers the single instant `date` (default
    /// today), so only an entry stored at exactly that millisecond is returned.
    pub fn get_range(&self, query: &Query) -> Result<Vec<V>> {
        let mut range = query.clone();
        if range.end_date.is_none() {
            range.end_date = Some(range.date.unwrap_or(self.today));
        }
        Ok(self.get(&range)?.map(Lookup::into_values).unwrap_or_default())
    }

    /// Whether any fallback candidate of the query's key holds an entry.
    /// Dates are ignored.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] if the name is blank.
    pub fn is_defined(&self, query: &Query) -> Result<bool> {
        let candidates = self.resolver.read_candidates(
            query.scenario.as_deref(),
            query.unit.as_deref(),
            &query.name,
        )?;
        Ok(candidates
            .iter()
            .any(|key| self.series.get(key).is_some_and(|s| !s.is_empty())))
    }

    fn ensure_not_future(&self, date: Timestamp) -> Result<()> {
        if date > self.today {
            return Err(Error::FutureDate {
                date: date.to_string(),
                today: self.today.to_string(),
            });
        }
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

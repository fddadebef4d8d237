//! Write records, read queries and read results.

use sv_time::Timestamp;

/// One batched write.
///
/// `scenarios` and `units` fan out: the record is written once for every
/// `(scenario, unit)` pair.  An empty list stands for the single default
/// (running scenario, default unit).  A missing `date` means the epoch.
#[derive(Debug, Clone, PartialEq)]
pub struct Record<V> {
    /// Target scenarios; empty means the running scenario.
    pub scenarios: Vec<String>,
    /// Target units; empty means the default unit.
    pub units: Vec<String>,
    /// Name of the driver or setting.
    pub name: String,
    /// Date the value takes effect; `None` means the epoch.
    pub date: Option<Timestamp>,
    /// The value.
    pub value: V,
}

impl<V> Record<V> {
    /// A record for the default scenario and unit, undated.
    pub fn new(name: impl Into<String>, value: impl Into<V>) -> Self {
        Self {
            scenarios: Vec::new(),
            units: Vec::new(),
            name: name.into(),
            date: None,
            value: value.into(),
        }
    }

    /// Add a target scenario.
    pub fn scenario(mut self, scenario: impl Into<String>) -> Self {
        self.scenarios.push(scenario.into());
        self
    }

    /// Add several target scenarios.
    pub fn scenarios<I, S>(mut self, scenarios: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scenarios.extend(scenarios.into_iter().map(Into::into));
        self
    }

    /// Add a target unit.
    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.units.push(unit.into());
        self
    }

    /// Add several target units.
    pub fn units<I, S>(mut self, units: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.units.extend(units.into_iter().map(Into::into));
        self
    }

    /// Set the effective date.
    pub fn date(mut self, date: Timestamp) -> Self {
        self.date = Some(date);
        self
    }

    /// Replace the value, keeping the key and date.
    pub fn with_value<W>(self, value: W) -> Record<W> {
        Record {
            scenarios: self.scenarios,
            units: self.units,
            name: self.name,
            date: self.date,
            value,
        }
    }

    /// The `(scenario, unit)` pairs this record writes to; `None` stands for
    /// the default.
    pub fn targets(&self) -> Vec<(Option<&str>, Option<&str>)> {
        let scenarios: Vec<Option<&str>> = if self.scenarios.is_empty() {
            vec![None]
        } else {
            self.scenarios.iter().map(|s| Some(s.as_str())).collect()
        };
        let units: Vec<Option<&str>> = if self.units.is_empty() {
            vec![None]
        } else {
            self.units.iter().map(|u| Some(u.as_str())).collect()
        };
        scenarios
            .iter()
            .flat_map(|s| units.iter().map(move |u| (*s, *u)))
            .collect()
    }
}

/// A read request.
///
/// `date` defaults to the repository's `today`.  With `end_date` set the
/// query is a range query over `[date, end_date]`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Query {
    /// Requested scenario; `None` means the running scenario.
    pub scenario: Option<String>,
    /// Requested unit; `None` means the default unit.
    pub unit: Option<String>,
    /// Name of the driver or setting.
    pub name: String,
    /// Point date, or start of the range; `None` means today.
    pub date: Option<Timestamp>,
    /// End of the range, inclusive.
    pub end_date: Option<Timestamp>,
    /// Match only an entry at exactly `date` (point queries only).
    pub exact_only: bool,
}

impl Query {
    /// A point query for `name` at today, default scenario and unit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the scenario.
    pub fn scenario(mut self, scenario: impl Into<String>) -> Self {
        self.scenario = Some(scenario.into());
        self
    }

    /// Set the unit.
    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Set the point date (or range start).
    pub fn date(mut self, date: Timestamp) -> Self {
        self.date = Some(date);
        self
    }

    /// Set the range end, turning this into a range query.
    pub fn end_date(mut self, end_date: Timestamp) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// Require an entry at exactly the point date.
    pub fn exact_only(mut self, exact_only: bool) -> Self {
        self.exact_only = exact_only;
        self
    }

    /// Whether this is a range query.
    pub fn is_range(&self) -> bool {
        self.end_date.is_some()
    }
}

/// A successful read.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<V> {
    /// The value in force at the point date.
    Point(V),
    /// The values stored in the range, ascending by date, never empty.
    Range(Vec<V>),
}

impl<V> Lookup<V> {
    /// The point value, if this is a point result.
    pub fn into_point(self) -> Option<V> {
        match self {
            Lookup::Point(v) => Some(v),
            Lookup::Range(_) => None,
        }
    }

    /// The values as a list; a point result becomes a one-element list.
    pub fn into_values(self) -> Vec<V> {
        match self {
            Lookup::Point(v) => vec![v],
            Lookup::Range(values) => values,
        }
    }
}

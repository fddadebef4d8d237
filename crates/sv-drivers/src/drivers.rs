//! `Drivers`: numeric façade over the repository.

use sv_core::errors::{Error, Result};
use sv_core::Value;
use sv_repository::{normalize, Query, Record, Repository};
use sv_time::Timestamp;
use tracing::warn;

use crate::calc::Calc;
use crate::coerce::coerce_to_number;
use crate::config::DriversConfig;

/// Store of numeric drivers.
///
/// Absence reads as zero: a point read with no entry in force and a range
/// read with no entries both return `0.0`.
#[derive(Debug, Clone)]
pub struct Drivers {
    repository: Repository<f64>,
    exact_date_prefixes: Vec<String>,
}

impl Drivers {
    /// Create an empty store; `today` starts at the epoch.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] if `config` does not validate.
    pub fn new(config: impl Into<DriversConfig>) -> Result<Self> {
        let config = config.into();
        config.validate()?;
        let exact_date_prefixes = config
            .exact_date_prefixes
            .iter()
            .map(|p| normalize(p))
            .collect();
        Ok(Self {
            repository: Repository::new(config.repository)?,
            exact_date_prefixes,
        })
    }

    /// The underlying repository.
    pub fn repository(&self) -> &Repository<f64> {
        &self.repository
    }

    /// The current simulated date.
    pub fn today(&self) -> Timestamp {
        self.repository.today()
    }

    /// Advance the simulated date.
    pub fn set_today(&mut self, today: Timestamp) {
        self.repository.set_today(today);
    }

    /// Tag subsequent writes with the module performing them.
    pub fn set_debug_module_info(&mut self, info: impl Into<String>) {
        self.repository.set_debug_module_info(info);
    }

    /// Whether `name` is read at exactly the requested date.
    pub fn is_exact_date(&self, name: &str) -> bool {
        let name = normalize(name);
        self.exact_date_prefixes.iter().any(|p| name.starts_with(p.as_str()))
    }

    /// Coerce and store a batch of records.
    ///
    /// Values that do not read as numbers are reported as
    /// [`Error::NotANumber`] and skipped; the rest go to the repository in
    /// one batch.  Coercion failures come first in the returned list,
    /// followed by the repository's rejections.
    pub fn set<I>(&mut self, records: I) -> Vec<Error>
    where
        I: IntoIterator<Item = Record<Value>>,
    {
        let mut errors = Vec::new();
        let mut numeric = Vec::new();
        for record in records {
            match coerce_to_number(&record.value) {
                Ok(n) => numeric.push(record.with_value(n)),
                Err(e) => {
                    let e = match e {
                        Error::NotANumber(what) => {
                            Error::NotANumber(format!("driver `{}`: {what}", record.name.trim()))
                        }
                        other => other,
                    };
                    warn!(name = %record.name, error = %e, "driver value rejected");
                    errors.push(e);
                }
            }
        }
        errors.extend(self.repository.set(numeric));
        errors
    }

    /// Store a batch like [`set`](Self::set), then fail with the first
    /// rejection, if any.
    pub fn set_strict<I>(&mut self, records: I) -> Result<()>
    where
        I: IntoIterator<Item = Record<Value>>,
    {
        match self.set(records).into_iter().next() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Read a driver; range reads are summed.
    ///
    /// See [`get_calc`](Self::get_calc).
    pub fn get(&self, query: &Query) -> Result<f64> {
        self.get_calc(query, Calc::default())
    }

    /// Read a driver.
    ///
    /// Without `end_date` this is a point read at `date` (default today); it
    /// matches exactly `date` when the name carries an exact-date prefix and
    /// the latest entry not after `date` otherwise.  The query's own
    /// `exact_only` flag is ignored.  With `end_date` the values in
    /// `[date, end_date]` are folded with `calc`.  Nothing found reads as
    /// `0.0`.
    ///
    /// # Errors
    /// [`Error::FutureDate`], [`Error::InvalidRange`] or
    /// [`Error::InvalidArgument`] from the repository.
    pub fn get_calc(&self, query: &Query, calc: Calc) -> Result<f64> {
        if query.is_range() {
            let values = self.repository.get_range(query)?;
            return Ok(calc.reduce(&values));
        }
        let point = Query {
            exact_only: self.is_exact_date(&query.name),
            ..query.clone()
        };
        Ok(self.repository.get_point(&point)?.unwrap_or(0.0))
    }

    /// The raw values in `[date, end_date]`, ascending by date.
    ///
    /// A query without `end_date` covers the single instant `date`.
    pub fn get_range(&self, query: &Query) -> Result<Vec<f64>> {
        self.repository.get_range(query)
    }

    /// Whether any fallback candidate of the query's key holds an entry.
    pub fn is_defined(&self, query: &Query) -> Result<bool> {
        self.repository.is_defined(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sv_repository::RepositoryConfig;

    fn day(y: i32, m: u32, d: u32) -> Timestamp {
        Timestamp::from_ymd(y, m, d).unwrap()
    }

    fn drivers() -> Drivers {
        let cfg = DriversConfig::new(RepositoryConfig::default())
            .with_exact_date_prefixes(["$Flow:"]);
        let mut d = Drivers::new(cfg).unwrap();
        d.set_today(day(2030, 1, 1));
        d
    }

    #[test]
    fn missing_driver_reads_zero() {
        let d = drivers();
        assert_eq!(d.get(&Query::new("$nothing")).unwrap(), 0.0);
        let range = Query::new("$nothing").date(Timestamp::EPOCH).end_date(day(2030, 1, 1));
        assert_eq!(d.get(&range).unwrap(), 0.0);
    }

    #[test]
    fn text_values_are_coerced() {
        let mut d = drivers();
        assert!(d.set([Record::new("$x", "  12.5 ")]).is_empty());
        assert_eq!(d.get(&Query::new("$x")).unwrap(), 12.5);
    }

    #[test]
    fn non_numbers_are_reported_and_skipped() {
        let mut d = drivers();
        let errors = d.set([
            Record::new("$a", "abc"),
            Record::new("$b", 2),
            Record::new("$c", Value::list([1, 2])),
        ]);
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors[0],
            Error::NotANumber("driver `$a`: abc (text)".into())
        );
        assert!(!d.is_defined(&Query::new("$a")).unwrap());
        assert_eq!(d.get(&Query::new("$b")).unwrap(), 2.0);
    }

    #[test]
    fn exact_date_prefix_matching() {
        let d = drivers();
        assert!(d.is_exact_date("$flow:interest"));
        assert!(d.is_exact_date("  $FLOW:Interest"));
        assert!(!d.is_exact_date("$rate"));
        assert!(!d.is_exact_date("interest $flow:"));
    }

    #[test]
    fn exact_date_names_read_zero_between_entries() {
        let mut d = drivers();
        d.set([
            Record::new("$flow:interest", 100).date(day(2024, 1, 31)),
            Record::new("$rate", 5).date(day(2024, 1, 31)),
        ]);
        let at = |y, m, dd| Query::new("$flow:interest").date(day(y, m, dd));
        assert_eq!(d.get(&at(2024, 1, 31)).unwrap(), 100.0);
        assert_eq!(d.get(&at(2024, 2, 1)).unwrap(), 0.0);
        assert_eq!(d.get(&Query::new("$rate").date(day(2024, 2, 1))).unwrap(), 5.0);
    }

    #[test]
    fn set_strict_fails_on_bad_value() {
        let mut d = drivers();
        let result = d.set_strict([Record::new("$a", "x"), Record::new("$b", 1)]);
        assert!(matches!(result, Err(Error::NotANumber(_))));
        assert_eq!(d.get(&Query::new("$b")).unwrap(), 1.0);
    }
}

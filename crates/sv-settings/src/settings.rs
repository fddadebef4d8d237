use sv_core::errors::{Error, Result};
use sv_core::Value;
use sv_repository::{Query, Record, Repository, RepositoryConfig};
use sv_time::Timestamp;
use tracing::trace;

/// Store of settings.
#[derive(Debug, Clone)]
pub struct Settings {
    repository: Repository<Value>,
}

impl Settings {
    /// Create an empty store; `today` starts at the epoch.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`] if `config` does not validate.
    pub fn new(config: RepositoryConfig) -> Result<Self> {
        Ok(Self {
            repository: Repository::new(config)?,
        })
    }

    /// The underlying repository.
    pub fn repository(&self) -> &Repository<Value> {
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

    /// Store a batch of records; returns one error per rejected write.
    pub fn set<I>(&mut self, records: I) -> Vec<Error>
    where
        I: IntoIterator<Item = Record<Value>>,
    {
        self.repository.set(records)
    }

    /// Store a batch, then fail with the first rejection, if any.
    pub fn set_strict<I>(&mut self, records: I) -> Result<()>
    where
        I: IntoIterator<Item = Record<Value>>,
    {
        self.repository.set_strict(records)
    }

    /// The setting in force at the query's date (default today).
    ///
    /// Always a point read: `end_date` is ignored.  `Ok(None)` when no
    /// fallback candidate has an entry in force.
    ///
    /// # Errors
    /// [`Error::FutureDate`] if the date is after today;
    /// [`Error::InvalidArgument`] if the name is blank.
    pub fn get(&self, query: &Query) -> Result<Option<Value>> {
        let value = self.repository.get_point(query)?;
        trace!(name = %query.name, found = value.is_some(), "setting read");
        Ok(value)
    }

    /// The settings stored in `[date, end_date]`, ascending by date; empty
    /// when nothing is found.
    pub fn get_range(&self, query: &Query) -> Result<Vec<Value>> {
        self.repository.get_range(query)
    }

    /// Whether any fallback candidate of the query's key holds an entry.
    pub fn is_defined(&self, query: &Query) -> Result<bool> {
        self.repository.is_defined(query)
    }
}

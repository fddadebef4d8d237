//! Drivers configuration.

use sv_core::ensure;
use sv_core::errors::Result;
use sv_repository::RepositoryConfig;

/// Construction-time settings of [`Drivers`](crate::Drivers).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DriversConfig {
    /// Settings of the underlying repository.
    pub repository: RepositoryConfig,
    /// Names starting with one of these prefixes are read at exactly the
    /// requested date, so a driver with no entry on that day reads as zero.
    pub exact_date_prefixes: Vec<String>,
}

impl DriversConfig {
    /// Wrap a repository configuration, with no exact-date prefixes.
    pub fn new(repository: RepositoryConfig) -> Self {
        Self {
            repository,
            exact_date_prefixes: Vec::new(),
        }
    }

    /// Replace the exact-date prefixes.
    pub fn with_exact_date_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exact_date_prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    /// Check the configuration.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`](sv_core::Error::InvalidArgument) if the
    /// repository configuration is invalid or a prefix is blank.
    pub fn validate(&self) -> Result<()> {
        self.repository.validate()?;
        for prefix in &self.exact_date_prefixes {
            ensure!(!prefix.trim().is_empty(), "exact-date prefix must not be blank");
        }
        Ok(())
    }
}

impl From<RepositoryConfig> for DriversConfig {
    fn from(repository: RepositoryConfig) -> Self {
        Self::new(repository)
    }
}

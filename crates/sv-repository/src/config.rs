//! Repository configuration.
//!
//! [`RepositoryConfig`] carries the construction-time constants of one
//! simulation run: which scenario is running, which scenario and unit reads
//! fall back to, and the two name prefixes that select the immutable write
//! policies.

use sv_core::ensure;
use sv_core::errors::Result;

use crate::key::normalize;

/// Name of the base scenario when none is configured.
pub const DEFAULT_BASE_SCENARIO: &str = "base";

/// Name of the simulation-wide unit when none is configured.
pub const DEFAULT_UNIT: &str = "simulation";

/// Names starting with this prefix accept exactly one write, ever.
pub const DEFAULT_IMMUTABLE_WITHOUT_DATES_PREFIX: &str = "$$";

/// Names starting with this prefix accept one write per date.
pub const DEFAULT_IMMUTABLE_WITH_DATES_PREFIX: &str = "$";

/// Construction-time settings of a [`Repository`](crate::Repository).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RepositoryConfig {
    /// Scenario every read eventually falls back to.
    pub base_scenario: String,
    /// Scenario substituted when a write or read omits one.
    pub current_scenario: String,
    /// Unit substituted when a write or read omits one.
    pub default_unit: String,
    /// Prefix of names that accept a single write.
    pub immutable_without_dates_prefix: String,
    /// Prefix of names that accept one write per date.
    pub immutable_with_dates_prefix: String,
    /// Whether names outside both prefixes may be written.
    pub allow_mutable: bool,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            base_scenario: DEFAULT_BASE_SCENARIO.into(),
            current_scenario: DEFAULT_BASE_SCENARIO.into(),
            default_unit: DEFAULT_UNIT.into(),
            immutable_without_dates_prefix: DEFAULT_IMMUTABLE_WITHOUT_DATES_PREFIX.into(),
            immutable_with_dates_prefix: DEFAULT_IMMUTABLE_WITH_DATES_PREFIX.into(),
            allow_mutable: true,
        }
    }
}

impl RepositoryConfig {
    /// Set the base scenario.
    pub fn with_base_scenario(mut self, scenario: impl Into<String>) -> Self {
        self.base_scenario = scenario.into();
        self
    }

    /// Set the running scenario.
    pub fn with_current_scenario(mut self, scenario: impl Into<String>) -> Self {
        self.current_scenario = scenario.into();
        self
    }

    /// Set the default unit.
    pub fn with_default_unit(mut self, unit: impl Into<String>) -> Self {
        self.default_unit = unit.into();
        self
    }

    /// Set both immutability prefixes.
    pub fn with_immutable_prefixes(
        mut self,
        without_dates: impl Into<String>,
        with_dates: impl Into<String>,
    ) -> Self {
        self.immutable_without_dates_prefix = without_dates.into();
        self.immutable_with_dates_prefix = with_dates.into();
        self
    }

    /// Allow or forbid writes to mutable names.
    pub fn with_allow_mutable(mut self, allow: bool) -> Self {
        self.allow_mutable = allow;
        self
    }

    /// Check the configuration.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`](sv_core::Error::InvalidArgument) if a
    /// scenario, unit or prefix is blank, or if the with-dates prefix starts
    /// with the without-dates prefix, ignoring case and surrounding blanks (every such name would be classified as
    /// without-dates, leaving the with-dates policy unreachable).
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.base_scenario.trim().is_empty(), "base scenario must not be blank");
        ensure!(
            !self.current_scenario.trim().is_empty(),
            "current scenario must not be blank"
        );
        ensure!(!self.default_unit.trim().is_empty(), "default unit must not be blank");

        let without = normalize(&self.immutable_without_dates_prefix);
        let with = normalize(&self.immutable_with_dates_prefix);
        ensure!(!without.is_empty(), "immutable-without-dates prefix must not be blank");
        ensure!(!with.is_empty(), "immutable-with-dates prefix must not be blank");
        ensure!(
            !with.starts_with(without.as_str()),
            "immutable-with-dates prefix ({with}) cannot start with immutable-without-dates prefix ({without})"
        );
        Ok(())
    }
}

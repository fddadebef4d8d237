//! Key normalization and fallback resolution.
//!
//! Scenario, unit and name are compared trimmed and case-folded.  An omitted
//! (or blank) scenario means the running scenario, an omitted unit means the
//! default unit.  Writes go to exactly one key; reads walk an ordered list of
//! candidates, most specific first:
//!
//! | # | unit          | scenario      | present when                     |
//! |---|---------------|---------------|----------------------------------|
//! | 1 | requested     | requested     | always                           |
//! | 2 | default       | requested     | unit ≠ default                   |
//! | 3 | requested     | base          | scenario ≠ base                  |
//! | 4 | default       | base          | unit ≠ default and scenario ≠ base |

use std::fmt;

use sv_core::ensure;
use sv_core::errors::Result;

use crate::config::RepositoryConfig;

/// Trim and case-fold a key component.
pub fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// A fully resolved `(scenario, unit, name)` triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResolvedKey {
    scenario: String,
    unit: String,
    name: String,
}

impl ResolvedKey {
    /// Normalize and assemble a key.  No defaulting is applied.
    pub fn new(scenario: &str, unit: &str, name: &str) -> Self {
        Self {
            scenario: normalize(scenario),
            unit: normalize(unit),
            name: normalize(name),
        }
    }

    /// Normalized scenario.
    pub fn scenario(&self) -> &str {
        &self.scenario
    }

    /// Normalized unit.
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Normalized name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for ResolvedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.scenario, self.unit, self.name)
    }
}

/// Resolves requested key components against the run's defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyResolver {
    current_scenario: String,
    base_scenario: String,
    default_unit: String,
}

impl KeyResolver {
    /// Create a resolver; all three components are normalized.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`](sv_core::Error::InvalidArgument) if any
    /// component is blank.
    pub fn new(current_scenario: &str, base_scenario: &str, default_unit: &str) -> Result<Self> {
        let resolver = Self {
            current_scenario: normalize(current_scenario),
            base_scenario: normalize(base_scenario),
            default_unit: normalize(default_unit),
        };
        ensure!(!resolver.current_scenario.is_empty(), "current scenario must not be blank");
        ensure!(!resolver.base_scenario.is_empty(), "base scenario must not be blank");
        ensure!(!resolver.default_unit.is_empty(), "default unit must not be blank");
        Ok(resolver)
    }

    /// Create a resolver from a repository configuration.
    pub fn from_config(config: &RepositoryConfig) -> Result<Self> {
        Self::new(
            &config.current_scenario,
            &config.base_scenario,
            &config.default_unit,
        )
    }

    /// Normalized running scenario.
    pub fn current_scenario(&self) -> &str {
        &self.current_scenario
    }

    /// Normalized base scenario.
    pub fn base_scenario(&self) -> &str {
        &self.base_scenario
    }

    /// Normalized default unit.
    pub fn default_unit(&self) -> &str {
        &self.default_unit
    }

    /// The exact key a write lands on.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`](sv_core::Error::InvalidArgument) if `name`
    /// is blank.
    pub fn write_key(
        &self,
        scenario: Option<&str>,
        unit: Option<&str>,
        name: &str,
    ) -> Result<ResolvedKey> {
        let name = normalize(name);
        ensure!(!name.is_empty(), "name must not be blank");
        Ok(ResolvedKey {
            scenario: or_default(scenario, &self.current_scenario),
            unit: or_default(unit, &self.default_unit),
            name,
        })
    }

    /// The ordered keys a read tries, first match wins.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`](sv_core::Error::InvalidArgument) if `name`
    /// is blank.
    pub fn read_candidates(
        &self,
        scenario: Option<&str>,
        unit: Option<&str>,
        name: &str,
    ) -> Result<Vec<ResolvedKey>> {
        let exact = self.write_key(scenario, unit, name)?;
        let other_unit = exact.unit != self.default_unit;
        let other_scenario = exact.scenario != self.base_scenario;

        let mut candidates = Vec::with_capacity(4);
        if other_unit {
            candidates.push(ResolvedKey {
                unit: self.default_unit.clone(),
                ..exact.clone()
            });
        }
        if other_scenario {
            candidates.push(ResolvedKey {
                scenario: self.base_scenario.clone(),
                ..exact.clone()
            });
        }
        if other_unit && other_scenario {
            candidates.push(ResolvedKey {
                scenario: self.base_scenario.clone(),
                unit: self.default_unit.clone(),
                name: exact.name.clone(),
            });
        }
        candidates.insert(0, exact);
        Ok(candidates)
    }
}

fn or_default(requested: Option<&str>, default: &str) -> String {
    match requested.map(normalize) {
        Some(s) if !s.is_empty() => s,
        _ => default.to_string(),
    }
}

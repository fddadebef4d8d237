//! # sv-repository
//!
//! The temporal repository shared by the drivers and settings façades.
//!
//! Values are keyed by `(scenario, unit, name)` and indexed by date.  Reads
//! fall back from the requested scenario/unit towards the base scenario and
//! the default unit; writes are checked against the immutability class that
//! the name's prefix selects; every read is bounded by a moving `today`.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Repository configuration (scenarios, default unit, immutability prefixes).
pub mod config;

/// Per-name write policy selected by prefix.
pub mod immutability;

/// Sorted, date-indexed series for one key.
pub mod index;

/// Key normalization and fallback resolution.
pub mod key;

/// Write records, read queries and read results.
pub mod record;

/// `Repository`, the map from resolved key to series.
pub mod repository;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use config::RepositoryConfig;
pub use immutability::{ImmutabilityClass, ImmutabilityClassifier};
pub use index::{Insertion, TimeSeriesIndex};
pub use key::{normalize, KeyResolver, ResolvedKey};
pub use record::{Lookup, Query, Record};
pub use repository::Repository;

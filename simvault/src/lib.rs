//! # simvault
//!
//! Temporal drivers and settings for day-stepped financial simulations.
//!
//! This crate is a **façade** that re-exports the public items of the
//! underlying workspace crates and adds [`SimulationStore`], the per-run
//! object that owns one [`Drivers`](drivers::Drivers) store and one
//! [`Settings`](settings::Settings) store and moves `today` forward on both.
//!
//! ## Quick start
//!
//! ```rust
//! use simvault::repository::{Query, Record};
//! use simvault::time::Timestamp;
//! use simvault::SimulationStore;
//!
//! let mut store = SimulationStore::for_scenario("upside").unwrap();
//! let start = Timestamp::from_ymd(2024, 1, 1).unwrap();
//! store.drivers_mut().set([Record::new("$rate", "0.05").date(start)]);
//!
//! store.set_today(start.add_days(10));
//! let rate = store.drivers().get(&Query::new("$rate")).unwrap();
//! assert!((rate - 0.05).abs() < f64::EPSILON);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Error types, the immutable `Value` model and `deep_freeze`.
pub use sv_core as core;

/// Millisecond timestamps and date coercion.
pub use sv_time as time;

/// The scenario/unit keyed, date-indexed repository.
pub use sv_repository as repository;

/// Numeric drivers with aggregation.
pub use sv_drivers as drivers;

/// Settings of any shape.
pub use sv_settings as settings;

/// `SimulationStore`: drivers and settings of one simulation run.
pub mod store;

pub use store::SimulationStore;

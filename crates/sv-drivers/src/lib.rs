//! # sv-drivers
//!
//! Numeric drivers on top of the temporal repository.
//!
//! Every value written through [`Drivers`] is coerced to `f64` first.  Point
//! reads of a driver that was never set return `0.0`; names carrying one of
//! the configured exact-date prefixes only match an entry at exactly the
//! requested date.  Range reads are reduced with a [`Calc`].

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Range reductions (`sum`, `average`, `min`, `max`).
pub mod calc;

/// Coercion of arbitrary values to driver numbers.
pub mod coerce;

/// Drivers configuration.
pub mod config;

/// The `Drivers` façade.
pub mod drivers;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use calc::Calc;
pub use coerce::coerce_to_number;
pub use config::DriversConfig;
pub use drivers::Drivers;

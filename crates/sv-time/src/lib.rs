//! # sv-time
//!
//! Millisecond-precision timestamps and the date coercion used to normalize
//! `date` / `end_date` inputs given as text, Excel serial numbers, or chrono
//! values.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// `Timestamp`: milliseconds since the Unix epoch.
pub mod timestamp;

/// Date coercion from heterogeneous inputs.
pub mod coerce;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use coerce::{coerce_to_date, coerce_value_to_date, DateInput};
pub use timestamp::Timestamp;

//! # sv-core
//!
//! Core types and error definitions for simvault.
//!
//! Everything here is shared by the repository and both façades: one error
//! enum for every failure, and the immutable [`Value`] model that settings
//! are converted into at write time via [`deep_freeze`].

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Error types and the `ensure!` macro.
pub mod errors;

/// Conversions into the immutable value model (`deep_freeze`).
pub mod freeze;

/// The immutable `Value` tagged union and `Callable`.
pub mod value;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// Milliseconds since the Unix epoch (1970-01-01T00:00:00Z).
pub type Millis = i64;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use errors::{Error, Result};
pub use freeze::deep_freeze;
pub use value::{Callable, Value};

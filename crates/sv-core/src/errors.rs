//! Error types for simvault.
//!
//! Every failure surfaced by the repository and its façades is a variant of a
//! single `thiserror`-derived enum.  Payloads are pre-formatted strings so the
//! type stays `Clone + PartialEq` and can be collected into batch reports.

use thiserror::Error;

/// The top-level error type used throughout simvault.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Malformed key component, date, or configuration field.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A read asked for a date later than the repository's `today`.
    #[error("date {date} is after today ({today})")]
    FutureDate {
        /// The requested date.
        date: String,
        /// The repository's current `today`.
        today: String,
    },

    /// A write collided with an immutable entry.
    #[error("{key} is immutable and the date {date} is already present")]
    ImmutableConflict {
        /// The resolved key that rejected the write.
        key: String,
        /// The colliding date.
        date: String,
    },

    /// A range query whose end precedes its start.
    #[error("invalid range: end date {to} is before start date {from}")]
    InvalidRange {
        /// Start of the requested range.
        from: String,
        /// End of the requested range.
        to: String,
    },

    /// A value could not be coerced to a finite number.
    #[error("not a number: {0}")]
    NotANumber(String),

    /// A write to a mutable key on a repository configured without mutable keys.
    #[error("{key} is mutable and this is not allowed")]
    MutableNotAllowed {
        /// The resolved key that rejected the write.
        key: String,
    },
}

/// Shorthand `Result` type used throughout simvault.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Returns `Err(Error::InvalidArgument(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use sv_core::{ensure, errors::Error};
/// fn non_blank(name: &str) -> sv_core::errors::Result<&str> {
///     ensure!(!name.trim().is_empty(), "name must not be blank");
///     Ok(name)
/// }
/// assert!(non_blank("cash").is_ok());
/// assert!(matches!(non_blank("  "), Err(Error::InvalidArgument(_))));
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::InvalidArgument(
                format!($($msg)*)
            ));
        }
    };
}

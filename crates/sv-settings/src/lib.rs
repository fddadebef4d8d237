//! # sv-settings
//!
//! Settings: time-stamped configuration values of any shape (numbers, text,
//! lists, records, callables) stored in the temporal repository.
//!
//! Values go in as [`Value`](sv_core::Value)s, which are immutable once
//! built; a read hands back the stored value itself, sharing its
//! allocation.  A setting that is not found reads as `None`.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// The `Settings` façade.
pub mod settings;

pub use settings::Settings;

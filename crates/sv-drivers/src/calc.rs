//! Reductions applied to range reads.

use std::fmt;
use std::str::FromStr;

use num_traits::Float;
use sv_core::errors::{Error, Result};

/// How a list of driver values is folded into one number.
///
/// An empty list reduces to zero whatever the calculation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Calc {
    /// Sum of the values.
    #[default]
    Sum,
    /// Arithmetic mean.
    Average,
    /// Smallest value.
    Min,
    /// Largest value.
    Max,
}

impl Calc {
    /// Fold `values`.
    pub fn reduce<T: Float>(self, values: &[T]) -> T {
        if values.is_empty() {
            return T::zero();
        }
        let sum = || values.iter().fold(T::zero(), |acc, &v| acc + v);
        match self {
            Calc::Sum => sum(),
            Calc::Average => T::from(values.len()).map_or_else(T::zero, |n| sum() / n),
            Calc::Min => values.iter().fold(T::infinity(), |acc, &v| acc.min(v)),
            Calc::Max => values.iter().fold(T::neg_infinity(), |acc, &v| acc.max(v)),
        }
    }

    /// Lower-case name, as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            Calc::Sum => "sum",
            Calc::Average => "average",
            Calc::Min => "min",
            Calc::Max => "max",
        }
    }
}

impl FromStr for Calc {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "sum" => Ok(Calc::Sum),
            "average" => Ok(Calc::Average),
            "min" => Ok(Calc::Min),
            "max" => Ok(Calc::Max),
            other => Err(Error::InvalidArgument(format!("unknown calc `{other}`"))),
        }
    }
}

impl fmt::Display for Calc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

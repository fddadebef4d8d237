//! Coercion to driver numbers.

use sv_core::errors::{Error, Result};
use sv_core::Value;

/// Read `value` as a finite `f64`.
///
/// | input                       | result            |
/// |-----------------------------|-------------------|
/// | finite number               | itself (`-0` ⇒ `0`) |
/// | `Null`                      | `0`               |
/// | boolean                     | `1` / `0`         |
/// | numeric text (trimmed)      | the parsed number |
/// | blank text                  | `0`               |
/// | timestamp                   | its milliseconds  |
///
/// # Errors
/// [`Error::NotANumber`] for anything else: non-numeric text, `NaN` or
/// infinities, lists, records and callables.
pub fn coerce_to_number(value: &Value) -> Result<f64> {
    let n = match value {
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => *n,
        Value::Text(s) => {
            let s = s.trim();
            if s.is_empty() {
                0.0
            } else {
                s.parse::<f64>().map_err(|_| not_a_number(value))?
            }
        }
        Value::Timestamp(ms) => *ms as f64,
        Value::List(_) | Value::Record(_) | Value::Callable(_) => {
            return Err(not_a_number(value));
        }
    };
    if !n.is_finite() {
        return Err(not_a_number(value));
    }
    // -0.0 == 0.0, so this folds negative zero
    Ok(if n == 0.0 { 0.0 } else { n })
}

fn not_a_number(value: &Value) -> Error {
    Error::NotANumber(format!("{value} ({})", value.type_name()))
}

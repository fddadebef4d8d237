//! Conversions into the immutable value model.
//!
//! [`deep_freeze`] is the single write-time entry point: it consumes an owned
//! (possibly nested) Rust value and returns a [`Value`] that nobody can mutate
//! afterwards.  Nested vectors and maps are copied into shared immutable
//! storage; callables keep their identity and their captured state.
//!
//! Freezing is idempotent: freezing a `Value` returns it unchanged, sharing
//! the same allocation.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::value::{Callable, Value};

/// Convert `value` into a deep-immutable [`Value`].
///
/// # Example
/// ```
/// use sv_core::{deep_freeze, Value};
///
/// let frozen = deep_freeze(vec![1, 2, 3]);
/// let again = deep_freeze(frozen.clone());
/// assert!(again.ptr_eq(&frozen));
/// ```
pub fn deep_freeze(value: impl Into<Value>) -> Value {
    value.into()
}

macro_rules! number_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Value::Number(n as f64)
                }
            }
        )*
    };
}

number_from!(f64, f32, i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(Arc::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(Arc::from(s))
    }
}

impl From<Arc<str>> for Value {
    fn from(s: Arc<str>) -> Self {
        Value::Text(s)
    }
}

impl From<Callable> for Value {
    fn from(c: Callable) -> Self {
        Value::Callable(c)
    }
}

impl<V: Into<Value>> From<Option<V>> for Value {
    fn from(v: Option<V>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl<V: Into<Value>> From<Vec<V>> for Value {
    fn from(items: Vec<V>) -> Self {
        Value::list(items)
    }
}

impl<V: Into<Value>, const N: usize> From<[V; N]> for Value {
    fn from(items: [V; N]) -> Self {
        Value::list(items)
    }
}

impl<K: Into<String>, V: Into<Value>> From<BTreeMap<K, V>> for Value {
    fn from(fields: BTreeMap<K, V>) -> Self {
        Value::record(fields)
    }
}

impl<K: Into<String>, V: Into<Value>> From<HashMap<K, V>> for Value {
    fn from(fields: HashMap<K, V>) -> Self {
        Value::record(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicI64, Ordering};

    #[test]
    fn scalars_are_returned_as_is() {
        assert_eq!(deep_freeze(9), Value::Number(9.0));
        assert_eq!(deep_freeze("abc"), Value::from("abc"));
        assert_eq!(deep_freeze(true), Value::Bool(true));
        assert_eq!(deep_freeze(()), Value::Null);
        assert_eq!(deep_freeze(None::<i32>), Value::Null);
    }

    #[test]
    fn nested_maps_and_vectors_are_copied() {
        let mut inner = BTreeMap::new();
        inner.insert("a", Value::from(88));
        inner.insert("e", Value::from(vec![1, 2, 3, 4, 5]));
        let mut outer = HashMap::new();
        outer.insert("a".to_string(), Value::from(99));
        outer.insert("c".to_string(), Value::from(inner.clone()));

        let frozen = deep_freeze(outer.clone());

        // mutating the sources afterwards does not reach the frozen value
        inner.insert("a", Value::from(100));
        outer.insert("d".to_string(), Value::from(1));

        assert_eq!(frozen.field("d"), None);
        assert_eq!(
            frozen.field("c").and_then(|c| c.field("a")),
            Some(&Value::Number(88.0))
        );
        assert_eq!(
            frozen
                .field("c")
                .and_then(|c| c.field("e"))
                .and_then(Value::as_list)
                .map(<[Value]>::len),
            Some(5)
        );
    }

    #[test]
    fn freezing_is_idempotent() {
        let frozen = deep_freeze(vec![Value::from(1), Value::record([("a", 999)])]);
        let again = deep_freeze(frozen.clone());
        assert!(again.ptr_eq(&frozen));
    }

    #[test]
    fn callables_keep_identity_and_captured_state() {
        let counter = Arc::new(AtomicI64::new(0));
        let captured = Arc::clone(&counter);
        let callable = Callable::new("increment", move |_| {
            Value::from(captured.fetch_add(1, Ordering::SeqCst) + 1)
        });

        let frozen = deep_freeze(Value::record([("inc", callable.clone())]));
        let stored = frozen
            .field("inc")
            .and_then(Value::as_callable)
            .cloned()
            .unwrap_or_else(|| Callable::new("missing", |_| Value::Null));

        assert!(stored.ptr_eq(&callable));
        assert_eq!(stored.call(&[]), Value::Number(1.0));
        assert_eq!(stored.call(&[]), Value::Number(2.0));
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }
}

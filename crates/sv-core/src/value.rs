//! The immutable value model.
//!
//! Settings may hold numbers, text, dates, nested lists and records, or
//! callables.  Once converted into a [`Value`] nothing reachable from it can
//! be mutated: composite payloads sit behind `Arc` and no `&mut` accessor is
//! exposed.  Cloning a `Value` is cheap and shares the same allocation, so a
//! read returns the very value that was stored (see [`Value::ptr_eq`]).

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::Millis;

/// Signature of a stored callable.
pub type CallableFn = dyn Fn(&[Value]) -> Value + Send + Sync;

/// A named, shareable function value.
///
/// Freezing a callable never freezes the state it closes over: a closure that
/// captures a `Mutex` or an atomic keeps updating it after being stored.
#[derive(Clone)]
pub struct Callable {
    name: Arc<str>,
    func: Arc<CallableFn>,
}

impl Callable {
    /// Wrap `func` under a display `name`.
    pub fn new<F>(name: impl Into<Arc<str>>, func: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    /// The display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke the function.
    pub fn call(&self, args: &[Value]) -> Value {
        (self.func)(args)
    }

    /// Whether both handles point to the same function.
    pub fn ptr_eq(&self, other: &Callable) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl PartialEq for Callable {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callable({})", self.name)
    }
}

/// A deep-immutable dynamically-typed value.
#[derive(Clone, Default)]
pub enum Value {
    /// Absence of a value.
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// A number.
    Number(f64),
    /// Text.
    Text(Arc<str>),
    /// A point in time, milliseconds since the Unix epoch.
    Timestamp(Millis),
    /// An ordered list.
    List(Arc<[Value]>),
    /// A record with string keys, iterated in key order.
    Record(Arc<BTreeMap<String, Value>>),
    /// A function.
    Callable(Callable),
}

impl Value {
    // ── Constructors ─────────────────────────────────────────────────────

    /// Build a list from anything convertible into values.
    pub fn list<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    /// Build a record from `(key, value)` pairs.  Later duplicates win.
    pub fn record<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Value::Record(Arc::new(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        ))
    }

    /// Wrap a closure as a callable value.
    pub fn callable<F>(name: &str, func: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Value::Callable(Callable::new(name, func))
    }

    // ── Inspectors ───────────────────────────────────────────────────────

    /// Short name of the variant, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::Text(_) => "text",
            Value::Timestamp(_) => "timestamp",
            Value::List(_) => "list",
            Value::Record(_) => "record",
            Value::Callable(_) => "callable",
        }
    }

    /// Whether this is [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The number, if this is a [`Value::Number`].
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The boolean, if this is a [`Value::Bool`].
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The text, if this is a [`Value::Text`].
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The milliseconds, if this is a [`Value::Timestamp`].
    pub fn as_timestamp_millis(&self) -> Option<Millis> {
        match self {
            Value::Timestamp(ms) => Some(*ms),
            _ => None,
        }
    }

    /// The items, if this is a [`Value::List`].
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// The fields, if this is a [`Value::Record`].
    pub fn as_record(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Value::Record(fields) => Some(fields),
            _ => None,
        }
    }

    /// The callable, if this is a [`Value::Callable`].
    pub fn as_callable(&self) -> Option<&Callable> {
        match self {
            Value::Callable(c) => Some(c),
            _ => None,
        }
    }

    /// Field lookup on a record; `None` for other variants or missing keys.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.as_record().and_then(|fields| fields.get(key))
    }

    /// Positional lookup on a list; `None` for other variants or out of range.
    pub fn item(&self, index: usize) -> Option<&Value> {
        self.as_list().and_then(|items| items.get(index))
    }

    // ── Persistent updates ───────────────────────────────────────────────

    /// Return a copy of this record with `key` set to `value`.
    ///
    /// `self` is left untouched.  Non-record values are treated as an empty
    /// record.
    pub fn with_field(&self, key: impl Into<String>, value: impl Into<Value>) -> Value {
        let mut fields = self.as_record().cloned().unwrap_or_default();
        fields.insert(key.into(), value.into());
        Value::Record(Arc::new(fields))
    }

    /// Return a copy of this list with `value` appended.
    ///
    /// `self` is left untouched.  Non-list values are treated as an empty
    /// list.
    pub fn with_pushed(&self, value: impl Into<Value>) -> Value {
        let mut items: Vec<Value> = self.as_list().map(<[Value]>::to_vec).unwrap_or_default();
        items.push(value.into());
        Value::List(items.into())
    }

    // ── Identity ─────────────────────────────────────────────────────────

    /// Identity comparison: shared payloads must be the same allocation,
    /// scalars compare by value.
    pub fn ptr_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Text(a), Value::Text(b)) => Arc::ptr_eq(a, b),
            (Value::List(a), Value::List(b)) => Arc::ptr_eq(a, b),
            (Value::Record(a), Value::Record(b)) => Arc::ptr_eq(a, b),
            (Value::Callable(a), Value::Callable(b)) => a.ptr_eq(b),
            _ => self == other,
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Timestamp(a), Value::Timestamp(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Record(a), Value::Record(b)) => a == b,
            (Value::Callable(a), Value::Callable(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "Null"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Number(n) => write!(f, "Number({n})"),
            Value::Text(s) => write!(f, "Text({s:?})"),
            Value::Timestamp(ms) => write!(f, "Timestamp({ms})"),
            Value::List(items) => f.debug_list().entries(items.iter()).finish(),
            Value::Record(fields) => f.debug_map().entries(fields.iter()).finish(),
            Value::Callable(c) => write!(f, "{c:?}"),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::Text(s) => write!(f, "{s}"),
            Value::Timestamp(ms) => write!(f, "@{ms}"),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Record(fields) => {
                write!(f, "{{")?;
                for (i, (k, v)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                }
                write!(f, "}}")
            }
            Value::Callable(c) => write!(f, "<callable {}>", c.name()),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

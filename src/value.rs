//! Dynamic value model for untyped input data.
//!
//! Every source of raw input (query strings, form bodies, parsed JSON)
//! is normalized into [`Value`] before validation. Coercers and schemas
//! consume `Value` and produce either typed Rust data or a `Value` again
//! when the result feeds into a composite.

use indexmap::IndexMap;

/// An untyped input value.
///
/// `Map` preserves insertion order so that error reporting and merged
/// results keep the order in which fields were declared or received.
///
/// # Example
///
/// ```
/// use tamiz::Value;
///
/// let v = Value::from(vec![Value::from(1), Value::from("two")]);
/// assert_eq!(v.kind(), "sequence");
/// assert_eq!(v.repr(), "[1, 'two']");
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absence of a value.
    #[default]
    Null,
    /// Boolean.
    Bool(bool),
    /// Signed 64-bit integer.
    Int(i64),
    /// IEEE 754 double.
    Float(f64),
    /// Unicode text.
    Text(String),
    /// Raw byte string.
    Bytes(Vec<u8>),
    /// Ordered sequence of values.
    Seq(Vec<Value>),
    /// Ordered string-keyed mapping.
    Map(IndexMap<String, Value>),
}

impl Value {
    /// Returns the kind name used in mismatch diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Bytes(_) => "bytes",
            Value::Seq(_) => "sequence",
            Value::Map(_) => "mapping",
        }
    }

    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the boolean if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer if this is an `Int`.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the float if this is a `Float` (or an `Int`, widened).
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(x) => Some(*x),
            Value::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    /// Returns the text if this is a `Text`.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the bytes if this is a `Bytes`.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Returns the items if this is a `Seq`.
    pub fn as_seq(&self) -> Option<&[Value]> {
        match self {
            Value::Seq(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the entries if this is a `Map`.
    pub fn as_map(&self) -> Option<&IndexMap<String, Value>> {
        match self {
            Value::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Looks up a key in a `Map`. Returns `None` for other kinds.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map().and_then(|m| m.get(key))
    }

    /// Renders the value the way diagnostics quote it.
    ///
    /// Text is single-quoted with escapes, bytes carry a `b` prefix,
    /// booleans render as `True`/`False` and null as `None`, so that
    /// messages read the same as the wire formats most callers log.
    ///
    /// # Example
    ///
    /// ```
    /// use tamiz::Value;
    ///
    /// assert_eq!(Value::from("bar").repr(), "'bar'");
    /// assert_eq!(Value::Bytes(b"foo".to_vec()).repr(), "b'foo'");
    /// assert_eq!(Value::from(1.0).repr(), "1.0");
    /// ```
    pub fn repr(&self) -> String {
        match self {
            Value::Null => "None".to_string(),
            Value::Bool(true) => "True".to_string(),
            Value::Bool(false) => "False".to_string(),
            Value::Int(n) => n.to_string(),
            Value::Float(x) => float_repr(*x),
            Value::Text(s) => text_repr(s),
            Value::Bytes(b) => bytes_repr(b),
            Value::Seq(items) => {
                let parts: Vec<String> = items.iter().map(Value::repr).collect();
                format!("[{}]", parts.join(", "))
            }
            Value::Map(entries) => {
                let parts: Vec<String> = entries
                    .iter()
                    .map(|(k, v)| format!("{}: {}", text_repr(k), v.repr()))
                    .collect();
                format!("{{{}}}", parts.join(", "))
            }
        }
    }

    /// Renders the value as plain text, without quoting text itself.
    ///
    /// This is what text coercion of non-text input produces: `10`
    /// becomes `"10"`, `true` becomes `"True"`. Containers fall back
    /// to [`Value::repr`].
    pub fn stringify(&self) -> String {
        match self {
            Value::Text(s) => s.clone(),
            Value::Bytes(b) => bytes_repr(b),
            other => other.repr(),
        }
    }
}

/// Merges two values, the way later pipeline stages shadow earlier
/// ones.
///
/// Two mappings merge key-wise with `overlay` winning on conflicts.
/// `Null` never shadows anything. Any other pairing resolves to
/// `overlay`.
///
/// # Example
///
/// ```
/// use tamiz::{merge, Value};
/// use indexmap::IndexMap;
///
/// let mut a = IndexMap::new();
/// a.insert("x".to_string(), Value::Int(1));
/// let mut b = IndexMap::new();
/// b.insert("x".to_string(), Value::Int(2));
/// b.insert("y".to_string(), Value::Int(3));
///
/// let merged = merge(Value::Map(a), Value::Map(b));
/// assert_eq!(merged.get("x"), Some(&Value::Int(2)));
/// assert_eq!(merged.get("y"), Some(&Value::Int(3)));
/// ```
pub fn merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (base, Value::Null) => base,
        (Value::Map(mut base), Value::Map(overlay)) => {
            for (k, v) in overlay {
                base.insert(k, v);
            }
            Value::Map(base)
        }
        (_, overlay) => overlay,
    }
}

/// Renders a float so that integral values keep a trailing `.0`.
fn float_repr(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if x == x.trunc() && x.abs() < 1e16 {
        format!("{:.1}", x)
    } else {
        format!("{}", x)
    }
}

/// Quotes text for diagnostics, preferring single quotes.
fn text_repr(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if (c as u32) < 0x20 || c as u32 == 0x7f => {
                out.push_str(&format!("\\x{:02x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// Quotes a byte string for diagnostics, e.g. `b'foo'`.
fn bytes_repr(bytes: &[u8]) -> String {
    let has_single = bytes.contains(&b'\'');
    let has_double = bytes.contains(&b'"');
    let quote = if has_single && !has_double { b'"' } else { b'\'' };
    let mut out = String::with_capacity(bytes.len() + 3);
    out.push('b');
    out.push(quote as char);
    for &b in bytes {
        match b {
            b'\\' => out.push_str("\\\\"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b'\t' => out.push_str("\\t"),
            b if b == quote => {
                out.push('\\');
                out.push(b as char);
            }
            0x20..=0x7e => out.push(b as char),
            b => out.push_str(&format!("\\x{:02x}", b)),
        }
    }
    out.push(quote as char);
    out
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Value::Bytes(b.to_vec())
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Seq(items)
    }
}

impl From<IndexMap<String, Value>> for Value {
    fn from(entries: IndexMap<String, Value>) -> Self {
        Value::Map(entries)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::Seq(iter.into_iter().collect())
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else {
                    // u64 above i64::MAX or a fraction; keep as float.
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::Text(s),
            serde_json::Value::Array(items) => {
                Value::Seq(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(entries) => Value::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

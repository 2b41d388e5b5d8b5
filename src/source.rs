//! Raw payload sources.
//!
//! This module turns the wire formats requests arrive in into
//! [`Value`] payloads ready for a mapping schema: URL query strings
//! (also the right parser for form-encoded bodies) and JSON bodies.

use indexmap::IndexMap;
use percent_encoding::percent_decode_str;

use crate::error::{AggregateError, Flaw, Invalid};
use crate::path::Path;
use crate::value::Value;

/// Parses a query string into a mapping.
///
/// Pairs split on `&`, keys and values percent-decode with `+`
/// meaning space, and a key without `=` gets an empty value. A key
/// seen once maps to its text value; a repeated key collects every
/// occurrence into a sequence, in order. Decoding is lenient: stray
/// `%` sequences pass through and invalid UTF-8 decodes lossily.
///
/// # Example
///
/// ```rust
/// use tamiz::source::parse_query;
/// use tamiz::Value;
///
/// let payload = parse_query("boo=5&tag=a&tag=b");
/// assert_eq!(payload.get("boo"), Some(&Value::from("5")));
/// assert_eq!(
///     payload.get("tag"),
///     Some(&Value::Seq(vec![Value::from("a"), Value::from("b")]))
/// );
/// ```
pub fn parse_query(query: &str) -> Value {
    let mut entries: IndexMap<String, Value> = IndexMap::new();
    for pair in query.split('&') {
        if pair.is_empty() {
            continue;
        }
        let (raw_key, raw_value) = match pair.split_once('=') {
            Some((k, v)) => (k, v),
            None => (pair, ""),
        };
        let key = decode_component(raw_key);
        let value = Value::Text(decode_component(raw_value));
        match entries.get_mut(&key) {
            Some(Value::Seq(items)) => items.push(value),
            Some(existing) => {
                let first = std::mem::replace(existing, Value::Null);
                *existing = Value::Seq(vec![first, value]);
            }
            None => {
                entries.insert(key, value);
            }
        }
    }
    Value::Map(entries)
}

/// Decodes one query component: `+` means space, then
/// percent-decoding.
///
/// The replacement happens before percent-decoding so `%2B` survives
/// as a literal plus.
fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    percent_decode_str(&spaced).decode_utf8_lossy().into_owned()
}

/// Parses a JSON body into a [`Value`].
///
/// A malformed body fails with a root-level `payload` flaw carrying
/// the parser's message, which is the shape pipeline getters want.
///
/// # Example
///
/// ```rust
/// use tamiz::source::parse_json;
/// use tamiz::Value;
///
/// let payload = parse_json(r#"{"n": 1}"#).unwrap();
/// assert_eq!(payload.get("n"), Some(&Value::Int(1)));
///
/// assert!(parse_json("{oops").is_err());
/// ```
pub fn parse_json(text: &str) -> Result<Value, AggregateError> {
    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(json) => Ok(Value::from(json)),
        Err(e) => Err(AggregateError::single(Flaw::new(
            Path::root(),
            Invalid::Payload {
                message: e.to_string(),
            },
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_simple_pairs() {
        let payload = parse_query("boo=5&foo=bar");
        assert_eq!(payload.get("boo"), Some(&Value::from("5")));
        assert_eq!(payload.get("foo"), Some(&Value::from("bar")));
    }

    #[test]
    fn test_empty_query_is_empty_map() {
        assert_eq!(parse_query(""), Value::Map(IndexMap::new()));
        assert_eq!(parse_query("&&"), Value::Map(IndexMap::new()));
    }

    #[test]
    fn test_repeated_keys_collect_in_order() {
        let payload = parse_query("tag=a&other=x&tag=b&tag=c");
        assert_eq!(
            payload.get("tag"),
            Some(&Value::Seq(vec![
                Value::from("a"),
                Value::from("b"),
                Value::from("c")
            ]))
        );
        assert_eq!(payload.get("other"), Some(&Value::from("x")));
    }

    #[test]
    fn test_percent_and_plus_decoding() {
        let payload = parse_query("q=hello+world&path=%2Ftmp%2Fx");
        assert_eq!(payload.get("q"), Some(&Value::from("hello world")));
        assert_eq!(payload.get("path"), Some(&Value::from("/tmp/x")));
    }

    #[test]
    fn test_encoded_plus_stays_a_plus() {
        let payload = parse_query("expr=1%2B2");
        assert_eq!(payload.get("expr"), Some(&Value::from("1+2")));
    }

    #[test]
    fn test_keys_decode_too() {
        let payload = parse_query("my+key=v");
        assert_eq!(payload.get("my key"), Some(&Value::from("v")));
    }

    #[test]
    fn test_blank_values_are_kept() {
        let payload = parse_query("a=&b");
        assert_eq!(payload.get("a"), Some(&Value::from("")));
        assert_eq!(payload.get("b"), Some(&Value::from("")));
    }

    #[test]
    fn test_value_may_contain_equals() {
        let payload = parse_query("eq=a=b");
        assert_eq!(payload.get("eq"), Some(&Value::from("a=b")));
    }

    #[test]
    fn test_lenient_decoding() {
        // stray percent passes through
        let payload = parse_query("p=100%");
        assert_eq!(payload.get("p"), Some(&Value::from("100%")));

        // invalid UTF-8 decodes lossily instead of failing
        let payload = parse_query("x=%FF");
        assert_eq!(payload.get("x"), Some(&Value::from("\u{fffd}")));
    }

    #[test]
    fn test_parse_json_object() {
        let payload = parse_json(r#"{"name": "ada", "age": 30, "tags": ["a"]}"#).unwrap();
        assert_eq!(payload.get("name"), Some(&Value::from("ada")));
        assert_eq!(payload.get("age"), Some(&Value::Int(30)));
        assert_eq!(payload.get("tags"), Some(&Value::Seq(vec![Value::from("a")])));
    }

    #[test]
    fn test_parse_json_failure_is_root_payload_flaw() {
        let err = parse_json("{not json").unwrap_err();
        assert_eq!(err.len(), 1);
        assert!(err.first().path.is_root());
        assert_eq!(err.first().code(), "payload");
    }
}

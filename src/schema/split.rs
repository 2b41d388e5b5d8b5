//! Token splitting over text input.

use stillwater::Validation;

use crate::error::{AggregateError, Flaw, Invalid};
use crate::path::Path;
use crate::value::Value;

use super::traits::{Ident, Validate};

/// Splits text into tokens and validates each one.
///
/// The default configuration splits on `","` and strips surrounding
/// whitespace from every token, dropping tokens that end up empty so
/// trailing separators are harmless. [`Split::on_whitespace`] switches
/// to splitting on runs of whitespace instead.
///
/// Each surviving token runs through the item validator at its index
/// in the split sequence. Failures accumulate across tokens, and the
/// partial clean output holds `Null` at every failed position.
///
/// # Example
///
/// ```rust
/// use tamiz::{Schema, Validate, Value};
///
/// let ids = Schema::split(Schema::int());
/// let result = ids.check(&Value::from("1, 3, 5,,"));
/// assert_eq!(
///     result.into_result().ok(),
///     Some(vec![Value::Int(1), Value::Int(3), Value::Int(5)])
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Split<V = Ident> {
    item: V,
    separator: Option<String>,
    strip: bool,
}

impl Split<Ident> {
    /// Creates a splitter that returns the tokens themselves.
    pub fn tokens() -> Self {
        Split::new(Ident)
    }
}

impl<V> Split<V> {
    /// Creates a splitter running `item` over every token.
    pub fn new(item: V) -> Self {
        Self {
            item,
            separator: Some(",".to_string()),
            strip: true,
        }
    }

    /// Sets the separator to split on.
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = Some(separator.into());
        self
    }

    /// Splits on runs of whitespace instead of a fixed separator.
    ///
    /// Whitespace splitting never produces empty tokens, so the strip
    /// setting has no effect in this mode.
    pub fn on_whitespace(mut self) -> Self {
        self.separator = None;
        self
    }

    /// Controls whether tokens are trimmed.
    ///
    /// When enabled (the default), tokens are trimmed and tokens that
    /// become empty are dropped. When disabled, tokens are kept
    /// verbatim, empties included.
    pub fn strip(mut self, strip: bool) -> Self {
        self.strip = strip;
        self
    }

    fn tokenize(&self, text: &str) -> Vec<String> {
        match &self.separator {
            None => text.split_whitespace().map(str::to_string).collect(),
            Some(sep) => {
                let raw = text.split(sep.as_str());
                if self.strip {
                    raw.map(str::trim)
                        .filter(|t| !t.is_empty())
                        .map(str::to_string)
                        .collect()
                } else {
                    raw.map(str::to_string).collect()
                }
            }
        }
    }
}

impl<V: Validate> Validate for Split<V> {
    type Output = Vec<Value>;

    fn validate(&self, value: &Value, at: &Path) -> Validation<Self::Output, AggregateError> {
        let text = match value {
            Value::Text(s) => s,
            other => {
                return Validation::Failure(AggregateError::single(Flaw::new(
                    at.clone(),
                    Invalid::Mismatch {
                        expected: "text",
                        got: other.kind(),
                    },
                )))
            }
        };

        let mut out: Vec<Value> = Vec::new();
        let mut flaws: Vec<Flaw> = Vec::new();
        for (i, token) in self.tokenize(text).into_iter().enumerate() {
            let item_at = at.push_index(i);
            match self.item.validate_to_value(&Value::Text(token), &item_at) {
                Validation::Success(v) => out.push(v),
                Validation::Failure(e) => {
                    out.push(Value::Null);
                    flaws.extend(e.into_flaws());
                }
            }
        }

        if flaws.is_empty() {
            Validation::Success(out)
        } else {
            Validation::Failure(AggregateError::from_flaws(Value::Seq(out), flaws))
        }
    }

    fn validate_to_value(&self, value: &Value, at: &Path) -> Validation<Value, AggregateError> {
        self.validate(value, at).map(Value::Seq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Schema;

    fn unwrap_success<T>(v: Validation<T, AggregateError>) -> T {
        match v {
            Validation::Success(value) => value,
            Validation::Failure(e) => panic!("expected success, got failure: {}", e),
        }
    }

    fn unwrap_failure<T>(v: Validation<T, AggregateError>) -> AggregateError {
        match v {
            Validation::Success(_) => panic!("expected failure, got success"),
            Validation::Failure(e) => e,
        }
    }

    #[test]
    fn test_default_splits_on_comma_and_strips() {
        let result = Schema::tokens().check(&Value::from("aa, bb"));
        assert_eq!(
            unwrap_success(result),
            vec![Value::from("aa"), Value::from("bb")]
        );
    }

    #[test]
    fn test_strip_disabled_keeps_tokens_verbatim() {
        let result = Schema::tokens().strip(false).check(&Value::from("aa, bb"));
        assert_eq!(
            unwrap_success(result),
            vec![Value::from("aa"), Value::from(" bb")]
        );
    }

    #[test]
    fn test_strip_drops_emptied_tokens() {
        let result = Schema::split(Schema::int()).check(&Value::from("1, 3, 5,,"));
        assert_eq!(
            unwrap_success(result),
            vec![Value::Int(1), Value::Int(3), Value::Int(5)]
        );
    }

    #[test]
    fn test_empty_input_yields_no_tokens() {
        let result = Schema::tokens().check(&Value::from(""));
        assert_eq!(unwrap_success(result), Vec::<Value>::new());
    }

    #[test]
    fn test_whitespace_mode() {
        let result = Schema::split(Schema::int())
            .on_whitespace()
            .check(&Value::from("1\t2"));
        assert_eq!(unwrap_success(result), vec![Value::Int(1), Value::Int(2)]);

        let result = Schema::tokens()
            .on_whitespace()
            .check(&Value::from("  a   b  "));
        assert_eq!(
            unwrap_success(result),
            vec![Value::from("a"), Value::from("b")]
        );
    }

    #[test]
    fn test_custom_separator() {
        let result = Schema::tokens().separator("|").check(&Value::from("a|b|c"));
        assert_eq!(
            unwrap_success(result),
            vec![Value::from("a"), Value::from("b"), Value::from("c")]
        );
    }

    #[test]
    fn test_item_failures_carry_index_and_partial_output() {
        let schema = Schema::split(Schema::one_of(["boo", "foo"]));
        let err = unwrap_failure(schema.check(&Value::from("boo, bar, foo")));

        assert_eq!(err.len(), 1);
        let flaw = err.first();
        assert_eq!(flaw.path.to_string(), "[1]");
        assert_eq!(flaw.error.to_string(), "'bar' not in ['boo', 'foo']");

        assert_eq!(
            err.clean(),
            &Value::Seq(vec![Value::from("boo"), Value::Null, Value::from("foo")])
        );
    }

    #[test]
    fn test_indices_count_surviving_tokens() {
        // the empty token after "1," is dropped before indexing
        let schema = Schema::split(Schema::int());
        let err = unwrap_failure(schema.check(&Value::from("1,, x")));
        assert_eq!(err.first().path.to_string(), "[1]");
    }

    #[test]
    fn test_multiple_failures_accumulate() {
        let schema = Schema::split(Schema::int());
        let err = unwrap_failure(schema.check(&Value::from("a, 2, c")));
        assert_eq!(err.len(), 2);
        let paths: Vec<String> = err.iter().map(|f| f.path.to_string()).collect();
        assert_eq!(paths, vec!["[0]", "[2]"]);
        assert_eq!(
            err.clean(),
            &Value::Seq(vec![Value::Null, Value::Int(2), Value::Null])
        );
    }

    #[test]
    fn test_paths_nest_under_parent() {
        let schema = Schema::split(Schema::int());
        let err = unwrap_failure(schema.validate(&Value::from("x"), &Path::from_key("tags")));
        assert_eq!(err.first().path.to_string(), "tags[0]");
    }

    #[test]
    fn test_rejects_non_text() {
        let err = unwrap_failure(Schema::tokens().check(&Value::Int(3)));
        assert_eq!(err.first().error.to_string(), "expected text, got integer");
    }
}

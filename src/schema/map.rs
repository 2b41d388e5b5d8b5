//! Mapping schema validation.
//!
//! This module provides [`MapSchema`] for pulling typed fields out of
//! string-keyed mappings. Fields are required unless declared optional,
//! unknown keys are ignored, and every field failure is accumulated in
//! declaration order.

use indexmap::IndexMap;
use stillwater::Validation;

use crate::error::{AggregateError, Flaw, Invalid};
use crate::path::Path;
use crate::value::Value;

use super::traits::{Validate, ValueValidator};

/// Definition of a field within a mapping schema.
struct FieldDef {
    validator: Box<dyn ValueValidator>,
    required: bool,
}

/// A schema for validating string-keyed mappings.
///
/// `MapSchema` checks that the input is a mapping, runs each declared
/// field through its validator, and collects the results into an
/// ordered map. Keys the schema does not declare are dropped. Field
/// failures do not stop the remaining fields from validating, so one
/// pass reports everything wrong with a payload, and the failure's
/// partial clean output holds every field that did succeed.
///
/// Nested composites flatten into the same failure: a flaw inside a
/// nested mapping or split reports under its full path, e.g.
/// `filters.age` or `tags[1]`.
///
/// # Example
///
/// ```rust
/// use tamiz::{Schema, Validate, Value};
///
/// let schema = Schema::map()
///     .field("name", Schema::text().min_len(1))
///     .field("age", Schema::int().min(0))
///     .optional("email", Schema::text());
/// ```
pub struct MapSchema {
    fields: IndexMap<String, FieldDef>,
}

impl MapSchema {
    /// Creates a mapping schema with no fields.
    pub fn new() -> Self {
        Self {
            fields: IndexMap::new(),
        }
    }

    /// Adds a required field.
    ///
    /// A missing required field reports a `Required item` flaw at the
    /// field's path.
    pub fn field<S>(mut self, name: impl Into<String>, validator: S) -> Self
    where
        S: Validate + 'static,
    {
        self.fields.insert(
            name.into(),
            FieldDef {
                validator: Box::new(validator),
                required: true,
            },
        );
        self
    }

    /// Adds an optional field.
    ///
    /// An absent optional field is simply omitted from the output; a
    /// present one validates like any other.
    pub fn optional<S>(mut self, name: impl Into<String>, validator: S) -> Self
    where
        S: Validate + 'static,
    {
        self.fields.insert(
            name.into(),
            FieldDef {
                validator: Box::new(validator),
                required: false,
            },
        );
        self
    }
}

impl Default for MapSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl Validate for MapSchema {
    type Output = IndexMap<String, Value>;

    fn validate(&self, value: &Value, at: &Path) -> Validation<Self::Output, AggregateError> {
        let entries = match value.as_map() {
            Some(entries) => entries,
            None => {
                return Validation::Failure(AggregateError::single(Flaw::new(
                    at.clone(),
                    Invalid::Mismatch {
                        expected: "mapping",
                        got: value.kind(),
                    },
                )))
            }
        };

        let mut flaws = Vec::new();
        let mut validated = IndexMap::new();

        for (name, field_def) in &self.fields {
            let field_at = at.push_key(name);

            match entries.get(name) {
                Some(field_value) => {
                    match field_def.validator.validate_value(field_value, &field_at) {
                        Validation::Success(v) => {
                            validated.insert(name.clone(), v);
                        }
                        Validation::Failure(e) => {
                            flaws.extend(e.into_flaws());
                        }
                    }
                }
                None if field_def.required => {
                    flaws.push(Flaw::new(field_at, Invalid::Required));
                }
                None => {}
            }
        }

        if flaws.is_empty() {
            Validation::Success(validated)
        } else {
            Validation::Failure(AggregateError::from_flaws(Value::Map(validated), flaws))
        }
    }

    fn validate_to_value(&self, value: &Value, at: &Path) -> Validation<Value, AggregateError> {
        self.validate(value, at).map(Value::Map)
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

    fn payload(entries: &[(&str, Value)]) -> Value {
        Value::Map(
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        )
    }

    #[test]
    fn test_extracts_declared_fields() {
        let schema = Schema::map()
            .field("name", Schema::text())
            .field("age", Schema::int());

        let input = payload(&[("name", Value::from("ada")), ("age", Value::from("30"))]);
        let out = unwrap_success(schema.check(&input));

        assert_eq!(out.get("name"), Some(&Value::from("ada")));
        assert_eq!(out.get("age"), Some(&Value::Int(30)));
    }

    #[test]
    fn test_unknown_keys_are_dropped() {
        let schema = Schema::map().field("a", Schema::int());
        let input = payload(&[("a", Value::Int(1)), ("extra", Value::from("x"))]);
        let out = unwrap_success(schema.check(&input));

        assert_eq!(out.len(), 1);
        assert!(!out.contains_key("extra"));
    }

    #[test]
    fn test_missing_required_field() {
        let schema = Schema::map().field("age", Schema::int());
        let err = unwrap_failure(schema.check(&payload(&[])));

        assert_eq!(err.len(), 1);
        assert_eq!(err.first().path.to_string(), "age");
        assert_eq!(err.first().error.to_string(), "Required item");
        assert_eq!(err.first().code(), "required");
    }

    #[test]
    fn test_optional_field_may_be_absent() {
        let schema = Schema::map()
            .field("a", Schema::int())
            .optional("b", Schema::int());

        let out = unwrap_success(schema.check(&payload(&[("a", Value::Int(1))])));
        assert_eq!(out.len(), 1);
        assert!(!out.contains_key("b"));
    }

    #[test]
    fn test_present_optional_field_still_validates() {
        let schema = Schema::map().optional("b", Schema::int());
        let err = unwrap_failure(schema.check(&payload(&[("b", Value::from("x"))])));
        assert_eq!(err.first().path.to_string(), "b");
    }

    #[test]
    fn test_failures_accumulate_in_declaration_order() {
        let schema = Schema::map()
            .field("first", Schema::int())
            .field("second", Schema::int())
            .field("third", Schema::int());

        let input = payload(&[("second", Value::from("bad")), ("third", Value::Int(3))]);
        let err = unwrap_failure(schema.check(&input));

        let paths: Vec<String> = err.iter().map(|f| f.path.to_string()).collect();
        assert_eq!(paths, vec!["first", "second"]);
    }

    #[test]
    fn test_partial_clean_keeps_successful_fields() {
        let schema = Schema::map()
            .field("good", Schema::int())
            .field("bad", Schema::int());

        let input = payload(&[("good", Value::from("1")), ("bad", Value::from("x"))]);
        let err = unwrap_failure(schema.check(&input));

        assert_eq!(err.clean().get("good"), Some(&Value::Int(1)));
        assert_eq!(err.clean().get("bad"), None);
    }

    #[test]
    fn test_rejects_non_mapping_input() {
        let schema = Schema::map().field("a", Schema::int());
        let err = unwrap_failure(schema.check(&Value::from("not a map")));
        assert_eq!(err.first().error.to_string(), "expected mapping, got text");
    }

    #[test]
    fn test_nested_mapping_flattens_paths() {
        let schema = Schema::map().field(
            "filters",
            Schema::map()
                .field("age", Schema::int())
                .field("name", Schema::text()),
        );

        let inner = payload(&[("name", Value::from("x"))]);
        let err = unwrap_failure(schema.check(&payload(&[("filters", inner)])));

        assert_eq!(err.len(), 1);
        assert_eq!(err.first().path.to_string(), "filters.age");
    }

    #[test]
    fn test_failed_nested_composite_is_omitted_from_clean() {
        let schema = Schema::map()
            .field("ok", Schema::int())
            .field("nested", Schema::map().field("x", Schema::int()));

        let input = payload(&[("ok", Value::Int(1)), ("nested", payload(&[]))]);
        let err = unwrap_failure(schema.check(&input));

        assert_eq!(err.clean().get("ok"), Some(&Value::Int(1)));
        assert_eq!(err.clean().get("nested"), None);
        assert_eq!(err.first().path.to_string(), "nested.x");
    }

    #[test]
    fn test_split_inside_mapping() {
        let schema = Schema::map().field("tags", Schema::split(Schema::one_of(["boo", "foo"])));

        let input = payload(&[("tags", Value::from("boo, bar, foo"))]);
        let err = unwrap_failure(schema.check(&input));

        assert_eq!(err.len(), 1);
        assert_eq!(err.first().path.to_string(), "tags[1]");
        assert_eq!(
            err.first().error.to_string(),
            "'bar' not in ['boo', 'foo']"
        );
    }

    #[test]
    fn test_multiple_flaws_for_one_field() {
        let schema = Schema::map().field("n", Schema::int().min(10).max(5));
        let err = unwrap_failure(schema.check(&payload(&[("n", Value::Int(7))])));

        assert_eq!(err.len(), 2);
        assert_eq!(err.at_path(&Path::from_key("n")).len(), 2);
    }

    #[test]
    fn test_empty_schema_accepts_any_mapping() {
        let schema = Schema::map();
        let out = unwrap_success(schema.check(&payload(&[("x", Value::Int(1))])));
        assert!(out.is_empty());
    }
}

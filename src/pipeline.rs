//! Request validation pipelines.
//!
//! This module provides [`Pipeline`], which ties raw-input getters to
//! mapping schemas so that handler code only ever sees typed,
//! validated fields. A pipeline holds one or more stages; each stage
//! pulls a raw payload out of the caller's context (a request type,
//! usually) and validates it, and the resulting fields from every
//! stage merge into one map with later stages winning on key
//! conflicts.
//!
//! Validation failures either reach the configured error handler,
//! which turns them into the caller's response type, or propagate as
//! `Err` when no handler is set.

use indexmap::IndexMap;
use stillwater::Validation;

use crate::error::AggregateError;
use crate::schema::{MapSchema, Validate};
use crate::value::Value;

type Getter<Cx> = Box<dyn Fn(&Cx) -> Result<Value, AggregateError> + Send + Sync>;
type ErrorHandler<R> = Box<dyn Fn(&AggregateError) -> R + Send + Sync>;

struct Stage<Cx> {
    getter: Getter<Cx>,
    schema: MapSchema,
}

/// A staged validator from raw context to typed fields.
///
/// # Example
///
/// ```rust
/// use tamiz::source::parse_query;
/// use tamiz::{bad_request, Pipeline, Schema};
///
/// struct Request {
///     query: String,
/// }
///
/// let pipeline = Pipeline::new()
///     .stage(
///         |req: &Request| Ok(parse_query(&req.query)),
///         Schema::map().field("boo", Schema::int()),
///     )
///     .on_error(bad_request);
///
/// let req = Request { query: "boo=5".to_string() };
/// let response = pipeline
///     .run(&req, |_req, args| serde_json::json!({ "boo": args["boo"].as_int() }))
///     .unwrap();
/// assert_eq!(response["boo"], 5);
/// ```
pub struct Pipeline<Cx, R> {
    stages: Vec<Stage<Cx>>,
    handler: Option<ErrorHandler<R>>,
}

impl<Cx, R> Pipeline<Cx, R> {
    /// Creates an empty pipeline.
    pub fn new() -> Self {
        Self {
            stages: Vec::new(),
            handler: None,
        }
    }

    /// Adds a stage: a getter pulling a raw payload from the context,
    /// and the mapping schema validating it.
    ///
    /// Getters return `Result` so that sources which can fail to
    /// produce a payload at all (an unparseable body, say) surface
    /// that as a validation failure.
    pub fn stage<G>(mut self, getter: G, schema: MapSchema) -> Self
    where
        G: Fn(&Cx) -> Result<Value, AggregateError> + Send + Sync + 'static,
    {
        self.stages.push(Stage {
            getter: Box::new(getter),
            schema,
        });
        self
    }

    /// Sets the handler converting failures into the response type.
    ///
    /// Without a handler, [`Pipeline::run`] returns failures as `Err`.
    pub fn on_error<H>(mut self, handler: H) -> Self
    where
        H: Fn(&AggregateError) -> R + Send + Sync + 'static,
    {
        self.handler = Some(Box::new(handler));
        self
    }

    /// Runs every stage against `cx` and hands the merged fields to
    /// `next`.
    ///
    /// Stages run in order, stopping at the first stage whose getter
    /// or schema fails. The failure goes to the error handler when one
    /// is set, otherwise it comes back as `Err`.
    pub fn run<F>(&self, cx: &Cx, next: F) -> Result<R, AggregateError>
    where
        F: FnOnce(&Cx, IndexMap<String, Value>) -> R,
    {
        let mut merged: IndexMap<String, Value> = IndexMap::new();
        for stage in &self.stages {
            let raw = match (stage.getter)(cx) {
                Ok(raw) => raw,
                Err(e) => return self.handle(e),
            };
            match stage.schema.check(&raw) {
                Validation::Success(fields) => merged.extend(fields),
                Validation::Failure(e) => return self.handle(e),
            }
        }
        Ok(next(cx, merged))
    }

    fn handle(&self, error: AggregateError) -> Result<R, AggregateError> {
        match &self.handler {
            Some(handler) => Ok(handler(&error)),
            None => Err(error),
        }
    }
}

impl<Cx, R> Default for Pipeline<Cx, R> {
    fn default() -> Self {
        Self::new()
    }
}

/// Shapes a failure into the canonical bad-request JSON payload.
///
/// The shape is `{"error": "bad-request", "details": {path: message}}`,
/// with one entry per flaw.
///
/// # Example
///
/// ```rust
/// use tamiz::{bad_request, AggregateError, Flaw, Invalid, Path};
///
/// let err = AggregateError::single(Flaw::new(Path::from_key("age"), Invalid::Required));
/// let body = bad_request(&err);
/// assert_eq!(body["error"], "bad-request");
/// assert_eq!(body["details"]["age"], "Required item");
/// ```
pub fn bad_request(error: &AggregateError) -> serde_json::Value {
    let details: serde_json::Map<String, serde_json::Value> = error
        .details()
        .into_iter()
        .map(|(path, message)| (path, serde_json::Value::String(message)))
        .collect();
    serde_json::json!({
        "error": "bad-request",
        "details": details,
    })
}

//! Tests for thread-safe concurrent access to shared schemas and
//! pipelines.

use serde_json::json;
use std::sync::Arc;
use std::thread;

use tamiz::source::parse_query;
use tamiz::{bad_request, Path, Pipeline, Schema, Validate, Value, ValueValidator};

/// Builds a mapping value from key/value pairs.
fn map(entries: &[(&str, Value)]) -> Value {
    Value::Map(
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect(),
    )
}

#[test]
fn test_concurrent_validation() {
    let schema = Arc::new(
        Schema::map()
            .field("name", Schema::text().min_len(1))
            .field("age", Schema::int().min(0)),
    );

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let schema = Arc::clone(&schema);
            thread::spawn(move || {
                let payload = map(&[
                    ("name", Value::from(format!("User{}", i).as_str())),
                    ("age", Value::from(format!("{}", 20 + i).as_str())),
                ]);
                let result = schema.check(&payload);
                assert!(result.is_success());
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_concurrent_error_accumulation() {
    let schema = Arc::new(
        Schema::map()
            .field("name", Schema::text().min_len(1))
            .field("age", Schema::int()),
    );

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let schema = Arc::clone(&schema);
            thread::spawn(move || {
                let payload = map(&[("name", Value::from(""))]);
                let errors = match schema.check(&payload) {
                    stillwater::Validation::Failure(e) => e,
                    stillwater::Validation::Success(_) => panic!("Expected failure"),
                };
                // Every thread sees the same two flaws in the same order
                assert_eq!(errors.len(), 2);
                assert_eq!(errors.first().path.to_string(), "name");
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_schema_moves_into_thread() {
    let schema = Schema::map().field("id", Schema::int().min(1));

    let handle = thread::spawn(move || {
        let result = schema.check(&map(&[("id", Value::from("7"))]));
        assert!(result.is_success());
    });

    handle.join().unwrap();
}

#[test]
fn test_concurrent_pipeline_runs() {
    struct FakeRequest {
        query: String,
    }

    let pipeline: Arc<Pipeline<FakeRequest, serde_json::Value>> = Arc::new(
        Pipeline::new()
            .stage(
                |req: &FakeRequest| Ok(parse_query(&req.query)),
                Schema::map()
                    .field("page", Schema::int().min(1))
                    .optional("sort", Schema::one_of(["asc", "desc"])),
            )
            .on_error(bad_request),
    );

    let handles: Vec<_> = (0..10)
        .map(|i| {
            let pipeline = Arc::clone(&pipeline);
            thread::spawn(move || {
                let req = FakeRequest {
                    query: format!("page={}&sort=asc", i + 1),
                };
                let response = pipeline
                    .run(&req, |_, args| json!({"page": args["page"].as_int()}))
                    .unwrap();
                assert_eq!(response, json!({"page": i + 1}));
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_concurrent_pipeline_error_responses() {
    struct FakeRequest {
        query: String,
    }

    let pipeline = Arc::new(
        Pipeline::new()
            .stage(
                |req: &FakeRequest| Ok(parse_query(&req.query)),
                Schema::map().field("page", Schema::int()),
            )
            .on_error(bad_request),
    );

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let pipeline = Arc::clone(&pipeline);
            thread::spawn(move || {
                let req = FakeRequest {
                    query: "page=abc".to_string(),
                };
                let response = pipeline.run(&req, |_, _| json!({})).unwrap();
                assert_eq!(response["error"], json!("bad-request"));
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_stress_concurrent_validation() {
    let schema = Arc::new(
        Schema::map()
            .field("id", Schema::int().min(1))
            .field("email", Schema::text().pattern("@").unwrap())
            .field("name", Schema::text()),
    );

    // Create 100 threads all validating concurrently
    let handles: Vec<_> = (0..100)
        .map(|i| {
            let schema = Arc::clone(&schema);
            thread::spawn(move || {
                for j in 0..10 {
                    let payload = map(&[
                        ("id", Value::Int(i * 10 + j + 1)),
                        (
                            "email",
                            Value::from(format!("user{}@example.com", i).as_str()),
                        ),
                        ("name", Value::from(format!("User {}", i).as_str())),
                    ]);
                    let result = schema.check(&payload);
                    assert!(result.is_success());
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_concurrent_access_different_schemas() {
    let schemas: Vec<Arc<dyn ValueValidator>> = vec![
        Arc::new(Schema::text()),
        Arc::new(Schema::int()),
        Arc::new(Schema::map().field("value", Schema::text())),
    ];
    let values = [
        Value::from("test"),
        Value::Int(42),
        map(&[("value", Value::from("hello"))]),
    ];

    let handles: Vec<_> = (0..30)
        .map(|i| {
            let schema = Arc::clone(&schemas[i % 3]);
            let value = values[i % 3].clone();
            thread::spawn(move || {
                let result = schema.validate_value(&value, &Path::root());
                assert!(result.is_success());
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

//! Integration tests for SchemaError, SchemaErrors and ParseError.

use serde::Deserialize;
use serde_json::json;
use stillwater::prelude::*;
use stillwater::Validation;
use validex::{JsonPath, ParseError, Schema, SchemaError, SchemaErrors, SchemaLike, ValidationResult};

#[test]
fn test_schema_error_context() {
    let error = SchemaError::new(JsonPath::root().push_field("email"), "invalid email format")
        .with_code("email");

    assert_eq!(error.path.to_string(), "email");
    assert_eq!(error.message, "invalid email format");
    assert_eq!(error.code, "email");
    assert_eq!(error.to_string(), "email: invalid email format");
}

#[test]
fn test_errors_combine_via_semigroup() {
    let e1 = SchemaErrors::single(SchemaError::new(
        JsonPath::root().push_field("name"),
        "name is required",
    ));
    let e2 = SchemaErrors::single(SchemaError::new(
        JsonPath::root().push_field("email"),
        "email is invalid",
    ));

    let combined = e1.combine(e2);
    let messages: Vec<&str> = combined.iter().map(|e| e.message.as_str()).collect();
    assert_eq!(messages, vec!["name is required", "email is invalid"]);
}

#[test]
fn test_into_result_on_failure() {
    let schema = Schema::object()
        .field("name", Schema::string().min_len(1))
        .field("tags", Schema::array(Schema::string()));

    let errors = schema
        .safe_parse(&json!({"name": "", "tags": [1]}))
        .into_result()
        .unwrap_err();

    assert_eq!(errors.len(), 2);
    assert_eq!(errors.first().path.to_string(), "name");
    assert_eq!(errors.at_path(&JsonPath::root().push_field("tags").push_index(0)).len(), 1);
    assert_eq!(errors.with_code("min_length").len(), 1);
}

#[test]
fn test_into_validation_accumulates_across_parses() {
    let name = Schema::string().min_len(1);
    let age = Schema::number().int();

    let v1: ValidationResult<serde_json::Value> = name
        .parse(&json!(""), &JsonPath::root().push_field("name"))
        .into_validation();
    let v2 = age
        .parse(&json!(1.5), &JsonPath::root().push_field("age"))
        .into_validation();

    match v1.and(v2) {
        Validation::Failure(errors) => {
            let paths: Vec<String> = errors.iter().map(|e| e.path.to_string()).collect();
            assert_eq!(paths, vec!["name", "age"]);
        }
        Validation::Success(_) => panic!("Expected failure"),
    }
}

#[test]
fn test_schema_errors_display() {
    let errors = Schema::string()
        .min_len(3)
        .safe_parse(&json!("a"))
        .into_result()
        .unwrap_err();

    let rendered = errors.to_string();
    assert!(rendered.starts_with("Validation failed with 1 error(s):"));
    assert!(rendered.contains("(root): Expected \"a\" to be at least 3 characters long"));
}

#[derive(Debug, Deserialize, PartialEq)]
struct Account {
    name: String,
    age: Option<u32>,
    #[serde(default)]
    roles: Vec<String>,
}

fn account_schema() -> validex::ObjectSchema {
    Schema::object()
        .field("name", Schema::string().min_len(1))
        .field("age", Schema::number().int().non_negative().optional())
        .field("roles", Schema::array(Schema::string()).default(json!(["user"])))
}

#[test]
fn test_parse_into_typed_value() {
    let account: Account = account_schema()
        .parse_into(&json!({"name": "ada", "extra": true}))
        .unwrap();

    assert_eq!(
        account,
        Account {
            name: "ada".to_string(),
            age: None,
            roles: vec!["user".to_string()],
        }
    );
}

#[test]
fn test_parse_into_reports_validation_errors() {
    let err = account_schema()
        .parse_into::<Account>(&json!({"name": "", "age": -1}))
        .unwrap_err();

    let errors = err.schema_errors().expect("validation error");
    assert_eq!(errors.len(), 2);
    assert!(matches!(err, ParseError::Invalid(_)));
}

#[test]
fn test_parse_into_reports_deserialize_errors() {
    // -1 is a valid number but does not fit u32
    let schema = Schema::object()
        .field("name", Schema::string())
        .field("age", Schema::number().optional());

    let err = schema
        .parse_into::<Account>(&json!({"name": "ada", "age": -1}))
        .unwrap_err();
    assert!(matches!(err, ParseError::Deserialize(_)));
    assert!(err.schema_errors().is_none());
}

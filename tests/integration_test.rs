//! Integration tests for conform

use conform::{
    validate, validate_with, ErrorKind, Predicate, PredicateRegistry, Schema, Value,
};
use serde_json::json;

fn v(json: serde_json::Value) -> Value {
    Value::from(json)
}

#[test]
fn test_type_rule_accepts_matching_integer() {
    let schema = v(json!({ "type": "integer" }));
    assert!(validate(&schema, &Value::from(123)).is_ok());
}

#[test]
fn test_range_rule_reports_bounds() {
    let schema = v(json!({ "range": { "min": 1, "max": 10 } }));
    let err = validate(&schema, &Value::from(20)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RangeViolation);
    assert_eq!(err.to_string(), "Value: 20 not in [1, 10]");
}

#[test]
fn test_strlen_rule_counts_code_points() {
    let schema = v(json!({ "strlen": { "min": 3, "max": 6 } }));
    let err = validate(&schema, &Value::from("中文")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::LengthViolation);
    assert_eq!(err.to_string(), "Value: 中文 length 2 not in [3, 6]");
}

#[test]
fn test_array_rule_fails_inside_nested_container() {
    let schema = v(json!({
        "array": { "type": "integer", "range": { "min": 1, "max": 16 } }
    }));
    let err = validate(&schema, &v(json!([1, 2, 3, [4, 5, 26]]))).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RangeViolation);
    assert_eq!(
        err.to_string(),
        "Schema rule range check failed: Value: 26 not in [1, 16]"
    );
}

#[test]
fn test_array_field_fixed_value_mismatch_in_nested_level() {
    let schema = v(json!({
        "array_field": { "field": "user_id", "type": "integer", "value": 66 }
    }));
    let value = v(json!({
        "user_id": 66,
        "extra": 2,
        "sub": { "user_id": 67, "other": 5 }
    }));
    let err = validate(&schema, &value).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FixedValueMismatch);
    assert_eq!(
        err.to_string(),
        "Schema rule value check failed, checking value: 67 not equal to rule value: 66"
    );
}

#[test]
fn test_array_optional_field_absent_everywhere_is_fine() {
    let schema = v(json!({
        "array_optional_field": { "field": "enable", "type": "boolean", "value": false }
    }));
    let value = v(json!({
        "switch_name": "close_door",
        "sub_info": { "mode": "auto" }
    }));
    assert!(validate(&schema, &value).is_ok());
}

#[test]
fn test_fail_fast_reports_earlier_rule() {
    // Both `type` and `range` would fail for a string value; `type` is
    // first in schema order and wins.
    let schema = v(json!({
        "type": "integer",
        "range": { "min": 1, "max": 10 }
    }));
    let err = validate(&schema, &Value::from("abc")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    assert_eq!(
        err.to_string(),
        "Value type is string, not the schema type integer"
    );
}

#[test]
fn test_strict_equality_never_coerces() {
    let schema = v(json!({ "in": [123, true, "abc"] }));
    assert!(validate(&schema, &Value::from("123")).is_err());
    assert!(validate(&schema, &Value::from(1)).is_err());
    assert!(validate(&schema, &Value::from(123.0)).is_err());
    assert!(validate(&schema, &Value::from(123)).is_ok());

    let schema = v(json!({ "array": { "type": "integer", "value": 1 } }));
    let err = validate(&schema, &v(json!([1, true]))).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FixedValueMismatch);
}

#[test]
fn test_field_presence_checked_at_every_level() {
    let schema = v(json!({
        "array_field": { "field": "id", "type": "integer" }
    }));
    // Present globally but missing in the innermost level.
    let value = v(json!({
        "id": 1,
        "child": { "id": 2, "grandchild": { "name": "x" } }
    }));
    let err = validate(&schema, &value).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ContainerFieldMissing);
}

#[test]
fn test_fixed_value_takes_precedence_over_range() {
    let schema = v(json!({
        "array": {
            "type": "integer",
            "range": { "min": 100, "max": 200 },
            "value": 7
        }
    }));
    // 7 violates the range, but the fixed-value check replaces it.
    assert!(validate(&schema, &v(json!([7, [7, 7]]))).is_ok());
}

#[test]
fn test_validation_is_deterministic() {
    let schema = v(json!({
        "array_field": {
            "field": "user_id",
            "type": "integer",
            "range": { "min": 1, "max": 16 }
        }
    }));
    let value = v(json!({ "user_id": 17, "a": 2 }));
    let first = validate(&schema, &value).unwrap_err();
    for _ in 0..3 {
        assert_eq!(validate(&schema, &value).unwrap_err(), first);
    }
}

#[test]
fn test_schema_builder_round_trip() {
    let schema = Schema::new()
        .rule("type", "string")
        .rule("empty", false)
        .rule("pattern", r"^\w{3}\d{2}$");
    assert!(schema.validate(&Value::from("abc12")).is_ok());
    let err = schema.validate(&Value::from("nope")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PatternMismatch);
}

#[test]
fn test_predicate_via_local_registry() {
    let registry = PredicateRegistry::new();
    registry.register(
        "non_negative",
        Predicate::new(|value, out| match value.as_i64() {
            Some(n) if n >= 0 => true,
            _ => {
                out.push_str("Value must be a non-negative integer.");
                false
            }
        }),
    );

    let schema = v(json!({ "predicate": "non_negative" }));
    assert!(validate_with(&schema, &Value::from(0), &registry).is_ok());

    let err = validate_with(&schema, &Value::from(-3), &registry).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PredicateRejected);
    assert_eq!(err.to_string(), "Value must be a non-negative integer.");

    let err = validate_with(&v(json!({ "predicate": "missing" })), &Value::from(0), &registry)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::PredicateNotFound);
}

#[test]
fn test_predicate_via_global_registry() {
    PredicateRegistry::global().register(
        "integration_is_even",
        Predicate::new(|value, out| match value.as_i64() {
            Some(n) if n % 2 == 0 => true,
            _ => {
                out.push_str("Value must be an even integer.");
                false
            }
        }),
    );

    let schema = v(json!({ "predicate": "integration_is_even" }));
    assert!(validate(&schema, &Value::from(4)).is_ok());
    let err = validate(&schema, &Value::from(5)).unwrap_err();
    assert_eq!(err.to_string(), "Value must be an even integer.");
}

#[test]
fn test_inputs_are_not_mutated() {
    let schema = v(json!({ "strlen": { "min": 1, "max": 2 } }));
    let value = Value::from("hello");
    let schema_before = schema.clone();
    let value_before = value.clone();
    let _ = validate(&schema, &value);
    assert_eq!(schema, schema_before);
    assert_eq!(value, value_before);
}

#[test]
fn test_error_to_json() {
    let schema = v(json!({ "range": { "min": 1, "max": 10 } }));
    let err = validate(&schema, &Value::from(20)).unwrap_err();
    assert_eq!(
        err.to_json(),
        json!({ "kind": "range_violation", "message": "Value: 20 not in [1, 10]" })
    );
}

#[test]
fn test_inverted_length_bounds_are_not_rejected() {
    let schema = v(json!({ "strlen": { "min": 6, "max": 3 } }));
    // min > max is kept as-is; every value fails the comparison.
    let err = validate(&schema, &Value::from("1234")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::LengthViolation);
    assert_eq!(err.to_string(), "Value: 1234 length 4 not in [6, 3]");
}

#[test]
fn test_combined_rules_on_request_like_payload() {
    let enabled = v(json!({
        "array_optional_field": { "field": "enabled", "type": "boolean", "value": true }
    }));
    let ids = v(json!({
        "array_field": { "field": "user_id", "type": "integer", "range": { "min": 1, "max": 9999 } }
    }));
    let payload = v(json!({
        "user_id": 42,
        "enabled": true,
        "session": { "user_id": 42, "token": "abcdef" }
    }));
    assert!(validate(&enabled, &payload).is_ok());
    assert!(validate(&ids, &payload).is_ok());
}

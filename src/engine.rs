// Rule dispatcher

use tracing::{debug, trace};

use crate::errors::{ErrorKind, ValidationError};
use crate::predicate::{self, PredicateRegistry};
use crate::schema::RULE_NAMES;
use crate::value::Value;
use crate::{rules, walker};

/// Validate a value against a schema using the global predicate registry.
///
/// The schema is itself a [`Value`]: an ordered container of
/// `(rule-name, parameter)` entries. Entries are evaluated in order and the
/// first failure is returned; later rules are not evaluated.
///
/// # Examples
///
/// ```
/// use conform::{validate, Value};
/// use serde_json::json;
///
/// let schema = Value::from(json!({ "type": "integer" }));
/// assert!(validate(&schema, &Value::from(123)).is_ok());
///
/// let schema = Value::from(json!({ "range": { "min": 1, "max": 10 } }));
/// let err = validate(&schema, &Value::from(20)).unwrap_err();
/// assert_eq!(err.to_string(), "Value: 20 not in [1, 10]");
/// ```
pub fn validate(schema: &Value, value: &Value) -> Result<(), ValidationError> {
    validate_with(schema, value, PredicateRegistry::global())
}

/// Validate a value against a schema with an explicit predicate registry.
pub fn validate_with(
    schema: &Value,
    value: &Value,
    registry: &PredicateRegistry,
) -> Result<(), ValidationError> {
    trace!(target: "conform::engine", "validating value against schema");
    let result = run(schema, value, registry);
    if let Err(err) = &result {
        debug!(target: "conform::engine", error = %err, kind = err.kind().as_str(), "validation failed");
    }
    result
}

/// The dispatcher proper. Shared by the public entry points and by every
/// handler that self-validates its rule parameters, so nested failures carry
/// identical messages whichever path produced them.
pub(crate) fn run(
    schema: &Value,
    value: &Value,
    registry: &PredicateRegistry,
) -> Result<(), ValidationError> {
    let Some(entries) = schema.entries() else {
        return Err(ValidationError::new(
            ErrorKind::SchemaMalformed,
            "Validator schema must be a container",
        ));
    };
    if entries.is_empty() {
        return Err(ValidationError::new(
            ErrorKind::SchemaMalformed,
            "Validator schema cannot be empty",
        ));
    }
    for (key, param) in entries {
        let rule = key.to_string();
        match rule.as_str() {
            "type" => rules::check_type(param, value)?,
            "empty" => rules::check_empty(param, value, registry)?,
            "range" => rules::check_range(param, value, registry)?,
            "in" => rules::check_in(param, value, registry)?,
            "strlen" => rules::check_strlen(param, value, registry)?,
            "pattern" => rules::check_pattern(param, value, registry)?,
            "array" | "array_field" | "array_optional_field" => {
                walker::check_container_rule(&rule, param, value, registry)?
            }
            "predicate" => predicate::check_predicate(param, value, registry)?,
            unknown => {
                return Err(ValidationError::new(
                    ErrorKind::SchemaMalformed,
                    format!(
                        "Schema rule: {} is invalid, valid rule list is: {}",
                        unknown,
                        RULE_NAMES.join(", ")
                    ),
                ));
            }
        }
    }
    Ok(())
}

// Scalar rule handlers
//
// Every handler self-validates its rule parameters by re-entering the
// dispatcher with an internally built sub-schema, so parameter defects are
// reported with the same messages as any other validation failure, prefixed
// with the enclosing rule's context.

use regex::Regex;

use crate::engine::run;
use crate::errors::{ErrorKind, ValidationError};
use crate::predicate::PredicateRegistry;
use crate::schema::{of_type, of_type_not_empty};
use crate::value::{Kind, Value};

/// `type`: exact runtime-kind equality.
pub(crate) fn check_type(param: &Value, value: &Value) -> Result<(), ValidationError> {
    let Some(expected) = param.as_str().and_then(Kind::from_name) else {
        let tag = match param.as_str() {
            Some(s) => s.to_string(),
            None => param.to_string(),
        };
        return Err(ValidationError::new(
            ErrorKind::SchemaMalformed,
            format!(
                "Schema type: {} is not in valid type list: {}",
                tag,
                Kind::NAMES.join(", ")
            ),
        ));
    };
    let observed = value.kind();
    if observed == expected {
        return Ok(());
    }
    Err(ValidationError::new(
        ErrorKind::TypeMismatch,
        format!(
            "Value type is {}, not the schema type {}",
            observed.name(),
            expected.name()
        ),
    ))
}

/// `empty`: the value's conventional emptiness must match the boolean
/// parameter.
pub(crate) fn check_empty(
    param: &Value,
    value: &Value,
    registry: &PredicateRegistry,
) -> Result<(), ValidationError> {
    run(&of_type("boolean"), param, registry).map_err(|e| {
        e.wrap_as(
            ErrorKind::SchemaMalformed,
            "Empty rule require value to be boolean",
        )
    })?;
    let required_empty = matches!(param, Value::Bool(true));
    if required_empty == value.is_falsy() {
        return Ok(());
    }
    let message = if required_empty {
        "Empty rule require value to be empty, but it is not"
    } else {
        "Empty rule require value to be not empty, but it is"
    };
    Err(ValidationError::new(ErrorKind::EmptinessMismatch, message))
}

/// `range`: integer value within `[min, max]`. An inverted range
/// (`min > max`) is not rejected; every value simply fails it.
pub(crate) fn check_range(
    param: &Value,
    value: &Value,
    registry: &PredicateRegistry,
) -> Result<(), ValidationError> {
    run(&of_type("integer"), value, registry)
        .map_err(|e| e.wrap("Schema range require the checking value to be integer"))?;
    let (min, max) = min_max(
        param,
        "Schema range rule require its value be a container with two keys: min and max",
    )?;
    run(&of_type("integer"), min, registry).map_err(|_| {
        ValidationError::new(
            ErrorKind::SchemaMalformed,
            "Schema range min value must be integer",
        )
    })?;
    run(&of_type("integer"), max, registry).map_err(|_| {
        ValidationError::new(
            ErrorKind::SchemaMalformed,
            "Schema range max value must be integer",
        )
    })?;
    let (Some(v), Some(lo), Some(hi)) = (value.as_i64(), min.as_i64(), max.as_i64()) else {
        // Guaranteed integers by the checks above.
        return Err(ValidationError::new(
            ErrorKind::SchemaMalformed,
            "Schema range rule require its value be a container with two keys: min and max",
        ));
    };
    if v < lo || v > hi {
        return Err(ValidationError::new(
            ErrorKind::RangeViolation,
            format!("Value: {} not in [{}, {}]", v, lo, hi),
        ));
    }
    Ok(())
}

/// `in`: strict-equality membership in a non-empty container.
pub(crate) fn check_in(
    param: &Value,
    value: &Value,
    registry: &PredicateRegistry,
) -> Result<(), ValidationError> {
    run(&of_type_not_empty("container"), param, registry).map_err(|e| {
        e.wrap_as(
            ErrorKind::SchemaMalformed,
            "Schema rule in value must be a container and cannot be empty",
        )
    })?;
    let members = param.entries().unwrap_or_default();
    if members.iter().any(|(_, candidate)| candidate == value) {
        return Ok(());
    }
    Err(ValidationError::new(
        ErrorKind::MembershipViolation,
        format!("Value {} not in schema container", value),
    ))
}

/// `strlen`: string length in Unicode code points within `[min, max]`.
pub(crate) fn check_strlen(
    param: &Value,
    value: &Value,
    registry: &PredicateRegistry,
) -> Result<(), ValidationError> {
    run(&of_type("string"), value, registry)
        .map_err(|e| e.wrap("Schema strlen rule require the checking value to be string"))?;
    let (min, max) = min_max(
        param,
        "Schema strlen rule require its value be a container with two keys: min and max",
    )?;
    run(&of_type("integer"), min, registry).map_err(|_| {
        ValidationError::new(
            ErrorKind::SchemaMalformed,
            "Schema strlen min value must be integer",
        )
    })?;
    run(&of_type("integer"), max, registry).map_err(|_| {
        ValidationError::new(
            ErrorKind::SchemaMalformed,
            "Schema strlen max value must be integer",
        )
    })?;
    let (Some(s), Some(lo), Some(hi)) = (value.as_str(), min.as_i64(), max.as_i64()) else {
        return Err(ValidationError::new(
            ErrorKind::SchemaMalformed,
            "Schema strlen rule require its value be a container with two keys: min and max",
        ));
    };
    let length = s.chars().count() as i64;
    if length < lo || length > hi {
        return Err(ValidationError::new(
            ErrorKind::LengthViolation,
            format!("Value: {} length {} not in [{}, {}]", s, length, lo, hi),
        ));
    }
    Ok(())
}

/// `pattern`: the value must match a valid regular expression. A pattern
/// that fails to compile is its own failure, distinct from a non-match.
pub(crate) fn check_pattern(
    param: &Value,
    value: &Value,
    registry: &PredicateRegistry,
) -> Result<(), ValidationError> {
    run(&of_type_not_empty("string"), param, registry).map_err(|e| {
        e.wrap_as(
            ErrorKind::SchemaMalformed,
            "Schema pattern require schema value to be string and not be empty",
        )
    })?;
    run(&of_type("string"), value, registry)
        .map_err(|e| e.wrap("Schema pattern require the checking value to be string"))?;
    let (Some(pattern), Some(s)) = (param.as_str(), value.as_str()) else {
        return Err(ValidationError::new(
            ErrorKind::SchemaMalformed,
            "Schema pattern require schema value to be string and not be empty",
        ));
    };
    let regex = Regex::new(pattern).map_err(|_| {
        ValidationError::new(
            ErrorKind::PatternInvalid,
            format!(
                "Schema pattern value {} is not a valid regular expression",
                pattern
            ),
        )
    })?;
    if !regex.is_match(s) {
        return Err(ValidationError::new(
            ErrorKind::PatternMismatch,
            format!("Value {} does not match regular expression: {}", s, pattern),
        ));
    }
    Ok(())
}

/// Extract the required `min`/`max` sub-keys of a range-shaped parameter.
fn min_max<'a>(
    param: &'a Value,
    shape_message: &str,
) -> Result<(&'a Value, &'a Value), ValidationError> {
    match (param.get("min"), param.get("max")) {
        (Some(min), Some(max)) => Ok((min, max)),
        _ => Err(ValidationError::new(
            ErrorKind::SchemaMalformed,
            shape_message,
        )),
    }
}

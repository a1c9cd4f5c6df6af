// Recursive container walker
//
// Shared implementation of the `array`, `array_field` and
// `array_optional_field` rules: a depth-first, pre-order descent over a
// nested container, checking every leaf (or only the leaves under a named
// field) against a type tag, an optional integer range, or a fixed value.

use crate::engine::run;
use crate::errors::{ErrorKind, ValidationError};
use crate::predicate::PredicateRegistry;
use crate::schema::{of_type, of_type_not_empty};
use crate::value::{Key, Value};

/// Nesting levels beyond this fail with [`ErrorKind::DepthExceeded`] instead
/// of exhausting the call stack.
pub const MAX_NESTING_DEPTH: usize = 128;

/// Checks applied to each matching leaf. A fixed value takes precedence:
/// when present, neither the type tag nor the range is consulted.
struct LeafChecks<'a> {
    /// Leaf must equal this value under strict equality.
    fixed: Option<&'a Value>,
    /// Pre-built `{type: T}` sub-schema.
    type_schema: &'a Value,
    /// Pre-built `{range: {min, max}}` sub-schema, integer type only.
    range_schema: Option<&'a Value>,
    /// Type tag as written in the rule, for messages.
    tag: &'a str,
    /// Restrict checks to entries with this key; empty checks every leaf.
    field: &'a str,
    /// Whether a restricted field may be absent from a level.
    field_optional: bool,
}

/// Entry point for the three container rules. `rule` is the schema rule
/// name, used verbatim in messages.
pub(crate) fn check_container_rule(
    rule: &str,
    param: &Value,
    value: &Value,
    registry: &PredicateRegistry,
) -> Result<(), ValidationError> {
    run(&of_type("container"), param, registry).map_err(|e| {
        e.wrap_as(
            ErrorKind::SchemaMalformed,
            format!("Schema {} require value to be a container", rule),
        )
    })?;

    let requires_field = rule != "array";
    let field_optional = rule == "array_optional_field";
    let field = if requires_field {
        let Some(field) = param.get("field") else {
            return Err(ValidationError::new(
                ErrorKind::SchemaMalformed,
                format!("Schema {} require value has key: field", rule),
            ));
        };
        run(&of_type("string"), field, registry).map_err(|e| {
            e.wrap_as(
                ErrorKind::SchemaMalformed,
                format!("Schema {} require field value to be string", rule),
            )
        })?;
        field.as_str().unwrap_or("")
    } else {
        ""
    };

    let Some(tag_value) = param.get("type") else {
        return Err(ValidationError::new(
            ErrorKind::SchemaMalformed,
            format!("Schema {} require value has key: type", rule),
        ));
    };

    // A null `value` entry means "no fixed-value check"; a null or empty
    // `range` entry means "no range check".
    let fixed = param.get("value").filter(|v| !matches!(v, Value::Null));
    let range = param
        .get("range")
        .filter(|v| !matches!(v, Value::Null))
        .filter(|v| v.entries().map_or(true, |entries| !entries.is_empty()));

    run(&of_type_not_empty("container"), value, registry).map_err(|e| {
        e.wrap(format!(
            "Schema {} require the checking value to be a container and not empty",
            rule
        ))
    })?;

    let tag = match tag_value.as_str() {
        Some(s) => s.to_string(),
        None => tag_value.to_string(),
    };
    let type_schema = Value::Container(vec![(Key::name("type"), tag_value.clone())]);
    // Range applies only to integer leaves and is disabled by a fixed value.
    let range_schema = match range {
        Some(r) if tag == "integer" && fixed.is_none() => {
            Some(Value::Container(vec![(Key::name("range"), r.clone())]))
        }
        _ => None,
    };

    let checks = LeafChecks {
        fixed,
        type_schema: &type_schema,
        range_schema: range_schema.as_ref(),
        tag: tag.as_str(),
        field,
        field_optional,
    };
    let entries = value.entries().unwrap_or_default();
    walk(entries, &checks, registry, 0)
}

/// One level of the descent. The field-presence requirement is evaluated
/// independently at every level: each nested container must satisfy it on
/// its own, not merely somewhere in the tree.
fn walk(
    level: &[(Key, Value)],
    checks: &LeafChecks<'_>,
    registry: &PredicateRegistry,
    depth: usize,
) -> Result<(), ValidationError> {
    if depth >= MAX_NESTING_DEPTH {
        return Err(ValidationError::new(
            ErrorKind::DepthExceeded,
            format!("Container nesting depth exceeds limit: {}", MAX_NESTING_DEPTH),
        ));
    }
    let mut field_satisfied = checks.field.is_empty() || checks.field_optional;
    for (key, entry) in level {
        if let Some(children) = entry.entries() {
            walk(children, checks, registry, depth + 1)?;
            continue;
        }
        if !checks.field.is_empty() && !key.is(checks.field) {
            continue;
        }
        field_satisfied = true;
        if let Some(fixed) = checks.fixed {
            if entry != fixed {
                return Err(ValidationError::new(
                    ErrorKind::FixedValueMismatch,
                    format!(
                        "Schema rule value check failed, checking value: {} not equal to rule value: {}",
                        entry, fixed
                    ),
                ));
            }
            continue;
        }
        run(checks.type_schema, entry, registry).map_err(|e| {
            e.wrap(format!(
                "The checking container has one value not the type: {}",
                checks.tag
            ))
        })?;
        if let Some(range_schema) = checks.range_schema {
            run(range_schema, entry, registry)
                .map_err(|e| e.wrap("Schema rule range check failed"))?;
        }
    }
    if !field_satisfied {
        return Err(ValidationError::new(
            ErrorKind::ContainerFieldMissing,
            format!(
                "The checking container is missing required key: {}",
                checks.field
            ),
        ));
    }
    Ok(())
}

// Schema construction

use crate::engine;
use crate::errors::ValidationError;
use crate::predicate::PredicateRegistry;
use crate::value::{Key, Value};

/// The closed rule vocabulary, in dispatch order of documentation.
pub const RULE_NAMES: [&'static str; 10] = [
    "type",
    "empty",
    "range",
    "in",
    "strlen",
    "pattern",
    "array",
    "array_field",
    "array_optional_field",
    "predicate",
];

/// Fluent builder for ordered rule sets.
///
/// A schema is an ordered container of `(rule-name, parameter)` entries;
/// order matters because validation is fail-fast and the first failing rule
/// determines the reported message.
///
/// # Examples
///
/// ```
/// use conform::{Schema, Value};
/// use serde_json::json;
///
/// let schema = Schema::new()
///     .rule("type", "string")
///     .rule("strlen", Value::from(json!({ "min": 3, "max": 6 })));
///
/// assert!(schema.validate(&Value::from("hello")).is_ok());
/// assert!(schema.validate(&Value::from("hi")).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Schema {
    entries: Vec<(String, Value)>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule. Duplicate names are kept as-is; the dispatcher
    /// evaluates every entry in order.
    pub fn rule(mut self, name: impl Into<String>, param: impl Into<Value>) -> Self {
        self.entries.push((name.into(), param.into()));
        self
    }

    /// Validate a value using the global predicate registry.
    pub fn validate(&self, value: &Value) -> Result<(), ValidationError> {
        engine::validate(&self.to_value(), value)
    }

    /// Validate a value against a specific predicate registry.
    pub fn validate_with(
        &self,
        value: &Value,
        registry: &PredicateRegistry,
    ) -> Result<(), ValidationError> {
        engine::validate_with(&self.to_value(), value, registry)
    }

    pub fn to_value(&self) -> Value {
        Value::Container(
            self.entries
                .iter()
                .map(|(name, param)| (Key::name(name.clone()), param.clone()))
                .collect(),
        )
    }
}

impl From<Schema> for Value {
    fn from(schema: Schema) -> Self {
        Value::Container(
            schema
                .entries
                .into_iter()
                .map(|(name, param)| (Key::Name(name), param))
                .collect(),
        )
    }
}

/// Sub-schema `{type: T}` used by handlers self-validating their inputs.
pub(crate) fn of_type(tag: &str) -> Value {
    Value::Container(vec![(Key::name("type"), Value::from(tag))])
}

/// Sub-schema `{type: T, empty: false}`.
pub(crate) fn of_type_not_empty(tag: &str) -> Value {
    Value::Container(vec![
        (Key::name("type"), Value::from(tag)),
        (Key::name("empty"), Value::Bool(false)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_preserves_rule_order() {
        let schema = Schema::new()
            .rule("type", "integer")
            .rule("range", Value::from(json!({ "min": 1, "max": 10 })));
        let value = schema.to_value();
        let entries = value.entries().unwrap();
        assert_eq!(entries[0].0, Key::name("type"));
        assert_eq!(entries[1].0, Key::name("range"));
    }

    #[test]
    fn test_builder_validates() {
        let schema = Schema::new().rule("type", "integer");
        assert!(schema.validate(&Value::Int(123)).is_ok());
        assert!(schema.validate(&Value::from("123")).is_err());
    }
}

//! Declarative schema validation for loosely-typed values.
//!
//! A schema is an ordered set of named rules; a [`Value`] is an arbitrary
//! loosely-typed datum (scalar or nested hybrid list/record container), e.g.
//! deserialized request parameters. [`validate`] decides whether the value
//! conforms, failing fast with a single explanatory message on the first
//! rule that rejects it.
//!
//! Rules are meta-circular: handlers validate their own parameters by
//! re-entering the dispatcher, so a malformed rule parameter is reported
//! with the same message vocabulary as any value failure, prefixed with the
//! enclosing rule's context.
//!
//! # Examples
//!
//! ## Scalar rules
//!
//! ```
//! use conform::{validate, Value};
//! use serde_json::json;
//!
//! let schema = Value::from(json!({ "type": "integer" }));
//! assert!(validate(&schema, &Value::from(123)).is_ok());
//!
//! let schema = Value::from(json!({ "range": { "min": 1, "max": 10 } }));
//! let err = validate(&schema, &Value::from(20)).unwrap_err();
//! assert_eq!(err.to_string(), "Value: 20 not in [1, 10]");
//!
//! // Membership is strict: no coercion across type tags.
//! let schema = Value::from(json!({ "in": [123, "abc", null] }));
//! assert!(validate(&schema, &Value::from("123")).is_err());
//! ```
//!
//! ## Container rules
//!
//! ```
//! use conform::{validate, Value};
//! use serde_json::json;
//!
//! let schema = Value::from(json!({
//!     "array": { "type": "integer", "range": { "min": 1, "max": 16 } }
//! }));
//! let nested = Value::from(json!([1, 2, 3, [4, 5, 6]]));
//! assert!(validate(&schema, &nested).is_ok());
//! ```
//!
//! ## Named predicates
//!
//! ```
//! use conform::{validate_with, Predicate, PredicateRegistry, Value};
//! use serde_json::json;
//!
//! let registry = PredicateRegistry::new();
//! registry.register("over_100", Predicate::new(|value, out| {
//!     match value.as_i64() {
//!         Some(n) if n >= 100 => true,
//!         _ => {
//!             out.push_str("Value must be larger than 100.");
//!             false
//!         }
//!     }
//! }));
//!
//! let schema = Value::from(json!({ "predicate": "over_100" }));
//! assert!(validate_with(&schema, &Value::from(123), &registry).is_ok());
//! ```

mod engine;
mod errors;
mod predicate;
mod rules;
mod schema;
mod value;
mod walker;

pub use engine::{validate, validate_with};
pub use errors::{ErrorKind, ValidationError};
pub use predicate::{Predicate, PredicateRegistry};
pub use schema::{Schema, RULE_NAMES};
pub use value::{Key, Kind, Value};
pub use walker::MAX_NESTING_DEPTH;

// Loosely-typed values and their runtime kinds

use std::fmt;

/// Key of a container entry.
///
/// Containers are hybrid list/records: entries are keyed either by a
/// sequential index or by a field name. Comparison against a field name is
/// strict — an index key never equals a name, even if it renders the same.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Index(usize),
    Name(String),
}

impl Key {
    pub fn name(name: impl Into<String>) -> Self {
        Key::Name(name.into())
    }

    /// Strict match against a field name.
    pub fn is(&self, field: &str) -> bool {
        matches!(self, Key::Name(name) if name == field)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(i) => write!(f, "{}", i),
            Key::Name(name) => write!(f, "{}", name),
        }
    }
}

impl From<usize> for Key {
    fn from(index: usize) -> Self {
        Key::Index(index)
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::Name(name.to_string())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::Name(name)
    }
}

/// Runtime kind of a [`Value`], the closed type-tag vocabulary schemas
/// refer to in `type` rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Boolean,
    Integer,
    Float,
    String,
    Container,
    Object,
    Handle,
    Null,
}

impl Kind {
    /// The closed tag vocabulary, in canonical order.
    pub const NAMES: [&'static str; 8] = [
        "boolean",
        "integer",
        "float",
        "string",
        "container",
        "structured-object",
        "opaque-handle",
        "null",
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Kind::Boolean => "boolean",
            Kind::Integer => "integer",
            Kind::Float => "float",
            Kind::String => "string",
            Kind::Container => "container",
            Kind::Object => "structured-object",
            Kind::Handle => "opaque-handle",
            Kind::Null => "null",
        }
    }

    pub fn from_name(name: &str) -> Option<Kind> {
        match name {
            "boolean" => Some(Kind::Boolean),
            "integer" => Some(Kind::Integer),
            "float" => Some(Kind::Float),
            "string" => Some(Kind::String),
            "container" => Some(Kind::Container),
            "structured-object" => Some(Kind::Object),
            "opaque-handle" => Some(Kind::Handle),
            "null" => Some(Kind::Null),
            _ => None,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A value under validation: scalar, or an ordered hybrid container.
///
/// Equality is strict: two values are equal only when both the kind and the
/// payload match. `Int(1)` never equals `Float(1.0)` and `Str("1")` never
/// equals `Int(1)` — there is no coercion anywhere in the engine.
///
/// `Object` and `Handle` stand in for runtime-only artifacts (a structured
/// object, an opaque resource handle) that have no direct data equivalent;
/// they are kept in the vocabulary for schema compatibility.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Container(Vec<(Key, Value)>),
    Object(String),
    Handle(u64),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Null => Kind::Null,
            Value::Bool(_) => Kind::Boolean,
            Value::Int(_) => Kind::Integer,
            Value::Float(_) => Kind::Float,
            Value::Str(_) => Kind::String,
            Value::Container(_) => Kind::Container,
            Value::Object(_) => Kind::Object,
            Value::Handle(_) => Kind::Handle,
        }
    }

    /// Conventional emptiness: null, `false`, zero, the empty string and
    /// the empty container are empty; everything else is not.
    pub fn is_falsy(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Bool(b) => !b,
            Value::Int(n) => *n == 0,
            Value::Float(f) => *f == 0.0,
            Value::Str(s) => s.is_empty(),
            Value::Container(entries) => entries.is_empty(),
            Value::Object(_) | Value::Handle(_) => false,
        }
    }

    /// Container entries, in insertion order.
    pub fn entries(&self) -> Option<&[(Key, Value)]> {
        match self {
            Value::Container(entries) => Some(entries),
            _ => None,
        }
    }

    /// First container entry whose key is the given field name.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.entries()?
            .iter()
            .find(|(key, _)| key.is(field))
            .map(|(_, value)| value)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

/// Canonical textual encoding, used for error messages only (never for
/// comparison): JSON for data values, placeholder forms for the
/// runtime-only kinds.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Object(label) => write!(f, "<structured-object:{}>", label),
            Value::Handle(id) => write!(f, "<opaque-handle:{}>", id),
            other => f.write_str(&serde_json::Value::from(other).to_string()),
        }
    }
}

impl From<&Value> for serde_json::Value {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(n) => serde_json::Value::from(*n),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Str(s) => serde_json::Value::String(s.clone()),
            Value::Container(entries) => {
                let all_indexed = entries.iter().all(|(key, _)| matches!(key, Key::Index(_)));
                if all_indexed {
                    serde_json::Value::Array(
                        entries.iter().map(|(_, v)| serde_json::Value::from(v)).collect(),
                    )
                } else {
                    serde_json::Value::Object(
                        entries
                            .iter()
                            .map(|(k, v)| (k.to_string(), serde_json::Value::from(v)))
                            .collect(),
                    )
                }
            }
            Value::Object(label) => {
                serde_json::Value::String(format!("<structured-object:{}>", label))
            }
            Value::Handle(id) => serde_json::Value::String(format!("<opaque-handle:{}>", id)),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => Value::Container(
                items
                    .into_iter()
                    .enumerate()
                    .map(|(i, v)| (Key::Index(i), Value::from(v)))
                    .collect(),
            ),
            serde_json::Value::Object(map) => Value::Container(
                map.into_iter()
                    .map(|(k, v)| (Key::Name(k), Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Container(
            items
                .into_iter()
                .enumerate()
                .map(|(i, v)| (Key::Index(i), v))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_names_round_trip() {
        for name in Kind::NAMES {
            let kind = Kind::from_name(name).unwrap();
            assert_eq!(kind.name(), name);
        }
        assert!(Kind::from_name("double").is_none());
    }

    #[test]
    fn test_strict_equality_never_coerces() {
        assert_ne!(Value::Int(123), Value::Str("123".into()));
        assert_ne!(Value::Int(1), Value::Float(1.0));
        assert_ne!(Value::Bool(false), Value::Int(0));
        assert_ne!(Value::Null, Value::Bool(false));
        assert_eq!(Value::Int(123), Value::Int(123));
    }

    #[test]
    fn test_falsy_values() {
        assert!(Value::Null.is_falsy());
        assert!(Value::Bool(false).is_falsy());
        assert!(Value::Int(0).is_falsy());
        assert!(Value::Float(0.0).is_falsy());
        assert!(Value::Str(String::new()).is_falsy());
        assert!(Value::Container(vec![]).is_falsy());

        assert!(!Value::Bool(true).is_falsy());
        assert!(!Value::Int(-1).is_falsy());
        assert!(!Value::Str("0".into()).is_falsy());
        assert!(!Value::Object("stdClass".into()).is_falsy());
        assert!(!Value::Handle(3).is_falsy());
    }

    #[test]
    fn test_from_json_preserves_order_and_number_kinds() {
        let value = Value::from(json!({ "b": 1, "a": 2.5, "c": [true, null] }));
        let entries = value.entries().unwrap();
        assert_eq!(entries[0].0, Key::name("b"));
        assert_eq!(entries[0].1, Value::Int(1));
        assert_eq!(entries[1].1, Value::Float(2.5));
        assert_eq!(
            entries[2].1,
            Value::Container(vec![
                (Key::Index(0), Value::Bool(true)),
                (Key::Index(1), Value::Null),
            ])
        );
    }

    #[test]
    fn test_canonical_rendering() {
        assert_eq!(Value::Str("123".into()).to_string(), "\"123\"");
        assert_eq!(Value::Int(123).to_string(), "123");
        assert_eq!(Value::Bool(false).to_string(), "false");
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::from(json!([1, "a"])).to_string(), "[1,\"a\"]");
        assert_eq!(Value::from(json!({ "k": 1 })).to_string(), "{\"k\":1}");
        assert_eq!(Value::Handle(7).to_string(), "<opaque-handle:7>");
    }

    #[test]
    fn test_get_is_strict_about_key_kind() {
        let value = Value::Container(vec![
            (Key::Index(0), Value::Int(1)),
            (Key::name("0"), Value::Int(2)),
        ]);
        // Index 0 renders as "0" but is not the field "0".
        assert_eq!(value.get("0"), Some(&Value::Int(2)));
    }
}

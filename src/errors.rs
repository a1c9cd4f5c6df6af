// Validation errors

use serde::Serialize;
use thiserror::Error;

/// Discriminates what went wrong during validation.
///
/// `SchemaMalformed` covers every defect in the schema itself (wrong shape,
/// unknown rule, bad rule parameter); the remaining variants describe the
/// value under validation failing a specific rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    SchemaMalformed,
    TypeMismatch,
    EmptinessMismatch,
    RangeViolation,
    MembershipViolation,
    LengthViolation,
    PatternInvalid,
    PatternMismatch,
    ContainerFieldMissing,
    FixedValueMismatch,
    DepthExceeded,
    PredicateNotFound,
    PredicateSignatureMismatch,
    PredicateReturnTypeInvalid,
    PredicateRejected,
}

impl ErrorKind {
    /// Stable snake_case name, matching the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::SchemaMalformed => "schema_malformed",
            ErrorKind::TypeMismatch => "type_mismatch",
            ErrorKind::EmptinessMismatch => "emptiness_mismatch",
            ErrorKind::RangeViolation => "range_violation",
            ErrorKind::MembershipViolation => "membership_violation",
            ErrorKind::LengthViolation => "length_violation",
            ErrorKind::PatternInvalid => "pattern_invalid",
            ErrorKind::PatternMismatch => "pattern_mismatch",
            ErrorKind::ContainerFieldMissing => "container_field_missing",
            ErrorKind::FixedValueMismatch => "fixed_value_mismatch",
            ErrorKind::DepthExceeded => "depth_exceeded",
            ErrorKind::PredicateNotFound => "predicate_not_found",
            ErrorKind::PredicateSignatureMismatch => "predicate_signature_mismatch",
            ErrorKind::PredicateReturnTypeInvalid => "predicate_return_type_invalid",
            ErrorKind::PredicateRejected => "predicate_rejected",
        }
    }
}

/// A single validation failure.
///
/// Validation is fail-fast: the first failing rule produces exactly one
/// error and no further rules are evaluated. Failures detected inside a
/// nested self-validation keep their root-cause message and gain a short
/// contextual prefix per enclosing rule, forming a breadcrumb trail.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[error("{message}")]
pub struct ValidationError {
    kind: ErrorKind,
    message: String,
}

impl ValidationError {
    pub(crate) fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// The failure category.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The full human-readable message, breadcrumb prefixes included.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Prefix the message with enclosing-rule context, keeping the kind.
    pub(crate) fn wrap(mut self, prefix: impl AsRef<str>) -> Self {
        self.message = format!("{}: {}", prefix.as_ref(), self.message);
        self
    }

    /// Prefix the message and re-tag the kind. Used when a rule-parameter
    /// self-validation failure surfaces as a schema defect.
    pub(crate) fn wrap_as(mut self, kind: ErrorKind, prefix: impl AsRef<str>) -> Self {
        self.kind = kind;
        self.wrap(prefix)
    }

    /// JSON representation of the error.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "kind": self.kind.as_str(),
            "message": self.message,
        })
    }
}

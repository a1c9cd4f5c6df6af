// Named predicates and their registry

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use once_cell::sync::Lazy;

use crate::engine::run;
use crate::errors::{ErrorKind, ValidationError};
use crate::schema::{of_type, of_type_not_empty};
use crate::value::Value;

type PredicateFn = Arc<dyn Fn(&Value, &mut String) -> Value + Send + Sync>;

/// A named external check: a callable taking the value under validation and
/// an output slot for the failure message, returning a boolean verdict.
///
/// The contract is declared at registration and checked before invocation:
/// an entry registered via [`Predicate::without_out_message`] is rejected
/// with `PredicateSignatureMismatch` without ever being called.
#[derive(Clone)]
pub struct Predicate {
    func: PredicateFn,
    takes_out_message: bool,
}

impl Predicate {
    /// A conforming predicate: `(value, out_message) -> bool`.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Value, &mut String) -> bool + Send + Sync + 'static,
    {
        Self {
            func: Arc::new(move |value, out| Value::Bool(f(value, out))),
            takes_out_message: true,
        }
    }

    /// A bridged predicate whose verdict arrives as a loosely-typed
    /// [`Value`]. The returned value is self-checked as boolean at call
    /// time; anything else fails with `PredicateReturnTypeInvalid`.
    pub fn raw<F>(f: F) -> Self
    where
        F: Fn(&Value, &mut String) -> Value + Send + Sync + 'static,
    {
        Self {
            func: Arc::new(f),
            takes_out_message: true,
        }
    }

    /// Declare that this predicate's second parameter is not an output
    /// channel. Such entries fail `PredicateSignatureMismatch` at dispatch.
    pub fn without_out_message(mut self) -> Self {
        self.takes_out_message = false;
        self
    }

    /// Whether the declared contract matches
    /// `(value, out_message) -> boolean`.
    pub fn takes_out_message(&self) -> bool {
        self.takes_out_message
    }

    fn call(&self, value: &Value, out: &mut String) -> Value {
        (self.func)(value, out)
    }
}

static GLOBAL: Lazy<PredicateRegistry> = Lazy::new(PredicateRegistry::new);

/// Read-mostly mapping from predicate name to [`Predicate`].
///
/// A process-wide instance is available via [`PredicateRegistry::global`];
/// local instances can be built for tests or injected via
/// [`validate_with`](crate::validate_with). Populate before concurrent
/// validation and treat as read-only thereafter.
pub struct PredicateRegistry {
    entries: RwLock<HashMap<String, Predicate>>,
}

impl PredicateRegistry {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// The process-wide registry used by [`validate`](crate::validate).
    pub fn global() -> &'static PredicateRegistry {
        &GLOBAL
    }

    pub fn register(&self, name: impl Into<String>, predicate: Predicate) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.into(), predicate);
    }

    pub fn lookup(&self, name: &str) -> Option<Predicate> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }
}

impl Default for PredicateRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// `predicate`: invoke a registered named predicate against the value.
pub(crate) fn check_predicate(
    param: &Value,
    value: &Value,
    registry: &PredicateRegistry,
) -> Result<(), ValidationError> {
    run(&of_type_not_empty("string"), param, registry).map_err(|e| {
        e.wrap_as(
            ErrorKind::SchemaMalformed,
            "Predicate name must be a string and not empty",
        )
    })?;
    let name = param.as_str().unwrap_or_default();
    let Some(predicate) = registry.lookup(name) else {
        return Err(ValidationError::new(
            ErrorKind::PredicateNotFound,
            format!("Predicate: {} is not registered", name),
        ));
    };
    if !predicate.takes_out_message() {
        return Err(ValidationError::new(
            ErrorKind::PredicateSignatureMismatch,
            "Predicate must conform to: predicate(value, out_message) -> boolean",
        ));
    }
    let mut out = String::new();
    let verdict = predicate.call(value, &mut out);
    run(&of_type("boolean"), &verdict, registry).map_err(|e| {
        e.wrap_as(
            ErrorKind::PredicateReturnTypeInvalid,
            "Predicate return value type must be boolean",
        )
    })?;
    if matches!(verdict, Value::Bool(true)) {
        return Ok(());
    }
    let message = if out.is_empty() {
        format!("Predicate: {} rejected the value", name)
    } else {
        out
    };
    Err(ValidationError::new(ErrorKind::PredicateRejected, message))
}

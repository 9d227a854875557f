//! Validation error types.
//!
//! This module provides [`ValidationError`] for single validation failures,
//! [`Local`] for the details attached to each failure, and
//! [`ValidationErrors`] for accumulating multiple errors.

use std::fmt::{self, Display};

use indexmap::IndexMap;
use serde_json::{Map, Value};
use stillwater::prelude::*;

use crate::messages;
use crate::validation::Context;

/// The details attached to a validation error.
///
/// `Local` always carries the label that was in effect when the error was
/// produced. The alternatives combinator may attach `attempts`, the flat list
/// of errors reported by its candidates. Every other detail (`limit`,
/// `values`, `factor`, ...) lives in an open, insertion-ordered field map
/// owned by whichever schema produced the error.
///
/// # Example
///
/// ```rust
/// use schemata::Local;
/// use serde_json::json;
///
/// let local = Local::new("age").with("limit", 18);
///
/// assert_eq!(local.label(), "age");
/// assert_eq!(local.get("limit"), Some(&json!(18)));
/// assert_eq!(local.to_json(), json!({ "limit": 18, "label": "age" }));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Local {
    label: String,
    attempts: Option<Vec<ValidationError>>,
    fields: IndexMap<String, Value>,
}

impl Local {
    /// Creates a local bag holding only a label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            attempts: None,
            fields: IndexMap::new(),
        }
    }

    /// Creates a local bag holding the effective label of `context`.
    pub fn from_context(context: &Context) -> Self {
        Self::new(context.label())
    }

    /// Adds a field and returns self for chaining.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Attaches candidate errors and returns self for chaining.
    pub fn with_attempts(mut self, attempts: Vec<ValidationError>) -> Self {
        self.attempts = Some(attempts);
        self
    }

    /// Returns the label in effect when the error was produced.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the candidate errors, if any were attached.
    pub fn attempts(&self) -> Option<&[ValidationError]> {
        self.attempts.as_deref()
    }

    /// Returns a schema-specific field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Returns an iterator over the schema-specific fields in insertion order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Converts the bag into a JSON object.
    ///
    /// Fields come first, then `attempts` (when present), then `label`.
    pub fn to_json(&self) -> Value {
        let mut map: Map<String, Value> = self
            .fields
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        if let Some(attempts) = &self.attempts {
            map.insert(
                "attempts".to_string(),
                Value::Array(attempts.iter().map(ValidationError::to_json).collect()),
            );
        }
        map.insert("label".to_string(), Value::String(self.label.clone()));

        Value::Object(map)
    }
}

/// A single validation error.
///
/// `ValidationError` captures everything a caller needs about a failure:
/// - **code**: Machine-readable error code (e.g. `alternatives.any`)
/// - **message**: Human-readable message rendered from the code and `local`
/// - **local**: The label plus any code-specific details
///
/// # Example
///
/// ```rust
/// use schemata::{Local, ValidationError};
///
/// let error = ValidationError::new("number.min", Local::new("age").with("limit", 18));
///
/// assert_eq!(error.code, "number.min");
/// assert_eq!(error.message, "age must be greater than or equal to 18");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Machine-readable error code.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Label and code-specific details.
    pub local: Local,
}

impl ValidationError {
    /// Creates an error, rendering its message from `code` and `local`.
    pub fn new(code: impl Into<String>, local: Local) -> Self {
        let code = code.into();
        let message = messages::render(&code, &local);
        Self {
            code,
            message,
            local,
        }
    }

    /// Replaces the rendered message and returns self for chaining.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Converts the error into a `{ code, message, local }` JSON object.
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert("code".to_string(), Value::String(self.code.clone()));
        map.insert("message".to_string(), Value::String(self.message.clone()));
        map.insert("local".to_string(), self.local.to_json());
        Value::Object(map)
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.code)
    }
}

impl std::error::Error for ValidationError {}

// Schemas are validated concurrently, so their errors must cross threads.
const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ValidationError>();
    assert_sync::<ValidationError>();
};

/// A non-empty collection of validation errors.
///
/// `ValidationErrors` wraps a `NonEmptyVec<ValidationError>` so that a
/// failed `Validation` always reports at least one error.
///
/// # Combining Errors
///
/// `ValidationErrors` implements `Semigroup`, which is how a schema running
/// with abort-early disabled accumulates its constraint failures:
///
/// ```rust
/// use schemata::{Local, ValidationError, ValidationErrors};
/// use stillwater::prelude::*;
///
/// let errors1 = ValidationErrors::single(ValidationError::new("number.min", Local::new("n").with("limit", 2)));
/// let errors2 = ValidationErrors::single(ValidationError::new("number.multiple", Local::new("n").with("factor", 2)));
///
/// let combined = errors1.combine(errors2);
/// assert_eq!(combined.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationErrors(NonEmptyVec<ValidationError>);

impl ValidationErrors {
    /// Creates a `ValidationErrors` containing a single error.
    pub fn single(error: ValidationError) -> Self {
        Self(NonEmptyVec::singleton(error))
    }

    /// Creates a `ValidationErrors` from a `NonEmptyVec` of errors.
    pub fn from_non_empty(errors: NonEmptyVec<ValidationError>) -> Self {
        Self(errors)
    }

    /// Creates a `ValidationErrors` from a `Vec`, or `None` if it is empty.
    pub fn from_vec(errors: Vec<ValidationError>) -> Option<Self> {
        NonEmptyVec::from_vec(errors).map(Self)
    }

    /// Returns the number of errors in this collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns false since this collection is guaranteed non-empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns an iterator over the contained errors.
    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// Returns all errors with the specified error code.
    pub fn with_code(&self, code: &str) -> Vec<&ValidationError> {
        self.0.iter().filter(|e| e.code == code).collect()
    }

    /// Returns the first error in the collection.
    pub fn first(&self) -> &ValidationError {
        self.0.head()
    }

    /// Converts this collection into a `Vec<ValidationError>`.
    pub fn into_vec(self) -> Vec<ValidationError> {
        self.0.into_vec()
    }

    /// Returns a reference to the underlying `NonEmptyVec`.
    pub fn as_non_empty_vec(&self) -> &NonEmptyVec<ValidationError> {
        &self.0
    }

    /// Converts every error into JSON, preserving order.
    pub fn to_json(&self) -> Value {
        Value::Array(self.iter().map(ValidationError::to_json).collect())
    }
}

impl Semigroup for ValidationErrors {
    fn combine(self, other: Self) -> Self {
        ValidationErrors(self.0.combine(other.0))
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Validation failed with {} error(s):", self.len())?;
        for (i, error) in self.iter().enumerate() {
            writeln!(f, "  {}. {}", i + 1, error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_vec().into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = Box<dyn Iterator<Item = &'a ValidationError> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.0.iter())
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<ValidationErrors>();
    assert_sync::<ValidationErrors>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn error(code: &str) -> ValidationError {
        ValidationError::new(code, Local::new("unknown"))
    }

    #[test]
    fn test_error_renders_message_from_code() {
        let error = ValidationError::new("alternatives.all", Local::new("A"));
        assert_eq!(error.code, "alternatives.all");
        assert_eq!(error.message, "A must match all of the provided schemas");
        assert_eq!(error.local.label(), "A");
        assert!(error.local.attempts().is_none());
    }

    #[test]
    fn test_error_custom_message() {
        let error = error("string.base").with_message("needs text");
        assert_eq!(error.message, "needs text");
        assert_eq!(error.code, "string.base");
    }

    #[test]
    fn test_error_display() {
        let display = error("number.base").to_string();
        assert!(display.contains("unknown must be a number"));
        assert!(display.contains("(number.base)"));
    }

    #[test]
    fn test_local_fields_keep_insertion_order() {
        let local = Local::new("x").with("b", 1).with("a", 2);
        let keys: Vec<_> = local.fields().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn test_local_from_context() {
        let context = Context::new().with_label("port");
        assert_eq!(Local::from_context(&context).label(), "port");
    }

    #[test]
    fn test_error_to_json_nests_attempts() {
        let attempt = ValidationError::new("any.only", Local::new("unknown").with("values", json!(["x"])));
        let error = ValidationError::new(
            "alternatives.any",
            Local::new("unknown").with_attempts(vec![attempt]),
        );

        assert_eq!(
            error.to_json(),
            json!({
                "code": "alternatives.any",
                "message": "unknown must match at least one of the provided schemas",
                "local": {
                    "attempts": [{
                        "code": "any.only",
                        "message": "unknown must be x",
                        "local": { "values": ["x"], "label": "unknown" },
                    }],
                    "label": "unknown",
                },
            })
        );
    }

    #[test]
    fn test_errors_single() {
        let errors = ValidationErrors::single(error("string.base"));
        assert_eq!(errors.len(), 1);
        assert!(!errors.is_empty());
        assert_eq!(errors.first().code, "string.base");
    }

    #[test]
    fn test_errors_from_empty_vec_is_none() {
        assert!(ValidationErrors::from_vec(Vec::new()).is_none());
        assert_eq!(
            ValidationErrors::from_vec(vec![error("a"), error("b")])
                .map(|e| e.len()),
            Some(2)
        );
    }

    #[test]
    fn test_errors_combine_preserves_order() {
        let combined = ValidationErrors::single(error("first"))
            .combine(ValidationErrors::single(error("second")))
            .combine(ValidationErrors::single(error("third")));

        let codes: Vec<_> = combined.iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_errors_with_code() {
        let errors = ValidationErrors::single(error("number.min"))
            .combine(ValidationErrors::single(error("number.multiple")))
            .combine(ValidationErrors::single(error("number.min")));

        assert_eq!(errors.with_code("number.min").len(), 2);
        assert_eq!(errors.with_code("number.multiple").len(), 1);
        assert!(errors.with_code("string.base").is_empty());
    }

    #[test]
    fn test_errors_into_iter() {
        let errors = ValidationErrors::single(error("a")).combine(ValidationErrors::single(error("b")));
        let collected: Vec<ValidationError> = errors.into_iter().collect();
        assert_eq!(collected.len(), 2);
    }

    #[test]
    fn test_errors_display() {
        let errors = ValidationErrors::single(error("string.base"))
            .combine(ValidationErrors::single(error("number.base")));
        let display = errors.to_string();

        assert!(display.contains("2 error(s)"));
        assert!(display.contains("1. unknown must be a string"));
        assert!(display.contains("2. unknown must be a number"));
    }

    #[test]
    fn test_semigroup_associativity() {
        let e1 = ValidationErrors::single(error("1"));
        let e2 = ValidationErrors::single(error("2"));
        let e3 = ValidationErrors::single(error("3"));

        let left = e1.clone().combine(e2.clone()).combine(e3.clone());
        let right = e1.combine(e2.combine(e3));

        assert_eq!(left, right);
    }
}

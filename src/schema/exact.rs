//! Exact-match schema validation.
//!
//! This module provides [`ExactSchema`], which accepts only values equal to
//! one of a fixed, ordered set of literals. It is what raw literals compile
//! to.

use serde_json::Value;
use stillwater::Validation;

use crate::error::{Local, ValidationError, ValidationErrors};
use crate::messages::codes;
use crate::schema::traits::SchemaLike;
use crate::validation::{Context, Settings};
use crate::ValidationResult;

/// A schema accepting only a fixed set of literal values.
///
/// Equality is strict: types must agree, except that numbers compare by
/// numeric value (`1` equals `1.0`). Failure yields `any.only` with
/// `local.values` listing the allowed literals.
///
/// # Example
///
/// ```rust
/// use schemata::{Context, Schema};
/// use serde_json::json;
///
/// let schema = Schema::only(vec![json!("red"), json!("blue")]);
///
/// assert!(schema.validate(&json!("red"), &Context::default()).is_success());
///
/// let errors = schema.validate(&json!("green"), &Context::default()).into_result().unwrap_err();
/// assert_eq!(errors.first().code, "any.only");
/// assert_eq!(errors.first().message, "unknown must be one of red, blue");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ExactSchema {
    values: Vec<Value>,
    settings: Settings,
}

impl ExactSchema {
    /// Creates a schema accepting exactly the given values.
    ///
    /// Duplicates are dropped; the first occurrence keeps its position.
    pub fn new(values: Vec<Value>) -> Self {
        values.into_iter().fold(Self::default(), |schema, value| schema.allow(value))
    }

    /// Adds another accepted value. Duplicates are ignored.
    pub fn allow(mut self, value: impl Into<Value>) -> Self {
        let value = value.into();
        if !self.values.iter().any(|v| strictly_equal(v, &value)) {
            self.values.push(value);
        }
        self
    }

    /// Sets an explicit label for this schema.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.settings.label = Some(label.into());
        self
    }

    /// Returns the accepted values in order.
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Validates a value against this schema.
    ///
    /// On success the input is returned unchanged.
    pub fn validate(&self, value: &Value, context: &Context) -> ValidationResult<Value> {
        if self.values.iter().any(|v| strictly_equal(v, value)) {
            return Validation::Success(value.clone());
        }

        let context = context.derive(&self.settings);
        let local = Local::from_context(&context).with("values", Value::Array(self.values.clone()));
        Validation::Failure(ValidationErrors::single(ValidationError::new(
            codes::ANY_ONLY,
            local,
        )))
    }
}

impl SchemaLike for ExactSchema {
    type Output = Value;

    fn validate(&self, value: &Value, context: &Context) -> ValidationResult<Value> {
        self.validate(value, context)
    }

    fn validate_to_value(&self, value: &Value, context: &Context) -> ValidationResult<Value> {
        self.validate(value, context)
    }
}

/// Type-strict equality with numbers compared by value.
fn strictly_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            if x.is_f64() || y.is_f64() {
                x.as_f64() == y.as_f64()
            } else {
                x == y
            }
        }
        _ => a == b,
    }
}

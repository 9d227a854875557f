//! Traits for schema polymorphism.
//!
//! This module provides the [`SchemaLike`] trait implemented by every schema
//! type, and the type-erased [`ValueValidator`] that lets schemas with
//! different output types sit side by side as alternatives candidates.

use serde_json::Value;

use crate::validation::Context;
use crate::ValidationResult;

/// A trait for schema types that can validate JSON values.
///
/// A schema receives the caller's [`Context`] and derives its own child
/// context from it when it carries settings of its own; it never mutates the
/// caller's context. The `Send + Sync` bounds allow one schema to be
/// validated from many threads at once.
///
/// Any type implementing `SchemaLike` can be used as an alternatives
/// candidate, including schemas defined outside this crate, by wrapping it
/// with [`Definition::leaf`](crate::Definition::leaf).
///
/// # Example
///
/// ```rust
/// use schemata::{Context, Definition, Local, SchemaLike, ValidationError, ValidationErrors, ValidationResult};
/// use serde_json::Value;
/// use stillwater::Validation;
///
/// struct Even;
///
/// impl SchemaLike for Even {
///     type Output = i64;
///
///     fn validate(&self, value: &Value, context: &Context) -> ValidationResult<i64> {
///         match value.as_i64() {
///             Some(n) if n % 2 == 0 => Validation::Success(n),
///             _ => Validation::Failure(ValidationErrors::single(
///                 ValidationError::new("even.base", Local::from_context(context)),
///             )),
///         }
///     }
///
///     fn validate_to_value(&self, value: &Value, context: &Context) -> ValidationResult<Value> {
///         self.validate(value, context).map(Value::from)
///     }
/// }
///
/// let schema = schemata::alternatives![Definition::leaf(Even), "odd"];
/// assert!(schema.validate(&serde_json::json!(4), &Context::default()).is_success());
/// ```
pub trait SchemaLike: Send + Sync {
    /// The output type produced by successful validation.
    type Output;

    /// Validates a value against this schema.
    ///
    /// Returns `Validation::Success` with the (possibly converted) value, or
    /// `Validation::Failure` with the errors found.
    fn validate(&self, value: &Value, context: &Context) -> ValidationResult<Self::Output>;

    /// Validates a value and returns the result as a `serde_json::Value`.
    fn validate_to_value(&self, value: &Value, context: &Context) -> ValidationResult<Value>;
}

/// A type-erased trait for schemas that validate to JSON values.
///
/// Any type that implements `SchemaLike` automatically implements
/// `ValueValidator`, which is what the alternatives combinator stores for
/// opaque leaf candidates.
pub trait ValueValidator: Send + Sync {
    /// Validates a value and returns the result as a `serde_json::Value`.
    fn validate_value(&self, value: &Value, context: &Context) -> ValidationResult<Value>;
}

impl<S: SchemaLike> ValueValidator for S {
    fn validate_value(&self, value: &Value, context: &Context) -> ValidationResult<Value> {
        self.validate_to_value(value, context)
    }
}

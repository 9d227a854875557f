//! # Schemata
//!
//! A schema validation library built around an alternatives combinator: a
//! value is checked against an ordered list of candidate schemas under one of
//! three matching disciplines.
//!
//! ## Overview
//!
//! - **any** (default): the first candidate that accepts the value wins. When
//!   every candidate fails, the errors of all of them are reported together
//!   under `alternatives.any`.
//! - **one**: exactly one candidate must accept the value.
//! - **all**: every candidate must accept the value, each one receiving the
//!   output of the previous, so conversions chain.
//!
//! Validation never panics or raises: failures are data, carried in
//! stillwater's `Validation` type. Builder misuse (an unknown match mode, an
//! invalid regex) is reported as a [`ConfigError`] when the schema is built.
//!
//! ## Core Types
//!
//! - [`Schema`]: Entry point for creating schemas
//! - [`AlternativesSchema`]: The combinator
//! - [`Context`] / [`Settings`]: Label and abort-early flag threaded through validation
//! - [`ValidationError`] / [`ValidationErrors`]: Structured failures with `code`, `message` and `local`
//!
//! ## Example
//!
//! ```rust
//! use schemata::{Context, Schema};
//! use serde_json::json;
//!
//! let schema = schemata::alternatives![
//!     Schema::number().min(1).convert(),
//!     Schema::string(),
//! ];
//!
//! let result = schema.validate(&json!("1"), &Context::default());
//! assert_eq!(result.into_result().unwrap(), json!(1));
//!
//! let result = schema.validate(&json!(0), &Context::default());
//! let errors = result.into_result().unwrap_err();
//! assert_eq!(errors.first().code, "alternatives.any");
//! assert_eq!(errors.first().local.attempts().unwrap().len(), 2);
//! ```

pub mod error;
pub mod messages;
pub mod schema;
pub mod validation;

pub use error::{ConfigError, Local, ValidationError, ValidationErrors};
pub use schema::{
    compile, AlternativesSchema, Definition, ExactSchema, Mode, NumberSchema, Schema, SchemaLike,
    SchemaNode, StringSchema, ValueValidator,
};
pub use validation::{validate, Context, Settings, DEFAULT_LABEL};

/// Type alias for validation results using ValidationErrors
pub type ValidationResult<T> = stillwater::Validation<T, ValidationErrors>;

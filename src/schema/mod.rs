//! Schema definitions for validation.
//!
//! This module provides the alternatives combinator, the exact-match schema
//! that raw literals compile to, and the string and number leaf schemas.
//! Every schema implements [`SchemaLike`] and can be a candidate of an
//! [`AlternativesSchema`].
//!
//! # Example
//!
//! ```rust
//! use schemata::{Context, Schema};
//! use serde_json::json;
//!
//! let schema = Schema::alternatives(vec![Schema::string(), Schema::string().min_len(3)])
//!     .match_("one")
//!     .unwrap();
//!
//! assert!(schema.validate(&json!("ab"), &Context::default()).is_success());
//! assert!(schema.validate(&json!("abc"), &Context::default()).is_failure());
//! ```

mod alternatives;
mod definition;
mod exact;
mod node;
mod numeric;
mod string;
mod traits;

pub use alternatives::{AlternativesSchema, Mode};
pub use definition::{compile, Definition};
pub use exact::ExactSchema;
pub use node::SchemaNode;
pub use numeric::NumberSchema;
pub use string::StringSchema;
pub use traits::{SchemaLike, ValueValidator};

use serde_json::Value;

/// Entry point for creating validation schemas.
///
/// `Schema` provides factory methods for every schema type. Each returned
/// schema is configured further through its builder methods.
pub struct Schema;

impl Schema {
    /// Creates a match-any alternatives schema over the given candidates.
    ///
    /// Each candidate is compiled: schemas are used as they are, lists
    /// become nested match-any alternatives, and any other value becomes an
    /// exact match. Candidates of different types can be mixed with the
    /// [`alternatives!`](crate::alternatives) macro or through
    /// [`Definition`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use schemata::{Context, Schema};
    /// use serde_json::json;
    ///
    /// let schema = Schema::alternatives(vec!["draft", "published"]);
    ///
    /// assert!(schema.validate(&json!("draft"), &Context::default()).is_success());
    ///
    /// let errors = schema.validate(&json!("deleted"), &Context::default()).into_result().unwrap_err();
    /// assert_eq!(errors.first().code, "alternatives.any");
    /// assert_eq!(errors.first().local.attempts().unwrap().len(), 2);
    /// ```
    pub fn alternatives<I>(candidates: I) -> AlternativesSchema
    where
        I: IntoIterator,
        I::Item: Into<Definition>,
    {
        AlternativesSchema::new().try_(candidates)
    }

    /// Compiles a definition into a schema node.
    ///
    /// Equivalent to [`compile`].
    pub fn compile(definition: impl Into<Definition>) -> SchemaNode {
        compile(definition)
    }

    /// Creates a schema accepting only the given literal values.
    pub fn only(values: Vec<Value>) -> ExactSchema {
        ExactSchema::new(values)
    }

    /// Creates a new string schema.
    ///
    /// # Example
    ///
    /// ```rust
    /// use schemata::{Context, Schema};
    /// use serde_json::json;
    ///
    /// let schema = Schema::string().min_len(5);
    ///
    /// assert!(schema.validate(&json!("hello"), &Context::default()).is_success());
    /// assert!(schema.validate(&json!("hi"), &Context::default()).is_failure());
    /// ```
    pub fn string() -> StringSchema {
        StringSchema::new()
    }

    /// Creates a new number schema.
    ///
    /// # Example
    ///
    /// ```rust
    /// use schemata::{Context, Schema};
    /// use serde_json::json;
    ///
    /// let schema = Schema::number().min(0).max(100);
    ///
    /// assert!(schema.validate(&json!(50), &Context::default()).is_success());
    /// assert!(schema.validate(&json!(-5), &Context::default()).is_failure());
    /// ```
    pub fn number() -> NumberSchema {
        NumberSchema::new()
    }
}

/// Builds a match-any [`AlternativesSchema`] from candidates of mixed types.
///
/// Each argument goes through [`Definition::from`], so schemas, literals and
/// lists can be combined freely.
///
/// # Example
///
/// ```rust
/// use schemata::{Context, Schema};
/// use serde_json::json;
///
/// let schema = schemata::alternatives!["auto", Schema::number().min(0)];
///
/// assert!(schema.validate(&json!("auto"), &Context::default()).is_success());
/// assert!(schema.validate(&json!(12), &Context::default()).is_success());
/// assert!(schema.validate(&json!(-1), &Context::default()).is_failure());
/// ```
#[macro_export]
macro_rules! alternatives {
    ($($candidate:expr),* $(,)?) => {
        $crate::Schema::alternatives(
            ::std::vec::Vec::<$crate::Definition>::from([$($crate::Definition::from($candidate)),*])
        )
    };
}

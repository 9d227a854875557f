//! Compiling raw literals and lists into schema nodes.
//!
//! A [`Definition`] is anything that can become a schema: an existing schema,
//! a raw literal, or an ordered list of further definitions. [`compile`]
//! turns it into a [`SchemaNode`]:
//!
//! - a schema is returned unchanged;
//! - a list becomes a match-any [`AlternativesSchema`] over its compiled
//!   elements, in order;
//! - anything else becomes an [`ExactSchema`] over that single literal.

use std::sync::Arc;

use serde_json::Value;

use crate::schema::alternatives::AlternativesSchema;
use crate::schema::exact::ExactSchema;
use crate::schema::node::SchemaNode;
use crate::schema::numeric::NumberSchema;
use crate::schema::string::StringSchema;
use crate::schema::traits::ValueValidator;

/// Something that can be compiled into a schema node.
///
/// Conversions exist from every schema type in this crate, from JSON values
/// and common literals, and from vectors of anything convertible. JSON arrays
/// are treated as lists, not as array literals.
///
/// # Example
///
/// ```rust
/// use schemata::{compile, Context, Definition, Schema, SchemaLike};
/// use serde_json::json;
///
/// let schema = compile(vec![Definition::from("x"), Definition::from(Schema::number())]);
///
/// assert!(schema.validate(&json!("x"), &Context::default()).is_success());
/// assert!(schema.validate(&json!(1), &Context::default()).is_success());
/// assert!(schema.validate(&json!("y"), &Context::default()).is_failure());
/// ```
#[derive(Clone, Debug)]
pub enum Definition {
    /// An already-built schema.
    Schema(SchemaNode),
    /// An ordered list, compiled to match-any alternatives.
    List(Vec<Definition>),
    /// A raw literal, compiled to an exact match.
    Literal(Value),
}

impl Definition {
    /// Wraps any schema, including ones defined outside this crate.
    pub fn leaf<S>(schema: S) -> Self
    where
        S: ValueValidator + 'static,
    {
        Definition::Schema(SchemaNode::leaf(schema))
    }
}

/// Compiles a definition into a schema node.
pub fn compile(definition: impl Into<Definition>) -> SchemaNode {
    match definition.into() {
        Definition::Schema(schema) => schema,
        Definition::List(items) => SchemaNode::Alternatives(Arc::new(
            AlternativesSchema::from_candidates(items.into_iter().map(compile).collect()),
        )),
        Definition::Literal(value) => SchemaNode::Exact(Arc::new(ExactSchema::new(vec![value]))),
    }
}

impl From<SchemaNode> for Definition {
    fn from(schema: SchemaNode) -> Self {
        Definition::Schema(schema)
    }
}

impl From<AlternativesSchema> for Definition {
    fn from(schema: AlternativesSchema) -> Self {
        Definition::Schema(SchemaNode::Alternatives(Arc::new(schema)))
    }
}

impl From<ExactSchema> for Definition {
    fn from(schema: ExactSchema) -> Self {
        Definition::Schema(SchemaNode::Exact(Arc::new(schema)))
    }
}

impl From<StringSchema> for Definition {
    fn from(schema: StringSchema) -> Self {
        Definition::leaf(schema)
    }
}

impl From<NumberSchema> for Definition {
    fn from(schema: NumberSchema) -> Self {
        Definition::leaf(schema)
    }
}

impl From<Value> for Definition {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => Definition::List(items.into_iter().map(Definition::from).collect()),
            other => Definition::Literal(other),
        }
    }
}

impl<T: Into<Definition>> From<Vec<T>> for Definition {
    fn from(items: Vec<T>) -> Self {
        Definition::List(items.into_iter().map(Into::into).collect())
    }
}

macro_rules! literal_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Definition {
                fn from(value: $ty) -> Self {
                    Definition::Literal(Value::from(value))
                }
            }
        )*
    };
}

literal_from!(&str, String, bool, i32, i64, u32, u64, f64);

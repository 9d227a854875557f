//! The closed set of schema kinds a candidate can take.

use std::sync::Arc;

use serde_json::Value;

use crate::schema::alternatives::AlternativesSchema;
use crate::schema::exact::ExactSchema;
use crate::schema::traits::{SchemaLike, ValueValidator};
use crate::validation::Context;
use crate::ValidationResult;

/// A node in a schema tree.
///
/// Every candidate of an [`AlternativesSchema`] is one of three kinds: an
/// exact-match literal, a nested alternatives combinator, or an opaque leaf
/// schema known only through [`ValueValidator`]. Nodes are reference counted,
/// so cloning a node (or a combinator holding nodes) shares the subtree
/// rather than copying it.
#[derive(Clone)]
pub enum SchemaNode {
    /// Succeeds iff the value equals one of a set of literals.
    Exact(Arc<ExactSchema>),
    /// A nested alternatives combinator.
    Alternatives(Arc<AlternativesSchema>),
    /// Any other schema.
    Leaf(Arc<dyn ValueValidator>),
}

impl SchemaNode {
    /// Wraps an arbitrary schema as a leaf node.
    pub fn leaf<S>(schema: S) -> Self
    where
        S: ValueValidator + 'static,
    {
        SchemaNode::Leaf(Arc::new(schema))
    }

    /// Returns the exact-match schema if this node is one.
    pub fn as_exact(&self) -> Option<&ExactSchema> {
        match self {
            SchemaNode::Exact(schema) => Some(schema),
            _ => None,
        }
    }

    /// Returns the alternatives schema if this node is one.
    pub fn as_alternatives(&self) -> Option<&AlternativesSchema> {
        match self {
            SchemaNode::Alternatives(schema) => Some(schema),
            _ => None,
        }
    }

    /// Returns true if this node is an opaque leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self, SchemaNode::Leaf(_))
    }
}

impl SchemaLike for SchemaNode {
    type Output = Value;

    fn validate(&self, value: &Value, context: &Context) -> ValidationResult<Value> {
        match self {
            SchemaNode::Exact(schema) => schema.validate(value, context),
            SchemaNode::Alternatives(schema) => schema.validate(value, context),
            SchemaNode::Leaf(schema) => schema.validate_value(value, context),
        }
    }

    fn validate_to_value(&self, value: &Value, context: &Context) -> ValidationResult<Value> {
        SchemaLike::validate(self, value, context)
    }
}

impl std::fmt::Debug for SchemaNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaNode::Exact(schema) => f.debug_tuple("Exact").field(schema).finish(),
            SchemaNode::Alternatives(schema) => {
                f.debug_tuple("Alternatives").field(schema).finish()
            }
            SchemaNode::Leaf(_) => f.write_str("Leaf"),
        }
    }
}

const _: () = {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}
    assert_send::<SchemaNode>();
    assert_sync::<SchemaNode>();
};

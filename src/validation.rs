//! Validation context and the top-level validation driver.
//!
//! This module provides the [`Context`] type that carries the label and
//! abort-early flag through a validation call, the [`Settings`] override bag
//! that schemas use to derive child contexts, and [`validate`], the entry
//! point that handles absent input before any schema is consulted.

use std::borrow::Cow;

use serde_json::Value;
use stillwater::Validation;

use crate::schema::ValueValidator;
use crate::ValidationResult;

/// Label used in messages when no schema in the tree assigns one.
pub const DEFAULT_LABEL: &str = "unknown";

/// Validation context carries the label and abort-early flag.
///
/// A context is never mutated once handed to a schema. Schemas that carry
/// their own [`Settings`] derive a child context with [`Context::derive`],
/// which copies the parent and applies the overrides, so a label assigned
/// high in a schema tree reaches every descendant that does not assign its
/// own.
///
/// # Example
///
/// ```rust
/// use schemata::{Context, Settings};
///
/// let root = Context::default();
/// assert_eq!(root.label(), "unknown");
/// assert!(root.abort_early());
///
/// let child = root.derive(&Settings::new().label("port").abort_early(false));
/// assert_eq!(child.label(), "port");
/// assert!(!child.abort_early());
///
/// // The parent is untouched
/// assert_eq!(root.label(), "unknown");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    label: String,
    abort_early: bool,
}

impl Context {
    /// Creates a context with the default label and abort-early enabled.
    pub fn new() -> Self {
        Self {
            label: DEFAULT_LABEL.to_string(),
            abort_early: true,
        }
    }

    /// Returns a copy of this context with the given label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Returns a copy of this context with the given abort-early flag.
    pub fn with_abort_early(mut self, abort_early: bool) -> Self {
        self.abort_early = abort_early;
        self
    }

    /// Returns the effective label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns whether schemas should stop at their first failing constraint.
    pub fn abort_early(&self) -> bool {
        self.abort_early
    }

    /// Derives the context a schema validates under.
    ///
    /// Borrows `self` when `settings` overrides nothing, and otherwise
    /// returns an owned copy with the present overrides applied.
    pub fn derive(&self, settings: &Settings) -> Cow<'_, Context> {
        if settings.is_empty() {
            return Cow::Borrowed(self);
        }

        let mut child = self.clone();
        if let Some(label) = &settings.label {
            child.label = label.clone();
        }
        if let Some(abort_early) = settings.abort_early {
            child.abort_early = abort_early;
        }
        Cow::Owned(child)
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-schema overrides applied when a schema derives its child context.
///
/// Every field is optional; an absent field inherits the parent's value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    /// Explicit label for the schema and its descendants.
    pub label: Option<String>,
    /// Abort-early flag for the schema and its descendants.
    pub abort_early: Option<bool>,
}

impl Settings {
    /// Creates settings that override nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the label override.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the abort-early override.
    pub fn abort_early(mut self, abort_early: bool) -> Self {
        self.abort_early = Some(abort_early);
        self
    }

    /// Returns true if no override is present.
    pub fn is_empty(&self) -> bool {
        self.label.is_none() && self.abort_early.is_none()
    }

    /// Layers `other` on top of `self`; fields present in `other` win.
    pub fn merge(self, other: Settings) -> Self {
        Self {
            label: other.label.or(self.label),
            abort_early: other.abort_early.or(self.abort_early),
        }
    }
}

/// Validates an optional input against a schema under the default context.
///
/// Absent input is a trivial success and never reaches the schema; making a
/// value required is the caller's concern, not the schema's.
///
/// # Example
///
/// ```rust
/// use schemata::{validate, Schema};
/// use serde_json::json;
///
/// let schema = Schema::alternatives(Vec::<schemata::Definition>::new());
///
/// assert!(validate(&schema, None).is_success());
/// assert!(validate(&schema, Some(&json!(1))).is_failure());
/// ```
pub fn validate<S>(schema: &S, value: Option<&Value>) -> ValidationResult<Option<Value>>
where
    S: ValueValidator + ?Sized,
{
    match value {
        None => Validation::Success(None),
        Some(value) => schema.validate_value(value, &Context::default()).map(Some),
    }
}

//! String schema validation.
//!
//! This module provides [`StringSchema`] for validating string values with
//! constraints like minimum/maximum length and regex patterns.

use regex::Regex;
use serde_json::Value;
use stillwater::Validation;

use crate::error::{ConfigError, Local, ValidationError, ValidationErrors};
use crate::messages::codes;
use crate::schema::traits::SchemaLike;
use crate::validation::{Context, Settings};
use crate::ValidationResult;

/// A constraint applied to string values.
#[derive(Clone)]
enum StringConstraint {
    MinLength {
        min: usize,
        message: Option<String>,
    },
    MaxLength {
        max: usize,
        message: Option<String>,
    },
    Pattern {
        regex: Regex,
        message: Option<String>,
    },
}

/// A schema for validating string values.
///
/// `StringSchema` checks that values are strings and then applies its
/// constraints in the order they were added. With abort-early enabled (the
/// default) it stops at the first violated constraint; otherwise it reports
/// every violation.
///
/// # Example
///
/// ```rust
/// use schemata::{Context, Schema};
/// use serde_json::json;
///
/// let schema = Schema::string()
///     .min_len(3)
///     .pattern(r"^[a-z]+$")
///     .unwrap();
///
/// let context = Context::default().with_abort_early(false);
/// let errors = schema.validate(&json!("AB"), &context).into_result().unwrap_err();
/// assert_eq!(errors.len(), 2);
/// ```
#[derive(Clone)]
pub struct StringSchema {
    constraints: Vec<StringConstraint>,
    type_error_message: Option<String>,
    settings: Settings,
}

impl StringSchema {
    /// Creates a new string schema with no constraints.
    pub fn new() -> Self {
        Self {
            constraints: Vec::new(),
            type_error_message: None,
            settings: Settings::default(),
        }
    }

    /// Adds a minimum length constraint, counted in characters.
    pub fn min_len(mut self, min: usize) -> Self {
        self.constraints
            .push(StringConstraint::MinLength { min, message: None });
        self
    }

    /// Adds a maximum length constraint, counted in characters.
    pub fn max_len(mut self, max: usize) -> Self {
        self.constraints
            .push(StringConstraint::MaxLength { max, message: None });
        self
    }

    /// Adds a regex pattern constraint.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidPattern` if the pattern does not compile.
    pub fn pattern(mut self, pattern: &str) -> Result<Self, ConfigError> {
        let regex = Regex::new(pattern)?;
        self.constraints.push(StringConstraint::Pattern {
            regex,
            message: None,
        });
        Ok(self)
    }

    /// Sets a custom error message for the most recent constraint.
    ///
    /// If no constraints have been added yet, this sets the message used when
    /// the value is not a string. The error code is unchanged.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        if let Some(last) = self.constraints.last_mut() {
            match last {
                StringConstraint::MinLength { message: m, .. } => *m = Some(message.into()),
                StringConstraint::MaxLength { message: m, .. } => *m = Some(message.into()),
                StringConstraint::Pattern { message: m, .. } => *m = Some(message.into()),
            }
        } else {
            self.type_error_message = Some(message.into());
        }
        self
    }

    /// Sets an explicit label for this schema.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.settings.label = Some(label.into());
        self
    }

    /// Sets the abort-early flag for this schema.
    pub fn abort_early(mut self, abort_early: bool) -> Self {
        self.settings.abort_early = Some(abort_early);
        self
    }

    /// Validates a value against this schema.
    pub fn validate(&self, value: &Value, context: &Context) -> ValidationResult<String> {
        let context = context.derive(&self.settings);

        let s = match value.as_str() {
            Some(s) => s,
            None => {
                let error = ValidationError::new(codes::STRING_BASE, Local::from_context(&context));
                let error = match &self.type_error_message {
                    Some(message) => error.with_message(message.clone()),
                    None => error,
                };
                return Validation::Failure(ValidationErrors::single(error));
            }
        };

        let mut errors = Vec::new();
        for constraint in &self.constraints {
            if let Some(error) = check_constraint(constraint, s, &context) {
                errors.push(error);
                if context.abort_early() {
                    break;
                }
            }
        }

        match ValidationErrors::from_vec(errors) {
            None => Validation::Success(s.to_string()),
            Some(errors) => Validation::Failure(errors),
        }
    }
}

impl Default for StringSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLike for StringSchema {
    type Output = String;

    fn validate(&self, value: &Value, context: &Context) -> ValidationResult<String> {
        self.validate(value, context)
    }

    fn validate_to_value(&self, value: &Value, context: &Context) -> ValidationResult<Value> {
        self.validate(value, context).map(Value::String)
    }
}

/// Checks a single constraint and returns an error if it fails.
fn check_constraint(
    constraint: &StringConstraint,
    value: &str,
    context: &Context,
) -> Option<ValidationError> {
    let (error, message) = match constraint {
        StringConstraint::MinLength { min, message } => {
            if value.chars().count() >= *min {
                return None;
            }
            (
                ValidationError::new(
                    codes::STRING_MIN,
                    Local::from_context(context).with("limit", *min),
                ),
                message,
            )
        }
        StringConstraint::MaxLength { max, message } => {
            if value.chars().count() <= *max {
                return None;
            }
            (
                ValidationError::new(
                    codes::STRING_MAX,
                    Local::from_context(context).with("limit", *max),
                ),
                message,
            )
        }
        StringConstraint::Pattern { regex, message } => {
            if regex.is_match(value) {
                return None;
            }
            (
                ValidationError::new(
                    codes::STRING_PATTERN,
                    Local::from_context(context).with("pattern", regex.as_str()),
                ),
                message,
            )
        }
    };

    Some(match message {
        Some(message) => error.with_message(message.clone()),
        None => error,
    })
}

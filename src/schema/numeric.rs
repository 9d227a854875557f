//! Numeric schema validation.
//!
//! This module provides [`NumberSchema`] for validating numbers with
//! constraints like minimum/maximum value, integrality and divisibility, and
//! optional conversion from numeric strings.

use serde_json::{Number, Value};
use stillwater::Validation;

use crate::error::{Local, ValidationError, ValidationErrors};
use crate::messages::codes;
use crate::schema::traits::SchemaLike;
use crate::validation::{Context, Settings};
use crate::ValidationResult;

/// A constraint applied to numeric values.
#[derive(Clone)]
enum NumberConstraint {
    Min { limit: Number },
    Max { limit: Number },
    Multiple { factor: Number },
    Integer,
}

/// A schema for validating numbers.
///
/// `NumberSchema` accepts JSON numbers, and with [`convert`](Self::convert)
/// also strings that parse as numbers, in which case the parsed number is the
/// output. Constraints run in the order they were added; with abort-early
/// enabled (the default) validation stops at the first violation.
///
/// # Example
///
/// ```rust
/// use schemata::{Context, Schema};
/// use serde_json::json;
///
/// let schema = Schema::number().min(1).convert();
///
/// let result = schema.validate(&json!("12"), &Context::default());
/// assert_eq!(result.into_result().unwrap(), serde_json::Number::from(12));
///
/// let errors = schema.validate(&json!(0), &Context::default()).into_result().unwrap_err();
/// assert_eq!(errors.first().code, "number.min");
/// assert_eq!(errors.first().message, "unknown must be greater than or equal to 1");
/// ```
#[derive(Clone)]
pub struct NumberSchema {
    constraints: Vec<NumberConstraint>,
    convert: bool,
    settings: Settings,
}

impl NumberSchema {
    /// Creates a new number schema with no constraints.
    pub fn new() -> Self {
        Self {
            constraints: Vec::new(),
            convert: false,
            settings: Settings::default(),
        }
    }

    /// Adds a minimum value constraint (inclusive).
    pub fn min(mut self, limit: impl Into<Number>) -> Self {
        self.constraints.push(NumberConstraint::Min {
            limit: limit.into(),
        });
        self
    }

    /// Adds a maximum value constraint (inclusive).
    pub fn max(mut self, limit: impl Into<Number>) -> Self {
        self.constraints.push(NumberConstraint::Max {
            limit: limit.into(),
        });
        self
    }

    /// Requires the value to be a multiple of `factor`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use schemata::{Context, Schema};
    /// use serde_json::json;
    ///
    /// let schema = Schema::number().multiple(5);
    ///
    /// assert!(schema.validate(&json!(10), &Context::default()).is_success());
    /// assert!(schema.validate(&json!(7), &Context::default()).is_failure());
    /// ```
    pub fn multiple(mut self, factor: impl Into<Number>) -> Self {
        self.constraints.push(NumberConstraint::Multiple {
            factor: factor.into(),
        });
        self
    }

    /// Requires the value to have no fractional part.
    pub fn integer(mut self) -> Self {
        self.constraints.push(NumberConstraint::Integer);
        self
    }

    /// Accepts strings holding a number and outputs the parsed number.
    pub fn convert(mut self) -> Self {
        self.convert = true;
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
    pub fn validate(&self, value: &Value, context: &Context) -> ValidationResult<Number> {
        let context = context.derive(&self.settings);

        let number = match (value, self.convert) {
            (Value::Number(n), _) => Some(n.clone()),
            (Value::String(s), true) => parse_number(s),
            _ => None,
        };
        let number = match number {
            Some(n) => n,
            None => {
                return Validation::Failure(ValidationErrors::single(ValidationError::new(
                    codes::NUMBER_BASE,
                    Local::from_context(&context),
                )))
            }
        };

        let mut errors = Vec::new();
        for constraint in &self.constraints {
            if let Some(error) = check_constraint(constraint, &number, &context) {
                errors.push(error);
                if context.abort_early() {
                    break;
                }
            }
        }

        match ValidationErrors::from_vec(errors) {
            None => Validation::Success(number),
            Some(errors) => Validation::Failure(errors),
        }
    }
}

impl Default for NumberSchema {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLike for NumberSchema {
    type Output = Number;

    fn validate(&self, value: &Value, context: &Context) -> ValidationResult<Number> {
        self.validate(value, context)
    }

    fn validate_to_value(&self, value: &Value, context: &Context) -> ValidationResult<Value> {
        self.validate(value, context).map(Value::Number)
    }
}

/// Parses a numeric string, preferring an integer representation.
fn parse_number(s: &str) -> Option<Number> {
    let s = s.trim();
    if let Ok(n) = s.parse::<i64>() {
        return Some(n.into());
    }
    if let Ok(n) = s.parse::<u64>() {
        return Some(n.into());
    }
    s.parse::<f64>().ok().and_then(Number::from_f64)
}

/// Checks a single constraint and returns an error if it fails.
fn check_constraint(
    constraint: &NumberConstraint,
    value: &Number,
    context: &Context,
) -> Option<ValidationError> {
    let n = value.as_f64().unwrap_or(f64::NAN);
    match constraint {
        NumberConstraint::Min { limit } => (n < as_f64(limit)).then(|| {
            ValidationError::new(
                codes::NUMBER_MIN,
                Local::from_context(context).with("limit", limit.clone()),
            )
        }),
        NumberConstraint::Max { limit } => (n > as_f64(limit)).then(|| {
            ValidationError::new(
                codes::NUMBER_MAX,
                Local::from_context(context).with("limit", limit.clone()),
            )
        }),
        NumberConstraint::Multiple { factor } => (!is_multiple(value, factor)).then(|| {
            ValidationError::new(
                codes::NUMBER_MULTIPLE,
                Local::from_context(context).with("factor", factor.clone()),
            )
        }),
        NumberConstraint::Integer => (n.fract() != 0.0).then(|| {
            ValidationError::new(codes::NUMBER_INTEGER, Local::from_context(context))
        }),
    }
}

fn as_f64(n: &Number) -> f64 {
    n.as_f64().unwrap_or(f64::NAN)
}

/// Integer operands are checked exactly; anything else goes through f64.
fn is_multiple(value: &Number, factor: &Number) -> bool {
    if let (Some(v), Some(f)) = (value.as_i64(), factor.as_i64()) {
        return v.checked_rem(f).map_or(f == -1, |r| r == 0);
    }
    let f = as_f64(factor);
    f != 0.0 && (as_f64(value) % f) == 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn unwrap_success<T, E: std::fmt::Debug>(v: Validation<T, E>) -> T {
        v.into_result().unwrap()
    }

    fn unwrap_failure<T: std::fmt::Debug, E>(v: Validation<T, E>) -> E {
        v.into_result().unwrap_err()
    }

    #[test]
    fn test_accepts_numbers() {
        let schema = NumberSchema::new();
        assert_eq!(unwrap_success(schema.validate(&json!(3), &Context::default())), Number::from(3));
        assert!(schema.validate(&json!(-1.5), &Context::default()).is_success());
    }

    #[test]
    fn test_rejects_non_numbers() {
        let schema = NumberSchema::new();
        for value in [json!("1"), json!(null), json!(true), json!([1])] {
            let errors = unwrap_failure(schema.validate(&value, &Context::default()));
            assert_eq!(errors.first().code, "number.base");
            assert_eq!(errors.first().message, "unknown must be a number");
        }
    }

    #[test]
    fn test_convert_parses_strings() {
        let schema = NumberSchema::new().convert();

        let result = schema.validate_to_value(&json!("2"), &Context::default());
        assert_eq!(unwrap_success(result), json!(2));

        let result = schema.validate_to_value(&json!(" 2.5 "), &Context::default());
        assert_eq!(unwrap_success(result), json!(2.5));

        let errors = unwrap_failure(schema.validate(&json!("x"), &Context::default()));
        assert_eq!(errors.first().code, "number.base");

        assert!(schema.validate(&json!(""), &Context::default()).is_failure());
        assert!(schema.validate(&json!("NaN"), &Context::default()).is_failure());
    }

    #[test]
    fn test_min_and_max() {
        let schema = NumberSchema::new().min(1).max(10);

        assert!(schema.validate(&json!(1), &Context::default()).is_success());
        assert!(schema.validate(&json!(10), &Context::default()).is_success());

        let errors = unwrap_failure(schema.validate(&json!(0), &Context::default()));
        assert_eq!(errors.first().code, "number.min");
        assert_eq!(errors.first().local.get("limit"), Some(&json!(1)));

        let errors = unwrap_failure(schema.validate(&json!(11), &Context::default()));
        assert_eq!(errors.first().code, "number.max");
        assert_eq!(errors.first().message, "unknown must be less than or equal to 10");
    }

    #[test]
    fn test_multiple() {
        let schema = NumberSchema::new().multiple(2);

        assert!(schema.validate(&json!(4), &Context::default()).is_success());
        assert!(schema.validate(&json!(0), &Context::default()).is_success());

        let errors = unwrap_failure(schema.validate(&json!(3), &Context::default()));
        assert_eq!(errors.first().code, "number.multiple");
        assert_eq!(errors.first().message, "unknown must be a multiple of 2");
        assert_eq!(errors.first().local.get("factor"), Some(&json!(2)));
    }

    #[test]
    fn test_multiple_of_zero_never_matches() {
        let schema = NumberSchema::new().multiple(0);
        assert!(schema.validate(&json!(0), &Context::default()).is_failure());
    }

    #[test]
    fn test_multiple_at_integer_bounds() {
        let schema = NumberSchema::new().multiple(-1);
        assert!(schema.validate(&json!(i64::MIN), &Context::default()).is_success());

        let schema = NumberSchema::new().multiple(i64::MIN);
        assert!(schema.validate(&json!(i64::MIN), &Context::default()).is_success());
        assert!(schema.validate(&json!(-1), &Context::default()).is_failure());
    }

    #[test]
    fn test_integer() {
        let schema = NumberSchema::new().integer();
        assert!(schema.validate(&json!(2), &Context::default()).is_success());
        assert!(schema.validate(&json!(2.0), &Context::default()).is_success());

        let errors = unwrap_failure(schema.validate(&json!(2.5), &Context::default()));
        assert_eq!(errors.first().code, "number.integer");
    }

    #[test]
    fn test_abort_early_controls_accumulation() {
        let schema = NumberSchema::new().min(2).multiple(2);

        let errors = unwrap_failure(schema.validate(&json!(1), &Context::default()));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first().code, "number.min");

        let context = Context::default().with_abort_early(false);
        let errors = unwrap_failure(schema.validate(&json!(1), &context));
        let codes: Vec<_> = errors.iter().map(|e| e.code.as_str()).collect();
        assert_eq!(codes, vec!["number.min", "number.multiple"]);
    }

    #[test]
    fn test_label() {
        let schema = NumberSchema::new().label("age");
        let errors = unwrap_failure(schema.validate(&json!("x"), &Context::default()));
        assert_eq!(errors.first().message, "age must be a number");
    }
}

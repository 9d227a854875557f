//! Error codes and message rendering.
//!
//! Every [`ValidationError`](crate::ValidationError) message is rendered by
//! [`render`] from the error's code and its `local` bag. Rendering is pure:
//! the same code and local always yield the same message.

use serde_json::Value;

use crate::error::Local;

/// Error codes produced by the schemas in this crate.
pub mod codes {
    /// No candidate matched (mode `any`, or mode `one` with zero matches).
    pub const ALTERNATIVES_ANY: &str = "alternatives.any";
    /// More than one candidate matched in mode `one`.
    pub const ALTERNATIVES_ONE: &str = "alternatives.one";
    /// A candidate failed in mode `all`.
    pub const ALTERNATIVES_ALL: &str = "alternatives.all";
    /// The value is not one of the allowed literals.
    pub const ANY_ONLY: &str = "any.only";

    pub const STRING_BASE: &str = "string.base";
    pub const STRING_MIN: &str = "string.min";
    pub const STRING_MAX: &str = "string.max";
    pub const STRING_PATTERN: &str = "string.pattern";

    pub const NUMBER_BASE: &str = "number.base";
    pub const NUMBER_MIN: &str = "number.min";
    pub const NUMBER_MAX: &str = "number.max";
    pub const NUMBER_MULTIPLE: &str = "number.multiple";
    pub const NUMBER_INTEGER: &str = "number.integer";
}

/// Renders the message for `code`, substituting values from `local`.
///
/// Unknown codes render as `"{label} is invalid"`.
///
/// # Example
///
/// ```rust
/// use schemata::messages::{codes, render};
/// use schemata::Local;
/// use serde_json::json;
///
/// let message = render(codes::ANY_ONLY, &Local::new("color").with("values", json!(["red", "blue"])));
/// assert_eq!(message, "color must be one of red, blue");
/// ```
pub fn render(code: &str, local: &Local) -> String {
    let label = local.label();
    match code {
        codes::ALTERNATIVES_ANY => {
            format!("{label} must match at least one of the provided schemas")
        }
        codes::ALTERNATIVES_ONE => {
            format!("{label} must not match more than one of the provided schemas")
        }
        codes::ALTERNATIVES_ALL => format!("{label} must match all of the provided schemas"),
        codes::ANY_ONLY => match local.get("values") {
            Some(Value::Array(values)) if values.len() == 1 => {
                format!("{label} must be {}", display_value(&values[0]))
            }
            Some(Value::Array(values)) if !values.is_empty() => {
                let listed: Vec<_> = values.iter().map(display_value).collect();
                format!("{label} must be one of {}", listed.join(", "))
            }
            _ => format!("{label} must be one of the allowed values"),
        },
        codes::STRING_BASE => format!("{label} must be a string"),
        codes::STRING_MIN => format!(
            "{label} must have at least {} characters",
            field(local, "limit")
        ),
        codes::STRING_MAX => format!(
            "{label} must have at most {} characters",
            field(local, "limit")
        ),
        codes::STRING_PATTERN => format!(
            "{label} must match the pattern {}",
            field(local, "pattern")
        ),
        codes::NUMBER_BASE => format!("{label} must be a number"),
        codes::NUMBER_MIN => format!(
            "{label} must be greater than or equal to {}",
            field(local, "limit")
        ),
        codes::NUMBER_MAX => format!(
            "{label} must be less than or equal to {}",
            field(local, "limit")
        ),
        codes::NUMBER_MULTIPLE => format!(
            "{label} must be a multiple of {}",
            field(local, "factor")
        ),
        codes::NUMBER_INTEGER => format!("{label} must be an integer"),
        _ => format!("{label} is invalid"),
    }
}

fn field(local: &Local, key: &str) -> String {
    local.get(key).map(display_value).unwrap_or_default()
}

/// Strings render bare, everything else as JSON.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_alternatives_templates() {
        let local = Local::new("unknown");
        assert_eq!(
            render(codes::ALTERNATIVES_ANY, &local),
            "unknown must match at least one of the provided schemas"
        );
        assert_eq!(
            render(codes::ALTERNATIVES_ONE, &local),
            "unknown must not match more than one of the provided schemas"
        );
        assert_eq!(
            render(codes::ALTERNATIVES_ALL, &local),
            "unknown must match all of the provided schemas"
        );
    }

    #[test]
    fn test_label_substitution() {
        let local = Local::new("A");
        assert_eq!(
            render(codes::ALTERNATIVES_ANY, &local),
            "A must match at least one of the provided schemas"
        );
    }

    #[test]
    fn test_any_only_single_value() {
        let local = Local::new("unknown").with("values", json!(["x"]));
        assert_eq!(render(codes::ANY_ONLY, &local), "unknown must be x");

        let local = Local::new("unknown").with("values", json!([3]));
        assert_eq!(render(codes::ANY_ONLY, &local), "unknown must be 3");
    }

    #[test]
    fn test_any_only_many_values() {
        let local = Local::new("unknown").with("values", json!(["x", 1, null]));
        assert_eq!(render(codes::ANY_ONLY, &local), "unknown must be one of x, 1, null");
    }

    #[test]
    fn test_leaf_templates() {
        let local = Local::new("unknown").with("limit", 1);
        assert_eq!(
            render(codes::NUMBER_MIN, &local),
            "unknown must be greater than or equal to 1"
        );

        let local = Local::new("unknown").with("factor", 2);
        assert_eq!(render(codes::NUMBER_MULTIPLE, &local), "unknown must be a multiple of 2");

        assert_eq!(
            render(codes::STRING_BASE, &Local::new("name")),
            "name must be a string"
        );
    }

    #[test]
    fn test_unknown_code() {
        assert_eq!(render("custom.rule", &Local::new("field")), "field is invalid");
    }
}

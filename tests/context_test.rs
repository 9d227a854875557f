//! Integration tests for labels, settings and the top-level driver.

use schemata::{alternatives, validate, Context, Definition, Mode, Schema, Settings};
use serde_json::json;

#[test]
fn test_apply_deep_labels() {
    let schema = alternatives![Schema::string()].label("A");

    let errors = schema
        .validate(&json!(1), &Context::default())
        .into_result()
        .unwrap_err();

    assert_eq!(
        errors.first().to_json(),
        json!({
            "code": "string.base",
            "message": "A must be a string",
            "local": { "label": "A" },
        })
    );
}

#[test]
fn test_label_on_aggregated_error_and_attempts() {
    let schema = alternatives![Schema::string(), Schema::number()].label("A");

    let errors = schema
        .validate(&json!(true), &Context::default())
        .into_result()
        .unwrap_err();
    let error = errors.first();

    assert_eq!(error.local.label(), "A");
    assert_eq!(error.message, "A must match at least one of the provided schemas");
    for attempt in error.local.attempts().unwrap() {
        assert_eq!(attempt.local.label(), "A");
    }
}

#[test]
fn test_label_applies_to_one_and_all_modes() {
    let one = alternatives![Schema::number(), Schema::number()]
        .mode(Mode::One)
        .label("count");
    let errors = one.validate(&json!(1), &Context::default()).into_result().unwrap_err();
    assert_eq!(errors.first().message, "count must not match more than one of the provided schemas");

    let all = alternatives![Schema::number(), Schema::string()]
        .mode(Mode::All)
        .label("count");
    let errors = all.validate(&json!(1), &Context::default()).into_result().unwrap_err();
    assert_eq!(errors.first().message, "count must match all of the provided schemas");
}

#[test]
fn test_innermost_label_wins() {
    let inner = alternatives![Schema::string(), Schema::number()].label("inner");
    let schema = alternatives![inner].label("outer");

    let errors = schema
        .validate(&json!(true), &Context::default())
        .into_result()
        .unwrap_err();
    assert_eq!(errors.first().local.label(), "inner");
    for attempt in errors.first().local.attempts().unwrap() {
        assert_eq!(attempt.local.label(), "inner");
    }
}

#[test]
fn test_label_from_caller_context() {
    let schema = alternatives![Schema::string(), Schema::number()];
    let context = Context::default().with_label("payload");

    let errors = schema.validate(&json!(null), &context).into_result().unwrap_err();
    assert_eq!(errors.first().local.label(), "payload");
}

#[test]
fn test_default_label_is_unknown() {
    let schema = Schema::alternatives(Vec::<Definition>::new());
    let errors = schema.validate(&json!(1), &Context::default()).into_result().unwrap_err();
    assert_eq!(errors.first().local.label(), "unknown");
}

#[test]
fn test_settings_do_not_leak_into_caller_context() {
    let schema = alternatives![Schema::string(), Schema::number().min(2).multiple(2)]
        .settings(Settings::new().label("n").abort_early(false));
    let context = Context::default();

    let _ = schema.validate(&json!(1), &context);

    assert_eq!(context.label(), "unknown");
    assert!(context.abort_early());
}

#[test]
fn test_settings_reach_nested_candidates() {
    let inner = alternatives![Schema::string(), Schema::number().min(2).multiple(2)];
    let schema = alternatives![inner, "other"].settings(Settings::new().abort_early(false));

    let errors = schema.validate(&json!(1), &Context::default()).into_result().unwrap_err();
    let attempts = errors.first().local.attempts().unwrap();
    let nested = attempts[0].local.attempts().unwrap();
    assert_eq!(nested.len(), 3);
}

#[test]
fn test_driver_treats_absent_input_as_success() {
    let schema = Schema::alternatives(Vec::<Definition>::new());

    let result = validate(&schema, None);
    assert_eq!(result.into_result().unwrap(), None);

    let result = validate(&schema, Some(&json!(1)));
    assert_eq!(result.into_result().unwrap_err().first().code, "alternatives.any");
}

#[test]
fn test_driver_returns_converted_value() {
    let schema = alternatives![Schema::number().min(1).convert(), Schema::string()];

    let result = validate(&schema, Some(&json!("1")));
    assert_eq!(result.into_result().unwrap(), Some(json!(1)));
}

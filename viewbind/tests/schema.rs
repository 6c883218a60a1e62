//! Tests for schema fragments and fluent chains outside of a view.

mod common;

use viewbind::prelude::*;
use viewbind::validation::fluent::{Validator, item_validator};
use viewbind::validation::messages;
use viewbind::validation::schema::{
    CompiledField, FieldSchema, PathSegment, SchemaError, ViewSchema, field_schema,
};

fn text(s: &str) -> FieldValue {
    FieldValue::String(s.to_string())
}

#[test]
fn test_compiled_field_reports_path_and_message() {
    let rule: ValidationRule = string_rule(true, Some(2), None, None).into();
    let field = CompiledField::compile(field_schema("Code", ItemKind::String, &rule)).unwrap();

    assert_eq!(field.parse("code", Some(&text("ab"))), Ok(()));

    let err = field.parse("code", Some(&text("a"))).unwrap_err();
    let issues = err.issues();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].path, vec![PathSegment::Key("code".to_string())]);
    assert_eq!(issues[0].message, messages::too_short("Code", 2));
    assert_eq!(err.message_for("code"), messages::too_short("Code", 2));
    assert_eq!(err.message_for("other"), "");
}

#[test]
fn test_range_issue_points_at_the_bound() {
    let rule: ValidationRule = number_rule(true, Some(1.0), Some(10.0), None).into();
    let field = CompiledField::compile(field_schema("Price", ItemKind::NumberRange, &rule)).unwrap();

    let err = field
        .parse("price", Some(&FieldValue::NumberRange(vec![Some(5.0), None])))
        .unwrap_err();
    assert_eq!(
        err.issues()[0].path,
        vec![PathSegment::Key("price".to_string()), PathSegment::Index(1)]
    );
    assert_eq!(err.to_string(), messages::required("Price"));
}

#[test]
fn test_type_mismatch_is_reported() {
    let rule: ValidationRule = number_rule(true, None, None, None).into();
    let field = CompiledField::compile(field_schema("Age", ItemKind::Number, &rule)).unwrap();

    let err = field.parse("age", Some(&text("ten"))).unwrap_err();
    assert_eq!(err.message_for("age"), messages::invalid_type("number", "string"));
}

#[test]
fn test_broken_pattern_fails_compilation() {
    let rule: ValidationRule = StringValidationRule::new().set_reg_exp("(").into();
    let err = CompiledField::compile(field_schema("Code", ItemKind::String, &rule)).unwrap_err();
    assert!(matches!(err, SchemaError::InvalidPattern { ref pattern, .. } if pattern == "("));
}

#[test]
fn test_view_schema_isolates_fragments() {
    common::init_logger();
    let code = input_text_item(
        "Code",
        init_state(None),
        StringValidationRule::new().set_reg_exp("("),
        ReadWrite::Editable,
        None,
    );
    let name = input_text_item(
        "Name",
        init_state(None),
        string_rule(true, None, None, None),
        ReadWrite::Editable,
        None,
    );
    let view = View::new(
        ViewDefinition::new().item("code", &code).item("name", &name),
        ViewOptions::default(),
    )
    .unwrap();

    let schema = ViewSchema::compile(&view.items());
    let mut keys: Vec<&str> = schema.keys().collect();
    keys.sort_unstable();
    assert_eq!(keys, vec!["code", "name"]);

    assert!(schema.fragment("code").is_none());
    assert!(matches!(schema.fragment("name"), Some(FieldSchema::String { .. })));
    assert!(matches!(
        schema.validate("code", Some(&text("x"))),
        Err(SchemaError::InvalidPattern { .. })
    ));
    assert_eq!(schema.validate("name", Some(&text("Jane"))), Ok(()));
    assert_eq!(
        schema.validate("missing", None),
        Err(SchemaError::UnknownField {
            key: "missing".to_string()
        })
    );
}

#[test]
fn test_fragment_serialises_to_json() {
    let rule: ValidationRule = string_rule(false, None, Some(5), None).into();
    let schema = field_schema("Code", ItemKind::String, &rule);
    let json = serde_json::to_value(&schema).unwrap();

    assert_eq!(json["type"], "optional");
    assert_eq!(json["inner"]["type"], "string");
    assert_eq!(json["inner"]["checks"][1]["check"], "max_length");
    assert_eq!(json["inner"]["checks"][1]["max"], 5);

    let back: FieldSchema = serde_json::from_value(json).unwrap();
    assert_eq!(back, schema);
}

#[test]
fn test_view_schema_refreshes_changed_items() {
    common::init_logger();
    let name = input_text_item(
        "Name",
        init_state(None),
        string_rule(false, None, None, None),
        ReadWrite::Editable,
        None,
    );
    let view = View::new(ViewDefinition::new().item("name", &name), ViewOptions::default()).unwrap();
    let mut schema = ViewSchema::compile(&view.items());
    assert!(schema.is_current(&name));
    assert_eq!(schema.validate("name", Some(&text("Jonathan"))), Ok(()));

    name.set_validation_rule(string_rule(false, None, Some(3), None));
    assert!(!schema.is_current(&name));
    // stale until refreshed
    assert_eq!(schema.validate("name", Some(&text("Jonathan"))), Ok(()));

    schema.refresh(&name);
    assert!(schema.is_current(&name));
    assert_eq!(
        schema
            .validate("name", Some(&text("Jonathan")))
            .map_err(|e| e.message_for("name")),
        Err(messages::too_long("Name", 3))
    );
    assert!(matches!(schema.fragment("name"), Some(FieldSchema::Optional { .. })));

    name.init("Full name", false);
    assert!(!schema.is_current(&name));
}

#[test]
fn test_item_validator_chain() {
    let rule: ValidationRule = string_rule(true, Some(3), None, None).set_email(true).into();
    let result = item_validator("email", "Email", ItemKind::String, &rule, Some(&text("ab")))
        .unwrap()
        .validate();
    assert!(result.is_invalid());
    assert_eq!(result.message_for("email"), Some(messages::too_short("Email", 3).as_str()));

    let result = item_validator("email", "Email", ItemKind::String, &rule, Some(&text("jo@example.com")))
        .unwrap()
        .validate();
    assert!(result.is_valid());
}

#[test]
fn test_item_validator_rejects_broken_pattern() {
    let rule: ValidationRule = StringValidationRule::new().set_reg_exp("[").into();
    let err = item_validator("code", "Code", ItemKind::String, &rule, None)
        .err()
        .unwrap_or_default();
    assert!(err.starts_with("Invalid regular expression '['"));
}

#[test]
fn test_validator_reports_first_error_per_field() {
    let result = Validator::new()
        .field("name", None)
        .required("Name is required")
        .min_length(2, "Name is too short")
        .field("age", Some(FieldValue::Number(12.0)))
        .min_value(18.0, "Too young")
        .max_value(10.0, "Too old")
        .field("ok", Some(text("fine")))
        .required("unused")
        .validate();

    let errors = result.errors();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0].field_name, "name");
    assert_eq!(errors[0].message, "Name is required");
    assert_eq!(result.message_for("age"), Some("Too young"));
    assert_eq!(result.message_for("ok"), None);
    assert_eq!(result.first_error().map(|e| e.field_name.as_str()), Some("name"));
}

#[test]
fn test_validator_element_checks() {
    let result = Validator::new()
        .field("sizes", Some(FieldValue::NumberArray(vec![2.0, 0.5, 3.0])))
        .min_items(1, "Pick one")
        .elements()
        .min_value(1.0, "Each size must be at least 1")
        .validate();
    assert_eq!(result.message_for("sizes"), Some("Each size must be at least 1"));
}

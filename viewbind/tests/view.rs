//! Tests for view construction and view-wide operations.

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use viewbind::prelude::*;
use viewbind::validation::messages;
use viewbind::view::ViewSettings;

fn required_text(label: &str) -> Item<String> {
    input_text_item(
        label,
        init_state(None),
        string_rule(true, None, None, None),
        ReadWrite::Editable,
        None,
    )
}

#[test]
fn test_items_receive_their_keys() {
    common::init_logger();
    let name = required_text("Name");
    let age = input_number_item(
        "Age",
        init_state(Some(30.0)),
        number_rule(false, None, None, None),
        ReadWrite::Editable,
        None,
    );
    let view = View::new(
        ViewDefinition::new().item("name", &name).item("age", &age),
        ViewOptions::default(),
    )
    .unwrap();

    assert_eq!(name.key(), "name");
    assert_eq!(age.key(), "age");
    assert_eq!(view.items().len(), 2);
    assert_eq!(view.item("age").map(|i| i.label()), Some("Age".to_string()));
    assert!(view.item("missing").is_none());
    assert_eq!(name.parent_view().map(|v| v.id()), Some(view.id()));
}

#[test]
fn test_entries_keep_definition_order() {
    let first = required_text("First");
    let second = required_text("Second");
    let load: Resource<()> = Resource::new();
    let view = View::new(
        ViewDefinition::new()
            .item("second", &second)
            .event("load", &load)
            .item("first", &first),
        ViewOptions::default(),
    )
    .unwrap();

    let keys: Vec<&str> = view.entries().iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, vec!["second", "load", "first"]);
    let labels: Vec<String> = view.items().iter().map(|i| i.label()).collect();
    assert_eq!(labels, vec!["Second", "First"]);
    assert_eq!(view.events().len(), 1);
}

#[test]
fn test_duplicate_key_rejected() {
    let a = required_text("A");
    let b = required_text("B");
    let err = View::new(
        ViewDefinition::new().item("field", &a).item("field", &b),
        ViewOptions::default(),
    )
    .unwrap_err();
    assert_eq!(err, ViewError::DuplicateKey("field".to_string()));
    assert_eq!(err.to_string(), "Duplicate key 'field' in view definition");
    // nothing was bound
    assert_eq!(a.key(), "");
}

#[test]
fn test_empty_key_rejected() {
    let a = required_text("A");
    let err = View::new(ViewDefinition::new().item("", &a), ViewOptions::default()).unwrap_err();
    assert_eq!(err, ViewError::EmptyKey);
}

#[test]
fn test_readonly_view_overrides_items() {
    common::init_logger();
    let name = required_text("Name");
    let locked = input_text_item(
        "Locked",
        init_state(None),
        string_rule(false, None, None, None),
        ReadWrite::Readonly,
        None,
    );
    assert!(!name.is_readonly());
    assert!(locked.is_readonly());

    let view = View::new(
        ViewDefinition::new().item("name", &name).item("locked", &locked),
        ViewOptions::new().readonly(true),
    )
    .unwrap();

    assert!(view.readonly());
    assert!(name.is_readonly());
    assert!(locked.is_readonly());

    drop(view);
    assert!(!name.is_readonly());
    assert!(locked.is_readonly());
    assert!(name.parent_view().is_none());
}

#[test]
fn test_editable_view_keeps_item_flags() {
    let locked = input_text_item(
        "Locked",
        init_state(None),
        string_rule(false, None, None, None),
        ReadWrite::Readonly,
        None,
    );
    let _view = View::new(ViewDefinition::new().item("locked", &locked), ViewOptions::new()).unwrap();
    assert!(locked.is_readonly());
}

#[test]
fn test_is_loading_follows_events() {
    common::init_logger();
    let customers: Resource<Vec<String>> = Resource::new();
    let orders: Resource<u32> = Resource::new();
    let view = View::new(
        ViewDefinition::new()
            .event("customers", &customers)
            .event("orders", &orders),
        ViewOptions::default(),
    )
    .unwrap();

    assert!(!view.is_loading());

    customers.set_loading();
    orders.set_loading();
    assert!(view.is_loading());

    customers.set_ready(vec!["ACME".to_string()]);
    assert!(view.is_loading());

    orders.set_error("timeout");
    assert!(!view.is_loading());
}

#[test]
fn test_view_without_events_is_not_loading() {
    let name = required_text("Name");
    let view = View::new(ViewDefinition::new().item("name", &name), ViewOptions::default()).unwrap();
    assert!(!view.is_loading());
}

#[test]
fn test_execute_validation_without_views() {
    assert!(execute_validation(None));
    assert!(execute_validation(Some(&[])));
}

#[test]
fn test_execute_validation_checks_every_view() {
    common::init_logger();
    let name = required_text("Name");
    let city = required_text("City");
    let first = View::new(ViewDefinition::new().item("name", &name), ViewOptions::default()).unwrap();
    let second = View::new(ViewDefinition::new().item("city", &city), ViewOptions::default()).unwrap();
    let views = [first, second];

    assert!(!execute_validation(Some(&views)));
    assert_eq!(name.validation_message(), messages::required("Name"));
    assert_eq!(city.validation_message(), messages::required("City"));

    name.set_value(Some("Jane".to_string()));
    assert!(!execute_validation(Some(&views)));
    assert_eq!(name.validation_message(), "");

    city.set_value(Some("Oslo".to_string()));
    assert!(execute_validation(Some(&views)));
}

#[test]
fn test_reset_error() {
    common::init_logger();
    let name = required_text("Name");
    let city = required_text("City");
    let view = View::new(
        ViewDefinition::new().item("name", &name).item("city", &city),
        ViewOptions::default(),
    )
    .unwrap();

    assert!(view.has_error());
    view.reset_error(Some("name"));
    assert_eq!(name.validation_message(), "");
    assert_eq!(city.validation_message(), messages::required("City"));

    view.reset_error(None);
    assert_eq!(city.validation_message(), "");
}

#[test]
fn test_detached_engine_reports_no_errors() {
    let name = required_text("Name");
    let view = View::new(ViewDefinition::new().item("name", &name), ViewOptions::default()).unwrap();

    view.set_validation_event(None);
    assert!(view.validation_event().is_none());
    assert!(!view.has_error());
    assert!(!name.validate_anytime(None));
    assert_eq!(name.validation_message(), "");
}

struct CountingEvent {
    calls: Arc<AtomicUsize>,
}

impl ValidationEvent for CountingEvent {
    fn on_validate_has_error(&self) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        true
    }

    fn on_validate_item_has_error(&self, _value: Option<&FieldValue>, item: &dyn AnyItem) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        item.set_validation_message("counted".to_string());
        true
    }

    fn validation_error_message(&self, _item: &dyn AnyItem) -> String {
        "counted".to_string()
    }

    fn reset_error(&self, _name: Option<&str>) {}
}

#[test]
fn test_custom_backend() {
    common::init_logger();
    let calls = Arc::new(AtomicUsize::new(0));
    let factory_calls = Arc::clone(&calls);
    let backend = ValidationBackend::custom(move |_view, _rules| -> Arc<dyn ValidationEvent> {
        Arc::new(CountingEvent {
            calls: Arc::clone(&factory_calls),
        })
    });

    let name = required_text("Name");
    let view = View::new(ViewDefinition::new().item("name", &name), ViewOptions::new().backend(backend))
        .unwrap();

    assert!(name.validate_anytime(Some("Jane".to_string())));
    assert_eq!(name.validation_message(), "counted");
    assert!(view.has_error());
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_custom_backend_sees_bound_items() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let record = Arc::clone(&seen);
    let backend = ValidationBackend::custom(move |view, rules| -> Arc<dyn ValidationEvent> {
        let keys = view.items().iter().map(|i| i.key()).collect::<Vec<_>>();
        record.lock().unwrap().extend(keys);
        Arc::new(FluentValidationEvent::new(view, rules))
    });

    let name = required_text("Name");
    let city = required_text("City");
    let _view = View::new(
        ViewDefinition::new().item("name", &name).item("city", &city),
        ViewOptions::new().backend(backend),
    )
    .unwrap();

    assert_eq!(*seen.lock().unwrap(), vec!["name".to_string(), "city".to_string()]);
}

#[test]
fn test_shared_rules_across_views() {
    common::init_logger();
    let rules = Arc::new(builtin_custom_validation_rules());
    let first_zip = input_text_item(
        "Zip",
        init_state(Some("12-34".to_string())),
        string_rule(false, None, None, Some("postalCodeHyphen")),
        ReadWrite::Editable,
        None,
    );
    let second_zip = input_text_item(
        "Zip",
        init_state(Some("123-4567".to_string())),
        string_rule(false, None, None, Some("postalCodeHyphen")),
        ReadWrite::Editable,
        None,
    );
    let first = View::new(
        ViewDefinition::new().item("zip", &first_zip),
        ViewOptions::new().shared_validation_rules(Arc::clone(&rules)),
    )
    .unwrap();
    let second = View::new(
        ViewDefinition::new().item("zip", &second_zip),
        ViewOptions::new()
            .shared_validation_rules(Arc::clone(&rules))
            .backend(ValidationBackend::Fluent),
    )
    .unwrap();

    assert!(first.has_error());
    assert_eq!(first_zip.validation_message(), "Zip must be in XXX-XXXX format");
    assert!(!second.has_error());
}

#[test]
fn test_settings_from_json() {
    let settings: ViewSettings =
        serde_json::from_str(r#"{"readonly": true, "validateTrigger": "onBlur"}"#).unwrap();
    let options = ViewOptions::from(settings);
    assert!(options.readonly);
    assert_eq!(options.validate_trigger, ValidateTrigger::OnBlur);

    let name = required_text("Name");
    let view = View::new(ViewDefinition::new().item("name", &name), options).unwrap();
    assert_eq!(view.validate_trigger(), ValidateTrigger::OnBlur);
    assert!(name.is_readonly());
}

#[test]
fn test_settings_default_to_submit() {
    let settings: ViewSettings = serde_json::from_str("{}").unwrap();
    assert_eq!(settings.validate_trigger, ValidateTrigger::OnSubmit);
    assert!(!settings.readonly);
}

#[test]
fn test_moving_item_rebinds() {
    common::init_logger();
    let name = required_text("Name");
    let first = View::new(ViewDefinition::new().item("name", &name), ViewOptions::default()).unwrap();
    let second = View::new(
        ViewDefinition::new().item("full_name", &name),
        ViewOptions::new().readonly(true),
    )
    .unwrap();

    assert_eq!(name.key(), "full_name");
    assert_eq!(name.parent_view().map(|v| v.id()), Some(second.id()));
    assert!(name.is_readonly());
    assert_ne!(first.id(), second.id());
}

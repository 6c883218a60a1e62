//! Validation engines.
//!
//! Every [`View`] owns one [`ValidationEvent`]. Two engines ship with the
//! crate and agree on pass/fail for the same rules:
//!
//! - [`SchemaValidationEvent`] (the default) compiles every item into a
//!   [`FieldSchema`](schema::FieldSchema) fragment when the view is built,
//!   and rebuilds a fragment when its item's label, kind or rule changes.
//! - [`FluentValidationEvent`] assembles a [`Validator`](fluent::Validator)
//!   chain from the item's rule on every call.
//!
//! Both run the same sequence per item: the required check, then the item's
//! named custom rule (only when the required check passed), then the
//! standard constraints with `""` treated as no value. The first failing
//! message is written to the item; success clears it.

pub mod fluent;
pub mod messages;
pub mod schema;

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

pub use fluent::FluentValidationEvent;
pub use schema::SchemaValidationEvent;

use crate::custom::{CustomRuleError, CustomValidationRules, apply_custom_rule};
use crate::item::AnyItem;
use crate::value::{FieldValue, is_empty};
use crate::view::{View, ViewHandle};

/// Validation strategy owned by a view.
pub trait ValidationEvent: Send + Sync {
    /// Validate every item of the view. `true` when any item failed.
    fn on_validate_has_error(&self) -> bool;

    /// Validate `item` against `value`. `true` when it failed.
    fn on_validate_item_has_error(&self, value: Option<&FieldValue>, item: &dyn AnyItem) -> bool;

    /// Message produced by the last standard check of `item`.
    fn validation_error_message(&self, item: &dyn AnyItem) -> String;

    /// Clear the message of the item registered as `name`, or of every item.
    fn reset_error(&self, name: Option<&str>);
}

/// Builds the validation event for a freshly constructed view.
pub type ValidationEventFactory =
    Arc<dyn Fn(&View, Option<Arc<CustomValidationRules>>) -> Arc<dyn ValidationEvent> + Send + Sync>;

/// Which engine a view validates with.
#[derive(Clone, Default)]
pub enum ValidationBackend {
    #[default]
    Schema,
    Fluent,
    Custom(ValidationEventFactory),
}

impl ValidationBackend {
    /// Wrap a factory closure.
    pub fn custom<F>(factory: F) -> Self
    where
        F: Fn(&View, Option<Arc<CustomValidationRules>>) -> Arc<dyn ValidationEvent>
            + Send
            + Sync
            + 'static,
    {
        Self::Custom(Arc::new(factory))
    }

    pub fn create(
        &self,
        view: &View,
        custom_rules: Option<Arc<CustomValidationRules>>,
    ) -> Arc<dyn ValidationEvent> {
        match self {
            Self::Schema => Arc::new(SchemaValidationEvent::new(view, custom_rules)),
            Self::Fluent => Arc::new(FluentValidationEvent::new(view, custom_rules)),
            Self::Custom(factory) => factory(view, custom_rules),
        }
    }
}

impl fmt::Debug for ValidationBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Schema => f.write_str("Schema"),
            Self::Fluent => f.write_str("Fluent"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// State and steps shared by the built-in engines.
pub struct ValidationCore {
    view: ViewHandle,
    custom_rules: Option<Arc<CustomValidationRules>>,
    last_messages: RwLock<HashMap<String, String>>,
}

impl ValidationCore {
    pub fn new(view: &View, custom_rules: Option<Arc<CustomValidationRules>>) -> Self {
        Self {
            view: view.handle(),
            custom_rules,
            last_messages: RwLock::new(HashMap::new()),
        }
    }

    pub fn view(&self) -> &ViewHandle {
        &self.view
    }

    pub fn custom_rules(&self) -> Option<&CustomValidationRules> {
        self.custom_rules.as_deref()
    }

    /// Items of the owning view, in definition order.
    pub fn items(&self) -> Vec<Arc<dyn AnyItem>> {
        self.view.upgrade().map(|v| v.items()).unwrap_or_default()
    }

    /// `true` when the item is required and `value` is empty.
    pub fn do_required_check_has_error(&self, value: Option<&FieldValue>, item: &dyn AnyItem) -> bool {
        item.validation_rule().required() && is_empty(value)
    }

    /// Apply the item's named custom rule. `true` when it failed.
    ///
    /// Items without a custom rule are left untouched.
    pub fn do_custom_validate_item_has_error(
        &self,
        value: Option<&FieldValue>,
        item: &dyn AnyItem,
    ) -> bool {
        if item.validation_rule().custom_rule_name().is_none() {
            return false;
        }
        match apply_custom_rule(self.custom_rules(), value, item) {
            Ok(()) => {
                item.set_validation_message(String::new());
                false
            }
            Err(e) => {
                if !matches!(e, CustomRuleError::Failed { .. }) {
                    log::warn!("Item '{}': {}", item.key(), e);
                }
                item.set_validation_message(e.to_string());
                true
            }
        }
    }

    /// Run the required, custom and standard steps for one item.
    ///
    /// `standard` receives the value with `""` mapped to `None` and returns
    /// the first violated constraint's message.
    pub fn run_item<F>(&self, value: Option<&FieldValue>, item: &dyn AnyItem, standard: F) -> bool
    where
        F: FnOnce(Option<&FieldValue>) -> Result<(), String>,
    {
        if !self.do_required_check_has_error(value, item)
            && self.do_custom_validate_item_has_error(value, item)
        {
            log::trace!("Item '{}' failed its custom rule", item.key());
            return true;
        }

        let value = value.filter(|v| !matches!(v, FieldValue::String(s) if s.is_empty()));
        let key = item.key();
        match standard(value) {
            Ok(()) => {
                log::trace!("Item '{}' passed validation", key);
                self.record_message(&key, String::new());
                item.set_validation_message(String::new());
                false
            }
            Err(message) => {
                log::trace!("Item '{}' failed validation: {}", key, message);
                self.record_message(&key, message.clone());
                item.set_validation_message(message);
                true
            }
        }
    }

    /// Validate every item through `event`, without stopping at the first failure.
    pub fn validate_all(&self, event: &dyn ValidationEvent) -> bool {
        let mut has_error = false;
        for item in self.items() {
            let value = item.field_value();
            if event.on_validate_item_has_error(value.as_ref(), item.as_ref()) {
                has_error = true;
            }
        }
        has_error
    }

    pub fn reset_error(&self, name: Option<&str>) {
        for item in self.items() {
            if name.is_none_or(|n| n == item.key()) {
                item.set_validation_message(String::new());
            }
        }
    }

    fn record_message(&self, key: &str, message: String) {
        let mut messages = self
            .last_messages
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        messages.insert(key.to_string(), message);
    }

    pub fn last_message(&self, key: &str) -> String {
        self.last_messages
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(key)
            .cloned()
            .unwrap_or_default()
    }
}

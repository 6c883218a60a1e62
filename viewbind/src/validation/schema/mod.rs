//! Schema validation engine.
//!
//! When the view is built, every item is compiled into a [`FieldSchema`]
//! fragment keyed by its registration key. A fragment that fails to compile
//! (an unparsable `reg_exp`) only affects its own item: validating that
//! item reports the compile error, while every other item validates
//! normally.
//!
//! Each fragment remembers the label, kind and rule it was compiled from.
//! When an item is validated after any of those changed, its fragment is
//! rebuilt before the value is parsed.

mod compile;
mod error;
mod fragment;

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

pub use compile::field_schema;
pub use error::{Issue, PathSegment, SchemaError};
pub use fragment::{ArrayCheck, CompiledField, FieldSchema, NumberCheck, StringCheck};

use super::{ValidationCore, ValidationEvent};
use crate::custom::CustomValidationRules;
use crate::item::AnyItem;
use crate::rule::ValidationRule;
use crate::value::{FieldValue, ItemKind};
use crate::view::View;

/// A fragment together with the item configuration it was built from.
#[derive(Debug, Clone)]
struct SchemaField {
    label: String,
    kind: ItemKind,
    rule: ValidationRule,
    compiled: Result<CompiledField, SchemaError>,
}

impl SchemaField {
    fn compile(item: &dyn AnyItem) -> Self {
        let label = item.label();
        let kind = item.kind();
        let rule = item.validation_rule();
        let compiled = CompiledField::compile(field_schema(&label, kind, &rule));
        if let Err(e) = &compiled {
            log::warn!("Schema for '{}' failed to compile: {}", item.key(), e);
        }
        Self {
            label,
            kind,
            rule,
            compiled,
        }
    }

    fn is_current(&self, item: &dyn AnyItem) -> bool {
        self.kind == item.kind() && self.label == item.label() && self.rule == item.validation_rule()
    }
}

/// Compiled fragments of every item in a view.
#[derive(Debug, Clone, Default)]
pub struct ViewSchema {
    fields: HashMap<String, SchemaField>,
}

impl ViewSchema {
    pub fn compile(items: &[Arc<dyn AnyItem>]) -> Self {
        let fields = items
            .iter()
            .map(|item| (item.key(), SchemaField::compile(item.as_ref())))
            .collect();
        Self { fields }
    }

    /// Whether the fragment for `item` matches its current label, kind and rule.
    pub fn is_current(&self, item: &dyn AnyItem) -> bool {
        self.fields
            .get(&item.key())
            .is_some_and(|field| field.is_current(item))
    }

    /// Rebuild the fragment for `item` from its current configuration.
    pub fn refresh(&mut self, item: &dyn AnyItem) {
        let key = item.key();
        log::debug!("Recompiling schema for '{}'", key);
        self.fields.insert(key, SchemaField::compile(item));
    }

    /// Fragment compiled for `key`, if it compiled.
    pub fn fragment(&self, key: &str) -> Option<&FieldSchema> {
        self.fields
            .get(key)
            .and_then(|f| f.compiled.as_ref().ok())
            .map(CompiledField::schema)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Validate `value` against the fragment for `key`.
    pub fn validate(&self, key: &str, value: Option<&FieldValue>) -> Result<(), SchemaError> {
        match self.fields.get(key).map(|f| &f.compiled) {
            Some(Ok(field)) => field.parse(key, value),
            Some(Err(e)) => Err(e.clone()),
            None => Err(SchemaError::UnknownField {
                key: key.to_string(),
            }),
        }
    }
}

/// Engine backed by a [`ViewSchema`] compiled from the view's items.
pub struct SchemaValidationEvent {
    core: ValidationCore,
    schema: RwLock<ViewSchema>,
}

impl SchemaValidationEvent {
    pub fn new(view: &View, custom_rules: Option<Arc<CustomValidationRules>>) -> Self {
        let core = ValidationCore::new(view, custom_rules);
        let schema = ViewSchema::compile(&view.items());
        log::debug!(
            "Compiled schema for view {} ({} fields)",
            view.id(),
            schema.fields.len()
        );
        Self {
            core,
            schema: RwLock::new(schema),
        }
    }

    pub fn core(&self) -> &ValidationCore {
        &self.core
    }

    /// Rebuild the fragment for `item` if its label, kind or rule changed.
    fn refresh(&self, item: &dyn AnyItem) {
        let current = self
            .schema
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .is_current(item);
        if !current {
            self.schema
                .write()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .refresh(item);
        }
    }

    /// Copy of the fragment for `key`.
    pub fn fragment(&self, key: &str) -> Option<FieldSchema> {
        self.schema
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .fragment(key)
            .cloned()
    }
}

impl ValidationEvent for SchemaValidationEvent {
    fn on_validate_has_error(&self) -> bool {
        self.core.validate_all(self)
    }

    fn on_validate_item_has_error(&self, value: Option<&FieldValue>, item: &dyn AnyItem) -> bool {
        self.refresh(item);
        self.core.run_item(value, item, |value| {
            let key = item.key();
            self.schema
                .read()
                .unwrap_or_else(|poisoned| poisoned.into_inner())
                .validate(&key, value)
                .map_err(|e| e.message_for(&key))
        })
    }

    fn validation_error_message(&self, item: &dyn AnyItem) -> String {
        self.core.last_message(&item.key())
    }

    fn reset_error(&self, name: Option<&str>) {
        self.core.reset_error(name);
    }
}

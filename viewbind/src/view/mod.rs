//! Views: named collections of items and events sharing one validation engine.
//!
//! # Example
//!
//! ```
//! use viewbind::prelude::*;
//!
//! let name = input_text_item("Name", init_state(None), string_rule(true, None, None, None),
//!     ReadWrite::Editable, None);
//! let view = View::new(ViewDefinition::new().item("name", &name), ViewOptions::default()).unwrap();
//!
//! assert_eq!(name.key(), "name");
//! assert!(!execute_validation(Some(&[view])));
//! assert_eq!(name.validation_message(), "Name is required. Please enter a value");
//! ```

mod config;
mod error;

use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, RwLock, Weak};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use config::{ValidateTrigger, ViewOptions, ViewSettings};
pub use error::ViewError;

use crate::event::{AsEvent, Event};
use crate::item::{AnyItem, AsAnyItem};
use crate::validation::ValidationEvent;

/// Unique identifier for a view.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct ViewId(Uuid);

impl ViewId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ViewId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A registered entry of a view.
#[derive(Clone)]
pub enum ViewEntry {
    Item(Arc<dyn AnyItem>),
    Event(Arc<dyn Event>),
}

/// Ordered, keyed entries a view is built from.
#[derive(Clone, Default)]
pub struct ViewDefinition {
    entries: Vec<(String, ViewEntry)>,
}

impl ViewDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn item(self, key: impl Into<String>, item: &impl AsAnyItem) -> Self {
        self.entry(key, ViewEntry::Item(item.as_any_item()))
    }

    pub fn event(self, key: impl Into<String>, event: &impl AsEvent) -> Self {
        self.entry(key, ViewEntry::Event(event.as_event()))
    }

    pub fn entry(mut self, key: impl Into<String>, entry: ViewEntry) -> Self {
        self.entries.push((key.into(), entry));
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn check_keys(&self) -> Result<(), ViewError> {
        let mut seen = HashSet::new();
        for (key, _) in &self.entries {
            if key.is_empty() {
                return Err(ViewError::EmptyKey);
            }
            if !seen.insert(key.as_str()) {
                return Err(ViewError::DuplicateKey(key.clone()));
            }
        }
        Ok(())
    }
}

struct ViewShared {
    id: ViewId,
    readonly: bool,
    validate_trigger: ValidateTrigger,
    entries: Vec<(String, ViewEntry)>,
    validation_event: RwLock<Option<Arc<dyn ValidationEvent>>>,
}

/// A built view. Clones refer to the same view.
#[derive(Clone)]
pub struct View {
    shared: Arc<ViewShared>,
}

impl fmt::Debug for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<&str> = self.shared.entries.iter().map(|(k, _)| k.as_str()).collect();
        f.debug_struct("View")
            .field("id", &self.shared.id)
            .field("readonly", &self.shared.readonly)
            .field("validate_trigger", &self.shared.validate_trigger)
            .field("entries", &keys)
            .finish_non_exhaustive()
    }
}

impl View {
    /// Build a view, bind its items and attach the configured engine.
    ///
    /// Items are bound in definition order before the engine is created,
    /// so the engine sees every item under its final key.
    pub fn new(definition: ViewDefinition, options: ViewOptions) -> Result<Self, ViewError> {
        definition.check_keys()?;

        let view = Self {
            shared: Arc::new(ViewShared {
                id: ViewId::new(),
                readonly: options.readonly,
                validate_trigger: options.validate_trigger,
                entries: definition.entries,
                validation_event: RwLock::new(None),
            }),
        };

        let handle = view.handle();
        for (key, entry) in &view.shared.entries {
            if let ViewEntry::Item(item) = entry {
                item.bind(key, handle.clone());
            }
        }

        let event = options
            .backend
            .create(&view, options.custom_validation_rules.clone());
        view.set_validation_event(Some(event));

        log::debug!(
            "Built view {} ({} entries, backend {:?})",
            view.id(),
            view.shared.entries.len(),
            options.backend
        );
        Ok(view)
    }

    pub fn id(&self) -> ViewId {
        self.shared.id
    }

    pub fn readonly(&self) -> bool {
        self.shared.readonly
    }

    pub fn validate_trigger(&self) -> ValidateTrigger {
        self.shared.validate_trigger
    }

    /// `true` while any registered event is loading.
    pub fn is_loading(&self) -> bool {
        self.events().iter().any(|e| e.is_loading())
    }

    pub fn validation_event(&self) -> Option<Arc<dyn ValidationEvent>> {
        self.shared
            .validation_event
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Replace or detach the engine.
    pub fn set_validation_event(&self, event: Option<Arc<dyn ValidationEvent>>) {
        *self
            .shared
            .validation_event
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = event;
    }

    pub fn entries(&self) -> &[(String, ViewEntry)] {
        &self.shared.entries
    }

    pub fn item(&self, key: &str) -> Option<Arc<dyn AnyItem>> {
        self.shared.entries.iter().find_map(|(k, entry)| match entry {
            ViewEntry::Item(item) if k == key => Some(Arc::clone(item)),
            _ => None,
        })
    }

    /// Items in definition order.
    pub fn items(&self) -> Vec<Arc<dyn AnyItem>> {
        self.shared
            .entries
            .iter()
            .filter_map(|(_, entry)| match entry {
                ViewEntry::Item(item) => Some(Arc::clone(item)),
                ViewEntry::Event(_) => None,
            })
            .collect()
    }

    pub fn events(&self) -> Vec<Arc<dyn Event>> {
        self.shared
            .entries
            .iter()
            .filter_map(|(_, entry)| match entry {
                ViewEntry::Event(event) => Some(Arc::clone(event)),
                ViewEntry::Item(_) => None,
            })
            .collect()
    }

    /// Validate every item. `true` when any item failed; `false` without an engine.
    pub fn has_error(&self) -> bool {
        self.validation_event()
            .is_some_and(|event| event.on_validate_has_error())
    }

    /// Clear the message of the item `name`, or of every item.
    pub fn reset_error(&self, name: Option<&str>) {
        if let Some(event) = self.validation_event() {
            event.reset_error(name);
        }
    }

    pub fn handle(&self) -> ViewHandle {
        ViewHandle {
            id: self.shared.id,
            shared: Arc::downgrade(&self.shared),
        }
    }
}

/// Non-owning reference from an item to its view.
#[derive(Clone)]
pub struct ViewHandle {
    id: ViewId,
    shared: Weak<ViewShared>,
}

impl fmt::Debug for ViewHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ViewHandle").field(&self.id).finish()
    }
}

impl ViewHandle {
    pub fn id(&self) -> ViewId {
        self.id
    }

    /// The view, while it is alive.
    pub fn upgrade(&self) -> Option<View> {
        self.shared.upgrade().map(|shared| View { shared })
    }

    /// Readonly flag of the view; `false` once the view is gone.
    pub fn is_readonly(&self) -> bool {
        self.shared.upgrade().is_some_and(|s| s.readonly)
    }

    pub fn validation_event(&self) -> Option<Arc<dyn ValidationEvent>> {
        self.upgrade().and_then(|view| view.validation_event())
    }
}

/// Validate every view. `true` when all of them pass, or there are none.
///
/// Every view is validated even after one fails, so all messages are set.
pub fn execute_validation(views: Option<&[View]>) -> bool {
    let mut ok = true;
    for view in views.unwrap_or_default() {
        if view.has_error() {
            ok = false;
        }
    }
    ok
}

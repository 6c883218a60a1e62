//! Items: typed value containers bound to a reactive cell.
//!
//! An [`Item<T>`] pairs a [`State<Option<T>>`](State) owned by the caller
//! with a validation rule and a message cell. Once the item is registered
//! in a [`View`](crate::view::View) it validates through the view's
//! [`ValidationEvent`](crate::validation::ValidationEvent).
//!
//! # Example
//!
//! ```
//! use viewbind::item::{input_text_item, init_state, ReadWrite};
//! use viewbind::rule::string_rule;
//!
//! let name = init_state(Some("Alice".to_string()));
//! let item = input_text_item("Name", name.clone(), string_rule(true, None, Some(20), None),
//!     ReadWrite::Editable, None);
//!
//! item.set_value(Some("Bob".to_string()));
//! assert_eq!(name.get().as_deref(), Some("Bob"));
//! ```

mod date;
mod factory;
mod options;
mod range;

use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

pub use date::{DATE_VALUE_FORMAT, InputDateFormat, YEAR_MONTH_FORMAT, normalize_date, parse_date};
pub use factory::{
    check_box_item, init_state, input_date_range_item, input_number_item,
    input_number_range_item, input_text_item, multi_check_box_item, number_array_item,
    range_state, select_box_item, select_number_box_item,
};
pub use options::{SelectOptions, select_option_numbers, select_option_strings, select_options};
pub use range::{DateRangeItem, RangeItem, RangeValidity};

use crate::rule::ValidationRule;
use crate::state::State;
use crate::value::{FieldValue, ItemKind, ItemValue, is_empty};
use crate::view::{View, ViewHandle};

/// Whether an item accepts edits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReadWrite {
    Readonly,
    #[default]
    Editable,
}

impl ReadWrite {
    pub fn is_readonly(&self) -> bool {
        matches!(self, Self::Readonly)
    }
}

/// Type-erased view of an item.
///
/// Validation engines and custom rules only see items through this trait.
pub trait AnyItem: Send + Sync {
    /// Key under which the item is registered; empty before registration.
    fn key(&self) -> String;

    fn label(&self) -> String;

    fn kind(&self) -> ItemKind;

    fn validation_rule(&self) -> ValidationRule;

    /// Current value of the bound cell.
    fn field_value(&self) -> Option<FieldValue>;

    fn validation_message(&self) -> String;

    fn set_validation_message(&self, message: String);

    fn is_readonly(&self) -> bool;

    /// Record the registration key and owning view.
    fn bind(&self, key: &str, parent: ViewHandle);
}

/// Anything that can be registered as an item in a view definition.
pub trait AsAnyItem {
    fn as_any_item(&self) -> Arc<dyn AnyItem>;
}

struct ItemInner<R> {
    key: String,
    label: String,
    readonly: bool,
    placeholder: Option<String>,
    kind: ItemKind,
    rule: R,
    parent: Option<ViewHandle>,
    options: Option<SelectOptions>,
    check_box_text: Option<String>,
}

/// A value container bound to an external cell.
///
/// Clones share the value cell, the message cell and the metadata.
pub struct Item<T: ItemValue> {
    value: State<Option<T>>,
    inner: Arc<RwLock<ItemInner<T::Rule>>>,
    validation_message: State<String>,
}

impl<T: ItemValue> Clone for Item<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            inner: Arc::clone(&self.inner),
            validation_message: self.validation_message.clone(),
        }
    }
}

impl<T: ItemValue> fmt::Debug for Item<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.read_inner();
        f.debug_struct("Item")
            .field("key", &inner.key)
            .field("label", &inner.label)
            .field("kind", &inner.kind)
            .field("rule", &inner.rule)
            .field("readonly", &inner.readonly)
            .finish_non_exhaustive()
    }
}

impl<T: ItemValue> Item<T> {
    /// Bind a new item to `state` with an empty label and a default rule.
    pub fn new(state: State<Option<T>>) -> Self {
        Self {
            value: state,
            inner: Arc::new(RwLock::new(ItemInner {
                key: String::new(),
                label: String::new(),
                readonly: false,
                placeholder: None,
                kind: T::KIND,
                rule: T::Rule::default(),
                parent: None,
                options: None,
                check_box_text: None,
            })),
            validation_message: State::new(String::new()),
        }
    }

    fn read_inner(&self) -> RwLockReadGuard<'_, ItemInner<T::Rule>> {
        self.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_inner(&self) -> RwLockWriteGuard<'_, ItemInner<T::Rule>> {
        self.inner.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Set the label and the item's own readonly flag.
    pub fn init(&self, label: impl Into<String>, readonly: bool) {
        let mut inner = self.write_inner();
        inner.label = label.into();
        inner.readonly = readonly;
    }

    // -- value ---------------------------------------------------------------

    pub fn value(&self) -> Option<T> {
        self.value.get()
    }

    /// Commit a new value to the bound cell.
    pub fn set_value(&self, value: Option<T>) {
        self.value.set(value);
    }

    /// Commit a value computed from the previous one.
    pub fn set_value_opt<F>(&self, f: F)
    where
        F: FnOnce(Option<T>) -> Option<T>,
    {
        self.value.replace_with(f);
    }

    /// The bound cell.
    pub fn state(&self) -> &State<Option<T>> {
        &self.value
    }

    // -- metadata ------------------------------------------------------------

    pub fn key(&self) -> String {
        self.read_inner().key.clone()
    }

    pub fn label(&self) -> String {
        self.read_inner().label.clone()
    }

    pub fn kind(&self) -> ItemKind {
        self.read_inner().kind
    }

    pub(crate) fn set_kind(&self, kind: ItemKind) {
        self.write_inner().kind = kind;
    }

    pub fn placeholder(&self) -> Option<String> {
        self.read_inner().placeholder.clone()
    }

    pub fn set_placeholder(&self, placeholder: Option<String>) {
        self.write_inner().placeholder = placeholder;
    }

    pub fn options(&self) -> Option<SelectOptions> {
        self.read_inner().options.clone()
    }

    pub fn set_options(&self, options: Option<SelectOptions>) {
        self.write_inner().options = options;
    }

    /// Text shown next to a check box.
    pub fn check_box_text(&self) -> Option<String> {
        self.read_inner().check_box_text.clone()
    }

    pub fn set_check_box_text(&self, text: impl Into<String>) {
        self.write_inner().check_box_text = Some(text.into());
    }

    /// Owning view, if the item is registered and the view is alive.
    pub fn parent_view(&self) -> Option<View> {
        self.read_inner().parent.as_ref().and_then(ViewHandle::upgrade)
    }

    /// Readonly when the item's own flag is set or the owning view is readonly.
    pub fn is_readonly(&self) -> bool {
        let inner = self.read_inner();
        inner.readonly || inner.parent.as_ref().is_some_and(ViewHandle::is_readonly)
    }

    // -- validation ----------------------------------------------------------

    pub fn validation_rule(&self) -> T::Rule {
        self.read_inner().rule.clone()
    }

    pub fn set_validation_rule(&self, rule: T::Rule) {
        self.write_inner().rule = rule;
    }

    pub fn validation_message(&self) -> String {
        self.validation_message.get()
    }

    pub fn set_validation_message(&self, message: impl Into<String>) {
        self.validation_message.set(message.into());
    }

    /// The message cell, for renderers that watch it.
    pub fn validation_message_state(&self) -> &State<String> {
        &self.validation_message
    }

    fn is_required(&self) -> bool {
        let rule: ValidationRule = self.validation_rule().into();
        rule.required()
    }

    /// Validate `value`, skipping empty values on optional items.
    ///
    /// Returns `true` when an error was found.
    pub fn validate(&self, value: Option<T>) -> bool {
        let field_value = value.as_ref().map(ItemValue::to_field_value);
        if !self.is_required() && is_empty(field_value.as_ref()) {
            return false;
        }
        self.validate_field_value(field_value.as_ref())
    }

    /// Validate `value` unconditionally.
    pub fn validate_anytime(&self, value: Option<T>) -> bool {
        let field_value = value.as_ref().map(ItemValue::to_field_value);
        self.validate_field_value(field_value.as_ref())
    }

    /// Re-validate only while an error message is shown.
    pub fn validate_when_error_exists(&self, value: Option<T>) -> bool {
        if self.validation_message.with(String::is_empty) {
            return false;
        }
        self.validate_anytime(value)
    }

    pub(crate) fn validate_field_value(&self, value: Option<&FieldValue>) -> bool {
        let event = self
            .read_inner()
            .parent
            .as_ref()
            .and_then(ViewHandle::validation_event);
        match event {
            Some(event) => event.on_validate_item_has_error(value, self),
            None => false,
        }
    }
}

impl Item<bool> {
    pub fn is_checked(&self) -> bool {
        self.value.with(|v| v.unwrap_or(false))
    }
}

impl Item<Vec<String>> {
    /// Selected values, in selection order.
    pub fn checked_values(&self) -> Vec<String> {
        self.value().unwrap_or_default()
    }

    /// Options whose value is currently selected, in option order.
    pub fn checked_options(&self) -> Vec<serde_json::Value> {
        let selected = self.checked_values();
        self.read_inner()
            .options
            .as_ref()
            .map(|opts| opts.matching(&selected).cloned().collect())
            .unwrap_or_default()
    }
}

impl<T: ItemValue> AnyItem for Item<T> {
    fn key(&self) -> String {
        Item::key(self)
    }

    fn label(&self) -> String {
        Item::label(self)
    }

    fn kind(&self) -> ItemKind {
        Item::kind(self)
    }

    fn validation_rule(&self) -> ValidationRule {
        Item::validation_rule(self).into()
    }

    fn field_value(&self) -> Option<FieldValue> {
        self.value.with(|v| v.as_ref().map(ItemValue::to_field_value))
    }

    fn validation_message(&self) -> String {
        Item::validation_message(self)
    }

    fn set_validation_message(&self, message: String) {
        Item::set_validation_message(self, message);
    }

    fn is_readonly(&self) -> bool {
        Item::is_readonly(self)
    }

    fn bind(&self, key: &str, parent: ViewHandle) {
        let mut inner = self.write_inner();
        if let Some(prev) = &inner.parent
            && prev.id() != parent.id()
        {
            log::warn!(
                "Item '{}' moved from view {} to view {} as '{}'",
                inner.label,
                prev.id(),
                parent.id(),
                key
            );
        }
        inner.key = key.to_string();
        inner.parent = Some(parent);
    }
}

impl<T: ItemValue> AsAnyItem for Item<T> {
    fn as_any_item(&self) -> Arc<dyn AnyItem> {
        Arc::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::StringValidationRule;

    #[test]
    fn test_unregistered_item_has_empty_key() {
        let item = Item::new(State::new(Some("x".to_string())));
        assert_eq!(item.key(), "");
        assert!(item.parent_view().is_none());
    }

    #[test]
    fn test_unregistered_item_never_reports_errors() {
        let item = Item::<String>::new(State::new(None));
        item.set_validation_rule(StringValidationRule::new().set_required(true));
        assert!(!item.validate(None));
        assert!(!item.validate_anytime(None));
    }

    #[test]
    fn test_validate_when_error_exists_skips_clean_items() {
        let item = Item::<String>::new(State::new(None));
        assert!(!item.validate_when_error_exists(None));
    }

    #[test]
    fn test_clones_share_metadata() {
        let item = Item::<f64>::new(State::new(None));
        let other = item.clone();
        other.init("Age", true);
        assert_eq!(item.label(), "Age");
        assert!(item.is_readonly());
    }
}

//! Named, application-defined validation rules.
//!
//! A [`CustomValidationRule`] is registered under a name in
//! [`CustomValidationRules`]; items opt in through their rule's
//! `custom_rule_name`. Each rule declares the value shape it understands
//! and refuses values of any other shape before its validator runs.
//!
//! # Example
//!
//! ```
//! use viewbind::custom::{CustomRuleMessage, CustomValidationRules,
//!     create_reg_exp_validator, string_custom_validation_rule};
//!
//! let digits = create_reg_exp_validator(r"^[0-9]*$").unwrap();
//! let rules = CustomValidationRules::new().with(
//!     "digits",
//!     string_custom_validation_rule(
//!         move |value, _| digits(value),
//!         CustomRuleMessage::from_fn(|label, _, _| format!("{label} must contain digits only")),
//!     ),
//! );
//! assert!(rules.get("digits").is_some());
//! ```

mod builtin;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use thiserror::Error;

pub use builtin::builtin_custom_validation_rules;

use crate::item::AnyItem;
use crate::value::{FieldValue, ValueShape};

/// Validator closure over an erased value.
pub type CustomValidator = Arc<dyn Fn(Option<&FieldValue>, &dyn AnyItem) -> bool + Send + Sync>;

/// Message builder receiving the item label, the value and the item.
pub type MessageFn = Arc<dyn Fn(&str, Option<&FieldValue>, &dyn AnyItem) -> String + Send + Sync>;

/// Errors raised while applying a custom rule.
///
/// The `Display` text is what ends up in the item's validation message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CustomRuleError {
    #[error(
        "A custom validation rule was specified, but no custom validation rules \
         (custom_validation_rules) were configured. Rule: [{name}]"
    )]
    RulesNotConfigured { name: String },

    #[error("Custom validation rule is not registered. Rule: [{name}]")]
    NotRegistered { name: String },

    #[error("Custom validation rule is not applicable to this item. Rule: [{name}]")]
    NotApplicable { name: String },

    #[error("{message}")]
    Failed { message: String },
}

/// Message shown when a custom rule rejects a value.
#[derive(Clone)]
pub enum CustomRuleMessage {
    Static(String),
    Dynamic(MessageFn),
}

impl CustomRuleMessage {
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&str, Option<&FieldValue>, &dyn AnyItem) -> String + Send + Sync + 'static,
    {
        Self::Dynamic(Arc::new(f))
    }

    pub fn render(&self, label: &str, value: Option<&FieldValue>, item: &dyn AnyItem) -> String {
        match self {
            Self::Static(s) => s.clone(),
            Self::Dynamic(f) => f(label, value, item),
        }
    }
}

impl fmt::Debug for CustomRuleMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(s) => f.debug_tuple("Static").field(s).finish(),
            Self::Dynamic(_) => f.write_str("Dynamic(..)"),
        }
    }
}

impl From<&str> for CustomRuleMessage {
    fn from(s: &str) -> Self {
        Self::Static(s.to_string())
    }
}

impl From<String> for CustomRuleMessage {
    fn from(s: String) -> Self {
        Self::Static(s)
    }
}

/// A named rule bound to one value shape.
#[derive(Clone)]
pub struct CustomValidationRule {
    shape: ValueShape,
    validator: CustomValidator,
    message: CustomRuleMessage,
}

impl fmt::Debug for CustomValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomValidationRule")
            .field("shape", &self.shape)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

impl CustomValidationRule {
    pub fn new(shape: ValueShape, validator: CustomValidator, message: CustomRuleMessage) -> Self {
        Self {
            shape,
            validator,
            message,
        }
    }

    pub fn shape(&self) -> ValueShape {
        self.shape
    }

    /// Whether `value` has a shape this rule can inspect.
    pub fn can_apply_value(&self, value: Option<&FieldValue>) -> bool {
        let Some(value) = value else {
            return true;
        };
        match (self.shape, value) {
            (ValueShape::String, FieldValue::String(_)) => true,
            (ValueShape::Number, FieldValue::Number(n)) => !n.is_nan(),
            (ValueShape::Boolean, FieldValue::Boolean(_)) => true,
            (ValueShape::StringArray, FieldValue::StringArray(_)) => true,
            (ValueShape::StringArray, FieldValue::StringRange(v)) => v.iter().all(Option::is_some),
            (ValueShape::NumberArray, FieldValue::NumberArray(v)) => v.iter().all(|n| !n.is_nan()),
            (ValueShape::NumberArray, FieldValue::NumberRange(v)) => {
                v.iter().all(|n| n.is_some_and(|n| !n.is_nan()))
            }
            (ValueShape::StringRange, FieldValue::StringRange(_)) => true,
            (ValueShape::NumberRange, FieldValue::NumberRange(v)) => {
                v.iter().flatten().all(|n| !n.is_nan())
            }
            _ => false,
        }
    }

    /// Run the validator. Callers check [`can_apply_value`](Self::can_apply_value) first.
    pub fn validate(&self, value: Option<&FieldValue>, item: &dyn AnyItem) -> bool {
        (self.validator)(value, item)
    }

    pub fn message_for(&self, value: Option<&FieldValue>, item: &dyn AnyItem) -> String {
        self.message.render(&item.label(), value, item)
    }

    /// Apply the rule to `value`, reporting why it failed.
    pub fn check(
        &self,
        name: &str,
        value: Option<&FieldValue>,
        item: &dyn AnyItem,
    ) -> Result<(), CustomRuleError> {
        if !self.can_apply_value(value) {
            return Err(CustomRuleError::NotApplicable {
                name: name.to_string(),
            });
        }
        if self.validate(value, item) {
            Ok(())
        } else {
            Err(CustomRuleError::Failed {
                message: self.message_for(value, item),
            })
        }
    }
}

/// Registry of custom rules keyed by name.
#[derive(Debug, Clone, Default)]
pub struct CustomValidationRules {
    rules: HashMap<String, CustomValidationRule>,
}

impl CustomValidationRules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule, builder style.
    pub fn with(mut self, name: impl Into<String>, rule: CustomValidationRule) -> Self {
        self.insert(name, rule);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, rule: CustomValidationRule) {
        self.rules.insert(name.into(), rule);
    }

    pub fn get(&self, name: &str) -> Option<&CustomValidationRule> {
        self.rules.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Merge `other` into this registry; rules in `other` win on name clashes.
    pub fn merge(mut self, other: CustomValidationRules) -> Self {
        self.rules.extend(other.rules);
        self
    }
}

/// Resolve and apply the custom rule named by the item's rule.
///
/// `Ok(())` when the item names no rule or the rule accepts the value.
pub fn apply_custom_rule(
    rules: Option<&CustomValidationRules>,
    value: Option<&FieldValue>,
    item: &dyn AnyItem,
) -> Result<(), CustomRuleError> {
    let rule = item.validation_rule();
    let Some(name) = rule.custom_rule_name() else {
        return Ok(());
    };
    let rules = rules.ok_or_else(|| CustomRuleError::RulesNotConfigured {
        name: name.to_string(),
    })?;
    let custom = rules.get(name).ok_or_else(|| CustomRuleError::NotRegistered {
        name: name.to_string(),
    })?;
    custom.check(name, value, item)
}

// ---------------------------------------------------------------------------
// Typed factories
// ---------------------------------------------------------------------------

fn scalar_str(value: Option<&FieldValue>) -> Option<&str> {
    match value {
        Some(FieldValue::String(s)) => Some(s.as_str()),
        _ => None,
    }
}

fn string_elements(value: Option<&FieldValue>) -> Option<Vec<String>> {
    match value {
        Some(FieldValue::StringArray(v)) => Some(v.clone()),
        Some(FieldValue::StringRange(v)) => Some(v.iter().flatten().cloned().collect()),
        _ => None,
    }
}

fn number_elements(value: Option<&FieldValue>) -> Option<Vec<f64>> {
    match value {
        Some(FieldValue::NumberArray(v)) => Some(v.clone()),
        Some(FieldValue::NumberRange(v)) => Some(v.iter().flatten().copied().collect()),
        _ => None,
    }
}

/// Rule over string values.
pub fn string_custom_validation_rule<F>(
    validator: F,
    message: impl Into<CustomRuleMessage>,
) -> CustomValidationRule
where
    F: Fn(Option<&str>, &dyn AnyItem) -> bool + Send + Sync + 'static,
{
    CustomValidationRule::new(
        ValueShape::String,
        Arc::new(move |value: Option<&FieldValue>, item: &dyn AnyItem| {
            validator(scalar_str(value), item)
        }),
        message.into(),
    )
}

/// Rule over number values.
pub fn number_custom_validation_rule<F>(
    validator: F,
    message: impl Into<CustomRuleMessage>,
) -> CustomValidationRule
where
    F: Fn(Option<f64>, &dyn AnyItem) -> bool + Send + Sync + 'static,
{
    CustomValidationRule::new(
        ValueShape::Number,
        Arc::new(move |value: Option<&FieldValue>, item: &dyn AnyItem| {
            let n = match value {
                Some(FieldValue::Number(n)) => Some(*n),
                _ => None,
            };
            validator(n, item)
        }),
        message.into(),
    )
}

/// Rule over boolean values.
pub fn boolean_custom_validation_rule<F>(
    validator: F,
    message: impl Into<CustomRuleMessage>,
) -> CustomValidationRule
where
    F: Fn(Option<bool>, &dyn AnyItem) -> bool + Send + Sync + 'static,
{
    CustomValidationRule::new(
        ValueShape::Boolean,
        Arc::new(move |value: Option<&FieldValue>, item: &dyn AnyItem| {
            let b = match value {
                Some(FieldValue::Boolean(b)) => Some(*b),
                _ => None,
            };
            validator(b, item)
        }),
        message.into(),
    )
}

/// Rule over string arrays. Also applies to string ranges with both bounds set.
pub fn string_array_custom_validation_rule<F>(
    validator: F,
    message: impl Into<CustomRuleMessage>,
) -> CustomValidationRule
where
    F: Fn(Option<&[String]>, &dyn AnyItem) -> bool + Send + Sync + 'static,
{
    CustomValidationRule::new(
        ValueShape::StringArray,
        Arc::new(move |value: Option<&FieldValue>, item: &dyn AnyItem| {
            validator(string_elements(value).as_deref(), item)
        }),
        message.into(),
    )
}

/// Rule over number arrays. Also applies to number ranges with both bounds set.
pub fn number_array_custom_validation_rule<F>(
    validator: F,
    message: impl Into<CustomRuleMessage>,
) -> CustomValidationRule
where
    F: Fn(Option<&[f64]>, &dyn AnyItem) -> bool + Send + Sync + 'static,
{
    CustomValidationRule::new(
        ValueShape::NumberArray,
        Arc::new(move |value: Option<&FieldValue>, item: &dyn AnyItem| {
            validator(number_elements(value).as_deref(), item)
        }),
        message.into(),
    )
}

/// Rule over string ranges; bounds may be unset.
pub fn string_range_custom_validation_rule<F>(
    validator: F,
    message: impl Into<CustomRuleMessage>,
) -> CustomValidationRule
where
    F: Fn(Option<&[Option<String>]>, &dyn AnyItem) -> bool + Send + Sync + 'static,
{
    CustomValidationRule::new(
        ValueShape::StringRange,
        Arc::new(move |value: Option<&FieldValue>, item: &dyn AnyItem| {
            let range = match value {
                Some(FieldValue::StringRange(v)) => Some(v.as_slice()),
                _ => None,
            };
            validator(range, item)
        }),
        message.into(),
    )
}

/// Rule over number ranges; bounds may be unset.
pub fn number_range_custom_validation_rule<F>(
    validator: F,
    message: impl Into<CustomRuleMessage>,
) -> CustomValidationRule
where
    F: Fn(Option<&[Option<f64>]>, &dyn AnyItem) -> bool + Send + Sync + 'static,
{
    CustomValidationRule::new(
        ValueShape::NumberRange,
        Arc::new(move |value: Option<&FieldValue>, item: &dyn AnyItem| {
            let range = match value {
                Some(FieldValue::NumberRange(v)) => Some(v.as_slice()),
                _ => None,
            };
            validator(range, item)
        }),
        message.into(),
    )
}

/// Build a string validator from a regular expression.
///
/// An absent value never matches.
pub fn create_reg_exp_validator(
    pattern: &str,
) -> Result<impl Fn(Option<&str>) -> bool + Send + Sync + Clone + 'static, regex::Error> {
    let re = regex::Regex::new(pattern)?;
    Ok(move |value: Option<&str>| value.is_some_and(|v| re.is_match(v)))
}

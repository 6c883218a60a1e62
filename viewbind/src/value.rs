//! Value shapes an item can hold.
//!
//! Items are generic over their value type, but validation engines and
//! custom rules work on the closed [`FieldValue`] union so they can match
//! every shape exhaustively.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::rule::{
    BooleanValidationRule, NumberArrayValidationRule, NumberValidationRule,
    StringArrayValidationRule, StringValidationRule, ValidationRule,
};

/// Runtime shape of a [`FieldValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueShape {
    String,
    Number,
    Boolean,
    StringArray,
    NumberArray,
    StringRange,
    NumberRange,
}

impl ValueShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::StringArray => "string array",
            Self::NumberArray => "number array",
            Self::StringRange => "string range",
            Self::NumberRange => "number range",
        }
    }
}

impl fmt::Display for ValueShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A present item value, erased to one of the supported shapes.
///
/// An absent value is `None` at every call site that takes
/// `Option<&FieldValue>`.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Number(f64),
    Boolean(bool),
    StringArray(Vec<String>),
    NumberArray(Vec<f64>),
    /// `[lower, upper]` pair; either bound may be unset.
    StringRange(Vec<Option<String>>),
    /// `[lower, upper]` pair; either bound may be unset.
    NumberRange(Vec<Option<f64>>),
}

impl FieldValue {
    pub fn shape(&self) -> ValueShape {
        match self {
            Self::String(_) => ValueShape::String,
            Self::Number(_) => ValueShape::Number,
            Self::Boolean(_) => ValueShape::Boolean,
            Self::StringArray(_) => ValueShape::StringArray,
            Self::NumberArray(_) => ValueShape::NumberArray,
            Self::StringRange(_) => ValueShape::StringRange,
            Self::NumberRange(_) => ValueShape::NumberRange,
        }
    }

    /// Number of elements for array and range shapes.
    pub fn element_count(&self) -> Option<usize> {
        match self {
            Self::StringArray(v) => Some(v.len()),
            Self::NumberArray(v) => Some(v.len()),
            Self::StringRange(v) => Some(v.len()),
            Self::NumberRange(v) => Some(v.len()),
            _ => None,
        }
    }
}

/// Whether a value counts as "not entered".
///
/// `None`, the empty string and empty arrays are empty. A range holding
/// two unset bounds is *not* empty: it still has two elements.
pub fn is_empty(value: Option<&FieldValue>) -> bool {
    match value {
        None => true,
        Some(FieldValue::String(s)) => s.is_empty(),
        Some(v) => v.element_count() == Some(0),
    }
}

/// The schema fragment family an item compiles to.
///
/// Most kinds follow from the value type; range items additionally
/// distinguish date ranges from plain string ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    String,
    Number,
    Boolean,
    StringArray,
    NumberArray,
    StringRange,
    NumberRange,
    DateRange,
}

/// A Rust type an [`Item`](crate::item::Item) can hold.
///
/// The associated `Rule` ties every value type to exactly one rule type,
/// so an item can never carry a rule declared for another shape.
pub trait ItemValue: Clone + Send + Sync + 'static {
    /// Rule type declared for this value shape.
    type Rule: Clone + fmt::Debug + Default + Into<ValidationRule> + Send + Sync + 'static;

    /// Default fragment family for items of this type.
    const KIND: ItemKind;

    fn to_field_value(&self) -> FieldValue;
}

impl ItemValue for String {
    type Rule = StringValidationRule;
    const KIND: ItemKind = ItemKind::String;

    fn to_field_value(&self) -> FieldValue {
        FieldValue::String(self.clone())
    }
}

impl ItemValue for f64 {
    type Rule = NumberValidationRule;
    const KIND: ItemKind = ItemKind::Number;

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Number(*self)
    }
}

impl ItemValue for bool {
    type Rule = BooleanValidationRule;
    const KIND: ItemKind = ItemKind::Boolean;

    fn to_field_value(&self) -> FieldValue {
        FieldValue::Boolean(*self)
    }
}

impl ItemValue for Vec<String> {
    type Rule = StringArrayValidationRule;
    const KIND: ItemKind = ItemKind::StringArray;

    fn to_field_value(&self) -> FieldValue {
        FieldValue::StringArray(self.clone())
    }
}

impl ItemValue for Vec<f64> {
    type Rule = NumberArrayValidationRule;
    const KIND: ItemKind = ItemKind::NumberArray;

    fn to_field_value(&self) -> FieldValue {
        FieldValue::NumberArray(self.clone())
    }
}

// Range bounds reuse the scalar rule for numbers (min/max apply per bound)
// and the string-array rule for strings (only presence is checked).
impl ItemValue for Vec<Option<f64>> {
    type Rule = NumberValidationRule;
    const KIND: ItemKind = ItemKind::NumberRange;

    fn to_field_value(&self) -> FieldValue {
        FieldValue::NumberRange(self.clone())
    }
}

impl ItemValue for Vec<Option<String>> {
    type Rule = StringArrayValidationRule;
    const KIND: ItemKind = ItemKind::StringRange;

    fn to_field_value(&self) -> FieldValue {
        FieldValue::StringRange(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_values() {
        assert!(is_empty(None));
        assert!(is_empty(Some(&FieldValue::String(String::new()))));
        assert!(is_empty(Some(&FieldValue::StringArray(vec![]))));
        assert!(is_empty(Some(&FieldValue::NumberRange(vec![]))));
    }

    #[test]
    fn test_non_empty_values() {
        assert!(!is_empty(Some(&FieldValue::Number(0.0))));
        assert!(!is_empty(Some(&FieldValue::Boolean(false))));
        assert!(!is_empty(Some(&FieldValue::NumberRange(vec![None, None]))));
    }
}

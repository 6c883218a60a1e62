//! Declarative constraint sets attached to items.
//!
//! One rule struct exists per value shape. Setters consume and return the
//! rule so constraints can be chained:
//!
//! ```
//! use viewbind::rule::StringValidationRule;
//!
//! let rule = StringValidationRule::new()
//!     .set_required(true)
//!     .set_length(Some(3), Some(20))
//!     .set_email(true);
//!
//! assert_eq!(rule.min, Some(3));
//! assert!(rule.email);
//! ```

use serde::{Deserialize, Serialize};

/// Sentinel used when a bound is left open (`2^53 - 1`).
pub const MAX_SAFE_INTEGER: u64 = 9_007_199_254_740_991;

/// Constraints for single-line and multi-line text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StringValidationRule {
    pub required: bool,
    /// Minimum length in characters.
    pub min: Option<u64>,
    /// Maximum length in characters.
    pub max: Option<u64>,
    pub email: bool,
    pub reg_exp: Option<String>,
    pub custom_rule_name: Option<String>,
}

impl StringValidationRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Set both length bounds.
    ///
    /// A missing maximum becomes [`MAX_SAFE_INTEGER`]; a missing minimum
    /// becomes `0`.
    pub fn set_length(mut self, min: Option<u64>, max: Option<u64>) -> Self {
        self.min = Some(min.unwrap_or(0));
        self.max = Some(max.unwrap_or(MAX_SAFE_INTEGER));
        self
    }

    pub fn set_reg_exp(mut self, pattern: impl Into<String>) -> Self {
        self.reg_exp = Some(pattern.into());
        self
    }

    pub fn set_email(mut self, email: bool) -> Self {
        self.email = email;
        self
    }

    pub fn set_custom_rule_name(mut self, name: impl Into<String>) -> Self {
        self.custom_rule_name = Some(name.into());
        self
    }
}

/// Constraints for numeric input. Range items apply `min`/`max` to each bound.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NumberValidationRule {
    pub required: bool,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub custom_rule_name: Option<String>,
}

impl NumberValidationRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Set both bounds.
    ///
    /// Unlike [`StringValidationRule::set_length`], *either* missing bound
    /// becomes [`MAX_SAFE_INTEGER`], including a missing minimum.
    pub fn set_range(mut self, min: Option<f64>, max: Option<f64>) -> Self {
        let open = MAX_SAFE_INTEGER as f64;
        self.min = Some(min.unwrap_or(open));
        self.max = Some(max.unwrap_or(open));
        self
    }

    pub fn set_custom_rule_name(mut self, name: impl Into<String>) -> Self {
        self.custom_rule_name = Some(name.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BooleanValidationRule {
    pub required: bool,
    pub custom_rule_name: Option<String>,
}

impl BooleanValidationRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn set_custom_rule_name(mut self, name: impl Into<String>) -> Self {
        self.custom_rule_name = Some(name.into());
        self
    }
}

/// Constraints for multi-select values and string ranges.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StringArrayValidationRule {
    pub required: bool,
    pub custom_rule_name: Option<String>,
}

impl StringArrayValidationRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn set_custom_rule_name(mut self, name: impl Into<String>) -> Self {
        self.custom_rule_name = Some(name.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NumberArrayValidationRule {
    pub required: bool,
    pub custom_rule_name: Option<String>,
}

impl NumberArrayValidationRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn set_custom_rule_name(mut self, name: impl Into<String>) -> Self {
        self.custom_rule_name = Some(name.into());
        self
    }
}

/// Any rule, erased to the closed set of shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ValidationRule {
    String(StringValidationRule),
    Number(NumberValidationRule),
    Boolean(BooleanValidationRule),
    StringArray(StringArrayValidationRule),
    NumberArray(NumberArrayValidationRule),
}

impl ValidationRule {
    pub fn required(&self) -> bool {
        match self {
            Self::String(r) => r.required,
            Self::Number(r) => r.required,
            Self::Boolean(r) => r.required,
            Self::StringArray(r) => r.required,
            Self::NumberArray(r) => r.required,
        }
    }

    pub fn custom_rule_name(&self) -> Option<&str> {
        match self {
            Self::String(r) => r.custom_rule_name.as_deref(),
            Self::Number(r) => r.custom_rule_name.as_deref(),
            Self::Boolean(r) => r.custom_rule_name.as_deref(),
            Self::StringArray(r) => r.custom_rule_name.as_deref(),
            Self::NumberArray(r) => r.custom_rule_name.as_deref(),
        }
    }
}

impl From<StringValidationRule> for ValidationRule {
    fn from(rule: StringValidationRule) -> Self {
        Self::String(rule)
    }
}

impl From<NumberValidationRule> for ValidationRule {
    fn from(rule: NumberValidationRule) -> Self {
        Self::Number(rule)
    }
}

impl From<BooleanValidationRule> for ValidationRule {
    fn from(rule: BooleanValidationRule) -> Self {
        Self::Boolean(rule)
    }
}

impl From<StringArrayValidationRule> for ValidationRule {
    fn from(rule: StringArrayValidationRule) -> Self {
        Self::StringArray(rule)
    }
}

impl From<NumberArrayValidationRule> for ValidationRule {
    fn from(rule: NumberArrayValidationRule) -> Self {
        Self::NumberArray(rule)
    }
}

// ---------------------------------------------------------------------------
// Factories
// ---------------------------------------------------------------------------

/// Build a string rule. Bounds are applied only when one of them is non-zero.
pub fn string_rule(
    required: bool,
    min: Option<u64>,
    max: Option<u64>,
    custom_rule_name: Option<&str>,
) -> StringValidationRule {
    let mut rule = StringValidationRule::new().set_required(required);
    if min.is_some_and(|m| m != 0) || max.is_some_and(|m| m != 0) {
        rule = rule.set_length(min, max);
    }
    if let Some(name) = custom_rule_name {
        rule = rule.set_custom_rule_name(name);
    }
    rule
}

/// Build a number rule. Bounds are applied only when one of them is non-zero.
pub fn number_rule(
    required: bool,
    min: Option<f64>,
    max: Option<f64>,
    custom_rule_name: Option<&str>,
) -> NumberValidationRule {
    let mut rule = NumberValidationRule::new().set_required(required);
    if min.is_some_and(|m| m != 0.0) || max.is_some_and(|m| m != 0.0) {
        rule = rule.set_range(min, max);
    }
    if let Some(name) = custom_rule_name {
        rule = rule.set_custom_rule_name(name);
    }
    rule
}

pub fn string_array_rule(required: bool, custom_rule_name: Option<&str>) -> StringArrayValidationRule {
    let rule = StringArrayValidationRule::new().set_required(required);
    match custom_rule_name {
        Some(name) => rule.set_custom_rule_name(name),
        None => rule,
    }
}

pub fn number_array_rule(required: bool, custom_rule_name: Option<&str>) -> NumberArrayValidationRule {
    let rule = NumberArrayValidationRule::new().set_required(required);
    match custom_rule_name {
        Some(name) => rule.set_custom_rule_name(name),
        None => rule,
    }
}

pub fn boolean_rule(required: bool, custom_rule_name: Option<&str>) -> BooleanValidationRule {
    let rule = BooleanValidationRule::new().set_required(required);
    match custom_rule_name {
        Some(name) => rule.set_custom_rule_name(name),
        None => rule,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_range_both_bounds() {
        let rule = NumberValidationRule::new().set_range(Some(1.0), Some(10.0));
        assert_eq!(rule.min, Some(1.0));
        assert_eq!(rule.max, Some(10.0));
    }

    #[test]
    fn test_set_range_min_only_opens_max() {
        let rule = NumberValidationRule::new().set_range(Some(1.0), None);
        assert_eq!(rule.min, Some(1.0));
        assert_eq!(rule.max, Some(MAX_SAFE_INTEGER as f64));
    }

    #[test]
    fn test_set_range_max_only_fills_min_with_sentinel() {
        let rule = NumberValidationRule::new().set_range(None, Some(10.0));
        assert_eq!(rule.min, Some(MAX_SAFE_INTEGER as f64));
        assert_eq!(rule.max, Some(10.0));
    }

    #[test]
    fn test_set_length_min_only_opens_max() {
        let rule = StringValidationRule::new().set_length(Some(5), None);
        assert_eq!(rule.min, Some(5));
        assert_eq!(rule.max, Some(MAX_SAFE_INTEGER));
    }

    #[test]
    fn test_set_length_max_only_fills_min_with_zero() {
        let rule = StringValidationRule::new().set_length(None, Some(10));
        assert_eq!(rule.min, Some(0));
        assert_eq!(rule.max, Some(10));
    }

    #[test]
    fn test_reg_exp_and_email() {
        let rule = StringValidationRule::new()
            .set_reg_exp("^[a-zA-Z0-9]+$")
            .set_email(true);
        assert_eq!(rule.reg_exp.as_deref(), Some("^[a-zA-Z0-9]+$"));
        assert!(rule.email);
    }

    #[test]
    fn test_string_rule_factory() {
        let rule = string_rule(true, Some(3), Some(10), Some("customRule"));
        assert!(rule.required);
        assert_eq!(rule.min, Some(3));
        assert_eq!(rule.max, Some(10));
        assert_eq!(rule.custom_rule_name.as_deref(), Some("customRule"));

        let bare = string_rule(true, None, None, None);
        assert_eq!(bare.min, None);
        assert_eq!(bare.max, None);
        assert_eq!(bare.custom_rule_name, None);
    }

    #[test]
    fn test_factory_skips_all_zero_bounds() {
        let rule = number_rule(false, Some(0.0), Some(0.0), None);
        assert_eq!(rule.min, None);
        assert_eq!(rule.max, None);

        let rule = number_rule(true, Some(0.0), Some(20.0), None);
        assert_eq!(rule.min, Some(0.0));
        assert_eq!(rule.max, Some(20.0));
    }

    #[test]
    fn test_erased_rule_accessors() {
        let rule: ValidationRule = boolean_rule(true, Some("mustCheck")).into();
        assert!(rule.required());
        assert_eq!(rule.custom_rule_name(), Some("mustCheck"));
    }

    #[test]
    fn test_rule_deserializes_from_json() {
        let rule: StringValidationRule =
            serde_json::from_str(r#"{"required": true, "max": 8, "customRuleName": "zip"}"#)
                .unwrap();
        assert!(rule.required);
        assert_eq!(rule.max, Some(8));
        assert_eq!(rule.min, None);
        assert_eq!(rule.custom_rule_name.as_deref(), Some("zip"));
    }
}

//! View configuration types.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::custom::CustomValidationRules;
use crate::validation::ValidationBackend;

/// When the UI should trigger item validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidateTrigger {
    /// Validate when the form is submitted.
    #[default]
    OnSubmit,
    /// Validate each item as it loses focus.
    OnBlur,
}

/// Per-view configuration.
#[derive(Debug, Clone, Default)]
pub struct ViewOptions {
    /// Force every item of the view readonly.
    pub readonly: bool,

    pub validate_trigger: ValidateTrigger,

    /// Rules items can reference through `custom_rule_name`.
    pub custom_validation_rules: Option<Arc<CustomValidationRules>>,

    /// Engine the view validates with.
    pub backend: ValidationBackend,
}

impl ViewOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn readonly(mut self, readonly: bool) -> Self {
        self.readonly = readonly;
        self
    }

    pub fn validate_trigger(mut self, trigger: ValidateTrigger) -> Self {
        self.validate_trigger = trigger;
        self
    }

    pub fn custom_validation_rules(mut self, rules: CustomValidationRules) -> Self {
        self.custom_validation_rules = Some(Arc::new(rules));
        self
    }

    /// Share one rule registry between several views.
    pub fn shared_validation_rules(mut self, rules: Arc<CustomValidationRules>) -> Self {
        self.custom_validation_rules = Some(rules);
        self
    }

    pub fn backend(mut self, backend: ValidationBackend) -> Self {
        self.backend = backend;
        self
    }
}

/// Serialisable subset of [`ViewOptions`].
///
/// ```
/// use viewbind::view::{ValidateTrigger, ViewSettings};
///
/// let settings: ViewSettings =
///     serde_json::from_str(r#"{"readonly": true, "validateTrigger": "onBlur"}"#).unwrap();
/// assert_eq!(settings.validate_trigger, ValidateTrigger::OnBlur);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewSettings {
    pub readonly: bool,
    pub validate_trigger: ValidateTrigger,
}

impl From<ViewSettings> for ViewOptions {
    fn from(settings: ViewSettings) -> Self {
        ViewOptions::new()
            .readonly(settings.readonly)
            .validate_trigger(settings.validate_trigger)
    }
}

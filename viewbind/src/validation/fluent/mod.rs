//! Fluent-chain validation engine.
//!
//! Each validation builds a one-field [`Validator`] chain from the item's
//! current rule, so rule changes take effect immediately.

mod result;
mod validator;

use std::sync::Arc;

pub use result::{FieldError, ValidationResult};
pub use validator::{FieldBuilder, Validator};

use super::{ValidationCore, ValidationEvent, messages};
use crate::custom::CustomValidationRules;
use crate::item::AnyItem;
use crate::rule::{NumberValidationRule, StringArrayValidationRule, StringValidationRule, ValidationRule};
use crate::value::{FieldValue, ItemKind};
use crate::view::View;

/// Engine that validates through [`Validator`] chains.
pub struct FluentValidationEvent {
    core: ValidationCore,
}

impl FluentValidationEvent {
    pub fn new(view: &View, custom_rules: Option<Arc<CustomValidationRules>>) -> Self {
        log::debug!("Creating fluent validation event for view {}", view.id());
        Self {
            core: ValidationCore::new(view, custom_rules),
        }
    }

    pub fn core(&self) -> &ValidationCore {
        &self.core
    }
}

impl ValidationEvent for FluentValidationEvent {
    fn on_validate_has_error(&self) -> bool {
        self.core.validate_all(self)
    }

    fn on_validate_item_has_error(&self, value: Option<&FieldValue>, item: &dyn AnyItem) -> bool {
        self.core.run_item(value, item, |value| {
            let key = item.key();
            let builder = item_validator(&key, &item.label(), item.kind(), &item.validation_rule(), value)?;
            match builder.validate().first_error() {
                Some(error) => Err(error.message.clone()),
                None => Ok(()),
            }
        })
    }

    fn validation_error_message(&self, item: &dyn AnyItem) -> String {
        self.core.last_message(&item.key())
    }

    fn reset_error(&self, name: Option<&str>) {
        self.core.reset_error(name);
    }
}

/// Build the chain for one item. Fails only on an unparsable `reg_exp`.
pub fn item_validator(
    key: &str,
    label: &str,
    kind: ItemKind,
    rule: &ValidationRule,
    value: Option<&FieldValue>,
) -> Result<FieldBuilder, String> {
    let field = Validator::new().field(key, value.cloned());
    let builder = match (kind, rule) {
        (ItemKind::NumberRange, ValidationRule::Number(r)) => number_range_checks(field, label, r),
        (ItemKind::StringRange | ItemKind::DateRange, ValidationRule::StringArray(r)) => {
            string_range_checks(field, label, r)
        }
        (_, ValidationRule::String(r)) => string_checks(field, label, r)?,
        (_, ValidationRule::Number(r)) => number_checks(field, label, r),
        (_, ValidationRule::Boolean(r)) if r.required => field.required(messages::required(label)),
        (_, ValidationRule::Boolean(_)) => field,
        (_, ValidationRule::StringArray(r)) => selection_checks(field, label, r.required),
        (_, ValidationRule::NumberArray(r)) => selection_checks(field, label, r.required),
    };
    Ok(builder)
}

fn string_checks(
    mut field: FieldBuilder,
    label: &str,
    rule: &StringValidationRule,
) -> Result<FieldBuilder, String> {
    if rule.required {
        field = field.required(messages::required(label));
    }
    let min = rule.min.or(rule.required.then_some(1));
    if let Some(min) = min {
        let msg = if min == 1 && rule.required {
            messages::required(label)
        } else {
            messages::too_short(label, min)
        };
        field = field.min_length(min, msg);
    }
    if let Some(max) = rule.max {
        field = field.max_length(max, messages::too_long(label, max));
    }
    if rule.email {
        field = field.email(messages::invalid_email(label));
    }
    if let Some(pattern) = &rule.reg_exp {
        field = field
            .pattern(pattern, messages::invalid_pattern(label))
            .map_err(|e| messages::broken_pattern(pattern, &e.to_string()))?;
    }
    Ok(field)
}

fn number_checks(mut field: FieldBuilder, label: &str, rule: &NumberValidationRule) -> FieldBuilder {
    if rule.required {
        field = field.required(messages::required(label));
    }
    if let Some(min) = rule.min {
        field = field.min_value(min, messages::too_small(label, min));
    }
    if let Some(max) = rule.max {
        field = field.max_value(max, messages::too_large(label, max));
    }
    field
}

fn selection_checks(field: FieldBuilder, label: &str, required: bool) -> FieldBuilder {
    if required {
        field
            .required(messages::required_selection(label))
            .min_items(1, messages::required_selection(label))
    } else {
        field
    }
}

fn number_range_checks(mut field: FieldBuilder, label: &str, rule: &NumberValidationRule) -> FieldBuilder {
    if rule.required {
        field = field.required(messages::required(label));
    }
    field = field.elements();
    if rule.required {
        field = field.required(messages::required(label));
    }
    // zero bounds are not applied to range elements
    if let Some(min) = rule.min.filter(|m| *m != 0.0) {
        field = field.min_value(min, messages::too_small(label, min));
    }
    if let Some(max) = rule.max.filter(|m| *m != 0.0) {
        field = field.max_value(max, messages::too_large(label, max));
    }
    field
}

fn string_range_checks(field: FieldBuilder, label: &str, rule: &StringArrayValidationRule) -> FieldBuilder {
    if !rule.required {
        return field;
    }
    field
        .required(messages::required_range(label))
        .exact_items(2, messages::required_range(label))
        .elements()
        .required(messages::required_range(label))
}

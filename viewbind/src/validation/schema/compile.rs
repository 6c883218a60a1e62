//! Translation of item rules into schema fragments.

use super::fragment::{ArrayCheck, FieldSchema, NumberCheck, StringCheck};
use crate::rule::{NumberValidationRule, StringArrayValidationRule, StringValidationRule, ValidationRule};
use crate::validation::messages;
use crate::value::ItemKind;

/// Fragment for an item with the given label, kind and rule.
pub fn field_schema(label: &str, kind: ItemKind, rule: &ValidationRule) -> FieldSchema {
    match (kind, rule) {
        (ItemKind::NumberRange, ValidationRule::Number(r)) => number_range_schema(label, r),
        (ItemKind::StringRange | ItemKind::DateRange, ValidationRule::StringArray(r)) => {
            string_range_schema(label, r)
        }
        (_, ValidationRule::String(r)) => string_schema(label, r),
        (_, ValidationRule::Number(r)) => number_schema(label, r),
        (_, ValidationRule::Boolean(r)) => FieldSchema::Boolean {
            required_message: messages::required(label),
        }
        .optional_unless(r.required),
        (_, ValidationRule::StringArray(r)) => selection_schema(label, r.required, string_element(label)),
        (_, ValidationRule::NumberArray(r)) => selection_schema(label, r.required, number_element(label)),
    }
}

fn string_element(label: &str) -> FieldSchema {
    FieldSchema::String {
        required_message: messages::required(label),
        checks: Vec::new(),
    }
}

fn number_element(label: &str) -> FieldSchema {
    FieldSchema::Number {
        required_message: messages::required(label),
        checks: Vec::new(),
    }
}

fn string_schema(label: &str, rule: &StringValidationRule) -> FieldSchema {
    let mut checks = Vec::new();

    // required strings get a one-character minimum
    if let Some(min) = rule.min.or(rule.required.then_some(1)) {
        let message = if min == 1 && rule.required {
            messages::required(label)
        } else {
            messages::too_short(label, min)
        };
        checks.push(StringCheck::MinLength { min, message });
    }
    if let Some(max) = rule.max {
        checks.push(StringCheck::MaxLength {
            max,
            message: messages::too_long(label, max),
        });
    }
    if rule.email {
        checks.push(StringCheck::Email {
            message: messages::invalid_email(label),
        });
    }
    if let Some(pattern) = &rule.reg_exp {
        checks.push(StringCheck::Pattern {
            pattern: pattern.clone(),
            message: messages::invalid_pattern(label),
        });
    }

    FieldSchema::String {
        required_message: messages::required(label),
        checks,
    }
    .optional_unless(rule.required)
}

fn number_checks(label: &str, min: Option<f64>, max: Option<f64>) -> Vec<NumberCheck> {
    let mut checks = Vec::new();
    if let Some(value) = min {
        checks.push(NumberCheck::Min {
            value,
            message: messages::too_small(label, value),
        });
    }
    if let Some(value) = max {
        checks.push(NumberCheck::Max {
            value,
            message: messages::too_large(label, value),
        });
    }
    checks
}

fn number_schema(label: &str, rule: &NumberValidationRule) -> FieldSchema {
    FieldSchema::Number {
        required_message: messages::required(label),
        checks: number_checks(label, rule.min, rule.max),
    }
    .optional_unless(rule.required)
}

/// Multi-select values: at least one element when required.
fn selection_schema(label: &str, required: bool, element: FieldSchema) -> FieldSchema {
    let checks = if required {
        vec![ArrayCheck::MinItems {
            min: 1,
            message: messages::required_selection(label),
        }]
    } else {
        Vec::new()
    };
    FieldSchema::Array {
        required_message: messages::required_selection(label),
        checks,
        element: Box::new(element.optional_unless(required)),
    }
    .optional_unless(required)
}

fn number_range_schema(label: &str, rule: &NumberValidationRule) -> FieldSchema {
    // zero bounds are not applied to range elements
    let element = FieldSchema::Number {
        required_message: messages::required(label),
        checks: number_checks(
            label,
            rule.min.filter(|m| *m != 0.0),
            rule.max.filter(|m| *m != 0.0),
        ),
    };
    FieldSchema::Array {
        required_message: messages::required(label),
        checks: Vec::new(),
        element: Box::new(element.optional_unless(rule.required)),
    }
    .optional_unless(rule.required)
}

fn string_range_schema(label: &str, rule: &StringArrayValidationRule) -> FieldSchema {
    let element = FieldSchema::String {
        required_message: messages::required_range(label),
        checks: Vec::new(),
    };
    let checks = if rule.required {
        vec![ArrayCheck::Length {
            len: 2,
            message: messages::required_range(label),
        }]
    } else {
        Vec::new()
    };
    FieldSchema::Array {
        required_message: messages::required_range(label),
        checks,
        element: Box::new(element.optional_unless(rule.required)),
    }
    .optional_unless(rule.required)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::{boolean_rule, string_array_rule, string_rule};

    #[test]
    fn test_required_string_gets_min_one() {
        let schema = field_schema("Name", ItemKind::String, &string_rule(true, None, None, None).into());
        match schema {
            FieldSchema::String { checks, .. } => assert_eq!(
                checks,
                vec![StringCheck::MinLength {
                    min: 1,
                    message: messages::required("Name"),
                }]
            ),
            other => panic!("unexpected fragment {other:?}"),
        }
    }

    #[test]
    fn test_optional_string_is_wrapped() {
        let schema = field_schema("Name", ItemKind::String, &string_rule(false, None, None, None).into());
        assert!(matches!(schema, FieldSchema::Optional { .. }));
    }

    #[test]
    fn test_explicit_min_uses_short_message() {
        let schema = field_schema("Code", ItemKind::String, &string_rule(true, Some(3), None, None).into());
        let FieldSchema::String { checks, .. } = schema else {
            panic!("expected a string fragment");
        };
        assert_eq!(
            checks[0],
            StringCheck::MinLength {
                min: 3,
                message: messages::too_short("Code", 3),
            }
        );
    }

    #[test]
    fn test_date_range_requires_a_pair() {
        let schema = field_schema("Period", ItemKind::DateRange, &string_array_rule(true, None).into());
        let FieldSchema::Array { checks, element, .. } = schema else {
            panic!("expected an array fragment");
        };
        assert_eq!(checks.len(), 1);
        assert!(matches!(*element, FieldSchema::String { .. }));
    }

    #[test]
    fn test_boolean_fragment() {
        let schema = field_schema("Agree", ItemKind::Boolean, &boolean_rule(true, None).into());
        assert!(matches!(schema, FieldSchema::Boolean { .. }));
    }
}

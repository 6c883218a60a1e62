//! Validator builder for the fluent validation API.

use email_address::EmailAddress;

use super::result::{FieldError, ValidationResult};
use crate::value::FieldValue;

/// Type alias for check closures. `Err` carries the message.
type Check = Box<dyn Fn(Option<&FieldValue>) -> Result<(), String> + Send + Sync>;

/// Internal representation of a field being validated.
struct FieldEntry {
    name: String,
    value: Option<FieldValue>,
    checks: Vec<Check>,
    element_checks: Vec<Check>,
}

impl FieldEntry {
    /// Messages of every violated check: field checks first, then element
    /// checks element by element.
    fn errors(&self) -> Vec<String> {
        let mut errors: Vec<String> = self
            .checks
            .iter()
            .filter_map(|check| check(self.value.as_ref()).err())
            .collect();

        if !self.element_checks.is_empty() {
            for element in elements(self.value.as_ref()) {
                errors.extend(
                    self.element_checks
                        .iter()
                        .filter_map(|check| check(element.as_ref()).err()),
                );
            }
        }

        errors
    }
}

/// Split array and range values into their elements; unset bounds stay `None`.
fn elements(value: Option<&FieldValue>) -> Vec<Option<FieldValue>> {
    match value {
        Some(FieldValue::StringArray(v)) => {
            v.iter().map(|s| Some(FieldValue::String(s.clone()))).collect()
        }
        Some(FieldValue::NumberArray(v)) => v.iter().map(|n| Some(FieldValue::Number(*n))).collect(),
        Some(FieldValue::StringRange(v)) => v
            .iter()
            .map(|s| s.clone().map(FieldValue::String))
            .collect(),
        Some(FieldValue::NumberRange(v)) => v.iter().map(|n| n.map(FieldValue::Number)).collect(),
        _ => Vec::new(),
    }
}

/// Builder for validating several fields at once.
///
/// # Example
///
/// ```
/// use viewbind::validation::fluent::Validator;
/// use viewbind::value::FieldValue;
///
/// let result = Validator::new()
///     .field("name", Some(FieldValue::String("Al".into())))
///         .required("Name is required")
///         .min_length(3, "Name is too short")
///     .field("tags", Some(FieldValue::StringRange(vec![Some("a".into()), None])))
///         .exact_items(2, "Pick two")
///         .elements()
///         .required("Both ends are required")
///     .validate();
///
/// assert_eq!(result.message_for("name"), Some("Name is too short"));
/// assert_eq!(result.message_for("tags"), Some("Both ends are required"));
/// ```
#[derive(Default)]
pub struct Validator {
    fields: Vec<FieldEntry>,
}

impl Validator {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Add a field to validate.
    pub fn field(self, name: impl Into<String>, value: Option<FieldValue>) -> FieldBuilder {
        FieldBuilder {
            validator: self,
            name: name.into(),
            value,
            checks: Vec::new(),
            element_checks: Vec::new(),
            on_elements: false,
        }
    }

    /// Run every check. Each failing field reports its first message.
    pub fn validate(self) -> ValidationResult {
        let errors: Vec<FieldError> = self
            .fields
            .iter()
            .filter_map(|field| {
                field.errors().into_iter().next().map(|message| FieldError {
                    field_name: field.name.clone(),
                    message,
                })
            })
            .collect();

        if errors.is_empty() {
            ValidationResult::Valid
        } else {
            ValidationResult::Invalid(errors)
        }
    }
}

/// Builder for adding checks to a single field.
///
/// Every check except [`required`](Self::required) passes when the value is
/// absent, and passes on shapes it does not inspect.
pub struct FieldBuilder {
    validator: Validator,
    name: String,
    value: Option<FieldValue>,
    checks: Vec<Check>,
    element_checks: Vec<Check>,
    on_elements: bool,
}

impl FieldBuilder {
    fn push(mut self, check: Check) -> Self {
        if self.on_elements {
            self.element_checks.push(check);
        } else {
            self.checks.push(check);
        }
        self
    }

    /// Add a custom check.
    pub fn rule<F>(self, f: F, msg: impl Into<String>) -> Self
    where
        F: Fn(Option<&FieldValue>) -> bool + Send + Sync + 'static,
    {
        let msg = msg.into();
        self.push(Box::new(move |v: Option<&FieldValue>| if f(v) { Ok(()) } else { Err(msg.clone()) }))
    }

    /// Apply the following checks to each element of an array or range.
    pub fn elements(mut self) -> Self {
        self.on_elements = true;
        self
    }

    /// Continue to the next field.
    pub fn field(self, name: impl Into<String>, value: Option<FieldValue>) -> FieldBuilder {
        self.finalize().field(name, value)
    }

    /// Finalize and run every check.
    pub fn validate(self) -> ValidationResult {
        self.finalize().validate()
    }

    fn finalize(self) -> Validator {
        let mut validator = self.validator;
        validator.fields.push(FieldEntry {
            name: self.name,
            value: self.value,
            checks: self.checks,
            element_checks: self.element_checks,
        });
        validator
    }

    /// Require a value.
    pub fn required(self, msg: impl Into<String>) -> Self {
        self.rule(|v| v.is_some(), msg)
    }

    /// Require a minimum length (in characters).
    pub fn min_length(self, min: u64, msg: impl Into<String>) -> Self {
        self.rule(
            move |v| match v {
                Some(FieldValue::String(s)) => s.chars().count() as u64 >= min,
                _ => true,
            },
            msg,
        )
    }

    /// Require a maximum length (in characters).
    pub fn max_length(self, max: u64, msg: impl Into<String>) -> Self {
        self.rule(
            move |v| match v {
                Some(FieldValue::String(s)) => s.chars().count() as u64 <= max,
                _ => true,
            },
            msg,
        )
    }

    /// Require the value to match a regex pattern.
    pub fn pattern(self, pattern: &str, msg: impl Into<String>) -> Result<Self, regex::Error> {
        let re = regex::Regex::new(pattern)?;
        Ok(self.rule(
            move |v| match v {
                Some(FieldValue::String(s)) => re.is_match(s),
                _ => true,
            },
            msg,
        ))
    }

    /// Require a valid email address.
    pub fn email(self, msg: impl Into<String>) -> Self {
        self.rule(
            |v| match v {
                Some(FieldValue::String(s)) => EmailAddress::is_valid(s),
                _ => true,
            },
            msg,
        )
    }

    /// Require a number of at least `min`.
    pub fn min_value(self, min: f64, msg: impl Into<String>) -> Self {
        self.rule(
            move |v| match v {
                Some(FieldValue::Number(n)) => *n >= min,
                _ => true,
            },
            msg,
        )
    }

    /// Require a number of at most `max`.
    pub fn max_value(self, max: f64, msg: impl Into<String>) -> Self {
        self.rule(
            move |v| match v {
                Some(FieldValue::Number(n)) => *n <= max,
                _ => true,
            },
            msg,
        )
    }

    /// Require at least `min` elements.
    pub fn min_items(self, min: usize, msg: impl Into<String>) -> Self {
        self.rule(
            move |v| v.and_then(FieldValue::element_count).is_none_or(|n| n >= min),
            msg,
        )
    }

    /// Require exactly `len` elements.
    pub fn exact_items(self, len: usize, msg: impl Into<String>) -> Self {
        self.rule(
            move |v| v.and_then(FieldValue::element_count).is_none_or(|n| n == len),
            msg,
        )
    }
}

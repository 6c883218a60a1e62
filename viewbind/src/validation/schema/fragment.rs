//! Declarative per-field schema fragments.

use std::collections::HashMap;

use email_address::EmailAddress;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::error::{Issue, PathSegment, SchemaError};
use crate::validation::messages;
use crate::value::FieldValue;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "check", rename_all = "snake_case")]
pub enum StringCheck {
    MinLength { min: u64, message: String },
    MaxLength { max: u64, message: String },
    Email { message: String },
    Pattern { pattern: String, message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "check", rename_all = "snake_case")]
pub enum NumberCheck {
    /// Inclusive lower bound.
    Min { value: f64, message: String },
    /// Inclusive upper bound.
    Max { value: f64, message: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "check", rename_all = "snake_case")]
pub enum ArrayCheck {
    MinItems { min: usize, message: String },
    Length { len: usize, message: String },
}

/// Schema of a single field.
///
/// Non-optional fragments reject an absent value with their
/// `required_message`. Array checks run before element checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldSchema {
    String {
        required_message: String,
        #[serde(default)]
        checks: Vec<StringCheck>,
    },
    Number {
        required_message: String,
        #[serde(default)]
        checks: Vec<NumberCheck>,
    },
    Boolean {
        required_message: String,
    },
    Array {
        required_message: String,
        #[serde(default)]
        checks: Vec<ArrayCheck>,
        element: Box<FieldSchema>,
    },
    Optional {
        inner: Box<FieldSchema>,
    },
}

impl FieldSchema {
    /// Wrap in [`FieldSchema::Optional`] unless `required`.
    pub fn optional_unless(self, required: bool) -> Self {
        if required {
            self
        } else {
            Self::Optional {
                inner: Box::new(self),
            }
        }
    }

    fn patterns(&self) -> Vec<&str> {
        match self {
            Self::String { checks, .. } => checks
                .iter()
                .filter_map(|c| match c {
                    StringCheck::Pattern { pattern, .. } => Some(pattern.as_str()),
                    _ => None,
                })
                .collect(),
            Self::Array { element, .. } => element.patterns(),
            Self::Optional { inner } => inner.patterns(),
            Self::Number { .. } | Self::Boolean { .. } => Vec::new(),
        }
    }
}

/// A fragment with its regular expressions compiled.
#[derive(Debug, Clone)]
pub struct CompiledField {
    schema: FieldSchema,
    regexes: HashMap<String, Regex>,
}

impl CompiledField {
    pub fn compile(schema: FieldSchema) -> Result<Self, SchemaError> {
        let mut regexes = HashMap::new();
        for pattern in schema.patterns() {
            let re = Regex::new(pattern).map_err(|e| SchemaError::InvalidPattern {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })?;
            regexes.insert(pattern.to_string(), re);
        }
        Ok(Self { schema, regexes })
    }

    pub fn schema(&self) -> &FieldSchema {
        &self.schema
    }

    /// Check `value` as the field `key`.
    pub fn parse(&self, key: &str, value: Option<&FieldValue>) -> Result<(), SchemaError> {
        let mut issues = Vec::new();
        let mut path = vec![PathSegment::Key(key.to_string())];
        self.parse_node(&self.schema, value, &mut path, &mut issues);
        if issues.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::Invalid(issues))
        }
    }

    fn parse_node(
        &self,
        schema: &FieldSchema,
        value: Option<&FieldValue>,
        path: &mut Vec<PathSegment>,
        issues: &mut Vec<Issue>,
    ) {
        match (schema, value) {
            (FieldSchema::Optional { .. }, None) => {}
            (FieldSchema::Optional { inner }, Some(_)) => self.parse_node(inner, value, path, issues),

            (
                FieldSchema::String { required_message, .. }
                | FieldSchema::Number { required_message, .. }
                | FieldSchema::Boolean { required_message }
                | FieldSchema::Array { required_message, .. },
                None,
            ) => push_issue(issues, path, required_message),

            (FieldSchema::String { checks, .. }, Some(FieldValue::String(s))) => {
                for check in checks {
                    if let Some(message) = self.string_violation(check, s) {
                        push_issue(issues, path, message);
                    }
                }
            }

            (FieldSchema::Number { checks, .. }, Some(FieldValue::Number(n))) => {
                for check in checks {
                    match check {
                        NumberCheck::Min { value, message } if *n < *value => {
                            push_issue(issues, path, message)
                        }
                        NumberCheck::Max { value, message } if *n > *value => {
                            push_issue(issues, path, message)
                        }
                        _ => {}
                    }
                }
            }

            (FieldSchema::Boolean { .. }, Some(FieldValue::Boolean(_))) => {}

            (FieldSchema::Array { checks, element, .. }, Some(v)) if v.element_count().is_some() => {
                let count = v.element_count().unwrap_or_default();
                for check in checks {
                    match check {
                        ArrayCheck::MinItems { min, message } if count < *min => {
                            push_issue(issues, path, message)
                        }
                        ArrayCheck::Length { len, message } if count != *len => {
                            push_issue(issues, path, message)
                        }
                        _ => {}
                    }
                }
                for (i, el) in elements(v).into_iter().enumerate() {
                    path.push(PathSegment::Index(i));
                    self.parse_node(element, el.as_ref(), path, issues);
                    path.pop();
                }
            }

            (schema, Some(v)) => {
                let expected = match schema {
                    FieldSchema::String { .. } => "string",
                    FieldSchema::Number { .. } => "number",
                    FieldSchema::Boolean { .. } => "boolean",
                    _ => "array",
                };
                push_issue(issues, path, &messages::invalid_type(expected, v.shape().as_str()));
            }
        }
    }

    fn string_violation<'a>(&self, check: &'a StringCheck, s: &str) -> Option<&'a str> {
        let ok = match check {
            StringCheck::MinLength { min, .. } => s.chars().count() as u64 >= *min,
            StringCheck::MaxLength { max, .. } => s.chars().count() as u64 <= *max,
            StringCheck::Email { .. } => EmailAddress::is_valid(s),
            StringCheck::Pattern { pattern, .. } => {
                self.regexes.get(pattern).is_some_and(|re| re.is_match(s))
            }
        };
        if ok {
            return None;
        }
        match check {
            StringCheck::MinLength { message, .. }
            | StringCheck::MaxLength { message, .. }
            | StringCheck::Email { message }
            | StringCheck::Pattern { message, .. } => Some(message),
        }
    }
}

fn push_issue(issues: &mut Vec<Issue>, path: &[PathSegment], message: &str) {
    issues.push(Issue::new(path.to_vec(), message));
}

fn elements(value: &FieldValue) -> Vec<Option<FieldValue>> {
    match value {
        FieldValue::StringArray(v) => v.iter().cloned().map(FieldValue::String).map(Some).collect(),
        FieldValue::NumberArray(v) => v.iter().copied().map(FieldValue::Number).map(Some).collect(),
        FieldValue::StringRange(v) => v.iter().map(|s| s.clone().map(FieldValue::String)).collect(),
        FieldValue::NumberRange(v) => v.iter().map(|n| n.map(FieldValue::Number)).collect(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> FieldValue {
        FieldValue::String(s.to_string())
    }

    #[test]
    fn test_optional_accepts_absent_values() {
        let schema = FieldSchema::String {
            required_message: "required".into(),
            checks: vec![],
        }
        .optional_unless(false);
        let field = CompiledField::compile(schema).unwrap();
        assert!(field.parse("name", None).is_ok());
    }

    #[test]
    fn test_string_checks_report_in_order() {
        let schema = FieldSchema::String {
            required_message: "required".into(),
            checks: vec![
                StringCheck::MinLength { min: 5, message: "short".into() },
                StringCheck::Pattern { pattern: "^[0-9]+$".into(), message: "digits".into() },
            ],
        };
        let field = CompiledField::compile(schema).unwrap();
        let err = field.parse("code", Some(&text("ab"))).unwrap_err();
        let messages: Vec<&str> = err.issues().iter().map(|i| i.message.as_str()).collect();
        assert_eq!(messages, vec!["short", "digits"]);
        assert_eq!(err.message_for("code"), "short");
    }

    #[test]
    fn test_invalid_pattern_fails_compilation() {
        let schema = FieldSchema::String {
            required_message: "required".into(),
            checks: vec![StringCheck::Pattern { pattern: "(".into(), message: "x".into() }],
        };
        assert!(matches!(
            CompiledField::compile(schema),
            Err(SchemaError::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_array_length_before_elements() {
        let schema = FieldSchema::Array {
            required_message: "required".into(),
            checks: vec![ArrayCheck::Length { len: 2, message: "pair".into() }],
            element: Box::new(FieldSchema::String {
                required_message: "bound".into(),
                checks: vec![],
            }),
        };
        let field = CompiledField::compile(schema).unwrap();
        let err = field
            .parse("period", Some(&FieldValue::StringRange(vec![None])))
            .unwrap_err();
        assert_eq!(err.message_for("period"), "pair");
        assert_eq!(err.issues()[1].path, vec![PathSegment::Key("period".into()), PathSegment::Index(0)]);
    }

    #[test]
    fn test_type_mismatch() {
        let schema = FieldSchema::Number {
            required_message: "required".into(),
            checks: vec![],
        };
        let field = CompiledField::compile(schema).unwrap();
        let err = field.parse("age", Some(&text("x"))).unwrap_err();
        assert_eq!(err.message_for("age"), "Expected number, received string");
    }

    #[test]
    fn test_fragment_json_shape() {
        let schema = FieldSchema::Boolean {
            required_message: "required".into(),
        }
        .optional_unless(false);
        let json = serde_json::to_value(&schema).unwrap();
        assert_eq!(json["type"], "optional");
        assert_eq!(json["inner"]["type"], "boolean");

        let back: FieldSchema = serde_json::from_value(json).unwrap();
        assert_eq!(back, schema);
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Step in the path to a failing value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(k) => f.write_str(k),
            Self::Index(i) => write!(f, "{i}"),
        }
    }
}

/// One violated constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub path: Vec<PathSegment>,
    pub message: String,
}

impl Issue {
    pub fn new(path: Vec<PathSegment>, message: impl Into<String>) -> Self {
        Self {
            path,
            message: message.into(),
        }
    }

    pub fn touches(&self, key: &str) -> bool {
        self.path
            .iter()
            .any(|segment| matches!(segment, PathSegment::Key(k) if k == key))
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    /// The value violates its fragment. Issues are in check order.
    #[error("{}", .0.first().map(|i| i.message.as_str()).unwrap_or("Invalid value"))]
    Invalid(Vec<Issue>),

    #[error("No schema fragment was compiled for '{key}'")]
    UnknownField { key: String },

    #[error("Invalid regular expression '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

impl SchemaError {
    pub fn issues(&self) -> &[Issue] {
        match self {
            Self::Invalid(issues) => issues,
            _ => &[],
        }
    }

    /// Message to show on the item registered as `key`.
    ///
    /// For validation failures this is the first issue whose path includes
    /// `key`; every other error reports its own description.
    pub fn message_for(&self, key: &str) -> String {
        match self {
            Self::Invalid(issues) => issues
                .iter()
                .find(|i| i.touches(key))
                .map(|i| i.message.clone())
                .unwrap_or_default(),
            other => other.to_string(),
        }
    }
}

use thiserror::Error;

/// Errors that can occur when building a view.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    #[error("Duplicate key '{0}' in view definition")]
    DuplicateKey(String),

    #[error("Empty key in view definition")]
    EmptyKey,
}

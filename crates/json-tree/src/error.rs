use thiserror::Error;

/// Errors raised by the container accessors.
#[derive(Debug, Error)]
pub enum TreeError {
    #[error("key not found: {0:?}")]
    KeyNotFound(String),
    #[error("index {index} out of bounds for array of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error("container is exclusively borrowed")]
    Borrowed,
    #[error("value at {0:?} is not an object")]
    NotAnObject(String),
    #[error("value at {0:?} is not an array")]
    NotAnArray(String),
    #[error("value at {key:?} is not a {expected}: found {found}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },
    #[error("cyclic structure cannot be converted to plain JSON")]
    Cycle,
    #[error(transparent)]
    Parse(#[from] serde_json::Error),
}

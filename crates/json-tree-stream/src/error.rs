use json_tree::TreeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NodeError {
    /// A typed accessor was called on a value of another kind.
    #[error("value is not a {expected}: {value}")]
    TypeMismatch { expected: &'static str, value: String },
    #[error(transparent)]
    Tree(#[from] TreeError),
}

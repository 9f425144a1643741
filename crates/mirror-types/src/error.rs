use thiserror::Error;

pub type Result<T> = std::result::Result<T, TypeError>;

/// The observable failure taxonomy of the type algebra.
///
/// "No inheritance path" is not an error: [`crate::instantiate_supertype`]
/// reports it as `None`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("missing operand: {0}")]
    MissingOperand(String),
    #[error("illegal state: {0}")]
    IllegalState(String),
    #[error("unsupported: {0}")]
    Unsupported(String),
}

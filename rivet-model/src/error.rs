use thiserror::Error;

/// Result type for entity field operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised when writing entity fields.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    /// The pointer is empty or does not start with `/`.
    #[error("invalid JSON pointer: {0:?}")]
    InvalidPointer(String),

    /// A segment of the pointer runs through a value that is not an object.
    #[error("cannot write through non-object value at {0}")]
    NotAnObject(String),
}

//! Model errors.

use thiserror::Error;

use crate::ids::TypeId;

/// Errors from the descriptor model.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ModelError {
    /// The provider does not know the requested type id.
    #[error("Unknown type: {0}")]
    UnknownType(TypeId),
}

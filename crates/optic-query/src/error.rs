//! Query errors and signature rendering.

use thiserror::Error;

use optic_model::{Introspector, MemberKind, ModelError, TypeId};

/// Errors from matcher construction and member resolution.
///
/// Failed resolutions are not transient: callers must translate them into
/// their own domain errors rather than retry.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum QueryError {
    /// A required input was missing or malformed.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Exact resolution found no candidate.
    #[error("No such {kind} in {owner}: {signature}")]
    UnknownMember {
        /// The requested member kind.
        kind: MemberKind,
        /// Name of the type the search started from.
        owner: String,
        /// Rendered signature of the request.
        signature: String,
    },
}

impl From<ModelError> for QueryError {
    fn from(err: ModelError) -> Self {
        QueryError::InvalidArgument(err.to_string())
    }
}

/// Render a parameter list as `int, Integer`.
pub(crate) fn render_params(intr: &Introspector, params: &[TypeId]) -> String {
    params
        .iter()
        .map(|&ty| intr.type_name(ty))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render a method request as `name(int, Integer)`.
pub(crate) fn method_signature(intr: &Introspector, name: &str, params: &[TypeId]) -> String {
    format!("{}({})", name, render_params(intr, params))
}

/// Render a constructor request as `Owner(int, Integer)`.
pub(crate) fn constructor_signature(
    intr: &Introspector,
    owner: TypeId,
    params: &[TypeId],
) -> String {
    format!("{}({})", intr.type_name(owner), render_params(intr, params))
}

//! Member descriptor model for the optic introspection library.
//!
//! This crate defines the data side of member resolution: identities for
//! native types and members, the behavioral flag bitset, raw metadata
//! records, the [`MetadataProvider`] trait a host platform implements, an
//! in-memory [`TypeModel`] provider, and the cached, identity-preserving
//! descriptor wrappers handed out by an [`Introspector`].
//!
//! Descriptors are immutable once constructed and shared via `Arc`; two
//! wraps of the same native member always return the same descriptor
//! instance for the lifetime of the owning introspector.

mod descriptor;
mod error;
mod flags;
mod ids;
mod introspector;
mod model;
mod provider;
mod raw;

pub use descriptor::{
    ConstructorDescriptor, FieldDescriptor, Member, MethodDescriptor, TypeDescriptor,
};
pub use error::ModelError;
pub use flags::MemberFlags;
pub use ids::{MemberId, TypeId};
pub use introspector::Introspector;
pub use model::{ConstructorSpec, FieldSpec, MethodSpec, ModelBuilder, TypeModel, TypeSpec};
pub use provider::MetadataProvider;
pub use raw::{MetadataTag, RawConstructor, RawField, RawMethod, RawType};

/// The kind of a resolvable member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    /// A (possibly nested) type.
    Type,
    /// A field.
    Field,
    /// A method.
    Method,
    /// A constructor.
    Constructor,
}

impl std::fmt::Display for MemberKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MemberKind::Type => write!(f, "type"),
            MemberKind::Field => write!(f, "field"),
            MemberKind::Method => write!(f, "method"),
            MemberKind::Constructor => write!(f, "constructor"),
        }
    }
}

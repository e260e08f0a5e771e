//! The metadata provider seam.
//!
//! A host platform exposes its type system through this trait. The core
//! only ever asks for directly declared members; inherited members are
//! discovered by walking the single-parent ancestor chain.

use crate::ids::TypeId;
use crate::raw::{RawConstructor, RawField, RawMethod, RawType};

/// Structural metadata source for a type system.
///
/// Implementations must be consistent: every id returned from a declaration
/// list must be describable, and `ancestor_of` chains must terminate.
/// Declaration order is implementation-defined but stable; the core never
/// re-sorts it.
pub trait MetadataProvider: Send + Sync {
    /// Describe a type, or `None` if the id is unknown.
    fn describe_type(&self, ty: TypeId) -> Option<RawType>;

    /// Directly declared fields of a type, in declaration order.
    fn declared_fields(&self, ty: TypeId) -> Vec<RawField>;

    /// Directly declared methods of a type, in declaration order.
    fn declared_methods(&self, ty: TypeId) -> Vec<RawMethod>;

    /// Directly declared constructors of a type, in declaration order.
    fn declared_constructors(&self, ty: TypeId) -> Vec<RawConstructor>;

    /// Directly declared nested types of a type.
    fn declared_nested_types(&self, ty: TypeId) -> Vec<TypeId>;

    /// The single parent of a type, or `None` for a root.
    fn ancestor_of(&self, ty: TypeId) -> Option<TypeId>;

    /// Native subtype test: whether a value of type `candidate` can be used
    /// where `target` is expected. Bare primitives are only assignable to
    /// themselves.
    fn is_assignable(&self, target: TypeId, candidate: TypeId) -> bool;
}

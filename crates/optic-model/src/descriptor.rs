//! Cached descriptor wrappers over raw member records.
//!
//! Descriptors are immutable and identity-preserving: equality and hashing
//! are defined by the wrapped native member's identity alone, and the
//! [`Introspector`](crate::Introspector) guarantees one descriptor instance
//! per native member.

use std::hash::{Hash, Hasher};

use crate::flags::MemberFlags;
use crate::ids::{MemberId, TypeId};
use crate::introspector::Introspector;
use crate::raw::{MetadataTag, RawConstructor, RawField, RawMethod, RawType};

/// Uniform accessor surface shared by all descriptors.
///
/// Flag predicates are derived from the behavioral flag bitset; package
/// privacy is the absence of all three visibility flags.
pub trait Member {
    /// The member name.
    fn name(&self) -> &str;

    /// The behavioral flags.
    fn flags(&self) -> MemberFlags;

    /// Whether the member was generated by the host platform.
    fn is_synthetic(&self) -> bool;

    /// All attached metadata tags.
    fn tags(&self) -> &[MetadataTag];

    /// The declaring type, if any. Top-level types have none.
    fn declaring_type(&self) -> Option<TypeId>;

    /// Look up a metadata tag by tag type.
    ///
    /// At most one tag per tag type is assumed; the first match is returned.
    fn tag(&self, tag_type: TypeId) -> Option<&MetadataTag> {
        self.tags().iter().find(|t| t.tag_type == tag_type)
    }

    /// Whether the member is public.
    fn is_public(&self) -> bool {
        self.flags().contains(MemberFlags::PUBLIC)
    }

    /// Whether the member is private.
    fn is_private(&self) -> bool {
        self.flags().contains(MemberFlags::PRIVATE)
    }

    /// Whether the member is protected.
    fn is_protected(&self) -> bool {
        self.flags().contains(MemberFlags::PROTECTED)
    }

    /// Whether the member is package private.
    ///
    /// This is not a flag of its own but the absence of any visibility flag.
    fn is_package_private(&self) -> bool {
        !self.flags().intersects(MemberFlags::VISIBILITY)
    }

    /// Whether the member is static.
    fn is_static(&self) -> bool {
        self.flags().contains(MemberFlags::STATIC)
    }

    /// Whether the member is final.
    fn is_final(&self) -> bool {
        self.flags().contains(MemberFlags::FINAL)
    }

    /// Whether the member is abstract.
    fn is_abstract(&self) -> bool {
        self.flags().contains(MemberFlags::ABSTRACT)
    }

    /// Whether the member is natively implemented.
    fn is_native(&self) -> bool {
        self.flags().contains(MemberFlags::NATIVE)
    }

    /// Whether the member is synchronized.
    fn is_synchronized(&self) -> bool {
        self.flags().contains(MemberFlags::SYNCHRONIZED)
    }

    /// Whether the member is transient.
    fn is_transient(&self) -> bool {
        self.flags().contains(MemberFlags::TRANSIENT)
    }

    /// Whether the member is volatile.
    fn is_volatile(&self) -> bool {
        self.flags().contains(MemberFlags::VOLATILE)
    }

    /// Whether the member uses strict floating point semantics.
    fn is_strict(&self) -> bool {
        self.flags().contains(MemberFlags::STRICT)
    }

    /// Whether the member is an interface kind.
    fn is_interface(&self) -> bool {
        self.flags().contains(MemberFlags::INTERFACE)
    }
}

macro_rules! impl_member {
    ($ty:ty) => {
        impl Member for $ty {
            fn name(&self) -> &str {
                &self.raw.name
            }

            fn flags(&self) -> MemberFlags {
                self.raw.flags
            }

            fn is_synthetic(&self) -> bool {
                self.raw.synthetic
            }

            fn tags(&self) -> &[MetadataTag] {
                &self.raw.tags
            }

            fn declaring_type(&self) -> Option<TypeId> {
                Some(self.raw.declaring_type)
            }
        }

        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                self.raw.id == other.raw.id
            }
        }

        impl Eq for $ty {}

        impl Hash for $ty {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.raw.id.hash(state);
            }
        }
    };
}

/// An immutable field wrapper.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    raw: RawField,
}

impl_member!(FieldDescriptor);

impl FieldDescriptor {
    pub(crate) fn new(raw: RawField) -> Self {
        Self { raw }
    }

    /// The wrapped member identity.
    pub fn id(&self) -> MemberId {
        self.raw.id
    }

    /// The field value type.
    pub fn value_type(&self) -> TypeId {
        self.raw.value_type
    }
}

/// An immutable method wrapper.
#[derive(Debug, Clone)]
pub struct MethodDescriptor {
    raw: RawMethod,
}

impl_member!(MethodDescriptor);

impl MethodDescriptor {
    pub(crate) fn new(raw: RawMethod) -> Self {
        Self { raw }
    }

    /// The wrapped member identity.
    pub fn id(&self) -> MemberId {
        self.raw.id
    }

    /// Ordered parameter types.
    pub fn params(&self) -> &[TypeId] {
        &self.raw.params
    }

    /// Ordered declared-thrown types.
    pub fn throws(&self) -> &[TypeId] {
        &self.raw.throws
    }

    /// The result type.
    pub fn result(&self) -> TypeId {
        self.raw.result
    }
}

/// An immutable constructor wrapper.
#[derive(Debug, Clone)]
pub struct ConstructorDescriptor {
    raw: RawConstructor,
}

impl_member!(ConstructorDescriptor);

impl ConstructorDescriptor {
    pub(crate) fn new(raw: RawConstructor) -> Self {
        Self { raw }
    }

    /// The wrapped member identity.
    pub fn id(&self) -> MemberId {
        self.raw.id
    }

    /// Ordered parameter types.
    pub fn params(&self) -> &[TypeId] {
        &self.raw.params
    }

    /// Ordered declared-thrown types.
    pub fn throws(&self) -> &[TypeId] {
        &self.raw.throws
    }
}

/// An immutable type wrapper.
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    raw: RawType,
}

impl Member for TypeDescriptor {
    fn name(&self) -> &str {
        &self.raw.name
    }

    fn flags(&self) -> MemberFlags {
        self.raw.flags
    }

    fn is_synthetic(&self) -> bool {
        self.raw.synthetic
    }

    fn tags(&self) -> &[MetadataTag] {
        &self.raw.tags
    }

    fn declaring_type(&self) -> Option<TypeId> {
        self.raw.declaring_type
    }
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.raw.id == other.raw.id
    }
}

impl Eq for TypeDescriptor {}

impl Hash for TypeDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.id.hash(state);
    }
}

impl TypeDescriptor {
    pub(crate) fn new(raw: RawType) -> Self {
        Self { raw }
    }

    /// The wrapped type identity.
    pub fn id(&self) -> TypeId {
        self.raw.id
    }

    /// Whether this is an array type.
    pub fn is_array(&self) -> bool {
        self.raw.is_array
    }

    /// Whether this is an enum type.
    pub fn is_enum(&self) -> bool {
        self.raw.is_enum
    }

    /// Whether this is a primitive type.
    pub fn is_primitive(&self) -> bool {
        self.raw.is_primitive
    }

    /// Component type for arrays.
    pub fn component(&self) -> Option<TypeId> {
        self.raw.component
    }

    /// Boxed counterpart for primitives.
    pub fn boxed(&self) -> Option<TypeId> {
        self.raw.boxed
    }

    /// Whether a value of type `candidate` can be used where this type is
    /// expected.
    ///
    /// Assignability from a bare primitive is always false natively, so a
    /// primitive candidate is tested through its boxed counterpart. This
    /// keeps matching useful in auto-boxing contexts.
    pub fn is_ancestor_of(&self, intr: &Introspector, candidate: TypeId) -> bool {
        let operand = intr
            .wrap_type(candidate)
            .ok()
            .filter(|c| c.is_primitive())
            .and_then(|c| c.boxed())
            .unwrap_or(candidate);
        intr.is_assignable(self.raw.id, operand)
    }

    /// Whether this type can be used where `target` is expected.
    ///
    /// No boxing is applied here: this type is a concrete operand.
    pub fn is_descendant_of(&self, intr: &Introspector, target: TypeId) -> bool {
        intr.is_assignable(target, self.raw.id)
    }
}

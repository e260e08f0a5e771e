//! Identity newtypes for native types and members.

use std::fmt;

/// Unique identifier for a native type, assigned by the metadata provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(u32);

impl TypeId {
    /// Create a type id from its raw value.
    pub const fn new(raw: u32) -> Self {
        TypeId(raw)
    }

    /// Get the raw value.
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeId({})", self.0)
    }
}

/// Unique identifier for a native member, assigned by the metadata provider.
///
/// Member ids are unique across all member kinds; they are the cache key for
/// descriptor identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MemberId(u64);

impl MemberId {
    /// Create a member id from its raw value.
    pub const fn new(raw: u64) -> Self {
        MemberId(raw)
    }

    /// Get the raw value.
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MemberId({})", self.0)
    }
}

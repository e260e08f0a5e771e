//! Behavioral flags for members.
//!
//! A member carries a bitset of behavioral flags (visibility, staticness,
//! finality, ...). Package-private visibility is not a flag of its own: it
//! is the absence of all three visibility flags.

use std::fmt;

/// Behavioral member flags (bitflags).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct MemberFlags(u16);

impl MemberFlags {
    /// No flags set.
    pub const EMPTY: Self = Self(0x0000);
    /// Publicly visible.
    pub const PUBLIC: Self = Self(0x0001);
    /// Visible to the declaring type only.
    pub const PRIVATE: Self = Self(0x0002);
    /// Visible to the declaring type and its descendants.
    pub const PROTECTED: Self = Self(0x0004);
    /// Accessible without an instance.
    pub const STATIC: Self = Self(0x0008);
    /// Not overridable / not reassignable.
    pub const FINAL: Self = Self(0x0010);
    /// Synchronized callable.
    pub const SYNCHRONIZED: Self = Self(0x0020);
    /// Volatile field.
    pub const VOLATILE: Self = Self(0x0040);
    /// Transient field.
    pub const TRANSIENT: Self = Self(0x0080);
    /// Natively implemented callable.
    pub const NATIVE: Self = Self(0x0100);
    /// Interface kind.
    pub const INTERFACE: Self = Self(0x0200);
    /// Abstract member.
    pub const ABSTRACT: Self = Self(0x0400);
    /// Strict floating point semantics.
    pub const STRICT: Self = Self(0x0800);

    /// All three visibility flags.
    pub const VISIBILITY: Self = Self(0x0007);

    /// Create from raw bits.
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    /// Get raw bits.
    pub const fn bits(&self) -> u16 {
        self.0
    }

    /// Check if no flag is set.
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Check if every flag in `other` is set.
    pub const fn contains(&self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check if any flag in `other` is set.
    pub const fn intersects(&self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    /// Union of flags.
    pub const fn union(&self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Intersection of flags.
    pub const fn intersection(&self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// Difference (remove flags).
    pub const fn difference(&self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }
}

impl fmt::Display for MemberFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(MemberFlags, &str); 12] = [
            (MemberFlags::PUBLIC, "public"),
            (MemberFlags::PRIVATE, "private"),
            (MemberFlags::PROTECTED, "protected"),
            (MemberFlags::STATIC, "static"),
            (MemberFlags::FINAL, "final"),
            (MemberFlags::SYNCHRONIZED, "synchronized"),
            (MemberFlags::VOLATILE, "volatile"),
            (MemberFlags::TRANSIENT, "transient"),
            (MemberFlags::NATIVE, "native"),
            (MemberFlags::INTERFACE, "interface"),
            (MemberFlags::ABSTRACT, "abstract"),
            (MemberFlags::STRICT, "strictfp"),
        ];

        let mut first = true;
        for (flag, name) in NAMES {
            if self.contains(flag) {
                if !first {
                    write!(f, " ")?;
                }
                write!(f, "{}", name)?;
                first = false;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_and_intersects() {
        let flags = MemberFlags::PUBLIC.union(MemberFlags::STATIC);
        assert!(flags.contains(MemberFlags::PUBLIC));
        assert!(flags.contains(MemberFlags::STATIC));
        assert!(!flags.contains(MemberFlags::FINAL));
        assert!(flags.intersects(MemberFlags::VISIBILITY));
        assert!(!MemberFlags::STATIC.intersects(MemberFlags::VISIBILITY));
    }

    #[test]
    fn test_set_algebra() {
        let a = MemberFlags::PUBLIC.union(MemberFlags::FINAL);
        let b = MemberFlags::FINAL.union(MemberFlags::STATIC);
        assert_eq!(a.intersection(b), MemberFlags::FINAL);
        assert_eq!(a.difference(b), MemberFlags::PUBLIC);
        assert_eq!(
            a.union(b),
            MemberFlags::PUBLIC
                .union(MemberFlags::FINAL)
                .union(MemberFlags::STATIC)
        );
    }

    #[test]
    fn test_roundtrip_bits() {
        let flags = MemberFlags::PROTECTED.union(MemberFlags::ABSTRACT);
        assert_eq!(MemberFlags::from_bits(flags.bits()), flags);
    }

    #[test]
    fn test_display() {
        let flags = MemberFlags::PUBLIC.union(MemberFlags::STATIC).union(MemberFlags::FINAL);
        assert_eq!(flags.to_string(), "public static final");
        assert_eq!(MemberFlags::EMPTY.to_string(), "");
    }
}

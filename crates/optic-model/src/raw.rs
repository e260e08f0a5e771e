//! Raw metadata records handed over by a provider.
//!
//! These are plain data: the provider describes what a type declares, the
//! introspector turns records into cached descriptors. Record order within
//! a declaration list is provider-defined and never re-sorted.

use crate::flags::MemberFlags;
use crate::ids::{MemberId, TypeId};

/// A metadata tag attached to a member.
///
/// Tags are looked up by tag type; at most one tag per tag type is assumed
/// on any single member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataTag {
    /// The type of the tag itself.
    pub tag_type: TypeId,
    /// Key/value entries carried by the tag.
    pub entries: Vec<(String, String)>,
}

impl MetadataTag {
    /// Create a tag with no entries.
    pub fn marker(tag_type: TypeId) -> Self {
        Self {
            tag_type,
            entries: Vec::new(),
        }
    }

    /// Get an entry value by key.
    pub fn entry(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Raw description of a native type.
#[derive(Debug, Clone)]
pub struct RawType {
    /// Type identity.
    pub id: TypeId,
    /// Fully qualified type name.
    pub name: String,
    /// Behavioral flags.
    pub flags: MemberFlags,
    /// Whether the type was generated by the host platform.
    pub synthetic: bool,
    /// Attached metadata tags.
    pub tags: Vec<MetadataTag>,
    /// Declaring type for nested types.
    pub declaring_type: Option<TypeId>,
    /// Whether this is an array type.
    pub is_array: bool,
    /// Whether this is an enum type.
    pub is_enum: bool,
    /// Whether this is a primitive type.
    pub is_primitive: bool,
    /// Component type for arrays.
    pub component: Option<TypeId>,
    /// Boxed counterpart for primitives.
    pub boxed: Option<TypeId>,
}

/// Raw description of a field.
#[derive(Debug, Clone)]
pub struct RawField {
    /// Member identity.
    pub id: MemberId,
    /// Type declaring the field.
    pub declaring_type: TypeId,
    /// Field name.
    pub name: String,
    /// Behavioral flags.
    pub flags: MemberFlags,
    /// Whether the field was generated by the host platform.
    pub synthetic: bool,
    /// Attached metadata tags.
    pub tags: Vec<MetadataTag>,
    /// The field value type.
    pub value_type: TypeId,
}

/// Raw description of a method.
#[derive(Debug, Clone)]
pub struct RawMethod {
    /// Member identity.
    pub id: MemberId,
    /// Type declaring the method.
    pub declaring_type: TypeId,
    /// Method name.
    pub name: String,
    /// Behavioral flags.
    pub flags: MemberFlags,
    /// Whether the method was generated by the host platform.
    pub synthetic: bool,
    /// Attached metadata tags.
    pub tags: Vec<MetadataTag>,
    /// Ordered parameter types.
    pub params: Vec<TypeId>,
    /// Ordered declared-thrown types.
    pub throws: Vec<TypeId>,
    /// Result type.
    pub result: TypeId,
}

/// Raw description of a constructor.
///
/// Constructors carry their declaring type's name as member name.
#[derive(Debug, Clone)]
pub struct RawConstructor {
    /// Member identity.
    pub id: MemberId,
    /// Type declaring the constructor.
    pub declaring_type: TypeId,
    /// Member name (the declaring type's name).
    pub name: String,
    /// Behavioral flags.
    pub flags: MemberFlags,
    /// Whether the constructor was generated by the host platform.
    pub synthetic: bool,
    /// Attached metadata tags.
    pub tags: Vec<MetadataTag>,
    /// Ordered parameter types.
    pub params: Vec<TypeId>,
    /// Ordered declared-thrown types.
    pub throws: Vec<TypeId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_entry_lookup() {
        let tag = MetadataTag {
            tag_type: TypeId::new(7),
            entries: vec![
                ("value".to_string(), "hello".to_string()),
                ("since".to_string(), "1.2".to_string()),
            ],
        };
        assert_eq!(tag.entry("value"), Some("hello"));
        assert_eq!(tag.entry("since"), Some("1.2"));
        assert_eq!(tag.entry("missing"), None);
    }

    #[test]
    fn test_marker_tag() {
        let tag = MetadataTag::marker(TypeId::new(3));
        assert_eq!(tag.tag_type, TypeId::new(3));
        assert!(tag.entries.is_empty());
    }
}

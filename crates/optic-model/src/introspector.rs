//! The descriptor cache.
//!
//! An [`Introspector`] owns a metadata provider and hands out cached,
//! identity-preserving descriptors. It is an explicit object rather than a
//! process-wide singleton so callers can scope descriptor lifetimes and
//! tests can construct isolated instances.

use std::sync::Arc;

use dashmap::DashMap;
use rustc_hash::FxHashSet;

use crate::descriptor::{
    ConstructorDescriptor, FieldDescriptor, MethodDescriptor, TypeDescriptor,
};
use crate::error::ModelError;
use crate::ids::{MemberId, TypeId};
use crate::provider::MetadataProvider;
use crate::raw::{RawConstructor, RawField, RawMethod};

/// Cached wrapper factory over a metadata provider.
///
/// All caches support concurrent get-or-insert with at-most-one-winner
/// semantics: a race on first population of a key never yields two distinct
/// descriptor instances for the same native member.
pub struct Introspector {
    provider: Arc<dyn MetadataProvider>,
    types: DashMap<TypeId, Arc<TypeDescriptor>>,
    fields: DashMap<MemberId, Arc<FieldDescriptor>>,
    methods: DashMap<MemberId, Arc<MethodDescriptor>>,
    constructors: DashMap<MemberId, Arc<ConstructorDescriptor>>,
}

impl Introspector {
    /// Create an introspector over the given provider.
    pub fn new(provider: Arc<dyn MetadataProvider>) -> Self {
        Self {
            provider,
            types: DashMap::new(),
            fields: DashMap::new(),
            methods: DashMap::new(),
            constructors: DashMap::new(),
        }
    }

    /// The underlying provider.
    pub fn provider(&self) -> &Arc<dyn MetadataProvider> {
        &self.provider
    }

    /// Wrap a type.
    ///
    /// Idempotent: wrapping the same type id twice returns the same
    /// descriptor instance.
    pub fn wrap_type(&self, ty: TypeId) -> Result<Arc<TypeDescriptor>, ModelError> {
        if let Some(cached) = self.types.get(&ty) {
            return Ok(cached.clone());
        }
        let raw = self
            .provider
            .describe_type(ty)
            .ok_or(ModelError::UnknownType(ty))?;
        Ok(self
            .types
            .entry(ty)
            .or_insert_with(|| Arc::new(TypeDescriptor::new(raw)))
            .clone())
    }

    /// Wrap a field record. Idempotent per member id.
    pub fn wrap_field(&self, raw: RawField) -> Arc<FieldDescriptor> {
        if let Some(cached) = self.fields.get(&raw.id) {
            return cached.clone();
        }
        self.fields
            .entry(raw.id)
            .or_insert_with(|| Arc::new(FieldDescriptor::new(raw)))
            .clone()
    }

    /// Wrap a method record. Idempotent per member id.
    pub fn wrap_method(&self, raw: RawMethod) -> Arc<MethodDescriptor> {
        if let Some(cached) = self.methods.get(&raw.id) {
            return cached.clone();
        }
        self.methods
            .entry(raw.id)
            .or_insert_with(|| Arc::new(MethodDescriptor::new(raw)))
            .clone()
    }

    /// Wrap a constructor record. Idempotent per member id.
    pub fn wrap_constructor(&self, raw: RawConstructor) -> Arc<ConstructorDescriptor> {
        if let Some(cached) = self.constructors.get(&raw.id) {
            return cached.clone();
        }
        self.constructors
            .entry(raw.id)
            .or_insert_with(|| Arc::new(ConstructorDescriptor::new(raw)))
            .clone()
    }

    /// Directly declared fields of a type, wrapped, in provider order.
    pub fn declared_fields(&self, ty: TypeId) -> Vec<Arc<FieldDescriptor>> {
        self.provider
            .declared_fields(ty)
            .into_iter()
            .map(|raw| self.wrap_field(raw))
            .collect()
    }

    /// Directly declared methods of a type, wrapped, in provider order.
    pub fn declared_methods(&self, ty: TypeId) -> Vec<Arc<MethodDescriptor>> {
        self.provider
            .declared_methods(ty)
            .into_iter()
            .map(|raw| self.wrap_method(raw))
            .collect()
    }

    /// Directly declared constructors of a type, wrapped, in provider order.
    pub fn declared_constructors(&self, ty: TypeId) -> Vec<Arc<ConstructorDescriptor>> {
        self.provider
            .declared_constructors(ty)
            .into_iter()
            .map(|raw| self.wrap_constructor(raw))
            .collect()
    }

    /// Directly declared nested types of a type, wrapped.
    ///
    /// Ids the provider cannot describe are skipped; a consistent provider
    /// never produces them.
    pub fn declared_nested_types(&self, ty: TypeId) -> Vec<Arc<TypeDescriptor>> {
        self.provider
            .declared_nested_types(ty)
            .into_iter()
            .filter_map(|nested| self.wrap_type(nested).ok())
            .collect()
    }

    /// The single parent of a type, if any.
    pub fn ancestor_of(&self, ty: TypeId) -> Option<TypeId> {
        self.provider.ancestor_of(ty)
    }

    /// The materialized ancestor chain, starting at the type itself and
    /// ending at the root.
    ///
    /// The provider contract requires ancestor chains to terminate; a
    /// provider that violates it gets the chain up to the first repeated
    /// type instead of an infinite loop.
    pub fn ancestor_chain(&self, ty: TypeId) -> Vec<TypeId> {
        let mut chain = vec![ty];
        let mut seen = FxHashSet::default();
        seen.insert(ty);
        let mut current = ty;
        while let Some(parent) = self.provider.ancestor_of(current) {
            if !seen.insert(parent) {
                break;
            }
            chain.push(parent);
            current = parent;
        }
        chain
    }

    /// Native subtype test passthrough.
    pub fn is_assignable(&self, target: TypeId, candidate: TypeId) -> bool {
        self.provider.is_assignable(target, candidate)
    }

    /// Best-effort display name for a type.
    pub fn type_name(&self, ty: TypeId) -> String {
        match self.wrap_type(ty) {
            Ok(desc) => crate::Member::name(desc.as_ref()).to_string(),
            Err(_) => format!("type#{}", ty.get()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flags::MemberFlags;
    use crate::model::{FieldSpec, MethodSpec, TypeModel, TypeSpec};
    use crate::Member;

    const OBJECT: TypeId = TypeId::new(0);
    const BASE: TypeId = TypeId::new(1);
    const DERIVED: TypeId = TypeId::new(2);
    const INT: TypeId = TypeId::new(3);

    fn intr() -> Introspector {
        let model = TypeModel::builder()
            .register(TypeSpec::new(OBJECT, "Object"))
            .register(
                TypeSpec::new(BASE, "Base")
                    .extends(OBJECT)
                    .field(FieldSpec::new("count", INT))
                    .method(MethodSpec::new("run", OBJECT)),
            )
            .register(TypeSpec::new(DERIVED, "Derived").extends(BASE))
            .register(TypeSpec::new(INT, "int"))
            .build();
        Introspector::new(Arc::new(model))
    }

    #[test]
    fn test_wrap_type_is_idempotent() {
        let intr = intr();
        let a = intr.wrap_type(BASE).unwrap();
        let b = intr.wrap_type(BASE).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_wrap_unknown_type_fails() {
        let intr = intr();
        assert_eq!(
            intr.wrap_type(TypeId::new(42)).unwrap_err(),
            ModelError::UnknownType(TypeId::new(42))
        );
    }

    #[test]
    fn test_member_wrap_is_idempotent() {
        let intr = intr();
        let first = intr.declared_fields(BASE);
        let second = intr.declared_fields(BASE);
        assert_eq!(first.len(), 1);
        assert!(Arc::ptr_eq(&first[0], &second[0]));
        assert_eq!(first[0].name(), "count");
    }

    #[test]
    fn test_ancestor_chain_self_first() {
        let intr = intr();
        assert_eq!(intr.ancestor_chain(DERIVED), vec![DERIVED, BASE, OBJECT]);
        assert_eq!(intr.ancestor_chain(OBJECT), vec![OBJECT]);
    }

    #[test]
    fn test_ancestor_chain_terminates_on_cycle() {
        // A provider violating the termination contract must not hang.
        let model = TypeModel::builder()
            .register(TypeSpec::new(BASE, "A").extends(DERIVED))
            .register(TypeSpec::new(DERIVED, "B").extends(BASE))
            .build();
        let intr = Introspector::new(Arc::new(model));
        assert_eq!(intr.ancestor_chain(BASE), vec![BASE, DERIVED]);
        assert_eq!(intr.ancestor_chain(DERIVED), vec![DERIVED, BASE]);
    }

    #[test]
    fn test_type_name_fallback() {
        let intr = intr();
        assert_eq!(intr.type_name(BASE), "Base");
        assert_eq!(intr.type_name(TypeId::new(77)), "type#77");
    }

    #[test]
    fn test_concurrent_wrap_single_winner() {
        let intr = Arc::new(intr());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let intr = intr.clone();
            handles.push(std::thread::spawn(move || intr.declared_fields(BASE)));
        }
        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let first = &results[0][0];
        for fields in &results {
            assert!(Arc::ptr_eq(first, &fields[0]));
        }
    }

    #[test]
    fn test_descriptor_flags_survive_wrap() {
        let model = TypeModel::builder()
            .register(TypeSpec::new(OBJECT, "Object"))
            .register(TypeSpec::new(INT, "int"))
            .register(
                TypeSpec::new(BASE, "Holder").field(
                    FieldSpec::new("hidden", INT)
                        .flags(MemberFlags::PRIVATE.union(MemberFlags::TRANSIENT)),
                ),
            )
            .build();
        let intr = Introspector::new(Arc::new(model));
        let fields = intr.declared_fields(BASE);
        assert!(fields[0].is_private());
        assert!(fields[0].is_transient());
        assert!(!fields[0].is_public());
    }
}

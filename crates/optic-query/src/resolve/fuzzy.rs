//! Fuzzy resolution: recursive, all-results member search.

use std::any::Any;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use rustc_hash::FxHashSet;
use tracing::trace;

use optic_model::{
    ConstructorDescriptor, FieldDescriptor, Introspector, Member, MemberFlags, MethodDescriptor,
    TypeDescriptor, TypeId,
};

use crate::error::QueryError;
use crate::matcher::{type_exact, ConstructorMatcher, FieldMatcher, Matcher, MethodMatcher};
use crate::resolve::collect;

/// Matcher-driven member search over a type hierarchy.
///
/// Fuzzy resolution never fails on "no match": an empty result is a valid
/// answer. Method searches drop overridden declarations found further up
/// the hierarchy, keeping the most-derived declaration per signature.
pub struct FuzzyResolver {
    intr: Arc<Introspector>,
    source: TypeId,
    force_access: bool,
    forced: OnceCell<Arc<FuzzyResolver>>,
}

impl FuzzyResolver {
    /// Create a resolver rooted at `source`.
    pub fn new(intr: Arc<Introspector>, source: TypeId) -> Result<Arc<Self>, QueryError> {
        intr.wrap_type(source)?;
        Ok(Arc::new(Self {
            intr,
            source,
            force_access: false,
            forced: OnceCell::new(),
        }))
    }

    /// The type this resolver searches from.
    pub fn source(&self) -> TypeId {
        self.source
    }

    /// Whether visibility requirements are suppressed.
    pub fn force_access(&self) -> bool {
        self.force_access
    }

    /// An equivalent resolver with visibility requirements suppressed.
    ///
    /// Idempotent: calling this on an already forced resolver, or calling
    /// it twice on the same resolver, returns the identical instance.
    pub fn forced(self: &Arc<Self>) -> Arc<Self> {
        if self.force_access {
            return self.clone();
        }
        self.forced
            .get_or_init(|| {
                Arc::new(Self {
                    intr: self.intr.clone(),
                    source: self.source,
                    force_access: true,
                    forced: OnceCell::new(),
                })
            })
            .clone()
    }

    /// All fields accepted by the matcher. A `None` matcher retains every
    /// field.
    pub fn fields(
        &self,
        matcher: Option<&dyn Matcher<FieldDescriptor>>,
        recursive: bool,
    ) -> Vec<Arc<FieldDescriptor>> {
        self.fields_with(None, matcher, recursive)
    }

    /// Like [`fields`](Self::fields), with a working instance made visible
    /// to custom predicates.
    pub fn fields_on(
        &self,
        instance: &(dyn Any + Send + Sync),
        matcher: Option<&dyn Matcher<FieldDescriptor>>,
        recursive: bool,
    ) -> Vec<Arc<FieldDescriptor>> {
        self.fields_with(Some(instance), matcher, recursive)
    }

    fn fields_with(
        &self,
        instance: Option<&(dyn Any + Send + Sync)>,
        matcher: Option<&dyn Matcher<FieldDescriptor>>,
        recursive: bool,
    ) -> Vec<Arc<FieldDescriptor>> {
        collect(&self.intr, self.source, instance, matcher, recursive, |i, t| {
            i.declared_fields(t)
        })
    }

    /// All methods accepted by the matcher, most-derived declaration per
    /// signature.
    ///
    /// A result whose (name, parameter-sequence) duplicates an earlier
    /// retained result is dropped; since own-level results come first this
    /// removes overridden declarations, not the overriding ones.
    pub fn methods(
        &self,
        matcher: Option<&dyn Matcher<MethodDescriptor>>,
        recursive: bool,
    ) -> Vec<Arc<MethodDescriptor>> {
        self.methods_with(None, matcher, recursive)
    }

    /// Like [`methods`](Self::methods), with a working instance made
    /// visible to custom predicates.
    pub fn methods_on(
        &self,
        instance: &(dyn Any + Send + Sync),
        matcher: Option<&dyn Matcher<MethodDescriptor>>,
        recursive: bool,
    ) -> Vec<Arc<MethodDescriptor>> {
        self.methods_with(Some(instance), matcher, recursive)
    }

    fn methods_with(
        &self,
        instance: Option<&(dyn Any + Send + Sync)>,
        matcher: Option<&dyn Matcher<MethodDescriptor>>,
        recursive: bool,
    ) -> Vec<Arc<MethodDescriptor>> {
        let raw = collect(&self.intr, self.source, instance, matcher, recursive, |i, t| {
            i.declared_methods(t)
        });

        let mut seen: FxHashSet<(String, Vec<TypeId>)> = FxHashSet::default();
        let mut results = Vec::with_capacity(raw.len());
        for method in raw {
            let key = (method.name().to_string(), method.params().to_vec());
            if seen.insert(key) {
                results.push(method);
            } else {
                trace!(
                    source = %self.source,
                    name = method.name(),
                    "dropping overridden declaration"
                );
            }
        }
        results
    }

    /// All constructors accepted by the matcher.
    ///
    /// Constructors are not inherited, but a recursive search still
    /// enumerates each ancestor's own declared constructors.
    pub fn constructors(
        &self,
        matcher: Option<&dyn Matcher<ConstructorDescriptor>>,
        recursive: bool,
    ) -> Vec<Arc<ConstructorDescriptor>> {
        collect(&self.intr, self.source, None, matcher, recursive, |i, t| {
            i.declared_constructors(t)
        })
    }

    /// All directly declared nested types accepted by the matcher,
    /// searching ancestors when recursive.
    pub fn nested_types(
        &self,
        matcher: Option<&dyn Matcher<TypeDescriptor>>,
        recursive: bool,
    ) -> Vec<Arc<TypeDescriptor>> {
        collect(&self.intr, self.source, None, matcher, recursive, |i, t| {
            i.declared_nested_types(t)
        })
    }

    /// All fields with exactly this name, recursively.
    ///
    /// Requires public visibility unless the resolver is forced.
    pub fn fields_named(&self, name: &str) -> Vec<Arc<FieldDescriptor>> {
        let mut builder = FieldMatcher::builder().with_name_exact(name);
        if !self.force_access {
            builder = builder.with_flags(MemberFlags::PUBLIC);
        }
        self.fields(Some(&builder.build()), true)
    }

    /// All fields whose value type is exactly `ty`, recursively.
    ///
    /// Requires public visibility unless the resolver is forced.
    pub fn fields_of_type(&self, ty: TypeId) -> Vec<Arc<FieldDescriptor>> {
        let mut builder = FieldMatcher::builder().with_value_type(type_exact(ty));
        if !self.force_access {
            builder = builder.with_flags(MemberFlags::PUBLIC);
        }
        self.fields(Some(&builder.build()), true)
    }

    /// All methods with exactly this name, recursively, overridden
    /// declarations removed.
    ///
    /// Requires public visibility unless the resolver is forced.
    pub fn methods_named(&self, name: &str) -> Vec<Arc<MethodDescriptor>> {
        let mut builder = MethodMatcher::builder().with_name_exact(name);
        if !self.force_access {
            builder = builder.with_flags(MemberFlags::PUBLIC);
        }
        self.methods(Some(&builder.build()), true)
    }

    /// All methods taking exactly these parameter types, recursively,
    /// overridden declarations removed.
    ///
    /// Requires public visibility unless the resolver is forced.
    pub fn methods_with_params(&self, params: &[TypeId]) -> Vec<Arc<MethodDescriptor>> {
        let mut builder = MethodMatcher::builder().with_param_types(params);
        if !self.force_access {
            builder = builder.with_flags(MemberFlags::PUBLIC);
        }
        self.methods(Some(&builder.build()), true)
    }

    /// The source type's own constructors taking exactly these parameter
    /// types.
    ///
    /// Requires public visibility unless the resolver is forced.
    pub fn constructors_with_params(&self, params: &[TypeId]) -> Vec<Arc<ConstructorDescriptor>> {
        let mut builder = ConstructorMatcher::builder().with_param_types(params);
        if !self.force_access {
            builder = builder.with_flags(MemberFlags::PUBLIC);
        }
        self.constructors(Some(&builder.build()), false)
    }
}

//! Exact resolution: signature-based, cached, single-result member search.

use std::any::Any;
use std::sync::Arc;

use dashmap::DashMap;
use once_cell::sync::OnceCell;
use tracing::debug;

use optic_model::{
    ConstructorDescriptor, FieldDescriptor, Introspector, MemberFlags, MemberKind,
    MethodDescriptor, TypeId,
};

use crate::error::{constructor_signature, method_signature, QueryError};
use crate::matcher::{ConstructorMatcher, FieldMatcher, Matcher, MethodMatcher};
use crate::resolve::collect;

/// Signature-based member lookup with per-resolver memoization.
///
/// Fields and methods are searched recursively; constructors are not
/// inherited and only the source type's own declarations are considered.
/// The first match wins. Results are memoized per resolver, keyed by the
/// requested signature, except for instance-bound lookups which bypass the
/// cache entirely.
pub struct ExactResolver {
    intr: Arc<Introspector>,
    source: TypeId,
    force_access: bool,
    fields: DashMap<String, Arc<FieldDescriptor>>,
    methods: DashMap<(String, Vec<TypeId>), Arc<MethodDescriptor>>,
    constructors: DashMap<Vec<TypeId>, Arc<ConstructorDescriptor>>,
    forced: OnceCell<Arc<ExactResolver>>,
}

impl ExactResolver {
    /// Create a resolver rooted at `source`.
    pub fn new(intr: Arc<Introspector>, source: TypeId) -> Result<Arc<Self>, QueryError> {
        intr.wrap_type(source)?;
        Ok(Arc::new(Self::bare(intr, source, false)))
    }

    fn bare(intr: Arc<Introspector>, source: TypeId, force_access: bool) -> Self {
        Self {
            intr,
            source,
            force_access,
            fields: DashMap::new(),
            methods: DashMap::new(),
            constructors: DashMap::new(),
            forced: OnceCell::new(),
        }
    }

    /// The type this resolver searches from.
    pub fn source(&self) -> TypeId {
        self.source
    }

    /// Whether visibility requirements are suppressed.
    pub fn force_access(&self) -> bool {
        self.force_access
    }

    /// An equivalent resolver with visibility requirements suppressed and
    /// an independent, initially empty cache.
    ///
    /// Idempotent: calling this on an already forced resolver, or calling
    /// it twice on the same resolver, returns the identical instance.
    pub fn forced(self: &Arc<Self>) -> Arc<Self> {
        if self.force_access {
            return self.clone();
        }
        self.forced
            .get_or_init(|| Arc::new(Self::bare(self.intr.clone(), self.source, true)))
            .clone()
    }

    /// Resolve a field by name, searching ancestors.
    pub fn field(&self, name: &str) -> Result<Arc<FieldDescriptor>, QueryError> {
        if name.is_empty() {
            return Err(QueryError::InvalidArgument("Empty field name".to_string()));
        }
        if let Some(cached) = self.fields.get(name) {
            return Ok(cached.clone());
        }
        let found = self.lookup_field(None, name)?;
        Ok(self
            .fields
            .entry(name.to_string())
            .or_insert(found)
            .clone())
    }

    /// Resolve a field by name with a working instance.
    ///
    /// Bypasses the cache in both directions: it neither reads nor
    /// populates memoized entries.
    pub fn field_on(
        &self,
        instance: &(dyn Any + Send + Sync),
        name: &str,
    ) -> Result<Arc<FieldDescriptor>, QueryError> {
        if name.is_empty() {
            return Err(QueryError::InvalidArgument("Empty field name".to_string()));
        }
        self.lookup_field(Some(instance), name)
    }

    /// Resolve a method by name and exact parameter types, searching
    /// ancestors.
    pub fn method(
        &self,
        name: &str,
        params: &[TypeId],
    ) -> Result<Arc<MethodDescriptor>, QueryError> {
        if name.is_empty() {
            return Err(QueryError::InvalidArgument("Empty method name".to_string()));
        }
        let key = (name.to_string(), params.to_vec());
        if let Some(cached) = self.methods.get(&key) {
            return Ok(cached.clone());
        }
        let found = self.lookup_method(None, name, params)?;
        Ok(self.methods.entry(key).or_insert(found).clone())
    }

    /// Resolve a method with a working instance, bypassing the cache.
    pub fn method_on(
        &self,
        instance: &(dyn Any + Send + Sync),
        name: &str,
        params: &[TypeId],
    ) -> Result<Arc<MethodDescriptor>, QueryError> {
        if name.is_empty() {
            return Err(QueryError::InvalidArgument("Empty method name".to_string()));
        }
        self.lookup_method(Some(instance), name, params)
    }

    /// Resolve a constructor by exact parameter types.
    ///
    /// Constructors are not inherited: only the source type's own
    /// declarations are searched.
    pub fn constructor(
        &self,
        params: &[TypeId],
    ) -> Result<Arc<ConstructorDescriptor>, QueryError> {
        let key = params.to_vec();
        if let Some(cached) = self.constructors.get(&key) {
            return Ok(cached.clone());
        }

        let mut builder = ConstructorMatcher::builder().with_param_types(params);
        if !self.force_access {
            builder = builder.with_flags(MemberFlags::PUBLIC);
        }
        let matcher = builder.build();
        let matcher: &dyn Matcher<ConstructorDescriptor> = &matcher;

        let found = collect(&self.intr, self.source, None, Some(matcher), false, |i, t| {
            i.declared_constructors(t)
        })
        .into_iter()
        .next()
        .ok_or_else(|| QueryError::UnknownMember {
            kind: MemberKind::Constructor,
            owner: self.intr.type_name(self.source),
            signature: constructor_signature(&self.intr, self.source, params),
        })?;

        debug!(source = %self.source, arity = params.len(), "resolved constructor");
        Ok(self.constructors.entry(key).or_insert(found).clone())
    }

    fn lookup_field(
        &self,
        instance: Option<&(dyn Any + Send + Sync)>,
        name: &str,
    ) -> Result<Arc<FieldDescriptor>, QueryError> {
        let mut builder = FieldMatcher::builder().with_name_exact(name);
        if !self.force_access {
            builder = builder.with_flags(MemberFlags::PUBLIC);
        }
        let matcher = builder.build();
        let matcher: &dyn Matcher<FieldDescriptor> = &matcher;

        let found = collect(&self.intr, self.source, instance, Some(matcher), true, |i, t| {
            i.declared_fields(t)
        })
        .into_iter()
        .next()
        .ok_or_else(|| QueryError::UnknownMember {
            kind: MemberKind::Field,
            owner: self.intr.type_name(self.source),
            signature: name.to_string(),
        })?;

        debug!(source = %self.source, name, "resolved field");
        Ok(found)
    }

    fn lookup_method(
        &self,
        instance: Option<&(dyn Any + Send + Sync)>,
        name: &str,
        params: &[TypeId],
    ) -> Result<Arc<MethodDescriptor>, QueryError> {
        let mut builder = MethodMatcher::builder()
            .with_name_exact(name)
            .with_param_types(params);
        if !self.force_access {
            builder = builder.with_flags(MemberFlags::PUBLIC);
        }
        let matcher = builder.build();
        let matcher: &dyn Matcher<MethodDescriptor> = &matcher;

        let found = collect(&self.intr, self.source, instance, Some(matcher), true, |i, t| {
            i.declared_methods(t)
        })
        .into_iter()
        .next()
        .ok_or_else(|| QueryError::UnknownMember {
            kind: MemberKind::Method,
            owner: self.intr.type_name(self.source),
            signature: method_signature(&self.intr, name, params),
        })?;

        debug!(source = %self.source, name, "resolved method");
        Ok(found)
    }
}

//! Type matching, including containment constraints over declared members.

use rustc_hash::FxHashSet;

use optic_model::{
    ConstructorDescriptor, FieldDescriptor, MethodDescriptor, TypeDescriptor, TypeId,
};

use crate::matcher::base::{impl_filter_builder, BaseFilter, FilterCore};
use crate::matcher::containment::{self, Cardinality, Containment};
use crate::matcher::{MatchContext, Matcher, SharedMatcher};

/// A matcher accepting exactly the given type.
pub fn type_exact(ty: TypeId) -> SharedMatcher<TypeDescriptor> {
    std::sync::Arc::new(TypeMatcher::builder().with_type(ty).build())
}

/// An immutable predicate over types.
pub struct TypeMatcher {
    base: BaseFilter<TypeDescriptor>,
    type_set: Option<FxHashSet<TypeId>>,
    array: Option<Option<SharedMatcher<TypeDescriptor>>>,
    ancestor_of: Option<TypeId>,
    descendant_of: Option<TypeId>,
    nested_types: Vec<Containment<TypeDescriptor>>,
    fields: Vec<Containment<FieldDescriptor>>,
    methods: Vec<Containment<MethodDescriptor>>,
    constructors: Vec<Containment<ConstructorDescriptor>>,
}

impl TypeMatcher {
    /// Start building a type matcher.
    pub fn builder() -> TypeMatcherBuilder {
        TypeMatcherBuilder::default()
    }
}

impl Matcher<TypeDescriptor> for TypeMatcher {
    fn matches(&self, member: &TypeDescriptor, ctx: &MatchContext<'_>) -> bool {
        if !self.base.matches(member, ctx) {
            return false;
        }

        if let Some(type_set) = &self.type_set {
            if !type_set.contains(&member.id()) {
                return false;
            }
        }

        if let Some(component) = &self.array {
            if !member.is_array() {
                return false;
            }
            if let Some(component) = component {
                let matched = member
                    .component()
                    .and_then(|c| ctx.introspector().wrap_type(c).ok())
                    .map_or(false, |desc| component.matches(&desc, ctx));
                if !matched {
                    return false;
                }
            }
        }

        if let Some(candidate) = self.ancestor_of {
            if !member.is_ancestor_of(ctx.introspector(), candidate) {
                return false;
            }
        }

        if let Some(target) = self.descendant_of {
            if !member.is_descendant_of(ctx.introspector(), target) {
                return false;
            }
        }

        let intr = ctx.introspector();
        if !self.nested_types.is_empty() {
            let nested = intr.declared_nested_types(member.id());
            if !containment::check(&self.nested_types, &nested, ctx) {
                return false;
            }
        }
        if !self.fields.is_empty() {
            let fields = intr.declared_fields(member.id());
            if !containment::check(&self.fields, &fields, ctx) {
                return false;
            }
        }
        if !self.methods.is_empty() {
            let methods = intr.declared_methods(member.id());
            if !containment::check(&self.methods, &methods, ctx) {
                return false;
            }
        }
        if !self.constructors.is_empty() {
            let constructors = intr.declared_constructors(member.id());
            if !containment::check(&self.constructors, &constructors, ctx) {
                return false;
            }
        }

        true
    }
}

/// Accumulates type constraints; [`build`](Self::build) snapshots them into
/// an immutable [`TypeMatcher`].
///
/// Containment constraints accumulate into a conjunction; every other
/// constraint replaces its prior value.
#[derive(Default)]
pub struct TypeMatcherBuilder {
    core: FilterCore<TypeDescriptor>,
    type_set: Option<FxHashSet<TypeId>>,
    array: Option<Option<SharedMatcher<TypeDescriptor>>>,
    ancestor_of: Option<TypeId>,
    descendant_of: Option<TypeId>,
    nested_types: Vec<Containment<TypeDescriptor>>,
    fields: Vec<Containment<FieldDescriptor>>,
    methods: Vec<Containment<MethodDescriptor>>,
    constructors: Vec<Containment<ConstructorDescriptor>>,
}

impl_filter_builder!(TypeMatcherBuilder, optic_model::TypeDescriptor);

impl TypeMatcherBuilder {
    /// Add a type to the exact-membership set. The matched type must be one
    /// of the added types.
    pub fn with_type(mut self, ty: TypeId) -> Self {
        self.type_set.get_or_insert_with(FxHashSet::default).insert(ty);
        self
    }

    /// Add several types to the exact-membership set.
    pub fn with_types(mut self, types: impl IntoIterator<Item = TypeId>) -> Self {
        self.type_set
            .get_or_insert_with(FxHashSet::default)
            .extend(types);
        self
    }

    /// Require the matched type to be an array. Without a component matcher
    /// any array matches regardless of component type.
    pub fn with_array(mut self, component: Option<SharedMatcher<TypeDescriptor>>) -> Self {
        self.array = Some(component);
        self
    }

    /// Require the matched type to be an ancestor of `candidate`.
    ///
    /// A primitive candidate is tested through its boxed counterpart.
    pub fn with_ancestor_of(mut self, candidate: TypeId) -> Self {
        self.ancestor_of = Some(candidate);
        self
    }

    /// Require the matched type to be a descendant of `target`.
    pub fn with_descendant_of(mut self, target: TypeId) -> Self {
        self.descendant_of = Some(target);
        self
    }

    /// Require the matched type's declared nested types to satisfy a
    /// cardinality constraint.
    pub fn with_member_type(
        mut self,
        matcher: SharedMatcher<TypeDescriptor>,
        cardinality: Cardinality,
    ) -> Self {
        self.nested_types.push(Containment::new(matcher, cardinality));
        self
    }

    /// Require the matched type's declared fields to satisfy a cardinality
    /// constraint.
    pub fn with_member_field(
        mut self,
        matcher: SharedMatcher<FieldDescriptor>,
        cardinality: Cardinality,
    ) -> Self {
        self.fields.push(Containment::new(matcher, cardinality));
        self
    }

    /// Require the matched type's declared methods to satisfy a cardinality
    /// constraint.
    pub fn with_member_method(
        mut self,
        matcher: SharedMatcher<MethodDescriptor>,
        cardinality: Cardinality,
    ) -> Self {
        self.methods.push(Containment::new(matcher, cardinality));
        self
    }

    /// Require the matched type's declared constructors to satisfy a
    /// cardinality constraint.
    pub fn with_member_constructor(
        mut self,
        matcher: SharedMatcher<ConstructorDescriptor>,
        cardinality: Cardinality,
    ) -> Self {
        self.constructors.push(Containment::new(matcher, cardinality));
        self
    }

    /// Snapshot the accumulated constraints.
    pub fn build(&self) -> TypeMatcher {
        TypeMatcher {
            base: self.core.freeze(),
            type_set: self.type_set.clone(),
            array: self.array.clone(),
            ancestor_of: self.ancestor_of,
            descendant_of: self.descendant_of,
            nested_types: self.nested_types.clone(),
            fields: self.fields.clone(),
            methods: self.methods.clone(),
            constructors: self.constructors.clone(),
        }
    }
}

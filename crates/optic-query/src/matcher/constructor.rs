//! Constructor matching.

use optic_model::{ConstructorDescriptor, TypeDescriptor, TypeId};

use crate::matcher::base::{impl_filter_builder, BaseFilter, FilterCore};
use crate::matcher::signature::SignatureFilter;
use crate::matcher::types::type_exact;
use crate::matcher::{MatchContext, Matcher, SharedMatcher};

/// An immutable predicate over constructors.
pub struct ConstructorMatcher {
    base: BaseFilter<ConstructorDescriptor>,
    params: SignatureFilter,
    throws: SignatureFilter,
}

impl ConstructorMatcher {
    /// Start building a constructor matcher.
    pub fn builder() -> ConstructorMatcherBuilder {
        ConstructorMatcherBuilder::default()
    }
}

impl Matcher<ConstructorDescriptor> for ConstructorMatcher {
    fn matches(&self, member: &ConstructorDescriptor, ctx: &MatchContext<'_>) -> bool {
        if !self.base.matches(member, ctx) {
            return false;
        }

        if !self.params.matches(member.params(), ctx) {
            return false;
        }

        self.throws.matches(member.throws(), ctx)
    }
}

/// Accumulates constructor constraints; [`build`](Self::build) snapshots
/// them into an immutable [`ConstructorMatcher`].
#[derive(Default)]
pub struct ConstructorMatcherBuilder {
    core: FilterCore<ConstructorDescriptor>,
    params: SignatureFilter,
    throws: SignatureFilter,
}

impl_filter_builder!(ConstructorMatcherBuilder, optic_model::ConstructorDescriptor);

impl ConstructorMatcherBuilder {
    /// Require exactly this many parameters, each position checked against
    /// its own optional type matcher. An absent slot matcher accepts any
    /// type at that position.
    pub fn with_params(mut self, slots: Vec<Option<SharedMatcher<TypeDescriptor>>>) -> Self {
        self.params.set(slots);
        self
    }

    /// Require exactly these parameter types, in order.
    pub fn with_param_types(self, params: &[TypeId]) -> Self {
        self.with_params(params.iter().map(|&ty| Some(type_exact(ty))).collect())
    }

    /// Require the constructor to take no parameters.
    pub fn with_no_params(self) -> Self {
        self.with_params(Vec::new())
    }

    /// Require exactly this many declared-thrown types, checked like
    /// parameters.
    pub fn with_throws(mut self, slots: Vec<Option<SharedMatcher<TypeDescriptor>>>) -> Self {
        self.throws.set(slots);
        self
    }

    /// Require exactly these declared-thrown types, in order.
    pub fn with_throws_types(self, throws: &[TypeId]) -> Self {
        self.with_throws(throws.iter().map(|&ty| Some(type_exact(ty))).collect())
    }

    /// Snapshot the accumulated constraints.
    pub fn build(&self) -> ConstructorMatcher {
        ConstructorMatcher {
            base: self.core.freeze(),
            params: self.params.clone(),
            throws: self.throws.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use optic_model::{ConstructorSpec, Introspector, TypeId, TypeModel, TypeSpec};
    use std::sync::Arc;

    const INT: TypeId = TypeId::new(0);
    const POINT: TypeId = TypeId::new(1);

    fn fixture() -> Introspector {
        let model = TypeModel::builder()
            .register(TypeSpec::new(INT, "int"))
            .register(
                TypeSpec::new(POINT, "Point")
                    .constructor(ConstructorSpec::new())
                    .constructor(ConstructorSpec::new().param(INT).param(INT)),
            )
            .build();
        Introspector::new(Arc::new(model))
    }

    #[test]
    fn test_arity_selects_constructor() {
        let intr = fixture();
        let ctx = MatchContext::new(&intr, POINT);
        let ctors = intr.declared_constructors(POINT);

        let nullary = ConstructorMatcher::builder().with_params(vec![]).build();
        let hits: Vec<_> = ctors.iter().filter(|c| nullary.matches(c, &ctx)).collect();
        assert_eq!(hits.len(), 1);
        assert!(hits[0].params().is_empty());

        let binary = ConstructorMatcher::builder()
            .with_params(vec![None, None])
            .build();
        assert_eq!(ctors.iter().filter(|c| binary.matches(c, &ctx)).count(), 1);
    }

    #[test]
    fn test_typed_shorthands() {
        let intr = fixture();
        let ctx = MatchContext::new(&intr, POINT);
        let ctors = intr.declared_constructors(POINT);

        let two_ints = ConstructorMatcher::builder()
            .with_param_types(&[INT, INT])
            .build();
        let hits: Vec<_> = ctors.iter().filter(|c| two_ints.matches(c, &ctx)).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].params(), [INT, INT]);

        let nullary = ConstructorMatcher::builder().with_no_params().build();
        let hits: Vec<_> = ctors.iter().filter(|c| nullary.matches(c, &ctx)).collect();
        assert_eq!(hits.len(), 1);
        assert!(hits[0].params().is_empty());

        // No constructor takes a single int.
        let one_int = ConstructorMatcher::builder().with_param_types(&[INT]).build();
        assert!(ctors.iter().all(|c| !one_int.matches(c, &ctx)));
    }
}

//! Method matching.

use optic_model::{MethodDescriptor, TypeDescriptor, TypeId};

use crate::matcher::base::{impl_filter_builder, BaseFilter, FilterCore};
use crate::matcher::signature::SignatureFilter;
use crate::matcher::types::type_exact;
use crate::matcher::{MatchContext, Matcher, SharedMatcher};

/// A matcher accepting methods taking exactly the given parameter types.
pub fn method_with_params(params: &[TypeId]) -> SharedMatcher<MethodDescriptor> {
    std::sync::Arc::new(MethodMatcher::builder().with_param_types(params).build())
}

/// An immutable predicate over methods.
pub struct MethodMatcher {
    base: BaseFilter<MethodDescriptor>,
    params: SignatureFilter,
    throws: SignatureFilter,
    result: Option<SharedMatcher<TypeDescriptor>>,
}

impl MethodMatcher {
    /// Start building a method matcher.
    pub fn builder() -> MethodMatcherBuilder {
        MethodMatcherBuilder::default()
    }
}

impl Matcher<MethodDescriptor> for MethodMatcher {
    fn matches(&self, member: &MethodDescriptor, ctx: &MatchContext<'_>) -> bool {
        if !self.base.matches(member, ctx) {
            return false;
        }

        if !self.params.matches(member.params(), ctx) {
            return false;
        }

        if !self.throws.matches(member.throws(), ctx) {
            return false;
        }

        if let Some(result) = &self.result {
            let matched = match ctx.introspector().wrap_type(member.result()) {
                Ok(desc) => result.matches(&desc, ctx),
                Err(_) => false,
            };
            if !matched {
                return false;
            }
        }

        true
    }
}

/// Accumulates method constraints; [`build`](Self::build) snapshots them
/// into an immutable [`MethodMatcher`].
#[derive(Default)]
pub struct MethodMatcherBuilder {
    core: FilterCore<MethodDescriptor>,
    params: SignatureFilter,
    throws: SignatureFilter,
    result: Option<SharedMatcher<TypeDescriptor>>,
}

impl_filter_builder!(MethodMatcherBuilder, optic_model::MethodDescriptor);

impl MethodMatcherBuilder {
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

    /// Require the method to take no parameters.
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

    /// Require the result type to satisfy a nested type matcher.
    pub fn with_result(mut self, matcher: SharedMatcher<TypeDescriptor>) -> Self {
        self.result = Some(matcher);
        self
    }

    /// Require exactly this result type.
    pub fn with_result_type(self, ty: TypeId) -> Self {
        self.with_result(type_exact(ty))
    }

    /// Snapshot the accumulated constraints.
    pub fn build(&self) -> MethodMatcher {
        MethodMatcher {
            base: self.core.freeze(),
            params: self.params.clone(),
            throws: self.throws.clone(),
            result: self.result.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::TypeMatcher;
    use optic_model::{Introspector, Member, MethodSpec, TypeId, TypeModel, TypeSpec};
    use std::sync::Arc;

    const VOID: TypeId = TypeId::new(0);
    const INT: TypeId = TypeId::new(1);
    const STRING: TypeId = TypeId::new(2);
    const SHAPE: TypeId = TypeId::new(3);
    const PARSE_ERROR: TypeId = TypeId::new(4);

    fn fixture() -> Introspector {
        let model = TypeModel::builder()
            .register(TypeSpec::new(VOID, "void"))
            .register(TypeSpec::new(INT, "int"))
            .register(TypeSpec::new(STRING, "String"))
            .register(TypeSpec::new(PARSE_ERROR, "ParseError"))
            .register(
                TypeSpec::new(SHAPE, "Shape")
                    .method(MethodSpec::new("area", INT))
                    .method(MethodSpec::new("scale", VOID).param(INT))
                    .method(MethodSpec::new("label", STRING).param(STRING).param(INT))
                    .method(MethodSpec::new("parse", INT).param(STRING).throws(PARSE_ERROR)),
            )
            .build();
        Introspector::new(Arc::new(model))
    }

    #[test]
    fn test_arity_is_exact_when_configured() {
        let intr = fixture();
        let ctx = MatchContext::new(&intr, SHAPE);
        let methods = intr.declared_methods(SHAPE);

        let nullary = MethodMatcher::builder().with_params(vec![]).build();
        let hits: Vec<_> = methods
            .iter()
            .filter(|m| nullary.matches(m, &ctx))
            .collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name(), "area");
    }

    #[test]
    fn test_positional_param_matchers() {
        let intr = fixture();
        let ctx = MatchContext::new(&intr, SHAPE);
        let methods = intr.declared_methods(SHAPE);

        let string_first = Arc::new(TypeMatcher::builder().with_type(STRING).build());
        let matcher = MethodMatcher::builder()
            .with_params(vec![Some(string_first), None])
            .build();
        let hits: Vec<_> = methods.iter().filter(|m| matcher.matches(m, &ctx)).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name(), "label");
    }

    #[test]
    fn test_result_type_constraint() {
        let intr = fixture();
        let ctx = MatchContext::new(&intr, SHAPE);
        let methods = intr.declared_methods(SHAPE);

        let returns_string = Arc::new(TypeMatcher::builder().with_type(STRING).build());
        let matcher = MethodMatcher::builder().with_result(returns_string).build();
        let hits: Vec<_> = methods.iter().filter(|m| matcher.matches(m, &ctx)).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name(), "label");
    }

    #[test]
    fn test_unconfigured_params_accept_any_arity() {
        let intr = fixture();
        let ctx = MatchContext::new(&intr, SHAPE);
        let methods = intr.declared_methods(SHAPE);

        let matcher = MethodMatcher::builder().build();
        assert_eq!(
            methods.iter().filter(|m| matcher.matches(m, &ctx)).count(),
            4
        );
    }

    #[test]
    fn test_typed_shorthands() {
        let intr = fixture();
        let ctx = MatchContext::new(&intr, SHAPE);
        let methods = intr.declared_methods(SHAPE);

        let matcher = MethodMatcher::builder()
            .with_param_types(&[STRING, INT])
            .build();
        let hits: Vec<_> = methods.iter().filter(|m| matcher.matches(m, &ctx)).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name(), "label");

        let nullary = MethodMatcher::builder().with_no_params().build();
        let hits: Vec<_> = methods.iter().filter(|m| nullary.matches(m, &ctx)).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name(), "area");

        let returns_string = MethodMatcher::builder().with_result_type(STRING).build();
        let hits: Vec<_> = methods
            .iter()
            .filter(|m| returns_string.matches(m, &ctx))
            .collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name(), "label");

        let factory = method_with_params(&[INT]);
        let hits: Vec<_> = methods.iter().filter(|m| factory.matches(m, &ctx)).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name(), "scale");
    }

    #[test]
    fn test_throws_type_shorthand() {
        let intr = fixture();
        let ctx = MatchContext::new(&intr, SHAPE);
        let methods = intr.declared_methods(SHAPE);

        let throwing = MethodMatcher::builder()
            .with_throws_types(&[PARSE_ERROR])
            .build();
        let hits: Vec<_> = methods.iter().filter(|m| throwing.matches(m, &ctx)).collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name(), "parse");

        // Configured empty throws means exactly zero declared-thrown types.
        let non_throwing = MethodMatcher::builder().with_throws_types(&[]).build();
        assert_eq!(
            methods
                .iter()
                .filter(|m| non_throwing.matches(m, &ctx))
                .count(),
            3
        );
    }
}

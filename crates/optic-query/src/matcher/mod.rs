//! Composable member predicates.
//!
//! A [`Matcher`] is a pure boolean test over a descriptor plus a
//! [`MatchContext`] (introspector handle, source type, optional working
//! instance). Matchers are immutable once built and composable via
//! [`all_of`], [`any_of`] and [`not`] without mutating the operands.
//!
//! Per-kind matchers ([`FieldMatcher`], [`MethodMatcher`],
//! [`ConstructorMatcher`], [`TypeMatcher`]) are produced by their builders;
//! the builders are the only non-thread-safe objects in the library.

mod base;
mod constructor;
mod containment;
mod field;
mod method;
mod signature;
mod types;

pub use constructor::{ConstructorMatcher, ConstructorMatcherBuilder};
pub use containment::Cardinality;
pub use field::{field_named, FieldMatcher, FieldMatcherBuilder};
pub use method::{method_with_params, MethodMatcher, MethodMatcherBuilder};
pub use types::{type_exact, TypeMatcher, TypeMatcherBuilder};

use std::any::Any;
use std::sync::Arc;

use optic_model::{Introspector, TypeId};

/// Context threaded through every match evaluation.
#[derive(Clone, Copy)]
pub struct MatchContext<'a> {
    intr: &'a Introspector,
    source: TypeId,
    instance: Option<&'a (dyn Any + Send + Sync)>,
}

impl<'a> MatchContext<'a> {
    /// Create a context without a working instance.
    pub fn new(intr: &'a Introspector, source: TypeId) -> Self {
        Self {
            intr,
            source,
            instance: None,
        }
    }

    /// Create a context bound to a working instance.
    pub fn with_instance(
        intr: &'a Introspector,
        source: TypeId,
        instance: &'a (dyn Any + Send + Sync),
    ) -> Self {
        Self {
            intr,
            source,
            instance: Some(instance),
        }
    }

    /// The introspector evaluating this query.
    pub fn introspector(&self) -> &'a Introspector {
        self.intr
    }

    /// The type whose declaration level is currently being searched.
    pub fn source(&self) -> TypeId {
        self.source
    }

    /// The working instance, if one was supplied.
    pub fn instance(&self) -> Option<&'a (dyn Any + Send + Sync)> {
        self.instance
    }
}

/// A pure predicate over a descriptor.
pub trait Matcher<T: ?Sized>: Send + Sync {
    /// Test a descriptor within the given context.
    fn matches(&self, member: &T, ctx: &MatchContext<'_>) -> bool;
}

/// A shared, immutable matcher.
pub type SharedMatcher<T> = Arc<dyn Matcher<T>>;

impl<T: ?Sized, F> Matcher<T> for F
where
    F: Fn(&T, &MatchContext<'_>) -> bool + Send + Sync,
{
    fn matches(&self, member: &T, ctx: &MatchContext<'_>) -> bool {
        self(member, ctx)
    }
}

struct Always;

impl<T: ?Sized> Matcher<T> for Always {
    fn matches(&self, _member: &T, _ctx: &MatchContext<'_>) -> bool {
        true
    }
}

struct Never;

impl<T: ?Sized> Matcher<T> for Never {
    fn matches(&self, _member: &T, _ctx: &MatchContext<'_>) -> bool {
        false
    }
}

struct Not<T: ?Sized>(SharedMatcher<T>);

impl<T: ?Sized> Matcher<T> for Not<T> {
    fn matches(&self, member: &T, ctx: &MatchContext<'_>) -> bool {
        !self.0.matches(member, ctx)
    }
}

struct AllOf<T: ?Sized>(Vec<SharedMatcher<T>>);

impl<T: ?Sized> Matcher<T> for AllOf<T> {
    fn matches(&self, member: &T, ctx: &MatchContext<'_>) -> bool {
        self.0.iter().all(|m| m.matches(member, ctx))
    }
}

struct AnyOf<T: ?Sized>(Vec<SharedMatcher<T>>);

impl<T: ?Sized> Matcher<T> for AnyOf<T> {
    fn matches(&self, member: &T, ctx: &MatchContext<'_>) -> bool {
        self.0.iter().any(|m| m.matches(member, ctx))
    }
}

/// A matcher accepting every member.
pub fn always<T: ?Sized + 'static>() -> SharedMatcher<T> {
    Arc::new(Always)
}

/// A matcher rejecting every member.
pub fn never<T: ?Sized + 'static>() -> SharedMatcher<T> {
    Arc::new(Never)
}

/// Invert a matcher.
pub fn not<T: ?Sized + 'static>(matcher: SharedMatcher<T>) -> SharedMatcher<T> {
    Arc::new(Not(matcher))
}

/// Conjunction: every matcher must accept. Empty input accepts everything.
pub fn all_of<T: ?Sized + 'static>(matchers: Vec<SharedMatcher<T>>) -> SharedMatcher<T> {
    Arc::new(AllOf(matchers))
}

/// Disjunction: at least one matcher must accept. Empty input rejects
/// everything.
pub fn any_of<T: ?Sized + 'static>(matchers: Vec<SharedMatcher<T>>) -> SharedMatcher<T> {
    Arc::new(AnyOf(matchers))
}

//! Field matching.

use optic_model::{FieldDescriptor, TypeDescriptor};

use crate::matcher::base::{impl_filter_builder, BaseFilter, FilterCore};
use crate::matcher::{MatchContext, Matcher, SharedMatcher};

/// A matcher accepting fields with exactly the given name.
pub fn field_named(name: &str) -> SharedMatcher<FieldDescriptor> {
    std::sync::Arc::new(FieldMatcher::builder().with_name_exact(name).build())
}

/// An immutable predicate over fields.
pub struct FieldMatcher {
    base: BaseFilter<FieldDescriptor>,
    value_type: Option<SharedMatcher<TypeDescriptor>>,
}

impl FieldMatcher {
    /// Start building a field matcher.
    pub fn builder() -> FieldMatcherBuilder {
        FieldMatcherBuilder::default()
    }
}

impl Matcher<FieldDescriptor> for FieldMatcher {
    fn matches(&self, member: &FieldDescriptor, ctx: &MatchContext<'_>) -> bool {
        if !self.base.matches(member, ctx) {
            return false;
        }

        if let Some(value_type) = &self.value_type {
            let matched = match ctx.introspector().wrap_type(member.value_type()) {
                Ok(desc) => value_type.matches(&desc, ctx),
                Err(_) => false,
            };
            if !matched {
                return false;
            }
        }

        true
    }
}

/// Accumulates field constraints; [`build`](Self::build) snapshots them into
/// an immutable [`FieldMatcher`].
#[derive(Default)]
pub struct FieldMatcherBuilder {
    core: FilterCore<FieldDescriptor>,
    value_type: Option<SharedMatcher<TypeDescriptor>>,
}

impl_filter_builder!(FieldMatcherBuilder, optic_model::FieldDescriptor);

impl FieldMatcherBuilder {
    /// Require the field value type to satisfy a nested type matcher.
    pub fn with_value_type(mut self, matcher: SharedMatcher<TypeDescriptor>) -> Self {
        self.value_type = Some(matcher);
        self
    }

    /// Snapshot the accumulated constraints.
    ///
    /// The builder stays usable; later changes do not affect matchers
    /// already built.
    pub fn build(&self) -> FieldMatcher {
        FieldMatcher {
            base: self.core.freeze(),
            value_type: self.value_type.clone(),
        }
    }
}

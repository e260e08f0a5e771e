//! Shared matcher core: flags, name, syntheticity, escape hatch.

use std::sync::Arc;

use regex::Regex;

use optic_model::{Member, MemberFlags};

use crate::error::QueryError;
use crate::matcher::MatchContext;

/// Predicate over a member name.
///
/// Exact and regex matching share this path: an exact name is compiled as a
/// literal-escaped, fully anchored pattern.
#[derive(Clone)]
pub(crate) enum NamePredicate {
    Pattern(Regex),
    Custom(Arc<dyn Fn(&str) -> bool + Send + Sync>),
}

impl NamePredicate {
    pub(crate) fn exact(name: &str) -> Self {
        match Self::anchored(&regex::escape(name)) {
            Ok(pred) => pred,
            // Escaped literals always compile; fall back to plain equality
            // if the regex engine ever disagrees.
            Err(_) => {
                let name = name.to_string();
                NamePredicate::Custom(Arc::new(move |s| s == name))
            }
        }
    }

    /// Compile a user pattern, anchored to match the entire name.
    pub(crate) fn anchored(pattern: &str) -> Result<Self, QueryError> {
        Regex::new(&format!("^(?:{})$", pattern))
            .map(NamePredicate::Pattern)
            .map_err(|e| QueryError::InvalidArgument(format!("Invalid name pattern: {}", e)))
    }

    pub(crate) fn test(&self, name: &str) -> bool {
        match self {
            NamePredicate::Pattern(re) => re.is_match(name),
            NamePredicate::Custom(f) => f(name),
        }
    }
}

type CustomPredicate<T> = Arc<dyn Fn(&T, &MatchContext<'_>) -> bool + Send + Sync>;

/// Immutable base constraints evaluated before any kind-specific ones.
pub(crate) struct BaseFilter<T: ?Sized> {
    required: MemberFlags,
    excluded: MemberFlags,
    name: Option<NamePredicate>,
    synthetic: Option<bool>,
    custom: Option<CustomPredicate<T>>,
}

impl<T: ?Sized> Clone for BaseFilter<T> {
    fn clone(&self) -> Self {
        Self {
            required: self.required,
            excluded: self.excluded,
            name: self.name.clone(),
            synthetic: self.synthetic,
            custom: self.custom.clone(),
        }
    }
}

impl<T: Member + ?Sized> BaseFilter<T> {
    /// Evaluate the base constraints in order, short-circuiting on the
    /// first failure: required flags, excluded flags, name, syntheticity,
    /// custom predicate.
    pub(crate) fn matches(&self, member: &T, ctx: &MatchContext<'_>) -> bool {
        let flags = member.flags();

        if !flags.contains(self.required) {
            return false;
        }

        if flags.intersects(self.excluded) {
            return false;
        }

        if let Some(name) = &self.name {
            if !name.test(member.name()) {
                return false;
            }
        }

        if let Some(synthetic) = self.synthetic {
            if synthetic != member.is_synthetic() {
                return false;
            }
        }

        if let Some(custom) = &self.custom {
            if !custom(member, ctx) {
                return false;
            }
        }

        true
    }
}

/// Mutable accumulator for base constraints.
///
/// Maintains the invariant that required and excluded flags never overlap:
/// requiring a flag removes it from the excluded set and vice versa.
pub(crate) struct FilterCore<T: ?Sized> {
    required: MemberFlags,
    excluded: MemberFlags,
    name: Option<NamePredicate>,
    synthetic: Option<bool>,
    custom: Option<CustomPredicate<T>>,
}

impl<T: ?Sized> Default for FilterCore<T> {
    fn default() -> Self {
        Self {
            required: MemberFlags::EMPTY,
            excluded: MemberFlags::EMPTY,
            name: None,
            synthetic: None,
            custom: None,
        }
    }
}

impl<T: ?Sized> FilterCore<T> {
    pub(crate) fn require(&mut self, flags: MemberFlags) {
        self.required = self.required.union(flags);
        self.excluded = self.excluded.difference(flags);
    }

    pub(crate) fn exclude(&mut self, flags: MemberFlags) {
        self.excluded = self.excluded.union(flags);
        self.required = self.required.difference(flags);
    }

    pub(crate) fn name_exact(&mut self, name: &str) {
        self.name = Some(NamePredicate::exact(name));
    }

    pub(crate) fn name_regex(&mut self, pattern: &str) -> Result<(), QueryError> {
        self.name = Some(NamePredicate::anchored(pattern)?);
        Ok(())
    }

    pub(crate) fn name_predicate(&mut self, pred: Arc<dyn Fn(&str) -> bool + Send + Sync>) {
        self.name = Some(NamePredicate::Custom(pred));
    }

    pub(crate) fn synthetic(&mut self, synthetic: bool) {
        self.synthetic = Some(synthetic);
    }

    pub(crate) fn custom(&mut self, pred: CustomPredicate<T>) {
        self.custom = Some(pred);
    }

    pub(crate) fn required_flags(&self) -> MemberFlags {
        self.required
    }

    pub(crate) fn excluded_flags(&self) -> MemberFlags {
        self.excluded
    }

    /// Snapshot the accumulated state into an immutable filter.
    pub(crate) fn freeze(&self) -> BaseFilter<T> {
        BaseFilter {
            required: self.required,
            excluded: self.excluded,
            name: self.name.clone(),
            synthetic: self.synthetic,
            custom: self.custom.clone(),
        }
    }
}

/// Generate the base builder methods shared by all per-kind builders.
macro_rules! impl_filter_builder {
    ($builder:ident, $member:ty) => {
        impl $builder {
            /// Require the matched member to have all of the given flags.
            ///
            /// Flags required here are removed from the excluded set.
            pub fn with_flags(mut self, flags: optic_model::MemberFlags) -> Self {
                self.core.require(flags);
                self
            }

            /// Require the matched member to have none of the given flags.
            ///
            /// Flags excluded here are removed from the required set.
            pub fn without_flags(mut self, flags: optic_model::MemberFlags) -> Self {
                self.core.exclude(flags);
                self
            }

            /// Require the matched member to have exactly this name.
            pub fn with_name_exact(mut self, name: &str) -> Self {
                self.core.name_exact(name);
                self
            }

            /// Require the matched member name to match this pattern.
            ///
            /// The pattern must match the entire name.
            pub fn with_name_regex(
                mut self,
                pattern: &str,
            ) -> Result<Self, crate::error::QueryError> {
                self.core.name_regex(pattern)?;
                Ok(self)
            }

            /// Require the matched member name to satisfy this predicate.
            pub fn with_name_predicate(
                mut self,
                pred: impl Fn(&str) -> bool + Send + Sync + 'static,
            ) -> Self {
                self.core.name_predicate(std::sync::Arc::new(pred));
                self
            }

            /// Require the matched member to be synthetic or not.
            pub fn with_syntheticity(mut self, synthetic: bool) -> Self {
                self.core.synthetic(synthetic);
                self
            }

            /// Use a custom predicate as an escape hatch.
            ///
            /// Prefer the dedicated constraints whenever possible.
            pub fn with_predicate(
                mut self,
                pred: impl Fn(&$member, &crate::matcher::MatchContext<'_>) -> bool
                    + Send
                    + Sync
                    + 'static,
            ) -> Self {
                self.core.custom(std::sync::Arc::new(pred));
                self
            }
        }
    };
}

pub(crate) use impl_filter_builder;

#[cfg(test)]
mod tests {
    use super::*;
    use optic_model::FieldDescriptor;

    #[test]
    fn test_required_and_excluded_stay_disjoint() {
        let mut core: FilterCore<FieldDescriptor> = FilterCore::default();
        core.require(MemberFlags::STATIC);
        core.exclude(MemberFlags::FINAL);
        assert_eq!(
            core.required_flags().intersection(core.excluded_flags()),
            MemberFlags::EMPTY
        );

        // Flipping a flag from required to excluded clears it on the other side.
        core.exclude(MemberFlags::STATIC);
        assert!(!core.required_flags().contains(MemberFlags::STATIC));
        assert!(core.excluded_flags().contains(MemberFlags::STATIC));

        core.require(MemberFlags::FINAL.union(MemberFlags::STATIC));
        assert_eq!(
            core.required_flags().intersection(core.excluded_flags()),
            MemberFlags::EMPTY
        );
    }

    #[test]
    fn test_exact_name_is_literal() {
        let pred = NamePredicate::exact("get$value");
        assert!(pred.test("get$value"));
        // The dollar sign is escaped, not treated as an anchor.
        assert!(!pred.test("get"));
        assert!(!pred.test("get$value2"));
    }

    #[test]
    fn test_anchored_regex_matches_entire_name() {
        let pred = NamePredicate::anchored("get.*").unwrap();
        assert!(pred.test("getValue"));
        assert!(!pred.test("target"));

        let pred = NamePredicate::anchored("a|b").unwrap();
        assert!(pred.test("a"));
        assert!(pred.test("b"));
        assert!(!pred.test("ab"));
    }

    #[test]
    fn test_invalid_regex_fails_at_construction() {
        assert!(matches!(
            NamePredicate::anchored("("),
            Err(QueryError::InvalidArgument(_))
        ));
    }
}

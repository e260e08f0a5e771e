//! Predicate matchers and member resolution for the optic introspection
//! library.
//!
//! This crate builds the query side on top of `optic-model`: composable
//! boolean matchers over descriptors, per-kind matcher builders with
//! structural constraints, and two resolution façades: exact (cached,
//! single-result, signature-based) and fuzzy (recursive, all-results,
//! override-filtered).
//!
//! ## Usage
//!
//! ```ignore
//! let intr = Arc::new(Introspector::new(provider));
//! let exact = ExactResolver::new(intr.clone(), my_type)?;
//! let area = exact.method("area", &[])?;
//!
//! let fuzzy = FuzzyResolver::new(intr, my_type)?;
//! let matcher = FieldMatcher::builder()
//!     .with_flags(MemberFlags::STATIC)
//!     .with_name_regex("counter_.*")?
//!     .build();
//! let counters = fuzzy.fields(Some(&matcher), true);
//! ```

mod error;
pub mod matcher;
pub mod resolve;

pub use error::QueryError;
pub use matcher::{
    all_of, always, any_of, field_named, method_with_params, never, not, type_exact, Cardinality,
    ConstructorMatcher, ConstructorMatcherBuilder, FieldMatcher, FieldMatcherBuilder,
    MatchContext, Matcher, MethodMatcher, MethodMatcherBuilder, SharedMatcher, TypeMatcher,
    TypeMatcherBuilder,
};
pub use resolve::{ExactResolver, FuzzyResolver};

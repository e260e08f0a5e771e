//! Cardinality constraints over a type's declared members.

use std::sync::Arc;

use crate::error::QueryError;
use crate::matcher::{MatchContext, SharedMatcher};

/// How many declared members of one kind must satisfy a nested matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// Every declared member of the kind must match.
    All,
    /// Exactly one declared member of the kind must match, counted over the
    /// full member list.
    Unique,
    /// The match count must fall within the inclusive range. An absent upper
    /// bound means unbounded.
    Range { min: usize, max: Option<usize> },
}

impl Cardinality {
    /// Exactly `n` members must match.
    pub fn exactly(n: usize) -> Self {
        Cardinality::Range {
            min: n,
            max: Some(n),
        }
    }

    /// At least `n` members must match.
    pub fn at_least(n: usize) -> Self {
        Cardinality::Range { min: n, max: None }
    }

    /// At most `n` members must match.
    pub fn at_most(n: usize) -> Self {
        Cardinality::Range {
            min: 0,
            max: Some(n),
        }
    }

    /// Between `min` and `max` members, inclusive.
    ///
    /// Fails at construction when `min > max`, not at match time.
    pub fn in_range(min: usize, max: usize) -> Result<Self, QueryError> {
        if min > max {
            return Err(QueryError::InvalidArgument(format!(
                "Invalid cardinality range: {} > {}",
                min, max
            )));
        }
        Ok(Cardinality::Range {
            min,
            max: Some(max),
        })
    }

    fn accepts(&self, count: usize, total: usize) -> bool {
        match *self {
            Cardinality::All => count == total,
            Cardinality::Unique => count == 1,
            Cardinality::Range { min, max } => count >= min && max.map_or(true, |m| count <= m),
        }
    }
}

/// One nested matcher paired with a cardinality requirement.
pub(crate) struct Containment<T: ?Sized> {
    matcher: SharedMatcher<T>,
    cardinality: Cardinality,
}

impl<T: ?Sized> Clone for Containment<T> {
    fn clone(&self) -> Self {
        Self {
            matcher: self.matcher.clone(),
            cardinality: self.cardinality,
        }
    }
}

impl<T: ?Sized> Containment<T> {
    pub(crate) fn new(matcher: SharedMatcher<T>, cardinality: Cardinality) -> Self {
        Self {
            matcher,
            cardinality,
        }
    }
}

/// Check every constraint of one member kind against the full declared
/// member list.
///
/// Range constraints are checked first, unique constraints in a second pass.
/// A unique constraint counts its matches over the whole list, so two
/// members each satisfying the nested matcher fail it even though either
/// alone would pass. Constraints are a pure conjunction; order across
/// independent constraints does not affect the outcome.
pub(crate) fn check<T: ?Sized>(
    constraints: &[Containment<T>],
    members: &[Arc<T>],
    ctx: &MatchContext<'_>,
) -> bool {
    let total = members.len();

    for constraint in constraints {
        if matches!(constraint.cardinality, Cardinality::Unique) {
            continue;
        }
        let count = members
            .iter()
            .filter(|m| constraint.matcher.matches(m, ctx))
            .count();
        if !constraint.cardinality.accepts(count, total) {
            return false;
        }
    }

    for constraint in constraints {
        if !matches!(constraint.cardinality, Cardinality::Unique) {
            continue;
        }
        let count = members
            .iter()
            .filter(|m| constraint.matcher.matches(m, ctx))
            .count();
        if !constraint.cardinality.accepts(count, total) {
            return false;
        }
    }

    true
}

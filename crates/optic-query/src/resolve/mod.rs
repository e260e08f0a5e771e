//! Member resolution over a type hierarchy.
//!
//! Both façades share one traversal primitive: enumerate a type's own
//! declared members, keep the ones the matcher accepts, then repeat for the
//! ancestor chain when recursive. Own-level results always precede
//! ancestor-level results, which is what makes "closest declaration wins"
//! work.

mod exact;
mod fuzzy;

pub use exact::ExactResolver;
pub use fuzzy::FuzzyResolver;

use std::any::Any;
use std::sync::Arc;

use optic_model::{Introspector, TypeId};

use crate::matcher::{MatchContext, Matcher};

/// Collect matching members across the hierarchy.
///
/// Traversal is an explicit loop over the materialized ancestor chain, own
/// level first. The context's source type is the level currently being
/// searched, not the type the query started from.
pub(crate) fn collect<T: ?Sized>(
    intr: &Introspector,
    start: TypeId,
    instance: Option<&(dyn Any + Send + Sync)>,
    matcher: Option<&dyn Matcher<T>>,
    recursive: bool,
    declared: impl Fn(&Introspector, TypeId) -> Vec<Arc<T>>,
) -> Vec<Arc<T>> {
    let chain = if recursive {
        intr.ancestor_chain(start)
    } else {
        vec![start]
    };

    let mut results = Vec::new();
    for level in chain {
        let ctx = match instance {
            Some(instance) => MatchContext::with_instance(intr, level, instance),
            None => MatchContext::new(intr, level),
        };
        for member in declared(intr, level) {
            let retained = match matcher {
                Some(matcher) => matcher.matches(&member, &ctx),
                None => true,
            };
            if retained {
                results.push(member);
            }
        }
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use optic_model::{FieldSpec, Member, TypeModel, TypeSpec};

    const OBJECT: TypeId = TypeId::new(0);
    const INT: TypeId = TypeId::new(1);
    const PARENT: TypeId = TypeId::new(2);
    const CHILD: TypeId = TypeId::new(3);

    fn intr() -> Introspector {
        let model = TypeModel::builder()
            .register(TypeSpec::new(OBJECT, "Object"))
            .register(TypeSpec::new(INT, "int"))
            .register(
                TypeSpec::new(PARENT, "Parent")
                    .extends(OBJECT)
                    .field(FieldSpec::new("shared", INT))
                    .field(FieldSpec::new("own", INT)),
            )
            .register(
                TypeSpec::new(CHILD, "Child")
                    .extends(PARENT)
                    .field(FieldSpec::new("shared", INT)),
            )
            .build();
        Introspector::new(Arc::new(model))
    }

    #[test]
    fn test_own_level_precedes_ancestors() {
        let intr = intr();
        let all = collect(&intr, CHILD, None, None, true, |i, t| i.declared_fields(t));
        let names: Vec<_> = all
            .iter()
            .map(|f| (f.name().to_string(), f.declaring_type()))
            .collect();
        assert_eq!(
            names,
            vec![
                ("shared".to_string(), Some(CHILD)),
                ("shared".to_string(), Some(PARENT)),
                ("own".to_string(), Some(PARENT)),
            ]
        );
    }

    #[test]
    fn test_non_recursive_stops_at_own_level() {
        let intr = intr();
        let own = collect(&intr, CHILD, None, None, false, |i, t| i.declared_fields(t));
        assert_eq!(own.len(), 1);
        assert_eq!(own[0].declaring_type(), Some(CHILD));
    }
}

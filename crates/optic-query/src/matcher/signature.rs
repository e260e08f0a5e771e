//! Positional parameter and thrown-type constraints shared by callables.

use optic_model::{TypeDescriptor, TypeId};

use crate::matcher::{MatchContext, SharedMatcher};

/// Optional positional constraints over a type sequence.
///
/// When configured, the sequence length must equal the configured arity
/// exactly; an absent slot matcher accepts any type at that position.
/// Unconfigured means any arity.
pub(crate) struct SignatureFilter {
    slots: Option<Vec<Option<SharedMatcher<TypeDescriptor>>>>,
}

impl Clone for SignatureFilter {
    fn clone(&self) -> Self {
        Self {
            slots: self.slots.clone(),
        }
    }
}

impl Default for SignatureFilter {
    fn default() -> Self {
        Self { slots: None }
    }
}

impl SignatureFilter {
    pub(crate) fn set(&mut self, slots: Vec<Option<SharedMatcher<TypeDescriptor>>>) {
        self.slots = Some(slots);
    }

    pub(crate) fn matches(&self, sequence: &[TypeId], ctx: &MatchContext<'_>) -> bool {
        let slots = match &self.slots {
            Some(slots) => slots,
            None => return true,
        };

        if slots.len() != sequence.len() {
            return false;
        }

        slots.iter().zip(sequence).all(|(slot, &ty)| match slot {
            None => true,
            Some(matcher) => match ctx.introspector().wrap_type(ty) {
                Ok(desc) => matcher.matches(&desc, ctx),
                // A type the provider cannot describe matches nothing.
                Err(_) => false,
            },
        })
    }
}

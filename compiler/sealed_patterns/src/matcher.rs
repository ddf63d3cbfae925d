//! The structural matcher.

use sealed_ir::{Bindings, Name, Pattern, Value};
use sealed_stack::ensure_sufficient_stack;

/// Outcome of matching one pattern against one value.
#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use]
pub enum MatchResult {
    Success(Bindings),
    /// Structural mismatch. Ordinary control flow, not an error.
    Failure,
}

impl MatchResult {
    pub fn is_success(&self) -> bool {
        matches!(self, MatchResult::Success(_))
    }

    pub fn bindings(&self) -> Option<&Bindings> {
        match self {
            MatchResult::Success(b) => Some(b),
            MatchResult::Failure => None,
        }
    }

    pub fn into_bindings(self) -> Option<Bindings> {
        match self {
            MatchResult::Success(b) => Some(b),
            MatchResult::Failure => None,
        }
    }

    #[inline]
    fn empty() -> Self {
        MatchResult::Success(Bindings::new())
    }
}

/// Match `pattern` against `value`.
///
/// Pure: neither input is touched, and repeated calls give equal results
/// (provided guards are pure). Recursion depth follows pattern depth, not
/// value size: a sub-value that no sub-pattern inspects is never visited.
pub fn match_pattern(pattern: &Pattern, value: &Value) -> MatchResult {
    ensure_sufficient_stack(|| match pattern {
        Pattern::Wildcard => MatchResult::empty(),

        Pattern::Binding(name) => MatchResult::Success(Bindings::single(*name, value.clone())),

        Pattern::Literal(expected) => {
            if expected == value {
                MatchResult::empty()
            } else {
                MatchResult::Failure
            }
        }

        Pattern::TypeTest { tag, name } => {
            if !value.is_instance_of(*tag) {
                return MatchResult::Failure;
            }
            match name {
                Some(name) => MatchResult::Success(Bindings::single(*name, value.clone())),
                None => MatchResult::empty(),
            }
        }

        Pattern::Deconstruct { tag, subpatterns } => match_fields(*tag, subpatterns, value),

        // The guard only ever sees a structurally matched value.
        Pattern::Guarded { inner, guard } => match match_pattern(inner, value) {
            MatchResult::Success(bindings) if guard.check(&bindings) => {
                MatchResult::Success(bindings)
            }
            _ => MatchResult::Failure,
        },
    })
}

/// Positional sub-matching, left to right, stopping at the first failure.
fn match_fields(tag: Name, subpatterns: &[Pattern], value: &Value) -> MatchResult {
    let Some((actual, fields)) = value.shape() else {
        return MatchResult::Failure;
    };
    // Arity is validated against the declared shape; a value built outside
    // the registry may still disagree, and that is a plain mismatch.
    if actual != tag || fields.len() != subpatterns.len() {
        return MatchResult::Failure;
    }

    let mut bindings = Bindings::new();
    for (sub, field) in subpatterns.iter().zip(fields) {
        match match_pattern(sub, field) {
            MatchResult::Success(b) => bindings.merge(b),
            MatchResult::Failure => return MatchResult::Failure,
        }
    }
    MatchResult::Success(bindings)
}

//! Construction-time arm validation.

use rustc_hash::FxHashSet;
use sealed_ir::{Name, Pattern, TypeRegistry, TypeTag};
use sealed_stack::ensure_sufficient_stack;

use crate::PatternError;

/// Check one arm's pattern against the declared types.
///
/// Rejects a name bound twice anywhere in the arm, a `Deconstruct` whose
/// sub-pattern count differs from the record's declared arity, a
/// `Deconstruct` of a sum type, and tags that no declaration can satisfy. All problems are collected, in
/// left-to-right pattern order.
pub fn validate_arm(registry: &TypeRegistry, pattern: &Pattern) -> Result<(), Vec<PatternError>> {
    let mut walker = Validator {
        registry,
        bound: FxHashSet::default(),
        errors: Vec::new(),
    };
    walker.walk(pattern);
    if walker.errors.is_empty() {
        Ok(())
    } else {
        tracing::debug!(count = walker.errors.len(), "arm rejected");
        Err(walker.errors)
    }
}

struct Validator<'a> {
    registry: &'a TypeRegistry,
    bound: FxHashSet<Name>,
    errors: Vec<PatternError>,
}

impl Validator<'_> {
    fn walk(&mut self, pattern: &Pattern) {
        ensure_sufficient_stack(|| match pattern {
            Pattern::Wildcard | Pattern::Literal(_) => {}
            Pattern::Binding(name) => self.bind(*name),
            Pattern::TypeTest { tag, name } => {
                if !self.registry.knows(*tag) {
                    self.errors.push(PatternError::UnknownTag { tag: *tag });
                }
                if let Some(name) = name {
                    self.bind(*name);
                }
            }
            Pattern::Deconstruct { tag, subpatterns } => {
                match self.registry.arity(*tag) {
                    Some(expected) if expected != subpatterns.len() => {
                        self.errors.push(PatternError::ArityMismatch {
                            tag: *tag,
                            expected,
                            found: subpatterns.len(),
                        });
                    }
                    Some(_) => {}
                    None if self.registry.catalog(*tag).is_some() => {
                        self.errors.push(PatternError::DeconstructSum { sum: *tag });
                    }
                    None => self.errors.push(PatternError::UnknownTag {
                        tag: TypeTag::Named(*tag),
                    }),
                }
                for sub in subpatterns {
                    self.walk(sub);
                }
            }
            Pattern::Guarded { inner, .. } => self.walk(inner),
        });
    }

    fn bind(&mut self, name: Name) {
        if !self.bound.insert(name) {
            self.errors.push(PatternError::DuplicateBindingName { name });
        }
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;

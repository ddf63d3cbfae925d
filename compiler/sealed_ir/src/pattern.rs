//! Pattern trees.
//!
//! A pattern is built by the front end, validated once per arm
//! (`sealed_patterns::validate_arm`), and is read-only afterwards. The same
//! tree feeds both the matcher and the exhaustiveness checker.

use std::fmt;
use std::sync::Arc;

use crate::{Bindings, Name, TypeTag, Value};

/// Predicate attached to a [`Pattern::Guarded`].
///
/// Sees the inner pattern's bindings; cannot add any.
#[derive(Clone)]
pub struct Guard(Arc<dyn Fn(&Bindings) -> bool + Send + Sync>);

impl Guard {
    pub fn new(f: impl Fn(&Bindings) -> bool + Send + Sync + 'static) -> Self {
        Guard(Arc::new(f))
    }

    #[inline]
    pub fn check(&self, bindings: &Bindings) -> bool {
        (self.0)(bindings)
    }
}

impl fmt::Debug for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard(..)")
    }
}

/// A structural pattern.
#[derive(Clone, Debug)]
pub enum Pattern {
    /// `_`
    Wildcard,
    /// `var x`: matches anything, binds it.
    Binding(Name),
    /// Matches a structurally equal value.
    ///
    /// Unlike `TypeTest` and `Deconstruct`, a literal does not look through
    /// variant wrappers: a bare `None()` record literal never equals an
    /// `Optional` value carrying `None()`. Write the literal as a variant
    /// (or use `Deconstruct`) to match sum-typed values.
    Literal(Value),
    /// `Character c` / `String s`: runtime tag test, optionally binding the
    /// whole value.
    TypeTest { tag: TypeTag, name: Option<Name> },
    /// `Position(var x, var y)`: tag test plus positional sub-patterns.
    Deconstruct { tag: Name, subpatterns: Vec<Pattern> },
    /// `inner && guard`
    Guarded { inner: Box<Pattern>, guard: Guard },
}

impl Pattern {
    pub fn binding(name: Name) -> Self {
        Pattern::Binding(name)
    }

    pub fn literal(value: Value) -> Self {
        Pattern::Literal(value)
    }

    pub fn type_test(tag: impl Into<TypeTag>) -> Self {
        Pattern::TypeTest {
            tag: tag.into(),
            name: None,
        }
    }

    /// Type test that binds the tested value to `name`.
    pub fn bind_type(tag: impl Into<TypeTag>, name: Name) -> Self {
        Pattern::TypeTest {
            tag: tag.into(),
            name: Some(name),
        }
    }

    pub fn deconstruct(tag: Name, subpatterns: Vec<Pattern>) -> Self {
        Pattern::Deconstruct { tag, subpatterns }
    }

    #[must_use]
    pub fn guarded(self, guard: impl Fn(&Bindings) -> bool + Send + Sync + 'static) -> Self {
        Pattern::Guarded {
            inner: Box::new(self),
            guard: Guard::new(guard),
        }
    }

    /// `_` or a bare binding: matches every value.
    pub fn is_irrefutable(&self) -> bool {
        matches!(self, Pattern::Wildcard | Pattern::Binding(_))
    }

    /// True if a guard appears anywhere in the tree.
    pub fn has_guard(&self) -> bool {
        match self {
            Pattern::Guarded { .. } => true,
            Pattern::Deconstruct { subpatterns, .. } => subpatterns.iter().any(Pattern::has_guard),
            Pattern::Wildcard
            | Pattern::Binding(_)
            | Pattern::Literal(_)
            | Pattern::TypeTest { .. } => false,
        }
    }
}

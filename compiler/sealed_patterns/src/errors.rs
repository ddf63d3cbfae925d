//! Construction-time pattern errors.

use std::fmt;

use sealed_diagnostic::{Diagnostic, ErrorCode};
use sealed_ir::{Name, Span, StringLookup, TypeTag};

/// A pattern that must be rejected before any match is attempted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PatternError {
    /// `name` is bound more than once within one arm.
    DuplicateBindingName { name: Name },
    /// A `Deconstruct` has `found` sub-patterns; `tag` declares `expected` fields.
    ArityMismatch {
        tag: Name,
        expected: usize,
        found: usize,
    },
    /// `tag` is neither a primitive nor a declared type.
    UnknownTag { tag: TypeTag },
    /// A `Deconstruct` names a sum type; only its record shapes have fields.
    DeconstructSum { sum: Name },
}

impl PatternError {
    pub fn code(&self) -> ErrorCode {
        match self {
            PatternError::DuplicateBindingName { .. } => ErrorCode::E3001,
            PatternError::ArityMismatch { .. } => ErrorCode::E3002,
            PatternError::UnknownTag { .. } | PatternError::DeconstructSum { .. } => {
                ErrorCode::E3003
            }
        }
    }

    pub fn describe(&self, names: &impl StringLookup) -> String {
        match self {
            PatternError::DuplicateBindingName { name } => format!(
                "identifier `{}` is bound more than once in the same pattern",
                names.lookup(*name)
            ),
            PatternError::ArityMismatch {
                tag,
                expected,
                found,
            } => format!(
                "`{}` has {expected} field(s), but the pattern has {found}",
                names.lookup(*tag)
            ),
            PatternError::UnknownTag { tag } => {
                format!("cannot find type `{}`", tag.describe(names))
            }
            PatternError::DeconstructSum { sum } => format!(
                "`{}` is a sum type, not a record, and cannot be deconstructed",
                names.lookup(*sum)
            ),
        }
    }

    /// Diagnostic pointing at the offending arm.
    pub fn to_diagnostic(&self, arm_span: Span, names: &impl StringLookup) -> Diagnostic {
        let diag = Diagnostic::error(self.code())
            .with_message(self.describe(names))
            .with_label(arm_span, "in this pattern");
        match self {
            PatternError::DuplicateBindingName { .. } => {
                diag.with_note("each name may be bound only once per arm")
            }
            PatternError::ArityMismatch { .. } => {
                diag.with_note("use `_` for fields you do not need")
            }
            PatternError::UnknownTag { .. } => diag,
            PatternError::DeconstructSum { .. } => {
                diag.with_note("deconstruct one of its shapes, or use a type test")
            }
        }
    }
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternError::DuplicateBindingName { name } => {
                write!(f, "duplicate binding {name:?}")
            }
            PatternError::ArityMismatch {
                tag,
                expected,
                found,
            } => write!(f, "{tag:?} expects {expected} sub-patterns, found {found}"),
            PatternError::UnknownTag { tag } => write!(f, "unknown tag {tag:?}"),
            PatternError::DeconstructSum { sum } => write!(f, "cannot deconstruct sum {sum:?}"),
        }
    }
}

impl std::error::Error for PatternError {}

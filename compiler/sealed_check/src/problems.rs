//! Findings of the exhaustiveness checker, and their diagnostics.

use std::fmt;

use sealed_diagnostic::{Diagnostic, ErrorCode};
use sealed_ir::{Name, Span, StringLookup};

/// A problem found while checking one match construct.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PatternProblem {
    /// Some shapes of the scrutinee type are not covered by any unguarded arm.
    NonExhaustive { missing: Vec<Name> },
    /// The arm at `arm_index` can never be selected.
    UnreachableArm { arm_index: usize },
    /// The scrutinee type is not a declared record or sum.
    UnknownScrutinee { name: Name },
}

impl PatternProblem {
    pub fn code(&self) -> ErrorCode {
        match self {
            PatternProblem::NonExhaustive { .. } => ErrorCode::E3004,
            PatternProblem::UnreachableArm { .. } => ErrorCode::W3001,
            PatternProblem::UnknownScrutinee { .. } => ErrorCode::E3005,
        }
    }

    /// Unreachable arms are reported but never block a match.
    pub fn is_error(&self) -> bool {
        !self.code().is_warning()
    }

    /// Render as a diagnostic.
    ///
    /// `arm_spans` is indexed by arm; an arm without a span falls back to
    /// `match_span`.
    #[cold]
    pub fn to_diagnostic(
        &self,
        match_span: Span,
        arm_spans: &[Span],
        names: &impl StringLookup,
    ) -> Diagnostic {
        match self {
            PatternProblem::NonExhaustive { missing } => {
                let listed = missing
                    .iter()
                    .map(|tag| format!("`{}`", names.lookup(*tag)))
                    .collect::<Vec<_>>()
                    .join(", ");
                let noun = if missing.len() == 1 { "shape" } else { "shapes" };
                Diagnostic::error(self.code())
                    .with_message(format!("non-exhaustive match: {noun} {listed} not covered"))
                    .with_label(match_span, format!("{listed} not covered"))
                    .with_note("guarded arms do not count towards coverage")
                    .with_note("add an arm for each missing shape, or a `_` arm")
            }
            PatternProblem::UnreachableArm { arm_index } => {
                let arm_span = arm_spans.get(*arm_index).copied().unwrap_or(match_span);
                Diagnostic::warning(self.code())
                    .with_message("unreachable pattern")
                    .with_label(arm_span, "this arm is never selected")
                    .with_secondary_label(match_span, "earlier arms already cover it")
            }
            PatternProblem::UnknownScrutinee { name } => Diagnostic::error(self.code())
                .with_message(format!(
                    "cannot check a match over `{}`: not a declared record or sum type",
                    names.lookup(*name)
                ))
                .with_label(match_span, "in this match"),
        }
    }
}

impl fmt::Display for PatternProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternProblem::NonExhaustive { missing } => {
                write!(f, "non-exhaustive match, missing {missing:?}")
            }
            PatternProblem::UnreachableArm { arm_index } => {
                write!(f, "arm {arm_index} is unreachable")
            }
            PatternProblem::UnknownScrutinee { name } => {
                write!(f, "unknown scrutinee type {name:?}")
            }
        }
    }
}

impl std::error::Error for PatternProblem {}

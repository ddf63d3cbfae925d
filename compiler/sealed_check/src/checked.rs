//! A match construct that was validated and proven exhaustive.

use std::fmt;

use sealed_diagnostic::Diagnostic;
use sealed_ir::{Bindings, Name, Pattern, Span, StringLookup, TypeRegistry, Value};
use sealed_patterns::{select_arm, validate_arm, ArmMatch, PatternError};

use crate::{check_match, ExhaustivenessReport, PatternProblem};

/// One arm: a pattern and whatever the front end runs when it wins.
#[derive(Clone, Debug)]
pub struct Arm<B> {
    pub pattern: Pattern,
    pub body: B,
    pub span: Span,
}

impl<B> Arm<B> {
    pub fn new(pattern: Pattern, body: B) -> Self {
        Arm {
            pattern,
            body,
            span: Span::DUMMY,
        }
    }

    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

/// Why a [`CheckedMatch`] could not be built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CheckedMatchError {
    /// An arm failed validation.
    InvalidArm {
        arm_index: usize,
        arm_span: Span,
        errors: Vec<PatternError>,
    },
    /// The scrutinee type is unknown, or some shape is not covered.
    Rejected(PatternProblem),
}

impl CheckedMatchError {
    pub fn to_diagnostics(&self, match_span: Span, names: &impl StringLookup) -> Vec<Diagnostic> {
        match self {
            CheckedMatchError::InvalidArm {
                arm_span, errors, ..
            } => errors
                .iter()
                .map(|e| e.to_diagnostic(*arm_span, names))
                .collect(),
            CheckedMatchError::Rejected(problem) => {
                vec![problem.to_diagnostic(match_span, &[], names)]
            }
        }
    }
}

impl fmt::Display for CheckedMatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckedMatchError::InvalidArm {
                arm_index, errors, ..
            } => write!(f, "arm {arm_index} is invalid ({} error(s))", errors.len()),
            CheckedMatchError::Rejected(problem) => fmt::Display::fmt(problem, f),
        }
    }
}

impl std::error::Error for CheckedMatchError {}

/// An ordered arm list over a closed scrutinee type, known to be total.
///
/// Built only through [`CheckedMatch::new`], which validates every arm and
/// runs the exhaustiveness check. Unreachable arms are kept (and reported
/// through [`CheckedMatch::warnings`]); a non-exhaustive arm list is refused.
#[derive(Clone, Debug)]
pub struct CheckedMatch<B> {
    scrutinee: Name,
    arms: Vec<Arm<B>>,
    report: ExhaustivenessReport,
}

impl<B> CheckedMatch<B> {
    pub fn new(
        registry: &TypeRegistry,
        scrutinee: Name,
        arms: Vec<Arm<B>>,
    ) -> Result<Self, CheckedMatchError> {
        for (arm_index, arm) in arms.iter().enumerate() {
            validate_arm(registry, &arm.pattern).map_err(|errors| {
                CheckedMatchError::InvalidArm {
                    arm_index,
                    arm_span: arm.span,
                    errors,
                }
            })?;
        }

        let patterns: Vec<Pattern> = arms.iter().map(|arm| arm.pattern.clone()).collect();
        let report =
            check_match(registry, scrutinee, &patterns).map_err(CheckedMatchError::Rejected)?;
        if let Some(problem) = report.problems().into_iter().find(PatternProblem::is_error) {
            return Err(CheckedMatchError::Rejected(problem));
        }
        for &arm_index in &report.unreachable {
            tracing::warn!(arm_index, "unreachable arm kept in checked match");
        }

        Ok(CheckedMatch {
            scrutinee,
            arms,
            report,
        })
    }

    pub fn scrutinee(&self) -> Name {
        self.scrutinee
    }

    pub fn arms(&self) -> &[Arm<B>] {
        &self.arms
    }

    pub fn report(&self) -> &ExhaustivenessReport {
        &self.report
    }

    /// Unreachable-arm warnings.
    pub fn warnings(&self) -> Vec<PatternProblem> {
        self.report.problems()
    }

    pub fn warning_diagnostics(
        &self,
        match_span: Span,
        names: &impl StringLookup,
    ) -> Vec<Diagnostic> {
        let arm_spans: Vec<Span> = self.arms.iter().map(|arm| arm.span).collect();
        self.warnings()
            .iter()
            .map(|w| w.to_diagnostic(match_span, &arm_spans, names))
            .collect()
    }

    /// Pick the first arm that matches `value`.
    ///
    /// # Panics
    ///
    /// If no arm matches. The arm list was proven exhaustive, so this means
    /// `value` is not an instance of the scrutinee type.
    pub fn select(&self, value: &Value) -> (&B, Bindings) {
        match select_arm(self.arms.iter().map(|arm| &arm.pattern), value) {
            Some(ArmMatch {
                arm_index,
                bindings,
            }) => (&self.arms[arm_index].body, bindings),
            None => {
                tracing::error!(
                    scrutinee = ?self.scrutinee,
                    value = ?value.tag(),
                    "no arm matched in a checked match"
                );
                panic!(
                    "non-exhaustive match: no arm matched a value tagged {:?}",
                    value.tag()
                );
            }
        }
    }
}

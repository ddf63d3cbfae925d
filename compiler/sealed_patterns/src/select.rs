//! First-match-wins arm selection.

use sealed_ir::{Bindings, Pattern, Value};

use crate::matcher::{match_pattern, MatchResult};

/// The arm that won, with the bindings its pattern produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArmMatch {
    pub arm_index: usize,
    pub bindings: Bindings,
}

/// Try each arm in order and return the first that matches.
///
/// Later arms are not attempted once one succeeds, so their guards never
/// run. `None` means no arm matched; whether that is an error is up to the
/// caller (a checked match treats it as a broken invariant).
pub fn select_arm<'a>(
    arms: impl IntoIterator<Item = &'a Pattern>,
    value: &Value,
) -> Option<ArmMatch> {
    for (arm_index, pattern) in arms.into_iter().enumerate() {
        if let MatchResult::Success(bindings) = match_pattern(pattern, value) {
            tracing::trace!(arm_index, bound = bindings.len(), "arm selected");
            return Some(ArmMatch {
                arm_index,
                bindings,
            });
        }
    }
    tracing::trace!("no arm matched");
    None
}

//! Sealed Patterns - structural matching over closed record hierarchies.
//!
//! - [`match_pattern`]: one pattern against one value, producing
//!   [`MatchResult::Success`] with bindings or [`MatchResult::Failure`]
//! - [`select_arm`]: first-match-wins over an ordered arm list
//! - [`validate_arm`]: construction-time checks (duplicate bindings, arity,
//!   unknown tags), run once per arm before any match is attempted
//!
//! A structural mismatch is not an error: it is the `Failure` outcome and
//! drives arm selection. Construction-time problems come back as
//! [`PatternError`] values, convertible to diagnostics.

mod errors;
mod matcher;
mod select;
mod validate;

pub use errors::PatternError;
pub use matcher::{match_pattern, MatchResult};
pub use select::{select_arm, ArmMatch};
pub use validate::validate_arm;

#[cfg(test)]
mod test_helpers;

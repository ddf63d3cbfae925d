//! Diagnostics for the matching core.
//!
//! Construction-time pattern errors and check-time coverage problems are
//! reported as data: each becomes a [`Diagnostic`] with an [`ErrorCode`],
//! a message, labeled spans and notes. Nothing in the core prints.

mod diagnostic;
mod error_code;

pub use diagnostic::{Diagnostic, Label, Severity};
pub use error_code::ErrorCode;

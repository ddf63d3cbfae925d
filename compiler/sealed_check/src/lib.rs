//! Sealed Check - exhaustiveness checking for closed matches.
//!
//! A match over a sum type whose [`VariantCatalog`](sealed_ir::VariantCatalog)
//! is closed can be proven total at construction time:
//!
//! - [`check_exhaustive`] / [`check_match`] report which catalog shapes no
//!   unguarded arm covers, and which arms can never be reached
//! - [`PatternProblem`] turns those findings into diagnostics
//! - [`CheckedMatch`] bundles validation, checking and first-match
//!   selection, so a match that failed checking cannot be run
//!
//! Call [`init_tracing`] early to get checker logs on stderr when
//! `RUST_LOG` is set.

mod checked;
mod exhaustiveness;
mod problems;

use std::sync::Once;

pub use checked::{Arm, CheckedMatch, CheckedMatchError};
pub use exhaustiveness::{check_exhaustive, check_match, Coverage, ExhaustivenessReport};
pub use problems::PatternProblem;

static TRACING_INIT: Once = Once::new();

/// Install a `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset, and nothing on any call after
/// the first.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

//! Stack safety for recursion over pattern and value trees.
//!
//! Pattern nesting is unbounded: a `Deconstruct` may hold another
//! `Deconstruct` to any depth, and the matcher, validator and checker all
//! recurse once per nesting level. Wrapping each recursive step in
//! [`ensure_sufficient_stack`] grows the stack on demand instead of
//! overflowing it.
//!
//! - **Native targets**: `stacker::maybe_grow`.
//! - **WASM targets**: plain call.

/// Remaining stack below which we grow (100KB).
const RED_ZONE: usize = 100 * 1024;

/// Size of each new stack segment (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
///
/// ```text
/// fn match_pattern(pattern: &Pattern, value: &Value) -> MatchResult {
///     ensure_sufficient_stack(|| match pattern {
///         // ... recursive cases ...
///     })
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests;

//! Stack safety for recursive tree passes.
//!
//! Parsing, tree building and substitution all recurse once per level
//! of markup nesting. Templates are written by hand and rarely go deep,
//! but generated markup can, so every recursive step goes through
//! [`ensure_sufficient_stack`].
//!
//! - **Native targets**: `stacker` grows the stack on demand.
//! - **WASM targets**: plain call (the host manages the stack).

/// If less than this remains, grow before recursing (64KB).
const RED_ZONE: usize = 64 * 1024;

/// Size of each additional stack segment (1MB).
const GROWTH: usize = 1024 * 1024;

/// Run `f`, growing the stack first if it is close to exhausted.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, GROWTH, f)
}

/// WASM version - just call directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests;

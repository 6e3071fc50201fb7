//! Indentation-based markup templates compiled to virtual DOM.
//!
//! ```text
//! let name = "world";
//! let view = pug!("
//!     main#app
//!       h1.title Hello ", name, "
//!       a(href='/about') About
//! ")?;
//! ```
//!
//! A template is the static fragments of the call site with interpolated
//! values in between. On the first call from a call site the fragments
//! are joined with placeholder tokens, parsed, and built into a virtual
//! tree, which is cached for that call site. Every call then substitutes
//! its interpolations into a fresh copy of the cached tree.
//!
//! # Pipeline
//!
//! - [`placeholder`]: token encoding of interpolation slots
//! - [`strip_indent`]: common indentation removal
//! - `emjay_parse`: markup to syntax tree
//! - [`build()`]: syntax tree to virtual nodes
//! - [`substitute()`]: tokens to values, per call
//! - [`TemplateCache`]: one compiled [`Template`] per call site

pub mod attrs;
mod build;
mod cache;
mod normalize;
pub mod placeholder;
mod strip_indent;
mod substitute;
mod template;

#[cfg(test)]
mod testing;


pub use build::build;
pub use cache::{LiteralKey, TemplateCache};
pub use emjay_ir::{
    key_of, Attrs, Children, Handler, Opaque, VNode, Value, FRAGMENT_TAG, TEXT_TAG,
};
pub use emjay_parse::ParseError;
pub use normalize::normalize;
pub use placeholder::Placeholders;
pub use strip_indent::strip_indent;
pub use substitute::substitute;
pub use template::Template;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=emjay=debug` or `RUST_LOG=emjay=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}

/// Render a template from its call-site fragments and interpolations.
///
/// `fragments` must be the call site's own static array: its address is
/// the cache key. `interpolations` line up with the gaps between
/// fragments; missing ones render as nothing.
///
/// Usually called through [`pug!`].
pub fn emjay(
    fragments: &'static [&'static str],
    interpolations: &[Value],
) -> Result<Value, ParseError> {
    let template = TemplateCache::global().get_or_build(fragments)?;
    Ok(template.render(interpolations))
}

/// Render a template written as alternating fragments and values.
///
/// Fragments are string literals; values are any expression with an
/// `Into<Value>` conversion. The first and last arguments are fragments.
///
/// ```text
/// pug!("br")
/// pug!("p Hello ", name, "!")
/// pug!("button(", on_click, ") Go")
/// ```
#[macro_export]
macro_rules! pug {
    ($first:literal $(, $value:expr, $fragment:literal)*) => {{
        static FRAGMENTS: [&str; [$first $(, $fragment)*].len()] = [$first $(, $fragment)*];
        $crate::emjay(&FRAGMENTS, &[$($crate::Value::from($value)),*])
    }};
}

//! Per-call-site template cache.
//!
//! Templates are keyed by the identity of their fragment array: the
//! address and length of a `&'static [&'static str]`. Each `pug!` call
//! site owns one such static, so a call site compiles its template once
//! and every later call reuses it. Entries live as long as the cache;
//! static fragment arrays never go away, so nothing is ever evicted.
//!
//! Reads take a shared lock. A miss takes the write lock, checks again,
//! and compiles while holding it, so a template is compiled exactly once
//! even when several threads miss together.

use std::sync::{Arc, OnceLock};

use emjay_parse::ParseError;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::template::Template;

/// Identity of a static fragment array.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct LiteralKey {
    addr: usize,
    len: usize,
}

impl LiteralKey {
    pub fn of(fragments: &'static [&'static str]) -> Self {
        LiteralKey {
            addr: fragments.as_ptr() as usize,
            len: fragments.len(),
        }
    }
}

/// Map from fragment array identity to its compiled template.
#[derive(Default)]
pub struct TemplateCache {
    templates: RwLock<FxHashMap<LiteralKey, Arc<Template>>>,
}

impl TemplateCache {
    /// An empty cache, separate from the global one.
    pub fn new() -> Self {
        TemplateCache::default()
    }

    /// The process-wide cache used by [`crate::emjay`].
    ///
    /// Created empty on first use; grows for the rest of the process.
    pub fn global() -> &'static TemplateCache {
        static GLOBAL: OnceLock<TemplateCache> = OnceLock::new();
        GLOBAL.get_or_init(TemplateCache::new)
    }

    /// The template for `fragments`, compiling it on first use.
    ///
    /// A template that fails to compile is not cached; the next call
    /// tries again and fails the same way.
    pub fn get_or_build(
        &self,
        fragments: &'static [&'static str],
    ) -> Result<Arc<Template>, ParseError> {
        self.get_or_insert_with(LiteralKey::of(fragments), || Template::compile(fragments))
    }

    /// The template under `key`, running `build` if there is none.
    ///
    /// `build` runs at most once per key (per success). It runs under the
    /// write lock and must not touch this cache.
    pub(crate) fn get_or_insert_with<E>(
        &self,
        key: LiteralKey,
        build: impl FnOnce() -> Result<Template, E>,
    ) -> Result<Arc<Template>, E> {
        // Fast path: already compiled
        if let Some(template) = self.templates.read().get(&key) {
            trace!(?key, "template cache hit");
            return Ok(Arc::clone(template));
        }

        // Slow path: compile under the write lock
        let mut templates = self.templates.write();

        // Double-check after acquiring write lock
        if let Some(template) = templates.get(&key) {
            trace!(?key, "template cache hit after wait");
            return Ok(Arc::clone(template));
        }

        debug!(?key, "template cache miss");
        let template = Arc::new(build()?);
        templates.insert(key, Arc::clone(&template));
        Ok(template)
    }

    /// The template for `fragments`, if it was compiled already.
    pub fn get(&self, fragments: &'static [&'static str]) -> Option<Arc<Template>> {
        self.templates.read().get(&LiteralKey::of(fragments)).cloned()
    }

    pub fn len(&self) -> usize {
        self.templates.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.read().is_empty()
    }
}

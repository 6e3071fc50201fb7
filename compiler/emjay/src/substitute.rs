//! Placeholder substitution over a built tree.
//!
//! A dynamic template is built once with placeholder tokens in it; every
//! render walks that tree and produces a new one with the tokens replaced
//! by the call's interpolations. Each visited node is a fresh allocation,
//! so no node of the result is pointer-equal to its cached counterpart.
//!
//! Per node, in order:
//!
//! 1. A tag that is a token is an interpolation in node position. The
//!    normalized value replaces a childless node outright; otherwise the
//!    node becomes a fragment of the value followed by its children.
//! 2. Text children containing tokens are split into literal spans and
//!    the raw interpolated values, in order. A text node split this way
//!    becomes a fragment of those spans and values.
//! 3. Child lists are substituted recursively.
//! 4. Attributes: a token name with a `true` value spreads a named
//!    handler or a mapping; any other token name is a dynamic attribute
//!    name; a token value is replaced by its interpolation.

use std::sync::Arc;

use emjay_ir::{key_of, Attrs, Children, VNode, Value, FRAGMENT_TAG};
use emjay_stack::ensure_sufficient_stack;
use rustc_hash::FxBuildHasher;
use tracing::warn;

use crate::normalize::normalize;
use crate::placeholder::Placeholders;

/// Substitute `interpolations` into a built tree.
pub fn substitute(tree: &Value, interpolations: &[Value], placeholders: Placeholders) -> Value {
    let walker = Walker {
        interpolations,
        placeholders,
    };
    walker.value(tree)
}

struct Walker<'v> {
    interpolations: &'v [Value],
    placeholders: Placeholders,
}

impl Walker<'_> {
    /// The interpolation at `index`; `Undefined` past the end of the list.
    fn resolve(&self, index: usize) -> Value {
        if let Some(value) = self.interpolations.get(index) {
            value.clone()
        } else {
            warn!(
                index,
                supplied = self.interpolations.len(),
                "interpolation index outside the supplied values"
            );
            Value::Undefined
        }
    }

    fn value(&self, value: &Value) -> Value {
        match value {
            Value::Node(node) => ensure_sufficient_stack(|| self.node(node)),
            other => other.clone(),
        }
    }

    fn node(&self, node: &VNode) -> Value {
        let slot = node
            .tag
            .as_deref()
            .and_then(|tag| self.placeholders.parse(tag));

        if let Some(index) = slot {
            let replacement = normalize(&self.resolve(index));
            if node.is_childless() {
                return replacement;
            }
            let mut items = vec![replacement];
            match self.children(node.children.as_ref()) {
                Some(Children::List(children)) => items.extend(children),
                Some(Children::Text(text)) => items.push(Value::Str(text)),
                None => {}
            }
            return self.rebuild(node, Some(FRAGMENT_TAG.to_owned()), Some(Children::List(items)));
        }

        let children = self.children(node.children.as_ref());
        // A text node split around tokens holds values now, not text.
        let tag = match children {
            Some(Children::List(_)) if node.is_text() => Some(FRAGMENT_TAG.to_owned()),
            _ => node.tag.clone(),
        };
        self.rebuild(node, tag, children)
    }

    /// New node with substituted attributes and a key derived from them.
    fn rebuild(&self, node: &VNode, tag: Option<String>, children: Option<Children>) -> Value {
        let attrs = node.attrs.as_ref().map(|attrs| self.attrs(attrs));
        Value::Node(Arc::new(VNode {
            tag,
            key: key_of(attrs.as_ref()),
            attrs,
            children,
            text: node.text.clone(),
            dom: node.dom.clone(),
            dom_size: node.dom_size,
            state: node.state.clone(),
            events: node.events.clone(),
            instance: node.instance.clone(),
        }))
    }

    fn children(&self, children: Option<&Children>) -> Option<Children> {
        match children? {
            Children::Text(text) => Some(self.text(text)),
            Children::List(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    match self.value(item) {
                        Value::List(spliced) => out.extend(spliced),
                        other => out.push(other),
                    }
                }
                Some(Children::List(out))
            }
        }
    }

    /// Split text on its tokens: `a<0>b<1>c` becomes `["a", v0, "b", v1, "c"]`.
    ///
    /// Empty spans at either end or between adjacent tokens are kept.
    fn text(&self, text: &str) -> Children {
        let mut items = Vec::new();
        let mut last = 0;
        for token in self.placeholders.find_iter(text) {
            items.push(Value::Str(text[last..token.range.start].to_owned()));
            items.push(self.resolve(token.index));
            last = token.range.end;
        }

        if items.is_empty() {
            return Children::Text(text.to_owned());
        }
        items.push(Value::Str(text[last..].to_owned()));
        Children::List(items)
    }

    fn attrs(&self, attrs: &Attrs) -> Attrs {
        let mut out = Attrs::with_capacity_and_hasher(attrs.len(), FxBuildHasher);

        for (name, value) in attrs {
            let mut name = name.clone();

            if let Some(index) = self.placeholders.parse(&name) {
                let interpolation = self.resolve(index);

                if *value == Value::Bool(true) {
                    let handler_name = match &interpolation {
                        Value::Handler(handler) => handler.name().map(str::to_owned),
                        _ => None,
                    };
                    match (handler_name, interpolation) {
                        (Some(handler_name), handler) => {
                            out.insert(handler_name, handler);
                        }
                        (None, Value::Map(entries)) => out.extend(entries),
                        (None, _) => {
                            out.insert(name, Value::Bool(true));
                        }
                    }
                    continue;
                }

                match attribute_name(&interpolation) {
                    Some(dynamic) => name = dynamic,
                    None => {
                        warn!(
                            attribute = %name,
                            value = ?interpolation,
                            "dynamic attribute name is not a string, number or boolean"
                        );
                        continue;
                    }
                }
            }

            let value = match value.as_str().and_then(|v| self.placeholders.parse(v)) {
                Some(index) => self.resolve(index),
                None => value.clone(),
            };
            out.insert(name, value);
        }

        out
    }
}

/// Scalar interpolations usable as an attribute name.
fn attribute_name(value: &Value) -> Option<String> {
    match value {
        Value::Bool(b) => Some(b.to_string()),
        Value::Str(_) | Value::Number(_) => value.to_text(),
        _ => None,
    }
}

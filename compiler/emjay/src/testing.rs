//! Test helpers: an HTML serializer and a hyperscript builder.
//!
//! Templates are checked by rendering both the template output and a
//! hand-built tree to HTML and comparing the strings. Attributes are
//! written sorted by name so attribute order never matters.

use std::fmt::Write as _;

use crate::{Attrs, Children, VNode, Value, FRAGMENT_TAG, TEXT_TAG};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// HTML for a rendered value.
pub fn html(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value);
    out
}

fn write_value(out: &mut String, value: &Value) {
    match value {
        Value::Undefined | Value::Null | Value::Bool(_) => {}
        Value::Str(_) | Value::Number(_) => {
            escape_into(out, &value.to_text().unwrap_or_default());
        }
        Value::List(items) => items.iter().for_each(|item| write_value(out, item)),
        Value::Node(node) => write_node(out, node),
        Value::Map(_) | Value::Handler(_) | Value::Opaque(_) => {}
    }
}

fn write_children(out: &mut String, children: Option<&Children>) {
    match children {
        Some(Children::Text(text)) => escape_into(out, text),
        Some(Children::List(items)) => items.iter().for_each(|item| write_value(out, item)),
        None => {}
    }
}

fn write_node(out: &mut String, node: &VNode) {
    let tag = node.tag.as_deref().unwrap_or(FRAGMENT_TAG);
    if tag == TEXT_TAG {
        // The DOM stringifies whatever a text node holds.
        match &node.children {
            Some(Children::Text(text)) => escape_into(out, text),
            Some(Children::List(items)) => escape_into(out, &list_text(items)),
            None => {}
        }
        return;
    }
    if tag == FRAGMENT_TAG {
        write_children(out, node.children.as_ref());
        return;
    }

    out.push('<');
    out.push_str(tag);
    if let Some(attrs) = &node.attrs {
        write_attrs(out, attrs);
    }
    out.push('>');

    if VOID_ELEMENTS.contains(&tag) {
        return;
    }
    write_children(out, node.children.as_ref());
    let _ = write!(out, "</{tag}>");
}

/// A list in string form: items joined by commas, nothing-values empty.
fn list_text(items: &[Value]) -> String {
    items
        .iter()
        .map(|item| match item {
            Value::Undefined | Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Str(_) | Value::Number(_) => item.to_text().unwrap_or_default(),
            Value::List(nested) => list_text(nested),
            Value::Map(_) | Value::Handler(_) | Value::Node(_) | Value::Opaque(_) => {
                "[object Object]".to_owned()
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}

fn write_attrs(out: &mut String, attrs: &Attrs) {
    let mut entries: Vec<(&str, &Value)> = attrs
        .iter()
        .filter(|(name, _)| name.as_str() != "key")
        .map(|(name, value)| match name.as_str() {
            "className" => ("class", value),
            other => (other, value),
        })
        .collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    for (name, value) in entries {
        match value {
            Value::Bool(true) => {
                let _ = write!(out, " {name}");
            }
            Value::Str(_) | Value::Number(_) => {
                let _ = write!(out, " {name}=\"");
                escape_into(out, &value.to_text().unwrap_or_default());
                out.push('"');
            }
            _ => {}
        }
    }
}

fn escape_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

/// Hyperscript: build an element from a selector and children.
///
/// Selectors take the form `tag#id.class[name=value][flag]`; the tag
/// defaults to `div`. String children become text nodes.
pub fn h(selector: &str, children: Vec<Value>) -> Value {
    let (tag, attrs) = parse_selector(selector);
    let children: Vec<Value> = children
        .into_iter()
        .map(|child| match child {
            Value::Str(text) => Value::from(VNode::text(text)),
            other => other,
        })
        .collect();
    let children = (!children.is_empty()).then_some(Children::List(children));
    Value::from(VNode::new(tag, children, attrs))
}

fn parse_selector(selector: &str) -> (String, Option<Attrs>) {
    let head_end = selector.find(&['#', '.', '['][..]).unwrap_or(selector.len());
    let tag = match &selector[..head_end] {
        "" => "div".to_owned(),
        name => name.to_owned(),
    };

    let mut attrs = Attrs::default();
    let mut classes: Vec<String> = Vec::new();
    let mut rest = &selector[head_end..];

    while let Some(sigil) = rest.chars().next() {
        rest = &rest[1..];
        if sigil == '[' {
            let end = rest.find(']').unwrap_or(rest.len());
            let entry = &rest[..end];
            rest = rest.get(end + 1..).unwrap_or("");
            match entry.split_once('=') {
                Some((name, value)) => {
                    let value = value.trim_matches(|c| c == '"' || c == '\'');
                    if name == "class" {
                        classes.push(value.to_owned());
                    } else {
                        attrs.insert(name.to_owned(), Value::from(value));
                    }
                }
                None => {
                    attrs.insert(entry.to_owned(), Value::Bool(true));
                }
            }
        } else {
            let end = rest.find(&['#', '.', '['][..]).unwrap_or(rest.len());
            let name = &rest[..end];
            rest = &rest[end..];
            if sigil == '#' {
                attrs.insert("id".to_owned(), Value::from(name));
            } else {
                classes.push(name.to_owned());
            }
        }
    }

    if !classes.is_empty() {
        attrs.insert("className".to_owned(), Value::from(classes.join(" ")));
    }
    let attrs = (!attrs.is_empty()).then_some(attrs);
    (tag, attrs)
}

/// Assert that two values render to the same HTML.
#[track_caller]
pub fn assert_html_parity(actual: &Value, expected: &Value) {
    pretty_assertions::assert_eq!(html(actual), html(expected));
}

//! Attribute list normalization.

use emjay_ir::{AttrValue, Attribute, Attrs, Value};
use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;

/// Key the merged `class` attributes are stored under.
pub const CLASS_NAME: &str = "className";

/// Fold a tag's attribute list into one dictionary.
///
/// - `None` for an empty list, so "no attributes" stays distinct from `{}`.
/// - Every `class` is collected, de-duplicated in first-seen order, and
///   stored as one space-separated `className` after everything else.
/// - Any other repeated name keeps its last value.
/// - Single-quoted values lose their quotes; other values are kept as
///   written, and a bare name is `true`.
pub fn normalize(attributes: &[Attribute]) -> Option<Attrs> {
    if attributes.is_empty() {
        return None;
    }

    let mut attrs = Attrs::default();
    let mut classes: IndexSet<String, FxBuildHasher> = IndexSet::default();

    for attribute in attributes {
        let value = match &attribute.value {
            AttrValue::True => Value::Bool(true),
            AttrValue::Expr(expr) => Value::Str(unquote(expr).to_owned()),
        };

        if attribute.name == "class" {
            let class = match value {
                Value::Str(class) => class,
                _ => "true".to_owned(),
            };
            classes.insert(class);
        } else {
            attrs.insert(attribute.name.clone(), value);
        }
    }

    if !classes.is_empty() {
        let joined = classes.into_iter().collect::<Vec<_>>().join(" ");
        attrs.insert(CLASS_NAME.to_owned(), Value::Str(joined));
    }

    Some(attrs)
}

/// Strip one pair of surrounding single quotes.
fn unquote(expr: &str) -> &str {
    expr.strip_prefix('\'')
        .and_then(|rest| rest.strip_suffix('\''))
        .unwrap_or(expr)
}

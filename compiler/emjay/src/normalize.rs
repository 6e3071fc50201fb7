//! Interpolation normalization for node positions.

use emjay_ir::{VNode, Value};
use emjay_stack::ensure_sufficient_stack;

/// Turn an interpolated value into something that can stand as a node.
///
/// Nothing (`undefined`, `null`, booleans) becomes `Null`; lists become
/// fragments of normalized items; strings and numbers become text
/// nodes. Nodes and everything else pass through unchanged.
pub fn normalize(value: &Value) -> Value {
    match value {
        Value::Undefined | Value::Null | Value::Bool(_) => Value::Null,
        Value::List(items) => ensure_sufficient_stack(|| {
            Value::from(VNode::fragment(items.iter().map(normalize).collect()))
        }),
        Value::Str(_) | Value::Number(_) => {
            Value::from(VNode::text(value.to_text().unwrap_or_default()))
        }
        Value::Map(_) | Value::Handler(_) | Value::Node(_) | Value::Opaque(_) => value.clone(),
    }
}

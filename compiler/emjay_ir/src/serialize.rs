//! Serialization in the renderer's field layout.
//!
//! Handlers serialize as their name and opaque objects as `null`: neither
//! can cross a serialization boundary, but the node shape stays intact.

use serde::ser::{SerializeMap, SerializeSeq, SerializeStruct, Serializer};
use serde::Serialize;

use crate::{Attrs, Children, VNode, Value};

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Undefined | Value::Null | Value::Opaque(_) => serializer.serialize_none(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => serializer.serialize_f64(*n),
            Value::Str(s) => serializer.serialize_str(s),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Map(map) => AttrMap(map).serialize(serializer),
            Value::Handler(handler) => match handler.name() {
                Some(name) => serializer.serialize_str(name),
                None => serializer.serialize_none(),
            },
            Value::Node(node) => node.serialize(serializer),
        }
    }
}

/// Borrowed attribute map, serialized in insertion order.
struct AttrMap<'a>(&'a Attrs);

impl Serialize for AttrMap<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut out = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in self.0 {
            out.serialize_entry(name, value)?;
        }
        out.end()
    }
}

impl Serialize for Children {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Children::Text(text) => serializer.serialize_str(text),
            Children::List(items) => items.serialize(serializer),
        }
    }
}

impl Serialize for VNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut node = serializer.serialize_struct("VNode", 10)?;
        node.serialize_field("tag", &self.tag)?;
        node.serialize_field("key", &self.key)?;
        node.serialize_field("attrs", &self.attrs.as_ref().map(AttrMap))?;
        node.serialize_field("children", &self.children)?;
        node.serialize_field("text", &self.text)?;
        node.serialize_field("dom", &None::<()>)?;
        node.serialize_field("domSize", &self.dom_size)?;
        node.serialize_field("state", &None::<()>)?;
        node.serialize_field("events", &None::<()>)?;
        node.serialize_field("instance", &None::<()>)?;
        node.end()
    }
}

//! Interpolation values.
//!
//! A `Value` is whatever the caller put in a `${...}` slot. The walker
//! never inspects values beyond the few distinctions the substitution
//! rules make (nothing, text-like, list, mapping, named callable, node);
//! anything else travels through untouched as [`Value::Opaque`].

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::{Attrs, VNode};

/// A dynamic value supplied for one interpolation slot.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// Absent value. Also what an out-of-range slot resolves to.
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
    List(Vec<Value>),
    /// Plain mapping; spreads into attributes in boolean position.
    Map(Attrs),
    Handler(Handler),
    Node(Arc<VNode>),
    Opaque(Opaque),
}

impl Value {
    /// `Undefined` or `Null`.
    #[inline]
    pub fn is_nothing(&self) -> bool {
        matches!(self, Value::Undefined | Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<&Arc<VNode>> {
        match self {
            Value::Node(node) => Some(node),
            _ => None,
        }
    }

    /// Text for strings and numbers, `None` for everything else.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Value::Str(s) => Some(s.clone()),
            Value::Number(n) => Some(format_number(*n)),
            _ => None,
        }
    }
}

/// Render a number the way the host page would print it:
/// integral values without a fraction, `-0` as `0`.
pub(crate) fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_owned()
    } else if n.is_infinite() {
        let sign = if n > 0.0 { "" } else { "-" };
        format!("{sign}Infinity")
    } else if n == 0.0 {
        "0".to_owned()
    } else {
        n.to_string()
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

macro_rules! impl_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                #[allow(clippy::cast_precision_loss, clippy::cast_lossless, reason = "values are display numbers")]
                fn from(n: $ty) -> Self {
                    Value::Number(n as f64)
                }
            }
        )*
    };
}

impl_from_number!(f32, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<Attrs> for Value {
    fn from(map: Attrs) -> Self {
        Value::Map(map)
    }
}

impl From<VNode> for Value {
    fn from(node: VNode) -> Self {
        Value::Node(Arc::new(node))
    }
}

impl From<Arc<VNode>> for Value {
    fn from(node: Arc<VNode>) -> Self {
        Value::Node(node)
    }
}

impl From<Handler> for Value {
    fn from(handler: Handler) -> Self {
        Value::Handler(handler)
    }
}

impl From<Opaque> for Value {
    fn from(opaque: Opaque) -> Self {
        Value::Opaque(opaque)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Undefined, Into::into)
    }
}

type Callback = dyn Fn(&Value) -> Value + Send + Sync;

/// A callable interpolation, typically an event handler.
///
/// Named handlers spread into attributes under their own name when
/// interpolated in boolean attribute position: `button(${onclick})`.
#[derive(Clone)]
pub struct Handler {
    name: Option<Arc<str>>,
    callback: Arc<Callback>,
}

impl Handler {
    pub fn new(
        name: impl Into<String>,
        callback: impl Fn(&Value) -> Value + Send + Sync + 'static,
    ) -> Self {
        let name: String = name.into();
        Handler {
            name: Some(Arc::from(name)),
            callback: Arc::new(callback),
        }
    }

    pub fn anonymous(callback: impl Fn(&Value) -> Value + Send + Sync + 'static) -> Self {
        Handler {
            name: None,
            callback: Arc::new(callback),
        }
    }

    /// The handler's name, if it has a non-empty one.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }

    pub fn call(&self, argument: &Value) -> Value {
        (self.callback)(argument)
    }
}

impl PartialEq for Handler {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.callback, &other.callback)
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "Handler({name})"),
            None => f.write_str("Handler(<anonymous>)"),
        }
    }
}

/// Renderer-owned object carried through templates unchanged.
///
/// Compared by identity.
#[derive(Clone)]
pub struct Opaque(Arc<dyn Any + Send + Sync>);

impl Opaque {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Opaque(Arc::new(value))
    }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }
}

impl PartialEq for Opaque {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Opaque(..)")
    }
}

//! emjay IR - shared data types
//!
//! This crate contains the data structures passed between the emjay crates:
//! - Spans for locations inside an encoded template
//! - The markup syntax tree produced by `emjay_parse`
//! - Virtual nodes in the shape the rendering library consumes
//! - Interpolation values supplied at each template call
//!
//! # Design Philosophy
//!
//! - **Plain data**: no behaviour beyond construction and inspection.
//!   The algorithms that move between these types live in `emjay`.
//! - **Identity through `Arc`**: a virtual node is shared as `Arc<VNode>`,
//!   so "same node" means `Arc::ptr_eq`, the same notion the renderer's
//!   diffing uses for object identity.

mod span;
pub mod syntax;
mod value;
mod vnode;

#[cfg(feature = "serde")]
mod serialize;

pub use span::Span;
pub use syntax::{AttrValue, Attribute, Block, Comment, Node, Tag, Text};
pub use value::{Handler, Opaque, Value};
pub use vnode::{key_of, Attrs, Children, VNode, FRAGMENT_TAG, TEXT_TAG};

//! Node streams over shared-handle JSON trees.
//!
//! [`traverse`] walks a [`JsonObject`] once, eagerly, and returns a
//! [`NodeStream`]: a single-pass iterator of [`Node`]s, each carrying its
//! path, key, a snapshot of its value and the container that owns it. Any
//! iterator adapter can drive the stream, and [`Node::update_value`] writes
//! straight through to the live tree.
//!
//! # Example
//!
//! ```
//! use json_tree::JsonValue;
//! use json_tree_stream::ToNodeStream;
//!
//! let doc = JsonValue::parse(r#"{"price": 3, "nested": {"price": 5}}"#).unwrap();
//! let root = doc.as_object().unwrap();
//!
//! root.to_stream()
//!     .filter(|n| n.key() == "price")
//!     .for_each(|n| {
//!         let doubled = n.int_value().unwrap() * 2;
//!         n.update_value(doubled).unwrap();
//!     });
//!
//! assert_eq!(root.to_string(), r#"{"price":6,"nested":{"price":10}}"#);
//! ```

mod error;
mod node;
mod options;
pub mod path;
mod stream;
mod walk;

pub use error::NodeError;
pub use node::{Node, Owner};
pub use options::{ArrayWriteBack, TraversalOptions};
pub use stream::{Characteristics, NodeStream};
pub use walk::{traverse, traverse_with};

use json_tree::JsonObject;

/// Entry point for requesting a node stream from a container.
pub trait ToNodeStream {
    /// Recursive stream of every node, containers included, rooted at `""`.
    fn to_stream(&self) -> NodeStream {
        self.to_stream_with(&TraversalOptions::default())
    }

    fn to_stream_with(&self, options: &TraversalOptions) -> NodeStream;
}

impl ToNodeStream for JsonObject {
    fn to_stream_with(&self, options: &TraversalOptions) -> NodeStream {
        traverse_with(self, options)
    }
}

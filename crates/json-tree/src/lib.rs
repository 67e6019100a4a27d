//! Shared-handle JSON value model.
//!
//! Objects and arrays are reference-counted handles: cloning a [`JsonValue`]
//! that holds a container clones the handle, not the contents. The same
//! container can therefore be reachable from several places in a tree (or
//! from itself), and writes made through any handle are visible through all
//! of them.
//!
//! # Example
//!
//! ```
//! use json_tree::{JsonObject, JsonValue};
//!
//! let root = JsonValue::parse(r#"{"a": 1, "b": {"c": 2}}"#).unwrap();
//! let root = root.as_object().unwrap();
//!
//! let b = root.get_object("b").unwrap();
//! b.put("c", 3).unwrap();
//!
//! // `b` is a handle into `root`, so the write is visible from the root.
//! assert_eq!(root.to_string(), r#"{"a":1,"b":{"c":3}}"#);
//! ```

mod array;
mod error;
mod object;
mod value;

pub use array::JsonArray;
pub use error::TreeError;
pub use object::JsonObject;
pub use value::{ContainerId, JsonValue};

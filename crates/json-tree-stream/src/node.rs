use std::fmt;

use json_tree::{JsonArray, JsonObject, JsonValue, TreeError};

use crate::NodeError;

/// The container a node writes through to.
#[derive(Debug, Clone)]
pub enum Owner {
    /// Writes store `key` in this object.
    Object(JsonObject),
    /// Writes overwrite `array[index]`.
    ArraySlot { array: JsonArray, index: usize },
}

impl Owner {
    fn write(&self, key: &str, value: JsonValue) -> Result<(), TreeError> {
        match self {
            Owner::Object(obj) => obj.put(key, value).map(|_| ()),
            Owner::ArraySlot { array, index } => array.set(*index, value).map(|_| ()),
        }
    }
}

/// One location in a JSON tree, captured during a traversal.
///
/// The value is a snapshot taken at walk time. A primitive snapshot never
/// changes; a container snapshot is a handle and shares the live
/// container's contents.
#[derive(Debug, Clone)]
pub struct Node {
    path: String,
    key: String,
    value: JsonValue,
    owner: Option<Owner>,
}

impl Node {
    pub fn new(
        path: impl Into<String>,
        key: impl Into<String>,
        value: JsonValue,
        owner: Option<Owner>,
    ) -> Self {
        Self {
            path: path.into(),
            key: key.into(),
            value,
            owner,
        }
    }

    /// A root node: empty path and key, no owner.
    pub fn detached(value: JsonValue) -> Self {
        Self::new("", "", value, None)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// The field name, or the array index rendered as a string.
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &JsonValue {
        &self.value
    }

    pub fn owner(&self) -> Option<&Owner> {
        self.owner.as_ref()
    }

    pub fn is_leaf(&self) -> bool {
        !self.value.is_container()
    }

    pub fn is_object(&self) -> bool {
        self.value.is_object()
    }

    pub fn is_array(&self) -> bool {
        self.value.is_array()
    }

    /// The value if it is a string; `None` otherwise.
    pub fn string_value(&self) -> Option<&str> {
        self.value.as_str()
    }

    /// Any number, truncated toward zero.
    pub fn int_value(&self) -> Result<i64, NodeError> {
        self.value.as_i64().ok_or_else(|| self.mismatch("number"))
    }

    pub fn double_value(&self) -> Result<f64, NodeError> {
        self.value.as_f64().ok_or_else(|| self.mismatch("number"))
    }

    pub fn bool_value(&self) -> Result<bool, NodeError> {
        self.value.as_bool().ok_or_else(|| self.mismatch("boolean"))
    }

    fn mismatch(&self, expected: &'static str) -> NodeError {
        NodeError::TypeMismatch {
            expected,
            value: self.value.to_string(),
        }
    }

    /// Writes `new_value` into the live tree through the owner.
    ///
    /// Returns `Ok(false)` without doing anything if the node has no owner.
    /// The node itself keeps its old snapshot.
    pub fn update_value(&self, new_value: impl Into<JsonValue>) -> Result<bool, NodeError> {
        match &self.owner {
            Some(owner) => {
                owner.write(&self.key, new_value.into())?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.path, self.value)
    }
}

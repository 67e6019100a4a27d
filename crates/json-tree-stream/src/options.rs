use serde::{Deserialize, Serialize};

/// Where `update_value` writes for a primitive held directly by an array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ArrayWriteBack {
    /// The owner is the nearest enclosing object, and an update stores a
    /// field named by the element index in that object. The array slot is
    /// left untouched.
    #[default]
    EnclosingObject,
    /// The owner is the array itself and an update overwrites the slot.
    Slot,
}

/// Options for a single traversal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TraversalOptions {
    /// Path prefix for every emitted node. Default is `""`.
    pub base_path: String,
    /// Descend into nested objects and arrays. Default is `true`.
    pub recursive: bool,
    /// Emit only nodes whose value is neither an object nor an array.
    /// Default is `false`.
    pub leaves_only: bool,
    pub array_write_back: ArrayWriteBack,
}

impl Default for TraversalOptions {
    fn default() -> Self {
        Self {
            base_path: String::new(),
            recursive: true,
            leaves_only: false,
            array_write_back: ArrayWriteBack::default(),
        }
    }
}

impl TraversalOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn with_leaves_only(mut self, leaves_only: bool) -> Self {
        self.leaves_only = leaves_only;
        self
    }

    pub fn with_array_write_back(mut self, array_write_back: ArrayWriteBack) -> Self {
        self.array_write_back = array_write_back;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = TraversalOptions::default();
        assert_eq!(opts.base_path, "");
        assert!(opts.recursive);
        assert!(!opts.leaves_only);
        assert_eq!(opts.array_write_back, ArrayWriteBack::EnclosingObject);
    }

    #[test]
    fn test_deserialize_partial_config() {
        let opts: TraversalOptions =
            serde_json::from_str(r#"{"leavesOnly": true, "arrayWriteBack": "slot"}"#).unwrap();
        assert_eq!(
            opts,
            TraversalOptions::new()
                .with_leaves_only(true)
                .with_array_write_back(ArrayWriteBack::Slot)
        );
    }

    #[test]
    fn test_serialize_round_trip() {
        let opts = TraversalOptions::new()
            .with_base_path("root")
            .with_recursive(false);
        let text = serde_json::to_string(&opts).unwrap();
        assert_eq!(
            text,
            r#"{"basePath":"root","recursive":false,"leavesOnly":false,"arrayWriteBack":"enclosingObject"}"#
        );
        let back: TraversalOptions = serde_json::from_str(&text).unwrap();
        assert_eq!(back, opts);
    }
}

//! The eager walk behind every [`NodeStream`].
//!
//! The whole tree is linearized before the first node is handed out, so a
//! consumer that mutates the tree while draining the stream cannot disturb
//! the walk. Order is pre-order: a field's node precedes the nodes of its
//! descendants, fields follow key order, elements follow index order.
//!
//! Each object is walked at most once per traversal, at the first path it is
//! reached by. Arrays are not deduplicated: a shared array is walked again at
//! every path that reaches it, unless it is already being walked further up
//! the current descent, in which case it contains itself and is skipped.

use std::collections::{HashSet, VecDeque};

use json_tree::{ContainerId, JsonArray, JsonObject, JsonValue};
use tracing::{debug, trace, warn};

use crate::path::{child_path, index_path};
use crate::{ArrayWriteBack, Node, NodeStream, Owner, TraversalOptions};

/// Walks `root` and returns a stream of its nodes.
///
/// # Example
///
/// ```
/// use json_tree::JsonValue;
/// use json_tree_stream::traverse;
///
/// let doc = JsonValue::parse(r#"{"a": 1, "b": {"c": 2}, "arr": [3, 4]}"#).unwrap();
/// let paths: Vec<String> = traverse(doc.as_object().unwrap(), "", true, false)
///     .map(|n| n.path().to_owned())
///     .collect();
///
/// assert_eq!(paths, vec!["a", "b", "b/c", "arr", "arr[0]", "arr[1]"]);
/// ```
pub fn traverse(root: &JsonObject, base_path: &str, recursive: bool, leaves_only: bool) -> NodeStream {
    let options = TraversalOptions::new()
        .with_base_path(base_path)
        .with_recursive(recursive)
        .with_leaves_only(leaves_only);
    traverse_with(root, &options)
}

/// Walks `root` according to `options` and returns a stream of its nodes.
///
/// Failures reading individual keys or elements are logged and the item is
/// skipped; they never abort the walk.
pub fn traverse_with(root: &JsonObject, options: &TraversalOptions) -> NodeStream {
    let mut walker = Walker::new(options);
    walker.visited.insert(root.id());
    walker.walk_object(root, &options.base_path);

    debug!(
        base_path = %options.base_path,
        nodes = walker.nodes.len(),
        "traversal complete"
    );
    NodeStream::new(walker.nodes)
}

struct Walker<'a> {
    options: &'a TraversalOptions,
    visited: HashSet<ContainerId>,
    // Arrays on the current descent path.
    open_arrays: HashSet<ContainerId>,
    nodes: VecDeque<Node>,
}

impl<'a> Walker<'a> {
    fn new(options: &'a TraversalOptions) -> Self {
        Self {
            options,
            visited: HashSet::new(),
            open_arrays: HashSet::new(),
            nodes: VecDeque::new(),
        }
    }

    fn emit(&mut self, node: Node) {
        if !self.options.leaves_only || node.is_leaf() {
            self.nodes.push_back(node);
        }
    }

    /// Walks the fields of `obj`, which owns every node emitted at this level.
    fn walk_object(&mut self, obj: &JsonObject, path: &str) {
        let keys = match obj.keys() {
            Ok(keys) => keys,
            Err(error) => {
                warn!(path, %error, "cannot read object keys, skipping object");
                return;
            }
        };

        for key in keys {
            let value = match obj.get(&key) {
                Ok(value) => value,
                Err(error) => {
                    warn!(path, key = %key, %error, "cannot read key, skipping");
                    continue;
                }
            };
            let field_path = child_path(path, &key);
            let owner = Owner::Object(obj.clone());
            self.emit(Node::new(field_path.clone(), key, value.clone(), Some(owner)));

            if !self.options.recursive {
                continue;
            }
            match &value {
                JsonValue::Object(child) => self.descend(child, &field_path),
                JsonValue::Array(items) => self.walk_array(items, &field_path, obj),
                _ => {}
            }
        }
    }

    fn descend(&mut self, obj: &JsonObject, path: &str) {
        if self.visited.insert(obj.id()) {
            self.walk_object(obj, path);
        } else {
            trace!(path, "object already visited, not descending");
        }
    }

    /// Walks the elements of `items`. Primitives found here are attributed
    /// to `owner`, the nearest enclosing object, unless slot write-back is
    /// enabled.
    fn walk_array(&mut self, items: &JsonArray, path: &str, owner: &JsonObject) {
        if !self.open_arrays.insert(items.id()) {
            warn!(path, "array contains itself, not descending");
            return;
        }
        self.walk_elements(items, path, owner);
        self.open_arrays.remove(&items.id());
    }

    fn walk_elements(&mut self, items: &JsonArray, path: &str, owner: &JsonObject) {
        let len = match items.try_len() {
            Ok(len) => len,
            Err(error) => {
                warn!(path, %error, "cannot read array length, skipping array");
                return;
            }
        };

        for index in 0..len {
            let element = match items.get(index) {
                Ok(element) => element,
                Err(error) => {
                    warn!(path, index, %error, "cannot read array element, skipping");
                    continue;
                }
            };
            let element_path = index_path(path, index);

            match element {
                JsonValue::Object(child) => self.descend(&child, &element_path),
                JsonValue::Array(nested) => self.walk_array(&nested, &element_path, owner),
                leaf => {
                    let slot_owner = match self.options.array_write_back {
                        ArrayWriteBack::EnclosingObject => Owner::Object(owner.clone()),
                        ArrayWriteBack::Slot => Owner::ArraySlot {
                            array: items.clone(),
                            index,
                        },
                    };
                    self.emit(Node::new(element_path, index.to_string(), leaf, Some(slot_owner)));
                }
            }
        }
    }
}

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::value::ContainerId;
use crate::{JsonArray, JsonValue, TreeError};

/// Handle to an ordered, string-keyed JSON object.
///
/// Keys keep insertion order; overwriting an existing key keeps its position.
/// Cloning the handle shares the underlying object.
#[derive(Clone, Default)]
pub struct JsonObject(Rc<RefCell<IndexMap<String, JsonValue>>>);

impl JsonObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Identity of the underlying object.
    pub fn id(&self) -> ContainerId {
        ContainerId(Rc::as_ptr(&self.0) as *const () as usize)
    }

    /// Returns true if both handles point at the same object.
    pub fn ptr_eq(&self, other: &JsonObject) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Snapshot of the current key list, in iteration order.
    ///
    /// The returned list is detached from the object: later inserts and
    /// removals do not affect it.
    pub fn keys(&self) -> Result<Vec<String>, TreeError> {
        Ok(self.entries()?.keys().cloned().collect())
    }

    /// Returns the value stored at `key`.
    pub fn get(&self, key: &str) -> Result<JsonValue, TreeError> {
        self.entries()?
            .get(key)
            .cloned()
            .ok_or_else(|| TreeError::KeyNotFound(key.to_owned()))
    }

    /// Like [`get`](Self::get), but `None` on any failure.
    pub fn opt(&self, key: &str) -> Option<JsonValue> {
        self.get(key).ok()
    }

    /// Inserts or overwrites `key`, returning the previous value.
    pub fn put(
        &self,
        key: impl Into<String>,
        value: impl Into<JsonValue>,
    ) -> Result<Option<JsonValue>, TreeError> {
        Ok(self.entries_mut()?.insert(key.into(), value.into()))
    }

    /// Removes `key`, preserving the order of the remaining keys.
    pub fn remove(&self, key: &str) -> Result<Option<JsonValue>, TreeError> {
        Ok(self.entries_mut()?.shift_remove(key))
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries().is_ok_and(|map| map.contains_key(key))
    }

    /// Number of fields.
    ///
    /// # Panics
    ///
    /// Panics if the object is exclusively borrowed through
    /// [`entries_mut`](Self::entries_mut).
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    /// # Panics
    ///
    /// Same as [`len`](Self::len).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Shared view of the fields.
    pub fn entries(&self) -> Result<Ref<'_, IndexMap<String, JsonValue>>, TreeError> {
        self.0.try_borrow().map_err(|_| TreeError::Borrowed)
    }

    /// Exclusive view of the fields. While the guard is alive every other
    /// accessor on this object fails with [`TreeError::Borrowed`].
    pub fn entries_mut(&self) -> Result<RefMut<'_, IndexMap<String, JsonValue>>, TreeError> {
        self.0.try_borrow_mut().map_err(|_| TreeError::Borrowed)
    }

    pub fn get_object(&self, key: &str) -> Result<JsonObject, TreeError> {
        match self.get(key)? {
            JsonValue::Object(obj) => Ok(obj),
            _ => Err(TreeError::NotAnObject(key.to_owned())),
        }
    }

    pub fn get_array(&self, key: &str) -> Result<JsonArray, TreeError> {
        match self.get(key)? {
            JsonValue::Array(arr) => Ok(arr),
            _ => Err(TreeError::NotAnArray(key.to_owned())),
        }
    }

    pub fn get_f64(&self, key: &str) -> Result<f64, TreeError> {
        let value = self.get(key)?;
        value.as_f64().ok_or_else(|| mismatch(key, "number", &value))
    }

    pub fn get_i64(&self, key: &str) -> Result<i64, TreeError> {
        let value = self.get(key)?;
        value.as_i64().ok_or_else(|| mismatch(key, "number", &value))
    }

    pub fn get_bool(&self, key: &str) -> Result<bool, TreeError> {
        let value = self.get(key)?;
        value.as_bool().ok_or_else(|| mismatch(key, "boolean", &value))
    }

    pub fn get_str(&self, key: &str) -> Result<String, TreeError> {
        match self.get(key)? {
            JsonValue::String(s) => Ok(s),
            other => Err(mismatch(key, "string", &other)),
        }
    }

    /// Deep-convert into a plain `serde_json::Value`; see [`JsonValue::to_json`].
    pub fn to_json(&self) -> Result<serde_json::Value, TreeError> {
        JsonValue::Object(self.clone()).to_json()
    }
}

fn mismatch(key: &str, expected: &'static str, found: &JsonValue) -> TreeError {
    TreeError::TypeMismatch {
        key: key.to_owned(),
        expected,
        found: found.kind(),
    }
}

impl FromIterator<(String, JsonValue)> for JsonObject {
    fn from_iter<I: IntoIterator<Item = (String, JsonValue)>>(iter: I) -> Self {
        JsonObject(Rc::new(RefCell::new(iter.into_iter().collect())))
    }
}

// Contents are not printed: the object may contain itself.
impl fmt::Debug for JsonObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut dbg = f.debug_struct("JsonObject");
        dbg.field("id", &self.id());
        match self.entries() {
            Ok(map) => dbg.field("keys", &map.keys().collect::<Vec<_>>()),
            Err(_) => dbg.field("keys", &"<borrowed>"),
        };
        dbg.finish()
    }
}

impl fmt::Display for JsonObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&JsonValue::Object(self.clone()), f)
    }
}

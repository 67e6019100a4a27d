use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use crate::value::ContainerId;
use crate::{JsonObject, JsonValue, TreeError};

/// Handle to an index-addressed JSON array.
///
/// Cloning the handle shares the underlying array.
#[derive(Clone, Default)]
pub struct JsonArray(Rc<RefCell<Vec<JsonValue>>>);

impl JsonArray {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> ContainerId {
        ContainerId(Rc::as_ptr(&self.0) as *const () as usize)
    }

    pub fn ptr_eq(&self, other: &JsonArray) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Number of elements.
    ///
    /// # Panics
    ///
    /// Panics if the array is exclusively borrowed; see
    /// [`try_len`](Self::try_len).
    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn try_len(&self) -> Result<usize, TreeError> {
        Ok(self.entries()?.len())
    }

    /// # Panics
    ///
    /// Same as [`len`](Self::len).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, index: usize) -> Result<JsonValue, TreeError> {
        let items = self.entries()?;
        items.get(index).cloned().ok_or(TreeError::IndexOutOfBounds {
            index,
            len: items.len(),
        })
    }

    pub fn opt(&self, index: usize) -> Option<JsonValue> {
        self.get(index).ok()
    }

    pub fn push(&self, value: impl Into<JsonValue>) -> Result<(), TreeError> {
        self.entries_mut()?.push(value.into());
        Ok(())
    }

    /// Overwrites the element at `index`, returning the previous value.
    ///
    /// Unlike [`JsonObject::put`], this never grows the container.
    pub fn set(&self, index: usize, value: impl Into<JsonValue>) -> Result<JsonValue, TreeError> {
        let mut items = self.entries_mut()?;
        let len = items.len();
        let slot = items
            .get_mut(index)
            .ok_or(TreeError::IndexOutOfBounds { index, len })?;
        Ok(std::mem::replace(slot, value.into()))
    }

    pub fn get_object(&self, index: usize) -> Result<JsonObject, TreeError> {
        match self.get(index)? {
            JsonValue::Object(obj) => Ok(obj),
            _ => Err(TreeError::NotAnObject(index.to_string())),
        }
    }

    pub fn to_json(&self) -> Result<serde_json::Value, TreeError> {
        JsonValue::Array(self.clone()).to_json()
    }

    pub fn entries(&self) -> Result<Ref<'_, Vec<JsonValue>>, TreeError> {
        self.0.try_borrow().map_err(|_| TreeError::Borrowed)
    }

    pub fn entries_mut(&self) -> Result<RefMut<'_, Vec<JsonValue>>, TreeError> {
        self.0.try_borrow_mut().map_err(|_| TreeError::Borrowed)
    }
}

impl FromIterator<JsonValue> for JsonArray {
    fn from_iter<I: IntoIterator<Item = JsonValue>>(iter: I) -> Self {
        JsonArray(Rc::new(RefCell::new(iter.into_iter().collect())))
    }
}

impl fmt::Debug for JsonArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut dbg = f.debug_struct("JsonArray");
        dbg.field("id", &self.id());
        match self.entries() {
            Ok(items) => dbg.field("len", &items.len()),
            Err(_) => dbg.field("len", &"<borrowed>"),
        };
        dbg.finish()
    }
}

impl fmt::Display for JsonArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&JsonValue::Array(self.clone()), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_get_set() {
        let arr = JsonArray::new();
        arr.push(1).unwrap();
        arr.push("two").unwrap();

        assert_eq!(arr.len(), 2);
        assert_eq!(arr.get(1).unwrap(), JsonValue::from("two"));

        let prev = arr.set(0, 10).unwrap();
        assert_eq!(prev, JsonValue::from(1));
        assert_eq!(arr.get(0).unwrap(), JsonValue::from(10));
    }

    #[test]
    fn test_out_of_bounds() {
        let arr: JsonArray = vec![JsonValue::Null].into_iter().collect();
        assert!(matches!(
            arr.get(3),
            Err(TreeError::IndexOutOfBounds { index: 3, len: 1 })
        ));
        assert!(matches!(
            arr.set(1, 0),
            Err(TreeError::IndexOutOfBounds { index: 1, len: 1 })
        ));
        assert_eq!(arr.len(), 1);
    }

    #[test]
    fn test_try_len_when_locked() {
        let arr = JsonArray::new();
        let guard = arr.entries_mut().unwrap();
        assert!(matches!(arr.try_len(), Err(TreeError::Borrowed)));
        assert!(matches!(arr.get(0), Err(TreeError::Borrowed)));
        drop(guard);
        assert_eq!(arr.try_len().unwrap(), 0);
    }

    #[test]
    fn test_self_containing_array_display() {
        let arr = JsonArray::new();
        arr.push(arr.clone()).unwrap();
        assert_eq!(arr.to_string(), "<cyclic>");
    }
}

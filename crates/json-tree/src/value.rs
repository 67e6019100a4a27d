use std::collections::HashSet;
use std::fmt;

use serde::ser::{Error as _, Serialize, Serializer};
use serde_json::{Map, Number, Value};

use crate::{JsonArray, JsonObject, TreeError};

/// Identity of a container, stable for as long as the container is alive.
///
/// Two handles have the same id iff they point at the same container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContainerId(pub(crate) usize);

/// A JSON value whose containers are shared handles.
#[derive(Debug, Clone, Default)]
pub enum JsonValue {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Object(JsonObject),
    Array(JsonArray),
}

impl JsonValue {
    /// Parse JSON text into a fresh tree with no shared containers.
    pub fn parse(text: &str) -> Result<Self, TreeError> {
        let value: Value = serde_json::from_str(text)?;
        Ok(Self::from(value))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, JsonValue::Null)
    }

    pub fn is_object(&self) -> bool {
        matches!(self, JsonValue::Object(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, JsonValue::Array(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, JsonValue::Number(_))
    }

    pub fn is_container(&self) -> bool {
        self.is_object() || self.is_array()
    }

    pub fn as_object(&self) -> Option<&JsonObject> {
        match self {
            JsonValue::Object(obj) => Some(obj),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&JsonArray> {
        match self {
            JsonValue::Array(arr) => Some(arr),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            JsonValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            JsonValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            JsonValue::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    /// Integer view of a number. Floats truncate toward zero and saturate at
    /// the `i64` bounds.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            JsonValue::Number(n) => n
                .as_i64()
                .or_else(|| n.as_u64().map(|u| i64::try_from(u).unwrap_or(i64::MAX)))
                .or_else(|| n.as_f64().map(|f| f as i64)),
            _ => None,
        }
    }

    /// Name of the value's JSON type, as used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            JsonValue::Null => "null",
            JsonValue::Bool(_) => "boolean",
            JsonValue::Number(_) => "number",
            JsonValue::String(_) => "string",
            JsonValue::Object(_) => "object",
            JsonValue::Array(_) => "array",
        }
    }

    /// Identity of the container this value holds, if any.
    pub fn container_id(&self) -> Option<ContainerId> {
        match self {
            JsonValue::Object(obj) => Some(obj.id()),
            JsonValue::Array(arr) => Some(arr.id()),
            _ => None,
        }
    }

    /// Deep-convert into a plain `serde_json::Value`.
    ///
    /// Shared containers are copied at each place they occur. Fails with
    /// [`TreeError::Cycle`] if a container contains itself.
    pub fn to_json(&self) -> Result<Value, TreeError> {
        let mut active = HashSet::new();
        to_plain(self, &mut active)
    }
}

fn to_plain(value: &JsonValue, active: &mut HashSet<ContainerId>) -> Result<Value, TreeError> {
    match value {
        JsonValue::Null => Ok(Value::Null),
        JsonValue::Bool(b) => Ok(Value::Bool(*b)),
        JsonValue::Number(n) => Ok(Value::Number(n.clone())),
        JsonValue::String(s) => Ok(Value::String(s.clone())),
        JsonValue::Object(obj) => {
            if !active.insert(obj.id()) {
                return Err(TreeError::Cycle);
            }
            let mut map = Map::new();
            for (key, child) in obj.entries()?.iter() {
                map.insert(key.clone(), to_plain(child, active)?);
            }
            active.remove(&obj.id());
            Ok(Value::Object(map))
        }
        JsonValue::Array(arr) => {
            if !active.insert(arr.id()) {
                return Err(TreeError::Cycle);
            }
            let items = arr
                .entries()?
                .iter()
                .map(|child| to_plain(child, active))
                .collect::<Result<Vec<_>, _>>()?;
            active.remove(&arr.id());
            Ok(Value::Array(items))
        }
    }
}

/// Primitives compare by value, containers by identity.
impl PartialEq for JsonValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (JsonValue::Null, JsonValue::Null) => true,
            (JsonValue::Bool(a), JsonValue::Bool(b)) => a == b,
            (JsonValue::Number(a), JsonValue::Number(b)) => a == b,
            (JsonValue::String(a), JsonValue::String(b)) => a == b,
            (JsonValue::Object(a), JsonValue::Object(b)) => a.ptr_eq(b),
            (JsonValue::Array(a), JsonValue::Array(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl Serialize for JsonValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json()
            .map_err(S::Error::custom)?
            .serialize(serializer)
    }
}

impl fmt::Display for JsonValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_json() {
            Ok(value) => write!(f, "{value}"),
            Err(_) => f.write_str("<cyclic>"),
        }
    }
}

impl From<Value> for JsonValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => JsonValue::Null,
            Value::Bool(b) => JsonValue::Bool(b),
            Value::Number(n) => JsonValue::Number(n),
            Value::String(s) => JsonValue::String(s),
            Value::Array(items) => {
                JsonValue::Array(items.into_iter().map(JsonValue::from).collect())
            }
            Value::Object(map) => JsonValue::Object(
                map.into_iter()
                    .map(|(k, v)| (k, JsonValue::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<bool> for JsonValue {
    fn from(b: bool) -> Self {
        JsonValue::Bool(b)
    }
}

/// Non-finite floats have no JSON representation and become `null`.
impl From<f64> for JsonValue {
    fn from(f: f64) -> Self {
        Number::from_f64(f).map_or(JsonValue::Null, JsonValue::Number)
    }
}

macro_rules! from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for JsonValue {
                fn from(n: $ty) -> Self {
                    JsonValue::Number(Number::from(n))
                }
            }
        )*
    };
}

from_integer!(i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

impl From<&str> for JsonValue {
    fn from(s: &str) -> Self {
        JsonValue::String(s.to_owned())
    }
}

impl From<String> for JsonValue {
    fn from(s: String) -> Self {
        JsonValue::String(s)
    }
}

impl From<JsonObject> for JsonValue {
    fn from(obj: JsonObject) -> Self {
        JsonValue::Object(obj)
    }
}

impl From<JsonArray> for JsonValue {
    fn from(arr: JsonArray) -> Self {
        JsonValue::Array(arr)
    }
}

impl<T: Into<JsonValue>> From<Option<T>> for JsonValue {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(JsonValue::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_preserves_key_order() {
        let value = JsonValue::parse(r#"{"z": 1, "a": 2, "m": 3}"#).unwrap();
        let keys = value.as_object().unwrap().keys().unwrap();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            JsonValue::parse("{not json"),
            Err(TreeError::Parse(_))
        ));
    }

    #[test]
    fn test_primitive_equality() {
        assert_eq!(JsonValue::from(2), JsonValue::from(json!(2)));
        assert_eq!(JsonValue::from("x"), JsonValue::String("x".into()));
        assert_ne!(JsonValue::from(2), JsonValue::from(2.0));
        assert_ne!(JsonValue::Null, JsonValue::from(false));
    }

    #[test]
    fn test_container_equality_is_identity() {
        let a = JsonValue::from(json!({"k": 1}));
        let b = JsonValue::from(json!({"k": 1}));
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
    }

    #[test]
    fn test_non_finite_float_is_null() {
        assert!(JsonValue::from(f64::NAN).is_null());
        assert!(JsonValue::from(f64::INFINITY).is_null());
    }

    #[test]
    fn test_as_i64_conversions() {
        assert_eq!(JsonValue::from(7).as_i64(), Some(7));
        assert_eq!(JsonValue::from(7.9).as_i64(), Some(7));
        assert_eq!(JsonValue::from(-7.9).as_i64(), Some(-7));
        assert_eq!(JsonValue::from(u64::MAX).as_i64(), Some(i64::MAX));
        assert_eq!(JsonValue::from("7").as_i64(), None);
    }

    #[test]
    fn test_option_conversion() {
        assert!(JsonValue::from(None::<i32>).is_null());
        assert_eq!(JsonValue::from(Some(3)), JsonValue::from(3));
    }

    #[test]
    fn test_to_json_copies_shared_containers() {
        let root = JsonObject::new();
        let shared = JsonObject::new();
        shared.put("v", 1).unwrap();
        root.put("x", shared.clone()).unwrap();
        root.put("y", shared).unwrap();

        let plain = JsonValue::from(root).to_json().unwrap();
        assert_eq!(plain, json!({"x": {"v": 1}, "y": {"v": 1}}));
    }

    #[test]
    fn test_to_json_rejects_cycles() {
        let root = JsonObject::new();
        root.put("self", root.clone()).unwrap();
        let value = JsonValue::from(root);

        assert!(matches!(value.to_json(), Err(TreeError::Cycle)));
        assert_eq!(value.to_string(), "<cyclic>");
        assert!(serde_json::to_string(&value).is_err());
    }

    #[test]
    fn test_kind() {
        assert_eq!(JsonValue::Null.kind(), "null");
        assert_eq!(JsonValue::from(json!([1])).kind(), "array");
        assert_eq!(JsonValue::from(json!({})).kind(), "object");
    }
}

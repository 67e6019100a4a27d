//! Items that cannot be read are skipped; the rest of the walk goes on.

use json_tree::{JsonArray, JsonObject, JsonValue};
use json_tree_stream::ToNodeStream;
use pretty_assertions::assert_eq;
use serde_json::json;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

fn object(value: serde_json::Value) -> JsonObject {
    match JsonValue::from(value) {
        JsonValue::Object(obj) => obj,
        other => panic!("expected object, got {other}"),
    }
}

#[test]
fn test_locked_object_is_skipped() {
    init_tracing();
    let root = object(json!({"a": 1, "locked": {"hidden": 2}, "z": 3}));
    let locked = root.get_object("locked").unwrap();

    let guard = locked.entries_mut().unwrap();
    let paths: Vec<String> = root.to_stream().map(|n| n.path().to_owned()).collect();
    drop(guard);

    assert_eq!(paths, vec!["a", "locked", "z"]);
}

#[test]
fn test_locked_array_is_skipped() {
    init_tracing();
    let root = object(json!({"arr": [1, 2], "after": {"k": true}}));
    let arr: JsonArray = root.get_array("arr").unwrap();

    let guard = arr.entries_mut().unwrap();
    let paths: Vec<String> = root.to_stream().map(|n| n.path().to_owned()).collect();
    drop(guard);

    assert_eq!(paths, vec!["arr", "after", "after/k"]);
}

#[test]
fn test_locked_root_yields_empty_stream() {
    init_tracing();
    let root = object(json!({"a": 1}));

    let guard = root.entries_mut().unwrap();
    let stream = root.to_stream();
    drop(guard);

    assert_eq!(stream.estimate_size(), 0);
}

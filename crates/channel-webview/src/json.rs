//! JSON decoding for page results.

use channel_common::BridgeError;
use serde_json::Value;
use tracing::warn;

/// A decoded JSON object.
pub type JsonMap = serde_json::Map<String, Value>;

/// Parse `text` and require a top-level object.
///
/// Any JSON value parses (fragments included); a non-object top level is
/// reported as [`BridgeError::NotAnObject`].
pub fn decode_object(text: &str) -> Result<JsonMap, BridgeError> {
    match serde_json::from_str::<Value>(text)? {
        Value::Object(map) => Ok(map),
        other => Err(BridgeError::NotAnObject(kind_name(&other))),
    }
}

/// Lenient variant of [`decode_object`]: logs and yields an empty map.
pub fn decode_object_or_empty(text: &str) -> JsonMap {
    decode_object(text).unwrap_or_else(|e| {
        warn!(error = %e, len = text.len(), "json decode failed, using empty map");
        JsonMap::new()
    })
}

/// Recover the envelope text from a script evaluation result.
///
/// Hosts report the JSON serialization of the script's return value, so a
/// string returned by `popQueuedMessage()` arrives as a JSON string literal.
/// Bare object text is passed through unchanged. `null`, `undefined` and
/// empty results mean the page had nothing queued.
pub fn unwrap_script_result(raw: &str) -> Result<String, BridgeError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "undefined" {
        return Err(BridgeError::EmptyQueue);
    }

    match serde_json::from_str::<Value>(trimmed)? {
        Value::String(s) if s.trim().is_empty() => Err(BridgeError::EmptyQueue),
        Value::String(s) => Ok(s),
        Value::Null => Err(BridgeError::EmptyQueue),
        Value::Object(_) => Ok(trimmed.to_owned()),
        other => Err(BridgeError::NotAnObject(kind_name(&other))),
    }
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decode_object_round_trips_encoded_map() {
        let original = json!({
            "foo": "bar",
            "n": 42,
            "f": 1.5,
            "ok": true,
            "none": null,
            "list": [1, "two", false],
            "nested": { "inner": { "x": -7 } }
        });
        let Value::Object(map) = original else {
            unreachable!()
        };
        let text = serde_json::to_string(&map).unwrap();
        assert_eq!(decode_object(&text).unwrap(), map);
        assert_eq!(decode_object_or_empty(&text), map);
    }

    #[test]
    fn decode_object_rejects_fragments_that_are_not_objects() {
        assert!(matches!(
            decode_object("42"),
            Err(BridgeError::NotAnObject("number"))
        ));
        assert!(matches!(
            decode_object("\"hello\""),
            Err(BridgeError::NotAnObject("string"))
        ));
        assert!(matches!(
            decode_object("[1,2]"),
            Err(BridgeError::NotAnObject("array"))
        ));
    }

    #[test]
    fn decode_object_reports_syntax_errors() {
        assert!(matches!(decode_object("{\"a\":"), Err(BridgeError::Json(_))));
    }

    #[test]
    fn lenient_decode_never_panics_on_garbage() {
        for input in ["", "{", "not json", "[1,2", "\"unterminated", "null", "7", "{}}"] {
            assert!(decode_object_or_empty(input).is_empty(), "{input:?}");
        }
    }

    #[test]
    fn unwrap_accepts_json_string_literal() {
        let envelope = r#"{"type":"onopen","payLoad":{}}"#;
        let literal = serde_json::to_string(envelope).unwrap();
        assert_eq!(unwrap_script_result(&literal).unwrap(), envelope);
    }

    #[test]
    fn unwrap_passes_bare_object_through() {
        let envelope = r#" {"type":"onclose","payLoad":{}} "#;
        assert_eq!(
            unwrap_script_result(envelope).unwrap(),
            envelope.trim()
        );
    }

    #[test]
    fn unwrap_treats_missing_values_as_empty_queue() {
        for raw in ["", "  ", "null", "undefined", "\"\""] {
            assert!(
                matches!(unwrap_script_result(raw), Err(BridgeError::EmptyQueue)),
                "{raw:?}"
            );
        }
    }

    #[test]
    fn unwrap_rejects_scalars() {
        assert!(matches!(
            unwrap_script_result("true"),
            Err(BridgeError::NotAnObject("boolean"))
        ));
    }
}

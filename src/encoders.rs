//! JSON encoding of serialized output
//!
//! Date-like leaves that no formatter converted are written as ISO 8601
//! text, with a zero UTC offset written as `Z`.

use crate::{Map, Value};

/// Encodes a serialized map as a JSON document
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use sift::encoders::to_json_string;
/// use sift::{Map, Value};
///
/// let mut map = Map::new();
/// map.insert("at".to_string(), Value::from(Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap()));
///
/// assert_eq!(to_json_string(&map).unwrap(), r#"{"at":"1970-01-01T00:00:00Z"}"#);
/// ```
pub fn to_json_string(map: &Map) -> Result<String, serde_json::Error> {
	serde_json::to_string(map)
}

/// Converts a serialized map into a `serde_json::Value`
pub fn to_json_value(map: &Map) -> serde_json::Value {
	serde_json::Value::Object(
		map.iter()
			.map(|(key, value)| (key.clone(), value.to_json()))
			.collect(),
	)
}

/// Decodes a JSON document into a map ready for deserializing
///
/// Documents whose top level is not an object decode as an empty map.
pub fn from_json_str(text: &str) -> Result<Map, serde_json::Error> {
	match serde_json::from_str::<Value>(text)? {
		Value::Map(map) => Ok(map),
		_ => Ok(Map::new()),
	}
}

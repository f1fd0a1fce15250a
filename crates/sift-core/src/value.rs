//! Plain tree values
//!
//! Both sides of a translation meet in [`Value`]: serializers produce a
//! [`Map`] of values, and deserializers consume one. Unlike
//! `serde_json::Value`, the tree can carry date and timestamp leaves so that
//! validators are free to turn ISO-8601 text into real timestamps.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Timelike, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// String-keyed map of values, ordered by key
pub type Map = BTreeMap<String, Value>;

/// A node of the plain representation
///
/// # Examples
///
/// ```
/// use sift_core::Value;
/// use serde_json::json;
///
/// let value = Value::from(json!({"name": "Alice", "tags": ["a", "b"]}));
/// assert_eq!(value.get("name"), Some(&Value::from("Alice")));
/// assert_eq!(value.get("tags").and_then(Value::as_list).map(<[Value]>::len), Some(2));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
	/// Absent or null value
	#[default]
	Null,
	/// Boolean value
	Bool(bool),
	/// Integer value
	Int(i64),
	/// Floating point value
	Float(f64),
	/// Text value
	String(String),
	/// Calendar date without a time
	Date(NaiveDate),
	/// Timestamp with a fixed UTC offset
	DateTime(DateTime<FixedOffset>),
	/// Timestamp without offset information
	NaiveDateTime(NaiveDateTime),
	/// Ordered list of values
	List(Vec<Value>),
	/// Nested map of values
	Map(Map),
}

impl Value {
	pub fn is_null(&self) -> bool {
		matches!(self, Value::Null)
	}

	pub fn as_bool(&self) -> Option<bool> {
		match self {
			Value::Bool(b) => Some(*b),
			_ => None,
		}
	}

	pub fn as_i64(&self) -> Option<i64> {
		match self {
			Value::Int(i) => Some(*i),
			_ => None,
		}
	}

	/// Returns the value as a float, widening integers
	pub fn as_f64(&self) -> Option<f64> {
		match self {
			Value::Float(f) => Some(*f),
			Value::Int(i) => Some(*i as f64),
			_ => None,
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			Value::String(s) => Some(s),
			_ => None,
		}
	}

	pub fn as_list(&self) -> Option<&[Value]> {
		match self {
			Value::List(items) => Some(items),
			_ => None,
		}
	}

	pub fn as_map(&self) -> Option<&Map> {
		match self {
			Value::Map(map) => Some(map),
			_ => None,
		}
	}

	pub fn as_datetime(&self) -> Option<&DateTime<FixedOffset>> {
		match self {
			Value::DateTime(dt) => Some(dt),
			_ => None,
		}
	}

	/// Looks up `key` when the value is a map
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.as_map().and_then(|map| map.get(key))
	}

	/// Loose truthiness
	///
	/// Null, `false`, zero, and empty strings, lists and maps are falsy.
	/// Everything else, including every date and timestamp, is truthy.
	///
	/// # Examples
	///
	/// ```
	/// use sift_core::Value;
	///
	/// assert!(!Value::Null.is_truthy());
	/// assert!(!Value::Int(0).is_truthy());
	/// assert!(!Value::from("").is_truthy());
	/// assert!(Value::from("a").is_truthy());
	/// ```
	pub fn is_truthy(&self) -> bool {
		match self {
			Value::Null => false,
			Value::Bool(b) => *b,
			Value::Int(i) => *i != 0,
			Value::Float(f) => *f != 0.0,
			Value::String(s) => !s.is_empty(),
			Value::List(items) => !items.is_empty(),
			Value::Map(map) => !map.is_empty(),
			Value::Date(_) | Value::DateTime(_) | Value::NaiveDateTime(_) => true,
		}
	}

	/// Whether a mapping should withhold this value under `drop_empty`
	///
	/// `0`, `""`, `[]` and `false` are legitimate values and are never
	/// emptyish even though they are falsy. Any other falsy value (null, an
	/// empty map) is emptyish. Truthy values never are.
	///
	/// # Examples
	///
	/// ```
	/// use sift_core::{Map, Value};
	///
	/// assert!(Value::Null.is_emptyish());
	/// assert!(Value::Map(Map::new()).is_emptyish());
	/// assert!(!Value::Int(0).is_emptyish());
	/// assert!(!Value::Bool(false).is_emptyish());
	/// assert!(!Value::List(vec![]).is_emptyish());
	/// assert!(!Value::from("").is_emptyish());
	/// ```
	pub fn is_emptyish(&self) -> bool {
		match self {
			Value::Int(0) | Value::Bool(false) => false,
			Value::Float(f) if *f == 0.0 => false,
			Value::String(s) if s.is_empty() => false,
			Value::List(items) if items.is_empty() => false,
			_ => !self.is_truthy(),
		}
	}

	/// ISO-8601 text for date-like values
	///
	/// Timestamps render as `YYYY-MM-DDTHH:MM:SS`, followed by `.ffffff` when
	/// there are sub-second microseconds, followed by the offset. A zero
	/// offset renders as `Z`.
	///
	/// # Examples
	///
	/// ```
	/// use chrono::{TimeZone, Utc};
	/// use sift_core::Value;
	///
	/// let dt = Utc.with_ymd_and_hms(1984, 6, 11, 12, 1, 0).unwrap();
	/// assert_eq!(Value::from(dt).isoformat().as_deref(), Some("1984-06-11T12:01:00Z"));
	/// assert_eq!(Value::Int(1).isoformat(), None);
	/// ```
	pub fn isoformat(&self) -> Option<String> {
		match self {
			Value::Date(date) => Some(format_date(date)),
			Value::DateTime(dt) => Some(format_datetime(dt)),
			Value::NaiveDateTime(dt) => Some(format_naive_datetime(dt)),
			_ => None,
		}
	}

	/// Converts into a `serde_json::Value`, rendering date-likes as ISO-8601
	pub fn to_json(&self) -> serde_json::Value {
		match self {
			Value::Null => serde_json::Value::Null,
			Value::Bool(b) => serde_json::Value::Bool(*b),
			Value::Int(i) => serde_json::Value::from(*i),
			Value::Float(f) => serde_json::Number::from_f64(*f)
				.map(serde_json::Value::Number)
				.unwrap_or(serde_json::Value::Null),
			Value::String(s) => serde_json::Value::String(s.clone()),
			Value::Date(date) => serde_json::Value::String(format_date(date)),
			Value::DateTime(dt) => serde_json::Value::String(format_datetime(dt)),
			Value::NaiveDateTime(dt) => serde_json::Value::String(format_naive_datetime(dt)),
			Value::List(items) => {
				serde_json::Value::Array(items.iter().map(Value::to_json).collect())
			}
			Value::Map(map) => serde_json::Value::Object(
				map.iter()
					.map(|(key, value)| (key.clone(), value.to_json()))
					.collect(),
			),
		}
	}
}

fn format_date(date: &NaiveDate) -> String {
	date.format("%Y-%m-%d").to_string()
}

fn format_naive_datetime(dt: &NaiveDateTime) -> String {
	let mut out = dt.format("%Y-%m-%dT%H:%M:%S").to_string();
	let micros = (dt.nanosecond() % 1_000_000_000) / 1_000;
	if micros != 0 {
		out.push_str(&format!(".{micros:06}"));
	}
	out
}

fn format_datetime(dt: &DateTime<FixedOffset>) -> String {
	let mut out = format_naive_datetime(&dt.naive_local());
	if dt.offset().local_minus_utc() == 0 {
		out.push('Z');
	} else {
		out.push_str(&dt.format("%:z").to_string());
	}
	out
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Value::Null => f.write_str("null"),
			Value::Bool(b) => write!(f, "{}", b),
			Value::Int(i) => write!(f, "{}", i),
			Value::Float(x) => write!(f, "{}", x),
			Value::String(s) => f.write_str(s),
			Value::Date(date) => f.write_str(&format_date(date)),
			Value::DateTime(dt) => f.write_str(&format_datetime(dt)),
			Value::NaiveDateTime(dt) => f.write_str(&format_naive_datetime(dt)),
			Value::List(_) | Value::Map(_) => write!(f, "{}", self.to_json()),
		}
	}
}

impl Serialize for Value {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self {
			Value::Null => serializer.serialize_unit(),
			Value::Bool(b) => serializer.serialize_bool(*b),
			Value::Int(i) => serializer.serialize_i64(*i),
			Value::Float(f) => serializer.serialize_f64(*f),
			Value::String(s) => serializer.serialize_str(s),
			Value::Date(date) => serializer.serialize_str(&format_date(date)),
			Value::DateTime(dt) => serializer.serialize_str(&format_datetime(dt)),
			Value::NaiveDateTime(dt) => serializer.serialize_str(&format_naive_datetime(dt)),
			Value::List(items) => items.serialize(serializer),
			Value::Map(map) => map.serialize(serializer),
		}
	}
}

impl<'de> Deserialize<'de> for Value {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		serde_json::Value::deserialize(deserializer).map(Value::from)
	}
}

impl From<serde_json::Value> for Value {
	fn from(value: serde_json::Value) -> Self {
		match value {
			serde_json::Value::Null => Value::Null,
			serde_json::Value::Bool(b) => Value::Bool(b),
			serde_json::Value::Number(n) => match n.as_i64() {
				Some(i) => Value::Int(i),
				None => n.as_f64().map(Value::Float).unwrap_or(Value::Null),
			},
			serde_json::Value::String(s) => Value::String(s),
			serde_json::Value::Array(items) => {
				Value::List(items.into_iter().map(Value::from).collect())
			}
			serde_json::Value::Object(map) => Value::Map(
				map.into_iter()
					.map(|(key, value)| (key, Value::from(value)))
					.collect(),
			),
		}
	}
}

macro_rules! impl_from_int {
	($($ty:ty),*) => {
		$(
			impl From<$ty> for Value {
				fn from(value: $ty) -> Self {
					Value::Int(i64::from(value))
				}
			}
		)*
	};
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Value::Bool(value)
	}
}

impl From<f32> for Value {
	fn from(value: f32) -> Self {
		Value::Float(f64::from(value))
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Value::Float(value)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Value::String(value.to_string())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Value::String(value)
	}
}

impl From<NaiveDate> for Value {
	fn from(value: NaiveDate) -> Self {
		Value::Date(value)
	}
}

impl From<NaiveDateTime> for Value {
	fn from(value: NaiveDateTime) -> Self {
		Value::NaiveDateTime(value)
	}
}

impl From<DateTime<FixedOffset>> for Value {
	fn from(value: DateTime<FixedOffset>) -> Self {
		Value::DateTime(value)
	}
}

impl From<DateTime<Utc>> for Value {
	fn from(value: DateTime<Utc>) -> Self {
		Value::DateTime(value.fixed_offset())
	}
}

impl From<Map> for Value {
	fn from(value: Map) -> Self {
		Value::Map(value)
	}
}

impl<T: Into<Value>> From<Vec<T>> for Value {
	fn from(value: Vec<T>) -> Self {
		Value::List(value.into_iter().map(Into::into).collect())
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(value: Option<T>) -> Self {
		value.map(Into::into).unwrap_or(Value::Null)
	}
}

impl FromIterator<Value> for Value {
	fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
		Value::List(iter.into_iter().collect())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use chrono::TimeZone;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case(Value::Int(0))]
	#[case(Value::Float(0.0))]
	#[case(Value::from(""))]
	#[case(Value::List(vec![]))]
	#[case(Value::Bool(false))]
	fn test_falsy_sentinels_are_not_emptyish(#[case] value: Value) {
		assert!(!value.is_truthy());
		assert!(!value.is_emptyish());
	}

	#[rstest]
	#[case(Value::Null)]
	#[case(Value::Map(Map::new()))]
	fn test_other_falsy_values_are_emptyish(#[case] value: Value) {
		assert!(value.is_emptyish());
	}

	#[rstest]
	#[case(Value::Int(1))]
	#[case(Value::from("a"))]
	#[case(Value::Bool(true))]
	#[case(Value::from(vec![1]))]
	#[case(Value::Date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()))]
	fn test_truthy_values_are_not_emptyish(#[case] value: Value) {
		assert!(value.is_truthy());
		assert!(!value.is_emptyish());
	}

	#[rstest]
	fn test_isoformat_utc_uses_z_suffix() {
		let dt = Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap();
		assert_eq!(
			Value::from(dt).isoformat(),
			Some("1970-01-01T00:00:00Z".to_string())
		);
	}

	#[rstest]
	fn test_isoformat_keeps_non_zero_offset_and_micros() {
		let offset = FixedOffset::east_opt(2 * 3600).unwrap();
		let dt = offset
			.with_ymd_and_hms(2020, 5, 17, 8, 30, 0)
			.unwrap()
			.with_nanosecond(123_456_000)
			.unwrap();
		assert_eq!(
			Value::from(dt).isoformat(),
			Some("2020-05-17T08:30:00.123456+02:00".to_string())
		);
	}

	#[rstest]
	fn test_naive_datetime_has_no_offset() {
		let dt = NaiveDate::from_ymd_opt(1984, 6, 11)
			.unwrap()
			.and_hms_opt(12, 1, 0)
			.unwrap();
		assert_eq!(Value::from(dt).to_string(), "1984-06-11T12:01:00");
	}

	#[rstest]
	fn test_json_conversion_round_trip() {
		let source = json!({"a": 1, "b": [true, null, 1.5], "c": {"d": "x"}});
		let value = Value::from(source.clone());

		assert_eq!(value.get("a"), Some(&Value::Int(1)));
		assert_eq!(value.to_json(), source);
	}

	#[rstest]
	fn test_serialize_encodes_datetimes_as_strings() {
		let dt = Utc.with_ymd_and_hms(2001, 2, 3, 4, 5, 6).unwrap();
		let mut map = Map::new();
		map.insert("at".to_string(), Value::from(dt));

		let encoded = serde_json::to_value(Value::Map(map)).unwrap();
		assert_eq!(encoded, json!({"at": "2001-02-03T04:05:06Z"}));
	}

	#[rstest]
	fn test_deserialize_from_json_text() {
		let value: Value = serde_json::from_str(r#"{"a": [1, "two"]}"#).unwrap();
		assert_eq!(
			value.get("a"),
			Some(&Value::List(vec![Value::Int(1), Value::from("two")]))
		);
	}

	#[rstest]
	fn test_option_conversion() {
		assert_eq!(Value::from(None::<i32>), Value::Null);
		assert_eq!(Value::from(Some("x")), Value::from("x"));
	}
}

//! Output formatters for sift
//!
//! Formatters run while serializing and never fail.

use sift_core::{Context, Formatter, Value};

/// Renders date-like values as ISO 8601 text
///
/// A zero UTC offset is written as `Z`. Values that are not date-like,
/// including null, pass through unchanged.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use sift_core::{Context, Formatter, Value};
/// use sift_formatters::format_datetime;
///
/// let dt = Utc.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap();
/// let text = format_datetime().format(Value::from(dt), &Context::default());
/// assert_eq!(text, Value::from("1970-01-01T00:00:00Z"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DateTimeFormatter;

impl Formatter for DateTimeFormatter {
	fn format(&self, value: Value, _context: &Context) -> Value {
		match value.isoformat() {
			Some(text) => Value::String(text),
			None => value,
		}
	}
}

pub fn format_datetime() -> DateTimeFormatter {
	DateTimeFormatter
}

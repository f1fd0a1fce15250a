//! Date and time validators

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, Offset, Utc};
use sift_core::{Context, ValidationError, ValidationResult, Validator, Value};

/// Timestamp layouts carrying their own offset, tried after RFC 3339
const OFFSET_FORMATS: &[&str] = &[
	"%Y-%m-%dT%H:%M:%S%.f%z",
	"%Y-%m-%dT%H:%M%:z",
	"%Y-%m-%dT%H:%M%z",
	"%Y%m%dT%H%M%S%.f%z",
	"%Y%m%dT%H%M%z",
];

/// Timestamp layouts without an offset
const NAIVE_FORMATS: &[&str] = &[
	"%Y-%m-%dT%H:%M:%S%.f",
	"%Y-%m-%dT%H:%M",
	"%Y-%m-%d %H:%M:%S%.f",
	"%Y-%m-%d %H:%M",
	"%Y%m%dT%H%M%S%.f",
	"%Y%m%dT%H%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y%m%d"];

fn parse_naive(text: &str) -> Option<NaiveDateTime> {
	NAIVE_FORMATS
		.iter()
		.find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
}

/// Completes a year (`2007`) or year-month (`2007-01`) to its first day
fn parse_reduced_date(text: &str) -> Option<NaiveDate> {
	let bytes = text.as_bytes();
	let completed = match bytes.len() {
		4 if bytes.iter().all(u8::is_ascii_digit) => format!("{}-01-01", text),
		7 if bytes[4] == b'-' => format!("{}-01", text),
		_ => return None,
	};
	NaiveDate::parse_from_str(&completed, "%Y-%m-%d").ok()
}

/// Parses ISO 8601 text into an offset-aware timestamp
///
/// Both the extended (`2007-01-01T12:00:00Z`) and basic (`20070101T120000Z`)
/// layouts are accepted, as are reduced dates such as `2007-01` or `2007`,
/// which mean the first day of the period.
///
/// Falsy input becomes null. Input without an offset, including plain dates,
/// is placed in the default offset, which is UTC unless configured.
///
/// # Examples
///
/// ```
/// use sift_core::{Context, Validator, Value};
/// use sift_validators::datetime;
///
/// let value = datetime()
///     .validate(&Value::from("1970-01-01"), &Context::default())
///     .unwrap();
/// assert_eq!(value.isoformat().as_deref(), Some("1970-01-01T00:00:00Z"));
/// ```
#[derive(Debug, Clone)]
pub struct DateTimeValidator {
	default_offset: FixedOffset,
}

impl DateTimeValidator {
	pub fn new() -> Self {
		Self {
			default_offset: Utc.fix(),
		}
	}

	/// Offset given to timestamps that carry none
	pub fn default_offset(mut self, offset: FixedOffset) -> Self {
		self.default_offset = offset;
		self
	}

	fn localize(&self, naive: NaiveDateTime) -> Result<DateTime<FixedOffset>, ValidationError> {
		naive
			.and_local_timezone(self.default_offset)
			.single()
			.ok_or_else(|| ValidationError::new(format!("Invalid date: {} does not exist", naive)))
	}

	fn parse(&self, text: &str) -> Result<DateTime<FixedOffset>, ValidationError> {
		let text = text.trim();

		if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
			return Ok(dt);
		}
		if let Some(dt) = OFFSET_FORMATS
			.iter()
			.find_map(|format| DateTime::parse_from_str(text, format).ok())
		{
			return Ok(dt);
		}
		if let Some(naive) = text.strip_suffix('Z').and_then(parse_naive) {
			return Ok(naive.and_utc().fixed_offset());
		}
		if let Some(naive) = parse_naive(text) {
			return self.localize(naive);
		}
		if let Some(date) = DATE_FORMATS
			.iter()
			.find_map(|format| NaiveDate::parse_from_str(text, format).ok())
			.or_else(|| parse_reduced_date(text))
		{
			return self.localize(date.and_time(NaiveTime::MIN));
		}

		tracing::trace!(input = text, "unparseable datetime");
		Err(ValidationError::new(format!(
			"Invalid date: Unable to parse date string '{}'",
			text
		)))
	}
}

impl Default for DateTimeValidator {
	fn default() -> Self {
		Self::new()
	}
}

impl Validator for DateTimeValidator {
	fn validate(&self, value: &Value, _context: &Context) -> ValidationResult<Value> {
		if !value.is_truthy() {
			return Ok(Value::Null);
		}

		let parsed = match value {
			Value::DateTime(dt) => *dt,
			Value::NaiveDateTime(naive) => self.localize(*naive)?,
			Value::Date(date) => self.localize(date.and_time(NaiveTime::MIN))?,
			Value::String(text) => self.parse(text)?,
			_ => {
				return Err(ValidationError::new(
					"Invalid date: expected an ISO 8601 string",
				));
			}
		};

		Ok(Value::DateTime(parsed))
	}
}

/// Validator parsing ISO 8601 timestamps
pub fn datetime() -> DateTimeValidator {
	DateTimeValidator::new()
}

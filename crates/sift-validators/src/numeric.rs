//! Numeric validators

use sift_core::{Context, ValidationError, ValidationResult, Validator, Value};

const NOT_AN_INTEGER: &str = "This field is not an integer";

/// Converts a value to an integer, optionally clamping it into bounds
///
/// Integers pass through, floats are truncated toward zero, booleans become
/// `0` or `1` and decimal strings are parsed. Anything else fails.
#[derive(Debug, Clone, Default)]
pub struct IntegerValidator {
	bounds: Option<(i64, i64)>,
}

impl IntegerValidator {
	pub fn new() -> Self {
		Self::default()
	}

	/// Clamps converted values into `min..=max`
	///
	/// # Examples
	///
	/// ```
	/// use sift_core::{Context, Validator, Value};
	/// use sift_validators::integer;
	///
	/// let validator = integer().bounds(1, 10);
	/// let context = Context::default();
	/// assert_eq!(validator.validate(&Value::Int(0), &context).unwrap(), Value::Int(1));
	/// assert_eq!(validator.validate(&Value::Int(11), &context).unwrap(), Value::Int(10));
	/// ```
	pub fn bounds(mut self, min: i64, max: i64) -> Self {
		self.bounds = Some((min, max));
		self
	}

	fn convert(value: &Value) -> Option<i64> {
		match value {
			Value::Int(i) => Some(*i),
			Value::Bool(b) => Some(i64::from(*b)),
			Value::Float(f) if f.is_finite() => Some(f.trunc() as i64),
			Value::String(s) => s.trim().parse().ok(),
			_ => None,
		}
	}
}

impl Validator for IntegerValidator {
	fn validate(&self, value: &Value, _context: &Context) -> ValidationResult<Value> {
		let number = Self::convert(value).ok_or_else(|| ValidationError::new(NOT_AN_INTEGER))?;
		let number = match self.bounds {
			Some((min, max)) => number.max(min).min(max),
			None => number,
		};
		Ok(Value::Int(number))
	}
}

/// Validator converting values to integers
pub fn integer() -> IntegerValidator {
	IntegerValidator::new()
}

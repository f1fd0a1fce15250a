//! String validators

use sift_core::{Context, ValidationError, ValidationResult, Validator, Value};

/// Converts a value to text, optionally limiting its length
///
/// Falsy values pass through untouched, so an absent optional string stays
/// absent. Lengths are counted in characters.
#[derive(Debug, Clone, Default)]
pub struct StringValidator {
	max_length: Option<usize>,
}

impl StringValidator {
	pub fn new() -> Self {
		Self::default()
	}

	/// Rejects text longer than `max` characters
	///
	/// # Examples
	///
	/// ```
	/// use sift_core::{Context, Validator, Value};
	/// use sift_validators::string;
	///
	/// let validator = string().max_length(1);
	/// let error = validator.validate(&Value::from("bb"), &Context::default()).unwrap_err();
	/// assert_eq!(error.messages(), ["This field is too long, max length is 1"]);
	/// ```
	pub fn max_length(mut self, max: usize) -> Self {
		self.max_length = Some(max);
		self
	}
}

impl Validator for StringValidator {
	fn validate(&self, value: &Value, _context: &Context) -> ValidationResult<Value> {
		if !value.is_truthy() {
			return Ok(value.clone());
		}

		let text = value.to_string();
		if let Some(max) = self.max_length
			&& text.chars().count() > max
		{
			return Err(ValidationError::new(format!(
				"This field is too long, max length is {}",
				max
			)));
		}

		Ok(Value::String(text))
	}
}

/// Validator converting values to text
pub fn string() -> StringValidator {
	StringValidator::new()
}

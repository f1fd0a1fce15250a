//! Presence validator

use sift_core::{Context, ValidationError, ValidationResult, Validator, Value};

const REQUIRED_MESSAGE: &str = "This field is required";

/// Rejects absent and empty values
///
/// Numeric zero always counts as present. `false` counts as present unless
/// [`reject_false`](RequiredValidator::reject_false) is set.
#[derive(Debug, Clone)]
pub struct RequiredValidator {
	reject_false: bool,
	message: String,
}

impl RequiredValidator {
	pub fn new() -> Self {
		Self {
			reject_false: false,
			message: REQUIRED_MESSAGE.to_string(),
		}
	}

	/// Treats `false` as missing
	///
	/// # Examples
	///
	/// ```
	/// use sift_core::{Context, Validator, Value};
	/// use sift_validators::required;
	///
	/// let context = Context::default();
	/// assert!(required().validate(&Value::Bool(false), &context).is_ok());
	/// assert!(required().reject_false().validate(&Value::Bool(false), &context).is_err());
	/// ```
	pub fn reject_false(mut self) -> Self {
		self.reject_false = true;
		self
	}

	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.message = message.into();
		self
	}

	fn is_present(&self, value: &Value) -> bool {
		match value {
			Value::Int(_) | Value::Float(_) => true,
			Value::Bool(false) => !self.reject_false,
			_ => value.is_truthy(),
		}
	}
}

impl Default for RequiredValidator {
	fn default() -> Self {
		Self::new()
	}
}

impl Validator for RequiredValidator {
	fn validate(&self, value: &Value, _context: &Context) -> ValidationResult<Value> {
		if self.is_present(value) {
			Ok(value.clone())
		} else {
			Err(ValidationError::new(self.message.clone()))
		}
	}
}

/// Validator rejecting absent and empty values
pub fn required() -> RequiredValidator {
	RequiredValidator::new()
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case(Value::Int(0))]
	#[case(Value::Float(0.0))]
	#[case(Value::Bool(false))]
	#[case(Value::Bool(true))]
	#[case(Value::from("x"))]
	#[case(Value::from(json!([1])))]
	fn test_present(#[case] value: Value) {
		assert_eq!(
			required().validate(&value, &Context::default()),
			Ok(value.clone())
		);
	}

	#[rstest]
	#[case(Value::Null)]
	#[case(Value::from(""))]
	#[case(Value::from(json!([])))]
	#[case(Value::from(json!({})))]
	fn test_missing(#[case] value: Value) {
		let error = required().validate(&value, &Context::default()).unwrap_err();
		assert_eq!(error.messages(), ["This field is required"]);
	}

	#[rstest]
	fn test_custom_message() {
		let error = required()
			.with_message("Give us a name")
			.validate(&Value::Null, &Context::default())
			.unwrap_err();
		assert_eq!(error.messages(), ["Give us a name"]);
	}
}

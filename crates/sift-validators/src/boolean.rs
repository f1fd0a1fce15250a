//! Boolean validator

use sift_core::{Context, ValidationResult, Validator, Value};

/// Converts a value to a boolean by truthiness; never fails
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanValidator;

impl Validator for BooleanValidator {
	fn validate(&self, value: &Value, _context: &Context) -> ValidationResult<Value> {
		Ok(Value::Bool(value.is_truthy()))
	}
}

pub fn boolean() -> BooleanValidator {
	BooleanValidator
}

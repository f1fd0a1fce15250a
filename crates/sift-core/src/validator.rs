//! Validator and formatter capabilities
//!
//! Validators run on the deserialize path and may reject or transform a
//! value. Formatters run on the serialize path and never fail. Both are
//! implemented for plain closures, so a one-off check can be written inline
//! while reusable checks are small configured structs.

use crate::context::Context;
use crate::error::ValidationResult;
use crate::value::Value;
use std::sync::Arc;

/// Checks, and possibly converts, a value being deserialized
///
/// # Examples
///
/// ```
/// use sift_core::{Context, ValidationError, Validator, Value};
///
/// let positive = |value: &Value, _: &Context| match value.as_i64() {
///     Some(n) if n > 0 => Ok(value.clone()),
///     _ => Err(ValidationError::new("Must be positive")),
/// };
///
/// let context = Context::default();
/// assert!(positive.validate(&Value::Int(3), &context).is_ok());
/// assert!(positive.validate(&Value::Int(-3), &context).is_err());
/// ```
pub trait Validator: Send + Sync {
	fn validate(&self, value: &Value, context: &Context) -> ValidationResult<Value>;
}

impl<F> Validator for F
where
	F: Fn(&Value, &Context) -> ValidationResult<Value> + Send + Sync,
{
	fn validate(&self, value: &Value, context: &Context) -> ValidationResult<Value> {
		self(value, context)
	}
}

/// Converts a value being serialized
pub trait Formatter: Send + Sync {
	fn format(&self, value: Value, context: &Context) -> Value;
}

impl<F> Formatter for F
where
	F: Fn(Value, &Context) -> Value + Send + Sync,
{
	fn format(&self, value: Value, context: &Context) -> Value {
		self(value, context)
	}
}

/// Shared handle to a validator
pub type ValidatorRef = Arc<dyn Validator>;

/// Shared handle to a formatter
pub type FormatterRef = Arc<dyn Formatter>;

/// Runs every validator in order
///
/// A failing validator does not stop the chain: its messages are collected
/// and the next validator receives the last successfully produced value.
/// Returns that value along with every collected message.
pub fn run_validators(
	value: Value,
	validators: &[ValidatorRef],
	context: &Context,
) -> (Value, Vec<String>) {
	let mut value = value;
	let mut messages = Vec::new();

	for validator in validators {
		match validator.validate(&value, context) {
			Ok(next) => value = next,
			Err(error) => messages.extend(error.into_messages()),
		}
	}

	(value, messages)
}

/// Runs every formatter in order
pub fn run_formatters(value: Value, formatters: &[FormatterRef], context: &Context) -> Value {
	formatters
		.iter()
		.fold(value, |value, formatter| formatter.format(value, context))
}

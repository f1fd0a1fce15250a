//! Whole-object serializers composed from mappings

use crate::context::Context;
use crate::error::{ErrorTree, ValidationFailure};
use crate::mapping::Mapping;
use crate::value::Map;

/// An ordered list of mappings translating a whole object
///
/// Serializers hold no per-call state, so one instance can be shared and
/// used from any number of threads.
///
/// # Examples
///
/// ```
/// use sift_core::{Context, Field, Serializer, ValidationError, ValidationResult, Value};
/// use serde_json::json;
///
/// let serializer = Serializer::<Value>::new()
///     .with(Field::new("a").validator(|_: &Value, _: &Context| -> ValidationResult<Value> {
///         Err(ValidationError::new("Failed"))
///     }))
///     .with(Field::new("b"));
///
/// let input = Value::from(json!({"a": 1, "b": 2}));
/// let failure = serializer
///     .deserialize(input.as_map().unwrap(), &Context::default())
///     .unwrap_err();
///
/// assert_eq!(failure.errors().to_json(), json!({"a": ["Failed"]}));
/// ```
pub struct Serializer<S> {
	mappings: Vec<Box<dyn Mapping<S>>>,
}

impl<S> Serializer<S> {
	pub fn new() -> Self {
		Self {
			mappings: Vec::new(),
		}
	}

	/// Appends a mapping
	pub fn with(mut self, mapping: impl Mapping<S> + 'static) -> Self {
		self.push(mapping);
		self
	}

	pub fn push(&mut self, mapping: impl Mapping<S> + 'static) {
		self.mappings.push(Box::new(mapping));
	}

	pub fn mappings(&self) -> &[Box<dyn Mapping<S>>] {
		&self.mappings
	}

	/// Translates `source` into a plain map; never fails
	pub fn serialize(&self, source: &S, context: &Context) -> Map {
		let mut output = Map::new();
		for mapping in &self.mappings {
			mapping.serialize(source, &mut output, context);
		}
		output
	}

	/// Validates `source` into an internal map
	///
	/// Every mapping is attempted. When any of them fails, the returned
	/// failure holds the errors of all failing mappings.
	pub fn deserialize(&self, source: &Map, context: &Context) -> Result<Map, ValidationFailure> {
		let mut output = Map::new();
		let mut errors = ErrorTree::new();

		for mapping in &self.mappings {
			if let Err(failure) = mapping.deserialize(source, &mut output, context) {
				errors.merge(failure.into_errors());
			}
		}

		if !errors.is_empty() {
			tracing::debug!(failed = errors.len(), "deserialize rejected input");
			return Err(errors.into());
		}

		Ok(output)
	}
}

impl<S> Default for Serializer<S> {
	fn default() -> Self {
		Self::new()
	}
}

impl<S> From<Vec<Box<dyn Mapping<S>>>> for Serializer<S> {
	fn from(mappings: Vec<Box<dyn Mapping<S>>>) -> Self {
		Self { mappings }
	}
}

impl<S> FromIterator<Box<dyn Mapping<S>>> for Serializer<S> {
	fn from_iter<I: IntoIterator<Item = Box<dyn Mapping<S>>>>(iter: I) -> Self {
		Self {
			mappings: iter.into_iter().collect(),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::{INVALID_MESSAGE, ValidationError, ValidationResult};
	use crate::field::{Field, MultipleField};
	use crate::value::Value;
	use rstest::rstest;
	use serde_json::json;
	use std::sync::Arc;

	fn fail(_: &Value, _: &Context) -> ValidationResult<Value> {
		Err(ValidationError::new("Failed"))
	}

	fn fail_again(_: &Value, _: &Context) -> ValidationResult<Value> {
		Err(ValidationError::new("Failed, again"))
	}

	#[rstest]
	fn test_all_mappings_attempted() {
		let serializer = Serializer::<Value>::new()
			.with(Field::new("a").validator(fail).validator(fail_again))
			.with(Field::new("b").validator(fail))
			.with(Field::new("c"));
		let input = Value::from(json!({"a": 1, "b": 2, "c": 3}));

		let failure = serializer
			.deserialize(input.as_map().unwrap(), &Context::default())
			.unwrap_err();

		assert_eq!(
			failure.errors().to_json(),
			json!({"a": ["Failed", "Failed, again"], "b": ["Failed"]})
		);
	}

	#[rstest]
	fn test_failure_without_messages_is_not_a_pass() {
		let silent = |_: &Value, _: &Context| -> ValidationResult<Value> {
			Err(ValidationError::with_messages(Vec::<String>::new()))
		};
		let serializer = Serializer::<Value>::new()
			.with(Field::new("a").validator(silent))
			.with(MultipleField::new("m").validator(silent));
		let input = Value::from(json!({"a": 1, "m": [1, 2]}));

		let failure = serializer
			.deserialize(input.as_map().unwrap(), &Context::default())
			.unwrap_err();

		assert_eq!(
			failure.errors().to_json(),
			json!({
				"a": [INVALID_MESSAGE],
				"m": {"0": [INVALID_MESSAGE], "1": [INVALID_MESSAGE]},
			})
		);
	}

	#[rstest]
	fn test_serialize_in_declaration_order() {
		let serializer = Serializer::<Value>::new()
			.with(Field::new("a"))
			.with(Field::new("b").target("a"));
		let output = serializer.serialize(
			&Value::from(json!({"a": 1, "b": 2})),
			&Context::default(),
		);

		assert_eq!(output.get("a"), Some(&Value::Int(2)));
	}

	#[rstest]
	fn test_from_boxed_mappings() {
		let mappings: Vec<Box<dyn Mapping<Value>>> =
			vec![Box::new(Field::new("a")), Box::new(Field::new("b"))];
		let serializer = Serializer::from(mappings);

		assert_eq!(serializer.mappings().len(), 2);
		assert_eq!(serializer.mappings()[1].target_key(), "b");
	}

	#[rstest]
	fn test_shared_across_threads() {
		let serializer = Arc::new(Serializer::<Value>::new().with(Field::new("n")));
		let handles: Vec<_> = (0..4)
			.map(|n| {
				let serializer = Arc::clone(&serializer);
				std::thread::spawn(move || {
					serializer.serialize(&Value::from(json!({"n": n})), &Context::default())
				})
			})
			.collect();

		for (n, handle) in handles.into_iter().enumerate() {
			let output = handle.join().unwrap();
			assert_eq!(output.get("n"), Some(&Value::Int(n as i64)));
		}
	}
}

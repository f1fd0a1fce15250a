//! Leaf mappings for scalar and list-of-scalar attributes

use crate::accessor::{self, Attributes, FieldAccessor};
use crate::context::Context;
use crate::error::{ErrorTree, FULL_ERRORS_KEY, ValidationFailure};
use crate::mapping::{Keys, Mapping, NOT_A_LIST};
use crate::validator::{
	Formatter, FormatterRef, Validator, ValidatorRef, run_formatters, run_validators,
};
use crate::value::{Map, Value};
use std::sync::Arc;

/// Maps one attribute to one key
///
/// Serializing reads the attribute through the accessor and runs the
/// formatters. Deserializing runs every validator, collecting all of their
/// messages before failing.
///
/// # Examples
///
/// ```
/// use sift_core::{Context, Field, Map, Mapping, Value};
/// use serde_json::json;
///
/// let field = Field::<Value>::new("a").target("b");
/// let source = Value::from(json!({"a": 1}));
///
/// let mut output = Map::new();
/// field.serialize(&source, &mut output, &Context::default());
/// assert_eq!(output.get("b"), Some(&Value::Int(1)));
///
/// let mut internal = Map::new();
/// field.deserialize(&output, &mut internal, &Context::default()).unwrap();
/// assert_eq!(internal.get("a"), Some(&Value::Int(1)));
/// ```
pub struct Field<S> {
	keys: Keys,
	accessor: FieldAccessor<S>,
	validators: Vec<ValidatorRef>,
	formatters: Vec<FormatterRef>,
}

impl<S: Attributes + 'static> Field<S> {
	/// Creates a field reading `source_key` through [`Attributes`]
	pub fn new(source_key: impl Into<String>) -> Self {
		let keys = Keys::new(source_key);
		let accessor = accessor::attribute(keys.source.clone());
		Self::from_parts(keys, accessor)
	}
}

impl<S> Field<S> {
	/// Creates a field reading its value with a custom accessor
	///
	/// # Examples
	///
	/// ```
	/// use sift_core::{Context, Field, Map, Mapping, Value};
	///
	/// struct Counter { hits: i64 }
	///
	/// let field = Field::with_accessor("hits", |c: &Counter| Value::Int(c.hits + 1));
	/// let mut output = Map::new();
	/// field.serialize(&Counter { hits: 1 }, &mut output, &Context::default());
	/// assert_eq!(output.get("hits"), Some(&Value::Int(2)));
	/// ```
	pub fn with_accessor<F>(source_key: impl Into<String>, accessor: F) -> Self
	where
		F: Fn(&S) -> Value + Send + Sync + 'static,
	{
		Self::from_parts(Keys::new(source_key), accessor::field_accessor(accessor))
	}

	fn from_parts(keys: Keys, accessor: FieldAccessor<S>) -> Self {
		Self {
			keys,
			accessor,
			validators: Vec::new(),
			formatters: Vec::new(),
		}
	}

	/// Sets the key used on the plain-map side
	pub fn target(mut self, target_key: impl Into<String>) -> Self {
		self.keys.target = target_key.into();
		self
	}

	/// Replaces the accessor
	pub fn accessor<F>(mut self, accessor: F) -> Self
	where
		F: Fn(&S) -> Value + Send + Sync + 'static,
	{
		self.accessor = accessor::field_accessor(accessor);
		self
	}

	/// Appends a validator to the chain
	pub fn validator(mut self, validator: impl Validator + 'static) -> Self {
		self.validators.push(Arc::new(validator));
		self
	}

	/// Appends already shared validators to the chain
	pub fn validators(mut self, validators: impl IntoIterator<Item = ValidatorRef>) -> Self {
		self.validators.extend(validators);
		self
	}

	/// Appends a formatter
	pub fn formatter(mut self, formatter: impl Formatter + 'static) -> Self {
		self.formatters.push(Arc::new(formatter));
		self
	}

	/// Appends already shared formatters
	pub fn formatters(mut self, formatters: impl IntoIterator<Item = FormatterRef>) -> Self {
		self.formatters.extend(formatters);
		self
	}

	/// Turns this field into a list-of-scalars field
	pub fn multiple(self) -> MultipleField<S> {
		MultipleField {
			field: self,
			full_validators: Vec::new(),
		}
	}
}

impl<S> Mapping<S> for Field<S> {
	fn source_key(&self) -> &str {
		&self.keys.source
	}

	fn target_key(&self) -> &str {
		&self.keys.target
	}

	fn serialize(&self, source: &S, target: &mut Map, context: &Context) {
		let value = run_formatters((self.accessor)(source), &self.formatters, context);
		self.keys.write_output(target, value, context);
	}

	fn deserialize(
		&self,
		source: &Map,
		target: &mut Map,
		context: &Context,
	) -> Result<(), ValidationFailure> {
		let value = self.keys.read(source).cloned().unwrap_or_default();
		let (value, messages) = run_validators(value, &self.validators, context);

		if !messages.is_empty() {
			return Err(self.keys.failure(messages));
		}

		target.insert(self.keys.source.clone(), value);
		Ok(())
	}
}

/// Maps one list-of-scalars attribute to one key
///
/// Serializing behaves like [`Field`]. Deserializing validates each element
/// independently, reporting failures by index, then runs the optional full
/// validators over the assembled list and reports their failures under
/// [`FULL_ERRORS_KEY`]. A missing list deserializes as an empty one.
///
/// # Examples
///
/// ```
/// use sift_core::{Context, MultipleField, Map, Mapping, Value};
/// use serde_json::json;
///
/// let field = MultipleField::<Value>::new("d");
/// let input = Value::from(json!({"d": [1, 2]}));
///
/// let mut internal = Map::new();
/// field
///     .deserialize(input.as_map().unwrap(), &mut internal, &Context::default())
///     .unwrap();
/// assert_eq!(internal.get("d"), Some(&Value::from(vec![1, 2])));
/// ```
pub struct MultipleField<S> {
	field: Field<S>,
	full_validators: Vec<ValidatorRef>,
}

impl<S: Attributes + 'static> MultipleField<S> {
	pub fn new(source_key: impl Into<String>) -> Self {
		Field::new(source_key).multiple()
	}
}

impl<S> MultipleField<S> {
	pub fn with_accessor<F>(source_key: impl Into<String>, accessor: F) -> Self
	where
		F: Fn(&S) -> Value + Send + Sync + 'static,
	{
		Field::with_accessor(source_key, accessor).multiple()
	}

	pub fn target(mut self, target_key: impl Into<String>) -> Self {
		self.field = self.field.target(target_key);
		self
	}

	pub fn accessor<F>(mut self, accessor: F) -> Self
	where
		F: Fn(&S) -> Value + Send + Sync + 'static,
	{
		self.field = self.field.accessor(accessor);
		self
	}

	/// Appends a validator run against every element
	pub fn validator(mut self, validator: impl Validator + 'static) -> Self {
		self.field = self.field.validator(validator);
		self
	}

	/// Appends a validator run against the whole list after the elements
	pub fn full_validator(mut self, validator: impl Validator + 'static) -> Self {
		self.full_validators.push(Arc::new(validator));
		self
	}

	pub fn formatter(mut self, formatter: impl Formatter + 'static) -> Self {
		self.field = self.field.formatter(formatter);
		self
	}
}

impl<S> Mapping<S> for MultipleField<S> {
	fn source_key(&self) -> &str {
		self.field.source_key()
	}

	fn target_key(&self) -> &str {
		self.field.target_key()
	}

	fn serialize(&self, source: &S, target: &mut Map, context: &Context) {
		self.field.serialize(source, target, context);
	}

	fn deserialize(
		&self,
		source: &Map,
		target: &mut Map,
		context: &Context,
	) -> Result<(), ValidationFailure> {
		let keys = &self.field.keys;
		let items: &[Value] = match keys.read(source) {
			None => &[],
			Some(Value::List(items)) => items,
			Some(value) if !value.is_truthy() => &[],
			Some(_) => return Err(keys.failure(vec![NOT_A_LIST.to_string()])),
		};

		let mut errors = ErrorTree::new();
		let mut values = Vec::with_capacity(items.len());
		for (index, item) in items.iter().enumerate() {
			let (value, messages) = run_validators(item.clone(), &self.field.validators, context);
			if messages.is_empty() {
				values.push(value);
			} else {
				errors.insert(index, messages);
			}
		}

		let (value, full_messages) =
			run_validators(Value::List(values), &self.full_validators, context);
		if !full_messages.is_empty() {
			errors.insert(FULL_ERRORS_KEY, full_messages);
		}

		if !errors.is_empty() {
			return Err(keys.failure(errors));
		}

		target.insert(keys.source.clone(), value);
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::{ErrorNode, ValidationError, ValidationResult};
	use rstest::rstest;
	use serde_json::json;

	fn max_len_one(value: &Value, _: &Context) -> ValidationResult<Value> {
		match value.as_str() {
			Some(s) if s.chars().count() > 1 => Err(ValidationError::new(
				"This field is too long, max length is 1",
			)),
			_ => Ok(value.clone()),
		}
	}

	fn at_most_two(value: &Value, _: &Context) -> ValidationResult<Value> {
		match value.as_list() {
			Some(items) if items.len() > 2 => Err(ValidationError::new("Too many items")),
			_ => Ok(value.clone()),
		}
	}

	fn map(value: serde_json::Value) -> Map {
		match Value::from(value) {
			Value::Map(map) => map,
			_ => Map::new(),
		}
	}

	#[rstest]
	fn test_field_formatters_run_in_order() {
		let field = Field::<Value>::new("a")
			.formatter(|v: Value, _: &Context| Value::Int(v.as_i64().unwrap_or_default() + 1))
			.formatter(|v: Value, _: &Context| Value::Int(v.as_i64().unwrap_or_default() * 10));
		let mut output = Map::new();
		field.serialize(&Value::from(json!({"a": 1})), &mut output, &Context::default());

		assert_eq!(output.get("a"), Some(&Value::Int(20)));
	}

	#[rstest]
	fn test_field_missing_key_deserializes_as_null() {
		let field = Field::<Value>::new("a");
		let mut internal = Map::new();
		field
			.deserialize(&Map::new(), &mut internal, &Context::default())
			.unwrap();

		assert_eq!(internal.get("a"), Some(&Value::Null));
	}

	#[rstest]
	fn test_field_failure_writes_nothing() {
		let field = Field::<Value>::new("a").target("b").validator(max_len_one);
		let mut internal = Map::new();
		let failure = field
			.deserialize(&map(json!({"b": "long"})), &mut internal, &Context::default())
			.unwrap_err();

		assert!(internal.is_empty());
		assert_eq!(
			failure.errors().to_json(),
			json!({"b": ["This field is too long, max length is 1"]})
		);
	}

	#[rstest]
	fn test_multiple_reports_failing_index_only() {
		let field = MultipleField::<Value>::new("field").validator(max_len_one);
		let failure = field
			.deserialize(
				&map(json!({"field": ["a", "bb"]})),
				&mut Map::new(),
				&Context::default(),
			)
			.unwrap_err();

		let element_errors = failure.errors().subtree("field").unwrap();
		assert!(!element_errors.contains(0_usize));
		assert_eq!(
			element_errors.get(1_usize),
			Some(&ErrorNode::Messages(vec![
				"This field is too long, max length is 1".to_string()
			]))
		);
	}

	#[rstest]
	#[case(json!({}))]
	#[case(json!({"d": null}))]
	#[case(json!({"d": ""}))]
	fn test_multiple_missing_is_empty_list(#[case] input: serde_json::Value) {
		let field = MultipleField::<Value>::new("d").validator(max_len_one);
		let mut internal = Map::new();
		field
			.deserialize(&map(input), &mut internal, &Context::default())
			.unwrap();

		assert_eq!(internal.get("d"), Some(&Value::List(vec![])));
	}

	#[rstest]
	fn test_multiple_full_validator_errors() {
		let field = MultipleField::<Value>::new("d")
			.validator(max_len_one)
			.full_validator(at_most_two);
		let failure = field
			.deserialize(
				&map(json!({"d": ["a", "b", "c", "dd"]})),
				&mut Map::new(),
				&Context::default(),
			)
			.unwrap_err();

		assert_eq!(
			failure.errors().to_json(),
			json!({"d": {
				"3": ["This field is too long, max length is 1"],
				"_full_errors": ["Too many items"],
			}})
		);
	}

	#[rstest]
	fn test_multiple_rejects_non_list() {
		let field = MultipleField::<Value>::new("d");
		let failure = field
			.deserialize(&map(json!({"d": 5})), &mut Map::new(), &Context::default())
			.unwrap_err();

		assert_eq!(
			failure.errors().to_json(),
			json!({"d": ["This field must be a list"]})
		);
	}

	#[rstest]
	fn test_multiple_serializes_whole_list() {
		let field = MultipleField::<Value>::new("d");
		let mut output = Map::new();
		field.serialize(&Value::from(json!({"d": [1, 2]})), &mut output, &Context::default());

		assert_eq!(output.get("d"), Some(&Value::from(vec![1, 2])));
	}
}

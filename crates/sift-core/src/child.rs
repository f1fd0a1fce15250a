//! Mapping for a single nested object

use crate::accessor::{self, ChildAccessor};
use crate::context::Context;
use crate::error::{ErrorTree, FULL_ERRORS_KEY, ValidationFailure};
use crate::mapping::{Keys, Mapping, NOT_AN_OBJECT};
use crate::serializer::Serializer;
use crate::validator::{Validator, ValidatorRef, run_validators};
use crate::value::{Map, Value};
use std::sync::Arc;

/// Delegates one sub-object to a nested [`Serializer`]
///
/// The nested serializer is shared, so one schema can be embedded in many
/// parents. Nested failures are reported one level deeper, under this
/// mapping's target key.
///
/// # Examples
///
/// ```
/// use sift_core::{Child, Context, Field, Serializer, Value};
/// use serde_json::json;
///
/// let address = Serializer::<Value>::new().with(Field::new("city"));
/// let person = Serializer::new()
///     .with(Field::new("name"))
///     .with(Child::new("address", address));
///
/// let source = Value::from(json!({"name": "Ann", "address": {"city": "Oslo", "zip": 1}}));
/// let output = person.serialize(&source, &Context::default());
///
/// assert_eq!(
///     Value::from(output),
///     Value::from(json!({"name": "Ann", "address": {"city": "Oslo"}}))
/// );
/// ```
pub struct Child<S, C> {
	keys: Keys,
	accessor: ChildAccessor<S, C>,
	serializer: Arc<Serializer<C>>,
	validators: Vec<ValidatorRef>,
	full_validators: Vec<ValidatorRef>,
}

impl Child<Value, Value> {
	/// Creates a child reading the sub-map stored under `source_key`
	pub fn new(
		source_key: impl Into<String>,
		serializer: impl Into<Arc<Serializer<Value>>>,
	) -> Self {
		let keys = Keys::new(source_key);
		let accessor = accessor::child_key(keys.source.clone());
		Self::from_parts(keys, accessor, serializer.into())
	}
}

impl<S, C> Child<S, C> {
	/// Creates a child borrowing its sub-object with a custom accessor
	pub fn with_accessor<F>(
		source_key: impl Into<String>,
		serializer: impl Into<Arc<Serializer<C>>>,
		accessor: F,
	) -> Self
	where
		F: for<'a> Fn(&'a S) -> Option<&'a C> + Send + Sync + 'static,
	{
		Self::from_parts(
			Keys::new(source_key),
			accessor::child_accessor(accessor),
			serializer.into(),
		)
	}

	fn from_parts(
		keys: Keys,
		accessor: ChildAccessor<S, C>,
		serializer: Arc<Serializer<C>>,
	) -> Self {
		Self {
			keys,
			accessor,
			serializer,
			validators: Vec::new(),
			full_validators: Vec::new(),
		}
	}

	pub fn target(mut self, target_key: impl Into<String>) -> Self {
		self.keys.target = target_key.into();
		self
	}

	/// Appends a validator run on the incoming sub-map before the nested
	/// serializer sees it
	pub fn validator(mut self, validator: impl Validator + 'static) -> Self {
		self.validators.push(Arc::new(validator));
		self
	}

	/// Appends a check run on the parent's deserialized map once the nested
	/// object has been accepted
	pub fn full_validator(mut self, validator: impl Validator + 'static) -> Self {
		self.full_validators.push(Arc::new(validator));
		self
	}

	pub fn serializer(&self) -> &Arc<Serializer<C>> {
		&self.serializer
	}
}

impl<S, C> Mapping<S> for Child<S, C> {
	fn source_key(&self) -> &str {
		&self.keys.source
	}

	fn target_key(&self) -> &str {
		&self.keys.target
	}

	fn serialize(&self, source: &S, target: &mut Map, context: &Context) {
		let value = match (self.accessor)(source) {
			Some(child) => Value::Map(self.serializer.serialize(child, context)),
			None => Value::Null,
		};
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

		let nested = match value {
			Value::Map(map) => self.serializer.deserialize(&map, context),
			Value::Null => self.serializer.deserialize(&Map::new(), context),
			_ => return Err(self.keys.failure(vec![NOT_AN_OBJECT.to_string()])),
		}
		.map_err(|failure| self.keys.failure(failure.into_errors()))?;

		if !self.full_validators.is_empty() {
			let mut candidate = target.clone();
			candidate.insert(self.keys.source.clone(), Value::Map(nested.clone()));
			let (_, messages) =
				run_validators(Value::Map(candidate), &self.full_validators, context);
			if !messages.is_empty() {
				return Err(self
					.keys
					.failure(ErrorTree::single(FULL_ERRORS_KEY, messages)));
			}
		}

		target.insert(self.keys.source.clone(), Value::Map(nested));
		Ok(())
	}
}

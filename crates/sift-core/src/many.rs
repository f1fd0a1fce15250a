//! Mapping for a collection of nested objects

use crate::accessor::{self, ManyAccessor};
use crate::context::Context;
use crate::error::{ErrorNode, ErrorTree, ValidationFailure};
use crate::mapping::{Keys, Mapping, NOT_A_LIST, NOT_AN_OBJECT};
use crate::serializer::Serializer;
use crate::validator::{Validator, ValidatorRef, run_validators};
use crate::value::{Map, Value};
use std::sync::Arc;

/// Delegates every element of a sub-collection to a nested [`Serializer`]
///
/// Deserializing attempts every element even after one fails and reports
/// each failing element's nested errors under its index.
///
/// # Examples
///
/// ```
/// use sift_core::{Context, Field, Many, Serializer, Value};
/// use serde_json::json;
///
/// let line = Serializer::<Value>::new().with(Field::new("sku"));
/// let order = Serializer::new().with(Many::new("lines", line));
///
/// let input = Value::from(json!({"lines": [{"sku": "a"}, {"sku": "b"}]}));
/// let internal = order
///     .deserialize(input.as_map().unwrap(), &Context::default())
///     .unwrap();
///
/// assert_eq!(internal.get("lines").and_then(Value::as_list).map(<[_]>::len), Some(2));
/// ```
pub struct Many<S, C> {
	keys: Keys,
	accessor: ManyAccessor<S, C>,
	serializer: Arc<Serializer<C>>,
	validators: Vec<ValidatorRef>,
}

impl Many<Value, Value> {
	/// Creates a many mapping reading the list stored under `source_key`
	pub fn new(
		source_key: impl Into<String>,
		serializer: impl Into<Arc<Serializer<Value>>>,
	) -> Self {
		let keys = Keys::new(source_key);
		let accessor = accessor::many_key(keys.source.clone());
		Self::from_parts(keys, accessor, serializer.into())
	}
}

impl<S, C> Many<S, C> {
	/// Creates a many mapping borrowing its elements with a custom accessor
	///
	/// # Examples
	///
	/// ```
	/// use sift_core::{Context, Field, Many, Map, Mapping, Serializer, Value};
	///
	/// struct Basket { items: Vec<Value> }
	///
	/// let items = Many::with_accessor(
	///     "items",
	///     Serializer::<Value>::new().with(Field::new("name")),
	///     |basket: &Basket| basket.items.as_slice(),
	/// );
	///
	/// let mut output = Map::new();
	/// items.serialize(&Basket { items: vec![] }, &mut output, &Context::default());
	/// assert_eq!(output.get("items"), Some(&Value::List(vec![])));
	/// ```
	pub fn with_accessor<F>(
		source_key: impl Into<String>,
		serializer: impl Into<Arc<Serializer<C>>>,
		accessor: F,
	) -> Self
	where
		F: for<'a> Fn(&'a S) -> &'a [C] + Send + Sync + 'static,
	{
		Self::from_parts(
			Keys::new(source_key),
			accessor::many_accessor(accessor),
			serializer.into(),
		)
	}

	fn from_parts(
		keys: Keys,
		accessor: ManyAccessor<S, C>,
		serializer: Arc<Serializer<C>>,
	) -> Self {
		Self {
			keys,
			accessor,
			serializer,
			validators: Vec::new(),
		}
	}

	pub fn target(mut self, target_key: impl Into<String>) -> Self {
		self.keys.target = target_key.into();
		self
	}

	/// Appends a validator run on the whole incoming list before any element
	/// is deserialized
	pub fn validator(mut self, validator: impl Validator + 'static) -> Self {
		self.validators.push(Arc::new(validator));
		self
	}

	pub fn serializer(&self) -> &Arc<Serializer<C>> {
		&self.serializer
	}

	fn deserialize_element(&self, element: &Value, context: &Context) -> Result<Value, ErrorNode> {
		match element {
			Value::Map(map) => self
				.serializer
				.deserialize(map, context)
				.map(Value::Map)
				.map_err(|failure| ErrorNode::Tree(failure.into_errors())),
			_ => Err(ErrorNode::Messages(vec![NOT_AN_OBJECT.to_string()])),
		}
	}
}

impl<S, C> Mapping<S> for Many<S, C> {
	fn source_key(&self) -> &str {
		&self.keys.source
	}

	fn target_key(&self) -> &str {
		&self.keys.target
	}

	fn serialize(&self, source: &S, target: &mut Map, context: &Context) {
		let value = (self.accessor)(source)
			.iter()
			.map(|element| Value::Map(self.serializer.serialize(element, context)))
			.collect();
		self.keys.write_output(target, value, context);
	}

	fn deserialize(
		&self,
		source: &Map,
		target: &mut Map,
		context: &Context,
	) -> Result<(), ValidationFailure> {
		let value = self
			.keys
			.read(source)
			.cloned()
			.unwrap_or_else(|| Value::List(Vec::new()));
		let (value, messages) = run_validators(value, &self.validators, context);
		if !messages.is_empty() {
			return Err(self.keys.failure(messages));
		}

		let elements = match value {
			Value::List(elements) => elements,
			Value::Null => Vec::new(),
			_ => return Err(self.keys.failure(vec![NOT_A_LIST.to_string()])),
		};

		let mut errors = ErrorTree::new();
		let mut values = Vec::with_capacity(elements.len());
		for (index, element) in elements.iter().enumerate() {
			match self.deserialize_element(element, context) {
				Ok(value) => values.push(value),
				Err(node) => errors.insert(index, node),
			}
		}

		if !errors.is_empty() {
			return Err(self.keys.failure(errors));
		}

		target.insert(self.keys.source.clone(), Value::List(values));
		Ok(())
	}
}

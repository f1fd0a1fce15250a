//! The mapping abstraction shared by fields, children and lists

use crate::context::Context;
use crate::error::ValidationFailure;
use crate::value::{Map, Value};

/// One translation unit of a [`Serializer`](crate::Serializer)
///
/// `source_key` names the value on the internal side, `target_key` names it
/// on the plain-map side. Serializing reads the source object and writes
/// `target_key`; deserializing reads `target_key` and writes `source_key`.
pub trait Mapping<S>: Send + Sync {
	fn source_key(&self) -> &str;

	fn target_key(&self) -> &str;

	/// Writes this mapping's output into `target`
	fn serialize(&self, source: &S, target: &mut Map, context: &Context);

	/// Validates this mapping's input and writes it into `target`
	///
	/// On failure nothing is written and the error tree holds a single node
	/// under [`target_key`](Mapping::target_key).
	fn deserialize(
		&self,
		source: &Map,
		target: &mut Map,
		context: &Context,
	) -> Result<(), ValidationFailure>;
}

pub(crate) const NOT_A_LIST: &str = "This field must be a list";
pub(crate) const NOT_AN_OBJECT: &str = "This field must be an object";

/// Internal and external names of a mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Keys {
	pub(crate) source: String,
	pub(crate) target: String,
}

impl Keys {
	pub(crate) fn new(source: impl Into<String>) -> Self {
		let source = source.into();
		Self {
			target: source.clone(),
			source,
		}
	}

	/// Reads the external value, missing keys reading as null
	pub(crate) fn read<'a>(&self, source: &'a Map) -> Option<&'a Value> {
		source.get(&self.target).filter(|value| !value.is_null())
	}

	/// Writes the serialized value unless `drop_empty` withholds it
	pub(crate) fn write_output(&self, target: &mut Map, value: Value, context: &Context) {
		if context.drop_empty() && value.is_emptyish() {
			return;
		}
		target.insert(self.target.clone(), value);
	}

	pub(crate) fn failure(&self, node: impl Into<crate::ErrorNode>) -> ValidationFailure {
		tracing::trace!(field = %self.target, "mapping rejected its input");
		ValidationFailure::single(self.target.as_str(), node)
	}
}

//! # Sift
//!
//! Declarative two-way serialization between in-memory objects and plain
//! nested maps.
//!
//! A [`Serializer`] is built once from field, child and list mappings, then
//! reused for any number of calls:
//!
//! - `serialize` reads an object and produces a plain [`Map`], running
//!   formatters along the way. It never fails.
//! - `deserialize` validates a plain map and either returns the internal map
//!   or a [`ValidationFailure`] holding an [`ErrorTree`] with every error
//!   found, shaped like the input.
//!
//! ## Feature Flags
//!
//! - `validators` (default) - configured validators, re-exported as [`validators`]
//! - `formatters` (default) - output formatters, re-exported as [`formatters`]
//!
//! ## Quick Example
//!
//! ```
//! use sift::prelude::*;
//! use serde_json::json;
//!
//! let comment = Serializer::<Value>::new()
//!     .with(Field::new("body").validator(required()).validator(string().max_length(10)));
//! let post = Serializer::new()
//!     .with(Field::new("id").validator(integer()))
//!     .with(Field::new("created").validator(datetime()).formatter(format_datetime()))
//!     .with(Many::new("comments", comment));
//!
//! let input = Value::from(json!({
//!     "id": "7",
//!     "created": "1970-01-01",
//!     "comments": [{"body": "short"}, {"body": "far too long for it"}],
//! }));
//!
//! let failure = post
//!     .deserialize(input.as_map().unwrap(), &Context::default())
//!     .unwrap_err();
//! assert_eq!(
//!     failure.errors().to_json(),
//!     json!({"comments": {"1": {"body": ["This field is too long, max length is 10"]}}})
//! );
//! ```

pub mod encoders;
#[cfg(all(feature = "validators", feature = "formatters"))]
pub mod fields;

pub use sift_core::{
	Attributes, Child, Context, ContextError, DROP_EMPTY, ErrorKey, ErrorNode, ErrorTree,
	FULL_ERRORS_KEY, Field, Formatter, FormatterRef, Many, Map, Mapping, MultipleField,
	Serializer, ValidationError, ValidationFailure, ValidationResult, Validator, ValidatorRef,
	Value, accessor, impl_attributes,
};

#[cfg(feature = "formatters")]
pub use sift_formatters as formatters;
#[cfg(feature = "validators")]
pub use sift_validators as validators;

/// Everything needed to declare and run serializers
pub mod prelude {
	pub use crate::encoders::{from_json_str, to_json_string, to_json_value};
	pub use crate::{
		Attributes, Child, Context, ErrorTree, Field, Formatter, Many, Map, Mapping,
		MultipleField, Serializer, ValidationError, ValidationFailure, ValidationResult,
		Validator, Value, impl_attributes,
	};

	#[cfg(all(feature = "validators", feature = "formatters"))]
	pub use crate::fields::datetime_field;
	#[cfg(feature = "formatters")]
	pub use crate::formatters::format_datetime;
	#[cfg(feature = "validators")]
	pub use crate::validators::{boolean, datetime, integer, required, string};
}

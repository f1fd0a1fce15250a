//! Two-way object serialization for sift
//!
//! A [`Serializer`] is an ordered list of mappings:
//! - [`Field`] and [`MultipleField`] translate scalar and list-of-scalar attributes
//! - [`Child`] delegates one nested object to another serializer
//! - [`Many`] delegates every element of a nested collection
//!
//! Serializing turns a source object into a plain [`Map`], running formatters
//! and honoring the `drop_empty` [`Context`] option. Deserializing validates a
//! plain map and either returns the internal map or a [`ValidationFailure`]
//! whose [`ErrorTree`] mirrors the input and holds every error found.
//!
//! # Examples
//!
//! ```
//! use sift_core::{Context, Field, Many, Serializer, ValidationError, Value};
//! use serde_json::json;
//!
//! let non_empty = |value: &Value, _: &Context| {
//!     if value.is_truthy() {
//!         Ok(value.clone())
//!     } else {
//!         Err(ValidationError::new("This field is required"))
//!     }
//! };
//!
//! let tag = Serializer::<Value>::new().with(Field::new("c1").validator(non_empty));
//! let post = Serializer::new()
//!     .with(Field::new("a"))
//!     .with(Many::new("c", tag));
//!
//! let input = Value::from(json!({"a": 1, "c": [{}]}));
//! let failure = post
//!     .deserialize(input.as_map().unwrap(), &Context::default())
//!     .unwrap_err();
//!
//! assert_eq!(
//!     failure.errors().to_json(),
//!     json!({"c": {"0": {"c1": ["This field is required"]}}})
//! );
//! ```

pub mod accessor;
pub mod child;
pub mod context;
pub mod error;
pub mod field;
pub mod many;
pub mod mapping;
pub mod serializer;
pub mod validator;
pub mod value;

pub use accessor::Attributes;
pub use child::Child;
pub use context::{Context, ContextError, DROP_EMPTY};
pub use error::{
	ErrorKey, ErrorNode, ErrorTree, FULL_ERRORS_KEY, INVALID_MESSAGE, ValidationError,
	ValidationFailure, ValidationResult,
};
pub use field::{Field, MultipleField};
pub use many::Many;
pub use mapping::Mapping;
pub use serializer::Serializer;
pub use validator::{
	Formatter, FormatterRef, Validator, ValidatorRef, run_formatters, run_validators,
};
pub use value::{Map, Value};

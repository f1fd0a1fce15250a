//! Prebuilt field mappings

use crate::formatters::format_datetime;
use crate::validators::{datetime, required as required_validator};
use crate::{Attributes, Field};

/// Field holding an ISO 8601 timestamp
///
/// Deserializing parses the text into a timestamp, rejecting missing values
/// first when `required` is set. Serializing writes the timestamp back as
/// ISO 8601 with a `Z` suffix for UTC.
///
/// # Examples
///
/// ```
/// use sift::fields::datetime_field;
/// use sift::{Context, Serializer, Value};
/// use serde_json::json;
///
/// let serializer = Serializer::<Value>::new().with(datetime_field("created", true).target("at"));
/// let context = Context::default();
///
/// let input = Value::from(json!({"at": "1970-01-01"}));
/// let internal = serializer.deserialize(input.as_map().unwrap(), &context).unwrap();
/// let output = serializer.serialize(&Value::from(internal), &context);
///
/// assert_eq!(output.get("at"), Some(&Value::from("1970-01-01T00:00:00Z")));
///
/// let failure = serializer.deserialize(&Default::default(), &context).unwrap_err();
/// assert_eq!(failure.errors().to_json(), json!({"at": ["This field is required"]}));
/// ```
pub fn datetime_field<S>(source_key: impl Into<String>, required: bool) -> Field<S>
where
	S: Attributes + 'static,
{
	let field = Field::new(source_key);
	let field = if required {
		field.validator(required_validator())
	} else {
		field
	};
	field.validator(datetime()).formatter(format_datetime())
}

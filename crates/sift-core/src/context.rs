//! Translation context
//!
//! A [`Context`] is a bag of named options threaded, unchanged, through every
//! mapping of a single `serialize` or `deserialize` call. The core only reads
//! [`DROP_EMPTY`]; custom validators and formatters may read any option they
//! like.

use crate::value::{Map, Value};
use serde::{Deserialize, Serialize};

/// Option that makes mappings omit keys whose values are emptyish
pub const DROP_EMPTY: &str = "drop_empty";

/// Errors raised while loading a context from configuration text
#[derive(Debug, thiserror::Error)]
pub enum ContextError {
	#[error("Invalid TOML context: {0}")]
	Toml(#[from] toml::de::Error),
	#[error("Invalid JSON context: {0}")]
	Json(#[from] serde_json::Error),
}

/// Per-call options for a translation
///
/// An absent option always means its default.
///
/// # Examples
///
/// ```
/// use sift_core::{Context, Value};
///
/// let context = Context::new()
///     .with_drop_empty(true)
///     .with_option("locale", "en_us");
///
/// assert!(context.drop_empty());
/// assert_eq!(context.get("locale"), Some(&Value::from("en_us")));
/// assert!(!Context::default().drop_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Context {
	options: Map,
}

impl Context {
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets a named option
	pub fn with_option(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
		self.options.insert(name.into(), value.into());
		self
	}

	/// Sets the [`DROP_EMPTY`] option
	pub fn with_drop_empty(self, drop_empty: bool) -> Self {
		self.with_option(DROP_EMPTY, drop_empty)
	}

	pub fn get(&self, name: &str) -> Option<&Value> {
		self.options.get(name)
	}

	/// Reads a boolean option, falling back to `default` when it is absent
	/// or not a boolean
	///
	/// # Examples
	///
	/// ```
	/// use sift_core::Context;
	///
	/// let context = Context::new().with_option("test_arg", true);
	/// assert!(context.flag("test_arg", false));
	/// assert!(context.flag("none_arg", true));
	/// ```
	pub fn flag(&self, name: &str, default: bool) -> bool {
		self.get(name).and_then(Value::as_bool).unwrap_or(default)
	}

	/// Whether emptyish values are withheld from serialized output
	pub fn drop_empty(&self) -> bool {
		self.flag(DROP_EMPTY, false)
	}

	pub fn options(&self) -> &Map {
		&self.options
	}

	/// Loads a context from a flat TOML table
	///
	/// # Examples
	///
	/// ```
	/// use sift_core::Context;
	///
	/// let context = Context::from_toml_str("drop_empty = true\nmax_items = 5").unwrap();
	/// assert!(context.drop_empty());
	/// assert_eq!(context.get("max_items").and_then(|v| v.as_i64()), Some(5));
	/// ```
	pub fn from_toml_str(text: &str) -> Result<Self, ContextError> {
		Ok(toml::from_str(text)?)
	}

	/// Loads a context from a JSON object
	pub fn from_json_str(text: &str) -> Result<Self, ContextError> {
		Ok(serde_json::from_str(text)?)
	}
}

//! Validation errors
//!
//! Validators fail with a [`ValidationError`]. Mappings convert those into an
//! [`ErrorTree`] shaped like the data being deserialized, and serializers
//! merge the trees of every failing mapping into a single
//! [`ValidationFailure`].

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;
use std::collections::btree_map;
use std::fmt;

/// Key under which whole-collection validator messages are reported
pub const FULL_ERRORS_KEY: &str = "_full_errors";

/// Message reported by a failure built without any message of its own
pub const INVALID_MESSAGE: &str = "This field is invalid";

/// Failure of a single validator call, carrying one or more messages
///
/// # Examples
///
/// ```
/// use sift_core::ValidationError;
///
/// let error = ValidationError::new("This field is required");
/// assert_eq!(error.messages(), ["This field is required"]);
/// assert_eq!(error.to_string(), "This field is required");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{}", .messages.join("; "))]
pub struct ValidationError {
	messages: Vec<String>,
}

impl ValidationError {
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			messages: vec![message.into()],
		}
	}

	/// Creates an error reporting several independent messages at once
	///
	/// An error always carries at least one message: an empty list reports
	/// [`INVALID_MESSAGE`].
	pub fn with_messages<I, M>(messages: I) -> Self
	where
		I: IntoIterator<Item = M>,
		M: Into<String>,
	{
		let mut messages: Vec<String> = messages.into_iter().map(Into::into).collect();
		if messages.is_empty() {
			messages.push(INVALID_MESSAGE.to_string());
		}
		Self { messages }
	}

	pub fn messages(&self) -> &[String] {
		&self.messages
	}

	pub fn into_messages(self) -> Vec<String> {
		self.messages
	}
}

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Key of an [`ErrorTree`] node: a field name or a list index
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorKey {
	Index(usize),
	Name(String),
}

impl fmt::Display for ErrorKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ErrorKey::Index(index) => write!(f, "{}", index),
			ErrorKey::Name(name) => f.write_str(name),
		}
	}
}

impl From<usize> for ErrorKey {
	fn from(index: usize) -> Self {
		ErrorKey::Index(index)
	}
}

impl From<&str> for ErrorKey {
	fn from(name: &str) -> Self {
		ErrorKey::Name(name.to_string())
	}
}

impl From<String> for ErrorKey {
	fn from(name: String) -> Self {
		ErrorKey::Name(name)
	}
}

/// A node of an [`ErrorTree`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorNode {
	/// Messages reported directly for the key
	Messages(Vec<String>),
	/// Errors reported for the keys nested below the key
	Tree(ErrorTree),
}

impl ErrorNode {
	pub fn as_messages(&self) -> Option<&[String]> {
		match self {
			ErrorNode::Messages(messages) => Some(messages),
			ErrorNode::Tree(_) => None,
		}
	}

	pub fn as_tree(&self) -> Option<&ErrorTree> {
		match self {
			ErrorNode::Tree(tree) => Some(tree),
			ErrorNode::Messages(_) => None,
		}
	}
}

impl From<Vec<String>> for ErrorNode {
	fn from(messages: Vec<String>) -> Self {
		ErrorNode::Messages(messages)
	}
}

impl From<ErrorTree> for ErrorNode {
	fn from(tree: ErrorTree) -> Self {
		ErrorNode::Tree(tree)
	}
}

/// Hierarchical error accumulator mirroring the shape of the input data
///
/// A key is present only when something under it failed.
///
/// # Examples
///
/// ```
/// use sift_core::ErrorTree;
/// use serde_json::json;
///
/// let mut tree = ErrorTree::single("a", vec!["Failed".to_string()]);
/// tree.merge(ErrorTree::single(
///     "e",
///     ErrorTree::single(0_usize, ErrorTree::single("d2", vec!["Failed".to_string()])),
/// ));
///
/// assert_eq!(tree.len(), 2);
/// assert_eq!(
///     tree.to_json(),
///     json!({"a": ["Failed"], "e": {"0": {"d2": ["Failed"]}}})
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorTree {
	nodes: BTreeMap<ErrorKey, ErrorNode>,
}

impl ErrorTree {
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a tree holding a single node
	pub fn single(key: impl Into<ErrorKey>, node: impl Into<ErrorNode>) -> Self {
		let mut tree = Self::new();
		tree.insert(key, node);
		tree
	}

	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	pub fn insert(&mut self, key: impl Into<ErrorKey>, node: impl Into<ErrorNode>) {
		self.nodes.insert(key.into(), node.into());
	}

	pub fn get(&self, key: impl Into<ErrorKey>) -> Option<&ErrorNode> {
		self.nodes.get(&key.into())
	}

	pub fn contains(&self, key: impl Into<ErrorKey>) -> bool {
		self.nodes.contains_key(&key.into())
	}

	/// Messages reported directly under `key`
	pub fn messages(&self, key: impl Into<ErrorKey>) -> Option<&[String]> {
		self.get(key).and_then(ErrorNode::as_messages)
	}

	/// Nested tree reported under `key`
	pub fn subtree(&self, key: impl Into<ErrorKey>) -> Option<&ErrorTree> {
		self.get(key).and_then(ErrorNode::as_tree)
	}

	/// Unions `other` into this tree
	///
	/// Mappings of one serializer own distinct keys, so a collision means the
	/// schema declares the same target key twice; the later node wins.
	pub fn merge(&mut self, other: ErrorTree) {
		for (key, node) in other.nodes {
			if self.nodes.contains_key(&key) {
				tracing::warn!(key = %key, "error tree merge overwrote an existing key");
			}
			self.nodes.insert(key, node);
		}
	}

	pub fn iter(&self) -> btree_map::Iter<'_, ErrorKey, ErrorNode> {
		self.nodes.iter()
	}

	/// Renders the tree as JSON, with list indexes as decimal string keys
	pub fn to_json(&self) -> serde_json::Value {
		serde_json::Value::Object(
			self.nodes
				.iter()
				.map(|(key, node)| (key.to_string(), node.to_json()))
				.collect(),
		)
	}
}

impl ErrorNode {
	fn to_json(&self) -> serde_json::Value {
		match self {
			ErrorNode::Messages(messages) => serde_json::Value::from(messages.clone()),
			ErrorNode::Tree(tree) => tree.to_json(),
		}
	}
}

impl<'a> IntoIterator for &'a ErrorTree {
	type Item = (&'a ErrorKey, &'a ErrorNode);
	type IntoIter = btree_map::Iter<'a, ErrorKey, ErrorNode>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

impl Serialize for ErrorTree {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut map = serializer.serialize_map(Some(self.nodes.len()))?;
		for (key, node) in &self.nodes {
			map.serialize_entry(&key.to_string(), node)?;
		}
		map.end()
	}
}

impl Serialize for ErrorNode {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self {
			ErrorNode::Messages(messages) => messages.serialize(serializer),
			ErrorNode::Tree(tree) => tree.serialize(serializer),
		}
	}
}

impl fmt::Display for ErrorTree {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.to_json())
	}
}

/// The single failure kind of a deserialization, carrying every error found
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Validation failed: {errors}")]
pub struct ValidationFailure {
	errors: ErrorTree,
}

impl ValidationFailure {
	pub fn new(errors: ErrorTree) -> Self {
		Self { errors }
	}

	/// Failure holding a single node under `key`
	pub fn single(key: impl Into<ErrorKey>, node: impl Into<ErrorNode>) -> Self {
		Self::new(ErrorTree::single(key, node))
	}

	pub fn errors(&self) -> &ErrorTree {
		&self.errors
	}

	pub fn into_errors(self) -> ErrorTree {
		self.errors
	}
}

impl From<ErrorTree> for ValidationFailure {
	fn from(errors: ErrorTree) -> Self {
		Self::new(errors)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	fn messages(items: &[&str]) -> Vec<String> {
		items.iter().map(|s| s.to_string()).collect()
	}

	#[rstest]
	fn test_validation_error_messages() {
		let error = ValidationError::with_messages(["too short", "not a slug"]);
		assert_eq!(error.messages(), ["too short", "not a slug"]);
		assert_eq!(error.to_string(), "too short; not a slug");
	}

	#[rstest]
	fn test_validation_error_never_empty() {
		let error = ValidationError::with_messages(Vec::<String>::new());
		assert_eq!(error.messages(), [INVALID_MESSAGE]);
	}

	#[rstest]
	fn test_index_keys_sort_before_names() {
		let mut tree = ErrorTree::new();
		tree.insert(FULL_ERRORS_KEY, messages(&["bad list"]));
		tree.insert(1_usize, messages(&["bad item"]));
		tree.insert(0_usize, messages(&["bad item"]));

		let keys: Vec<String> = tree.iter().map(|(key, _)| key.to_string()).collect();
		assert_eq!(keys, vec!["0", "1", "_full_errors"]);
	}

	#[rstest]
	fn test_merge_unions_keys() {
		let mut tree = ErrorTree::single("a", messages(&["Failed", "Failed, again"]));
		tree.merge(ErrorTree::single("b", messages(&["Failed"])));

		assert_eq!(tree.messages("a"), Some(&messages(&["Failed", "Failed, again"])[..]));
		assert_eq!(tree.messages("b"), Some(&messages(&["Failed"])[..]));
		assert!(!tree.contains("c"));
	}

	#[rstest]
	fn test_subtree_lookup() {
		let tree = ErrorTree::single("d", ErrorTree::single("d2", messages(&["Failed"])));

		assert!(tree.messages("d").is_none());
		assert_eq!(
			tree.subtree("d").and_then(|d| d.messages("d2")),
			Some(&messages(&["Failed"])[..])
		);
	}

	#[rstest]
	fn test_serialize_matches_to_json() {
		let tree = ErrorTree::single(
			"c",
			ErrorTree::single(
				0_usize,
				ErrorTree::single("c1", messages(&["This field is required"])),
			),
		);

		let expected = json!({"c": {"0": {"c1": ["This field is required"]}}});
		assert_eq!(serde_json::to_value(&tree).unwrap(), expected);
		assert_eq!(tree.to_json(), expected);
	}

	#[rstest]
	fn test_failure_display() {
		let failure = ValidationFailure::single("f", messages(&["This field is required"]));
		assert_eq!(
			failure.to_string(),
			r#"Validation failed: {"f":["This field is required"]}"#
		);
	}
}

//! Source-side accessors
//!
//! A mapping never inspects a source object on its own; it calls the accessor
//! it was built with. Field accessors produce a [`Value`], child accessors
//! borrow a single sub-object and many accessors borrow a slice of
//! sub-objects.
//!
//! The default field accessor goes through [`Attributes`], which is
//! implemented for map-backed sources ([`Value`] and [`Map`]) and can be
//! implemented for structs with [`impl_attributes!`](crate::impl_attributes).

use crate::value::{Map, Value};
use std::sync::Arc;

/// Reads a field value off a source object
pub type FieldAccessor<S> = Arc<dyn Fn(&S) -> Value + Send + Sync>;

/// Borrows a nested object off a source object
pub type ChildAccessor<S, C> = Arc<dyn for<'a> Fn(&'a S) -> Option<&'a C> + Send + Sync>;

/// Borrows a collection of nested objects off a source object
pub type ManyAccessor<S, C> = Arc<dyn for<'a> Fn(&'a S) -> &'a [C] + Send + Sync>;

/// Named attribute lookup, the default way fields read a source
pub trait Attributes {
	fn attribute(&self, name: &str) -> Value;
}

/// Map-key lookup: a missing key reads as [`Value::Null`]
impl Attributes for Value {
	fn attribute(&self, name: &str) -> Value {
		self.get(name).cloned().unwrap_or_default()
	}
}

impl Attributes for Map {
	fn attribute(&self, name: &str) -> Value {
		self.get(name).cloned().unwrap_or_default()
	}
}

/// Field accessor reading `name` through [`Attributes`]
pub fn attribute<S>(name: impl Into<String>) -> FieldAccessor<S>
where
	S: Attributes + 'static,
{
	let name = name.into();
	Arc::new(move |source: &S| source.attribute(&name))
}

/// Wraps a closure as a [`FieldAccessor`]
pub fn field_accessor<S, F>(f: F) -> FieldAccessor<S>
where
	F: Fn(&S) -> Value + Send + Sync + 'static,
{
	Arc::new(f)
}

/// Wraps a closure as a [`ChildAccessor`]
///
/// # Examples
///
/// ```
/// use sift_core::accessor::child_accessor;
///
/// struct Author { name: String }
/// struct Post { author: Author }
///
/// let accessor = child_accessor(|post: &Post| Some(&post.author));
/// let post = Post { author: Author { name: "Alice".to_string() } };
/// assert_eq!(accessor(&post).map(|a| a.name.as_str()), Some("Alice"));
/// ```
pub fn child_accessor<S, C, F>(f: F) -> ChildAccessor<S, C>
where
	F: for<'a> Fn(&'a S) -> Option<&'a C> + Send + Sync + 'static,
{
	Arc::new(f)
}

/// Wraps a closure as a [`ManyAccessor`]
pub fn many_accessor<S, C, F>(f: F) -> ManyAccessor<S, C>
where
	F: for<'a> Fn(&'a S) -> &'a [C] + Send + Sync + 'static,
{
	Arc::new(f)
}

/// Child accessor for map-backed sources: the value stored under `name`
pub fn child_key(name: impl Into<String>) -> ChildAccessor<Value, Value> {
	let name = name.into();
	child_accessor(move |source: &Value| source.get(&name).filter(|v| !v.is_null()))
}

/// Many accessor for map-backed sources: the list stored under `name`,
/// or an empty slice when there is none
pub fn many_key(name: impl Into<String>) -> ManyAccessor<Value, Value> {
	let name = name.into();
	many_accessor(move |source: &Value| {
		source
			.get(&name)
			.and_then(Value::as_list)
			.unwrap_or(&[])
	})
}

/// Implements [`Attributes`] for a struct from the fields it exposes
///
/// Each listed field is cloned and converted with `Value::from`. Asking for
/// a field that is not listed is a schema bug and panics.
///
/// # Examples
///
/// ```
/// use sift_core::{impl_attributes, Attributes, Value};
///
/// struct Account {
///     id: i64,
///     name: String,
/// }
///
/// impl_attributes!(Account { id, name });
///
/// let account = Account { id: 7, name: "ops".to_string() };
/// assert_eq!(account.attribute("id"), Value::Int(7));
/// assert_eq!(account.attribute("name"), Value::from("ops"));
/// ```
#[macro_export]
macro_rules! impl_attributes {
	($ty:ty { $($field:ident),* $(,)? }) => {
		impl $crate::Attributes for $ty {
			fn attribute(&self, name: &str) -> $crate::Value {
				match name {
					$(
						stringify!($field) => {
							$crate::Value::from(::std::clone::Clone::clone(&self.$field))
						}
					)*
					other => panic!("`{}` has no attribute `{}`", stringify!($ty), other),
				}
			}
		}
	};
}

//! Serializers over plain Rust structs
//!
//! Struct sources expose their fields through `impl_attributes!` and nested
//! objects through borrowing accessors.

use rstest::{fixture, rstest};
use serde_json::json;
use sift_core::{
	Child, Context, Field, Many, MultipleField, Serializer, ValidationError, Value, impl_attributes,
};
use std::sync::Arc;

struct Author {
	name: String,
	email: Option<String>,
}

struct Comment {
	body: String,
	score: i64,
}

struct Post {
	id: i64,
	title: String,
	tags: Vec<String>,
	author: Option<Author>,
	comments: Vec<Comment>,
}

impl_attributes!(Author { name, email });
impl_attributes!(Comment { body, score });
impl_attributes!(Post { id, title, tags });

#[fixture]
fn post_serializer() -> Serializer<Post> {
	let author = Serializer::<Author>::new()
		.with(Field::new("name"))
		.with(Field::new("email"));
	let comment = Arc::new(
		Serializer::<Comment>::new()
			.with(Field::new("body").target("text"))
			.with(Field::new("score")),
	);

	Serializer::new()
		.with(Field::new("id"))
		.with(Field::new("title").formatter(|value: Value, _: &Context| {
			Value::from(value.to_string().to_uppercase())
		}))
		.with(MultipleField::new("tags"))
		.with(Child::with_accessor("author", author, |post: &Post| post.author.as_ref()))
		.with(Many::with_accessor("comments", comment, |post: &Post| {
			post.comments.as_slice()
		}))
}

#[fixture]
fn post() -> Post {
	Post {
		id: 1,
		title: "hello".to_string(),
		tags: vec!["rust".to_string()],
		author: Some(Author {
			name: "Ann".to_string(),
			email: None,
		}),
		comments: vec![
			Comment {
				body: "first".to_string(),
				score: 0,
			},
			Comment {
				body: "second".to_string(),
				score: 3,
			},
		],
	}
}

#[rstest]
fn test_serialize_struct_graph(post_serializer: Serializer<Post>, post: Post) {
	let output = post_serializer.serialize(&post, &Context::default());

	assert_eq!(
		Value::from(output).to_json(),
		json!({
			"id": 1,
			"title": "HELLO",
			"tags": ["rust"],
			"author": {"name": "Ann", "email": null},
			"comments": [
				{"text": "first", "score": 0},
				{"text": "second", "score": 3},
			],
		})
	);
}

#[rstest]
fn test_serialize_struct_graph_drop_empty(post_serializer: Serializer<Post>, mut post: Post) {
	post.author = None;
	let output = post_serializer.serialize(&post, &Context::new().with_drop_empty(true));

	assert!(!output.contains_key("author"));
	assert_eq!(
		Value::from(output).to_json()["comments"][0],
		json!({"text": "first", "score": 0})
	);
}

#[rstest]
fn test_deserialize_struct_output(post_serializer: Serializer<Post>, post: Post) {
	let context = Context::default();
	let plain = post_serializer.serialize(&post, &context);
	let internal = post_serializer.deserialize(&plain, &context).unwrap();

	assert_eq!(
		Value::from(internal).to_json()["comments"][1],
		json!({"body": "second", "score": 3})
	);
}

#[rstest]
fn test_nested_struct_validation(post: Post) {
	let positive = |value: &Value, _: &Context| match value.as_i64() {
		Some(n) if n > 0 => Ok(value.clone()),
		_ => Err(ValidationError::new("Must be positive")),
	};
	let comment = Serializer::<Comment>::new().with(Field::new("score").validator(positive));
	let serializer = Serializer::<Post>::new().with(Many::with_accessor(
		"comments",
		comment,
		|post: &Post| post.comments.as_slice(),
	));

	let context = Context::default();
	let plain = serializer.serialize(&post, &context);
	let failure = serializer.deserialize(&plain, &context).unwrap_err();

	assert_eq!(
		failure.errors().to_json(),
		json!({"comments": {"0": {"score": ["Must be positive"]}}})
	);
}

//! Configured validators for sift
//!
//! Each validator is a small value holding its configuration, built with a
//! factory function and refined with builder methods:
//!
//! ```
//! use sift_core::{Context, Validator, Value};
//! use sift_validators::{integer, string};
//!
//! let percent = integer().bounds(0, 100);
//! let code = string().max_length(3);
//!
//! let context = Context::default();
//! assert_eq!(percent.validate(&Value::from("250"), &context).unwrap(), Value::Int(100));
//! assert!(code.validate(&Value::from("abcd"), &context).is_err());
//! ```

pub mod boolean;
pub mod datetime;
pub mod numeric;
pub mod required;
pub mod string;

pub use boolean::{BooleanValidator, boolean};
pub use datetime::{DateTimeValidator, datetime};
pub use numeric::{IntegerValidator, integer};
pub use required::{RequiredValidator, required};
pub use string::{StringValidator, string};

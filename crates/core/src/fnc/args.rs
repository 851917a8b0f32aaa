use std::vec::IntoIter;

use anyhow::{Result, bail};

use crate::err::Error;
use crate::val::Value;

/// An optional trailing argument.
pub struct Optional<T>(pub Option<T>);

/// Converts the computed arguments of a function call into the shape a
/// builtin function accepts, failing if there are too many or too few.
pub trait FromArgs: Sized {
	fn from_args(name: &str, args: Vec<Value>) -> Result<Self>;
}

fn too_many(name: &str, expected: &str) -> anyhow::Error {
	anyhow::Error::new(Error::InvalidArguments {
		name: name.to_owned(),
		message: format!("Expected {expected}."),
	})
}

impl FromArgs for Vec<Value> {
	fn from_args(_name: &str, args: Vec<Value>) -> Result<Self> {
		Ok(args)
	}
}

impl FromArgs for (Value,) {
	fn from_args(name: &str, args: Vec<Value>) -> Result<Self> {
		let mut iter: IntoIter<Value> = args.into_iter();
		match (iter.next(), iter.next()) {
			(Some(a), None) => Ok((a,)),
			_ => Err(too_many(name, "1 argument")),
		}
	}
}

impl FromArgs for (Optional<Value>,) {
	fn from_args(name: &str, args: Vec<Value>) -> Result<Self> {
		let mut iter = args.into_iter();
		match (iter.next(), iter.next()) {
			(a, None) => Ok((Optional(a),)),
			_ => Err(too_many(name, "0 or 1 arguments")),
		}
	}
}

impl FromArgs for (Value, Value) {
	fn from_args(name: &str, args: Vec<Value>) -> Result<Self> {
		let mut iter = args.into_iter();
		match (iter.next(), iter.next(), iter.next()) {
			(Some(a), Some(b), None) => Ok((a, b)),
			_ => Err(too_many(name, "2 arguments")),
		}
	}
}

/// Takes an array argument, treating any other value as a single item.
pub(crate) fn into_array(name: &str, v: Value) -> Result<Vec<Value>> {
	match v {
		Value::Array(v) => Ok(v.0),
		Value::None => Ok(Vec::new()),
		v if v.is_object() => bail!(Error::InvalidArguments {
			name: name.to_owned(),
			message: format!("Argument 1 was the wrong type. Expected an array but found {v}"),
		}),
		v => Ok(vec![v]),
	}
}

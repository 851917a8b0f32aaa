use anyhow::Result;

use super::args::into_array;
use crate::val::{Array, Value};

pub fn distinct((arg,): (Value,)) -> Result<Value> {
	Ok(Array::from(into_array("array::distinct", arg)?).uniq().into())
}

pub fn group((arg,): (Value,)) -> Result<Value> {
	Ok(Array::from(into_array("array::group", arg)?).flatten().uniq().into())
}

pub fn len((arg,): (Value,)) -> Result<Value> {
	Ok(into_array("array::len", arg)?.len().into())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn distinct_keeps_first_seen_order() {
		let arr = Value::from(vec![Value::from("b"), Value::from("a"), Value::from("b")]);
		assert_eq!(distinct((arr,)).unwrap(), Value::from(vec![Value::from("b"), Value::from("a")]));
	}

	#[test]
	fn group_flattens_then_dedups() {
		let arr = Value::from(vec![
			Value::from(vec![Value::from(1), Value::from(2)]),
			Value::from(vec![Value::from(2), Value::from(3)]),
		]);
		assert_eq!(
			group((arr,)).unwrap(),
			Value::from(vec![Value::from(1), Value::from(2), Value::from(3)])
		);
	}
}

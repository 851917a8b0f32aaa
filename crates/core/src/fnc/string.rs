use anyhow::Result;

use crate::val::Value;

pub fn concat(args: Vec<Value>) -> Result<Value> {
	Ok(args.into_iter().map(|x| x.to_raw_string()).collect::<Vec<_>>().concat().into())
}

pub fn len((arg,): (Value,)) -> Result<Value> {
	Ok(match arg {
		Value::None | Value::Null => 0.into(),
		v => v.to_raw_string().chars().count().into(),
	})
}

pub fn lowercase((arg,): (Value,)) -> Result<Value> {
	Ok(arg.to_raw_string().to_lowercase().into())
}

pub fn uppercase((arg,): (Value,)) -> Result<Value> {
	Ok(arg.to_raw_string().to_uppercase().into())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn length_of_empty_values_is_zero() {
		assert_eq!(len((Value::from("something"),)).unwrap(), Value::from(9));
		assert_eq!(len((Value::from("ändrew"),)).unwrap(), Value::from(6));
		assert_eq!(len((Value::Null,)).unwrap(), Value::from(0));
		assert_eq!(len((Value::None,)).unwrap(), Value::from(0));
	}

	#[test]
	fn concat_raw_strings() {
		let out = concat(vec![Value::from("a"), Value::from(1), Value::from("b")]).unwrap();
		assert_eq!(out, Value::from("a1b"));
	}
}

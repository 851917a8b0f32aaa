use anyhow::Result;

use super::args::into_array;
use crate::val::{Number, Value};

fn numbers(name: &str, arg: Value) -> Result<Vec<Number>> {
	Ok(into_array(name, arg)?.into_iter().filter_map(Value::into_number).collect())
}

pub fn max((arg,): (Value,)) -> Result<Value> {
	Ok(numbers("math::max", arg)?.into_iter().max().map(Value::Number).unwrap_or(Value::None))
}

pub fn mean((arg,): (Value,)) -> Result<Value> {
	let v = numbers("math::mean", arg)?;
	if v.is_empty() {
		return Ok(Value::None);
	}
	let len = v.len() as f64;
	let sum: Number = v.into_iter().sum();
	Ok(Value::from(sum.to_float() / len))
}

pub fn min((arg,): (Value,)) -> Result<Value> {
	Ok(numbers("math::min", arg)?.into_iter().min().map(Value::Number).unwrap_or(Value::None))
}

pub fn sum((arg,): (Value,)) -> Result<Value> {
	Ok(Value::Number(numbers("math::sum", arg)?.into_iter().sum()))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn arr() -> Value {
		Value::from(vec![Value::from(3), Value::from(1.5), Value::Null, Value::from(-2)])
	}

	#[test]
	fn numeric_aggregates_skip_non_numbers() {
		assert_eq!(max((arr(),)).unwrap(), Value::from(3));
		assert_eq!(min((arr(),)).unwrap(), Value::from(-2));
		assert_eq!(sum((arr(),)).unwrap(), Value::from(2.5));
		assert_eq!(mean((arr(),)).unwrap(), Value::from(2.5 / 3.0));
		assert_eq!(mean((Value::from(Vec::new()),)).unwrap(), Value::None);
	}
}

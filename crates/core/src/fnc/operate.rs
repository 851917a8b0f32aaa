use anyhow::Result;

use crate::val::{Number, Value};

pub fn not(a: Value) -> Result<Value> {
	Ok((!a.is_truthy()).into())
}

pub fn neg(a: Value) -> Result<Value> {
	Ok(match a {
		Value::Number(Number::Int(v)) => match v.checked_neg() {
			Some(v) => Value::from(v),
			None => Value::from(-(v as f64)),
		},
		Value::Number(Number::Float(v)) => Value::from(-v),
		_ => Value::None,
	})
}

pub fn equal(a: &Value, b: &Value) -> Result<Value> {
	Ok(a.equal(b).into())
}

pub fn not_equal(a: &Value, b: &Value) -> Result<Value> {
	Ok((!a.equal(b)).into())
}

pub fn less_than(a: &Value, b: &Value) -> Result<Value> {
	Ok(a.lt(b).into())
}

pub fn less_than_or_equal(a: &Value, b: &Value) -> Result<Value> {
	Ok(a.le(b).into())
}

pub fn more_than(a: &Value, b: &Value) -> Result<Value> {
	Ok(a.gt(b).into())
}

pub fn more_than_or_equal(a: &Value, b: &Value) -> Result<Value> {
	Ok(a.ge(b).into())
}

pub fn inside(a: &Value, b: &Value) -> Result<Value> {
	Ok(b.contains(a).into())
}

pub fn not_inside(a: &Value, b: &Value) -> Result<Value> {
	Ok((!b.contains(a)).into())
}

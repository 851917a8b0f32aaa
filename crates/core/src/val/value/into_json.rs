use serde_json::{Map, Number as JsonNumber, Value as JsonValue, json};

use crate::val::{Array, Number, Object, Strand, Value};

impl Value {
	/// Converts this value into plain JSON. Record ids, tables and datetimes
	/// become strings, and `NONE` becomes `null`.
	pub fn into_json(self) -> JsonValue {
		match self {
			Value::None | Value::Null => JsonValue::Null,
			Value::Bool(v) => JsonValue::Bool(v),
			Value::Number(Number::Int(v)) => json!(v),
			Value::Number(Number::Float(v)) => {
				JsonNumber::from_f64(v).map(JsonValue::Number).unwrap_or(JsonValue::Null)
			}
			Value::Strand(v) => JsonValue::String(v.into_string()),
			Value::Datetime(v) => JsonValue::String(v.0.to_rfc3339()),
			Value::Array(v) => JsonValue::Array(v.into_iter().map(Value::into_json).collect()),
			Value::Object(v) => {
				JsonValue::Object(v.into_iter().map(|(k, v)| (k, v.into_json())).collect::<Map<_, _>>())
			}
			Value::RecordId(v) => JsonValue::String(v.to_string()),
			Value::Table(v) => JsonValue::String(v.into_string()),
		}
	}
}

impl From<JsonValue> for Value {
	fn from(v: JsonValue) -> Self {
		match v {
			JsonValue::Null => Value::Null,
			JsonValue::Bool(v) => Value::Bool(v),
			JsonValue::Number(v) => match v.as_i64() {
				Some(i) => Value::Number(Number::Int(i)),
				None => Value::Number(Number::Float(v.as_f64().unwrap_or(f64::NAN))),
			},
			JsonValue::String(v) => Value::Strand(Strand(v)),
			JsonValue::Array(v) => Value::Array(v.into_iter().map(Value::from).collect::<Array>()),
			JsonValue::Object(v) => {
				Value::Object(v.into_iter().map(|(k, v)| (k, Value::from(v))).collect::<Object>())
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::val::RecordId;

	#[test]
	fn records_render_as_strings() {
		let v = Value::from(map! {
			"id" => Value::RecordId(RecordId::new("person", 1)),
			"age" => Value::from(1.5),
			"gone" => Value::None,
		});
		assert_eq!(v.into_json(), json!({ "id": "person:1", "age": 1.5, "gone": null }));
	}

	#[test]
	fn from_json_keeps_integers() {
		let v = Value::from(json!({ "a": 1, "b": [true, null, "x"] }));
		assert_eq!(
			v,
			Value::from(map! {
				"a" => Value::from(1),
				"b" => Value::from(vec![Value::Bool(true), Value::Null, Value::from("x")]),
			})
		);
	}
}

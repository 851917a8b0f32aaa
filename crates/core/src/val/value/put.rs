use crate::expr::Part;
use crate::val::{Object, Value};

impl Value {
	/// Synchronous method for setting a field on a `Value`, creating any
	/// intermediate objects along the path.
	pub fn put(&mut self, path: &[Part], val: Value) {
		let Some(p) = path.first() else {
			*self = val;
			return;
		};
		match self {
			// Current value at path is an object
			Value::Object(v) => match p {
				Part::Field(f) => match v.get_mut(f.as_str()) {
					Some(v) if path.len() > 1 => v.put(&path[1..], val),
					_ => {
						let mut obj = Value::None;
						obj.put(&path[1..], val);
						v.insert(f.clone(), obj);
					}
				},
				Part::Index(_) => (),
			},
			// Current value at path is an array
			Value::Array(v) => {
				if let Part::Index(i) = p
					&& let Some(v) = v.get_mut(*i)
				{
					v.put(&path[1..], val);
				}
			}
			// Current value at path is empty
			Value::None | Value::Null => {
				*self = Value::Object(Object::default());
				self.put(path, val)
			}
			// Ignore everything else
			_ => (),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::expr::Idiom;

	#[test]
	fn put_builds_nested_objects() {
		let mut val = Value::None;
		val.put(&Idiom::parse("name.first"), Value::from("Tobie"));
		val.put(&Idiom::parse("name.last"), Value::from("Morgan"));
		val.put(&Idiom::parse("age"), Value::from(30));
		assert_eq!(
			val,
			Value::from(map! {
				"name" => Value::from(map! {
					"first" => Value::from("Tobie"),
					"last" => Value::from("Morgan"),
				}),
				"age" => Value::from(30),
			})
		);
	}

	#[test]
	fn put_replaces_existing_leaf() {
		let mut val = Value::from(map! { "test" => Value::from(true) });
		val.put(&Idiom::parse("test"), Value::from(7));
		assert_eq!(val.pick(&Idiom::parse("test")), Value::from(7));
	}
}

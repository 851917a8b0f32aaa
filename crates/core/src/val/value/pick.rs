use crate::expr::Part;
use crate::val::Value;

impl Value {
	/// Synchronous method for getting a field from a `Value`. A missing path
	/// segment results in `Value::None`.
	pub fn pick(&self, path: &[Part]) -> Self {
		let Some(p) = path.first() else {
			return self.clone();
		};
		match self {
			// Current value at path is an object
			Value::Object(v) => match p {
				Part::Field(f) => match v.get(f.as_str()) {
					Some(v) => v.pick(&path[1..]),
					None => Value::None,
				},
				Part::Index(_) => Value::None,
			},
			// Current value at path is an array
			Value::Array(v) => match p {
				Part::Field(_) => v.iter().map(|v| v.pick(path)).collect::<Vec<_>>().into(),
				Part::Index(i) => match v.get(*i) {
					Some(v) => v.pick(&path[1..]),
					None => Value::None,
				},
			},
			// Ignore everything else
			_ => Value::None,
		}
	}
}

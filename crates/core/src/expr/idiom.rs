use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::doc::CursorDoc;
use crate::expr::Part;
use crate::val::Value;

/// A path into a record, such as `name.first` or `tags[0].value`.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Idiom(pub Vec<Part>);

impl Deref for Idiom {
	type Target = [Part];
	fn deref(&self) -> &Self::Target {
		self.0.as_slice()
	}
}

impl From<Vec<Part>> for Idiom {
	fn from(v: Vec<Part>) -> Self {
		Self(v)
	}
}

impl From<&str> for Idiom {
	fn from(v: &str) -> Self {
		Self::parse(v)
	}
}

impl From<String> for Idiom {
	fn from(v: String) -> Self {
		Self::parse(&v)
	}
}

impl From<Idiom> for String {
	fn from(v: Idiom) -> Self {
		v.to_string()
	}
}

impl Idiom {
	/// An idiom selecting a single top-level field.
	pub fn field(name: impl Into<String>) -> Self {
		Self(vec![Part::field(name)])
	}

	/// Parses a dotted field path, where each segment may be followed by
	/// any number of `[n]` array indexes.
	pub fn parse(path: &str) -> Self {
		let mut parts = Vec::new();
		for segment in path.split('.') {
			let (name, mut rest) = match segment.find('[') {
				Some(i) => segment.split_at(i),
				None => (segment, ""),
			};
			if !name.is_empty() {
				parts.push(Part::field(name));
			}
			while let Some(open) = rest.strip_prefix('[') {
				let Some(close) = open.find(']') else {
					parts.push(Part::field(rest));
					break;
				};
				let inner = &open[..close];
				match inner.parse::<usize>() {
					Ok(i) => parts.push(Part::Index(i)),
					Err(_) => parts.push(Part::field(inner)),
				}
				rest = &open[close + 1..];
			}
		}
		Self(parts)
	}

	/// Check if this idiom is the record `id` field
	pub fn is_id(&self) -> bool {
		matches!(self.0.as_slice(), [Part::Field(f)] if f == "id")
	}

	/// Process this type returning a computed simple Value
	pub(crate) fn compute(&self, doc: Option<&CursorDoc>) -> Value {
		match doc {
			Some(doc) => doc.doc.pick(self),
			None => Value::None,
		}
	}
}

impl fmt::Display for Idiom {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		for (i, p) in self.0.iter().enumerate() {
			match (i, p) {
				(0, Part::Field(v)) => f.write_str(v)?,
				(_, p) => fmt::Display::fmt(p, f)?,
			}
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parse_and_display() {
		let idi = Idiom::parse("name.first");
		assert_eq!(idi.0, vec![Part::field("name"), Part::field("first")]);
		assert_eq!(idi.to_string(), "name.first");
		let idi = Idiom::parse("tags[1].value");
		assert_eq!(idi.0, vec![Part::field("tags"), Part::Index(1), Part::field("value")]);
		assert_eq!(idi.to_string(), "tags[1].value");
	}

	#[test]
	fn id_detection() {
		assert!(Idiom::parse("id").is_id());
		assert!(!Idiom::parse("id.key").is_id());
	}
}

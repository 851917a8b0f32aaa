use std::fmt;

use serde::{Deserialize, Serialize};

/// One segment of an [`Idiom`](super::Idiom) path.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Part {
	/// A named field of an object
	Field(String),
	/// A position in an array
	Index(usize),
}

impl Part {
	pub fn field(name: impl Into<String>) -> Self {
		Part::Field(name.into())
	}
}

impl fmt::Display for Part {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Part::Field(v) => write!(f, ".{v}"),
			Part::Index(v) => write!(f, "[{v}]"),
		}
	}
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::err::Error;
use crate::val::{Strand, Value};

/// The key part of a record id. Numeric keys order before string keys.
#[derive(Clone, Debug, Eq, PartialEq, PartialOrd, Ord, Serialize, Deserialize, Hash)]
#[serde(untagged)]
pub enum RecordIdKey {
	Number(i64),
	String(String),
}

impl From<i64> for RecordIdKey {
	fn from(value: i64) -> Self {
		RecordIdKey::Number(value)
	}
}

impl From<String> for RecordIdKey {
	fn from(value: String) -> Self {
		RecordIdKey::String(value)
	}
}

impl From<&str> for RecordIdKey {
	fn from(value: &str) -> Self {
		RecordIdKey::String(value.to_owned())
	}
}

impl RecordIdKey {
	/// Returns the key as a plain value.
	pub fn into_value(self) -> Value {
		match self {
			RecordIdKey::Number(n) => Value::from(n),
			RecordIdKey::String(s) => Value::Strand(Strand(s)),
		}
	}
}

impl fmt::Display for RecordIdKey {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			RecordIdKey::Number(n) => write!(f, "{n}"),
			RecordIdKey::String(s) => {
				if s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
					&& !s.chars().all(|c| c.is_ascii_digit())
				{
					f.write_str(s)
				} else {
					write!(f, "⟨{s}⟩")
				}
			}
		}
	}
}

/// A reference to a single record: a table name and a key within it.
#[derive(Clone, Debug, Eq, PartialEq, PartialOrd, Ord, Serialize, Deserialize, Hash)]
pub struct RecordId {
	pub table: String,
	pub key: RecordIdKey,
}

impl RecordId {
	pub fn new(table: impl Into<String>, key: impl Into<RecordIdKey>) -> Self {
		RecordId {
			table: table.into(),
			key: key.into(),
		}
	}
}

impl FromStr for RecordId {
	type Err = Error;
	/// Parses `table:key`, treating an all-digit key as a number.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let Some((tb, id)) = s.split_once(':') else {
			return Err(Error::ConvertTo {
				into: "record".to_owned(),
				value: s.to_owned(),
			});
		};
		if tb.is_empty() || id.is_empty() {
			return Err(Error::ConvertTo {
				into: "record".to_owned(),
				value: s.to_owned(),
			});
		}
		let id = id.trim_start_matches('⟨').trim_end_matches('⟩');
		let key = match id.parse::<i64>() {
			Ok(n) => RecordIdKey::Number(n),
			Err(_) => RecordIdKey::String(id.to_owned()),
		};
		Ok(RecordId::new(tb, key))
	}
}

impl fmt::Display for RecordId {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}:{}", self.table, self.key)
	}
}

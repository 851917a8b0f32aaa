#![allow(clippy::derive_ord_xor_partial_ord)]

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

pub mod array;
pub mod datetime;
pub mod number;
pub mod object;
pub mod record_id;
pub mod strand;
pub mod table;
pub mod value;

pub use self::array::Array;
pub use self::datetime::Datetime;
pub use self::number::Number;
pub use self::object::Object;
pub use self::record_id::{RecordId, RecordIdKey};
pub use self::strand::Strand;
pub use self::table::Table;

/// A dynamically typed value. The variant order defines the cross-type
/// ordering: `None` sorts before `Null`, which sorts before everything else.
#[derive(Clone, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize, Hash)]
pub enum Value {
	/// The field is absent from the record
	#[default]
	None,
	/// The field is present, and explicitly null
	Null,
	Bool(bool),
	Number(Number),
	Strand(Strand),
	Datetime(Datetime),
	Array(Array),
	Object(Object),
	RecordId(RecordId),
	Table(Table),
	// Add new variants here
}

impl Eq for Value {}

impl Ord for Value {
	fn cmp(&self, other: &Self) -> Ordering {
		self.partial_cmp(other).unwrap_or(Ordering::Equal)
	}
}

impl Value {
	// -----------------------------------
	// Initial record value
	// -----------------------------------

	/// Create an empty Object Value
	pub fn empty_object() -> Self {
		Value::Object(Object::default())
	}

	// -----------------------------------
	// Simple value detection
	// -----------------------------------

	/// Check if this Value is NONE or NULL
	pub fn is_nullish(&self) -> bool {
		matches!(self, Value::None | Value::Null)
	}

	/// Check if this Value is TRUE
	pub fn is_true(&self) -> bool {
		matches!(self, Value::Bool(true))
	}

	/// Check if this Value is truthy
	pub fn is_truthy(&self) -> bool {
		match self {
			Value::Bool(v) => *v,
			Value::RecordId(_) => true,
			Value::Datetime(_) => true,
			Value::Table(_) => true,
			Value::Array(v) => !v.is_empty(),
			Value::Object(v) => !v.is_empty(),
			Value::Strand(v) => !v.is_empty(),
			Value::Number(v) => v.is_truthy(),
			Value::None | Value::Null => false,
		}
	}

	/// Converts this value into a string, without quoting strings.
	pub fn to_raw_string(&self) -> String {
		match self {
			Value::Strand(v) => v.0.clone(),
			Value::Datetime(v) => v.0.to_rfc3339(),
			v => v.to_string(),
		}
	}

	// -----------------------------------
	// Record ID extraction
	// -----------------------------------

	/// Fetch the record id if there is one
	pub fn record(self) -> Option<RecordId> {
		match self {
			// This is an object so look for the id field
			Value::Object(mut v) => match v.remove("id") {
				Some(Value::RecordId(v)) => Some(v),
				_ => None,
			},
			// This is an array so take the first item
			Value::Array(mut v) => match v.len() {
				1 => v.remove(0).record(),
				_ => None,
			},
			// This is a record id already
			Value::RecordId(v) => Some(v),
			// There is no valid record id
			_ => None,
		}
	}

	// -----------------------------------
	// Value operations
	// -----------------------------------

	/// Check if this Value is equal to another Value
	pub fn equal(&self, other: &Value) -> bool {
		match self {
			Value::None => other.is_none(),
			Value::Null => other.is_null(),
			Value::RecordId(v) => match other {
				Value::RecordId(w) => v == w,
				// A single record selected by a subquery
				Value::Array(w) if w.len() == 1 => self.equal(&w[0]),
				_ => false,
			},
			Value::Array(v) => match other {
				Value::Array(w) => v == w,
				Value::RecordId(_) if v.len() == 1 => v[0].equal(other),
				_ => false,
			},
			_ => self == other,
		}
	}

	/// Check if this Value contains another Value
	pub fn contains(&self, other: &Value) -> bool {
		match self {
			Value::Array(v) => v.iter().any(|v| v.equal(other)),
			Value::Strand(v) => match other {
				Value::Strand(w) => v.contains(w.as_str()),
				_ => false,
			},
			Value::Object(v) => match other {
				Value::Strand(w) => v.contains_key(w.as_str()),
				_ => false,
			},
			_ => false,
		}
	}
}

impl Display for Value {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		match self {
			Value::None => f.write_str("NONE"),
			Value::Null => f.write_str("NULL"),
			Value::Bool(v) => Display::fmt(v, f),
			Value::Number(v) => Display::fmt(v, f),
			Value::Strand(v) => Display::fmt(v, f),
			Value::Datetime(v) => Display::fmt(v, f),
			Value::Array(v) => Display::fmt(v, f),
			Value::Object(v) => Display::fmt(v, f),
			Value::RecordId(v) => Display::fmt(v, f),
			Value::Table(v) => Display::fmt(v, f),
		}
	}
}

/// Macro implementing conversion methods for the variants of the value enum.
macro_rules! subtypes {
	($($name:ident$( ( $t:ty ) )? => ($is:ident $(,$as:ident,$into:ident)?)),*$(,)?) => {
		impl Value {
			$(
				subtypes!{@method $name $( ($t) )? => $is $(,$as,$into)?}
			)*
		}

		$(
			subtypes!{@from $name $( ($t) )?}
		)*
	};

	(@method $name:ident($t:ty) => $is:ident,$as:ident,$into:ident) => {
		#[doc = concat!("Check if the value is a [`",stringify!($name),"`]")]
		pub fn $is(&self) -> bool {
			matches!(self, Value::$name(_))
		}

		#[doc = concat!("Return a reference to [`",stringify!($name),"`] if the value is of that type")]
		pub fn $as(&self) -> Option<&$t> {
			if let Value::$name(x) = self {
				Some(x)
			} else {
				None
			}
		}

		#[doc = concat!("Turns the value into a [`",stringify!($name),"`] returning None if the value is not of that type")]
		pub fn $into(self) -> Option<$t> {
			if let Value::$name(x) = self {
				Some(x)
			} else {
				None
			}
		}
	};

	(@method $name:ident => $is:ident) => {
		#[doc = concat!("Check if the value is a [`",stringify!($name),"`]")]
		pub fn $is(&self) -> bool {
			matches!(self, Value::$name)
		}
	};

	(@from $name:ident($t:ty)) => {
		impl From<$t> for Value {
			fn from(v: $t) -> Self {
				Value::$name(v)
			}
		}
	};

	(@from $name:ident) => {
		// skip
	};
}

subtypes! {
	None => (is_none),
	Null => (is_null),
	Bool(bool) => (is_bool, as_bool, into_bool),
	Number(Number) => (is_number, as_number, into_number),
	Strand(Strand) => (is_strand, as_strand, into_strand),
	Datetime(Datetime) => (is_datetime, as_datetime, into_datetime),
	Array(Array) => (is_array, as_array, into_array),
	Object(Object) => (is_object, as_object, into_object),
	RecordId(RecordId) => (is_record, as_record, into_record),
	Table(Table) => (is_table, as_table, into_table),
}

impl From<i64> for Value {
	fn from(v: i64) -> Self {
		Value::Number(Number::Int(v))
	}
}

impl From<i32> for Value {
	fn from(v: i32) -> Self {
		Value::Number(Number::from(v))
	}
}

impl From<usize> for Value {
	fn from(v: usize) -> Self {
		Value::Number(Number::from(v))
	}
}

impl From<f64> for Value {
	fn from(v: f64) -> Self {
		Value::Number(Number::Float(v))
	}
}

impl From<&str> for Value {
	fn from(v: &str) -> Self {
		Value::Strand(Strand::from(v))
	}
}

impl From<String> for Value {
	fn from(v: String) -> Self {
		Value::Strand(Strand::from(v))
	}
}

impl From<Vec<Value>> for Value {
	fn from(v: Vec<Value>) -> Self {
		Value::Array(Array(v))
	}
}

impl From<BTreeMap<String, Value>> for Value {
	fn from(v: BTreeMap<String, Value>) -> Self {
		Value::Object(Object(v))
	}
}

impl From<BTreeMap<&str, Value>> for Value {
	fn from(v: BTreeMap<&str, Value>) -> Self {
		Value::Object(Object::from(v))
	}
}

impl<T> From<Option<T>> for Value
where
	Value: From<T>,
{
	fn from(v: Option<T>) -> Self {
		match v {
			Some(v) => Value::from(v),
			None => Value::None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn none_and_null_are_distinct() {
		assert!(!Value::None.equal(&Value::Null));
		assert!(!Value::Null.equal(&Value::from("")));
		assert!(!Value::None.equal(&Value::Array(Array::new())));
		assert!(Value::None < Value::Null);
		assert!(Value::Null < Value::Bool(false));
		assert!(Value::Bool(true) < Value::from(0));
	}

	#[test]
	fn numbers_compare_across_representations() {
		assert!(Value::from(1).equal(&Value::from(1.0)));
		assert!(Value::from(2) < Value::from(2.5));
		assert_eq!(Value::from(3).cmp(&Value::from(3.0)), Ordering::Equal);
	}

	#[test]
	fn truthiness() {
		assert!(!Value::None.is_truthy());
		assert!(!Value::Null.is_truthy());
		assert!(!Value::from("").is_truthy());
		assert!(Value::from("a").is_truthy());
		assert!(!Value::from(0).is_truthy());
		assert!(Value::RecordId(RecordId::new("person", 1)).is_truthy());
	}

	#[test]
	fn record_equals_single_element_array() {
		let rid = Value::RecordId(RecordId::new("person", 1));
		let arr = Value::from(vec![rid.clone()]);
		assert!(rid.equal(&arr));
		assert!(arr.equal(&rid));
		let two = Value::from(vec![rid.clone(), rid.clone()]);
		assert!(!rid.equal(&two));
	}

	#[test]
	fn record_extraction() {
		let rid = RecordId::new("person", "tobie");
		let obj = Value::from(map! {
			"id" => Value::RecordId(rid.clone()),
			"name" => Value::from("Tobie"),
		});
		assert_eq!(obj.record(), Some(rid.clone()));
		assert_eq!(Value::from(vec![Value::RecordId(rid.clone())]).record(), Some(rid));
		assert_eq!(Value::from("person:tobie").record(), None);
	}
}

use std::ops::Deref;
use std::{cmp, fmt};

use serde::{Deserialize, Serialize};

use crate::err::Error;
use crate::expr::Idiom;
use crate::fmt::Fmt;
use crate::val::Value;

/// Languages for which a linguistic collation can be requested.
const COLLATION_LANGUAGES: &[&str] =
	&["cs", "da", "de", "en", "es", "fi", "fr", "it", "nb", "nl", "no", "pl", "pt", "sv"];

/// Compares two strings for ordering.
pub trait Collator {
	fn compare(&self, a: &str, b: &str) -> cmp::Ordering;
}

/// The string comparison used by one ORDER BY key.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Collation {
	/// Byte-wise comparison
	#[default]
	Ordinal,
	/// Byte-wise comparison, with runs of digits compared by value
	Numeric,
	/// Case and accent aware comparison
	Lexical,
	/// Case and accent aware comparison, with runs of digits compared by value
	NaturalLexical,
}

impl Collator for Collation {
	fn compare(&self, a: &str, b: &str) -> cmp::Ordering {
		match self {
			Collation::Ordinal => a.cmp(b),
			Collation::Numeric => lexicmp::natural_cmp(a, b),
			Collation::Lexical => lexicmp::lexical_cmp(a, b),
			Collation::NaturalLexical => lexicmp::natural_lexical_cmp(a, b),
		}
	}
}

impl Collation {
	/// Resolves a BCP 47 locale tag, such as `en-GB` or `de-u-kn-true`, to a
	/// collation. The `kn` unicode extension keyword enables numeric ordering
	/// in addition to the `numeric` flag.
	pub fn from_locale(locale: &str, numeric: bool) -> Result<Self, Error> {
		let invalid = || Error::InvalidCollation {
			locale: locale.to_owned(),
		};
		let mut subtags = locale.split(['-', '_']);
		let language = subtags.next().unwrap_or_default().to_ascii_lowercase();
		if !COLLATION_LANGUAGES.contains(&language.as_str()) {
			return Err(invalid());
		}
		let rest: Vec<String> = subtags.map(str::to_ascii_lowercase).collect();
		if rest.iter().any(|s| s.is_empty() || s.len() > 8 || !s.chars().all(|c| c.is_ascii_alphanumeric())) {
			return Err(invalid());
		}
		// Look for the `kn` keyword in the unicode extension
		let mut kn = false;
		if let Some(pos) = rest.iter().position(|s| s == "u") {
			let ext = &rest[pos + 1..];
			if let Some(k) = ext.iter().position(|s| s == "kn") {
				kn = !matches!(ext.get(k + 1).map(String::as_str), Some("false"));
			}
		}
		Ok(match numeric || kn {
			true => Collation::NaturalLexical,
			false => Collation::Lexical,
		})
	}

	/// Compares two values, using this collation when both are strings.
	pub(crate) fn compare_values(&self, a: &Value, b: &Value) -> cmp::Ordering {
		match (a, b) {
			(Value::Strand(a), Value::Strand(b)) => self.compare(a, b),
			(a, b) => a.cmp(b),
		}
	}
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderList(pub Vec<Order>);

impl Deref for OrderList {
	type Target = Vec<Order>;
	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl fmt::Display for OrderList {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "ORDER BY {}", Fmt::comma_separated(&self.0))
	}
}

impl OrderList {
	/// Resolves the collation of every key, failing on unsupported locales.
	pub(crate) fn comparator(&self) -> Result<OrderComparator, Error> {
		let keys = self
			.0
			.iter()
			.map(|o| Ok((o.direction, o.collation()?)))
			.collect::<Result<Vec<_>, Error>>()?;
		Ok(OrderComparator {
			keys,
		})
	}
}

/// Compares the computed ORDER BY keys of two rows.
#[derive(Clone, Debug)]
pub(crate) struct OrderComparator {
	keys: Vec<(OrderDirection, Collation)>,
}

impl OrderComparator {
	pub(crate) fn compare(&self, a: &[Value], b: &[Value]) -> cmp::Ordering {
		for (i, (direction, collation)) in self.keys.iter().enumerate() {
			let (Some(x), Some(y)) = (a.get(i), b.get(i)) else {
				break;
			};
			// Empty values come first, and tie with each other
			let o = match (x.is_nullish(), y.is_nullish()) {
				(true, true) => cmp::Ordering::Equal,
				(true, false) => cmp::Ordering::Less,
				(false, true) => cmp::Ordering::Greater,
				(false, false) => collation.compare_values(x, y),
			};
			let o = match direction {
				OrderDirection::Ascending => o,
				OrderDirection::Descending => o.reverse(),
			};
			if o != cmp::Ordering::Equal {
				return o;
			}
		}
		cmp::Ordering::Equal
	}
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum OrderDirection {
	#[default]
	Ascending,
	Descending,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Order {
	/// The value to order by
	pub value: Idiom,
	/// Whether `COLLATE` was specified
	pub collate: bool,
	/// The locale given to `COLLATE`, if any
	pub locale: Option<String>,
	pub numeric: bool,
	pub direction: OrderDirection,
}

impl Order {
	/// Order ascending by the given field
	pub fn asc(value: impl Into<Idiom>) -> Self {
		Self {
			value: value.into(),
			..Default::default()
		}
	}

	/// Order descending by the given field
	pub fn desc(value: impl Into<Idiom>) -> Self {
		Self {
			value: value.into(),
			direction: OrderDirection::Descending,
			..Default::default()
		}
	}

	/// Compare strings using the default linguistic collation
	pub fn collate(mut self) -> Self {
		self.collate = true;
		self
	}

	/// Compare strings using the collation of a locale
	pub fn locale(mut self, locale: impl Into<String>) -> Self {
		self.collate = true;
		self.locale = Some(locale.into());
		self
	}

	/// Compare runs of digits within strings by their numeric value
	pub fn numeric(mut self) -> Self {
		self.numeric = true;
		self
	}

	pub(crate) fn collation(&self) -> Result<Collation, Error> {
		match (&self.locale, self.collate, self.numeric) {
			(Some(locale), _, numeric) => Collation::from_locale(locale, numeric),
			(None, true, true) => Ok(Collation::NaturalLexical),
			(None, true, false) => Ok(Collation::Lexical),
			(None, false, true) => Ok(Collation::Numeric),
			(None, false, false) => Ok(Collation::Ordinal),
		}
	}
}

impl fmt::Display for Order {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}", self.value)?;
		match &self.locale {
			Some(locale) => write!(f, " COLLATE '{locale}'")?,
			None if self.collate => write!(f, " COLLATE")?,
			None => (),
		}
		if self.numeric {
			write!(f, " NUMERIC")?;
		}
		if matches!(self.direction, OrderDirection::Descending) {
			write!(f, " DESC")?;
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sorted(mut v: Vec<&str>, c: Collation) -> Vec<&str> {
		v.sort_by(|a, b| c.compare(a, b));
		v
	}

	#[test]
	fn ordinal_and_numeric_strings() {
		assert_eq!(sorted(vec!["2", "1000"], Collation::Ordinal), vec!["1000", "2"]);
		assert_eq!(sorted(vec!["2", "1000"], Collation::Numeric), vec!["2", "1000"]);
		assert_eq!(sorted(vec!["2", "1000"], Collation::NaturalLexical), vec!["2", "1000"]);
	}

	#[test]
	fn lexical_strings_ignore_case() {
		let v = vec!["zoe", "Émile", "adam", "Bob"];
		assert_eq!(sorted(v.clone(), Collation::Ordinal), vec!["Bob", "adam", "zoe", "Émile"]);
		assert_eq!(sorted(v, Collation::Lexical), vec!["adam", "Bob", "Émile", "zoe"]);
	}

	#[test]
	fn locale_tags() {
		assert_eq!(Collation::from_locale("en-GB", false).unwrap(), Collation::Lexical);
		assert_eq!(Collation::from_locale("en-GB", true).unwrap(), Collation::NaturalLexical);
		assert_eq!(
			Collation::from_locale("en-GB-u-kn-true", false).unwrap(),
			Collation::NaturalLexical
		);
		assert_eq!(Collation::from_locale("de-u-kn", false).unwrap(), Collation::NaturalLexical);
		assert_eq!(Collation::from_locale("fr-u-kn-false", false).unwrap(), Collation::Lexical);
		assert!(matches!(
			Collation::from_locale("xx-YY", false),
			Err(Error::InvalidCollation { .. })
		));
		assert!(Collation::from_locale("en-GB!", false).is_err());
	}

	#[test]
	fn empty_values_sort_first_and_tie() {
		let cmp = OrderList(vec![Order::asc("v")]).comparator().unwrap();
		assert_eq!(cmp.compare(&[Value::None], &[Value::Null]), cmp::Ordering::Equal);
		assert_eq!(cmp.compare(&[Value::Null], &[Value::Bool(false)]), cmp::Ordering::Less);
		let cmp = OrderList(vec![Order::desc("v")]).comparator().unwrap();
		assert_eq!(cmp.compare(&[Value::Null], &[Value::from(1)]), cmp::Ordering::Greater);
	}

	#[test]
	fn falls_through_to_later_keys() {
		let cmp = OrderList(vec![Order::asc("a"), Order::desc("b")]).comparator().unwrap();
		let x = [Value::from(1), Value::from(1)];
		let y = [Value::from(1), Value::from(2)];
		assert_eq!(cmp.compare(&x, &y), cmp::Ordering::Greater);
	}
}

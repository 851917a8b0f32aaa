use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum PrefixOperator {
	/// `!`
	Not,
	/// `-`
	Negate,
}

impl fmt::Display for PrefixOperator {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Not => f.write_str("!"),
			Self::Negate => f.write_str("-"),
		}
	}
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum PostfixOperator {
	/// `IS NULL`
	IsNull,
	/// `IS NOT NULL`
	IsNotNull,
	/// `IS VOID`
	IsVoid,
	/// `IS NOT VOID`
	IsNotVoid,
	/// `IS EMPTY`
	IsEmpty,
	/// `IS NOT EMPTY`
	IsNotEmpty,
}

impl fmt::Display for PostfixOperator {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::IsNull => f.write_str("IS NULL"),
			Self::IsNotNull => f.write_str("IS NOT NULL"),
			Self::IsVoid => f.write_str("IS VOID"),
			Self::IsNotVoid => f.write_str("IS NOT VOID"),
			Self::IsEmpty => f.write_str("IS EMPTY"),
			Self::IsNotEmpty => f.write_str("IS NOT EMPTY"),
		}
	}
}

/// Binary operators.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum BinaryOperator {
	/// `||` and `OR`
	Or,
	/// `&&` and `AND`
	And,
	/// `=` and `IS`
	Equal,
	/// `!=` and `IS NOT`
	NotEqual,
	/// `<`
	LessThan,
	/// `<=`
	LessThanEqual,
	/// `>`
	MoreThan,
	/// `>=`
	MoreThanEqual,
	/// `IN` and `INSIDE`
	Inside,
	/// `NOT IN` and `NOTINSIDE`
	NotInside,
}

impl BinaryOperator {
	/// Check if this operator compares two single values, in which case a
	/// subquery operand is reduced to a single value.
	pub fn is_comparison(&self) -> bool {
		matches!(
			self,
			Self::Equal
				| Self::NotEqual
				| Self::LessThan
				| Self::LessThanEqual
				| Self::MoreThan
				| Self::MoreThanEqual
		)
	}

	/// The binding power of this operator when building operator chains.
	/// Higher binds tighter.
	pub(crate) fn binding_power(&self) -> u8 {
		match self {
			Self::Or => 1,
			Self::And => 2,
			Self::Equal | Self::NotEqual => 3,
			Self::LessThan
			| Self::LessThanEqual
			| Self::MoreThan
			| Self::MoreThanEqual
			| Self::Inside
			| Self::NotInside => 4,
		}
	}
}

impl fmt::Display for BinaryOperator {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Or => f.write_str("OR"),
			Self::And => f.write_str("AND"),
			Self::Equal => f.write_str("="),
			Self::NotEqual => f.write_str("!="),
			Self::LessThan => f.write_str("<"),
			Self::LessThanEqual => f.write_str("<="),
			Self::MoreThan => f.write_str(">"),
			Self::MoreThanEqual => f.write_str(">="),
			Self::Inside => f.write_str("IN"),
			Self::NotInside => f.write_str("NOT IN"),
		}
	}
}

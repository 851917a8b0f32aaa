use std::cmp::Ordering;
use std::fmt::{self, Display, Formatter};
use std::hash;
use std::iter::Sum;
use std::ops;

use serde::{Deserialize, Serialize};

/// A numeric value, either a signed integer or a float. Integers and floats
/// holding the same numeric value are equal, order together, and hash alike.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Number {
	Int(i64),
	Float(f64),
}

impl Default for Number {
	fn default() -> Self {
		Self::Int(0)
	}
}

impl From<i64> for Number {
	fn from(i: i64) -> Self {
		Self::Int(i)
	}
}

impl From<i32> for Number {
	fn from(i: i32) -> Self {
		Self::Int(i as i64)
	}
}

impl From<usize> for Number {
	fn from(i: usize) -> Self {
		Self::Int(i as i64)
	}
}

impl From<f64> for Number {
	fn from(f: f64) -> Self {
		Self::Float(f)
	}
}

impl Display for Number {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		match self {
			Number::Int(v) => Display::fmt(v, f),
			Number::Float(v) => {
				if v.is_finite() && v.fract() == 0.0 {
					write!(f, "{v:.1}f")
				} else {
					write!(f, "{v}f")
				}
			}
		}
	}
}

impl Number {
	// -----------------------------------
	// Simple number detection
	// -----------------------------------

	pub fn is_float(&self) -> bool {
		matches!(self, Number::Float(_))
	}

	pub fn is_truthy(&self) -> bool {
		match self {
			Number::Int(v) => v != &0,
			Number::Float(v) => v != &0.0,
		}
	}

	pub fn is_negative(&self) -> bool {
		match self {
			Number::Int(v) => v < &0,
			Number::Float(v) => v < &0.0,
		}
	}

	// -----------------------------------
	// Simple conversion of number
	// -----------------------------------

	pub fn to_float(&self) -> f64 {
		match self {
			Number::Int(v) => *v as f64,
			Number::Float(v) => *v,
		}
	}

	/// Converts this number into a count of rows, clamping negative
	/// values to zero and truncating fractions.
	pub fn to_usize(&self) -> usize {
		match self {
			Number::Int(v) => (*v).max(0) as usize,
			Number::Float(v) if v.is_nan() => 0,
			Number::Float(v) => v.max(0.0) as usize,
		}
	}
}

impl Ord for Number {
	fn cmp(&self, other: &Self) -> Ordering {
		match (self, other) {
			(Number::Int(v), Number::Int(w)) => v.cmp(w),
			(Number::Float(v), Number::Float(w)) => v.total_cmp(w),
			(Number::Int(v), Number::Float(w)) => (*v as f64).total_cmp(w),
			(Number::Float(v), Number::Int(w)) => v.total_cmp(&(*w as f64)),
		}
	}
}

impl PartialOrd for Number {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

impl Eq for Number {}

impl PartialEq for Number {
	fn eq(&self, other: &Self) -> bool {
		self.cmp(other) == Ordering::Equal
	}
}

impl hash::Hash for Number {
	fn hash<H: hash::Hasher>(&self, state: &mut H) {
		match self {
			Number::Int(v) => v.hash(state),
			Number::Float(v) if v.fract() == 0.0 && *v >= i64::MIN as f64 && *v <= i64::MAX as f64 => {
				(*v as i64).hash(state)
			}
			Number::Float(v) => v.to_bits().hash(state),
		}
	}
}

impl ops::Add for Number {
	type Output = Self;
	fn add(self, other: Self) -> Self {
		match (self, other) {
			(Number::Int(v), Number::Int(w)) => match v.checked_add(w) {
				Some(x) => Number::Int(x),
				None => Number::Float(v as f64 + w as f64),
			},
			(v, w) => Number::Float(v.to_float() + w.to_float()),
		}
	}
}

impl Sum<Self> for Number {
	fn sum<I>(iter: I) -> Number
	where
		I: Iterator<Item = Self>,
	{
		iter.fold(Number::Int(0), |a, b| a + b)
	}
}

#[cfg(test)]
mod tests {
	use std::collections::hash_map::DefaultHasher;
	use std::hash::{Hash, Hasher};

	use super::*;

	fn hash_of(n: Number) -> u64 {
		let mut h = DefaultHasher::new();
		n.hash(&mut h);
		h.finish()
	}

	#[test]
	fn int_and_float_compare_equal() {
		assert_eq!(Number::Int(1), Number::Float(1.0));
		assert!(Number::Int(2) < Number::Float(2.5));
		assert!(Number::Float(-0.5) < Number::Int(0));
		assert_eq!(hash_of(Number::Int(7)), hash_of(Number::Float(7.0)));
	}

	#[test]
	fn usize_conversion_clamps() {
		assert_eq!(Number::Int(-10).to_usize(), 0);
		assert_eq!(Number::Float(5.9).to_usize(), 5);
		assert_eq!(Number::Float(f64::NAN).to_usize(), 0);
		assert_eq!(Number::Int(100).to_usize(), 100);
	}

	#[test]
	fn sum_overflows_into_float() {
		let total: Number = vec![Number::Int(i64::MAX), Number::Int(1)].into_iter().sum();
		assert!(total.is_float());
		let total: Number = vec![Number::Int(1), Number::Float(0.5)].into_iter().sum();
		assert_eq!(total, Number::Float(1.5));
	}
}

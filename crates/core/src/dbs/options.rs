use crate::cnf::MAX_COMPUTATION_DEPTH;
use crate::err::Error;

/// An Options is passed around when processing a set of query
/// statements.
///
/// An Options contains specific information for how to process each
/// particular statement, including the record version to retrieve, and how
/// much deeper nested expressions and subqueries may recurse.
#[derive(Clone, Copy, Debug)]
pub struct Options {
	/// Approximately how large is the current call stack?
	dive: u32,
	/// The data version as nanosecond timestamp
	pub(crate) version: Option<u64>,
}

impl Default for Options {
	fn default() -> Self {
		Options::new()
	}
}

impl Options {
	/// Create a new Options object
	pub fn new() -> Options {
		Options {
			dive: *MAX_COMPUTATION_DEPTH,
			version: None,
		}
	}

	// --------------------------------------------------

	/// Set the maximum depth a computation can reach.
	pub fn with_max_computation_depth(mut self, depth: u32) -> Self {
		self.dive = depth;
		self
	}

	/// Set the data version to read records at
	pub fn with_version(mut self, version: Option<u64>) -> Self {
		self.version = version;
		self
	}

	// --------------------------------------------------

	/// Create a new Options object for a function/subquery/etc.
	///
	/// The parameter is the approximate cost of the operation (more concretely, the size of the
	/// stack frame it uses relative to a simple function call). When in doubt, use a value of 1.
	pub(crate) fn dive(&self, cost: u8) -> Result<Self, Error> {
		if self.dive < cost as u32 {
			return Err(Error::ComputationDepthExceeded);
		}
		Ok(Self {
			dive: self.dive - cost as u32,
			..*self
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn dive_exhausts_depth() {
		let opt = Options::new().with_max_computation_depth(2);
		let opt = opt.dive(1).unwrap();
		let opt = opt.dive(1).unwrap();
		assert!(matches!(opt.dive(1), Err(Error::ComputationDepthExceeded)));
	}

	#[test]
	fn dive_keeps_version() {
		let opt = Options::new().with_version(Some(42));
		assert_eq!(opt.dive(4).unwrap().version, Some(42));
	}
}

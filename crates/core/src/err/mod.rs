use core::fmt;

use serde::Serialize;
use thiserror::Error;

/// An error originating from the strata query engine.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
	/// The database encountered unreachable logic
	#[error("The database encountered unreachable logic: {0}")]
	Unreachable(String),

	/// There was a problem with the underlying datastore
	#[error("There was a problem with the underlying datastore: {0}")]
	Ds(String),

	/// There was a problem with a datastore transaction
	#[error("There was a problem with a datastore transaction: {0}")]
	Tx(String),

	/// The query did not execute, because an earlier statement failed fatally
	#[error("The query was not executed due to a failed transaction")]
	QueryNotExecuted,

	/// It is not possible to set a variable with the specified name
	#[error("'{name}' is a protected variable and cannot be set")]
	InvalidParam {
		name: String,
	},

	/// The specified parameter has not been bound in this context
	#[error("The parameter '${name}' has not been defined")]
	ParamNotFound {
		name: String,
	},

	/// The LIMIT clause must evaluate to a number
	#[error("Found '{value}' but LIMIT expression must be a number")]
	InvalidLimit {
		value: String,
	},

	/// The START clause must evaluate to a number
	#[error("Found '{value}' but START expression must be a number")]
	InvalidStart {
		value: String,
	},

	/// The VERSION clause must evaluate to a date or a time
	#[error("Found '{value}' but VERSION expression must be a date or time")]
	InvalidVersion {
		value: String,
	},

	/// The collation locale in an ORDER BY clause is not supported
	#[error("Found '{locale}' in ORDER BY clause, but the collation locale is not supported")]
	InvalidCollation {
		locale: String,
	},

	/// There was a problem running the specified function
	#[error("There was a problem running the {name}() function. {message}")]
	InvalidFunction {
		name: String,
		message: String,
	},

	/// The wrong quantity or magnitude of arguments was given for the specified
	/// function
	#[error("Incorrect arguments for function {name}(). {message}")]
	InvalidArguments {
		name: String,
		message: String,
	},

	/// Reached excessive computation depth due to functions or subqueries
	#[error("Reached excessive computation depth due to functions or subqueries")]
	ComputationDepthExceeded,

	/// Can not execute statement using the specified value
	#[error("Can not execute statement using value: {value}")]
	InvalidStatementTarget {
		value: String,
	},

	/// A subquery used as a statement target did not select record identities
	#[error("Found {value} as a statement target, but a subquery target must select `*` or `id`")]
	InvalidSubqueryTarget {
		value: String,
	},

	/// A subquery used in a comparison produced more than one row
	#[error("Expected a single result output from a subquery used as a value, but found {found}")]
	SingleOnlyOutput {
		found: usize,
	},

	/// The value can not be converted into the expected type
	#[error("Expected a {into} but found {value}")]
	ConvertTo {
		into: String,
		value: String,
	},
}

impl Error {
	#[track_caller]
	pub fn unreachable<T: fmt::Display>(message: T) -> Error {
		let location = std::panic::Location::caller();
		let message = format!("{}:{}: {}", location.file(), location.line(), message);
		Error::Unreachable(message)
	}

	/// Check if this error is raised by the storage layer, and so must abort
	/// every remaining statement in a batch.
	pub fn is_fatal(&self) -> bool {
		matches!(self, Error::Ds(_) | Error::Tx(_))
	}
}

impl Serialize for Error {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		serializer.serialize_str(self.to_string().as_str())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn pagination_messages_name_the_clause() {
		let e = Error::InvalidLimit {
			value: "test".to_owned(),
		};
		assert_eq!(e.to_string(), "Found 'test' but LIMIT expression must be a number");
		let e = Error::InvalidStart {
			value: "test".to_owned(),
		};
		assert_eq!(e.to_string(), "Found 'test' but START expression must be a number");
	}

	#[test]
	fn storage_errors_are_fatal() {
		assert!(Error::Ds("disk".to_owned()).is_fatal());
		assert!(Error::Tx("conflict".to_owned()).is_fatal());
		assert!(!Error::ComputationDepthExceeded.is_fatal());
	}

	#[test]
	fn serializes_as_message() {
		let e = Error::InvalidVersion {
			value: "test".to_owned(),
		};
		let out = serde_json::to_string(&e).unwrap();
		assert_eq!(out, "\"Found 'test' but VERSION expression must be a date or time\"");
	}
}

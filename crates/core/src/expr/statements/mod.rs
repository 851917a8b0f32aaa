use std::fmt;

use serde::{Deserialize, Serialize};

pub(crate) mod select;
pub(crate) mod set;

pub use self::select::SelectStatement;
pub use self::set::SetStatement;

/// A statement in a batch executed by the datastore.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Statement {
	Select(SelectStatement),
	Set(SetStatement),
}

impl From<SelectStatement> for Statement {
	fn from(v: SelectStatement) -> Self {
		Statement::Select(v)
	}
}

impl From<SetStatement> for Statement {
	fn from(v: SetStatement) -> Self {
		Statement::Set(v)
	}
}

impl fmt::Display for Statement {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Statement::Select(v) => write!(f, "{v}"),
			Statement::Set(v) => write!(f, "{v}"),
		}
	}
}

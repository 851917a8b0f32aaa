use std::fmt;

use anyhow::{Result, bail};
use reblessive::tree::Stk;
use serde::{Deserialize, Serialize};

use crate::cnf::PROTECTED_PARAM_NAMES;
use crate::ctx::Context;
use crate::dbs::Options;
use crate::doc::CursorDoc;
use crate::err::Error;
use crate::expr::Expr;
use crate::val::Value;

/// A `LET $name = expr` statement, binding a value for the statements which
/// follow it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SetStatement {
	pub name: String,
	pub what: Expr,
}

impl SetStatement {
	pub fn new(name: impl Into<String>, what: Expr) -> Self {
		Self {
			name: name.into(),
			what,
		}
	}

	/// Process this type returning a computed simple Value
	pub(crate) async fn compute(
		&self,
		stk: &mut Stk,
		ctx: &Context,
		opt: &Options,
		doc: Option<&CursorDoc>,
	) -> Result<Value> {
		// Check if the variable is a protected variable
		if PROTECTED_PARAM_NAMES.contains(&self.name.as_str()) {
			// The user tried to set a protected variable
			bail!(Error::InvalidParam {
				name: self.name.clone(),
			});
		}
		stk.run(|stk| self.what.compute(stk, ctx, opt, doc)).await
	}
}

impl fmt::Display for SetStatement {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "LET ${} = {}", self.name, self.what)
	}
}

use std::fmt;

use anyhow::Result;
use reblessive::tree::Stk;
use serde::{Deserialize, Serialize};

use crate::ctx::Context;
use crate::dbs::Options;
use crate::doc::CursorDoc;
use crate::expr::{Expr, Idiom};
use crate::fmt::Fmt;
use crate::fnc;
use crate::val::Value;

/// A call to a builtin function, such as `count()` or `string::len(name)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
	pub name: String,
	#[serde(default)]
	pub args: Vec<Expr>,
}

impl FunctionCall {
	pub fn new(name: impl Into<String>, args: Vec<Expr>) -> Self {
		Self {
			name: name.into(),
			args,
		}
	}

	/// Check if this function aggregates over a group of records
	pub fn is_aggregate(&self) -> bool {
		fnc::is_aggregate(&self.name)
	}

	/// The field name used for this call when it is projected without an alias
	pub(crate) fn to_idiom(&self) -> Idiom {
		Idiom::field(self.name.clone())
	}

	/// Process this type returning a computed simple Value
	pub(crate) async fn compute(
		&self,
		stk: &mut Stk,
		ctx: &Context,
		opt: &Options,
		doc: Option<&CursorDoc>,
	) -> Result<Value> {
		let mut args = Vec::with_capacity(self.args.len());
		for a in self.args.iter() {
			args.push(stk.run(|stk| a.compute(stk, ctx, opt, doc)).await?);
		}
		fnc::run(&self.name, args)
	}
}

impl fmt::Display for FunctionCall {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}({})", self.name, Fmt::comma_separated(&self.args))
	}
}

use std::fmt;

use anyhow::Result;
use reblessive::tree::Stk;
use serde::{Deserialize, Serialize};

use crate::ctx::Context;
use crate::dbs::Options;
use crate::doc::CursorDoc;
use crate::err::Error;
use crate::expr::Expr;
use crate::val::Value;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Limit(pub Expr);

impl Limit {
	/// Computes the maximum number of rows to return. A negative limit
	/// does not cap the output.
	pub(crate) async fn process(
		&self,
		stk: &mut Stk,
		ctx: &Context,
		opt: &Options,
		doc: Option<&CursorDoc>,
	) -> Result<Option<usize>> {
		match stk.run(|stk| self.0.compute(stk, ctx, opt, doc)).await {
			// A negative number places no limit on the output
			Ok(Value::Number(v)) if v.is_negative() => Ok(None),
			// This is a valid limiting number
			Ok(Value::Number(v)) => Ok(Some(v.to_usize())),
			// An invalid value was specified
			Ok(v) => Err(anyhow::Error::new(Error::InvalidLimit {
				value: v.to_raw_string(),
			})),
			// A different error occurred
			Err(e) => Err(e),
		}
	}
}

impl fmt::Display for Limit {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "LIMIT {}", self.0)
	}
}

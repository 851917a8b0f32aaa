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
pub struct Start(pub Expr);

impl Start {
	/// Computes the number of rows to skip. Negative values are clamped to
	/// zero.
	pub(crate) async fn process(
		&self,
		stk: &mut Stk,
		ctx: &Context,
		opt: &Options,
		doc: Option<&CursorDoc>,
	) -> Result<usize> {
		match stk.run(|stk| self.0.compute(stk, ctx, opt, doc)).await {
			// This is a valid starting number
			Ok(Value::Number(v)) => Ok(v.to_usize()),
			// An invalid value was specified
			Ok(v) => Err(anyhow::Error::new(Error::InvalidStart {
				value: v.to_raw_string(),
			})),
			// A different error occurred
			Err(e) => Err(e),
		}
	}
}

impl fmt::Display for Start {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "START {}", self.0)
	}
}

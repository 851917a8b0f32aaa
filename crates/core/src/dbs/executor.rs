use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use reblessive::TreeStack;

use crate::ctx::{Context, MutableContext};
use crate::dbs::response::Response;
use crate::dbs::{Options, TARGET};
use crate::err::Error;
use crate::expr::Statement;
use crate::val::Value;

/// Executes a batch of statements, one after another.
pub(crate) struct Executor {
	/// The context which later statements are run with, holding the
	/// parameters bound by earlier LET statements
	ctx: Context,
	opt: Options,
	/// Set once a statement has failed fatally
	failed: bool,
}

impl Executor {
	pub(crate) fn new(ctx: Context, opt: Options) -> Self {
		Executor {
			ctx,
			opt,
			failed: false,
		}
	}

	/// Runs a single statement. Every statement starts with no snapshot
	/// version, and so reads the then-current state of the store unless it
	/// has a VERSION clause.
	async fn execute_stmt(&mut self, stack: &mut TreeStack, stm: &Statement) -> Result<Value> {
		let ctx = &self.ctx;
		let opt = &self.opt;
		match stm {
			Statement::Select(stm) => {
				stack.enter(|stk| stm.compute(stk, ctx, opt, None)).finish().await
			}
			Statement::Set(stm) => {
				let res = stack.enter(|stk| stm.compute(stk, ctx, opt, None)).finish().await?;
				// Bind the value for the statements which follow
				let mut ctx = MutableContext::new(&self.ctx);
				ctx.add_value(stm.name.clone(), Arc::new(res));
				self.ctx = ctx.freeze();
				Ok(Value::None)
			}
		}
	}

	pub(crate) async fn execute(mut self, qry: Vec<Statement>) -> Vec<Response> {
		let mut stack = TreeStack::new();
		let mut out = Vec::with_capacity(qry.len());
		// Process all statements in query
		for (index, stm) in qry.iter().enumerate() {
			// Skip every statement after a fatal error
			if self.failed {
				out.push(Response {
					index,
					time: Duration::ZERO,
					result: Err(anyhow::Error::new(Error::QueryNotExecuted)),
				});
				continue;
			}
			// Log the statement
			debug!(target: TARGET, "Executing: {stm}");
			// Get the statement start time
			let now = Instant::now();
			// Process a single statement
			let res = self.execute_stmt(&mut stack, stm).await;
			// Check for errors which abort the batch
			if let Err(e) = &res {
				if e.downcast_ref::<Error>().is_some_and(Error::is_fatal) {
					warn!(target: TARGET, "Aborting the query batch: {e}");
					self.failed = true;
				} else {
					debug!(target: TARGET, "Statement {index} failed: {e}");
				}
			}
			// Produce the response
			out.push(Response {
				index,
				time: now.elapsed(),
				result: res,
			});
		}
		out
	}
}

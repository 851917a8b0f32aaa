use std::fmt;
use std::sync::Arc;

use anyhow::Result;

use crate::cnf::MAX_COMPUTATION_DEPTH;
use crate::ctx::MutableContext;
use crate::dbs::{Executor, Options, Response, Variables};
use crate::expr::Statement;
use crate::kvs::Transactable;

const TARGET: &str = "strata::core::kvs::ds";

/// The query entrypoint, executing batches of statements against a
/// versioned store.
pub struct Datastore {
	/// The store which records are read from
	store: Arc<dyn Transactable>,
	/// The maximum depth of nested expressions and subqueries
	depth: u32,
}

impl fmt::Debug for Datastore {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.debug_struct("Datastore").field("store", &self.store.kind()).finish()
	}
}

impl Datastore {
	/// Create a new datastore reading from the given store
	///
	/// ```rust
	/// use std::sync::Arc;
	/// use strata_core::kvs::{Datastore, mem};
	///
	/// let ds = Datastore::new(Arc::new(mem::Datastore::new()));
	/// ```
	pub fn new(store: Arc<dyn Transactable>) -> Self {
		Self {
			store,
			depth: *MAX_COMPUTATION_DEPTH,
		}
	}

	/// Set the maximum depth of nested expressions and subqueries
	pub fn with_max_computation_depth(mut self, depth: u32) -> Self {
		self.depth = depth;
		self
	}

	/// Execute a batch of statements, with a set of bound parameters.
	///
	/// Every statement produces a [`Response`]. A statement which fails does
	/// not prevent later statements from running, unless the failure came
	/// from the store itself, in which case every later statement is
	/// skipped.
	#[instrument(level = "debug", target = "strata::core::kvs::ds", skip_all)]
	pub async fn execute(&self, stmts: Vec<Statement>, vars: Variables) -> Result<Vec<Response>> {
		trace!(target: TARGET, "Executing {} statements with {} variables", stmts.len(), vars.len());
		// Create a new query context
		let mut ctx = MutableContext::background();
		// Attach the store to the context
		ctx.set_transaction(self.store.clone());
		// Add the query variables
		ctx.attach_variables(vars)?;
		// Setup the query options
		let opt = Options::new().with_max_computation_depth(self.depth);
		// Process all statements
		Ok(Executor::new(ctx.freeze(), opt).execute(stmts).await)
	}
}

use std::sync::Arc;

use anyhow::{Result, bail};
use futures::future::try_join_all;
use reblessive::tree::Stk;

use crate::cnf::MAX_CONCURRENT_TASKS;
use crate::ctx::Context;
use crate::dbs::group::GroupCollector;
use crate::dbs::store::MemoryCollector;
use crate::dbs::{Options, TARGET};
use crate::doc::CursorDoc;
use crate::err::Error;
use crate::expr::statements::SelectStatement;
use crate::expr::order::OrderComparator;
use crate::expr::{Expr, Literal, OrderList};
use crate::kvs::Transactable;
use crate::val::{Array, Object, RecordId, Table, Value};

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Iterable {
	/// Any [Value] which does not need to be fetched from
	/// storage. This is a record selected by a `*` subquery
	/// which is used as a statement target.
	Value(Value),
	/// An iterable which needs to fetch the data of a
	/// specific record before processing the document.
	Thing(RecordId),
	/// An iterable which needs to iterate over the records
	/// in a table before processing each document.
	Table(Table),
}

/// Resolves the targets of a SELECT statement, and drives the records
/// through filtering, grouping, ordering, pagination and projection.
#[derive(Default)]
pub(crate) struct Iterator {
	/// Iterator output results
	limit: Option<usize>,
	/// Iterator output start position
	start: usize,
	/// Iterator input values
	entries: Vec<Iterable>,
	/// Literal targets which have already been ingested
	literals: Vec<Iterable>,
}

impl Iterator {
	/// Creates a new iterator
	pub(crate) fn new() -> Self {
		Self::default()
	}

	/// Ingests an iterable for processing
	pub(crate) fn ingest(&mut self, val: Iterable) {
		self.entries.push(val)
	}

	/// Ingests a literal target, unless the same literal was already given
	fn ingest_literal(&mut self, val: Iterable) {
		if !self.literals.contains(&val) {
			self.literals.push(val.clone());
			self.ingest(val);
		}
	}

	/// Prepares a statement target for processing
	pub(crate) async fn prepare(
		&mut self,
		stk: &mut Stk,
		ctx: &Context,
		opt: &Options,
		doc: Option<&CursorDoc>,
		val: &Expr,
	) -> Result<()> {
		match val {
			Expr::Table(v) => self.ingest_literal(Iterable::Table(Table::new(v.clone()))),
			Expr::Literal(Literal::RecordId(v)) => self.ingest_literal(Iterable::Thing(v.clone())),
			Expr::Select(v) => self.prepare_subquery(stk, ctx, opt, doc, v).await?,
			v => {
				let v = stk.run(|stk| v.compute(stk, ctx, opt, doc)).await?;
				self.prepare_value(v)?
			}
		}
		// All ingested ok
		Ok(())
	}

	/// Prepares a computed value for processing
	pub(crate) fn prepare_value(&mut self, val: Value) -> Result<()> {
		// Match the values
		match val {
			Value::Table(v) => self.ingest(Iterable::Table(v)),
			Value::RecordId(v) => self.ingest(Iterable::Thing(v)),
			Value::Object(v) => self.prepare_object(v)?,
			Value::Array(v) => self.prepare_array(v)?,
			v => {
				bail!(Error::InvalidStatementTarget {
					value: v.to_string(),
				})
			}
		};
		// All ingested ok
		Ok(())
	}

	/// Prepares a value for processing
	fn prepare_object(&mut self, v: Object) -> Result<()> {
		// Add the record to the iterator
		match v.rid() {
			// This object has an 'id' field
			Some(v) => self.ingest(Iterable::Thing(v)),
			// This object has no 'id' field
			None => {
				bail!(Error::InvalidStatementTarget {
					value: v.to_string(),
				});
			}
		}
		// All ingested ok
		Ok(())
	}

	/// Prepares a value for processing
	fn prepare_array(&mut self, v: Array) -> Result<()> {
		// Add the records to the iterator
		for v in v {
			self.prepare_value(v)?;
		}
		// All ingested ok
		Ok(())
	}

	/// Prepares a subquery target, which must select whole records or
	/// record ids.
	async fn prepare_subquery(
		&mut self,
		stk: &mut Stk,
		ctx: &Context,
		opt: &Options,
		doc: Option<&CursorDoc>,
		stm: &SelectStatement,
	) -> Result<()> {
		let records = match (stm.expr.is_all_only(), stm.expr.is_id_only()) {
			(true, _) => true,
			(false, true) => false,
			(false, false) => bail!(Error::InvalidSubqueryTarget {
				value: stm.expr.to_string(),
			}),
		};
		let rows = match stk.run(|stk| stm.compute(stk, ctx, opt, doc)).await? {
			Value::Array(v) => v,
			v => Array(vec![v]),
		};
		for row in rows {
			match records {
				// The selected records are used as they are
				true => self.ingest(Iterable::Value(row)),
				// The selected ids are fetched at this statement's version
				false => match row.record() {
					Some(rid) => self.ingest(Iterable::Thing(rid)),
					None => trace!(target: TARGET, "Skipping subquery row without a record id"),
				},
			}
		}
		Ok(())
	}

	/// Computes the START and LIMIT clauses
	pub(crate) async fn setup_limit(
		&mut self,
		stk: &mut Stk,
		ctx: &Context,
		opt: &Options,
		doc: Option<&CursorDoc>,
		stm: &SelectStatement,
	) -> Result<()> {
		if let Some(v) = &stm.start {
			self.start = v.process(stk, ctx, opt, doc).await?;
		}
		if let Some(v) = &stm.limit {
			self.limit = v.process(stk, ctx, opt, doc).await?;
		}
		Ok(())
	}

	/// Process the records and output
	pub(crate) async fn output(
		&mut self,
		stk: &mut Stk,
		ctx: &Context,
		opt: &Options,
		stm: &SelectStatement,
	) -> Result<Value> {
		// Log the statement
		trace!(target: TARGET, statement = %stm, "Iterating statement");
		// Resolve the collations before fetching anything
		let cmp = stm.order.as_ref().map(OrderList::comparator).transpose()?;
		// Fetch the records of every target
		let docs = self.iterate(ctx, opt).await?;
		// Filter the records with the WHERE clause
		let mut rows = Vec::with_capacity(docs.len());
		for doc in docs {
			yield_now!();
			if Self::check(stk, ctx, opt, stm, &doc).await? {
				rows.push(doc);
			}
		}
		// Process any GROUP clause
		let results = match stm.group {
			Some(_) => self.output_group(stk, ctx, opt, stm, cmp.as_ref(), rows).await?,
			None => self.output_records(stk, ctx, opt, stm, cmp.as_ref(), rows).await?,
		};
		Ok(results.into())
	}

	/// Groups the records, then orders and paginates the projected groups
	async fn output_group(
		&self,
		stk: &mut Stk,
		ctx: &Context,
		opt: &Options,
		stm: &SelectStatement,
		cmp: Option<&OrderComparator>,
		rows: Vec<CursorDoc>,
	) -> Result<Vec<Value>> {
		let mut grp = GroupCollector::new(stm);
		for doc in rows {
			grp.push(stk, ctx, opt, doc).await?;
		}
		debug!(target: TARGET, "Collected {} groups", grp.len());
		let mut results = MemoryCollector::default();
		for out in grp.output(stk, ctx, opt).await? {
			let keys = match &stm.order {
				Some(orders) => orders.iter().map(|o| out.pick(&o.value)).collect(),
				None => Vec::new(),
			};
			results.push(keys, out);
		}
		if let Some(cmp) = cmp {
			results.sort(cmp);
		}
		results.start_limit(self.start, self.limit);
		Ok(results.take_vec())
	}

	/// Orders and paginates the records, then projects them
	async fn output_records(
		&self,
		stk: &mut Stk,
		ctx: &Context,
		opt: &Options,
		stm: &SelectStatement,
		cmp: Option<&OrderComparator>,
		rows: Vec<CursorDoc>,
	) -> Result<Vec<Value>> {
		let mut results = MemoryCollector::default();
		for doc in rows {
			let keys = match &stm.order {
				Some(orders) => Self::order_keys(stk, ctx, opt, stm, orders, &doc).await?,
				None => Vec::new(),
			};
			results.push(keys, doc);
		}
		if let Some(cmp) = cmp {
			results.sort(cmp);
		}
		results.start_limit(self.start, self.limit);
		let docs = results.take_vec();
		let mut out = Vec::with_capacity(docs.len());
		for doc in docs {
			yield_now!();
			out.push(stm.expr.compute(stk, ctx, opt, Some(&doc)).await?);
		}
		Ok(out)
	}

	/// Computes the ORDER BY keys of a record. A key which names a field
	/// alias sorts by the aliased expression.
	async fn order_keys(
		stk: &mut Stk,
		ctx: &Context,
		opt: &Options,
		stm: &SelectStatement,
		orders: &OrderList,
		doc: &CursorDoc,
	) -> Result<Vec<Value>> {
		let mut keys = Vec::with_capacity(orders.len());
		for o in orders.iter() {
			let v = match stm.expr.aliased(&o.value) {
				Some(expr) => stk.run(|stk| expr.compute(stk, ctx, opt, Some(doc))).await?,
				None => doc.doc.pick(&o.value),
			};
			keys.push(v);
		}
		Ok(keys)
	}

	/// Checks whether a record matches the WHERE clause. Only a `true`
	/// result retains the record.
	async fn check(
		stk: &mut Stk,
		ctx: &Context,
		opt: &Options,
		stm: &SelectStatement,
		doc: &CursorDoc,
	) -> Result<bool> {
		match &stm.cond {
			Some(cond) => {
				let res = stk.run(|stk| cond.0.compute(stk, ctx, opt, Some(doc))).await?;
				Ok(res.is_true())
			}
			None => Ok(true),
		}
	}

	/// Fetches the records of every target. Independent targets are fetched
	/// concurrently, and reassembled in target order.
	async fn iterate(&mut self, ctx: &Context, opt: &Options) -> Result<Vec<CursorDoc>> {
		let tx = ctx.tx()?;
		let entries = std::mem::take(&mut self.entries);
		let mut out = Vec::new();
		for chunk in entries.chunks((*MAX_CONCURRENT_TASKS).max(1)) {
			let futs = chunk.iter().map(|v| Self::fetch(tx.as_ref(), v, opt.version));
			for docs in try_join_all(futs).await? {
				out.extend(docs);
			}
		}
		trace!(target: TARGET, "Fetched {} records", out.len());
		Ok(out)
	}

	async fn fetch(
		tx: &dyn Transactable,
		val: &Iterable,
		version: Option<u64>,
	) -> Result<Vec<CursorDoc>> {
		match val {
			Iterable::Value(v) => Ok(vec![CursorDoc::from(v.clone())]),
			Iterable::Thing(rid) => match tx.get(rid, version).await? {
				Some(v) => Ok(vec![Self::document(rid.clone(), v)]),
				None => Ok(Vec::new()),
			},
			Iterable::Table(tb) => {
				let res = tx.scan(tb, version).await?;
				Ok(res.into_iter().map(|(rid, v)| Self::document(rid, v)).collect())
			}
		}
	}

	/// Attaches the record id to the fetched fields of a record
	fn document(rid: RecordId, mut val: Value) -> CursorDoc {
		if let Value::Object(obj) = &mut val {
			obj.insert("id".to_owned(), Value::RecordId(rid.clone()));
		}
		CursorDoc::new(Some(Arc::new(rid)), val)
	}
}

use std::fmt;

use anyhow::{Result, bail};
use reblessive::tree::Stk;
use serde::{Deserialize, Serialize};

use crate::ctx::{Context, MutableContext};
use crate::dbs::{Iterator, Options};
use crate::doc::CursorDoc;
use crate::err::Error;
use crate::expr::{Cond, Expr, Fields, Groups, Limit, Order, OrderList, Start};
use crate::fmt::Fmt;
use crate::val::{Datetime, Value};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectStatement {
	/// The foo,bar part in SELECT foo,bar FROM baz.
	pub expr: Fields,
	/// The baz part in SELECT foo,bar FROM baz.
	pub what: Vec<Expr>,
	pub cond: Option<Cond>,
	pub group: Option<Groups>,
	pub order: Option<OrderList>,
	pub limit: Option<Limit>,
	pub start: Option<Start>,
	pub version: Option<Expr>,
}

impl SelectStatement {
	/// Create a new statement selecting the given fields from the given
	/// targets
	pub fn new(expr: Fields, what: Vec<Expr>) -> Self {
		Self {
			expr,
			what,
			..Default::default()
		}
	}

	pub fn with_cond(mut self, cond: Expr) -> Self {
		self.cond = Some(Cond(cond));
		self
	}

	pub fn with_group(mut self, group: Groups) -> Self {
		self.group = Some(group);
		self
	}

	/// Append a key to the ORDER BY clause
	pub fn with_order(mut self, order: Order) -> Self {
		self.order.get_or_insert_with(OrderList::default).0.push(order);
		self
	}

	pub fn with_limit(mut self, limit: Expr) -> Self {
		self.limit = Some(Limit(limit));
		self
	}

	pub fn with_start(mut self, start: Expr) -> Self {
		self.start = Some(Start(start));
		self
	}

	pub fn with_version(mut self, version: Expr) -> Self {
		self.version = Some(version);
		self
	}

	/// Computes the VERSION clause into a version stamp
	async fn version(
		stk: &mut Stk,
		ctx: &Context,
		opt: &Options,
		doc: Option<&CursorDoc>,
		version: &Expr,
	) -> Result<u64> {
		match stk.run(|stk| version.compute(stk, ctx, opt, doc)).await? {
			Value::Datetime(v) => Ok(v.to_version_stamp()),
			Value::Strand(v) => match v.parse::<Datetime>() {
				Ok(v) => Ok(v.to_version_stamp()),
				Err(_) => bail!(Error::InvalidVersion {
					value: v.0,
				}),
			},
			v => bail!(Error::InvalidVersion {
				value: v.to_raw_string(),
			}),
		}
	}

	/// Process this type returning an array of the projected rows
	pub(crate) async fn compute(
		&self,
		stk: &mut Stk,
		ctx: &Context,
		opt: &Options,
		doc: Option<&CursorDoc>,
	) -> Result<Value> {
		let opt = opt.dive(1)?;
		// Capture the snapshot which every read of this statement observes
		let version = match &self.version {
			Some(v) => Some(Self::version(stk, ctx, &opt, doc, v).await?),
			None => opt.version,
		};
		let version = match version {
			Some(v) => v,
			None => ctx.tx()?.version().await?,
		};
		let opt = opt.with_version(Some(version));
		// Expose the calling record as $parent
		let ctx = match doc {
			Some(doc) => {
				let mut ctx = MutableContext::new(ctx);
				ctx.add_value("parent", doc.doc.clone());
				ctx.freeze()
			}
			None => ctx.clone(),
		};
		trace!(target: crate::dbs::TARGET, "Computing statement: {self}");
		// Create a new iterator
		let mut i = Iterator::new();
		// Extract the limits
		i.setup_limit(stk, &ctx, &opt, doc, self).await?;
		// Loop over the select targets
		for w in self.what.iter() {
			i.prepare(stk, &ctx, &opt, doc, w).await?;
		}
		// Process the statement
		i.output(stk, &ctx, &opt, self).await
	}

	/// Process this type as a subquery producing a set of values. A single
	/// projected field is unwrapped, so that each row is that field's value.
	pub(crate) async fn compute_set(
		&self,
		stk: &mut Stk,
		ctx: &Context,
		opt: &Options,
		doc: Option<&CursorDoc>,
	) -> Result<Value> {
		let res = self.compute(stk, ctx, opt, doc).await?;
		match (self.expr.single(), res) {
			(Some(idiom), Value::Array(rows)) => {
				Ok(rows.into_iter().map(|row| row.pick(&idiom)).collect::<Vec<_>>().into())
			}
			(_, res) => Ok(res),
		}
	}

	/// Process this type as a subquery producing a single value. No rows
	/// produce `NONE`, and more than one row is an error.
	pub(crate) async fn compute_scalar(
		&self,
		stk: &mut Stk,
		ctx: &Context,
		opt: &Options,
		doc: Option<&CursorDoc>,
	) -> Result<Value> {
		match self.compute_set(stk, ctx, opt, doc).await? {
			Value::Array(mut rows) => match rows.len() {
				0 => Ok(Value::None),
				1 => Ok(rows.remove(0)),
				found => bail!(Error::SingleOnlyOutput {
					found,
				}),
			},
			v => Ok(v),
		}
	}
}

impl fmt::Display for SelectStatement {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "SELECT {} FROM {}", self.expr, Fmt::comma_separated(&self.what))?;
		if let Some(ref v) = self.cond {
			write!(f, " {v}")?
		}
		if let Some(ref v) = self.group {
			write!(f, " {v}")?
		}
		if let Some(ref v) = self.order {
			write!(f, " {v}")?
		}
		if let Some(ref v) = self.limit {
			write!(f, " {v}")?
		}
		if let Some(ref v) = self.start {
			write!(f, " {v}")?
		}
		if let Some(ref v) = self.version {
			write!(f, " VERSION {v}")?
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::expr::{BinaryOperator, Field};

	#[test]
	fn display() {
		let stm = SelectStatement::new(
			Fields::select([Field::single(Expr::idiom("name")), Field::aliased(Expr::idiom("age"), "years")]),
			vec![Expr::table("person"), Expr::record("person", "tobie")],
		)
		.with_cond(Expr::binary(Expr::idiom("age"), BinaryOperator::MoreThan, Expr::literal(18)))
		.with_order(Order::desc("age"))
		.with_limit(Expr::literal(5))
		.with_start(Expr::param("start"));
		assert_eq!(
			stm.to_string(),
			"SELECT name, age AS years FROM person, person:tobie WHERE age > 18 ORDER BY age DESC LIMIT 5 START $start"
		);
	}
}

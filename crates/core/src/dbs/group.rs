use anyhow::Result;
use indexmap::IndexMap;
use reblessive::tree::Stk;

use crate::ctx::Context;
use crate::dbs::Options;
use crate::doc::CursorDoc;
use crate::expr::statements::SelectStatement;
use crate::expr::{Expr, Field, Fields, FunctionCall, Literal, ObjectEntry};
use crate::fnc;
use crate::val::Value;

/// The accumulated state of a single group.
struct Group {
	/// The first record which was placed in this group
	doc: CursorDoc,
	/// The number of records in this group
	count: usize,
	/// The computed arguments of every aggregate, for every record, as
	/// `args[aggregate][argument][record]`
	args: Vec<Vec<Vec<Value>>>,
}

/// A collector for statements which have a group by clause.
///
/// Aggregate function calls are pulled out of the selectors and replaced
/// with [`Expr::Aggregate`] placeholders. As records are pushed, the
/// arguments of every aggregate are computed and accumulated per group.
/// Once all records are collected, the aggregates are computed, attached
/// to the first record of each group, and the rewritten selectors are
/// computed against it. The record fields themselves are never modified.
pub(crate) struct GroupCollector {
	/// The aggregate calls found within the selectors
	aggregates: Vec<FunctionCall>,
	/// The rewritten selectors which construct the final value
	fields: Fields,
	/// The expressions which define the group of a record
	groups: Vec<Expr>,
	/// The groups, in the order in which they were first seen
	results: IndexMap<Vec<Value>, Group>,
}

impl GroupCollector {
	pub(crate) fn new(stm: &SelectStatement) -> Self {
		// A group which names a field alias groups by the aliased expression
		let groups = stm
			.group
			.iter()
			.flat_map(|g| g.iter())
			.map(|g| match stm.expr.aliased(&g.0) {
				Some(expr) => expr.clone(),
				None => Expr::Idiom(g.0.clone()),
			})
			.collect();
		// Pull the aggregate calls out of the selectors
		let mut aggregates = Vec::new();
		let mut rewrite = |field: &Field| match field {
			Field::All => Field::All,
			Field::Single {
				expr,
				alias,
			} => Field::Single {
				alias: Some(alias.clone().unwrap_or_else(|| expr.to_idiom())),
				expr: extract_aggregates(expr, &mut aggregates),
			},
		};
		let fields = match &stm.expr {
			Fields::Value(f) => Fields::Value(Box::new(rewrite(f))),
			Fields::Select(f) => Fields::Select(f.iter().map(&mut rewrite).collect()),
		};
		Self {
			aggregates,
			fields,
			groups,
			results: IndexMap::new(),
		}
	}

	pub(crate) fn len(&self) -> usize {
		self.results.len()
	}

	pub(crate) async fn push(
		&mut self,
		stk: &mut Stk,
		ctx: &Context,
		opt: &Options,
		doc: CursorDoc,
	) -> Result<()> {
		// Compute the group expressions
		let mut key = Vec::with_capacity(self.groups.len());
		for g in self.groups.iter() {
			key.push(stk.run(|stk| g.compute(stk, ctx, opt, Some(&doc))).await?);
		}
		// Compute the aggregate arguments
		let mut args = Vec::with_capacity(self.aggregates.len());
		for a in self.aggregates.iter() {
			let mut vals = Vec::with_capacity(a.args.len());
			for e in a.args.iter() {
				vals.push(stk.run(|stk| e.compute(stk, ctx, opt, Some(&doc))).await?);
			}
			args.push(vals);
		}
		// Accumulate into the group
		let aggregates = &self.aggregates;
		let group = self.results.entry(key).or_insert_with(|| Group {
			doc,
			count: 0,
			args: aggregates.iter().map(|a| vec![Vec::new(); a.args.len()]).collect(),
		});
		group.count += 1;
		for (acc, vals) in group.args.iter_mut().zip(args) {
			for (acc, v) in acc.iter_mut().zip(vals) {
				acc.push(v);
			}
		}
		Ok(())
	}

	pub(crate) async fn output(
		self,
		stk: &mut Stk,
		ctx: &Context,
		opt: &Options,
	) -> Result<Vec<Value>> {
		let mut results = Vec::with_capacity(self.results.len());
		for (_, group) in self.results {
			// Compute the aggregates of this group
			let mut vals = Vec::with_capacity(self.aggregates.len());
			for (agg, args) in self.aggregates.iter().zip(group.args) {
				vals.push(match args.is_empty() && agg.name == "count" {
					true => Value::from(group.count),
					false => fnc::run(&agg.name, args.into_iter().map(Value::from).collect())?,
				});
			}
			let doc = group.doc.with_aggregates(vals);
			// Compute the selectors against the first record
			let out = self.fields.compute(stk, ctx, opt, Some(&doc)).await?;
			yield_now!();
			results.push(out);
		}
		Ok(results)
	}
}

/// Replaces every aggregate call within an expression with a field, into
/// which the computed aggregate is later injected.
fn extract_aggregates(expr: &Expr, aggregates: &mut Vec<FunctionCall>) -> Expr {
	match expr {
		Expr::FunctionCall(f) if f.is_aggregate() => {
			aggregates.push(f.as_ref().clone());
			Expr::Aggregate(aggregates.len() - 1)
		}
		Expr::FunctionCall(f) => {
			let args = f.args.iter().map(|e| extract_aggregates(e, aggregates)).collect();
			Expr::call(f.name.clone(), args)
		}
		Expr::Prefix {
			op,
			expr,
		} => Expr::prefix(*op, extract_aggregates(expr, aggregates)),
		Expr::Postfix {
			expr,
			op,
		} => Expr::postfix(extract_aggregates(expr, aggregates), *op),
		Expr::Binary {
			left,
			op,
			right,
		} => {
			let left = extract_aggregates(left, aggregates);
			Expr::binary(left, *op, extract_aggregates(right, aggregates))
		}
		Expr::Literal(Literal::Array(v)) => {
			let v = v.iter().map(|e| extract_aggregates(e, aggregates)).collect();
			Expr::Literal(Literal::Array(v))
		}
		Expr::Literal(Literal::Object(v)) => {
			let v = v
				.iter()
				.map(|e| ObjectEntry {
					key: e.key.clone(),
					value: extract_aggregates(&e.value, aggregates),
				})
				.collect();
			Expr::Literal(Literal::Object(v))
		}
		x => x.clone(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::expr::{BinaryOperator, Groups};

	#[test]
	fn aggregates_are_extracted() {
		let stm = SelectStatement::new(
			Fields::select([
				Field::single(Expr::idiom("age")),
				Field::single(Expr::call("count", vec![])),
				Field::aliased(
					Expr::binary(
						Expr::call("math::sum", vec![Expr::idiom("score")]),
						BinaryOperator::MoreThan,
						Expr::literal(10),
					),
					"high",
				),
			]),
			vec![Expr::table("person")],
		)
		.with_group(Groups::by(["age"]));
		let collector = GroupCollector::new(&stm);
		assert_eq!(collector.aggregates.len(), 2);
		assert_eq!(collector.aggregates[0].name, "count");
		assert_eq!(collector.aggregates[1].name, "math::sum");
		assert_eq!(
			collector.fields.to_string(),
			"age AS age, _a0 AS count, _a1 > 10 AS high"
		);
		assert_eq!(collector.len(), 0);
	}

	#[test]
	fn group_alias_uses_projected_expression() {
		let len = Expr::call("string::len", vec![Expr::idiom("name")]);
		let stm = SelectStatement::new(
			Fields::select([Field::aliased(len.clone(), "size")]),
			vec![Expr::table("person")],
		)
		.with_group(Groups::by(["size"]));
		let collector = GroupCollector::new(&stm);
		assert_eq!(collector.groups, vec![len]);
	}
}

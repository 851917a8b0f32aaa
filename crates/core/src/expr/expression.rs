use std::fmt;

use anyhow::Result;
use reblessive::tree::Stk;
use serde::{Deserialize, Serialize};

use crate::ctx::Context;
use crate::dbs::Options;
use crate::doc::CursorDoc;
use crate::expr::statements::SelectStatement;
use crate::expr::{
	BinaryOperator, FunctionCall, Idiom, Literal, ObjectEntry, Param, PostfixOperator,
	PrefixOperator,
};
use crate::fnc;
use crate::val::{Number, RecordId, RecordIdKey, Table, Value};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Expr {
	Literal(Literal),
	Param(Param),
	Idiom(Idiom),
	Table(String),
	Prefix {
		op: PrefixOperator,
		expr: Box<Expr>,
	},
	Postfix {
		expr: Box<Expr>,
		op: PostfixOperator,
	},
	Binary {
		left: Box<Expr>,
		op: BinaryOperator,
		right: Box<Expr>,
	},
	FunctionCall(Box<FunctionCall>),
	Select(Box<SelectStatement>),
	/// The value of an aggregate computed over a group of records. Grouped
	/// projections are rewritten to use this in place of aggregate calls.
	#[doc(hidden)]
	#[serde(skip)]
	Aggregate(usize),
}

impl Expr {
	/// A literal expression of the given value
	pub fn literal(v: impl Into<Value>) -> Self {
		match v.into() {
			Value::None => Expr::Literal(Literal::None),
			Value::Null => Expr::Literal(Literal::Null),
			Value::Bool(x) => Expr::Literal(Literal::Bool(x)),
			Value::Number(Number::Int(x)) => Expr::Literal(Literal::Integer(x)),
			Value::Number(Number::Float(x)) => Expr::Literal(Literal::Float(x)),
			Value::Strand(x) => Expr::Literal(Literal::String(x.0)),
			Value::Datetime(x) => Expr::Literal(Literal::Datetime(x)),
			Value::RecordId(x) => Expr::Literal(Literal::RecordId(x)),
			Value::Table(x) => Expr::Table(x.into_string()),
			Value::Array(x) => Expr::Literal(Literal::Array(x.into_iter().map(Expr::literal).collect())),
			Value::Object(x) => Expr::Literal(Literal::Object(
				x.into_iter()
					.map(|(key, v)| ObjectEntry {
						key,
						value: Expr::literal(v),
					})
					.collect(),
			)),
		}
	}

	/// A field path of the current record, such as `name.first`
	pub fn idiom(path: impl Into<Idiom>) -> Self {
		Expr::Idiom(path.into())
	}

	/// A bound parameter, named without the leading `$`
	pub fn param(name: impl Into<String>) -> Self {
		Expr::Param(Param::new(name))
	}

	/// A table name
	pub fn table(name: impl Into<String>) -> Self {
		Expr::Table(name.into())
	}

	/// A record id literal
	pub fn record(table: impl Into<String>, key: impl Into<RecordIdKey>) -> Self {
		Expr::Literal(Literal::RecordId(RecordId::new(table, key)))
	}

	pub fn prefix(op: PrefixOperator, expr: Expr) -> Self {
		Expr::Prefix {
			op,
			expr: Box::new(expr),
		}
	}

	pub fn postfix(expr: Expr, op: PostfixOperator) -> Self {
		Expr::Postfix {
			expr: Box::new(expr),
			op,
		}
	}

	pub fn binary(left: Expr, op: BinaryOperator, right: Expr) -> Self {
		Expr::Binary {
			left: Box::new(left),
			op,
			right: Box::new(right),
		}
	}

	/// A call to a builtin function
	pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Self {
		Expr::FunctionCall(Box::new(FunctionCall::new(name, args)))
	}

	/// A nested SELECT statement
	pub fn select(stmt: SelectStatement) -> Self {
		Expr::Select(Box::new(stmt))
	}

	/// Builds an unparenthesized chain of binary operations, such as
	/// `a OR b AND c`, where AND binds tighter than OR and operators of the
	/// same binding power associate to the left.
	pub fn chain(first: Expr, rest: Vec<(BinaryOperator, Expr)>) -> Self {
		fn reduce(operands: &mut Vec<Expr>, op: BinaryOperator) {
			if let (Some(right), Some(left)) = (operands.pop(), operands.pop()) {
				operands.push(Expr::binary(left, op, right));
			}
		}
		let mut operands = vec![first];
		let mut operators: Vec<BinaryOperator> = Vec::new();
		for (op, expr) in rest {
			while let Some(top) = operators.last().copied() {
				if top.binding_power() < op.binding_power() {
					break;
				}
				operators.pop();
				reduce(&mut operands, top);
			}
			operators.push(op);
			operands.push(expr);
		}
		while let Some(op) = operators.pop() {
			reduce(&mut operands, op);
		}
		operands.pop().unwrap_or(Expr::Literal(Literal::None))
	}

	/// The field name used for this expression when it is projected
	/// without an alias
	pub(crate) fn to_idiom(&self) -> Idiom {
		match self {
			Expr::Idiom(i) => i.clone(),
			Expr::Param(p) => Idiom::field(p.to_string()),
			Expr::FunctionCall(f) => f.to_idiom(),
			x => Idiom::field(x.to_string()),
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
		let opt = opt.dive(1)?;

		match self {
			Expr::Literal(literal) => literal.compute(stk, ctx, &opt, doc).await,
			Expr::Param(param) => param.compute(ctx, doc),
			Expr::Idiom(idiom) => Ok(idiom.compute(doc)),
			Expr::Table(ident) => Ok(Value::Table(Table::new(ident.clone()))),
			Expr::Prefix {
				op,
				expr,
			} => Self::compute_prefix(stk, ctx, &opt, doc, op, expr).await,
			Expr::Postfix {
				expr,
				op,
			} => Self::compute_postfix(stk, ctx, &opt, doc, expr, op).await,
			Expr::Binary {
				left,
				op,
				right,
			} => Self::compute_binary(stk, ctx, &opt, doc, left, op, right).await,
			Expr::FunctionCall(function_call) => function_call.compute(stk, ctx, &opt, doc).await,
			Expr::Select(select_statement) => {
				select_statement.compute_set(stk, ctx, &opt, doc).await
			}
			Expr::Aggregate(idx) => {
				Ok(doc.and_then(|d| d.aggregates.get(*idx)).cloned().unwrap_or_default())
			}
		}
	}

	async fn compute_prefix(
		stk: &mut Stk,
		ctx: &Context,
		opt: &Options,
		doc: Option<&CursorDoc>,
		op: &PrefixOperator,
		expr: &Expr,
	) -> Result<Value> {
		let res = stk.run(|stk| expr.compute(stk, ctx, opt, doc)).await?;

		match op {
			PrefixOperator::Not => fnc::operate::not(res),
			PrefixOperator::Negate => fnc::operate::neg(res),
		}
	}

	async fn compute_postfix(
		stk: &mut Stk,
		ctx: &Context,
		opt: &Options,
		doc: Option<&CursorDoc>,
		expr: &Expr,
		op: &PostfixOperator,
	) -> Result<Value> {
		let res = stk.run(|stk| expr.compute(stk, ctx, opt, doc)).await?;
		let res = match op {
			PostfixOperator::IsNull => res.is_null(),
			PostfixOperator::IsNotNull => !res.is_null(),
			PostfixOperator::IsVoid => res.is_none(),
			PostfixOperator::IsNotVoid => !res.is_none(),
			PostfixOperator::IsEmpty => res.is_nullish(),
			PostfixOperator::IsNotEmpty => !res.is_nullish(),
		};
		Ok(Value::Bool(res))
	}

	/// Computes one side of a binary operation. A subquery compared against
	/// a single value is reduced to its single output value.
	async fn compute_operand(
		stk: &mut Stk,
		ctx: &Context,
		opt: &Options,
		doc: Option<&CursorDoc>,
		op: &BinaryOperator,
		expr: &Expr,
	) -> Result<Value> {
		match expr {
			Expr::Select(stm) if op.is_comparison() => {
				stk.run(|stk| stm.compute_scalar(stk, ctx, opt, doc)).await
			}
			expr => stk.run(|stk| expr.compute(stk, ctx, opt, doc)).await,
		}
	}

	async fn compute_binary(
		stk: &mut Stk,
		ctx: &Context,
		opt: &Options,
		doc: Option<&CursorDoc>,
		left: &Expr,
		op: &BinaryOperator,
		right: &Expr,
	) -> Result<Value> {
		let left = Self::compute_operand(stk, ctx, opt, doc, op, left).await?;

		match op {
			BinaryOperator::Or => {
				if left.is_truthy() {
					return Ok(left);
				}
				return stk.run(|stk| right.compute(stk, ctx, opt, doc)).await;
			}
			BinaryOperator::And => {
				if !left.is_truthy() {
					return Ok(left);
				}
				return stk.run(|stk| right.compute(stk, ctx, opt, doc)).await;
			}
			_ => (),
		}

		let right = Self::compute_operand(stk, ctx, opt, doc, op, right).await?;

		match op {
			BinaryOperator::Equal => fnc::operate::equal(&left, &right),
			BinaryOperator::NotEqual => fnc::operate::not_equal(&left, &right),
			BinaryOperator::LessThan => fnc::operate::less_than(&left, &right),
			BinaryOperator::LessThanEqual => fnc::operate::less_than_or_equal(&left, &right),
			BinaryOperator::MoreThan => fnc::operate::more_than(&left, &right),
			BinaryOperator::MoreThanEqual => fnc::operate::more_than_or_equal(&left, &right),
			BinaryOperator::Inside => fnc::operate::inside(&left, &right),
			BinaryOperator::NotInside => fnc::operate::not_inside(&left, &right),
			BinaryOperator::Or | BinaryOperator::And => fail!("Unexpected short-circuit operator"),
		}
	}
}

impl fmt::Display for Expr {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		// Nested operations which bind more loosely than their parent are
		// wrapped in parentheses
		fn operand(f: &mut fmt::Formatter, expr: &Expr, parent: &BinaryOperator) -> fmt::Result {
			match expr {
				Expr::Binary {
					op,
					..
				} if op.binding_power() <= parent.binding_power() => write!(f, "({expr})"),
				expr => write!(f, "{expr}"),
			}
		}
		match self {
			Expr::Literal(x) => write!(f, "{x}"),
			Expr::Param(x) => write!(f, "{x}"),
			Expr::Idiom(x) => write!(f, "{x}"),
			Expr::Table(x) => f.write_str(x),
			Expr::Prefix {
				op,
				expr,
			} => match expr.as_ref() {
				Expr::Binary {
					..
				} => write!(f, "{op}({expr})"),
				expr => write!(f, "{op}{expr}"),
			},
			Expr::Postfix {
				expr,
				op,
			} => match expr.as_ref() {
				Expr::Binary {
					..
				} => write!(f, "({expr}) {op}"),
				expr => write!(f, "{expr} {op}"),
			},
			Expr::Binary {
				left,
				op,
				right,
			} => {
				operand(f, left, op)?;
				write!(f, " {op} ")?;
				operand(f, right, op)
			}
			Expr::FunctionCall(x) => write!(f, "{x}"),
			Expr::Select(x) => write!(f, "({x})"),
			Expr::Aggregate(x) => write!(f, "_a{x}"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn chain_binds_and_tighter_than_or() {
		// a = 1 OR b = 2 AND c = 3
		let expr = Expr::chain(
			Expr::idiom("a"),
			vec![
				(BinaryOperator::Equal, Expr::literal(1)),
				(BinaryOperator::Or, Expr::idiom("b")),
				(BinaryOperator::Equal, Expr::literal(2)),
				(BinaryOperator::And, Expr::idiom("c")),
				(BinaryOperator::Equal, Expr::literal(3)),
			],
		);
		let expected = Expr::binary(
			Expr::binary(Expr::idiom("a"), BinaryOperator::Equal, Expr::literal(1)),
			BinaryOperator::Or,
			Expr::binary(
				Expr::binary(Expr::idiom("b"), BinaryOperator::Equal, Expr::literal(2)),
				BinaryOperator::And,
				Expr::binary(Expr::idiom("c"), BinaryOperator::Equal, Expr::literal(3)),
			),
		);
		assert_eq!(expr, expected);
		assert_eq!(expr.to_string(), "a = 1 OR b = 2 AND c = 3");
	}

	#[test]
	fn chain_is_left_associative() {
		let expr = Expr::chain(
			Expr::idiom("a"),
			vec![(BinaryOperator::Or, Expr::idiom("b")), (BinaryOperator::Or, Expr::idiom("c"))],
		);
		assert_eq!(expr.to_string(), "(a OR b) OR c");
	}

	#[test]
	fn projected_names() {
		assert_eq!(Expr::idiom("name.first").to_idiom().to_string(), "name.first");
		assert_eq!(Expr::call("count", vec![]).to_idiom().to_string(), "count");
		let expr = Expr::call("string::len", vec![Expr::idiom("name")]);
		assert_eq!(expr.to_string(), "string::len(name)");
	}
}

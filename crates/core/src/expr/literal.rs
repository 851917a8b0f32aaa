use std::fmt;

use anyhow::Result;
use reblessive::tree::Stk;
use serde::{Deserialize, Serialize};

use crate::ctx::Context;
use crate::dbs::Options;
use crate::doc::CursorDoc;
use crate::expr::Expr;
use crate::fmt::Fmt;
use crate::val::{Array, Datetime, Number, Object, RecordId, Strand, Value};

/// A literal value written in a statement. Arrays and objects may contain
/// arbitrary expressions, which are computed with the surrounding record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Literal {
	None,
	Null,
	Bool(bool),
	Integer(i64),
	Float(f64),
	String(String),
	Datetime(Datetime),
	RecordId(RecordId),
	Array(Vec<Expr>),
	Object(Vec<ObjectEntry>),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectEntry {
	pub key: String,
	pub value: Expr,
}

impl Literal {
	/// Process this type returning a computed simple Value
	pub(crate) async fn compute(
		&self,
		stk: &mut Stk,
		ctx: &Context,
		opt: &Options,
		doc: Option<&CursorDoc>,
	) -> Result<Value> {
		let res = match self {
			Literal::None => Value::None,
			Literal::Null => Value::Null,
			Literal::Bool(x) => Value::Bool(*x),
			Literal::Integer(x) => Value::Number(Number::Int(*x)),
			Literal::Float(x) => Value::Number(Number::Float(*x)),
			Literal::String(x) => Value::Strand(Strand::from(x.as_str())),
			Literal::Datetime(x) => Value::Datetime(*x),
			Literal::RecordId(x) => Value::RecordId(x.clone()),
			Literal::Array(exprs) => {
				let mut array = Vec::with_capacity(exprs.len());
				for e in exprs.iter() {
					array.push(stk.run(|stk| e.compute(stk, ctx, opt, doc)).await?);
				}
				Value::Array(Array(array))
			}
			Literal::Object(items) => {
				let mut map = Object::default();
				for i in items.iter() {
					let v = stk.run(|stk| i.value.compute(stk, ctx, opt, doc)).await?;
					map.insert(i.key.clone(), v);
				}
				Value::Object(map)
			}
		};
		Ok(res)
	}
}

impl fmt::Display for Literal {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Literal::None => f.write_str("NONE"),
			Literal::Null => f.write_str("NULL"),
			Literal::Bool(x) => write!(f, "{x}"),
			Literal::Integer(x) => write!(f, "{x}"),
			Literal::Float(x) => write!(f, "{}", Number::Float(*x)),
			Literal::String(x) => write!(f, "{}", Strand::from(x.as_str())),
			Literal::Datetime(x) => write!(f, "{x}"),
			Literal::RecordId(x) => write!(f, "{x}"),
			Literal::Array(x) => write!(f, "[{}]", Fmt::comma_separated(x)),
			Literal::Object(x) => {
				if x.is_empty() {
					return f.write_str("{}");
				}
				f.write_str("{ ")?;
				for (i, entry) in x.iter().enumerate() {
					if i > 0 {
						f.write_str(", ")?;
					}
					write!(f, "{}: {}", entry.key, entry.value)?;
				}
				f.write_str(" }")
			}
		}
	}
}

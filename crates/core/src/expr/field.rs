use std::fmt::{self, Display, Formatter};

use anyhow::Result;
use reblessive::tree::Stk;
use serde::{Deserialize, Serialize};

use crate::ctx::Context;
use crate::dbs::Options;
use crate::doc::CursorDoc;
use crate::expr::{Expr, Idiom};
use crate::fmt::Fmt;
use crate::val::Value;

/// The projection of a SELECT statement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Fields {
	/// Fields had the `VALUE` keyword and so should only contain a single
	/// field.
	Value(Box<Field>),
	/// Normal fields where an object with the selected fields is expected
	Select(Vec<Field>),
}

impl Default for Fields {
	fn default() -> Self {
		Fields::all()
	}
}

impl Fields {
	/// Create a new `*` field projection
	pub fn all() -> Self {
		Fields::Select(vec![Field::All])
	}

	/// Create a projection of the given fields
	pub fn select(fields: impl IntoIterator<Item = Field>) -> Self {
		Fields::Select(fields.into_iter().collect())
	}

	/// Create a `VALUE` projection of a single expression
	pub fn value(expr: Expr) -> Self {
		Fields::Value(Box::new(Field::Single {
			expr,
			alias: None,
		}))
	}

	pub fn iter_fields(&self) -> impl Iterator<Item = &Field> {
		let (value, select) = match self {
			Fields::Value(v) => (Some(v.as_ref()), None),
			Fields::Select(v) => (None, Some(v.iter())),
		};
		value.into_iter().chain(select.into_iter().flatten())
	}

	/// Check if the fields include the `*` field
	pub fn is_all(&self) -> bool {
		self.iter_fields().any(|x| matches!(x, Field::All))
	}

	/// Check if the projection is exactly `*`
	pub fn is_all_only(&self) -> bool {
		matches!(self, Fields::Select(v) if matches!(v.as_slice(), [Field::All]))
	}

	/// Check if the projection selects only the record id
	pub fn is_id_only(&self) -> bool {
		let field = match self {
			Fields::Value(v) => v.as_ref(),
			Fields::Select(v) => match v.as_slice() {
				[v] => v,
				_ => return false,
			},
		};
		matches!(field, Field::Single { expr: Expr::Idiom(i), alias: None } if i.is_id())
	}

	/// The output path of a sole projected field, whose value stands in for
	/// the whole row when a subquery produces a set of values.
	pub(crate) fn single(&self) -> Option<Idiom> {
		match self {
			Fields::Select(v) => match v.as_slice() {
				[f @ Field::Single { .. }] => f.output_idiom(),
				_ => None,
			},
			Fields::Value(_) => None,
		}
	}

	/// Find the expression projected under the given alias
	pub(crate) fn aliased(&self, idiom: &Idiom) -> Option<&Expr> {
		self.iter_fields().find_map(|f| match f {
			Field::Single {
				expr,
				alias: Some(alias),
			} if alias == idiom => Some(expr),
			_ => None,
		})
	}

	/// Projects a record into its output shape
	pub(crate) async fn compute(
		&self,
		stk: &mut Stk,
		ctx: &Context,
		opt: &Options,
		doc: Option<&CursorDoc>,
	) -> Result<Value> {
		// The `*` field emits the whole record with its metadata
		let current = || doc.map(CursorDoc::record).unwrap_or_default();
		match self {
			Fields::Value(field) => match field.as_ref() {
				Field::All => Ok(current()),
				Field::Single {
					expr,
					..
				} => stk.run(|stk| expr.compute(stk, ctx, opt, doc)).await,
			},
			Fields::Select(fields) => {
				let mut out = match self.is_all() {
					true => current(),
					false => Value::empty_object(),
				};
				for field in fields.iter() {
					if let Field::Single {
						expr,
						alias,
					} = field
					{
						let res = stk.run(|stk| expr.compute(stk, ctx, opt, doc)).await?;
						match alias {
							Some(alias) => out.put(alias, res),
							None => out.put(&expr.to_idiom(), res),
						}
					}
				}
				Ok(out)
			}
		}
	}
}

impl Display for Fields {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		match self {
			Fields::Value(v) => write!(f, "VALUE {v}"),
			Fields::Select(v) => Display::fmt(&Fmt::comma_separated(v), f),
		}
	}
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Field {
	/// The `*` in `SELECT * FROM ...`
	All,
	/// The 'rating' in `SELECT rating FROM ...`
	Single {
		expr: Expr,
		/// The `quality` in `SELECT rating AS quality FROM ...`
		#[serde(default)]
		alias: Option<Idiom>,
	},
}

impl Field {
	pub fn single(expr: Expr) -> Self {
		Field::Single {
			expr,
			alias: None,
		}
	}

	pub fn aliased(expr: Expr, alias: impl Into<Idiom>) -> Self {
		Field::Single {
			expr,
			alias: Some(alias.into()),
		}
	}

	/// The path this field is written to in the output
	pub(crate) fn output_idiom(&self) -> Option<Idiom> {
		match self {
			Field::All => None,
			Field::Single {
				alias: Some(alias),
				..
			} => Some(alias.clone()),
			Field::Single {
				expr,
				..
			} => Some(expr.to_idiom()),
		}
	}
}

impl Display for Field {
	fn fmt(&self, f: &mut Formatter) -> fmt::Result {
		match self {
			Self::All => f.write_str("*"),
			Self::Single {
				expr,
				alias,
			} => {
				Display::fmt(expr, f)?;
				if let Some(alias) = alias {
					f.write_str(" AS ")?;
					Display::fmt(alias, f)?;
				}
				Ok(())
			}
		}
	}
}

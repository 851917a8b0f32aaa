use std::fmt;
use std::ops::Deref;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

use crate::ctx::Context;
use crate::doc::CursorDoc;
use crate::err::Error;
use crate::val::Value;

/// A reference to a bound parameter, such as `$limit`.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Param(String);

impl Param {
	/// Create a new parameter reference, without the leading `$`
	pub fn new(name: impl Into<String>) -> Self {
		Self(name.into())
	}
}

impl Deref for Param {
	type Target = str;
	fn deref(&self) -> &Self::Target {
		self.0.as_str()
	}
}

impl Param {
	/// Process this type returning a computed simple Value
	pub(crate) fn compute(&self, ctx: &Context, doc: Option<&CursorDoc>) -> Result<Value> {
		// Find the variable by name
		match self.0.as_str() {
			// This is a special param
			"this" => match doc {
				// The base document exists
				Some(v) => Ok(v.doc.as_ref().clone()),
				// The base document does not exist
				None => Ok(Value::None),
			},
			// This is a normal param, or $parent within a subquery
			v => match ctx.value(v) {
				// The param has been set locally
				Some(v) => Ok(v.clone()),
				// The param has not been set anywhere
				None => bail!(Error::ParamNotFound {
					name: v.to_owned(),
				}),
			},
		}
	}
}

impl fmt::Display for Param {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "${}", self.0)
	}
}

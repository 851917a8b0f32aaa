//! Builtin functions callable from expressions.

use anyhow::{Result, bail};

use crate::err::Error;
use crate::val::Value;

pub mod args;
pub mod array;
pub mod count;
pub mod math;
pub mod operate;
pub mod string;

/// Functions which fold a whole group of records into a single value when
/// they appear in the projection of a grouped SELECT.
const AGGREGATES: &[&str] = &[
	"count",
	"distinct",
	"array::distinct",
	"array::group",
	"math::max",
	"math::mean",
	"math::min",
	"math::sum",
];

/// Returns whether a function aggregates over a group of records.
pub fn is_aggregate(name: &str) -> bool {
	AGGREGATES.contains(&name)
}

macro_rules! dispatch {
	($name:ident, $args:ident, $($function_name:literal => $($function_path:ident)::+,)+) => {
		match $name {
			$($function_name => {
				let args = args::FromArgs::from_args($name, $args)?;
				$($function_path)::+(args)
			},)+
			_ => bail!(Error::InvalidFunction {
				name: String::from($name),
				message: "no such builtin function found".to_string(),
			}),
		}
	};
}

/// Runs a builtin function with already computed arguments.
pub fn run(name: &str, args: Vec<Value>) -> Result<Value> {
	trace!(target: "strata::core::fnc", "Running function {name}");
	dispatch!(
		name,
		args,
		"array::distinct" => array::distinct,
		"array::group" => array::group,
		"array::len" => array::len,
		"count" => count::count,
		"distinct" => array::distinct,
		"math::max" => math::max,
		"math::mean" => math::mean,
		"math::min" => math::min,
		"math::sum" => math::sum,
		"string::concat" => string::concat,
		"string::len" => string::len,
		"string::lowercase" => string::lowercase,
		"string::uppercase" => string::uppercase,
	)
}

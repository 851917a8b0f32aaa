use std::time::Duration;

use anyhow::Result;
use serde::Serialize;
use serde::ser::SerializeStruct;

use crate::val::Value;

pub(crate) const TOKEN: &str = "$strata::private::Response";

/// The result of running a single statement in a query batch.
#[derive(Debug)]
#[non_exhaustive]
pub struct Response {
	/// The position of the statement in the batch
	pub index: usize,
	pub time: Duration,
	pub result: Result<Value>,
}

impl Response {
	/// Return the statement duration as a string
	pub fn speed(&self) -> String {
		format!("{:?}", self.time)
	}

	/// Retrieve the response as a normal result
	pub fn output(self) -> Result<Value> {
		self.result
	}

	/// Returns the status of this response
	pub fn status(&self) -> Status {
		match self.result {
			Ok(_) => Status::Ok,
			Err(_) => Status::Err,
		}
	}
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
#[non_exhaustive]
pub enum Status {
	Ok,
	Err,
}

impl Serialize for Response {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: serde::Serializer,
	{
		let mut val = serializer.serialize_struct(TOKEN, 5)?;
		val.serialize_field("index", &self.index)?;
		val.serialize_field("time", self.speed().as_str())?;
		match &self.result {
			Ok(v) => {
				val.serialize_field("status", &Status::Ok)?;
				val.serialize_field("result", &v.clone().into_json())?;
				val.skip_field("detail")?;
			}
			Err(e) => {
				val.serialize_field("status", &Status::Err)?;
				val.serialize_field("result", &Vec::<()>::new())?;
				val.serialize_field("detail", &e.to_string())?;
			}
		}
		val.end()
	}
}

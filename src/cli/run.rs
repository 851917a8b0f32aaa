use std::path::Path;
use std::sync::Arc;

use clap::Args;
use serde::Deserialize;
use strata_core::dbs::Variables;
use strata_core::expr::Statement;
use strata_core::kvs::{self, mem};
use strata_core::val::{Datetime, RecordId, Value};

use crate::cnf::TARGET;
use crate::err::Error;

#[derive(Args, Debug)]
pub struct RunCommandArguments {
	#[arg(help = "Path to a JSON fixture of versioned record writes")]
	#[arg(short = 'd', long = "data")]
	data: Option<String>,
	#[arg(help = "Path to a JSON array of statements to execute")]
	#[arg(short = 'q', long = "query")]
	query: String,
	#[arg(help = "Path to a JSON object of parameters to bind")]
	#[arg(long = "vars")]
	vars: Option<String>,
	#[arg(help = "Whether to pretty print the responses")]
	#[arg(long)]
	pretty: bool,
}

/// A single write in a fixture file.
#[derive(Debug, Deserialize)]
struct Write {
	/// The record written, as `table:key`
	id: String,
	/// The version of the write, defaulting to the current time
	#[serde(default)]
	version: Option<Version>,
	/// The record fields, or `null` to delete the record
	data: serde_json::Value,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Version {
	Stamp(u64),
	Date(String),
}

pub async fn init(
	RunCommandArguments {
		data,
		query,
		vars,
		pretty,
	}: RunCommandArguments,
) -> Result<(), Error> {
	// Load the fixture into a new store
	let store = Arc::new(mem::Datastore::new());
	if let Some(path) = data {
		let writes: Vec<Write> = read_json(&path).await?;
		info!(target: TARGET, "Loading {} writes from '{path}'", writes.len());
		for write in writes {
			apply(&store, write)?;
		}
	}
	// Parse the statements and parameters
	let stmts: Vec<Statement> = read_json(&query).await?;
	let vars = match vars {
		Some(path) => read_vars(&path).await?,
		None => Variables::new(),
	};
	// Execute the batch
	info!(target: TARGET, "Executing {} statements", stmts.len());
	let ds = kvs::Datastore::new(store);
	let res = ds.execute(stmts, vars).await?;
	// Output the responses
	let out = match pretty {
		true => serde_json::to_string_pretty(&res),
		false => serde_json::to_string(&res),
	};
	let out = out.map_err(|error| Error::Json {
		path: query,
		error,
	})?;
	println!("{out}");
	Ok(())
}

fn apply(store: &mem::Datastore, write: Write) -> Result<(), Error> {
	let invalid = |message: String| Error::InvalidWrite {
		id: write.id.clone(),
		message,
	};
	let rid: RecordId = write.id.parse().map_err(|e: strata_core::err::Error| invalid(e.to_string()))?;
	let version = match &write.version {
		None => Datetime::now().to_version_stamp(),
		Some(Version::Stamp(v)) => *v,
		Some(Version::Date(v)) => match v.parse::<Datetime>() {
			Ok(v) => v.to_version_stamp(),
			Err(_) => return Err(invalid(format!("'{v}' is not a valid date or datetime"))),
		},
	};
	debug!(target: TARGET, "Applying write for {rid} at version {version}");
	match write.data {
		serde_json::Value::Null => store.del(rid, version),
		data @ serde_json::Value::Object(_) => store.set(rid, version, Value::from(data))?,
		data => return Err(invalid(format!("expected an object or null, found {data}"))),
	}
	Ok(())
}

async fn read_vars(path: &str) -> Result<Variables, Error> {
	let vars: serde_json::Map<String, serde_json::Value> = read_json(path).await?;
	Ok(vars.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
}

async fn read_json<T: for<'de> Deserialize<'de>>(path: &str) -> Result<T, Error> {
	let text = tokio::fs::read_to_string(Path::new(path)).await.map_err(|error| Error::Io {
		path: path.to_owned(),
		error,
	})?;
	serde_json::from_str(&text).map_err(|error| Error::Json {
		path: path.to_owned(),
		error,
	})
}

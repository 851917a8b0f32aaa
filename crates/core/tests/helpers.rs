#![allow(dead_code)]

use std::sync::Arc;

use anyhow::Result;
use serde_json::json;
use strata_core::dbs::{Response, Variables};
use strata_core::expr::{Idiom, Statement};
use strata_core::kvs::{Datastore, mem};
use strata_core::val::{Datetime, RecordId, Value};

/// The version at which seeded records are written
pub const SEEDED: u64 = 1_000;

/// Creates an empty in-memory store
pub fn new_store() -> Arc<mem::Datastore> {
	Arc::new(mem::Datastore::new())
}

/// Creates an in-memory store holding `person:1` to `person:n`, each with
/// a `num` field
pub fn new_people(n: i64) -> Result<Arc<mem::Datastore>> {
	let store = new_store();
	for i in 1..=n {
		store.set(RecordId::new("person", i), SEEDED, record(json!({ "num": i })))?;
	}
	Ok(store)
}

/// Creates an in-memory store holding five named people
pub fn new_named() -> Result<Arc<mem::Datastore>> {
	let store = new_store();
	let names = ["Tobias", "Silvana", "Jonathan", "Benjamin", "Alexander"];
	for (i, name) in names.iter().enumerate() {
		store.set(RecordId::new("person", i as i64 + 1), SEEDED, record(json!({ "name": name })))?;
	}
	Ok(store)
}

/// Converts a JSON object into the fields of a record
pub fn record(v: serde_json::Value) -> Value {
	Value::from(v)
}

/// Parses a date or datetime into a version stamp
pub fn stamp(v: &str) -> u64 {
	v.parse::<Datetime>().expect("a valid datetime").to_version_stamp()
}

/// Runs a batch of statements against the store
pub async fn execute(
	store: &Arc<mem::Datastore>,
	stmts: Vec<Statement>,
	vars: Variables,
) -> Result<Vec<Response>> {
	let ds = Datastore::new(store.clone());
	ds.execute(stmts, vars).await
}

/// Runs a single statement against the store, returning its output rows
pub async fn rows(store: &Arc<mem::Datastore>, stmt: impl Into<Statement>) -> Result<Vec<Value>> {
	let mut res = execute(store, vec![stmt.into()], Variables::new()).await?;
	assert_eq!(res.len(), 1);
	into_rows(res.remove(0))
}

/// Extracts the output rows of a successful response
pub fn into_rows(res: Response) -> Result<Vec<Value>> {
	match res.result? {
		Value::Array(v) => Ok(v.0),
		v => panic!("Expected an array of rows, found {v}"),
	}
}

/// Picks a field from every row
pub fn column(rows: &[Value], field: &str) -> Vec<Value> {
	let path = Idiom::parse(field);
	rows.iter().map(|v| v.pick(&path)).collect()
}

/// Returns the error message of a failed response
pub fn detail(res: Response) -> String {
	match res.result {
		Ok(v) => panic!("Expected an error, found {v}"),
		Err(e) => e.to_string(),
	}
}

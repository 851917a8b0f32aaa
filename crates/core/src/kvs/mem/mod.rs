#![cfg(feature = "kv-mem")]

use std::collections::BTreeMap;
use std::ops::Bound;

use anyhow::{Result, ensure};
use parking_lot::RwLock;

use crate::err::Error;
use crate::kvs::api::Transactable;
use crate::val::{Datetime, RecordId, Value};

const TARGET: &str = "strata::core::kvs::mem";

/// The version history of a single record. Entries are kept in ascending
/// version order, and a `None` entry marks a deletion.
type History = Vec<(u64, Option<Value>)>;

/// An in-memory versioned store of records.
#[derive(Default)]
pub struct Datastore {
	records: RwLock<BTreeMap<RecordId, History>>,
	latest: RwLock<u64>,
}

impl Datastore {
	/// Create a new empty in-memory store
	pub fn new() -> Datastore {
		Datastore::default()
	}

	/// Write the fields of a record at the given version.
	pub fn set(&self, rid: RecordId, version: u64, val: Value) -> Result<()> {
		ensure!(val.is_object(), Error::Ds(format!("Expected an object for {rid}, found {val}")));
		self.write(rid, version, Some(val));
		Ok(())
	}

	/// Delete a record at the given version.
	pub fn del(&self, rid: RecordId, version: u64) {
		self.write(rid, version, None);
	}

	fn write(&self, rid: RecordId, version: u64, val: Option<Value>) {
		trace!(target: TARGET, "Writing {rid} at version {version}");
		let mut records = self.records.write();
		let history = records.entry(rid).or_default();
		// A write at an existing version replaces it
		match history.binary_search_by_key(&version, |(v, _)| *v) {
			Ok(i) => history[i].1 = val,
			Err(i) => history.insert(i, (version, val)),
		}
		let mut latest = self.latest.write();
		*latest = (*latest).max(version);
	}

	/// Find the visible state of a record history at a version.
	fn visible(history: &History, version: u64) -> Option<&Value> {
		let idx = history.partition_point(|(v, _)| *v <= version);
		match idx {
			0 => None,
			i => history[i - 1].1.as_ref(),
		}
	}
}

#[async_trait::async_trait]
impl Transactable for Datastore {
	fn kind(&self) -> &'static str {
		"memory"
	}

	async fn version(&self) -> Result<u64> {
		let now = Datetime::now().to_version_stamp();
		Ok(now.max(*self.latest.read()))
	}

	async fn get(&self, rid: &RecordId, version: Option<u64>) -> Result<Option<Value>> {
		let version = version.unwrap_or(u64::MAX);
		let records = self.records.read();
		Ok(records.get(rid).and_then(|h| Self::visible(h, version)).cloned())
	}

	async fn batch(
		&self,
		tb: &str,
		after: Option<&RecordId>,
		limit: u32,
		version: Option<u64>,
	) -> Result<Vec<(RecordId, Value)>> {
		let version = version.unwrap_or(u64::MAX);
		let records = self.records.read();
		// Numeric keys sort first, so this is the start of the table
		let beg = match after {
			Some(rid) => Bound::Excluded(rid.clone()),
			None => Bound::Included(RecordId::new(tb, i64::MIN)),
		};
		let out = records
			.range((beg, Bound::Unbounded))
			.take_while(|(rid, _)| rid.table == tb)
			.filter_map(|(rid, h)| Self::visible(h, version).map(|v| (rid.clone(), v.clone())))
			.take(limit as usize)
			.collect();
		Ok(out)
	}
}

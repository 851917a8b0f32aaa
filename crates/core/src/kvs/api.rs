//! This module defines the read API of a versioned key-value store.

use anyhow::Result;

use crate::cnf::NORMAL_FETCH_SIZE;
use crate::val::{RecordId, Value};

/// This trait defines the read API of a versioned store of records.
///
/// Every write to the store is stamped with a version, the number of
/// nanoseconds since the unix epoch. Reads at a version observe, for each
/// record, the most recent write stamped at or before that version. A record
/// whose most recent write is a deletion, or which has no write at or before
/// the version, is absent.
#[async_trait::async_trait]
pub trait Transactable: Send + Sync {
	/// Get the name of the store type.
	fn kind(&self) -> &'static str;

	/// Get the current version of the store. Reads at this version observe
	/// every write committed so far.
	async fn version(&self) -> Result<u64>;

	/// Fetch the fields of a record, as they existed at the given version.
	async fn get(&self, rid: &RecordId, version: Option<u64>) -> Result<Option<Value>>;

	/// Retrieve a batch of records from a table, ordered by record id.
	///
	/// The batch starts after the `after` record id if one is given, and
	/// contains at most `limit` records visible at the given version.
	async fn batch(
		&self,
		tb: &str,
		after: Option<&RecordId>,
		limit: u32,
		version: Option<u64>,
	) -> Result<Vec<(RecordId, Value)>>;

	/// Retrieve every record from a table, ordered by record id.
	///
	/// This function fetches records in batches of [`NORMAL_FETCH_SIZE`].
	async fn scan(&self, tb: &str, version: Option<u64>) -> Result<Vec<(RecordId, Value)>> {
		let limit = (*NORMAL_FETCH_SIZE).max(1);
		let mut out = Vec::new();
		loop {
			let after = out.last().map(|(rid, _): &(RecordId, Value)| rid.clone());
			let res = self.batch(tb, after.as_ref(), limit, version).await?;
			let done = res.len() < limit as usize;
			out.extend(res);
			if done {
				break;
			}
		}
		Ok(out)
	}
}

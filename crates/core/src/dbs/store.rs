use std::mem;

use crate::expr::order::OrderComparator;
use crate::val::Value;

/// Collects rows in memory, together with the computed values of their
/// ORDER BY keys, so that they can be sorted and paginated.
pub(crate) struct MemoryCollector<T>(Vec<(Vec<Value>, T)>);

impl<T> Default for MemoryCollector<T> {
	fn default() -> Self {
		Self(Vec::new())
	}
}

impl<T> MemoryCollector<T> {
	pub(crate) fn push(&mut self, keys: Vec<Value>, val: T) {
		self.0.push((keys, val));
	}

	pub(crate) fn len(&self) -> usize {
		self.0.len()
	}

	/// Sorts the rows. The sort is stable, so rows with equal keys keep
	/// their relative order.
	pub(crate) fn sort(&mut self, cmp: &OrderComparator) {
		self.0.sort_by(|a, b| cmp.compare(&a.0, &b.0));
	}

	/// Skips `start` rows and keeps at most `limit` of the rest
	pub(crate) fn start_limit(&mut self, start: usize, limit: Option<usize>) {
		let start = start.min(self.0.len());
		let rows = mem::take(&mut self.0);
		self.0 = rows.into_iter().skip(start).take(limit.unwrap_or(usize::MAX)).collect();
	}

	pub(crate) fn take_vec(self) -> Vec<T> {
		self.0.into_iter().map(|(_, v)| v).collect()
	}
}

use std::sync::Arc;

use crate::val::{RecordId, Value};

/// A record being processed by the SELECT pipeline, together with the
/// record id it was fetched under.
#[derive(Clone, Debug)]
pub(crate) struct CursorDoc {
	pub(crate) rid: Option<Arc<RecordId>>,
	pub(crate) doc: Arc<Value>,
	/// The aggregate values of the group this record stands in for
	pub(crate) aggregates: Vec<Value>,
}

impl CursorDoc {
	pub(crate) fn new(rid: Option<Arc<RecordId>>, doc: Value) -> Self {
		Self {
			rid,
			doc: Arc::new(doc),
			aggregates: Vec::new(),
		}
	}

	/// Attaches the aggregate values computed over a group
	pub(crate) fn with_aggregates(mut self, aggregates: Vec<Value>) -> Self {
		self.aggregates = aggregates;
		self
	}

	/// The whole record, with its table and key attached as `meta`
	pub(crate) fn record(&self) -> Value {
		let mut out = self.doc.as_ref().clone();
		if let (Some(rid), Value::Object(obj)) = (&self.rid, &mut out) {
			let meta = map! {
				"tb".to_owned() => Value::from(rid.table.as_str()),
				"id".to_owned() => rid.key.clone().into_value(),
			};
			obj.insert("meta".to_owned(), Value::from(meta));
		}
		out
	}
}

impl From<Value> for CursorDoc {
	fn from(val: Value) -> Self {
		let rid = match &val {
			Value::Object(o) => o.rid().map(Arc::new),
			_ => None,
		};
		Self::new(rid, val)
	}
}

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt::{self, Debug};
use std::sync::Arc;

use anyhow::Result;

use crate::dbs::Variables;
use crate::err::Error;
use crate::kvs::Transactable;
use crate::val::Value;

pub type Context = Arc<MutableContext>;

/// The parameters and store handle visible while evaluating a statement.
///
/// Contexts form a chain: a child context is created from a frozen parent,
/// extended with new values, and frozen in turn. A frozen context is never
/// modified, so concurrently evaluated branches only ever observe their own
/// bindings and those of their ancestors.
#[non_exhaustive]
pub struct MutableContext {
	parent: Option<Context>,
	values: HashMap<Cow<'static, str>, Arc<Value>>,
	transaction: Option<Arc<dyn Transactable>>,
}

impl Default for MutableContext {
	fn default() -> Self {
		MutableContext::background()
	}
}

impl Debug for MutableContext {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.debug_struct("Context")
			.field("parent", &self.parent)
			.field("values", &self.values)
			.field("transaction", &self.transaction.as_ref().map(|tx| tx.kind()))
			.finish()
	}
}

impl MutableContext {
	/// Creates a new empty background context.
	pub(crate) fn background() -> Self {
		Self {
			values: HashMap::default(),
			parent: None,
			transaction: None,
		}
	}

	/// Creates a new context from a frozen parent context.
	pub(crate) fn new(parent: &Context) -> Self {
		MutableContext {
			values: HashMap::default(),
			transaction: parent.transaction.clone(),
			parent: Some(parent.clone()),
		}
	}

	/// Freezes this context, allowing it to be used as a parent context.
	pub(crate) fn freeze(self) -> Context {
		Arc::new(self)
	}

	/// Associates a store with this context.
	pub(crate) fn set_transaction(&mut self, txn: Arc<dyn Transactable>) {
		self.transaction = Some(txn);
	}

	/// Returns the store associated with this context.
	pub(crate) fn tx(&self) -> Result<Arc<dyn Transactable>> {
		match &self.transaction {
			Some(tx) => Ok(tx.clone()),
			None => fail!("The context was not associated with a datastore"),
		}
	}

	/// Add a value to the context. It overwrites any previously set values
	/// with the same key.
	pub(crate) fn add_value<K>(&mut self, key: K, value: Arc<Value>)
	where
		K: Into<Cow<'static, str>>,
	{
		self.values.insert(key.into(), value);
	}

	/// Attaches a set of query variables to this context.
	pub(crate) fn attach_variables(&mut self, vars: Variables) -> Result<(), Error> {
		for (key, val) in vars {
			if crate::cnf::PROTECTED_PARAM_NAMES.contains(&key.as_str()) {
				return Err(Error::InvalidParam {
					name: key,
				});
			}
			self.add_value(key, Arc::new(val));
		}
		Ok(())
	}

	/// Get a value from the context. If no value is stored under this key,
	/// then the parent context is searched.
	pub(crate) fn value(&self, key: &str) -> Option<&Value> {
		match self.values.get(key) {
			Some(v) => Some(v.as_ref()),
			None => match &self.parent {
				Some(p) => p.value(key),
				_ => None,
			},
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn child_values_shadow_parent() {
		let mut root = MutableContext::background();
		root.add_value("a", Arc::new(Value::from(1)));
		root.add_value("b", Arc::new(Value::from(2)));
		let root = root.freeze();
		let mut child = MutableContext::new(&root);
		child.add_value("a", Arc::new(Value::from(10)));
		let child = child.freeze();
		assert_eq!(child.value("a"), Some(&Value::from(10)));
		assert_eq!(child.value("b"), Some(&Value::from(2)));
		assert_eq!(root.value("a"), Some(&Value::from(1)));
		assert_eq!(child.value("c"), None);
	}

	#[test]
	fn protected_variables_are_rejected() {
		let mut ctx = MutableContext::background();
		let vars = Variables::from_iter([("this".to_owned(), Value::Null)]);
		assert!(matches!(ctx.attach_variables(vars), Err(Error::InvalidParam { .. })));
	}

	#[test]
	fn missing_store_is_an_error() {
		let ctx = MutableContext::background();
		assert!(ctx.tx().is_err());
	}
}

mod helpers;

use std::sync::Arc;

use anyhow::Result;
use helpers::*;
use serde_json::json;
use strata_core::expr::{BinaryOperator, Expr, Field, Fields, Groups, Order, SelectStatement};
use strata_core::kvs::mem;
use strata_core::val::{RecordId, Value};

/// Creates five people, with `test` set to the given values, where `None`
/// leaves the field unset
fn seed(values: [Option<serde_json::Value>; 5]) -> Result<Arc<mem::Datastore>> {
	let store = new_store();
	for (i, v) in values.into_iter().enumerate() {
		let fields = match v {
			Some(v) => json!({ "test": v, "num": i + 1 }),
			None => json!({ "num": i + 1 }),
		};
		store.set(RecordId::new("person", i as i64 + 1), SEEDED, record(fields))?;
	}
	Ok(store)
}

fn booleans() -> Result<Arc<mem::Datastore>> {
	seed([Some(json!(true)), Some(json!(false)), Some(json!(false)), Some(json!(true)), None])
}

#[test_log::test(tokio::test)]
async fn group_records_by_field() -> Result<()> {
	let store = booleans()?;
	let stm = SelectStatement::new(Fields::select([Field::single(Expr::idiom("test"))]), vec![
		Expr::table("person"),
	])
	.with_group(Groups::by(["test"]))
	.with_order(Order::asc("test"));
	let res = rows(&store, stm).await?;
	assert_eq!(column(&res, "test"), vec![Value::None, Value::from(false), Value::from(true)]);
	Ok(())
}

#[test_log::test(tokio::test)]
async fn groups_are_emitted_in_first_seen_order() -> Result<()> {
	let store = booleans()?;
	let stm = SelectStatement::new(Fields::select([Field::single(Expr::idiom("test"))]), vec![
		Expr::table("person"),
	])
	.with_group(Groups::by(["test"]));
	let res = rows(&store, stm).await?;
	assert_eq!(column(&res, "test"), vec![Value::from(true), Value::from(false), Value::None]);
	Ok(())
}

#[test_log::test(tokio::test)]
async fn group_and_count_records_by_field() -> Result<()> {
	let store = booleans()?;
	let stm = SelectStatement::new(
		Fields::select([
			Field::single(Expr::idiom("test")),
			Field::aliased(Expr::call("count", vec![]), "total"),
		]),
		vec![Expr::table("person")],
	)
	.with_group(Groups::by(["test"]))
	.with_order(Order::asc("test"));
	let res = rows(&store, stm).await?;
	assert_eq!(res, vec![
		record(json!({ "total": 1 })).tap_put("test", Value::None),
		record(json!({ "test": false, "total": 2 })),
		record(json!({ "test": true, "total": 2 })),
	]);
	Ok(())
}

#[test_log::test(tokio::test)]
async fn null_and_missing_values_form_separate_groups() -> Result<()> {
	let store = new_store();
	let values = [json!(true), json!(false), json!(false), json!(true), json!(null)];
	for i in 1..=10 {
		let fields = match values.get(i - 1) {
			Some(v) => json!({ "test": v }),
			None => json!({}),
		};
		store.set(RecordId::new("person", i as i64), SEEDED, record(fields))?;
	}
	let stm = SelectStatement::new(
		Fields::select([
			Field::single(Expr::idiom("test")),
			Field::aliased(Expr::call("count", vec![]), "total"),
		]),
		vec![Expr::table("person")],
	)
	.with_group(Groups::by(["test"]))
	.with_order(Order::asc("test"));
	let res = rows(&store, stm).await?;
	// Empty values tie when ordered, so they keep their first-seen order
	assert_eq!(res, vec![
		record(json!({ "test": null, "total": 1 })),
		record(json!({ "total": 5 })).tap_put("test", Value::None),
		record(json!({ "test": false, "total": 2 })),
		record(json!({ "test": true, "total": 2 })),
	]);
	Ok(())
}

#[test_log::test(tokio::test)]
async fn aggregates_do_not_overwrite_record_fields() -> Result<()> {
	let store = new_store();
	for i in 1..=3 {
		store.set(RecordId::new("person", i), SEEDED, record(json!({ "_a0": "kept", "num": i })))?;
	}
	let stm = SelectStatement::new(
		Fields::select([
			Field::All,
			Field::aliased(Expr::call("math::sum", vec![Expr::idiom("num")]), "sum"),
		]),
		vec![Expr::table("person")],
	)
	.with_group(Groups::all());
	let res = rows(&store, stm).await?;
	assert_eq!(res.len(), 1);
	assert_eq!(column(&res, "_a0"), vec![Value::from("kept")]);
	assert_eq!(column(&res, "sum"), vec![Value::from(6)]);
	let stm = SelectStatement::new(
		Fields::select([
			Field::single(Expr::idiom("_a0")),
			Field::aliased(Expr::call("count", vec![]), "total"),
		]),
		vec![Expr::table("person")],
	)
	.with_group(Groups::all());
	assert_eq!(rows(&store, stm).await?, vec![record(json!({ "_a0": "kept", "total": 3 }))]);
	Ok(())
}

#[test_log::test(tokio::test)]
async fn group_and_count_records_by_field_with_alias() -> Result<()> {
	let store = seed([
		Some(json!("something")),
		Some(json!("nothing")),
		Some(json!("nothing")),
		Some(json!("something")),
		None,
	])?;
	let stm = SelectStatement::new(
		Fields::select([
			Field::aliased(Expr::call("string::len", vec![Expr::idiom("test")]), "test"),
			Field::aliased(Expr::call("count", vec![]), "total"),
		]),
		vec![Expr::table("person")],
	)
	.with_group(Groups::by(["test"]))
	.with_order(Order::asc("test"));
	let res = rows(&store, stm).await?;
	assert_eq!(res, vec![
		record(json!({ "test": 0, "total": 1 })),
		record(json!({ "test": 7, "total": 2 })),
		record(json!({ "test": 9, "total": 2 })),
	]);
	Ok(())
}

#[test_log::test(tokio::test)]
async fn group_and_retrieve_distinct_records_by_field() -> Result<()> {
	let store = seed([
		Some(json!("Hello")),
		Some(json!("World")),
		Some(json!("World")),
		Some(json!("Hello")),
		Some(json!("Hello")),
	])?;
	let stm = SelectStatement::new(
		Fields::select([
			Field::single(Expr::idiom("test")),
			Field::aliased(Expr::call("distinct", vec![Expr::idiom("id")]), "docs"),
		]),
		vec![Expr::table("person"), Expr::record("person", 1)],
	)
	.with_group(Groups::by(["test"]))
	.with_order(Order::asc("test"));
	let res = rows(&store, stm).await?;
	let ids = |keys: &[i64]| {
		Value::from(keys.iter().map(|k| Value::from(RecordId::new("person", *k))).collect::<Vec<_>>())
	};
	// person:1 is selected twice, but appears once
	assert_eq!(column(&res, "test"), vec![Value::from("Hello"), Value::from("World")]);
	assert_eq!(column(&res, "docs"), vec![ids(&[1, 4, 5]), ids(&[2, 3])]);
	Ok(())
}

#[test_log::test(tokio::test)]
async fn group_all_with_numeric_aggregates() -> Result<()> {
	let store = booleans()?;
	let stm = SelectStatement::new(
		Fields::select([
			Field::aliased(Expr::call("count", vec![]), "total"),
			Field::aliased(
				Expr::call("count", vec![Expr::binary(
					Expr::idiom("test"),
					BinaryOperator::Equal,
					Expr::literal(true),
				)]),
				"yes",
			),
			Field::aliased(Expr::call("math::sum", vec![Expr::idiom("num")]), "sum"),
			Field::aliased(Expr::call("math::max", vec![Expr::idiom("num")]), "max"),
			Field::aliased(Expr::call("math::mean", vec![Expr::idiom("num")]), "mean"),
		]),
		vec![Expr::table("person")],
	)
	.with_group(Groups::all());
	let res = rows(&store, stm).await?;
	assert_eq!(res, vec![record(json!({
		"total": 5,
		"yes": 2,
		"sum": 15,
		"max": 5,
		"mean": 3.0,
	}))]);
	Ok(())
}

#[test_log::test(tokio::test)]
async fn group_with_pagination_applies_to_groups() -> Result<()> {
	let store = booleans()?;
	let stm = SelectStatement::new(
		Fields::select([
			Field::single(Expr::idiom("test")),
			Field::aliased(Expr::call("count", vec![]), "total"),
		]),
		vec![Expr::table("person")],
	)
	.with_group(Groups::by(["test"]))
	.with_order(Order::desc("total"))
	.with_limit(Expr::literal(2));
	let res = rows(&store, stm).await?;
	// Equal totals keep the order in which the groups were first seen
	assert_eq!(column(&res, "test"), vec![Value::from(true), Value::from(false)]);
	Ok(())
}

#[test_log::test(tokio::test)]
async fn group_with_all_fields_emits_the_first_member() -> Result<()> {
	let store = booleans()?;
	let stm = SelectStatement::new(
		Fields::select([Field::All, Field::aliased(Expr::call("count", vec![]), "total")]),
		vec![Expr::table("person")],
	)
	.with_group(Groups::by(["test"]));
	let res = rows(&store, stm).await?;
	assert_eq!(res.len(), 3);
	assert_eq!(
		res[0],
		record(json!({ "test": true, "num": 1, "total": 2, "meta": { "tb": "person", "id": 1 } }))
			.tap_put("id", Value::from(RecordId::new("person", 1)))
	);
	Ok(())
}

trait TapPut {
	fn tap_put(self, field: &str, val: Value) -> Self;
}

impl TapPut for Value {
	fn tap_put(mut self, field: &str, val: Value) -> Self {
		if let Value::Object(obj) = &mut self {
			obj.insert(field.to_owned(), val);
		}
		self
	}
}

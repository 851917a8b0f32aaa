mod helpers;

use anyhow::Result;
use helpers::*;
use strata_core::dbs::Variables;
use strata_core::expr::{BinaryOperator, Expr, Field, Fields, Order, SelectStatement};
use strata_core::val::{RecordId, Value};

fn people() -> Expr {
	Expr::table("person")
}

fn select_all(what: Vec<Expr>) -> SelectStatement {
	SelectStatement::new(Fields::all(), what)
}

fn select_field(field: &str, what: Vec<Expr>) -> SelectStatement {
	SelectStatement::new(Fields::select([Field::single(Expr::idiom(field))]), what)
}

fn names(rows: &[Value]) -> Vec<Value> {
	column(rows, "name")
}

#[test_log::test(tokio::test)]
async fn select_using_an_all_subquery() -> Result<()> {
	let store = new_named()?;
	let inner = select_all(vec![people()]).with_order(Order::asc("name"));
	let res = rows(&store, select_all(vec![Expr::select(inner.clone())])).await?;
	assert_eq!(res.len(), 5);
	assert_eq!(names(&res).first(), Some(&Value::from("Alexander")));
	assert_eq!(names(&res).last(), Some(&Value::from("Tobias")));
	// The limit of the nested statement is applied before the outer statement
	let res = rows(&store, select_all(vec![Expr::select(inner.with_limit(Expr::literal(1)))])).await?;
	assert_eq!(names(&res), vec![Value::from("Alexander")]);
	// A nested statement can select a single record
	let inner = select_all(vec![Expr::record("person", 5)]);
	let res = rows(&store, select_all(vec![Expr::select(inner)])).await?;
	assert_eq!(names(&res), vec![Value::from("Alexander")]);
	Ok(())
}

#[test_log::test(tokio::test)]
async fn select_using_an_id_subquery() -> Result<()> {
	let store = new_named()?;
	let sorted = select_all(vec![people()]).with_order(Order::asc("name"));
	let inner = select_field("id", vec![Expr::select(sorted)]);
	let res = rows(&store, select_all(vec![Expr::select(inner.clone())])).await?;
	assert_eq!(res.len(), 5);
	assert_eq!(names(&res).first(), Some(&Value::from("Alexander")));
	assert_eq!(names(&res).last(), Some(&Value::from("Tobias")));
	let inner = inner.with_limit(Expr::literal(1));
	let res = rows(&store, select_all(vec![Expr::select(inner)])).await?;
	assert_eq!(names(&res), vec![Value::from("Alexander")]);
	let single = select_all(vec![Expr::record("person", 5)]);
	let inner = select_field("id", vec![Expr::select(single)]);
	let res = rows(&store, select_all(vec![Expr::select(inner)])).await?;
	assert_eq!(names(&res), vec![Value::from("Alexander")]);
	Ok(())
}

#[test_log::test(tokio::test)]
async fn select_using_a_single_field_subquery_fails() -> Result<()> {
	let store = new_named()?;
	let inner = select_field("name", vec![people()]).with_order(Order::asc("name"));
	let mut res =
		execute(&store, vec![select_all(vec![Expr::select(inner)]).into()], Variables::new()).await?;
	assert_eq!(
		detail(res.remove(0)),
		"Found name as a statement target, but a subquery target must select `*` or `id`"
	);
	Ok(())
}

#[test_log::test(tokio::test)]
async fn filter_records_using_an_id_subquery() -> Result<()> {
	let store = new_named()?;
	let inner = select_field("id", vec![people()]);
	let cond = Expr::binary(Expr::idiom("id"), BinaryOperator::Inside, Expr::select(inner.clone()));
	let res = rows(&store, select_all(vec![people()]).with_cond(cond)).await?;
	assert_eq!(res.len(), 5);
	assert_eq!(names(&res).first(), Some(&Value::from("Tobias")));
	assert_eq!(names(&res).last(), Some(&Value::from("Alexander")));
	// A single row subquery can be compared as a value
	let inner = inner.with_limit(Expr::literal(1));
	let cond = Expr::binary(Expr::idiom("id"), BinaryOperator::Equal, Expr::select(inner));
	let res = rows(&store, select_all(vec![people()]).with_cond(cond)).await?;
	assert_eq!(names(&res), vec![Value::from("Tobias")]);
	Ok(())
}

#[test_log::test(tokio::test)]
async fn filter_records_using_a_single_field_subquery() -> Result<()> {
	let store = new_named()?;
	let inner = select_field("name", vec![people()]).with_order(Order::asc("name"));
	let cond = Expr::binary(Expr::idiom("name"), BinaryOperator::Inside, Expr::select(inner.clone()));
	let res = rows(&store, select_all(vec![people()]).with_cond(cond)).await?;
	assert_eq!(res.len(), 5);
	assert_eq!(names(&res).first(), Some(&Value::from("Tobias")));
	let cond = Expr::binary(
		Expr::idiom("name"),
		BinaryOperator::Equal,
		Expr::select(inner.with_limit(Expr::literal(1))),
	);
	let res = rows(&store, select_all(vec![people()]).with_cond(cond)).await?;
	assert_eq!(names(&res), vec![Value::from("Alexander")]);
	Ok(())
}

#[test_log::test(tokio::test)]
async fn compared_subqueries_must_produce_a_single_row() -> Result<()> {
	let store = new_named()?;
	let many = select_field("name", vec![people()]);
	let none = select_field("name", vec![people()]).with_cond(Expr::binary(
		Expr::idiom("name"),
		BinaryOperator::Equal,
		Expr::literal("Nobody"),
	));
	let stmts = vec![
		select_all(vec![people()])
			.with_cond(Expr::binary(Expr::idiom("name"), BinaryOperator::Equal, Expr::select(many)))
			.into(),
		select_all(vec![people()])
			.with_cond(Expr::binary(Expr::idiom("name"), BinaryOperator::NotEqual, Expr::select(none)))
			.into(),
	];
	let mut res = execute(&store, stmts, Variables::new()).await?;
	assert_eq!(
		detail(res.remove(0)),
		"Expected a single result output from a subquery used as a value, but found 5"
	);
	// No rows compare as NONE
	assert_eq!(into_rows(res.remove(0))?.len(), 5);
	Ok(())
}

#[test_log::test(tokio::test)]
async fn projected_subqueries_can_reference_the_parent_record() -> Result<()> {
	let store = new_named()?;
	let inner = SelectStatement::new(Fields::value(Expr::idiom("name")), vec![people()]).with_cond(
		Expr::binary(Expr::param("this"), BinaryOperator::Equal, Expr::param("parent")),
	);
	let stm = SelectStatement::new(
		Fields::select([Field::single(Expr::idiom("id")), Field::aliased(Expr::select(inner), "same")]),
		vec![Expr::record("person", 2), Expr::record("person", 4)],
	);
	let res = rows(&store, stm).await?;
	assert_eq!(column(&res, "id"), vec![
		Value::from(RecordId::new("person", 2)),
		Value::from(RecordId::new("person", 4)),
	]);
	assert_eq!(column(&res, "same"), vec![
		Value::from(vec![Value::from("Silvana")]),
		Value::from(vec![Value::from("Benjamin")]),
	]);
	Ok(())
}

#[test_log::test(tokio::test)]
async fn parent_is_not_defined_outside_of_a_subquery() -> Result<()> {
	let store = new_named()?;
	let stm = SelectStatement::new(Fields::value(Expr::param("parent")), vec![people()]);
	let mut res = execute(&store, vec![stm.into()], Variables::new()).await?;
	assert_eq!(detail(res.remove(0)), "The parameter '$parent' has not been defined");
	Ok(())
}

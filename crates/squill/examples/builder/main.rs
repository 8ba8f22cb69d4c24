//! Example demonstrating squill's statement builder: joins, subqueries,
//! aliases, and DELETE ONLY.
//!
//! Run with:
//!   cargo run --example builder -p squill

use squill::{BuildError, Query, Table, Term};

fn main() -> Result<(), BuildError> {
    let users = Table::new("users").as_("u");
    let orders = Table::new("orders").as_("o");

    // SELECT with a join and a filter tree.
    let report = Query::new()
        .select(&[users.field("name"), orders.field("total")])
        .from_(users.clone())
        .inner_join(orders.clone())
        .on(&[users.field("id").eq(orders.field("user_id"))])
        .where_(&[
            orders.field("total").gt(100),
            orders.field("status").ne("cancelled"),
        ]);
    println!("{}", report.to_sql()?);

    // A subquery as a virtual table. Subqueries must be aliased.
    let recent = orders
        .select()
        .where_(&[orders.field("age_days").lt(7)])
        .as_("recent");
    let outer = Query::new()
        .select(&[])
        .distinct()
        .from_(recent.clone())
        .where_(&[recent.field("total").gte(50)]);
    println!("{}", outer.to_sql()?);

    // DELETE restricted to the exact table.
    let logs = Table::new("logs");
    let purge = logs
        .delete(true)
        .where_(&[logs.field("level").eq("debug")]);
    println!("{}", purge.to_sql()?);

    Ok(())
}

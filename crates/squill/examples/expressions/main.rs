//! Example demonstrating squill's criterion trees: comparisons, connectives,
//! arithmetic, and the predicate families.
//!
//! Run with:
//!   cargo run --example expressions -p squill

use squill::{BuildError, Table, Term, lit};

fn main() -> Result<(), BuildError> {
    let t = Table::new("inventory");

    // Comparisons stay bare; connectives parenthesize both sides.
    let in_stock = t.field("count").gt(0).and(t.field("discontinued").is_false());
    println!("{}", in_stock.to_sql()?);

    // Arithmetic composes the same way.
    let margin = t.field("price").sub(t.field("cost")).div(t.field("price"));
    println!("{}", margin.to_sql()?);

    // Scalars lift into quoted literals on either side of an operator.
    let discounted = lit(0.9).mul(t.field("price")).lt(20);
    println!("{}", discounted.to_sql()?);

    // Membership, pattern, and range predicates.
    let filter = t
        .field("sku")
        .in_list([lit(100), lit(200), lit("misc")])
        .and(t.field("name").ilike("%bolt%"))
        .and(t.field("updated").between(20240101, 20241231));
    println!("{}", filter.to_sql()?);

    Ok(())
}

//! Criterion expression tree for filters and scalar expressions.
//!
//! This module provides the [`Criterion`] enum, an immutable expression tree
//! covering comparisons, boolean connectives, arithmetic, and the null /
//! membership / pattern / range predicate families, plus the [`Term`] trait
//! whose named combinators grow the tree.
//!
//! Literals are lifted into [`Constant`] nodes at construction time, never at
//! render time, so rendering is a pure read: re-rendering any node yields the
//! same text.
//!
//! # Example
//!
//! ```
//! use squill::{Table, Term};
//!
//! let users = Table::new("users");
//! let criterion = users.field("age").gte(18).and(users.field("active").is_true());
//! assert_eq!(
//!     criterion.to_sql().unwrap(),
//!     "(users.age >= 18) AND (users.active IS TRUE)"
//! );
//! ```

use crate::error::BuildResult;
use crate::table::Field;

/// Quote a string literal, preferring `'` and falling back to `"` when the
/// value itself contains a single quote. Embedded instances of the chosen
/// quote character are not escaped; avoiding them is the caller's
/// responsibility.
fn quote_str(value: &str) -> String {
    let quote = if value.contains('\'') { '"' } else { '\'' };
    format!("{quote}{value}{quote}")
}

/// A scalar literal, quoted and rendered at construction.
///
/// - booleans render as the upper-case `TRUE` / `FALSE` keywords
/// - numbers render via their natural decimal text
/// - strings are wrapped in `'`, or `"` if the value contains `'`
#[derive(Clone, Debug)]
pub struct Constant(String);

impl Constant {
    /// The rendered literal text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Lift a scalar into a rendered [`Constant`] literal.
///
/// Mainly useful for mixed-type membership lists:
///
/// ```
/// use squill::{lit, Table, Term};
///
/// let t = Table::new("t");
/// let c = t.field("id").in_list([lit(1), lit(2), lit("a")]);
/// assert_eq!(c.to_sql().unwrap(), "t.id IN (1,2,'a')");
/// ```
pub fn lit(value: impl Into<Constant>) -> Constant {
    value.into()
}

impl From<bool> for Constant {
    fn from(value: bool) -> Self {
        Constant(if value { "TRUE" } else { "FALSE" }.to_string())
    }
}

impl From<&str> for Constant {
    fn from(value: &str) -> Self {
        Constant(quote_str(value))
    }
}

impl From<String> for Constant {
    fn from(value: String) -> Self {
        Constant(quote_str(&value))
    }
}

macro_rules! impl_numeric_constant {
    ($($ty:ty),* $(,)?) => {$(
        impl From<$ty> for Constant {
            fn from(value: $ty) -> Self {
                Constant(value.to_string())
            }
        }
    )*};
}

impl_numeric_constant!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

macro_rules! impl_criterion_from_scalar {
    ($($ty:ty),* $(,)?) => {$(
        impl From<$ty> for Criterion {
            fn from(value: $ty) -> Self {
                Criterion::Constant(Constant::from(value))
            }
        }
    )*};
}

impl_criterion_from_scalar!(
    bool, &str, String, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);

/// Node of the expression tree: a predicate or scalar expression.
///
/// Nodes are immutable once constructed. Boolean and arithmetic connectives
/// parenthesize both operands so arbitrary nesting stays associativity-safe;
/// comparisons leave their operands bare, being the lowest grouping level.
#[derive(Clone, Debug)]
pub enum Criterion {
    /// Column reference
    Field(Field),

    /// Quoted literal
    Constant(Constant),

    /// `left <op> right` with bare operands (comparisons, DISTINCT tests)
    Compare {
        left: Box<Criterion>,
        op: &'static str,
        right: Box<Criterion>,
    },

    /// `(left) <op> (right)` (AND / OR and arithmetic)
    Connective {
        left: Box<Criterion>,
        op: &'static str,
        right: Box<Criterion>,
    },

    /// `NOT (term)`
    Not(Box<Criterion>),

    /// `-term`
    Negative(Box<Criterion>),

    /// `term <keyword>` null and truth tests (`IS NULL`, `IS NOT TRUE`, ...)
    Postfix {
        term: Box<Criterion>,
        op: &'static str,
    },

    /// `term [NOT] [I]LIKE '<pattern>'`, pattern always quoted
    Like {
        term: Box<Criterion>,
        op: &'static str,
        pattern: String,
    },

    /// `term [NOT] IN (v1,v2,...)`, values individually rendered per type
    InList {
        term: Box<Criterion>,
        values: Vec<Constant>,
        negated: bool,
    },

    /// `term [NOT] BETWEEN start AND end`.
    ///
    /// Bounds are inserted as raw text; non-numeric bounds must be
    /// pre-formatted by the caller.
    Between {
        term: Box<Criterion>,
        start: String,
        end: String,
        negated: bool,
    },

    /// `(criterion)`, forced parenthesization
    Grouped(Box<Criterion>),
}

impl From<Field> for Criterion {
    fn from(field: Field) -> Self {
        Criterion::Field(field)
    }
}

impl From<Constant> for Criterion {
    fn from(constant: Constant) -> Self {
        Criterion::Constant(constant)
    }
}

impl Criterion {
    fn compare(left: impl Into<Criterion>, op: &'static str, right: impl Into<Criterion>) -> Self {
        Criterion::Compare {
            left: Box::new(left.into()),
            op,
            right: Box::new(right.into()),
        }
    }

    fn connective(
        left: impl Into<Criterion>,
        op: &'static str,
        right: impl Into<Criterion>,
    ) -> Self {
        Criterion::Connective {
            left: Box::new(left.into()),
            op,
            right: Box::new(right.into()),
        }
    }

    fn postfix(term: impl Into<Criterion>, op: &'static str) -> Self {
        Criterion::Postfix {
            term: Box::new(term.into()),
            op,
        }
    }

    /// Render this node as a SQL fragment.
    pub fn to_sql(&self) -> BuildResult<String> {
        let mut out = String::new();
        self.write_sql(&mut out)?;
        Ok(out)
    }

    /// Render into `out`. The only failure is a [`Field`] whose parent
    /// selectable carries no alias.
    pub(crate) fn write_sql(&self, out: &mut String) -> BuildResult<()> {
        match self {
            Criterion::Field(field) => field.write_sql(out),
            Criterion::Constant(constant) => {
                out.push_str(constant.as_str());
                Ok(())
            }
            Criterion::Compare { left, op, right } => {
                left.write_sql(out)?;
                out.push(' ');
                out.push_str(op);
                out.push(' ');
                right.write_sql(out)
            }
            Criterion::Connective { left, op, right } => {
                out.push('(');
                left.write_sql(out)?;
                out.push_str(") ");
                out.push_str(op);
                out.push_str(" (");
                right.write_sql(out)?;
                out.push(')');
                Ok(())
            }
            Criterion::Not(term) => {
                out.push_str("NOT (");
                term.write_sql(out)?;
                out.push(')');
                Ok(())
            }
            Criterion::Negative(term) => {
                out.push('-');
                term.write_sql(out)
            }
            Criterion::Postfix { term, op } => {
                term.write_sql(out)?;
                out.push(' ');
                out.push_str(op);
                Ok(())
            }
            Criterion::Like { term, op, pattern } => {
                term.write_sql(out)?;
                out.push(' ');
                out.push_str(op);
                out.push(' ');
                out.push_str(&quote_str(pattern));
                Ok(())
            }
            Criterion::InList {
                term,
                values,
                negated,
            } => {
                term.write_sql(out)?;
                out.push_str(if *negated { " NOT IN (" } else { " IN (" });
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        out.push(',');
                    }
                    out.push_str(value.as_str());
                }
                out.push(')');
                Ok(())
            }
            Criterion::Between {
                term,
                start,
                end,
                negated,
            } => {
                term.write_sql(out)?;
                out.push_str(if *negated { " NOT BETWEEN " } else { " BETWEEN " });
                out.push_str(start);
                out.push_str(" AND ");
                out.push_str(end);
                Ok(())
            }
            Criterion::Grouped(inner) => {
                out.push('(');
                inner.write_sql(out)?;
                out.push(')');
                Ok(())
            }
        }
    }
}

/// Anything usable as a value or identifier inside an expression.
///
/// The combinators each return a new [`Criterion`] node and accept any
/// operand convertible into one, so scalars are lifted on either side:
/// `field.eq(1)` and `lit(1).add(field)` both build well-formed trees.
pub trait Term: Into<Criterion> + Sized {
    // ==================== Comparisons ====================

    /// `self = other`
    fn eq(self, other: impl Into<Criterion>) -> Criterion {
        Criterion::compare(self, "=", other)
    }

    /// `self <> other`
    fn ne(self, other: impl Into<Criterion>) -> Criterion {
        Criterion::compare(self, "<>", other)
    }

    /// `self < other`
    fn lt(self, other: impl Into<Criterion>) -> Criterion {
        Criterion::compare(self, "<", other)
    }

    /// `self <= other`
    fn lte(self, other: impl Into<Criterion>) -> Criterion {
        Criterion::compare(self, "<=", other)
    }

    /// `self > other`
    fn gt(self, other: impl Into<Criterion>) -> Criterion {
        Criterion::compare(self, ">", other)
    }

    /// `self >= other`
    fn gte(self, other: impl Into<Criterion>) -> Criterion {
        Criterion::compare(self, ">=", other)
    }

    /// `self IS DISTINCT FROM other`
    fn distinct_from(self, other: impl Into<Criterion>) -> Criterion {
        Criterion::compare(self, "IS DISTINCT FROM", other)
    }

    /// `self IS NOT DISTINCT FROM other`
    fn not_distinct_from(self, other: impl Into<Criterion>) -> Criterion {
        Criterion::compare(self, "IS NOT DISTINCT FROM", other)
    }

    // ==================== Boolean connectives ====================

    /// `(self) AND (other)`
    fn and(self, other: impl Into<Criterion>) -> Criterion {
        Criterion::connective(self, "AND", other)
    }

    /// `(self) OR (other)`
    fn or(self, other: impl Into<Criterion>) -> Criterion {
        Criterion::connective(self, "OR", other)
    }

    /// `NOT (self)`
    fn not(self) -> Criterion {
        Criterion::Not(Box::new(self.into()))
    }

    // ==================== Arithmetic ====================

    /// `(self) + (other)`
    fn add(self, other: impl Into<Criterion>) -> Criterion {
        Criterion::connective(self, "+", other)
    }

    /// `(self) - (other)`
    fn sub(self, other: impl Into<Criterion>) -> Criterion {
        Criterion::connective(self, "-", other)
    }

    /// `(self) * (other)`
    fn mul(self, other: impl Into<Criterion>) -> Criterion {
        Criterion::connective(self, "*", other)
    }

    /// `(self) / (other)`
    fn div(self, other: impl Into<Criterion>) -> Criterion {
        Criterion::connective(self, "/", other)
    }

    /// `-self`
    fn neg(self) -> Criterion {
        Criterion::Negative(Box::new(self.into()))
    }

    // ==================== Null and truth tests ====================

    /// `self IS NULL`
    fn is_null(self) -> Criterion {
        Criterion::postfix(self, "IS NULL")
    }

    /// `self IS NOT NULL`
    fn is_not_null(self) -> Criterion {
        Criterion::postfix(self, "IS NOT NULL")
    }

    /// `self IS TRUE`
    fn is_true(self) -> Criterion {
        Criterion::postfix(self, "IS TRUE")
    }

    /// `self IS NOT TRUE`
    fn is_not_true(self) -> Criterion {
        Criterion::postfix(self, "IS NOT TRUE")
    }

    /// `self IS FALSE`
    fn is_false(self) -> Criterion {
        Criterion::postfix(self, "IS FALSE")
    }

    /// `self IS NOT FALSE`
    fn is_not_false(self) -> Criterion {
        Criterion::postfix(self, "IS NOT FALSE")
    }

    /// `self IS UNKNOWN`
    fn is_unknown(self) -> Criterion {
        Criterion::postfix(self, "IS UNKNOWN")
    }

    /// `self IS NOT UNKNOWN`
    fn is_not_unknown(self) -> Criterion {
        Criterion::postfix(self, "IS NOT UNKNOWN")
    }

    // ==================== Pattern matching ====================

    /// `self LIKE pattern`
    fn like(self, pattern: impl Into<String>) -> Criterion {
        Criterion::Like {
            term: Box::new(self.into()),
            op: "LIKE",
            pattern: pattern.into(),
        }
    }

    /// `self NOT LIKE pattern`
    fn not_like(self, pattern: impl Into<String>) -> Criterion {
        Criterion::Like {
            term: Box::new(self.into()),
            op: "NOT LIKE",
            pattern: pattern.into(),
        }
    }

    /// `self ILIKE pattern` (case-insensitive)
    fn ilike(self, pattern: impl Into<String>) -> Criterion {
        Criterion::Like {
            term: Box::new(self.into()),
            op: "ILIKE",
            pattern: pattern.into(),
        }
    }

    /// `self NOT ILIKE pattern`
    fn not_ilike(self, pattern: impl Into<String>) -> Criterion {
        Criterion::Like {
            term: Box::new(self.into()),
            op: "NOT ILIKE",
            pattern: pattern.into(),
        }
    }

    // ==================== Membership and range ====================

    /// `self IN (values...)`
    fn in_list<I>(self, values: I) -> Criterion
    where
        I: IntoIterator,
        I::Item: Into<Constant>,
    {
        Criterion::InList {
            term: Box::new(self.into()),
            values: values.into_iter().map(Into::into).collect(),
            negated: false,
        }
    }

    /// `self NOT IN (values...)`
    fn not_in<I>(self, values: I) -> Criterion
    where
        I: IntoIterator,
        I::Item: Into<Constant>,
    {
        Criterion::InList {
            term: Box::new(self.into()),
            values: values.into_iter().map(Into::into).collect(),
            negated: true,
        }
    }

    /// `self BETWEEN start AND end`. Bounds render as raw text.
    fn between(self, start: impl ToString, end: impl ToString) -> Criterion {
        Criterion::Between {
            term: Box::new(self.into()),
            start: start.to_string(),
            end: end.to_string(),
            negated: false,
        }
    }

    /// `self NOT BETWEEN start AND end`. Bounds render as raw text.
    fn not_between(self, start: impl ToString, end: impl ToString) -> Criterion {
        Criterion::Between {
            term: Box::new(self.into()),
            start: start.to_string(),
            end: end.to_string(),
            negated: true,
        }
    }

    // ==================== Grouping ====================

    /// `(self)`, forcing explicit precedence
    fn grouped(self) -> Criterion {
        Criterion::Grouped(Box::new(self.into()))
    }
}

impl Term for Criterion {}
impl Term for Field {}
impl Term for Constant {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Table;

    #[test]
    fn test_constant_bool() {
        assert_eq!(Constant::from(true).as_str(), "TRUE");
        assert_eq!(Constant::from(false).as_str(), "FALSE");
    }

    #[test]
    fn test_constant_numbers() {
        assert_eq!(Constant::from(42i32).as_str(), "42");
        assert_eq!(Constant::from(-7i64).as_str(), "-7");
        assert_eq!(Constant::from(2.5f64).as_str(), "2.5");
    }

    #[test]
    fn test_constant_string_quoting() {
        assert_eq!(Constant::from("abc").as_str(), "'abc'");
        // Falls back to double quotes when the value holds a single quote.
        assert_eq!(Constant::from("it's").as_str(), "\"it's\"");
    }

    #[test]
    fn test_constant_render_idempotent() {
        let c = Criterion::from("abc");
        let first = c.to_sql().unwrap();
        assert_eq!(first, c.to_sql().unwrap());
    }

    #[test]
    fn test_compare_unparenthesized() {
        let t = Table::new("users");
        let c = t.field("id").eq(1);
        assert_eq!(c.to_sql().unwrap(), "users.id = 1");
    }

    #[test]
    fn test_comparison_operators() {
        let t = Table::new("t");
        assert_eq!(t.field("a").ne(1).to_sql().unwrap(), "t.a <> 1");
        assert_eq!(t.field("a").lt(1).to_sql().unwrap(), "t.a < 1");
        assert_eq!(t.field("a").lte(1).to_sql().unwrap(), "t.a <= 1");
        assert_eq!(t.field("a").gt(1).to_sql().unwrap(), "t.a > 1");
        assert_eq!(t.field("a").gte(1).to_sql().unwrap(), "t.a >= 1");
    }

    #[test]
    fn test_and_parenthesizes_both_sides() {
        let t = Table::new("t");
        let c = t.field("a").eq(1).and(t.field("b").eq(2));
        assert_eq!(c.to_sql().unwrap(), "(t.a = 1) AND (t.b = 2)");
    }

    #[test]
    fn test_or_parenthesizes_both_sides() {
        let t = Table::new("t");
        let c = t.field("a").eq(1).or(t.field("b").eq(2));
        assert_eq!(c.to_sql().unwrap(), "(t.a = 1) OR (t.b = 2)");
    }

    #[test]
    fn test_nested_connectives() {
        let t = Table::new("t");
        let c = t
            .field("a")
            .eq(1)
            .and(t.field("b").eq(2))
            .or(t.field("c").eq(3));
        assert_eq!(
            c.to_sql().unwrap(),
            "((t.a = 1) AND (t.b = 2)) OR (t.c = 3)"
        );
    }

    #[test]
    fn test_arithmetic() {
        let t = Table::new("t");
        let c = t.field("price").mul(t.field("qty"));
        assert_eq!(c.to_sql().unwrap(), "(t.price) * (t.qty)");

        let c = t.field("a").add(1).sub(2);
        assert_eq!(c.to_sql().unwrap(), "((t.a) + (1)) - (2)");
    }

    #[test]
    fn test_scalar_lifts_on_left_side() {
        let t = Table::new("t");
        let c = lit(100).div(t.field("count"));
        assert_eq!(c.to_sql().unwrap(), "(100) / (t.count)");
    }

    #[test]
    fn test_not_and_negative() {
        let t = Table::new("t");
        assert_eq!(
            t.field("a").eq(1).not().to_sql().unwrap(),
            "NOT (t.a = 1)"
        );
        assert_eq!(t.field("a").neg().to_sql().unwrap(), "-t.a");
    }

    #[test]
    fn test_null_tests() {
        let t = Table::new("t");
        assert_eq!(t.field("a").is_null().to_sql().unwrap(), "t.a IS NULL");
        assert_eq!(
            t.field("a").is_not_null().to_sql().unwrap(),
            "t.a IS NOT NULL"
        );
    }

    #[test]
    fn test_truth_tests() {
        let t = Table::new("t");
        assert_eq!(t.field("a").is_true().to_sql().unwrap(), "t.a IS TRUE");
        assert_eq!(
            t.field("a").is_not_true().to_sql().unwrap(),
            "t.a IS NOT TRUE"
        );
        assert_eq!(t.field("a").is_false().to_sql().unwrap(), "t.a IS FALSE");
        assert_eq!(
            t.field("a").is_not_false().to_sql().unwrap(),
            "t.a IS NOT FALSE"
        );
        assert_eq!(
            t.field("a").is_unknown().to_sql().unwrap(),
            "t.a IS UNKNOWN"
        );
        assert_eq!(
            t.field("a").is_not_unknown().to_sql().unwrap(),
            "t.a IS NOT UNKNOWN"
        );
    }

    #[test]
    fn test_distinct_tests() {
        let t = Table::new("t");
        assert_eq!(
            t.field("a").distinct_from(t.field("b")).to_sql().unwrap(),
            "t.a IS DISTINCT FROM t.b"
        );
        assert_eq!(
            t.field("a").not_distinct_from(1).to_sql().unwrap(),
            "t.a IS NOT DISTINCT FROM 1"
        );
    }

    #[test]
    fn test_like_family() {
        let t = Table::new("t");
        assert_eq!(
            t.field("name").like("%ab%").to_sql().unwrap(),
            "t.name LIKE '%ab%'"
        );
        assert_eq!(
            t.field("name").not_like("%ab%").to_sql().unwrap(),
            "t.name NOT LIKE '%ab%'"
        );
        assert_eq!(
            t.field("name").ilike("%ab%").to_sql().unwrap(),
            "t.name ILIKE '%ab%'"
        );
        assert_eq!(
            t.field("name").not_ilike("%ab%").to_sql().unwrap(),
            "t.name NOT ILIKE '%ab%'"
        );
    }

    #[test]
    fn test_in_list_mixed_types() {
        let t = Table::new("t");
        let c = t.field("id").in_list([lit(1), lit(2), lit("a")]);
        assert_eq!(c.to_sql().unwrap(), "t.id IN (1,2,'a')");
    }

    #[test]
    fn test_in_list_homogeneous() {
        let t = Table::new("t");
        let c = t.field("id").in_list(vec![1, 2, 3]);
        assert_eq!(c.to_sql().unwrap(), "t.id IN (1,2,3)");
    }

    #[test]
    fn test_not_in() {
        let t = Table::new("t");
        let c = t.field("role").not_in(["admin", "root"]);
        assert_eq!(c.to_sql().unwrap(), "t.role NOT IN ('admin','root')");
    }

    #[test]
    fn test_between_raw_bounds() {
        let t = Table::new("t");
        assert_eq!(
            t.field("age").between(18, 65).to_sql().unwrap(),
            "t.age BETWEEN 18 AND 65"
        );
        // Bounds are raw text: strings are inserted unquoted.
        assert_eq!(
            t.field("day").not_between("'a'", "'z'").to_sql().unwrap(),
            "t.day NOT BETWEEN 'a' AND 'z'"
        );
    }

    #[test]
    fn test_grouped() {
        let t = Table::new("t");
        let c = t.field("a").eq(1).grouped();
        assert_eq!(c.to_sql().unwrap(), "(t.a = 1)");
    }
}

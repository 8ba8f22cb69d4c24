//! SELECT / DELETE statement builder.
//!
//! [`Query`] is a single mutable builder: every method consumes and returns
//! the builder, and rendering via [`Query::to_sql`] is a pure read that can
//! be repeated. Setting the operation twice is last-write-wins: calling
//! `delete()` after `select()` re-targets the same builder.
//!
//! Multiple criteria handed to [`Query::where_`] or [`Query::on`], in one
//! call or across several, are joined with `AND` when rendered. Callers
//! wanting different connectives combine criteria explicitly with
//! [`Term::or`](crate::Term::or) and friends before attaching them.

use crate::error::{BuildError, BuildResult};
use crate::expr::Criterion;
use crate::table::{Field, Selectable};

/// Statement kind dispatched at render time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Operation {
    Select,
    Delete,
}

/// Join keywords of the rendered dialect.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JoinKind {
    Join,
    Inner,
    Outer,
    Left,
    Right,
    LeftOuter,
    RightOuter,
    FullOuter,
    Cross,
}

impl JoinKind {
    /// SQL keyword for this join kind.
    pub fn keyword(self) -> &'static str {
        match self {
            JoinKind::Join => "JOIN",
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Outer => "OUTER JOIN",
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Right => "RIGHT JOIN",
            JoinKind::LeftOuter => "LEFT OUTER JOIN",
            JoinKind::RightOuter => "RIGHT OUTER JOIN",
            JoinKind::FullOuter => "FULL OUTER JOIN",
            JoinKind::Cross => "CROSS JOIN",
        }
    }
}

/// One join record: kind, target, and the ON criteria attached so far.
#[derive(Clone, Debug)]
struct Join {
    kind: JoinKind,
    selectable: Selectable,
    on: Vec<Criterion>,
}

/// A SELECT or DELETE statement under construction.
///
/// Joins, WHERE criteria, and projected terms render in append order; that
/// order is part of the observable contract.
///
/// # Example
/// ```
/// use squill::{Query, Table, Term};
///
/// let users = Table::new("users");
/// let sql = Query::new()
///     .select(&[users.field("id"), users.field("name")])
///     .from_(users.clone())
///     .where_(&[users.field("age").gte(18)])
///     .to_sql()
///     .unwrap();
/// assert_eq!(
///     sql,
///     "SELECT users.id,users.name FROM users AS users WHERE users.age >= 18"
/// );
/// ```
#[derive(Clone, Debug, Default)]
pub struct Query {
    operation: Option<Operation>,
    selectable: Option<Selectable>,
    joins: Vec<Join>,
    distinct: bool,
    only: bool,
    terms: Vec<Field>,
    criteria: Vec<Criterion>,
    alias: Option<String>,
    /// First deferred precondition violation; surfaced at render.
    build_error: Option<BuildError>,
}

impl Query {
    /// Create an empty statement builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the alias used when this query is embedded as a subquery. A
    /// subquery has no default alias; embedding one without calling this is a
    /// render-time error.
    pub fn as_(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Alias of this query, if one was set.
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// Reference a column of this query's result when it is used as a
    /// subquery. Alias the query first; fields derived from an un-aliased
    /// query fail at render.
    pub fn field(&self, name: impl Into<String>) -> Field {
        Field {
            qualifier: self.alias.clone(),
            name: name.into(),
        }
    }

    // ==================== Operation ====================

    /// Set the operation to SELECT and append projection terms. Repeatable
    /// and additive; with no terms ever added, the serializer projects
    /// `<alias>.*`.
    pub fn select(mut self, terms: &[Field]) -> Self {
        self.operation = Some(Operation::Select);
        self.terms.extend_from_slice(terms);
        self
    }

    /// Set the operation to DELETE. `only` restricts the delete to the named
    /// table, excluding tables inheriting from it.
    pub fn delete(mut self, only: bool) -> Self {
        self.operation = Some(Operation::Delete);
        self.only = only;
        self
    }

    /// Make the SELECT ignore duplicated rows.
    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Set the FROM target. Valid for both SELECT and DELETE; DELETE requires
    /// a table.
    pub fn from_(mut self, selectable: impl Into<Selectable>) -> Self {
        self.selectable = Some(selectable.into());
        self
    }

    // ==================== Joins ====================

    fn push_join(mut self, kind: JoinKind, selectable: impl Into<Selectable>) -> Self {
        self.joins.push(Join {
            kind,
            selectable: selectable.into(),
            on: Vec::new(),
        });
        self
    }

    /// `JOIN <selectable>`
    pub fn join(self, selectable: impl Into<Selectable>) -> Self {
        self.push_join(JoinKind::Join, selectable)
    }

    /// `INNER JOIN <selectable>`
    pub fn inner_join(self, selectable: impl Into<Selectable>) -> Self {
        self.push_join(JoinKind::Inner, selectable)
    }

    /// `OUTER JOIN <selectable>`
    pub fn outer_join(self, selectable: impl Into<Selectable>) -> Self {
        self.push_join(JoinKind::Outer, selectable)
    }

    /// `LEFT JOIN <selectable>`
    pub fn left_join(self, selectable: impl Into<Selectable>) -> Self {
        self.push_join(JoinKind::Left, selectable)
    }

    /// `RIGHT JOIN <selectable>`
    pub fn right_join(self, selectable: impl Into<Selectable>) -> Self {
        self.push_join(JoinKind::Right, selectable)
    }

    /// `LEFT OUTER JOIN <selectable>`
    pub fn left_outer_join(self, selectable: impl Into<Selectable>) -> Self {
        self.push_join(JoinKind::LeftOuter, selectable)
    }

    /// `RIGHT OUTER JOIN <selectable>`
    pub fn right_outer_join(self, selectable: impl Into<Selectable>) -> Self {
        self.push_join(JoinKind::RightOuter, selectable)
    }

    /// `FULL OUTER JOIN <selectable>`
    pub fn full_outer_join(self, selectable: impl Into<Selectable>) -> Self {
        self.push_join(JoinKind::FullOuter, selectable)
    }

    /// `CROSS JOIN <selectable>`
    pub fn cross_join(self, selectable: impl Into<Selectable>) -> Self {
        self.push_join(JoinKind::Cross, selectable)
    }

    /// Attach ON criteria to the most recently appended join, additive across
    /// calls like [`Query::where_`]. Calling this before any join exists is a
    /// precondition violation surfaced at render.
    pub fn on(mut self, criteria: &[Criterion]) -> Self {
        match self.joins.last_mut() {
            Some(join) => join.on.extend_from_slice(criteria),
            None => self.defer_error(BuildError::DanglingOn),
        }
        self
    }

    // ==================== Filtering ====================

    /// Append WHERE criteria, additive across calls. Criteria are joined
    /// with `AND` at render.
    pub fn where_(mut self, criteria: &[Criterion]) -> Self {
        self.criteria.extend_from_slice(criteria);
        self
    }

    /// Declared for contract completeness; a query that called this fails
    /// rendering with [`BuildError::Unsupported`].
    pub fn group_by(mut self, _criteria: &[Criterion]) -> Self {
        self.defer_error(BuildError::Unsupported("GROUP BY"));
        self
    }

    fn defer_error(&mut self, error: BuildError) {
        // Keep the first violation; later ones are downstream noise.
        self.build_error.get_or_insert(error);
    }

    // ==================== Rendering ====================

    /// Render the statement.
    ///
    /// Pure read: repeated calls yield byte-identical SQL. Fails on any
    /// recorded or render-time precondition violation (see [`BuildError`]).
    pub fn to_sql(&self) -> BuildResult<String> {
        let sql = self.render()?;
        #[cfg(feature = "tracing")]
        tracing::debug!(target: "squill.sql", sql = %sql, "built statement");
        Ok(sql)
    }

    pub(crate) fn render(&self) -> BuildResult<String> {
        if let Some(error) = &self.build_error {
            return Err(error.clone());
        }
        match self.operation {
            Some(Operation::Select) => self.render_select(),
            Some(Operation::Delete) => self.render_delete(),
            None => Err(BuildError::UnsetOperation),
        }
    }

    fn source(&self) -> BuildResult<&Selectable> {
        self.selectable.as_ref().ok_or(BuildError::MissingSource)
    }

    fn render_select(&self) -> BuildResult<String> {
        let source = self.source()?;
        let alias = source
            .alias()
            .ok_or_else(|| BuildError::unaliased("a FROM source"))?;

        let mut sql = String::from(if self.distinct {
            "SELECT DISTINCT "
        } else {
            "SELECT "
        });
        self.write_terms(&mut sql, alias)?;
        sql.push_str(" FROM ");
        source.write_source(&mut sql)?;
        sql.push_str(" AS ");
        sql.push_str(alias);
        self.write_joins(&mut sql)?;
        self.write_criteria(&mut sql)?;
        Ok(sql)
    }

    fn render_delete(&self) -> BuildResult<String> {
        let table = match self.source()? {
            Selectable::Table(table) => table,
            Selectable::Subquery(_) => return Err(BuildError::DeleteFromSubquery),
        };

        let mut sql = String::from(if self.only {
            "DELETE FROM ONLY "
        } else {
            "DELETE FROM "
        });
        sql.push_str(table.name());
        sql.push_str(" AS ");
        sql.push_str(table.alias());
        self.write_criteria(&mut sql)?;
        Ok(sql)
    }

    fn write_terms(&self, out: &mut String, source_alias: &str) -> BuildResult<()> {
        if self.terms.is_empty() {
            out.push_str(source_alias);
            out.push_str(".*");
            return Ok(());
        }
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            term.write_sql(out)?;
        }
        Ok(())
    }

    fn write_joins(&self, out: &mut String) -> BuildResult<()> {
        for join in &self.joins {
            out.push(' ');
            out.push_str(join.kind.keyword());
            out.push(' ');
            join.selectable.write_source(out)?;
            let alias = join
                .selectable
                .alias()
                .ok_or_else(|| BuildError::unaliased("a join target"))?;
            out.push_str(" AS ");
            out.push_str(alias);
            if !join.on.is_empty() {
                out.push_str(" ON ");
                write_and_joined(out, &join.on)?;
            }
        }
        Ok(())
    }

    fn write_criteria(&self, out: &mut String) -> BuildResult<()> {
        if self.criteria.is_empty() {
            return Ok(());
        }
        out.push_str(" WHERE ");
        write_and_joined(out, &self.criteria)
    }
}

/// Join criteria with ` AND `, the documented multi-criteria policy.
fn write_and_joined(out: &mut String, criteria: &[Criterion]) -> BuildResult<()> {
    for (i, criterion) in criteria.iter().enumerate() {
        if i > 0 {
            out.push_str(" AND ");
        }
        criterion.write_sql(out)?;
    }
    Ok(())
}

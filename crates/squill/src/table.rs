//! FROM-clause sources and their fields.
//!
//! A [`Selectable`] is anything a statement can run upon: a named [`Table`]
//! or a [`Query`](crate::Query) embedded as a subquery (a virtual table).
//! Columns never need pre-declaring; [`Table::field`] / [`Query::field`]
//! synthesize a [`Field`] bound to the parent's alias on demand.

use crate::error::{BuildError, BuildResult};
use crate::query::Query;

/// A column reference, qualified by its parent selectable's alias.
///
/// The qualifier is resolved when the field is created, so alias a selectable
/// with `as_()` before deriving fields from it. Repeated `field()` calls with
/// the same name are equivalent; each returns a fresh value.
#[derive(Clone, Debug)]
pub struct Field {
    pub(crate) qualifier: Option<String>,
    pub(crate) name: String,
}

impl Field {
    /// Column name, without the qualifier.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render as `<qualifier>.<name>`.
    ///
    /// Fails when the parent selectable was an un-aliased subquery.
    pub fn to_sql(&self) -> BuildResult<String> {
        let mut out = String::new();
        self.write_sql(&mut out)?;
        Ok(out)
    }

    pub(crate) fn write_sql(&self, out: &mut String) -> BuildResult<()> {
        match &self.qualifier {
            Some(qualifier) => {
                out.push_str(qualifier);
                out.push('.');
                out.push_str(&self.name);
                Ok(())
            }
            None => Err(BuildError::unaliased(format!(
                "the parent of field `{}`",
                self.name
            ))),
        }
    }
}

/// A named database table usable as a FROM source.
///
/// # Example
/// ```
/// use squill::{Table, Term};
///
/// let users = Table::new("users").as_("u");
/// let sql = users
///     .select()
///     .where_(&[users.field("active").is_true()])
///     .to_sql()
///     .unwrap();
/// assert_eq!(sql, "SELECT u.* FROM users AS u WHERE u.active IS TRUE");
/// ```
#[derive(Clone, Debug)]
pub struct Table {
    name: String,
    alias: Option<String>,
}

impl Table {
    /// Create a table reference by name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
        }
    }

    /// Table name as given to [`Table::new`].
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Alias under which the table is referenced; defaults to the table name.
    pub fn alias(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    /// Set the alias used to reference this table inside a statement.
    pub fn as_(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Reference a column of this table.
    pub fn field(&self, name: impl Into<String>) -> Field {
        Field {
            qualifier: Some(self.alias().to_string()),
            name: name.into(),
        }
    }

    /// Start a SELECT statement over this table.
    pub fn select(&self) -> Query {
        Query::new().select(&[]).from_(self.clone())
    }

    /// Start a DELETE statement over this table. `only` restricts the delete
    /// to this exact table, excluding tables inheriting from it.
    pub fn delete(&self, only: bool) -> Query {
        Query::new().delete(only).from_(self.clone())
    }
}

/// Anything that can appear as a FROM-clause source.
#[derive(Clone, Debug)]
pub enum Selectable {
    /// A named table
    Table(Table),
    /// A query embedded as a virtual table; must be aliased by the caller
    Subquery(Box<Query>),
}

impl Selectable {
    /// Effective alias: a table falls back to its own name, a subquery has no
    /// default.
    pub fn alias(&self) -> Option<&str> {
        match self {
            Selectable::Table(table) => Some(table.alias()),
            Selectable::Subquery(query) => query.alias(),
        }
    }

    /// Reference a column of this source.
    pub fn field(&self, name: impl Into<String>) -> Field {
        match self {
            Selectable::Table(table) => table.field(name),
            Selectable::Subquery(query) => query.field(name),
        }
    }

    /// Render the source text: a bare table name, or the parenthesized SQL of
    /// a subquery.
    pub(crate) fn write_source(&self, out: &mut String) -> BuildResult<()> {
        match self {
            Selectable::Table(table) => {
                out.push_str(table.name());
                Ok(())
            }
            Selectable::Subquery(query) => {
                out.push('(');
                out.push_str(&query.render()?);
                out.push(')');
                Ok(())
            }
        }
    }
}

impl From<Table> for Selectable {
    fn from(table: Table) -> Self {
        Selectable::Table(table)
    }
}

impl From<Query> for Selectable {
    fn from(query: Query) -> Self {
        Selectable::Subquery(Box::new(query))
    }
}

//! # squill
//!
//! A composable SQL statement builder: assemble SELECT/DELETE statements and
//! boolean/arithmetic filter expressions from plain values instead of
//! hand-written SQL strings, then render them to text.
//!
//! ## Features
//!
//! - **Expression trees**: comparisons, `AND`/`OR`/`NOT`, arithmetic, and the
//!   null / membership / pattern / range predicate families, built through
//!   named combinators on the [`Term`] trait
//! - **Construction-time lifting**: scalars become quoted [`Constant`] nodes
//!   when a node is built, so rendering is pure and idempotent
//! - **Fluent statements**: tables, subqueries, joins, aliases, and WHERE
//!   composition on a single [`Query`] builder
//! - **Deterministic output**: joins, criteria, and projected terms render in
//!   append order; multiple WHERE/ON criteria are `AND`-joined
//! - **Explicit failure**: every precondition violation surfaces as a
//!   [`BuildError`], never as partial SQL
//!
//! ## Example
//!
//! ```
//! use squill::{Table, Term};
//!
//! let users = Table::new("users");
//! let sql = users
//!     .select()
//!     .where_(&[users.field("id").eq(1)])
//!     .to_sql()?;
//! assert_eq!(sql, "SELECT users.* FROM users AS users WHERE users.id = 1");
//! # Ok::<(), squill::BuildError>(())
//! ```
//!
//! Rendered text is the sole artifact: there is no parameter binding and no
//! execution layer. Embedding untrusted strings as literals is unsafe by
//! design; pair the output with a driver that supports parameters when input
//! is not fully under the caller's control.

pub mod error;
pub mod expr;
pub mod query;
pub mod table;

pub use error::{BuildError, BuildResult};
pub use expr::{Constant, Criterion, Term, lit};
pub use query::{JoinKind, Query};
pub use table::{Field, Selectable, Table};

//! Error types for squill

use thiserror::Error;

/// Result type alias for statement building operations
pub type BuildResult<T> = Result<T, BuildError>;

/// Precondition violations surfaced while building or rendering a statement.
///
/// Every variant is a caller logic error, never a transient condition: there
/// is no retry and no partial output. Fluent builder methods never panic;
/// violations that happen mid-chain (such as [`BuildError::DanglingOn`]) are
/// recorded on the builder and returned by the next render call.
#[derive(Debug, Clone, Error)]
pub enum BuildError {
    /// Rendered before `select()` or `delete()` was called
    #[error("no operation set: call select() or delete() before rendering")]
    UnsetOperation,

    /// Rendered without a FROM target
    #[error("no FROM source set: call from_() before rendering")]
    MissingSource,

    /// `on()` called before any join was appended
    #[error("on() requires a preceding join")]
    DanglingOn,

    /// A subquery was embedded without an explicit alias
    #[error("subquery used as {context} has no alias: call as_() first")]
    UnaliasedSubquery { context: String },

    /// DELETE can only target a table
    #[error("DELETE requires a table source, got a subquery")]
    DeleteFromSubquery,

    /// Declared contract surface that this builder does not implement
    #[error("{0} is not supported")]
    Unsupported(&'static str),
}

impl BuildError {
    /// Create an un-aliased subquery error naming the violation site
    pub fn unaliased(context: impl Into<String>) -> Self {
        Self::UnaliasedSubquery {
            context: context.into(),
        }
    }

    /// Check if this is a missing-alias error
    pub fn is_unaliased(&self) -> bool {
        matches!(self, Self::UnaliasedSubquery { .. })
    }

    /// Check if this is an unsupported-feature error
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported(_))
    }
}

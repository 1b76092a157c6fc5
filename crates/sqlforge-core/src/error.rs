//! Error types for building, serializing, executing and decoding statements.

use thiserror::Error;

/// Boxed error produced by an execution port.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors raised while building, serializing or running a statement.
#[derive(Debug, Error)]
pub enum SqlError {
    /// `DO UPDATE` was requested without a conflict target on a dialect
    /// that needs one.
    #[error("dialect '{dialect}' requires a conflict target for ON CONFLICT DO UPDATE")]
    ConflictTargetRequired {
        /// Dialect name.
        dialect: String,
    },

    /// A row of values does not match the declared column list.
    #[error("expected {expected} values per row, found {found}")]
    ColumnCountMismatch {
        /// Number of declared columns.
        expected: usize,
        /// Number of values in the offending row.
        found: usize,
    },

    /// A statement is missing a clause it cannot be rendered without.
    #[error("{statement} statement has no {clause}")]
    EmptyClause {
        /// Statement kind, e.g. `UPDATE`.
        statement: &'static str,
        /// Missing clause, e.g. `SET assignments`.
        clause: &'static str,
    },

    /// A node needs a capability the dialect does not offer and no
    /// fallback exists.
    #[error("{feature} is not supported by dialect '{dialect}'")]
    Unsupported {
        /// Dialect name.
        dialect: String,
        /// The missing feature.
        feature: &'static str,
    },

    /// A row could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The execution port failed.
    #[error("execution failed: {0}")]
    Execution(#[source] BoxError),
}

/// Errors raised while decoding a row into a model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A required field has no entry in the row.
    #[error("missing column '{key}' for field '{field}'")]
    MissingColumn {
        /// Model field name.
        field: String,
        /// Looked-up key, prefix included.
        key: String,
    },

    /// A field's entry has an incompatible type.
    #[error("field '{field}' expected {expected}, found {found}")]
    TypeMismatch {
        /// Model field name.
        field: String,
        /// Expected kind.
        expected: &'static str,
        /// Kind found in the row.
        found: &'static str,
    },
}

/// Result type alias for statement operations.
pub type Result<T> = std::result::Result<T, SqlError>;

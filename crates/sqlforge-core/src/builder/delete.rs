//! DELETE statement builder.

use super::{and_predicate, or_predicate, Query};
use crate::ast::{DeleteStatement, Expr, Statement};
use crate::error::Result;

/// A DELETE statement builder.
///
/// A DELETE without WHERE removes every row; no guard is applied.
#[derive(Debug, Clone)]
pub struct Delete {
    statement: DeleteStatement,
}

impl Delete {
    /// Creates a new DELETE builder for `table`.
    #[must_use]
    pub fn new(table: &str) -> Self {
        Self {
            statement: DeleteStatement {
                table: String::from(table),
                ..DeleteStatement::default()
            },
        }
    }

    /// Adds a WHERE predicate, ANDed with any existing one.
    #[must_use]
    pub fn where_(mut self, predicate: Expr) -> Self {
        self.statement.where_clause = and_predicate(self.statement.where_clause, predicate);
        self
    }

    /// Adds a WHERE predicate, ORed with any existing one.
    #[must_use]
    pub fn or_where(mut self, predicate: Expr) -> Self {
        self.statement.where_clause = or_predicate(self.statement.where_clause, predicate);
        self
    }

    /// Appends RETURNING columns.
    #[must_use]
    pub fn returning(mut self, cols: &[&str]) -> Self {
        self.statement
            .returning
            .extend(cols.iter().map(|c| Expr::column(*c)));
        self
    }
}

impl Query for Delete {
    fn into_statement(self) -> Result<Statement> {
        Ok(Statement::Delete(self.statement))
    }
}

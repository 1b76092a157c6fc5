//! INSERT statement builder.

use super::{names, Query};
use crate::ast::{Expr, InsertStatement, Statement};
use crate::error::{Result, SqlError};
use crate::model::Model;
use crate::value::ToSqlValue;

/// An INSERT statement builder.
///
/// Values always travel as binds. Rows whose width differs from the column
/// list are rejected when the statement is finalized.
#[derive(Debug, Clone)]
pub struct Insert {
    statement: InsertStatement,
}

impl Insert {
    /// Creates a new INSERT builder for `table`.
    #[must_use]
    pub fn new(table: &str) -> Self {
        Self {
            statement: InsertStatement {
                table: String::from(table),
                ..InsertStatement::default()
            },
        }
    }

    /// Sets the column list.
    #[must_use]
    pub fn columns(mut self, cols: &[&str]) -> Self {
        self.statement.columns = names(cols);
        self
    }

    /// Appends a row of bound values.
    #[must_use]
    pub fn values<T: ToSqlValue>(mut self, vals: Vec<T>) -> Self {
        self.statement
            .rows
            .push(vals.into_iter().map(|v| Expr::Bind(v.to_sql_value())).collect());
        self
    }

    /// Appends a row of arbitrary expressions (binds, `DEFAULT`, raw, ...).
    #[must_use]
    pub fn values_expr(mut self, row: Vec<Expr>) -> Self {
        self.statement.rows.push(row);
        self
    }

    /// Appends one model as a row, taking the column list from the model.
    #[must_use]
    pub fn model<M: Model>(mut self, model: &M) -> Self {
        self.statement.columns = names(M::COLUMNS);
        self.statement
            .rows
            .push(model.values().into_iter().map(Expr::Bind).collect());
        self
    }

    /// Appends several models as rows.
    #[must_use]
    pub fn models<M: Model>(self, models: &[M]) -> Self {
        models.iter().fold(self, Self::model)
    }

    /// Appends RETURNING columns.
    #[must_use]
    pub fn returning(mut self, cols: &[&str]) -> Self {
        self.statement
            .returning
            .extend(cols.iter().map(|c| Expr::column(*c)));
        self
    }

    /// Appends a RETURNING expression.
    #[must_use]
    pub fn returning_expr(mut self, expr: Expr) -> Self {
        self.statement.returning.push(expr);
        self
    }

    /// Columns configured so far.
    #[must_use]
    pub fn column_names(&self) -> &[String] {
        &self.statement.columns
    }

    pub(crate) fn into_insert_statement(self) -> Result<InsertStatement> {
        let statement = self.statement;
        if !statement.columns.is_empty() {
            if let Some(row) = statement
                .rows
                .iter()
                .find(|r| r.len() != statement.columns.len())
            {
                return Err(SqlError::ColumnCountMismatch {
                    expected: statement.columns.len(),
                    found: row.len(),
                });
            }
        }
        Ok(statement)
    }
}

impl Query for Insert {
    fn into_statement(self) -> Result<Statement> {
        self.into_insert_statement().map(Statement::Insert)
    }
}

//! UPDATE statement builder.

use super::{and_predicate, or_predicate, Query};
use crate::ast::{Assignment, Expr, Statement, UpdateStatement};
use crate::error::Result;
use crate::model::Model;
use crate::value::ToSqlValue;

/// An UPDATE statement builder.
///
/// An UPDATE without any SET assignment is rejected when finalized.
#[derive(Debug, Clone)]
pub struct Update {
    statement: UpdateStatement,
}

impl Update {
    /// Creates a new UPDATE builder for `table`.
    #[must_use]
    pub fn new(table: &str) -> Self {
        Self {
            statement: UpdateStatement {
                table: String::from(table),
                ..UpdateStatement::default()
            },
        }
    }

    /// Sets a column to a bound value.
    #[must_use]
    pub fn set<T: ToSqlValue>(self, column: &str, value: T) -> Self {
        self.set_expr(column, Expr::Bind(value.to_sql_value()))
    }

    /// Sets a column to an expression.
    #[must_use]
    pub fn set_expr(mut self, column: &str, value: Expr) -> Self {
        self.statement.assignments.push(Assignment {
            column: String::from(column),
            value,
        });
        self
    }

    /// Sets every model column to the model's value.
    #[must_use]
    pub fn set_model<M: Model>(self, model: &M) -> Self {
        M::COLUMNS
            .iter()
            .zip(model.values())
            .fold(self, |update, (column, value)| update.set(column, value))
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

impl Query for Update {
    fn into_statement(self) -> Result<Statement> {
        Ok(Statement::Update(self.statement))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::BinaryOp;
    use crate::builder::col;
    use crate::dialect::Dialect;
    use crate::error::SqlError;

    #[test]
    fn test_simple_update() {
        let out = Update::new("planets")
            .set("name", "Terra")
            .where_(col("id").eq(3))
            .build(&Dialect::mysql())
            .unwrap();
        assert_eq!(out.sql, "UPDATE `planets` SET `name` = ? WHERE `id` = ?");
        assert_eq!(out.binds.len(), 2);
    }

    #[test]
    fn test_update_expression() {
        let out = Update::new("planets")
            .set_expr(
                "visits",
                Expr::column("visits").binary(BinaryOp::Add, Expr::literal(1)),
            )
            .build(&Dialect::postgres())
            .unwrap();
        assert_eq!(out.sql, "UPDATE \"planets\" SET \"visits\" = \"visits\" + 1");
        assert!(out.binds.is_empty());
    }

    #[test]
    fn test_update_without_set() {
        let err = Update::new("planets")
            .where_(col("id").eq(3))
            .build(&Dialect::mysql())
            .unwrap_err();
        assert!(matches!(
            err,
            SqlError::EmptyClause {
                statement: "UPDATE",
                ..
            }
        ));
    }
}

//! SELECT statement builder.

use super::{and_predicate, names, or_predicate, Query};
use crate::ast::{
    Expr, JoinClause, JoinType, LockingClause, OrderBy, OrderDirection, SelectStatement,
    Statement,
};
use crate::database::{Database, Executor};
use crate::error::Result;
use crate::model::Model;

/// A SELECT statement builder.
///
/// Clauses may be configured in any order; they always render in SQL clause
/// order. Repeated `where_` / `having` calls are combined with AND.
#[derive(Debug, Clone, Default)]
pub struct Select {
    statement: SelectStatement,
}

impl Select {
    /// Creates a new SELECT builder selecting `*`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds DISTINCT.
    #[must_use]
    pub const fn distinct(mut self) -> Self {
        self.statement.distinct = true;
        self
    }

    /// Appends plain columns.
    #[must_use]
    pub fn columns(mut self, cols: &[&str]) -> Self {
        self.statement
            .columns
            .extend(cols.iter().map(|c| Expr::column(*c)));
        self
    }

    /// Appends an arbitrary expression to the column list.
    #[must_use]
    pub fn column(mut self, expr: impl Into<Expr>) -> Self {
        self.statement.columns.push(expr.into());
        self
    }

    /// Appends every column of a model.
    #[must_use]
    pub fn model_columns<M: Model>(self) -> Self {
        self.columns(M::COLUMNS)
    }

    /// Adds a FROM table.
    #[must_use]
    pub fn from(mut self, table: &str) -> Self {
        self.statement.from.push(Expr::identifier(table));
        self
    }

    /// Adds a FROM table with an alias.
    #[must_use]
    pub fn from_as(mut self, table: &str, alias: &str) -> Self {
        self.statement
            .from
            .push(Expr::identifier(table).alias(alias));
        self
    }

    /// Adds a FROM sub-select with an alias.
    #[must_use]
    pub fn from_subquery(mut self, select: Self, alias: &str) -> Self {
        self.statement.from.push(select.into_subquery().alias(alias));
        self
    }

    /// Adds a join.
    #[must_use]
    pub fn join(mut self, join_type: JoinType, table: &str, on: Expr) -> Self {
        self.statement.joins.push(JoinClause {
            join_type,
            table: Expr::identifier(table),
            on: Some(on),
        });
        self
    }

    /// Adds an INNER JOIN.
    #[must_use]
    pub fn inner_join(self, table: &str, on: Expr) -> Self {
        self.join(JoinType::Inner, table, on)
    }

    /// Adds a LEFT JOIN.
    #[must_use]
    pub fn left_join(self, table: &str, on: Expr) -> Self {
        self.join(JoinType::Left, table, on)
    }

    /// Adds a CROSS JOIN.
    #[must_use]
    pub fn cross_join(mut self, table: &str) -> Self {
        self.statement.joins.push(JoinClause {
            join_type: JoinType::Cross,
            table: Expr::identifier(table),
            on: None,
        });
        self
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

    /// Appends GROUP BY columns.
    #[must_use]
    pub fn group_by(mut self, cols: &[&str]) -> Self {
        self.statement
            .group_by
            .extend(names(cols).into_iter().map(Expr::column));
        self
    }

    /// Adds a HAVING predicate, ANDed with any existing one.
    #[must_use]
    pub fn having(mut self, predicate: Expr) -> Self {
        self.statement.having = and_predicate(self.statement.having, predicate);
        self
    }

    /// Appends an ORDER BY entry.
    #[must_use]
    pub fn order_by(mut self, column: &str, direction: OrderDirection) -> Self {
        self.statement.order_by.push(OrderBy {
            expr: Expr::column(column),
            direction,
        });
        self
    }

    /// Appends an ORDER BY entry on an expression.
    #[must_use]
    pub fn order_by_expr(mut self, expr: Expr, direction: OrderDirection) -> Self {
        self.statement.order_by.push(OrderBy { expr, direction });
        self
    }

    /// Sets LIMIT.
    #[must_use]
    pub const fn limit(mut self, n: u64) -> Self {
        self.statement.limit = Some(n);
        self
    }

    /// Sets OFFSET.
    #[must_use]
    pub const fn offset(mut self, n: u64) -> Self {
        self.statement.offset = Some(n);
        self
    }

    /// Appends `FOR UPDATE`.
    #[must_use]
    pub fn for_update(mut self) -> Self {
        self.statement.lock = Some(LockingClause::Update);
        self
    }

    /// Appends `FOR SHARE`.
    #[must_use]
    pub fn for_share(mut self) -> Self {
        self.statement.lock = Some(LockingClause::Share);
        self
    }

    /// Appends a raw locking clause verbatim.
    #[must_use]
    pub fn lock(mut self, clause: &str) -> Self {
        self.statement.lock = Some(LockingClause::Raw(String::from(clause)));
        self
    }

    /// Turns the builder into a parenthesized sub-select expression.
    #[must_use]
    pub fn into_subquery(self) -> Expr {
        Expr::Subquery(Box::new(self.statement))
    }

    /// Runs the query and decodes every row.
    ///
    /// # Errors
    ///
    /// Serialization, execution and decode errors.
    pub async fn all<M: Model, E: Executor>(self, db: &Database<E>) -> Result<Vec<M>> {
        db.fetch_all(&Statement::Select(self.statement)).await
    }

    /// Runs the query with `LIMIT 1` and decodes the first row.
    ///
    /// # Errors
    ///
    /// Serialization, execution and decode errors.
    pub async fn first<M: Model, E: Executor>(self, db: &Database<E>) -> Result<Option<M>> {
        let statement = self.limit(1).statement;
        db.fetch_first(&Statement::Select(statement)).await
    }
}

impl Query for Select {
    fn into_statement(self) -> Result<Statement> {
        Ok(Statement::Select(self.statement))
    }
}

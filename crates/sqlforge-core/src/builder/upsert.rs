//! INSERT builder with conflict resolution.
//!
//! An [`Upsert`] is an [`Insert`] plus an optional conflict target and an
//! optional conflict action:
//!
//! - no target, no action: renders exactly like the plain INSERT
//! - action only: `ON CONFLICT DO NOTHING` / `ON CONFLICT DO UPDATE ...`
//! - target and action: `ON CONFLICT (<cols>) [WHERE ..] DO ...`
//! - target only: rejected when finalized, there is nothing to do
//!
//! How the clause is spelled is decided by the dialect at serialization.
//!
//! ```rust
//! use sqlforge_core::builder::{Query, Upsert};
//! use sqlforge_core::dialect::{Dialect, UpsertSyntax};
//! use sqlforge_core::value::SqlValue;
//!
//! let dialect = Dialect::mysql().with_upsert_syntax(UpsertSyntax::Standard);
//! let out = Upsert::new("planets")
//!     .columns(&["id", "name"])
//!     .values(vec![SqlValue::Int(1), SqlValue::Text("Earth".into())])
//!     .on_conflict(&["id"])
//!     .do_update(|u| u.set_excluded("name"))
//!     .build(&dialect)
//!     .unwrap();
//!
//! assert_eq!(
//!     out.sql,
//!     "INSERT INTO `planets` (`id`, `name`) VALUES (?, ?) \
//!      ON CONFLICT (`id`) DO UPDATE  SET `name` = `excluded`.`name`"
//! );
//! ```

use tracing::debug;

use super::{and_predicate, names, Insert, Query};
use crate::ast::{Assignment, ConflictAction, ConflictTarget, Expr, OnConflict, Statement};
use crate::error::{Result, SqlError};
use crate::model::Model;
use crate::value::ToSqlValue;

/// An INSERT builder carrying a conflict clause.
#[derive(Debug, Clone)]
pub struct Upsert {
    insert: Insert,
    target: Option<ConflictTarget>,
    action: Option<ConflictAction>,
}

impl Upsert {
    /// Creates a new upsert builder for `table`.
    #[must_use]
    pub fn new(table: &str) -> Self {
        Insert::new(table).into()
    }

    /// Sets the column list.
    #[must_use]
    pub fn columns(mut self, cols: &[&str]) -> Self {
        self.insert = self.insert.columns(cols);
        self
    }

    /// Appends a row of bound values.
    #[must_use]
    pub fn values<T: ToSqlValue>(mut self, vals: Vec<T>) -> Self {
        self.insert = self.insert.values(vals);
        self
    }

    /// Appends a row of arbitrary expressions.
    #[must_use]
    pub fn values_expr(mut self, row: Vec<Expr>) -> Self {
        self.insert = self.insert.values_expr(row);
        self
    }

    /// Appends one model as a row.
    #[must_use]
    pub fn model<M: Model>(mut self, model: &M) -> Self {
        self.insert = self.insert.model(model);
        self
    }

    /// Appends several models as rows.
    #[must_use]
    pub fn models<M: Model>(mut self, models: &[M]) -> Self {
        self.insert = self.insert.models(models);
        self
    }

    /// Appends RETURNING columns.
    #[must_use]
    pub fn returning(mut self, cols: &[&str]) -> Self {
        self.insert = self.insert.returning(cols);
        self
    }

    /// Sets the conflict target columns.
    #[must_use]
    pub fn on_conflict(mut self, cols: &[&str]) -> Self {
        let target = self.target.get_or_insert_with(ConflictTarget::default);
        target.columns = names(cols);
        self
    }

    /// Adds a predicate on the candidate row, rendered right after the
    /// target columns. Repeated calls are combined with AND.
    #[must_use]
    pub fn conflict_where(mut self, predicate: Expr) -> Self {
        let target = self.target.get_or_insert_with(ConflictTarget::default);
        target.predicate = and_predicate(target.predicate.take(), predicate);
        self
    }

    /// Leaves conflicting rows untouched.
    #[must_use]
    pub fn do_nothing(mut self) -> Self {
        self.action = Some(ConflictAction::DoNothing);
        self
    }

    /// Updates conflicting rows with the assignments configured by `f`.
    #[must_use]
    pub fn do_update<F>(mut self, f: F) -> Self
    where
        F: FnOnce(ConflictUpdate) -> ConflictUpdate,
    {
        let update = f(ConflictUpdate::default());
        self.action = Some(ConflictAction::DoUpdate {
            assignments: update.assignments,
            predicate: update.predicate,
        });
        self
    }

    /// Overwrites every model column with the incoming value on conflict.
    #[must_use]
    pub fn do_update_model<M: Model>(self) -> Self {
        self.do_update(|update| {
            M::COLUMNS
                .iter()
                .fold(update, |u, column| u.set_excluded(column))
        })
    }
}

impl From<Insert> for Upsert {
    fn from(insert: Insert) -> Self {
        Self {
            insert,
            target: None,
            action: None,
        }
    }
}

impl Query for Upsert {
    fn into_statement(self) -> Result<Statement> {
        let mut statement = self.insert.into_insert_statement()?;
        statement.on_conflict = match (self.target, self.action) {
            (None, None) => None,
            (Some(_), None) => {
                return Err(SqlError::EmptyClause {
                    statement: "INSERT",
                    clause: "conflict action",
                })
            }
            (target, Some(action)) => {
                debug!(
                    table = %statement.table,
                    targeted = target.is_some(),
                    "Building conflict clause"
                );
                Some(OnConflict {
                    target: target.unwrap_or_default(),
                    action,
                })
            }
        };
        Ok(Statement::Insert(statement))
    }
}

/// Assignments for a conflict `DO UPDATE`.
#[derive(Debug, Clone, Default)]
pub struct ConflictUpdate {
    assignments: Vec<Assignment>,
    predicate: Option<Expr>,
}

impl ConflictUpdate {
    /// Sets `column` to a bound value.
    #[must_use]
    pub fn set<T: ToSqlValue>(self, column: &str, value: T) -> Self {
        self.set_expr(column, Expr::Bind(value.to_sql_value()))
    }

    /// Sets `column` to the value the conflicting insert would have written.
    #[must_use]
    pub fn set_excluded(self, column: &str) -> Self {
        self.set_expr(column, Expr::excluded(column))
    }

    /// Sets `column` to an arbitrary expression.
    #[must_use]
    pub fn set_expr(mut self, column: &str, value: Expr) -> Self {
        self.assignments.push(Assignment {
            column: String::from(column),
            value,
        });
        self
    }

    /// Restricts which conflicting rows are updated. Repeated calls are
    /// combined with AND.
    #[must_use]
    pub fn where_(mut self, predicate: Expr) -> Self {
        self.predicate = and_predicate(self.predicate, predicate);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::col;
    use crate::dialect::{Dialect, UpsertSyntax};
    use crate::value::SqlValue;

    fn standard() -> Dialect {
        Dialect::mysql().with_upsert_syntax(UpsertSyntax::Standard)
    }

    fn planets() -> Upsert {
        Upsert::new("planets")
            .columns(&["id", "name"])
            .values(vec![1_i64.to_sql_value(), "Earth".to_sql_value()])
    }

    #[test]
    fn test_without_conflict_matches_insert() {
        let upsert = planets().build(&standard()).unwrap();
        let insert = Insert::new("planets")
            .columns(&["id", "name"])
            .values(vec![1_i64.to_sql_value(), "Earth".to_sql_value()])
            .build(&standard())
            .unwrap();
        assert_eq!(upsert, insert);
    }

    #[test]
    fn test_target_without_action_is_rejected() {
        let err = planets().on_conflict(&["id"]).build(&standard()).unwrap_err();
        assert!(matches!(
            err,
            SqlError::EmptyClause {
                clause: "conflict action",
                ..
            }
        ));
    }

    #[test]
    fn test_ignore_without_target() {
        let out = planets().do_nothing().build(&standard()).unwrap();
        assert_eq!(
            out.sql,
            "INSERT INTO `planets` (`id`, `name`) VALUES (?, ?) ON CONFLICT DO NOTHING"
        );
    }

    #[test]
    fn test_update_with_both_predicates() {
        let out = planets()
            .on_conflict(&["id"])
            .conflict_where(col("name").not_eq("Pluto"))
            .do_update(|u| u.set("name", "Terra").where_(col("name").not_eq("Earth")))
            .build(&standard())
            .unwrap();
        assert_eq!(
            out.sql,
            "INSERT INTO `planets` (`id`, `name`) VALUES (?, ?) \
             ON CONFLICT (`id`) WHERE `name` <> ? \
             DO UPDATE  SET `name` = ? WHERE `name` <> ?"
        );
        let text = |s: &str| SqlValue::Text(String::from(s));
        assert_eq!(
            out.binds,
            vec![
                SqlValue::Int(1),
                text("Earth"),
                text("Pluto"),
                text("Terra"),
                text("Earth")
            ]
        );
    }

    #[test]
    fn test_update_requires_target_on_postgres() {
        let err = planets()
            .do_update(|u| u.set_excluded("name"))
            .build(&Dialect::postgres())
            .unwrap_err();
        assert!(matches!(err, SqlError::ConflictTargetRequired { .. }));
    }

    #[test]
    fn test_mysql_duplicate_key() {
        let out = planets()
            .on_conflict(&["id"])
            .do_update(|u| u.set_excluded("name"))
            .build(&Dialect::mysql())
            .unwrap();
        assert_eq!(
            out.sql,
            "INSERT INTO `planets` (`id`, `name`) VALUES (?, ?) \
             ON DUPLICATE KEY UPDATE `name` = VALUES(`name`)"
        );
    }
}

//! SELECT, INSERT (with conflict resolution), UPDATE and DELETE rendering.

use tracing::debug;

use super::Serializer;
use crate::ast::{
    Assignment, ConflictAction, DeleteStatement, Expr, InsertStatement, LockingClause, OnConflict,
    SelectStatement, UpdateStatement,
};
use crate::dialect::UpsertSyntax;
use crate::error::{Result, SqlError};

impl Serializer<'_> {
    /// Appends a SELECT statement.
    ///
    /// Clause order is fixed: columns, FROM, joins, WHERE, GROUP BY, HAVING,
    /// ORDER BY, LIMIT, OFFSET, locking clause.
    ///
    /// # Errors
    ///
    /// Propagates failures of nested expressions.
    pub fn write_select(&mut self, select: &SelectStatement) -> Result<()> {
        self.write("SELECT ");
        if select.distinct {
            self.write("DISTINCT ");
        }
        if select.columns.is_empty() {
            self.write("*");
        } else {
            self.write_list(&select.columns, ", ")?;
        }

        if !select.from.is_empty() {
            self.write(" FROM ");
            self.write_list(&select.from, ", ")?;
        }

        for join in &select.joins {
            self.write(" ");
            self.write(join.join_type.as_str());
            self.write(" ");
            self.write_expr(&join.table)?;
            if let Some(on) = &join.on {
                self.write(" ON ");
                self.write_expr(on)?;
            }
        }

        if let Some(predicate) = &select.where_clause {
            self.write(" WHERE ");
            self.write_expr(predicate)?;
        }

        if !select.group_by.is_empty() {
            self.write(" GROUP BY ");
            self.write_list(&select.group_by, ", ")?;
        }

        if let Some(predicate) = &select.having {
            self.write(" HAVING ");
            self.write_expr(predicate)?;
        }

        if !select.order_by.is_empty() {
            self.write(" ORDER BY ");
            for (i, order) in select.order_by.iter().enumerate() {
                if i > 0 {
                    self.write(", ");
                }
                self.write_expr(&order.expr)?;
                self.write(" ");
                self.write(order.direction.as_str());
            }
        }

        if let Some(n) = select.limit {
            self.write(&format!(" LIMIT {n}"));
        }

        if let Some(n) = select.offset {
            self.write(&format!(" OFFSET {n}"));
        }

        match &select.lock {
            Some(LockingClause::Update) => self.write(" FOR UPDATE"),
            Some(LockingClause::Share) => self.write(" FOR SHARE"),
            Some(LockingClause::Raw(clause)) => {
                self.write(" ");
                self.write(clause);
            }
            None => {}
        }

        Ok(())
    }

    /// Appends an INSERT statement, including its conflict clause.
    ///
    /// # Errors
    ///
    /// Fails when there are no value rows, when a row's width differs from
    /// the column list, or when the conflict clause or `RETURNING` cannot be
    /// expressed in the dialect.
    pub fn write_insert(&mut self, insert: &InsertStatement) -> Result<()> {
        if insert.rows.is_empty() {
            return Err(SqlError::EmptyClause {
                statement: "INSERT",
                clause: "VALUES rows",
            });
        }
        if !insert.columns.is_empty() {
            if let Some(row) = insert.rows.iter().find(|r| r.len() != insert.columns.len()) {
                return Err(SqlError::ColumnCountMismatch {
                    expected: insert.columns.len(),
                    found: row.len(),
                });
            }
        }

        let ignore = match &insert.on_conflict {
            Some(conflict) => self.check_conflict(conflict)?,
            None => false,
        };

        self.write(if ignore {
            "INSERT IGNORE INTO "
        } else {
            "INSERT INTO "
        });
        self.write_identifier(&insert.table);
        if !insert.columns.is_empty() {
            self.write(" (");
            self.write_identifiers(&insert.columns);
            self.write(")");
        }

        self.write(" VALUES ");
        for (i, row) in insert.rows.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.write("(");
            self.write_list(row, ", ")?;
            self.write(")");
        }

        if let Some(conflict) = &insert.on_conflict {
            self.write_conflict(conflict)?;
        }

        self.write_returning(&insert.returning)
    }

    /// Validates a conflict clause against the dialect before any text is
    /// written. Returns whether the clause collapses into `INSERT IGNORE`.
    fn check_conflict(&self, conflict: &OnConflict) -> Result<bool> {
        match self.dialect().upsert_syntax() {
            UpsertSyntax::Unsupported => Err(self.unsupported("conflict resolution")),
            UpsertSyntax::Standard => {
                if conflict.target.columns.is_empty() && conflict.target.predicate.is_some() {
                    return Err(SqlError::EmptyClause {
                        statement: "INSERT",
                        clause: "conflict target columns for the target predicate",
                    });
                }
                if let ConflictAction::DoUpdate { assignments, .. } = &conflict.action {
                    if conflict.target.columns.is_empty()
                        && self.dialect().conflict_target_required()
                    {
                        return Err(SqlError::ConflictTargetRequired {
                            dialect: String::from(self.dialect().name()),
                        });
                    }
                    if assignments.is_empty() {
                        return Err(SqlError::EmptyClause {
                            statement: "INSERT",
                            clause: "DO UPDATE assignments",
                        });
                    }
                }
                Ok(false)
            }
            UpsertSyntax::MySql => {
                if conflict.target.predicate.is_some() {
                    return Err(self.unsupported("conflict target predicate"));
                }
                if !conflict.target.columns.is_empty() {
                    debug!(
                        dialect = self.dialect().name(),
                        "Conflict target implied by unique keys, omitting columns"
                    );
                }
                match &conflict.action {
                    ConflictAction::DoNothing => Ok(true),
                    ConflictAction::DoUpdate {
                        assignments,
                        predicate,
                    } => {
                        if predicate.is_some() {
                            return Err(self.unsupported("conflict action predicate"));
                        }
                        if assignments.is_empty() {
                            return Err(SqlError::EmptyClause {
                                statement: "INSERT",
                                clause: "DO UPDATE assignments",
                            });
                        }
                        Ok(false)
                    }
                }
            }
        }
    }

    fn write_conflict(&mut self, conflict: &OnConflict) -> Result<()> {
        match self.dialect().upsert_syntax() {
            UpsertSyntax::Standard => {
                self.write(" ON CONFLICT");
                if !conflict.target.columns.is_empty() {
                    self.write(" (");
                    self.write_identifiers(&conflict.target.columns);
                    self.write(")");
                    if let Some(predicate) = &conflict.target.predicate {
                        self.write(" WHERE ");
                        self.write_expr(predicate)?;
                    }
                }
                match &conflict.action {
                    ConflictAction::DoNothing => self.write(" DO NOTHING"),
                    ConflictAction::DoUpdate {
                        assignments,
                        predicate,
                    } => {
                        // Two spaces before SET, kept for byte parity with
                        // existing consumers of the rendered text.
                        self.write(" DO UPDATE  SET ");
                        self.write_assignments(assignments)?;
                        if let Some(predicate) = predicate {
                            self.write(" WHERE ");
                            self.write_expr(predicate)?;
                        }
                    }
                }
                Ok(())
            }
            UpsertSyntax::MySql => {
                if let ConflictAction::DoUpdate { assignments, .. } = &conflict.action {
                    self.write(" ON DUPLICATE KEY UPDATE ");
                    self.write_assignments(assignments)?;
                }
                Ok(())
            }
            UpsertSyntax::Unsupported => Err(self.unsupported("conflict resolution")),
        }
    }

    fn write_assignments(&mut self, assignments: &[Assignment]) -> Result<()> {
        for (i, assignment) in assignments.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.write_identifier(&assignment.column);
            self.write(" = ");
            self.write_expr(&assignment.value)?;
        }
        Ok(())
    }

    fn write_returning(&mut self, returning: &[Expr]) -> Result<()> {
        if returning.is_empty() {
            return Ok(());
        }
        if !self.dialect().supports_returning() {
            return Err(self.unsupported("RETURNING"));
        }
        self.write(" RETURNING ");
        self.write_list(returning, ", ")
    }

    /// Appends an UPDATE statement.
    ///
    /// # Errors
    ///
    /// Fails without SET assignments or when `RETURNING` is unsupported.
    pub fn write_update(&mut self, update: &UpdateStatement) -> Result<()> {
        if update.assignments.is_empty() {
            return Err(SqlError::EmptyClause {
                statement: "UPDATE",
                clause: "SET assignments",
            });
        }
        if !update.returning.is_empty() && !self.dialect().supports_returning() {
            return Err(self.unsupported("RETURNING"));
        }
        self.write("UPDATE ");
        self.write_identifier(&update.table);
        self.write(" SET ");
        self.write_assignments(&update.assignments)?;
        if let Some(predicate) = &update.where_clause {
            self.write(" WHERE ");
            self.write_expr(predicate)?;
        }
        self.write_returning(&update.returning)
    }

    /// Appends a DELETE statement.
    ///
    /// # Errors
    ///
    /// Fails when `RETURNING` is unsupported.
    pub fn write_delete(&mut self, delete: &DeleteStatement) -> Result<()> {
        if !delete.returning.is_empty() && !self.dialect().supports_returning() {
            return Err(self.unsupported("RETURNING"));
        }
        self.write("DELETE FROM ");
        self.write_identifier(&delete.table);
        if let Some(predicate) = &delete.where_clause {
            self.write(" WHERE ");
            self.write_expr(predicate)?;
        }
        self.write_returning(&delete.returning)
    }
}

//! ALTER TABLE builder.

use super::Query;
use crate::ast::{
    AlterTableAction, AlterTableStatement, ColumnConstraint, ColumnDefinition, DataType,
    Statement,
};
use crate::error::Result;

/// An ALTER TABLE builder. Actions render comma-separated in call order.
#[derive(Debug, Clone)]
pub struct AlterTable {
    statement: AlterTableStatement,
}

impl AlterTable {
    /// Creates a new ALTER TABLE builder.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            statement: AlterTableStatement {
                name: String::from(name),
                actions: Vec::new(),
            },
        }
    }

    /// Adds `ADD COLUMN`.
    #[must_use]
    pub fn add_column(
        mut self,
        name: &str,
        data_type: DataType,
        constraints: impl IntoIterator<Item = ColumnConstraint>,
    ) -> Self {
        self.statement
            .actions
            .push(AlterTableAction::AddColumn(ColumnDefinition::new(
                name,
                data_type,
                constraints.into_iter().collect(),
            )));
        self
    }

    /// Adds `DROP COLUMN`.
    #[must_use]
    pub fn drop_column(mut self, name: &str) -> Self {
        self.statement
            .actions
            .push(AlterTableAction::DropColumn(String::from(name)));
        self
    }

    /// Adds `RENAME COLUMN <from> TO <to>`.
    #[must_use]
    pub fn rename_column(mut self, from: &str, to: &str) -> Self {
        self.statement.actions.push(AlterTableAction::RenameColumn {
            from: String::from(from),
            to: String::from(to),
        });
        self
    }

    /// Adds `RENAME TO <name>`.
    #[must_use]
    pub fn rename_to(mut self, name: &str) -> Self {
        self.statement
            .actions
            .push(AlterTableAction::RenameTo(String::from(name)));
        self
    }
}

impl Query for AlterTable {
    fn into_statement(self) -> Result<Statement> {
        Ok(Statement::AlterTable(self.statement))
    }
}

//! DDL statement AST types: CREATE, ALTER and DROP TABLE.

use super::expression::Expr;
use super::types::DataType;

/// Foreign key referential action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForeignKeyAction {
    /// No action.
    NoAction,
    /// Restrict deletion/update.
    Restrict,
    /// Cascade the operation.
    Cascade,
    /// Set to NULL.
    SetNull,
    /// Set to default value.
    SetDefault,
}

impl ForeignKeyAction {
    /// Returns the SQL representation of the action.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::NoAction => "NO ACTION",
            Self::Restrict => "RESTRICT",
            Self::Cascade => "CASCADE",
            Self::SetNull => "SET NULL",
            Self::SetDefault => "SET DEFAULT",
        }
    }
}

/// A reference to columns of another table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyRef {
    /// The referenced table name.
    pub table: String,
    /// The referenced column names.
    pub columns: Vec<String>,
    /// Action on delete.
    pub on_delete: Option<ForeignKeyAction>,
    /// Action on update.
    pub on_update: Option<ForeignKeyAction>,
}

impl ForeignKeyRef {
    /// Creates a reference without actions.
    #[must_use]
    pub fn new(table: impl Into<String>, columns: &[&str]) -> Self {
        Self {
            table: table.into(),
            columns: columns.iter().map(|c| String::from(*c)).collect(),
            on_delete: None,
            on_update: None,
        }
    }

    /// Sets the ON DELETE action.
    #[must_use]
    pub const fn on_delete(mut self, action: ForeignKeyAction) -> Self {
        self.on_delete = Some(action);
        self
    }

    /// Sets the ON UPDATE action.
    #[must_use]
    pub const fn on_update(mut self, action: ForeignKeyAction) -> Self {
        self.on_update = Some(action);
        self
    }
}

/// A constraint attached to one column, rendered in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnConstraint {
    /// `NOT NULL`.
    NotNull,
    /// `NULL`.
    Null,
    /// `PRIMARY KEY`, optionally auto-incrementing.
    PrimaryKey {
        /// Append the dialect's auto-increment keyword.
        auto_increment: bool,
    },
    /// `UNIQUE`.
    Unique,
    /// `DEFAULT <expr>`.
    Default(Expr),
    /// `CHECK (<expr>)`.
    Check(Expr),
    /// `REFERENCES <table> (<cols>) [ON DELETE ..] [ON UPDATE ..]`.
    References(ForeignKeyRef),
    /// `COLLATE <name>`.
    Collate(String),
}

impl ColumnConstraint {
    /// `PRIMARY KEY AUTO_INCREMENT` (keyword per dialect).
    #[must_use]
    pub const fn primary_key_auto() -> Self {
        Self::PrimaryKey {
            auto_increment: true,
        }
    }

    /// `PRIMARY KEY`.
    #[must_use]
    pub const fn primary_key() -> Self {
        Self::PrimaryKey {
            auto_increment: false,
        }
    }

    /// `DEFAULT` with an inline literal.
    #[must_use]
    pub fn default_value(value: impl Into<crate::value::Literal>) -> Self {
        Self::Default(Expr::Literal(value.into()))
    }

    /// `REFERENCES table (column)`.
    #[must_use]
    pub fn references(table: impl Into<String>, column: &str) -> Self {
        Self::References(ForeignKeyRef::new(table, &[column]))
    }
}

/// A column definition.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDefinition {
    /// Column name.
    pub name: String,
    /// Data type.
    pub data_type: DataType,
    /// Constraints in declaration order.
    pub constraints: Vec<ColumnConstraint>,
}

impl ColumnDefinition {
    /// Creates a column definition.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        data_type: DataType,
        constraints: Vec<ColumnConstraint>,
    ) -> Self {
        Self {
            name: name.into(),
            data_type,
            constraints,
        }
    }
}

/// The body of a table-level constraint.
#[derive(Debug, Clone, PartialEq)]
pub enum TableConstraintKind {
    /// `PRIMARY KEY (<cols>)`.
    PrimaryKey(Vec<String>),
    /// `UNIQUE (<cols>)`.
    Unique(Vec<String>),
    /// `CHECK (<expr>)`.
    Check(Expr),
    /// `FOREIGN KEY (<cols>) REFERENCES ...`.
    ForeignKey {
        /// Local columns.
        columns: Vec<String>,
        /// Referenced table and columns.
        references: ForeignKeyRef,
    },
}

/// A table-level constraint, optionally named.
#[derive(Debug, Clone, PartialEq)]
pub struct TableConstraint {
    /// `CONSTRAINT <name>` prefix.
    pub name: Option<String>,
    /// The constraint body.
    pub kind: TableConstraintKind,
}

/// A CREATE TABLE statement.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CreateTableStatement {
    /// Table name.
    pub name: String,
    /// `TEMPORARY`.
    pub temporary: bool,
    /// `IF NOT EXISTS`.
    pub if_not_exists: bool,
    /// Column definitions.
    pub columns: Vec<ColumnDefinition>,
    /// Table constraints, rendered after all columns.
    pub constraints: Vec<TableConstraint>,
}

/// One ALTER TABLE action.
#[derive(Debug, Clone, PartialEq)]
pub enum AlterTableAction {
    /// `ADD COLUMN <definition>`.
    AddColumn(ColumnDefinition),
    /// `DROP COLUMN <name>`.
    DropColumn(String),
    /// `RENAME COLUMN <from> TO <to>`.
    RenameColumn {
        /// Current name.
        from: String,
        /// New name.
        to: String,
    },
    /// `RENAME TO <name>`.
    RenameTo(String),
}

/// An ALTER TABLE statement.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AlterTableStatement {
    /// Table name.
    pub name: String,
    /// Actions in call order.
    pub actions: Vec<AlterTableAction>,
}

/// `CASCADE` / `RESTRICT` on DROP.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropBehavior {
    /// `CASCADE`.
    Cascade,
    /// `RESTRICT`.
    Restrict,
}

impl DropBehavior {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Cascade => "CASCADE",
            Self::Restrict => "RESTRICT",
        }
    }
}

/// A DROP TABLE statement.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DropTableStatement {
    /// Tables to drop.
    pub names: Vec<String>,
    /// `IF EXISTS`.
    pub if_exists: bool,
    /// `CASCADE` / `RESTRICT`.
    pub behavior: Option<DropBehavior>,
}

//! CREATE TABLE builder.

use super::{names, Query};
use crate::ast::{
    ColumnConstraint, ColumnDefinition, CreateTableStatement, DataType, Expr, ForeignKeyRef,
    Statement, TableConstraint, TableConstraintKind,
};
use crate::error::Result;

/// A CREATE TABLE builder.
///
/// Columns render in the order they were added, then table constraints in
/// the order they were declared.
///
/// ```rust
/// use sqlforge_core::ast::{ColumnConstraint, DataType};
/// use sqlforge_core::builder::{CreateTable, Query};
/// use sqlforge_core::dialect::Dialect;
///
/// let out = CreateTable::new("planets")
///     .if_not_exists()
///     .column("id", DataType::Bigint, [ColumnConstraint::primary_key_auto()])
///     .column("name", DataType::Text, [ColumnConstraint::NotNull])
///     .build(&Dialect::mysql())
///     .unwrap();
///
/// assert_eq!(
///     out.sql,
///     "CREATE TABLE IF NOT EXISTS `planets` \
///      (`id` BIGINT PRIMARY KEY AUTO_INCREMENT, `name` TEXT NOT NULL)"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct CreateTable {
    statement: CreateTableStatement,
}

impl CreateTable {
    /// Creates a new CREATE TABLE builder.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            statement: CreateTableStatement {
                name: String::from(name),
                ..CreateTableStatement::default()
            },
        }
    }

    /// Adds `TEMPORARY`.
    #[must_use]
    pub const fn temporary(mut self) -> Self {
        self.statement.temporary = true;
        self
    }

    /// Adds `IF NOT EXISTS`.
    #[must_use]
    pub const fn if_not_exists(mut self) -> Self {
        self.statement.if_not_exists = true;
        self
    }

    /// Adds a column with its constraints, rendered in the given order.
    #[must_use]
    pub fn column(
        mut self,
        name: &str,
        data_type: DataType,
        constraints: impl IntoIterator<Item = ColumnConstraint>,
    ) -> Self {
        self.statement.columns.push(ColumnDefinition::new(
            name,
            data_type,
            constraints.into_iter().collect(),
        ));
        self
    }

    /// Adds a prepared column definition.
    #[must_use]
    pub fn column_definition(mut self, column: ColumnDefinition) -> Self {
        self.statement.columns.push(column);
        self
    }

    /// Adds a table constraint, optionally named.
    #[must_use]
    pub fn constraint(mut self, name: Option<&str>, kind: TableConstraintKind) -> Self {
        self.statement.constraints.push(TableConstraint {
            name: name.map(String::from),
            kind,
        });
        self
    }

    /// Adds `PRIMARY KEY (<cols>)`.
    #[must_use]
    pub fn primary_key(self, cols: &[&str]) -> Self {
        self.constraint(None, TableConstraintKind::PrimaryKey(names(cols)))
    }

    /// Adds `UNIQUE (<cols>)`.
    #[must_use]
    pub fn unique(self, cols: &[&str]) -> Self {
        self.constraint(None, TableConstraintKind::Unique(names(cols)))
    }

    /// Adds `CHECK (<expr>)`.
    #[must_use]
    pub fn check(self, name: Option<&str>, predicate: Expr) -> Self {
        self.constraint(name, TableConstraintKind::Check(predicate))
    }

    /// Adds `FOREIGN KEY (<cols>) REFERENCES ...`.
    #[must_use]
    pub fn foreign_key(self, cols: &[&str], references: ForeignKeyRef) -> Self {
        self.constraint(
            None,
            TableConstraintKind::ForeignKey {
                columns: names(cols),
                references,
            },
        )
    }
}

impl Query for CreateTable {
    fn into_statement(self) -> Result<Statement> {
        Ok(Statement::CreateTable(self.statement))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::ForeignKeyAction;
    use crate::dialect::{BooleanLiterals, Dialect};

    #[test]
    fn test_defaults_follow_literal_encoding() {
        let table = || {
            CreateTable::new("planets")
                .column("name", DataType::Text, [ColumnConstraint::default_value("none")])
                .column("rings", DataType::Integer, [ColumnConstraint::default_value(0)])
                .column("mass", DataType::Real, [ColumnConstraint::default_value(2.5)])
                .column(
                    "habitable",
                    DataType::Boolean,
                    [ColumnConstraint::NotNull, ColumnConstraint::default_value(false)],
                )
        };
        let out = table().build(&Dialect::postgres()).unwrap();
        assert_eq!(
            out.sql,
            "CREATE TABLE \"planets\" (\"name\" TEXT DEFAULT 'none', \
             \"rings\" INTEGER DEFAULT 0, \"mass\" REAL DEFAULT 2.5, \
             \"habitable\" BOOLEAN NOT NULL DEFAULT false)"
        );

        let numeric = Dialect::postgres().with_boolean_literals(BooleanLiterals::Numeric);
        let out = table().build(&numeric).unwrap();
        assert!(out.sql.ends_with("\"habitable\" BOOLEAN NOT NULL DEFAULT 0)"));
    }

    #[test]
    fn test_table_constraints_after_columns() {
        let out = CreateTable::new("moons")
            .column("planet_id", DataType::Bigint, [])
            .column("name", DataType::Varchar(Some(32)), [])
            .primary_key(&["planet_id", "name"])
            .check(
                Some("name_len"),
                Expr::function("LENGTH", vec![Expr::column("name")]).gt(Expr::literal(1)),
            )
            .foreign_key(
                &["planet_id"],
                ForeignKeyRef::new("planets", &["id"])
                    .on_delete(ForeignKeyAction::Cascade)
                    .on_update(ForeignKeyAction::Restrict),
            )
            .build(&Dialect::mysql())
            .unwrap();
        assert_eq!(
            out.sql,
            "CREATE TABLE `moons` (`planet_id` BIGINT, `name` VARCHAR(32), \
             PRIMARY KEY (`planet_id`, `name`), \
             CONSTRAINT `name_len` CHECK (LENGTH(`name`) > 1), \
             FOREIGN KEY (`planet_id`) REFERENCES `planets` (`id`) \
             ON DELETE CASCADE ON UPDATE RESTRICT)"
        );
    }

    #[test]
    fn test_column_reference_and_collation() {
        let out = CreateTable::new("moons")
            .temporary()
            .column(
                "planet_id",
                DataType::Bigint,
                [ColumnConstraint::references("planets", "id")],
            )
            .column(
                "name",
                DataType::Text,
                [ColumnConstraint::Collate(String::from("NOCASE"))],
            )
            .build(&Dialect::sqlite())
            .unwrap();
        assert_eq!(
            out.sql,
            "CREATE TEMPORARY TABLE \"moons\" (\"planet_id\" BIGINT REFERENCES \"planets\" (\"id\"), \
             \"name\" TEXT COLLATE NOCASE)"
        );
    }
}

//! CREATE, ALTER and DROP TABLE rendering.

use tracing::debug;

use super::Serializer;
use crate::ast::{
    AlterTableAction, AlterTableStatement, ColumnConstraint, ColumnDefinition,
    CreateTableStatement, DropTableStatement, ForeignKeyRef, TableConstraint, TableConstraintKind,
};
use crate::error::{Result, SqlError};

impl Serializer<'_> {
    /// Appends a CREATE TABLE statement.
    ///
    /// `IF NOT EXISTS` is dropped on dialects that cannot express it.
    ///
    /// # Errors
    ///
    /// Fails without columns, or when an auto-increment column is declared
    /// on a dialect without the keyword.
    pub fn write_create_table(&mut self, create: &CreateTableStatement) -> Result<()> {
        if create.columns.is_empty() {
            return Err(SqlError::EmptyClause {
                statement: "CREATE TABLE",
                clause: "column definitions",
            });
        }

        self.write("CREATE ");
        if create.temporary {
            self.write("TEMPORARY ");
        }
        self.write("TABLE ");
        if create.if_not_exists {
            self.write_if_exists_guard("IF NOT EXISTS ");
        }
        self.write_identifier(&create.name);
        self.write(" (");

        for (i, column) in create.columns.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.write_column_definition(column)?;
        }
        for constraint in &create.constraints {
            self.write(", ");
            self.write_table_constraint(constraint)?;
        }

        self.write(")");
        Ok(())
    }

    fn write_if_exists_guard(&mut self, guard: &str) {
        if self.dialect().supports_if_exists() {
            self.write(guard);
        } else {
            debug!(
                dialect = self.dialect().name(),
                guard = guard.trim_end(),
                "Existence guard unsupported, omitting it"
            );
        }
    }

    fn write_column_definition(&mut self, column: &ColumnDefinition) -> Result<()> {
        self.write_identifier(&column.name);
        self.write(" ");
        self.write(&column.data_type.to_string());

        for constraint in &column.constraints {
            self.write(" ");
            match constraint {
                ColumnConstraint::NotNull => self.write("NOT NULL"),
                ColumnConstraint::Null => self.write("NULL"),
                ColumnConstraint::PrimaryKey { auto_increment } => {
                    self.write("PRIMARY KEY");
                    if *auto_increment {
                        if !self.dialect().supports_auto_increment() {
                            return Err(self.unsupported("auto-increment"));
                        }
                        let keyword = String::from(self.dialect().auto_increment_keyword());
                        self.write(" ");
                        self.write(&keyword);
                    }
                }
                ColumnConstraint::Unique => self.write("UNIQUE"),
                ColumnConstraint::Default(expr) => {
                    self.write("DEFAULT ");
                    self.write_expr(expr)?;
                }
                ColumnConstraint::Check(expr) => {
                    self.write("CHECK (");
                    self.write_expr(expr)?;
                    self.write(")");
                }
                ColumnConstraint::References(reference) => self.write_references(reference),
                ColumnConstraint::Collate(collation) => {
                    self.write("COLLATE ");
                    self.write(collation);
                }
            }
        }
        Ok(())
    }

    fn write_table_constraint(&mut self, constraint: &TableConstraint) -> Result<()> {
        if let Some(name) = &constraint.name {
            self.write("CONSTRAINT ");
            self.write_identifier(name);
            self.write(" ");
        }
        match &constraint.kind {
            TableConstraintKind::PrimaryKey(columns) => {
                self.write("PRIMARY KEY (");
                self.write_identifiers(columns);
                self.write(")");
            }
            TableConstraintKind::Unique(columns) => {
                self.write("UNIQUE (");
                self.write_identifiers(columns);
                self.write(")");
            }
            TableConstraintKind::Check(expr) => {
                self.write("CHECK (");
                self.write_expr(expr)?;
                self.write(")");
            }
            TableConstraintKind::ForeignKey {
                columns,
                references,
            } => {
                self.write("FOREIGN KEY (");
                self.write_identifiers(columns);
                self.write(") ");
                self.write_references(references);
            }
        }
        Ok(())
    }

    fn write_references(&mut self, reference: &ForeignKeyRef) {
        self.write("REFERENCES ");
        self.write_identifier(&reference.table);
        self.write(" (");
        self.write_identifiers(&reference.columns);
        self.write(")");
        if let Some(action) = reference.on_delete {
            self.write(" ON DELETE ");
            self.write(action.as_sql());
        }
        if let Some(action) = reference.on_update {
            self.write(" ON UPDATE ");
            self.write(action.as_sql());
        }
    }

    /// Appends an ALTER TABLE statement.
    ///
    /// # Errors
    ///
    /// Fails without actions, or with several actions on a dialect that
    /// accepts one per statement.
    pub fn write_alter_table(&mut self, alter: &AlterTableStatement) -> Result<()> {
        if alter.actions.is_empty() {
            return Err(SqlError::EmptyClause {
                statement: "ALTER TABLE",
                clause: "actions",
            });
        }
        if alter.actions.len() > 1 && !self.dialect().supports_multiple_alter_actions() {
            return Err(self.unsupported("multiple ALTER TABLE actions"));
        }

        self.write("ALTER TABLE ");
        self.write_identifier(&alter.name);
        self.write(" ");
        for (i, action) in alter.actions.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            match action {
                AlterTableAction::AddColumn(column) => {
                    self.write("ADD COLUMN ");
                    self.write_column_definition(column)?;
                }
                AlterTableAction::DropColumn(name) => {
                    self.write("DROP COLUMN ");
                    self.write_identifier(name);
                }
                AlterTableAction::RenameColumn { from, to } => {
                    self.write("RENAME COLUMN ");
                    self.write_identifier(from);
                    self.write(" TO ");
                    self.write_identifier(to);
                }
                AlterTableAction::RenameTo(name) => {
                    self.write("RENAME TO ");
                    self.write_identifier(name);
                }
            }
        }
        Ok(())
    }

    /// Appends a DROP TABLE statement.
    ///
    /// `IF EXISTS` and `CASCADE`/`RESTRICT` are dropped on dialects that
    /// cannot express them.
    ///
    /// # Errors
    ///
    /// Fails when no table was named.
    pub fn write_drop_table(&mut self, drop: &DropTableStatement) -> Result<()> {
        if drop.names.is_empty() {
            return Err(SqlError::EmptyClause {
                statement: "DROP TABLE",
                clause: "table names",
            });
        }

        self.write("DROP TABLE ");
        if drop.if_exists {
            self.write_if_exists_guard("IF EXISTS ");
        }
        self.write_identifiers(&drop.names);

        if let Some(behavior) = drop.behavior {
            if self.dialect().supports_drop_behavior() {
                self.write(" ");
                self.write(behavior.as_sql());
            } else {
                debug!(
                    dialect = self.dialect().name(),
                    behavior = behavior.as_sql(),
                    "Drop behavior unsupported, omitting it"
                );
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{
        AlterTableAction, AlterTableStatement, ColumnConstraint, ColumnDefinition,
        CreateTableStatement, DataType, DropBehavior, DropTableStatement, Expr, ForeignKeyAction,
        ForeignKeyRef, Statement, TableConstraint, TableConstraintKind,
    };
    use crate::dialect::Dialect;
    use crate::error::SqlError;
    use crate::serializer::serialize;

    fn planets_table() -> CreateTableStatement {
        CreateTableStatement {
            name: String::from("planets"),
            if_not_exists: true,
            columns: vec![
                ColumnDefinition::new(
                    "id",
                    DataType::Bigint,
                    vec![ColumnConstraint::primary_key_auto()],
                ),
                ColumnDefinition::new(
                    "name",
                    DataType::Varchar(Some(64)),
                    vec![ColumnConstraint::NotNull, ColumnConstraint::Unique],
                ),
                ColumnDefinition::new(
                    "habitable",
                    DataType::Boolean,
                    vec![ColumnConstraint::default_value(false)],
                ),
                ColumnDefinition::new(
                    "star_id",
                    DataType::Bigint,
                    vec![ColumnConstraint::References(
                        ForeignKeyRef::new("stars", &["id"]).on_delete(ForeignKeyAction::Cascade),
                    )],
                ),
            ],
            constraints: vec![TableConstraint {
                name: Some(String::from("name_not_empty")),
                kind: TableConstraintKind::Check(
                    Expr::function("LENGTH", vec![Expr::column("name")]).gt(Expr::literal(0)),
                ),
            }],
            ..CreateTableStatement::default()
        }
    }

    #[test]
    fn test_create_table_mysql() {
        let out = serialize(&Statement::CreateTable(planets_table()), &Dialect::mysql()).unwrap();
        assert_eq!(
            out.sql,
            "CREATE TABLE IF NOT EXISTS `planets` (\
             `id` BIGINT PRIMARY KEY AUTO_INCREMENT, \
             `name` VARCHAR(64) NOT NULL UNIQUE, \
             `habitable` BOOLEAN DEFAULT 0, \
             `star_id` BIGINT REFERENCES `stars` (`id`) ON DELETE CASCADE, \
             CONSTRAINT `name_not_empty` CHECK (LENGTH(`name`) > 0))"
        );
        assert!(out.binds.is_empty());
    }

    #[test]
    fn test_auto_increment_unsupported() {
        let err =
            serialize(&Statement::CreateTable(planets_table()), &Dialect::postgres()).unwrap_err();
        assert!(matches!(
            err,
            SqlError::Unsupported {
                feature: "auto-increment",
                ..
            }
        ));
    }

    #[test]
    fn test_if_not_exists_omitted_when_unsupported() {
        let create = CreateTableStatement {
            name: String::from("moons"),
            temporary: true,
            if_not_exists: true,
            columns: vec![ColumnDefinition::new("id", DataType::Integer, Vec::new())],
            constraints: vec![TableConstraint {
                name: None,
                kind: TableConstraintKind::PrimaryKey(vec![String::from("id")]),
            }],
        };
        let dialect = Dialect::generic().with_if_exists(false);
        let out = serialize(&Statement::CreateTable(create), &dialect).unwrap();
        assert_eq!(
            out.sql,
            "CREATE TEMPORARY TABLE \"moons\" (\"id\" INTEGER, PRIMARY KEY (\"id\"))"
        );
    }

    #[test]
    fn test_alter_table_actions() {
        let alter = AlterTableStatement {
            name: String::from("planets"),
            actions: vec![
                AlterTableAction::AddColumn(ColumnDefinition::new(
                    "mass",
                    DataType::Double,
                    Vec::new(),
                )),
                AlterTableAction::DropColumn(String::from("habitable")),
                AlterTableAction::RenameColumn {
                    from: String::from("name"),
                    to: String::from("title"),
                },
            ],
        };
        let out = serialize(&Statement::AlterTable(alter.clone()), &Dialect::mysql()).unwrap();
        assert_eq!(
            out.sql,
            "ALTER TABLE `planets` ADD COLUMN `mass` DOUBLE, DROP COLUMN `habitable`, \
             RENAME COLUMN `name` TO `title`"
        );

        let err = serialize(&Statement::AlterTable(alter), &Dialect::sqlite()).unwrap_err();
        assert!(matches!(err, SqlError::Unsupported { .. }));
    }

    #[test]
    fn test_drop_table_behavior_fallback() {
        let drop = DropTableStatement {
            names: vec![String::from("planets"), String::from("moons")],
            if_exists: true,
            behavior: Some(DropBehavior::Cascade),
        };
        let out = serialize(&Statement::DropTable(drop.clone()), &Dialect::postgres()).unwrap();
        assert_eq!(
            out.sql,
            "DROP TABLE IF EXISTS \"planets\", \"moons\" CASCADE"
        );
        let out = serialize(&Statement::DropTable(drop), &Dialect::sqlite()).unwrap();
        assert_eq!(out.sql, "DROP TABLE IF EXISTS \"planets\", \"moons\"");
    }

    #[test]
    fn test_drop_table_requires_names() {
        let err = serialize(
            &Statement::DropTable(DropTableStatement::default()),
            &Dialect::mysql(),
        )
        .unwrap_err();
        assert!(matches!(err, SqlError::EmptyClause { .. }));
    }
}

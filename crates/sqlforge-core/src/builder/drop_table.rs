//! DROP TABLE builder.

use super::Query;
use crate::ast::{DropBehavior, DropTableStatement, Statement};
use crate::error::Result;

/// A DROP TABLE builder.
#[derive(Debug, Clone)]
pub struct DropTable {
    statement: DropTableStatement,
}

impl DropTable {
    /// Creates a new DROP TABLE builder.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            statement: DropTableStatement {
                names: vec![String::from(name)],
                ..DropTableStatement::default()
            },
        }
    }

    /// Drops one more table in the same statement.
    #[must_use]
    pub fn table(mut self, name: &str) -> Self {
        self.statement.names.push(String::from(name));
        self
    }

    /// Adds `IF EXISTS`; omitted on dialects that lack it.
    #[must_use]
    pub const fn if_exists(mut self) -> Self {
        self.statement.if_exists = true;
        self
    }

    /// Adds `CASCADE`; omitted on dialects that lack drop behaviors.
    #[must_use]
    pub const fn cascade(mut self) -> Self {
        self.statement.behavior = Some(DropBehavior::Cascade);
        self
    }

    /// Adds `RESTRICT`; omitted on dialects that lack drop behaviors.
    #[must_use]
    pub const fn restrict(mut self) -> Self {
        self.statement.behavior = Some(DropBehavior::Restrict);
        self
    }
}

impl Query for DropTable {
    fn into_statement(self) -> Result<Statement> {
        Ok(Statement::DropTable(self.statement))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::Dialect;

    #[test]
    fn test_drop_if_exists() {
        let out = DropTable::new("planets")
            .if_exists()
            .build(&Dialect::mysql())
            .unwrap();
        assert_eq!(out.sql, "DROP TABLE IF EXISTS `planets`");
    }

    #[test]
    fn test_if_exists_fallback() {
        let dialect = Dialect::generic().with_if_exists(false);
        let out = DropTable::new("planets")
            .if_exists()
            .build(&dialect)
            .unwrap();
        assert_eq!(out.sql, "DROP TABLE \"planets\"");
    }

    #[test]
    fn test_several_tables_restrict() {
        let out = DropTable::new("moons")
            .table("planets")
            .restrict()
            .build(&Dialect::postgres())
            .unwrap();
        assert_eq!(out.sql, "DROP TABLE \"moons\", \"planets\" RESTRICT");
    }
}

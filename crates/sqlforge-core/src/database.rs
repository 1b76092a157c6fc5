//! Execution port and the database handle pairing it with a dialect.
//!
//! The crate never talks to a server itself. Callers implement [`Executor`]
//! over their driver of choice; [`Database`] serializes each finalized
//! statement with its dialect and hands text and binds to the executor
//! exactly once.

use tracing::{debug, trace};

use crate::ast::Statement;
use crate::builder::{
    AlterTable, CreateTable, Delete, DropTable, Insert, RawQuery, Select, Update, Upsert,
};
use crate::dialect::Dialect;
use crate::error::{BoxError, Result, SqlError};
use crate::model::Model;
use crate::row::Row;
use crate::serializer::{serialize, Serialized};
use crate::value::SqlValue;

/// Runs rendered SQL against a backend.
#[allow(async_fn_in_trait)]
pub trait Executor {
    /// Executes one statement with its binds, in placeholder order.
    async fn execute(
        &self,
        sql: &str,
        binds: &[SqlValue],
    ) -> std::result::Result<Vec<Row>, BoxError>;
}

/// One executor and the dialect its backend speaks.
#[derive(Debug, Clone)]
pub struct Database<E> {
    executor: E,
    dialect: Dialect,
}

impl<E> Database<E> {
    /// Creates a database handle.
    #[must_use]
    pub const fn new(executor: E, dialect: Dialect) -> Self {
        Self { executor, dialect }
    }

    /// Returns the dialect.
    #[must_use]
    pub const fn dialect(&self) -> &Dialect {
        &self.dialect
    }

    /// Returns the executor.
    #[must_use]
    pub const fn executor(&self) -> &E {
        &self.executor
    }

    /// Starts a SELECT.
    #[must_use]
    pub fn select(&self) -> Select {
        Select::new()
    }

    /// Starts an INSERT.
    #[must_use]
    pub fn insert(&self, table: &str) -> Insert {
        Insert::new(table)
    }

    /// Starts an INSERT with conflict resolution.
    #[must_use]
    pub fn upsert(&self, table: &str) -> Upsert {
        Upsert::new(table)
    }

    /// Starts an UPDATE.
    #[must_use]
    pub fn update(&self, table: &str) -> Update {
        Update::new(table)
    }

    /// Starts a DELETE.
    #[must_use]
    pub fn delete(&self, table: &str) -> Delete {
        Delete::new(table)
    }

    /// Starts a CREATE TABLE.
    #[must_use]
    pub fn create_table(&self, name: &str) -> CreateTable {
        CreateTable::new(name)
    }

    /// Starts an ALTER TABLE.
    #[must_use]
    pub fn alter_table(&self, name: &str) -> AlterTable {
        AlterTable::new(name)
    }

    /// Starts a DROP TABLE.
    #[must_use]
    pub fn drop_table(&self, name: &str) -> DropTable {
        DropTable::new(name)
    }

    /// Wraps a raw fragment, usually built with [`sql!`](crate::sql).
    #[must_use]
    pub fn raw(&self, query: impl Into<RawQuery>) -> RawQuery {
        query.into()
    }

    /// Serializes a statement with this handle's dialect.
    ///
    /// # Errors
    ///
    /// See [`serialize`].
    pub fn serialize(&self, statement: &Statement) -> Result<Serialized> {
        serialize(statement, &self.dialect)
    }
}

impl<E: Executor> Database<E> {
    /// Serializes and executes a statement.
    ///
    /// # Errors
    ///
    /// Fails on serialization errors, before anything reaches the executor,
    /// or with [`SqlError::Execution`] when the executor fails.
    pub async fn execute(&self, statement: &Statement) -> Result<Vec<Row>> {
        let Serialized { sql, binds } = self.serialize(statement)?;
        debug!(
            dialect = self.dialect.name(),
            kind = statement.kind(),
            sql = %sql,
            binds = binds.len(),
            "Executing SQL"
        );
        let rows = self
            .executor
            .execute(&sql, &binds)
            .await
            .map_err(SqlError::Execution)?;
        trace!(rows = rows.len(), "Statement returned rows");
        Ok(rows)
    }

    /// Executes a statement and decodes every row.
    ///
    /// # Errors
    ///
    /// See [`Database::execute`]; decoding failures surface as
    /// [`SqlError::Decode`].
    pub async fn fetch_all<M: Model>(&self, statement: &Statement) -> Result<Vec<M>> {
        let rows = self.execute(statement).await?;
        rows.iter()
            .map(|row| row.decode::<M>().map_err(SqlError::from))
            .collect()
    }

    /// Executes a statement and decodes the first row, if any.
    ///
    /// # Errors
    ///
    /// See [`Database::fetch_all`].
    pub async fn fetch_first<M: Model>(&self, statement: &Statement) -> Result<Option<M>> {
        let rows = self.execute(statement).await?;
        match rows.first() {
            Some(row) => Ok(Some(row.decode::<M>()?)),
            None => Ok(None),
        }
    }
}

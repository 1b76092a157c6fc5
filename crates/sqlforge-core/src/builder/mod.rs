//! Fluent statement builders.
//!
//! Each builder owns one statement draft. Chained calls take the builder by
//! value and hand it back; a [`Query`] finalizer consumes it exactly once.
//!
//! # Example
//!
//! ```rust
//! use sqlforge_core::builder::{col, Query, Select};
//! use sqlforge_core::dialect::Dialect;
//!
//! let out = Select::new()
//!     .columns(&["id", "name"])
//!     .from("planets")
//!     .where_(col("name").eq("Earth"))
//!     .build(&Dialect::mysql())
//!     .unwrap();
//!
//! assert_eq!(out.sql, "SELECT `id`, `name` FROM `planets` WHERE `name` = ?");
//! assert_eq!(out.binds.len(), 1);
//! ```

mod alter_table;
mod create_table;
mod delete;
mod drop_table;
mod expr;
mod insert;
mod raw;
mod select;
mod update;
mod upsert;

pub use alter_table::AlterTable;
pub use create_table::CreateTable;
pub use delete::Delete;
pub use drop_table::DropTable;
pub use expr::{col, count, count_all, Column};
pub use insert::Insert;
pub use raw::RawQuery;
pub use select::Select;
pub use update::Update;
pub use upsert::{ConflictUpdate, Upsert};

use crate::ast::{Expr, Statement};
use crate::database::{Database, Executor};
use crate::dialect::Dialect;
use crate::error::Result;
use crate::row::Row;
use crate::serializer::{serialize, Serialized};

/// Finalization shared by every builder.
#[allow(async_fn_in_trait)]
pub trait Query: Sized {
    /// Consumes the builder and returns its statement.
    ///
    /// # Errors
    ///
    /// Fails when the builder was left in an unfinished state.
    fn into_statement(self) -> Result<Statement>;

    /// Renders the statement for a dialect.
    ///
    /// # Errors
    ///
    /// Builder and serialization errors.
    fn build(self, dialect: &Dialect) -> Result<Serialized> {
        serialize(&self.into_statement()?, dialect)
    }

    /// Renders the statement with the database's dialect and executes it.
    ///
    /// # Errors
    ///
    /// Builder, serialization and execution errors.
    async fn run<E: Executor>(self, db: &Database<E>) -> Result<Vec<Row>> {
        let statement = self.into_statement()?;
        db.execute(&statement).await
    }
}

/// Folds `next` into an accumulated predicate with AND.
pub(crate) fn and_predicate(current: Option<Expr>, next: Expr) -> Option<Expr> {
    Some(match current {
        Some(existing) => existing.and(next),
        None => next,
    })
}

/// Folds `next` into an accumulated predicate with OR.
pub(crate) fn or_predicate(current: Option<Expr>, next: Expr) -> Option<Expr> {
    Some(match current {
        Some(existing) => existing.or(next),
        None => next,
    })
}

pub(crate) fn names(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| String::from(*s)).collect()
}

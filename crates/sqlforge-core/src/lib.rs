//! # sqlforge-core
//!
//! A dialect-agnostic SQL statement builder and serializer.
//!
//! This crate provides:
//! - A closed expression AST and statement nodes
//! - A serializer producing SQL text plus an ordered bind list
//! - A serde-loadable dialect descriptor with fallbacks for optional features
//! - Fluent builders, including INSERT with conflict resolution (upsert)
//! - A row decoder mapping result rows onto structured models
//!
//! ## Building Statements
//!
//! ```rust
//! use sqlforge_core::builder::{col, Query, Select};
//! use sqlforge_core::dialect::Dialect;
//!
//! let out = Select::new()
//!     .columns(&["id", "name"])
//!     .from("planets")
//!     .where_(col("mass").gt(1))
//!     .build(&Dialect::postgres())
//!     .unwrap();
//!
//! assert_eq!(out.sql, "SELECT \"id\", \"name\" FROM \"planets\" WHERE \"mass\" > $1");
//! ```
//!
//! ## SQL Injection Prevention
//!
//! Values handed to builders never reach the SQL text; they travel in the
//! bind list, in placeholder order:
//!
//! ```rust
//! use sqlforge_core::builder::{col, Query, Select};
//! use sqlforge_core::dialect::Dialect;
//! use sqlforge_core::value::SqlValue;
//!
//! let user_input = "'; DROP TABLE planets; --";
//! let out = Select::new()
//!     .columns(&["id"])
//!     .from("planets")
//!     .where_(col("name").eq(user_input))
//!     .build(&Dialect::mysql())
//!     .unwrap();
//!
//! assert_eq!(out.sql, "SELECT `id` FROM `planets` WHERE `name` = ?");
//! assert_eq!(out.binds, vec![SqlValue::Text(String::from(user_input))]);
//! ```

extern crate self as sqlforge_core;

pub mod ast;
pub mod builder;
pub mod database;
pub mod dialect;
pub mod error;
pub mod model;
pub mod row;
pub mod serializer;
pub mod value;

pub use ast::{Expr, Statement};
pub use builder::{
    col, AlterTable, CreateTable, Delete, DropTable, Insert, Query, RawQuery, Select, Update,
    Upsert,
};
pub use database::{Database, Executor};
pub use dialect::Dialect;
pub use error::{DecodeError, Result, SqlError};
pub use model::Model;
pub use row::{FromSqlValue, Row, RowDecoder};
pub use serializer::{serialize, Serialized};
pub use value::{Literal, SqlValue, ToSqlValue};

//! Raw SQL fragments with embedded binds.
//!
//! A [`RawQuery`] is a sequence of segments: trusted text, bound values,
//! quoted identifiers and nested expressions. The [`sql!`](crate::sql) macro
//! builds one from interpolation-style input:
//!
//! ```rust
//! use sqlforge_core::builder::Query;
//! use sqlforge_core::dialect::Dialect;
//! use sqlforge_core::sql;
//!
//! let name = "Earth";
//! let out = sql!("SELECT * FROM " {ident: "planets"} " WHERE name = " {bind: name})
//!     .build(&Dialect::postgres())
//!     .unwrap();
//!
//! assert_eq!(out.sql, "SELECT * FROM \"planets\" WHERE name = $1");
//! assert_eq!(out.binds.len(), 1);
//! ```
//!
//! Only string literals are accepted as text; every value goes through
//! `{bind: ..}`.

use super::Query;
use crate::ast::{Expr, RawSegment, Statement};
use crate::database::{Database, Executor};
use crate::error::Result;
use crate::model::Model;
use crate::value::ToSqlValue;

/// A raw SQL fragment under construction.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawQuery {
    segments: Vec<RawSegment>,
}

impl RawQuery {
    /// Creates an empty fragment.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Appends trusted SQL text.
    ///
    /// **Warning**: Only use this for SQL that doesn't contain user input.
    #[must_use]
    pub fn text(mut self, sql: &str) -> Self {
        if let Some(RawSegment::Text(last)) = self.segments.last_mut() {
            last.push_str(sql);
        } else {
            self.segments.push(RawSegment::Text(String::from(sql)));
        }
        self
    }

    /// Appends a bound value.
    #[must_use]
    pub fn bind<T: ToSqlValue>(mut self, value: T) -> Self {
        self.segments.push(RawSegment::Bind(value.to_sql_value()));
        self
    }

    /// Appends an identifier quoted by the dialect.
    #[must_use]
    pub fn identifier(mut self, name: &str) -> Self {
        self.segments
            .push(RawSegment::Identifier(String::from(name)));
        self
    }

    /// Appends a nested expression.
    #[must_use]
    pub fn expr(mut self, expr: impl Into<Expr>) -> Self {
        self.segments.push(RawSegment::Expr(expr.into()));
        self
    }

    /// Runs the fragment and decodes every row.
    ///
    /// # Errors
    ///
    /// Serialization, execution and decode errors.
    pub async fn all<M: Model, E: Executor>(self, db: &Database<E>) -> Result<Vec<M>> {
        db.fetch_all(&Statement::Raw(self.into())).await
    }

    /// Runs the fragment and decodes the first row.
    ///
    /// # Errors
    ///
    /// Serialization, execution and decode errors.
    pub async fn first<M: Model, E: Executor>(self, db: &Database<E>) -> Result<Option<M>> {
        db.fetch_first(&Statement::Raw(self.into())).await
    }
}

impl From<RawQuery> for Expr {
    fn from(query: RawQuery) -> Self {
        Self::Raw(query.segments)
    }
}

impl Query for RawQuery {
    fn into_statement(self) -> Result<Statement> {
        Ok(Statement::Raw(self.into()))
    }
}

/// Builds a [`RawQuery`](crate::builder::RawQuery) from string literals and
/// `{bind: ..}`, `{ident: ..}`, `{expr: ..}` segments.
#[macro_export]
macro_rules! sql {
    ($($segment:tt)*) => {{
        let query = $crate::builder::RawQuery::new();
        $(let query = $crate::__sql_segment!(query, $segment);)*
        query
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __sql_segment {
    ($query:ident, { bind: $value:expr }) => {
        $query.bind($value)
    };
    ($query:ident, { ident: $name:expr }) => {
        $query.identifier($name)
    };
    ($query:ident, { expr: $expr:expr }) => {
        $query.expr($expr)
    };
    ($query:ident, $text:literal) => {
        $query.text($text)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{col, Select};
    use crate::dialect::Dialect;
    use crate::value::SqlValue;

    #[test]
    fn test_macro_matches_manual_segments() {
        let name = String::from("Earth");
        let from_macro = crate::sql!("SELECT * FROM " {ident: "planets"} " WHERE name = " {bind: &name});
        let manual = RawQuery::new()
            .text("SELECT * FROM ")
            .identifier("planets")
            .text(" WHERE name = ")
            .bind(&name);
        assert_eq!(from_macro, manual);
    }

    #[test]
    fn test_binds_follow_text_order() {
        let out = crate::sql!(
            "UPDATE " {ident: "planets"} " SET mass = " {bind: 5.97}
            " WHERE " {expr: col("id").eq(3)}
        )
        .build(&Dialect::postgres())
        .unwrap();
        assert_eq!(
            out.sql,
            "UPDATE \"planets\" SET mass = $1 WHERE \"id\" = $2"
        );
        assert_eq!(out.binds, vec![SqlValue::Float(5.97), SqlValue::Int(3)]);
    }

    #[test]
    fn test_adjacent_text_is_merged() {
        let query = RawQuery::new().text("SELECT ").text("1");
        assert_eq!(
            Expr::from(query),
            Expr::Raw(vec![RawSegment::Text(String::from("SELECT 1"))])
        );
    }

    #[test]
    fn test_raw_inside_select() {
        let out = Select::new()
            .from("planets")
            .where_(crate::sql!("mass > " {bind: 1} " * gravity").into())
            .build(&Dialect::mysql())
            .unwrap();
        assert_eq!(out.sql, "SELECT * FROM `planets` WHERE mass > ? * gravity");
    }
}

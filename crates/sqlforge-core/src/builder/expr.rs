//! Column helpers producing expression nodes.
//!
//! Values passed to these helpers always become binds, never inline text.

use crate::ast::{BinaryOp, Expr};
use crate::value::{SqlValue, ToSqlValue};

/// Creates a column reference.
#[must_use]
pub fn col(name: &str) -> Column {
    Column {
        table: None,
        name: String::from(name),
    }
}

/// A column reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    /// Optional table qualifier.
    pub table: Option<String>,
    /// Column name.
    pub name: String,
}

impl Column {
    /// Creates a qualified column reference.
    #[must_use]
    pub fn qualified(table: &str, name: &str) -> Self {
        Self {
            table: Some(String::from(table)),
            name: String::from(name),
        }
    }

    fn compare<T: ToSqlValue>(self, op: BinaryOp, value: T) -> Expr {
        Expr::from(self).binary(op, Expr::Bind(value.to_sql_value()))
    }

    /// Creates an equality expression.
    #[must_use]
    pub fn eq<T: ToSqlValue>(self, value: T) -> Expr {
        self.compare(BinaryOp::Eq, value)
    }

    /// Creates an inequality expression.
    #[must_use]
    pub fn not_eq<T: ToSqlValue>(self, value: T) -> Expr {
        self.compare(BinaryOp::NotEq, value)
    }

    /// Creates a less-than expression.
    #[must_use]
    pub fn lt<T: ToSqlValue>(self, value: T) -> Expr {
        self.compare(BinaryOp::Lt, value)
    }

    /// Creates a less-than-or-equal expression.
    #[must_use]
    pub fn lt_eq<T: ToSqlValue>(self, value: T) -> Expr {
        self.compare(BinaryOp::LtEq, value)
    }

    /// Creates a greater-than expression.
    #[must_use]
    pub fn gt<T: ToSqlValue>(self, value: T) -> Expr {
        self.compare(BinaryOp::Gt, value)
    }

    /// Creates a greater-than-or-equal expression.
    #[must_use]
    pub fn gt_eq<T: ToSqlValue>(self, value: T) -> Expr {
        self.compare(BinaryOp::GtEq, value)
    }

    /// Creates a LIKE expression.
    #[must_use]
    pub fn like<T: ToSqlValue>(self, pattern: T) -> Expr {
        self.compare(BinaryOp::Like, pattern)
    }

    /// Creates a NOT LIKE expression.
    #[must_use]
    pub fn not_like<T: ToSqlValue>(self, pattern: T) -> Expr {
        self.compare(BinaryOp::NotLike, pattern)
    }

    /// Compares against another column.
    #[must_use]
    pub fn eq_col(self, other: Self) -> Expr {
        Expr::from(self).eq(Expr::from(other))
    }

    /// Creates an IS NULL expression.
    #[must_use]
    pub fn is_null(self) -> Expr {
        Expr::from(self).is_null()
    }

    /// Creates an IS NOT NULL expression.
    #[must_use]
    pub fn is_not_null(self) -> Expr {
        Expr::from(self).is_not_null()
    }

    /// Creates a BETWEEN expression.
    #[must_use]
    pub fn between<T: ToSqlValue, U: ToSqlValue>(self, low: T, high: U) -> Expr {
        self.between_impl(low.to_sql_value(), high.to_sql_value(), false)
    }

    /// Creates a NOT BETWEEN expression.
    #[must_use]
    pub fn not_between<T: ToSqlValue, U: ToSqlValue>(self, low: T, high: U) -> Expr {
        self.between_impl(low.to_sql_value(), high.to_sql_value(), true)
    }

    fn between_impl(self, low: SqlValue, high: SqlValue, negated: bool) -> Expr {
        Expr::Between {
            expr: Box::new(self.into()),
            low: Box::new(Expr::Bind(low)),
            high: Box::new(Expr::Bind(high)),
            negated,
        }
    }

    /// Creates an IN expression.
    #[must_use]
    pub fn in_list<T: ToSqlValue>(self, values: Vec<T>) -> Expr {
        self.in_list_impl(values, false)
    }

    /// Creates a NOT IN expression.
    #[must_use]
    pub fn not_in_list<T: ToSqlValue>(self, values: Vec<T>) -> Expr {
        self.in_list_impl(values, true)
    }

    fn in_list_impl<T: ToSqlValue>(self, values: Vec<T>, negated: bool) -> Expr {
        Expr::In {
            expr: Box::new(self.into()),
            list: values
                .into_iter()
                .map(|v| Expr::Bind(v.to_sql_value()))
                .collect(),
            negated,
        }
    }
}

impl From<Column> for Expr {
    fn from(col: Column) -> Self {
        Self::Column {
            table: col.table,
            name: col.name,
        }
    }
}

/// `COUNT(*)`.
#[must_use]
pub fn count_all() -> Expr {
    Expr::function("COUNT", vec![Expr::wildcard()])
}

/// `COUNT(<column>)`.
#[must_use]
pub fn count(column: &str) -> Expr {
    Expr::function("COUNT", vec![col(column).into()])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::Dialect;
    use crate::serializer::serialize_expr;

    fn render(expr: &Expr) -> (String, Vec<SqlValue>) {
        let out = serialize_expr(expr, &Dialect::mysql()).unwrap();
        (out.sql, out.binds)
    }

    #[test]
    fn test_column_eq() {
        let (sql, binds) = render(&col("name").eq("Alice"));
        assert_eq!(sql, "`name` = ?");
        assert_eq!(binds.len(), 1);
    }

    #[test]
    fn test_column_comparison() {
        assert_eq!(render(&col("age").gt(18)).0, "`age` > ?");
        assert_eq!(render(&col("age").lt_eq(65)).0, "`age` <= ?");
    }

    #[test]
    fn test_between_and_in() {
        let (sql, binds) = render(&col("price").between(10, 100));
        assert_eq!(sql, "`price` BETWEEN ? AND ?");
        assert_eq!(binds, vec![SqlValue::Int(10), SqlValue::Int(100)]);

        let (sql, binds) = render(&col("status").in_list(vec!["active", "pending"]));
        assert_eq!(sql, "`status` IN (?, ?)");
        assert_eq!(binds.len(), 2);
    }

    #[test]
    fn test_and_or_grouping() {
        let expr = col("active")
            .eq(true)
            .and(col("age").gt(18).or(col("verified").eq(true)));
        let (sql, binds) = render(&expr);
        assert_eq!(sql, "`active` = ? AND (`age` > ? OR `verified` = ?)");
        assert_eq!(binds.len(), 3);
    }

    #[test]
    fn test_qualified_columns() {
        let expr = Column::qualified("moons", "planet_id").eq_col(Column::qualified("planets", "id"));
        assert_eq!(render(&expr).0, "`moons`.`planet_id` = `planets`.`id`");
    }

    #[test]
    fn test_injection_stays_in_binds() {
        let malicious = "'; DROP TABLE users; --";
        let (sql, binds) = render(&col("name").eq(malicious));
        assert_eq!(sql, "`name` = ?");
        assert!(matches!(&binds[0], SqlValue::Text(s) if s == malicious));
    }
}

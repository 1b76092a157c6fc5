//! Expression AST types.

use crate::value::{Literal, SqlValue};

use super::statement::SelectStatement;

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // Comparison
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Logical
    And,
    Or,

    // String
    Concat,
    Like,
    NotLike,
}

impl BinaryOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Eq => "=",
            Self::NotEq => "<>",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Concat => "||",
            Self::Like => "LIKE",
            Self::NotLike => "NOT LIKE",
        }
    }

    /// Returns the precedence of the operator (higher = binds tighter).
    #[must_use]
    pub const fn precedence(&self) -> u8 {
        match self {
            Self::Or => 1,
            Self::And => 2,
            Self::Eq | Self::NotEq | Self::Lt | Self::LtEq | Self::Gt | Self::GtEq => 3,
            Self::Like | Self::NotLike => 4,
            Self::Add | Self::Sub | Self::Concat => 8,
            Self::Mul | Self::Div | Self::Mod => 9,
        }
    }

    /// Whether `a op (b op c)` equals `(a op b) op c`.
    #[must_use]
    pub const fn is_associative(&self) -> bool {
        matches!(
            self,
            Self::And | Self::Or | Self::Add | Self::Mul | Self::Concat
        )
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    /// Negation (-)
    Neg,
    /// Logical NOT
    Not,
}

impl UnaryOp {
    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Not => "NOT ",
        }
    }
}

/// A function call expression.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    /// The function name, emitted verbatim.
    pub name: String,
    /// The arguments.
    pub args: Vec<Expr>,
    /// Whether DISTINCT was specified.
    pub distinct: bool,
}

/// One piece of a raw SQL fragment.
#[derive(Debug, Clone, PartialEq)]
pub enum RawSegment {
    /// Trusted SQL text, emitted verbatim.
    Text(String),
    /// A value sent through the bind list.
    Bind(SqlValue),
    /// An identifier, quoted by the dialect.
    Identifier(String),
    /// A nested expression.
    Expr(Expr),
}

/// An SQL expression.
///
/// The node set is closed; the serializer matches over every variant.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A bare quoted identifier (table, alias, ...).
    Identifier(String),

    /// A column reference (optionally qualified with table name).
    Column {
        /// Table name or alias (optional).
        table: Option<String>,
        /// Column name.
        name: String,
    },

    /// Wildcard (*), optionally qualified.
    Wildcard {
        /// Table qualifier (optional).
        table: Option<String>,
    },

    /// A literal value rendered inline by the dialect.
    Literal(Literal),

    /// A value kept out of the SQL text.
    Bind(SqlValue),

    /// A raw SQL fragment, possibly carrying binds.
    Raw(Vec<RawSegment>),

    /// A function call.
    Function(FunctionCall),

    /// A binary expression.
    Binary {
        /// Left operand.
        left: Box<Expr>,
        /// Operator.
        op: BinaryOp,
        /// Right operand.
        right: Box<Expr>,
    },

    /// A unary expression.
    Unary {
        /// Operator.
        op: UnaryOp,
        /// Operand.
        operand: Box<Expr>,
    },

    /// Items joined by a separator.
    List {
        /// The items.
        items: Vec<Expr>,
        /// Separator emitted between items.
        separator: &'static str,
    },

    /// Parenthesized expression.
    Group(Box<Expr>),

    /// `expr AS alias`.
    Alias {
        /// The aliased expression.
        expr: Box<Expr>,
        /// The alias.
        alias: String,
    },

    /// IS NULL expression.
    IsNull {
        /// The expression to check.
        expr: Box<Expr>,
        /// Whether this is IS NOT NULL.
        negated: bool,
    },

    /// IN expression.
    In {
        /// The expression to check.
        expr: Box<Expr>,
        /// The list of values.
        list: Vec<Expr>,
        /// Whether this is NOT IN.
        negated: bool,
    },

    /// BETWEEN expression.
    Between {
        /// The expression to check.
        expr: Box<Expr>,
        /// Lower bound.
        low: Box<Expr>,
        /// Upper bound.
        high: Box<Expr>,
        /// Whether this is NOT BETWEEN.
        negated: bool,
    },

    /// A parenthesized sub-select.
    Subquery(Box<SelectStatement>),

    /// The value a conflicting insert would have written to a column.
    Excluded(String),

    /// The `DEFAULT` keyword.
    Default,
}

impl Expr {
    /// Creates an identifier.
    #[must_use]
    pub fn identifier(name: impl Into<String>) -> Self {
        Self::Identifier(name.into())
    }

    /// Creates a new column reference.
    #[must_use]
    pub fn column(name: impl Into<String>) -> Self {
        Self::Column {
            table: None,
            name: name.into(),
        }
    }

    /// Creates a new qualified column reference.
    #[must_use]
    pub fn qualified_column(table: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Column {
            table: Some(table.into()),
            name: name.into(),
        }
    }

    /// Creates an unqualified `*`.
    #[must_use]
    pub const fn wildcard() -> Self {
        Self::Wildcard { table: None }
    }

    /// Creates a literal.
    #[must_use]
    pub fn literal(value: impl Into<Literal>) -> Self {
        Self::Literal(value.into())
    }

    /// Creates a bind.
    #[must_use]
    pub fn bind(value: impl crate::value::ToSqlValue) -> Self {
        Self::Bind(value.to_sql_value())
    }

    /// Creates a raw fragment from trusted text.
    ///
    /// **Warning**: Only use this for SQL that doesn't contain user input.
    #[must_use]
    pub fn raw(sql: impl Into<String>) -> Self {
        Self::Raw(vec![RawSegment::Text(sql.into())])
    }

    /// Creates a function call.
    #[must_use]
    pub fn function(name: impl Into<String>, args: Vec<Self>) -> Self {
        Self::Function(FunctionCall {
            name: name.into(),
            args,
            distinct: false,
        })
    }

    /// Creates a comma-separated list.
    #[must_use]
    pub const fn list(items: Vec<Self>) -> Self {
        Self::List {
            items,
            separator: ", ",
        }
    }

    /// Creates an excluded-value reference.
    #[must_use]
    pub fn excluded(column: impl Into<String>) -> Self {
        Self::Excluded(column.into())
    }

    /// Wraps the expression in parentheses.
    #[must_use]
    pub fn group(self) -> Self {
        Self::Group(Box::new(self))
    }

    /// Aliases the expression.
    #[must_use]
    pub fn alias(self, alias: impl Into<String>) -> Self {
        Self::Alias {
            expr: Box::new(self),
            alias: alias.into(),
        }
    }

    /// Creates a binary expression.
    #[must_use]
    pub fn binary(self, op: BinaryOp, right: Self) -> Self {
        Self::Binary {
            left: Box::new(self),
            op,
            right: Box::new(right),
        }
    }

    /// Creates an equality expression.
    #[must_use]
    pub fn eq(self, right: Self) -> Self {
        self.binary(BinaryOp::Eq, right)
    }

    /// Creates an inequality expression.
    #[must_use]
    pub fn not_eq(self, right: Self) -> Self {
        self.binary(BinaryOp::NotEq, right)
    }

    /// Creates a less-than expression.
    #[must_use]
    pub fn lt(self, right: Self) -> Self {
        self.binary(BinaryOp::Lt, right)
    }

    /// Creates a greater-than expression.
    #[must_use]
    pub fn gt(self, right: Self) -> Self {
        self.binary(BinaryOp::Gt, right)
    }

    /// Creates an AND expression.
    #[must_use]
    pub fn and(self, right: Self) -> Self {
        self.binary(BinaryOp::And, right)
    }

    /// Creates an OR expression.
    #[must_use]
    pub fn or(self, right: Self) -> Self {
        self.binary(BinaryOp::Or, right)
    }

    /// Creates a NOT expression.
    #[must_use]
    pub fn not(self) -> Self {
        Self::Unary {
            op: UnaryOp::Not,
            operand: Box::new(self),
        }
    }

    /// Creates an `IS NULL` test.
    #[must_use]
    pub fn is_null(self) -> Self {
        Self::IsNull {
            expr: Box::new(self),
            negated: false,
        }
    }

    /// Creates an `IS NOT NULL` test.
    #[must_use]
    pub fn is_not_null(self) -> Self {
        Self::IsNull {
            expr: Box::new(self),
            negated: true,
        }
    }

    /// Counts the binds reachable from this node.
    #[must_use]
    pub fn bind_count(&self) -> usize {
        match self {
            Self::Bind(_) => 1,
            Self::Identifier(_)
            | Self::Column { .. }
            | Self::Wildcard { .. }
            | Self::Literal(_)
            | Self::Excluded(_)
            | Self::Default => 0,
            Self::Raw(segments) => segments
                .iter()
                .map(|s| match s {
                    RawSegment::Bind(_) => 1,
                    RawSegment::Expr(e) => e.bind_count(),
                    RawSegment::Text(_) | RawSegment::Identifier(_) => 0,
                })
                .sum(),
            Self::Function(f) => f.args.iter().map(Self::bind_count).sum(),
            Self::Binary { left, right, .. } => left.bind_count() + right.bind_count(),
            Self::Unary { operand, .. } => operand.bind_count(),
            Self::List { items, .. } => items.iter().map(Self::bind_count).sum(),
            Self::Group(e) | Self::Alias { expr: e, .. } | Self::IsNull { expr: e, .. } => {
                e.bind_count()
            }
            Self::In { expr, list, .. } => {
                expr.bind_count() + list.iter().map(Self::bind_count).sum::<usize>()
            }
            Self::Between {
                expr, low, high, ..
            } => expr.bind_count() + low.bind_count() + high.bind_count(),
            Self::Subquery(select) => select.bind_count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_op_precedence() {
        assert!(BinaryOp::Mul.precedence() > BinaryOp::Add.precedence());
        assert!(BinaryOp::And.precedence() > BinaryOp::Or.precedence());
        assert!(BinaryOp::Eq.precedence() > BinaryOp::And.precedence());
    }

    #[test]
    fn test_expr_chaining() {
        let expr = Expr::column("age")
            .gt(Expr::literal(18))
            .and(Expr::column("status").eq(Expr::bind("active")));

        assert!(matches!(
            expr,
            Expr::Binary {
                op: BinaryOp::And,
                ..
            }
        ));
        assert_eq!(expr.bind_count(), 1);
    }

    #[test]
    fn test_raw_bind_count() {
        let expr = Expr::Raw(vec![
            RawSegment::Text(String::from("a = ")),
            RawSegment::Bind(SqlValue::Int(1)),
            RawSegment::Expr(Expr::bind(2).or(Expr::bind(3))),
        ]);
        assert_eq!(expr.bind_count(), 3);
    }
}

//! Rendering of AST nodes into SQL text plus an ordered bind list.
//!
//! The [`Serializer`] walks a node depth-first. Every [`Expr::Bind`] it meets
//! is appended to the bind list and replaced in the text by the dialect's
//! placeholder, so placeholder order and bind order always agree.
//!
//! ```rust
//! use sqlforge_core::ast::Expr;
//! use sqlforge_core::dialect::Dialect;
//! use sqlforge_core::serializer::serialize_expr;
//!
//! let expr = Expr::column("name").eq(Expr::bind("Earth"));
//! let out = serialize_expr(&expr, &Dialect::postgres()).unwrap();
//! assert_eq!(out.sql, "\"name\" = $1");
//! assert_eq!(out.binds.len(), 1);
//! ```

mod ddl;
mod dml;

use crate::ast::{BinaryOp, Expr, RawSegment, Statement, UnaryOp};
use crate::dialect::{Dialect, UpsertSyntax};
use crate::error::{Result, SqlError};
use crate::value::{Literal, SqlValue};

/// Rendered SQL text and its binds.
#[derive(Debug, Clone, PartialEq)]
pub struct Serialized {
    /// The SQL text.
    pub sql: String,
    /// Bind values in placeholder order.
    pub binds: Vec<SqlValue>,
}

/// Serializes a statement.
///
/// # Errors
///
/// Fails when the statement needs a capability the dialect lacks, or when a
/// builder left it incomplete. No text is returned on failure.
pub fn serialize(statement: &Statement, dialect: &Dialect) -> Result<Serialized> {
    let mut serializer = Serializer::new(dialect);
    serializer.write_statement(statement)?;
    Ok(serializer.finish())
}

/// Serializes a lone expression.
///
/// # Errors
///
/// Fails when the expression needs a capability the dialect lacks.
pub fn serialize_expr(expr: &Expr, dialect: &Dialect) -> Result<Serialized> {
    let mut serializer = Serializer::new(dialect);
    serializer.write_expr(expr)?;
    Ok(serializer.finish())
}

/// A stateful visitor accumulating SQL text and binds for one statement.
#[derive(Debug)]
pub struct Serializer<'d> {
    dialect: &'d Dialect,
    statement: &'static str,
    sql: String,
    binds: Vec<SqlValue>,
}

impl<'d> Serializer<'d> {
    /// Creates an empty serializer for a dialect.
    #[must_use]
    pub const fn new(dialect: &'d Dialect) -> Self {
        Self {
            dialect,
            statement: "expression",
            sql: String::new(),
            binds: Vec::new(),
        }
    }

    /// Returns the dialect.
    #[must_use]
    pub const fn dialect(&self) -> &'d Dialect {
        self.dialect
    }

    /// Consumes the serializer.
    #[must_use]
    pub fn finish(self) -> Serialized {
        Serialized {
            sql: self.sql,
            binds: self.binds,
        }
    }

    /// Appends trusted text.
    pub fn write(&mut self, text: &str) {
        self.sql.push_str(text);
    }

    /// Appends a quoted identifier.
    pub fn write_identifier(&mut self, name: &str) {
        let quoted = self.dialect.quote_identifier(name);
        self.sql.push_str(&quoted);
    }

    /// Appends quoted identifiers separated by `", "`.
    pub fn write_identifiers(&mut self, names: &[String]) {
        for (i, name) in names.iter().enumerate() {
            if i > 0 {
                self.write(", ");
            }
            self.write_identifier(name);
        }
    }

    /// Appends a placeholder and records the value.
    pub fn write_bind(&mut self, value: &SqlValue) {
        self.binds.push(value.clone());
        let placeholder = self.dialect.placeholder(self.binds.len());
        self.sql.push_str(&placeholder);
    }

    /// Appends expressions separated by `separator`.
    ///
    /// # Errors
    ///
    /// Propagates failures of the items.
    pub fn write_list(&mut self, items: &[Expr], separator: &str) -> Result<()> {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.write(separator);
            }
            self.write_expr(item)?;
        }
        Ok(())
    }

    pub(crate) fn unsupported(&self, feature: &'static str) -> SqlError {
        SqlError::Unsupported {
            dialect: String::from(self.dialect.name()),
            feature,
        }
    }

    /// Appends a statement.
    ///
    /// # Errors
    ///
    /// See [`serialize`].
    pub fn write_statement(&mut self, statement: &Statement) -> Result<()> {
        self.statement = statement.kind();
        match statement {
            Statement::Select(select) => self.write_select(select),
            Statement::Insert(insert) => self.write_insert(insert),
            Statement::Update(update) => self.write_update(update),
            Statement::Delete(delete) => self.write_delete(delete),
            Statement::CreateTable(create) => self.write_create_table(create),
            Statement::AlterTable(alter) => self.write_alter_table(alter),
            Statement::DropTable(drop) => self.write_drop_table(drop),
            Statement::Raw(expr) => self.write_expr(expr),
        }
    }

    /// Appends an expression.
    ///
    /// # Errors
    ///
    /// See [`serialize_expr`].
    pub fn write_expr(&mut self, expr: &Expr) -> Result<()> {
        match expr {
            Expr::Identifier(name) => self.write_identifier(name),
            Expr::Column { table, name } => {
                if let Some(table) = table {
                    self.write_identifier(table);
                    self.write(".");
                }
                self.write_identifier(name);
            }
            Expr::Wildcard { table } => {
                if let Some(table) = table {
                    self.write_identifier(table);
                    self.write(".");
                }
                self.write("*");
            }
            Expr::Literal(literal) => {
                if matches!(literal, Literal::Float(f) if !f.is_finite()) {
                    return Err(self.unsupported("non-finite float literal"));
                }
                let encoded = self.dialect.encode_literal(literal);
                self.write(&encoded);
            }
            Expr::Bind(value) => self.write_bind(value),
            Expr::Raw(segments) => {
                for segment in segments {
                    match segment {
                        RawSegment::Text(text) => self.write(text),
                        RawSegment::Bind(value) => self.write_bind(value),
                        RawSegment::Identifier(name) => self.write_identifier(name),
                        RawSegment::Expr(inner) => self.write_expr(inner)?,
                    }
                }
            }
            Expr::Function(call) => {
                self.write(&call.name);
                self.write("(");
                if call.distinct {
                    self.write("DISTINCT ");
                }
                self.write_list(&call.args, ", ")?;
                self.write(")");
            }
            Expr::Binary { left, op, right } => {
                self.write_operand(left, *op, false)?;
                self.write(" ");
                self.write(op.as_str());
                self.write(" ");
                self.write_operand(right, *op, true)?;
            }
            Expr::Unary { op, operand } => {
                self.write(op.as_str());
                if unary_needs_parens(*op, operand) {
                    self.write("(");
                    self.write_expr(operand)?;
                    self.write(")");
                } else {
                    self.write_expr(operand)?;
                }
            }
            Expr::List { items, separator } => self.write_list(items, separator)?,
            Expr::Group(inner) => {
                self.write("(");
                self.write_expr(inner)?;
                self.write(")");
            }
            Expr::Alias { expr, alias } => {
                self.write_expr(expr)?;
                self.write(" AS ");
                self.write_identifier(alias);
            }
            Expr::IsNull { expr, negated } => {
                self.write_expr(expr)?;
                self.write(if *negated { " IS NOT NULL" } else { " IS NULL" });
            }
            Expr::In {
                expr,
                list,
                negated,
            } => {
                if list.is_empty() {
                    return Err(SqlError::EmptyClause {
                        statement: self.statement,
                        clause: "IN list",
                    });
                }
                self.write_expr(expr)?;
                self.write(if *negated { " NOT IN (" } else { " IN (" });
                self.write_list(list, ", ")?;
                self.write(")");
            }
            Expr::Between {
                expr,
                low,
                high,
                negated,
            } => {
                self.write_expr(expr)?;
                self.write(if *negated { " NOT BETWEEN " } else { " BETWEEN " });
                self.write_expr(low)?;
                self.write(" AND ");
                self.write_expr(high)?;
            }
            Expr::Subquery(select) => {
                self.write("(");
                self.write_select(select)?;
                self.write(")");
            }
            Expr::Excluded(column) => self.write_excluded(column)?,
            Expr::Default => self.write("DEFAULT"),
        }
        Ok(())
    }

    fn write_operand(&mut self, operand: &Expr, parent: BinaryOp, right_side: bool) -> Result<()> {
        let needs_parens = match operand {
            Expr::Binary { op, .. } => {
                op.precedence() < parent.precedence()
                    || (right_side
                        && op.precedence() == parent.precedence()
                        && !(*op == parent && parent.is_associative()))
            }
            // Opaque text may hold any operator.
            Expr::Raw(_) => true,
            Expr::IsNull { .. } | Expr::In { .. } | Expr::Between { .. } => {
                parent.precedence() >= COMPARISON_PRECEDENCE
            }
            _ => false,
        };
        if needs_parens {
            self.write("(");
            self.write_expr(operand)?;
            self.write(")");
            Ok(())
        } else {
            self.write_expr(operand)
        }
    }

    fn write_excluded(&mut self, column: &str) -> Result<()> {
        match self.dialect.upsert_syntax() {
            UpsertSyntax::Standard => {
                self.write_identifier("excluded");
                self.write(".");
                self.write_identifier(column);
                Ok(())
            }
            UpsertSyntax::MySql => {
                self.write("VALUES(");
                self.write_identifier(column);
                self.write(")");
                Ok(())
            }
            UpsertSyntax::Unsupported => Err(self.unsupported("excluded-value reference")),
        }
    }
}

/// Precedence shared by `=`, `IS NULL`, `IN` and `BETWEEN`.
const COMPARISON_PRECEDENCE: u8 = 3;

/// Whether a unary operand must be parenthesized. A negated operand that
/// starts with `-` would otherwise open a `--` line comment.
fn unary_needs_parens(op: UnaryOp, operand: &Expr) -> bool {
    match operand {
        Expr::Binary { .. }
        | Expr::Raw(_)
        | Expr::IsNull { .. }
        | Expr::In { .. }
        | Expr::Between { .. } => true,
        Expr::Unary { .. } => op == UnaryOp::Neg,
        Expr::Literal(Literal::Integer(n)) => op == UnaryOp::Neg && *n < 0,
        Expr::Literal(Literal::Float(f)) => op == UnaryOp::Neg && f.is_sign_negative(),
        _ => false,
    }
}

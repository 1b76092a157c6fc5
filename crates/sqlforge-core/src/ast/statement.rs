//! SQL statement AST types.
//!
//! Each statement stores its clauses in fields; clause order in the rendered
//! text is fixed by the serializer, never by the order fields were filled.

use super::ddl::{AlterTableStatement, CreateTableStatement, DropTableStatement};
use super::expression::Expr;

/// Order direction for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderDirection {
    /// Ascending order (default).
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl OrderDirection {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// An ORDER BY clause entry.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderBy {
    /// The expression to order by.
    pub expr: Expr,
    /// The direction (ASC or DESC).
    pub direction: OrderDirection,
}

/// Join type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    /// INNER JOIN.
    Inner,
    /// LEFT OUTER JOIN.
    Left,
    /// RIGHT OUTER JOIN.
    Right,
    /// FULL OUTER JOIN.
    Full,
    /// CROSS JOIN.
    Cross,
}

impl JoinType {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Inner => "INNER JOIN",
            Self::Left => "LEFT JOIN",
            Self::Right => "RIGHT JOIN",
            Self::Full => "FULL JOIN",
            Self::Cross => "CROSS JOIN",
        }
    }
}

/// A JOIN clause.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinClause {
    /// The type of join.
    pub join_type: JoinType,
    /// The joined table (identifier, alias or sub-select).
    pub table: Expr,
    /// The join condition (absent for CROSS joins).
    pub on: Option<Expr>,
}

/// Row locking clause appended to a SELECT.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LockingClause {
    /// `FOR UPDATE`.
    Update,
    /// `FOR SHARE`.
    Share,
    /// Any other locking syntax, emitted verbatim.
    Raw(String),
}

/// A SELECT statement.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectStatement {
    /// Whether to select DISTINCT values.
    pub distinct: bool,
    /// The columns to select; empty renders `*`.
    pub columns: Vec<Expr>,
    /// The FROM items.
    pub from: Vec<Expr>,
    /// JOIN clauses.
    pub joins: Vec<JoinClause>,
    /// The WHERE clause.
    pub where_clause: Option<Expr>,
    /// GROUP BY expressions.
    pub group_by: Vec<Expr>,
    /// HAVING clause.
    pub having: Option<Expr>,
    /// ORDER BY clauses.
    pub order_by: Vec<OrderBy>,
    /// LIMIT clause.
    pub limit: Option<u64>,
    /// OFFSET clause.
    pub offset: Option<u64>,
    /// Locking clause.
    pub lock: Option<LockingClause>,
}

impl SelectStatement {
    /// Counts the binds reachable from this statement.
    #[must_use]
    pub fn bind_count(&self) -> usize {
        let joins: usize = self
            .joins
            .iter()
            .map(|j| j.table.bind_count() + j.on.as_ref().map_or(0, Expr::bind_count))
            .sum();
        sum(&self.columns)
            + sum(&self.from)
            + joins
            + self.where_clause.as_ref().map_or(0, Expr::bind_count)
            + sum(&self.group_by)
            + self.having.as_ref().map_or(0, Expr::bind_count)
            + self.order_by.iter().map(|o| o.expr.bind_count()).sum::<usize>()
    }
}

fn sum(exprs: &[Expr]) -> usize {
    exprs.iter().map(Expr::bind_count).sum()
}

/// A `column = value` pair in SET lists.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    /// Target column.
    pub column: String,
    /// New value.
    pub value: Expr,
}

/// The columns (and optional predicate) identifying a conflict.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConflictTarget {
    /// Conflict columns; empty means "any conflict".
    pub columns: Vec<String>,
    /// Predicate on the candidate row, rendered after the target.
    pub predicate: Option<Expr>,
}

/// What to do with a conflicting row.
#[derive(Debug, Clone, PartialEq)]
pub enum ConflictAction {
    /// Leave the existing row alone.
    DoNothing,
    /// Update the existing row.
    DoUpdate {
        /// SET assignments.
        assignments: Vec<Assignment>,
        /// Rows failing this predicate are left unmodified.
        predicate: Option<Expr>,
    },
}

/// A complete conflict-resolution clause.
#[derive(Debug, Clone, PartialEq)]
pub struct OnConflict {
    /// The conflict target.
    pub target: ConflictTarget,
    /// The action.
    pub action: ConflictAction,
}

/// An INSERT statement.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InsertStatement {
    /// Target table.
    pub table: String,
    /// Column list.
    pub columns: Vec<String>,
    /// Value rows.
    pub rows: Vec<Vec<Expr>>,
    /// Conflict resolution, if any.
    pub on_conflict: Option<OnConflict>,
    /// RETURNING expressions.
    pub returning: Vec<Expr>,
}

/// An UPDATE statement.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdateStatement {
    /// Target table.
    pub table: String,
    /// SET assignments.
    pub assignments: Vec<Assignment>,
    /// The WHERE clause.
    pub where_clause: Option<Expr>,
    /// RETURNING expressions.
    pub returning: Vec<Expr>,
}

/// A DELETE statement.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeleteStatement {
    /// Target table.
    pub table: String,
    /// The WHERE clause.
    pub where_clause: Option<Expr>,
    /// RETURNING expressions.
    pub returning: Vec<Expr>,
}

/// A statement root.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// SELECT.
    Select(SelectStatement),
    /// INSERT, with or without conflict resolution.
    Insert(InsertStatement),
    /// UPDATE.
    Update(UpdateStatement),
    /// DELETE.
    Delete(DeleteStatement),
    /// CREATE TABLE.
    CreateTable(CreateTableStatement),
    /// ALTER TABLE.
    AlterTable(AlterTableStatement),
    /// DROP TABLE.
    DropTable(DropTableStatement),
    /// A raw statement.
    Raw(Expr),
}

impl Statement {
    /// Returns the statement kind keyword.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Select(_) => "SELECT",
            Self::Insert(_) => "INSERT",
            Self::Update(_) => "UPDATE",
            Self::Delete(_) => "DELETE",
            Self::CreateTable(_) => "CREATE TABLE",
            Self::AlterTable(_) => "ALTER TABLE",
            Self::DropTable(_) => "DROP TABLE",
            Self::Raw(_) => "RAW",
        }
    }
}

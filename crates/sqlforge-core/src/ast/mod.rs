//! Abstract Syntax Tree (AST) types for SQL statements.
//!
//! Nodes are plain data: constructing one performs no I/O and no
//! validation. Builders assemble them; the serializer renders them.

mod ddl;
mod expression;
mod statement;
mod types;

pub use ddl::{
    AlterTableAction, AlterTableStatement, ColumnConstraint, ColumnDefinition,
    CreateTableStatement, DropBehavior, DropTableStatement, ForeignKeyAction, ForeignKeyRef,
    TableConstraint, TableConstraintKind,
};
pub use expression::{BinaryOp, Expr, FunctionCall, RawSegment, UnaryOp};
pub use statement::{
    Assignment, ConflictAction, ConflictTarget, DeleteStatement, InsertStatement, JoinClause,
    JoinType, LockingClause, OnConflict, OrderBy, OrderDirection, SelectStatement, Statement,
    UpdateStatement,
};
pub use types::DataType;

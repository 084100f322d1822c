use super::{BinaryOp, Value};
use crate::schema::ColumnRef;

use std::fmt;

/// A column as it appears in a join, optionally qualified by a table alias.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JoinColumn {
    pub column: ColumnRef,

    pub alias: Option<String>,
}

/// Right-hand side of a join condition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum JoinOperand {
    Column(JoinColumn),
    Value(Value),
}

/// A single predicate of a join's `ON` clause.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JoinCondition {
    pub lhs: JoinColumn,

    pub op: BinaryOp,

    pub rhs: JoinOperand,
}

impl JoinColumn {
    pub fn new(column: ColumnRef, alias: Option<&str>) -> Self {
        Self {
            column,
            alias: alias.map(String::from),
        }
    }

    /// The name the column's table is referenced by in the query.
    pub fn table_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.column.table)
    }

    /// `alias.column`, or `table.column` when the column is not aliased.
    pub fn qualified(&self) -> String {
        format!("{}.{}", self.table_name(), self.column.column)
    }
}

impl JoinOperand {
    pub fn is_value(&self) -> bool {
        matches!(self, Self::Value(_))
    }

    pub fn as_column(&self) -> Option<&JoinColumn> {
        match self {
            Self::Column(column) => Some(column),
            Self::Value(_) => None,
        }
    }

    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            Self::Column(_) => None,
        }
    }
}

impl JoinCondition {
    /// Compares a column of each side of the join.
    pub fn columns(lhs: JoinColumn, op: BinaryOp, rhs: JoinColumn) -> Self {
        Self {
            lhs,
            op,
            rhs: JoinOperand::Column(rhs),
        }
    }

    /// Compares a column against a literal.
    pub fn value(lhs: JoinColumn, op: BinaryOp, value: impl Into<Value>) -> Self {
        Self {
            lhs,
            op,
            rhs: JoinOperand::Value(value.into()),
        }
    }

    pub fn is_value_condition(&self) -> bool {
        self.rhs.is_value()
    }
}

impl fmt::Display for JoinColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.table_name(), self.column.column)
    }
}

impl fmt::Display for JoinOperand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Column(column) => fmt::Display::fmt(column, f),
            Self::Value(value) => fmt::Display::fmt(value, f),
        }
    }
}

impl fmt::Display for JoinCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.lhs, self.op, self.rhs)
    }
}

use super::{BinaryOp, JoinColumn, JoinCondition, Value};
use crate::schema::ColumnRef;

use std::fmt;

/// A join between two tables and the predicates of its `ON` clause.
///
/// Conditions are kept in the order they were added, which is the order SQL
/// is generated in. Equality ignores that order.
#[derive(Debug, Clone, Default)]
pub struct Join {
    pub left_table: Option<String>,

    pub left_alias: Option<String>,

    pub right_table: Option<String>,

    pub right_alias: Option<String>,

    pub conditions: Vec<JoinCondition>,

    pub ty: JoinType,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum JoinType {
    #[default]
    Inner,
    Left,
    Right,
}

impl Join {
    pub fn new(ty: JoinType) -> Self {
        Self {
            ty,
            ..Self::default()
        }
    }

    /// Adds a predicate comparing a column of the left table with a column of
    /// the right table.
    pub fn add_explicit_condition(
        &mut self,
        left: &ColumnRef,
        left_alias: Option<&str>,
        right: &ColumnRef,
        right_alias: Option<&str>,
        op: BinaryOp,
    ) -> &mut Self {
        self.set_left(&left.table, left_alias);
        self.set_right(&right.table, right_alias);
        self.conditions.push(JoinCondition::columns(
            JoinColumn::new(left.clone(), left_alias),
            op,
            JoinColumn::new(right.clone(), right_alias),
        ));
        self
    }

    /// Adds a predicate comparing a column of the left table with a literal.
    pub fn add_local_value_condition(
        &mut self,
        left: &ColumnRef,
        left_alias: Option<&str>,
        value: impl Into<Value>,
        op: BinaryOp,
    ) -> &mut Self {
        self.set_left(&left.table, left_alias);
        self.conditions.push(JoinCondition::value(
            JoinColumn::new(left.clone(), left_alias),
            op,
            value,
        ));
        self
    }

    /// Adds a predicate comparing a column of the right table with a literal.
    pub fn add_foreign_value_condition(
        &mut self,
        right: &ColumnRef,
        right_alias: Option<&str>,
        value: impl Into<Value>,
        op: BinaryOp,
    ) -> &mut Self {
        self.set_right(&right.table, right_alias);
        self.conditions.push(JoinCondition::value(
            JoinColumn::new(right.clone(), right_alias),
            op,
            value,
        ));
        self
    }

    pub fn count_conditions(&self) -> usize {
        self.conditions.len()
    }

    pub fn has_right_alias(&self) -> bool {
        self.right_alias.is_some()
    }

    /// The name the left table is referenced by in the query.
    pub fn left_table_alias_or_name(&self) -> Option<&str> {
        self.left_alias.as_deref().or(self.left_table.as_deref())
    }

    /// The name the right table is referenced by in the query.
    pub fn right_table_alias_or_name(&self) -> Option<&str> {
        self.right_alias.as_deref().or(self.right_table.as_deref())
    }

    fn set_left(&mut self, table: &str, alias: Option<&str>) {
        self.left_table = Some(table.to_string());
        self.left_alias = alias.map(String::from);
    }

    fn set_right(&mut self, table: &str, alias: Option<&str>) {
        self.right_table = Some(table.to_string());
        self.right_alias = alias.map(String::from);
    }
}

impl PartialEq for Join {
    fn eq(&self, other: &Join) -> bool {
        self.ty == other.ty
            && self.left_table == other.left_table
            && self.left_alias == other.left_alias
            && self.right_table == other.right_table
            && self.right_alias == other.right_alias
            && same_conditions(&self.conditions, &other.conditions)
    }
}

/// Compares two condition lists as multisets.
fn same_conditions(lhs: &[JoinCondition], rhs: &[JoinCondition]) -> bool {
    if lhs.len() != rhs.len() {
        return false;
    }

    let mut matched = vec![false; rhs.len()];

    for condition in lhs {
        let found = rhs
            .iter()
            .enumerate()
            .find(|(i, other)| !matched[*i] && *other == condition)
            .map(|(i, _)| i);

        let Some(i) = found else {
            return false;
        };
        matched[i] = true;
    }

    true
}

impl fmt::Display for JoinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            JoinType::Inner => "INNER JOIN",
            JoinType::Left => "LEFT JOIN",
            JoinType::Right => "RIGHT JOIN",
        })
    }
}

impl fmt::Display for Join {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ty)?;

        if let Some(table) = &self.right_table {
            write!(f, " {table}")?;
            if let Some(alias) = &self.right_alias {
                write!(f, " {alias}")?;
            }
        }

        f.write_str(" ON (")?;
        for (i, condition) in self.conditions.iter().enumerate() {
            if i > 0 {
                f.write_str(" AND ")?;
            }
            write!(f, "{condition}")?;
        }
        f.write_str(")")
    }
}

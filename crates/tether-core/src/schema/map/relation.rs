use super::{DatabaseMap, TableMap};
use crate::{
    schema::{ColumnRef, Name},
    stmt, Error, Result,
};

use std::sync::Arc;

/// A navigable relationship from one table to another.
#[derive(Debug, Clone, PartialEq)]
pub struct Relation {
    /// Names the relation and the accessor returning the related object.
    pub name: Name,

    pub kind: RelationKind,

    /// The table the relation is declared on
    pub left_table: String,

    /// The related table
    pub right_table: String,

    /// Column mapping, one entry per slot. `left_columns[i]` maps to
    /// `right_columns[i]`.
    pub left_columns: Vec<ColumnRef>,

    pub right_columns: Vec<ColumnRef>,

    /// When slot `i` holds a value, the slot filters on that value instead of
    /// joining the two columns.
    pub fixed_left_values: Vec<Option<stmt::Value>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationKind {
    /// The right table holds the foreign key.
    OneToMany,

    /// The left table holds the foreign key.
    ManyToOne,

    OneToOne,

    ManyToMany,
}

impl Relation {
    pub fn new(
        name: impl Into<Name>,
        kind: RelationKind,
        left_table: impl Into<String>,
        right_table: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            kind,
            left_table: left_table.into(),
            right_table: right_table.into(),
            left_columns: vec![],
            right_columns: vec![],
            fixed_left_values: vec![],
        }
    }

    /// Maps `left` on the left table to `right` on the right table.
    pub fn column(mut self, left: &str, right: &str) -> Self {
        self.left_columns
            .push(ColumnRef::new(self.left_table.clone(), left));
        self.right_columns
            .push(ColumnRef::new(self.right_table.clone(), right));
        self.fixed_left_values.push(None);
        self
    }

    /// Adds a slot that constrains a column to a fixed value.
    ///
    /// The value applies to `right` for one-to-many relations and to `left`
    /// otherwise.
    pub fn fixed(mut self, left: &str, right: &str, value: impl Into<stmt::Value>) -> Self {
        self.left_columns
            .push(ColumnRef::new(self.left_table.clone(), left));
        self.right_columns
            .push(ColumnRef::new(self.right_table.clone(), right));
        self.fixed_left_values.push(Some(value.into()));
        self
    }

    /// Number of column mapping slots.
    ///
    /// Fails if the mapping's column and value lists disagree in length.
    pub fn count_column_mappings(&self) -> Result<usize> {
        let n = self.left_columns.len();

        if self.right_columns.len() != n || self.fixed_left_values.len() != n {
            return Err(Error::invalid_mapping(format!(
                "relation `{}` maps {} left columns to {} right columns with {} fixed values",
                self.name,
                n,
                self.right_columns.len(),
                self.fixed_left_values.len()
            )));
        }

        Ok(n)
    }

    /// Name of the accessor generated entities expose for this relation.
    pub fn accessor_name(&self) -> String {
        format!("get{}", self.name.upper_camel_case())
    }

    /// The table map of the related table.
    pub fn right_table_map<'a>(&self, db: &'a DatabaseMap) -> Result<&'a Arc<TableMap>> {
        db.table(&self.right_table)
    }

    pub fn is_one_to_many(&self) -> bool {
        matches!(self.kind, RelationKind::OneToMany)
    }
}

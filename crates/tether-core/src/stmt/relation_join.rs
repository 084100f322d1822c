use super::{BinaryOp, Join, JoinType, RelationJoinId};
use crate::{
    schema::{DatabaseMap, Relation, TableMap},
    Error, Result,
};

use std::{cell::OnceCell, fmt, sync::Arc};

/// A join whose conditions come from a [`Relation`].
///
/// Built once per step of a relation path. When the path has several steps,
/// each join links back to the join of the step before it; the join without
/// a previous join is the primary join. The links live in [`Joins`], which
/// owns every join of a query.
///
/// [`Joins`]: super::Joins
#[derive(Debug, Clone)]
pub struct RelationJoin {
    join: Join,

    relation: Option<Relation>,

    /// Table map of the right table, resolved from the relation on first use.
    table_map: OnceCell<Arc<TableMap>>,

    previous: Option<RelationJoinId>,
}

impl RelationJoin {
    /// Creates a join with no relation bound yet.
    pub fn new(ty: JoinType) -> Self {
        Self {
            join: Join::new(ty),
            relation: None,
            table_map: OnceCell::new(),
            previous: None,
        }
    }

    /// Creates a join and binds `relation` to it.
    pub fn bound(
        relation: Relation,
        left_alias: Option<&str>,
        relation_alias: Option<&str>,
        ty: JoinType,
    ) -> Result<Self> {
        let mut join = Self::new(ty);
        join.bind(relation, left_alias, relation_alias)?;
        Ok(join)
    }

    /// Converts a plain join into a relation join.
    ///
    /// The conditions, tables and aliases are kept as they are and the right
    /// table map is looked up in `db`. No relation is bound.
    pub fn from_join(join: Join, db: &DatabaseMap) -> Result<Self> {
        let Some(right_table) = join.right_table.as_deref() else {
            return Err(Error::invalid_schema("join has no right table"));
        };
        let table_map = db.table(right_table)?.clone();

        Ok(Self {
            join,
            relation: None,
            table_map: OnceCell::from(table_map),
            previous: None,
        })
    }

    /// Builds the join conditions from the relation's column mapping and
    /// stores the relation.
    ///
    /// Slot `i` becomes a column equality between `left_columns[i]` and
    /// `right_columns[i]`, unless the slot holds a fixed value. A fixed value
    /// filters the right column for one-to-many relations and the left column
    /// for every other kind.
    pub fn bind(
        &mut self,
        relation: Relation,
        left_alias: Option<&str>,
        relation_alias: Option<&str>,
    ) -> Result<&mut Self> {
        if let Some(bound) = &self.relation {
            return Err(Error::invalid_mapping(format!(
                "join is already bound to relation `{}`",
                bound.name
            )));
        }

        let n = relation.count_column_mappings()?;

        for i in 0..n {
            let left = &relation.left_columns[i];
            let right = &relation.right_columns[i];

            match &relation.fixed_left_values[i] {
                Some(value) if relation.is_one_to_many() => {
                    self.join.add_foreign_value_condition(
                        right,
                        relation_alias,
                        value.clone(),
                        BinaryOp::Eq,
                    );
                }
                Some(value) => {
                    self.join.add_local_value_condition(
                        left,
                        left_alias,
                        value.clone(),
                        BinaryOp::Eq,
                    );
                }
                None => {
                    self.join.add_explicit_condition(
                        left,
                        left_alias,
                        right,
                        relation_alias,
                        BinaryOp::Eq,
                    );
                }
            }
        }

        tracing::trace!(
            relation = %relation.name,
            conditions = self.join.count_conditions(),
            "bound relation join"
        );

        self.relation = Some(relation);
        Ok(self)
    }

    pub fn relation(&self) -> Result<&Relation> {
        self.relation.as_ref().ok_or_else(|| {
            Error::unbound_relation(match self.join.right_table.as_deref() {
                Some(table) => format!("join on `{table}`"),
                None => String::new(),
            })
        })
    }

    pub fn is_bound(&self) -> bool {
        self.relation.is_some()
    }

    pub fn join(&self) -> &Join {
        &self.join
    }

    pub fn join_type(&self) -> JoinType {
        self.join.ty
    }

    /// Overrides the right table map.
    pub fn set_table_map(&mut self, table_map: Arc<TableMap>) -> &mut Self {
        self.table_map = OnceCell::from(table_map);
        self
    }

    /// The right table map, resolved from the bound relation the first time
    /// it is needed.
    pub fn table_map(&self, db: &DatabaseMap) -> Result<&Arc<TableMap>> {
        if let Some(table_map) = self.table_map.get() {
            return Ok(table_map);
        }

        let resolved = self.relation()?.right_table_map(db)?.clone();
        Ok(self.table_map.get_or_init(|| resolved))
    }

    pub fn is_identifier_quoting_enabled(&self, db: &DatabaseMap) -> Result<bool> {
        Ok(self.table_map(db)?.is_identifier_quoting_enabled())
    }

    pub fn set_relation_alias(&mut self, alias: impl Into<String>) -> &mut Self {
        self.join.right_alias = Some(alias.into());
        self
    }

    pub fn relation_alias(&self) -> Option<&str> {
        self.join.right_alias.as_deref()
    }

    pub fn has_relation_alias(&self) -> bool {
        self.join.has_right_alias()
    }

    /// The name the related table is exposed under: the relation alias, or
    /// the right table name when no alias was set.
    pub fn effective_relation_alias(&self) -> Option<&str> {
        self.relation_alias()
            .or_else(|| self.relation.as_ref().map(|r| r.right_table.as_str()))
            .or(self.join.right_table.as_deref())
    }

    pub fn previous_join(&self) -> Option<RelationJoinId> {
        self.previous
    }

    pub fn is_primary(&self) -> bool {
        self.previous.is_none()
    }

    pub(super) fn set_previous(&mut self, previous: Option<RelationJoinId>) {
        self.previous = previous;
    }

    /// Compares this step of a chain, ignoring the previous join.
    pub(super) fn same_step(&self, other: &RelationJoin) -> bool {
        self.join == other.join
            && self.relation == other.relation
            && self.relation_alias() == other.relation_alias()
    }
}

impl From<RelationJoin> for Join {
    fn from(value: RelationJoin) -> Self {
        value.join
    }
}

impl fmt::Display for RelationJoin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.join)?;

        match self.table_map.get() {
            Some(table_map) => write!(f, " table map: {}", table_map.name)?,
            None => f.write_str(" table map: null")?,
        }

        match &self.relation {
            Some(relation) => write!(f, " relation: {}", relation.name)?,
            None => f.write_str(" relation: null")?,
        }

        match self.previous {
            Some(previous) => write!(f, " previous join: #{}", previous.0)?,
            None => f.write_str(" previous join: null")?,
        }

        match self.relation_alias() {
            Some(alias) => write!(f, " relation alias: {alias}"),
            None => f.write_str(" relation alias: null"),
        }
    }
}

use super::{Hydrated, JoinType, RelationJoin};
use crate::{bail, schema::DatabaseMap, Error, Result};

use std::ops::Index;

/// The relation joins of one query.
///
/// Joins refer to the join of the preceding path step by id. A join can only
/// follow a join added before it, so chains always end at a primary join.
#[derive(Debug, Clone, Default)]
pub struct Joins {
    joins: Vec<RelationJoin>,
}

/// Identifies a join within its [`Joins`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelationJoinId(pub usize);

impl Joins {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.joins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.joins.is_empty()
    }

    /// Adds a primary join without looking for an equal one.
    ///
    /// Any previous join the value carries over from another arena is
    /// dropped. Use [`set_previous_join`](Self::set_previous_join) to link it.
    pub fn push(&mut self, mut join: RelationJoin) -> RelationJoinId {
        join.set_previous(None);

        let id = RelationJoinId(self.joins.len());
        self.joins.push(join);
        id
    }

    /// Adds `join` as the step following `previous`, unless an equal join is
    /// already present, in which case that join's id is returned instead.
    pub fn add(
        &mut self,
        join: RelationJoin,
        previous: Option<RelationJoinId>,
    ) -> Result<RelationJoinId> {
        if let Some(previous) = previous {
            self.check_id(previous)?;
        }

        if let Some(existing) = self.find_equal(&join, previous) {
            tracing::trace!(join = existing.0, "reusing equal relation join");
            return Ok(existing);
        }

        let id = self.push(join);
        self.joins[id.0].set_previous(previous);
        Ok(id)
    }

    pub fn get(&self, id: RelationJoinId) -> Option<&RelationJoin> {
        self.joins.get(id.0)
    }

    pub fn get_mut(&mut self, id: RelationJoinId) -> Option<&mut RelationJoin> {
        self.joins.get_mut(id.0)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = (RelationJoinId, &RelationJoin)> + '_ {
        self.joins
            .iter()
            .enumerate()
            .map(|(i, join)| (RelationJoinId(i), join))
    }

    /// Links `id` to the join of the preceding path step.
    pub fn set_previous_join(
        &mut self,
        id: RelationJoinId,
        previous: RelationJoinId,
    ) -> Result<()> {
        self.check_id(id)?;

        if previous >= id {
            bail!(
                "join #{} cannot follow join #{}; a join must follow an earlier join",
                id.0,
                previous.0
            );
        }

        self.joins[id.0].set_previous(Some(previous));
        Ok(())
    }

    pub fn previous_join(&self, id: RelationJoinId) -> Option<RelationJoinId> {
        self[id].previous_join()
    }

    pub fn is_primary(&self, id: RelationJoinId) -> bool {
        self[id].is_primary()
    }

    /// Walks the chain from `id` back to its primary join, `id` included.
    pub fn chain(&self, id: RelationJoinId) -> impl Iterator<Item = RelationJoinId> + '_ {
        std::iter::successors(Some(id), move |id| self[*id].previous_join())
    }

    /// Number of joins preceding `id` in its chain.
    pub fn depth(&self, id: RelationJoinId) -> usize {
        self.chain(id).count() - 1
    }

    /// Returns the already hydrated object the object of join `id` is
    /// related to.
    ///
    /// A primary join's anchor is `root` itself. Otherwise the previous
    /// join's anchor is resolved and the previous join's relation is followed
    /// from it. Fails if `id` is not a join of this arena.
    pub fn resolve_anchor<'a>(
        &self,
        id: RelationJoinId,
        root: &'a dyn Hydrated,
    ) -> Result<&'a dyn Hydrated> {
        self.check_id(id)?;

        let Some(previous) = self[id].previous_join() else {
            return Ok(root);
        };

        let anchor = self.resolve_anchor(previous, root)?;
        let relation = self[previous].relation()?;

        anchor
            .related(&relation.name)
            .ok_or_else(|| Error::missing_relation_data(relation.name.to_string()))
    }

    /// Returns `true` if join `id` and join `other_id` of `other` are the
    /// same step reached through equal chains.
    pub fn equals(&self, id: RelationJoinId, other: &Joins, other_id: RelationJoinId) -> bool {
        if !self[id].same_step(&other[other_id]) {
            return false;
        }

        match (self[id].previous_join(), other[other_id].previous_join()) {
            (None, None) => true,
            (Some(lhs), Some(rhs)) => self.equals(lhs, other, rhs),
            _ => false,
        }
    }

    /// Finds a join equal to `join` placed after `previous`.
    pub fn find_equal(
        &self,
        join: &RelationJoin,
        previous: Option<RelationJoinId>,
    ) -> Option<RelationJoinId> {
        self.iter()
            .find(|(_, existing)| {
                existing.same_step(join)
                    && match (existing.previous_join(), previous) {
                        (None, None) => true,
                        (Some(lhs), Some(rhs)) => self.equals(lhs, self, rhs),
                        _ => false,
                    }
            })
            .map(|(id, _)| id)
    }

    /// Joins every relation of a dotted path such as `author.country`,
    /// starting at `root_table`, and returns the id of the last join.
    ///
    /// Each step is chained to the step before it. `alias` is the relation
    /// alias of the last step. Steps already joined are reused.
    pub fn join_path(
        &mut self,
        db: &DatabaseMap,
        root_table: &str,
        path: &str,
        alias: Option<&str>,
        ty: JoinType,
    ) -> Result<RelationJoinId> {
        let segments: Vec<&str> = path.split('.').collect();

        if segments.iter().any(|segment| segment.trim().is_empty()) {
            return Err(Error::invalid_schema(format!(
                "relation path `{path}` has an empty segment"
            )));
        }

        let mut table = db.table(root_table)?.clone();
        let mut previous = None;

        for (i, segment) in segments.iter().enumerate() {
            let relation = table.relation(segment.trim())?.clone();
            let right = relation.right_table_map(db)?.clone();
            let relation_alias = if i + 1 == segments.len() { alias } else { None };

            let mut join = RelationJoin::bound(relation, None, relation_alias, ty)
                .map_err(|err| err.context(format!("joining `{path}`")))?;
            join.set_table_map(right.clone());

            previous = Some(self.add(join, previous)?);
            table = right;
        }

        previous.ok_or_else(|| Error::invalid_schema("relation path is empty"))
    }

    fn check_id(&self, id: RelationJoinId) -> Result<()> {
        if id.0 >= self.joins.len() {
            bail!("join #{} does not exist", id.0);
        }
        Ok(())
    }
}

impl Index<RelationJoinId> for Joins {
    type Output = RelationJoin;

    fn index(&self, id: RelationJoinId) -> &RelationJoin {
        &self.joins[id.0]
    }
}

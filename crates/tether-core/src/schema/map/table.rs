use super::Relation;
use crate::{schema::Name, Error, Result};

use indexmap::IndexMap;

/// What the query builder knows about one table.
#[derive(Debug, Clone)]
pub struct TableMap {
    pub name: String,

    pub columns: Vec<String>,

    /// When `true`, generated SQL quotes this table's identifiers.
    pub identifier_quoting: bool,

    /// Relations joinable from this table, in declaration order.
    relations: IndexMap<Name, Relation>,
}

impl TableMap {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: vec![],
            identifier_quoting: false,
            relations: IndexMap::new(),
        }
    }

    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns.extend(columns.into_iter().map(Into::into));
        self
    }

    pub fn identifier_quoting(mut self, enabled: bool) -> Self {
        self.identifier_quoting = enabled;
        self
    }

    /// Declares a relation on this table.
    ///
    /// The relation must originate from this table. A relation with the same
    /// name replaces the earlier one.
    pub fn add_relation(&mut self, relation: Relation) -> Result<&mut Self> {
        if relation.left_table != self.name {
            return Err(Error::invalid_schema(format!(
                "relation `{}` starts at table `{}`, not `{}`",
                relation.name, relation.left_table, self.name
            )));
        }

        relation.count_column_mappings()?;
        self.relations.insert(relation.name.clone(), relation);
        Ok(self)
    }

    pub fn relation(&self, name: impl Into<Name>) -> Result<&Relation> {
        let name = name.into();
        self.relations.get(&name).ok_or_else(|| {
            Error::invalid_schema(format!(
                "table `{}` has no relation `{}`",
                self.name, name
            ))
        })
    }

    pub fn relations(&self) -> impl ExactSizeIterator<Item = &Relation> + '_ {
        self.relations.values()
    }

    pub fn is_identifier_quoting_enabled(&self) -> bool {
        self.identifier_quoting
    }
}

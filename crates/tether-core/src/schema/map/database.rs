use super::TableMap;
use crate::{Error, Result};

use indexmap::IndexMap;
use std::sync::Arc;

/// Every table map known to the runtime, keyed by table name.
#[derive(Debug, Clone, Default)]
pub struct DatabaseMap {
    pub name: String,

    tables: IndexMap<String, Arc<TableMap>>,
}

impl DatabaseMap {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tables: IndexMap::new(),
        }
    }

    /// Registers a table map, replacing any map with the same table name.
    pub fn add_table(&mut self, table: TableMap) -> Arc<TableMap> {
        let table = Arc::new(table);
        self.tables.insert(table.name.clone(), table.clone());
        table
    }

    pub fn table(&self, name: &str) -> Result<&Arc<TableMap>> {
        self.tables.get(name).ok_or_else(|| {
            Error::invalid_schema(format!(
                "table `{}` is not registered in database `{}`",
                name, self.name
            ))
        })
    }

    pub fn has_table(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    pub fn tables(&self) -> impl ExactSizeIterator<Item = &Arc<TableMap>> + '_ {
        self.tables.values()
    }
}

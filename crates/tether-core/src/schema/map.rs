//! Runtime relation registry.
//!
//! Table maps describe what the query builder needs to know about a table:
//! its columns, its identifier quoting policy and the relations that can be
//! joined from it. Relations refer to their tables by name, so a pair of
//! relations pointing at each other does not form an ownership cycle.

mod database;
pub use database::DatabaseMap;

mod relation;
pub use relation::{Relation, RelationKind};

mod table;
pub use table::TableMap;

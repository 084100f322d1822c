mod column_ref;
pub use column_ref::ColumnRef;

pub mod db;

pub mod map;
pub use map::{DatabaseMap, Relation, RelationKind, TableMap};

mod name;
pub use name::Name;

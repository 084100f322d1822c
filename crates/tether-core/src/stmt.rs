mod hydrated;
pub use hydrated::Hydrated;

mod join;
pub use join::{Join, JoinType};

mod join_condition;
pub use join_condition::{JoinColumn, JoinCondition, JoinOperand};

mod joins;
pub use joins::{Joins, RelationJoinId};

mod op_binary;
pub use op_binary::BinaryOp;

mod relation_join;
pub use relation_join::RelationJoin;

mod value;
pub use value::Value;

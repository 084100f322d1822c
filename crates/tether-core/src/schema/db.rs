mod diff;
pub use diff::DiffOptions;

mod foreign_key;
pub use foreign_key::{
    compute_diff, ForeignKey, ForeignKeyChange, ForeignKeysDiff, ForeignKeysDiffItem,
};

mod referential_action;
pub use referential_action::ReferentialAction;

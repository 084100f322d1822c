use super::{DiffOptions, ReferentialAction};

use serde::{Deserialize, Serialize};
use std::fmt;
use std_util::str;

/// A foreign key constraint between two tables, as declared in a schema
/// snapshot.
///
/// Position `i` of `local_columns` references position `i` of
/// `foreign_columns`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForeignKey {
    /// Constraint name, used to pair constraints across snapshots.
    pub name: String,

    /// The referencing table
    pub local_table: String,

    /// The referenced table
    pub foreign_table: String,

    pub local_columns: Vec<String>,

    pub foreign_columns: Vec<String>,

    /// `None` means the action was left unset.
    #[serde(
        deserialize_with = "super::referential_action::deserialize_optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub on_update: Option<ReferentialAction>,

    #[serde(
        deserialize_with = "super::referential_action::deserialize_optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub on_delete: Option<ReferentialAction>,

    /// When `true` the constraint only exists in the object model and no SQL
    /// is emitted for it.
    pub skip_sql: bool,
}

/// The first criterion on which two foreign keys were found to differ.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ForeignKeyChange {
    LocalTable,
    ForeignTable,
    LocalColumns,
    ForeignColumns,
    OnUpdate,
    OnDelete,
    SkipSql,
}

impl ForeignKey {
    pub fn new(local_table: impl Into<String>, foreign_table: impl Into<String>) -> Self {
        Self {
            local_table: local_table.into(),
            foreign_table: foreign_table.into(),
            ..Self::default()
        }
    }

    /// Adds a `local -> foreign` column pair.
    pub fn column(mut self, local: impl Into<String>, foreign: impl Into<String>) -> Self {
        self.local_columns.push(local.into());
        self.foreign_columns.push(foreign.into());
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn on_update(mut self, action: ReferentialAction) -> Self {
        self.on_update = Some(action);
        self
    }

    pub fn on_delete(mut self, action: ReferentialAction) -> Self {
        self.on_delete = Some(action);
        self
    }

    pub fn skip_sql(mut self, skip_sql: bool) -> Self {
        self.skip_sql = skip_sql;
        self
    }

    /// Brings an action into the form used when comparing constraints.
    pub fn normalize_action(&self, action: Option<&ReferentialAction>) -> ReferentialAction {
        ReferentialAction::normalize(action)
    }

    /// Returns `true` if the two constraints would behave differently at
    /// runtime or produce different SQL.
    pub fn has_diff(&self, other: &ForeignKey, case_insensitive: bool) -> bool {
        self.first_difference(other, case_insensitive).is_some()
    }

    /// Finds the first criterion on which `self` and `other` differ.
    ///
    /// Column lists are compared as case-folded sets regardless of
    /// `case_insensitive`, which only applies to table names. Unset and
    /// `NO ACTION` referential actions are treated as `RESTRICT`.
    pub fn first_difference(
        &self,
        other: &ForeignKey,
        case_insensitive: bool,
    ) -> Option<ForeignKeyChange> {
        if !str::ident_eq(&self.local_table, &other.local_table, case_insensitive) {
            return Some(ForeignKeyChange::LocalTable);
        }

        if !str::ident_eq(&self.foreign_table, &other.foreign_table, case_insensitive) {
            return Some(ForeignKeyChange::ForeignTable);
        }

        if column_set(&self.local_columns) != column_set(&other.local_columns) {
            return Some(ForeignKeyChange::LocalColumns);
        }

        if column_set(&self.foreign_columns) != column_set(&other.foreign_columns) {
            return Some(ForeignKeyChange::ForeignColumns);
        }

        if self.normalize_action(self.on_update.as_ref())
            != other.normalize_action(other.on_update.as_ref())
        {
            return Some(ForeignKeyChange::OnUpdate);
        }

        if self.normalize_action(self.on_delete.as_ref())
            != other.normalize_action(other.on_delete.as_ref())
        {
            return Some(ForeignKeyChange::OnDelete);
        }

        (self.skip_sql != other.skip_sql).then_some(ForeignKeyChange::SkipSql)
    }
}

/// Returns `true` if `from` and `to` differ in any respect relevant to a
/// migration, `false` if they are equivalent.
pub fn compute_diff(from: &ForeignKey, to: &ForeignKey, case_insensitive: bool) -> bool {
    from.has_diff(to, case_insensitive)
}

/// Sorted, case-folded column names. Duplicates are kept, so `[a, b]` and
/// `[a, a, b]` stay distinct.
fn column_set(columns: &[String]) -> Vec<String> {
    let mut folded: Vec<_> = columns.iter().map(|column| str::fold_case(column)).collect();
    folded.sort_unstable();
    folded
}

impl fmt::Display for ForeignKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.name.is_empty() {
            write!(f, "{} ", self.name)?;
        }
        write!(
            f,
            "{}({}) -> {}({})",
            self.local_table,
            self.local_columns.join(", "),
            self.foreign_table,
            self.foreign_columns.join(", ")
        )
    }
}

impl fmt::Display for ForeignKeyChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use ForeignKeyChange::*;

        match self {
            LocalTable => f.write_str("local table"),
            ForeignTable => f.write_str("foreign table"),
            LocalColumns => f.write_str("local columns"),
            ForeignColumns => f.write_str("foreign columns"),
            OnUpdate => f.write_str("on update"),
            OnDelete => f.write_str("on delete"),
            SkipSql => f.write_str("skip sql"),
        }
    }
}

/// The foreign key changes between two snapshots of one table.
#[derive(Debug)]
pub struct ForeignKeysDiff<'a> {
    items: Vec<ForeignKeysDiffItem<'a>>,
}

impl<'a> ForeignKeysDiff<'a> {
    /// Pairs up the foreign keys of two snapshots.
    ///
    /// Constraints that compare equal are paired first, whatever their names.
    /// The rest are paired by name and reported as altered; anything left is
    /// dropped (`from`) or added (`to`).
    pub fn from(options: &DiffOptions, from: &'a [ForeignKey], to: &'a [ForeignKey]) -> Self {
        let case_insensitive = options.is_case_insensitive();
        let mut items = vec![];
        let mut unmatched: Vec<&'a ForeignKey> = to.iter().collect();
        let mut changed = vec![];

        for from in from {
            match unmatched
                .iter()
                .position(|to| !from.has_diff(to, case_insensitive))
            {
                Some(pos) => {
                    unmatched.remove(pos);
                }
                None => changed.push(from),
            }
        }

        for from in changed {
            let same_name = unmatched.iter().position(|to| {
                !from.name.is_empty() && str::ident_eq(&from.name, &to.name, case_insensitive)
            });

            let Some(pos) = same_name else {
                tracing::debug!(foreign_key = %from, "foreign key dropped");
                items.push(ForeignKeysDiffItem::DropForeignKey(from));
                continue;
            };

            let to = unmatched.remove(pos);
            if let Some(change) = from.first_difference(to, case_insensitive) {
                tracing::debug!(foreign_key = %from, %change, "foreign key changed");
                items.push(ForeignKeysDiffItem::AlterForeignKey { from, to, change });
            }
        }

        for to in unmatched {
            tracing::debug!(foreign_key = %to, "foreign key added");
            items.push(ForeignKeysDiffItem::AddForeignKey(to));
        }

        Self { items }
    }

    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &ForeignKeysDiffItem<'a>> + '_ {
        self.items.iter()
    }
}

impl<'a> IntoIterator for ForeignKeysDiff<'a> {
    type Item = ForeignKeysDiffItem<'a>;
    type IntoIter = std::vec::IntoIter<ForeignKeysDiffItem<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[derive(Debug, PartialEq)]
pub enum ForeignKeysDiffItem<'a> {
    AddForeignKey(&'a ForeignKey),
    DropForeignKey(&'a ForeignKey),
    AlterForeignKey {
        from: &'a ForeignKey,
        to: &'a ForeignKey,
        change: ForeignKeyChange,
    },
}

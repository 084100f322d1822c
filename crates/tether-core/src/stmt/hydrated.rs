use crate::schema::Name;

/// An object populated from a result row whose related objects can be
/// reached by relation name.
///
/// Generated entity types implement this by dispatching on the relation name
/// to the matching accessor.
pub trait Hydrated {
    /// Returns the object held for `relation`, or `None` when the relation
    /// was not populated.
    fn related(&self, relation: &Name) -> Option<&dyn Hydrated>;
}

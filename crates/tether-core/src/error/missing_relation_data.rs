use super::Error;

/// Error when walking a relation chain reaches an object that does not hold
/// the next related object.
#[derive(Debug)]
pub(super) struct MissingRelationData {
    relation: Box<str>,
}

impl std::error::Error for MissingRelationData {}

impl core::fmt::Display for MissingRelationData {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "missing related object for relation `{}`", self.relation)
    }
}

impl Error {
    /// Creates a missing relation data error for the named relation.
    pub fn missing_relation_data(relation: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::MissingRelationData(MissingRelationData {
            relation: relation.into().into(),
        }))
    }

    /// Returns `true` if this error is a missing relation data error.
    pub fn is_missing_relation_data(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::MissingRelationData(_))
    }
}

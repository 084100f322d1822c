use super::Error;

/// Error when a relation join is used before a relation was bound to it.
///
/// A join converted from a plain [`Join`](crate::stmt::Join) starts without a
/// relation. Building conditions from it, or walking a chain through it,
/// requires the relation.
#[derive(Debug)]
pub(super) struct UnboundRelation {
    context: Option<Box<str>>,
}

impl std::error::Error for UnboundRelation {}

impl core::fmt::Display for UnboundRelation {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str("no relation bound to join")?;
        if let Some(ref ctx) = self.context {
            write!(f, ": {}", ctx)?;
        }
        Ok(())
    }
}

impl Error {
    /// Creates an unbound relation error.
    pub fn unbound_relation(context: impl Into<String>) -> Error {
        let context = context.into();
        Error::from(super::ErrorKind::UnboundRelation(UnboundRelation {
            context: (!context.is_empty()).then(|| context.into()),
        }))
    }

    /// Returns `true` if this error is an unbound relation error.
    pub fn is_unbound_relation(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnboundRelation(_))
    }
}

use serde::Deserialize;

/// Settings shared by the schema diff passes.
///
/// Embeddable in a project configuration file; missing keys take their
/// default value.
///
/// ```
/// # use tether_core::schema::db::DiffOptions;
/// let options = DiffOptions::new().case_insensitive(true);
/// assert!(options.is_case_insensitive());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DiffOptions {
    /// Compare table and constraint names without regard to ASCII case.
    ///
    /// Column names are always compared case-insensitively.
    pub case_insensitive: bool,
}

impl DiffOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn case_insensitive(mut self, value: bool) -> Self {
        self.case_insensitive = value;
        self
    }

    pub fn is_case_insensitive(&self) -> bool {
        self.case_insensitive
    }
}

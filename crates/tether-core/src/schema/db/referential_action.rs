use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// What the database does to referencing rows when the referenced row is
/// updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ReferentialAction {
    Cascade,
    SetNull,
    Restrict,
    NoAction,
    SetDefault,

    /// A vendor specific action, kept upper-cased as written.
    Other(String),
}

impl ReferentialAction {
    /// Parses an action as written in a schema definition.
    ///
    /// Matching ignores case and accepts spaces, underscores or nothing
    /// between words (`set null`, `SET_NULL`, `SETNULL`). Returns `None` for
    /// a blank string, which means the action is unset.
    pub fn parse(src: &str) -> Option<Self> {
        let words: Vec<String> = src
            .split(|c: char| c.is_whitespace() || c == '_')
            .filter(|word| !word.is_empty())
            .map(str::to_ascii_uppercase)
            .collect();

        if words.is_empty() {
            return None;
        }

        Some(match words.concat().as_str() {
            "CASCADE" => Self::Cascade,
            "SETNULL" => Self::SetNull,
            "RESTRICT" => Self::Restrict,
            "NOACTION" => Self::NoAction,
            "SETDEFAULT" => Self::SetDefault,
            _ => Self::Other(words.join(" ")),
        })
    }

    /// The action's SQL spelling.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Cascade => "CASCADE",
            Self::SetNull => "SET NULL",
            Self::Restrict => "RESTRICT",
            Self::NoAction => "NO ACTION",
            Self::SetDefault => "SET DEFAULT",
            Self::Other(action) => action,
        }
    }

    /// Collapses the spellings of the default behavior.
    ///
    /// An unset action and `NO ACTION` both behave as `RESTRICT`.
    pub fn normalize(action: Option<&Self>) -> Self {
        match action {
            None | Some(Self::NoAction) => Self::Restrict,
            Some(action) => action.clone(),
        }
    }
}

impl fmt::Display for ReferentialAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ReferentialAction> for String {
    fn from(value: ReferentialAction) -> Self {
        match value {
            ReferentialAction::Other(action) => action,
            action => action.as_str().to_string(),
        }
    }
}

impl TryFrom<String> for ReferentialAction {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ReferentialAction::parse(&value)
            .ok_or_else(|| "referential action must not be blank".to_string())
    }
}

/// Deserializes an optional action, mapping a blank string to unset.
pub(super) fn deserialize_optional<'de, D>(
    deserializer: D,
) -> Result<Option<ReferentialAction>, D::Error>
where
    D: Deserializer<'de>,
{
    let src = Option::<String>::deserialize(deserializer)?;
    Ok(src.as_deref().and_then(ReferentialAction::parse))
}

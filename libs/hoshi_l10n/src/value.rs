use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single localized resource.
///
/// Values are immutable once loaded; a reload replaces them wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceValue {
    String(String),
    Bool(bool),
    Number(serde_json::Number),
    List(Vec<ResourceValue>),
    /// Compound content, like an embed with several fields.
    Record(IndexMap<String, ResourceValue>),
}

impl ResourceValue {
    /// Gets the value as a string, if it is one.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Gets the value as a list, if it is one.
    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(l) => Some(l),
            _ => None,
        }
    }

    /// Gets the value as a record, if it is one.
    #[must_use]
    pub fn as_record(&self) -> Option<&IndexMap<String, Self>> {
        match self {
            Self::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Gets the value as a number, if it is one.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    /// Gets a field of a record value.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Self> {
        self.as_record()?.get(name)
    }

    /// Gets a string field of a record value.
    #[must_use]
    pub fn str_field(&self, name: &str) -> Option<&str> {
        self.field(name)?.as_str()
    }

    /// Whether this is an empty string, list or record.
    ///
    /// Numbers and booleans are never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::String(s) => s.is_empty(),
            Self::List(l) => l.is_empty(),
            Self::Record(r) => r.is_empty(),
            Self::Bool(_) | Self::Number(_) => false,
        }
    }
}

impl From<&str> for ResourceValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for ResourceValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

//! Row identifier newtype with smart constructor.
//!
//! Identifiers validate non-empty strings at construction time.
//! The raw constructor is never exported.

use crate::model::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Unique, immutable identity of a row (e.g. `"user-42"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RowId(String);

impl RowId {
    /// Smart constructor: validates non-empty id.
    pub fn new(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        if raw.is_empty() {
            Err(ValidationError::EmptyRowId)
        } else {
            Ok(Self(raw))
        }
    }

    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for RowId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RowId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RowId> for String {
    fn from(id: RowId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn row_id_accepts_valid_string() {
        let id = RowId::new("user-1");
        assert!(id.is_ok(), "Valid id should be accepted");
    }

    #[test]
    fn row_id_rejects_empty_string() {
        let id = RowId::new("");
        assert!(
            matches!(id, Err(ValidationError::EmptyRowId)),
            "Empty string should return EmptyRowId"
        );
    }

    #[test]
    fn row_id_as_str_returns_original() {
        let id = RowId::new("user-100000").expect("valid id");
        assert_eq!(id.as_str(), "user-100000");
    }

    #[test]
    fn row_id_display_returns_inner_string() {
        let id = RowId::new("user-3").expect("valid id");
        assert_eq!(id.to_string(), "user-3");
    }

    #[test]
    fn row_id_set_lookup_by_str() {
        let mut set = HashSet::new();
        set.insert(RowId::new("user-5").expect("valid id"));
        assert!(set.contains("user-5"));
        assert!(!set.contains("user-6"));
    }

    #[test]
    fn row_id_deserialize_rejects_empty() {
        let parsed: Result<RowId, _> = serde_json::from_str("\"\"");
        assert!(parsed.is_err(), "Empty id must not deserialize");
    }

    #[test]
    fn row_id_serializes_as_plain_string() {
        let id = RowId::new("user-9").expect("valid id");
        assert_eq!(serde_json::to_string(&id).expect("serialize"), "\"user-9\"");
    }
}

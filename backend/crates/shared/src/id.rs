//! Typed identifiers issued by external systems
//!
//! Identity providers hand out opaque string identifiers. Wrapping them in a
//! marker-typed newtype keeps a subject id from being passed where some other
//! opaque string is expected.

use std::fmt;
use std::marker::PhantomData;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    #[error("identifier must not be empty")]
    Empty,
    #[error("identifier is too long ({0} bytes, max {max})", max = MAX_ID_LEN)]
    TooLong(usize),
}

/// Upper bound accepted for external identifiers.
pub const MAX_ID_LEN: usize = 128;

/// Opaque identifier assigned by an external system.
///
/// Usage:
/// ```
/// use kernel::id::{ExternalId, markers};
/// type SubjectId = ExternalId<markers::Subject>;
///
/// let id = SubjectId::parse("uid-123").unwrap();
/// assert_eq!(id.as_str(), "uid-123");
/// ```
pub struct ExternalId<T> {
    value: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T> ExternalId<T> {
    /// Validate and wrap a raw identifier. Surrounding whitespace is trimmed.
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, IdError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(IdError::Empty);
        }
        if trimmed.len() > MAX_ID_LEN {
            return Err(IdError::TooLong(trimmed.len()));
        }
        Ok(Self {
            value: trimmed.to_string(),
            _marker: PhantomData,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl<T> Clone for ExternalId<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T> PartialEq for ExternalId<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for ExternalId<T> {}

impl<T> std::hash::Hash for ExternalId<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for ExternalId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ExternalId({})", self.value)
    }
}

impl<T> fmt::Display for ExternalId<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl<T> Serialize for ExternalId<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.value)
    }
}

impl<'de, T> Deserialize<'de> for ExternalId<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(raw).map_err(serde::de::Error::custom)
    }
}

/// Marker types for external identifiers
pub mod markers {
    /// Subject (end user) as known by the identity provider
    pub struct Subject;
}

pub type SubjectId = ExternalId<markers::Subject>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims() {
        let id = SubjectId::parse("  abc  ").unwrap();
        assert_eq!(id.as_str(), "abc");
    }

    #[test]
    fn test_parse_rejects_empty_and_long() {
        assert_eq!(SubjectId::parse("   "), Err(IdError::Empty));
        let long = "x".repeat(MAX_ID_LEN + 1);
        assert_eq!(SubjectId::parse(long), Err(IdError::TooLong(MAX_ID_LEN + 1)));
    }

    #[test]
    fn test_serde_is_transparent() {
        let id = SubjectId::parse("uid-1").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"uid-1\"");
        let back: SubjectId = serde_json::from_str("\"uid-1\"").unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_str::<SubjectId>("\"\"").is_err());
    }
}

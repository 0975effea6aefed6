//! Normalised store-generated identifier.
//!
//! The document store allocates integer keys, but clients and stored
//! records carry them in mixed representations: JSON numbers in some
//! payloads, decimal strings in URLs and `self` links. Every comparison in
//! the association logic goes through this one type so the two
//! representations can never diverge.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Validation errors returned when parsing an [`EntityId`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntityIdError {
    /// The value was not a decimal integer.
    #[error("identifier must be a decimal integer")]
    NotNumeric,
    /// The value was zero or negative; store keys start at one.
    #[error("identifier must be positive")]
    NotPositive,
}

/// Store-generated entity key, exposed externally as a decimal string.
///
/// Deserialises from either a JSON number or its string representation and
/// always serialises as a string, matching the wire shape of `self` links.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
#[serde(try_from = "RawId", into = "String")]
#[schema(value_type = String, example = "5890282362339328")]
pub struct EntityId(i64);

impl EntityId {
    /// Validate a raw store key.
    pub fn new(raw: i64) -> Result<Self, EntityIdError> {
        if raw <= 0 {
            return Err(EntityIdError::NotPositive);
        }
        Ok(Self(raw))
    }

    /// Underlying integer key.
    #[must_use]
    pub fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for EntityId {
    type Err = EntityIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw: i64 = s.trim().parse().map_err(|_| EntityIdError::NotNumeric)?;
        Self::new(raw)
    }
}

impl From<EntityId> for String {
    fn from(value: EntityId) -> Self {
        value.to_string()
    }
}

/// Accepts both wire representations of an identifier.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
}

impl TryFrom<RawId> for EntityId {
    type Error = EntityIdError;

    fn try_from(value: RawId) -> Result<Self, Self::Error> {
        match value {
            RawId::Number(raw) => Self::new(raw),
            RawId::Text(text) => text.parse(),
        }
    }
}

//! Authenticated caller identity.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Validation errors returned by [`Subject::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubjectError {
    /// The subject claim was empty once trimmed.
    #[error("subject must not be empty")]
    Empty,
}

/// Stable identity string for an authenticated user, taken from the `sub`
/// claim of an identity token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "110248495921238986420")]
pub struct Subject(String);

impl Subject {
    /// Validate and wrap a raw subject claim.
    pub fn new(raw: impl Into<String>) -> Result<Self, SubjectError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(SubjectError::Empty);
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for Subject {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<Subject> for String {
    fn from(value: Subject) -> Self {
        value.0
    }
}

impl TryFrom<String> for Subject {
    type Error = SubjectError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

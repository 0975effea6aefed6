//! Port abstraction for user persistence adapters.

use async_trait::async_trait;

use crate::domain::entity_id::EntityId;
use crate::domain::subject::Subject;
use crate::domain::user::User;

/// Persistence errors raised by user repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserRepositoryError {
    /// The backing store rejected or failed the operation.
    #[error("user store operation failed: {message}")]
    Storage {
        /// Store-provided failure description.
        message: String,
    },
    /// A stored record could not be decoded into a user.
    #[error("user record is corrupt: {message}")]
    Decode {
        /// Description of the malformed record.
        message: String,
    },
}

impl UserRepositoryError {
    /// Store failure with the given description.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Malformed-record failure with the given description.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}

/// Port for user persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Persist a new user for this subject.
    async fn insert(&self, subject: Subject) -> Result<User, UserRepositoryError>;

    /// Fetch the user registered for this subject, if any.
    async fn find_by_subject(&self, subject: &Subject)
    -> Result<Option<User>, UserRepositoryError>;

    /// Every registered user.
    async fn list_all(&self) -> Result<Vec<User>, UserRepositoryError>;
}

/// Fixture implementation for tests that do not exercise user persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureUserRepository;

#[async_trait]
impl UserRepository for FixtureUserRepository {
    async fn insert(&self, subject: Subject) -> Result<User, UserRepositoryError> {
        Ok(User::from_parts(
            EntityId::new(1).map_err(|err| UserRepositoryError::decode(err.to_string()))?,
            subject,
        ))
    }

    async fn find_by_subject(
        &self,
        _subject: &Subject,
    ) -> Result<Option<User>, UserRepositoryError> {
        Ok(None)
    }

    async fn list_all(&self) -> Result<Vec<User>, UserRepositoryError> {
        Ok(Vec::new())
    }
}

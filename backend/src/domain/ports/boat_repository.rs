//! Port abstraction for boat persistence adapters.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::boat::{Boat, BoatDraft};
use crate::domain::entity_id::EntityId;
use crate::domain::subject::Subject;

/// Persistence errors raised by boat repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoatRepositoryError {
    /// The backing store rejected or failed the operation.
    #[error("boat store operation failed: {message}")]
    Storage {
        /// Store-provided failure description.
        message: String,
    },
    /// A stored record could not be decoded into a boat.
    #[error("boat record is corrupt: {message}")]
    Decode {
        /// Description of the malformed record.
        message: String,
    },
}

impl BoatRepositoryError {
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

/// Port for boat persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BoatRepository: Send + Sync {
    /// Persist a new boat with an empty loads sequence; returns the entity
    /// with its store-generated `id` and computed `self` link attached.
    async fn insert(&self, draft: BoatDraft, owner: Subject) -> Result<Boat, BoatRepositoryError>;

    /// Fetch a boat by identifier.
    async fn find_by_id(&self, id: EntityId) -> Result<Option<Boat>, BoatRepositoryError>;

    /// One page of the boats belonging to `owner`, in store order.
    async fn list_by_owner(
        &self,
        owner: &Subject,
        page: PageRequest,
    ) -> Result<Page<Boat>, BoatRepositoryError>;

    /// Total number of boats belonging to `owner`.
    async fn count_by_owner(&self, owner: &Subject) -> Result<usize, BoatRepositoryError>;

    /// Every boat regardless of owner. Internal cascade scans only.
    async fn list_all(&self) -> Result<Vec<Boat>, BoatRepositoryError>;

    /// Overwrite the stored record for this boat.
    async fn save(&self, boat: &Boat) -> Result<(), BoatRepositoryError>;

    /// Remove the stored record. Callers cascade-detach first.
    async fn delete(&self, id: EntityId) -> Result<(), BoatRepositoryError>;
}

/// Fixture implementation for tests that do not exercise boat persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureBoatRepository;

#[async_trait]
impl BoatRepository for FixtureBoatRepository {
    async fn insert(&self, draft: BoatDraft, owner: Subject) -> Result<Boat, BoatRepositoryError> {
        Ok(Boat::from_parts(
            EntityId::new(1).map_err(|err| BoatRepositoryError::decode(err.to_string()))?,
            "https://freight.example.com/boats/1".to_owned(),
            draft,
            owner,
            Vec::new(),
        ))
    }

    async fn find_by_id(&self, _id: EntityId) -> Result<Option<Boat>, BoatRepositoryError> {
        Ok(None)
    }

    async fn list_by_owner(
        &self,
        _owner: &Subject,
        _page: PageRequest,
    ) -> Result<Page<Boat>, BoatRepositoryError> {
        Ok(Page::complete(Vec::new()))
    }

    async fn count_by_owner(&self, _owner: &Subject) -> Result<usize, BoatRepositoryError> {
        Ok(0)
    }

    async fn list_all(&self) -> Result<Vec<Boat>, BoatRepositoryError> {
        Ok(Vec::new())
    }

    async fn save(&self, _boat: &Boat) -> Result<(), BoatRepositoryError> {
        Ok(())
    }

    async fn delete(&self, _id: EntityId) -> Result<(), BoatRepositoryError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.

    use rstest::rstest;

    use super::*;

    #[tokio::test]
    async fn fixture_find_returns_none() {
        let repo = FixtureBoatRepository;
        let found = repo
            .find_by_id(EntityId::new(1).expect("positive id"))
            .await
            .expect("fixture lookup succeeds");
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn fixture_insert_starts_with_empty_loads() {
        let repo = FixtureBoatRepository;
        let boat = repo
            .insert(
                BoatDraft::new("Tug", "tug", 40).expect("valid draft"),
                Subject::new("u1").expect("non-empty subject"),
            )
            .await
            .expect("fixture insert succeeds");
        assert!(boat.loads().is_empty());
    }

    #[rstest]
    fn storage_error_formats_message() {
        let err = BoatRepositoryError::storage("key space exhausted");
        assert!(err.to_string().contains("key space exhausted"));
    }
}

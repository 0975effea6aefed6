//! Port abstraction for load persistence adapters.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::entity_id::EntityId;
use crate::domain::load::{Load, LoadDraft};

/// Persistence errors raised by load repository adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoadRepositoryError {
    /// The backing store rejected or failed the operation.
    #[error("load store operation failed: {message}")]
    Storage {
        /// Store-provided failure description.
        message: String,
    },
    /// A stored record could not be decoded into a load.
    #[error("load record is corrupt: {message}")]
    Decode {
        /// Description of the malformed record.
        message: String,
    },
}

impl LoadRepositoryError {
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

/// Port for load persistence. Loads have no owner; listings are
/// unfiltered.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoadRepository: Send + Sync {
    /// Persist a new load with no carrier; returns the entity with its
    /// store-generated `id` and computed `self` link attached.
    async fn insert(&self, draft: LoadDraft) -> Result<Load, LoadRepositoryError>;

    /// Fetch a load by identifier. An absent or falsy stored carrier is
    /// normalised to `None`.
    async fn find_by_id(&self, id: EntityId) -> Result<Option<Load>, LoadRepositoryError>;

    /// One page of all loads, in store order.
    async fn list(&self, page: PageRequest) -> Result<Page<Load>, LoadRepositoryError>;

    /// Total number of loads.
    async fn count(&self) -> Result<usize, LoadRepositoryError>;

    /// Every load. Internal cascade scans only.
    async fn list_all(&self) -> Result<Vec<Load>, LoadRepositoryError>;

    /// Overwrite the stored record for this load.
    async fn save(&self, load: &Load) -> Result<(), LoadRepositoryError>;

    /// Overwrite the stored records for several loads in one batch write.
    async fn save_batch(&self, loads: &[Load]) -> Result<(), LoadRepositoryError>;

    /// Remove the stored record. Callers scrub the reverse reference first.
    async fn delete(&self, id: EntityId) -> Result<(), LoadRepositoryError>;
}

/// Fixture implementation for tests that do not exercise load persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureLoadRepository;

#[async_trait]
impl LoadRepository for FixtureLoadRepository {
    async fn insert(&self, draft: LoadDraft) -> Result<Load, LoadRepositoryError> {
        Ok(Load::from_parts(
            EntityId::new(1).map_err(|err| LoadRepositoryError::decode(err.to_string()))?,
            "https://freight.example.com/loads/1".to_owned(),
            draft,
            None,
        ))
    }

    async fn find_by_id(&self, _id: EntityId) -> Result<Option<Load>, LoadRepositoryError> {
        Ok(None)
    }

    async fn list(&self, _page: PageRequest) -> Result<Page<Load>, LoadRepositoryError> {
        Ok(Page::complete(Vec::new()))
    }

    async fn count(&self) -> Result<usize, LoadRepositoryError> {
        Ok(0)
    }

    async fn list_all(&self) -> Result<Vec<Load>, LoadRepositoryError> {
        Ok(Vec::new())
    }

    async fn save(&self, _load: &Load) -> Result<(), LoadRepositoryError> {
        Ok(())
    }

    async fn save_batch(&self, _loads: &[Load]) -> Result<(), LoadRepositoryError> {
        Ok(())
    }

    async fn delete(&self, _id: EntityId) -> Result<(), LoadRepositoryError> {
        Ok(())
    }
}

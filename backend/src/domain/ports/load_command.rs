//! Driving port for load mutations.
//!
//! Load routes carry no authentication in the observed contract, so no
//! caller identity appears here.

use async_trait::async_trait;

use crate::domain::entity_id::EntityId;
use crate::domain::error::Error;
use crate::domain::load::{Load, LoadDraft};

/// Request to replace every payload field of a load.
#[derive(Debug, Clone)]
pub struct UpdateLoadRequest {
    /// Target load.
    pub load_id: EntityId,
    /// Validated replacement fields. `carrier` is preserved.
    pub draft: LoadDraft,
}

/// Request to overwrite only the supplied fields of a load.
#[derive(Debug, Clone)]
pub struct PatchLoadRequest {
    /// Target load.
    pub load_id: EntityId,
    /// Replacement weight, when supplied.
    pub weight: Option<i64>,
    /// Replacement content, when supplied.
    pub content: Option<String>,
    /// Replacement delivery date, when supplied.
    pub delivery_date: Option<String>,
}

/// Port for load mutations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoadCommand: Send + Sync {
    /// Create a load with no carrier.
    async fn create_load(&self, draft: LoadDraft) -> Result<Load, Error>;

    /// Replace the payload fields of a load.
    async fn update_load(&self, request: UpdateLoadRequest) -> Result<Load, Error>;

    /// Overwrite only the supplied fields of a load.
    async fn patch_load(&self, request: PatchLoadRequest) -> Result<Load, Error>;

    /// Delete a load, scrubbing the carrying boat's reverse reference
    /// first when one exists.
    async fn delete_load(&self, load_id: EntityId) -> Result<(), Error>;
}

//! Driving port for boat mutations.

use async_trait::async_trait;

use crate::domain::boat::{Boat, BoatDraft};
use crate::domain::entity_id::EntityId;
use crate::domain::error::Error;
use crate::domain::subject::Subject;

/// Request to create a boat for the authenticated owner.
#[derive(Debug, Clone)]
pub struct CreateBoatRequest {
    /// Validated payload fields.
    pub draft: BoatDraft,
    /// Authenticated caller; becomes the boat's owner.
    pub owner: Subject,
}

/// Request to replace every payload field of a boat.
#[derive(Debug, Clone)]
pub struct UpdateBoatRequest {
    /// Target boat.
    pub boat_id: EntityId,
    /// Authenticated caller; must own the boat.
    pub caller: Subject,
    /// Validated replacement fields. `owner` and `loads` are preserved.
    pub draft: BoatDraft,
}

/// Request to overwrite only the supplied fields of a boat.
#[derive(Debug, Clone)]
pub struct PatchBoatRequest {
    /// Target boat.
    pub boat_id: EntityId,
    /// Authenticated caller; must own the boat.
    pub caller: Subject,
    /// Replacement name, when supplied.
    pub name: Option<String>,
    /// Replacement type, when supplied.
    pub boat_type: Option<String>,
    /// Replacement length, when supplied.
    pub length: Option<i64>,
}

/// Request to delete a boat, cascade-detaching its loads first.
#[derive(Debug, Clone)]
pub struct DeleteBoatRequest {
    /// Target boat.
    pub boat_id: EntityId,
    /// Authenticated caller; must own the boat.
    pub caller: Subject,
}

/// Port for boat mutations, owner-guarded except for creation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BoatCommand: Send + Sync {
    /// Create a boat with an initially empty loads sequence.
    async fn create_boat(&self, request: CreateBoatRequest) -> Result<Boat, Error>;

    /// Replace the payload fields of an owned boat.
    async fn update_boat(&self, request: UpdateBoatRequest) -> Result<Boat, Error>;

    /// Overwrite only the supplied fields of an owned boat.
    async fn patch_boat(&self, request: PatchBoatRequest) -> Result<Boat, Error>;

    /// Delete an owned boat after clearing the carrier of every load it
    /// carries.
    async fn delete_boat(&self, request: DeleteBoatRequest) -> Result<(), Error>;
}

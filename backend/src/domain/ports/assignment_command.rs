//! Driving port for the boat/load association.
//!
//! Assign and release are single operations from the caller's point of
//! view even though each touches two records; the service behind this port
//! owns the two-phase write and its compensation.

use async_trait::async_trait;

use crate::domain::entity_id::EntityId;
use crate::domain::error::Error;
use crate::domain::subject::Subject;

/// Request naming both sides of an association change.
#[derive(Debug, Clone)]
pub struct AssignmentRequest {
    /// The boat whose loads sequence changes.
    pub boat_id: EntityId,
    /// The load whose carrier changes.
    pub load_id: EntityId,
    /// Authenticated caller; must own the boat.
    pub caller: Subject,
}

/// Port for attaching loads to and releasing loads from boats.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AssignmentCommand: Send + Sync {
    /// Put a load on a boat. Fails with `Conflict` when the load already
    /// has a carrier, regardless of which boat.
    async fn assign_load(&self, request: AssignmentRequest) -> Result<(), Error>;

    /// Take a load off a boat. Fails with `NotFound` when the load is not
    /// currently on that boat.
    async fn release_load(&self, request: AssignmentRequest) -> Result<(), Error>;
}

//! Driving port for boat reads.

use async_trait::async_trait;
use pagination::Cursor;

use crate::domain::boat::Boat;
use crate::domain::entity_id::EntityId;
use crate::domain::error::Error;
use crate::domain::subject::Subject;

/// Request to read one boat.
#[derive(Debug, Clone)]
pub struct GetBoatRequest {
    /// Target boat.
    pub boat_id: EntityId,
    /// Authenticated caller; must own the boat.
    pub caller: Subject,
}

/// Request for one page of the caller's boats.
#[derive(Debug, Clone)]
pub struct ListBoatsRequest {
    /// Authenticated caller; only their boats are listed.
    pub owner: Subject,
    /// Continuation token from a previous page, if any.
    pub cursor: Option<Cursor>,
}

/// One page of boats plus the owner's total record count.
#[derive(Debug, Clone)]
pub struct BoatPage {
    /// Boats on this page, in store order.
    pub items: Vec<Boat>,
    /// Total number of boats belonging to the owner.
    pub total: usize,
    /// Token for the following page, when more results exist.
    pub next_cursor: Option<Cursor>,
}

/// Port for owner-scoped boat reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BoatQuery: Send + Sync {
    /// Read one owned boat.
    async fn get_boat(&self, request: GetBoatRequest) -> Result<Boat, Error>;

    /// One page of the caller's boats.
    async fn list_boats(&self, request: ListBoatsRequest) -> Result<BoatPage, Error>;
}

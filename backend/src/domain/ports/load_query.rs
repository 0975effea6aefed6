//! Driving port for load reads.

use async_trait::async_trait;
use pagination::Cursor;

use crate::domain::entity_id::EntityId;
use crate::domain::error::Error;
use crate::domain::load::Load;

/// Request for one page of all loads.
#[derive(Debug, Clone)]
pub struct ListLoadsRequest {
    /// Continuation token from a previous page, if any.
    pub cursor: Option<Cursor>,
}

/// One page of loads plus the total record count.
#[derive(Debug, Clone)]
pub struct LoadPage {
    /// Loads on this page, in store order.
    pub items: Vec<Load>,
    /// Total number of loads.
    pub total: usize,
    /// Token for the following page, when more results exist.
    pub next_cursor: Option<Cursor>,
}

/// Port for load reads. Listings are unfiltered; loads have no owner.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoadQuery: Send + Sync {
    /// Read one load.
    async fn get_load(&self, load_id: EntityId) -> Result<Load, Error>;

    /// One page of all loads.
    async fn list_loads(&self, request: ListLoadsRequest) -> Result<LoadPage, Error>;
}

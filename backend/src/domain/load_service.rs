//! Load CRUD service with the reverse-reference cascade on delete.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::assignment_service::{
    detach_from_carrier, load_not_found, map_load_repository_error,
};
use crate::domain::entity_id::EntityId;
use crate::domain::entity_locks::EntityLocks;
use crate::domain::error::Error;
use crate::domain::load::{Load, LoadDraft};
use crate::domain::ports::{
    BoatRepository, ListLoadsRequest, LoadCommand, LoadPage, LoadQuery, LoadRepository,
    PatchLoadRequest, UpdateLoadRequest,
};

/// Load service implementing the command and query driving ports.
///
/// No operation here checks ownership: loads are unowned in the observed
/// contract and governed only through whichever boat carries them.
#[derive(Clone)]
pub struct LoadService<B, L> {
    boats: Arc<B>,
    loads: Arc<L>,
    locks: Arc<EntityLocks>,
    page_size: usize,
}

impl<B, L> LoadService<B, L> {
    /// Create the service. `page_size` bounds every listing page.
    pub fn new(boats: Arc<B>, loads: Arc<L>, locks: Arc<EntityLocks>, page_size: usize) -> Self {
        Self {
            boats,
            loads,
            locks,
            page_size,
        }
    }
}

impl<B, L> LoadService<B, L>
where
    L: LoadRepository,
{
    async fn existing_load(&self, load_id: EntityId) -> Result<Load, Error> {
        self.loads
            .find_by_id(load_id)
            .await
            .map_err(map_load_repository_error)?
            .ok_or_else(load_not_found)
    }
}

#[async_trait]
impl<B, L> LoadCommand for LoadService<B, L>
where
    B: BoatRepository,
    L: LoadRepository,
{
    async fn create_load(&self, draft: LoadDraft) -> Result<Load, Error> {
        self.loads
            .insert(draft)
            .await
            .map_err(map_load_repository_error)
    }

    async fn update_load(&self, request: UpdateLoadRequest) -> Result<Load, Error> {
        let mut load = self.existing_load(request.load_id).await?;
        load.apply_update(request.draft);
        self.loads
            .save(&load)
            .await
            .map_err(map_load_repository_error)?;
        Ok(load)
    }

    async fn patch_load(&self, request: PatchLoadRequest) -> Result<Load, Error> {
        let mut load = self.existing_load(request.load_id).await?;
        load.apply_patch(request.weight, request.content, request.delivery_date)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        self.loads
            .save(&load)
            .await
            .map_err(map_load_repository_error)?;
        Ok(load)
    }

    async fn delete_load(&self, load_id: EntityId) -> Result<(), Error> {
        let _guard = self.locks.lock_load(load_id).await;
        let load = self.existing_load(load_id).await?;
        // Scrub the carrying boat's loads sequence before the record goes
        // away; the reverse order would leave a summary pointing nowhere.
        detach_from_carrier(self.boats.as_ref(), &load).await?;
        self.loads
            .delete(load_id)
            .await
            .map_err(map_load_repository_error)
    }
}

#[async_trait]
impl<B, L> LoadQuery for LoadService<B, L>
where
    B: BoatRepository,
    L: LoadRepository,
{
    async fn get_load(&self, load_id: EntityId) -> Result<Load, Error> {
        self.existing_load(load_id).await
    }

    async fn list_loads(&self, request: ListLoadsRequest) -> Result<LoadPage, Error> {
        let page = PageRequest {
            limit: self.page_size,
            cursor: request.cursor,
        };
        let listed = self
            .loads
            .list(page)
            .await
            .map_err(map_load_repository_error)?;
        let total = self.loads.count().await.map_err(map_load_repository_error)?;
        Ok(LoadPage {
            items: listed.items,
            total,
            next_cursor: listed.next_cursor,
        })
    }
}

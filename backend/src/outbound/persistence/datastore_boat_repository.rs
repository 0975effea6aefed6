//! Boat repository over the document store.
//!
//! Stored boat records hold only payload fields plus the denormalised
//! loads sequence; the key and `self` URL are attached on read.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{Page, PageRequest};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::datastore::{Datastore, DatastoreError, EntityKind, QueryRequest, StoredRecord};
use super::links::ResourceLinks;
use crate::domain::ports::{BoatRepository, BoatRepositoryError};
use crate::domain::{Boat, BoatDraft, EntityId, LoadSummary, Subject};

const OWNER_FIELD: &str = "owner";

/// Stored shape of a boat record.
#[derive(Debug, Serialize, Deserialize)]
struct BoatRecord {
    name: String,
    #[serde(rename = "type")]
    boat_type: String,
    length: i64,
    owner: Subject,
    #[serde(default)]
    loads: Vec<LoadSummary>,
}

fn map_datastore_error(error: DatastoreError) -> BoatRepositoryError {
    BoatRepositoryError::storage(error.to_string())
}

fn record_value(boat: &Boat) -> Result<Value, BoatRepositoryError> {
    serde_json::to_value(BoatRecord {
        name: boat.name().to_owned(),
        boat_type: boat.boat_type().to_owned(),
        length: boat.length(),
        owner: boat.owner().clone(),
        loads: boat.loads().to_vec(),
    })
    .map_err(|err| BoatRepositoryError::decode(err.to_string()))
}

fn boat_from_record(
    record: StoredRecord,
    links: &ResourceLinks,
) -> Result<Boat, BoatRepositoryError> {
    let StoredRecord { id, data } = record;
    let stored: BoatRecord =
        serde_json::from_value(data).map_err(|err| BoatRepositoryError::decode(err.to_string()))?;
    let draft = BoatDraft::new(stored.name, stored.boat_type, stored.length)
        .map_err(|err| BoatRepositoryError::decode(err.to_string()))?;
    Ok(Boat::from_parts(
        id,
        links.boat(id),
        draft,
        stored.owner,
        stored.loads,
    ))
}

/// Document-store implementation of the boat repository port.
#[derive(Clone)]
pub struct DatastoreBoatRepository<D> {
    store: Arc<D>,
    links: ResourceLinks,
}

impl<D> DatastoreBoatRepository<D> {
    /// Create the repository over a datastore and link builder.
    pub fn new(store: Arc<D>, links: ResourceLinks) -> Self {
        Self { store, links }
    }
}

#[async_trait]
impl<D> BoatRepository for DatastoreBoatRepository<D>
where
    D: Datastore,
{
    async fn insert(&self, draft: BoatDraft, owner: Subject) -> Result<Boat, BoatRepositoryError> {
        let record = serde_json::to_value(BoatRecord {
            name: draft.name().to_owned(),
            boat_type: draft.boat_type().to_owned(),
            length: draft.length(),
            owner: owner.clone(),
            loads: Vec::new(),
        })
        .map_err(|err| BoatRepositoryError::decode(err.to_string()))?;
        let id = self
            .store
            .insert(EntityKind::Boat, record)
            .await
            .map_err(map_datastore_error)?;
        Ok(Boat::from_parts(
            id,
            self.links.boat(id),
            draft,
            owner,
            Vec::new(),
        ))
    }

    async fn find_by_id(&self, id: EntityId) -> Result<Option<Boat>, BoatRepositoryError> {
        self.store
            .get(EntityKind::Boat, id)
            .await
            .map_err(map_datastore_error)?
            .map(|record| boat_from_record(record, &self.links))
            .transpose()
    }

    async fn list_by_owner(
        &self,
        owner: &Subject,
        page: PageRequest,
    ) -> Result<Page<Boat>, BoatRepositoryError> {
        let request = QueryRequest::all(EntityKind::Boat)
            .filtered(OWNER_FIELD, json!(owner.as_ref()))
            .limited(page.limit)
            .after(page.cursor);
        let result = self
            .store
            .query(request)
            .await
            .map_err(map_datastore_error)?;
        let items = result
            .items
            .into_iter()
            .map(|record| boat_from_record(record, &self.links))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page {
            items,
            next_cursor: result.more_results.then_some(result.end_cursor).flatten(),
        })
    }

    async fn count_by_owner(&self, owner: &Subject) -> Result<usize, BoatRepositoryError> {
        let request =
            QueryRequest::all(EntityKind::Boat).filtered(OWNER_FIELD, json!(owner.as_ref()));
        let result = self
            .store
            .query(request)
            .await
            .map_err(map_datastore_error)?;
        Ok(result.items.len())
    }

    async fn list_all(&self) -> Result<Vec<Boat>, BoatRepositoryError> {
        let result = self
            .store
            .query(QueryRequest::all(EntityKind::Boat))
            .await
            .map_err(map_datastore_error)?;
        result
            .items
            .into_iter()
            .map(|record| boat_from_record(record, &self.links))
            .collect()
    }

    async fn save(&self, boat: &Boat) -> Result<(), BoatRepositoryError> {
        let record = record_value(boat)?;
        self.store
            .put(EntityKind::Boat, boat.id(), record)
            .await
            .map_err(map_datastore_error)
    }

    async fn delete(&self, id: EntityId) -> Result<(), BoatRepositoryError> {
        self.store
            .delete(EntityKind::Boat, id)
            .await
            .map_err(map_datastore_error)
    }
}

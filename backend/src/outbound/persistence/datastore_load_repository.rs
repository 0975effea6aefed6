//! Load repository over the document store.
//!
//! A stored record may predate its association bookkeeping, so an absent
//! carrier field decodes to `None`; callers always observe an explicit
//! null rather than a missing field.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{Page, PageRequest};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::datastore::{Datastore, DatastoreError, EntityKind, QueryRequest, StoredRecord};
use super::links::ResourceLinks;
use crate::domain::ports::{LoadRepository, LoadRepositoryError};
use crate::domain::{CarrierSummary, EntityId, Load, LoadDraft};

/// Stored shape of a load record.
#[derive(Debug, Serialize, Deserialize)]
struct LoadRecord {
    weight: i64,
    content: String,
    delivery_date: String,
    #[serde(default)]
    carrier: Option<CarrierSummary>,
}

fn map_datastore_error(error: DatastoreError) -> LoadRepositoryError {
    LoadRepositoryError::storage(error.to_string())
}

fn record_value(load: &Load) -> Result<Value, LoadRepositoryError> {
    serde_json::to_value(LoadRecord {
        weight: load.weight(),
        content: load.content().to_owned(),
        delivery_date: load.delivery_date().to_owned(),
        carrier: load.carrier().cloned(),
    })
    .map_err(|err| LoadRepositoryError::decode(err.to_string()))
}

fn load_from_record(
    record: StoredRecord,
    links: &ResourceLinks,
) -> Result<Load, LoadRepositoryError> {
    let StoredRecord { id, data } = record;
    let stored: LoadRecord =
        serde_json::from_value(data).map_err(|err| LoadRepositoryError::decode(err.to_string()))?;
    let draft = LoadDraft::new(stored.weight, stored.content, stored.delivery_date)
        .map_err(|err| LoadRepositoryError::decode(err.to_string()))?;
    Ok(Load::from_parts(id, links.load(id), draft, stored.carrier))
}

/// Document-store implementation of the load repository port.
#[derive(Clone)]
pub struct DatastoreLoadRepository<D> {
    store: Arc<D>,
    links: ResourceLinks,
}

impl<D> DatastoreLoadRepository<D> {
    /// Create the repository over a datastore and link builder.
    pub fn new(store: Arc<D>, links: ResourceLinks) -> Self {
        Self { store, links }
    }
}

#[async_trait]
impl<D> LoadRepository for DatastoreLoadRepository<D>
where
    D: Datastore,
{
    async fn insert(&self, draft: LoadDraft) -> Result<Load, LoadRepositoryError> {
        let record = serde_json::to_value(LoadRecord {
            weight: draft.weight(),
            content: draft.content().to_owned(),
            delivery_date: draft.delivery_date().to_owned(),
            carrier: None,
        })
        .map_err(|err| LoadRepositoryError::decode(err.to_string()))?;
        let id = self
            .store
            .insert(EntityKind::Load, record)
            .await
            .map_err(map_datastore_error)?;
        Ok(Load::from_parts(id, self.links.load(id), draft, None))
    }

    async fn find_by_id(&self, id: EntityId) -> Result<Option<Load>, LoadRepositoryError> {
        self.store
            .get(EntityKind::Load, id)
            .await
            .map_err(map_datastore_error)?
            .map(|record| load_from_record(record, &self.links))
            .transpose()
    }

    async fn list(&self, page: PageRequest) -> Result<Page<Load>, LoadRepositoryError> {
        let request = QueryRequest::all(EntityKind::Load)
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
            .map(|record| load_from_record(record, &self.links))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page {
            items,
            next_cursor: result.more_results.then_some(result.end_cursor).flatten(),
        })
    }

    async fn count(&self) -> Result<usize, LoadRepositoryError> {
        let result = self
            .store
            .query(QueryRequest::all(EntityKind::Load))
            .await
            .map_err(map_datastore_error)?;
        Ok(result.items.len())
    }

    async fn list_all(&self) -> Result<Vec<Load>, LoadRepositoryError> {
        let result = self
            .store
            .query(QueryRequest::all(EntityKind::Load))
            .await
            .map_err(map_datastore_error)?;
        result
            .items
            .into_iter()
            .map(|record| load_from_record(record, &self.links))
            .collect()
    }

    async fn save(&self, load: &Load) -> Result<(), LoadRepositoryError> {
        let record = record_value(load)?;
        self.store
            .put(EntityKind::Load, load.id(), record)
            .await
            .map_err(map_datastore_error)
    }

    async fn save_batch(&self, loads: &[Load]) -> Result<(), LoadRepositoryError> {
        let records = loads
            .iter()
            .map(|load| Ok((load.id(), record_value(load)?)))
            .collect::<Result<Vec<_>, LoadRepositoryError>>()?;
        self.store
            .put_batch(EntityKind::Load, records)
            .await
            .map_err(map_datastore_error)
    }

    async fn delete(&self, id: EntityId) -> Result<(), LoadRepositoryError> {
        self.store
            .delete(EntityKind::Load, id)
            .await
            .map_err(map_datastore_error)
    }
}

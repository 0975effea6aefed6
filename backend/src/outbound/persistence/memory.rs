//! In-process datastore backed by ordered maps.
//!
//! Keys are allocated from one monotonic counter shared across kinds, so
//! scan order is insertion order. Continuation cursors encode a record
//! offset within the filtered scan; interleaved writes can therefore skip
//! or repeat entries across pages, which matches the external store's
//! "not stable under concurrent writes" contract.

use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use pagination::Cursor;
use serde_json::Value;
use tokio::sync::RwLock;

use super::datastore::{
    Datastore, DatastoreError, EntityKind, QueryPage, QueryRequest, StoredRecord,
};
use crate::domain::EntityId;

#[derive(Debug, Default)]
struct State {
    tables: HashMap<EntityKind, BTreeMap<i64, Value>>,
    next_key: i64,
}

/// In-memory [`Datastore`] implementation.
#[derive(Debug, Default)]
pub struct MemoryDatastore {
    state: RwLock<State>,
}

impl MemoryDatastore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn key_of(id: EntityId) -> i64 {
    id.value()
}

fn allocated(raw: i64) -> Result<EntityId, DatastoreError> {
    EntityId::new(raw).map_err(|err| DatastoreError::backend(err.to_string()))
}

#[async_trait]
impl Datastore for MemoryDatastore {
    async fn insert(&self, kind: EntityKind, data: Value) -> Result<EntityId, DatastoreError> {
        let mut state = self.state.write().await;
        state.next_key += 1;
        let key = state.next_key;
        state.tables.entry(kind).or_default().insert(key, data);
        allocated(key)
    }

    async fn get(
        &self,
        kind: EntityKind,
        id: EntityId,
    ) -> Result<Option<StoredRecord>, DatastoreError> {
        let state = self.state.read().await;
        Ok(state
            .tables
            .get(&kind)
            .and_then(|table| table.get(&key_of(id)))
            .map(|data| StoredRecord {
                id,
                data: data.clone(),
            }))
    }

    async fn put(
        &self,
        kind: EntityKind,
        id: EntityId,
        data: Value,
    ) -> Result<(), DatastoreError> {
        let mut state = self.state.write().await;
        state.tables.entry(kind).or_default().insert(key_of(id), data);
        Ok(())
    }

    async fn put_batch(
        &self,
        kind: EntityKind,
        records: Vec<(EntityId, Value)>,
    ) -> Result<(), DatastoreError> {
        let mut state = self.state.write().await;
        let table = state.tables.entry(kind).or_default();
        for (id, data) in records {
            table.insert(key_of(id), data);
        }
        Ok(())
    }

    async fn delete(&self, kind: EntityKind, id: EntityId) -> Result<(), DatastoreError> {
        let mut state = self.state.write().await;
        if let Some(table) = state.tables.get_mut(&kind) {
            table.remove(&key_of(id));
        }
        Ok(())
    }

    async fn query(&self, request: QueryRequest) -> Result<QueryPage, DatastoreError> {
        let offset = match &request.cursor {
            Some(cursor) => cursor
                .offset()
                .map_err(|err| DatastoreError::bad_cursor(err.to_string()))?,
            None => 0,
        };

        let state = self.state.read().await;
        let matches: Vec<StoredRecord> = state
            .tables
            .get(&request.kind)
            .into_iter()
            .flat_map(|table| table.iter())
            .filter(|(_, data)| match &request.filter {
                Some((field, value)) => data.get(field) == Some(value),
                None => true,
            })
            .map(|(key, data)| {
                allocated(*key).map(|id| StoredRecord {
                    id,
                    data: data.clone(),
                })
            })
            .collect::<Result<_, _>>()?;

        let total = matches.len();
        let taken: Vec<StoredRecord> = matches
            .into_iter()
            .skip(offset)
            .take(request.limit.unwrap_or(usize::MAX))
            .collect();
        let consumed = offset.saturating_add(taken.len());
        let more_results = consumed < total;

        Ok(QueryPage {
            items: taken,
            more_results,
            end_cursor: more_results.then(|| Cursor::from_offset(consumed)),
        })
    }
}

#[cfg(test)]
mod tests {
    //! Scan order, filtering, and cursor paging coverage.

    use serde_json::json;

    use super::*;

    async fn seed(store: &MemoryDatastore, kind: EntityKind, count: usize) -> Vec<EntityId> {
        let mut ids = Vec::with_capacity(count);
        for n in 0..count {
            let id = store
                .insert(kind, json!({ "n": n, "owner": if n % 2 == 0 { "a" } else { "b" } }))
                .await
                .expect("insert succeeds");
            ids.push(id);
        }
        ids
    }

    #[tokio::test]
    async fn get_returns_what_insert_stored() {
        let store = MemoryDatastore::new();
        let id = store
            .insert(EntityKind::Boat, json!({ "name": "Tug" }))
            .await
            .expect("insert succeeds");

        let record = store
            .get(EntityKind::Boat, id)
            .await
            .expect("get succeeds")
            .expect("record present");
        assert_eq!(record.data["name"], "Tug");
    }

    #[tokio::test]
    async fn kinds_are_isolated() {
        let store = MemoryDatastore::new();
        let id = store
            .insert(EntityKind::Boat, json!({}))
            .await
            .expect("insert succeeds");

        let missing = store
            .get(EntityKind::Load, id)
            .await
            .expect("get succeeds");
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn delete_of_absent_key_succeeds() {
        let store = MemoryDatastore::new();
        let id = EntityId::new(99).expect("positive id");
        store
            .delete(EntityKind::Load, id)
            .await
            .expect("delete succeeds");
    }

    #[tokio::test]
    async fn filtered_query_matches_field_equality() {
        let store = MemoryDatastore::new();
        seed(&store, EntityKind::Boat, 6).await;

        let page = store
            .query(QueryRequest::all(EntityKind::Boat).filtered("owner", json!("a")))
            .await
            .expect("query succeeds");
        assert_eq!(page.items.len(), 3);
        assert!(!page.more_results);
        assert!(page.end_cursor.is_none());
    }

    #[tokio::test]
    async fn cursor_paging_walks_the_full_scan_exactly_once() {
        let store = MemoryDatastore::new();
        let ids = seed(&store, EntityKind::Load, 12).await;

        let mut seen = Vec::new();
        let mut cursor = None;
        loop {
            let page = store
                .query(QueryRequest::all(EntityKind::Load).limited(5).after(cursor))
                .await
                .expect("query succeeds");
            seen.extend(page.items.iter().map(|record| record.id));
            if !page.more_results {
                break;
            }
            cursor = page.end_cursor;
        }
        assert_eq!(seen, ids);
    }

    #[tokio::test]
    async fn final_page_omits_the_cursor() {
        let store = MemoryDatastore::new();
        seed(&store, EntityKind::Load, 5).await;

        let page = store
            .query(QueryRequest::all(EntityKind::Load).limited(5))
            .await
            .expect("query succeeds");
        assert_eq!(page.items.len(), 5);
        assert!(!page.more_results);
        assert!(page.end_cursor.is_none());
    }

    #[tokio::test]
    async fn malformed_cursor_is_rejected() {
        let store = MemoryDatastore::new();
        let foreign = Cursor::new("CjsSNWoO").expect("non-empty token");
        let err = store
            .query(QueryRequest::all(EntityKind::Load).after(Some(foreign)))
            .await
            .expect_err("foreign cursor must be rejected");
        assert!(matches!(err, DatastoreError::BadCursor { .. }));
    }
}

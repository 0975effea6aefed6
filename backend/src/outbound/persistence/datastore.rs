//! Document store contract consumed by the repository adapters.
//!
//! Mirrors the external store's surface: keyed JSON records per entity
//! kind, store-generated integer keys, equality-filtered queries with a
//! limit and an opaque continuation cursor, and a batch write. Adapters
//! above this trait own the record↔entity mapping; implementations own
//! key allocation and cursor semantics.

use async_trait::async_trait;
use pagination::Cursor;
use serde_json::Value;

use crate::domain::EntityId;

/// Entity kinds stored by this service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Registered users.
    User,
    /// Boats.
    Boat,
    /// Loads.
    Load,
}

impl EntityKind {
    /// Kind name used in logs and error messages.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Boat => "Boat",
            Self::Load => "Load",
        }
    }
}

/// Errors raised by datastore implementations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DatastoreError {
    /// The store failed or rejected the operation.
    #[error("datastore operation failed: {message}")]
    Backend {
        /// Store-provided failure description.
        message: String,
    },
    /// The supplied continuation cursor was not issued by this store.
    #[error("datastore rejected the continuation cursor: {message}")]
    BadCursor {
        /// Reason the cursor was rejected.
        message: String,
    },
}

impl DatastoreError {
    /// Backend failure with the given description.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }

    /// Cursor rejection with the given reason.
    pub fn bad_cursor(message: impl Into<String>) -> Self {
        Self::BadCursor {
            message: message.into(),
        }
    }
}

/// A stored record together with its key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredRecord {
    /// Store-generated key.
    pub id: EntityId,
    /// Record payload as stored.
    pub data: Value,
}

/// A keyed query over one entity kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    /// Entity kind to scan.
    pub kind: EntityKind,
    /// Optional top-level field equality filter.
    pub filter: Option<(String, Value)>,
    /// Optional page size; `None` returns every match.
    pub limit: Option<usize>,
    /// Optional continuation cursor from a previous page.
    pub cursor: Option<Cursor>,
}

impl QueryRequest {
    /// Unfiltered, unpaginated scan of a kind.
    #[must_use]
    pub fn all(kind: EntityKind) -> Self {
        Self {
            kind,
            filter: None,
            limit: None,
            cursor: None,
        }
    }

    /// Restrict the scan to records whose `field` equals `value`.
    #[must_use]
    pub fn filtered(mut self, field: impl Into<String>, value: Value) -> Self {
        self.filter = Some((field.into(), value));
        self
    }

    /// Bound the page size.
    #[must_use]
    pub fn limited(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Resume after a previously issued cursor.
    #[must_use]
    pub fn after(mut self, cursor: Option<Cursor>) -> Self {
        self.cursor = cursor;
        self
    }
}

/// One page of query results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPage {
    /// Matching records in store order.
    pub items: Vec<StoredRecord>,
    /// Whether further matches exist beyond this page.
    pub more_results: bool,
    /// Cursor resuming after the last item, set when `more_results`.
    pub end_cursor: Option<Cursor>,
}

/// Keyed JSON document store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Datastore: Send + Sync {
    /// Store a new record under a freshly allocated key.
    async fn insert(&self, kind: EntityKind, data: Value) -> Result<EntityId, DatastoreError>;

    /// Fetch a record by key.
    async fn get(
        &self,
        kind: EntityKind,
        id: EntityId,
    ) -> Result<Option<StoredRecord>, DatastoreError>;

    /// Write a record at a known key, replacing any existing payload.
    async fn put(&self, kind: EntityKind, id: EntityId, data: Value)
    -> Result<(), DatastoreError>;

    /// Write several records in one batch.
    async fn put_batch(
        &self,
        kind: EntityKind,
        records: Vec<(EntityId, Value)>,
    ) -> Result<(), DatastoreError>;

    /// Remove a record. Removing an absent key succeeds.
    async fn delete(&self, kind: EntityKind, id: EntityId) -> Result<(), DatastoreError>;

    /// Scan a kind with an optional filter, limit, and cursor.
    async fn query(&self, request: QueryRequest) -> Result<QueryPage, DatastoreError>;
}

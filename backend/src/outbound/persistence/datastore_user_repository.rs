//! User repository over the document store.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::datastore::{Datastore, DatastoreError, EntityKind, QueryRequest, StoredRecord};
use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{Subject, User};

const SUBJECT_FIELD: &str = "subject";

/// Stored shape of a user record.
#[derive(Debug, Serialize, Deserialize)]
struct UserRecord {
    subject: Subject,
}

fn map_datastore_error(error: DatastoreError) -> UserRepositoryError {
    UserRepositoryError::storage(error.to_string())
}

fn user_from_record(record: StoredRecord) -> Result<User, UserRepositoryError> {
    let StoredRecord { id, data } = record;
    let stored: UserRecord =
        serde_json::from_value(data).map_err(|err| UserRepositoryError::decode(err.to_string()))?;
    Ok(User::from_parts(id, stored.subject))
}

/// Document-store implementation of the user repository port.
#[derive(Clone)]
pub struct DatastoreUserRepository<D> {
    store: Arc<D>,
}

impl<D> DatastoreUserRepository<D> {
    /// Create the repository over a datastore.
    pub fn new(store: Arc<D>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<D> UserRepository for DatastoreUserRepository<D>
where
    D: Datastore,
{
    async fn insert(&self, subject: Subject) -> Result<User, UserRepositoryError> {
        let record = serde_json::to_value(UserRecord {
            subject: subject.clone(),
        })
        .map_err(|err| UserRepositoryError::decode(err.to_string()))?;
        let id = self
            .store
            .insert(EntityKind::User, record)
            .await
            .map_err(map_datastore_error)?;
        Ok(User::from_parts(id, subject))
    }

    async fn find_by_subject(
        &self,
        subject: &Subject,
    ) -> Result<Option<User>, UserRepositoryError> {
        let request = QueryRequest::all(EntityKind::User)
            .filtered(SUBJECT_FIELD, json!(subject.as_ref()))
            .limited(1);
        let result = self
            .store
            .query(request)
            .await
            .map_err(map_datastore_error)?;
        result.items.into_iter().next().map(user_from_record).transpose()
    }

    async fn list_all(&self) -> Result<Vec<User>, UserRepositoryError> {
        let result = self
            .store
            .query(QueryRequest::all(EntityKind::User))
            .await
            .map_err(map_datastore_error)?;
        result.items.into_iter().map(user_from_record).collect()
    }
}

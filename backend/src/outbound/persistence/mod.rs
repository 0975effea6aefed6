//! Persistence adapters over the external document store.

pub mod datastore;
pub mod datastore_boat_repository;
pub mod datastore_load_repository;
pub mod datastore_user_repository;
pub mod links;
pub mod memory;

pub use datastore::{
    Datastore, DatastoreError, EntityKind, QueryPage, QueryRequest, StoredRecord,
};
#[cfg(test)]
pub use datastore::MockDatastore;
pub use datastore_boat_repository::DatastoreBoatRepository;
pub use datastore_load_repository::DatastoreLoadRepository;
pub use datastore_user_repository::DatastoreUserRepository;
pub use links::ResourceLinks;
pub use memory::MemoryDatastore;

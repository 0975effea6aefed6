//! Per-entity mutation locks for association changes.
//!
//! The document store has no cross-entity transaction, so two concurrent
//! attach operations against the same load could both observe a null
//! carrier and both write. Serialising association mutations through a
//! per-entity async mutex closes that race within one process. Locks are
//! always acquired boat-first, so a fixed global order holds and the pair
//! acquisition cannot deadlock.
//!
//! The registry grows with the number of distinct entities mutated over
//! the process lifetime; entries are one `Mutex<()>` each and are shared
//! between waiters.

use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};

use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::entity_id::EntityId;

/// Which side of the association an identifier belongs to. Boat and load
/// keys come from independent allocators, so the kind disambiguates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum LockKind {
    Boat,
    Load,
}

/// Registry of per-entity async mutexes.
#[derive(Debug, Default)]
pub struct EntityLocks {
    inner: StdMutex<HashMap<(LockKind, i64), Arc<Mutex<()>>>>,
}

/// Guards held for the duration of a paired association mutation.
#[derive(Debug)]
pub struct PairGuard {
    _boat: OwnedMutexGuard<()>,
    _load: OwnedMutexGuard<()>,
}

impl EntityLocks {
    /// Shared registry for services that mutate associations.
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn entry(&self, kind: LockKind, id: EntityId) -> Arc<Mutex<()>> {
        let mut map = self
            .inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Arc::clone(map.entry((kind, id.value())).or_default())
    }

    /// Serialise mutations of one boat.
    pub async fn lock_boat(&self, id: EntityId) -> OwnedMutexGuard<()> {
        self.entry(LockKind::Boat, id).lock_owned().await
    }

    /// Serialise mutations of one load.
    pub async fn lock_load(&self, id: EntityId) -> OwnedMutexGuard<()> {
        self.entry(LockKind::Load, id).lock_owned().await
    }

    /// Serialise a paired boat/load mutation. Acquisition order is always
    /// boat then load.
    pub async fn lock_pair(&self, boat: EntityId, load: EntityId) -> PairGuard {
        let boat_guard = self.lock_boat(boat).await;
        let load_guard = self.lock_load(load).await;
        PairGuard {
            _boat: boat_guard,
            _load: load_guard,
        }
    }
}

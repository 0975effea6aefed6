//! Association management between boats and loads.
//!
//! The association is denormalised on both sides: a boat lists summaries of
//! the loads it carries, and a load names its carrying boat. The store
//! writes each record independently, so this service owns the ordering:
//! the boat side is written first, and a failed load-side write triggers a
//! compensating removal of the just-appended summary. Mutations are
//! serialised per entity through [`EntityLocks`], which closes the
//! concurrent double-attach race within one process.
//!
//! A failed compensation leaves the pair one-sided; that is logged rather
//! than retried, matching the store's lack of cross-entity transactions.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::authorization::ensure_owner;
use crate::domain::boat::{Boat, LoadSummary};
use crate::domain::entity_id::EntityId;
use crate::domain::entity_locks::EntityLocks;
use crate::domain::error::Error;
use crate::domain::load::{CarrierSummary, Load};
use crate::domain::ports::{
    AssignmentCommand, AssignmentRequest, BoatRepository, BoatRepositoryError, LoadRepository,
    LoadRepositoryError,
};

pub(crate) fn map_boat_repository_error(error: BoatRepositoryError) -> Error {
    Error::internal(error.to_string())
}

pub(crate) fn map_load_repository_error(error: LoadRepositoryError) -> Error {
    Error::internal(error.to_string())
}

pub(crate) fn boat_not_found() -> Error {
    Error::not_found("No boat with this boat_id exists")
}

pub(crate) fn load_not_found() -> Error {
    Error::not_found("No load with this load_id exists")
}

/// Clear the carrier of every load listed on `boat`, in one batch write.
/// Returns the identifiers that were cleared. Summaries pointing at loads
/// that no longer exist are skipped with a warning.
pub(crate) async fn detach_all_for_boat<L>(loads: &L, boat: &Boat) -> Result<Vec<EntityId>, Error>
where
    L: LoadRepository + ?Sized,
{
    let mut cleared = Vec::with_capacity(boat.loads().len());
    for summary in boat.loads() {
        match loads
            .find_by_id(summary.id)
            .await
            .map_err(map_load_repository_error)?
        {
            Some(mut load) => {
                load.clear_carrier();
                cleared.push(load);
            }
            None => {
                warn!(load_id = %summary.id, boat_id = %boat.id(),
                    "boat listed a load that no longer exists");
            }
        }
    }
    if !cleared.is_empty() {
        loads
            .save_batch(&cleared)
            .await
            .map_err(map_load_repository_error)?;
    }
    Ok(cleared.iter().map(Load::id).collect())
}

/// Remove the reverse reference to `load` from its carrying boat, if any.
/// A carrier pointing at a boat that no longer exists is treated as
/// already detached.
pub(crate) async fn detach_from_carrier<B>(boats: &B, load: &Load) -> Result<(), Error>
where
    B: BoatRepository + ?Sized,
{
    let Some(carrier) = load.carrier() else {
        return Ok(());
    };
    let Some(mut boat) = boats
        .find_by_id(carrier.id)
        .await
        .map_err(map_boat_repository_error)?
    else {
        warn!(boat_id = %carrier.id, load_id = %load.id(),
            "load carrier names a boat that no longer exists");
        return Ok(());
    };
    if boat.detach_load(load.id()) {
        boats.save(&boat).await.map_err(map_boat_repository_error)?;
    }
    Ok(())
}

/// Association manager: attaches loads to and releases loads from boats.
#[derive(Clone)]
pub struct AssignmentService<B, L> {
    boats: Arc<B>,
    loads: Arc<L>,
    locks: Arc<EntityLocks>,
}

impl<B, L> AssignmentService<B, L> {
    /// Create the service over the two repositories and the shared lock
    /// registry.
    pub fn new(boats: Arc<B>, loads: Arc<L>, locks: Arc<EntityLocks>) -> Self {
        Self {
            boats,
            loads,
            locks,
        }
    }
}

#[async_trait]
impl<B, L> AssignmentCommand for AssignmentService<B, L>
where
    B: BoatRepository,
    L: LoadRepository,
{
    async fn assign_load(&self, request: AssignmentRequest) -> Result<(), Error> {
        let _guard = self.locks.lock_pair(request.boat_id, request.load_id).await;

        let mut boat = self
            .boats
            .find_by_id(request.boat_id)
            .await
            .map_err(map_boat_repository_error)?
            .ok_or_else(boat_not_found)?;
        ensure_owner(&boat, &request.caller)?;

        let mut load = self
            .loads
            .find_by_id(request.load_id)
            .await
            .map_err(map_load_repository_error)?
            .ok_or_else(load_not_found)?;
        if load.carrier().is_some() {
            return Err(Error::conflict("The load is already assigned to a boat"));
        }

        boat.attach_load(LoadSummary::from(&load));
        self.boats
            .save(&boat)
            .await
            .map_err(map_boat_repository_error)?;

        load.set_carrier(CarrierSummary::from(&boat));
        if let Err(err) = self.loads.save(&load).await {
            boat.detach_load(load.id());
            if let Err(undo) = self.boats.save(&boat).await {
                warn!(error = %undo, boat_id = %boat.id(), load_id = %load.id(),
                    "compensating detach failed; association left one-sided");
            }
            return Err(map_load_repository_error(err));
        }
        Ok(())
    }

    async fn release_load(&self, request: AssignmentRequest) -> Result<(), Error> {
        let _guard = self.locks.lock_pair(request.boat_id, request.load_id).await;

        let mut boat = self
            .boats
            .find_by_id(request.boat_id)
            .await
            .map_err(map_boat_repository_error)?
            .ok_or_else(boat_not_found)?;
        ensure_owner(&boat, &request.caller)?;

        let mut load = self
            .loads
            .find_by_id(request.load_id)
            .await
            .map_err(map_load_repository_error)?
            .ok_or_else(load_not_found)?;
        if !boat.detach_load(request.load_id) {
            return Err(Error::not_found("The load is not assigned to this boat"));
        }

        // Best effort: attempt both writes even when the first fails.
        let boat_written = self
            .boats
            .save(&boat)
            .await
            .map_err(map_boat_repository_error);
        load.clear_carrier();
        let load_written = self
            .loads
            .save(&load)
            .await
            .map_err(map_load_repository_error);
        boat_written.and(load_written)
    }
}

#[cfg(test)]
mod tests {
    //! Invariant coverage for the association manager: symmetry, the
    //! no-double-attach rule, owner checks, and compensation on partial
    //! failure.

    use rstest::rstest;

    use super::*;
    use crate::domain::boat::BoatDraft;
    use crate::domain::error::ErrorCode;
    use crate::domain::load::LoadDraft;
    use crate::domain::ports::{MockBoatRepository, MockLoadRepository};
    use crate::domain::subject::Subject;

    fn id(raw: i64) -> EntityId {
        EntityId::new(raw).expect("positive id")
    }

    fn subject(raw: &str) -> Subject {
        Subject::new(raw).expect("non-empty subject")
    }

    fn boat(raw_id: i64, owner: &str, loads: Vec<LoadSummary>) -> Boat {
        Boat::from_parts(
            id(raw_id),
            format!("https://freight.example.com/boats/{raw_id}"),
            BoatDraft::new("Tug", "tug", 40).expect("valid draft"),
            subject(owner),
            loads,
        )
    }

    fn load(raw_id: i64, carrier: Option<CarrierSummary>) -> Load {
        Load::from_parts(
            id(raw_id),
            format!("https://freight.example.com/loads/{raw_id}"),
            LoadDraft::new(500, "steel", "2024-01-01").expect("valid draft"),
            carrier,
        )
    }

    fn request(boat_id: i64, load_id: i64, caller: &str) -> AssignmentRequest {
        AssignmentRequest {
            boat_id: id(boat_id),
            load_id: id(load_id),
            caller: subject(caller),
        }
    }

    fn service(
        boats: MockBoatRepository,
        loads: MockLoadRepository,
    ) -> AssignmentService<MockBoatRepository, MockLoadRepository> {
        AssignmentService::new(Arc::new(boats), Arc::new(loads), EntityLocks::new())
    }

    #[tokio::test]
    async fn assign_writes_both_sides() {
        let mut boats = MockBoatRepository::new();
        boats
            .expect_find_by_id()
            .returning(|_| Ok(Some(boat(1, "u1", Vec::new()))));
        boats
            .expect_save()
            .withf(|saved| saved.carries(id(7)))
            .times(1)
            .returning(|_| Ok(()));

        let mut loads = MockLoadRepository::new();
        loads.expect_find_by_id().returning(|_| Ok(Some(load(7, None))));
        loads
            .expect_save()
            .withf(|saved| saved.carrier().map(|c| c.id) == Some(id(1)))
            .times(1)
            .returning(|_| Ok(()));

        service(boats, loads)
            .assign_load(request(1, 7, "u1"))
            .await
            .expect("assignment succeeds");
    }

    #[tokio::test]
    async fn assign_rejects_already_carried_load_with_conflict() {
        let mut boats = MockBoatRepository::new();
        boats
            .expect_find_by_id()
            .returning(|_| Ok(Some(boat(2, "u1", Vec::new()))));
        boats.expect_save().never();

        let mut loads = MockLoadRepository::new();
        loads.expect_find_by_id().returning(|_| {
            Ok(Some(load(
                7,
                Some(CarrierSummary {
                    id: id(1),
                    name: "Other".to_owned(),
                    self_link: "https://freight.example.com/boats/1".to_owned(),
                }),
            )))
        });
        loads.expect_save().never();

        let err = service(boats, loads)
            .assign_load(request(2, 7, "u1"))
            .await
            .expect_err("double attach must fail");
        assert_eq!(err.code, ErrorCode::Conflict);
    }

    #[tokio::test]
    async fn assign_rejects_non_owner_before_touching_the_load() {
        let mut boats = MockBoatRepository::new();
        boats
            .expect_find_by_id()
            .returning(|_| Ok(Some(boat(1, "u1", Vec::new()))));

        let mut loads = MockLoadRepository::new();
        loads.expect_find_by_id().never();

        let err = service(boats, loads)
            .assign_load(request(1, 7, "intruder"))
            .await
            .expect_err("non-owner must be rejected");
        assert_eq!(err.code, ErrorCode::Forbidden);
    }

    #[rstest]
    #[case(true)]
    #[case(false)]
    #[tokio::test]
    async fn assign_reports_not_found_for_missing_entities(#[case] boat_exists: bool) {
        let mut boats = MockBoatRepository::new();
        boats.expect_find_by_id().returning(move |_| {
            Ok(boat_exists.then(|| boat(1, "u1", Vec::new())))
        });
        boats.expect_save().never();

        let mut loads = MockLoadRepository::new();
        loads.expect_find_by_id().returning(|_| Ok(None));

        let err = service(boats, loads)
            .assign_load(request(1, 7, "u1"))
            .await
            .expect_err("missing entity must be rejected");
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn assign_compensates_boat_side_when_load_write_fails() {
        let mut boats = MockBoatRepository::new();
        boats
            .expect_find_by_id()
            .returning(|_| Ok(Some(boat(1, "u1", Vec::new()))));
        let mut boat_saves = Vec::new();
        boats
            .expect_save()
            .times(2)
            .returning_st(move |saved| {
                boat_saves.push(saved.carries(id(7)));
                // First save appends the summary, the compensation removes it.
                match boat_saves.as_slice() {
                    [true] | [true, false] => Ok(()),
                    other => panic!("unexpected save sequence: {other:?}"),
                }
            });

        let mut loads = MockLoadRepository::new();
        loads.expect_find_by_id().returning(|_| Ok(Some(load(7, None))));
        loads
            .expect_save()
            .returning(|_| Err(LoadRepositoryError::storage("write refused")));

        let err = service(boats, loads)
            .assign_load(request(1, 7, "u1"))
            .await
            .expect_err("partial failure surfaces");
        assert_eq!(err.code, ErrorCode::InternalError);
    }

    #[tokio::test]
    async fn release_removes_both_sides() {
        let carried = LoadSummary {
            id: id(7),
            self_link: "https://freight.example.com/loads/7".to_owned(),
        };
        let mut boats = MockBoatRepository::new();
        boats
            .expect_find_by_id()
            .returning(move |_| Ok(Some(boat(1, "u1", vec![carried.clone()]))));
        boats
            .expect_save()
            .withf(|saved| !saved.carries(id(7)))
            .times(1)
            .returning(|_| Ok(()));

        let mut loads = MockLoadRepository::new();
        loads.expect_find_by_id().returning(|_| {
            Ok(Some(load(
                7,
                Some(CarrierSummary {
                    id: id(1),
                    name: "Tug".to_owned(),
                    self_link: "https://freight.example.com/boats/1".to_owned(),
                }),
            )))
        });
        loads
            .expect_save()
            .withf(|saved| saved.carrier().is_none())
            .times(1)
            .returning(|_| Ok(()));

        service(boats, loads)
            .release_load(request(1, 7, "u1"))
            .await
            .expect("release succeeds");
    }

    #[tokio::test]
    async fn release_of_unlisted_load_is_not_found() {
        let mut boats = MockBoatRepository::new();
        boats
            .expect_find_by_id()
            .returning(|_| Ok(Some(boat(1, "u1", Vec::new()))));
        boats.expect_save().never();

        let mut loads = MockLoadRepository::new();
        loads.expect_find_by_id().returning(|_| Ok(Some(load(7, None))));
        loads.expect_save().never();

        let err = service(boats, loads)
            .release_load(request(1, 7, "u1"))
            .await
            .expect_err("unlisted load must be rejected");
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn release_attempts_load_write_even_when_boat_write_fails() {
        let carried = LoadSummary {
            id: id(7),
            self_link: "https://freight.example.com/loads/7".to_owned(),
        };
        let mut boats = MockBoatRepository::new();
        boats
            .expect_find_by_id()
            .returning(move |_| Ok(Some(boat(1, "u1", vec![carried.clone()]))));
        boats
            .expect_save()
            .returning(|_| Err(BoatRepositoryError::storage("write refused")));

        let mut loads = MockLoadRepository::new();
        loads.expect_find_by_id().returning(|_| {
            Ok(Some(load(
                7,
                Some(CarrierSummary {
                    id: id(1),
                    name: "Tug".to_owned(),
                    self_link: "https://freight.example.com/boats/1".to_owned(),
                }),
            )))
        });
        loads
            .expect_save()
            .withf(|saved| saved.carrier().is_none())
            .times(1)
            .returning(|_| Ok(()));

        let err = service(boats, loads)
            .release_load(request(1, 7, "u1"))
            .await
            .expect_err("boat-side failure surfaces");
        assert_eq!(err.code, ErrorCode::InternalError);
    }

    #[tokio::test]
    async fn cascade_for_boat_clears_every_listed_load() {
        let summaries = vec![
            LoadSummary {
                id: id(7),
                self_link: "https://freight.example.com/loads/7".to_owned(),
            },
            LoadSummary {
                id: id(8),
                self_link: "https://freight.example.com/loads/8".to_owned(),
            },
        ];
        let carrying = boat(1, "u1", summaries);

        let mut loads = MockLoadRepository::new();
        loads.expect_find_by_id().returning(|load_id| {
            Ok(Some(load(
                load_id.value(),
                Some(CarrierSummary {
                    id: id(1),
                    name: "Tug".to_owned(),
                    self_link: "https://freight.example.com/boats/1".to_owned(),
                }),
            )))
        });
        loads
            .expect_save_batch()
            .withf(|batch| batch.len() == 2 && batch.iter().all(|l| l.carrier().is_none()))
            .times(1)
            .returning(|_| Ok(()));

        let affected = detach_all_for_boat(&loads, &carrying)
            .await
            .expect("cascade succeeds");
        assert_eq!(affected, vec![id(7), id(8)]);
    }

    #[tokio::test]
    async fn cascade_for_load_scrubs_the_carrying_boat() {
        let carried = LoadSummary {
            id: id(7),
            self_link: "https://freight.example.com/loads/7".to_owned(),
        };
        let mut boats = MockBoatRepository::new();
        boats
            .expect_find_by_id()
            .returning(move |_| Ok(Some(boat(1, "u1", vec![carried.clone()]))));
        boats
            .expect_save()
            .withf(|saved| !saved.carries(id(7)))
            .times(1)
            .returning(|_| Ok(()));

        let attached = load(
            7,
            Some(CarrierSummary {
                id: id(1),
                name: "Tug".to_owned(),
                self_link: "https://freight.example.com/boats/1".to_owned(),
            }),
        );
        detach_from_carrier(&boats, &attached)
            .await
            .expect("cascade succeeds");
    }

    #[tokio::test]
    async fn cascade_for_unassociated_load_is_a_no_op() {
        let mut boats = MockBoatRepository::new();
        boats.expect_find_by_id().never();
        boats.expect_save().never();

        detach_from_carrier(&boats, &load(7, None))
            .await
            .expect("no-op cascade succeeds");
    }
}

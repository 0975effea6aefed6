//! Boat CRUD service with owner guarding and delete cascades.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::assignment_service::{
    boat_not_found, detach_all_for_boat, map_boat_repository_error,
};
use crate::domain::authorization::ensure_owner;
use crate::domain::boat::Boat;
use crate::domain::entity_id::EntityId;
use crate::domain::entity_locks::EntityLocks;
use crate::domain::error::Error;
use crate::domain::subject::Subject;
use crate::domain::ports::{
    BoatCommand, BoatPage, BoatQuery, BoatRepository, CreateBoatRequest, DeleteBoatRequest,
    GetBoatRequest, ListBoatsRequest, LoadRepository, PatchBoatRequest, UpdateBoatRequest,
};

/// Boat service implementing the command and query driving ports.
#[derive(Clone)]
pub struct BoatService<B, L> {
    boats: Arc<B>,
    loads: Arc<L>,
    locks: Arc<EntityLocks>,
    page_size: usize,
}

impl<B, L> BoatService<B, L> {
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

impl<B, L> BoatService<B, L>
where
    B: BoatRepository,
{
    async fn owned_boat(&self, boat_id: EntityId, caller: &Subject) -> Result<Boat, Error> {
        let boat = self
            .boats
            .find_by_id(boat_id)
            .await
            .map_err(map_boat_repository_error)?
            .ok_or_else(boat_not_found)?;
        ensure_owner(&boat, caller)?;
        Ok(boat)
    }
}

#[async_trait]
impl<B, L> BoatCommand for BoatService<B, L>
where
    B: BoatRepository,
    L: LoadRepository,
{
    async fn create_boat(&self, request: CreateBoatRequest) -> Result<Boat, Error> {
        self.boats
            .insert(request.draft, request.owner)
            .await
            .map_err(map_boat_repository_error)
    }

    async fn update_boat(&self, request: UpdateBoatRequest) -> Result<Boat, Error> {
        let mut boat = self.owned_boat(request.boat_id, &request.caller).await?;
        boat.apply_update(request.draft);
        self.boats
            .save(&boat)
            .await
            .map_err(map_boat_repository_error)?;
        Ok(boat)
    }

    async fn patch_boat(&self, request: PatchBoatRequest) -> Result<Boat, Error> {
        let mut boat = self.owned_boat(request.boat_id, &request.caller).await?;
        boat.apply_patch(request.name, request.boat_type, request.length)
            .map_err(|err| Error::invalid_request(err.to_string()))?;
        self.boats
            .save(&boat)
            .await
            .map_err(map_boat_repository_error)?;
        Ok(boat)
    }

    async fn delete_boat(&self, request: DeleteBoatRequest) -> Result<(), Error> {
        let _guard = self.locks.lock_boat(request.boat_id).await;
        let boat = self.owned_boat(request.boat_id, &request.caller).await?;
        // The cascade runs before the record deletion so a failure leaves
        // the boat intact rather than orphaning stale carriers.
        detach_all_for_boat(self.loads.as_ref(), &boat).await?;
        self.boats
            .delete(boat.id())
            .await
            .map_err(map_boat_repository_error)
    }
}

#[async_trait]
impl<B, L> BoatQuery for BoatService<B, L>
where
    B: BoatRepository,
    L: LoadRepository,
{
    async fn get_boat(&self, request: GetBoatRequest) -> Result<Boat, Error> {
        self.owned_boat(request.boat_id, &request.caller).await
    }

    async fn list_boats(&self, request: ListBoatsRequest) -> Result<BoatPage, Error> {
        let page = PageRequest {
            limit: self.page_size,
            cursor: request.cursor,
        };
        let listed = self
            .boats
            .list_by_owner(&request.owner, page)
            .await
            .map_err(map_boat_repository_error)?;
        let total = self
            .boats
            .count_by_owner(&request.owner)
            .await
            .map_err(map_boat_repository_error)?;
        Ok(BoatPage {
            items: listed.items,
            total,
            next_cursor: listed.next_cursor,
        })
    }
}

#[cfg(test)]
mod tests {
    //! Owner-guarded CRUD coverage; the delete cascade ordering in
    //! particular.

    use pagination::Page;
    use rstest::rstest;

    use super::*;
    use crate::domain::boat::{BoatDraft, LoadSummary};
    use crate::domain::error::ErrorCode;
    use crate::domain::load::{CarrierSummary, Load, LoadDraft};
    use crate::domain::ports::{MockBoatRepository, MockLoadRepository};

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

    fn service(
        boats: MockBoatRepository,
        loads: MockLoadRepository,
    ) -> BoatService<MockBoatRepository, MockLoadRepository> {
        BoatService::new(Arc::new(boats), Arc::new(loads), EntityLocks::new(), 5)
    }

    #[tokio::test]
    async fn get_rejects_non_owner() {
        let mut boats = MockBoatRepository::new();
        boats
            .expect_find_by_id()
            .returning(|_| Ok(Some(boat(1, "u1", Vec::new()))));

        let err = service(boats, MockLoadRepository::new())
            .get_boat(GetBoatRequest {
                boat_id: id(1),
                caller: subject("u2"),
            })
            .await
            .expect_err("non-owner must be rejected");
        assert_eq!(err.code, ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn get_reports_missing_boat() {
        let mut boats = MockBoatRepository::new();
        boats.expect_find_by_id().returning(|_| Ok(None));

        let err = service(boats, MockLoadRepository::new())
            .get_boat(GetBoatRequest {
                boat_id: id(1),
                caller: subject("u1"),
            })
            .await
            .expect_err("missing boat must be rejected");
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn patch_preserves_omitted_fields_and_loads() {
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
            .withf(|saved| {
                saved.name() == "Tug" && saved.length() == 55 && saved.carries(id(7))
            })
            .times(1)
            .returning(|_| Ok(()));

        let patched = service(boats, MockLoadRepository::new())
            .patch_boat(PatchBoatRequest {
                boat_id: id(1),
                caller: subject("u1"),
                name: None,
                boat_type: None,
                length: Some(55),
            })
            .await
            .expect("patch succeeds");
        assert_eq!(patched.length(), 55);
        assert_eq!(patched.boat_type(), "tug");
    }

    #[tokio::test]
    async fn delete_cascades_before_removing_the_record() {
        let carried = LoadSummary {
            id: id(7),
            self_link: "https://freight.example.com/loads/7".to_owned(),
        };
        let mut boats = MockBoatRepository::new();
        boats
            .expect_find_by_id()
            .returning(move |_| Ok(Some(boat(1, "u1", vec![carried.clone()]))));
        boats.expect_delete().times(1).returning(|_| Ok(()));

        let mut loads = MockLoadRepository::new();
        loads.expect_find_by_id().returning(|load_id| {
            Ok(Some(Load::from_parts(
                load_id,
                format!("https://freight.example.com/loads/{load_id}"),
                LoadDraft::new(500, "steel", "2024-01-01").expect("valid draft"),
                Some(CarrierSummary {
                    id: id(1),
                    name: "Tug".to_owned(),
                    self_link: "https://freight.example.com/boats/1".to_owned(),
                }),
            )))
        });
        loads
            .expect_save_batch()
            .withf(|batch| batch.iter().all(|l| l.carrier().is_none()))
            .times(1)
            .returning(|_| Ok(()));

        service(boats, loads)
            .delete_boat(DeleteBoatRequest {
                boat_id: id(1),
                caller: subject("u1"),
            })
            .await
            .expect("delete succeeds");
    }

    #[rstest]
    #[case(3, true)]
    #[case(0, false)]
    #[tokio::test]
    async fn list_reports_owner_total_and_continuation(
        #[case] total: usize,
        #[case] has_more: bool,
    ) {
        let mut boats = MockBoatRepository::new();
        boats.expect_list_by_owner().returning(move |_, _| {
            Ok(Page {
                items: Vec::new(),
                next_cursor: has_more.then(|| pagination::Cursor::from_offset(5)),
            })
        });
        boats
            .expect_count_by_owner()
            .returning(move |_| Ok(total));

        let page = service(boats, MockLoadRepository::new())
            .list_boats(ListBoatsRequest {
                owner: subject("u1"),
                cursor: None,
            })
            .await
            .expect("listing succeeds");
        assert_eq!(page.total, total);
        assert_eq!(page.next_cursor.is_some(), has_more);
    }
}

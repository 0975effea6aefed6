//! Owner guard for boat-scoped operations.
//!
//! Boats are exclusively owned; the guard is a pure subject-equality check
//! with no role hierarchy or delegation. It applies to every boat read,
//! mutation, and association change. Load-only operations are deliberately
//! unguarded (see DESIGN.md).

use crate::domain::boat::Boat;
use crate::domain::error::Error;
use crate::domain::subject::Subject;

/// Allow the operation iff `caller` owns `boat`.
///
/// # Errors
/// Returns [`Error::forbidden`] when the caller is not the owner.
pub fn ensure_owner(boat: &Boat, caller: &Subject) -> Result<(), Error> {
    if boat.owner() == caller {
        Ok(())
    } else {
        Err(Error::forbidden(
            "Access to the specified boat from this account is forbidden",
        ))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::boat::BoatDraft;
    use crate::domain::entity_id::EntityId;
    use crate::domain::error::ErrorCode;

    fn boat_owned_by(owner: &str) -> Boat {
        Boat::from_parts(
            EntityId::new(1).expect("positive id"),
            "https://freight.example.com/boats/1".to_owned(),
            BoatDraft::new("Tug", "tug", 40).expect("valid draft"),
            Subject::new(owner).expect("non-empty subject"),
            Vec::new(),
        )
    }

    #[rstest]
    fn owner_is_allowed() {
        let boat = boat_owned_by("u1");
        let caller = Subject::new("u1").expect("non-empty subject");
        assert!(ensure_owner(&boat, &caller).is_ok());
    }

    #[rstest]
    fn any_other_subject_is_forbidden() {
        let boat = boat_owned_by("u1");
        let caller = Subject::new("u2").expect("non-empty subject");
        let err = ensure_owner(&boat, &caller).expect_err("must be forbidden");
        assert_eq!(err.code, ErrorCode::Forbidden);
    }
}

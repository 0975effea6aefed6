//! Domain core: entities, invariants, services, and ports.
//!
//! Types here are transport and storage agnostic. Inbound adapters map
//! [`Error`] to protocol responses; outbound adapters implement the driven
//! ports in [`ports`].

pub mod assignment_service;
pub mod authorization;
pub mod boat;
pub mod boat_service;
pub mod entity_id;
pub mod entity_locks;
pub mod error;
pub mod load;
pub mod load_service;
pub mod ports;
pub mod subject;
pub mod user;
pub mod user_service;

pub use self::assignment_service::AssignmentService;
pub use self::boat::{Boat, BoatDraft, BoatValidationError, LoadSummary};
pub use self::boat_service::BoatService;
pub use self::entity_id::{EntityId, EntityIdError};
pub use self::entity_locks::EntityLocks;
pub use self::error::{ApiResult, Error, ErrorCode};
pub use self::load::{CarrierSummary, Load, LoadDraft, LoadValidationError};
pub use self::load_service::LoadService;
pub use self::subject::{Subject, SubjectError};
pub use self::user::User;
pub use self::user_service::UserService;

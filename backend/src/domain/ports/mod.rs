//! Domain ports for the hexagonal boundary.
//!
//! Driving ports (`*Command`, `*Query`, `UserOnboarding`) are what the HTTP
//! adapter calls; driven ports (`*Repository`, `Authenticator`) are what
//! the domain services call out to. Mocks are exported for tests and
//! `Fixture*` implementations cover code paths that do not exercise a
//! port.

mod assignment_command;
mod authenticator;
mod boat_command;
mod boat_query;
mod boat_repository;
mod load_command;
mod load_query;
mod load_repository;
mod user_onboarding;
mod user_repository;
mod users_query;

#[cfg(test)]
pub use assignment_command::MockAssignmentCommand;
pub use assignment_command::{AssignmentCommand, AssignmentRequest};
#[cfg(test)]
pub use authenticator::MockAuthenticator;
pub use authenticator::{Authenticator, AuthenticatorError, FixtureAuthenticator, IdentityToken};
#[cfg(test)]
pub use boat_command::MockBoatCommand;
pub use boat_command::{
    BoatCommand, CreateBoatRequest, DeleteBoatRequest, PatchBoatRequest, UpdateBoatRequest,
};
#[cfg(test)]
pub use boat_query::MockBoatQuery;
pub use boat_query::{BoatPage, BoatQuery, GetBoatRequest, ListBoatsRequest};
#[cfg(test)]
pub use boat_repository::MockBoatRepository;
pub use boat_repository::{BoatRepository, BoatRepositoryError, FixtureBoatRepository};
#[cfg(test)]
pub use load_command::MockLoadCommand;
pub use load_command::{LoadCommand, PatchLoadRequest, UpdateLoadRequest};
#[cfg(test)]
pub use load_query::MockLoadQuery;
pub use load_query::{ListLoadsRequest, LoadPage, LoadQuery};
#[cfg(test)]
pub use load_repository::MockLoadRepository;
pub use load_repository::{FixtureLoadRepository, LoadRepository, LoadRepositoryError};
#[cfg(test)]
pub use user_onboarding::MockUserOnboarding;
pub use user_onboarding::UserOnboarding;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{FixtureUserRepository, UserRepository, UserRepositoryError};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;

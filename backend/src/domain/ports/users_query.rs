//! Driving port for the read-only user listing.

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::user::User;

/// Port for listing registered users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Every registered user.
    async fn list_users(&self) -> Result<Vec<User>, Error>;
}

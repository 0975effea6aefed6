//! Driving port for first-login user registration.

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::subject::Subject;
use crate::domain::user::User;

/// Port for registering subjects after a successful OAuth exchange.
///
/// Registration is idempotent per subject: a repeat login returns the
/// existing record instead of inserting a duplicate.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserOnboarding: Send + Sync {
    /// Ensure a user exists for this subject and return it.
    async fn register(&self, subject: Subject) -> Result<User, Error>;
}

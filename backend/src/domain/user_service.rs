//! User registration and listing.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::error::Error;
use crate::domain::ports::{UserOnboarding, UserRepository, UserRepositoryError, UsersQuery};
use crate::domain::subject::Subject;
use crate::domain::user::User;

fn map_user_repository_error(error: UserRepositoryError) -> Error {
    Error::internal(error.to_string())
}

/// User service implementing onboarding and the read-only listing.
#[derive(Clone)]
pub struct UserService<U> {
    users: Arc<U>,
}

impl<U> UserService<U> {
    /// Create the service over the user repository.
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl<U> UserOnboarding for UserService<U>
where
    U: UserRepository,
{
    async fn register(&self, subject: Subject) -> Result<User, Error> {
        // Repeat logins re-use the existing record; the subject is unique
        // per account.
        if let Some(existing) = self
            .users
            .find_by_subject(&subject)
            .await
            .map_err(map_user_repository_error)?
        {
            return Ok(existing);
        }
        self.users
            .insert(subject)
            .await
            .map_err(map_user_repository_error)
    }
}

#[async_trait]
impl<U> UsersQuery for UserService<U>
where
    U: UserRepository,
{
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.users
            .list_all()
            .await
            .map_err(map_user_repository_error)
    }
}

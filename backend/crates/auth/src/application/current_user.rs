//! Current User Use Case
//!
//! Loads the user a session belongs to.

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::User;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

pub struct CurrentUserUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> CurrentUserUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    /// Fails with `UserNotFound` when the row was deleted after login
    pub async fn execute(&self, user_id: UserId) -> AuthResult<User> {
        self.user_repo
            .find_user_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}

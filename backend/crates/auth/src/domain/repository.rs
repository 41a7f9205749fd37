//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::UserId;
use uuid::Uuid;

use crate::domain::entity::{AuthSession, NewUser, User};
use crate::domain::value_object::Email;
use crate::error::AuthResult;

#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a user and return it with its assigned id
    ///
    /// A duplicate email fails with `AuthError::EmailTaken`.
    async fn insert_user(&self, user: &NewUser) -> AuthResult<User>;

    async fn find_user_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    async fn find_user_by_id(&self, user_id: UserId) -> AuthResult<Option<User>>;

    async fn email_exists(&self, email: &Email) -> AuthResult<bool>;
}

#[trait_variant::make(AuthSessionRepository: Send)]
pub trait LocalAuthSessionRepository {
    async fn create_session(&self, session: &AuthSession) -> AuthResult<()>;

    /// Find an unexpired session
    ///
    /// A session opened by another client fails with
    /// `AuthError::SessionFingerprintMismatch`.
    async fn find_session(
        &self,
        session_id: Uuid,
        fingerprint_hash: &[u8],
    ) -> AuthResult<Option<AuthSession>>;

    /// Persist `expires_at_ms` and `last_activity_at`
    async fn touch_session(&self, session: &AuthSession) -> AuthResult<()>;

    async fn delete_session(&self, session_id: Uuid) -> AuthResult<()>;

    /// Delete every expired session, returning how many were removed
    async fn cleanup_expired(&self) -> AuthResult<u64>;
}

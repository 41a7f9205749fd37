//! Sign In Use Case
//!
//! Authenticates a user by email and password and opens a session.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session_token::sign_session_token;
use crate::domain::entity::{AuthSession, User};
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::domain::value_object::{Email, RawPassword};
use crate::error::{AuthError, AuthResult};

pub use platform::client::ClientFingerprint;

pub struct SignInInput {
    pub email: String,
    pub password: String,
}

pub struct SignInOutput {
    pub user: User,
    pub session_token: String,
}

pub struct SignInUseCase<U, S>
where
    U: UserRepository,
    S: AuthSessionRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<U, S> SignInUseCase<U, S>
where
    U: UserRepository,
    S: AuthSessionRepository,
{
    pub fn new(user_repo: Arc<U>, session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            session_repo,
            config,
        }
    }

    pub async fn execute(
        &self,
        input: SignInInput,
        fingerprint: &ClientFingerprint,
    ) -> AuthResult<SignInOutput> {
        // A malformed email cannot belong to anyone
        let email = Email::new(&input.email).map_err(|_| AuthError::InvalidCredentials)?;
        let raw_password = RawPassword::for_login(input.password);

        let user = self
            .user_repo
            .find_user_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !user.password.verify(&raw_password, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        let session = AuthSession::new(user.id, fingerprint, self.config.session_ttl_chrono());
        self.session_repo.create_session(&session).await?;

        tracing::info!(
            user_id = %user.id,
            session_id = %session.session_id,
            "User signed in"
        );

        Ok(SignInOutput {
            session_token: sign_session_token(&self.config.session_secret, session.session_id),
            user,
        })
    }
}

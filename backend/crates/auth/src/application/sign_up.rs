//! Sign Up Use Case
//!
//! Creates a user and logs them in right away.

use std::sync::Arc;

use platform::client::ClientFingerprint;

use crate::application::config::AuthConfig;
use crate::application::session_token::sign_session_token;
use crate::domain::entity::{AuthSession, NewUser, User};
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::domain::value_object::{Email, RawPassword, UserName, UserPassword};
use crate::error::{AuthError, AuthResult};

pub struct SignUpInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

pub struct SignUpOutput {
    pub user: User,
    pub session_token: String,
}

pub struct SignUpUseCase<U, S>
where
    U: UserRepository,
    S: AuthSessionRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<U, S> SignUpUseCase<U, S>
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
        input: SignUpInput,
        fingerprint: &ClientFingerprint,
    ) -> AuthResult<SignUpOutput> {
        let name = UserName::new(&input.name)?;
        let email = Email::new(&input.email)?;
        let raw_password = RawPassword::for_sign_up(input.password, &self.config.password_policy)?;

        if self.user_repo.email_exists(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        let password = UserPassword::from_raw(&raw_password, self.config.pepper())?;
        let user = self
            .user_repo
            .insert_user(&NewUser::new(name, email, password))
            .await?;

        let session = AuthSession::new(user.id, fingerprint, self.config.session_ttl_chrono());
        self.session_repo.create_session(&session).await?;

        tracing::info!(
            user_id = %user.id,
            session_id = %session.session_id,
            "User signed up"
        );

        Ok(SignUpOutput {
            session_token: sign_session_token(&self.config.session_secret, session.session_id),
            user,
        })
    }
}

//! Check Session Use Case
//!
//! Resolves a session cookie to a live session and records the activity.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session_token::parse_session_token;
use crate::domain::entity::AuthSession;
use crate::domain::repository::AuthSessionRepository;
use crate::error::{AuthError, AuthResult};

pub struct CheckSessionUseCase<S>
where
    S: AuthSessionRepository + Send + Sync + 'static,
{
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> CheckSessionUseCase<S>
where
    S: AuthSessionRepository + Send + Sync + 'static,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    /// Validate the token and load the session
    ///
    /// The activity update is written in the background; a failure there is
    /// logged and does not fail the request.
    pub async fn get_session(
        &self,
        session_token: &str,
        fingerprint_hash: &[u8],
    ) -> AuthResult<AuthSession> {
        let session_id = parse_session_token(&self.config.session_secret, session_token)?;

        let mut session = self
            .session_repo
            .find_session(session_id, fingerprint_hash)
            .await?
            .ok_or(AuthError::SessionInvalid)?;

        if session.is_expired() {
            self.session_repo.delete_session(session_id).await?;
            return Err(AuthError::SessionInvalid);
        }

        session.touch();
        session.extend_if_needed(self.config.session_ttl_chrono());

        let snapshot = session.clone();
        let repo = self.session_repo.clone();
        tokio::spawn(async move {
            if let Err(e) = repo.touch_session(&snapshot).await {
                tracing::warn!(error = %e, "Failed to update session activity");
            }
        });

        Ok(session)
    }
}

//! Auth Middleware
//!
//! `check_auth_session` resolves the session cookie once per request and
//! leaves a `CurrentUser` in the request extensions. Handlers that need a
//! logged-in user take `CurrentUser` as an extractor; it rejects with 401
//! when the middleware found no session.

use axum::body::Body;
use axum::extract::{ConnectInfo, FromRequestParts, State};
use axum::http::Request;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use kernel::id::UserId;
use platform::client::ClientFingerprint;
use std::net::SocketAddr;
use std::sync::Arc;
use uuid::Uuid;

use crate::application::CheckSessionUseCase;
use crate::application::config::AuthConfig;
use crate::domain::repository::AuthSessionRepository;
use crate::error::AuthError;

/// Middleware state
#[derive(Clone)]
pub struct AuthMiddlewareState<R>
where
    R: AuthSessionRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

impl<R> AuthMiddlewareState<R>
where
    R: AuthSessionRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: R, config: AuthConfig) -> Self {
        Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
        }
    }
}

/// The logged-in user of the current request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_id: UserId,
    pub session_id: Uuid,
}

/// Resolve the session cookie, if any, into a `CurrentUser`
///
/// Anonymous requests pass through untouched. Only storage failures end the
/// request here.
pub async fn check_auth_session<R>(
    State(state): State<AuthMiddlewareState<R>>,
    mut req: Request<Body>,
    next: Next,
) -> Response
where
    R: AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let headers = req.headers();

    let direct_ip = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip());

    let fingerprint = ClientFingerprint::from_headers(headers, direct_ip);
    let token = platform::cookie::extract_cookie(headers, &state.config.session_cookie_name);

    if let Some(token) = token {
        let use_case = CheckSessionUseCase::new(state.repo.clone(), state.config.clone());
        match use_case.get_session(&token, &fingerprint.hash).await {
            Ok(session) => {
                req.extensions_mut().insert(CurrentUser {
                    user_id: session.user_id,
                    session_id: session.session_id,
                });
            }
            Err(e @ (AuthError::Database(_) | AuthError::Internal(_))) => {
                return e.into_response();
            }
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring invalid session cookie");
            }
        }
    }

    next.run(req).await
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .copied()
            .ok_or(AuthError::SessionInvalid)
    }
}

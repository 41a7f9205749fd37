//! HTTP Handlers

use axum::Json;
use axum::extract::{ConnectInfo, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use std::net::SocketAddr;
use std::sync::Arc;

use kernel::extract::JsonOrForm;
use platform::client::ClientFingerprint;
use platform::cookie::extract_cookie;

use crate::application::config::AuthConfig;
use crate::application::{
    CheckSessionUseCase, CurrentUserUseCase, SignInInput, SignInUseCase, SignOutUseCase,
    SignUpInput, SignUpUseCase,
};
use crate::domain::repository::{AuthSessionRepository, UserRepository};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    EmptyResponse, LoginRequest, MessageResponse, SignUpRequest, UserResponse,
};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Sign Up
// ============================================================================

/// POST /users
///
/// Accepts a JSON or form-encoded body.
pub async fn sign_up<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    JsonOrForm(req): JsonOrForm<SignUpRequest>,
) -> AuthResult<Response>
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let fingerprint = ClientFingerprint::from_headers(&headers, Some(addr.ip()));

    let use_case = SignUpUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());
    let output = use_case
        .execute(
            SignUpInput {
                name: req.name,
                email: req.email,
                password: req.password,
            },
            &fingerprint,
        )
        .await?;

    let cookie = state.config.session_cookie(&output.session_token);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(UserResponse::from(&output.user)),
    )
        .into_response())
}

// ============================================================================
// Login
// ============================================================================

/// POST /users/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    JsonOrForm(req): JsonOrForm<LoginRequest>,
) -> AuthResult<Response>
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let fingerprint = ClientFingerprint::from_headers(&headers, Some(addr.ip()));

    let use_case = SignInUseCase::new(state.repo.clone(), state.repo.clone(), state.config.clone());
    let output = use_case
        .execute(
            SignInInput {
                email: req.email,
                password: req.password,
            },
            &fingerprint,
        )
        .await?;

    let cookie = state.config.session_cookie(&output.session_token);

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Json(UserResponse::from(&output.user)),
    )
        .into_response())
}

// ============================================================================
// Logout
// ============================================================================

/// POST /users/logout
///
/// Always succeeds; an unknown or forged cookie is simply cleared.
pub async fn logout<R>(State(state): State<AuthAppState<R>>, headers: HeaderMap) -> Response
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    if let Some(token) = extract_cookie(&headers, &state.config.session_cookie_name) {
        let use_case = SignOutUseCase::new(state.repo.clone(), state.config.clone());
        if let Err(e) = use_case.execute(&token).await {
            tracing::debug!(error = %e, "Logout without a valid session");
        }
    }

    (
        StatusCode::OK,
        [(header::SET_COOKIE, state.config.clear_cookie())],
        Json(EmptyResponse::default()),
    )
        .into_response()
}

// ============================================================================
// Current User
// ============================================================================

/// GET /users/me
pub async fn me<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> AuthResult<Response>
where
    R: UserRepository + AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let not_logged_in = || Json(MessageResponse::not_logged_in()).into_response();

    let fingerprint = ClientFingerprint::from_headers(&headers, Some(addr.ip()));
    let Some(token) = extract_cookie(&headers, &state.config.session_cookie_name) else {
        return Ok(not_logged_in());
    };

    let check = CheckSessionUseCase::new(state.repo.clone(), state.config.clone());
    let session = match check.get_session(&token, &fingerprint.hash).await {
        Ok(session) => session,
        Err(e @ (AuthError::Database(_) | AuthError::Internal(_))) => return Err(e),
        Err(e) => {
            tracing::debug!(error = %e, "Session check failed");
            return Ok(not_logged_in());
        }
    };

    let user = CurrentUserUseCase::new(state.repo.clone())
        .execute(session.user_id)
        .await?;

    Ok(Json(UserResponse::from(&user)).into_response())
}

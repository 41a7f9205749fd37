//! Auth Error Types
//!
//! Auth-specific variants that render through `kernel::error::AppError`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Session points at a user row that no longer exists
    #[error("no user with that id")]
    UserNotFound,

    #[error("A user with that email already exists")]
    EmailTaken,

    /// Unknown email or wrong password; the two are not distinguished
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Session not found or expired")]
    SessionInvalid,

    #[error("Session fingerprint mismatch")]
    SessionFingerprintMismatch,

    /// Rejected input (name, email or password policy)
    #[error("{0}")]
    Validation(AppError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::EmailTaken => StatusCode::CONFLICT,
            AuthError::InvalidCredentials
            | AuthError::SessionInvalid
            | AuthError::SessionFingerprintMismatch => StatusCode::UNAUTHORIZED,
            AuthError::Validation(err) => {
                StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::BAD_REQUEST)
            }
            AuthError::Database(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::EmailTaken => ErrorKind::Conflict,
            AuthError::InvalidCredentials
            | AuthError::SessionInvalid
            | AuthError::SessionFingerprintMismatch => ErrorKind::Unauthorized,
            AuthError::Validation(err) => err.kind(),
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to the wire-level `AppError`
    ///
    /// Server-side details (SQL errors, internal messages) are not exposed.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Validation(err) => {
                let app = AppError::new(err.kind(), err.message().to_string());
                match err.action() {
                    Some(action) => app.with_action(action.to_string()),
                    None => app,
                }
            }
            AuthError::InvalidCredentials => AppError::unauthorized(self.to_string())
                .with_action("Check your email and password"),
            AuthError::SessionInvalid | AuthError::SessionFingerprintMismatch => {
                AppError::unauthorized("Not logged in").with_action("Please log in")
            }
            AuthError::Database(_) | AuthError::Internal(_) => {
                AppError::internal("An internal error occurred")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::SessionFingerprintMismatch => {
                tracing::warn!("Session fingerprint mismatch detected");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        if err.is_server_error() {
            AuthError::Internal(err.to_string())
        } else {
            AuthError::Validation(err)
        }
    }
}

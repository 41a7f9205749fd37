//! Booking Error Types
//!
//! Booking-specific variants that render through `kernel::error::AppError`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

pub type BookingResult<T> = Result<T, BookingError>;

#[derive(Debug, Error)]
pub enum BookingError {
    /// Session user was deleted before the listing was inserted
    #[error("no user with that id")]
    OwnerNotFound,

    /// Rejected listing or query input
    #[error("{0}")]
    Validation(AppError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl BookingError {
    /// Pool exhaustion or a lost connection
    fn is_unavailable(&self) -> bool {
        matches!(
            self,
            BookingError::Database(
                sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_)
            )
        )
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            _ if self.is_unavailable() => StatusCode::SERVICE_UNAVAILABLE,
            BookingError::OwnerNotFound => StatusCode::NOT_FOUND,
            BookingError::Validation(err) => {
                StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::BAD_REQUEST)
            }
            BookingError::Database(_) | BookingError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            _ if self.is_unavailable() => ErrorKind::ServiceUnavailable,
            BookingError::OwnerNotFound => ErrorKind::NotFound,
            BookingError::Validation(err) => err.kind(),
            BookingError::Database(_) | BookingError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            BookingError::Validation(err) => {
                let app = AppError::new(err.kind(), err.message().to_string());
                match err.action() {
                    Some(action) => app.with_action(action.to_string()),
                    None => app,
                }
            }
            _ if self.is_unavailable() => AppError::service_unavailable("Database unavailable")
                .with_action("Please try again later"),
            BookingError::Database(_) | BookingError::Internal(_) => {
                AppError::internal("An internal error occurred")
            }
            BookingError::OwnerNotFound => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            BookingError::Database(e) => {
                tracing::error!(error = %e, "Booking database error");
            }
            BookingError::Internal(msg) => {
                tracing::error!(message = %msg, "Booking internal error");
            }
            BookingError::OwnerNotFound => {
                tracing::warn!("Property insert for a missing owner");
            }
            BookingError::Validation(err) => {
                tracing::debug!(error = %err, "Booking validation error");
            }
        }
    }
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for BookingError {
    fn from(err: AppError) -> Self {
        if err.is_server_error() {
            BookingError::Internal(err.to_string())
        } else {
            BookingError::Validation(err)
        }
    }
}

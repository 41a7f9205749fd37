//! Booking Router
//!
//! Mounted at `/api`. Every route runs behind `check_auth_session`; the
//! handlers that need a user take `CurrentUser`.

use axum::{Router, middleware, routing::get};
use std::sync::Arc;

use auth::domain::repository::AuthSessionRepository;
use auth::{AuthMiddlewareState, PgAuthRepository, check_auth_session};

use crate::application::config::BookingConfig;
use crate::domain::repository::{PropertyRepository, ReservationRepository};
use crate::infra::postgres::PgBookingRepository;
use crate::presentation::handlers::{self, BookingAppState};

/// Create the Booking router with PostgreSQL repositories
pub fn booking_router(
    repo: PgBookingRepository,
    config: BookingConfig,
    auth: AuthMiddlewareState<PgAuthRepository>,
) -> Router {
    booking_router_generic(repo, config, auth)
}

/// Create a generic Booking router for any repository implementation
pub fn booking_router_generic<R, S>(
    repo: R,
    config: BookingConfig,
    auth: AuthMiddlewareState<S>,
) -> Router
where
    R: PropertyRepository + ReservationRepository + Clone + Send + Sync + 'static,
    S: AuthSessionRepository + Clone + Send + Sync + 'static,
{
    let state = BookingAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route(
            "/properties",
            get(handlers::search_properties::<R>).post(handlers::create_property::<R>),
        )
        .route("/reservations", get(handlers::list_reservations::<R>))
        .with_state(state)
        .layer(middleware::from_fn_with_state(auth, check_auth_session::<S>))
}

//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use std::sync::Arc;

use auth::CurrentUser;
use kernel::extract::{JsonOrForm, QueryParams};

use crate::application::config::BookingConfig;
use crate::application::{CreatePropertyUseCase, ListReservationsUseCase, SearchPropertiesUseCase};
use crate::domain::entity::Property;
use crate::domain::repository::{PropertyRepository, ReservationRepository};
use crate::error::BookingResult;
use crate::presentation::dto::{
    CreatePropertyRequest, PropertiesResponse, PropertySearchParams, PropertyView,
    ReservationParams, ReservationView, ReservationsResponse,
};

/// Shared state for booking handlers
#[derive(Clone)]
pub struct BookingAppState<R>
where
    R: PropertyRepository + ReservationRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<BookingConfig>,
}

/// GET /api/properties
pub async fn search_properties<R>(
    State(state): State<BookingAppState<R>>,
    QueryParams(params): QueryParams<PropertySearchParams>,
) -> BookingResult<Json<PropertiesResponse>>
where
    R: PropertyRepository + ReservationRepository + Clone + Send + Sync + 'static,
{
    let search = params.into_search()?;

    let properties = SearchPropertiesUseCase::new(state.repo.clone(), state.config.clone())
        .execute(search)
        .await?;

    Ok(Json(PropertiesResponse {
        properties: properties.into_iter().map(PropertyView::from).collect(),
    }))
}

/// POST /api/properties
pub async fn create_property<R>(
    State(state): State<BookingAppState<R>>,
    user: CurrentUser,
    JsonOrForm(req): JsonOrForm<CreatePropertyRequest>,
) -> BookingResult<Json<Property>>
where
    R: PropertyRepository + ReservationRepository + Clone + Send + Sync + 'static,
{
    let property = CreatePropertyUseCase::new(state.repo.clone())
        .execute(req.into_new_property(user.user_id))
        .await?;

    Ok(Json(property))
}

/// GET /api/reservations
pub async fn list_reservations<R>(
    State(state): State<BookingAppState<R>>,
    user: CurrentUser,
    QueryParams(params): QueryParams<ReservationParams>,
) -> BookingResult<Json<ReservationsResponse>>
where
    R: PropertyRepository + ReservationRepository + Clone + Send + Sync + 'static,
{
    let reservations = ListReservationsUseCase::new(state.repo.clone(), state.config.clone())
        .execute(user.user_id, params.limit()?)
        .await?;

    Ok(Json(ReservationsResponse {
        reservations: reservations.into_iter().map(ReservationView::from).collect(),
    }))
}

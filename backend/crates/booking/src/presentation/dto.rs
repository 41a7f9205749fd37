//! API DTOs (Data Transfer Objects)
//!
//! Query strings arrive from HTML forms, so every filter is read as text and
//! a blank value means "no filter".

use std::str::FromStr;

use chrono::NaiveDate;
use kernel::error::app_error::{AppError, AppResult};
use kernel::id::{ReservationId, UserId};
use serde::{Deserialize, Serialize};

use crate::domain::entity::{GuestReservation, NewProperty, Property, RatedProperty};
use crate::domain::search::PropertySearch;

/// Parse an optional query value; blank counts as absent
fn parse_param<T: FromStr>(name: &str, value: Option<&str>) -> AppResult<Option<T>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(raw) => raw.parse().map(Some).map_err(|_| {
            AppError::bad_request(format!("{name} must be a number (got {raw:?})"))
        }),
    }
}

// ============================================================================
// Requests
// ============================================================================

/// GET /api/properties
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PropertySearchParams {
    pub city: Option<String>,
    pub owner_id: Option<String>,
    pub minimum_price_per_night: Option<String>,
    pub maximum_price_per_night: Option<String>,
    pub minimum_rating: Option<String>,
    pub limit: Option<String>,
}

impl PropertySearchParams {
    pub fn into_search(self) -> AppResult<PropertySearch> {
        Ok(PropertySearch {
            owner_id: parse_param::<UserId>("owner_id", self.owner_id.as_deref())?,
            minimum_price_per_night: parse_param(
                "minimum_price_per_night",
                self.minimum_price_per_night.as_deref(),
            )?,
            maximum_price_per_night: parse_param(
                "maximum_price_per_night",
                self.maximum_price_per_night.as_deref(),
            )?,
            minimum_rating: parse_param("minimum_rating", self.minimum_rating.as_deref())?,
            limit: parse_param("limit", self.limit.as_deref())?,
            city: self.city,
        })
    }
}

/// GET /api/reservations
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReservationParams {
    pub limit: Option<String>,
}

impl ReservationParams {
    pub fn limit(&self) -> AppResult<Option<i64>> {
        parse_param("limit", self.limit.as_deref())
    }
}

/// POST /api/properties
///
/// Any `owner_id` in the body is ignored; the owner is the session user.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePropertyRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,
    /// Cents
    pub cost_per_night: i32,
    #[serde(default)]
    pub parking_spaces: i32,
    #[serde(default)]
    pub number_of_bathrooms: i32,
    #[serde(default)]
    pub number_of_bedrooms: i32,
    pub country: String,
    pub street: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
}

impl CreatePropertyRequest {
    pub fn into_new_property(self, owner_id: UserId) -> NewProperty {
        NewProperty {
            owner_id,
            title: self.title,
            description: self.description,
            thumbnail_photo_url: self.thumbnail_photo_url,
            cover_photo_url: self.cover_photo_url,
            cost_per_night: self.cost_per_night,
            parking_spaces: self.parking_spaces,
            number_of_bathrooms: self.number_of_bathrooms,
            number_of_bedrooms: self.number_of_bedrooms,
            country: self.country,
            street: self.street,
            city: self.city,
            province: self.province,
            post_code: self.post_code,
        }
    }
}

// ============================================================================
// Responses
// ============================================================================

/// A property row plus `average_rating`
#[derive(Debug, Clone, Serialize)]
pub struct PropertyView {
    #[serde(flatten)]
    pub property: Property,
    pub average_rating: Option<f64>,
}

impl From<RatedProperty> for PropertyView {
    fn from(rated: RatedProperty) -> Self {
        Self {
            property: rated.property,
            average_rating: rated.average_rating,
        }
    }
}

/// `{"properties": [...]}`
#[derive(Debug, Clone, Serialize)]
pub struct PropertiesResponse {
    pub properties: Vec<PropertyView>,
}

/// A booked property with the reservation's dates
///
/// Flattened so the listing renderer can reuse the property fields as-is.
#[derive(Debug, Clone, Serialize)]
pub struct ReservationView {
    pub reservation_id: ReservationId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(flatten)]
    pub property: PropertyView,
}

impl From<GuestReservation> for ReservationView {
    fn from(booked: GuestReservation) -> Self {
        Self {
            reservation_id: booked.reservation.id,
            start_date: booked.reservation.start_date,
            end_date: booked.reservation.end_date,
            property: PropertyView::from(booked.property),
        }
    }
}

/// `{"reservations": [...]}`
#[derive(Debug, Clone, Serialize)]
pub struct ReservationsResponse {
    pub reservations: Vec<ReservationView>,
}

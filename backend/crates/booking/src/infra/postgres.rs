//! PostgreSQL Repository Implementations

use chrono::NaiveDate;
use kernel::id::{PropertyId, ReservationId, UserId};
use sqlx::PgPool;

use crate::domain::entity::{GuestReservation, NewProperty, Property, RatedProperty, Reservation};
use crate::domain::repository::{PropertyRepository, ReservationRepository};
use crate::domain::search::{PropertySearch, SearchParam};
use crate::error::{BookingError, BookingResult};

/// PostgreSQL-backed booking repository
#[derive(Clone)]
pub struct PgBookingRepository {
    pool: PgPool,
}

impl PgBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Property Repository Implementation
// ============================================================================

impl PropertyRepository for PgBookingRepository {
    async fn search_properties(
        &self,
        search: &PropertySearch,
    ) -> BookingResult<Vec<RatedProperty>> {
        let query = search.to_query();
        tracing::debug!(sql = %query.sql, params = ?query.params, "Property search query");

        let mut q = sqlx::query_as::<_, RatedPropertyRow>(&query.sql);
        for param in &query.params {
            q = match param {
                SearchParam::Text(value) => q.bind(value.clone()),
                SearchParam::Int(value) => q.bind(*value),
                SearchParam::Float(value) => q.bind(*value),
                SearchParam::BigInt(value) => q.bind(*value),
            };
        }

        let rows = q.fetch_all(&self.pool).await?;

        Ok(rows.into_iter().map(RatedPropertyRow::into_rated).collect())
    }

    async fn insert_property(&self, property: &NewProperty) -> BookingResult<Property> {
        let result = sqlx::query_as::<_, PropertyRow>(
            r#"
            INSERT INTO properties (
                owner_id,
                title,
                description,
                thumbnail_photo_url,
                cover_photo_url,
                cost_per_night,
                street,
                city,
                province,
                post_code,
                country,
                parking_spaces,
                number_of_bathrooms,
                number_of_bedrooms
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING *
            "#,
        )
        .bind(property.owner_id)
        .bind(&property.title)
        .bind(&property.description)
        .bind(&property.thumbnail_photo_url)
        .bind(&property.cover_photo_url)
        .bind(property.cost_per_night)
        .bind(&property.street)
        .bind(&property.city)
        .bind(&property.province)
        .bind(&property.post_code)
        .bind(&property.country)
        .bind(property.parking_spaces)
        .bind(property.number_of_bathrooms)
        .bind(property.number_of_bedrooms)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => Ok(row.into_property()),
            Err(sqlx::Error::Database(db)) if db.is_foreign_key_violation() => {
                Err(BookingError::OwnerNotFound)
            }
            Err(e) => Err(e.into()),
        }
    }
}

// ============================================================================
// Reservation Repository Implementation
// ============================================================================

impl ReservationRepository for PgBookingRepository {
    async fn find_guest_reservations(
        &self,
        guest_id: UserId,
        limit: i64,
    ) -> BookingResult<Vec<GuestReservation>> {
        let rows = sqlx::query_as::<_, GuestReservationRow>(
            r#"
            SELECT
                reservations.id AS reservation_id,
                reservations.guest_id,
                reservations.start_date,
                reservations.end_date,
                properties.*,
                avg(property_reviews.rating)::float8 AS average_rating
            FROM reservations
            JOIN properties ON reservations.property_id = properties.id
            LEFT OUTER JOIN property_reviews ON properties.id = property_reviews.property_id
            WHERE reservations.guest_id = $1
            GROUP BY properties.id, reservations.id
            ORDER BY reservations.start_date
            LIMIT $2
            "#,
        )
        .bind(guest_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(GuestReservationRow::into_guest_reservation)
            .collect())
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct PropertyRow {
    id: PropertyId,
    owner_id: UserId,
    title: String,
    description: Option<String>,
    thumbnail_photo_url: String,
    cover_photo_url: String,
    cost_per_night: i32,
    parking_spaces: i32,
    number_of_bathrooms: i32,
    number_of_bedrooms: i32,
    country: String,
    street: String,
    city: String,
    province: String,
    post_code: String,
    active: bool,
}

impl PropertyRow {
    fn into_property(self) -> Property {
        Property {
            id: self.id,
            owner_id: self.owner_id,
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
            active: self.active,
        }
    }
}

#[derive(sqlx::FromRow)]
struct RatedPropertyRow {
    #[sqlx(flatten)]
    property: PropertyRow,
    average_rating: Option<f64>,
}

impl RatedPropertyRow {
    fn into_rated(self) -> RatedProperty {
        RatedProperty {
            property: self.property.into_property(),
            average_rating: self.average_rating,
        }
    }
}

#[derive(sqlx::FromRow)]
struct GuestReservationRow {
    reservation_id: ReservationId,
    guest_id: UserId,
    start_date: NaiveDate,
    end_date: NaiveDate,
    #[sqlx(flatten)]
    property: RatedPropertyRow,
}

impl GuestReservationRow {
    fn into_guest_reservation(self) -> GuestReservation {
        let property = self.property.into_rated();
        GuestReservation {
            reservation: Reservation {
                id: self.reservation_id,
                property_id: property.property.id,
                guest_id: self.guest_id,
                start_date: self.start_date,
                end_date: self.end_date,
            },
            property,
        }
    }
}

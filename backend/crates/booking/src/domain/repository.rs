//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::UserId;

use crate::domain::entity::{GuestReservation, NewProperty, Property, RatedProperty};
use crate::domain::search::PropertySearch;
use crate::error::BookingResult;

#[trait_variant::make(PropertyRepository: Send)]
pub trait LocalPropertyRepository {
    /// Properties matching `search`, cheapest first
    async fn search_properties(
        &self,
        search: &PropertySearch,
    ) -> BookingResult<Vec<RatedProperty>>;

    /// Insert a listing and return the stored row
    ///
    /// An owner that does not exist fails with `BookingError::OwnerNotFound`.
    async fn insert_property(&self, property: &NewProperty) -> BookingResult<Property>;
}

#[trait_variant::make(ReservationRepository: Send)]
pub trait LocalReservationRepository {
    /// Reservations booked by `guest_id`, earliest start date first
    async fn find_guest_reservations(
        &self,
        guest_id: UserId,
        limit: i64,
    ) -> BookingResult<Vec<GuestReservation>>;
}

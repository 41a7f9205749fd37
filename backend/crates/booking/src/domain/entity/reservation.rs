//! Reservation Entity

use chrono::NaiveDate;
use kernel::id::{PropertyId, ReservationId, UserId};
use serde::Serialize;

use super::property::RatedProperty;

/// A row of the `reservations` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reservation {
    pub id: ReservationId,
    pub property_id: PropertyId,
    pub guest_id: UserId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// One of a guest's reservations, joined with the booked property
#[derive(Debug, Clone, PartialEq)]
pub struct GuestReservation {
    pub reservation: Reservation,
    pub property: RatedProperty,
}

//! Entity Module

pub mod property;
pub mod reservation;

pub use property::{NewProperty, Property, RatedProperty};
pub use reservation::{GuestReservation, Reservation};

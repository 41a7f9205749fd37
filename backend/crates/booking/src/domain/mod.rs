//! Domain Layer
//!
//! Contains entities, the property search builder, and repository traits.

pub mod entity;
pub mod repository;
pub mod search;

pub use entity::{GuestReservation, NewProperty, Property, RatedProperty, Reservation};
pub use repository::{PropertyRepository, ReservationRepository};
pub use search::{PropertySearch, SearchParam, SearchQuery};

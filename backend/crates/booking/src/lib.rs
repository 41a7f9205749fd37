//! Booking Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, property search builder, repository traits
//! - `application/` - Use cases and configuration
//! - `infra/` - PostgreSQL implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Property search with optional city, owner, price and rating filters
//! - Listing a new property as the logged-in user
//! - The logged-in user's reservations with property ratings

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

pub use application::config::BookingConfig;
pub use error::{BookingError, BookingResult};
pub use infra::postgres::PgBookingRepository;
pub use presentation::router::{booking_router, booking_router_generic};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::search::*;
    pub use crate::presentation::dto::*;
}

//! Application Layer
//!
//! Use cases and configuration.

pub mod config;
pub mod create_property;
pub mod list_reservations;
pub mod search_properties;

pub use config::BookingConfig;
pub use create_property::CreatePropertyUseCase;
pub use list_reservations::ListReservationsUseCase;
pub use search_properties::SearchPropertiesUseCase;

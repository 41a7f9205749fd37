//! Application Configuration
//!
//! Configuration for the Booking application layer.

use crate::domain::search::{DEFAULT_LIMIT, MAX_LIMIT};

#[derive(Debug, Clone)]
pub struct BookingConfig {
    /// Page size when a request gives none
    pub default_limit: i64,
    /// Largest page a request may ask for
    pub max_limit: i64,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            max_limit: MAX_LIMIT,
        }
    }
}

impl BookingConfig {
    pub fn limit(&self, requested: Option<i64>) -> i64 {
        crate::domain::search::clamp_limit(requested, self.default_limit, self.max_limit)
    }
}

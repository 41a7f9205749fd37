//! Search Properties Use Case

use std::sync::Arc;

use crate::application::config::BookingConfig;
use crate::domain::entity::RatedProperty;
use crate::domain::repository::PropertyRepository;
use crate::domain::search::PropertySearch;
use crate::error::{BookingError, BookingResult};
use kernel::error::app_error::AppError;

pub struct SearchPropertiesUseCase<P>
where
    P: PropertyRepository,
{
    property_repo: Arc<P>,
    config: Arc<BookingConfig>,
}

impl<P> SearchPropertiesUseCase<P>
where
    P: PropertyRepository,
{
    pub fn new(property_repo: Arc<P>, config: Arc<BookingConfig>) -> Self {
        Self {
            property_repo,
            config,
        }
    }

    /// Run `search` with its limit clamped to the configured bounds
    ///
    /// An inverted price range is not an error; it simply matches nothing.
    pub async fn execute(&self, mut search: PropertySearch) -> BookingResult<Vec<RatedProperty>> {
        if search.minimum_rating.is_some_and(|rating| !rating.is_finite()) {
            return Err(BookingError::from(AppError::bad_request(
                "minimum_rating must be a number",
            )));
        }

        search.limit = Some(self.config.limit(search.limit));

        let properties = self.property_repo.search_properties(&search).await?;

        tracing::debug!(
            results = properties.len(),
            city = ?search.city_filter(),
            "Property search"
        );

        Ok(properties)
    }
}

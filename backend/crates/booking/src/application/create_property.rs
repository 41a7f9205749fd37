//! Create Property Use Case
//!
//! Lists a new property owned by the logged-in user.

use std::sync::Arc;

use crate::domain::entity::{NewProperty, Property};
use crate::domain::repository::PropertyRepository;
use crate::error::BookingResult;

pub struct CreatePropertyUseCase<P>
where
    P: PropertyRepository,
{
    property_repo: Arc<P>,
}

impl<P> CreatePropertyUseCase<P>
where
    P: PropertyRepository,
{
    pub fn new(property_repo: Arc<P>) -> Self {
        Self { property_repo }
    }

    /// `draft.owner_id` must already be the session user
    pub async fn execute(&self, draft: NewProperty) -> BookingResult<Property> {
        let new_property = draft.validated()?;
        let property = self.property_repo.insert_property(&new_property).await?;

        tracing::info!(
            property_id = %property.id,
            owner_id = %property.owner_id,
            "Property created"
        );

        Ok(property)
    }
}

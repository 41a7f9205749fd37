//! Property Entity
//!
//! A row of the `properties` table. `cost_per_night` is stored in cents.

use kernel::error::app_error::{AppError, AppResult};
use kernel::id::{PropertyId, UserId};
use serde::Serialize;

/// Upper bound of the `VARCHAR(255)` columns
pub const MAX_TEXT_LEN: usize = 255;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    pub id: PropertyId,
    pub owner_id: UserId,
    pub title: String,
    pub description: Option<String>,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,
    pub cost_per_night: i32,
    pub parking_spaces: i32,
    pub number_of_bathrooms: i32,
    pub number_of_bedrooms: i32,
    pub country: String,
    pub street: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
    pub active: bool,
}

/// A property together with the average of its review ratings
///
/// `average_rating` is `None` for a property nobody has reviewed yet.
#[derive(Debug, Clone, PartialEq)]
pub struct RatedProperty {
    pub property: Property,
    pub average_rating: Option<f64>,
}

/// Listing data for `INSERT INTO properties`
#[derive(Debug, Clone, PartialEq)]
pub struct NewProperty {
    pub owner_id: UserId,
    pub title: String,
    pub description: Option<String>,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,
    pub cost_per_night: i32,
    pub parking_spaces: i32,
    pub number_of_bathrooms: i32,
    pub number_of_bedrooms: i32,
    pub country: String,
    pub street: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
}

impl NewProperty {
    /// Trim text fields and check them against the column constraints
    pub fn validated(mut self) -> AppResult<Self> {
        self.title = self.title.trim().to_string();
        if self.title.is_empty() {
            return Err(AppError::bad_request("Title cannot be empty")
                .with_action("Please give the property a title"));
        }

        self.description = self
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        for (field, value) in [
            ("title", &mut self.title),
            ("thumbnail_photo_url", &mut self.thumbnail_photo_url),
            ("cover_photo_url", &mut self.cover_photo_url),
            ("country", &mut self.country),
            ("street", &mut self.street),
            ("city", &mut self.city),
            ("province", &mut self.province),
            ("post_code", &mut self.post_code),
        ] {
            *value = value.trim().to_string();
            if value.chars().count() > MAX_TEXT_LEN {
                return Err(AppError::bad_request(format!(
                    "{field} must be at most {MAX_TEXT_LEN} characters"
                )));
            }
        }

        for (field, value) in [
            ("cost_per_night", self.cost_per_night),
            ("parking_spaces", self.parking_spaces),
            ("number_of_bathrooms", self.number_of_bathrooms),
            ("number_of_bedrooms", self.number_of_bedrooms),
        ] {
            if value < 0 {
                return Err(AppError::bad_request(format!("{field} cannot be negative")));
            }
        }

        Ok(self)
    }

    /// Attach the id assigned by the insert
    pub fn with_id(self, id: PropertyId) -> Property {
        Property {
            id,
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
            active: true,
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_new_property(owner_id: UserId) -> NewProperty {
    NewProperty {
        owner_id,
        title: "Speed lamp".to_string(),
        description: Some("description".to_string()),
        thumbnail_photo_url: "https://images.example.com/thumb.jpg".to_string(),
        cover_photo_url: "https://images.example.com/cover.jpg".to_string(),
        cost_per_night: 93061,
        parking_spaces: 6,
        number_of_bathrooms: 4,
        number_of_bedrooms: 8,
        country: "Canada".to_string(),
        street: "536 Namsub Highway".to_string(),
        city: "Sotboske".to_string(),
        province: "Quebec".to_string(),
        post_code: "28142".to_string(),
    }
}

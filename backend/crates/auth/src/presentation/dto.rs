//! API DTOs (Data Transfer Objects)
//!
//! Field names follow the LightBnB JSON shapes (`snake_case`, `{"user": ...}`).

use kernel::id::UserId;
use serde::{Deserialize, Serialize};

use crate::domain::entity::User;

// ============================================================================
// Requests
// ============================================================================

/// POST /users
#[derive(Debug, Clone, Deserialize)]
pub struct SignUpRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// POST /users/login
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// ============================================================================
// Responses
// ============================================================================

/// Public view of a user; never carries the password hash
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserView {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.as_str().to_string(),
            email: user.email.as_str().to_string(),
        }
    }
}

/// `{"user": {...}}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub user: UserView,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            user: UserView::from(user),
        }
    }
}

/// `{"message": "not logged in"}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn not_logged_in() -> Self {
        Self {
            message: "not logged in".to_string(),
        }
    }
}

/// `{}`
#[derive(Debug, Clone, Default, Serialize)]
pub struct EmptyResponse {}

//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases and configuration
//! - `infra/` - PostgreSQL implementations
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - Sign up, login and logout with email + password
//! - Server-side sessions (`user_sessions`) behind an HMAC-signed cookie
//! - `check_auth_session` middleware and `CurrentUser` extractor for other
//!   crates' protected routes
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, optional pepper
//! - Sessions bound to a client fingerprint (User-Agent)
//! - Login failures do not reveal whether the email exists

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgAuthRepository;
pub use presentation::middleware::{AuthMiddlewareState, CurrentUser, check_auth_session};
pub use presentation::router::{auth_router, auth_router_generic};

pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

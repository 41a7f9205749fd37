//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations with no LightBnB vocabulary:
//! - Environment configuration helpers
//! - Cryptographic utilities (SHA-256, HMAC, Base64)
//! - Password hashing (Argon2id)
//! - Cookie building and parsing
//! - Client fingerprinting for session binding

pub mod client;
pub mod config;
pub mod cookie;
pub mod crypto;
pub mod password;

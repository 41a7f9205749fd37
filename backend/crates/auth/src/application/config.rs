//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::cookie::CookieConfig;
use platform::password::PasswordPolicy;

pub use platform::cookie::SameSite;

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub session_cookie_name: String,
    /// HMAC key for session tokens
    pub session_secret: [u8; 32],
    pub session_ttl: Duration,
    pub cookie_secure: bool,
    pub cookie_same_site: SameSite,
    /// Application-wide secret appended before hashing
    pub password_pepper: Option<Vec<u8>>,
    /// Rules for passwords chosen at sign-up
    pub password_policy: PasswordPolicy,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "session".to_string(),
            session_secret: [0u8; 32],
            session_ttl: Duration::from_secs(24 * 3600),
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            password_pepper: None,
            password_policy: PasswordPolicy::default(),
        }
    }
}

impl AuthConfig {
    pub fn with_random_secret() -> Self {
        Self {
            session_secret: platform::crypto::random_key(),
            ..Default::default()
        }
    }

    /// Random secret and a cookie that also works over plain HTTP
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    pub fn session_ttl_ms(&self) -> i64 {
        self.session_ttl.as_millis() as i64
    }

    pub fn session_ttl_chrono(&self) -> chrono::Duration {
        chrono::Duration::milliseconds(self.session_ttl_ms())
    }

    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    pub fn cookie(&self) -> CookieConfig {
        CookieConfig {
            name: self.session_cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
        }
    }

    /// `Set-Cookie` value for a freshly issued session token
    pub fn session_cookie(&self, token: &str) -> String {
        self.cookie().build_set_cookie(token, self.session_ttl.as_secs())
    }

    pub fn clear_cookie(&self) -> String {
        self.cookie().build_delete_cookie()
    }
}

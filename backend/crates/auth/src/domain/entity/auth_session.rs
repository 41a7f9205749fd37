//! Auth Session Entity
//!
//! Server-side session row (`user_sessions`). The cookie only carries the
//! signed session id.

use chrono::{DateTime, Duration, Utc};
use kernel::id::UserId;
use platform::client::ClientFingerprint;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct AuthSession {
    pub session_id: Uuid,
    pub user_id: UserId,
    /// Unix timestamp (ms)
    pub expires_at_ms: i64,
    /// SHA-256 of the User-Agent that opened the session
    pub client_fingerprint_hash: Vec<u8>,
    pub client_ip: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_activity_at: DateTime<Utc>,
}

impl AuthSession {
    pub fn new(user_id: UserId, fingerprint: &ClientFingerprint, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            session_id: Uuid::new_v4(),
            user_id,
            expires_at_ms: (now + ttl).timestamp_millis(),
            client_fingerprint_hash: fingerprint.hash_vec(),
            client_ip: fingerprint.ip_string(),
            user_agent: fingerprint.user_agent.clone(),
            created_at: now,
            last_activity_at: now,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() > self.expires_at_ms
    }

    pub fn touch(&mut self) {
        self.last_activity_at = Utc::now();
    }

    pub fn remaining_ms(&self) -> i64 {
        (self.expires_at_ms - Utc::now().timestamp_millis()).max(0)
    }

    /// Sliding expiration: push the deadline to `now + ttl` once less than
    /// half of `ttl` remains. Returns whether the deadline moved.
    pub fn extend_if_needed(&mut self, ttl: Duration) -> bool {
        let now = Utc::now();
        if self.expires_at_ms >= (now + ttl / 2).timestamp_millis() {
            return false;
        }
        self.expires_at_ms = (now + ttl).timestamp_millis();
        true
    }
}

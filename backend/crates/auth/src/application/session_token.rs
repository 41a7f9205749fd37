//! Session Token
//!
//! Cookie value format: `<session uuid>.<base64url(HMAC-SHA256(secret, uuid))>`.

use platform::crypto::{from_base64_url, hmac_sha256, to_base64_url, verify_hmac_sha256};
use uuid::Uuid;

use crate::error::{AuthError, AuthResult};

pub fn sign_session_token(secret: &[u8; 32], session_id: Uuid) -> String {
    let id = session_id.to_string();
    let tag = hmac_sha256(secret, id.as_bytes());
    format!("{}.{}", id, to_base64_url(&tag))
}

/// Verify the signature and return the session id
pub fn parse_session_token(secret: &[u8; 32], token: &str) -> AuthResult<Uuid> {
    let (id, tag_b64) = token.split_once('.').ok_or(AuthError::SessionInvalid)?;
    let tag = from_base64_url(tag_b64).map_err(|_| AuthError::SessionInvalid)?;

    if !verify_hmac_sha256(secret, id.as_bytes(), &tag) {
        return Err(AuthError::SessionInvalid);
    }

    id.parse().map_err(|_| AuthError::SessionInvalid)
}

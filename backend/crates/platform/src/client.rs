//! Client identification utilities
//!
//! Sessions are bound to the client that opened them. The binding is a
//! SHA-256 of the User-Agent; the IP is recorded for the session row only,
//! since it legitimately changes on mobile networks.

use axum::http::{HeaderMap, header};
use std::net::IpAddr;

use crate::crypto::sha256;

/// Client fingerprint derived from request headers
#[derive(Debug, Clone)]
pub struct ClientFingerprint {
    /// SHA-256 hash of the User-Agent header
    pub hash: [u8; 32],
    /// Client IP address (from X-Forwarded-For or direct connection)
    pub ip: Option<IpAddr>,
    pub user_agent: Option<String>,
}

impl ClientFingerprint {
    /// Build the fingerprint of a request
    pub fn from_headers(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> Self {
        extract_fingerprint(headers, extract_client_ip(headers, direct_ip))
    }

    pub fn hash_vec(&self) -> Vec<u8> {
        self.hash.to_vec()
    }

    pub fn ip_string(&self) -> Option<String> {
        self.ip.map(|ip| ip.to_string())
    }

    pub fn matches(&self, stored_hash: &[u8]) -> bool {
        self.hash.as_slice() == stored_hash
    }
}

/// Hash the User-Agent header of a request
///
/// A missing or blank User-Agent hashes as the empty string, so such a client
/// can still sign in but its session only matches other agent-less requests.
pub fn extract_fingerprint(headers: &HeaderMap, client_ip: Option<IpAddr>) -> ClientFingerprint {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty());

    ClientFingerprint {
        hash: sha256(user_agent.unwrap_or_default().as_bytes()),
        ip: client_ip,
        user_agent: user_agent.map(str::to_string),
    }
}

/// First X-Forwarded-For entry when present, otherwise the socket address
pub fn extract_client_ip(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> Option<IpAddr> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|xff| xff.split(',').next())
        .and_then(|first| first.trim().parse::<IpAddr>().ok())
        .or(direct_ip)
}

//! Client identification utilities
//!
//! Best-effort client address for audit fields. Nothing here is trusted for
//! access control.

use axum::http::HeaderMap;
use std::net::IpAddr;

/// Header set by reverse proxies in front of the service
pub const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// Extract the client address recorded with a submission
///
/// The `X-Forwarded-For` value is kept exactly as sent (it may list several
/// hops). Without it the direct connection IP is used, and without that an
/// empty string.
///
/// ## Arguments
/// * `headers` - HTTP request headers
/// * `direct_ip` - Socket peer address, if the server recorded one
pub fn extract_client_ip(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> String {
    if let Some(xff) = headers.get(X_FORWARDED_FOR).and_then(|v| v.to_str().ok()) {
        return xff.to_string();
    }
    direct_ip.map(|ip| ip.to_string()).unwrap_or_default()
}

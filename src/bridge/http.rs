//! HTTP handle construction for the bridge.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

use crate::error::BridgeError;

/// Build default headers for the bridge. `Authorization` is only set for a non-empty token.
pub fn bridge_headers(token: &str) -> Result<HeaderMap, BridgeError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if token.is_empty() {
        return Ok(headers);
    }
    let mut value = HeaderValue::from_str(&format!("Bearer {token}")).map_err(|_| {
        BridgeError::Configuration("bridge token contains invalid header characters".into())
    })?;
    value.set_sensitive(true);
    headers.insert(AUTHORIZATION, value);
    Ok(headers)
}

/// Build a reqwest client with the bridge headers and a fixed per-call timeout.
pub fn build_client(token: &str, timeout: Duration) -> Result<reqwest::Client, BridgeError> {
    reqwest::Client::builder()
        .default_headers(bridge_headers(token)?)
        .timeout(timeout)
        .build()
        .map_err(|e| BridgeError::Configuration(format!("failed to build HTTP client: {e}")))
}

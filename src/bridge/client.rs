//! HTTP client for the BrowserClaw bridge server.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use serde_json::{json, Map, Value};

use crate::config::AdapterConfig;
use crate::error::{BridgeError, Result};
use crate::util::json::to_pretty_verbatim;

use super::http::build_client;

/// Raw answer to a tool call: status and undecoded body, whatever the status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCallResponse {
    pub status: u16,
    pub body: String,
}

impl ToolCallResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decode a successful body, or surface the bridge's status and payload.
    pub fn into_value(self) -> Result<Value> {
        Ok(serde_json::from_str(&self.into_success_body()?)?)
    }

    /// Pretty-print a successful body with its literals untouched, or surface
    /// the bridge's status and payload.
    pub fn into_pretty_text(self) -> Result<String> {
        Ok(to_pretty_verbatim(&self.into_success_body()?)?)
    }

    fn into_success_body(self) -> Result<String> {
        if !self.is_success() {
            return Err(BridgeError::CallFailed {
                status: self.status,
                body: self.body,
            });
        }
        Ok(self.body)
    }
}

/// Async HTTP client for one bridge endpoint.
///
/// The underlying reqwest handle is created lazily, reused across calls, and
/// recreated after [`BridgeClient::close`]. Headers and timeout are fixed when
/// the handle is created.
pub struct BridgeClient {
    base_url: String,
    token: String,
    timeout: Duration,
    handle: Mutex<Option<reqwest::Client>>,
}

impl std::fmt::Debug for BridgeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgeClient")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("connected", &self.is_connected())
            .finish_non_exhaustive()
    }
}

impl BridgeClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>, timeout: Duration) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
            timeout,
            handle: Mutex::new(None),
        }
    }

    pub fn from_config(config: &AdapterConfig) -> Self {
        Self::new(
            config.bridge_url.clone(),
            config.bridge_token.clone(),
            config.request_timeout(),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether a live handle is currently held.
    pub fn is_connected(&self) -> bool {
        self.handle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Acquire the live handle, creating it if none is held.
    ///
    /// The lock is held across the check and the creation so two callers
    /// cannot both observe an empty slot.
    fn handle(&self) -> Result<reqwest::Client> {
        let mut slot = self.handle.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(client) = slot.as_ref() {
            return Ok(client.clone());
        }
        let client = build_client(&self.token, self.timeout)?;
        tracing::debug!(url = %self.base_url, "created bridge HTTP handle");
        *slot = Some(client.clone());
        Ok(client)
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn get_json(&self, operation: &'static str, path: &str) -> Result<Value> {
        let url = self.url(path);
        let response = self
            .handle()?
            .get(&url)
            .send()
            .await
            .map_err(|e| BridgeError::unavailable(operation, &url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BridgeError::unavailable_status(operation, url, status.as_u16()));
        }

        response.json::<Value>().await.map_err(|e| {
            if e.is_decode() {
                BridgeError::transport(operation, &url, e)
            } else {
                BridgeError::unavailable(operation, &url, e)
            }
        })
    }

    /// `GET /health`.
    pub async fn health(&self) -> Result<Value> {
        let body = self.get_json("health", "health").await?;
        if !body.is_object() {
            return Err(BridgeError::malformed(
                "health",
                self.url("health"),
                "health response is not a JSON object",
            ));
        }
        Ok(body)
    }

    /// `GET /tools`, returning the raw tool objects in bridge order.
    pub async fn list_tools(&self) -> Result<Vec<Value>> {
        let body = self.get_json("list_tools", "tools").await?;
        let Value::Object(mut body) = body else {
            return Err(BridgeError::malformed(
                "list_tools",
                self.url("tools"),
                "tools response is not a JSON object",
            ));
        };

        match body.remove("tools") {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(tools)) => Ok(tools),
            Some(other) => Err(BridgeError::malformed(
                "list_tools",
                self.url("tools"),
                format!("`tools` must be an array, got {other}"),
            )),
        }
    }

    /// `POST /tool_call`. The response is returned regardless of its status.
    pub async fn call_tool(&self, name: &str, args: Map<String, Value>) -> Result<ToolCallResponse> {
        let url = self.url("tool_call");
        tracing::debug!(tool = name, url = %url, "forwarding tool call");

        let response = self
            .handle()?
            .post(&url)
            .json(&json!({ "tool": name, "args": args }))
            .send()
            .await
            .map_err(|e| BridgeError::transport("call_tool", &url, e))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| BridgeError::transport("call_tool", &url, e))?;

        Ok(ToolCallResponse { status, body })
    }

    /// Release the handle. Safe to call repeatedly.
    pub fn close(&self) {
        let previous = self
            .handle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if previous.is_some() {
            tracing::debug!(url = %self.base_url, "closed bridge HTTP handle");
        }
    }
}

//! List-tools and call-tool operations over the bridge.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::bridge::{BridgeClient, ToolCallResponse};
use crate::error::BridgeError;
use crate::util::cache::ToolCache;

use super::schema::{translate_tools, ToolDescriptor};

/// Bridge operations the adapter depends on.
#[async_trait]
pub trait BridgeOps: Send + Sync {
    async fn health(&self) -> Result<Value, BridgeError>;
    async fn list_tools(&self) -> Result<Vec<Value>, BridgeError>;
    async fn call_tool(
        &self,
        name: &str,
        args: Map<String, Value>,
    ) -> Result<ToolCallResponse, BridgeError>;
    fn target(&self) -> &str;
    fn close(&self);
}

#[async_trait]
impl BridgeOps for BridgeClient {
    async fn health(&self) -> Result<Value, BridgeError> {
        BridgeClient::health(self).await
    }

    async fn list_tools(&self) -> Result<Vec<Value>, BridgeError> {
        BridgeClient::list_tools(self).await
    }

    async fn call_tool(
        &self,
        name: &str,
        args: Map<String, Value>,
    ) -> Result<ToolCallResponse, BridgeError> {
        BridgeClient::call_tool(self, name, args).await
    }

    fn target(&self) -> &str {
        self.base_url()
    }

    fn close(&self) {
        BridgeClient::close(self)
    }
}

/// Which path produced a call-tool text item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallOutcome {
    /// 2xx with a JSON body.
    Success,
    /// Non-2xx; text carries the bridge's status and body.
    BridgeError,
    /// Local or network failure.
    Error,
}

/// The single text content item returned by call-tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolContent {
    pub text: String,
    pub outcome: CallOutcome,
}

impl ToolContent {
    fn new(outcome: CallOutcome, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            outcome,
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome == CallOutcome::Success
    }
}

/// Composes the bridge client and the catalog cache into the two operations
/// served to the calling channel. Neither operation returns an error.
pub struct BridgeAdapter {
    bridge: Box<dyn BridgeOps>,
    cache: Arc<ToolCache>,
}

impl std::fmt::Debug for BridgeAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgeAdapter")
            .field("bridge", &self.bridge.target())
            .field("cache", &self.cache)
            .finish()
    }
}

impl BridgeAdapter {
    pub fn new(client: BridgeClient, cache: ToolCache) -> Self {
        Self::from_ops(Box::new(client), Arc::new(cache))
    }

    pub fn from_ops(bridge: Box<dyn BridgeOps>, cache: Arc<ToolCache>) -> Self {
        Self { bridge, cache }
    }

    pub fn cache(&self) -> &ToolCache {
        &self.cache
    }

    /// Probe the bridge health endpoint.
    pub async fn health(&self) -> Result<Value, BridgeError> {
        self.bridge.health().await
    }

    /// Release the bridge connection.
    pub fn close(&self) {
        self.bridge.close();
    }

    /// Current tool catalog.
    ///
    /// Served from the cache while fresh; otherwise fetched from the bridge.
    /// If the fetch fails the last known catalog is returned even if stale,
    /// and an empty list if there never was one.
    pub async fn list_tools(&self) -> Vec<ToolDescriptor> {
        if let Some(tools) = self.cache.get() {
            return tools.as_ref().clone();
        }

        match self.fetch_tools().await {
            Ok(tools) => {
                tracing::info!(count = tools.len(), "Fetched tools from bridge");
                self.cache.set(tools.clone());
                tools
            }
            Err(e) => {
                tracing::error!(
                    operation = "list_tools",
                    url = %self.bridge.target(),
                    error = %e,
                    "Failed to fetch tools"
                );
                match self.cache.last_known() {
                    Some(catalog) => {
                        tracing::warn!(
                            count = catalog.tools.len(),
                            age_secs = catalog.captured_at.elapsed().as_secs(),
                            "Serving stale tool catalog"
                        );
                        catalog.tools.as_ref().clone()
                    }
                    None => Vec::new(),
                }
            }
        }
    }

    async fn fetch_tools(&self) -> Result<Vec<ToolDescriptor>, BridgeError> {
        let raw = self.bridge.list_tools().await?;
        translate_tools(&raw).map_err(|e| {
            BridgeError::malformed("list_tools", format!("{}/tools", self.bridge.target()), e.to_string())
        })
    }

    /// Forward a tool call and render the outcome as one text item.
    pub async fn call_tool(&self, name: &str, args: Map<String, Value>) -> ToolContent {
        let outcome = match self.bridge.call_tool(name, args).await {
            Ok(response) => response.into_pretty_text(),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(text) => ToolContent::new(CallOutcome::Success, text),
            Err(BridgeError::CallFailed { status, body }) => {
                tracing::warn!(tool = name, status, "Bridge returned error status for tool call");
                ToolContent::new(CallOutcome::BridgeError, format!("Bridge error: {status} {body}"))
            }
            Err(
                e @ (BridgeError::Unavailable { .. }
                | BridgeError::Transport { .. }
                | BridgeError::Serialization(_)
                | BridgeError::Configuration(_)),
            ) => self.call_error(name, &e),
        }
    }

    fn call_error(&self, name: &str, error: &BridgeError) -> ToolContent {
        tracing::error!(
            operation = "call_tool",
            tool = name,
            url = %self.bridge.target(),
            error = %error,
            "Tool call failed"
        );
        ToolContent::new(CallOutcome::Error, format!("Error: {error}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Scripted bridge: each list/call pops the next queued result.
    #[derive(Default)]
    struct MockBridgeOps {
        list_results: Mutex<VecDeque<Result<Vec<Value>, BridgeError>>>,
        call_results: Mutex<VecDeque<Result<ToolCallResponse, BridgeError>>>,
        list_calls: Mutex<usize>,
    }

    impl MockBridgeOps {
        fn queue_list(&self, result: Result<Vec<Value>, BridgeError>) {
            self.list_results.lock().unwrap().push_back(result);
        }

        fn queue_call(&self, result: Result<ToolCallResponse, BridgeError>) {
            self.call_results.lock().unwrap().push_back(result);
        }
    }

    #[async_trait]
    impl BridgeOps for Arc<MockBridgeOps> {
        async fn health(&self) -> Result<Value, BridgeError> {
            Ok(json!({"status": "ok"}))
        }

        async fn list_tools(&self) -> Result<Vec<Value>, BridgeError> {
            *self.list_calls.lock().unwrap() += 1;
            self.list_results
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(down()))
        }

        async fn call_tool(
            &self,
            _name: &str,
            _args: Map<String, Value>,
        ) -> Result<ToolCallResponse, BridgeError> {
            self.call_results
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(down()))
        }

        fn target(&self) -> &str {
            "http://bridge.test"
        }

        fn close(&self) {}
    }

    fn down() -> BridgeError {
        BridgeError::unavailable_status("list_tools", "http://bridge.test/tools", 503)
    }

    fn adapter(ttl: Duration) -> (BridgeAdapter, Arc<MockBridgeOps>) {
        let ops = Arc::new(MockBridgeOps::default());
        let adapter =
            BridgeAdapter::from_ops(Box::new(Arc::clone(&ops)), Arc::new(ToolCache::new(ttl)));
        (adapter, ops)
    }

    fn names(tools: &[ToolDescriptor]) -> Vec<&str> {
        tools.iter().map(|t| t.name.as_str()).collect()
    }

    #[tokio::test(start_paused = true)]
    async fn list_tools_fetches_once_while_fresh() {
        let (adapter, ops) = adapter(Duration::from_secs(300));
        ops.queue_list(Ok(vec![json!({"name": "snapshot"})]));

        assert_eq!(names(&adapter.list_tools().await), ["snapshot"]);
        assert_eq!(names(&adapter.list_tools().await), ["snapshot"]);
        assert_eq!(*ops.list_calls.lock().unwrap(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn list_tools_refetches_after_expiry() {
        let (adapter, ops) = adapter(Duration::from_secs(10));
        ops.queue_list(Ok(vec![json!({"name": "old"})]));
        ops.queue_list(Ok(vec![json!({"name": "new"})]));

        adapter.list_tools().await;
        tokio::time::advance(Duration::from_secs(10)).await;

        assert_eq!(names(&adapter.list_tools().await), ["new"]);
        assert_eq!(*ops.list_calls.lock().unwrap(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn list_tools_falls_back_to_stale_catalog() {
        let (adapter, ops) = adapter(Duration::from_secs(10));
        ops.queue_list(Ok(vec![
            json!({"name": "click", "description": "Click", "inputSchema": {"type": "object"}}),
            json!({"name": "type"}),
        ]));
        let first = adapter.list_tools().await;

        tokio::time::advance(Duration::from_secs(60)).await;
        ops.queue_list(Err(down()));

        assert_eq!(adapter.list_tools().await, first);
    }

    #[tokio::test(start_paused = true)]
    async fn list_tools_is_empty_when_bridge_never_answered() {
        let (adapter, ops) = adapter(Duration::from_secs(10));
        ops.queue_list(Err(down()));
        assert!(adapter.list_tools().await.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn malformed_catalog_does_not_replace_cache() {
        let (adapter, ops) = adapter(Duration::from_secs(10));
        ops.queue_list(Ok(vec![json!({"name": "good"})]));
        adapter.list_tools().await;
        adapter.cache().invalidate();

        ops.queue_list(Ok(vec![json!({"description": "no name"})]));
        assert_eq!(names(&adapter.list_tools().await), ["good"]);
        assert!(adapter.cache().get().is_none());
    }

    #[tokio::test]
    async fn call_tool_pretty_prints_success() {
        let (adapter, ops) = adapter(Duration::from_secs(10));
        ops.queue_call(Ok(ToolCallResponse {
            status: 200,
            body: r#"{"ok":true,"title":"Café"}"#.into(),
        }));

        let content = adapter.call_tool("page_title", Map::new()).await;
        assert!(content.is_success());
        assert_eq!(content.text, "{\n  \"ok\": true,\n  \"title\": \"Café\"\n}");
    }

    #[tokio::test]
    async fn call_tool_passes_bridge_error_status_and_body() {
        let (adapter, ops) = adapter(Duration::from_secs(10));
        ops.queue_call(Ok(ToolCallResponse {
            status: 404,
            body: r#"{"error":"unknown tool"}"#.into(),
        }));

        let content = adapter.call_tool("nope", Map::new()).await;
        assert_eq!(content.outcome, CallOutcome::BridgeError);
        assert_eq!(content.text, r#"Bridge error: 404 {"error":"unknown tool"}"#);
    }

    #[tokio::test]
    async fn call_tool_converts_transport_failure_to_text() {
        let (adapter, ops) = adapter(Duration::from_secs(10));
        ops.queue_call(Err(BridgeError::malformed(
            "call_tool",
            "http://bridge.test/tool_call",
            "connection reset",
        )));

        let content = adapter.call_tool("click", Map::new()).await;
        assert_eq!(content.outcome, CallOutcome::Error);
        assert!(content.text.starts_with("Error: "));
        assert!(content.text.contains("connection reset"));
    }

    #[tokio::test]
    async fn call_tool_reports_non_json_success_body_as_error() {
        let (adapter, ops) = adapter(Duration::from_secs(10));
        ops.queue_call(Ok(ToolCallResponse {
            status: 200,
            body: "done".into(),
        }));

        let content = adapter.call_tool("click", Map::new()).await;
        assert_eq!(content.outcome, CallOutcome::Error);
        assert!(content.text.starts_with("Error: Serialization error"));
    }
}

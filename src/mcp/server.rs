//! MCP server handler exposing the adapter over rmcp.

use std::sync::Arc;

use rmcp::{
    model::{
        CallToolRequestParams, CallToolResult, Content, ListToolsResult, PaginatedRequestParams,
        ServerCapabilities, ServerInfo, Tool,
    },
    service::{RequestContext, RoleServer},
    ErrorData, ServerHandler,
};

use super::adapter::{BridgeAdapter, ToolContent};
use super::schema::ToolDescriptor;

pub const SERVER_NAME: &str = "browserclaw";

/// rmcp handler serving `tools/list` and `tools/call` from a [`BridgeAdapter`].
#[derive(Debug, Clone)]
pub struct BridgeServer {
    adapter: Arc<BridgeAdapter>,
}

impl BridgeServer {
    pub fn new(adapter: Arc<BridgeAdapter>) -> Self {
        Self { adapter }
    }

    pub fn adapter(&self) -> &BridgeAdapter {
        &self.adapter
    }
}

impl ServerHandler for BridgeServer {
    fn get_info(&self) -> ServerInfo {
        let mut info = ServerInfo::default();
        info.capabilities = ServerCapabilities::builder().enable_tools().build();
        info.server_info.name = SERVER_NAME.to_string();
        info.server_info.version = env!("CARGO_PKG_VERSION").to_string();
        info
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        let tools = self.adapter.list_tools().await;
        Ok(ListToolsResult {
            tools: tools.into_iter().map(to_mcp_tool).collect(),
            ..Default::default()
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        let args = request.arguments.unwrap_or_default();
        let content = self.adapter.call_tool(&request.name, args).await;
        Ok(to_call_result(content))
    }
}

fn to_mcp_tool(tool: ToolDescriptor) -> Tool {
    Tool::new(tool.name, tool.description, tool.input_schema)
}

// Bridge-side failures are reported as ordinary text content, not as MCP
// tool errors, so clients see the same output the bridge produced.
fn to_call_result(content: ToolContent) -> CallToolResult {
    CallToolResult::success(vec![Content::text(content.text)])
}

//! BrowserClaw MCP: a stdio MCP server backed by the BrowserClaw bridge.
//!
//! The adapter exposes tools that live behind an HTTP bridge to MCP clients
//! that have no skill system of their own:
//!
//! - [`bridge::BridgeClient`] talks to the bridge (`/health`, `/tools`, `/tool_call`)
//! - [`util::cache::ToolCache`] keeps the tool catalog fresh for a TTL and
//!   retains it as a fallback after it goes stale
//! - [`mcp::BridgeAdapter`] implements list-tools and call-tool on top of both
//! - [`mcp::BridgeServer`] serves the adapter over MCP with `rmcp`
//!
//! # Quick Start
//!
//! ```no_run
//! use browserclaw_mcp::prelude::*;
//!
//! # async fn example() -> browserclaw_mcp::error::Result<()> {
//! let config = AdapterConfig::load(None)?;
//! let adapter = BridgeAdapter::new(
//!     BridgeClient::from_config(&config),
//!     ToolCache::new(config.tool_cache_ttl()),
//! );
//! for tool in adapter.list_tools().await {
//!     println!("{}", tool.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod bridge;
pub mod config;
pub mod error;
pub mod mcp;
pub mod observability;
pub mod prelude;
pub mod util;

#[cfg(feature = "cli")]
pub mod cli;

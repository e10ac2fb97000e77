//! Model Context Protocol (MCP) server backed by the bridge.

pub mod adapter;
pub mod schema;
pub mod server;

pub use adapter::{BridgeAdapter, BridgeOps, CallOutcome, ToolContent};
pub use schema::ToolDescriptor;
pub use server::BridgeServer;

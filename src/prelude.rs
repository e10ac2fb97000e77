//! Convenience re-exports for common use.

pub use crate::error::{BridgeError, ErrorKind, Result};
pub use crate::bridge::{BridgeClient, ToolCallResponse};
pub use crate::util::cache::ToolCache;
pub use crate::mcp::{BridgeAdapter, BridgeServer, CallOutcome, ToolContent, ToolDescriptor};
pub use crate::config::AdapterConfig;

//! Client for the BrowserClaw bridge HTTP API.

pub mod client;
pub mod http;

pub use client::{BridgeClient, ToolCallResponse};

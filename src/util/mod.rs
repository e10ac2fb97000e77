//! Utility modules: tool catalog cache and JSON rendering.

pub mod cache;
pub mod json;

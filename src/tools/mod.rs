//! HealthAI Tools module
//!
//! MCP tool implementations for the report service.

pub mod reports;
pub mod status;

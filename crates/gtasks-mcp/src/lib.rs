//! Google Tasks & Gmail MCP server library.
//!
//! Provides the [`server::GtasksMcpServer`] MCP handler and tool parameter
//! types. Used by the `gtasks-mcp` binary and available for integration
//! testing.

pub mod server;
pub mod tools;

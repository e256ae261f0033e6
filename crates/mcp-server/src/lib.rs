//! # mcp-server
//!
//! MCP (Model Context Protocol) server around the `mcp-registry` capability
//! core. Supports stdio, SSE and streamable HTTP transports.

pub mod config;
pub mod protocol;
pub mod registry;
pub mod sample;
mod server;
pub mod transport;

pub use config::ServerProperties;
pub use protocol::{McpError, McpMessage, ServerCapabilities};
pub use registry::McpRegistry;
pub use server::McpServer;
pub use transport::{HttpTransport, StdioTransport};

//! Transport implementations for the MCP server

mod http;
mod stdio;

pub use http::HttpTransport;
pub use stdio::StdioTransport;

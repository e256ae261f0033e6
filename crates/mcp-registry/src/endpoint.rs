//! Host-level endpoint descriptor
//!
//! One descriptor per process describes how the server presents itself:
//! name, version, transport and endpoint paths. A target type that carries
//! no descriptor contributes no capabilities.

use serde::{Deserialize, Serialize};

/// Wire transports the server can speak
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransportKind {
    #[default]
    StreamableHttp,
    Sse,
    Stdio,
}

/// Synchronous or asynchronous execution contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServerKind {
    #[default]
    Sync,
    Async,
}

/// Server metadata attached to a capability target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointDescriptor {
    pub name: String,
    pub version: String,
    pub transport: TransportKind,
    pub server_kind: ServerKind,
    pub port: u16,
    pub base_url: String,
    pub sse_endpoint: String,
    pub sse_message_endpoint: String,
    pub mcp_endpoint: String,
    pub tool_change_notification: bool,
}

impl Default for EndpointDescriptor {
    fn default() -> Self {
        Self {
            name: "MCP Server".to_string(),
            version: "1.0.0".to_string(),
            transport: TransportKind::default(),
            server_kind: ServerKind::default(),
            port: 9000,
            base_url: String::new(),
            sse_endpoint: "/sse".to_string(),
            sse_message_endpoint: "/mcp/message".to_string(),
            mcp_endpoint: "/mcp".to_string(),
            tool_change_notification: true,
        }
    }
}

impl EndpointDescriptor {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            ..Default::default()
        }
    }

    pub fn with_transport(mut self, transport: TransportKind) -> Self {
        self.transport = transport;
        self
    }

    pub fn with_server_kind(mut self, kind: ServerKind) -> Self {
        self.server_kind = kind;
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }
}

/// Lookup seam for the host-level descriptor.
///
/// `None` means "no capability set can be built from this target" and is
/// not an error.
pub trait ServerEndpoint {
    fn endpoint(&self) -> Option<EndpointDescriptor>;
}

//! Server configuration

use std::path::PathBuf;

use mcp_registry::{EndpointDescriptor, ServerKind, TransportKind};

/// Environment variable overriding the prompt directory
pub const PROMPT_DIR_ENV: &str = "MCP_PROMPT_DIR";

const DEFAULT_PROMPT_DIR: &str = "assets/prompt";
const DEFAULT_TOOL_LIST: &str = "assets/tool-list.json";

/// Resolved server properties, populated from the capability target's
/// endpoint descriptor and process-level overrides.
#[derive(Debug, Clone)]
pub struct ServerProperties {
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
    pub resource_change_notification: bool,
    pub prompt_change_notification: bool,
    /// Directory holding prompt-list.json and the prompt content files
    pub prompt_dir: PathBuf,
    /// Declarative tool definition file
    pub tool_list_path: PathBuf,
}

impl Default for ServerProperties {
    fn default() -> Self {
        Self::from_endpoint(EndpointDescriptor::default())
    }
}

impl ServerProperties {
    /// Build properties from an endpoint descriptor; the prompt directory
    /// honors the `MCP_PROMPT_DIR` override.
    pub fn from_endpoint(endpoint: EndpointDescriptor) -> Self {
        let prompt_dir = std::env::var(PROMPT_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_PROMPT_DIR));
        Self {
            name: endpoint.name,
            version: endpoint.version,
            transport: endpoint.transport,
            server_kind: endpoint.server_kind,
            port: endpoint.port,
            base_url: endpoint.base_url,
            sse_endpoint: endpoint.sse_endpoint,
            sse_message_endpoint: endpoint.sse_message_endpoint,
            mcp_endpoint: endpoint.mcp_endpoint,
            tool_change_notification: endpoint.tool_change_notification,
            resource_change_notification: true,
            prompt_change_notification: true,
            prompt_dir,
            tool_list_path: PathBuf::from(DEFAULT_TOOL_LIST),
        }
    }

    /// Effective execution contract: streamable HTTP only runs async.
    pub fn effective_server_kind(&self) -> ServerKind {
        if self.transport == TransportKind::StreamableHttp {
            ServerKind::Async
        } else {
            self.server_kind
        }
    }

    pub fn is_stdio(&self) -> bool {
        self.transport == TransportKind::Stdio
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn streamable_http_forces_async() {
        let props = ServerProperties::default();
        assert_eq!(props.transport, TransportKind::StreamableHttp);
        assert_eq!(props.server_kind, ServerKind::Sync);
        assert_eq!(props.effective_server_kind(), ServerKind::Async);
    }

    #[test]
    fn sse_transport_keeps_declared_kind() {
        let endpoint = EndpointDescriptor::default().with_transport(TransportKind::Sse);
        let props = ServerProperties::from_endpoint(endpoint);
        assert_eq!(props.effective_server_kind(), ServerKind::Sync);
    }

    #[test]
    fn endpoint_fields_carry_over() {
        let endpoint = EndpointDescriptor::new("示例MCP服务器", "2.0.0").with_port(9090);
        let props = ServerProperties::from_endpoint(endpoint);
        assert_eq!(props.name, "示例MCP服务器");
        assert_eq!(props.version, "2.0.0");
        assert_eq!(props.port, 9090);
        assert_eq!(props.mcp_endpoint, "/mcp");
    }
}

//! Main MCP server orchestration

use std::sync::Arc;

use tracing::info;

use crate::config::ServerProperties;
use crate::registry::McpRegistry;
use crate::transport::{HttpTransport, StdioTransport};

/// MCP server: an assembled registry plus the transport picked by the
/// endpoint descriptor.
pub struct McpServer {
    registry: Arc<McpRegistry>,
    properties: ServerProperties,
}

impl McpServer {
    pub fn new(registry: Arc<McpRegistry>, properties: ServerProperties) -> Self {
        Self { registry, properties }
    }

    /// Run the server on the configured transport
    pub async fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        if self.properties.is_stdio() {
            info!("Starting MCP server in stdio mode");
            let mut transport = StdioTransport::new(self.registry.clone(), self.properties.clone());
            transport.run().await
        } else {
            info!(
                "Starting MCP server in {:?} mode on port {}",
                self.properties.transport, self.properties.port
            );
            let transport = HttpTransport::new(self.registry.clone(), self.properties.clone());
            transport.run().await
        }
    }
}

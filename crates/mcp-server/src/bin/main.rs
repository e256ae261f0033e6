//! Example MCP server binary
//!
//! Exposes the sample capability set (code-registered weather tools, the
//! declarative city-guide tools, example prompts and resources) over stdio,
//! SSE or streamable HTTP.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::info;

use mcp_registry::{ServerEndpoint, TransportKind};
use mcp_server::sample::{sample_targets, WeatherService};
use mcp_server::{McpRegistry, McpServer, ServerProperties};

/// Example MCP server with registry-driven tools, prompts and resources
#[derive(Parser, Debug)]
#[command(name = "mcp-example-server")]
#[command(version)]
#[command(about = "Example MCP server - capability registry over stdio/SSE/streamable HTTP")]
struct Args {
    /// Run in stdio mode (for MCP clients like Claude Desktop)
    #[arg(long)]
    stdio: bool,

    /// Override the port from the endpoint descriptor
    #[arg(long)]
    port: Option<u16>,

    /// Directory holding prompt-list.json and prompt content files
    #[arg(long, env = "MCP_PROMPT_DIR")]
    prompt_dir: Option<PathBuf>,

    /// Declarative tool definition file
    #[arg(long, default_value = "assets/tool-list.json")]
    tool_list: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // logging would corrupt the protocol stream in stdio mode
    if !args.stdio {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::from_default_env()
                    .add_directive(tracing::Level::INFO.into()),
            )
            .init();
    }

    let service = WeatherService::new();
    let endpoint = service
        .endpoint()
        .ok_or("No endpoint descriptor on the capability target")?;

    let mut properties = ServerProperties::from_endpoint(endpoint);
    if args.stdio {
        properties.transport = TransportKind::Stdio;
    }
    if let Some(port) = args.port {
        properties.port = port;
    }
    if let Some(prompt_dir) = args.prompt_dir {
        properties.prompt_dir = prompt_dir;
    }
    properties.tool_list_path = args.tool_list;

    if !args.stdio {
        info!("MCP server properties: {:?}", properties);
    }

    // fail fast: a broken capability source aborts startup
    let registry = McpRegistry::assemble(&properties, &service, sample_targets())
        .map_err(|e| format!("Failed to assemble capability registry: {e}"))?;

    let server = McpServer::new(Arc::new(registry), properties);
    server.run().await
}

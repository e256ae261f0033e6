//! HTTP transports for MCP: streamable HTTP and SSE

use axum::{
    extract::State,
    response::sse::{Event, Sse},
    routing::{get, post},
    Json, Router,
};
use futures::stream::Stream;
use std::convert::Infallible;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, info};

use crate::config::ServerProperties;
use crate::protocol::{McpMessage, RequestHandler};
use crate::registry::McpRegistry;
use mcp_registry::TransportKind;

/// Shared state for HTTP handlers
struct AppState {
    handler: RwLock<RequestHandler>,
    sse_message_endpoint: String,
}

/// HTTP transport for the MCP protocol
pub struct HttpTransport {
    registry: Arc<McpRegistry>,
    properties: ServerProperties,
}

impl HttpTransport {
    pub fn new(registry: Arc<McpRegistry>, properties: ServerProperties) -> Self {
        Self { registry, properties }
    }

    /// Run the HTTP server
    pub async fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let state = Arc::new(AppState {
            handler: RwLock::new(RequestHandler::new(
                self.registry.clone(),
                self.properties.clone(),
            )),
            sse_message_endpoint: self.properties.sse_message_endpoint.clone(),
        });

        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        let mut app = Router::new()
            .route("/", get(health))
            .route("/health", get(health));

        // route layout follows the configured endpoint paths
        app = match self.properties.transport {
            TransportKind::Sse => app
                .route(&self.properties.sse_endpoint, get(handle_sse))
                .route(&self.properties.sse_message_endpoint, post(handle_message)),
            _ => app.route(&self.properties.mcp_endpoint, post(handle_message)),
        };

        let app = app.layer(cors).with_state(state);

        let addr = format!("0.0.0.0:{}", self.properties.port);
        let endpoint = match self.properties.transport {
            TransportKind::Sse => &self.properties.sse_endpoint,
            _ => &self.properties.mcp_endpoint,
        };
        info!("Starting MCP HTTP server on {} (endpoint {})", addr, endpoint);

        let listener = tokio::net::TcpListener::bind(&addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}

/// Health check endpoint
async fn health() -> &'static str {
    "OK"
}

/// Handle an MCP JSON-RPC request via HTTP POST
async fn handle_message(
    State(state): State<Arc<AppState>>,
    Json(message): Json<McpMessage>,
) -> Json<McpMessage> {
    debug!("HTTP request: {:?}", message);

    let mut handler = state.handler.write().await;

    match handler.handle(message).await {
        Some(response) => Json(response),
        None => {
            // notification, return an empty success
            Json(McpMessage::response(
                serde_json::json!(null),
                serde_json::json!({}),
            ))
        }
    }
}

/// Handle the SSE connection
async fn handle_sse(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    info!("SSE connection established");

    // Announces the message endpoint; responses travel over the POST channel.
    let endpoint = state.sse_message_endpoint.clone();
    let stream = async_stream::stream! {
        yield Ok(Event::default().event("endpoint").data(endpoint));
    };

    Sse::new(stream)
}

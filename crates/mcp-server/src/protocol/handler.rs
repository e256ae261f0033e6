//! MCP request handler

use std::sync::Arc;

use mcp_registry::ArgumentMap;
use serde_json::Value;
use tracing::{debug, info};

use super::capabilities::ServerCapabilities;
use super::types::*;
use crate::config::ServerProperties;
use crate::registry::McpRegistry;

/// Handler for MCP requests
pub struct RequestHandler {
    registry: Arc<McpRegistry>,
    properties: ServerProperties,
    capabilities: ServerCapabilities,
    initialized: bool,
}

impl RequestHandler {
    pub fn new(registry: Arc<McpRegistry>, properties: ServerProperties) -> Self {
        let capabilities = registry.capabilities(&properties);
        Self {
            registry,
            properties,
            capabilities,
            initialized: false,
        }
    }

    /// Handle an incoming message; `None` means no response is due.
    pub async fn handle(&mut self, message: McpMessage) -> Option<McpMessage> {
        if message.is_request() {
            let method = message.method.as_deref().unwrap_or_default().to_string();
            let id = message.id.clone()?;

            debug!("Handling request: {}", method);

            let result = match method.as_str() {
                "initialize" => self.handle_initialize(message.params),
                "ping" => Ok(serde_json::json!({})),
                "tools/list" => self.handle_tools_list(),
                "tools/call" => self.handle_tools_call(message.params).await,
                "prompts/list" => self.handle_prompts_list(),
                "prompts/get" => self.handle_prompts_get(message.params).await,
                "resources/list" => self.handle_resources_list(),
                "resources/read" => self.handle_resources_read(message.params).await,
                _ => Err(McpError::method_not_found()),
            };

            Some(match result {
                Ok(result) => McpMessage::response(id, result),
                Err(error) => McpMessage::error_response(Some(id), error),
            })
        } else if message.is_notification() {
            let method = message.method.as_deref().unwrap_or_default();
            match method {
                "notifications/initialized" | "initialized" => {
                    info!("Client initialized");
                    self.initialized = true;
                }
                "notifications/cancelled" => {
                    debug!("Request cancelled");
                }
                _ => {
                    debug!("Unknown notification: {}", method);
                }
            }
            None
        } else {
            debug!("Received unexpected response message");
            None
        }
    }

    fn handle_initialize(&mut self, params: Option<Value>) -> Result<Value, McpError> {
        let params: InitializeParams = parse_params(params)?;

        info!(
            "Initializing session with client: {} v{}",
            params.client_info.name, params.client_info.version
        );

        self.initialized = true;

        let result = InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            capabilities: self.capabilities.clone(),
            server_info: ServerInfo {
                name: self.properties.name.clone(),
                version: self.properties.version.clone(),
            },
        };
        to_result(result)
    }

    fn handle_tools_list(&self) -> Result<Value, McpError> {
        to_result(ToolsListResult {
            tools: self.registry.tool_descriptors(),
        })
    }

    async fn handle_tools_call(&self, params: Option<Value>) -> Result<Value, McpError> {
        let params: ToolCallParams = parse_params(params)?;
        debug!("Calling tool: {}", params.name);

        let arguments: ArgumentMap = params.arguments.unwrap_or_default();
        let result = self
            .registry
            .call_tool(&params.name, arguments)
            .await
            .ok_or_else(|| McpError::invalid_params(format!("Unknown tool: {}", params.name)))?;
        to_result(result)
    }

    fn handle_prompts_list(&self) -> Result<Value, McpError> {
        to_result(PromptsListResult {
            prompts: self.registry.prompt_descriptors(),
        })
    }

    async fn handle_prompts_get(&self, params: Option<Value>) -> Result<Value, McpError> {
        let params: GetPromptParams = parse_params(params)?;
        let arguments: ArgumentMap = params.arguments.unwrap_or_default();
        let result = self
            .registry
            .get_prompt(&params.name, arguments)
            .await
            .ok_or_else(|| McpError::invalid_params(format!("Unknown prompt: {}", params.name)))?
            .map_err(|e| McpError::internal_error(e.to_string()))?;
        to_result(result)
    }

    fn handle_resources_list(&self) -> Result<Value, McpError> {
        to_result(ResourcesListResult {
            resources: self.registry.resource_descriptors(),
        })
    }

    async fn handle_resources_read(&self, params: Option<Value>) -> Result<Value, McpError> {
        let params: ReadResourceParams = parse_params(params)?;
        let result = self
            .registry
            .read_resource(&params.uri)
            .await
            .ok_or_else(|| McpError::invalid_params(format!("Unknown resource: {}", params.uri)))?
            .map_err(|e| McpError::internal_error(e.to_string()))?;
        to_result(result)
    }
}

fn parse_params<T: serde::de::DeserializeOwned>(params: Option<Value>) -> Result<T, McpError> {
    params
        .map(serde_json::from_value)
        .transpose()
        .map_err(|e| McpError::invalid_params(e.to_string()))?
        .ok_or_else(|| McpError::invalid_params("Missing params"))
}

fn to_result<T: serde::Serialize>(value: T) -> Result<Value, McpError> {
    serde_json::to_value(value).map_err(|e| McpError::internal_error(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::{sample_targets, WeatherService};
    use mcp_registry::EndpointDescriptor;
    use serde_json::json;
    use tempfile::TempDir;

    fn handler() -> (RequestHandler, TempDir) {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("prompt-list.json"), r#"{"prompts": []}"#).unwrap();
        let mut properties = ServerProperties::from_endpoint(
            EndpointDescriptor::new("示例MCP服务器", "1.0.0"),
        );
        properties.prompt_dir = dir.path().to_path_buf();
        properties.tool_list_path = dir.path().join("tool-list.json");
        let registry =
            McpRegistry::assemble(&properties, &WeatherService::new(), sample_targets()).unwrap();
        (RequestHandler::new(Arc::new(registry), properties), dir)
    }

    #[tokio::test]
    async fn initialize_reports_server_info_and_capabilities() {
        let (mut handler, _dir) = handler();
        let request = McpMessage::request(
            1,
            "initialize",
            Some(json!({
                "protocolVersion": MCP_VERSION,
                "capabilities": {},
                "clientInfo": {"name": "test-client", "version": "0.1"}
            })),
        );
        let response = handler.handle(request).await.unwrap();
        let result = response.result.unwrap();
        assert_eq!(result["serverInfo"]["name"], "示例MCP服务器");
        assert!(result["capabilities"]["tools"].is_object());
    }

    #[tokio::test]
    async fn tools_list_returns_descriptors() {
        let (mut handler, _dir) = handler();
        let response = handler
            .handle(McpMessage::request(2, "tools/list", None))
            .await
            .unwrap();
        let tools = response.result.unwrap()["tools"].clone();
        assert_eq!(tools.as_array().unwrap().len(), 2);
        assert_eq!(tools[0]["name"], "getWeatherRename");
        assert_eq!(tools[0]["inputSchema"]["required"][0], "city");
    }

    #[tokio::test]
    async fn tools_call_returns_text_result() {
        let (mut handler, _dir) = handler();
        let response = handler
            .handle(McpMessage::request(
                3,
                "tools/call",
                Some(json!({"name": "getWeatherRename", "arguments": {"city": "Paris"}})),
            ))
            .await
            .unwrap();
        let result = response.result.unwrap();
        assert_eq!(result["isError"], false);
        assert_eq!(result["content"][0]["text"], "Paris: 晴天，温度25℃");
    }

    #[tokio::test]
    async fn unknown_tool_is_a_protocol_error() {
        let (mut handler, _dir) = handler();
        let response = handler
            .handle(McpMessage::request(
                4,
                "tools/call",
                Some(json!({"name": "nope", "arguments": {}})),
            ))
            .await
            .unwrap();
        assert_eq!(response.error.unwrap().code, -32602);
    }

    #[tokio::test]
    async fn unknown_method_is_method_not_found() {
        let (mut handler, _dir) = handler();
        let response = handler
            .handle(McpMessage::request(5, "bogus/method", None))
            .await
            .unwrap();
        assert_eq!(response.error.unwrap().code, -32601);
    }

    #[tokio::test]
    async fn prompts_get_resolves_builtin() {
        let (mut handler, _dir) = handler();
        let response = handler
            .handle(McpMessage::request(
                6,
                "prompts/get",
                Some(json!({
                    "name": "test-prompt-argument",
                    "arguments": {"arg1": "111", "arg2": "222"}
                })),
            ))
            .await
            .unwrap();
        let result = response.result.unwrap();
        assert_eq!(
            result["messages"][0]["content"]["text"],
            "Test prompt: arg1: 111, arg2: 222"
        );
    }

    #[tokio::test]
    async fn resources_read_returns_empty_contents() {
        let (mut handler, _dir) = handler();
        let response = handler
            .handle(McpMessage::request(
                7,
                "resources/read",
                Some(json!({"uri": "test://resource"})),
            ))
            .await
            .unwrap();
        let result = response.result.unwrap();
        assert_eq!(result["contents"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn notifications_produce_no_response() {
        let (mut handler, _dir) = handler();
        let response = handler
            .handle(McpMessage::notification("notifications/initialized", None))
            .await;
        assert!(response.is_none());
    }
}

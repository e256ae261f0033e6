//! Registry assembly
//!
//! Aggregates the capability sources into one immutable registry: tools from
//! the declarative definition file plus the code-registered endpoint (the two
//! compose additively), prompts from the prompt provider, and the static
//! resources. Assembly runs once at startup and fails fast; lookups need no
//! locking afterwards.

use std::sync::Arc;

use mcp_registry::{
    build_def_specs, collect_tools, load_tool_defs, ArgumentMap, AsyncPromptSpec, AsyncResourceSpec,
    AsyncToolSpec, CallToolResult, GetPromptResult, PromptDescriptor, PromptProvider,
    ReadResourceResult, ResourceDescriptor, ResourceProvider, Result, ServerKind, SyncPromptSpec,
    SyncResourceSpec, SyncToolSpec, TargetRegistry, ToolDescriptor, ToolEndpoint,
};
use tracing::info;

use crate::config::ServerProperties;
use crate::protocol::ServerCapabilities;

enum ToolSet {
    Sync(Vec<SyncToolSpec>),
    Async(Vec<AsyncToolSpec>),
}

enum PromptSet {
    Sync(Vec<SyncPromptSpec>),
    Async(Vec<AsyncPromptSpec>),
}

enum ResourceSet {
    Sync(Vec<SyncResourceSpec>),
    Async(Vec<AsyncResourceSpec>),
}

/// The assembled capability registry
pub struct McpRegistry {
    tools: ToolSet,
    prompts: PromptSet,
    resources: ResourceSet,
}

impl McpRegistry {
    /// Build the registry from all sources.
    ///
    /// Declarative definitions load first, then the endpoint's registrations;
    /// a malformed definition file or an unresolvable declared prompt aborts
    /// assembly. The effective server kind decides whether specifications are
    /// kept synchronous or bridged onto the blocking pool.
    pub fn assemble(
        properties: &ServerProperties,
        endpoint: &dyn ToolEndpoint,
        targets: Arc<TargetRegistry>,
    ) -> Result<Self> {
        let defs = load_tool_defs(&properties.tool_list_path)?;
        let mut tools = build_def_specs(defs, targets);
        tools.extend(collect_tools(endpoint));

        let prompts = PromptProvider::new(&properties.prompt_dir).sync_prompts()?;
        let resources = ResourceProvider::new().sync_resources();

        info!(
            "Registered tools: {}, prompts: {}, resources: {}, notification: {}",
            tools.len(),
            prompts.len(),
            resources.len(),
            properties.tool_change_notification
        );

        Ok(match properties.effective_server_kind() {
            ServerKind::Sync => Self {
                tools: ToolSet::Sync(tools),
                prompts: PromptSet::Sync(prompts),
                resources: ResourceSet::Sync(resources),
            },
            ServerKind::Async => Self {
                tools: ToolSet::Async(tools.into_iter().map(AsyncToolSpec::from_sync).collect()),
                prompts: PromptSet::Async(
                    prompts.into_iter().map(AsyncPromptSpec::from_sync).collect(),
                ),
                resources: ResourceSet::Async(
                    resources.into_iter().map(AsyncResourceSpec::from_sync).collect(),
                ),
            },
        })
    }

    pub fn tool_descriptors(&self) -> Vec<ToolDescriptor> {
        match &self.tools {
            ToolSet::Sync(specs) => specs.iter().map(|s| s.tool.clone()).collect(),
            ToolSet::Async(specs) => specs.iter().map(|s| s.tool.clone()).collect(),
        }
    }

    pub fn prompt_descriptors(&self) -> Vec<PromptDescriptor> {
        match &self.prompts {
            PromptSet::Sync(specs) => specs.iter().map(|s| s.prompt.clone()).collect(),
            PromptSet::Async(specs) => specs.iter().map(|s| s.prompt.clone()).collect(),
        }
    }

    pub fn resource_descriptors(&self) -> Vec<ResourceDescriptor> {
        match &self.resources {
            ResourceSet::Sync(specs) => specs.iter().map(|s| s.resource.clone()).collect(),
            ResourceSet::Async(specs) => specs.iter().map(|s| s.resource.clone()).collect(),
        }
    }

    /// Invoke a tool by name. `None` means no such tool; invocation failures
    /// come back as error-flagged results.
    pub async fn call_tool(&self, name: &str, arguments: ArgumentMap) -> Option<CallToolResult> {
        match &self.tools {
            ToolSet::Sync(specs) => {
                // sync contract: the handler blocks the calling task
                let spec = specs.iter().find(|s| s.tool.name == name)?;
                Some(spec.invoke(&arguments))
            }
            ToolSet::Async(specs) => {
                let spec = specs.iter().find(|s| s.tool.name == name)?;
                Some(spec.invoke(arguments).await)
            }
        }
    }

    /// Resolve a prompt by name.
    pub async fn get_prompt(
        &self,
        name: &str,
        arguments: ArgumentMap,
    ) -> Option<Result<GetPromptResult>> {
        match &self.prompts {
            PromptSet::Sync(specs) => {
                let spec = specs.iter().find(|s| s.prompt.name == name)?;
                Some(spec.resolve(&arguments))
            }
            PromptSet::Async(specs) => {
                let spec = specs.iter().find(|s| s.prompt.name == name)?;
                Some(spec.resolve(arguments).await)
            }
        }
    }

    /// Read a resource by URI.
    pub async fn read_resource(&self, uri: &str) -> Option<Result<ReadResourceResult>> {
        match &self.resources {
            ResourceSet::Sync(specs) => {
                let spec = specs.iter().find(|s| s.resource.uri == uri)?;
                Some(spec.read(uri))
            }
            ResourceSet::Async(specs) => {
                let spec = specs.iter().find(|s| s.resource.uri == uri)?;
                Some(spec.read(uri.to_string()).await)
            }
        }
    }

    /// Capability advertisement for session negotiation: only non-empty
    /// registries are announced.
    pub fn capabilities(&self, properties: &ServerProperties) -> ServerCapabilities {
        let mut capabilities = ServerCapabilities::default();
        if !self.tool_descriptors().is_empty() {
            capabilities = capabilities.with_tools(properties.tool_change_notification);
        }
        if !self.resource_descriptors().is_empty() {
            capabilities = capabilities.with_resources(properties.resource_change_notification);
        }
        if !self.prompt_descriptors().is_empty() {
            capabilities = capabilities.with_prompts(properties.prompt_change_notification);
        }
        capabilities
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::{sample_targets, WeatherService};
    use mcp_registry::{EndpointDescriptor, TransportKind};
    use serde_json::json;
    use tempfile::TempDir;

    fn test_properties(kind_sync: bool) -> (ServerProperties, TempDir) {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("prompt-list.json"), r#"{"prompts": []}"#).unwrap();
        let endpoint = EndpointDescriptor::default().with_transport(if kind_sync {
            TransportKind::Sse
        } else {
            TransportKind::StreamableHttp
        });
        let mut properties = ServerProperties::from_endpoint(endpoint);
        properties.prompt_dir = dir.path().to_path_buf();
        properties.tool_list_path = dir.path().join("tool-list.json");
        (properties, dir)
    }

    #[tokio::test]
    async fn assembles_tools_from_both_sources() {
        let (mut properties, dir) = test_properties(true);
        std::fs::write(
            &properties.tool_list_path,
            r#"[{
                "name": "sayHello",
                "description": "问候",
                "inputSchema": {"type": "object", "properties": {"message": {"type": "string"}}, "required": ["message"]},
                "targetBeanClass": "CityGuide",
                "targetMethodName": "sayHello"
            }]"#,
        )
        .unwrap();
        properties.prompt_dir = dir.path().to_path_buf();

        let registry =
            McpRegistry::assemble(&properties, &WeatherService::new(), sample_targets()).unwrap();
        let names: Vec<String> = registry
            .tool_descriptors()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert!(names.contains(&"sayHello".to_string()));
        assert!(names.contains(&"getWeatherRename".to_string()));
        assert!(names.contains(&"getSpeciality".to_string()));
    }

    #[tokio::test]
    async fn absent_definition_file_contributes_nothing() {
        let (properties, _dir) = test_properties(true);
        let registry =
            McpRegistry::assemble(&properties, &WeatherService::new(), sample_targets()).unwrap();
        assert_eq!(registry.tool_descriptors().len(), 2);
    }

    #[tokio::test]
    async fn unknown_tool_is_none() {
        let (properties, _dir) = test_properties(true);
        let registry =
            McpRegistry::assemble(&properties, &WeatherService::new(), sample_targets()).unwrap();
        assert!(registry.call_tool("nope", ArgumentMap::new()).await.is_none());
    }

    #[tokio::test]
    async fn sync_and_async_assemblies_agree() {
        let (sync_props, _d1) = test_properties(true);
        let (async_props, _d2) = test_properties(false);
        let sync_registry =
            McpRegistry::assemble(&sync_props, &WeatherService::new(), sample_targets()).unwrap();
        let async_registry =
            McpRegistry::assemble(&async_props, &WeatherService::new(), sample_targets()).unwrap();

        assert_eq!(
            sync_registry.tool_descriptors(),
            async_registry.tool_descriptors()
        );

        let mut arguments = ArgumentMap::new();
        arguments.insert("city".to_string(), json!("Paris"));
        let sync_result = sync_registry
            .call_tool("getWeatherRename", arguments.clone())
            .await
            .unwrap();
        let async_result = async_registry
            .call_tool("getWeatherRename", arguments)
            .await
            .unwrap();
        assert_eq!(sync_result, async_result);
    }

    #[tokio::test]
    async fn capabilities_reflect_non_empty_registries() {
        let (properties, _dir) = test_properties(true);
        let registry =
            McpRegistry::assemble(&properties, &WeatherService::new(), sample_targets()).unwrap();
        let caps = registry.capabilities(&properties);
        assert!(caps.tools.is_some());
        assert!(caps.prompts.is_some());
        assert!(caps.resources.is_some());
        assert!(caps.logging.is_none());
    }
}

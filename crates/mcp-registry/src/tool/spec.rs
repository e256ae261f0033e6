//! Tool specifications and the sync/async execution bridge

use std::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::content::CallToolResult;
use crate::error::Result;
use crate::schema::InputSchema;

/// Caller-supplied arguments, iteration order preserved.
///
/// Positional invocation relies on this: the Nth value in iteration order is
/// passed as the Nth argument to indirect targets.
pub type ArgumentMap = IndexMap<String, Value>;

/// Immutable caller-visible description of a tool
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: InputSchema,
}

/// Synchronous handler, executed on the caller's thread
pub type SyncToolHandler = Arc<dyn Fn(&ArgumentMap) -> Result<String> + Send + Sync>;

/// A tool descriptor bound to a synchronous handler
#[derive(Clone)]
pub struct SyncToolSpec {
    pub tool: ToolDescriptor,
    handler: SyncToolHandler,
}

impl SyncToolSpec {
    pub fn new(
        tool: ToolDescriptor,
        handler: impl Fn(&ArgumentMap) -> Result<String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            tool,
            handler: Arc::new(handler),
        }
    }

    /// Invoke the bound handler and fold the outcome into a protocol-legal
    /// result. A handler failure becomes an error-flagged result with a
    /// single text block; it never propagates past this boundary.
    pub fn invoke(&self, arguments: &ArgumentMap) -> CallToolResult {
        match (self.handler)(arguments) {
            Ok(text) => CallToolResult::text(text),
            Err(e) => CallToolResult::error(e.to_string()),
        }
    }
}

impl fmt::Debug for SyncToolSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncToolSpec").field("tool", &self.tool).finish()
    }
}

/// Asynchronous handler returning a boxed future
pub type AsyncToolHandler = Arc<dyn Fn(ArgumentMap) -> BoxFuture<'static, CallToolResult> + Send + Sync>;

/// A tool descriptor bound to an asynchronous handler
#[derive(Clone)]
pub struct AsyncToolSpec {
    pub tool: ToolDescriptor,
    handler: AsyncToolHandler,
}

impl AsyncToolSpec {
    /// Lift a synchronous spec into an asynchronous one.
    ///
    /// The descriptor is unchanged; execution moves onto tokio's bounded
    /// blocking pool so a slow handler cannot starve the transport's I/O
    /// tasks.
    pub fn from_sync(spec: SyncToolSpec) -> Self {
        let tool = spec.tool.clone();
        let handler: AsyncToolHandler = Arc::new(move |arguments| {
            let spec = spec.clone();
            async move {
                match tokio::task::spawn_blocking(move || spec.invoke(&arguments)).await {
                    Ok(result) => result,
                    Err(e) => CallToolResult::error(format!("Tool task failed: {e}")),
                }
            }
            .boxed()
        });
        Self { tool, handler }
    }

    pub async fn invoke(&self, arguments: ArgumentMap) -> CallToolResult {
        (self.handler)(arguments).await
    }
}

impl fmt::Debug for AsyncToolSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncToolSpec").field("tool", &self.tool).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Content;
    use crate::error::RegistryError;
    use crate::schema::{input_schema_for, ParamSpec};
    use serde_json::json;

    fn weather_spec() -> SyncToolSpec {
        let tool = ToolDescriptor {
            name: "getWeather".to_string(),
            description: "获取天气信息".to_string(),
            input_schema: input_schema_for(&[ParamSpec::string("city").with_description("城市名称")]),
        };
        SyncToolSpec::new(tool, |args| {
            let city = args
                .get("city")
                .and_then(|v| v.as_str())
                .ok_or_else(|| RegistryError::InvalidArguments("city".into()))?;
            Ok(format!("{city}: 晴天，温度25℃"))
        })
    }

    fn args(city: &str) -> ArgumentMap {
        let mut map = ArgumentMap::new();
        map.insert("city".to_string(), json!(city));
        map
    }

    #[test]
    fn successful_invoke_yields_single_text_block() {
        let result = weather_spec().invoke(&args("Paris"));
        assert!(!result.is_error());
        assert_eq!(result.content, vec![Content::text("Paris: 晴天，温度25℃")]);
    }

    #[test]
    fn handler_failure_becomes_error_result() {
        let tool = weather_spec().tool.clone();
        let spec = SyncToolSpec::new(tool, |_| {
            Err(RegistryError::Handler("weather service unavailable".into()))
        });
        let result = spec.invoke(&args("Paris"));
        assert!(result.is_error());
        assert_eq!(
            result.content,
            vec![Content::text("Handler error: weather service unavailable")]
        );
    }

    #[test]
    fn descriptor_serializes_with_input_schema_key() {
        let json = serde_json::to_value(&weather_spec().tool).unwrap();
        assert_eq!(json["name"], "getWeather");
        assert!(json["inputSchema"]["properties"]["city"].is_object());
    }

    #[tokio::test]
    async fn bridged_spec_keeps_descriptor_and_result() {
        let sync = weather_spec();
        let sync_result = sync.invoke(&args("Paris"));

        let bridged = AsyncToolSpec::from_sync(sync.clone());
        assert_eq!(bridged.tool, sync.tool);

        let async_result = bridged.invoke(args("Paris")).await;
        assert_eq!(async_result, sync_result);
    }

    #[tokio::test]
    async fn bridged_spec_folds_handler_errors() {
        let spec = SyncToolSpec::new(weather_spec().tool.clone(), |_| {
            Err(RegistryError::Handler("boom".into()))
        });
        let result = AsyncToolSpec::from_sync(spec).invoke(args("Paris")).await;
        assert!(result.is_error());
    }
}

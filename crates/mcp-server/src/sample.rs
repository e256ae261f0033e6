//! Sample capability set
//!
//! Two example tool sources: `WeatherService` registers its handlers in code,
//! `CityGuide` is only reachable through `tool-list.json` definitions.

use std::sync::Arc;

use mcp_registry::tool::{expect_arg_count, expect_str_arg};
use mcp_registry::{
    EndpointDescriptor, ParamSpec, RegistryError, Result, ServerEndpoint, TargetRegistry,
    ToolEndpoint, ToolRegistration, ToolTarget,
};
use serde_json::Value;

/// Code-registered tool source.
///
/// Descriptions are what the model uses to pick a tool, keep them precise
/// and non-overlapping across tools.
pub struct WeatherService;

impl WeatherService {
    pub fn new() -> Self {
        Self
    }
}

impl Default for WeatherService {
    fn default() -> Self {
        Self::new()
    }
}

impl ServerEndpoint for WeatherService {
    fn endpoint(&self) -> Option<EndpointDescriptor> {
        Some(EndpointDescriptor::new("示例MCP服务器", "1.0.0").with_port(9090))
    }
}

impl ToolEndpoint for WeatherService {
    fn registrations(&self) -> Vec<ToolRegistration> {
        vec![
            ToolRegistration::new(
                "getWeatherRename",
                "获取天气信息",
                vec![ParamSpec::string("city").with_description("城市名称")],
                |args| {
                    let city = args
                        .get("city")
                        .and_then(Value::as_str)
                        .ok_or_else(|| RegistryError::InvalidArguments("city".to_string()))?;
                    Ok(format!("{city}: 晴天，温度25℃"))
                },
            ),
            ToolRegistration::new(
                "getSpeciality",
                "获取城市特产",
                vec![
                    ParamSpec::string("city").with_description("城市名称"),
                    ParamSpec::string("type").with_description("特产类型"),
                ],
                |args| {
                    let city = args
                        .get("city")
                        .and_then(Value::as_str)
                        .ok_or_else(|| RegistryError::InvalidArguments("city".to_string()))?;
                    let kind = args
                        .get("type")
                        .and_then(Value::as_str)
                        .ok_or_else(|| RegistryError::InvalidArguments("type".to_string()))?;
                    Ok(format!("{kind}的{city}特产是小笼包"))
                },
            ),
        ]
    }
}

/// Declarative-path target; instances are constructed per call.
pub struct CityGuide;

impl ToolTarget for CityGuide {
    fn call(&self, method: &str, args: &[Value]) -> Result<String> {
        match method {
            "sayHello" => {
                expect_arg_count(method, args, 1)?;
                Ok(format!("Hello: {}", expect_str_arg(args, 0)?))
            }
            "getFamous" => {
                expect_arg_count(method, args, 2)?;
                Ok(format!(
                    "{}的地标是{}",
                    expect_str_arg(args, 0)?,
                    expect_str_arg(args, 1)?
                ))
            }
            _ => Err(RegistryError::MethodNotFound(format!("CityGuide::{method}"))),
        }
    }
}

/// Target registry for the declarative definition path.
pub fn sample_targets() -> Arc<TargetRegistry> {
    let mut targets = TargetRegistry::new();
    targets.register("CityGuide", || Ok(Box::new(CityGuide)));
    Arc::new(targets)
}

//! Direct tool registration and collection
//!
//! Handlers register explicitly through [`ToolRegistration`] instead of being
//! discovered by runtime introspection; a target exposes its registrations
//! once and the collector turns them into invocable specifications. Shared
//! state is whatever the registered closures capture, typically an `Arc`.

use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::endpoint::ServerEndpoint;
use crate::error::Result;
use crate::schema::{input_schema_for, ParamSpec};
use crate::tool::spec::{ArgumentMap, SyncToolHandler, SyncToolSpec, ToolDescriptor};

/// One explicitly registered tool handler
#[derive(Clone)]
pub struct ToolRegistration {
    pub name: String,
    pub description: String,
    pub params: Vec<ParamSpec>,
    pub handler: SyncToolHandler,
}

impl ToolRegistration {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        params: Vec<ParamSpec>,
        handler: impl Fn(&ArgumentMap) -> Result<String> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            params,
            handler: Arc::new(handler),
        }
    }
}

/// A capability target: carries the host-level endpoint descriptor and the
/// tool handlers it exposes. Nothing is exposed implicitly.
pub trait ToolEndpoint: ServerEndpoint {
    fn registrations(&self) -> Vec<ToolRegistration>;
}

/// Collect the tool specifications a target exposes.
///
/// A target without an endpoint descriptor contributes no capabilities;
/// that is logged and degrades to an empty list rather than failing startup.
pub fn collect_tools(target: &dyn ToolEndpoint) -> Vec<SyncToolSpec> {
    if target.endpoint().is_none() {
        error!("No endpoint descriptor on capability target, skipping tool collection");
        return Vec::new();
    }

    let mut specs = Vec::new();
    for registration in target.registrations() {
        if registration.description.is_empty() {
            // legal but the model has nothing to decide applicability with
            warn!(tool = %registration.name, "Tool registered without a description");
        }
        let tool = ToolDescriptor {
            name: registration.name.clone(),
            description: registration.description.clone(),
            input_schema: input_schema_for(&registration.params),
        };
        debug!(tool = %tool.name, "Collected tool");
        let handler = registration.handler.clone();
        specs.push(SyncToolSpec::new(tool, move |args| handler(args)));
    }
    specs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::EndpointDescriptor;
    use serde_json::json;

    struct WithEndpoint;

    impl ServerEndpoint for WithEndpoint {
        fn endpoint(&self) -> Option<EndpointDescriptor> {
            Some(EndpointDescriptor::new("test server", "1.0.0"))
        }
    }

    impl ToolEndpoint for WithEndpoint {
        fn registrations(&self) -> Vec<ToolRegistration> {
            vec![
                ToolRegistration::new(
                    "getWeather",
                    "获取天气信息",
                    vec![ParamSpec::string("city").with_description("城市名称")],
                    |args| Ok(format!("{}: 晴天", args["city"].as_str().unwrap_or(""))),
                ),
                ToolRegistration::new(
                    "getSpeciality",
                    "获取城市特产",
                    vec![
                        ParamSpec::string("city").with_description("城市名称"),
                        ParamSpec::string("type")
                            .with_description("特产类型")
                            .optional(),
                    ],
                    |_| Ok("小笼包".to_string()),
                ),
            ]
        }
    }

    struct WithoutEndpoint;

    impl ServerEndpoint for WithoutEndpoint {
        fn endpoint(&self) -> Option<EndpointDescriptor> {
            None
        }
    }

    impl ToolEndpoint for WithoutEndpoint {
        fn registrations(&self) -> Vec<ToolRegistration> {
            vec![ToolRegistration::new("ghost", "", vec![], |_| Ok(String::new()))]
        }
    }

    #[test]
    fn collects_one_spec_per_registration() {
        let specs = collect_tools(&WithEndpoint);
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].tool.name, "getWeather");
        assert_eq!(specs[1].tool.name, "getSpeciality");
    }

    #[test]
    fn required_set_follows_param_flags() {
        let specs = collect_tools(&WithEndpoint);
        assert_eq!(specs[0].tool.input_schema.required, vec!["city".to_string()]);
        // optional param excluded, required-by-default param kept
        assert_eq!(specs[1].tool.input_schema.required, vec!["city".to_string()]);
        assert_eq!(specs[1].tool.input_schema.properties.len(), 2);
    }

    #[test]
    fn missing_endpoint_descriptor_yields_empty_list() {
        assert!(collect_tools(&WithoutEndpoint).is_empty());
    }

    #[test]
    fn collected_spec_invokes_registered_handler() {
        let specs = collect_tools(&WithEndpoint);
        let mut args = ArgumentMap::new();
        args.insert("city".to_string(), json!("上海"));
        let result = specs[0].invoke(&args);
        assert!(!result.is_error());
        assert_eq!(
            result.content,
            vec![crate::content::Content::text("上海: 晴天")]
        );
    }
}

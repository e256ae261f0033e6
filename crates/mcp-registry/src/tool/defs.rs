//! Declarative tool definitions and indirect invocation
//!
//! Tools can be contributed by an external `tool-list.json` instead of code
//! registration. Each record names a target type and method; the binding is
//! resolved at call time against a [`TargetRegistry`], and a fresh target
//! instance is constructed per call.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{RegistryError, Result};
use crate::files;
use crate::schema::{input_schema_for, InputSchema, ParamSpec};
use crate::tool::spec::{SyncToolSpec, ToolDescriptor};

/// One record of the external tool definition list.
///
/// Unknown fields are ignored for forward compatibility. The wire field
/// names (`targetBeanClass`, `targetMethodName`) are kept as consumed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolDef {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: InputSchema,
    #[serde(rename = "targetBeanClass")]
    pub target_type: String,
    #[serde(rename = "targetMethodName")]
    pub target_method: String,
}

impl ToolDef {
    /// Scaffold a definition record for hand-editing: the schema is derived
    /// from the params, the description is left blank to be filled in.
    pub fn scaffold(
        target_type: impl Into<String>,
        method: impl Into<String>,
        params: &[ParamSpec],
    ) -> Self {
        let method = method.into();
        Self {
            name: method.clone(),
            description: String::new(),
            input_schema: input_schema_for(params),
            target_type: target_type.into(),
            target_method: method,
        }
    }
}

/// Load tool definitions from a JSON file.
///
/// An absent file or empty content contributes zero tools and is not an
/// error; malformed content is fatal to this source.
pub fn load_tool_defs(path: impl AsRef<Path>) -> Result<Vec<ToolDef>> {
    let path = path.as_ref();
    if !path.exists() {
        info!("No tool definition file at {}", path.display());
        return Ok(Vec::new());
    }
    let content = files::read_file(path)?;
    if content.trim().is_empty() {
        debug!("Empty tool definition file at {}", path.display());
        return Ok(Vec::new());
    }
    let defs: Vec<ToolDef> = serde_json::from_str(&content)?;
    debug!("Loaded {} tool definitions from {}", defs.len(), path.display());
    Ok(defs)
}

/// Write tool definitions as pretty-printed JSON, creating parent dirs.
pub fn write_tool_defs(path: impl AsRef<Path>, defs: &[ToolDef]) -> Result<()> {
    let json = serde_json::to_string_pretty(defs)?;
    files::write_file(path, &json)
}

/// An invocable target for indirect bindings.
///
/// Method lookup happens by name inside `call`; arguments arrive
/// positionally in the caller map's iteration order.
pub trait ToolTarget: Send + Sync {
    fn call(&self, method: &str, args: &[Value]) -> Result<String>;
}

type TargetFactory = Arc<dyn Fn() -> Result<Box<dyn ToolTarget>> + Send + Sync>;

/// Registry mapping target type names to constructor closures.
///
/// Populated once at build time; construction runs per call and has no
/// instance caching, so there is no shared mutable state to guard.
#[derive(Default)]
pub struct TargetRegistry {
    factories: HashMap<String, TargetFactory>,
}

impl TargetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        type_name: impl Into<String>,
        factory: impl Fn() -> Result<Box<dyn ToolTarget>> + Send + Sync + 'static,
    ) {
        self.factories.insert(type_name.into(), Arc::new(factory));
    }

    /// Construct a fresh instance of the named target type.
    pub fn construct(&self, type_name: &str) -> Result<Box<dyn ToolTarget>> {
        let factory = self
            .factories
            .get(type_name)
            .ok_or_else(|| RegistryError::TargetNotFound(type_name.to_string()))?;
        factory().map_err(|e| RegistryError::TargetConstruction(type_name.to_string(), e.to_string()))
    }
}

/// Turn definition records into invocable specifications.
///
/// Descriptors are taken verbatim from the records; resolution failures
/// (unknown type or method, construction failure, bad arguments) surface at
/// call time as error-flagged results, never as load-time errors.
pub fn build_def_specs(defs: Vec<ToolDef>, targets: Arc<TargetRegistry>) -> Vec<SyncToolSpec> {
    defs.into_iter()
        .map(|def| {
            let tool = ToolDescriptor {
                name: def.name,
                description: def.description,
                input_schema: def.input_schema,
            };
            let targets = targets.clone();
            let type_name = def.target_type;
            let method = def.target_method;
            SyncToolSpec::new(tool, move |args| {
                let target = targets.construct(&type_name)?;
                let positional: Vec<Value> = args.values().cloned().collect();
                target.call(&method, &positional)
            })
        })
        .collect()
}

/// Check the positional argument count a target method expects.
pub fn expect_arg_count(method: &str, args: &[Value], count: usize) -> Result<()> {
    if args.len() != count {
        return Err(RegistryError::InvalidArguments(format!(
            "{method} expects {count} arguments, got {}",
            args.len()
        )));
    }
    Ok(())
}

/// Fetch a positional argument as a string slice.
pub fn expect_str_arg<'a>(args: &'a [Value], index: usize) -> Result<&'a str> {
    args.get(index).and_then(Value::as_str).ok_or_else(|| {
        RegistryError::InvalidArguments(format!("expected string argument at position {index}"))
    })
}

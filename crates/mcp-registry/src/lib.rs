//! # mcp-registry
//!
//! Capability registration and invocation core for an MCP server.
//! Builds immutable tool/prompt/resource registries at startup and
//! invokes the bound handlers uniformly, folding every failure into a
//! protocol-legal error result.

pub mod content;
pub mod endpoint;
mod error;
pub mod files;
pub mod prompt;
pub mod resource;
pub mod schema;
pub mod tool;

pub use content::{CallToolResult, Content, GetPromptResult, PromptMessage, ReadResourceResult, ResourceContents, Role};
pub use endpoint::{EndpointDescriptor, ServerEndpoint, ServerKind, TransportKind};
pub use error::{RegistryError, Result};
pub use prompt::{AsyncPromptSpec, PromptArgument, PromptDescriptor, PromptProvider, SyncPromptSpec};
pub use resource::{AsyncResourceSpec, ResourceDescriptor, ResourceProvider, SyncResourceSpec};
pub use schema::{input_schema_for, InputSchema, ParamSpec, ParamType, SchemaProperty};
pub use tool::{
    build_def_specs, collect_tools, expect_arg_count, expect_str_arg, load_tool_defs,
    write_tool_defs, ArgumentMap, AsyncToolSpec, SyncToolSpec, TargetRegistry, ToolDef,
    ToolDescriptor, ToolEndpoint, ToolRegistration, ToolTarget,
};

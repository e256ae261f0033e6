//! Tool registration, definition loading and invocation

mod defs;
mod registry;
mod spec;

pub use defs::{
    build_def_specs, expect_arg_count, expect_str_arg, load_tool_defs, write_tool_defs,
    TargetRegistry, ToolDef, ToolTarget,
};
pub use registry::{collect_tools, ToolEndpoint, ToolRegistration};
pub use spec::{ArgumentMap, AsyncToolSpec, SyncToolHandler, SyncToolSpec, ToolDescriptor};

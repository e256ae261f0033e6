//! Prompt registry: built-in example prompts plus file-backed prompts
//!
//! File-backed prompts are declared in `<prompt_dir>/prompt-list.json` and
//! resolved from a same-named file: `.json` templates get one `%s`
//! placeholder replaced per declared argument in declaration order (not by
//! name), image files become base64 image content.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::content::{Content, GetPromptResult, PromptMessage, ResourceContents, Role};
use crate::error::{RegistryError, Result};
use crate::files::{self, FileKind};
use crate::tool::ArgumentMap;

const PROMPT_LIST_FILE: &str = "prompt-list.json";
const ARGUMENT_PLACEHOLDER: &str = "%s";
// json templates carrying embedded resources are not supported
const EMBEDDED_RESOURCE_KEYWORD: &str = "\"resource\":";

/// One declared prompt argument
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PromptArgument {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub required: bool,
}

impl PromptArgument {
    pub fn new(name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            description: Some(description.into()),
            required,
        }
    }
}

/// Caller-visible prompt metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PromptDescriptor {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub arguments: Vec<PromptArgument>,
}

impl PromptDescriptor {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: Some(description.into()),
            arguments: Vec::new(),
        }
    }

    pub fn with_arguments(mut self, arguments: Vec<PromptArgument>) -> Self {
        self.arguments = arguments;
        self
    }
}

/// Shape of `prompt-list.json`
#[derive(Debug, Clone, Deserialize)]
struct PromptListFile {
    prompts: Vec<PromptDescriptor>,
}

type PromptResolver = Arc<dyn Fn(&ArgumentMap) -> Result<GetPromptResult> + Send + Sync>;

/// A prompt descriptor bound to a synchronous resolver
#[derive(Clone)]
pub struct SyncPromptSpec {
    pub prompt: PromptDescriptor,
    resolver: PromptResolver,
}

impl SyncPromptSpec {
    pub fn new(
        prompt: PromptDescriptor,
        resolver: impl Fn(&ArgumentMap) -> Result<GetPromptResult> + Send + Sync + 'static,
    ) -> Self {
        Self {
            prompt,
            resolver: Arc::new(resolver),
        }
    }

    pub fn resolve(&self, arguments: &ArgumentMap) -> Result<GetPromptResult> {
        (self.resolver)(arguments)
    }
}

impl fmt::Debug for SyncPromptSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncPromptSpec").field("prompt", &self.prompt).finish()
    }
}

/// A prompt descriptor bound to an asynchronous resolver
#[derive(Clone)]
pub struct AsyncPromptSpec {
    pub prompt: PromptDescriptor,
    resolver: Arc<dyn Fn(ArgumentMap) -> BoxFuture<'static, Result<GetPromptResult>> + Send + Sync>,
}

impl AsyncPromptSpec {
    /// Lift a synchronous prompt spec onto the blocking pool; the descriptor
    /// is unchanged.
    pub fn from_sync(spec: SyncPromptSpec) -> Self {
        let prompt = spec.prompt.clone();
        let resolver = Arc::new(move |arguments: ArgumentMap| {
            let spec = spec.clone();
            async move {
                tokio::task::spawn_blocking(move || spec.resolve(&arguments))
                    .await
                    .map_err(|e| RegistryError::Handler(format!("Prompt task failed: {e}")))?
            }
            .boxed()
        });
        Self { prompt, resolver }
    }

    pub async fn resolve(&self, arguments: ArgumentMap) -> Result<GetPromptResult> {
        (self.resolver)(arguments).await
    }
}

/// Builds the full prompt registry
pub struct PromptProvider {
    prompt_dir: PathBuf,
}

impl PromptProvider {
    pub fn new(prompt_dir: impl Into<PathBuf>) -> Self {
        Self {
            prompt_dir: prompt_dir.into(),
        }
    }

    /// All prompts: built-in examples plus the declared file-backed ones.
    ///
    /// A declared prompt whose file is missing or of an unsupported type
    /// fails the whole build.
    pub fn sync_prompts(&self) -> Result<Vec<SyncPromptSpec>> {
        let mut prompts = vec![
            text_prompt(),
            text_prompt_with_arguments(),
            embedded_resource_prompt(),
            image_prompt(),
        ];
        self.add_file_prompts(&mut prompts)?;
        Ok(prompts)
    }

    pub fn async_prompts(&self) -> Result<Vec<AsyncPromptSpec>> {
        Ok(self
            .sync_prompts()?
            .into_iter()
            .map(AsyncPromptSpec::from_sync)
            .collect())
    }

    fn add_file_prompts(&self, prompts: &mut Vec<SyncPromptSpec>) -> Result<()> {
        let list_path = self.prompt_dir.join(PROMPT_LIST_FILE);
        let list: PromptListFile = serde_json::from_str(&files::read_file(&list_path)?)?;

        for descriptor in list.prompts {
            let (kind, content) = files::read_by_stem(&self.prompt_dir, &descriptor.name)?;
            match kind {
                FileKind::Json => {
                    if content.to_lowercase().contains(EMBEDDED_RESOURCE_KEYWORD) {
                        warn!(prompt = %descriptor.name, "Embedded-resource prompt templates are not supported, skipping");
                        continue;
                    }
                    debug!(prompt = %descriptor.name, "Adding file-backed text prompt");
                    prompts.push(file_text_prompt(descriptor, content));
                }
                FileKind::Image(mime_type) => {
                    debug!(prompt = %descriptor.name, "Adding file-backed image prompt");
                    prompts.push(file_image_prompt(descriptor, content, mime_type));
                }
            }
        }
        Ok(())
    }
}

/// Replace one `%s` occurrence per declared argument, in declaration order.
///
/// The Nth argument fills the Nth remaining placeholder; a missing caller
/// value substitutes an empty string. Deliberately not name-based.
fn substitute_arguments(
    template: &str,
    declared: &[PromptArgument],
    arguments: &ArgumentMap,
) -> String {
    let mut content = template.to_string();
    for argument in declared {
        let value = arguments
            .get(&argument.name)
            .and_then(|v| v.as_str())
            .unwrap_or("");
        content = content.replacen(ARGUMENT_PLACEHOLDER, value, 1);
    }
    content
}

fn file_text_prompt(descriptor: PromptDescriptor, template: String) -> SyncPromptSpec {
    let declared = descriptor.arguments.clone();
    SyncPromptSpec::new(descriptor, move |arguments| {
        let content = substitute_arguments(&template, &declared, arguments);
        Ok(serde_json::from_str(&content)?)
    })
}

fn file_image_prompt(
    descriptor: PromptDescriptor,
    data: String,
    mime_type: &'static str,
) -> SyncPromptSpec {
    let description = descriptor.description.clone().unwrap_or_default();
    SyncPromptSpec::new(descriptor, move |_| {
        Ok(GetPromptResult::new(
            description.clone(),
            vec![PromptMessage::new(
                Role::User,
                Content::image(data.clone(), mime_type),
            )],
        ))
    })
}

fn text_prompt() -> SyncPromptSpec {
    let prompt = PromptDescriptor::new("test-prompt", "Test Prompt");
    SyncPromptSpec::new(prompt, |_| {
        Ok(GetPromptResult::new(
            "Test prompt description",
            vec![PromptMessage::new(Role::Assistant, Content::text("Test content"))],
        ))
    })
}

fn text_prompt_with_arguments() -> SyncPromptSpec {
    let prompt = PromptDescriptor::new("test-prompt-argument", "A test prompt").with_arguments(vec![
        PromptArgument::new("arg1", "First argument", true),
        PromptArgument::new("arg2", "Second argument", false),
    ]);
    SyncPromptSpec::new(prompt, |arguments| {
        let value = |name: &str| {
            arguments
                .get(name)
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string()
        };
        Ok(GetPromptResult::new(
            "Test prompt with argument description",
            vec![PromptMessage::new(
                Role::Assistant,
                Content::text(format!(
                    "Test prompt: arg1: {}, arg2: {}",
                    value("arg1"),
                    value("arg2")
                )),
            )],
        ))
    })
}

fn embedded_resource_prompt() -> SyncPromptSpec {
    let prompt = PromptDescriptor::new("test-prompt-embeddedResource", "Test Embedded Resources Prompt");
    SyncPromptSpec::new(prompt, |_| {
        Ok(GetPromptResult::new(
            "Test Embedded Resources prompt description",
            vec![PromptMessage::new(
                Role::User,
                Content::Resource {
                    resource: ResourceContents::text(
                        "resource://embeddedResource",
                        "text/plain",
                        "Sample resource content",
                    ),
                },
            )],
        ))
    })
}

fn image_prompt() -> SyncPromptSpec {
    // image data must not carry a data:image/png;base64, prefix
    let data = include_str!("../assets/image_base64.txt").trim();
    let prompt = PromptDescriptor::new("test-prompt-image", "Test Image Prompt");
    SyncPromptSpec::new(prompt, move |_| {
        Ok(GetPromptResult::new(
            "Test Image prompt description",
            vec![PromptMessage::new(Role::User, Content::image(data, "image/png"))],
        ))
    })
}

//! Resource registry
//!
//! Ships a single static example resource; deployments extend this with
//! their own specifications. No dynamic discovery.

use std::fmt;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use serde::{Deserialize, Serialize};

use crate::content::ReadResourceResult;
use crate::error::{RegistryError, Result};

const TEST_RESOURCE_URI: &str = "test://resource";

/// Caller-visible resource metadata
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResourceDescriptor {
    pub uri: String,
    pub name: String,
    #[serde(rename = "mimeType", skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

type ResourceReader = Arc<dyn Fn(&str) -> Result<ReadResourceResult> + Send + Sync>;

/// A resource descriptor bound to a synchronous reader
#[derive(Clone)]
pub struct SyncResourceSpec {
    pub resource: ResourceDescriptor,
    reader: ResourceReader,
}

impl SyncResourceSpec {
    pub fn new(
        resource: ResourceDescriptor,
        reader: impl Fn(&str) -> Result<ReadResourceResult> + Send + Sync + 'static,
    ) -> Self {
        Self {
            resource,
            reader: Arc::new(reader),
        }
    }

    pub fn read(&self, uri: &str) -> Result<ReadResourceResult> {
        (self.reader)(uri)
    }
}

impl fmt::Debug for SyncResourceSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncResourceSpec").field("resource", &self.resource).finish()
    }
}

/// A resource descriptor bound to an asynchronous reader
#[derive(Clone)]
pub struct AsyncResourceSpec {
    pub resource: ResourceDescriptor,
    reader: Arc<dyn Fn(String) -> BoxFuture<'static, Result<ReadResourceResult>> + Send + Sync>,
}

impl AsyncResourceSpec {
    pub fn from_sync(spec: SyncResourceSpec) -> Self {
        let resource = spec.resource.clone();
        let reader = Arc::new(move |uri: String| {
            let spec = spec.clone();
            async move {
                tokio::task::spawn_blocking(move || spec.read(&uri))
                    .await
                    .map_err(|e| RegistryError::Handler(format!("Resource task failed: {e}")))?
            }
            .boxed()
        });
        Self { resource, reader }
    }

    pub async fn read(&self, uri: String) -> Result<ReadResourceResult> {
        (self.reader)(uri).await
    }
}

/// Builds the resource registry
#[derive(Default)]
pub struct ResourceProvider;

impl ResourceProvider {
    pub fn new() -> Self {
        Self
    }

    /// The example static resource; its read always returns empty content.
    pub fn sync_resources(&self) -> Vec<SyncResourceSpec> {
        let resource = ResourceDescriptor {
            uri: TEST_RESOURCE_URI.to_string(),
            name: "Test Resource".to_string(),
            mime_type: Some("text/plain".to_string()),
            description: Some("Test resource description".to_string()),
        };
        vec![SyncResourceSpec::new(resource, |_| {
            Ok(ReadResourceResult { contents: Vec::new() })
        })]
    }

    pub fn async_resources(&self) -> Vec<AsyncResourceSpec> {
        self.sync_resources()
            .into_iter()
            .map(AsyncResourceSpec::from_sync)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn static_resource_reads_empty() {
        let resources = ResourceProvider::new().sync_resources();
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].resource.uri, "test://resource");
        let result = resources[0].read("test://resource").unwrap();
        assert!(result.contents.is_empty());
    }

    #[tokio::test]
    async fn async_resource_matches_sync() {
        let provider = ResourceProvider::new();
        let sync = provider.sync_resources();
        let bridged = provider.async_resources();
        assert_eq!(bridged[0].resource, sync[0].resource);
        let result = bridged[0].read("test://resource".to_string()).await.unwrap();
        assert_eq!(result, sync[0].read("test://resource").unwrap());
    }
}

//! Content blocks and result shapes shared by tools, prompts and resources

use serde::{Deserialize, Serialize};

/// One unit of result payload, tagged the way the MCP wire format expects
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Content {
    Text {
        text: String,
    },
    Image {
        data: String,
        #[serde(rename = "mimeType")]
        mime_type: String,
    },
    Resource {
        resource: ResourceContents,
    },
}

impl Content {
    pub fn text(text: impl Into<String>) -> Self {
        Content::Text { text: text.into() }
    }

    pub fn image(data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Content::Image {
            data: data.into(),
            mime_type: mime_type.into(),
        }
    }
}

/// Contents of a resource, embedded in a result or read directly
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResourceContents {
    pub uri: String,
    #[serde(rename = "mimeType", skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blob: Option<String>,
}

impl ResourceContents {
    pub fn text(uri: impl Into<String>, mime_type: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            mime_type: Some(mime_type.into()),
            text: Some(text.into()),
            blob: None,
        }
    }
}

/// Tool call result
///
/// Exactly one of normal content or error content populates the list;
/// `is_error` implies the sole block is a human-readable failure message.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CallToolResult {
    pub content: Vec<Content>,
    #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

impl CallToolResult {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![Content::text(text)],
            is_error: Some(false),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            content: vec![Content::text(message)],
            is_error: Some(true),
        }
    }

    pub fn is_error(&self) -> bool {
        self.is_error.unwrap_or(false)
    }
}

/// Message roles in prompt results
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One role-tagged message within a prompt result
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PromptMessage {
    pub role: Role,
    pub content: Content,
}

impl PromptMessage {
    pub fn new(role: Role, content: Content) -> Self {
        Self { role, content }
    }
}

/// Result of resolving a prompt
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GetPromptResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub messages: Vec<PromptMessage>,
}

impl GetPromptResult {
    pub fn new(description: impl Into<String>, messages: Vec<PromptMessage>) -> Self {
        Self {
            description: Some(description.into()),
            messages,
        }
    }
}

/// Result of reading a resource
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReadResourceResult {
    pub contents: Vec<ResourceContents>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_result_has_single_block() {
        let result = CallToolResult::text("Paris: 晴天，温度25℃");
        assert_eq!(result.content.len(), 1);
        assert!(!result.is_error());
        assert_eq!(result.content[0], Content::text("Paris: 晴天，温度25℃"));
    }

    #[test]
    fn error_result_is_flagged() {
        let result = CallToolResult::error("boom");
        assert!(result.is_error());
        assert_eq!(result.content, vec![Content::text("boom")]);
    }

    #[test]
    fn content_serializes_with_type_tag() {
        let json = serde_json::to_value(Content::image("aGk=", "image/png")).unwrap();
        assert_eq!(json["type"], "image");
        assert_eq!(json["mimeType"], "image/png");
    }

    #[test]
    fn prompt_result_round_trips_mcp_shape() {
        let raw = r#"{
            "description": "desc",
            "messages": [
                {"role": "assistant", "content": {"type": "text", "text": "hello"}}
            ]
        }"#;
        let result: GetPromptResult = serde_json::from_str(raw).unwrap();
        assert_eq!(result.messages[0].role, Role::Assistant);
        assert_eq!(result.messages[0].content, Content::text("hello"));
    }
}

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text {
        text: String,
    },
    ToolUse {
        id: String,
        name: String,
        input: serde_json::Value,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmMessage {
    pub role: String,
    pub content: Vec<ContentBlock>,
}

impl LlmMessage {
    pub fn new(role: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: vec![ContentBlock::Text { text: text.into() }],
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new("user", text)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new("assistant", text)
    }

    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|b| match b {
                ContentBlock::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn tool_uses(&self) -> Vec<(&str, &str, &serde_json::Value)> {
        self.content
            .iter()
            .filter_map(|b| match b {
                ContentBlock::ToolUse { id, name, input } => {
                    Some((id.as_str(), name.as_str(), input))
                }
                _ => None,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDef {
    pub name: String,
    pub description: String,
    pub input_schema: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmRequest {
    pub model: String,
    pub system: Option<String>,
    pub messages: Vec<LlmMessage>,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolDef>,
}

fn default_max_tokens() -> u32 {
    2048
}

fn default_temperature() -> f32 {
    0.3
}

impl LlmRequest {
    pub fn simple(model: String, system: Option<String>, user: String) -> Self {
        Self {
            model,
            system,
            messages: vec![LlmMessage::user(user)],
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            tools: vec![],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmResponse {
    pub text: String,
    pub content: Vec<ContentBlock>,
    pub input_tokens: Option<u32>,
    pub output_tokens: Option<u32>,
    pub stop_reason: Option<String>,
}

impl LlmResponse {
    /// First tool invocation in the response, if any.
    pub fn tool_use(&self) -> Option<(&str, &serde_json::Value)> {
        self.content.iter().find_map(|b| match b {
            ContentBlock::ToolUse { name, input, .. } => Some((name.as_str(), input)),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_block_text_serde() {
        let block = ContentBlock::Text {
            text: "hello".into(),
        };
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["type"], "text");
        assert_eq!(json["text"], "hello");
        let roundtrip: ContentBlock = serde_json::from_value(json).unwrap();
        assert!(matches!(roundtrip, ContentBlock::Text { text } if text == "hello"));
    }

    #[test]
    fn content_block_tool_use_serde() {
        let block = ContentBlock::ToolUse {
            id: "call_123".into(),
            name: "event_description_ready".into(),
            input: serde_json::json!({"event_type": "wedding"}),
        };
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["type"], "tool_use");
        assert_eq!(json["id"], "call_123");
        assert_eq!(json["name"], "event_description_ready");
        let roundtrip: ContentBlock = serde_json::from_value(json).unwrap();
        assert!(
            matches!(roundtrip, ContentBlock::ToolUse { name, .. } if name == "event_description_ready")
        );
    }

    #[test]
    fn llm_message_text_helper() {
        let msg = LlmMessage::user("hello");
        assert_eq!(msg.role, "user");
        assert_eq!(msg.text(), "hello");
    }

    #[test]
    fn llm_message_with_tool_use() {
        let msg = LlmMessage {
            role: "assistant".into(),
            content: vec![
                ContentBlock::Text {
                    text: "One moment...".into(),
                },
                ContentBlock::ToolUse {
                    id: "call_1".into(),
                    name: "event_description_ready".into(),
                    input: serde_json::json!({"event_type": "gala"}),
                },
            ],
        };
        assert_eq!(msg.text(), "One moment...");
        assert_eq!(msg.tool_uses().len(), 1);
    }

    #[test]
    fn request_defaults_pin_temperature() {
        let req = LlmRequest::simple("gpt-4".into(), None, "hello".into());
        assert_eq!(req.temperature, 0.3);
        assert_eq!(req.max_tokens, 2048);
        assert!(req.tools.is_empty());
    }

    #[test]
    fn response_tool_use_picks_first_invocation() {
        let resp = LlmResponse {
            text: String::new(),
            content: vec![
                ContentBlock::Text { text: "ok".into() },
                ContentBlock::ToolUse {
                    id: "call_1".into(),
                    name: "event_description_ready".into(),
                    input: serde_json::json!({"event_type": "picnic"}),
                },
            ],
            input_tokens: None,
            output_tokens: None,
            stop_reason: Some("tool_use".into()),
        };
        let (name, input) = resp.tool_use().unwrap();
        assert_eq!(name, "event_description_ready");
        assert_eq!(input["event_type"], "picnic");
    }

    #[test]
    fn response_tool_use_none_for_plain_text() {
        let resp = LlmResponse {
            text: "Tell me more".into(),
            content: vec![ContentBlock::Text {
                text: "Tell me more".into(),
            }],
            input_tokens: Some(10),
            output_tokens: Some(5),
            stop_reason: Some("end_turn".into()),
        };
        assert!(resp.tool_use().is_none());
    }
}

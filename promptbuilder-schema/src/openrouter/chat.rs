use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionRequest {
    /// Single user turn carrying the whole prompt.
    pub fn single_user_message(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: Some(prompt.into()),
            }],
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChatChoice {
    #[serde(default)]
    pub message: Option<ChatReplyMessage>,
}

/// Assistant message in a completion reply. `content` is `None` when the key
/// is absent and `Some(None)` when upstream sent an explicit `null`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ChatReplyMessage {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub content: Option<Option<String>>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl ChatCompletionResponse {
    /// Text of `choices[0].message.content`. A `null` content reads as empty
    /// text; a missing key yields `None`.
    pub fn first_content(&self) -> Option<&str> {
        let content = self.choices.first()?.message.as_ref()?.content.as_ref()?;
        Some(content.as_deref().unwrap_or_default())
    }
}

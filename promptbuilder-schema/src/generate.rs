use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratePromptDto {
    pub category_id: i64,
    /// Values substituted into the category's template.
    #[serde(default = "empty_object")]
    pub input: Value,
}

fn empty_object() -> Value {
    Value::Object(serde_json::Map::new())
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LlmResponseDto {
    /// The rendered template, before any meta-prompt wrapping.
    pub generated_prompt: String,
    pub response: String,
    pub model: String,
}

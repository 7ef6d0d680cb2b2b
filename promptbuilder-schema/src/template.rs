use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptTemplateDto {
    pub id: i64,
    pub name: String,
    /// Template body with `{{ variable }}` placeholders.
    pub template: String,
    /// Default model identifier used when generating from this template.
    pub model: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreatePromptTemplateDto {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub template: String,
    #[serde(default)]
    pub model: String,
}

/// Updates replace every field, so they share the create shape.
pub type UpdatePromptTemplateDto = CreatePromptTemplateDto;

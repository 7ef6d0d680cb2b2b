//! Export/import document. Records carry their original ids so that foreign
//! keys can be remapped on import.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DataSnapshot {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "PromptTemplates")]
    pub prompt_templates: Vec<TemplateRecord>,
    #[serde(default, alias = "Categories")]
    pub categories: Vec<CategoryRecord>,
    #[serde(default, alias = "ApiProviders")]
    pub api_providers: Vec<ProviderRecord>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateRecord {
    #[serde(alias = "Id")]
    pub id: i64,
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(alias = "Template")]
    pub template: String,
    #[serde(default, alias = "Model")]
    pub model: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRecord {
    #[serde(alias = "Id")]
    pub id: i64,
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(default, alias = "ParentId")]
    pub parent_id: Option<i64>,
    #[serde(alias = "PromptTemplateId")]
    pub prompt_template_id: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderRecord {
    #[serde(default, alias = "Id")]
    pub id: i64,
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(alias = "ProviderType")]
    pub provider_type: String,
    #[serde(default, alias = "ApiKey")]
    pub api_key: String,
    #[serde(alias = "ApiUrl")]
    pub api_url: String,
    #[serde(default, alias = "IsDefault")]
    pub is_default: bool,
    #[serde(default, alias = "ConfigOptions")]
    pub config_options: Option<String>,
}

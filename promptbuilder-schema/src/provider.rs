use serde::{Deserialize, Serialize};

/// Provider as exposed over the API. The API key is write-only and never
/// serialized back to clients.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiProviderDto {
    pub id: i64,
    pub name: String,
    pub provider_type: String,
    pub api_url: String,
    pub is_default: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateApiProviderDto {
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_provider_type")]
    pub provider_type: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub api_url: String,
    #[serde(default)]
    pub is_default: bool,
    /// Free-form JSON blob, stored verbatim.
    #[serde(default)]
    pub config_options: Option<String>,
}

impl Default for CreateApiProviderDto {
    fn default() -> Self {
        Self {
            name: String::new(),
            provider_type: default_provider_type(),
            api_key: String::new(),
            api_url: String::new(),
            is_default: false,
            config_options: None,
        }
    }
}

pub type UpdateApiProviderDto = CreateApiProviderDto;

fn default_provider_type() -> String {
    "OpenRouter".to_string()
}

/// Normalized model listing entry, independent of the upstream provider shape.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LlmModelDto {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub context_length: Option<u64>,
    pub provider: Option<String>,
    pub pricing_prompt: Option<f64>,
    pub pricing_completion: Option<f64>,
    pub pricing_image: Option<f64>,
    pub pricing_request: Option<f64>,
    pub pricing_input_cache_read: Option<f64>,
    pub pricing_input_cache_write: Option<f64>,
    pub pricing_web_search: Option<f64>,
    pub pricing_internal_reasoning: Option<f64>,
}

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct OpenRouterModelList {
    #[serde(default)]
    pub data: Vec<OpenRouterModel>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct OpenRouterModel {
    pub id: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub context_length: Option<u64>,
    pub provider: Option<String>,
    pub pricing: Option<OpenRouterPricing>,
}

/// OpenRouter reports prices as decimal strings.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct OpenRouterPricing {
    pub prompt: Option<String>,
    pub completion: Option<String>,
    pub image: Option<String>,
    pub request: Option<String>,
    pub input_cache_read: Option<String>,
    pub input_cache_write: Option<String>,
    pub web_search: Option<String>,
    pub internal_reasoning: Option<String>,
}

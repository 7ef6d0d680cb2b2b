use serde::{Deserialize, Serialize};
use url::Url;

pub const DEFAULT_META_PROMPT: &str = "You are an expert assistant. Answer the request below as completely and precisely as you can.\n\n{{ prompt }}";

/// Application-level LLM settings.
///
/// The endpoint fields are only consulted when no provider in the database is
/// marked default.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LlmConfig {
    /// Provider type of the fallback endpoint ("OpenRouter" or "LiteLLM").
    /// TOML: `llm.api_type`. Default: `OpenRouter`.
    #[serde(default = "default_api_type")]
    pub api_type: String,

    /// Bearer token for the fallback endpoint.
    /// TOML: `llm.api_key`. Default: unset.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Base URL of the fallback endpoint, e.g. `https://openrouter.ai/api/v1`.
    /// TOML: `llm.api_url`. Default: unset.
    #[serde(default)]
    pub api_url: Option<Url>,

    /// Wrapper applied to a rendered prompt before it is sent; `{{ prompt }}`
    /// is replaced by the rendered text. An empty string sends the prompt as is.
    /// TOML: `llm.meta_prompt`.
    #[serde(default = "default_meta_prompt")]
    pub meta_prompt: String,

    /// `HTTP-Referer` attribution header sent to OpenRouter.
    /// TOML: `llm.referer`. Default: `https://promptbuilder.app`.
    #[serde(default = "default_referer")]
    pub referer: String,

    /// `X-Title` attribution header sent to OpenRouter.
    /// TOML: `llm.app_title`. Default: `PromptBuilder`.
    #[serde(default = "default_app_title")]
    pub app_title: String,

    /// Optional upstream HTTP proxy for the reqwest client.
    /// TOML: `llm.proxy`. Example: `http://127.0.0.1:1080`.
    #[serde(default)]
    pub proxy: Option<Url>,

    /// TOML: `llm.connect_timeout_secs`. Default: `10`.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// TOML: `llm.request_timeout_secs`. Default: `120`.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_type: default_api_type(),
            api_key: None,
            api_url: None,
            meta_prompt: default_meta_prompt(),
            referer: default_referer(),
            app_title: default_app_title(),
            proxy: None,
            connect_timeout_secs: default_connect_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_api_type() -> String {
    "OpenRouter".to_string()
}

fn default_meta_prompt() -> String {
    DEFAULT_META_PROMPT.to_string()
}

fn default_referer() -> String {
    "https://promptbuilder.app".to_string()
}

fn default_app_title() -> String {
    "PromptBuilder".to_string()
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_request_timeout_secs() -> u64 {
    120
}

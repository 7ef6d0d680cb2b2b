//! Client for OpenAI-compatible chat-completion APIs (OpenRouter, LiteLLM).

mod models;

use std::time::Duration;

use promptbuilder_schema::openrouter::{ChatCompletionRequest, ChatCompletionResponse};
use reqwest::header::{HeaderName, HeaderValue};
use tracing::debug;
use url::Url;

use crate::config::LlmConfig;
use crate::db::DbApiProvider;
use crate::error::LlmError;

pub use models::to_model_dto;

const CHAT_COMPLETIONS_PATH: &str = "chat/completions";
const MODELS_PATH: &str = "models";

const HTTP_REFERER: HeaderName = HeaderName::from_static("http-referer");
const X_TITLE: HeaderName = HeaderName::from_static("x-title");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderKind {
    #[default]
    OpenRouter,
    LiteLLM,
}

impl ProviderKind {
    /// Case-insensitive; anything unrecognized is treated as OpenRouter.
    pub fn from_tag(tag: &str) -> Self {
        if tag.trim().eq_ignore_ascii_case("litellm") {
            ProviderKind::LiteLLM
        } else {
            ProviderKind::OpenRouter
        }
    }
}

/// Normalizes a stored provider URL to its base. A URL that already points at
/// the completion endpoint is accepted and cut back to the base.
pub fn base_url(raw: &str) -> Result<Url, url::ParseError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let base = trimmed
        .strip_suffix(CHAT_COMPLETIONS_PATH)
        .map_or(trimmed, |s| s.trim_end_matches('/'));
    Url::parse(base)
}

fn join(base: &Url, path: &str) -> String {
    format!("{}/{path}", base.as_str().trim_end_matches('/'))
}

/// Where and how to send a completion.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmTarget {
    pub kind: ProviderKind,
    pub base_url: Url,
    pub api_key: String,
}

impl LlmTarget {
    pub fn from_provider(provider: &DbApiProvider) -> Result<Self, LlmError> {
        Ok(Self {
            kind: ProviderKind::from_tag(&provider.provider_type),
            base_url: base_url(&provider.api_url)?,
            api_key: provider.api_key.clone(),
        })
    }

    pub fn chat_completions_url(&self) -> String {
        join(&self.base_url, CHAT_COMPLETIONS_PATH)
    }

    pub fn models_url(&self) -> String {
        join(&self.base_url, MODELS_PATH)
    }
}

#[derive(Clone)]
pub struct LlmClient {
    http: reqwest::Client,
    referer: HeaderValue,
    app_title: HeaderValue,
    fallback_kind: ProviderKind,
    fallback_key: Option<String>,
    fallback_url: Option<Url>,
}

impl LlmClient {
    pub fn new(cfg: &LlmConfig) -> Result<Self, LlmError> {
        let mut builder = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
            .timeout(Duration::from_secs(cfg.request_timeout_secs));

        if let Some(proxy_url) = cfg.proxy.as_ref() {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url.as_str())?);
        }

        Ok(Self {
            http: builder.build()?,
            referer: header_value(&cfg.referer, "https://promptbuilder.app"),
            app_title: header_value(&cfg.app_title, "PromptBuilder"),
            fallback_kind: ProviderKind::from_tag(&cfg.api_type),
            fallback_key: cfg.api_key.clone().filter(|k| !k.trim().is_empty()),
            fallback_url: cfg.api_url.clone(),
        })
    }

    /// The default provider when there is one, otherwise the configured
    /// fallback endpoint.
    pub fn resolve_target(&self, default_provider: Option<&DbApiProvider>) -> Result<LlmTarget, LlmError> {
        if let Some(provider) = default_provider {
            return LlmTarget::from_provider(provider);
        }

        let api_key = self
            .fallback_key
            .clone()
            .ok_or(LlmError::NotConfigured("api_key"))?;
        let url = self
            .fallback_url
            .as_ref()
            .ok_or(LlmError::NotConfigured("api_url"))?;

        Ok(LlmTarget {
            kind: self.fallback_kind,
            base_url: base_url(url.as_str())?,
            api_key,
        })
    }

    /// Sends `prompt` as a single user message and returns the first choice's
    /// content.
    pub async fn complete(&self, target: &LlmTarget, model: &str, prompt: &str) -> Result<String, LlmError> {
        let url = target.chat_completions_url();
        debug!(url = %url, model, "LLM: sending completion request");

        let body = ChatCompletionRequest::single_user_message(model, prompt);
        let resp = self
            .request(reqwest::Method::POST, &url, target)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(LlmError::UpstreamStatus { status, body });
        }

        let parsed: ChatCompletionResponse = resp
            .json()
            .await
            .map_err(|e| LlmError::MalformedResponse(e.to_string()))?;
        parsed
            .first_content()
            .map(str::to_string)
            .ok_or_else(|| LlmError::MalformedResponse("missing choices[0].message.content".to_string()))
    }

    fn request(&self, method: reqwest::Method, url: &str, target: &LlmTarget) -> reqwest::RequestBuilder {
        let builder = self
            .http
            .request(method, url)
            .bearer_auth(&target.api_key);
        match target.kind {
            ProviderKind::OpenRouter => builder
                .header(HTTP_REFERER, self.referer.clone())
                .header(X_TITLE, self.app_title.clone()),
            ProviderKind::LiteLLM => builder,
        }
    }
}

fn header_value(value: &str, fallback: &'static str) -> HeaderValue {
    HeaderValue::from_str(value).unwrap_or_else(|_| HeaderValue::from_static(fallback))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(url: &str, kind: &str) -> DbApiProvider {
        DbApiProvider {
            id: 1,
            name: "p".to_string(),
            provider_type: kind.to_string(),
            api_key: "secret".to_string(),
            api_url: url.to_string(),
            is_default: true,
            config_options: None,
        }
    }

    #[test]
    fn provider_kind_is_case_insensitive() {
        assert_eq!(ProviderKind::from_tag("LiteLLM"), ProviderKind::LiteLLM);
        assert_eq!(ProviderKind::from_tag("litellm"), ProviderKind::LiteLLM);
        assert_eq!(ProviderKind::from_tag("openrouter"), ProviderKind::OpenRouter);
        assert_eq!(ProviderKind::from_tag("something"), ProviderKind::OpenRouter);
    }

    #[test]
    fn derives_endpoints_from_base_url() {
        let target = LlmTarget::from_provider(&provider("https://openrouter.ai/api/v1/", "OpenRouter"))
            .unwrap();
        assert_eq!(target.chat_completions_url(), "https://openrouter.ai/api/v1/chat/completions");
        assert_eq!(target.models_url(), "https://openrouter.ai/api/v1/models");
    }

    #[test]
    fn accepts_full_completion_endpoint() {
        let target = LlmTarget::from_provider(&provider(
            "http://localhost:4000/v1/chat/completions",
            "LiteLLM",
        ))
        .unwrap();
        assert_eq!(target.kind, ProviderKind::LiteLLM);
        assert_eq!(target.models_url(), "http://localhost:4000/v1/models");
        assert_eq!(target.chat_completions_url(), "http://localhost:4000/v1/chat/completions");
    }

    #[test]
    fn invalid_provider_url_is_an_error() {
        assert!(matches!(
            LlmTarget::from_provider(&provider("not a url", "OpenRouter")),
            Err(LlmError::Url(_))
        ));
    }

    #[test]
    fn falls_back_to_config_without_default_provider() {
        let client = LlmClient::new(&LlmConfig::default()).unwrap();
        assert!(matches!(client.resolve_target(None), Err(LlmError::NotConfigured("api_key"))));

        let cfg = LlmConfig {
            api_key: Some("k".to_string()),
            api_url: Some(Url::parse("https://openrouter.ai/api/v1").unwrap()),
            ..LlmConfig::default()
        };
        let client = LlmClient::new(&cfg).unwrap();
        let target = client.resolve_target(None).unwrap();
        assert_eq!(target.api_key, "k");
        assert_eq!(target.kind, ProviderKind::OpenRouter);

        let stored = provider("http://localhost:4000", "LiteLLM");
        let target = client.resolve_target(Some(&stored)).unwrap();
        assert_eq!(target.api_key, "secret");
        assert_eq!(target.kind, ProviderKind::LiteLLM);
    }
}

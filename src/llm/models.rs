//! Model discovery. Failures never reach the caller; an unreachable or
//! misbehaving provider simply lists no models.

use promptbuilder_schema::LlmModelDto;
use promptbuilder_schema::openrouter::{OpenRouterModel, OpenRouterModelList};
use tracing::{debug, warn};

use super::{LlmClient, LlmTarget};
use crate::db::DbApiProvider;
use crate::error::LlmError;

impl LlmClient {
    /// Models offered by `provider`, sorted by display name.
    pub async fn list_models(&self, provider: &DbApiProvider) -> Vec<LlmModelDto> {
        match self.fetch_models(provider).await {
            Ok(models) => {
                debug!(provider = %provider.name, count = models.len(), "LLM: models listed");
                models
            }
            Err(e) => {
                warn!(provider = %provider.name, error = %e, "LLM: model discovery failed");
                Vec::new()
            }
        }
    }

    async fn fetch_models(&self, provider: &DbApiProvider) -> Result<Vec<LlmModelDto>, LlmError> {
        let target = LlmTarget::from_provider(provider)?;
        let resp = self
            .request(reqwest::Method::GET, &target.models_url(), &target)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(LlmError::UpstreamStatus { status, body });
        }

        let list: OpenRouterModelList = resp
            .json()
            .await
            .map_err(|e| LlmError::MalformedResponse(e.to_string()))?;

        let mut models: Vec<LlmModelDto> = list.data.into_iter().map(to_model_dto).collect();
        sort_models(&mut models);
        Ok(models)
    }
}

pub fn to_model_dto(model: OpenRouterModel) -> LlmModelDto {
    let pricing = model.pricing.unwrap_or_default();
    let price = |raw: Option<String>| raw.and_then(|s| s.trim().parse::<f64>().ok());

    LlmModelDto {
        name: model
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| model.id.clone()),
        id: model.id,
        description: model.description,
        context_length: model.context_length,
        provider: model.provider,
        pricing_prompt: price(pricing.prompt),
        pricing_completion: price(pricing.completion),
        pricing_image: price(pricing.image),
        pricing_request: price(pricing.request),
        pricing_input_cache_read: price(pricing.input_cache_read),
        pricing_input_cache_write: price(pricing.input_cache_write),
        pricing_web_search: price(pricing.web_search),
        pricing_internal_reasoning: price(pricing.internal_reasoning),
    }
}

fn sort_models(models: &mut [LlmModelDto]) {
    models.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.id.cmp(&b.id))
    });
}

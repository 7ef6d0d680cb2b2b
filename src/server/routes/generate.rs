use crate::error::PromptBuilderError;
use crate::server::router::AppState;
use axum::extract::rejection::JsonRejection;
use axum::{Json, Router, extract::State, routing::post};
use promptbuilder_schema::{GeneratePromptDto, LlmResponseDto};
use tracing::info;

pub fn router() -> Router<AppState> {
    Router::new().route("/generate", post(generate))
}

/// POST /api/generate
///
/// Renders the category's template with `input`, wraps it in the meta-prompt
/// and sends it to the default provider (or the configured fallback).
/// `generatedPrompt` in the response is the rendered template before wrapping.
pub async fn generate(
    State(state): State<AppState>,
    payload: Result<Json<GeneratePromptDto>, JsonRejection>,
) -> Result<Json<LlmResponseDto>, PromptBuilderError> {
    let Json(req) = payload?;

    let (category, template) = state
        .db
        .get_category_with_template(req.category_id)
        .await?
        .ok_or_else(|| PromptBuilderError::not_found("Category", req.category_id))?;
    let template = template.ok_or_else(|| {
        PromptBuilderError::not_found("Prompt template", category.prompt_template_id)
    })?;

    let rendered = state.renderer.render(&template.template, &req.input)?;
    let wrapped = state.renderer.wrap(&state.meta_prompt, &rendered)?;

    let default_provider = state.db.get_default_provider().await?;
    let target = state.llm.resolve_target(default_provider.as_ref())?;

    info!(
        category_id = category.id,
        template_id = template.id,
        model = %template.model,
        "Generate: sending prompt"
    );
    let response = state.llm.complete(&target, &template.model, &wrapped).await?;

    Ok(Json(LlmResponseDto {
        generated_prompt: rendered,
        response,
        model: template.model,
    }))
}

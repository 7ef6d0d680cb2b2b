use crate::db::ProviderWrite;
use crate::error::PromptBuilderError;
use crate::server::router::AppState;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::{
    Json, Router,
    extract::{Path, State},
    http::{StatusCode, header::LOCATION},
    response::IntoResponse,
    routing::get,
};
use promptbuilder_schema::{
    ApiProviderDto, CreateApiProviderDto, LlmModelDto, UpdateApiProviderDto,
};

const KIND: &str = "API provider";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/providers", get(list_providers).post(create_provider))
        .route("/providers/default", get(get_default_provider))
        .route(
            "/providers/{id}",
            get(get_provider).put(update_provider).delete(delete_provider),
        )
        .route("/providers/{id}/models", get(list_provider_models))
}

/// GET /api/providers
pub async fn list_providers(
    State(state): State<AppState>,
) -> Result<Json<Vec<ApiProviderDto>>, PromptBuilderError> {
    let rows = state.db.list_providers().await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// GET /api/providers/default
pub async fn get_default_provider(
    State(state): State<AppState>,
) -> Result<Json<ApiProviderDto>, PromptBuilderError> {
    state
        .db
        .get_default_provider()
        .await?
        .map(|row| Json(row.into()))
        .ok_or_else(|| PromptBuilderError::NotFound("No default API provider found".to_string()))
}

/// GET /api/providers/{id}
pub async fn get_provider(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ApiProviderDto>, PromptBuilderError> {
    let Path(id) = id?;
    state
        .db
        .get_provider(id)
        .await?
        .map(|row| Json(row.into()))
        .ok_or_else(|| PromptBuilderError::not_found(KIND, id))
}

/// POST /api/providers
///
/// A provider created with `isDefault` takes the flag from whichever provider
/// held it.
pub async fn create_provider(
    State(state): State<AppState>,
    payload: Result<Json<CreateApiProviderDto>, JsonRejection>,
) -> Result<impl IntoResponse, PromptBuilderError> {
    let Json(dto) = payload?;
    let row = state.db.create_provider(ProviderWrite::from(dto)).await?;
    let location = format!("/api/providers/{}", row.id);
    Ok((
        StatusCode::CREATED,
        [(LOCATION, location)],
        Json(ApiProviderDto::from(row)),
    ))
}

/// PUT /api/providers/{id}
pub async fn update_provider(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateApiProviderDto>, JsonRejection>,
) -> Result<Json<ApiProviderDto>, PromptBuilderError> {
    let Path(id) = id?;
    let Json(dto) = payload?;
    state
        .db
        .update_provider(id, ProviderWrite::from(dto))
        .await?
        .map(|row| Json(row.into()))
        .ok_or_else(|| PromptBuilderError::not_found(KIND, id))
}

/// DELETE /api/providers/{id}
pub async fn delete_provider(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, PromptBuilderError> {
    let Path(id) = id?;
    if state.db.delete_provider(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(PromptBuilderError::not_found(KIND, id))
    }
}

/// GET /api/providers/{id}/models
///
/// An unreachable provider yields an empty list rather than an error.
pub async fn list_provider_models(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<Vec<LlmModelDto>>, PromptBuilderError> {
    let Path(id) = id?;
    let provider = state
        .db
        .get_provider(id)
        .await?
        .ok_or_else(|| PromptBuilderError::not_found(KIND, id))?;
    Ok(Json(state.llm.list_models(&provider).await))
}

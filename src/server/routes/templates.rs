use crate::db::TemplateWrite;
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
use promptbuilder_schema::{CreatePromptTemplateDto, PromptTemplateDto, UpdatePromptTemplateDto};

const KIND: &str = "Prompt template";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/prompttemplates", get(list_templates).post(create_template))
        .route(
            "/prompttemplates/{id}",
            get(get_template).put(update_template).delete(delete_template),
        )
}

/// GET /api/prompttemplates
pub async fn list_templates(
    State(state): State<AppState>,
) -> Result<Json<Vec<PromptTemplateDto>>, PromptBuilderError> {
    let rows = state.db.list_templates().await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// GET /api/prompttemplates/{id}
pub async fn get_template(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<PromptTemplateDto>, PromptBuilderError> {
    let Path(id) = id?;
    let row = state
        .db
        .get_template(id)
        .await?
        .ok_or_else(|| PromptBuilderError::not_found(KIND, id))?;
    Ok(Json(row.into()))
}

/// POST /api/prompttemplates
pub async fn create_template(
    State(state): State<AppState>,
    payload: Result<Json<CreatePromptTemplateDto>, JsonRejection>,
) -> Result<impl IntoResponse, PromptBuilderError> {
    let Json(dto) = payload?;
    let row = state.db.create_template(TemplateWrite::from(dto)).await?;
    let location = format!("/api/prompttemplates/{}", row.id);
    Ok((
        StatusCode::CREATED,
        [(LOCATION, location)],
        Json(PromptTemplateDto::from(row)),
    ))
}

/// PUT /api/prompttemplates/{id}
pub async fn update_template(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdatePromptTemplateDto>, JsonRejection>,
) -> Result<StatusCode, PromptBuilderError> {
    let Path(id) = id?;
    let Json(dto) = payload?;
    match state.db.update_template(id, TemplateWrite::from(dto)).await? {
        Some(_) => Ok(StatusCode::NO_CONTENT),
        None => Err(PromptBuilderError::not_found(KIND, id)),
    }
}

/// DELETE /api/prompttemplates/{id}
///
/// 400 while any category still uses the template.
pub async fn delete_template(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, PromptBuilderError> {
    let Path(id) = id?;
    if state.db.delete_template(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(PromptBuilderError::not_found(KIND, id))
    }
}

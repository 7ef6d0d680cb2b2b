use crate::db::CategoryWrite;
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
use promptbuilder_schema::{CategoryDto, CreateCategoryDto, UpdateCategoryDto};

const KIND: &str = "Category";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/categories", get(category_tree).post(create_category))
        .route(
            "/categories/{id}",
            get(get_category).put(update_category).delete(delete_category),
        )
}

/// GET /api/categories
///
/// Root categories with their descendants nested under `children`.
pub async fn category_tree(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryDto>>, PromptBuilderError> {
    Ok(Json(state.db.category_tree().await?))
}

/// GET /api/categories/{id}
pub async fn get_category(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<CategoryDto>, PromptBuilderError> {
    let Path(id) = id?;
    state
        .db
        .get_category(id)
        .await?
        .map(Json)
        .ok_or_else(|| PromptBuilderError::not_found(KIND, id))
}

/// POST /api/categories
pub async fn create_category(
    State(state): State<AppState>,
    payload: Result<Json<CreateCategoryDto>, JsonRejection>,
) -> Result<impl IntoResponse, PromptBuilderError> {
    let Json(dto) = payload?;
    let row = state.db.create_category(CategoryWrite::from(dto)).await?;
    let location = format!("/api/categories/{}", row.id);
    Ok((
        StatusCode::CREATED,
        [(LOCATION, location)],
        Json(CategoryDto::from(row)),
    ))
}

/// PUT /api/categories/{id}
pub async fn update_category(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<UpdateCategoryDto>, JsonRejection>,
) -> Result<StatusCode, PromptBuilderError> {
    let Path(id) = id?;
    let Json(dto) = payload?;
    match state.db.update_category(id, CategoryWrite::from(dto)).await? {
        Some(_) => Ok(StatusCode::NO_CONTENT),
        None => Err(PromptBuilderError::not_found(KIND, id)),
    }
}

/// DELETE /api/categories/{id}
pub async fn delete_category(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, PromptBuilderError> {
    let Path(id) = id?;
    if state.db.delete_category(id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(PromptBuilderError::not_found(KIND, id))
    }
}

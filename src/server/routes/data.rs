use crate::error::PromptBuilderError;
use crate::server::router::AppState;
use axum::extract::Multipart;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::{
    Router,
    extract::State,
    http::{
        StatusCode,
        header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    },
    response::IntoResponse,
    routing::{get, post},
};
use promptbuilder_schema::DataSnapshot;
use tracing::info;

const EXPORT_FILENAME: &str = "promptbuilder_data.json";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/data/export", get(export_data))
        .route("/data/import", post(import_data))
        .route("/data/reset", post(reset_data))
}

/// GET /api/data/export
pub async fn export_data(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, PromptBuilderError> {
    let snapshot = state.db.export_snapshot().await?;
    let body = serde_json::to_string_pretty(&snapshot)?;
    Ok((
        [
            (CONTENT_TYPE, "application/json".to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILENAME}\""),
            ),
        ],
        body,
    ))
}

/// POST /api/data/import
///
/// Expects a multipart form with the snapshot under the `file` field. Replaces
/// every template, category and provider.
pub async fn import_data(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, PromptBuilderError> {
    let mut multipart =
        multipart.map_err(|_| PromptBuilderError::Validation("No file uploaded".to_string()))?;

    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(upload_error)?
    {
        if field.name() != Some("file") {
            continue;
        }
        let content_type = field.content_type().unwrap_or_default().to_ascii_lowercase();
        let bytes = field.bytes().await.map_err(upload_error)?;
        upload = Some((content_type, bytes));
        break;
    }

    let Some((content_type, bytes)) = upload else {
        return Err(PromptBuilderError::Validation("No file uploaded".to_string()));
    };
    if bytes.is_empty() {
        return Err(PromptBuilderError::Validation("Uploaded file is empty".to_string()));
    }
    if !content_type.contains("json") {
        return Err(PromptBuilderError::Validation(
            "File must be a JSON file".to_string(),
        ));
    }

    let snapshot: DataSnapshot = serde_json::from_slice(&bytes)
        .map_err(|e| PromptBuilderError::InvalidJson(format!("Invalid import file: {e}")))?;

    let summary = state.db.import_snapshot(snapshot).await?;
    info!(
        templates = summary.templates,
        categories = summary.categories,
        providers = summary.providers,
        "Data imported"
    );
    Ok((StatusCode::OK, "Data imported successfully"))
}

/// Oversized uploads keep their 413; any other multipart failure is a 400.
fn upload_error(err: MultipartError) -> PromptBuilderError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        PromptBuilderError::PayloadTooLarge(err.body_text())
    } else {
        PromptBuilderError::Validation(format!("Invalid upload: {}", err.body_text()))
    }
}

/// POST /api/data/reset
pub async fn reset_data(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, PromptBuilderError> {
    state.db.reset().await?;
    Ok((StatusCode::OK, "Database reset successfully"))
}

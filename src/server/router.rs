use crate::db::DbActorHandle;
use crate::error::PromptBuilderError;
use crate::llm::LlmClient;
use crate::render::TemplateRenderer;
use crate::server::routes;

use axum::{
    Router,
    extract::{DefaultBodyLimit, Request},
    http::{HeaderName, HeaderValue, Version, header::USER_AGENT},
    middleware::{self, Next},
    response::Response,
};
use base64::Engine as _;
use rand::RngCore;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tracing::{error, info, warn};

const MAX_REQUEST_ID_LEN: usize = 128;
const X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

fn generate_request_id() -> String {
    // 96 bits => 16 chars base64url (no padding).
    let mut bytes = [0u8; 12];
    rand::rng().fill_bytes(&mut bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

fn format_http_version(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "HTTP/0.9",
        Version::HTTP_10 => "HTTP/1.0",
        Version::HTTP_11 => "HTTP/1.1",
        Version::HTTP_2 => "HTTP/2",
        Version::HTTP_3 => "HTTP/3",
        _ => "HTTP/?",
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db: DbActorHandle,
    pub llm: LlmClient,
    pub renderer: Arc<TemplateRenderer>,
    /// Wrapper applied to rendered prompts before completion; empty disables it.
    pub meta_prompt: Arc<str>,
    pub max_import_bytes: usize,
    /// Built SPA served for every non-API path when set.
    pub static_dir: Option<PathBuf>,
}

impl AppState {
    pub fn new(db: DbActorHandle, llm: LlmClient, meta_prompt: &str) -> Self {
        Self {
            db,
            llm,
            renderer: Arc::new(TemplateRenderer::new()),
            meta_prompt: Arc::from(meta_prompt),
            max_import_bytes: 10 * 1024 * 1024,
            static_dir: None,
        }
    }

    pub fn with_max_import_bytes(mut self, bytes: usize) -> Self {
        self.max_import_bytes = bytes;
        self
    }

    pub fn with_static_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.static_dir = dir;
        self
    }
}

async fn not_found_handler() -> PromptBuilderError {
    PromptBuilderError::NotFound("Resource not found".to_string())
}

async fn access_log(req: Request, next: Next) -> Response {
    // Capture request metadata before moving `req` into the handler stack.
    let method = req.method().clone();
    let uri = req.uri().clone();
    let version = req.version();

    let request_id = req
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty() && v.len() <= MAX_REQUEST_ID_LEN)
        .map_or_else(generate_request_id, str::to_string);

    let user_agent = req
        .headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();

    let start = Instant::now();
    let mut resp = next.run(req).await;

    // Always reflect `x-request-id`, even if the client didn't send one.
    if let Ok(value) = HeaderValue::from_str(&request_id) {
        resp.headers_mut().insert(X_REQUEST_ID, value);
    }

    let status = resp.status();
    let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
    let path = uri.path();
    let protocol = format_http_version(version);

    if status.is_server_error() {
        error!(
            "| {:>3} | {} | {:^7} | {:<8} | {} | {}ms | {}",
            status.as_u16(),
            request_id,
            method.as_str(),
            protocol,
            path,
            latency_ms,
            user_agent
        );
    } else if status.is_client_error() {
        warn!(
            "| {:>3} | {} | {:^7} | {:<8} | {} | {}ms | {}",
            status.as_u16(),
            request_id,
            method.as_str(),
            protocol,
            path,
            latency_ms,
            user_agent
        );
    } else {
        info!(
            "| {:>3} | {} | {:^7} | {:<8} | {} | {}ms | {}",
            status.as_u16(),
            request_id,
            method.as_str(),
            protocol,
            path,
            latency_ms,
            user_agent
        );
    }

    resp
}

pub fn promptbuilder_router(state: AppState) -> Router {
    let api = Router::new()
        .merge(routes::templates::router())
        .merge(routes::categories::router())
        .merge(routes::providers::router())
        .merge(routes::generate::router())
        .merge(routes::data::router().layer(DefaultBodyLimit::max(state.max_import_bytes)))
        .fallback(not_found_handler);

    let app = Router::new().nest("/api", api);
    let app = match state.static_dir.as_ref() {
        Some(dir) => {
            info!(path = %dir.display(), "Serving static files");
            app.fallback_service(
                ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html"))),
            )
        }
        None => app.fallback(not_found_handler),
    };

    app.with_state(state)
        .layer(middleware::from_fn(access_log))
        .layer(CorsLayer::permissive())
}

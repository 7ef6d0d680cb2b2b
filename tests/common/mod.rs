#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, Bytes, to_bytes},
    http::{HeaderMap, Request, StatusCode},
};
use promptbuilder::config::LlmConfig;
use promptbuilder::db::DbActorHandle;
use promptbuilder::llm::LlmClient;
use promptbuilder::server::{AppState, promptbuilder_router};
use serde_json::Value;
use std::time::{SystemTime, UNIX_EPOCH};
use tower::ServiceExt;

pub fn unique_sqlite_path(tag: &str) -> std::path::PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!(
        "promptbuilder-{tag}-{}-{nanos}.sqlite",
        std::process::id()
    ));
    path
}

pub fn sqlite_url(path: &std::path::Path) -> String {
    format!("sqlite:{}", path.display())
}

pub async fn spawn_db(tag: &str) -> DbActorHandle {
    let path = unique_sqlite_path(tag);
    promptbuilder::db::spawn(&sqlite_url(&path))
        .await
        .expect("spawn db actor")
}

/// Router over `db` with no meta-prompt, so upstream sees the rendered text as is.
pub fn build_app(db: DbActorHandle) -> Router {
    build_app_with(db, |state| state)
}

/// Like [`build_app`], with a hook to adjust the state before the router is built.
pub fn build_app_with(db: DbActorHandle, configure: impl FnOnce(AppState) -> AppState) -> Router {
    let llm = LlmClient::new(&LlmConfig::default()).expect("build llm client");
    promptbuilder_router(configure(AppState::new(db, llm, "")))
}

pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, HeaderMap, Bytes) {
    match body {
        Some(json) => {
            send_raw(app, method, uri, "application/json", Body::from(json.to_string())).await
        }
        None => {
            let req = Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .expect("failed to build request");
            collect(app, req).await
        }
    }
}

pub async fn send_raw(
    app: &Router,
    method: &str,
    uri: &str,
    content_type: &str,
    body: Body,
) -> (StatusCode, HeaderMap, Bytes) {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", content_type)
        .body(body)
        .expect("failed to build request");
    collect(app, req).await
}

async fn collect(app: &Router, req: Request<Body>) -> (StatusCode, HeaderMap, Bytes) {
    let resp = app.clone().oneshot(req).await.expect("request failed");
    let status = resp.status();
    let headers = resp.headers().clone();
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    (status, headers, bytes)
}

pub fn json(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).expect("response body was not JSON")
}

pub fn error_code(bytes: &[u8]) -> String {
    json(bytes)["error"]["code"]
        .as_str()
        .expect("error body carries a code")
        .to_string()
}

mod common;

use axum::body::Body;
use axum::http::{
    StatusCode,
    header::{CONTENT_DISPOSITION, CONTENT_TYPE},
};
use serde_json::json;

const BOUNDARY: &str = "promptbuilder-test-boundary";

fn multipart_body(field: &str, content_type: &str, content: &str) -> Body {
    Body::from(format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"{field}\"; filename=\"data.json\"\r\n\
         Content-Type: {content_type}\r\n\r\n\
         {content}\r\n\
         --{BOUNDARY}--\r\n"
    ))
}

async fn upload(
    app: &axum::Router,
    field: &str,
    content_type: &str,
    content: &str,
) -> (StatusCode, axum::body::Bytes) {
    let (status, _, body) = common::send_raw(
        app,
        "POST",
        "/api/data/import",
        &format!("multipart/form-data; boundary={BOUNDARY}"),
        multipart_body(field, content_type, content),
    )
    .await;
    (status, body)
}

#[tokio::test]
async fn export_is_a_json_attachment() {
    let db = common::spawn_db("data-export").await;
    promptbuilder::seed::seed_sample_data(&db).await.expect("seed");
    let app = common::build_app(db);

    let (status, headers, body) = common::send(&app, "GET", "/api/data/export", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()),
        Some("application/json")
    );
    assert_eq!(
        headers.get(CONTENT_DISPOSITION).and_then(|v| v.to_str().ok()),
        Some("attachment; filename=\"promptbuilder_data.json\"")
    );

    let doc = common::json(&body);
    assert!(doc["exportedAt"].is_string());
    assert_eq!(doc["promptTemplates"].as_array().map(Vec::len), Some(3));
    assert_eq!(doc["categories"].as_array().map(Vec::len), Some(4));
    assert_eq!(
        doc["apiProviders"][0]["apiKey"],
        promptbuilder::seed::PLACEHOLDER_API_KEY
    );
}

#[tokio::test]
async fn import_replaces_data_and_rejects_bad_uploads() {
    let db = common::spawn_db("data-import").await;
    promptbuilder::seed::seed_sample_data(&db).await.expect("seed");
    let app = common::build_app(db.clone());

    let doc = json!({
        "PromptTemplates": [{"Id": 11, "Name": "Only", "Template": "only {{ x }}", "Model": "m"}],
        "Categories": [{"Id": 5, "Name": "Solo", "ParentId": null, "PromptTemplateId": 11}],
        "ApiProviders": []
    })
    .to_string();

    let (status, body) = upload(&app, "file", "application/json", &doc).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..], b"Data imported successfully");

    let templates = db.list_templates().await.expect("templates");
    assert_eq!(templates.len(), 1);
    assert_eq!(templates[0].name, "Only");
    let categories = db.list_categories().await.expect("categories");
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0].prompt_template_id, templates[0].id);
    assert!(db.list_providers().await.expect("providers").is_empty());

    let (status, body) = upload(&app, "other", "application/json", &doc).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(common::error_code(&body), "VALIDATION_ERROR");

    let (status, _) = upload(&app, "file", "application/json", "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = upload(&app, "file", "text/plain", &doc).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = upload(&app, "file", "application/json", "{not json").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(common::error_code(&body), "INVALID_JSON");

    let dangling = json!({
        "promptTemplates": [],
        "categories": [{"id": 1, "name": "C", "promptTemplateId": 3}]
    })
    .to_string();
    let (status, _) = upload(&app, "file", "application/json", &dangling).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Rejected uploads leave the imported data alone.
    assert_eq!(db.list_templates().await.expect("templates").len(), 1);

    let (status, _, body) = common::send_raw(
        &app,
        "POST",
        "/api/data/import",
        "application/json",
        Body::from(doc),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(common::error_code(&body), "VALIDATION_ERROR");
}

#[tokio::test]
async fn import_over_the_size_limit_answers_413() {
    let db = common::spawn_db("data-import-limit").await;
    promptbuilder::seed::seed_sample_data(&db).await.expect("seed");
    let app = common::build_app_with(db.clone(), |state| state.with_max_import_bytes(1024));

    let small = json!({"PromptTemplates": [], "Categories": [], "ApiProviders": []}).to_string();
    let (status, _) = upload(&app, "file", "application/json", &small).await;
    assert_eq!(status, StatusCode::OK);

    let big = json!({
        "PromptTemplates": [{"Id": 1, "Name": "Big", "Template": "x".repeat(4096), "Model": "m"}],
        "Categories": [],
        "ApiProviders": []
    })
    .to_string();
    let (status, body) = upload(&app, "file", "application/json", &big).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(common::error_code(&body), "PAYLOAD_TOO_LARGE");
    assert!(db.list_templates().await.expect("templates").is_empty());
}

#[tokio::test]
async fn reset_clears_everything() {
    let db = common::spawn_db("data-reset").await;
    promptbuilder::seed::seed_sample_data(&db).await.expect("seed");
    let app = common::build_app(db.clone());

    let (status, _, body) = common::send(&app, "POST", "/api/data/reset", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..], b"Database reset successfully");

    let (_, _, body) = common::send(&app, "GET", "/api/categories", None).await;
    assert_eq!(common::json(&body), json!([]));
    let (_, _, body) = common::send(&app, "GET", "/api/prompttemplates", None).await;
    assert_eq!(common::json(&body), json!([]));
    let (status, _, _) = common::send(&app, "GET", "/api/providers/default", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

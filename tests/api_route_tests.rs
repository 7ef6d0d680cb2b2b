mod common;

use axum::body::Body;
use axum::http::{
    StatusCode,
    header::{CONTENT_TYPE, LOCATION},
};
use serde_json::json;

#[tokio::test]
async fn template_routes_cover_crud_and_status_codes() {
    let app = common::build_app(common::spawn_db("route-templates").await);

    let (status, _, body) = common::send(&app, "GET", "/api/prompttemplates", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(common::json(&body), json!([]));

    let (status, headers, body) = common::send(
        &app,
        "POST",
        "/api/prompttemplates",
        Some(json!({"name": "Code", "template": "Write {{language}}", "model": "m"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let created = common::json(&body);
    let id = created["id"].as_i64().expect("id");
    assert_eq!(
        headers.get(LOCATION).and_then(|v| v.to_str().ok()),
        Some(format!("/api/prompttemplates/{id}").as_str())
    );
    assert_eq!(created["template"], "Write {{language}}");

    let (status, _, body) =
        common::send(&app, "GET", &format!("/api/prompttemplates/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(common::json(&body)["name"], "Code");

    let (status, _, body) = common::send(&app, "GET", "/api/prompttemplates/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(common::error_code(&body), "NOT_FOUND");

    let (status, _, body) = common::send(
        &app,
        "PUT",
        &format!("/api/prompttemplates/{id}"),
        Some(json!({"name": "Code 2", "template": "x", "model": ""})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(common::error_code(&body), "VALIDATION_ERROR");

    let (status, _, body) = common::send(
        &app,
        "PUT",
        &format!("/api/prompttemplates/{id}"),
        Some(json!({"name": "Code 2", "template": "x", "model": "m2"})),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());

    let (status, _, _) = common::send(
        &app,
        "PUT",
        "/api/prompttemplates/999",
        Some(json!({"name": "n", "template": "x", "model": "m"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) =
        common::send(&app, "DELETE", &format!("/api/prompttemplates/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _, _) =
        common::send(&app, "DELETE", &format!("/api/prompttemplates/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_json_and_unknown_paths_use_error_bodies() {
    let app = common::build_app(common::spawn_db("route-errors").await);

    let (status, _, body) = common::send_raw(
        &app,
        "POST",
        "/api/prompttemplates",
        "application/json",
        Body::from("not-json"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(common::error_code(&body), "INVALID_JSON");

    let (status, headers, body) = common::send(&app, "GET", "/api/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(common::error_code(&body), "NOT_FOUND");
    assert!(headers.contains_key("x-request-id"));
}

#[tokio::test]
async fn category_routes_return_tree_and_enforce_guards() {
    let app = common::build_app(common::spawn_db("route-categories").await);

    let (_, _, body) = common::send(
        &app,
        "POST",
        "/api/prompttemplates",
        Some(json!({"name": "T", "template": "t", "model": "m"})),
    )
    .await;
    let template_id = common::json(&body)["id"].as_i64().expect("template id");

    let (status, _, body) = common::send(
        &app,
        "POST",
        "/api/categories",
        Some(json!({"name": "Bad", "promptTemplateId": 999})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(common::error_code(&body), "VALIDATION_ERROR");

    let (status, headers, body) = common::send(
        &app,
        "POST",
        "/api/categories",
        Some(json!({"name": "Root", "promptTemplateId": template_id})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(headers.contains_key(LOCATION));
    let root_id = common::json(&body)["id"].as_i64().expect("root id");

    let (status, _, body) = common::send(
        &app,
        "POST",
        "/api/categories",
        Some(json!({"name": "Child", "parentId": root_id, "promptTemplateId": template_id})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let child_id = common::json(&body)["id"].as_i64().expect("child id");

    let (status, _, body) = common::send(&app, "GET", "/api/categories", None).await;
    assert_eq!(status, StatusCode::OK);
    let tree = common::json(&body);
    assert_eq!(tree.as_array().map(Vec::len), Some(1));
    assert_eq!(tree[0]["name"], "Root");
    assert_eq!(tree[0]["children"][0]["id"], child_id);
    assert_eq!(tree[0]["children"][0]["parentId"], root_id);
    assert_eq!(tree[0]["children"][0]["children"], json!([]));

    let (status, _, body) =
        common::send(&app, "GET", &format!("/api/categories/{root_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(common::json(&body)["children"][0]["name"], "Child");

    // Root under its own child would close a loop.
    let (status, _, _) = common::send(
        &app,
        "PUT",
        &format!("/api/categories/{root_id}"),
        Some(json!({"name": "Root", "parentId": child_id, "promptTemplateId": template_id})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, _) = common::send(
        &app,
        "PUT",
        &format!("/api/categories/{child_id}"),
        Some(json!({"name": "Renamed", "parentId": root_id, "promptTemplateId": template_id})),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _, _) = common::send(
        &app,
        "DELETE",
        &format!("/api/prompttemplates/{template_id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _, body) =
        common::send(&app, "DELETE", &format!("/api/categories/{root_id}"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(common::error_code(&body), "VALIDATION_ERROR");

    let (_, _, body) = common::send(&app, "GET", "/api/categories", None).await;
    let tree = common::json(&body);
    assert_eq!(tree[0]["children"][0]["name"], "Renamed");

    let (status, _, _) =
        common::send(&app, "DELETE", &format!("/api/categories/{child_id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _, _) =
        common::send(&app, "DELETE", &format!("/api/categories/{root_id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _, _) =
        common::send(&app, "GET", &format!("/api/categories/{root_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn provider_routes_hide_keys_and_track_default() {
    let app = common::build_app(common::spawn_db("route-providers").await);

    let (status, _, _) = common::send(&app, "GET", "/api/providers/default", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, body) = common::send(
        &app,
        "POST",
        "/api/providers",
        Some(json!({"name": "No URL", "providerType": "OpenRouter", "apiKey": "k"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(common::error_code(&body), "VALIDATION_ERROR");

    let (status, headers, body) = common::send(
        &app,
        "POST",
        "/api/providers",
        Some(json!({
            "name": "OpenRouter",
            "providerType": "OpenRouter",
            "apiKey": "sk-secret",
            "apiUrl": "https://openrouter.ai/api/v1",
            "isDefault": true
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(headers.contains_key(LOCATION));
    let first = common::json(&body);
    assert!(first.get("apiKey").is_none());
    let first_id = first["id"].as_i64().expect("id");

    let (status, _, body) = common::send(
        &app,
        "POST",
        "/api/providers",
        Some(json!({
            "name": "LiteLLM",
            "providerType": "LiteLLM",
            "apiKey": "sk-other",
            "apiUrl": "http://localhost:4000"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let second_id = common::json(&body)["id"].as_i64().expect("id");

    let (status, _, body) = common::send(
        &app,
        "PUT",
        &format!("/api/providers/{second_id}"),
        Some(json!({
            "name": "LiteLLM",
            "providerType": "LiteLLM",
            "apiKey": "sk-other",
            "apiUrl": "http://localhost:4000",
            "isDefault": true
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(common::json(&body)["isDefault"], true);

    let (_, _, body) = common::send(&app, "GET", "/api/providers", None).await;
    let list = common::json(&body);
    let list = list.as_array().expect("array");
    assert_eq!(list.len(), 2);
    assert!(list.iter().all(|p| p.get("apiKey").is_none()));
    let defaults: Vec<i64> = list
        .iter()
        .filter(|p| p["isDefault"] == true)
        .filter_map(|p| p["id"].as_i64())
        .collect();
    assert_eq!(defaults, vec![second_id]);

    let (status, _, body) = common::send(&app, "GET", "/api/providers/default", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(common::json(&body)["id"], second_id);

    let (status, _, _) =
        common::send(&app, "GET", &format!("/api/providers/{first_id}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, _) =
        common::send(&app, "DELETE", &format!("/api/providers/{first_id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _, _) =
        common::send(&app, "GET", &format!("/api/providers/{first_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _, _) = common::send(&app, "GET", "/api/providers/999/models", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_numeric_ids_get_a_json_validation_error() {
    let app = common::build_app(common::spawn_db("route-bad-ids").await);

    for uri in [
        "/api/prompttemplates/abc",
        "/api/categories/abc",
        "/api/providers/abc",
        "/api/providers/abc/models",
    ] {
        let (status, headers, body) = common::send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(
            headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()),
            Some("application/json"),
            "{uri}"
        );
        assert_eq!(common::error_code(&body), "VALIDATION_ERROR", "{uri}");
    }

    let (status, _, body) = common::send(
        &app,
        "PUT",
        "/api/prompttemplates/abc",
        Some(json!({"name": "n", "template": "t", "model": "m"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(common::error_code(&body), "VALIDATION_ERROR");
}

#[tokio::test]
async fn static_dir_serves_the_client_but_api_misses_stay_json() {
    let dir = common::unique_sqlite_path("static").with_extension("d");
    std::fs::create_dir_all(&dir).expect("create static dir");
    std::fs::write(dir.join("index.html"), "<html>spa</html>").expect("write index");
    std::fs::write(dir.join("app.js"), "console.log(1);").expect("write asset");

    let static_dir = dir.clone();
    let app = common::build_app_with(common::spawn_db("route-static").await, move |state| {
        state.with_static_dir(Some(static_dir))
    });

    let (status, _, body) = common::send(&app, "GET", "/app.js", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..], b"console.log(1);");

    let (status, _, body) = common::send(&app, "GET", "/templates/3", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..], b"<html>spa</html>");

    let (status, headers, body) = common::send(&app, "GET", "/api/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()),
        Some("application/json")
    );
    assert_eq!(common::error_code(&body), "NOT_FOUND");

    let _ = std::fs::remove_dir_all(&dir);
}

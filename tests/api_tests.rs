use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    response::Response,
};
use pmstandards::app;
use pmstandards::content::ContentPayload;
use pmstandards::db::Database;
use pmstandards::documents::DocumentRegistry;
use pmstandards::handler::AppState;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn test_app(pdf_dir: &std::path::Path) -> Router {
    let state = AppState {
        db: Arc::new(Database::in_memory().await.unwrap()),
        content: Arc::new(ContentPayload::builtin()),
        documents: Arc::new(DocumentRegistry::default()),
    };
    app::router(state, pdf_dir)
}

async fn send(app: &Router, req: Request<Body>) -> Response {
    app.clone().oneshot(req).await.unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(resp: Response) -> Value {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_text(resp: Response) -> String {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_healthcheck() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path()).await;

    let resp = send(&app, get("/healthz")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, json!({"data": "ok"}));
}

#[tokio::test]
async fn test_locate_applies_logical_page() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path()).await;

    let resp = send(&app, get("/api/documents/prince2/locate?page=10")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["data"]["physical_page"], 10);
    assert!(body["data"]["url"].as_str().unwrap().ends_with("#page=10"));
    assert!(body["data"]["url"].as_str().unwrap().starts_with("/pdfs/Managing%20Successful"));
}

#[tokio::test]
async fn test_locate_unknown_document_is_404() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path()).await;

    let resp = send(&app, get("/api/documents/unknown/locate?page=1")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert!(body_json(resp).await["error"].is_string());
}

#[tokio::test]
async fn test_locate_rejects_page_zero() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path()).await;

    let resp = send(&app, get("/api/documents/pmbok/locate?page=0")).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_duplicate_bookmark_conflicts() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path()).await;

    let add = || json_request("POST", "/api/documents/pmbok/bookmarks", json!({"page": 145, "note": "risk"}));

    let first = send(&app, add()).await;
    assert_eq!(first.status(), StatusCode::CREATED);
    assert_eq!(body_json(first).await, json!({"data": {"added": true}}));

    let second = send(&app, add()).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(second).await, json!({"data": {"added": false}}));

    let list = body_json(send(&app, get("/api/documents/pmbok/bookmarks")).await).await;
    let list = list["data"].as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["note"], "risk");
}

#[tokio::test]
async fn test_bookmark_has_and_remove() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path()).await;

    for page in [45, 12, 30] {
        let resp = send(&app, json_request("POST", "/api/documents/prince2/bookmarks", json!({"page": page}))).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let list = body_json(send(&app, get("/api/documents/prince2/bookmarks")).await).await;
    let pages: Vec<u64> = list["data"].as_array().unwrap().iter().map(|b| b["page"].as_u64().unwrap()).collect();
    assert_eq!(pages, vec![12, 30, 45]);

    let has = body_json(send(&app, get("/api/documents/prince2/bookmarks/30")).await).await;
    assert_eq!(has["data"]["bookmarked"], true);

    let req = Request::builder()
        .method("DELETE")
        .uri("/api/documents/prince2/bookmarks/30")
        .body(Body::empty())
        .unwrap();
    assert_eq!(send(&app, req).await.status(), StatusCode::NO_CONTENT);

    let has = body_json(send(&app, get("/api/documents/prince2/bookmarks/30")).await).await;
    assert_eq!(has["data"]["bookmarked"], false);

    // other documents are unaffected
    let other = body_json(send(&app, get("/api/documents/pmbok/bookmarks")).await).await;
    assert_eq!(other["data"], json!([]));
}

#[tokio::test]
async fn test_reading_position_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path()).await;

    let unset = body_json(send(&app, get("/api/documents/iso21500/position")).await).await;
    assert_eq!(unset["data"]["page"], Value::Null);

    let resp = send(&app, json_request("PUT", "/api/documents/iso21500/position", json!({"page": 12}))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = send(&app, json_request("PUT", "/api/documents/iso21500/position", json!({"page": 7}))).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let last = body_json(send(&app, get("/api/documents/iso21500/position")).await).await;
    assert_eq!(last["data"]["page"], 7);
}

#[tokio::test]
async fn test_viewer_resumes_last_page() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path()).await;

    let first = send(&app, get("/viewer/iso21502")).await;
    assert_eq!(first.status(), StatusCode::OK);
    assert!(body_text(first).await.contains("#page=1\""));

    let resp = send(&app, get("/viewer/iso21502?page=78")).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resumed = body_text(send(&app, get("/viewer/iso21502")).await).await;
    assert!(resumed.contains("ISO 21502 &mdash; Page 78"));
    assert!(resumed.contains("#page=78\""));
}

#[tokio::test]
async fn test_viewer_unknown_document_shows_notice() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path()).await;

    let resp = send(&app, get("/viewer/pmbok6?page=3")).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let html = body_text(resp).await;
    assert!(html.contains("PDF file not found for this standard."));
    assert!(!html.contains("<iframe"));
}

#[tokio::test]
async fn test_viewer_bookmark_form_toggles_and_redirects() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path()).await;

    let toggle = || {
        Request::builder()
            .method("POST")
            .uri("/viewer/iso21502/bookmarks")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("page=78&action=toggle"))
            .unwrap()
    };

    let resp = send(&app, toggle()).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers()[header::LOCATION], "/viewer/iso21502?page=78");

    let list = body_json(send(&app, get("/api/documents/iso21502/bookmarks")).await).await;
    assert_eq!(list["data"][0]["page"], 78);

    send(&app, toggle()).await;
    let list = body_json(send(&app, get("/api/documents/iso21502/bookmarks")).await).await;
    assert_eq!(list["data"], json!([]));
}

#[tokio::test]
async fn test_repository_search_pages() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path()).await;

    let html = body_text(send(&app, get("/repository?q=uncertainty")).await).await;
    assert!(html.contains("<h3>Risk Theme</h3>"));
    assert!(!html.contains("Risk Management Overview"));

    let none = body_text(send(&app, get("/repository?q=procurement")).await).await;
    assert!(none.contains("No results found. Try a different search term or filter."));

    let api = body_json(send(&app, get("/api/repository?filter=iso21502")).await).await;
    assert_eq!(api["data"]["items"].as_array().unwrap().len(), 1);
    assert_eq!(api["data"]["no_results"], false);
}

#[tokio::test]
async fn test_comparison_endpoints() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path()).await;

    let resp = send(&app, get("/api/comparisons/risk")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["data"]["iso"]["page"], 78);

    let missing = send(&app, get("/api/comparisons/procurement")).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    let html = body_text(send(&app, get("/comparison?topic=procurement")).await).await;
    assert!(html.contains("Comparison data not available for this topic."));
}

#[tokio::test]
async fn test_insights_and_process_api() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path()).await;

    let insights = body_json(send(&app, get("/api/insights")).await).await;
    assert_eq!(insights["data"]["similarities"].as_array().unwrap().len(), 3);
    assert_eq!(insights["data"]["coverage"]["rows"].as_array().unwrap().len(), 8);

    let process = body_json(send(&app, get("/api/process?type=research&size=small&maturity=low&focus=risk")).await).await;
    assert_eq!(process["data"]["title"], "Tailored Process for Research Project");
    assert_eq!(process["data"]["phases"][1]["activities"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_pdfs_are_served_from_configured_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("sample.pdf"), b"%PDF-1.7").unwrap();
    let app = test_app(dir.path()).await;

    let resp = send(&app, get("/pdfs/sample.pdf")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_text(resp).await, "%PDF-1.7");
}

#[tokio::test]
async fn test_page_zero_in_body_is_bad_request() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path()).await;

    let add = send(&app, json_request("POST", "/api/documents/pmbok/bookmarks", json!({"page": 0}))).await;
    assert_eq!(add.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(add).await["error"].is_string());

    let put = send(&app, json_request("PUT", "/api/documents/pmbok/position", json!({"page": 0}))).await;
    assert_eq!(put.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(put).await["error"].is_string());

    let list = body_json(send(&app, get("/api/documents/pmbok/bookmarks")).await).await;
    assert_eq!(list["data"], json!([]));
    let position = body_json(send(&app, get("/api/documents/pmbok/position")).await).await;
    assert_eq!(position["data"]["page"], Value::Null);
}

#[tokio::test]
async fn test_viewer_cleared_page_field_resumes() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path()).await;

    send(&app, get("/viewer/pmbok?page=145")).await;

    let resp = send(&app, get("/viewer/pmbok?page=")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("PMBOK 7 &mdash; Page 145"));
}

#[tokio::test]
async fn test_viewer_unparseable_page_shows_notice() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path()).await;

    let resp = send(&app, get("/viewer/pmbok?page=abc")).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let html = body_text(resp).await;
    assert!(html.contains("Page numbers start at 1."));
    assert!(!html.contains("<iframe"));
}

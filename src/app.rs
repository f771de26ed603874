use std::path::Path;

use axum::{
    Router,
    http::Method,
    routing::get,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};

use crate::assets::serve_embedded;
use crate::bookmarks;
use crate::handler::{self, AppState};
use crate::web;

/// Full application router: HTML pages, JSON API, PDFs and static assets.
pub fn router(state: AppState, pdf_dir: &Path) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    let api = Router::new()
        .route("/documents", get(handler::list_documents))
        .route("/documents/:doc/locate", get(handler::locate))
        .nest("/documents", bookmarks::routes())
        .route("/repository", get(handler::search))
        .route("/comparisons/:topic", get(handler::comparison))
        .route("/insights", get(handler::insights))
        .route("/process", get(handler::process));

    Router::new()
        .route("/healthz", get(handler::healthcheck))
        .merge(web::routes())
        .nest("/api", api)
        .nest_service("/pdfs", ServeDir::new(pdf_dir))
        .fallback(serve_embedded)
        .layer(cors)
        .with_state(state)
}

use axum::{
    Router,
    routing::{get, post},
};

use super::handler;
use crate::handler::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::repository))
        .route("/repository", get(handler::repository))
        .route("/comparison", get(handler::comparison))
        .route("/insights", get(handler::insights))
        .route("/generator", get(handler::generator))
        .route("/viewer/:doc", get(handler::viewer))
        .route("/viewer/:doc/bookmarks", post(handler::bookmark_action))
}

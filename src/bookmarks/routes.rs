use axum::{
    Router,
    routing::{delete, get, post, put},
};

use super::handler;
use crate::handler::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/:doc/bookmarks", get(handler::list_bookmarks))
        .route("/:doc/bookmarks", post(handler::add_bookmark))
        .route("/:doc/bookmarks/:page", get(handler::has_bookmark))
        .route("/:doc/bookmarks/:page", delete(handler::remove_bookmark))
        .route("/:doc/position", get(handler::get_position))
        .route("/:doc/position", put(handler::put_position))
}

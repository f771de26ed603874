//! HTTP handlers for bookmarks and reading positions

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use super::{Bookmarks, ReadingPositions};
use crate::api::{bad_request, conflict, created, internal_error, not_found, success};
use crate::handler::AppState;
use crate::model::{DocumentId, Page};

#[derive(Debug, Deserialize)]
pub struct AddBookmark {
    pub page: u32,
    #[serde(default)]
    pub note: String,
}

#[derive(Debug, Deserialize)]
pub struct SetPosition {
    pub page: u32,
}

#[derive(Debug, Serialize)]
struct Added {
    added: bool,
}

#[derive(Debug, Serialize)]
struct Bookmarked {
    page: Page,
    bookmarked: bool,
}

#[derive(Debug, Serialize)]
struct Position {
    document: DocumentId,
    page: Option<Page>,
}

fn document(state: &AppState, doc: &str) -> Result<DocumentId, Response> {
    state.documents.lookup(doc).map(|d| d.id).map_err(|e| not_found(&e.to_string()))
}

fn page(raw: u32) -> Result<Page, Response> {
    Page::new(raw).ok_or_else(|| bad_request("page numbers start at 1"))
}

pub async fn list_bookmarks(State(state): State<AppState>, Path(doc): Path<String>) -> Response {
    let doc = match document(&state, &doc) {
        Ok(doc) => doc,
        Err(resp) => return resp,
    };

    match Bookmarks::new(&state.db).list(doc).await {
        Ok(bookmarks) => success(bookmarks),
        Err(e) => {
            tracing::error!(document = %doc, error = %e, "failed to list bookmarks");
            internal_error("Failed to list bookmarks")
        }
    }
}

pub async fn add_bookmark(
    State(state): State<AppState>,
    Path(doc): Path<String>,
    Json(payload): Json<AddBookmark>,
) -> Response {
    let (doc, page) = match document(&state, &doc).and_then(|d| Ok((d, page(payload.page)?))) {
        Ok(parsed) => parsed,
        Err(resp) => return resp,
    };

    match Bookmarks::new(&state.db).add(doc, page, &payload.note).await {
        Ok(true) => created(Added { added: true }),
        Ok(false) => conflict(Added { added: false }),
        Err(e) => {
            tracing::error!(document = %doc, error = %e, "failed to add bookmark");
            internal_error("Failed to add bookmark")
        }
    }
}

pub async fn has_bookmark(State(state): State<AppState>, Path((doc, raw_page)): Path<(String, u32)>) -> Response {
    let (doc, page) = match document(&state, &doc).and_then(|d| Ok((d, page(raw_page)?))) {
        Ok(parsed) => parsed,
        Err(resp) => return resp,
    };

    match Bookmarks::new(&state.db).has(doc, page).await {
        Ok(bookmarked) => success(Bookmarked { page, bookmarked }),
        Err(e) => {
            tracing::error!(document = %doc, error = %e, "failed to read bookmarks");
            internal_error("Failed to read bookmarks")
        }
    }
}

pub async fn remove_bookmark(
    State(state): State<AppState>,
    Path((doc, raw_page)): Path<(String, u32)>,
) -> Response {
    let (doc, page) = match document(&state, &doc).and_then(|d| Ok((d, page(raw_page)?))) {
        Ok(parsed) => parsed,
        Err(resp) => return resp,
    };

    match Bookmarks::new(&state.db).remove(doc, page).await {
        Ok(()) => (StatusCode::NO_CONTENT, ()).into_response(),
        Err(e) => {
            tracing::error!(document = %doc, error = %e, "failed to remove bookmark");
            internal_error("Failed to remove bookmark")
        }
    }
}

pub async fn get_position(State(state): State<AppState>, Path(doc): Path<String>) -> Response {
    let doc = match document(&state, &doc) {
        Ok(doc) => doc,
        Err(resp) => return resp,
    };

    match ReadingPositions::new(&state.db).get_last(doc).await {
        Ok(page) => success(Position { document: doc, page }),
        Err(e) => {
            tracing::error!(document = %doc, error = %e, "failed to read position");
            internal_error("Failed to read position")
        }
    }
}

pub async fn put_position(
    State(state): State<AppState>,
    Path(doc): Path<String>,
    Json(payload): Json<SetPosition>,
) -> Response {
    let (doc, page) = match document(&state, &doc).and_then(|d| Ok((d, page(payload.page)?))) {
        Ok(parsed) => parsed,
        Err(resp) => return resp,
    };

    match ReadingPositions::new(&state.db).set_last(doc, page).await {
        Ok(()) => success(Position {
            document: doc,
            page: Some(page),
        }),
        Err(e) => {
            tracing::error!(document = %doc, error = %e, "failed to save position");
            internal_error("Failed to save position")
        }
    }
}

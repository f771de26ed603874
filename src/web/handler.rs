//! HTML handlers for the tabbed UI and the PDF viewer

use axum::{
    Form,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::bookmarks::{Bookmarks, ReadingPositions};
use crate::content::{coverage_map, generate_process, search_repository};
use crate::error::LocatorError;
use crate::handler::{AppState, ProcessParams, SearchParams};
use crate::model::{DocumentId, Page};
use crate::views::{self, Tab, ViewerModel};

pub const DOCUMENT_NOT_FOUND: &str = "PDF file not found for this standard.";

#[derive(Debug, Default, Deserialize)]
pub struct ComparisonParams {
    pub topic: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ViewerParams {
    pub page: Option<String>,
}

impl ViewerParams {
    /// `Ok(None)` when no page was asked for, including a cleared jump field.
    fn requested_page(&self) -> Result<Option<Page>, ()> {
        match self.page.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw.parse::<u32>().ok().and_then(Page::new).map(Some).ok_or(()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookmarkAction {
    #[default]
    Toggle,
    Add,
    Remove,
}

#[derive(Debug, Deserialize)]
pub struct BookmarkForm {
    pub page: u32,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub action: BookmarkAction,
}

fn notice(status: StatusCode, title: &str, message: &str) -> Response {
    (status, Html(views::render_notice(title, message))).into_response()
}

fn storage_failure() -> Response {
    notice(
        StatusCode::INTERNAL_SERVER_ERROR,
        "Something went wrong",
        "Bookmarks could not be read or saved. Please try again.",
    )
}

fn unknown_document(doc: &str) -> Response {
    tracing::warn!(document = %doc, "viewer requested for unknown document");
    notice(StatusCode::NOT_FOUND, "Document unavailable", DOCUMENT_NOT_FOUND)
}

/// Tab the viewer returns to, taken from the referring page.
fn close_target(headers: &HeaderMap) -> &'static str {
    let Some(referer) = headers.get(header::REFERER).and_then(|v| v.to_str().ok()) else {
        return "/";
    };

    let path = match referer.find("://") {
        Some(i) => {
            let rest = &referer[i + 3..];
            rest.find('/').map(|j| &rest[j..]).unwrap_or("/")
        }
        None => referer,
    };
    let path = path.split(['?', '#']).next().unwrap_or_default();

    Tab::ALL
        .iter()
        .find(|tab| path == tab.path())
        .map(|tab| tab.path())
        .unwrap_or("/")
}

pub async fn repository(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Html<String> {
    let filter = params.filter();
    let listing = search_repository(&state.content.repository, params.term(), &filter);
    let body = views::render_repository(&listing, params.term(), &filter, &state.documents);
    Html(views::layout(Tab::Repository, &body))
}

pub async fn comparison(State(state): State<AppState>, Query(params): Query<ComparisonParams>) -> Html<String> {
    let selected = params
        .topic
        .or_else(|| state.content.comparisons.keys().next().cloned())
        .unwrap_or_default();
    let body = views::render_comparison(&state.content, &selected, &state.documents);
    Html(views::layout(Tab::Comparison, &body))
}

pub async fn insights(State(state): State<AppState>) -> Html<String> {
    let body = views::render_insights(&state.content.insights, &coverage_map(), &state.documents);
    Html(views::layout(Tab::Insights, &body))
}

pub async fn generator(State(state): State<AppState>, Query(params): Query<ProcessParams>) -> Html<String> {
    let submitted = params.submitted();
    let request = params.into_request();
    let process = submitted.then(|| generate_process(&request, &state.content));
    let body = views::render_generator(&request, process.as_ref(), &state.documents);
    Html(views::layout(Tab::Generator, &body))
}

pub async fn viewer(
    State(state): State<AppState>,
    Path(doc): Path<String>,
    Query(params): Query<ViewerParams>,
    headers: HeaderMap,
) -> Response {
    let Ok(descriptor) = state.documents.lookup(&doc) else {
        return unknown_document(&doc);
    };
    let id = descriptor.id;
    let positions = ReadingPositions::new(&state.db);

    let page = match params.requested_page() {
        Ok(Some(page)) => page,
        Err(()) => return notice(StatusCode::BAD_REQUEST, "Invalid page", "Page numbers start at 1."),
        Ok(None) => match positions.get_last(id).await {
            Ok(last) => last.unwrap_or(Page::MIN),
            Err(e) => {
                tracing::error!(document = %id, error = %e, "failed to read reading position");
                Page::MIN
            }
        },
    };

    let location = match state.documents.resolve_id(id, page) {
        Ok(location) => location,
        Err(e @ LocatorError::InvalidPage { .. }) => {
            return notice(StatusCode::BAD_REQUEST, "Invalid page", &e.to_string());
        }
        Err(LocatorError::NotFound(_)) => return unknown_document(&doc),
    };

    if let Err(e) = positions.set_last(id, page).await {
        tracing::error!(document = %id, page = page.get(), error = %e, "failed to record reading position");
    }

    let bookmarks = match Bookmarks::new(&state.db).list(id).await {
        Ok(bookmarks) => bookmarks,
        Err(e) => {
            tracing::error!(document = %id, error = %e, "failed to list bookmarks");
            return storage_failure();
        }
    };
    let bookmarked = bookmarks.iter().any(|b| b.page == page);

    let model = ViewerModel {
        descriptor,
        location,
        bookmarks,
        bookmarked,
        close_href: close_target(&headers),
    };
    Html(views::render_viewer(&model)).into_response()
}

async fn apply(state: &AppState, id: DocumentId, page: Page, form: &BookmarkForm) -> anyhow::Result<()> {
    let store = Bookmarks::new(&state.db);
    match form.action {
        BookmarkAction::Toggle => {
            store.toggle(id, page, &form.note).await?;
        }
        BookmarkAction::Add => {
            store.add(id, page, &form.note).await?;
        }
        BookmarkAction::Remove => store.remove(id, page).await?,
    }
    Ok(())
}

pub async fn bookmark_action(
    State(state): State<AppState>,
    Path(doc): Path<String>,
    Form(form): Form<BookmarkForm>,
) -> Response {
    let Ok(descriptor) = state.documents.lookup(&doc) else {
        return unknown_document(&doc);
    };
    let Some(page) = Page::new(form.page) else {
        return notice(StatusCode::BAD_REQUEST, "Invalid page", "Page numbers start at 1.");
    };

    // a duplicate add is not an error here, the viewer simply reloads
    if let Err(e) = apply(&state, descriptor.id, page, &form).await {
        tracing::error!(document = %descriptor.id, page = page.get(), error = %e, "bookmark action failed");
        return storage_failure();
    }

    Redirect::to(&format!("/viewer/{}?page={}", descriptor.id, page)).into_response()
}

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use tracing::info;

use crate::api::{bad_request, not_found, success};
use crate::content::{
    ContentItem, ContentPayload, CoverageMap, Filter, Insights, Listing, ProcessRequest, coverage_map,
    generate_process, search_repository,
};
use crate::db::Database;
use crate::documents::DocumentRegistry;
use crate::error::LocatorError;
use crate::model::Page;
use crate::views::NO_COMPARISON;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub content: Arc<ContentPayload>,
    pub documents: Arc<DocumentRegistry>,
}

const DEFAULT_PROJECT_TYPE: &str = "software";
const DEFAULT_SIZE: &str = "medium";
const DEFAULT_MATURITY: &str = "medium";

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub filter: Option<String>,
}

impl SearchParams {
    pub fn term(&self) -> &str {
        self.q.as_deref().unwrap_or_default()
    }

    pub fn filter(&self) -> Filter {
        Filter::parse(self.filter.as_deref())
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ProcessParams {
    #[serde(rename = "type")]
    pub project_type: Option<String>,
    pub size: Option<String>,
    pub maturity: Option<String>,
    pub focus: Option<String>,
}

impl ProcessParams {
    /// The form has been submitted once a project type is present.
    pub fn submitted(&self) -> bool {
        self.project_type.is_some()
    }

    pub fn into_request(self) -> ProcessRequest {
        ProcessRequest {
            project_type: self.project_type.unwrap_or_else(|| DEFAULT_PROJECT_TYPE.to_string()),
            size: self.size.unwrap_or_else(|| DEFAULT_SIZE.to_string()),
            maturity: self.maturity.unwrap_or_else(|| DEFAULT_MATURITY.to_string()),
            focus_areas: ProcessRequest::parse_focus(self.focus.as_deref()),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LocateParams {
    pub page: Option<u32>,
}

#[derive(Debug, Serialize)]
struct SearchResults<'a> {
    items: &'a [&'a ContentItem],
    no_results: bool,
}

#[derive(Debug, Serialize)]
struct InsightsView<'a> {
    #[serde(flatten)]
    insights: &'a Insights,
    coverage: CoverageMap,
}

pub async fn healthcheck() -> impl IntoResponse {
    info!("got healthcheck request");
    success("ok")
}

pub async fn list_documents(State(state): State<AppState>) -> Response {
    success(state.documents.all())
}

pub async fn locate(
    State(state): State<AppState>,
    Path(doc): Path<String>,
    Query(params): Query<LocateParams>,
) -> Response {
    let Some(page) = params.page else {
        return bad_request("page is required");
    };
    let Some(page) = Page::new(page) else {
        return bad_request("page numbers start at 1");
    };

    match state.documents.resolve(&doc, page) {
        Ok(location) => success(location),
        Err(e @ LocatorError::NotFound(_)) => {
            tracing::warn!(document = %doc, "locate requested for unknown document");
            not_found(&e.to_string())
        }
        Err(e @ LocatorError::InvalidPage { .. }) => bad_request(&e.to_string()),
    }
}

pub async fn search(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Response {
    let listing = search_repository(&state.content.repository, params.term(), &params.filter());
    success(SearchResults {
        items: listing.items(),
        no_results: matches!(listing, Listing::NoResults),
    })
}

pub async fn comparison(State(state): State<AppState>, Path(topic): Path<String>) -> Response {
    match state.content.comparison(&topic) {
        Some(comparison) => success(comparison),
        None => not_found(NO_COMPARISON),
    }
}

pub async fn insights(State(state): State<AppState>) -> Response {
    success(InsightsView {
        insights: &state.content.insights,
        coverage: coverage_map(),
    })
}

pub async fn process(State(state): State<AppState>, Query(params): Query<ProcessParams>) -> Response {
    let request = params.into_request();
    info!(project_type = %request.project_type, focus = ?request.focus_areas, "generating process");
    success(generate_process(&request, &state.content))
}

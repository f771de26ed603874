//! Server-rendered HTML for the reference viewer.
//!
//! Every function here is pure: it takes already-loaded content or view
//! models and returns markup. Payload text is escaped on the way out.

mod comparison;
mod insights;
mod process;
mod repository;
mod viewer;

pub use comparison::render_comparison;
pub use insights::render_insights;
pub use process::render_generator;
pub use repository::render_repository;
pub use viewer::{ViewerModel, render_notice, render_viewer};

use crate::documents::DocumentRegistry;
use crate::model::Citation;

pub const NO_RESULTS: &str = "No results found. Try a different search term or filter.";
pub const NO_COMPARISON: &str = "Comparison data not available for this topic.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Repository,
    Comparison,
    Insights,
    Generator,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Repository, Tab::Comparison, Tab::Insights, Tab::Generator];

    pub fn path(&self) -> &'static str {
        match self {
            Tab::Repository => "/repository",
            Tab::Comparison => "/comparison",
            Tab::Insights => "/insights",
            Tab::Generator => "/generator",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Repository => "Repository",
            Tab::Comparison => "Comparison",
            Tab::Insights => "Insights",
            Tab::Generator => "Process Generator",
        }
    }
}

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn page_shell(title: &str, body: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
    <head>
        <meta charset="utf-8">
        <title>{title}</title>
        <link rel="stylesheet" href="/styles.css">
    </head>
    <body>
{body}
    </body>
</html>
"#,
        title = escape(title),
        body = body
    )
}

/// Wraps a tab body in the page chrome; exactly one tab is marked active.
pub fn layout(active: Tab, body: &str) -> String {
    let nav: String = Tab::ALL
        .iter()
        .map(|tab| {
            let class = if *tab == active { "tab-btn active" } else { "tab-btn" };
            format!(r#"<a class="{}" href="{}">{}</a>"#, class, tab.path(), tab.label())
        })
        .collect();

    let body = format!(
        r#"<header><h1>PM Standards Comparison</h1><nav class="tabs">{nav}</nav></header>
<main id="{id}" class="tab-content active">
{body}
</main>"#,
        nav = nav,
        id = active.path().trim_start_matches('/'),
        body = body
    );

    page_shell(&format!("{} · PM Standards", active.label()), &body)
}

pub fn viewer_href(citation: &Citation) -> String {
    format!("/viewer/{}?page={}", citation.standard, citation.page)
}

/// Badge linking a citation to the viewer, e.g. "PMBOK 7 p.145".
pub fn citation_badge(documents: &DocumentRegistry, citation: &Citation, class: &str) -> String {
    format!(
        r#"<a class="{}" href="{}">{} p.{}</a>"#,
        class,
        viewer_href(citation),
        documents.display_name(citation.standard),
        citation.page
    )
}

fn list_items(items: &[String]) -> String {
    items.iter().map(|i| format!("<li>{}</li>", escape(i))).collect()
}

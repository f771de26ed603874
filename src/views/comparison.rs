use super::{NO_COMPARISON, citation_badge, escape, list_items};
use crate::content::{Comparison, ContentPayload, StandardSummary};
use crate::documents::DocumentRegistry;
use crate::model::{Citation, DocumentId};

fn topic_selector(content: &ContentPayload, selected: &str) -> String {
    let options: String = content
        .comparisons
        .keys()
        .map(|topic| {
            let marker = if topic == selected { " selected" } else { "" };
            format!(r#"<option value="{0}"{1}>{0}</option>"#, escape(topic), marker)
        })
        .collect();

    format!(
        r#"<form class="topic-selector" method="get" action="/comparison">
    <select id="comparisonTopic" name="topic">{}</select>
    <button type="submit">Compare</button>
</form>"#,
        options
    )
}

fn column(documents: &DocumentRegistry, standard: DocumentId, summary: &StandardSummary) -> String {
    let citation = Citation {
        standard,
        page: summary.page,
    };

    format!(
        r#"<div class="comparison-column {std}">
    <div class="standard-badge {std}">{name}</div>
    <h3>{title}</h3>
    <p>{description}</p>
    <ul class="key-points">{points}</ul>
    {badge}
</div>
"#,
        std = standard,
        name = documents.display_name(standard),
        title = escape(&summary.title),
        description = escape(&summary.description),
        points = list_items(&summary.key_points),
        badge = citation_badge(documents, &citation, "page-ref"),
    )
}

fn analysis_block(heading: &str, entries: &[String]) -> String {
    if entries.is_empty() {
        return String::new();
    }
    format!("<h4>{}</h4><ul>{}</ul>", heading, list_items(entries))
}

fn comparison_body(documents: &DocumentRegistry, comparison: &Comparison) -> String {
    let columns: String = comparison
        .columns()
        .into_iter()
        .map(|(standard, summary)| column(documents, standard, summary))
        .collect();

    let analysis = &comparison.analysis;
    format!(
        r#"<div class="comparison-grid">
{columns}</div>
<div class="comparison-analysis">
{similarities}{differences}{recommendations}
</div>"#,
        columns = columns,
        similarities = analysis_block("Similarities", &analysis.similarities),
        differences = analysis_block("Differences", &analysis.differences),
        recommendations = analysis_block("Recommendations", &analysis.recommendations),
    )
}

pub fn render_comparison(content: &ContentPayload, selected: &str, documents: &DocumentRegistry) -> String {
    let body = match content.comparison(selected) {
        Some(comparison) => comparison_body(documents, comparison),
        None => format!(r#"<div class="no-results">{}</div>"#, NO_COMPARISON),
    };

    format!(
        "{}\n<div id=\"comparisonContent\">\n{}\n</div>",
        topic_selector(content, selected),
        body
    )
}

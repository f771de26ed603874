use super::{NO_RESULTS, escape, viewer_href};
use crate::content::{ContentItem, Filter, Listing};
use crate::documents::DocumentRegistry;
use crate::model::DocumentId;

fn filter_chips(term: &str, filter: &Filter, documents: &DocumentRegistry) -> String {
    let mut chips = vec![("all", "All")];
    chips.extend(DocumentId::ALL.iter().map(|id| (id.as_str(), documents.display_name(*id))));

    chips
        .into_iter()
        .map(|(value, label)| {
            let class = if filter.as_str() == value {
                "filter-chip active"
            } else {
                "filter-chip"
            };
            format!(
                r#"<a class="{}" href="/repository?q={}&amp;filter={}">{}</a>"#,
                class,
                urlencoding::encode(term),
                value,
                label
            )
        })
        .collect()
}

fn card(item: &ContentItem, documents: &DocumentRegistry) -> String {
    let keywords: String = item
        .keywords
        .iter()
        .map(|k| format!(r#"<span class="keyword-tag">{}</span>"#, escape(k)))
        .collect();

    format!(
        r#"<div class="standard-card" data-standard="{std}">
    <div class="standard-badge {std}">{name}</div>
    <h3>{title}</h3>
    <p class="standard-content">{content}</p>
    <div class="standard-meta">
        <span class="page-ref">Page {page}</span>
        <div class="standard-keywords">{keywords}</div>
    </div>
    <div class="standard-actions">
        <a class="btn-link" href="{href}">Open in PDF</a>
    </div>
</div>
"#,
        std = item.standard,
        name = documents.display_name(item.standard),
        title = escape(&item.title),
        content = escape(&item.content),
        page = item.page,
        keywords = keywords,
        href = viewer_href(&item.citation()),
    )
}

pub fn render_repository(listing: &Listing<'_>, term: &str, filter: &Filter, documents: &DocumentRegistry) -> String {
    let results = match listing {
        Listing::NoResults => format!(r#"<div class="no-results">{}</div>"#, NO_RESULTS),
        Listing::Items(items) => items.iter().map(|item| card(item, documents)).collect(),
    };

    format!(
        r#"<form class="search-bar" method="get" action="/repository">
    <input id="repoSearch" type="search" name="q" value="{term}" placeholder="Search standards...">
    <input type="hidden" name="filter" value="{filter}">
    <button type="submit">Search</button>
</form>
<div class="filter-chips">{chips}</div>
<div id="repositoryContent">
{results}
</div>"#,
        term = escape(term),
        filter = escape(filter.as_str()),
        chips = filter_chips(term, filter, documents),
        results = results
    )
}

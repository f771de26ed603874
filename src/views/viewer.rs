use super::{escape, page_shell};
use crate::documents::{DocumentDescriptor, Location};
use crate::model::Bookmark;

/// Everything the viewer page needs for one open document.
#[derive(Debug)]
pub struct ViewerModel<'a> {
    pub descriptor: &'a DocumentDescriptor,
    pub location: Location,
    pub bookmarks: Vec<Bookmark>,
    pub bookmarked: bool,
    /// Tab to return to when the viewer is closed.
    pub close_href: &'static str,
}

impl ViewerModel<'_> {
    fn href(&self, page: u32) -> String {
        format!("/viewer/{}?page={}", self.descriptor.id, page)
    }

    fn action(&self) -> String {
        format!("/viewer/{}/bookmarks", self.descriptor.id)
    }
}

fn navigation(model: &ViewerModel<'_>) -> String {
    let page = model.location.logical_page.get();
    // the previous page must still map to a physical page of the PDF
    let prev = if page > 1 && model.location.physical_page > 1 {
        format!(r#"<a class="nav-btn" href="{}">&larr; Prev</a>"#, model.href(page - 1))
    } else {
        r#"<span class="nav-btn disabled">&larr; Prev</span>"#.to_string()
    };
    let next = match page.checked_add(1) {
        Some(n) => format!(r#"<a class="nav-btn" href="{}">Next &rarr;</a>"#, model.href(n)),
        None => r#"<span class="nav-btn disabled">Next &rarr;</span>"#.to_string(),
    };

    format!(
        r#"<div class="viewer-nav">
    {prev}
    <form class="page-jump" method="get" action="/viewer/{doc}">
        <label>Page <input id="pageInput" type="number" name="page" min="1" value="{page}"></label>
        <button type="submit">Go</button>
    </form>
    {next}
</div>"#,
        prev = prev,
        next = next,
        doc = model.descriptor.id,
        page = page
    )
}

fn toggle_form(model: &ViewerModel<'_>) -> String {
    let (label, class) = if model.bookmarked {
        ("Remove bookmark", "bookmark-btn bookmarked")
    } else {
        ("Bookmark this page", "bookmark-btn")
    };

    format!(
        r#"<form class="bookmark-toggle" method="post" action="{action}">
    <input type="hidden" name="page" value="{page}">
    <input type="hidden" name="action" value="toggle">
    <input type="text" name="note" placeholder="Note (optional)">
    <button type="submit" class="{class}">{label}</button>
</form>"#,
        action = model.action(),
        page = model.location.logical_page,
        class = class,
        label = label
    )
}

fn bookmark_panel(model: &ViewerModel<'_>) -> String {
    if model.bookmarks.is_empty() {
        return r#"<aside class="bookmark-panel"><h3>Bookmarks</h3><p class="empty">No bookmarks yet.</p></aside>"#
            .to_string();
    }

    let entries: String = model
        .bookmarks
        .iter()
        .map(|b| {
            let note = if b.note.is_empty() {
                String::new()
            } else {
                format!(r#"<span class="bookmark-note">{}</span>"#, escape(&b.note))
            };
            format!(
                r#"<li>
    <a href="{href}">Page {page}</a>{note}
    <time datetime="{ts}">{date}</time>
    <form method="post" action="{action}"><input type="hidden" name="page" value="{page}"><input type="hidden" name="action" value="remove"><button type="submit" class="remove-btn">&times;</button></form>
</li>"#,
                href = model.href(b.page.get()),
                page = b.page,
                note = note,
                ts = b.timestamp.to_rfc3339(),
                date = b.timestamp.format("%Y-%m-%d"),
                action = model.action()
            )
        })
        .collect();

    format!(
        r#"<aside class="bookmark-panel"><h3>Bookmarks</h3><ul id="bookmarkList">{}</ul></aside>"#,
        entries
    )
}

pub fn render_viewer(model: &ViewerModel<'_>) -> String {
    let body = format!(
        r#"<div id="pdfModal" class="modal open">
    <div class="modal-header">
        <h2 id="pdfModalTitle">{name} &mdash; Page {page}</h2>
        <a class="close-btn" href="{close}">Close</a>
    </div>
    {nav}
    {toggle}
    <div class="viewer-body">
        <iframe id="pdfFrame" title="{name}" src="{src}"></iframe>
        {panel}
    </div>
</div>"#,
        name = model.descriptor.name,
        page = model.location.logical_page,
        close = model.close_href,
        nav = navigation(model),
        toggle = toggle_form(model),
        src = escape(&model.location.url),
        panel = bookmark_panel(model)
    );

    page_shell(&format!("{} · PM Standards", model.descriptor.name), &body)
}

/// Standalone notice page, used when a document cannot be opened.
pub fn render_notice(title: &str, message: &str) -> String {
    let body = format!(
        r#"<div class="notice"><h2>{}</h2><p>{}</p><a class="btn-link" href="/">Back to repository</a></div>"#,
        escape(title),
        escape(message)
    );
    page_shell(title, &body)
}

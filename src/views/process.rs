use super::{citation_badge, escape};
use crate::content::{
    FOCUS_AREAS, GeneratedProcess, MATURITY_LEVELS, PROJECT_SIZES, PROJECT_TYPES, ProcessEntry, ProcessRequest,
    TailoredProcess,
};
use crate::documents::DocumentRegistry;
use crate::model::Citation;

fn select(id: &str, name: &str, options: &[&str], selected: &str) -> String {
    let options: String = options
        .iter()
        .map(|value| {
            let marker = if *value == selected { " selected" } else { "" };
            format!(r#"<option value="{0}"{1}>{0}</option>"#, value, marker)
        })
        .collect();
    format!(r#"<select id="{}" name="{}">{}</select>"#, id, name, options)
}

fn form(req: &ProcessRequest) -> String {
    format!(
        r#"<form class="generator-form" method="get" action="/generator">
    <label>Project type {project_type}</label>
    <label>Project size {size}</label>
    <label>Organizational maturity {maturity}</label>
    <label>Focus areas <input id="focusAreas" type="text" name="focus" value="{focus}" placeholder="{hint}"></label>
    <button type="submit">Generate Process</button>
</form>"#,
        project_type = select("projectType", "type", &PROJECT_TYPES, &req.project_type),
        size = select("projectSize", "size", &PROJECT_SIZES, &req.size),
        maturity = select("orgMaturity", "maturity", &MATURITY_LEVELS, &req.maturity),
        focus = escape(&req.focus_areas.join(",")),
        hint = FOCUS_AREAS.join(","),
    )
}

fn badges(documents: &DocumentRegistry, refs: &[Citation]) -> String {
    refs.iter()
        .map(|c| citation_badge(documents, c, "ref-badge"))
        .collect()
}

fn scenario_entry(documents: &DocumentRegistry, entry: &ProcessEntry) -> String {
    let description = entry
        .description
        .as_deref()
        .map(|d| format!("<p>{}</p>", escape(d)))
        .unwrap_or_default();
    let activities: String = entry
        .activities
        .iter()
        .map(|a| format!("<li>{} {}</li>", escape(&a.description), badges(documents, &a.references)))
        .collect();
    let activities = if activities.is_empty() {
        activities
    } else {
        format!("<ul>{}</ul>", activities)
    };

    format!(
        r#"<div class="scenario-entry"><h5>{}</h5>{}{}<div class="process-refs">{}</div></div>"#,
        escape(&entry.name),
        description,
        activities,
        badges(documents, &entry.references)
    )
}

fn scenario(documents: &DocumentRegistry, scenario: &TailoredProcess) -> String {
    let heading = scenario
        .title
        .as_deref()
        .map(|t| format!("<h3>{}</h3>", escape(t)))
        .unwrap_or_default();
    let description = scenario
        .description
        .as_deref()
        .map(|d| format!("<p>{}</p>", escape(d)))
        .unwrap_or_default();

    let sections: String = scenario
        .sections()
        .into_iter()
        .filter(|(_, entries)| !entries.is_empty())
        .map(|(label, entries)| {
            let body: String = entries.iter().map(|e| scenario_entry(documents, e)).collect();
            format!(r#"<div class="scenario-section"><h4>{}</h4>{}</div>"#, label, body)
        })
        .collect();

    format!(r#"<div class="scenario">{}{}{}</div>"#, heading, description, sections)
}

fn generated(documents: &DocumentRegistry, req: &ProcessRequest, process: &GeneratedProcess) -> String {
    let phases: String = process
        .phases
        .iter()
        .enumerate()
        .map(|(i, phase)| {
            let activities: String = phase
                .activities
                .iter()
                .map(|a| format!("<li>{} {}</li>", escape(a.description), badges(documents, &a.references)))
                .collect();
            format!(
                r#"<div class="process-phase">
    <h4><span class="phase-number">{}</span>{}</h4>
    <ul class="process-activities">{}</ul>
    <p class="deliverables"><strong>Deliverables:</strong> {}</p>
</div>
"#,
                i + 1,
                escape(phase.name),
                activities,
                phase.deliverables.join(", ")
            )
        })
        .collect();

    let scenario = process
        .scenario
        .as_ref()
        .map(|s| scenario(documents, s))
        .unwrap_or_default();

    format!(
        r#"<div class="process-header">
    <h3>{title}</h3>
    <p class="process-meta">{meta}</p>
    <button type="button" class="print-btn" onclick="window.print()">Print</button>
    <a class="btn-link" href="{json}">Export JSON</a>
</div>
{phases}{scenario}"#,
        title = escape(&process.title),
        meta = escape(&process.meta),
        json = escape(&json_href(req)),
        phases = phases,
        scenario = scenario
    )
}

fn json_href(req: &ProcessRequest) -> String {
    format!(
        "/api/process?type={}&size={}&maturity={}&focus={}",
        urlencoding::encode(&req.project_type),
        urlencoding::encode(&req.size),
        urlencoding::encode(&req.maturity),
        urlencoding::encode(&req.focus_areas.join(","))
    )
}

/// Generator tab. `process` is `None` until the form has been submitted.
pub fn render_generator(req: &ProcessRequest, process: Option<&GeneratedProcess>, documents: &DocumentRegistry) -> String {
    let output = process.map(|p| generated(documents, req, p)).unwrap_or_default();
    format!("{}\n<div id=\"processOutput\">\n{}\n</div>", form(req), output)
}

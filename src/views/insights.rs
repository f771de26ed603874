use super::{citation_badge, escape};
use crate::content::{CoverageLevel, CoverageMap, Insights};
use crate::documents::DocumentRegistry;
use crate::model::Citation;

fn similarities(insights: &Insights, documents: &DocumentRegistry) -> String {
    insights
        .similarities
        .iter()
        .map(|s| {
            let refs: String = s
                .references
                .iter()
                .map(|c| citation_badge(documents, c, "ref-badge"))
                .collect();
            format!(
                r#"<div class="insight-item"><h4>{}</h4><p>{}</p><div class="insight-refs">{}</div></div>"#,
                escape(&s.topic),
                escape(&s.description),
                refs
            )
        })
        .collect()
}

fn differences(insights: &Insights, documents: &DocumentRegistry) -> String {
    insights
        .differences
        .iter()
        .map(|d| {
            let approaches: String = d
                .standards
                .iter()
                .map(|a| {
                    let citation = Citation {
                        standard: a.standard,
                        page: a.page,
                    };
                    format!(
                        r#"<li><strong>{}:</strong> {} {}</li>"#,
                        documents.display_name(a.standard),
                        escape(&a.approach),
                        citation_badge(documents, &citation, "ref-badge")
                    )
                })
                .collect();
            format!(
                r#"<div class="insight-item"><h4>{}</h4><ul>{}</ul></div>"#,
                escape(&d.topic),
                approaches
            )
        })
        .collect()
}

fn unique_elements(insights: &Insights, documents: &DocumentRegistry) -> String {
    insights
        .unique
        .iter()
        .map(|u| {
            let citation = Citation {
                standard: u.standard,
                page: u.page,
            };
            format!(
                r#"<div class="insight-item {std}"><div class="standard-badge {std}">{name}</div><h4>{topic}</h4><p>{description}</p>{badge}</div>"#,
                std = u.standard,
                name = documents.display_name(u.standard),
                topic = escape(&u.topic),
                description = escape(&u.description),
                badge = citation_badge(documents, &citation, "ref-badge"),
            )
        })
        .collect()
}

fn coverage_table(map: &CoverageMap, documents: &DocumentRegistry) -> String {
    let header: String = map
        .documents
        .iter()
        .map(|id| format!("<th>{}</th>", documents.display_name(*id)))
        .collect();

    let rows: String = map
        .rows
        .iter()
        .map(|row| {
            let cells: String = row
                .cells
                .iter()
                .map(|cell| {
                    format!(
                        r#"<td class="coverage-cell {}" title="{}">{}</td>"#,
                        cell.level.css_class(),
                        escape(&cell.description),
                        cell.level.label()
                    )
                })
                .collect();
            format!("<tr><th>{}</th>{}</tr>", row.topic, cells)
        })
        .collect();

    let legend: String = CoverageLevel::LEGEND
        .iter()
        .map(|level| {
            format!(
                r#"<span class="legend-item"><span class="coverage-swatch {}"></span>{}</span>"#,
                level.css_class(),
                level.label()
            )
        })
        .collect();

    format!(
        r#"<table class="coverage-map"><thead><tr><th>Topic</th>{}</tr></thead><tbody>{}</tbody></table>
<div class="coverage-legend">{}</div>"#,
        header, rows, legend
    )
}

pub fn render_insights(insights: &Insights, map: &CoverageMap, documents: &DocumentRegistry) -> String {
    format!(
        r#"<section class="insight-section">
    <h3>Common Ground</h3>
    <div id="similaritiesContent">{}</div>
</section>
<section class="insight-section">
    <h3>Key Differences</h3>
    <div id="differencesContent">{}</div>
</section>
<section class="insight-section">
    <h3>Unique Elements</h3>
    <div id="uniqueContent">{}</div>
</section>
<section class="insight-section">
    <h3>Coverage Map</h3>
    <div id="coverageMap">{}</div>
</section>"#,
        similarities(insights, documents),
        differences(insights, documents),
        unique_elements(insights, documents),
        coverage_table(map, documents)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentPayload, coverage_map};

    #[test]
    fn test_renders_every_insight_citation() {
        let content = ContentPayload::builtin();
        let html = render_insights(&content.insights, &coverage_map(), &DocumentRegistry::default());

        // 9 similarity refs, 9 difference approaches, 6 unique elements
        assert_eq!(html.matches(r#"class="ref-badge""#).count(), 24);
        assert!(html.contains(r#"href="/viewer/iso21500?page=8""#));
        assert!(html.contains("Uses &quot;Themes&quot; and &quot;Principles&quot;"));
    }

    #[test]
    fn test_coverage_map_has_no_random_levels() {
        let html = render_insights(&Insights::default(), &coverage_map(), &DocumentRegistry::default());

        assert_eq!(html.matches("coverage-cell not-analyzed").count(), 32);
        assert!(!html.contains("coverage-cell comprehensive"));
        assert!(html.contains("<tr><th>Procurement</th>"));
        assert_eq!(html.matches("legend-item").count(), 5);
    }
}

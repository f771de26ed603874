use serde::Serialize;

use crate::model::DocumentId;

pub const COVERAGE_TOPICS: [&str; 8] = [
    "Planning",
    "Risk",
    "Stakeholder",
    "Quality",
    "Resources",
    "Communication",
    "Procurement",
    "Integration",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverageLevel {
    Comprehensive,
    Moderate,
    Basic,
    None,
    NotAnalyzed,
}

impl CoverageLevel {
    pub const LEGEND: [CoverageLevel; 5] = [
        CoverageLevel::Comprehensive,
        CoverageLevel::Moderate,
        CoverageLevel::Basic,
        CoverageLevel::None,
        CoverageLevel::NotAnalyzed,
    ];

    pub fn css_class(&self) -> &'static str {
        match self {
            CoverageLevel::Comprehensive => "comprehensive",
            CoverageLevel::Moderate => "moderate",
            CoverageLevel::Basic => "basic",
            CoverageLevel::None => "none",
            CoverageLevel::NotAnalyzed => "not-analyzed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CoverageLevel::Comprehensive => "Comprehensive",
            CoverageLevel::Moderate => "Moderate",
            CoverageLevel::Basic => "Basic",
            CoverageLevel::None => "Not Covered",
            CoverageLevel::NotAnalyzed => "Not yet analyzed",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CoverageCell {
    pub document: DocumentId,
    pub level: CoverageLevel,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CoverageRow {
    pub topic: &'static str,
    pub cells: Vec<CoverageCell>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CoverageMap {
    pub documents: [DocumentId; 4],
    pub rows: Vec<CoverageRow>,
}

/// Topic x document coverage grid.
///
/// No coverage analysis exists yet, so every cell reports `NotAnalyzed`.
pub fn coverage_map() -> CoverageMap {
    let rows = COVERAGE_TOPICS
        .into_iter()
        .map(|topic| CoverageRow {
            topic,
            cells: DocumentId::ALL
                .into_iter()
                .map(|document| CoverageCell {
                    document,
                    level: CoverageLevel::NotAnalyzed,
                    description: format!("Coverage of {} not yet analyzed", topic),
                })
                .collect(),
        })
        .collect();

    CoverageMap {
        documents: DocumentId::ALL,
        rows,
    }
}

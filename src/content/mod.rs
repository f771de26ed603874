//! Static Content
//!
//! The hand-authored JSON payload behind every view: repository excerpts,
//! topic comparisons, cross-standard insights and tailored process scenarios.
//! It is loaded once at startup and never mutated afterwards. When the
//! configured payload cannot be read or parsed, the built-in payload compiled
//! into the binary is used instead.
//!
//! Document identifiers inside the payload deserialize into [`DocumentId`],
//! so a payload citing an unknown document is rejected as a whole.

mod coverage;
mod process;
mod search;

pub use coverage::{COVERAGE_TOPICS, CoverageCell, CoverageLevel, CoverageMap, CoverageRow, coverage_map};
pub use process::{
    FOCUS_AREAS, GeneratedActivity, GeneratedPhase, GeneratedProcess, MATURITY_LEVELS, PROJECT_SIZES,
    PROJECT_TYPES, ProcessRequest, generate_process,
};
pub use search::{Filter, Listing, search_repository};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::ContentError;
use crate::model::{Citation, DocumentId, Page};

const DEFAULT_CONTENT: &str = include_str!("../../content/default_references.json");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: String,
    pub standard: DocumentId,
    pub title: String,
    pub content: String,
    pub page: Page,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl ContentItem {
    pub fn citation(&self) -> Citation {
        Citation {
            standard: self.standard,
            page: self.page,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardSummary {
    /// Only the ISO column names its document; the other columns are implied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standard: Option<DocumentId>,
    pub title: String,
    pub description: String,
    pub page: Page,
    #[serde(default)]
    pub key_points: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Analysis {
    #[serde(default)]
    pub similarities: Vec<String>,
    #[serde(default)]
    pub differences: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comparison {
    pub pmbok: StandardSummary,
    pub prince2: StandardSummary,
    pub iso: StandardSummary,
    #[serde(default)]
    pub analysis: Analysis,
}

impl Comparison {
    pub fn columns(&self) -> [(DocumentId, &StandardSummary); 3] {
        [
            (DocumentId::Pmbok, &self.pmbok),
            (DocumentId::Prince2, &self.prince2),
            (self.iso.standard.unwrap_or(DocumentId::Iso21502), &self.iso),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Similarity {
    pub topic: String,
    pub description: String,
    #[serde(default)]
    pub references: Vec<Citation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Approach {
    pub standard: DocumentId,
    pub approach: String,
    pub page: Page,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Difference {
    pub topic: String,
    #[serde(default)]
    pub standards: Vec<Approach>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UniqueElement {
    pub standard: DocumentId,
    pub topic: String,
    pub description: String,
    pub page: Page,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Insights {
    #[serde(default)]
    pub similarities: Vec<Similarity>,
    #[serde(default)]
    pub differences: Vec<Difference>,
    #[serde(default)]
    pub unique: Vec<UniqueElement>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessActivity {
    pub description: String,
    #[serde(default)]
    pub references: Vec<Citation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub activities: Vec<ProcessActivity>,
    #[serde(default)]
    pub references: Vec<Citation>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TailoredProcess {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub phases: Vec<ProcessEntry>,
    #[serde(default)]
    pub roles: Vec<ProcessEntry>,
    #[serde(default)]
    pub artifacts: Vec<ProcessEntry>,
    #[serde(default)]
    pub decisions: Vec<ProcessEntry>,
    #[serde(default)]
    pub success_factors: Vec<ProcessEntry>,
}

impl TailoredProcess {
    pub fn sections(&self) -> [(&'static str, &[ProcessEntry]); 5] {
        [
            ("Phases", self.phases.as_slice()),
            ("Roles", self.roles.as_slice()),
            ("Artifacts", self.artifacts.as_slice()),
            ("Decisions", self.decisions.as_slice()),
            ("Success Factors", self.success_factors.as_slice()),
        ]
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentPayload {
    #[serde(default)]
    pub repository: Vec<ContentItem>,
    #[serde(default)]
    pub comparisons: BTreeMap<String, Comparison>,
    #[serde(default)]
    pub insights: Insights,
    #[serde(default)]
    pub tailored_processes: BTreeMap<String, TailoredProcess>,
}

impl ContentPayload {
    pub fn from_json(raw: &str) -> Result<Self, ContentError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub async fn read(path: &Path) -> Result<Self, ContentError> {
        let raw = tokio::fs::read_to_string(path).await.map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// The payload compiled into the binary.
    pub fn builtin() -> Self {
        Self::from_json(DEFAULT_CONTENT).unwrap_or_else(|e| {
            tracing::error!(error = %crate::unpack_error(&e), "built-in content payload is invalid");
            ContentPayload::default()
        })
    }

    pub async fn load_or_default(path: &Path) -> Self {
        match Self::read(path).await {
            Ok(payload) => {
                tracing::info!(
                    path = ?path,
                    items = payload.repository.len(),
                    comparisons = payload.comparisons.len(),
                    "content payload loaded"
                );
                payload
            }
            Err(e) => {
                tracing::error!(
                    path = ?path,
                    error = %crate::unpack_error(&e),
                    "failed to load content payload, using built-in data"
                );
                Self::builtin()
            }
        }
    }

    pub fn comparison(&self, topic: &str) -> Option<&Comparison> {
        self.comparisons.get(topic)
    }

    pub fn scenario(&self, key: &str) -> Option<&TailoredProcess> {
        self.tailored_processes.get(key)
    }

    /// Every page citation in the payload, in document order.
    pub fn citations(&self) -> Vec<Citation> {
        let mut out: Vec<Citation> = self.repository.iter().map(ContentItem::citation).collect();

        for comparison in self.comparisons.values() {
            for (standard, summary) in comparison.columns() {
                out.push(Citation {
                    standard,
                    page: summary.page,
                });
            }
        }

        for similarity in &self.insights.similarities {
            out.extend(similarity.references.iter().copied());
        }
        for difference in &self.insights.differences {
            out.extend(difference.standards.iter().map(|a| Citation {
                standard: a.standard,
                page: a.page,
            }));
        }
        out.extend(self.insights.unique.iter().map(|u| Citation {
            standard: u.standard,
            page: u.page,
        }));

        for scenario in self.tailored_processes.values() {
            for (_, entries) in scenario.sections() {
                for entry in entries {
                    out.extend(entry.references.iter().copied());
                    for activity in &entry.activities {
                        out.extend(activity.references.iter().copied());
                    }
                }
            }
        }

        out
    }
}

use serde::Serialize;

use super::{ContentPayload, TailoredProcess};
use crate::model::DocumentId::{Iso21500, Iso21502, Pmbok, Prince2};
use crate::model::{Citation, DocumentId};

pub const PROJECT_TYPES: [&str; 4] = ["software", "infrastructure", "research", "organizational"];
pub const PROJECT_SIZES: [&str; 3] = ["small", "medium", "large"];
pub const MATURITY_LEVELS: [&str; 3] = ["low", "medium", "high"];
pub const FOCUS_AREAS: [&str; 4] = ["risk", "stakeholder", "quality", "agile"];

#[derive(Debug, Clone, Default)]
pub struct ProcessRequest {
    pub project_type: String,
    pub size: String,
    pub maturity: String,
    pub focus_areas: Vec<String>,
}

impl ProcessRequest {
    /// Splits a comma separated focus list, dropping blanks.
    pub fn parse_focus(raw: Option<&str>) -> Vec<String> {
        raw.unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect()
    }

    fn has_focus(&self, area: &str) -> bool {
        self.focus_areas.iter().any(|f| f == area)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedActivity {
    pub description: &'static str,
    pub references: Vec<Citation>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedPhase {
    pub name: &'static str,
    pub activities: Vec<GeneratedActivity>,
    pub deliverables: &'static [&'static str],
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedProcess {
    pub title: String,
    pub meta: String,
    pub phases: Vec<GeneratedPhase>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scenario: Option<TailoredProcess>,
}

fn cite(refs: &[(DocumentId, u32)]) -> Vec<Citation> {
    refs.iter()
        .filter_map(|(standard, page)| Citation::new(*standard, *page))
        .collect()
}

fn activity(description: &'static str, refs: &[(DocumentId, u32)]) -> GeneratedActivity {
    GeneratedActivity {
        description,
        references: cite(refs),
    }
}

fn initiation_activities() -> Vec<GeneratedActivity> {
    vec![
        activity("Define project objectives and success criteria", &[(Pmbok, 25), (Prince2, 45)]),
        activity("Identify and analyze key stakeholders", &[(Pmbok, 73), (Iso21502, 30)]),
        activity("Develop project charter and obtain authorization", &[(Pmbok, 35), (Iso21500, 12)]),
    ]
}

fn planning_activities(req: &ProcessRequest) -> Vec<GeneratedActivity> {
    let mut activities = vec![
        activity("Create detailed project scope statement", &[(Pmbok, 50), (Prince2, 67)]),
        activity("Develop Work Breakdown Structure (WBS)", &[(Pmbok, 55), (Iso21502, 45)]),
    ];

    if req.has_focus("risk") {
        activities.push(activity(
            "Conduct comprehensive risk identification and analysis",
            &[(Pmbok, 145), (Prince2, 123), (Iso21502, 78)],
        ));
    }

    activities
}

fn execution_activities() -> Vec<GeneratedActivity> {
    vec![
        activity("Acquire and develop project team", &[(Pmbok, 98), (Prince2, 89)]),
        activity("Manage stakeholder expectations and engagement", &[(Pmbok, 75), (Iso21502, 32)]),
        activity("Execute planned activities and produce deliverables", &[(Prince2, 95), (Iso21500, 28)]),
    ]
}

fn monitoring_activities() -> Vec<GeneratedActivity> {
    vec![
        activity("Monitor project performance against baseline", &[(Pmbok, 110), (Iso21502, 52)]),
        activity("Manage changes to project scope, schedule, and budget", &[(Pmbok, 118), (Prince2, 145)]),
        activity("Track and respond to risks and issues", &[(Pmbok, 150), (Prince2, 130)]),
    ]
}

fn closure_activities() -> Vec<GeneratedActivity> {
    vec![
        activity("Obtain formal acceptance of deliverables", &[(Pmbok, 125), (Prince2, 178)]),
        activity("Document lessons learned and best practices", &[(Pmbok, 130), (Iso21502, 88)]),
        activity("Release resources and close contracts", &[(Prince2, 185), (Iso21500, 42)]),
    ]
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn generate_process(req: &ProcessRequest, content: &ContentPayload) -> GeneratedProcess {
    let phases = vec![
        GeneratedPhase {
            name: "Initiation",
            activities: initiation_activities(),
            deliverables: &["Project Charter", "Stakeholder Register", "Initial Risk Assessment"],
        },
        GeneratedPhase {
            name: "Planning",
            activities: planning_activities(req),
            deliverables: &["Project Plan", "Schedule", "Budget", "Risk Management Plan"],
        },
        GeneratedPhase {
            name: "Execution",
            activities: execution_activities(),
            deliverables: &["Status Reports", "Deliverables", "Change Requests"],
        },
        GeneratedPhase {
            name: "Monitoring & Control",
            activities: monitoring_activities(),
            deliverables: &["Performance Reports", "Updated Plans", "Issue Log"],
        },
        GeneratedPhase {
            name: "Closure",
            activities: closure_activities(),
            deliverables: &["Final Report", "Lessons Learned", "Archive"],
        },
    ];

    GeneratedProcess {
        title: format!("Tailored Process for {} Project", capitalize(&req.project_type)),
        meta: format!(
            "Size: {} • Maturity: {} • Focus Areas: {}",
            req.size,
            req.maturity,
            req.focus_areas.join(", ")
        ),
        phases,
        scenario: content.scenario(&req.project_type).cloned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(project_type: &str, focus: &str) -> ProcessRequest {
        ProcessRequest {
            project_type: project_type.to_string(),
            size: "medium".to_string(),
            maturity: "high".to_string(),
            focus_areas: ProcessRequest::parse_focus(Some(focus)),
        }
    }

    #[test]
    fn test_five_phases_with_header() {
        let process = generate_process(&request("research", "quality"), &ContentPayload::default());
        let names: Vec<_> = process.phases.iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Initiation", "Planning", "Execution", "Monitoring & Control", "Closure"]);
        assert_eq!(process.title, "Tailored Process for Research Project");
        assert_eq!(process.meta, "Size: medium • Maturity: high • Focus Areas: quality");
        assert!(process.scenario.is_none());
    }

    #[test]
    fn test_risk_focus_adds_planning_activity() {
        let content = ContentPayload::default();
        let without = generate_process(&request("software", "stakeholder"), &content);
        let with = generate_process(&request("software", "stakeholder, risk"), &content);

        assert_eq!(without.phases[1].activities.len(), 2);
        assert_eq!(with.phases[1].activities.len(), 3);
        let risk = &with.phases[1].activities[2];
        assert_eq!(risk.references.len(), 3);
        assert_eq!(risk.references[2].standard, DocumentId::Iso21502);
        assert_eq!(risk.references[2].page.get(), 78);
    }

    #[test]
    fn test_scenario_attached_by_project_type() {
        let content = ContentPayload::builtin();
        let process = generate_process(&request("software", ""), &content);
        let scenario = process.scenario.expect("software scenario");
        assert_eq!(scenario.roles.len(), 2);
        assert_eq!(process.meta, "Size: medium • Maturity: high • Focus Areas: ");
    }

    #[test]
    fn test_parse_focus() {
        assert_eq!(ProcessRequest::parse_focus(Some(" Risk,,quality ")), vec!["risk", "quality"]);
        assert!(ProcessRequest::parse_focus(None).is_empty());
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("software"), "Software");
        assert_eq!(capitalize(""), "");
    }
}

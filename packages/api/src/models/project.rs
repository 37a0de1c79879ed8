//! Project model and its normalization adapter.
//!
//! The project endpoints return three different shapes (the admin list, the
//! chef overview with embedded task counters, and the client view with a
//! nested task array). [`RawProject`] accepts all of them and
//! [`Project::from_wire`] reduces them to one canonical [`Project`].

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::task::{RawTask, Task, TaskStatus};
use super::user::{RawUserRef, UserRef};
use super::wire::{enum_key, lenient_f64, non_blank, opt_date, FromWire, Id};
use crate::validation::ValidationErrors;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum ProjectStatus {
    #[serde(rename = "EN_COURS")]
    InProgress,
    #[serde(rename = "TERMINE")]
    Done,
    #[serde(rename = "EN_ATTENTE")]
    Pending,
    #[serde(rename = "ANNULE")]
    Cancelled,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 4] = [
        ProjectStatus::InProgress,
        ProjectStatus::Done,
        ProjectStatus::Pending,
        ProjectStatus::Cancelled,
    ];

    pub fn as_wire(&self) -> &'static str {
        match self {
            ProjectStatus::InProgress => "EN_COURS",
            ProjectStatus::Done => "TERMINE",
            ProjectStatus::Pending => "EN_ATTENTE",
            ProjectStatus::Cancelled => "ANNULE",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProjectStatus::InProgress => "In progress",
            ProjectStatus::Done => "Done",
            ProjectStatus::Pending => "Pending",
            ProjectStatus::Cancelled => "Cancelled",
        }
    }

    /// Still expected to move forward.
    pub fn is_open(&self) -> bool {
        matches!(self, ProjectStatus::InProgress | ProjectStatus::Pending)
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

impl FromStr for ProjectStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match enum_key(s).as_str() {
            "EN_COURS" | "IN_PROGRESS" | "ACTIVE" | "ONGOING" => Ok(ProjectStatus::InProgress),
            "TERMINE" | "DONE" | "COMPLETED" | "FINISHED" => Ok(ProjectStatus::Done),
            "EN_ATTENTE" | "PENDING" | "ON_HOLD" | "PLANIFIE" | "PLANNED" => {
                Ok(ProjectStatus::Pending)
            }
            "ANNULE" | "CANCELLED" | "CANCELED" => Ok(ProjectStatus::Cancelled),
            _ => Err(format!("unknown project status `{s}`")),
        }
    }
}

impl TryFrom<String> for ProjectStatus {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum ProjectType {
    #[serde(rename = "LIVRAISON")]
    Delivery,
    #[serde(rename = "MAINTENANCE")]
    Maintenance,
    #[serde(rename = "INTERNE")]
    Internal,
}

impl ProjectType {
    pub const ALL: [ProjectType; 3] = [
        ProjectType::Delivery,
        ProjectType::Maintenance,
        ProjectType::Internal,
    ];

    pub fn as_wire(&self) -> &'static str {
        match self {
            ProjectType::Delivery => "LIVRAISON",
            ProjectType::Maintenance => "MAINTENANCE",
            ProjectType::Internal => "INTERNE",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ProjectType::Delivery => "Delivery",
            ProjectType::Maintenance => "Maintenance",
            ProjectType::Internal => "Internal",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

impl FromStr for ProjectType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match enum_key(s).as_str() {
            "LIVRAISON" | "DELIVERY" | "PROJET_LIVRAISON" => Ok(ProjectType::Delivery),
            "MAINTENANCE" | "TMA" => Ok(ProjectType::Maintenance),
            "INTERNE" | "INTERNAL" | "PROJET_INTERNE" => Ok(ProjectType::Internal),
            _ => Err(format!("unknown project type `{s}`")),
        }
    }
}

impl TryFrom<String> for ProjectType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Clamp any percentage to `0..=100`. `NaN` counts as zero.
pub fn clamp_progression(value: f64) -> u8 {
    if value.is_nan() || value <= 0.0 {
        0
    } else if value >= 100.0 {
        100
    } else {
        value.round() as u8
    }
}

/// Task counters attached to a project.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStats {
    pub total: u32,
    pub done: u32,
    pub in_progress: u32,
    pub blocked: u32,
    pub not_started: u32,
}

impl TaskStats {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let mut stats = TaskStats::default();
        for task in tasks {
            stats.total += 1;
            match task.status {
                TaskStatus::Done => stats.done += 1,
                TaskStatus::InProgress => stats.in_progress += 1,
                TaskStatus::Blocked => stats.blocked += 1,
                TaskStatus::NotStarted => stats.not_started += 1,
            }
        }
        stats
    }

    /// `done / total` as a clamped percentage; zero when there are no tasks.
    pub fn completion(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        clamp_progression(f64::from(self.done) * 100.0 / f64::from(self.total))
    }
}

/// `{ id, title }` reference to a project embedded in a task.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRef {
    pub id: Id,
    pub title: String,
}

/// Canonical project.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: Id,
    pub title: String,
    pub description: String,
    pub project_type: ProjectType,
    pub status: ProjectStatus,
    /// Always within `0..=100`.
    pub progression: u8,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub client: Option<UserRef>,
    pub lead: Option<UserRef>,
    pub developers: Vec<UserRef>,
    pub stats: TaskStats,
}

impl Project {
    /// Past its end date without being closed.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status.is_open() && self.end_date.is_some_and(|end| end < today)
    }

    pub fn client_name(&self) -> Option<&str> {
        self.client.as_ref().map(|c| c.name.as_str())
    }

    pub fn to_ref(&self) -> ProjectRef {
        ProjectRef {
            id: self.id,
            title: self.title.clone(),
        }
    }
}

/// Task counters as the overview endpoint nests them.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTaskStats {
    #[serde(alias = "totalTasks", alias = "nbTaches")]
    pub total: Option<u32>,
    #[serde(alias = "completed", alias = "completedTasks", alias = "terminees")]
    pub done: Option<u32>,
    #[serde(alias = "enCours")]
    pub in_progress: Option<u32>,
    #[serde(alias = "bloquees")]
    pub blocked: Option<u32>,
    #[serde(alias = "nonCommencees", alias = "todo")]
    pub not_started: Option<u32>,
}

/// Tolerant wire shape of a project.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProject {
    #[serde(alias = "projectId", alias = "idProjet")]
    pub id: Option<Id>,
    #[serde(alias = "titre", alias = "name", alias = "nom")]
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type", alias = "projectType", alias = "typeProjet")]
    pub project_type: Option<String>,
    #[serde(alias = "statut", alias = "etat")]
    pub status: Option<String>,
    #[serde(alias = "progress", alias = "avancement", alias = "progressPercentage")]
    pub progression: Option<Value>,
    #[serde(alias = "dateDebut", alias = "startAt")]
    pub start_date: Option<Value>,
    #[serde(alias = "dateFin", alias = "endAt", alias = "deadline")]
    pub end_date: Option<Value>,
    pub client: Option<RawUserRef>,
    pub client_id: Option<Id>,
    #[serde(alias = "nomClient")]
    pub client_name: Option<String>,
    #[serde(alias = "chef", alias = "chefDeProjet", alias = "projectManager")]
    pub lead: Option<RawUserRef>,
    #[serde(alias = "developpeurs", alias = "assignedDevelopers", alias = "equipe")]
    pub developers: Option<Vec<RawUserRef>>,
    #[serde(alias = "developpeurIds")]
    pub developer_ids: Option<Vec<Id>>,
    #[serde(alias = "statistiques", alias = "stats")]
    pub task_stats: Option<RawTaskStats>,
    pub total_tasks: Option<u32>,
    #[serde(alias = "tachesTerminees", alias = "doneTasks")]
    pub completed_tasks: Option<u32>,
    #[serde(alias = "taches")]
    pub tasks: Option<Vec<RawTask>>,
}

impl FromWire for Project {
    type Raw = RawProject;

    fn from_wire(raw: RawProject) -> Result<Self, String> {
        let id = raw.id.ok_or("project without id")?;

        let project_type = match raw.project_type.as_deref() {
            Some(t) => t.parse().unwrap_or_else(|e: String| {
                tracing::warn!("project {id}: {e}, defaulting to delivery");
                ProjectType::Delivery
            }),
            None => ProjectType::Delivery,
        };
        let status = match raw.status.as_deref() {
            Some(s) => s.parse().unwrap_or_else(|e: String| {
                tracing::warn!("project {id}: {e}, defaulting to pending");
                ProjectStatus::Pending
            }),
            None => ProjectStatus::Pending,
        };

        let tasks: Vec<Task> = raw
            .tasks
            .unwrap_or_default()
            .into_iter()
            .filter_map(|t| Task::from_wire(t).ok())
            .collect();
        let stats = if !tasks.is_empty() {
            TaskStats::from_tasks(&tasks)
        } else {
            let nested = raw.task_stats.unwrap_or_default();
            let total = nested.total.or(raw.total_tasks).unwrap_or(0);
            let done = nested.done.or(raw.completed_tasks).unwrap_or(0).min(total);
            let in_progress = nested.in_progress.unwrap_or(0);
            let blocked = nested.blocked.unwrap_or(0);
            let not_started = nested
                .not_started
                .unwrap_or_else(|| total.saturating_sub(done + in_progress + blocked));
            TaskStats {
                total,
                done,
                in_progress,
                blocked,
                not_started,
            }
        };

        let progression = match lenient_f64(&raw.progression) {
            Some(value) => clamp_progression(value),
            None => stats.completion(),
        };

        let client = raw.client.and_then(RawUserRef::normalize).or_else(|| {
            raw.client_id.map(|cid| UserRef {
                id: cid,
                name: non_blank(raw.client_name.clone()).unwrap_or_else(|| format!("#{cid}")),
            })
        });

        let developers = match (raw.developers, raw.developer_ids) {
            (Some(devs), _) => devs.into_iter().filter_map(RawUserRef::normalize).collect(),
            (None, Some(ids)) => ids
                .into_iter()
                .map(|id| UserRef {
                    id,
                    name: format!("#{id}"),
                })
                .collect(),
            (None, None) => Vec::new(),
        };

        Ok(Project {
            id,
            title: non_blank(raw.title).unwrap_or_else(|| format!("Project #{id}")),
            description: raw.description.unwrap_or_default().trim().to_string(),
            project_type,
            status,
            progression,
            start_date: opt_date(&raw.start_date),
            end_date: opt_date(&raw.end_date),
            client,
            lead: raw.lead.and_then(RawUserRef::normalize),
            developers,
            stats,
        })
    }
}

/// Create/edit payload for the project form.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDraft {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    pub status: ProjectStatus,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub client_id: Option<Id>,
    pub developer_ids: Vec<Id>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progression: Option<u8>,
}

impl Default for ProjectDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            project_type: ProjectType::Delivery,
            status: ProjectStatus::Pending,
            start_date: None,
            end_date: None,
            client_id: None,
            developer_ids: Vec::new(),
            progression: None,
        }
    }
}

impl ProjectDraft {
    pub fn from_project(project: &Project) -> Self {
        Self {
            title: project.title.clone(),
            description: project.description.clone(),
            project_type: project.project_type,
            status: project.status,
            start_date: project.start_date,
            end_date: project.end_date,
            client_id: project.client.as_ref().map(|c| c.id),
            developer_ids: project.developers.iter().map(|d| d.id).collect(),
            progression: Some(project.progression),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("title", "Title", &self.title);
        errors.date_order("end_date", self.start_date, self.end_date);
        if let Some(p) = self.progression {
            if p > 100 {
                errors.add("progression", "Progression must be between 0 and 100");
            }
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn normalize(value: Value) -> Project {
        Project::from_wire(serde_json::from_value(value).unwrap()).unwrap()
    }

    #[test]
    fn test_clamp_progression() {
        assert_eq!(clamp_progression(-5.0), 0);
        assert_eq!(clamp_progression(0.0), 0);
        assert_eq!(clamp_progression(42.4), 42);
        assert_eq!(clamp_progression(100.0), 100);
        assert_eq!(clamp_progression(250.0), 100);
        assert_eq!(clamp_progression(f64::NAN), 0);
        assert_eq!(clamp_progression(f64::INFINITY), 100);
    }

    #[test]
    fn test_normalize_overview_shape() {
        let project = normalize(json!({
            "idProjet": 5,
            "titre": "Portail RH",
            "typeProjet": "Maintenance",
            "statut": "En cours",
            "dateDebut": [2024, 2, 1],
            "dateFin": "2024-06-30",
            "clientId": 9,
            "nomClient": "Acme",
            "developpeurs": [{ "id": 2, "prenom": "Ali", "nom": "Kefi" }, 3],
            "taskStats": { "total": 8, "completed": 2 }
        }));

        assert_eq!(project.id, 5);
        assert_eq!(project.title, "Portail RH");
        assert_eq!(project.project_type, ProjectType::Maintenance);
        assert_eq!(project.status, ProjectStatus::InProgress);
        assert_eq!(project.progression, 25);
        assert_eq!(project.client_name(), Some("Acme"));
        assert_eq!(project.developers.len(), 2);
        assert_eq!(project.developers[0].name, "Ali Kefi");
        assert_eq!(project.stats.not_started, 6);
        assert_eq!(project.end_date, NaiveDate::from_ymd_opt(2024, 6, 30));
    }

    #[test]
    fn test_backend_progression_wins_and_is_clamped() {
        let project = normalize(json!({
            "id": 1, "title": "X", "progression": 140,
            "totalTasks": 4, "completedTasks": 1
        }));
        assert_eq!(project.progression, 100);

        let project = normalize(json!({ "id": 1, "title": "X", "progress": "-3" }));
        assert_eq!(project.progression, 0);
    }

    #[test]
    fn test_progression_derived_from_nested_tasks() {
        let project = normalize(json!({
            "id": 2,
            "name": "Mobile app",
            "tasks": [
                { "id": 1, "title": "a", "status": "TERMINEE" },
                { "id": 2, "title": "b", "status": "EN_COURS" },
                { "id": 3, "title": "c", "status": "TERMINEE" }
            ]
        }));
        assert_eq!(project.stats.total, 3);
        assert_eq!(project.stats.done, 2);
        assert_eq!(project.progression, 67);
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let project = normalize(json!({ "id": 11 }));
        assert_eq!(project.title, "Project #11");
        assert_eq!(project.status, ProjectStatus::Pending);
        assert_eq!(project.project_type, ProjectType::Delivery);
        assert_eq!(project.progression, 0);
        assert!(project.client.is_none());
        assert!(project.developers.is_empty());
    }

    #[test]
    fn test_is_overdue() {
        let today = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
        let mut project = normalize(json!({ "id": 1, "status": "EN_COURS", "dateFin": "2024-06-30" }));
        assert!(project.is_overdue(today));
        project.status = ProjectStatus::Done;
        assert!(!project.is_overdue(today));
    }

    #[test]
    fn test_draft_validation() {
        let draft = ProjectDraft::default();
        let errors = draft.validate().unwrap_err();
        assert_eq!(errors.for_field("title"), Some("Title is required"));

        let draft = ProjectDraft {
            title: "CRM".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 5, 10),
            end_date: NaiveDate::from_ymd_opt(2024, 5, 1),
            ..ProjectDraft::default()
        };
        let errors = draft.validate().unwrap_err();
        assert!(errors.for_field("end_date").is_some());
    }

    #[test]
    fn test_draft_serializes_wire_names() {
        let draft = ProjectDraft {
            title: "CRM".to_string(),
            status: ProjectStatus::InProgress,
            project_type: ProjectType::Internal,
            developer_ids: vec![1, 2],
            ..ProjectDraft::default()
        };
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["type"], "INTERNE");
        assert_eq!(value["status"], "EN_COURS");
        assert_eq!(value["developerIds"], json!([1, 2]));
        assert!(value.get("progression").is_none());
    }
}

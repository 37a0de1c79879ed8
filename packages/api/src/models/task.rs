//! Task model and its normalization adapter.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::project::ProjectRef;
use super::user::{RawUserRef, UserRef};
use super::wire::{enum_key, lenient_f64, non_blank, opt_date, FromWire, Id};
use crate::validation::ValidationErrors;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum TaskStatus {
    #[serde(rename = "NON_COMMENCEE")]
    NotStarted,
    #[serde(rename = "EN_COURS")]
    InProgress,
    #[serde(rename = "BLOQUEE")]
    Blocked,
    #[serde(rename = "TERMINEE")]
    Done,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::NotStarted,
        TaskStatus::InProgress,
        TaskStatus::Blocked,
        TaskStatus::Done,
    ];

    pub fn as_wire(&self) -> &'static str {
        match self {
            TaskStatus::NotStarted => "NON_COMMENCEE",
            TaskStatus::InProgress => "EN_COURS",
            TaskStatus::Blocked => "BLOQUEE",
            TaskStatus::Done => "TERMINEE",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::NotStarted => "Not started",
            TaskStatus::InProgress => "In progress",
            TaskStatus::Blocked => "Blocked",
            TaskStatus::Done => "Done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match enum_key(s).as_str() {
            "NON_COMMENCEE" | "NON_COMMENCE" | "A_FAIRE" | "TODO" | "NOT_STARTED" | "NEW" => {
                Ok(TaskStatus::NotStarted)
            }
            "EN_COURS" | "IN_PROGRESS" | "DOING" => Ok(TaskStatus::InProgress),
            "BLOQUEE" | "BLOQUE" | "BLOCKED" => Ok(TaskStatus::Blocked),
            "TERMINEE" | "TERMINE" | "DONE" | "COMPLETED" => Ok(TaskStatus::Done),
            _ => Err(format!("unknown task status `{s}`")),
        }
    }
}

impl TryFrom<String> for TaskStatus {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Priority {
    #[serde(rename = "BASSE")]
    Low,
    #[serde(rename = "MOYENNE")]
    Medium,
    #[serde(rename = "HAUTE")]
    High,
    #[serde(rename = "URGENTE")]
    Urgent,
}

impl Priority {
    pub const ALL: [Priority; 4] = [Priority::Low, Priority::Medium, Priority::High, Priority::Urgent];

    pub fn as_wire(&self) -> &'static str {
        match self {
            Priority::Low => "BASSE",
            Priority::Medium => "MOYENNE",
            Priority::High => "HAUTE",
            Priority::Urgent => "URGENTE",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
            Priority::Urgent => "Urgent",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match enum_key(s).as_str() {
            "BASSE" | "LOW" | "FAIBLE" => Ok(Priority::Low),
            "MOYENNE" | "MEDIUM" | "NORMALE" | "NORMAL" => Ok(Priority::Medium),
            "HAUTE" | "HIGH" | "ELEVEE" => Ok(Priority::High),
            "URGENTE" | "URGENT" | "CRITIQUE" | "CRITICAL" => Ok(Priority::Urgent),
            _ => Err(format!("unknown priority `{s}`")),
        }
    }
}

impl TryFrom<String> for Priority {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Canonical task.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: Id,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: Priority,
    pub planned_hours: f64,
    pub effective_hours: f64,
    pub remaining_hours: f64,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub assignee: Option<UserRef>,
    pub project: Option<ProjectRef>,
}

impl Task {
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status != TaskStatus::Done && self.end_date.is_some_and(|end| end < today)
    }

    pub fn assignee_name(&self) -> Option<&str> {
        self.assignee.as_ref().map(|a| a.name.as_str())
    }

    pub fn project_title(&self) -> Option<&str> {
        self.project.as_ref().map(|p| p.title.as_str())
    }
}

/// Wire shape of the parent project reference.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawProjectRef {
    Id(Id),
    Object {
        #[serde(alias = "idProjet")]
        id: Id,
        #[serde(alias = "titre", alias = "name", alias = "nom")]
        title: Option<String>,
    },
}

/// Tolerant wire shape of a task.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTask {
    #[serde(alias = "taskId", alias = "idTache")]
    pub id: Option<Id>,
    #[serde(alias = "titre", alias = "name", alias = "nom")]
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(alias = "statut", alias = "etat")]
    pub status: Option<String>,
    #[serde(alias = "priorite")]
    pub priority: Option<String>,
    #[serde(alias = "heuresPlanifiees", alias = "estimatedHours", alias = "dureeEstimee")]
    pub planned_hours: Option<Value>,
    #[serde(alias = "heuresEffectives", alias = "spentHours", alias = "tempsPasse")]
    pub effective_hours: Option<Value>,
    #[serde(alias = "heuresRestantes", alias = "resteAFaire")]
    pub remaining_hours: Option<Value>,
    #[serde(alias = "dateDebut")]
    pub start_date: Option<Value>,
    #[serde(alias = "dateFin", alias = "dueDate", alias = "deadline")]
    pub end_date: Option<Value>,
    #[serde(alias = "developpeur", alias = "assignedTo", alias = "assignedDeveloper")]
    pub assignee: Option<RawUserRef>,
    #[serde(alias = "developpeurId", alias = "assignedToId")]
    pub assignee_id: Option<Id>,
    #[serde(alias = "nomDeveloppeur", alias = "assignedToName")]
    pub assignee_name: Option<String>,
    #[serde(alias = "projet")]
    pub project: Option<RawProjectRef>,
    #[serde(alias = "projetId")]
    pub project_id: Option<Id>,
    #[serde(alias = "projetTitre", alias = "projectName")]
    pub project_title: Option<String>,
}

fn hours(value: &Option<Value>) -> Option<f64> {
    lenient_f64(value).filter(|h| h.is_finite()).map(|h| h.max(0.0))
}

impl FromWire for Task {
    type Raw = RawTask;

    fn from_wire(raw: RawTask) -> Result<Self, String> {
        let id = raw.id.ok_or("task without id")?;
        let status = match raw.status.as_deref() {
            Some(s) => s.parse().unwrap_or_else(|e: String| {
                tracing::warn!("task {id}: {e}, defaulting to not started");
                TaskStatus::NotStarted
            }),
            None => TaskStatus::NotStarted,
        };
        let priority = match raw.priority.as_deref() {
            Some(p) => p.parse().unwrap_or_else(|e: String| {
                tracing::warn!("task {id}: {e}, defaulting to medium");
                Priority::Medium
            }),
            None => Priority::Medium,
        };

        let planned_hours = hours(&raw.planned_hours).unwrap_or(0.0);
        let effective_hours = hours(&raw.effective_hours).unwrap_or(0.0);
        let remaining_hours = hours(&raw.remaining_hours)
            .unwrap_or_else(|| (planned_hours - effective_hours).max(0.0));

        let assignee = raw.assignee.and_then(RawUserRef::normalize).or_else(|| {
            raw.assignee_id.map(|aid| UserRef {
                id: aid,
                name: non_blank(raw.assignee_name.clone()).unwrap_or_else(|| format!("#{aid}")),
            })
        });

        let project_title = non_blank(raw.project_title);
        let project = match (raw.project, raw.project_id) {
            (Some(RawProjectRef::Object { id, title }), _) => Some(ProjectRef {
                id,
                title: non_blank(title)
                    .or_else(|| project_title.clone())
                    .unwrap_or_else(|| format!("Project #{id}")),
            }),
            (Some(RawProjectRef::Id(pid)), _) | (None, Some(pid)) => Some(ProjectRef {
                id: pid,
                title: project_title
                    .clone()
                    .unwrap_or_else(|| format!("Project #{pid}")),
            }),
            (None, None) => None,
        };

        Ok(Task {
            id,
            title: non_blank(raw.title).unwrap_or_else(|| format!("Task #{id}")),
            description: raw.description.unwrap_or_default().trim().to_string(),
            status,
            priority,
            planned_hours,
            effective_hours,
            remaining_hours,
            start_date: opt_date(&raw.start_date),
            end_date: opt_date(&raw.end_date),
            assignee,
            project,
        })
    }
}

/// Create/edit payload for the task form.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: Priority,
    pub planned_hours: f64,
    pub effective_hours: f64,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub assignee_id: Option<Id>,
    pub project_id: Id,
}

impl TaskDraft {
    pub fn new(project_id: Id) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            status: TaskStatus::NotStarted,
            priority: Priority::Medium,
            planned_hours: 0.0,
            effective_hours: 0.0,
            start_date: None,
            end_date: None,
            assignee_id: None,
            project_id,
        }
    }

    pub fn from_task(task: &Task, project_id: Id) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status,
            priority: task.priority,
            planned_hours: task.planned_hours,
            effective_hours: task.effective_hours,
            start_date: task.start_date,
            end_date: task.end_date,
            assignee_id: task.assignee.as_ref().map(|a| a.id),
            project_id,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("title", "Title", &self.title);
        errors.non_negative("planned_hours", "Planned hours", self.planned_hours);
        errors.non_negative("effective_hours", "Effective hours", self.effective_hours);
        errors.date_order("end_date", self.start_date, self.end_date);
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn normalize(value: Value) -> Task {
        Task::from_wire(serde_json::from_value(value).unwrap()).unwrap()
    }

    #[test]
    fn test_status_and_priority_aliases() {
        assert_eq!("Terminée".parse::<TaskStatus>(), Ok(TaskStatus::Done));
        assert_eq!("a faire".parse::<TaskStatus>(), Ok(TaskStatus::NotStarted));
        assert_eq!("critique".parse::<Priority>(), Ok(Priority::Urgent));
        assert!(Priority::Urgent > Priority::Low);
    }

    #[test]
    fn test_normalize_french_shape() {
        let task = normalize(json!({
            "idTache": 4,
            "titre": "API login",
            "statut": "BLOQUEE",
            "priorite": "HAUTE",
            "heuresPlanifiees": 10,
            "heuresEffectives": "3.5",
            "dateFin": [2024, 4, 30],
            "developpeur": { "id": 8, "username": "yassine" },
            "projet": { "idProjet": 2, "titre": "ERP" }
        }));

        assert_eq!(task.title, "API login");
        assert_eq!(task.status, TaskStatus::Blocked);
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.remaining_hours, 6.5);
        assert_eq!(task.assignee_name(), Some("yassine"));
        assert_eq!(task.project_title(), Some("ERP"));
    }

    #[test]
    fn test_flat_references() {
        let task = normalize(json!({
            "id": 1, "title": "t", "projectId": 3, "projectTitle": "CRM",
            "assigneeId": 5, "assigneeName": "Mona",
            "plannedHours": 2, "effectiveHours": 5
        }));
        assert_eq!(task.project, Some(ProjectRef { id: 3, title: "CRM".to_string() }));
        assert_eq!(task.assignee_name(), Some("Mona"));
        assert_eq!(task.remaining_hours, 0.0);
    }

    #[test]
    fn test_negative_hours_are_floored() {
        let task = normalize(json!({ "id": 1, "plannedHours": -4 }));
        assert_eq!(task.planned_hours, 0.0);
        assert_eq!(task.title, "Task #1");
        assert_eq!(task.priority, Priority::Medium);
    }

    #[test]
    fn test_draft_validation() {
        let mut draft = TaskDraft::new(1);
        draft.planned_hours = -1.0;
        let errors = draft.validate().unwrap_err();
        assert!(errors.for_field("title").is_some());
        assert!(errors.for_field("planned_hours").is_some());

        draft.title = "Write tests".to_string();
        draft.planned_hours = 4.0;
        assert!(draft.validate().is_ok());
    }
}

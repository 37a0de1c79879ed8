//! Per-role dashboard summary, aggregated client-side from the project and
//! task lists the role can see.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::project::{clamp_progression, Project, ProjectStatus};
use super::task::{Task, TaskStatus};

/// How many upcoming deadlines the dashboard lists.
pub const UPCOMING_LIMIT: usize = 5;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub projects_total: usize,
    pub projects_by_status: Vec<(ProjectStatus, usize)>,
    pub overdue_projects: usize,
    pub tasks_total: usize,
    pub tasks_by_status: Vec<(TaskStatus, usize)>,
    pub overdue_tasks: usize,
    /// Mean progression of the non-cancelled projects.
    pub average_progression: u8,
    pub planned_hours: f64,
    pub effective_hours: f64,
    /// Open tasks with an end date, soonest first.
    pub upcoming: Vec<Task>,
}

impl DashboardSummary {
    pub fn aggregate(projects: &[Project], tasks: &[Task], today: NaiveDate) -> Self {
        let projects_by_status = ProjectStatus::ALL
            .iter()
            .map(|s| (*s, projects.iter().filter(|p| p.status == *s).count()))
            .collect();
        let tasks_by_status = TaskStatus::ALL
            .iter()
            .map(|s| (*s, tasks.iter().filter(|t| t.status == *s).count()))
            .collect();

        let counted: Vec<&Project> = projects
            .iter()
            .filter(|p| p.status != ProjectStatus::Cancelled)
            .collect();
        let average_progression = if counted.is_empty() {
            0
        } else {
            let sum: f64 = counted.iter().map(|p| f64::from(p.progression)).sum();
            clamp_progression(sum / counted.len() as f64)
        };

        let mut upcoming: Vec<Task> = tasks
            .iter()
            .filter(|t| t.status != TaskStatus::Done && t.end_date.is_some_and(|d| d >= today))
            .cloned()
            .collect();
        upcoming.sort_by_key(|t| t.end_date);
        upcoming.truncate(UPCOMING_LIMIT);

        DashboardSummary {
            projects_total: projects.len(),
            projects_by_status,
            overdue_projects: projects.iter().filter(|p| p.is_overdue(today)).count(),
            tasks_total: tasks.len(),
            tasks_by_status,
            overdue_tasks: tasks.iter().filter(|t| t.is_overdue(today)).count(),
            average_progression,
            planned_hours: tasks.iter().map(|t| t.planned_hours).sum(),
            effective_hours: tasks.iter().map(|t| t.effective_hours).sum(),
            upcoming,
        }
    }

    pub fn projects_with(&self, status: ProjectStatus) -> usize {
        self.projects_by_status
            .iter()
            .find(|(s, _)| *s == status)
            .map_or(0, |(_, n)| *n)
    }

    pub fn tasks_with(&self, status: TaskStatus) -> usize {
        self.tasks_by_status
            .iter()
            .find(|(s, _)| *s == status)
            .map_or(0, |(_, n)| *n)
    }
}

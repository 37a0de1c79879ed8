//! In-memory list filtering for the page containers.
//!
//! Each filter pairs a free-text search with optional exact-match fields.
//! The search is a case-insensitive substring test over the entity's
//! descriptive text, including both the display label and the backend code
//! of enum fields (`In progress` and `EN_COURS`); an empty search keeps
//! everything.

use api::{
    ContactCategory, ContactRequest, Priority, Project, ProjectStatus, ProjectType, Role, Task,
    TaskStatus, User,
};
use dioxus::prelude::*;

fn matches_search(needle: &str, haystack: &[&str]) -> bool {
    let needle = needle.trim().to_lowercase();
    needle.is_empty()
        || haystack
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
}

fn exact<T: PartialEq>(wanted: &Option<T>, actual: &T) -> bool {
    wanted.as_ref().is_none_or(|w| w == actual)
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProjectFilter {
    pub search: String,
    pub status: Option<ProjectStatus>,
    pub project_type: Option<ProjectType>,
}

impl ProjectFilter {
    pub fn matches(&self, project: &Project) -> bool {
        exact(&self.status, &project.status)
            && exact(&self.project_type, &project.project_type)
            && matches_search(
                &self.search,
                &[
                    &project.title,
                    &project.description,
                    project.status.label(),
                    project.status.as_wire(),
                    project.project_type.label(),
                    project.project_type.as_wire(),
                    project.client_name().unwrap_or_default(),
                ],
            )
    }

    pub fn apply(&self, projects: &[Project]) -> Vec<Project> {
        projects.iter().filter(|p| self.matches(p)).cloned().collect()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TaskFilter {
    pub search: String,
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        exact(&self.status, &task.status)
            && exact(&self.priority, &task.priority)
            && matches_search(
                &self.search,
                &[
                    &task.title,
                    &task.description,
                    task.status.label(),
                    task.status.as_wire(),
                    task.priority.label(),
                    task.priority.as_wire(),
                    task.assignee_name().unwrap_or_default(),
                    task.project_title().unwrap_or_default(),
                ],
            )
    }

    pub fn apply(&self, tasks: &[Task]) -> Vec<Task> {
        tasks.iter().filter(|t| self.matches(t)).cloned().collect()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct UserFilter {
    pub search: String,
    pub role: Option<Role>,
    pub active: Option<bool>,
}

impl UserFilter {
    pub fn matches(&self, user: &User) -> bool {
        let name = user.display_name();
        exact(&self.role, &user.role)
            && exact(&self.active, &user.active)
            && matches_search(
                &self.search,
                &[
                    &name,
                    &user.username,
                    &user.email,
                    user.role.label(),
                    user.role.as_wire(),
                    user.department.as_deref().unwrap_or_default(),
                ],
            )
    }

    pub fn apply(&self, users: &[User]) -> Vec<User> {
        users.iter().filter(|u| self.matches(u)).cloned().collect()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ContactFilter {
    pub search: String,
    pub category: Option<ContactCategory>,
    pub processed: Option<bool>,
}

impl ContactFilter {
    pub fn matches(&self, request: &ContactRequest) -> bool {
        exact(&self.category, &request.category)
            && exact(&self.processed, &request.processed)
            && matches_search(
                &self.search,
                &[
                    &request.name,
                    &request.email,
                    &request.subject,
                    &request.description,
                    request.category.label(),
                    request.category.as_wire(),
                ],
            )
    }

    pub fn apply(&self, requests: &[ContactRequest]) -> Vec<ContactRequest> {
        requests.iter().filter(|r| self.matches(r)).cloned().collect()
    }
}

/// Text box bound to a search string.
#[component]
pub fn SearchInput(
    value: String,
    on_input: EventHandler<String>,
    #[props(default = "Search…".to_string())] placeholder: String,
) -> Element {
    rsx! {
        input {
            class: "search-input",
            r#type: "search",
            placeholder: "{placeholder}",
            value: "{value}",
            oninput: move |evt: FormEvent| on_input.call(evt.value()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::{TaskStats, UserRef};

    fn project(id: i64, title: &str, status: ProjectStatus, client: &str) -> Project {
        Project {
            id,
            title: title.into(),
            description: String::new(),
            project_type: ProjectType::Delivery,
            status,
            progression: 0,
            start_date: None,
            end_date: None,
            client: Some(UserRef {
                id: 100 + id,
                name: client.into(),
            }),
            lead: None,
            developers: Vec::new(),
            stats: TaskStats::default(),
        }
    }

    fn projects() -> Vec<Project> {
        vec![
            project(1, "Mobile banking", ProjectStatus::InProgress, "Acme"),
            project(2, "Intranet", ProjectStatus::Done, "Globex"),
            project(3, "Website refresh", ProjectStatus::InProgress, "Globex"),
        ]
    }

    #[test]
    fn test_empty_search_returns_input() {
        let all = projects();
        assert_eq!(ProjectFilter::default().apply(&all), all);
        let blank = ProjectFilter {
            search: "   ".into(),
            ..Default::default()
        };
        assert_eq!(blank.apply(&all).len(), 3);
    }

    #[test]
    fn test_non_matching_search_returns_empty() {
        let filter = ProjectFilter {
            search: "zzz-nothing".into(),
            ..Default::default()
        };
        assert!(filter.apply(&projects()).is_empty());
    }

    #[test]
    fn test_search_covers_client_and_status() {
        let by_client = ProjectFilter {
            search: "globex".into(),
            ..Default::default()
        };
        assert_eq!(by_client.apply(&projects()).len(), 2);

        let by_status_label = ProjectFilter {
            search: "in progress".into(),
            ..Default::default()
        };
        assert_eq!(by_status_label.apply(&projects()).len(), 2);
    }

    #[test]
    fn test_search_matches_backend_status_code() {
        let filter = ProjectFilter {
            search: "EN_COURS".into(),
            ..Default::default()
        };
        let hits = filter.apply(&projects());
        assert_eq!(hits.len(), 2);
        assert!(hits.iter().all(|p| p.status == ProjectStatus::InProgress));

        let lower = ProjectFilter {
            search: "termine".into(),
            ..Default::default()
        };
        assert_eq!(lower.apply(&projects())[0].title, "Intranet");
    }

    #[test]
    fn test_exact_filters_combine_with_search() {
        let filter = ProjectFilter {
            search: "globex".into(),
            status: Some(ProjectStatus::InProgress),
            project_type: None,
        };
        let hits = filter.apply(&projects());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Website refresh");
    }
}

use chrono::NaiveDate;
use futures::future::{try_join, try_join_all};
use store::KeyValueStore;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{DashboardSummary, Project, Role, Task};
use crate::transport::Transport;

impl<T: Transport, S: KeyValueStore> ApiClient<T, S> {
    /// Projects and tasks visible to `role`, fetched in parallel.
    /// Any failing call fails the whole load.
    pub async fn dashboard_data(&self, role: Role) -> Result<(Vec<Project>, Vec<Task>), ApiError> {
        match role {
            Role::Developpeur | Role::Stagiaire => {
                try_join(self.developer_projects(), self.my_tasks()).await
            }
            Role::Client => Ok((self.client_projects().await?, Vec::new())),
            Role::Admin | Role::ChefDeProjet => {
                let projects = if role == Role::Admin {
                    self.projects().await?
                } else {
                    self.chef_projects().await?
                };
                let per_project =
                    try_join_all(projects.iter().map(|p| self.project_tasks(p.id))).await?;
                Ok((projects, per_project.into_iter().flatten().collect()))
            }
        }
    }

    pub async fn dashboard_summary(
        &self,
        role: Role,
        today: NaiveDate,
    ) -> Result<DashboardSummary, ApiError> {
        let (projects, tasks) = self.dashboard_data(role).await?;
        Ok(DashboardSummary::aggregate(&projects, &tasks, today))
    }
}

#[cfg(test)]
mod tests {
    use crate::models::{Role, TaskStatus};
    use crate::services::testing::signed_in;
    use crate::transport::Method;
    use chrono::NaiveDate;
    use serde_json::json;

    #[tokio::test]
    async fn test_chef_dashboard_fans_out_per_project() {
        let (client, mock) = signed_in();
        mock.on_json(
            Method::Get,
            "/projects/chef/overview",
            json!([{ "id": 1, "status": "EN_COURS" }, { "id": 2, "status": "TERMINE" }]),
        );
        mock.on_json(Method::Get, "/task/project/1", json!([{ "id": 10, "status": "BLOQUEE" }]));
        mock.on_json(Method::Get, "/task/project/2", json!([{ "id": 11, "status": "TERMINEE" }]));

        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let summary = client.dashboard_summary(Role::ChefDeProjet, today).await.unwrap();
        assert_eq!(summary.projects_total, 2);
        assert_eq!(summary.tasks_total, 2);
        assert_eq!(summary.tasks_with(TaskStatus::Blocked), 1);
    }

    #[tokio::test]
    async fn test_partial_failure_fails_the_batch() {
        let (client, mock) = signed_in();
        mock.on_json(Method::Get, "/projects/developer/me", json!([]));
        mock.on(Method::Get, "/task/developer/me", 500, "");
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert!(client.dashboard_summary(Role::Developpeur, today).await.is_err());
    }
}

use serde_json::json;
use store::KeyValueStore;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{Id, Task, TaskDraft, TaskStatus};
use crate::transport::Transport;

impl<T: Transport, S: KeyValueStore> ApiClient<T, S> {
    pub async fn project_tasks(&self, project_id: Id) -> Result<Vec<Task>, ApiError> {
        self.get_list(&format!("/task/project/{project_id}")).await
    }

    pub async fn task(&self, id: Id) -> Result<Task, ApiError> {
        self.get(&format!("/task/{id}")).await
    }

    pub async fn create_task(&self, draft: &TaskDraft) -> Result<Task, ApiError> {
        draft.validate()?;
        let task: Task = self.post("/task", draft).await?;
        self.analytics_cache().invalidate();
        tracing::info!("created task {} in project {}", task.id, draft.project_id);
        Ok(task)
    }

    pub async fn update_task(&self, id: Id, draft: &TaskDraft) -> Result<Task, ApiError> {
        draft.validate()?;
        let task = self.put(&format!("/task/{id}"), draft).await?;
        self.analytics_cache().invalidate();
        Ok(task)
    }

    pub async fn update_task_status(&self, id: Id, status: TaskStatus) -> Result<Task, ApiError> {
        let task = self
            .patch(&format!("/task/{id}/status"), &json!({ "status": status }))
            .await?;
        self.analytics_cache().invalidate();
        Ok(task)
    }

    pub async fn delete_task(&self, id: Id) -> Result<(), ApiError> {
        self.delete(&format!("/task/{id}")).await?;
        self.analytics_cache().invalidate();
        Ok(())
    }

    /// Tasks assigned to the signed-in developer or intern.
    pub async fn my_tasks(&self) -> Result<Vec<Task>, ApiError> {
        self.get_list("/task/developer/me").await
    }
}

#[cfg(test)]
mod tests {
    use crate::models::{TaskDraft, TaskStatus};
    use crate::services::testing::signed_in;
    use crate::transport::Method;
    use serde_json::json;

    #[tokio::test]
    async fn test_status_patch_body() {
        let (client, mock) = signed_in();
        mock.on_json(
            Method::Patch,
            "/task/12/status",
            json!({ "id": 12, "titre": "Login", "statut": "TERMINEE" }),
        );
        let task = client.update_task_status(12, TaskStatus::Done).await.unwrap();
        assert_eq!(task.status, TaskStatus::Done);
        assert_eq!(
            mock.last_request().unwrap().body.unwrap(),
            json!({ "status": "TERMINEE" })
        );
    }

    #[tokio::test]
    async fn test_negative_hours_rejected_locally() {
        let (client, mock) = signed_in();
        let draft = TaskDraft {
            title: "Review".to_string(),
            planned_hours: -2.0,
            ..TaskDraft::new(1)
        };
        assert!(client.create_task(&draft).await.is_err());
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_project_tasks_shapes() {
        let (client, mock) = signed_in();
        mock.on_json(
            Method::Get,
            "/task/project/2",
            json!({ "data": [
                { "id": 1, "title": "A", "status": "in progress", "project": 2 },
                { "id": 2, "title": "B", "projet": { "idProjet": 2, "titre": "CRM" } }
            ]}),
        );
        let tasks = client.project_tasks(2).await.unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].status, TaskStatus::InProgress);
        assert_eq!(tasks[1].project_title(), Some("CRM"));
    }
}

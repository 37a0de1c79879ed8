use serde_json::json;
use store::KeyValueStore;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{Id, Project, ProjectDraft};
use crate::transport::Transport;

impl<T: Transport, S: KeyValueStore> ApiClient<T, S> {
    /// Every project (admin).
    pub async fn projects(&self) -> Result<Vec<Project>, ApiError> {
        self.get_list("/projects").await
    }

    pub async fn project(&self, id: Id) -> Result<Project, ApiError> {
        self.get(&format!("/projects/{id}")).await
    }

    pub async fn create_project(&self, draft: &ProjectDraft) -> Result<Project, ApiError> {
        draft.validate()?;
        let project: Project = self.post("/projects", draft).await?;
        self.analytics_cache().invalidate();
        tracing::info!("created project {} `{}`", project.id, project.title);
        Ok(project)
    }

    pub async fn update_project(&self, id: Id, draft: &ProjectDraft) -> Result<Project, ApiError> {
        draft.validate()?;
        let project = self.put(&format!("/projects/{id}"), draft).await?;
        self.analytics_cache().invalidate();
        Ok(project)
    }

    pub async fn delete_project(&self, id: Id) -> Result<(), ApiError> {
        self.delete(&format!("/projects/{id}")).await?;
        self.analytics_cache().invalidate();
        tracing::info!("deleted project {id}");
        Ok(())
    }

    /// Projects led by the signed-in chef, with task counters.
    pub async fn chef_projects(&self) -> Result<Vec<Project>, ApiError> {
        self.get_list("/projects/chef/overview").await
    }

    /// Projects owned by the signed-in client.
    pub async fn client_projects(&self) -> Result<Vec<Project>, ApiError> {
        self.get_list("/projects/client/me").await
    }

    /// Projects the signed-in developer is assigned to.
    pub async fn developer_projects(&self) -> Result<Vec<Project>, ApiError> {
        self.get_list("/projects/developer/me").await
    }

    /// Replace the developer team of a project.
    pub async fn assign_developers(&self, id: Id, developer_ids: &[Id]) -> Result<Project, ApiError> {
        let project = self
            .put(
                &format!("/projects/{id}/developers"),
                &json!({ "developerIds": developer_ids }),
            )
            .await?;
        self.analytics_cache().invalidate();
        Ok(project)
    }

    /// Unauthenticated view behind the shared link and QR code.
    pub async fn public_project(&self, id: Id) -> Result<Project, ApiError> {
        self.get(&format!("/projects/public/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use crate::models::{ProjectDraft, ProjectStatus};
    use crate::services::testing::signed_in;
    use crate::transport::Method;
    use crate::ApiError;
    use chrono::NaiveDate;
    use serde_json::json;

    #[tokio::test]
    async fn test_empty_title_sends_nothing() {
        let (client, mock) = signed_in();
        let draft = ProjectDraft {
            title: "   ".to_string(),
            ..ProjectDraft::default()
        };
        let err = client.create_project(&draft).await.unwrap_err();
        let errors = err.validation().unwrap();
        assert!(errors.for_field("title").is_some());
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_create_project_payload() {
        let (client, mock) = signed_in();
        mock.on_json(
            Method::Post,
            "/projects",
            json!({ "id": 31, "title": "Intranet", "status": "EN_ATTENTE" }),
        );
        let draft = ProjectDraft {
            title: "Intranet".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 8),
            end_date: NaiveDate::from_ymd_opt(2024, 3, 29),
            client_id: Some(4),
            ..ProjectDraft::default()
        };
        let project = client.create_project(&draft).await.unwrap();
        assert_eq!(project.id, 31);
        assert_eq!(project.status, ProjectStatus::Pending);

        let body = mock.last_request().unwrap().body.unwrap();
        assert_eq!(body["title"], "Intranet");
        assert_eq!(body["type"], "LIVRAISON");
        assert_eq!(body["startDate"], "2024-01-08");
        assert_eq!(body["clientId"], 4);
        assert!(body.get("progression").is_none());
    }

    #[tokio::test]
    async fn test_assign_developers() {
        let (client, mock) = signed_in();
        mock.on_json(
            Method::Put,
            "/projects/3/developers",
            json!({ "id": 3, "developpeurs": [{ "id": 7, "prenom": "Lina", "nom": "B" }] }),
        );
        let project = client.assign_developers(3, &[7]).await.unwrap();
        assert_eq!(project.developers[0].name, "Lina B");
        assert_eq!(mock.last_request().unwrap().body.unwrap(), json!({ "developerIds": [7] }));
    }

    #[tokio::test]
    async fn test_delete_failure_surfaces() {
        let (client, mock) = signed_in();
        mock.on(Method::Delete, "/projects/9", 404, r#"{"message":"Projet introuvable"}"#);
        let err = client.delete_project(9).await.unwrap_err();
        assert_eq!(err.status(), Some(404));
        assert!(!matches!(err, ApiError::Unauthorized));
    }
}

use serde_json::json;
use store::KeyValueStore;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{Id, Role, User, UserDraft};
use crate::transport::Transport;

impl<T: Transport, S: KeyValueStore> ApiClient<T, S> {
    pub async fn users(&self) -> Result<Vec<User>, ApiError> {
        self.get_list("/admin/users").await
    }

    pub async fn user(&self, id: Id) -> Result<User, ApiError> {
        self.get(&format!("/admin/users/{id}")).await
    }

    pub async fn create_user(&self, draft: &UserDraft) -> Result<User, ApiError> {
        draft.validate(true)?;
        let user: User = self.post("/admin/users", &draft.normalized()).await?;
        self.analytics_cache().invalidate();
        tracing::info!("created user {} as {}", user.username, user.role);
        Ok(user)
    }

    /// A blank password keeps the current one.
    pub async fn update_user(&self, id: Id, draft: &UserDraft) -> Result<User, ApiError> {
        draft.validate(false)?;
        let user = self
            .put(&format!("/admin/users/{id}"), &draft.normalized())
            .await?;
        self.analytics_cache().invalidate();
        Ok(user)
    }

    pub async fn delete_user(&self, id: Id) -> Result<(), ApiError> {
        self.delete(&format!("/admin/users/{id}")).await?;
        self.analytics_cache().invalidate();
        Ok(())
    }

    pub async fn set_user_active(&self, id: Id, active: bool) -> Result<User, ApiError> {
        let user = self
            .patch(&format!("/admin/users/{id}/active"), &json!({ "active": active }))
            .await?;
        self.analytics_cache().invalidate();
        Ok(user)
    }

    /// Users holding `role`, e.g. the developers offered for assignment.
    pub async fn users_by_role(&self, role: Role) -> Result<Vec<User>, ApiError> {
        self.get_list(&format!("/admin/users/role/{}", role.as_wire()))
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::models::{Role, UserDraft};
    use crate::services::testing::signed_in;
    use crate::transport::Method;
    use serde_json::json;

    #[tokio::test]
    async fn test_users_by_role_path() {
        let (client, mock) = signed_in();
        mock.on_json(
            Method::Get,
            "/admin/users/role/DEVELOPPEUR",
            json!([{ "id": 4, "email": "d@example.com", "role": "ROLE_DEVELOPPEUR" }]),
        );
        let devs = client.users_by_role(Role::Developpeur).await.unwrap();
        assert_eq!(devs[0].username, "d");
    }

    #[tokio::test]
    async fn test_update_without_password_omits_it() {
        let (client, mock) = signed_in();
        mock.on_json(
            Method::Put,
            "/admin/users/4",
            json!({ "id": 4, "email": "d@example.com", "role": "CLIENT" }),
        );
        let draft = UserDraft {
            username: " d ".to_string(),
            email: "D@Example.com".to_string(),
            password: Some(String::new()),
            role: Role::Client,
            ..UserDraft::default()
        };
        client.update_user(4, &draft).await.unwrap();
        let body = mock.last_request().unwrap().body.unwrap();
        assert!(body.get("password").is_none());
        assert_eq!(body["email"], "d@example.com");
        assert_eq!(body["role"], "CLIENT");
    }

    #[tokio::test]
    async fn test_new_user_requires_password() {
        let (client, mock) = signed_in();
        let draft = UserDraft {
            username: "new".to_string(),
            email: "new@example.com".to_string(),
            ..UserDraft::default()
        };
        let err = client.create_user(&draft).await.unwrap_err();
        assert!(err.validation().unwrap().for_field("password").is_some());
        assert_eq!(mock.request_count(), 0);
    }
}

use serde_json::json;
use store::KeyValueStore;

use crate::client::{decode, ApiClient, LOGIN_ENDPOINT};
use crate::error::{ApiError, GENERIC_ERROR_MESSAGE};
use crate::models::{LoginRequest, LoginResponse, User};
use crate::transport::{Method, Transport};

const BAD_CREDENTIALS: &str = "Invalid email or password";

impl<T: Transport, S: KeyValueStore> ApiClient<T, S> {
    /// `POST /auth/login`. Stores the token and profile on success.
    pub async fn login(&self, request: &LoginRequest) -> Result<User, ApiError> {
        request.validate()?;
        let body = json!({ "email": request.email, "password": request.password });
        let response = self
            .execute(Method::Post, LOGIN_ENDPOINT, Vec::new(), Some(body))
            .await
            .map_err(|e| match e {
                ApiError::Http { status: 401 | 403, message } if message == GENERIC_ERROR_MESSAGE => {
                    ApiError::Http {
                        status: 401,
                        message: BAD_CREDENTIALS.to_string(),
                    }
                }
                other => other,
            })?;
        let login: LoginResponse = decode(&response.body)?;
        self.session().store_login(&login.token, &login.user)?;
        self.analytics_cache().invalidate();
        tracing::info!("signed in as {} ({})", login.user.username, login.user.role);
        Ok(login.user)
    }

    /// `GET /auth/me`, refreshing the cached profile.
    pub async fn current_user(&self) -> Result<User, ApiError> {
        let user: User = self.get("/auth/me").await?;
        self.session().cache_user(&user)?;
        Ok(user)
    }

    /// Best-effort `POST /auth/logout`, then local clear.
    pub async fn logout(&self) -> Result<(), ApiError> {
        if self.session().has_token() {
            if let Err(e) = self.send(Method::Post, "/auth/logout", None).await {
                tracing::debug!("logout call failed, clearing locally: {e}");
            }
        }
        self.analytics_cache().invalidate();
        self.session().clear()?;
        tracing::info!("signed out");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::client::ApiClient;
    use crate::guard::{authorize, GuardOutcome, RedirectReason, Section};
    use crate::mock::MockTransport;
    use crate::models::{LoginRequest, Project, Role};
    use crate::transport::Method;
    use crate::ApiError;
    use serde_json::json;
    use store::{KeyValueStore, MemoryStore, TOKEN_KEY, USER_KEY};

    #[tokio::test]
    async fn test_chef_login_scenario() {
        let mock = MockTransport::new();
        let store = MemoryStore::new();
        let client = ApiClient::new(mock.clone(), store.clone());
        mock.on_json(
            Method::Post,
            "/auth/login",
            json!({
                "token": "jwt-chef",
                "user": { "id": 2, "username": "sami", "email": "sami@example.com", "role": "CHEF_DE_PROJET" }
            }),
        );
        mock.on_json(
            Method::Get,
            "/projects/chef/overview",
            json!([{ "id": 10, "titre": "Portail RH", "statut": "EN_COURS", "totalTasks": 4, "completedTasks": 1 }]),
        );

        let user = client
            .login(&LoginRequest::new("sami@example.com", "password1"))
            .await
            .unwrap();
        assert_eq!(user.role, Role::ChefDeProjet);
        assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("jwt-chef"));

        assert_eq!(
            authorize(&client, Section::Admin).await,
            GuardOutcome::Redirect(RedirectReason::RoleNotAllowed(Role::ChefDeProjet))
        );
        assert!(authorize(&client, Section::Chef).await.is_authorized());

        let projects: Vec<Project> = client.chef_projects().await.unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].progression, 25);
        let last = mock.last_request().unwrap();
        assert_eq!(last.path, "/projects/chef/overview");
        assert_eq!(last.bearer.as_deref(), Some("jwt-chef"));
    }

    #[tokio::test]
    async fn test_bad_credentials_keep_hook_silent() {
        let mock = MockTransport::new();
        let store = MemoryStore::new();
        let client = ApiClient::new(mock.clone(), store.clone())
            .on_unauthorized(|| panic!("login failure must not trigger the expiry hook"));
        mock.on(Method::Post, "/auth/login", 401, "");

        let err = client
            .login(&LoginRequest::new("a@example.com", "wrong-pass"))
            .await
            .unwrap_err();
        assert_eq!(err.user_message(), "Invalid email or password");
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_login_sends_nothing() {
        let mock = MockTransport::new();
        let client = ApiClient::new(mock.clone(), MemoryStore::new());
        let err = client.login(&LoginRequest::new("", "")).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_logout_clears_even_when_backend_fails() {
        let mock = MockTransport::new();
        let store = MemoryStore::new();
        store.set(TOKEN_KEY, "t").unwrap();
        store.set(USER_KEY, "{}").unwrap();
        let client = ApiClient::new(mock.clone(), store.clone());
        mock.fail_network(Method::Post, "/auth/logout");

        client.logout().await.unwrap();
        assert!(store.is_empty());
        assert_eq!(mock.count(Method::Post, "/auth/logout"), 1);
    }
}

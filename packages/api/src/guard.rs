//! Route guard decision.
//!
//! [`authorize`] answers one question for a guarded section: may the current
//! session see it? It never panics; every failure ends in a redirect to the
//! login page.
//!
//! | Situation | Storage | Outcome |
//! |-----------|---------|---------|
//! | no token | cleared | redirect |
//! | cached user unreadable | cleared | redirect |
//! | no cached user, `/auth/me` fails | cleared | redirect |
//! | role outside the section | kept | redirect |
//! | role allowed | user cached | authorized |

use std::fmt;

use store::KeyValueStore;

use crate::client::ApiClient;
use crate::models::{Role, User};
use crate::transport::Transport;

pub const LOGIN_PATH: &str = "/auth/login";

/// Guarded areas of the application.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    Admin,
    Chef,
    Developer,
    Client,
}

impl Section {
    pub fn allowed_roles(&self) -> &'static [Role] {
        match self {
            Section::Admin => &[Role::Admin],
            Section::Chef => &[Role::ChefDeProjet, Role::Admin],
            Section::Developer => &[Role::Developpeur, Role::Stagiaire],
            Section::Client => &[Role::Client],
        }
    }

    pub fn allows(&self, role: Role) -> bool {
        self.allowed_roles().contains(&role)
    }

    /// Section a role lands in after login.
    pub fn home_of(role: Role) -> Section {
        match role {
            Role::Admin => Section::Admin,
            Role::ChefDeProjet => Section::Chef,
            Role::Developpeur | Role::Stagiaire => Section::Developer,
            Role::Client => Section::Client,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Section::Admin => "admin",
            Section::Chef => "chef",
            Section::Developer => "developer",
            Section::Client => "client",
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RedirectReason {
    MissingToken,
    CorruptSession,
    ProfileUnavailable,
    RoleNotAllowed(Role),
}

impl RedirectReason {
    /// Whether the guard wiped the stored credentials.
    pub fn clears_session(&self) -> bool {
        !matches!(self, RedirectReason::RoleNotAllowed(_))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum GuardOutcome {
    Authorized(User),
    Redirect(RedirectReason),
}

impl GuardOutcome {
    pub fn is_authorized(&self) -> bool {
        matches!(self, GuardOutcome::Authorized(_))
    }
}

pub async fn authorize<T: Transport, S: KeyValueStore>(
    client: &ApiClient<T, S>,
    section: Section,
) -> GuardOutcome {
    let session = client.session();
    let outcome = match session.token() {
        Ok(Some(_)) => match session.user() {
            Ok(Some(user)) => check_role(user, section),
            Ok(None) => match client.current_user().await {
                Ok(user) => check_role(user, section),
                Err(e) => {
                    tracing::warn!("guard: profile fetch failed: {e}");
                    GuardOutcome::Redirect(RedirectReason::ProfileUnavailable)
                }
            },
            Err(e) => {
                tracing::warn!("guard: {e}");
                GuardOutcome::Redirect(RedirectReason::CorruptSession)
            }
        },
        Ok(None) => GuardOutcome::Redirect(RedirectReason::MissingToken),
        Err(e) => {
            tracing::warn!("guard: {e}");
            GuardOutcome::Redirect(RedirectReason::CorruptSession)
        }
    };

    match &outcome {
        GuardOutcome::Redirect(reason) if reason.clears_session() => {
            if let Err(e) = session.clear() {
                tracing::error!("guard: failed to clear session: {e}");
            }
            tracing::info!("guard: {section} denied ({reason:?}), session cleared");
        }
        GuardOutcome::Redirect(reason) => tracing::info!("guard: {section} denied ({reason:?})"),
        GuardOutcome::Authorized(user) => {
            tracing::debug!("guard: {section} authorized for {}", user.username)
        }
    }
    outcome
}

fn check_role(user: User, section: Section) -> GuardOutcome {
    if section.allows(user.role) {
        GuardOutcome::Authorized(user)
    } else {
        GuardOutcome::Redirect(RedirectReason::RoleNotAllowed(user.role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockTransport;
    use crate::transport::Method;
    use serde_json::json;
    use store::{MemoryStore, TOKEN_KEY, USER_KEY};

    fn setup() -> (ApiClient<MockTransport, MemoryStore>, MockTransport, MemoryStore) {
        let mock = MockTransport::new();
        let store = MemoryStore::new();
        (ApiClient::new(mock.clone(), store.clone()), mock, store)
    }

    fn cached(role: &str) -> String {
        json!({
            "id": 1, "username": "u", "email": "u@example.com", "role": role,
            "firstName": null, "lastName": null, "department": null, "jobTitle": null,
            "phone": null, "active": true, "createdAt": null
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_missing_token_redirects_and_clears() {
        let (client, mock, store) = setup();
        store.set(USER_KEY, &cached("ADMIN")).unwrap();
        let outcome = authorize(&client, Section::Admin).await;
        assert_eq!(outcome, GuardOutcome::Redirect(RedirectReason::MissingToken));
        assert!(store.is_empty());
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_revoked_token_denies_next_check() {
        let (client, mock, store) = setup();
        store.set(TOKEN_KEY, "t").unwrap();
        store.set(USER_KEY, &cached("CHEF_DE_PROJET")).unwrap();
        assert!(authorize(&client, Section::Chef).await.is_authorized());

        // Signed out from another tab between two navigations.
        store.remove(TOKEN_KEY).unwrap();
        let outcome = authorize(&client, Section::Chef).await;
        assert_eq!(outcome, GuardOutcome::Redirect(RedirectReason::MissingToken));
        assert!(store.is_empty());
        assert_eq!(mock.request_count(), 0);
    }

    #[tokio::test]
    async fn test_corrupt_user_redirects_and_clears() {
        let (client, _, store) = setup();
        store.set(TOKEN_KEY, "t").unwrap();
        store.set(USER_KEY, "{{{").unwrap();
        let outcome = authorize(&client, Section::Client).await;
        assert_eq!(outcome, GuardOutcome::Redirect(RedirectReason::CorruptSession));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_disallowed_role_never_authorized() {
        let (client, _, store) = setup();
        store.set(TOKEN_KEY, "t").unwrap();
        store.set(USER_KEY, &cached("CLIENT")).unwrap();
        for section in [Section::Admin, Section::Chef, Section::Developer] {
            let outcome = authorize(&client, section).await;
            assert_eq!(
                outcome,
                GuardOutcome::Redirect(RedirectReason::RoleNotAllowed(Role::Client))
            );
        }
        assert!(authorize(&client, Section::Client).await.is_authorized());
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_fetches_profile_when_not_cached() {
        let (client, mock, store) = setup();
        store.set(TOKEN_KEY, "t").unwrap();
        mock.on_json(
            Method::Get,
            "/auth/me",
            json!({ "id": 5, "email": "dev@example.com", "role": "STAGIAIRE" }),
        );
        let outcome = authorize(&client, Section::Developer).await;
        assert!(outcome.is_authorized());
        assert!(store.get(USER_KEY).unwrap().is_some());
    }

    #[tokio::test]
    async fn test_profile_fetch_failure_clears() {
        let (client, mock, store) = setup();
        store.set(TOKEN_KEY, "t").unwrap();
        mock.on(Method::Get, "/auth/me", 500, "");
        let outcome = authorize(&client, Section::Developer).await;
        assert_eq!(outcome, GuardOutcome::Redirect(RedirectReason::ProfileUnavailable));
        assert!(store.is_empty());
    }

    #[test]
    fn test_admin_may_enter_chef_section() {
        assert!(Section::Chef.allows(Role::Admin));
        assert!(!Section::Admin.allows(Role::ChefDeProjet));
        assert_eq!(Section::home_of(Role::Stagiaire), Section::Developer);
    }
}

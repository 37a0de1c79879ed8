//! Typed access to the persisted session (`token` and `user` keys).

use store::{KeyValueStore, StorageError, TOKEN_KEY, USER_KEY};
use thiserror::Error;

use crate::models::{FromWire, RawUser, User};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// The cached `user` entry is not a valid profile.
    #[error("stored user profile is unreadable: {0}")]
    CorruptUser(String),
}

/// Reads and writes the session keys of a [`KeyValueStore`].
#[derive(Clone, Debug)]
pub struct Session<S> {
    store: S,
}

impl<S: KeyValueStore> Session<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Bearer token, ignoring blank values.
    pub fn token(&self) -> Result<Option<String>, SessionError> {
        Ok(self
            .store
            .get(TOKEN_KEY)?
            .filter(|t| !t.trim().is_empty()))
    }

    pub fn has_token(&self) -> bool {
        matches!(self.token(), Ok(Some(_)))
    }

    /// Cached profile; `Err` when the entry exists but does not parse.
    pub fn user(&self) -> Result<Option<User>, SessionError> {
        match self.store.get(USER_KEY)? {
            None => Ok(None),
            Some(raw) if raw.trim().is_empty() || raw == "null" => Ok(None),
            Some(raw) => {
                let wire: RawUser = serde_json::from_str(&raw)
                    .map_err(|e| SessionError::CorruptUser(e.to_string()))?;
                User::from_wire(wire).map(Some).map_err(SessionError::CorruptUser)
            }
        }
    }

    pub fn store_login(&self, token: &str, user: &User) -> Result<(), SessionError> {
        self.store.set(TOKEN_KEY, token)?;
        self.cache_user(user)
    }

    pub fn cache_user(&self, user: &User) -> Result<(), SessionError> {
        let json = serde_json::to_string(user).map_err(|e| SessionError::CorruptUser(e.to_string()))?;
        self.store.set(USER_KEY, &json)?;
        Ok(())
    }

    pub fn clear(&self) -> Result<(), SessionError> {
        self.store.clear_session()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use store::MemoryStore;

    fn user() -> User {
        User {
            id: 3,
            username: "lina".to_string(),
            email: "lina@example.com".to_string(),
            role: Role::Developpeur,
            first_name: None,
            last_name: None,
            department: None,
            job_title: None,
            phone: None,
            active: true,
            created_at: None,
        }
    }

    #[test]
    fn test_login_round_trip_and_clear() {
        let session = Session::new(MemoryStore::new());
        assert_eq!(session.token().unwrap(), None);
        session.store_login("tok", &user()).unwrap();
        assert_eq!(session.token().unwrap().as_deref(), Some("tok"));
        assert_eq!(session.user().unwrap(), Some(user()));

        session.clear().unwrap();
        assert!(!session.has_token());
        assert!(session.store().is_empty());
    }

    #[test]
    fn test_backend_shaped_profile_loads() {
        let store = MemoryStore::new();
        store
            .set(USER_KEY, r#"{"id":1,"email":"a@b.co","role":"ROLE_ADMIN","prenom":"Ana"}"#)
            .unwrap();
        let user = Session::new(store).user().unwrap().unwrap();
        assert_eq!(user.id, 1);
        assert_eq!(user.role, Role::Admin);
        assert_eq!(user.username, "a");
        assert_eq!(user.first_name.as_deref(), Some("Ana"));
        assert!(user.active);
    }

    #[test]
    fn test_profile_without_role_is_corrupt() {
        let store = MemoryStore::new();
        store.set(USER_KEY, r#"{"id":1,"email":"a@b.co"}"#).unwrap();
        assert!(matches!(Session::new(store).user(), Err(SessionError::CorruptUser(_))));
    }

    #[test]
    fn test_corrupt_user() {
        let store = MemoryStore::new();
        store.set(USER_KEY, "{not json").unwrap();
        let session = Session::new(store);
        assert!(matches!(session.user(), Err(SessionError::CorruptUser(_))));
    }
}

//! Login request and response.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::user::{RawUser, User};
use super::wire::{non_blank, FromWire};
use crate::validation::ValidationErrors;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into().trim().to_string(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.email("email", &self.email);
        errors.require("password", "Password", &self.password);
        errors.into_result()
    }
}

/// Token and profile returned by `POST /auth/login`.
#[derive(Clone, Debug, PartialEq)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

/// The token sits under `token`, `accessToken` or `jwt`. The profile is
/// either nested under `user`/`utilisateur` or flattened next to the token.
#[derive(Debug, Deserialize)]
pub struct RawLoginResponse(pub Value);

impl FromWire for LoginResponse {
    type Raw = RawLoginResponse;

    fn from_wire(RawLoginResponse(value): RawLoginResponse) -> Result<Self, String> {
        let token = ["token", "accessToken", "access_token", "jwt"]
            .iter()
            .find_map(|key| value.get(*key).and_then(Value::as_str))
            .map(|t| t.trim_start_matches("Bearer ").to_string());
        let token = non_blank(token).ok_or("login response without token")?;

        let profile = ["user", "utilisateur"]
            .iter()
            .find_map(|key| value.get(*key).filter(|v| v.is_object()))
            .cloned()
            .unwrap_or(value);
        let raw: RawUser =
            serde_json::from_value(profile).map_err(|e| format!("login profile: {e}"))?;
        Ok(LoginResponse {
            token,
            user: User::from_wire(raw)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::Role;
    use serde_json::json;

    #[test]
    fn test_nested_profile() {
        let raw = RawLoginResponse(json!({
            "token": "abc",
            "user": { "id": 2, "email": "chef@example.com", "role": "CHEF_DE_PROJET" }
        }));
        let login = LoginResponse::from_wire(raw).unwrap();
        assert_eq!(login.token, "abc");
        assert_eq!(login.user.role, Role::ChefDeProjet);
        assert_eq!(login.user.username, "chef");
    }

    #[test]
    fn test_flat_profile() {
        let raw = RawLoginResponse(json!({
            "accessToken": "Bearer xyz",
            "id": 9, "username": "amal", "email": "amal@example.com", "role": "ROLE_CLIENT"
        }));
        let login = LoginResponse::from_wire(raw).unwrap();
        assert_eq!(login.token, "xyz");
        assert_eq!(login.user.role, Role::Client);
    }

    #[test]
    fn test_missing_token_rejected() {
        let raw = RawLoginResponse(json!({ "user": { "id": 1, "role": "ADMIN" } }));
        assert!(LoginResponse::from_wire(raw).is_err());
    }

    #[test]
    fn test_login_request_validation() {
        assert!(LoginRequest::new(" a@b.co ", "secret").validate().is_ok());
        let errors = LoginRequest::new("nope", "").validate().unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}

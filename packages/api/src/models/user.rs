//! # User model
//!
//! Two representations of an account:
//!
//! ## [`RawUser`]
//!
//! The wire shape. The admin endpoints, `/auth/me` and the login response
//! disagree on field names (`username` vs `nom`, `jobTitle` vs `poste`,
//! `active` vs `enabled`...), so every field is optional and aliased.
//!
//! ## [`User`]
//!
//! The canonical profile the rest of the application works with. It is also
//! what gets serialized into the `user` storage key; reading it back goes
//! through [`RawUser`] again, so a profile cached by an older build still
//! loads.
//!
//! [`UserRef`] is the lightweight `{ id, name }` reference embedded in
//! projects and tasks, and [`UserDraft`] the create/edit form payload.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::wire::{enum_key, non_blank, opt_datetime, FromWire, Id};
use crate::validation::{ValidationErrors, MIN_PASSWORD_LEN};

/// Account role. Decides the navigation shell and which guarded sections
/// are reachable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Role {
    #[serde(rename = "ADMIN")]
    Admin,
    #[serde(rename = "CHEF_DE_PROJET")]
    ChefDeProjet,
    #[serde(rename = "DEVELOPPEUR")]
    Developpeur,
    #[serde(rename = "CLIENT")]
    Client,
    #[serde(rename = "STAGIAIRE")]
    Stagiaire,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Admin,
        Role::ChefDeProjet,
        Role::Developpeur,
        Role::Client,
        Role::Stagiaire,
    ];

    /// Canonical wire spelling.
    pub fn as_wire(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::ChefDeProjet => "CHEF_DE_PROJET",
            Role::Developpeur => "DEVELOPPEUR",
            Role::Client => "CLIENT",
            Role::Stagiaire => "STAGIAIRE",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Admin => "Administrator",
            Role::ChefDeProjet => "Project lead",
            Role::Developpeur => "Developer",
            Role::Client => "Client",
            Role::Stagiaire => "Intern",
        }
    }

    /// Landing page after login.
    pub fn home_path(&self) -> &'static str {
        match self {
            Role::Admin => "/admin/dashboard",
            Role::ChefDeProjet => "/chef/dashboard",
            Role::Developpeur | Role::Stagiaire => "/developer/dashboard",
            Role::Client => "/client/projects",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match enum_key(s).as_str() {
            "ADMIN" | "ADMINISTRATEUR" | "ADMINISTRATOR" => Ok(Role::Admin),
            "CHEF_DE_PROJET" | "CHEF_PROJET" | "CHEF" | "LEAD" | "PROJECT_LEAD"
            | "PROJECT_MANAGER" => Ok(Role::ChefDeProjet),
            "DEVELOPPEUR" | "DEVELOPER" | "DEV" => Ok(Role::Developpeur),
            "CLIENT" | "CUSTOMER" => Ok(Role::Client),
            "STAGIAIRE" | "INTERN" => Ok(Role::Stagiaire),
            _ => Err(format!("unknown role `{s}`")),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Canonical user profile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Id,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub department: Option<String>,
    pub job_title: Option<String>,
    pub phone: Option<String>,
    pub active: bool,
    pub created_at: Option<NaiveDateTime>,
}

impl User {
    /// "First Last" when both names are known, otherwise the username.
    pub fn display_name(&self) -> String {
        match (&self.first_name, &self.last_name) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(only), None) | (None, Some(only)) => only.clone(),
            (None, None) => self.username.clone(),
        }
    }

    /// Two-letter avatar initials.
    pub fn initials(&self) -> String {
        self.display_name()
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }

    pub fn to_ref(&self) -> UserRef {
        UserRef {
            id: self.id,
            name: self.display_name(),
        }
    }
}

/// Tolerant wire shape of a user.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawUser {
    #[serde(alias = "userId", alias = "_id")]
    pub id: Option<Id>,
    #[serde(alias = "login", alias = "userName")]
    pub username: Option<String>,
    #[serde(alias = "mail")]
    pub email: Option<String>,
    #[serde(alias = "userRole", alias = "roleName")]
    pub role: Option<String>,
    #[serde(alias = "prenom", alias = "firstname")]
    pub first_name: Option<String>,
    #[serde(alias = "nom", alias = "lastname")]
    pub last_name: Option<String>,
    #[serde(alias = "departement", alias = "service")]
    pub department: Option<String>,
    #[serde(alias = "poste", alias = "fonction", alias = "position")]
    pub job_title: Option<String>,
    #[serde(alias = "telephone", alias = "tel", alias = "phoneNumber")]
    pub phone: Option<String>,
    #[serde(alias = "enabled", alias = "actif", alias = "isActive")]
    pub active: Option<bool>,
    #[serde(alias = "dateCreation", alias = "created")]
    pub created_at: Option<Value>,
}

impl FromWire for User {
    type Raw = RawUser;

    fn from_wire(raw: RawUser) -> Result<Self, String> {
        let id = raw.id.ok_or("user without id")?;
        let role = raw
            .role
            .as_deref()
            .ok_or_else(|| format!("user {id} without role"))?
            .parse::<Role>()?;
        let email = non_blank(raw.email).unwrap_or_default();
        let username = non_blank(raw.username)
            .or_else(|| email.split('@').next().map(str::to_string).filter(|s| !s.is_empty()))
            .unwrap_or_else(|| format!("user-{id}"));

        Ok(User {
            id,
            username,
            email,
            role,
            first_name: non_blank(raw.first_name),
            last_name: non_blank(raw.last_name),
            department: non_blank(raw.department),
            job_title: non_blank(raw.job_title),
            phone: non_blank(raw.phone),
            active: raw.active.unwrap_or(true),
            created_at: opt_datetime(&raw.created_at),
        })
    }
}

/// `{ id, name }` reference to a user embedded in another entity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRef {
    pub id: Id,
    pub name: String,
}

/// Wire shape of an embedded user reference: a bare id or a partial user.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawUserRef {
    Id(Id),
    Object(RawUser),
}

impl RawUserRef {
    /// `None` when the reference carries no id.
    pub fn normalize(self) -> Option<UserRef> {
        match self {
            RawUserRef::Id(id) => Some(UserRef {
                id,
                name: format!("#{id}"),
            }),
            RawUserRef::Object(raw) => {
                let id = raw.id?;
                let first = non_blank(raw.first_name);
                let last = non_blank(raw.last_name);
                let name = match (first, last) {
                    (Some(f), Some(l)) => format!("{f} {l}"),
                    (Some(only), None) | (None, Some(only)) => only,
                    (None, None) => non_blank(raw.username)
                        .or_else(|| non_blank(raw.email))
                        .unwrap_or_else(|| format!("#{id}")),
                };
                Some(UserRef { id, name })
            }
        }
    }
}

/// Create/edit payload for the admin user form.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDraft {
    pub username: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub role: Role,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub department: Option<String>,
    pub job_title: Option<String>,
    pub phone: Option<String>,
    pub active: bool,
}

impl Default for UserDraft {
    fn default() -> Self {
        Self {
            username: String::new(),
            email: String::new(),
            password: None,
            role: Role::Developpeur,
            first_name: None,
            last_name: None,
            department: None,
            job_title: None,
            phone: None,
            active: true,
        }
    }
}

impl UserDraft {
    /// Pre-fill the form from an existing account. The password stays empty.
    pub fn from_user(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            email: user.email.clone(),
            password: None,
            role: user.role,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            department: user.department.clone(),
            job_title: user.job_title.clone(),
            phone: user.phone.clone(),
            active: user.active,
        }
    }

    /// New accounts need a password; edits keep the current one when blank.
    pub fn validate(&self, is_new: bool) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("username", "Username", &self.username);
        errors.email("email", &self.email);
        errors.phone("phone", self.phone.as_deref());
        match self.password.as_deref().map(str::trim) {
            Some(p) if !p.is_empty() && p.chars().count() < MIN_PASSWORD_LEN => errors.add(
                "password",
                format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
            ),
            Some(p) if !p.is_empty() => {}
            _ if is_new => errors.add("password", "Password is required"),
            _ => {}
        }
        errors.into_result()
    }

    /// Trim free-text fields and turn blanks into `None`.
    pub fn normalized(&self) -> Self {
        Self {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            password: non_blank(self.password.clone()),
            role: self.role,
            first_name: non_blank(self.first_name.clone()),
            last_name: non_blank(self.last_name.clone()),
            department: non_blank(self.department.clone()),
            job_title: non_blank(self.job_title.clone()),
            phone: non_blank(self.phone.clone()),
            active: self.active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn normalize(value: Value) -> Result<User, String> {
        User::from_wire(serde_json::from_value(value).unwrap())
    }

    #[test]
    fn test_role_aliases() {
        assert_eq!("CHEF_DE_PROJET".parse::<Role>(), Ok(Role::ChefDeProjet));
        assert_eq!("ROLE_ADMIN".parse::<Role>(), Ok(Role::Admin));
        assert_eq!("developer".parse::<Role>(), Ok(Role::Developpeur));
        assert_eq!("Stagiaire".parse::<Role>(), Ok(Role::Stagiaire));
        assert!("superuser".parse::<Role>().is_err());
    }

    #[test]
    fn test_normalize_french_admin_shape() {
        let user = normalize(json!({
            "id": 7,
            "email": "sara@example.com",
            "role": "ROLE_CHEF_DE_PROJET",
            "prenom": "Sara",
            "nom": "Ben Ali",
            "poste": "Lead",
            "actif": false,
            "dateCreation": [2024, 1, 15, 8, 0]
        }))
        .unwrap();

        assert_eq!(user.id, 7);
        assert_eq!(user.username, "sara");
        assert_eq!(user.role, Role::ChefDeProjet);
        assert_eq!(user.display_name(), "Sara Ben Ali");
        assert_eq!(user.initials(), "SB");
        assert_eq!(user.job_title.as_deref(), Some("Lead"));
        assert!(!user.active);
        assert!(user.created_at.is_some());
    }

    #[test]
    fn test_normalize_requires_id_and_role() {
        assert!(normalize(json!({ "username": "x", "role": "ADMIN" })).is_err());
        assert!(normalize(json!({ "id": 1, "username": "x" })).is_err());
        assert!(normalize(json!({ "id": 1, "username": "x", "role": "PIRATE" })).is_err());
    }

    #[test]
    fn test_canonical_roundtrip_through_raw() {
        let user = normalize(json!({
            "id": 3, "username": "dev", "email": "dev@example.com",
            "role": "DEVELOPPEUR", "jobTitle": "Backend", "phone": "+33 6 12 34 56 78"
        }))
        .unwrap();
        let text = serde_json::to_string(&user).unwrap();
        let back = User::from_wire(serde_json::from_str(&text).unwrap()).unwrap();
        assert_eq!(back, user);
    }

    #[test]
    fn test_user_ref_shapes() {
        let by_id: RawUserRef = serde_json::from_value(json!(12)).unwrap();
        assert_eq!(by_id.normalize().unwrap().name, "#12");

        let by_object: RawUserRef =
            serde_json::from_value(json!({ "id": 4, "username": "acme" })).unwrap();
        assert_eq!(
            by_object.normalize(),
            Some(UserRef { id: 4, name: "acme".to_string() })
        );

        let no_id: RawUserRef = serde_json::from_value(json!({ "username": "ghost" })).unwrap();
        assert!(no_id.normalize().is_none());
    }

    #[test]
    fn test_draft_validation() {
        let mut draft = UserDraft {
            username: "amine".to_string(),
            email: "amine@example.com".to_string(),
            ..UserDraft::default()
        };
        let errors = draft.validate(true).unwrap_err();
        assert_eq!(errors.for_field("password"), Some("Password is required"));
        assert!(draft.validate(false).is_ok());

        draft.password = Some("short".to_string());
        assert!(draft.validate(false).is_err());

        draft.password = Some("long-enough".to_string());
        draft.phone = Some("abc".to_string());
        let errors = draft.validate(true).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.for_field("phone").is_some());
    }
}

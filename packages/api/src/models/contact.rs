//! Contact / support requests ("réclamations") routed to administrators.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::wire::{enum_key, non_blank, opt_datetime, FromWire, Id};
use crate::validation::ValidationErrors;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum ContactCategory {
    #[serde(rename = "DEMANDE_ACCES")]
    AccessRequest,
    #[serde(rename = "BUG")]
    Bug,
    #[serde(rename = "QUESTION")]
    Question,
    #[serde(rename = "RECLAMATION")]
    Complaint,
    #[serde(rename = "AUTRE")]
    Other,
}

impl ContactCategory {
    pub const ALL: [ContactCategory; 5] = [
        ContactCategory::AccessRequest,
        ContactCategory::Bug,
        ContactCategory::Question,
        ContactCategory::Complaint,
        ContactCategory::Other,
    ];

    pub fn as_wire(&self) -> &'static str {
        match self {
            ContactCategory::AccessRequest => "DEMANDE_ACCES",
            ContactCategory::Bug => "BUG",
            ContactCategory::Question => "QUESTION",
            ContactCategory::Complaint => "RECLAMATION",
            ContactCategory::Other => "AUTRE",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ContactCategory::AccessRequest => "Access request",
            ContactCategory::Bug => "Bug report",
            ContactCategory::Question => "Question",
            ContactCategory::Complaint => "Complaint",
            ContactCategory::Other => "Other",
        }
    }
}

impl fmt::Display for ContactCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

impl FromStr for ContactCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match enum_key(s).as_str() {
            "DEMANDE_ACCES" | "ACCESS_REQUEST" | "ACCES" | "ACCESS" => {
                Ok(ContactCategory::AccessRequest)
            }
            "BUG" | "INCIDENT" | "PROBLEME_TECHNIQUE" => Ok(ContactCategory::Bug),
            "QUESTION" | "INFORMATION" => Ok(ContactCategory::Question),
            "RECLAMATION" | "COMPLAINT" => Ok(ContactCategory::Complaint),
            "AUTRE" | "OTHER" => Ok(ContactCategory::Other),
            _ => Err(format!("unknown contact category `{s}`")),
        }
    }
}

impl TryFrom<String> for ContactCategory {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Canonical support request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContactRequest {
    pub id: Id,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub user_id: Option<Id>,
    pub category: ContactCategory,
    pub subject: String,
    pub description: String,
    pub processed: bool,
    pub created_at: Option<NaiveDateTime>,
    pub processed_at: Option<NaiveDateTime>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawContactRequest {
    pub id: Option<Id>,
    #[serde(alias = "nom", alias = "fullName", alias = "nomComplet")]
    pub name: Option<String>,
    #[serde(alias = "mail")]
    pub email: Option<String>,
    #[serde(alias = "telephone")]
    pub phone: Option<String>,
    #[serde(alias = "utilisateurId")]
    pub user_id: Option<Id>,
    #[serde(alias = "categorie", alias = "type")]
    pub category: Option<String>,
    #[serde(alias = "sujet", alias = "objet")]
    pub subject: Option<String>,
    #[serde(alias = "message", alias = "contenu")]
    pub description: Option<String>,
    #[serde(alias = "traite", alias = "isProcessed", alias = "resolved")]
    pub processed: Option<bool>,
    #[serde(alias = "dateCreation", alias = "dateEnvoi")]
    pub created_at: Option<Value>,
    #[serde(alias = "dateTraitement")]
    pub processed_at: Option<Value>,
}

impl FromWire for ContactRequest {
    type Raw = RawContactRequest;

    fn from_wire(raw: RawContactRequest) -> Result<Self, String> {
        let id = raw.id.ok_or("contact request without id")?;
        let category = raw
            .category
            .as_deref()
            .and_then(|c| c.parse().ok())
            .unwrap_or(ContactCategory::Other);
        let processed_at = opt_datetime(&raw.processed_at);
        Ok(ContactRequest {
            id,
            name: non_blank(raw.name).unwrap_or_else(|| "Anonymous".to_string()),
            email: non_blank(raw.email).unwrap_or_default(),
            phone: non_blank(raw.phone),
            user_id: raw.user_id,
            category,
            subject: non_blank(raw.subject).unwrap_or_else(|| category.label().to_string()),
            description: raw.description.unwrap_or_default().trim().to_string(),
            processed: raw.processed.unwrap_or(processed_at.is_some()),
            created_at: opt_datetime(&raw.created_at),
            processed_at,
        })
    }
}

/// Payload of the contact form.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub user_id: Option<Id>,
    pub category: ContactCategory,
    pub subject: String,
    pub description: String,
}

impl Default for ContactDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            phone: None,
            user_id: None,
            category: ContactCategory::Question,
            subject: String::new(),
            description: String::new(),
        }
    }
}

/// Longest accepted description.
pub const MAX_DESCRIPTION_LEN: usize = 2000;

impl ContactDraft {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.require("name", "Name", &self.name);
        errors.email("email", &self.email);
        errors.phone("phone", self.phone.as_deref());
        errors.require("subject", "Subject", &self.subject);
        if errors.require("description", "Description", &self.description)
            && self.description.chars().count() > MAX_DESCRIPTION_LEN
        {
            errors.add(
                "description",
                format!("Description cannot exceed {MAX_DESCRIPTION_LEN} characters"),
            );
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_processed_from_timestamp() {
        let raw: RawContactRequest = serde_json::from_value(json!({
            "id": 1,
            "nom": "Karim",
            "email": "karim@example.com",
            "categorie": "SUGGESTION",
            "message": "Please open my account",
            "dateTraitement": "2024-02-02T10:00:00"
        }))
        .unwrap();
        let request = ContactRequest::from_wire(raw).unwrap();
        assert!(request.processed);
        assert_eq!(request.subject, "Other");
        assert_eq!(request.category, ContactCategory::Other);
    }

    #[test]
    fn test_category_wire_names() {
        assert_eq!("demande_acces".parse(), Ok(ContactCategory::AccessRequest));
        assert_eq!("Réclamation".parse(), Ok(ContactCategory::Complaint));
        let value = serde_json::to_value(ContactCategory::Bug).unwrap();
        assert_eq!(value, json!("BUG"));
    }

    #[test]
    fn test_draft_validation() {
        let draft = ContactDraft {
            name: "Nour".to_string(),
            email: "nour@example".to_string(),
            subject: "Access".to_string(),
            description: "x".repeat(MAX_DESCRIPTION_LEN + 1),
            ..ContactDraft::default()
        };
        let errors = draft.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.for_field("email").is_some());
        assert!(errors.for_field("description").is_some());
    }
}

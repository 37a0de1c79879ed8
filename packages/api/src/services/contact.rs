use serde_json::json;
use store::KeyValueStore;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{ContactDraft, ContactRequest, Id};
use crate::transport::{Method, Transport};

impl<T: Transport, S: KeyValueStore> ApiClient<T, S> {
    /// Public form; also used by signed-in clients.
    pub async fn submit_contact(&self, draft: &ContactDraft) -> Result<(), ApiError> {
        draft.validate()?;
        let body = serde_json::to_value(draft).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.send(Method::Post, "/contact", Some(body)).await?;
        tracing::info!("contact request sent ({})", draft.category);
        Ok(())
    }

    pub async fn contact_requests(&self) -> Result<Vec<ContactRequest>, ApiError> {
        self.get_list("/contact").await
    }

    pub async fn mark_contact_processed(&self, id: Id, processed: bool) -> Result<(), ApiError> {
        self.send(
            Method::Patch,
            &format!("/contact/{id}/processed"),
            Some(json!({ "processed": processed })),
        )
        .await
    }

    pub async fn delete_contact(&self, id: Id) -> Result<(), ApiError> {
        self.delete(&format!("/contact/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use crate::models::{ContactCategory, ContactDraft};
    use crate::services::testing::signed_in;
    use crate::transport::Method;
    use serde_json::json;

    #[tokio::test]
    async fn test_submit_contact() {
        let (client, mock) = signed_in();
        mock.on(Method::Post, "/contact", 201, "");
        let draft = ContactDraft {
            name: "Yasmine".to_string(),
            email: "yasmine@example.com".to_string(),
            category: ContactCategory::AccessRequest,
            subject: "Account".to_string(),
            description: "Please create my client account".to_string(),
            ..ContactDraft::default()
        };
        client.submit_contact(&draft).await.unwrap();
        let body = mock.last_request().unwrap().body.unwrap();
        assert_eq!(body["category"], "DEMANDE_ACCES");
    }

    #[tokio::test]
    async fn test_contact_list_and_process() {
        let (client, mock) = signed_in();
        mock.on_json(
            Method::Get,
            "/contact",
            json!([{ "id": 1, "email": "a@b.co", "traite": false, "categorie": "BUG" }]),
        );
        mock.on(Method::Patch, "/contact/1/processed", 204, "");
        let requests = client.contact_requests().await.unwrap();
        assert!(!requests[0].processed);
        client.mark_contact_processed(1, true).await.unwrap();
        assert_eq!(mock.count(Method::Patch, "/contact/1/processed"), 1);
    }
}

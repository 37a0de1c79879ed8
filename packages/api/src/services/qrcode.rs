use store::KeyValueStore;

use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{public_project_url, Id, QrCode};
use crate::transport::Transport;

impl<T: Transport, S: KeyValueStore> ApiClient<T, S> {
    /// Public page URL of a project, built from the configured share origin
    /// or, when none is set, the current page origin.
    pub fn project_share_url(&self, id: Id) -> String {
        public_project_url(&share_origin(self.public_base_url()), id)
    }

    /// `GET /qrcode/project/{id}`. The encoded URL falls back to
    /// [`Self::project_share_url`] when the backend omits it.
    pub async fn project_qr_code(&self, id: Id) -> Result<QrCode, ApiError> {
        let mut qr: QrCode = self.get(&format!("/qrcode/project/{id}")).await?;
        if qr.url.is_none() {
            qr.url = Some(self.project_share_url(id));
        }
        Ok(qr)
    }
}

fn share_origin(configured: &str) -> String {
    if !configured.trim().is_empty() {
        return configured.trim().to_string();
    }
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(origin) = web_sys::window().and_then(|w| w.location().origin().ok()) {
            return origin;
        }
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use crate::services::testing::signed_in;
    use crate::transport::Method;
    use serde_json::json;

    #[tokio::test]
    async fn test_qr_code_fills_url() {
        let (client, mock) = signed_in();
        let client = client.with_public_base_url("https://pm.example.com");
        mock.on_json(Method::Get, "/qrcode/project/5", json!("QUJD"));

        let qr = client.project_qr_code(5).await.unwrap();
        assert_eq!(qr.data_url, "data:image/png;base64,QUJD");
        assert_eq!(qr.url.as_deref(), Some("https://pm.example.com/public/projects/5"));
    }
}

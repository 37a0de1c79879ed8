//! # API client
//!
//! [`ApiClient`] is the single gateway to the backend. For every call it
//!
//! 1. reads the bearer token from the [`Session`] and attaches it,
//! 2. sends the request through its [`Transport`],
//! 3. on `401` clears the stored credentials and fires the unauthorized hook
//!    (the browser build navigates to the login page from there),
//! 4. maps other non-2xx answers to [`ApiError::Http`] with the server's
//!    message, and
//! 5. decodes the body into a canonical model through [`FromWire`].
//!
//! Domain operations live in `services/` as further `impl` blocks.

use std::rc::Rc;

use serde::Serialize;
use serde_json::Value;
use store::KeyValueStore;

use crate::cache::{AnalyticsCache, Clock, SystemClock, DEFAULT_ANALYTICS_TTL_SECS};
use crate::error::{ApiError, GENERIC_ERROR_MESSAGE};
use crate::models::{FromWire, ListEnvelope};
use crate::session::Session;
use crate::transport::{ApiRequest, ApiResponse, Method, Transport};

/// The login endpoint answers 401 for bad credentials; that is not a session expiry.
pub(crate) const LOGIN_ENDPOINT: &str = "/auth/login";

type UnauthorizedHook = Rc<dyn Fn()>;

pub struct ApiClient<T, S> {
    transport: T,
    session: Session<S>,
    analytics: Rc<AnalyticsCache>,
    on_unauthorized: Option<UnauthorizedHook>,
    public_base_url: String,
}

impl<T: Transport, S: KeyValueStore> ApiClient<T, S> {
    pub fn new(transport: T, store: S) -> Self {
        Self {
            transport,
            session: Session::new(store),
            analytics: Rc::new(AnalyticsCache::new(
                DEFAULT_ANALYTICS_TTL_SECS,
                Rc::new(SystemClock),
            )),
            on_unauthorized: None,
            public_base_url: String::new(),
        }
    }

    /// Replace the analytics cache lifetime and clock.
    pub fn with_analytics_cache(mut self, ttl_secs: u64, clock: Rc<dyn Clock>) -> Self {
        self.analytics = Rc::new(AnalyticsCache::new(ttl_secs, clock));
        self
    }

    /// Origin used for shared public project links. Empty means the page origin.
    pub fn with_public_base_url(mut self, url: impl Into<String>) -> Self {
        self.public_base_url = url.into();
        self
    }

    /// Called after a 401 has cleared the session.
    pub fn on_unauthorized(mut self, hook: impl Fn() + 'static) -> Self {
        self.on_unauthorized = Some(Rc::new(hook));
        self
    }

    pub fn session(&self) -> &Session<S> {
        &self.session
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn analytics_cache(&self) -> &AnalyticsCache {
        &self.analytics
    }

    pub(crate) fn public_base_url(&self) -> &str {
        &self.public_base_url
    }

    /// Send a request and check its status. The body is left undecoded.
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        query: Vec<(String, String)>,
        body: Option<Value>,
    ) -> Result<ApiResponse, ApiError> {
        let request = ApiRequest {
            method,
            path: path.to_string(),
            query,
            body,
            bearer: self.session.token()?,
        };
        tracing::debug!("{method} {path}");
        let response = self.transport.send(request).await.inspect_err(|e| {
            tracing::warn!("{method} {path} failed: {e}");
        })?;

        if response.status == 401 && path != LOGIN_ENDPOINT {
            self.handle_unauthorized();
            return Err(ApiError::Unauthorized);
        }
        if !response.is_success() {
            let message = server_message(&response.body)
                .unwrap_or_else(|| GENERIC_ERROR_MESSAGE.to_string());
            tracing::warn!("{method} {path} -> {}: {message}", response.status);
            return Err(ApiError::Http {
                status: response.status,
                message,
            });
        }
        Ok(response)
    }

    fn handle_unauthorized(&self) {
        tracing::info!("401 received, clearing session");
        if let Err(e) = self.session.clear() {
            tracing::error!("failed to clear session after 401: {e}");
        }
        self.analytics.invalidate();
        if let Some(hook) = &self.on_unauthorized {
            hook();
        }
    }

    pub async fn fetch<M: FromWire>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<M, ApiError> {
        let response = self.execute(method, path, Vec::new(), body).await?;
        decode(&response.body)
    }

    pub async fn get<M: FromWire>(&self, path: &str) -> Result<M, ApiError> {
        self.fetch(Method::Get, path, None).await
    }

    pub async fn get_with_query<M: FromWire>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> Result<M, ApiError> {
        let response = self.execute(Method::Get, path, query, None).await?;
        decode(&response.body)
    }

    /// GET a collection. Items that cannot be normalized are skipped.
    pub async fn get_list<M: FromWire>(&self, path: &str) -> Result<Vec<M>, ApiError> {
        let response = self.execute(Method::Get, path, Vec::new(), None).await?;
        decode_list(&response.body)
    }

    pub async fn post<M: FromWire>(&self, path: &str, body: &impl Serialize) -> Result<M, ApiError> {
        self.fetch(Method::Post, path, Some(to_json(body)?)).await
    }

    pub async fn put<M: FromWire>(&self, path: &str, body: &impl Serialize) -> Result<M, ApiError> {
        self.fetch(Method::Put, path, Some(to_json(body)?)).await
    }

    pub async fn patch<M: FromWire>(&self, path: &str, body: &impl Serialize) -> Result<M, ApiError> {
        self.fetch(Method::Patch, path, Some(to_json(body)?)).await
    }

    /// Call whose response body is ignored.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<(), ApiError> {
        self.execute(method, path, Vec::new(), body).await?;
        Ok(())
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.send(Method::Delete, path, None).await
    }
}

fn to_json(body: &impl Serialize) -> Result<Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))
}

pub(crate) fn decode<M: FromWire>(body: &str) -> Result<M, ApiError> {
    let raw: M::Raw = serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    M::from_wire(raw).map_err(ApiError::Decode)
}

pub(crate) fn decode_list<M: FromWire>(body: &str) -> Result<Vec<M>, ApiError> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    // Items are decoded one by one so a single malformed entry is dropped
    // instead of failing the whole list.
    let envelope: ListEnvelope<Value> =
        serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))?;
    Ok(envelope
        .into_vec()
        .into_iter()
        .filter_map(|item| {
            let decoded = serde_json::from_value::<M::Raw>(item)
                .map_err(|e| e.to_string())
                .and_then(M::from_wire);
            match decoded {
                Ok(item) => Some(item),
                Err(e) => {
                    tracing::warn!("skipping list item: {e}");
                    None
                }
            }
        })
        .collect())
}

/// Message carried by an error body: `message`, `error` or `detail`, or the
/// raw text when it is not JSON.
pub fn server_message(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(map)) => ["message", "error", "detail"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str))
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string),
        Ok(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Ok(_) => None,
        Err(_) if body.starts_with('<') => None,
        Err(_) => Some(body.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockTransport;
    use crate::models::{Project, Task};
    use serde_json::json;
    use std::cell::Cell;
    use store::{MemoryStore, TOKEN_KEY, USER_KEY};

    fn client() -> (ApiClient<MockTransport, MemoryStore>, MockTransport, MemoryStore) {
        let mock = MockTransport::new();
        let store = MemoryStore::new();
        (ApiClient::new(mock.clone(), store.clone()), mock, store)
    }

    #[test]
    fn test_server_message() {
        assert_eq!(server_message(r#"{"message":"Projet introuvable"}"#).as_deref(), Some("Projet introuvable"));
        assert_eq!(server_message(r#"{"error":"Forbidden","status":403}"#).as_deref(), Some("Forbidden"));
        assert_eq!(server_message(r#"{"detail":" bad "}"#).as_deref(), Some("bad"));
        assert_eq!(server_message("plain text").as_deref(), Some("plain text"));
        assert_eq!(server_message("<html>502</html>"), None);
        assert_eq!(server_message(r#"{"status":500}"#), None);
        assert_eq!(server_message(""), None);
    }

    #[tokio::test]
    async fn test_bearer_injected_when_token_present() {
        let (client, mock, store) = client();
        mock.on_json(Method::Get, "/projects", json!([]));

        client.get_list::<Project>("/projects").await.unwrap();
        assert_eq!(mock.last_request().unwrap().bearer, None);

        store.set(TOKEN_KEY, "abc").unwrap();
        client.get_list::<Project>("/projects").await.unwrap();
        assert_eq!(mock.last_request().unwrap().bearer.as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn test_401_clears_session_and_fires_hook() {
        let (client, mock, store) = client();
        let fired = Rc::new(Cell::new(0));
        let counter = Rc::clone(&fired);
        let client = client.on_unauthorized(move || counter.set(counter.get() + 1));
        store.set(TOKEN_KEY, "expired").unwrap();
        store.set(USER_KEY, "{}").unwrap();
        mock.on(Method::Get, "/task/developer/me", 401, "");

        let err = client.get_list::<Task>("/task/developer/me").await.unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
        assert_eq!(store.get(USER_KEY).unwrap(), None);
        assert_eq!(fired.get(), 1);
    }

    #[tokio::test]
    async fn test_http_error_carries_server_message() {
        let (client, mock, store) = client();
        store.set(TOKEN_KEY, "t").unwrap();
        mock.on(Method::Delete, "/projects/4", 409, r#"{"message":"Project has tasks"}"#);

        let err = client.delete("/projects/4").await.unwrap_err();
        assert_eq!(
            err,
            ApiError::Http {
                status: 409,
                message: "Project has tasks".to_string()
            }
        );
        assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("t"));
    }

    #[tokio::test]
    async fn test_list_envelopes_and_bad_items() {
        let (client, mock, _) = client();
        mock.on_json(
            Method::Get,
            "/projects",
            json!({ "content": [{ "id": 1, "titre": "A" }, { "titre": "no id" }] }),
        );
        let projects = client.get_list::<Project>("/projects").await.unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].title, "A");
    }

    #[tokio::test]
    async fn test_wrongly_typed_item_is_skipped() {
        let (client, mock, _) = client();
        mock.on_json(
            Method::Get,
            "/projects",
            json!([{ "id": 1, "title": "A" }, { "id": 2, "title": "B", "client": "Acme" }]),
        );
        let projects = client.get_list::<Project>("/projects").await.unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].id, 1);
    }

    #[test]
    fn test_list_body_that_is_not_a_list() {
        assert!(matches!(decode_list::<Project>(r#"{"id":1}"#), Err(ApiError::Decode(_))));
        assert!(decode_list::<Project>("  ").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_decode_error() {
        let (client, mock, _) = client();
        mock.on(Method::Get, "/projects/1", 200, "not json");
        let err = client.get::<Project>("/projects/1").await.unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}

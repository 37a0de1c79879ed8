//! In-memory [`Transport`] for tests.
//!
//! Replies are queued per `(method, path)`. The last queued reply for a route
//! keeps answering once the others are used up, so a route registered once
//! serves any number of calls. Unregistered routes answer 404.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use serde_json::Value;

use crate::error::ApiError;
use crate::transport::{ApiRequest, ApiResponse, Method, Transport};

#[derive(Clone, Debug)]
enum Reply {
    Response(ApiResponse),
    NetworkFailure,
}

#[derive(Default)]
struct MockState {
    routes: HashMap<(Method, String), VecDeque<Reply>>,
    requests: Vec<ApiRequest>,
}

#[derive(Clone, Default)]
pub struct MockTransport {
    state: Rc<RefCell<MockState>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a raw reply for `method path`.
    pub fn on(&self, method: Method, path: &str, status: u16, body: &str) -> &Self {
        self.push(
            method,
            path,
            Reply::Response(ApiResponse {
                status,
                body: body.to_string(),
            }),
        )
    }

    /// Queue a `200` JSON reply.
    pub fn on_json(&self, method: Method, path: &str, body: Value) -> &Self {
        self.on(method, path, 200, &body.to_string())
    }

    /// Queue a transport-level failure.
    pub fn fail_network(&self, method: Method, path: &str) -> &Self {
        self.push(method, path, Reply::NetworkFailure)
    }

    fn push(&self, method: Method, path: &str, reply: Reply) -> &Self {
        self.state
            .borrow_mut()
            .routes
            .entry((method, path.to_string()))
            .or_default()
            .push_back(reply);
        self
    }

    /// Every request sent so far, oldest first.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.state.borrow().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.state.borrow().requests.len()
    }

    /// Number of requests sent to `method path`.
    pub fn count(&self, method: Method, path: &str) -> usize {
        self.state
            .borrow()
            .requests
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        self.state.borrow().requests.last().cloned()
    }
}

impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let mut state = self.state.borrow_mut();
        let key = (request.method, request.path.clone());
        state.requests.push(request);
        let reply = match state.routes.get_mut(&key) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        };
        match reply {
            Some(Reply::Response(response)) => Ok(response),
            Some(Reply::NetworkFailure) => Err(ApiError::Network("connection refused".to_string())),
            None => Ok(ApiResponse {
                status: 404,
                body: String::new(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn get(path: &str) -> ApiRequest {
        ApiRequest {
            method: Method::Get,
            path: path.to_string(),
            query: Vec::new(),
            body: None,
            bearer: None,
        }
    }

    #[tokio::test]
    async fn test_queue_then_repeat_last() {
        let mock = MockTransport::new();
        mock.on(Method::Get, "/x", 500, "")
            .on_json(Method::Get, "/x", json!({ "ok": true }));

        assert_eq!(mock.send(get("/x")).await.unwrap().status, 500);
        assert_eq!(mock.send(get("/x")).await.unwrap().status, 200);
        assert_eq!(mock.send(get("/x")).await.unwrap().status, 200);
        assert_eq!(mock.send(get("/missing")).await.unwrap().status, 404);
        assert_eq!(mock.count(Method::Get, "/x"), 3);
    }

    #[tokio::test]
    async fn test_network_failure() {
        let mock = MockTransport::new();
        mock.fail_network(Method::Get, "/down");
        let err = mock.send(get("/down")).await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
    }
}

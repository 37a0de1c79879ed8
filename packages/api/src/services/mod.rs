//! Domain operations, one method per backend endpoint, as `impl ApiClient`
//! blocks grouped by resource.

mod analytics;
mod auth;
mod contact;
mod dashboard;
mod projects;
mod qrcode;
mod tasks;
mod users;

#[cfg(test)]
pub(crate) mod testing {
    use crate::client::ApiClient;
    use crate::mock::MockTransport;
    use store::{KeyValueStore, MemoryStore, TOKEN_KEY};

    /// Client with a signed-in token over a fresh mock.
    pub fn signed_in() -> (ApiClient<MockTransport, MemoryStore>, MockTransport) {
        let mock = MockTransport::new();
        let store = MemoryStore::new();
        store.set(TOKEN_KEY, "token").expect("memory store");
        (ApiClient::new(mock.clone(), store), mock)
    }
}

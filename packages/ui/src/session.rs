//! Session context and API client provider.
//!
//! [`SessionProvider`] owns the one [`AppClient`] of the application and a
//! [`Signal<SessionState>`] mirroring the signed-in user. Pages reach both
//! through [`use_api`] and [`use_session`] instead of touching storage.

use std::rc::Rc;

use api::{ApiClient, HttpTransport, User, LOGIN_PATH};
use dioxus::prelude::*;
use store::AppConfig;

/// Key-value backend for the current platform.
#[cfg(all(target_arch = "wasm32", feature = "web"))]
pub type PlatformStore = store::LocalStorageStore;
#[cfg(not(all(target_arch = "wasm32", feature = "web")))]
pub type PlatformStore = store::MemoryStore;

pub type AppClient = ApiClient<HttpTransport, PlatformStore>;

/// Signed-in user as seen by the UI.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SessionState {
    pub user: Option<User>,
}

fn platform_store() -> PlatformStore {
    #[cfg(all(target_arch = "wasm32", feature = "web"))]
    {
        store::LocalStorageStore
    }
    #[cfg(not(all(target_arch = "wasm32", feature = "web")))]
    {
        store::MemoryStore::new()
    }
}

/// Build the platform client from configuration.
pub fn make_client(config: &AppConfig) -> AppClient {
    ApiClient::new(HttpTransport::new(config.api.base_url.clone()), platform_store())
        .with_analytics_cache(
            config.analytics_ttl_secs(),
            Rc::new(api::cache::SystemClock),
        )
        .with_public_base_url(config.share.public_base_url.clone())
}

/// Hard navigation to the login page; used where no router is in scope.
pub fn redirect_to_login() {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().set_href(LOGIN_PATH) {
                tracing::error!("redirect to {LOGIN_PATH} failed: {e:?}");
            }
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    tracing::info!("session ended, login required at {LOGIN_PATH}");
}

pub fn use_session() -> Signal<SessionState> {
    use_context::<Signal<SessionState>>()
}

pub fn use_api() -> Rc<AppClient> {
    use_context::<Rc<AppClient>>()
}

pub fn use_config() -> AppConfig {
    use_context::<AppConfig>()
}

/// Wrap the router with this component.
#[component]
pub fn SessionProvider(config: AppConfig, children: Element) -> Element {
    let (client, session) = use_hook(|| {
        let client = make_client(&config);
        let user = client.session().user().ok().flatten();
        let session = Signal::new(SessionState { user });
        // A 401 anywhere: storage is already cleared by the client.
        let client = client.on_unauthorized(move || {
            let mut session = session;
            session.set(SessionState::default());
            redirect_to_login();
        });
        (Rc::new(client), session)
    });

    use_context_provider(|| session);
    use_context_provider(|| client);
    use_context_provider(|| config.clone());

    rsx! {
        {children}
    }
}

/// Signs out locally and on the backend, then leaves for the login page.
#[component]
pub fn LogoutButton(
    #[props(default = "Log out".to_string())] label: String,
    #[props(default = "".to_string())] class: String,
) -> Element {
    let api = use_api();
    let mut session = use_session();
    let nav = use_navigator();

    let onclick = move |_| {
        let api = api.clone();
        async move {
            if let Err(e) = api.logout().await {
                tracing::error!("logout failed: {e}");
            }
            session.set(SessionState::default());
            nav.replace(LOGIN_PATH);
        }
    };

    rsx! {
        button {
            class: "{class}",
            onclick: onclick,
            "{label}"
        }
    }
}

//! Sharing a project link: the Web Share API when the browser has one,
//! otherwise a clipboard copy.

use dioxus::prelude::*;

use crate::icons::FaShareNodes;
use crate::toast::use_toast;
use crate::Icon;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared,
    Copied,
    /// The share sheet was dismissed.
    Cancelled,
    Unsupported,
}

impl ShareOutcome {
    pub fn message(&self) -> Option<&'static str> {
        match self {
            ShareOutcome::Shared => Some("Link shared"),
            ShareOutcome::Copied => Some("Link copied to clipboard"),
            ShareOutcome::Cancelled => None,
            ShareOutcome::Unsupported => Some("Sharing is not available in this browser"),
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod browser {
    use js_sys::{Function, Object, Promise, Reflect};
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;

    use super::ShareOutcome;

    fn method(target: &JsValue, name: &str) -> Option<Function> {
        Reflect::get(target, &JsValue::from_str(name))
            .ok()
            .and_then(|f| f.dyn_into::<Function>().ok())
    }

    async fn call_promise(target: &JsValue, f: &Function, arg: &JsValue) -> Result<JsValue, JsValue> {
        let promise: Promise = f.call1(target, arg)?.dyn_into()?;
        JsFuture::from(promise).await
    }

    pub async fn share(title: &str, url: &str) -> ShareOutcome {
        let Some(window) = web_sys::window() else {
            return ShareOutcome::Unsupported;
        };
        let navigator: JsValue = window.navigator().into();

        if let Some(share) = method(&navigator, "share") {
            let data = Object::new();
            let _ = Reflect::set(&data, &"title".into(), &title.into());
            let _ = Reflect::set(&data, &"url".into(), &url.into());
            return match call_promise(&navigator, &share, &data.into()).await {
                Ok(_) => ShareOutcome::Shared,
                Err(e) => {
                    tracing::debug!("share sheet closed: {e:?}");
                    ShareOutcome::Cancelled
                }
            };
        }

        let clipboard = Reflect::get(&navigator, &"clipboard".into()).unwrap_or(JsValue::UNDEFINED);
        if let Some(write_text) = method(&clipboard, "writeText") {
            match call_promise(&clipboard, &write_text, &url.into()).await {
                Ok(_) => return ShareOutcome::Copied,
                Err(e) => tracing::warn!("clipboard write failed: {e:?}"),
            }
        }
        ShareOutcome::Unsupported
    }
}

/// Share `url` through the platform share sheet or copy it.
pub async fn share_link(title: &str, url: &str) -> ShareOutcome {
    #[cfg(target_arch = "wasm32")]
    {
        browser::share(title, url).await
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        tracing::info!("share requested for {title}: {url}");
        ShareOutcome::Unsupported
    }
}

#[component]
pub fn ShareButton(title: String, url: String) -> Element {
    let toasts = use_toast();

    let onclick = move |_| {
        let title = title.clone();
        let url = url.clone();
        async move {
            let outcome = share_link(&title, &url).await;
            match outcome {
                ShareOutcome::Unsupported => toasts.error(outcome.message().unwrap_or_default()),
                _ => {
                    if let Some(message) = outcome.message() {
                        toasts.success(message);
                    }
                }
            }
        }
    };

    rsx! {
        button {
            class: "btn btn-secondary",
            onclick: onclick,
            Icon { icon: FaShareNodes, width: 14, height: 14 }
            span { "Share" }
        }
    }
}

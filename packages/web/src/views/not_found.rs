use dioxus::prelude::*;

use crate::Route;

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = segments.join("/");
    rsx! {
        div {
            class: "login-container",
            h1 { class: "page-title", "Page not found" }
            p { class: "stat-label", "Nothing lives at /{path}." }
            Link { to: Route::Root {}, "Back to the start page" }
        }
    }
}

use api::Role;
use dioxus::prelude::*;
use ui::format::today;
use ui::{use_query, ErrorBanner, LoadState, PageSkeleton};

use crate::views::common::SummaryPanel;
use crate::Route;

#[component]
pub fn DeveloperDashboard() -> Element {
    let summary = use_query(|api| async move {
        api.dashboard_summary(Role::Developpeur, today()).await
    });

    let body = match summary.state() {
        LoadState::Idle | LoadState::Loading => rsx! { PageSkeleton {} },
        LoadState::Failed(message) => rsx! {
            ErrorBanner { message, on_retry: move |_| summary.refresh() }
        },
        LoadState::Ready(data) => rsx! { SummaryPanel { summary: data } },
    };

    rsx! {
        div {
            class: "page",
            div {
                class: "page-header",
                h1 { class: "page-title", "My work" }
                Link { class: "btn btn-primary", to: Route::DeveloperTasks {}, "My tasks" }
            }
            {body}
        }
    }
}

use api::Role;
use dioxus::prelude::*;
use ui::format::today;
use ui::{use_query, use_session, ErrorBanner, LoadState, PageSkeleton};

use crate::views::common::SummaryPanel;
use crate::Route;

#[component]
pub fn ChefDashboard() -> Element {
    let session = use_session();
    let summary = use_query(move |api| {
        let role = session.read().user.as_ref().map_or(Role::ChefDeProjet, |u| u.role);
        async move { api.dashboard_summary(role, today()).await }
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
                h1 { class: "page-title", "Project lead dashboard" }
                div {
                    class: "toolbar",
                    Link { class: "btn btn-secondary", to: Route::ChefProjects {}, "All projects" }
                    Link { class: "btn btn-primary", to: Route::ProjectNew {}, "New project" }
                }
            }
            {body}
        }
    }
}

//! Pages reachable without signing in.

use api::{ContactCategory, Id};
use dioxus::prelude::*;
use ui::format::format_date;
use ui::{use_query, ErrorBanner, LoadState, PageSkeleton, ProgressBar, StatusBadge, TypeBadge};

use super::common::{use_param, StatCard};
use super::contact_form::ContactForm;
use crate::Route;

#[component]
pub fn PublicContact() -> Element {
    rsx! {
        div {
            class: "login-container",
            div {
                class: "card login-card",
                h1 { class: "page-title", "Request access" }
                p {
                    class: "stat-label",
                    "Tell us who you are and an administrator will create your account."
                }
                ContactForm { default_category: ContactCategory::AccessRequest }
                Link { to: Route::Login {}, "Back to sign in" }
            }
        }
    }
}

/// Target of the project QR code.
#[component]
pub fn PublicProject(id: Id) -> Element {
    let id = use_param(id);
    let query = use_query(move |api| {
        let id = id();
        async move { api.public_project(id).await }
    });

    let body = match query.state() {
        LoadState::Idle | LoadState::Loading => rsx! { PageSkeleton {} },
        LoadState::Failed(message) => rsx! {
            ErrorBanner { message, on_retry: move |_| query.refresh() }
        },
        LoadState::Ready(project) => rsx! {
            div {
                class: "page-header",
                h1 { class: "page-title", "{project.title}" }
                div {
                    class: "toolbar",
                    TypeBadge { project_type: project.project_type }
                    StatusBadge { status: project.status }
                }
            }
            if !project.description.is_empty() {
                p { "{project.description}" }
            }
            ProgressBar { value: f64::from(project.progression) }
            div {
                class: "card-grid",
                StatCard { label: "Start", value: format_date(project.start_date) }
                StatCard { label: "End", value: format_date(project.end_date) }
                StatCard {
                    label: "Tasks done",
                    value: format!("{} / {}", project.stats.done, project.stats.total),
                }
                if let Some(client) = project.client_name() {
                    StatCard { label: "Client", value: client.to_string() }
                }
            }
        },
    };

    rsx! {
        div {
            class: "page public-page",
            {body}
        }
    }
}

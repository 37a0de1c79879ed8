use api::Id;
use dioxus::prelude::*;
use futures::future::try_join;
use ui::format::format_date;
use ui::{
    use_api, use_query, ErrorBanner, LoadState, PageSkeleton, ProgressBar, ShareButton,
    StatusBadge, TypeBadge,
};

use crate::views::common::{use_param, StatCard};
use crate::Route;

#[component]
pub fn ClientProjectDetail(id: Id) -> Element {
    let api = use_api();
    let id = use_param(id);
    let data = use_query(move |api| {
        let id = id();
        async move { try_join(api.project(id), api.project_qr_code(id)).await }
    });

    let body = match data.state() {
        LoadState::Idle | LoadState::Loading => rsx! { PageSkeleton {} },
        LoadState::Failed(message) => rsx! {
            ErrorBanner { message, on_retry: move |_| data.refresh() }
        },
        LoadState::Ready((project, qr)) => {
            let share_url = qr.url.clone().unwrap_or_else(|| api.project_share_url(project.id));
            rsx! {
                div {
                    class: "page-header",
                    div {
                        h1 { class: "page-title", "{project.title}" }
                        div {
                            class: "toolbar",
                            TypeBadge { project_type: project.project_type }
                            StatusBadge { status: project.status }
                        }
                    }
                    ShareButton { title: project.title.clone(), url: share_url.clone() }
                }
                if !project.description.is_empty() {
                    p { "{project.description}" }
                }
                ProgressBar { value: f64::from(project.progression) }
                div {
                    class: "card-grid",
                    StatCard { label: "Start", value: format_date(project.start_date) }
                    StatCard { label: "Delivery", value: format_date(project.end_date) }
                    StatCard {
                        label: "Tasks done",
                        value: format!("{} / {}", project.stats.done, project.stats.total),
                        hint: format!("{} in progress", project.stats.in_progress),
                    }
                    if let Some(lead) = project.lead.clone() {
                        StatCard { label: "Project lead", value: lead.name }
                    }
                }
                div {
                    class: "card qr-card",
                    h3 { "Share this project" }
                    img { class: "qr-image", src: "{qr.data_url}", alt: "QR code for {project.title}" }
                    a { href: "{share_url}", target: "_blank", "{share_url}" }
                }
            }
        }
    };

    rsx! {
        div {
            class: "page",
            Link { to: Route::ClientProjects {}, "Back to my projects" }
            {body}
        }
    }
}

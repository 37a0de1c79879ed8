use api::ProjectStatus;
use dioxus::prelude::*;
use ui::format::{format_date, today};
use ui::{
    use_query, ErrorBanner, LoadState, ProgressBar, ProjectFilter, SearchInput, StatusBadge,
    TableSkeleton, TypeBadge,
};

use crate::views::common::EmptyState;
use crate::Route;

/// Cards for every project the signed-in client owns.
#[component]
pub fn ClientProjects() -> Element {
    let projects = use_query(|api| async move { api.client_projects().await });
    let mut filter = use_signal(ProjectFilter::default);

    let now = today();
    let body = match projects.state() {
        LoadState::Idle | LoadState::Loading => rsx! { TableSkeleton { rows: 3 } },
        LoadState::Failed(message) => rsx! {
            ErrorBanner { message, on_retry: move |_| projects.refresh() }
        },
        LoadState::Ready(list) => {
            let visible = filter.read().apply(&list);
            if visible.is_empty() {
                rsx! { EmptyState { message: "No project to show." } }
            } else {
                rsx! {
                    div {
                        class: "card-grid",
                        for project in visible {
                            div {
                                key: "{project.id}",
                                class: "card",
                                div {
                                    class: "page-header",
                                    Link {
                                        to: Route::ClientProjectDetail { id: project.id },
                                        strong { "{project.title}" }
                                    }
                                    StatusBadge { status: project.status }
                                }
                                TypeBadge { project_type: project.project_type }
                                ProgressBar { value: f64::from(project.progression) }
                                div {
                                    class: if project.is_overdue(now) { "stat-label field-error" } else { "stat-label" },
                                    "Delivery {format_date(project.end_date)}"
                                }
                                div {
                                    class: "stat-label",
                                    "{project.stats.done} of {project.stats.total} tasks done"
                                }
                            }
                        }
                    }
                }
            }
        }
    };

    rsx! {
        div {
            class: "page",
            div {
                class: "page-header",
                h1 { class: "page-title", "My projects" }
                Link { class: "btn btn-secondary", to: Route::ClientContact {}, "Contact us" }
            }
            div {
                class: "toolbar",
                SearchInput {
                    value: filter.read().search.clone(),
                    on_input: move |s| filter.write().search = s,
                }
                select {
                    onchange: move |e| filter.write().status = e.value().parse::<ProjectStatus>().ok(),
                    option { value: "", "All statuses" }
                    for status in ProjectStatus::ALL {
                        option { value: status.as_wire(), "{status.label()}" }
                    }
                }
            }
            {body}
        }
    }
}

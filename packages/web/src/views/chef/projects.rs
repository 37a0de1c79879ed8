use api::{Project, ProjectStatus, ProjectType, Role};
use dioxus::prelude::*;
use ui::format::{format_date, today};
use ui::{
    paginate, use_api, use_config, use_query, use_session, use_toast, ConfirmDialog, ErrorBanner,
    LoadState, Pagination, ProgressBar, ProjectFilter, SearchInput, StatusBadge, TableSkeleton,
    TypeBadge,
};

use crate::views::common::EmptyState;
use crate::Route;

#[component]
pub fn ChefProjects() -> Element {
    let api = use_api();
    let toasts = use_toast();
    let session = use_session();
    let page_size = use_config().page_size();
    let projects = use_query(move |api| {
        let is_admin = session.read().user.as_ref().is_some_and(|u| u.role == Role::Admin);
        async move {
            if is_admin {
                api.projects().await
            } else {
                api.chef_projects().await
            }
        }
    });
    let mut filter = use_signal(ProjectFilter::default);
    let mut page = use_signal(|| 0usize);
    let mut pending_delete = use_signal(|| None::<Project>);

    let confirm_delete = move |_| {
        let api = api.clone();
        let Some(project) = pending_delete() else {
            return;
        };
        pending_delete.set(None);
        projects.update(|list| list.retain(|p| p.id != project.id));
        spawn(async move {
            match api.delete_project(project.id).await {
                Ok(()) => toasts.success(format!("{} deleted", project.title)),
                Err(e) => {
                    toasts.error(e.user_message());
                    projects.refresh();
                }
            }
        });
    };

    let now = today();
    let body = match projects.state() {
        LoadState::Idle | LoadState::Loading => rsx! { TableSkeleton {} },
        LoadState::Failed(message) => rsx! {
            ErrorBanner { message, on_retry: move |_| projects.refresh() }
        },
        LoadState::Ready(list) => {
            let matching = filter.read().apply(&list);
            let total = matching.len();
            let rows = paginate(&matching, page(), page_size);
            if rows.is_empty() {
                rsx! { EmptyState { message: "No project matches these filters." } }
            } else {
                rsx! {
                    table {
                        class: "table",
                        thead {
                            tr {
                                th { "Project" }
                                th { "Client" }
                                th { "Type" }
                                th { "Status" }
                                th { "Progress" }
                                th { "Tasks" }
                                th { "Deadline" }
                                th {}
                            }
                        }
                        tbody {
                            for project in rows {
                                tr {
                                    key: "{project.id}",
                                    td {
                                        Link {
                                            to: Route::ProjectDetail { id: project.id },
                                            "{project.title}"
                                        }
                                    }
                                    td { "{project.client_name().unwrap_or_default()}" }
                                    td { TypeBadge { project_type: project.project_type } }
                                    td { StatusBadge { status: project.status } }
                                    td { ProgressBar { value: f64::from(project.progression) } }
                                    td { "{project.stats.done} / {project.stats.total}" }
                                    td {
                                        class: if project.is_overdue(now) { "field-error" } else { "" },
                                        "{format_date(project.end_date)}"
                                    }
                                    td {
                                        class: "toolbar",
                                        Link {
                                            class: "btn btn-secondary",
                                            to: Route::ProjectEdit { id: project.id },
                                            "Edit"
                                        }
                                        button {
                                            class: "btn btn-danger",
                                            onclick: {
                                                let project = project.clone();
                                                move |_| pending_delete.set(Some(project.clone()))
                                            },
                                            "Delete"
                                        }
                                    }
                                }
                            }
                        }
                    }
                    Pagination {
                        page: page(),
                        total,
                        page_size,
                        on_change: move |p| page.set(p),
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
                h1 { class: "page-title", "Projects" }
                Link { class: "btn btn-primary", to: Route::ProjectNew {}, "New project" }
            }
            div {
                class: "toolbar",
                SearchInput {
                    value: filter.read().search.clone(),
                    on_input: move |s| {
                        filter.write().search = s;
                        page.set(0);
                    },
                }
                select {
                    onchange: move |e| {
                        filter.write().status = e.value().parse::<ProjectStatus>().ok();
                        page.set(0);
                    },
                    option { value: "", "All statuses" }
                    for status in ProjectStatus::ALL {
                        option { value: status.as_wire(), "{status.label()}" }
                    }
                }
                select {
                    onchange: move |e| {
                        filter.write().project_type = e.value().parse::<ProjectType>().ok();
                        page.set(0);
                    },
                    option { value: "", "All types" }
                    for project_type in ProjectType::ALL {
                        option { value: project_type.as_wire(), "{project_type.label()}" }
                    }
                }
            }
            {body}
            if let Some(project) = pending_delete() {
                ConfirmDialog {
                    title: "Delete project",
                    message: format!("Delete {} and all of its tasks?", project.title),
                    on_confirm: confirm_delete,
                    on_cancel: move |_| pending_delete.set(None),
                }
            }
        }
    }
}

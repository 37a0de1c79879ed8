//! The signed-in developer's tasks across all projects.

use api::{Id, Priority, TaskStatus};
use dioxus::prelude::*;
use ui::format::{format_date, format_hours, today};
use ui::{
    format_elapsed, paginate, use_api, use_config, use_query, use_toast, ErrorBanner, LoadState,
    Pagination, PriorityBadge, SearchInput, TableSkeleton, TaskFilter, TaskStatusBadge, TaskTimer,
};

use crate::views::common::EmptyState;

#[component]
pub fn DeveloperTasks() -> Element {
    let api = use_api();
    let toasts = use_toast();
    let page_size = use_config().page_size();
    let tasks = use_query(|api| async move { api.my_tasks().await });
    let mut filter = use_signal(TaskFilter::default);
    let mut page = use_signal(|| 0usize);
    let mut timing = use_signal(|| None::<Id>);

    let change_status = move |(task_id, status): (Id, TaskStatus)| {
        let api = api.clone();
        tasks.update(|list| {
            if let Some(t) = list.iter_mut().find(|t| t.id == task_id) {
                t.status = status;
            }
        });
        spawn(async move {
            match api.update_task_status(task_id, status).await {
                Ok(task) => {
                    toasts.success(format!("{} is now {}", task.title, task.status.label()));
                    tasks.update(|list| {
                        if let Some(slot) = list.iter_mut().find(|t| t.id == task.id) {
                            *slot = task;
                        }
                    });
                }
                Err(e) => {
                    tracing::warn!("status change for task {task_id} failed: {e}");
                    toasts.error(e.user_message());
                    tasks.refresh();
                }
            }
        });
    };

    let now = today();
    let body = match tasks.state() {
        LoadState::Idle | LoadState::Loading => rsx! { TableSkeleton {} },
        LoadState::Failed(message) => rsx! {
            ErrorBanner { message, on_retry: move |_| tasks.refresh() }
        },
        LoadState::Ready(list) => {
            let matching = filter.read().apply(&list);
            let total = matching.len();
            let rows = paginate(&matching, page(), page_size);
            if rows.is_empty() {
                rsx! { EmptyState { message: "No task matches these filters." } }
            } else {
                rsx! {
                    table {
                        class: "table",
                        thead {
                            tr {
                                th { "Task" }
                                th { "Project" }
                                th { "Priority" }
                                th { "Status" }
                                th { "Hours" }
                                th { "Due" }
                                th {}
                            }
                        }
                        tbody {
                            for task in rows {
                                tr {
                                    key: "{task.id}",
                                    td {
                                        strong { "{task.title}" }
                                        if !task.description.is_empty() {
                                            div { class: "stat-label", "{task.description}" }
                                        }
                                    }
                                    td { "{task.project_title().unwrap_or_default()}" }
                                    td { PriorityBadge { priority: task.priority } }
                                    td {
                                        div {
                                            class: "toolbar",
                                            TaskStatusBadge { status: task.status }
                                            select {
                                                onchange: {
                                                    let change = change_status.clone();
                                                    let task_id = task.id;
                                                    move |e: FormEvent| {
                                                        if let Ok(s) = e.value().parse::<TaskStatus>() {
                                                            change((task_id, s));
                                                        }
                                                    }
                                                },
                                                for s in TaskStatus::ALL {
                                                    option { value: s.as_wire(), selected: s == task.status, "{s.label()}" }
                                                }
                                            }
                                        }
                                    }
                                    td { "{format_hours(task.effective_hours)} / {format_hours(task.planned_hours)}" }
                                    td {
                                        class: if task.is_overdue(now) { "field-error" } else { "" },
                                        "{format_date(task.end_date)}"
                                    }
                                    td {
                                        if timing() == Some(task.id) {
                                            TaskTimer {
                                                on_stop: {
                                                    let title = task.title.clone();
                                                    move |seconds: u64| {
                                                        timing.set(None);
                                                        toasts.info(format!(
                                                            "{} spent on {}",
                                                            format_elapsed(seconds),
                                                            title
                                                        ));
                                                    }
                                                },
                                            }
                                        } else {
                                            button {
                                                class: "btn btn-secondary",
                                                disabled: timing().is_some(),
                                                onclick: {
                                                    let task_id = task.id;
                                                    move |_| timing.set(Some(task_id))
                                                },
                                                "Track time"
                                            }
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
                h1 { class: "page-title", "My tasks" }
            }
            div {
                class: "toolbar",
                SearchInput {
                    value: filter.read().search.clone(),
                    on_input: move |s| {
                        filter.write().search = s;
                        page.set(0);
                    },
                    placeholder: "Search tasks…",
                }
                select {
                    onchange: move |e| {
                        filter.write().status = e.value().parse::<TaskStatus>().ok();
                        page.set(0);
                    },
                    option { value: "", "All statuses" }
                    for status in TaskStatus::ALL {
                        option { value: status.as_wire(), "{status.label()}" }
                    }
                }
                select {
                    onchange: move |e| {
                        filter.write().priority = e.value().parse::<Priority>().ok();
                        page.set(0);
                    },
                    option { value: "", "All priorities" }
                    for priority in Priority::ALL {
                        option { value: priority.as_wire(), "{priority.label()}" }
                    }
                }
            }
            {body}
        }
    }
}

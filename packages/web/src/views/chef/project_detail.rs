//! Project page with its task board.

use api::{Id, Priority, Task, TaskStats, TaskStatus};
use dioxus::prelude::*;
use futures::future::try_join;
use ui::format::{format_date, format_hours, today};
use ui::{
    use_api, use_query, use_toast, ConfirmDialog, ErrorBanner, LoadState, PageSkeleton,
    PriorityBadge, ProgressBar, SearchInput, StatusBadge, TaskFilter, TypeBadge,
};

use crate::views::common::{use_param, StatCard};
use crate::Route;

#[component]
pub fn ProjectDetail(id: Id) -> Element {
    let api = use_api();
    let toasts = use_toast();
    let id = use_param(id);
    let data = use_query(move |api| {
        let id = id();
        async move { try_join(api.project(id), api.project_tasks(id)).await }
    });
    let mut filter = use_signal(TaskFilter::default);
    let mut pending_delete = use_signal(|| None::<Task>);

    // Optimistic: move the card first, resync from the server on failure.
    let change_status = {
        let api = api.clone();
        move |(task_id, status): (Id, TaskStatus)| {
            let api = api.clone();
            data.update(|(project, tasks)| {
                if let Some(t) = tasks.iter_mut().find(|t| t.id == task_id) {
                    t.status = status;
                }
                project.stats = TaskStats::from_tasks(tasks);
            });
            spawn(async move {
                match api.update_task_status(task_id, status).await {
                    Ok(task) => {
                        toasts.success(format!("{} is now {}", task.title, task.status.label()));
                        data.update(|(_, tasks)| {
                            if let Some(slot) = tasks.iter_mut().find(|t| t.id == task.id) {
                                *slot = task;
                            }
                        });
                    }
                    Err(e) => {
                        toasts.error(e.user_message());
                        data.refresh();
                    }
                }
            });
        }
    };

    let confirm_delete = move |_| {
        let api = api.clone();
        let Some(task) = pending_delete() else {
            return;
        };
        pending_delete.set(None);
        data.update(|(project, tasks)| {
            tasks.retain(|t| t.id != task.id);
            project.stats = TaskStats::from_tasks(tasks);
        });
        spawn(async move {
            match api.delete_task(task.id).await {
                Ok(()) => toasts.success(format!("{} deleted", task.title)),
                Err(e) => {
                    toasts.error(e.user_message());
                    data.refresh();
                }
            }
        });
    };

    let now = today();
    let body = match data.state() {
        LoadState::Idle | LoadState::Loading => rsx! { PageSkeleton {} },
        LoadState::Failed(message) => rsx! {
            ErrorBanner { message, on_retry: move |_| data.refresh() }
        },
        LoadState::Ready((project, tasks)) => {
            let visible = filter.read().apply(&tasks);
            let team = project
                .developers
                .iter()
                .map(|d| d.name.clone())
                .collect::<Vec<_>>()
                .join(", ");
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
                    div {
                        class: "toolbar",
                        Link {
                            class: "btn btn-secondary",
                            to: Route::ProjectTeam { id: project.id },
                            "Team"
                        }
                        Link {
                            class: "btn btn-secondary",
                            to: Route::ProjectEdit { id: project.id },
                            "Edit"
                        }
                        Link {
                            class: "btn btn-primary",
                            to: Route::TaskNew { project_id: project.id },
                            "New task"
                        }
                    }
                }
                if !project.description.is_empty() {
                    p { "{project.description}" }
                }
                ProgressBar { value: f64::from(project.progression) }
                div {
                    class: "card-grid",
                    StatCard { label: "Client", value: project.client_name().unwrap_or("—").to_string() }
                    StatCard { label: "Start", value: format_date(project.start_date) }
                    StatCard { label: "End", value: format_date(project.end_date) }
                    StatCard {
                        label: "Tasks done",
                        value: format!("{} / {}", project.stats.done, project.stats.total),
                        hint: format!("{} blocked", project.stats.blocked),
                    }
                }
                p {
                    class: "stat-label",
                    if team.is_empty() { "No developer assigned yet." } else { "Team: {team}" }
                }
                div {
                    class: "toolbar",
                    SearchInput {
                        value: filter.read().search.clone(),
                        on_input: move |s| filter.write().search = s,
                        placeholder: "Search tasks…",
                    }
                    select {
                        onchange: move |e| filter.write().priority = e.value().parse::<Priority>().ok(),
                        option { value: "", "All priorities" }
                        for priority in Priority::ALL {
                            option { value: priority.as_wire(), "{priority.label()}" }
                        }
                    }
                }
                div {
                    class: "task-board",
                    for status in TaskStatus::ALL {
                        div {
                            key: "{status.as_wire()}",
                            class: "task-column",
                            h3 { "{status.label()}" }
                            for task in visible.iter().filter(|t| t.status == status).cloned() {
                                div {
                                    key: "{task.id}",
                                    class: "card task-card",
                                    div {
                                        class: "page-header",
                                        strong { "{task.title}" }
                                        PriorityBadge { priority: task.priority }
                                    }
                                    if let Some(name) = task.assignee_name() {
                                        div { class: "stat-label", "{name}" }
                                    } else {
                                        div { class: "stat-label", "Unassigned" }
                                    }
                                    div {
                                        class: if task.is_overdue(now) { "stat-label field-error" } else { "stat-label" },
                                        "Due {format_date(task.end_date)} · {format_hours(task.effective_hours)} / {format_hours(task.planned_hours)}"
                                    }
                                    div {
                                        class: "toolbar",
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
                                        Link {
                                            class: "btn btn-secondary",
                                            to: Route::TaskEdit { project_id: project.id, id: task.id },
                                            "Edit"
                                        }
                                        button {
                                            class: "btn btn-danger",
                                            onclick: {
                                                let task = task.clone();
                                                move |_| pending_delete.set(Some(task.clone()))
                                            },
                                            "Delete"
                                        }
                                    }
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
            {body}
            if let Some(task) = pending_delete() {
                ConfirmDialog {
                    title: "Delete task",
                    message: format!("Delete {}?", task.title),
                    on_confirm: confirm_delete,
                    on_cancel: move |_| pending_delete.set(None),
                }
            }
        }
    }
}

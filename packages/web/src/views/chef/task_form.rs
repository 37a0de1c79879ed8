use api::{Id, Priority, Task, TaskDraft, TaskStatus, UserRef, ValidationErrors};
use dioxus::prelude::*;
use futures::future::try_join;
use ui::format::{date_input_value, parse_date_input};
use ui::{use_api, use_query, use_toast, ErrorBanner, LoadState, PageSkeleton};

use crate::views::common::{report_submit_error, use_param, FieldHint};
use crate::Route;

#[component]
pub fn TaskNew(project_id: Id) -> Element {
    let project_id = use_param(project_id);
    let project = use_query(move |api| {
        let id = project_id();
        async move { api.project(id).await }
    });

    rsx! {
        div {
            class: "page",
            h1 { class: "page-title", "New task" }
            {match project.state() {
                LoadState::Idle | LoadState::Loading => rsx! { PageSkeleton {} },
                LoadState::Failed(message) => rsx! {
                    ErrorBanner { message, on_retry: move |_| project.refresh() }
                },
                LoadState::Ready(owner) => rsx! {
                    p { class: "stat-label", "Project: {owner.title}" }
                    TaskForm { key: "{owner.id}", project_id: owner.id, team: owner.developers }
                },
            }}
        }
    }
}

#[component]
pub fn TaskEdit(project_id: Id, id: Id) -> Element {
    let ids = use_param((project_id, id));
    let data = use_query(move |api| {
        let (project_id, id) = ids();
        async move { try_join(api.project(project_id), api.task(id)).await }
    });

    rsx! {
        div {
            class: "page",
            h1 { class: "page-title", "Edit task" }
            {match data.state() {
                LoadState::Idle | LoadState::Loading => rsx! { PageSkeleton {} },
                LoadState::Failed(message) => rsx! {
                    ErrorBanner { message, on_retry: move |_| data.refresh() }
                },
                LoadState::Ready((owner, task)) => rsx! {
                    p { class: "stat-label", "Project: {owner.title}" }
                    TaskForm { key: "{task.id}", project_id: owner.id, team: owner.developers, existing: task }
                },
            }}
        }
    }
}

#[component]
fn TaskForm(project_id: Id, team: Vec<UserRef>, existing: Option<Task>) -> Element {
    let api = use_api();
    let toasts = use_toast();
    let nav = use_navigator();
    let editing = existing.as_ref().map(|t| t.id);
    let mut draft = use_signal(|| match &existing {
        Some(task) => TaskDraft::from_task(task, project_id),
        None => TaskDraft::new(project_id),
    });
    let field_errors = use_signal(|| None::<ValidationErrors>);
    let mut submitting = use_signal(|| false);

    // Keep a departed assignee selectable so editing does not drop them.
    let mut assignees = team.clone();
    if let Some(current) = existing.as_ref().and_then(|t| t.assignee.clone()) {
        if !assignees.iter().any(|a| a.id == current.id) {
            assignees.push(current);
        }
    }

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let api = api.clone();
        async move {
            if submitting() {
                return;
            }
            submitting.set(true);
            let current = draft();
            let result = match editing {
                Some(id) => api.update_task(id, &current).await,
                None => api.create_task(&current).await,
            };
            match result {
                Ok(task) => {
                    toasts.success(format!("{} saved", task.title));
                    nav.push(Route::ProjectDetail { id: project_id });
                }
                Err(e) => report_submit_error(toasts, field_errors, e),
            }
            submitting.set(false);
        }
    };

    let d = draft.read().clone();

    rsx! {
        form {
            class: "form",
            onsubmit: onsubmit,
            div {
                class: "field",
                label { "Title" }
                input {
                    value: "{d.title}",
                    oninput: move |e| draft.write().title = e.value(),
                }
                FieldHint { errors: field_errors(), field: "title" }
            }
            div {
                class: "field",
                label { "Description" }
                textarea {
                    rows: "4",
                    value: "{d.description}",
                    oninput: move |e| draft.write().description = e.value(),
                }
            }
            div {
                class: "field",
                label { "Status" }
                select {
                    onchange: move |e| {
                        if let Ok(s) = e.value().parse::<TaskStatus>() {
                            draft.write().status = s;
                        }
                    },
                    for s in TaskStatus::ALL {
                        option { value: s.as_wire(), selected: d.status == s, "{s.label()}" }
                    }
                }
            }
            div {
                class: "field",
                label { "Priority" }
                select {
                    onchange: move |e| {
                        if let Ok(p) = e.value().parse::<Priority>() {
                            draft.write().priority = p;
                        }
                    },
                    for p in Priority::ALL {
                        option { value: p.as_wire(), selected: d.priority == p, "{p.label()}" }
                    }
                }
            }
            div {
                class: "field",
                label { "Assignee" }
                select {
                    onchange: move |e| draft.write().assignee_id = e.value().parse::<Id>().ok(),
                    option { value: "", selected: d.assignee_id.is_none(), "Unassigned" }
                    for member in assignees.iter() {
                        option {
                            key: "{member.id}",
                            value: "{member.id}",
                            selected: d.assignee_id == Some(member.id),
                            "{member.name}"
                        }
                    }
                }
                if team.is_empty() {
                    span {
                        class: "stat-label",
                        "Assign developers to the project to pick an assignee."
                    }
                }
            }
            div {
                class: "field",
                label { "Planned hours" }
                input {
                    r#type: "number",
                    step: "0.5",
                    value: "{d.planned_hours}",
                    oninput: move |e| {
                        draft.write().planned_hours = e.value().trim().parse().unwrap_or(0.0);
                    },
                }
                FieldHint { errors: field_errors(), field: "planned_hours" }
            }
            div {
                class: "field",
                label { "Effective hours" }
                input {
                    r#type: "number",
                    step: "0.5",
                    value: "{d.effective_hours}",
                    oninput: move |e| {
                        draft.write().effective_hours = e.value().trim().parse().unwrap_or(0.0);
                    },
                }
                FieldHint { errors: field_errors(), field: "effective_hours" }
            }
            div {
                class: "field",
                label { "Start date" }
                input {
                    r#type: "date",
                    value: "{date_input_value(d.start_date)}",
                    oninput: move |e| draft.write().start_date = parse_date_input(&e.value()),
                }
            }
            div {
                class: "field",
                label { "End date" }
                input {
                    r#type: "date",
                    value: "{date_input_value(d.end_date)}",
                    oninput: move |e| draft.write().end_date = parse_date_input(&e.value()),
                }
                FieldHint { errors: field_errors(), field: "end_date" }
            }
            div {
                class: "toolbar",
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: submitting(),
                    "Save"
                }
                Link {
                    class: "btn btn-secondary",
                    to: Route::ProjectDetail { id: project_id },
                    "Cancel"
                }
            }
        }
    }
}

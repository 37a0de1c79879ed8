use api::{Id, Project, ProjectDraft, ProjectStatus, ProjectType, Role, User, ValidationErrors};
use dioxus::prelude::*;
use futures::future::try_join;
use ui::format::{date_input_value, parse_date_input};
use ui::{use_api, use_query, use_toast, ErrorBanner, LoadState, PageSkeleton};

use crate::views::common::{report_submit_error, use_param, FieldHint};
use crate::Route;

#[component]
pub fn ProjectNew() -> Element {
    let clients = use_query(|api| async move { api.users_by_role(Role::Client).await });

    rsx! {
        div {
            class: "page",
            h1 { class: "page-title", "New project" }
            {match clients.state() {
                LoadState::Idle | LoadState::Loading => rsx! { PageSkeleton {} },
                LoadState::Failed(message) => rsx! {
                    ErrorBanner { message, on_retry: move |_| clients.refresh() }
                },
                LoadState::Ready(clients) => rsx! { ProjectForm { clients } },
            }}
        }
    }
}

#[component]
pub fn ProjectEdit(id: Id) -> Element {
    let id = use_param(id);
    let data = use_query(move |api| {
        let id = id();
        async move { try_join(api.project(id), api.users_by_role(Role::Client)).await }
    });

    rsx! {
        div {
            class: "page",
            h1 { class: "page-title", "Edit project" }
            {match data.state() {
                LoadState::Idle | LoadState::Loading => rsx! { PageSkeleton {} },
                LoadState::Failed(message) => rsx! {
                    ErrorBanner { message, on_retry: move |_| data.refresh() }
                },
                LoadState::Ready((project, clients)) => rsx! {
                    ProjectForm { key: "{project.id}", existing: project, clients }
                },
            }}
        }
    }
}

#[component]
fn ProjectForm(existing: Option<Project>, clients: Vec<User>) -> Element {
    let api = use_api();
    let toasts = use_toast();
    let nav = use_navigator();
    let editing = existing.as_ref().map(|p| p.id);
    let mut draft = use_signal(|| {
        existing
            .as_ref()
            .map(ProjectDraft::from_project)
            .unwrap_or_default()
    });
    let field_errors = use_signal(|| None::<ValidationErrors>);
    let mut submitting = use_signal(|| false);

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
                Some(id) => api.update_project(id, &current).await,
                None => api.create_project(&current).await,
            };
            match result {
                Ok(project) => {
                    toasts.success(format!("{} saved", project.title));
                    nav.push(Route::ProjectDetail { id: project.id });
                }
                Err(e) => report_submit_error(toasts, field_errors, e),
            }
            submitting.set(false);
        }
    };

    let d = draft.read().clone();
    let progression = d.progression.map(|p| p.to_string()).unwrap_or_default();

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
                label { "Type" }
                select {
                    onchange: move |e| {
                        if let Ok(t) = e.value().parse::<ProjectType>() {
                            draft.write().project_type = t;
                        }
                    },
                    for t in ProjectType::ALL {
                        option { value: t.as_wire(), selected: d.project_type == t, "{t.label()}" }
                    }
                }
            }
            div {
                class: "field",
                label { "Status" }
                select {
                    onchange: move |e| {
                        if let Ok(s) = e.value().parse::<ProjectStatus>() {
                            draft.write().status = s;
                        }
                    },
                    for s in ProjectStatus::ALL {
                        option { value: s.as_wire(), selected: d.status == s, "{s.label()}" }
                    }
                }
            }
            div {
                class: "field",
                label { "Client" }
                select {
                    onchange: move |e| draft.write().client_id = e.value().parse::<Id>().ok(),
                    option { value: "", selected: d.client_id.is_none(), "No client" }
                    for client in clients.iter() {
                        option {
                            key: "{client.id}",
                            value: "{client.id}",
                            selected: d.client_id == Some(client.id),
                            "{client.display_name()}"
                        }
                    }
                }
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
            if editing.is_some() {
                div {
                    class: "field",
                    label { "Progression (%)" }
                    input {
                        r#type: "number",
                        min: "0",
                        max: "100",
                        value: "{progression}",
                        oninput: move |e| draft.write().progression = e.value().trim().parse::<u8>().ok(),
                    }
                    FieldHint { errors: field_errors(), field: "progression" }
                }
            }
            div {
                class: "toolbar",
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: submitting(),
                    "Save"
                }
                Link { class: "btn btn-secondary", to: Route::ChefProjects {}, "Cancel" }
            }
        }
    }
}

use api::{Id, Role, User, UserDraft, ValidationErrors};
use dioxus::prelude::*;
use ui::{use_api, use_query, use_toast, ErrorBanner, LoadState, PageSkeleton};

use crate::views::common::{report_submit_error, use_param, FieldHint};
use crate::Route;

fn optional(value: String) -> Option<String> {
    Some(value).filter(|v| !v.trim().is_empty())
}

#[component]
pub fn AdminUserNew() -> Element {
    rsx! {
        div {
            class: "page",
            h1 { class: "page-title", "New user" }
            UserForm {}
        }
    }
}

#[component]
pub fn AdminUserEdit(id: Id) -> Element {
    let id = use_param(id);
    let user = use_query(move |api| {
        let id = id();
        async move { api.user(id).await }
    });

    rsx! {
        div {
            class: "page",
            h1 { class: "page-title", "Edit user" }
            {match user.state() {
                LoadState::Idle | LoadState::Loading => rsx! { PageSkeleton {} },
                LoadState::Failed(message) => rsx! {
                    ErrorBanner { message, on_retry: move |_| user.refresh() }
                },
                LoadState::Ready(existing) => rsx! {
                    UserForm { key: "{existing.id}", existing }
                },
            }}
        }
    }
}

/// Create form when `existing` is `None`, edit form otherwise.
#[component]
fn UserForm(existing: Option<User>) -> Element {
    let api = use_api();
    let toasts = use_toast();
    let nav = use_navigator();
    let editing = existing.as_ref().map(|u| u.id);
    let mut draft = use_signal(|| {
        existing
            .as_ref()
            .map(UserDraft::from_user)
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
                Some(id) => api.update_user(id, &current).await,
                None => api.create_user(&current).await,
            };
            match result {
                Ok(user) => {
                    toasts.success(format!("{} saved", user.display_name()));
                    nav.push(Route::AdminUsers {});
                }
                Err(e) => report_submit_error(toasts, field_errors, e),
            }
            submitting.set(false);
        }
    };

    let d = draft.read().clone();
    let password_label = if editing.is_some() {
        "New password (leave blank to keep)"
    } else {
        "Password"
    };

    rsx! {
        form {
            class: "form",
            onsubmit: onsubmit,
            div {
                class: "field",
                label { "Username" }
                input {
                    value: "{d.username}",
                    oninput: move |e| draft.write().username = e.value(),
                }
                FieldHint { errors: field_errors(), field: "username" }
            }
            div {
                class: "field",
                label { "Email" }
                input {
                    r#type: "email",
                    value: "{d.email}",
                    oninput: move |e| draft.write().email = e.value(),
                }
                FieldHint { errors: field_errors(), field: "email" }
            }
            div {
                class: "field",
                label { "{password_label}" }
                input {
                    r#type: "password",
                    autocomplete: "new-password",
                    value: "{d.password.clone().unwrap_or_default()}",
                    oninput: move |e| draft.write().password = optional(e.value()),
                }
                FieldHint { errors: field_errors(), field: "password" }
            }
            div {
                class: "field",
                label { "Role" }
                select {
                    onchange: move |e| {
                        if let Ok(role) = e.value().parse::<Role>() {
                            draft.write().role = role;
                        }
                    },
                    for role in Role::ALL {
                        option {
                            value: role.as_wire(),
                            selected: d.role == role,
                            "{role.label()}"
                        }
                    }
                }
            }
            div {
                class: "field",
                label { "First name" }
                input {
                    value: "{d.first_name.clone().unwrap_or_default()}",
                    oninput: move |e| draft.write().first_name = optional(e.value()),
                }
            }
            div {
                class: "field",
                label { "Last name" }
                input {
                    value: "{d.last_name.clone().unwrap_or_default()}",
                    oninput: move |e| draft.write().last_name = optional(e.value()),
                }
            }
            div {
                class: "field",
                label { "Department" }
                input {
                    value: "{d.department.clone().unwrap_or_default()}",
                    oninput: move |e| draft.write().department = optional(e.value()),
                }
            }
            div {
                class: "field",
                label { "Job title" }
                input {
                    value: "{d.job_title.clone().unwrap_or_default()}",
                    oninput: move |e| draft.write().job_title = optional(e.value()),
                }
            }
            div {
                class: "field",
                label { "Phone" }
                input {
                    r#type: "tel",
                    value: "{d.phone.clone().unwrap_or_default()}",
                    oninput: move |e| draft.write().phone = optional(e.value()),
                }
                FieldHint { errors: field_errors(), field: "phone" }
            }
            label {
                input {
                    r#type: "checkbox",
                    checked: d.active,
                    onchange: move |e| draft.write().active = e.checked(),
                }
                " Active"
            }
            div {
                class: "toolbar",
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: submitting(),
                    "Save"
                }
                Link { class: "btn btn-secondary", to: Route::AdminUsers {}, "Cancel" }
            }
        }
    }
}

use api::{Id, Role, User};
use dioxus::prelude::*;
use ui::{
    paginate, use_api, use_config, use_query, use_session, use_toast, ConfirmDialog, ErrorBanner,
    LoadState, Pagination, RoleBadge, SearchInput, TableSkeleton, UserFilter,
};

use crate::views::common::EmptyState;
use crate::Route;

#[component]
pub fn AdminUsers() -> Element {
    let api = use_api();
    let toasts = use_toast();
    let session = use_session();
    let page_size = use_config().page_size();
    let users = use_query(|api| async move { api.users().await });
    let mut filter = use_signal(UserFilter::default);
    let mut page = use_signal(|| 0usize);
    let mut pending_delete = use_signal(|| None::<User>);

    let own_id = session().user.map(|u| u.id);

    let toggle_active = {
        let api = api.clone();
        move |(id, active): (Id, bool)| {
            let api = api.clone();
            users.update(|list| {
                if let Some(u) = list.iter_mut().find(|u| u.id == id) {
                    u.active = active;
                }
            });
            spawn(async move {
                match api.set_user_active(id, active).await {
                    Ok(user) => {
                        toasts.success(if user.active { "Account enabled" } else { "Account disabled" });
                        users.update(|list| {
                            if let Some(slot) = list.iter_mut().find(|u| u.id == user.id) {
                                *slot = user;
                            }
                        });
                    }
                    Err(e) => {
                        tracing::warn!("toggling user {id} failed: {e}");
                        toasts.error(e.user_message());
                        users.refresh();
                    }
                }
            });
        }
    };

    let confirm_delete = move |_| {
        let api = api.clone();
        let Some(user) = pending_delete() else {
            return;
        };
        pending_delete.set(None);
        users.update(|list| list.retain(|u| u.id != user.id));
        spawn(async move {
            match api.delete_user(user.id).await {
                Ok(()) => toasts.success(format!("{} deleted", user.display_name())),
                Err(e) => {
                    toasts.error(e.user_message());
                    users.refresh();
                }
            }
        });
    };

    let body = match users.state() {
        LoadState::Idle | LoadState::Loading => rsx! { TableSkeleton {} },
        LoadState::Failed(message) => rsx! {
            ErrorBanner { message, on_retry: move |_| users.refresh() }
        },
        LoadState::Ready(list) => {
            let matching = filter.read().apply(&list);
            let total = matching.len();
            let rows = paginate(&matching, page(), page_size);
            if rows.is_empty() {
                rsx! { EmptyState { message: "No user matches these filters." } }
            } else {
                rsx! {
                    table {
                        class: "table",
                        thead {
                            tr {
                                th { "Name" }
                                th { "Email" }
                                th { "Role" }
                                th { "Department" }
                                th { "Active" }
                                th {}
                            }
                        }
                        tbody {
                            for user in rows {
                                tr {
                                    key: "{user.id}",
                                    td { "{user.display_name()}" }
                                    td { "{user.email}" }
                                    td { RoleBadge { role: user.role } }
                                    td { "{user.department.clone().unwrap_or_default()}" }
                                    td {
                                        input {
                                            r#type: "checkbox",
                                            checked: user.active,
                                            disabled: own_id == Some(user.id),
                                            onchange: {
                                                let toggle = toggle_active.clone();
                                                let id = user.id;
                                                move |e: FormEvent| toggle((id, e.checked()))
                                            },
                                        }
                                    }
                                    td {
                                        class: "toolbar",
                                        Link {
                                            class: "btn btn-secondary",
                                            to: Route::AdminUserEdit { id: user.id },
                                            "Edit"
                                        }
                                        if own_id != Some(user.id) {
                                            button {
                                                class: "btn btn-danger",
                                                onclick: {
                                                    let user = user.clone();
                                                    move |_| pending_delete.set(Some(user.clone()))
                                                },
                                                "Delete"
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
                h1 { class: "page-title", "Users" }
                Link { class: "btn btn-primary", to: Route::AdminUserNew {}, "New user" }
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
                        filter.write().role = e.value().parse::<Role>().ok();
                        page.set(0);
                    },
                    option { value: "", "All roles" }
                    for role in Role::ALL {
                        option { value: role.as_wire(), "{role.label()}" }
                    }
                }
                select {
                    onchange: move |e| {
                        filter.write().active = match e.value().as_str() {
                            "active" => Some(true),
                            "inactive" => Some(false),
                            _ => None,
                        };
                        page.set(0);
                    },
                    option { value: "", "Any status" }
                    option { value: "active", "Active" }
                    option { value: "inactive", "Disabled" }
                }
            }
            {body}
            if let Some(user) = pending_delete() {
                ConfirmDialog {
                    title: "Delete user",
                    message: format!("Delete the account of {}? This cannot be undone.", user.display_name()),
                    on_confirm: confirm_delete,
                    on_cancel: move |_| pending_delete.set(None),
                }
            }
        }
    }
}

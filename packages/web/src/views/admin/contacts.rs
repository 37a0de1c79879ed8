use api::{ContactCategory, ContactRequest, Id};
use dioxus::prelude::*;
use ui::format::format_datetime;
use ui::{
    paginate, use_api, use_config, use_query, use_toast, Badge, ConfirmDialog, ContactFilter,
    ErrorBanner, LoadState, Pagination, SearchInput, TableSkeleton, Tone,
};

use crate::views::common::EmptyState;

#[component]
pub fn AdminContacts() -> Element {
    let api = use_api();
    let toasts = use_toast();
    let page_size = use_config().page_size();
    let requests = use_query(|api| async move { api.contact_requests().await });
    let mut filter = use_signal(ContactFilter::default);
    let mut page = use_signal(|| 0usize);
    let mut expanded = use_signal(|| None::<Id>);
    let mut pending_delete = use_signal(|| None::<ContactRequest>);

    let set_processed = {
        let api = api.clone();
        move |(id, processed): (Id, bool)| {
            let api = api.clone();
            requests.update(|list| {
                if let Some(r) = list.iter_mut().find(|r| r.id == id) {
                    r.processed = processed;
                }
            });
            spawn(async move {
                match api.mark_contact_processed(id, processed).await {
                    Ok(()) => toasts.success(if processed {
                        "Marked as processed"
                    } else {
                        "Marked as pending"
                    }),
                    Err(e) => {
                        toasts.error(e.user_message());
                        requests.refresh();
                    }
                }
            });
        }
    };

    let confirm_delete = move |_| {
        let api = api.clone();
        let Some(request) = pending_delete() else {
            return;
        };
        pending_delete.set(None);
        requests.update(|list| list.retain(|r| r.id != request.id));
        spawn(async move {
            match api.delete_contact(request.id).await {
                Ok(()) => toasts.success("Request deleted"),
                Err(e) => {
                    toasts.error(e.user_message());
                    requests.refresh();
                }
            }
        });
    };

    let body = match requests.state() {
        LoadState::Idle | LoadState::Loading => rsx! { TableSkeleton {} },
        LoadState::Failed(message) => rsx! {
            ErrorBanner { message, on_retry: move |_| requests.refresh() }
        },
        LoadState::Ready(list) => {
            let matching = filter.read().apply(&list);
            let total = matching.len();
            let pending = list.iter().filter(|r| !r.processed).count();
            let rows = paginate(&matching, page(), page_size);
            rsx! {
                p { class: "stat-label", "{pending} pending of {list.len()}" }
                if rows.is_empty() {
                    EmptyState { message: "No request matches these filters." }
                }
                for request in rows {
                    div {
                        key: "{request.id}",
                        class: "card",
                        div {
                            class: "page-header",
                            div {
                                strong { "{request.subject}" }
                                div {
                                    class: "stat-label",
                                    "{request.name} · {request.email} · {format_datetime(request.created_at)}"
                                }
                            }
                            div {
                                class: "toolbar",
                                Badge { label: request.category.label().to_string(), tone: Tone::Info }
                                if request.processed {
                                    Badge { label: "Processed", tone: Tone::Success }
                                } else {
                                    Badge { label: "Pending", tone: Tone::Warning }
                                }
                                button {
                                    class: "btn btn-secondary",
                                    onclick: move |_| {
                                        let open = expanded() == Some(request.id);
                                        expanded.set(if open { None } else { Some(request.id) });
                                    },
                                    if expanded() == Some(request.id) { "Hide" } else { "Read" }
                                }
                                button {
                                    class: "btn btn-secondary",
                                    onclick: {
                                        let set = set_processed.clone();
                                        let (id, processed) = (request.id, request.processed);
                                        move |_| set((id, !processed))
                                    },
                                    if request.processed { "Reopen" } else { "Mark processed" }
                                }
                                button {
                                    class: "btn btn-danger",
                                    onclick: {
                                        let request = request.clone();
                                        move |_| pending_delete.set(Some(request.clone()))
                                    },
                                    "Delete"
                                }
                            }
                        }
                        if expanded() == Some(request.id) {
                            p { "{request.description}" }
                            if let Some(phone) = request.phone.clone() {
                                p { class: "stat-label", "Phone: {phone}" }
                            }
                            if let Some(at) = request.processed_at {
                                p { class: "stat-label", "Processed {format_datetime(Some(at))}" }
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
    };

    rsx! {
        div {
            class: "page",
            div {
                class: "page-header",
                h1 { class: "page-title", "Contact requests" }
                button {
                    class: "btn btn-secondary",
                    onclick: move |_| requests.refresh(),
                    "Refresh"
                }
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
                        filter.write().category = e.value().parse::<ContactCategory>().ok();
                        page.set(0);
                    },
                    option { value: "", "All categories" }
                    for category in ContactCategory::ALL {
                        option { value: category.as_wire(), "{category.label()}" }
                    }
                }
                select {
                    onchange: move |e| {
                        filter.write().processed = match e.value().as_str() {
                            "pending" => Some(false),
                            "processed" => Some(true),
                            _ => None,
                        };
                        page.set(0);
                    },
                    option { value: "", "Any state" }
                    option { value: "pending", "Pending" }
                    option { value: "processed", "Processed" }
                }
            }
            {body}
            if let Some(request) = pending_delete() {
                ConfirmDialog {
                    title: "Delete request",
                    message: format!("Delete \"{}\" from {}?", request.subject, request.name),
                    on_confirm: confirm_delete,
                    on_cancel: move |_| pending_delete.set(None),
                }
            }
        }
    }
}

use api::Role;
use dioxus::prelude::*;
use futures::future::try_join;
use ui::format::today;
use ui::{use_query, ErrorBanner, LoadState, PageSkeleton};

use crate::views::common::{StatCard, SummaryPanel};

#[component]
pub fn AdminDashboard() -> Element {
    let data = use_query(|api| async move {
        try_join(
            api.dashboard_summary(Role::Admin, today()),
            api.analytics_overview(),
        )
        .await
    });

    let body = match data.state() {
        LoadState::Idle | LoadState::Loading => rsx! { PageSkeleton {} },
        LoadState::Failed(message) => rsx! {
            ErrorBanner { message, on_retry: move |_| data.refresh() }
        },
        LoadState::Ready((summary, overview)) => rsx! {
            div {
                class: "card-grid",
                StatCard {
                    label: "Users",
                    value: overview.total_users.to_string(),
                    hint: format!("{} active", overview.active_users),
                }
                StatCard {
                    label: "Active projects",
                    value: overview.active_projects.to_string(),
                    hint: format!("{} completed", overview.completed_projects),
                }
                StatCard {
                    label: "Task completion",
                    value: format!("{}%", overview.task_completion()),
                }
            }
            SummaryPanel { summary }
        },
    };

    rsx! {
        div {
            class: "page",
            div {
                class: "page-header",
                h1 { class: "page-title", "Administration" }
                button {
                    class: "btn btn-secondary",
                    onclick: move |_| data.refresh(),
                    "Refresh"
                }
            }
            {body}
        }
    }
}

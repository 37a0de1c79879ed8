//! Admin analytics. Sections load in parallel and fail independently.

use api::ApiError;
use dioxus::prelude::*;
use futures::future::join3;
use ui::format::format_hours;
use ui::{
    use_api, use_query, Bar, BarChart, ErrorBanner, LoadState, PageSkeleton, ProgressBar,
    Skeleton, Sparkline,
};

use crate::views::common::{EmptyState, StatCard};

const TREND_WINDOWS: [u32; 3] = [7, 30, 90];

#[component]
pub fn AdminAnalytics() -> Element {
    let api = use_api();
    let mut days = use_signal(|| 30u32);

    let sections = use_query(|api| async move {
        let (overview, by_status, workload) = join3(
            api.analytics_overview(),
            api.projects_by_status(),
            api.workload(),
        )
        .await;
        Ok::<_, ApiError>((overview, by_status, workload))
    });
    let trend = use_query(move |api| {
        let days = days();
        async move { api.tasks_trend(days).await }
    });

    let reload = move |_| {
        api.invalidate_analytics();
        sections.refresh();
        trend.refresh();
    };

    let body = match sections.state() {
        LoadState::Idle | LoadState::Loading => rsx! { PageSkeleton {} },
        LoadState::Failed(message) => rsx! {
            ErrorBanner { message, on_retry: move |_| sections.refresh() }
        },
        LoadState::Ready((overview, by_status, workload)) => {
            let overview_view = match overview {
                Ok(o) => rsx! {
                    div {
                        class: "card-grid",
                        StatCard { label: "Projects", value: o.total_projects.to_string() }
                        StatCard { label: "Active projects", value: o.active_projects.to_string() }
                        StatCard { label: "Tasks", value: o.total_tasks.to_string() }
                        StatCard {
                            label: "Overdue tasks",
                            value: o.overdue_tasks.to_string(),
                        }
                        StatCard {
                            label: "Users",
                            value: o.total_users.to_string(),
                            hint: format!("{} active", o.active_users),
                        }
                        div {
                            class: "card",
                            div { class: "stat-label", "Average progression" }
                            ProgressBar { value: o.average_progression }
                        }
                    }
                },
                Err(e) => rsx! {
                    ErrorBanner { message: e.user_message(), on_retry: move |_| sections.refresh() }
                },
            };
            let status_view = match by_status {
                Ok(breakdown) => {
                    let bars: Vec<Bar> = breakdown
                        .0
                        .iter()
                        .map(|row| Bar {
                            label: row.status.label().to_string(),
                            value: f64::from(row.count),
                        })
                        .collect();
                    rsx! { BarChart { bars } }
                }
                Err(e) => rsx! { p { class: "field-error", "{e.user_message()}" } },
            };
            let workload_view = match workload {
                Ok(rows) if rows.is_empty() => rsx! {
                    EmptyState { message: "No open work assigned." }
                },
                Ok(rows) => rsx! {
                    table {
                        class: "table",
                        thead {
                            tr {
                                th { "Developer" }
                                th { "Open tasks" }
                                th { "Planned" }
                                th { "Spent" }
                                th { "Load" }
                            }
                        }
                        tbody {
                            for row in rows.iter() {
                                tr {
                                    key: "{row.developer.id}",
                                    td { "{row.developer.name}" }
                                    td { "{row.open_tasks}" }
                                    td { "{format_hours(row.planned_hours)}" }
                                    td { "{format_hours(row.effective_hours)}" }
                                    td { ProgressBar { value: f64::from(row.load_percent()) } }
                                }
                            }
                        }
                    }
                },
                Err(e) => rsx! { p { class: "field-error", "{e.user_message()}" } },
            };
            rsx! {
                {overview_view}
                div {
                    class: "card-grid",
                    div {
                        class: "card",
                        h3 { "Projects by status" }
                        {status_view}
                    }
                }
                div {
                    class: "card",
                    h3 { "Workload" }
                    {workload_view}
                }
            }
        }
    };

    let trend_view = match trend.state() {
        LoadState::Idle | LoadState::Loading => rsx! { Skeleton { height: "40px" } },
        LoadState::Failed(message) => rsx! {
            ErrorBanner { message, on_retry: move |_| trend.refresh() }
        },
        LoadState::Ready(points) => {
            let created: i64 = points.0.iter().map(|p| i64::from(p.created)).sum();
            let completed: i64 = points.0.iter().map(|p| i64::from(p.completed)).sum();
            rsx! {
                div {
                    class: "toolbar",
                    div {
                        div { class: "stat-label", "Created ({created})" }
                        Sparkline { values: points.created_series() }
                    }
                    div {
                        div { class: "stat-label", "Completed ({completed})" }
                        Sparkline { values: points.completed_series() }
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
                h1 { class: "page-title", "Analytics" }
                button { class: "btn btn-secondary", onclick: reload, "Refresh" }
            }
            {body}
            div {
                class: "card",
                div {
                    class: "page-header",
                    h3 { "Task trend" }
                    select {
                        onchange: move |e| {
                            if let Ok(window) = e.value().parse::<u32>() {
                                days.set(window);
                            }
                        },
                        for window in TREND_WINDOWS {
                            option {
                                value: "{window}",
                                selected: days() == window,
                                "Last {window} days"
                            }
                        }
                    }
                }
                {trend_view}
            }
        }
    }
}

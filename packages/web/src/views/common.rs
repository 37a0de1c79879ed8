//! Pieces shared by several pages.

use api::{ApiError, DashboardSummary, ValidationErrors};
use dioxus::prelude::*;
use ui::format::{format_date, format_hours};
use ui::{Bar, BarChart, PriorityBadge, ProgressBar, TaskStatusBadge, Toasts};

/// Keep a signal in step with a route parameter so queries reading it
/// reload when the router reuses the component for another id.
pub fn use_param<T: Clone + PartialEq + 'static>(value: T) -> Signal<T> {
    let mut signal = use_signal(|| value.clone());
    use_effect(use_reactive(&value, move |value| {
        if *signal.peek() != value {
            signal.set(value);
        }
    }));
    signal
}

/// Report a failed submit: per-field messages for validation errors, a
/// toast for everything.
pub fn report_submit_error(
    toasts: Toasts,
    mut field_errors: Signal<Option<ValidationErrors>>,
    error: ApiError,
) {
    tracing::warn!("submit failed: {error}");
    match error {
        ApiError::Validation(errors) => {
            field_errors.set(Some(errors));
            toasts.error("Please fix the highlighted fields");
        }
        other => {
            field_errors.set(None);
            toasts.error(other.user_message());
        }
    }
}

/// Inline message under a form input.
#[component]
pub fn FieldHint(errors: Option<ValidationErrors>, field: String) -> Element {
    let message = errors
        .as_ref()
        .and_then(|e| e.for_field(&field))
        .map(str::to_string);
    rsx! {
        if let Some(message) = message {
            span { class: "field-error", "{message}" }
        }
    }
}

#[component]
pub fn StatCard(label: String, value: String, #[props(default)] hint: Option<String>) -> Element {
    rsx! {
        div {
            class: "card",
            div { class: "stat-value", "{value}" }
            div { class: "stat-label", "{label}" }
            if let Some(hint) = hint {
                div { class: "stat-label", "{hint}" }
            }
        }
    }
}

#[component]
pub fn EmptyState(message: String) -> Element {
    rsx! {
        div { class: "empty-state", "{message}" }
    }
}

/// Cards, status charts and upcoming deadlines for one role's dashboard.
#[component]
pub fn SummaryPanel(summary: DashboardSummary) -> Element {
    let project_bars: Vec<Bar> = summary
        .projects_by_status
        .iter()
        .map(|(status, count)| Bar {
            label: status.label().to_string(),
            value: *count as f64,
        })
        .collect();
    let task_bars: Vec<Bar> = summary
        .tasks_by_status
        .iter()
        .map(|(status, count)| Bar {
            label: status.label().to_string(),
            value: *count as f64,
        })
        .collect();

    rsx! {
        div {
            class: "card-grid",
            StatCard {
                label: "Projects",
                value: summary.projects_total.to_string(),
                hint: format!("{} overdue", summary.overdue_projects),
            }
            StatCard {
                label: "Tasks",
                value: summary.tasks_total.to_string(),
                hint: format!("{} overdue", summary.overdue_tasks),
            }
            StatCard {
                label: "Planned",
                value: format_hours(summary.planned_hours),
                hint: format!("{} spent", format_hours(summary.effective_hours)),
            }
            div {
                class: "card",
                div { class: "stat-label", "Average progression" }
                ProgressBar { value: f64::from(summary.average_progression) }
            }
        }
        div {
            class: "card-grid",
            div {
                class: "card",
                h3 { "Projects by status" }
                BarChart { bars: project_bars }
            }
            if summary.tasks_total > 0 {
                div {
                    class: "card",
                    h3 { "Tasks by status" }
                    BarChart { bars: task_bars }
                }
            }
        }
        if !summary.upcoming.is_empty() {
            div {
                class: "card",
                h3 { "Upcoming deadlines" }
                table {
                    class: "table",
                    tbody {
                        for task in summary.upcoming.iter() {
                            tr {
                                key: "{task.id}",
                                td { "{task.title}" }
                                td { "{task.project_title().unwrap_or_default()}" }
                                td { TaskStatusBadge { status: task.status } }
                                td { PriorityBadge { priority: task.priority } }
                                td { "{format_date(task.end_date)}" }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::time::Duration;

    use dioxus::core::NoOpMutations;

    use super::*;

    thread_local! {
        static SEEN: RefCell<Vec<u32>> = const { RefCell::new(Vec::new()) };
    }

    #[component]
    fn ParamView(id: u32) -> Element {
        let param = use_param(id);
        SEEN.with(|seen| seen.borrow_mut().push(param()));
        rsx! {}
    }

    fn switching_route() -> Element {
        let mut id = use_signal(|| 1u32);
        use_hook(|| spawn(async move { id.set(2) }));
        rsx! { ParamView { id: id() } }
    }

    #[tokio::test]
    async fn test_param_follows_route_change() {
        let mut dom = VirtualDom::new(switching_route);
        dom.rebuild_in_place();
        for _ in 0..4 {
            let _ = tokio::time::timeout(Duration::from_millis(20), dom.wait_for_work()).await;
            dom.render_immediate(&mut NoOpMutations);
        }
        let seen = SEEN.with(|seen| seen.borrow().clone());
        assert_eq!(seen.first(), Some(&1));
        assert_eq!(seen.last(), Some(&2));
    }
}

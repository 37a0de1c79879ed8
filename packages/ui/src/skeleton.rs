use dioxus::prelude::*;

/// Grey placeholder block.
#[component]
pub fn Skeleton(
    #[props(default = "100%".to_string())] width: String,
    #[props(default = "1rem".to_string())] height: String,
) -> Element {
    rsx! {
        div {
            class: "skeleton",
            style: "width: {width}; height: {height};",
        }
    }
}

/// Placeholder rows shaped like a table.
#[component]
pub fn TableSkeleton(#[props(default = 5)] rows: usize) -> Element {
    rsx! {
        div {
            class: "skeleton-table",
            for i in 0..rows {
                div {
                    key: "{i}",
                    class: "skeleton-row",
                    Skeleton { width: "30%" }
                    Skeleton { width: "20%" }
                    Skeleton { width: "35%" }
                }
            }
        }
    }
}

/// Whole-page placeholder: title, a row of cards, then a table.
#[component]
pub fn PageSkeleton() -> Element {
    rsx! {
        div {
            class: "page skeleton-page",
            Skeleton { width: "40%", height: "2rem" }
            div {
                class: "card-grid",
                for i in 0..4 {
                    div { key: "{i}", class: "card", Skeleton { height: "4rem" } }
                }
            }
            TableSkeleton {}
        }
    }
}

/// Failure message with a reload button.
#[component]
pub fn ErrorBanner(message: String, on_retry: EventHandler<()>) -> Element {
    rsx! {
        div {
            class: "error-banner",
            role: "alert",
            span { "{message}" }
            button {
                class: "btn btn-secondary",
                onclick: move |_| on_retry.call(()),
                "Refresh"
            }
        }
    }
}

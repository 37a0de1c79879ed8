use api::clamp_progression;
use dioxus::prelude::*;

/// Horizontal bar for a completion percentage. Out-of-range values are
/// clamped to `0..=100`.
#[component]
pub fn ProgressBar(value: f64, #[props(default = true)] show_label: bool) -> Element {
    let percent = clamp_progression(value);
    let fill = if percent >= 100 {
        "progress-fill progress-done"
    } else {
        "progress-fill"
    };

    rsx! {
        div {
            class: "progress",
            div {
                class: "progress-track",
                role: "progressbar",
                aria_valuenow: "{percent}",
                aria_valuemin: "0",
                aria_valuemax: "100",
                div { class: fill, style: "width: {percent}%;" }
            }
            if show_label {
                span { class: "progress-label", "{percent}%" }
            }
        }
    }
}

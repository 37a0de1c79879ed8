use std::time::Duration;

use dioxus::prelude::*;

use crate::toast::sleep;

/// `hh:mm:ss`.
pub fn format_elapsed(seconds: u64) -> String {
    let h = seconds / 3600;
    let m = (seconds % 3600) / 60;
    let s = seconds % 60;
    format!("{h:02}:{m:02}:{s:02}")
}

/// Local stopwatch for the task being worked on. Nothing is sent to the
/// backend; `on_stop` receives the elapsed seconds when the user stops it.
#[component]
pub fn TaskTimer(#[props(default)] on_stop: Option<EventHandler<u64>>) -> Element {
    let mut running = use_signal(|| false);
    let mut elapsed = use_signal(|| 0u64);

    // Ticks for as long as the component is mounted.
    use_future(move || async move {
        loop {
            sleep(Duration::from_secs(1)).await;
            if *running.peek() {
                *elapsed.write() += 1;
            }
        }
    });

    let label = format_elapsed(elapsed());

    rsx! {
        div {
            class: "task-timer",
            span { class: "task-timer-value", "{label}" }
            if running() {
                button {
                    class: "btn btn-secondary",
                    onclick: move |_| running.set(false),
                    "Pause"
                }
            } else {
                button {
                    class: "btn btn-primary",
                    onclick: move |_| running.set(true),
                    if elapsed() == 0 { "Start" } else { "Resume" }
                }
            }
            button {
                class: "btn btn-secondary",
                disabled: elapsed() == 0,
                onclick: move |_| {
                    running.set(false);
                    let seconds = elapsed();
                    elapsed.set(0);
                    if let Some(handler) = &on_stop {
                        handler.call(seconds);
                    }
                },
                "Stop"
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(0), "00:00:00");
        assert_eq!(format_elapsed(3725), "01:02:05");
    }
}

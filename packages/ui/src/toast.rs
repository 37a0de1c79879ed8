//! Transient notifications.

use std::time::Duration;

use dioxus::core::spawn_forever;
use dioxus::prelude::*;

const TOAST_LIFETIME: Duration = Duration::from_secs(4);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ToastQueue {
    next_id: u64,
    pub items: Vec<Toast>,
}

impl ToastQueue {
    pub fn push(&mut self, kind: ToastKind, message: String) -> u64 {
        self.next_id += 1;
        self.items.push(Toast {
            id: self.next_id,
            kind,
            message,
        });
        self.next_id
    }

    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|t| t.id != id);
    }
}

/// Handle returned by [`use_toast`].
#[derive(Clone, Copy, PartialEq)]
pub struct Toasts {
    queue: Signal<ToastQueue>,
}

impl Toasts {
    pub fn success(&self, message: impl Into<String>) {
        self.show(ToastKind::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(ToastKind::Error, message.into());
    }

    pub fn info(&self, message: impl Into<String>) {
        self.show(ToastKind::Info, message.into());
    }

    fn show(&self, kind: ToastKind, message: String) {
        let mut queue = self.queue;
        let id = queue.write().push(kind, message);
        // Outlive the calling view; a toast often follows a navigation.
        spawn_forever(async move {
            sleep(TOAST_LIFETIME).await;
            queue.write().dismiss(id);
        });
    }
}

pub(crate) async fn sleep(duration: Duration) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
}

pub fn use_toast() -> Toasts {
    use_context::<Toasts>()
}

/// Provides [`use_toast`] and renders the stack above `children`.
#[component]
pub fn ToastProvider(children: Element) -> Element {
    let mut queue = use_signal(ToastQueue::default);
    use_context_provider(|| Toasts { queue });

    rsx! {
        {children}
        div {
            class: "toast-stack",
            for toast in queue().items {
                div {
                    key: "{toast.id}",
                    class: match toast.kind {
                        ToastKind::Success => "toast toast-success",
                        ToastKind::Error => "toast toast-error",
                        ToastKind::Info => "toast toast-info",
                    },
                    role: "status",
                    span { "{toast.message}" }
                    button {
                        class: "toast-close",
                        onclick: move |_| queue.write().dismiss(toast.id),
                        "×"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_ids_and_dismiss() {
        let mut queue = ToastQueue::default();
        let a = queue.push(ToastKind::Success, "saved".into());
        let b = queue.push(ToastKind::Error, "failed".into());
        assert_ne!(a, b);
        queue.dismiss(a);
        assert_eq!(queue.items.len(), 1);
        assert_eq!(queue.items[0].message, "failed");
    }

    #[test]
    fn test_toasts_push_into_shared_queue() {
        let mut dom = VirtualDom::new(|| rsx! {});
        dom.rebuild_in_place();
        dom.in_scope(ScopeId::ROOT, || {
            let toasts = Toasts {
                queue: Signal::new(ToastQueue::default()),
            };
            toasts.success("Project saved");
            toasts.error("Network error");
            let queue = toasts.queue.read();
            assert_eq!(queue.items.len(), 2);
            assert_eq!(queue.items[0].kind, ToastKind::Success);
            assert_eq!(queue.items[1].message, "Network error");
        });
    }
}

//! Access-request / support form, used on the public page and by clients.

use api::{ContactCategory, ContactDraft, User, ValidationErrors, MAX_DESCRIPTION_LEN};
use dioxus::prelude::*;
use ui::{use_api, use_toast};

use super::common::{report_submit_error, FieldHint};

fn draft_for(user: Option<&User>, category: ContactCategory) -> ContactDraft {
    let mut draft = ContactDraft {
        category,
        ..ContactDraft::default()
    };
    if let Some(user) = user {
        draft.name = user.display_name();
        draft.email = user.email.clone();
        draft.phone = user.phone.clone();
        draft.user_id = Some(user.id);
    }
    draft
}

#[component]
pub fn ContactForm(user: Option<User>, default_category: ContactCategory) -> Element {
    let api = use_api();
    let toasts = use_toast();
    let mut draft = use_signal(|| draft_for(user.as_ref(), default_category));
    let mut field_errors = use_signal(|| None::<ValidationErrors>);
    let mut submitting = use_signal(|| false);
    let mut sent = use_signal(|| false);
    let signed_in = user.is_some();

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let api = api.clone();
        let user = user.clone();
        async move {
            if submitting() {
                return;
            }
            submitting.set(true);
            let current = draft();
            match api.submit_contact(&current).await {
                Ok(()) => {
                    field_errors.set(None);
                    toasts.success("Request sent");
                    draft.set(draft_for(user.as_ref(), default_category));
                    sent.set(true);
                }
                Err(e) => report_submit_error(toasts, field_errors, e),
            }
            submitting.set(false);
        }
    };

    let length = draft.read().description.chars().count();

    rsx! {
        if sent() {
            div {
                class: "card",
                "Thank you, your request was received. An administrator will get back to you."
            }
        }
        form {
            class: "form",
            onsubmit: onsubmit,
            if !signed_in {
                div {
                    class: "field",
                    label { "Name" }
                    input {
                        value: "{draft.read().name}",
                        oninput: move |e| draft.write().name = e.value(),
                    }
                    FieldHint { errors: field_errors(), field: "name" }
                }
                div {
                    class: "field",
                    label { "Email" }
                    input {
                        r#type: "email",
                        value: "{draft.read().email}",
                        oninput: move |e| draft.write().email = e.value(),
                    }
                    FieldHint { errors: field_errors(), field: "email" }
                }
                div {
                    class: "field",
                    label { "Phone (optional)" }
                    input {
                        r#type: "tel",
                        value: "{draft.read().phone.clone().unwrap_or_default()}",
                        oninput: move |e| draft.write().phone = Some(e.value()),
                    }
                    FieldHint { errors: field_errors(), field: "phone" }
                }
            }
            div {
                class: "field",
                label { "Category" }
                select {
                    value: draft.read().category.as_wire(),
                    onchange: move |e| {
                        if let Ok(category) = e.value().parse::<ContactCategory>() {
                            draft.write().category = category;
                        }
                    },
                    for category in ContactCategory::ALL {
                        option {
                            value: category.as_wire(),
                            selected: draft.read().category == category,
                            "{category.label()}"
                        }
                    }
                }
            }
            div {
                class: "field",
                label { "Subject" }
                input {
                    value: "{draft.read().subject}",
                    oninput: move |e| draft.write().subject = e.value(),
                }
                FieldHint { errors: field_errors(), field: "subject" }
            }
            div {
                class: "field",
                label { "Message" }
                textarea {
                    rows: "6",
                    value: "{draft.read().description}",
                    oninput: move |e| draft.write().description = e.value(),
                }
                span { class: "stat-label", "{length} / {MAX_DESCRIPTION_LEN}" }
                FieldHint { errors: field_errors(), field: "description" }
            }
            button {
                class: "btn btn-primary",
                r#type: "submit",
                disabled: submitting(),
                "Send"
            }
        }
    }
}

//! Login page.

use api::{ApiError, LoginRequest, ValidationErrors};
use dioxus::prelude::*;
use ui::{use_api, use_session, SessionState};

use super::common::FieldHint;
use crate::Route;

#[component]
pub fn Login() -> Element {
    let api = use_api();
    let mut session = use_session();
    let nav = use_navigator();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut field_errors = use_signal(|| None::<ValidationErrors>);
    let mut failure = use_signal(|| None::<String>);
    let mut submitting = use_signal(|| false);

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let api = api.clone();
        async move {
            if submitting() {
                return;
            }
            submitting.set(true);
            field_errors.set(None);
            failure.set(None);

            let request = LoginRequest::new(email(), password());
            match api.login(&request).await {
                Ok(user) => {
                    let home = user.role.home_path();
                    session.set(SessionState { user: Some(user) });
                    nav.replace(home);
                }
                Err(ApiError::Validation(errors)) => field_errors.set(Some(errors)),
                Err(e) => {
                    tracing::warn!("login failed: {e}");
                    failure.set(Some(e.user_message()));
                }
            }
            submitting.set(false);
        }
    };

    // Someone already signed in lands here after opening a section their
    // role may not enter.
    let signed_in = session().user;

    rsx! {
        div {
            class: "login-container",
            div {
                class: "card login-card",
                h1 { class: "page-title", "PM Board" }
                p { class: "stat-label", "Sign in to continue" }

                if let Some(user) = signed_in {
                    div {
                        class: "login-notice",
                        "Signed in as {user.display_name()}. "
                        Link { to: user.role.home_path(), "Go to your dashboard" }
                    }
                }

                if let Some(message) = failure() {
                    div { class: "error-banner", role: "alert", "{message}" }
                }

                form {
                    class: "form",
                    onsubmit: onsubmit,
                    div {
                        class: "field",
                        label { r#for: "email", "Email" }
                        input {
                            id: "email",
                            r#type: "email",
                            autocomplete: "username",
                            value: "{email}",
                            oninput: move |e| email.set(e.value()),
                        }
                        FieldHint { errors: field_errors(), field: "email" }
                    }
                    div {
                        class: "field",
                        label { r#for: "password", "Password" }
                        input {
                            id: "password",
                            r#type: "password",
                            autocomplete: "current-password",
                            value: "{password}",
                            oninput: move |e| password.set(e.value()),
                        }
                        FieldHint { errors: field_errors(), field: "password" }
                    }
                    button {
                        class: "btn btn-primary",
                        r#type: "submit",
                        disabled: submitting(),
                        if submitting() { "Signing in…" } else { "Sign in" }
                    }
                }

                p {
                    class: "stat-label",
                    "No account yet? "
                    Link { to: Route::PublicContact {}, "Request access" }
                }
            }
        }
    }
}

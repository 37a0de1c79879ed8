use api::ContactCategory;
use dioxus::prelude::*;
use ui::use_session;

use crate::views::contact_form::ContactForm;

#[component]
pub fn ClientContact() -> Element {
    let user = use_session().read().user.clone();

    rsx! {
        div {
            class: "page",
            h1 { class: "page-title", "Contact the team" }
            p {
                class: "stat-label",
                "Questions, bug reports or complaints about your projects reach the administrators."
            }
            div {
                class: "card",
                ContactForm { user, default_category: ContactCategory::Question }
            }
        }
    }
}

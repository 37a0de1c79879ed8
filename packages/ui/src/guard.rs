//! `ProtectedRoute`: renders its children only for roles allowed in a section.

use api::{authorize, GuardOutcome, Section, LOGIN_PATH};
use dioxus::prelude::*;
use dioxus::router::router;

use crate::session::{use_api, use_session, SessionState};
use crate::skeleton::PageSkeleton;

#[derive(Clone, Debug, PartialEq)]
enum GuardState {
    Checking,
    Authorized,
    Redirecting,
}

#[component]
pub fn ProtectedRoute(section: Section, children: Element) -> Element {
    let api = use_api();
    let mut session = use_session();
    let nav = use_navigator();
    let mut state = use_signal(|| GuardState::Checking);

    // Re-run on every navigation inside the section and whenever the
    // signed-in identity changes (login, logout, 401). Reading the route
    // string subscribes the resource to the router.
    let _check = use_resource(move || {
        let api = api.clone();
        let route = router().full_route_string();
        let user_id = session.read().user.as_ref().map(|u| u.id);
        async move {
            tracing::debug!("guard: checking {section} at {route} for {user_id:?}");
            match authorize(&api, section).await {
                GuardOutcome::Authorized(user) => {
                    if session.peek().user.as_ref() != Some(&user) {
                        session.set(SessionState { user: Some(user) });
                    }
                    state.set(GuardState::Authorized);
                }
                GuardOutcome::Redirect(reason) => {
                    state.set(GuardState::Redirecting);
                    if reason.clears_session() && session.peek().user.is_some() {
                        session.set(SessionState::default());
                    }
                    nav.replace(LOGIN_PATH);
                }
            }
        }
    });

    match state() {
        GuardState::Authorized => rsx! { {children} },
        GuardState::Checking | GuardState::Redirecting => rsx! { PageSkeleton {} },
    }
}

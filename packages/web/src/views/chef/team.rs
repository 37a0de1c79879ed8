//! Developer assignment for one project.

use std::collections::BTreeSet;

use api::{Id, Project, Role, User};
use dioxus::prelude::*;
use futures::future::try_join3;
use ui::{use_api, use_query, use_toast, ErrorBanner, LoadState, PageSkeleton, RoleBadge};

use crate::views::common::{use_param, EmptyState};
use crate::Route;

#[component]
pub fn ProjectTeam(id: Id) -> Element {
    let id = use_param(id);
    let data = use_query(move |api| {
        let id = id();
        async move {
            let (project, developers, interns) = try_join3(
                api.project(id),
                api.users_by_role(Role::Developpeur),
                api.users_by_role(Role::Stagiaire),
            )
            .await?;
            let mut candidates: Vec<User> = developers.into_iter().chain(interns).collect();
            candidates.retain(|u| u.active);
            candidates.sort_by_key(|u| u.display_name().to_lowercase());
            Ok((project, candidates))
        }
    });

    rsx! {
        div {
            class: "page",
            h1 { class: "page-title", "Project team" }
            {match data.state() {
                LoadState::Idle | LoadState::Loading => rsx! { PageSkeleton {} },
                LoadState::Failed(message) => rsx! {
                    ErrorBanner { message, on_retry: move |_| data.refresh() }
                },
                LoadState::Ready((project, candidates)) => rsx! {
                    TeamPicker { key: "{project.id}", project, candidates }
                },
            }}
        }
    }
}

#[component]
fn TeamPicker(project: Project, candidates: Vec<User>) -> Element {
    let api = use_api();
    let toasts = use_toast();
    let nav = use_navigator();
    let project_id = project.id;
    let mut selected = use_signal(|| {
        project
            .developers
            .iter()
            .map(|d| d.id)
            .collect::<BTreeSet<Id>>()
    });
    let mut saving = use_signal(|| false);

    let save = move |_| {
        let api = api.clone();
        async move {
            if saving() {
                return;
            }
            saving.set(true);
            let ids: Vec<Id> = selected.read().iter().copied().collect();
            match api.assign_developers(project_id, &ids).await {
                Ok(project) => {
                    toasts.success(format!(
                        "{} now has {} team member(s)",
                        project.title,
                        project.developers.len()
                    ));
                    nav.push(Route::ProjectDetail { id: project_id });
                }
                Err(e) => {
                    tracing::warn!("team update for project {project_id} failed: {e}");
                    toasts.error(e.user_message());
                }
            }
            saving.set(false);
        }
    };

    rsx! {
        p { class: "stat-label", "Project: {project.title}" }
        if candidates.is_empty() {
            EmptyState { message: "No active developer or intern account yet." }
        } else {
            div {
                class: "card team-list",
                for user in candidates {
                    label {
                        key: "{user.id}",
                        class: "team-member",
                        input {
                            r#type: "checkbox",
                            checked: selected.read().contains(&user.id),
                            onchange: move |e| {
                                if e.checked() {
                                    selected.write().insert(user.id);
                                } else {
                                    selected.write().remove(&user.id);
                                }
                            },
                        }
                        span { "{user.display_name()}" }
                        RoleBadge { role: user.role }
                        if let Some(job) = user.job_title.clone() {
                            span { class: "stat-label", "{job}" }
                        }
                    }
                }
            }
        }
        div {
            class: "toolbar",
            button {
                class: "btn btn-primary",
                disabled: saving(),
                onclick: save,
                "Save team ({selected.read().len()})"
            }
            Link {
                class: "btn btn-secondary",
                to: Route::ProjectDetail { id: project_id },
                "Cancel"
            }
        }
    }
}

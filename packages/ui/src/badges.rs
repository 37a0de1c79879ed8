//! Coloured chips for statuses, priorities, project types and roles.

use api::{Priority, ProjectStatus, ProjectType, Role, TaskStatus};
use dioxus::prelude::*;

/// Colour family of a chip; maps to a `badge-*` class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Neutral,
    Info,
    Success,
    Warning,
    Danger,
    Accent,
}

impl Tone {
    pub fn class(&self) -> &'static str {
        match self {
            Tone::Neutral => "badge badge-neutral",
            Tone::Info => "badge badge-info",
            Tone::Success => "badge badge-success",
            Tone::Warning => "badge badge-warning",
            Tone::Danger => "badge badge-danger",
            Tone::Accent => "badge badge-accent",
        }
    }
}

pub fn project_status_tone(status: ProjectStatus) -> Tone {
    match status {
        ProjectStatus::InProgress => Tone::Info,
        ProjectStatus::Done => Tone::Success,
        ProjectStatus::Pending => Tone::Warning,
        ProjectStatus::Cancelled => Tone::Neutral,
    }
}

pub fn task_status_tone(status: TaskStatus) -> Tone {
    match status {
        TaskStatus::NotStarted => Tone::Neutral,
        TaskStatus::InProgress => Tone::Info,
        TaskStatus::Blocked => Tone::Danger,
        TaskStatus::Done => Tone::Success,
    }
}

pub fn priority_tone(priority: Priority) -> Tone {
    match priority {
        Priority::Low => Tone::Neutral,
        Priority::Medium => Tone::Info,
        Priority::High => Tone::Warning,
        Priority::Urgent => Tone::Danger,
    }
}

pub fn project_type_tone(project_type: ProjectType) -> Tone {
    match project_type {
        ProjectType::Delivery => Tone::Accent,
        ProjectType::Maintenance => Tone::Warning,
        ProjectType::Internal => Tone::Neutral,
    }
}

pub fn role_tone(role: Role) -> Tone {
    match role {
        Role::Admin => Tone::Danger,
        Role::ChefDeProjet => Tone::Accent,
        Role::Developpeur => Tone::Info,
        Role::Stagiaire => Tone::Neutral,
        Role::Client => Tone::Success,
    }
}

#[component]
pub fn Badge(label: String, tone: Tone) -> Element {
    rsx! {
        span { class: tone.class(), "{label}" }
    }
}

#[component]
pub fn StatusBadge(status: ProjectStatus) -> Element {
    rsx! {
        Badge { label: status.label().to_string(), tone: project_status_tone(status) }
    }
}

#[component]
pub fn TaskStatusBadge(status: TaskStatus) -> Element {
    rsx! {
        Badge { label: status.label().to_string(), tone: task_status_tone(status) }
    }
}

#[component]
pub fn PriorityBadge(priority: Priority) -> Element {
    rsx! {
        Badge { label: priority.label().to_string(), tone: priority_tone(priority) }
    }
}

#[component]
pub fn TypeBadge(project_type: ProjectType) -> Element {
    rsx! {
        Badge { label: project_type.label().to_string(), tone: project_type_tone(project_type) }
    }
}

#[component]
pub fn RoleBadge(role: Role) -> Element {
    rsx! {
        Badge { label: role.label().to_string(), tone: role_tone(role) }
    }
}

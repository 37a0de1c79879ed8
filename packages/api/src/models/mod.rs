//! Canonical entities and their wire adapters.
//!
//! Each entity module pairs a canonical type with a tolerant `Raw*` DTO and a
//! [`FromWire`] implementation that reconciles the backend's field spellings.

mod analytics;
mod auth;
mod contact;
mod dashboard;
mod project;
mod qrcode;
mod task;
mod user;
pub mod wire;

pub use analytics::{
    AnalyticsOverview, RawStatusBreakdown, RawTrendPoint, RawWorkload, StatusBreakdown,
    StatusCount, Trend, TrendPoint, Workload,
};
pub use auth::{LoginRequest, LoginResponse, RawLoginResponse};
pub use contact::{
    ContactCategory, ContactDraft, ContactRequest, RawContactRequest, MAX_DESCRIPTION_LEN,
};
pub use dashboard::{DashboardSummary, UPCOMING_LIMIT};
pub use project::{
    clamp_progression, Project, ProjectDraft, ProjectRef, ProjectStatus, ProjectType, RawProject,
    RawTaskStats, TaskStats,
};
pub use qrcode::{public_project_url, QrCode, RawQrCode};
pub use task::{Priority, RawProjectRef, RawTask, Task, TaskDraft, TaskStatus};
pub use user::{RawUser, RawUserRef, Role, User, UserDraft, UserRef};
pub use wire::{FromWire, Id, ListEnvelope};

//! # API crate: typed REST layer of the project-management front-end
//!
//! Everything the pages know about the backend goes through this crate. It
//! has no UI dependency, so the whole request/normalization/session path is
//! testable on native targets against [`mock::MockTransport`] and
//! [`store::MemoryStore`].
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`client`] | [`ApiClient`]: bearer injection, 401 handling, status mapping, body decoding |
//! | [`transport`] | [`Transport`] seam and the `reqwest`-backed [`HttpTransport`] |
//! | [`mock`] | Scripted in-memory transport for tests |
//! | [`session`] | Typed accessors for the persisted `token` / `user` keys |
//! | [`guard`] | Route-guard decision per [`Section`] |
//! | [`models`] | Canonical entities and their wire adapters |
//! | [`validation`] | Client-side form checks |
//! | [`cache`] | TTL cache behind the analytics endpoints |
//! | [`request`] | Stale-response detection by request identity |
//!
//! ## Services
//!
//! Domain operations are methods on [`ApiClient`], one per endpoint:
//!
//! - **Auth**: `login`, `current_user`, `logout`
//! - **Projects**: `projects`, `project`, `create_project`, `update_project`,
//!   `delete_project`, `chef_projects`, `client_projects`, `developer_projects`,
//!   `assign_developers`, `public_project`
//! - **Tasks**: `project_tasks`, `task`, `create_task`, `update_task`,
//!   `update_task_status`, `delete_task`, `my_tasks`
//! - **Users**: `users`, `user`, `create_user`, `update_user`, `delete_user`,
//!   `set_user_active`, `users_by_role`
//! - **Contact**: `submit_contact`, `contact_requests`, `mark_contact_processed`,
//!   `delete_contact`
//! - **Dashboard**: `dashboard_data`, `dashboard_summary`
//! - **Analytics** (cached): `analytics_overview`, `projects_by_status`,
//!   `tasks_trend`, `workload`, `invalidate_analytics`
//! - **QR code**: `project_qr_code`, `project_share_url`

pub mod cache;
pub mod client;
pub mod error;
pub mod guard;
pub mod mock;
pub mod models;
pub mod request;
pub mod session;
pub mod transport;
pub mod validation;

mod services;

pub use client::ApiClient;
pub use error::{ApiError, GENERIC_ERROR_MESSAGE};
pub use guard::{authorize, GuardOutcome, RedirectReason, Section, LOGIN_PATH};
pub use models::*;
pub use request::{RequestTicket, RequestTracker};
pub use session::{Session, SessionError};
pub use transport::{HttpTransport, Method, Transport};
pub use validation::{FieldError, ValidationErrors};

pub use store::{AppConfig, KeyValueStore, MemoryStore};

//! This crate contains all shared UI for the workspace.

use dioxus::prelude::*;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

pub const UI_CSS: Asset = asset!("/assets/ui.css");

mod session;
pub use session::{
    make_client, redirect_to_login, use_api, use_config, use_session, AppClient, LogoutButton,
    PlatformStore, SessionProvider, SessionState,
};

mod guard;
pub use guard::ProtectedRoute;

mod nav;
pub use nav::{nav_links, NavIcon, NavLink, NavShell};

pub mod query;
pub use query::{use_query, LoadState, Query};

mod toast;
pub use toast::{use_toast, Toast, ToastKind, ToastProvider, ToastQueue, Toasts};

pub mod filters;
pub use filters::{ContactFilter, ProjectFilter, SearchInput, TaskFilter, UserFilter};

pub mod pagination;
pub use pagination::{page_count, paginate, Pagination};

pub mod badges;
pub use badges::{
    Badge, PriorityBadge, RoleBadge, StatusBadge, TaskStatusBadge, Tone, TypeBadge,
};

mod progress;
pub use progress::ProgressBar;

mod skeleton;
pub use skeleton::{ErrorBanner, PageSkeleton, Skeleton, TableSkeleton};

pub mod charts;
pub use charts::{Bar, BarChart, Sparkline};

mod modal;
pub use modal::{ConfirmDialog, ModalOverlay};

mod timer;
pub use timer::{format_elapsed, TaskTimer};

mod share;
pub use share::{share_link, ShareButton, ShareOutcome};

pub mod format;

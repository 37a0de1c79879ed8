pub(crate) mod common;
mod contact_form;

mod login;
pub use login::Login;

mod public;
pub use public::{PublicContact, PublicProject};

mod not_found;
pub use not_found::NotFound;

mod admin;
pub use admin::{
    AdminAnalytics, AdminContacts, AdminDashboard, AdminUserEdit, AdminUserNew, AdminUsers,
};

mod chef;
pub use chef::{
    ChefDashboard, ChefProjects, ProjectDetail, ProjectEdit, ProjectNew, ProjectTeam, TaskEdit,
    TaskNew,
};

mod developer;
pub use developer::{DeveloperDashboard, DeveloperTasks};

mod client;
pub use client::{ClientContact, ClientProjectDetail, ClientProjects};

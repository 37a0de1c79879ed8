mod contact;
pub use contact::ClientContact;

mod project_detail;
pub use project_detail::ClientProjectDetail;

mod projects;
pub use projects::ClientProjects;

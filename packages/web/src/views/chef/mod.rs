mod dashboard;
pub use dashboard::ChefDashboard;

mod project_detail;
pub use project_detail::ProjectDetail;

mod project_form;
pub use project_form::{ProjectEdit, ProjectNew};

mod projects;
pub use projects::ChefProjects;

mod task_form;
pub use task_form::{TaskEdit, TaskNew};

mod team;
pub use team::ProjectTeam;

mod dashboard;
pub use dashboard::DeveloperDashboard;

mod tasks;
pub use tasks::DeveloperTasks;

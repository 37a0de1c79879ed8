mod analytics;
pub use analytics::AdminAnalytics;

mod contacts;
pub use contacts::AdminContacts;

mod dashboard;
pub use dashboard::AdminDashboard;

mod user_form;
pub use user_form::{AdminUserEdit, AdminUserNew};

mod users;
pub use users::AdminUsers;

use api::{Id, Section};
use dioxus::prelude::*;

use store::AppConfig;
use ui::{NavShell, ProtectedRoute, SessionProvider, ToastProvider};
use views::{
    AdminAnalytics, AdminContacts, AdminDashboard, AdminUserEdit, AdminUserNew, AdminUsers,
    ChefDashboard, ChefProjects, ClientContact, ClientProjectDetail, ClientProjects,
    DeveloperDashboard, DeveloperTasks, Login, NotFound, ProjectDetail, ProjectEdit, ProjectNew,
    ProjectTeam, PublicContact, PublicProject, TaskEdit, TaskNew,
};

mod views;

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[route("/")]
    Root {},
    #[route("/auth/login")]
    Login {},
    #[route("/contact")]
    PublicContact {},
    #[route("/public/projects/:id")]
    PublicProject { id: Id },

    #[nest("/admin")]
        #[layout(AdminLayout)]
            #[route("/dashboard")]
            AdminDashboard {},
            #[route("/users")]
            AdminUsers {},
            #[route("/users/new")]
            AdminUserNew {},
            #[route("/users/:id/edit")]
            AdminUserEdit { id: Id },
            #[route("/contacts")]
            AdminContacts {},
            #[route("/analytics")]
            AdminAnalytics {},
        #[end_layout]
    #[end_nest]

    #[nest("/chef")]
        #[layout(ChefLayout)]
            #[route("/dashboard")]
            ChefDashboard {},
            #[route("/projects")]
            ChefProjects {},
            #[route("/projects/new")]
            ProjectNew {},
            #[route("/projects/:id")]
            ProjectDetail { id: Id },
            #[route("/projects/:id/edit")]
            ProjectEdit { id: Id },
            #[route("/projects/:id/team")]
            ProjectTeam { id: Id },
            #[route("/projects/:project_id/tasks/new")]
            TaskNew { project_id: Id },
            #[route("/projects/:project_id/tasks/:id/edit")]
            TaskEdit { project_id: Id, id: Id },
        #[end_layout]
    #[end_nest]

    #[nest("/developer")]
        #[layout(DeveloperLayout)]
            #[route("/dashboard")]
            DeveloperDashboard {},
            #[route("/tasks")]
            DeveloperTasks {},
        #[end_layout]
    #[end_nest]

    #[nest("/client")]
        #[layout(ClientLayout)]
            #[route("/projects")]
            ClientProjects {},
            #[route("/projects/:id")]
            ClientProjectDetail { id: Id },
            #[route("/contact")]
            ClientContact {},
        #[end_layout]
    #[end_nest]

    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

const MAIN_CSS: Asset = asset!("/assets/main.css");
const APP_TOML: &str = include_str!("../app.toml");

fn main() {
    dioxus::launch(App);
}

fn load_config() -> AppConfig {
    match AppConfig::from_toml(APP_TOML) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("invalid {}: {e}, using defaults", AppConfig::filename());
            AppConfig::default()
        }
    }
}

#[component]
fn App() -> Element {
    let config = use_hook(load_config);

    rsx! {
        // Global app resources
        document::Link { rel: "stylesheet", href: ui::UI_CSS }
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        SessionProvider {
            config: config,
            ToastProvider {
                Router::<Route> {}
            }
        }
    }
}

/// Send `/` to the signed-in user's home, or to the login page.
#[component]
fn Root() -> Element {
    let session = ui::use_session();
    let nav = use_navigator();
    use_effect(move || {
        let target = match &session.read().user {
            Some(user) => user.role.home_path(),
            None => api::LOGIN_PATH,
        };
        nav.replace(target);
    });
    rsx! {}
}

#[component]
fn SectionLayout(section: Section) -> Element {
    rsx! {
        ProtectedRoute {
            section: section,
            NavShell {
                section: section,
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn AdminLayout() -> Element {
    rsx! { SectionLayout { section: Section::Admin } }
}

#[component]
fn ChefLayout() -> Element {
    rsx! { SectionLayout { section: Section::Chef } }
}

#[component]
fn DeveloperLayout() -> Element {
    rsx! { SectionLayout { section: Section::Developer } }
}

#[component]
fn ClientLayout() -> Element {
    rsx! { SectionLayout { section: Section::Client } }
}

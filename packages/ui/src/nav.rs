//! Per-role navigation shell.

use api::Section;
use dioxus::prelude::*;

use crate::icons::{
    FaChartLine, FaEnvelope, FaFolderOpen, FaGauge, FaListCheck, FaPaperPlane, FaUsers,
};
use crate::session::{use_session, LogoutButton};
use crate::Icon;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavIcon {
    Dashboard,
    Users,
    Inbox,
    Analytics,
    Projects,
    Tasks,
    Contact,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub path: &'static str,
    pub icon: NavIcon,
}

const fn link(label: &'static str, path: &'static str, icon: NavIcon) -> NavLink {
    NavLink { label, path, icon }
}

const ADMIN_LINKS: &[NavLink] = &[
    link("Dashboard", "/admin/dashboard", NavIcon::Dashboard),
    link("Users", "/admin/users", NavIcon::Users),
    link("Requests", "/admin/contacts", NavIcon::Inbox),
    link("Analytics", "/admin/analytics", NavIcon::Analytics),
    link("Projects", "/chef/projects", NavIcon::Projects),
];

const CHEF_LINKS: &[NavLink] = &[
    link("Dashboard", "/chef/dashboard", NavIcon::Dashboard),
    link("Projects", "/chef/projects", NavIcon::Projects),
];

const DEVELOPER_LINKS: &[NavLink] = &[
    link("Dashboard", "/developer/dashboard", NavIcon::Dashboard),
    link("My tasks", "/developer/tasks", NavIcon::Tasks),
];

const CLIENT_LINKS: &[NavLink] = &[
    link("My projects", "/client/projects", NavIcon::Projects),
    link("Contact", "/client/contact", NavIcon::Contact),
];

pub fn nav_links(section: Section) -> &'static [NavLink] {
    match section {
        Section::Admin => ADMIN_LINKS,
        Section::Chef => CHEF_LINKS,
        Section::Developer => DEVELOPER_LINKS,
        Section::Client => CLIENT_LINKS,
    }
}

#[component]
fn NavIconView(icon: NavIcon) -> Element {
    match icon {
        NavIcon::Dashboard => rsx! { Icon { icon: FaGauge, width: 14, height: 14 } },
        NavIcon::Users => rsx! { Icon { icon: FaUsers, width: 14, height: 14 } },
        NavIcon::Inbox => rsx! { Icon { icon: FaEnvelope, width: 14, height: 14 } },
        NavIcon::Analytics => rsx! { Icon { icon: FaChartLine, width: 14, height: 14 } },
        NavIcon::Projects => rsx! { Icon { icon: FaFolderOpen, width: 14, height: 14 } },
        NavIcon::Tasks => rsx! { Icon { icon: FaListCheck, width: 14, height: 14 } },
        NavIcon::Contact => rsx! { Icon { icon: FaPaperPlane, width: 14, height: 14 } },
    }
}

/// Sidebar with the section's links, the signed-in user, and the page body.
/// The link matching the current route gets the `active` class.
#[component]
pub fn NavShell(section: Section, children: Element) -> Element {
    let session = use_session();
    let user = session().user;

    rsx! {
        div {
            class: "shell",
            nav {
                class: "shell-nav",
                div { class: "shell-brand", "PM Board" }
                ul {
                    class: "shell-links",
                    for item in nav_links(section).iter() {
                        li {
                            key: "{item.path}",
                            Link {
                                to: item.path,
                                class: "shell-link",
                                active_class: "active",
                                NavIconView { icon: item.icon }
                                span { "{item.label}" }
                            }
                        }
                    }
                }
                div {
                    class: "shell-user",
                    if let Some(ref u) = user {
                        span { class: "shell-avatar", "{u.initials()}" }
                        div {
                            class: "shell-user-text",
                            span { class: "shell-user-name", "{u.display_name()}" }
                            span { class: "shell-user-role", "{u.role.label()}" }
                        }
                    }
                    LogoutButton { class: "shell-logout" }
                }
            }
            main {
                class: "shell-main",
                {children}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_links_stay_inside_reachable_sections() {
        for link in nav_links(Section::Developer) {
            assert!(link.path.starts_with("/developer/"));
        }
        for link in nav_links(Section::Client) {
            assert!(link.path.starts_with("/client/"));
        }
        // Admins may enter the chef section, so their menu may link into it.
        assert!(nav_links(Section::Admin)
            .iter()
            .all(|l| l.path.starts_with("/admin/") || l.path.starts_with("/chef/")));
    }
}

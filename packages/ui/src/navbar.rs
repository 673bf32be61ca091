use dioxus::prelude::*;

use crate::auth::{use_auth, LogoutButton};
use crate::theme::ThemeSelector;

#[component]
pub fn Navbar() -> Element {
    let auth = use_auth();
    let state = auth.state.read().clone();
    let home = if state.is_authenticated { "/dashboard" } else { "/" };

    rsx! {
        nav {
            class: "navbar",
            div {
                class: "navbar-start",
                Link { class: "navbar-brand", to: home, "Notes App" }
                if state.is_authenticated {
                    Link { class: "navbar-link", to: "/dashboard", "Dashboard" }
                    if state.is_admin() {
                        Link { class: "navbar-link", to: "/admin/users", "User Management" }
                    }
                }
            }
            div {
                class: "navbar-end",
                ThemeSelector {}
                if state.is_loading {
                    span { class: "spinner spinner-sm" }
                } else if let Some(user) = state.user {
                    span { class: "navbar-user", "{user.display_name()}" }
                    span {
                        class: if user.is_admin() { "badge badge-primary" } else { "badge badge-secondary" },
                        "{user.role_label()}"
                    }
                    LogoutButton { class: "btn btn-sm btn-ghost" }
                } else {
                    Link { class: "btn btn-sm btn-outline", to: "/login", "Login" }
                    Link { class: "btn btn-sm btn-primary", to: "/register", "Register" }
                }
            }
        }
    }
}

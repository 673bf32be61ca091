//! Shared UI for the notes client: session context, route guards, forms and
//! the dashboard and admin views.

pub mod components;
pub mod forms;
pub mod guard;
pub mod pagination;
pub mod services;
pub mod theme;
pub mod views;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

mod auth;
pub use auth::{use_auth, AuthHandle, AuthProvider, LogoutButton};

mod navbar;
pub use navbar::Navbar;

pub use forms::{LoginForm, RegisterForm};
pub use guard::{Capability, GuardDecision, RouteGuard, DASHBOARD_ROUTE, LOGIN_ROUTE};
pub use services::AppServices;
pub use theme::{use_theme, use_theme_provider, ThemeSelector, ThemeSignal};

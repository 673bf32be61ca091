//! Login page view.

use dioxus::prelude::*;
use ui::LoginForm;

use super::GuestOnly;

#[component]
pub fn Login() -> Element {
    rsx! {
        GuestOnly {
            div {
                class: "auth-page",
                h1 { class: "auth-title", "Sign in to your account" }
                LoginForm {}
            }
        }
    }
}

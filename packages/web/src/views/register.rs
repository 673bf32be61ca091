//! Registration page view.

use dioxus::prelude::*;
use ui::RegisterForm;

use super::GuestOnly;

#[component]
pub fn Register() -> Element {
    rsx! {
        GuestOnly {
            div {
                class: "auth-page",
                h1 { class: "auth-title", "Create an account" }
                RegisterForm {}
            }
        }
    }
}

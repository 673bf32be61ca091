//! Login and registration forms.

use std::time::Duration;

use api::models::Registration;
use dioxus::prelude::*;
use store::flash::{set_flash, take_flash, REGISTRATION_FLASH_KEY};

use crate::auth::use_auth;
use crate::components::{ErrorAlert, SuccessAlert};
use crate::guard::{DASHBOARD_ROUTE, LOGIN_ROUTE};

/// Form errors disappear on their own after this long.
pub const ERROR_DISPLAY: Duration = Duration::from_secs(5);

pub const REGISTRATION_SUCCESS: &str =
    "Registration successful! Please log in with your credentials.";

pub async fn sleep(duration: Duration) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
}

/// Show `message` and clear it after [`ERROR_DISPLAY`] unless it was replaced.
fn show_error(mut error: Signal<Option<String>>, message: String) {
    error.set(Some(message.clone()));
    spawn(async move {
        sleep(ERROR_DISPLAY).await;
        if error.peek().as_deref() == Some(message.as_str()) {
            error.set(None);
        }
    });
}

#[component]
pub fn LoginForm() -> Element {
    let auth = use_auth();
    let nav = use_navigator();
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let error = use_signal(|| Option::<String>::None);
    let mut submitting = use_signal(|| false);
    let success = use_signal(|| take_flash(&*auth.services().session_storage(), REGISTRATION_FLASH_KEY));

    let handle_login = move |evt: FormEvent| {
        evt.prevent_default();
        if email().trim().is_empty() || password().is_empty() {
            show_error(error, api::session::CREDENTIALS_REQUIRED.to_string());
            return;
        }
        spawn(async move {
            submitting.set(true);
            match auth.login(email(), password()).await {
                Ok(user) => {
                    tracing::info!(user_id = user.id, "logged in");
                    nav.push(DASHBOARD_ROUTE);
                }
                Err(e) => show_error(error, e.to_string()),
            }
            submitting.set(false);
        });
    };

    rsx! {
        form {
            class: "auth-form",
            onsubmit: handle_login,

            if let Some(message) = success() {
                SuccessAlert { message }
            }
            if let Some(message) = error() {
                ErrorAlert { message }
            }

            input {
                class: "input w-full",
                r#type: "email",
                placeholder: "Email",
                autocomplete: "username",
                value: email(),
                oninput: move |evt: FormEvent| email.set(evt.value()),
            }
            input {
                class: "input w-full",
                r#type: "password",
                placeholder: "Password",
                autocomplete: "current-password",
                value: password(),
                oninput: move |evt: FormEvent| password.set(evt.value()),
            }
            button {
                class: "btn btn-primary w-full",
                r#type: "submit",
                disabled: submitting(),
                if submitting() { "Signing in..." } else { "Sign in" }
            }
            p {
                class: "auth-switch",
                "Don't have an account? "
                Link { to: "/register", "Register" }
            }
        }
    }
}

#[component]
pub fn RegisterForm() -> Element {
    let auth = use_auth();
    let nav = use_navigator();
    let mut name = use_signal(String::new);
    let mut email = use_signal(String::new);
    let mut password = use_signal(String::new);
    let error = use_signal(|| Option::<String>::None);
    let mut submitting = use_signal(|| false);

    let handle_register = move |evt: FormEvent| {
        evt.prevent_default();
        let registration = Registration {
            email: email(),
            name: name(),
            password: password(),
        };
        if let Err(e) = api::session::validate_registration(&registration) {
            show_error(error, e.to_string());
            return;
        }
        spawn(async move {
            submitting.set(true);
            let services = auth.services();
            match services.auth.register(&registration).await {
                Ok(user) => {
                    tracing::info!(user_id = user.id, "registered");
                    set_flash(&*services.session_storage(), REGISTRATION_FLASH_KEY, REGISTRATION_SUCCESS);
                    nav.push(LOGIN_ROUTE);
                }
                Err(e) => show_error(error, e.to_string()),
            }
            submitting.set(false);
        });
    };

    rsx! {
        form {
            class: "auth-form",
            onsubmit: handle_register,

            if let Some(message) = error() {
                ErrorAlert { message }
            }

            input {
                class: "input w-full",
                r#type: "text",
                placeholder: "Name",
                value: name(),
                oninput: move |evt: FormEvent| name.set(evt.value()),
            }
            input {
                class: "input w-full",
                r#type: "email",
                placeholder: "Email",
                autocomplete: "username",
                value: email(),
                oninput: move |evt: FormEvent| email.set(evt.value()),
            }
            input {
                class: "input w-full",
                r#type: "password",
                placeholder: "Password (min 8 characters)",
                autocomplete: "new-password",
                value: password(),
                oninput: move |evt: FormEvent| password.set(evt.value()),
            }
            button {
                class: "btn btn-primary w-full",
                r#type: "submit",
                disabled: submitting(),
                if submitting() { "Creating account..." } else { "Register" }
            }
            p {
                class: "auth-switch",
                "Already have an account? "
                Link { to: "/login", "Sign in" }
            }
        }
    }
}

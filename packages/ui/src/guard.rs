//! # Route guard
//!
//! [`RouteGuard`] wraps protected page content. It renders its children only
//! once the session is known to satisfy the required [`Capability`]; until then
//! it shows a loading indicator, and when the check fails it replaces the
//! current route:
//!
//! | Situation | Outcome |
//! |-----------|---------|
//! | session still initializing | loading indicator |
//! | not authenticated | `/login` |
//! | `Admin` required, profile has no role yet | loading indicator while the role is re-checked |
//! | `Admin` required, role is not admin | `/dashboard` |
//! | otherwise | children |
//!
//! The decision itself is [`evaluate`], a pure function of the session state.
//!
//! A profile without a role triggers a background refresh, at most once per
//! [`GuardConfig::role_recheck_ms`](store::GuardConfig). If the role is still
//! unknown when no re-check is due, an admin page treats the user as non-admin.

use api::SessionState;
use dioxus::prelude::*;
use store::clock::now_millis;

use crate::auth::use_auth;

pub const LOGIN_ROUTE: &str = "/login";
pub const DASHBOARD_ROUTE: &str = "/dashboard";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Capability {
    Authenticated,
    Admin,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Checking,
    /// Authenticated, admin required, role not known yet.
    VerifyRole,
    Authorized,
    Redirect(&'static str),
}

pub fn evaluate(state: &SessionState, capability: Capability) -> GuardDecision {
    if state.is_loading {
        return GuardDecision::Checking;
    }
    if !state.is_authenticated {
        return GuardDecision::Redirect(LOGIN_ROUTE);
    }
    match capability {
        Capability::Authenticated => GuardDecision::Authorized,
        Capability::Admin if state.role_missing() => GuardDecision::VerifyRole,
        Capability::Admin if state.is_admin() => GuardDecision::Authorized,
        Capability::Admin => GuardDecision::Redirect(DASHBOARD_ROUTE),
    }
}

/// Whether a background role re-check should start now.
pub fn role_recheck_due(state: &SessionState, now: u64, recheck_ms: u64) -> bool {
    !state.is_loading && state.role_missing() && !state.refreshed_within(now, recheck_ms)
}

/// What to do with a decision, given whether a re-check can still run.
fn settle(decision: GuardDecision, recheck_due: bool) -> GuardDecision {
    match decision {
        GuardDecision::VerifyRole if !recheck_due => GuardDecision::Redirect(DASHBOARD_ROUTE),
        other => other,
    }
}

#[component]
pub fn RouteGuard(capability: Capability, children: Element) -> Element {
    let auth = use_auth();
    let nav = use_navigator();
    let decision = use_memo(move || evaluate(&auth.state.read(), capability));

    use_effect(move || {
        let recheck_ms = auth.services().guard_config().role_recheck_ms;
        let due = role_recheck_due(&auth.state.read(), now_millis(), recheck_ms);

        match settle(decision(), due) {
            GuardDecision::Redirect(target) => {
                tracing::debug!(?capability, to = target, "route guard redirecting");
                nav.replace(target);
            }
            _ if due => {
                tracing::debug!("role unknown, refreshing profile");
                spawn(async move {
                    auth.refresh().await;
                });
            }
            _ => {}
        }
    });

    match decision() {
        GuardDecision::Authorized => rsx! { {children} },
        GuardDecision::VerifyRole => rsx! { GuardLoading { message: "Verifying admin access..." } },
        _ => rsx! { GuardLoading { message: "Loading..." } },
    }
}

#[component]
fn GuardLoading(message: String) -> Element {
    rsx! {
        div {
            class: "guard-loading",
            span { class: "spinner" }
            p { "{message}" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::{Role, UserResponse};

    fn user(role: Option<Role>) -> UserResponse {
        UserResponse {
            id: 1,
            email: "ann@example.com".into(),
            name: "Ann".into(),
            role,
            is_active: true,
            created_at: String::new(),
        }
    }

    fn session(role: Option<Role>, last_refresh: u64) -> SessionState {
        let mut state = SessionState::default();
        state.logged_in(user(role), last_refresh);
        state
    }

    #[test]
    fn test_loading_is_checking() {
        let state = SessionState::default();
        assert_eq!(evaluate(&state, Capability::Authenticated), GuardDecision::Checking);
        assert_eq!(evaluate(&state, Capability::Admin), GuardDecision::Checking);
    }

    #[test]
    fn test_anonymous_goes_to_login() {
        let mut state = SessionState::default();
        state.logged_out();
        assert_eq!(
            evaluate(&state, Capability::Authenticated),
            GuardDecision::Redirect("/login")
        );
        assert_eq!(evaluate(&state, Capability::Admin), GuardDecision::Redirect("/login"));
    }

    #[test]
    fn test_admin_capability() {
        assert_eq!(
            evaluate(&session(Some(Role::Admin), 0), Capability::Admin),
            GuardDecision::Authorized
        );
        assert_eq!(
            evaluate(&session(Some(Role::User), 0), Capability::Admin),
            GuardDecision::Redirect("/dashboard")
        );
        assert_eq!(
            evaluate(&session(Some(Role::User), 0), Capability::Authenticated),
            GuardDecision::Authorized
        );
    }

    #[test]
    fn test_missing_role_rechecks_then_gives_up() {
        let state = session(None, 10_000);
        assert_eq!(evaluate(&state, Capability::Admin), GuardDecision::VerifyRole);
        assert_eq!(evaluate(&state, Capability::Authenticated), GuardDecision::Authorized);

        assert!(!role_recheck_due(&state, 12_000, 5_000));
        assert!(role_recheck_due(&state, 15_000, 5_000));

        assert_eq!(settle(GuardDecision::VerifyRole, true), GuardDecision::VerifyRole);
        assert_eq!(
            settle(GuardDecision::VerifyRole, false),
            GuardDecision::Redirect("/dashboard")
        );
        assert_eq!(settle(GuardDecision::Authorized, false), GuardDecision::Authorized);
    }

    #[test]
    fn test_no_recheck_when_role_known() {
        assert!(!role_recheck_due(&session(Some(Role::User), 0), 60_000, 5_000));
    }
}

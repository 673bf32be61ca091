use dioxus::prelude::*;
use ui::{use_auth, DASHBOARD_ROUTE};

/// Renders `children` for signed-out visitors; signed-in ones go to the dashboard.
#[component]
pub fn GuestOnly(children: Element) -> Element {
    let auth = use_auth();
    let nav = use_navigator();

    use_effect(move || {
        let state = auth.state.read();
        if !state.is_loading && state.is_authenticated {
            nav.replace(DASHBOARD_ROUTE);
        }
    });

    children
}

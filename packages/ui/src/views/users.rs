use api::models::{PageMeta, Role, UserQuery, UserResponse};
use dioxus::prelude::*;

use crate::components::{display_date, ErrorAlert, SuccessAlert};
use crate::forms::sleep;
use crate::pagination::{row_number, Pagination};
use crate::use_auth;

/// Confirmation banners stay up this long.
const NOTICE_DISPLAY: std::time::Duration = std::time::Duration::from_secs(3);

fn role_filter_value(role: Option<Role>) -> &'static str {
    role.map(Role::as_str).unwrap_or("")
}

fn status_filter_value(active: Option<bool>) -> &'static str {
    match active {
        None => "",
        Some(true) => "active",
        Some(false) => "inactive",
    }
}

fn parse_status_filter(value: &str) -> Option<bool> {
    match value {
        "active" => Some(true),
        "inactive" => Some(false),
        _ => None,
    }
}

fn replace_user(users: &mut [UserResponse], updated: &UserResponse) {
    if let Some(slot) = users.iter_mut().find(|u| u.id == updated.id) {
        *slot = updated.clone();
    }
}

/// Paginated user table with filters and a details panel.
#[component]
pub fn UsersView() -> Element {
    let auth = use_auth();
    let nav = use_navigator();
    let mut query = use_signal(UserQuery::default);
    let mut users = use_signal(Vec::<UserResponse>::new);
    let mut meta = use_signal(PageMeta::default);
    let mut loading = use_signal(|| true);
    let mut error = use_signal(|| Option::<String>::None);
    let mut notice = use_signal(|| Option::<String>::None);
    let mut selected = use_signal(|| Option::<UserResponse>::None);
    let mut loading_details = use_signal(|| false);
    let mut updating = use_signal(|| false);
    // Bumped after a change to re-run the loader.
    let mut reload = use_signal(|| 0u32);

    let _loader = use_resource(move || {
        let query = query();
        let _ = reload();
        async move {
            loading.set(true);
            error.set(None);
            match auth.services().admin.get_users(&query).await {
                Ok(page) => {
                    users.set(page.items);
                    meta.set(page.meta);
                }
                Err(e) => error.set(Some(e.to_string())),
            }
            loading.set(false);
        }
    });

    let mut show_notice = move |message: String| {
        notice.set(Some(message.clone()));
        spawn(async move {
            sleep(NOTICE_DISPLAY).await;
            if notice.peek().as_deref() == Some(message.as_str()) {
                notice.set(None);
            }
        });
    };

    let open_details = move |user_id: i64| {
        if selected.read().as_ref().is_some_and(|u| u.id == user_id) {
            return;
        }
        spawn(async move {
            loading_details.set(true);
            match auth.services().admin.get_user_details(user_id).await {
                Ok(user) => selected.set(Some(user)),
                Err(e) => error.set(Some(e.to_string())),
            }
            loading_details.set(false);
        });
    };

    let change_role = move |(user_id, role): (i64, Role)| {
        spawn(async move {
            updating.set(true);
            error.set(None);
            match auth.services().admin.update_user_role(user_id, role.as_str()).await {
                Ok(updated) => {
                    replace_user(&mut users.write(), &updated);
                    selected.set(Some(updated));
                    show_notice(format!("User role updated to {}", role.as_str()));
                    reload += 1;
                }
                Err(e) => error.set(Some(e.to_string())),
            }
            updating.set(false);
        });
    };

    let change_status = move |(user_id, active): (i64, bool)| {
        spawn(async move {
            updating.set(true);
            error.set(None);
            match auth.services().admin.update_user_status(user_id, active).await {
                Ok(updated) => {
                    replace_user(&mut users.write(), &updated);
                    selected.set(Some(updated));
                    show_notice(format!("User {}", if active { "activated" } else { "deactivated" }));
                    reload += 1;
                }
                Err(e) => error.set(Some(e.to_string())),
            }
            updating.set(false);
        });
    };

    let current = query();
    let page_meta = meta();

    rsx! {
        div {
            class: "page",
            div { class: "page-header", h1 { class: "page-title", "User Management" } }

            if let Some(message) = notice() {
                SuccessAlert { message }
            }
            if let Some(message) = error() {
                ErrorAlert { message }
            }

            div {
                class: "filters",
                label {
                    "Role"
                    select {
                        class: "select",
                        value: role_filter_value(current.role),
                        onchange: move |evt: FormEvent| {
                            let mut q = query();
                            q.role = Role::parse_assignable(&evt.value());
                            q.page = 1;
                            query.set(q);
                        },
                        option { value: "", "All Roles" }
                        option { value: "admin", "Admin" }
                        option { value: "user", "User" }
                    }
                }
                label {
                    "Status"
                    select {
                        class: "select",
                        value: status_filter_value(current.is_active),
                        onchange: move |evt: FormEvent| {
                            let mut q = query();
                            q.is_active = parse_status_filter(&evt.value());
                            q.page = 1;
                            query.set(q);
                        },
                        option { value: "", "All Status" }
                        option { value: "active", "Active" }
                        option { value: "inactive", "Inactive" }
                    }
                }
                button {
                    class: "btn btn-outline",
                    onclick: move |_| {
                        let q = query();
                        query.set(UserQuery { size: q.size, ..UserQuery::default() });
                    },
                    "Clear Filters"
                }
            }

            if loading() {
                div { class: "loading-block", span { class: "spinner" } }
            } else {
                div {
                    class: "users-layout",
                    div {
                        class: "users-table",
                        table {
                            class: "table",
                            thead {
                                tr {
                                    th { "S.R" }
                                    th { "Name" }
                                    th { "Email" }
                                    th { "Role" }
                                    th { "Status" }
                                    th { "Actions" }
                                }
                            }
                            tbody {
                                for (index, user) in users().into_iter().enumerate() {
                                    tr {
                                        key: "{user.id}",
                                        class: if selected.read().as_ref().is_some_and(|s| s.id == user.id) { "selected" } else { "" },
                                        td { "{row_number(current.page, current.size, index)}" }
                                        td { "{user.name}" }
                                        td { "{user.email}" }
                                        td { RoleBadge { user: user.clone() } }
                                        td { StatusBadge { active: user.is_active } }
                                        td {
                                            button {
                                                class: "btn btn-xs btn-info",
                                                aria_label: "View user details",
                                                onclick: move |_| open_details(user.id),
                                                "Details"
                                            }
                                            button {
                                                class: "btn btn-xs btn-accent",
                                                aria_label: "View user notes",
                                                onclick: move |_| {
                                                    nav.push(format!("/admin/users/{}/notes", user.id).as_str());
                                                },
                                                "Notes"
                                            }
                                        }
                                    }
                                }
                            }
                        }
                        if users.read().is_empty() {
                            p { class: "empty-state", "No users found" }
                        }
                        Pagination {
                            current: current.page,
                            total_pages: page_meta.pages,
                            total_items: page_meta.total,
                            page_size: current.size,
                            on_page: move |page| {
                                let mut q = query();
                                q.page = page;
                                query.set(q);
                            },
                            on_page_size: move |size| {
                                let mut q = query();
                                q.size = size;
                                q.page = 1;
                                query.set(q);
                            },
                        }
                    }

                    if let Some(user) = selected() {
                        div {
                            class: "details-panel",
                            h2 { "User Details" }
                            if loading_details() {
                                span { class: "spinner" }
                            } else {
                                h3 { "{user.name}" }
                                RoleBadge { user: user.clone() }
                                p { "{user.email}" }
                                p { class: "muted", "Created: {display_date(&user.created_at)}" }
                                StatusBadge { active: user.is_active }

                                h4 { "Role Management" }
                                div {
                                    class: "button-row",
                                    button {
                                        class: "btn btn-sm",
                                        disabled: user.is_admin() || updating(),
                                        onclick: move |_| change_role((user.id, Role::Admin)),
                                        "Make Admin"
                                    }
                                    button {
                                        class: "btn btn-sm",
                                        disabled: user.role == Some(Role::User) || updating(),
                                        onclick: move |_| change_role((user.id, Role::User)),
                                        "Make User"
                                    }
                                }

                                h4 { "Account Status" }
                                div {
                                    class: "button-row",
                                    button {
                                        class: "btn btn-sm",
                                        disabled: user.is_active || updating(),
                                        onclick: move |_| change_status((user.id, true)),
                                        "Activate"
                                    }
                                    button {
                                        class: "btn btn-sm",
                                        disabled: !user.is_active || updating(),
                                        onclick: move |_| change_status((user.id, false)),
                                        "Deactivate"
                                    }
                                }

                                button {
                                    class: "btn btn-sm btn-ghost",
                                    onclick: move |_| selected.set(None),
                                    "Close Details"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn RoleBadge(user: UserResponse) -> Element {
    rsx! {
        span {
            class: if user.is_admin() { "badge badge-primary" } else { "badge badge-secondary" },
            "{user.role_label()}"
        }
    }
}

#[component]
fn StatusBadge(active: bool) -> Element {
    rsx! {
        span {
            class: if active { "badge badge-success" } else { "badge badge-error" },
            if active { "Active" } else { "Inactive" }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_filter_round_trip() {
        for value in [None, Some(true), Some(false)] {
            assert_eq!(parse_status_filter(status_filter_value(value)), value);
        }
    }

    #[test]
    fn test_role_filter_value() {
        assert_eq!(role_filter_value(None), "");
        assert_eq!(Role::parse_assignable(role_filter_value(Some(Role::Admin))), Some(Role::Admin));
    }

    #[test]
    fn test_replace_user_by_id() {
        let user = |id, active| UserResponse {
            id,
            email: format!("{id}@x"),
            name: String::new(),
            role: Some(Role::User),
            is_active: active,
            created_at: String::new(),
        };
        let mut users = vec![user(1, true), user(2, true)];
        replace_user(&mut users, &user(2, false));
        assert!(users[0].is_active);
        assert!(!users[1].is_active);

        replace_user(&mut users, &user(9, false));
        assert_eq!(users.len(), 2);
    }
}

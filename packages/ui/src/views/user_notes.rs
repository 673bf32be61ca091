use api::models::{filter_notes, NoteResponse, UserResponse};
use api::notes::remove_note;
use dioxus::prelude::*;

use crate::components::{ErrorAlert, NoteCard, PendingDeletes, SearchInput, SuccessAlert};
use crate::forms::sleep;
use crate::use_auth;
use crate::Icon;
use crate::icons::FaArrowLeft;

/// Positive integer route segment.
pub fn parse_id(segment: &str) -> Option<i64> {
    segment.trim().parse::<i64>().ok().filter(|id| *id > 0)
}

/// Notes owned by one user, as seen by an admin.
#[component]
pub fn UserNotesView(user_id: String) -> Element {
    let auth = use_auth();
    let id = parse_id(&user_id);
    let mut user = use_signal(|| Option::<UserResponse>::None);
    let mut notes = use_signal(Vec::<NoteResponse>::new);
    let mut loading = use_signal(|| true);
    let mut error = use_signal(|| Option::<String>::None);
    let mut notice = use_signal(|| Option::<String>::None);
    let mut query = use_signal(String::new);

    let _loader = use_resource(use_reactive!(|id| async move {
        let Some(id) = id else {
            error.set(Some("Invalid user ID".to_string()));
            loading.set(false);
            return;
        };
        loading.set(true);
        error.set(None);
        let services = auth.services();
        let result = async {
            let owner = services.admin.get_user_details(id).await?;
            user.set(Some(owner));
            services.notes.get_notes_by_user(id).await
        }
        .await;
        match result {
            Ok(list) => notes.set(list),
            Err(e) => error.set(Some(e.to_string())),
        }
        loading.set(false);
    }));

    let mut pending = use_signal(PendingDeletes::default);

    let handle_delete = move |note_id: i64| {
        if !pending.write().begin(note_id) {
            return;
        }
        spawn(async move {
            let result = auth.services().notes.delete_note(note_id).await;
            pending.write().finish(note_id);
            match result {
                Ok(()) => {
                    remove_note(&mut notes.write(), note_id);
                    notice.set(Some("Note deleted successfully".to_string()));
                    sleep(std::time::Duration::from_secs(3)).await;
                    notice.set(None);
                }
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    };

    let owner = user();
    let heading = if loading() {
        "Loading...".to_string()
    } else {
        owner
            .as_ref()
            .map(|u| format!("Notes for {}", u.name))
            .unwrap_or_else(|| "User Notes".to_string())
    };
    let visible: Vec<NoteResponse> = filter_notes(&notes.read(), &query())
        .into_iter()
        .cloned()
        .collect();

    rsx! {
        div {
            class: "page",
            div {
                class: "page-header",
                div {
                    Link {
                        class: "btn btn-ghost btn-sm",
                        to: "/admin/users",
                        Icon { icon: FaArrowLeft, width: 14, height: 14 }
                        "Back to Users"
                    }
                    h1 { class: "page-title", "{heading}" }
                    if let Some(owner) = owner {
                        p { class: "muted", "{owner.email} · {owner.role_label()}" }
                    }
                }
                SearchInput { value: query(), on_change: move |q| query.set(q) }
            }

            if let Some(message) = notice() {
                SuccessAlert { message }
            }
            if let Some(message) = error() {
                ErrorAlert { message }
            }

            if loading() {
                div { class: "loading-block", span { class: "spinner" } }
            } else if !visible.is_empty() {
                div {
                    class: "notes-grid",
                    for note in visible {
                        NoteCard {
                            key: "{note.id}",
                            href: id.map(|uid| format!("/admin/users/{uid}/notes/{}", note.id)),
                            note: note.clone(),
                            on_delete: handle_delete,
                            deleting: pending.read().contains(note.id),
                        }
                    }
                }
            } else if !query().trim().is_empty() {
                div {
                    class: "empty-state",
                    p { "No notes matching “{query}”" }
                    button { class: "btn btn-outline btn-sm", onclick: move |_| query.set(String::new()), "Clear Search" }
                }
            } else if error().is_none() {
                div {
                    class: "empty-state",
                    p { class: "empty-title", "This user has no notes" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("42"), Some(42));
        assert_eq!(parse_id(" 7 "), Some(7));
        assert_eq!(parse_id("abc"), None);
        assert_eq!(parse_id(""), None);
        assert_eq!(parse_id("0"), None);
        assert_eq!(parse_id("-3"), None);
    }
}

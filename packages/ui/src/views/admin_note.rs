use api::models::{NoteResponse, NoteUpdate, UserResponse};
use dioxus::prelude::*;

use super::user_notes::parse_id;
use crate::components::{display_date, ErrorAlert, NoteDraft, NoteForm};
use crate::use_auth;
use crate::Icon;
use crate::icons::FaArrowLeft;

/// Message shown when the note's owner differs from the user in the route.
pub fn ownership_error(note: &NoteResponse, user: &UserResponse) -> Option<String> {
    (note.owner_id != user.id).then(|| format!("This note does not belong to user {}", user.name))
}

/// The form stays up once the note is loaded, whatever error sits above it, so
/// a failed save keeps the admin's edits.
pub fn shows_form(loading: bool, note: Option<&NoteResponse>) -> bool {
    !loading && note.is_some()
}

/// Edit a single note on behalf of its owner.
#[component]
pub fn AdminNoteView(user_id: String, note_id: String) -> Element {
    let auth = use_auth();
    let nav = use_navigator();
    let ids = parse_id(&user_id).zip(parse_id(&note_id));
    let mut note = use_signal(|| Option::<NoteResponse>::None);
    let mut loading = use_signal(|| true);
    let mut saving = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);

    let _loader = use_resource(use_reactive!(|ids| async move {
        let Some((uid, nid)) = ids else {
            error.set(Some("Invalid user ID or note ID".to_string()));
            loading.set(false);
            return;
        };
        loading.set(true);
        error.set(None);
        let services = auth.services();
        let result = async {
            let owner = services.admin.get_user_details(uid).await?;
            let found = services.notes.get_note(nid).await?;
            Ok::<_, api::ServiceError>((owner, found))
        }
        .await;
        match result {
            Ok((owner, found)) => {
                if let Some(message) = ownership_error(&found, &owner) {
                    error.set(Some(message));
                }
                note.set(Some(found));
            }
            Err(e) => error.set(Some(e.to_string())),
        }
        loading.set(false);
    }));

    let back = ids
        .map(|(uid, _)| format!("/admin/users/{uid}/notes"))
        .unwrap_or_else(|| "/admin/users".to_string());

    let handle_submit = {
        let back = back.clone();
        move |draft: NoteDraft| {
            let Some((uid, nid)) = ids else {
                return;
            };
            let back = back.clone();
            spawn(async move {
                saving.set(true);
                error.set(None);
                let update = NoteUpdate {
                    title: Some(draft.title),
                    description: Some(draft.description.unwrap_or_default()),
                };
                match auth.services().notes.update_note(nid, &update).await {
                    Ok(_) => {
                        tracing::info!(user_id = uid, note_id = nid, "note updated by admin");
                        nav.push(back.as_str());
                    }
                    Err(e) => error.set(Some(e.to_string())),
                }
                saving.set(false);
            });
        }
    };

    let cancel_target = back.clone();
    let current = note();
    let form_visible = shows_form(loading(), current.as_ref());

    rsx! {
        div {
            class: "page page-narrow",
            div {
                class: "page-header",
                Link {
                    class: "btn btn-ghost btn-sm",
                    to: back,
                    Icon { icon: FaArrowLeft, width: 14, height: 14 }
                    "Back to Notes"
                }
                h1 { class: "page-title", "Edit Note" }
            }

            if let Some(message) = error() {
                ErrorAlert { message }
            }

            if loading() {
                div { class: "loading-block", span { class: "spinner" } }
            } else if let Some(found) = current.filter(|_| form_visible) {
                div {
                    class: "panel",
                    NoteForm {
                        key: "{found.id}",
                        initial: Some(found.clone()),
                        on_submit: handle_submit,
                        on_cancel: move |_| {
                            nav.push(cancel_target.as_str());
                        },
                        submitting: saving(),
                    }
                    p { class: "muted", "Last updated: {display_date(&found.updated_at)}" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api::models::Role;

    fn note(owner_id: i64) -> NoteResponse {
        NoteResponse {
            id: 5,
            title: "t".to_string(),
            description: None,
            owner_id,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    fn user(id: i64) -> UserResponse {
        UserResponse {
            id,
            email: "a@b.c".to_string(),
            name: "Ada".to_string(),
            role: Some(Role::User),
            is_active: true,
            created_at: String::new(),
        }
    }

    #[test]
    fn test_form_survives_errors() {
        assert!(!shows_form(true, None));
        assert!(!shows_form(true, Some(&note(1))));
        assert!(!shows_form(false, None));
        assert!(shows_form(false, Some(&note(1))));

        // A mismatched owner is reported above the form, not instead of it.
        let mismatched = note(2);
        assert!(ownership_error(&mismatched, &user(1)).is_some());
        assert!(shows_form(false, Some(&mismatched)));
    }

    #[test]
    fn test_ownership_error() {
        assert_eq!(ownership_error(&note(1), &user(1)), None);
        assert_eq!(
            ownership_error(&note(2), &user(1)).as_deref(),
            Some("This note does not belong to user Ada")
        );
    }
}

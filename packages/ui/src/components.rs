//! Small building blocks shared by the views.

use std::collections::HashSet;

use api::models::NoteResponse;
use api::notes::{validate_note, MAX_TITLE_LEN};
use dioxus::prelude::*;

use crate::Icon;
use crate::icons::{FaCalendar, FaPen, FaTrash};

/// `2024-05-01T10:00:00` → `2024-05-01`.
pub fn display_date(timestamp: &str) -> &str {
    timestamp.split('T').next().unwrap_or(timestamp)
}

#[component]
pub fn ErrorAlert(message: String) -> Element {
    rsx! {
        div {
            class: "alert alert-error",
            role: "alert",
            span { "{message}" }
        }
    }
}

#[component]
pub fn SuccessAlert(message: String) -> Element {
    rsx! {
        div {
            class: "alert alert-success",
            role: "status",
            span { "{message}" }
        }
    }
}

/// Note ids with a delete request in flight.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PendingDeletes(HashSet<i64>);

impl PendingDeletes {
    /// Mark `id` as being deleted; `false` if a request is already out.
    pub fn begin(&mut self, id: i64) -> bool {
        self.0.insert(id)
    }

    pub fn finish(&mut self, id: i64) {
        self.0.remove(&id);
    }

    pub fn contains(&self, id: i64) -> bool {
        self.0.contains(&id)
    }
}

#[component]
pub fn NoteCard(
    note: NoteResponse,
    on_edit: Option<EventHandler<NoteResponse>>,
    on_delete: EventHandler<i64>,
    /// Where the title links to, if anywhere.
    #[props(default)]
    href: Option<String>,
    /// Set by the parent while this note's delete request is running.
    #[props(default)]
    deleting: bool,
) -> Element {
    let note_id = note.id;
    let edit_note = note.clone();

    rsx! {
        div {
            class: "note-card",
            h2 {
                class: "note-card-title",
                if let Some(href) = href {
                    Link { to: href, "{note.title}" }
                } else {
                    "{note.title}"
                }
            }
            div {
                class: "note-card-body",
                match note.description.as_deref().filter(|d| !d.trim().is_empty()) {
                    Some(description) => rsx! { "{description}" },
                    None => rsx! { span { class: "muted italic", "No description" } },
                }
            }
            div {
                class: "note-card-footer",
                span {
                    class: "note-card-date",
                    Icon { icon: FaCalendar, width: 12, height: 12 }
                    "{display_date(&note.updated_at)}"
                }
                div {
                    class: "note-card-actions",
                    if let Some(on_edit) = on_edit {
                        button {
                            class: "btn btn-ghost btn-xs",
                            title: "Edit",
                            onclick: move |_| on_edit.call(edit_note.clone()),
                            Icon { icon: FaPen, width: 12, height: 12 }
                        }
                    }
                    button {
                        class: "btn btn-ghost btn-xs text-error",
                        title: "Delete",
                        disabled: deleting,
                        onclick: move |_| on_delete.call(note_id),
                        Icon { icon: FaTrash, width: 12, height: 12 }
                    }
                }
            }
        }
    }
}

/// Submitted note form values: trimmed title and optional description.
#[derive(Clone, Debug, PartialEq)]
pub struct NoteDraft {
    pub title: String,
    pub description: Option<String>,
}

#[component]
pub fn NoteForm(
    #[props(default)] initial: Option<NoteResponse>,
    on_submit: EventHandler<NoteDraft>,
    on_cancel: EventHandler<()>,
    #[props(default)] submitting: bool,
    /// Server-side failure reported by the parent.
    #[props(default)]
    error: Option<String>,
) -> Element {
    let editing = initial.is_some();
    let mut title = use_signal(|| initial.as_ref().map(|n| n.title.clone()).unwrap_or_default());
    let mut description = use_signal(|| {
        initial
            .as_ref()
            .and_then(|n| n.description.clone())
            .unwrap_or_default()
    });
    let mut local_error = use_signal(|| Option::<String>::None);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        local_error.set(None);
        match validate_note(&title(), &description()) {
            Ok((title, description)) => on_submit.call(NoteDraft { title, description }),
            Err(e) => local_error.set(Some(e.to_string())),
        }
    };

    let shown_error = local_error().or(error);

    rsx! {
        form {
            class: "note-form",
            onsubmit: handle_submit,

            if let Some(message) = shown_error {
                ErrorAlert { message }
            }

            label { class: "label", r#for: "note-title", "Title *" }
            input {
                id: "note-title",
                class: "input w-full",
                r#type: "text",
                placeholder: "Note title",
                maxlength: "{MAX_TITLE_LEN}",
                value: title(),
                oninput: move |evt: FormEvent| title.set(evt.value()),
            }

            label { class: "label", r#for: "note-description", "Description" }
            textarea {
                id: "note-description",
                class: "textarea w-full",
                rows: "4",
                placeholder: "Note description (optional)",
                value: description(),
                oninput: move |evt: FormEvent| description.set(evt.value()),
            }

            div {
                class: "form-actions",
                button {
                    class: "btn btn-outline",
                    r#type: "button",
                    disabled: submitting,
                    onclick: move |_| on_cancel.call(()),
                    "Cancel"
                }
                button {
                    class: "btn btn-primary",
                    r#type: "submit",
                    disabled: submitting,
                    if submitting {
                        "Saving..."
                    } else if editing {
                        "Update Note"
                    } else {
                        "Create Note"
                    }
                }
            }
        }
    }
}

/// Case-insensitive search box.
#[component]
pub fn SearchInput(value: String, on_change: EventHandler<String>) -> Element {
    rsx! {
        input {
            class: "input search-input",
            r#type: "search",
            placeholder: "Search notes...",
            value: "{value}",
            oninput: move |evt: FormEvent| on_change.call(evt.value()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_delete_blocks_repeat() {
        let mut pending = PendingDeletes::default();
        assert!(pending.begin(4));
        assert!(!pending.begin(4));
        assert!(pending.contains(4));
        assert!(pending.begin(5));
        pending.finish(4);
        assert!(!pending.contains(4));
        assert!(pending.begin(4));
    }

    #[test]
    fn test_display_date() {
        assert_eq!(display_date("2024-05-01T10:00:00"), "2024-05-01");
        assert_eq!(display_date("2024-05-01"), "2024-05-01");
        assert_eq!(display_date(""), "");
    }
}

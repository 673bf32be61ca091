use api::models::{filter_notes, NoteCreate, NoteResponse, NoteUpdate};
use api::notes::{remove_note, upsert_note};
use dioxus::prelude::*;

use crate::components::{ErrorAlert, NoteCard, PendingDeletes, NoteDraft, NoteForm, SearchInput};
use crate::use_auth;
use crate::Icon;
use crate::icons::{FaPlus, FaUsers};

#[derive(Clone, Debug, PartialEq)]
enum Editor {
    Closed,
    Creating,
    Editing(NoteResponse),
}

/// The signed-in user's notes; every note for admins.
#[component]
pub fn DashboardView() -> Element {
    let auth = use_auth();
    let nav = use_navigator();
    let mut notes = use_signal(Vec::<NoteResponse>::new);
    let mut loading = use_signal(|| true);
    let mut error = use_signal(|| Option::<String>::None);
    let mut query = use_signal(String::new);
    let mut editor = use_signal(|| Editor::Closed);
    let mut submitting = use_signal(|| false);
    let mut form_error = use_signal(|| Option::<String>::None);

    let _loader = use_resource(move || async move {
        loading.set(true);
        error.set(None);
        match auth.services().notes.get_notes().await {
            Ok(list) => notes.set(list),
            Err(e) => error.set(Some(e.to_string())),
        }
        loading.set(false);
    });

    let handle_submit = move |draft: NoteDraft| {
        spawn(async move {
            submitting.set(true);
            form_error.set(None);
            let service = auth.services().notes;
            let result = match editor() {
                Editor::Editing(note) => {
                    let update = NoteUpdate {
                        title: Some(draft.title),
                        description: Some(draft.description.unwrap_or_default()),
                    };
                    service.update_note(note.id, &update).await
                }
                _ => {
                    let create = NoteCreate {
                        title: draft.title,
                        description: draft.description,
                    };
                    service.create_note(&create).await
                }
            };
            match result {
                Ok(note) => {
                    upsert_note(&mut notes.write(), note);
                    editor.set(Editor::Closed);
                }
                Err(e) => form_error.set(Some(e.to_string())),
            }
            submitting.set(false);
        });
    };

    let mut pending = use_signal(PendingDeletes::default);

    let handle_delete = move |note_id: i64| {
        if !pending.write().begin(note_id) {
            return;
        }
        spawn(async move {
            let result = auth.services().notes.delete_note(note_id).await;
            pending.write().finish(note_id);
            match result {
                Ok(()) => remove_note(&mut notes.write(), note_id),
                Err(e) => error.set(Some(e.to_string())),
            }
        });
    };

    let is_admin = auth.is_admin();
    let editing = editor();
    let form_open = editing != Editor::Closed;
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
                    class: "page-title-row",
                    h1 { class: "page-title", if is_admin { "All Notes" } else { "My Notes" } }
                    if is_admin {
                        button {
                            class: "btn btn-sm btn-outline",
                            onclick: move |_| {
                                nav.push("/admin/users");
                            },
                            Icon { icon: FaUsers, width: 14, height: 14 }
                            "Manage Users"
                        }
                    }
                }
                div {
                    class: "page-actions",
                    if !form_open {
                        SearchInput { value: query(), on_change: move |q| query.set(q) }
                    }
                    button {
                        class: "btn btn-primary",
                        disabled: form_open,
                        onclick: move |_| {
                            form_error.set(None);
                            editor.set(Editor::Creating);
                        },
                        Icon { icon: FaPlus, width: 14, height: 14 }
                        "New Note"
                    }
                }
            }

            if let Some(message) = error() {
                ErrorAlert { message }
            }

            if form_open {
                div {
                    class: "panel",
                    NoteForm {
                        key: "{editor_key(&editing)}",
                        initial: match editing { Editor::Editing(ref note) => Some(note.clone()), _ => None },
                        on_submit: handle_submit,
                        on_cancel: move |_| editor.set(Editor::Closed),
                        submitting: submitting(),
                        error: form_error(),
                    }
                }
            }

            if loading() {
                div { class: "loading-block", span { class: "spinner" } p { "Loading your notes..." } }
            } else if !visible.is_empty() {
                div {
                    class: "notes-grid",
                    for note in visible {
                        NoteCard {
                            key: "{note.id}",
                            note: note.clone(),
                            on_edit: move |note: NoteResponse| {
                                form_error.set(None);
                                editor.set(Editor::Editing(note));
                            },
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
            } else {
                div {
                    class: "empty-state",
                    p { class: "empty-title", "No notes found" }
                    p { class: "muted", "Create your first note to get started!" }
                }
            }
        }
    }
}

fn editor_key(editor: &Editor) -> String {
    match editor {
        Editor::Editing(note) => format!("edit-{}", note.id),
        _ => "new".to_string(),
    }
}

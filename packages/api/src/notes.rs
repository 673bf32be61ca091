//! Note CRUD with user-facing error messages.

use crate::client::{ApiClient, DEFAULT_NOTES_LIMIT};
use crate::error::ServiceError;
use crate::models::{NoteCreate, NoteResponse, NoteUpdate};
use crate::transport::Transport;

pub const MAX_TITLE_LEN: usize = 200;

pub struct NoteService<T> {
    client: ApiClient<T>,
}

impl<T> Clone for NoteService<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
        }
    }
}

impl<T: Transport> NoteService<T> {
    pub fn new(client: ApiClient<T>) -> Self {
        Self { client }
    }

    /// All notes for admins, the caller's own notes otherwise. The server decides.
    pub async fn get_notes(&self) -> Result<Vec<NoteResponse>, ServiceError> {
        self.get_notes_page(0, DEFAULT_NOTES_LIMIT).await
    }

    pub async fn get_notes_page(&self, skip: u32, limit: u32) -> Result<Vec<NoteResponse>, ServiceError> {
        self.client
            .get_notes(skip, limit)
            .await
            .map_err(|e| ServiceError::from_api(e, "Failed to fetch notes"))
    }

    pub async fn get_note(&self, note_id: i64) -> Result<NoteResponse, ServiceError> {
        self.client
            .get_note(note_id)
            .await
            .map_err(|e| ServiceError::from_api(e, "Failed to fetch note"))
    }

    pub async fn get_notes_by_user(&self, user_id: i64) -> Result<Vec<NoteResponse>, ServiceError> {
        self.client
            .get_notes_by_user(user_id)
            .await
            .map_err(|e| ServiceError::from_api(e, "Failed to fetch user notes"))
    }

    pub async fn create_note(&self, note: &NoteCreate) -> Result<NoteResponse, ServiceError> {
        let created = self
            .client
            .create_note(note)
            .await
            .map_err(|e| ServiceError::from_api(e, "Failed to create note"))?;
        tracing::debug!(note_id = created.id, "note created");
        Ok(created)
    }

    pub async fn update_note(&self, note_id: i64, note: &NoteUpdate) -> Result<NoteResponse, ServiceError> {
        self.client
            .update_note(note_id, note)
            .await
            .map_err(|e| ServiceError::from_api(e, "Failed to update note"))
    }

    pub async fn delete_note(&self, note_id: i64) -> Result<(), ServiceError> {
        self.client
            .delete_note(note_id)
            .await
            .map_err(|e| ServiceError::from_api(e, "Failed to delete note"))?;
        tracing::debug!(note_id, "note deleted");
        Ok(())
    }
}

/// Check the note form before submitting. Returns the trimmed title and the
/// description, `None` when blank.
pub fn validate_note(title: &str, description: &str) -> Result<(String, Option<String>), ServiceError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ServiceError::Validation("Title is required".into()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(ServiceError::Validation(format!(
            "Title must be {MAX_TITLE_LEN} characters or less"
        )));
    }
    let description = description.trim();
    let description = (!description.is_empty()).then(|| description.to_string());
    Ok((title.to_string(), description))
}

/// Replace the note with the same id, or append it.
pub fn upsert_note(notes: &mut Vec<NoteResponse>, note: NoteResponse) {
    match notes.iter_mut().find(|n| n.id == note.id) {
        Some(existing) => *existing = note,
        None => notes.insert(0, note),
    }
}

pub fn remove_note(notes: &mut Vec<NoteResponse>, note_id: i64) {
    notes.retain(|n| n.id != note_id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{fixture, note_json};

    #[tokio::test]
    async fn test_get_notes_decodes_list() {
        let f = fixture();
        f.tokens.save_token("tok").unwrap();
        f.transport.push(
            200,
            &serde_json::json!([note_json(1, 2, "First"), note_json(2, 2, "Second")]).to_string(),
        );

        let notes = NoteService::new(f.client.clone()).get_notes().await.unwrap();

        assert_eq!(notes.len(), 2);
        assert_eq!(notes[1].title, "Second");
        assert_eq!(f.transport.paths(), vec!["/api/v1/notes/"]);
    }

    #[tokio::test]
    async fn test_fallback_messages() {
        let f = fixture();
        let service = NoteService::new(f.client.clone());
        for _ in 0..4 {
            f.transport.push(500, "");
        }

        assert_eq!(service.get_notes().await.unwrap_err().to_string(), "Failed to fetch notes");
        assert_eq!(service.get_note(1).await.unwrap_err().to_string(), "Failed to fetch note");
        assert_eq!(service.delete_note(1).await.unwrap_err().to_string(), "Failed to delete note");
        assert_eq!(
            service.get_notes_by_user(3).await.unwrap_err().to_string(),
            "Failed to fetch user notes"
        );
    }

    #[tokio::test]
    async fn test_server_detail_preferred() {
        let f = fixture();
        f.transport.push(404, r#"{"detail":"Note not found"}"#);

        let err = NoteService::new(f.client.clone())
            .update_note(9, &NoteUpdate::default())
            .await
            .unwrap_err();

        assert_eq!(err, ServiceError::NotFound("Note not found".into()));
    }

    #[tokio::test]
    async fn test_create_sends_body() {
        let f = fixture();
        f.transport.push(200, &note_json(4, 1, "Hello").to_string());

        let created = NoteService::new(f.client.clone())
            .create_note(&NoteCreate {
                title: "Hello".into(),
                description: None,
            })
            .await
            .unwrap();

        assert_eq!(created.id, 4);
        assert_eq!(
            f.transport.requests()[0].body,
            crate::transport::Body::Json(serde_json::json!({"title": "Hello", "description": null}))
        );
    }

    #[test]
    fn test_validate_note() {
        assert_eq!(
            validate_note("  Title ", "  ").unwrap(),
            ("Title".to_string(), None)
        );
        assert_eq!(validate_note(" ", "x").unwrap_err().to_string(), "Title is required");
        assert!(validate_note(&"a".repeat(200), "").is_ok());
        assert_eq!(
            validate_note(&"a".repeat(201), "").unwrap_err().to_string(),
            "Title must be 200 characters or less"
        );
    }

    #[test]
    fn test_upsert_and_remove() {
        let decode = |v: serde_json::Value| -> NoteResponse { serde_json::from_value(v).unwrap() };
        let mut notes = vec![decode(note_json(1, 1, "a")), decode(note_json(2, 1, "b"))];

        upsert_note(&mut notes, decode(note_json(2, 1, "b2")));
        assert_eq!(notes[1].title, "b2");

        upsert_note(&mut notes, decode(note_json(3, 1, "c")));
        assert_eq!(notes[0].id, 3);

        remove_note(&mut notes, 1);
        assert_eq!(notes.iter().map(|n| n.id).collect::<Vec<_>>(), vec![3, 2]);
    }
}

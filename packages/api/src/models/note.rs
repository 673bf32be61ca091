use serde::{Deserialize, Serialize};

/// Note record as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteResponse {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub owner_id: i64,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

impl NoteResponse {
    /// Case-insensitive match on title or description.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(&query)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&query))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteCreate {
    pub title: String,
    pub description: Option<String>,
}

/// Partial update; absent fields are left unchanged by the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoteUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Notes whose title or description contains `query`, in their original order.
pub fn filter_notes<'a>(notes: &'a [NoteResponse], query: &str) -> Vec<&'a NoteResponse> {
    notes.iter().filter(|n| n.matches(query)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(id: i64, title: &str, description: Option<&str>) -> NoteResponse {
        NoteResponse {
            id,
            title: title.to_string(),
            description: description.map(str::to_string),
            owner_id: 1,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn test_filter_matches_title_and_description() {
        let notes = vec![
            note(1, "Groceries", Some("milk, eggs")),
            note(2, "Ideas", Some("Buy MILK frother")),
            note(3, "Travel", None),
        ];

        let ids: Vec<i64> = filter_notes(&notes, "milk").iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1, 2]);

        let ids: Vec<i64> = filter_notes(&notes, "TRAV").iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![3]);

        assert_eq!(filter_notes(&notes, "   ").len(), 3);
        assert!(filter_notes(&notes, "nothing").is_empty());
    }

    #[test]
    fn test_update_omits_unset_fields() {
        let update = NoteUpdate {
            title: Some("New".into()),
            description: None,
        };
        assert_eq!(serde_json::to_string(&update).unwrap(), r#"{"title":"New"}"#);
    }
}

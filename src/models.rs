//! Checklist Models
//!
//! Records as they are persisted under the `checklists` storage key.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Title used when a checklist is saved or loaded without one
pub const UNTITLED_CHECKLIST: &str = "Untitled Checklist";
/// Item text used when an item is saved or loaded without text
pub const UNTITLED_ITEM: &str = "Untitled Item";
/// Title of a freshly created checklist
pub const NEW_CHECKLIST_TITLE: &str = "New Checklist";
/// Text of the item substituted for a malformed item list
pub const PLACEHOLDER_ITEM_TEXT: &str = "New item";

/// One row of a checklist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: String,
    pub text: String,
    pub checked: bool,
}

impl ChecklistItem {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            checked: false,
        }
    }

    /// Stand-in for an item list that could not be read
    pub fn placeholder() -> Self {
        Self::new("1", PLACEHOLDER_ITEM_TEXT)
    }
}

/// A titled, ordered checklist
///
/// `items` is never empty once persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checklist {
    pub id: String,
    pub title: String,
    pub description: String,
    pub items: Vec<ChecklistItem>,
}

impl Checklist {
    /// A new, unsaved checklist with one empty item
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: NEW_CHECKLIST_TITLE.to_string(),
            description: String::new(),
            items: vec![ChecklistItem::new("1", "")],
        }
    }
}

/// Id derived from the current time (milliseconds since the Unix epoch)
pub fn timestamp_id() -> String {
    chrono::Utc::now().timestamp_millis().to_string()
}

/// Hands out ids that are unique within one scope.
///
/// A taken candidate gets a `-N` suffix, so two records created in the
/// same millisecond still get distinct ids.
#[derive(Debug, Default)]
pub struct UniqueIds {
    seen: HashSet<String>,
}

impl UniqueIds {
    /// Start from ids that are already in use
    pub fn with_taken<'a>(taken: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            seen: taken.into_iter().map(str::to_string).collect(),
        }
    }

    pub fn claim(&mut self, candidate: String) -> String {
        if self.seen.insert(candidate.clone()) {
            return candidate;
        }
        let mut n = 1;
        loop {
            let next = format!("{}-{}", candidate, n);
            if self.seen.insert(next.clone()) {
                return next;
            }
            n += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_checklist() {
        let checklist = Checklist::new("1700000000000");
        assert_eq!(checklist.title, "New Checklist");
        assert_eq!(checklist.description, "");
        assert_eq!(checklist.items, vec![ChecklistItem::new("1", "")]);
    }

    #[test]
    fn test_timestamp_id_is_numeric() {
        let id = timestamp_id();
        assert!(!id.is_empty());
        assert!(id.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_unique_ids_suffix_duplicates() {
        let mut ids = UniqueIds::with_taken(["5"]);
        assert_eq!(ids.claim("5".to_string()), "5-1");
        assert_eq!(ids.claim("5".to_string()), "5-2");
        assert_eq!(ids.claim("6".to_string()), "6");
    }

    #[test]
    fn test_serde_field_names() {
        let json = serde_json::to_value(Checklist::new("7")).unwrap();
        assert_eq!(json["id"], "7");
        assert_eq!(json["items"][0]["checked"], false);
        assert!(json.get("description").is_some());
    }
}

//! Draft Editing
//!
//! In-memory edits made by the checklist form. Each edit sanitizes its
//! input; `finalized` produces the record that gets saved.

use crate::models::{timestamp_id, Checklist, ChecklistItem, UniqueIds, UNTITLED_CHECKLIST, UNTITLED_ITEM};
use crate::sanitize::sanitize;

impl Checklist {
    pub fn set_title(&mut self, raw: &str) {
        self.title = sanitize(raw);
    }

    pub fn set_description(&mut self, raw: &str) {
        self.description = sanitize(raw);
    }

    pub fn set_item_text(&mut self, id: &str, raw: &str) {
        if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
            item.text = sanitize(raw);
        }
    }

    /// Append an empty item and return its id
    pub fn add_item(&mut self) -> String {
        let mut ids = UniqueIds::with_taken(self.items.iter().map(|item| item.id.as_str()));
        let id = ids.claim(timestamp_id());
        self.items.push(ChecklistItem::new(id.clone(), ""));
        id
    }

    /// Remove an item; the last remaining item is kept.
    ///
    /// Returns whether an item was removed.
    pub fn remove_item(&mut self, id: &str) -> bool {
        if self.items.len() <= 1 {
            return false;
        }
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        self.items.len() != before
    }

    /// Move the item at `from` so it ends up at index `to`
    pub fn move_item(&mut self, from: usize, to: usize) {
        if from >= self.items.len() || to >= self.items.len() || from == to {
            return;
        }
        let item = self.items.remove(from);
        self.items.insert(to, item);
    }

    /// Save is allowed once there is a title and at least one non-blank item
    pub fn is_valid(&self) -> bool {
        !self.title.trim().is_empty() && self.items.iter().any(|item| !item.text.trim().is_empty())
    }

    /// Copy with blank title/item text replaced by their defaults
    pub fn finalized(&self) -> Checklist {
        let mut saved = self.clone();
        if saved.title.is_empty() {
            saved.title = UNTITLED_CHECKLIST.to_string();
        }
        for item in &mut saved.items {
            if item.text.is_empty() {
                item.text = UNTITLED_ITEM.to_string();
            }
        }
        saved
    }
}

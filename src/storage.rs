//! Checklist Persistence
//!
//! The whole collection lives as one JSON array under `STORAGE_KEY`.
//! The durable slot is a `StoragePort`: `WebStorage` in the browser,
//! `MemoryStorage` in tests and when `localStorage` is unavailable.
//!
//! Writes are last-write-wins; two tabs saving at once overwrite each other.

use std::cell::RefCell;
use std::collections::HashMap;

use serde_json::Value;
use thiserror::Error;

use crate::models::{timestamp_id, Checklist, ChecklistItem, UniqueIds, UNTITLED_CHECKLIST, UNTITLED_ITEM};
use crate::sanitize::sanitize;

/// Key of the durable slot holding every checklist
pub const STORAGE_KEY: &str = "checklists";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Write failed: {0}")]
    Write(String),

    #[error("Serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

// ========================
// Storage Port
// ========================

/// A durable key-value slot
pub trait StoragePort {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn delete(&self, key: &str) -> Result<(), StorageError>;
}

impl<P: StoragePort + ?Sized> StoragePort for Box<P> {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).save(key, value)
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        (**self).delete(key)
    }
}

/// `window.localStorage`
pub struct WebStorage {
    storage: web_sys::Storage,
}

impl WebStorage {
    pub fn open() -> Result<Self, StorageError> {
        let window = web_sys::window().ok_or_else(|| StorageError::Unavailable("no window".into()))?;
        match window.local_storage() {
            Ok(Some(storage)) => Ok(Self { storage }),
            Ok(None) => Err(StorageError::Unavailable("localStorage is disabled".into())),
            Err(e) => Err(StorageError::Unavailable(format!("{:?}", e))),
        }
    }
}

impl StoragePort for WebStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage
            .get_item(key)
            .map_err(|e| StorageError::Unavailable(format!("{:?}", e)))
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        // Throws QuotaExceededError when the origin is out of space
        self.storage
            .set_item(key, value)
            .map_err(|e| StorageError::Write(format!("{:?}", e)))
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.storage
            .remove_item(key)
            .map_err(|e| StorageError::Write(format!("{:?}", e)))
    }
}

/// In-memory slot with an optional size limit (bytes per value)
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: RefCell<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(quota: usize) -> Self {
        Self {
            quota: Some(quota),
            ..Self::default()
        }
    }

    /// Store a raw value, bypassing the checklist encoding
    pub fn seed(&self, key: &str, value: &str) {
        self.slots.borrow_mut().insert(key.to_string(), value.to_string());
    }
}

impl StoragePort for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.borrow().get(key).cloned())
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(quota) = self.quota {
            if value.len() > quota {
                return Err(StorageError::Write(format!(
                    "quota exceeded ({} > {} bytes)",
                    value.len(),
                    quota
                )));
            }
        }
        self.slots.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.slots.borrow_mut().remove(key);
        Ok(())
    }
}

// ========================
// Checklist Store
// ========================

/// Load/save/delete of the checklist collection over a storage port
pub struct ChecklistStore<P: StoragePort> {
    port: P,
}

impl<P: StoragePort> ChecklistStore<P> {
    pub fn new(port: P) -> Self {
        Self { port }
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    /// Read every checklist, repairing malformed records.
    ///
    /// Missing, unparseable or non-array data yields an empty list.
    pub fn load(&self) -> Vec<Checklist> {
        let raw = match self.port.load(STORAGE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                log::error!("Error loading checklists: {}", e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(parsed) => repair_collection(&parsed, &timestamp_id()),
            Err(e) => {
                log::error!("Error loading checklists: {}", e);
                Vec::new()
            }
        }
    }

    /// Replace the checklist with the same id in place, or append it.
    ///
    /// A checklist without items is stored with the placeholder item.
    pub fn try_save(&self, checklist: &Checklist, existing: &[Checklist]) -> Result<Vec<Checklist>, StorageError> {
        let mut record = checklist.clone();
        if record.items.is_empty() {
            record.items.push(ChecklistItem::placeholder());
        }

        let mut updated = existing.to_vec();
        match updated.iter_mut().find(|c| c.id == record.id) {
            Some(slot) => *slot = record,
            None => updated.push(record),
        }
        self.write(&updated)?;
        Ok(updated)
    }

    /// Remove the checklist with `id`; absent ids leave the list unchanged
    pub fn try_delete(&self, id: &str, existing: &[Checklist]) -> Result<Vec<Checklist>, StorageError> {
        let updated: Vec<Checklist> = existing.iter().filter(|c| c.id != id).cloned().collect();
        self.write(&updated)?;
        Ok(updated)
    }

    /// `try_save`, returning `existing` unchanged if the write fails
    pub fn save(&self, checklist: &Checklist, existing: &[Checklist]) -> Vec<Checklist> {
        self.try_save(checklist, existing).unwrap_or_else(|e| {
            log::error!("Error saving checklist: {}", e);
            existing.to_vec()
        })
    }

    /// `try_delete`, returning `existing` unchanged if the write fails
    pub fn delete(&self, id: &str, existing: &[Checklist]) -> Vec<Checklist> {
        self.try_delete(id, existing).unwrap_or_else(|e| {
            log::error!("Error deleting checklist: {}", e);
            existing.to_vec()
        })
    }

    fn write(&self, checklists: &[Checklist]) -> Result<(), StorageError> {
        let json = serde_json::to_string(checklists)?;
        self.port.save(STORAGE_KEY, &json)
    }
}

pub type BrowserStore = ChecklistStore<Box<dyn StoragePort>>;

/// Store over `localStorage`, or an in-memory slot when it is unavailable
pub fn open_browser_store() -> BrowserStore {
    match WebStorage::open() {
        Ok(storage) => ChecklistStore::new(Box::new(storage)),
        Err(e) => {
            log::warn!("{}; checklists will not survive a reload", e);
            ChecklistStore::new(Box::new(MemoryStorage::new()))
        }
    }
}

thread_local! {
    static BROWSER_STORE: BrowserStore = open_browser_store();
}

/// Run `f` against the page's store
pub fn with_store<R>(f: impl FnOnce(&BrowserStore) -> R) -> R {
    BROWSER_STORE.with(f)
}

// ========================
// Record Repair
// ========================

/// Coerce parsed storage into checklists.
///
/// `generated_id` stands in for any missing id; repeats get a suffix.
pub fn repair_collection(value: &Value, generated_id: &str) -> Vec<Checklist> {
    let Some(records) = value.as_array() else {
        return Vec::new();
    };
    let mut ids = UniqueIds::default();
    records
        .iter()
        .map(|record| repair_checklist(record, generated_id, &mut ids))
        .collect()
}

fn repair_checklist(record: &Value, generated_id: &str, ids: &mut UniqueIds) -> Checklist {
    let id = clean_string(record.get("id")).unwrap_or_else(|| generated_id.to_string());

    let items = match record.get("items").and_then(Value::as_array) {
        Some(items) if !items.is_empty() => {
            let mut item_ids = UniqueIds::default();
            items
                .iter()
                .map(|item| repair_item(item, generated_id, &mut item_ids))
                .collect()
        }
        _ => vec![ChecklistItem::placeholder()],
    };

    Checklist {
        id: ids.claim(id),
        title: clean_string(record.get("title")).unwrap_or_else(|| UNTITLED_CHECKLIST.to_string()),
        description: clean_string(record.get("description")).unwrap_or_default(),
        items,
    }
}

fn repair_item(item: &Value, generated_id: &str, ids: &mut UniqueIds) -> ChecklistItem {
    let id = clean_string(item.get("id")).unwrap_or_else(|| generated_id.to_string());
    ChecklistItem {
        id: ids.claim(id),
        text: clean_string(item.get("text")).unwrap_or_else(|| UNTITLED_ITEM.to_string()),
        checked: truthy(item.get("checked")),
    }
}

/// Sanitized string field; non-strings and empty results count as missing
fn clean_string(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .map(sanitize)
        .filter(|s| !s.is_empty())
}

/// JavaScript truthiness of a stored value
fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map_or(false, |f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn memory_store() -> ChecklistStore<MemoryStorage> {
        ChecklistStore::new(MemoryStorage::new())
    }

    fn make_checklist(id: &str, title: &str) -> Checklist {
        Checklist {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            items: vec![ChecklistItem::new("1", "first")],
        }
    }

    fn ids(list: &[Checklist]) -> Vec<&str> {
        list.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_load_missing_slot() {
        assert!(memory_store().load().is_empty());
    }

    #[test]
    fn test_load_unparseable() {
        let store = memory_store();
        store.port().seed(STORAGE_KEY, "{not json");
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_load_non_array() {
        let store = memory_store();
        store.port().seed(STORAGE_KEY, r#"{"id":"1","title":"x"}"#);
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_load_repairs_malformed_record() {
        let store = memory_store();
        store.port().seed(STORAGE_KEY, r#"[{"id":1,"items":"bad"}]"#);

        let loaded = store.load();

        assert_eq!(loaded.len(), 1);
        let record = &loaded[0];
        assert!(!record.id.is_empty());
        assert!(record.id.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(record.title, "Untitled Checklist");
        assert_eq!(record.description, "");
        assert_eq!(record.items, vec![ChecklistItem::new("1", "New item")]);
    }

    #[test]
    fn test_repair_items() {
        let value = json!([{
            "id": "a",
            "title": "<b>Camping</b>",
            "description": "<script>x()</script>",
            "items": [
                { "id": "i1", "text": "Tent", "checked": 1 },
                { "id": "i1", "text": "<img src=x>", "checked": "yes" },
                { "text": "Stove", "checked": null },
                42
            ]
        }]);

        let repaired = repair_collection(&value, "999");

        let checklist = &repaired[0];
        assert_eq!(checklist.title, "Camping");
        assert_eq!(checklist.description, "");
        let items = &checklist.items;
        assert_eq!(items.len(), 4);
        assert_eq!((items[0].id.as_str(), items[0].text.as_str(), items[0].checked), ("i1", "Tent", true));
        assert_eq!((items[1].id.as_str(), items[1].text.as_str(), items[1].checked), ("i1-1", "Untitled Item", true));
        assert_eq!((items[2].id.as_str(), items[2].text.as_str(), items[2].checked), ("999", "Stove", false));
        assert_eq!((items[3].id.as_str(), items[3].text.as_str(), items[3].checked), ("999-1", "Untitled Item", false));
    }

    #[test]
    fn test_repair_empty_items_gets_placeholder() {
        let repaired = repair_collection(&json!([{ "id": "a", "title": "T", "items": [] }]), "1");
        assert_eq!(repaired[0].items, vec![ChecklistItem::placeholder()]);
    }

    #[test]
    fn test_repair_duplicate_checklist_ids() {
        let repaired = repair_collection(&json!([{ "id": "a" }, { "id": "a" }, {}]), "77");
        assert_eq!(ids(&repaired), vec!["a", "a-1", "77"]);
    }

    #[test]
    fn test_save_appends_new() {
        let store = memory_store();
        let existing = vec![make_checklist("1", "One"), make_checklist("2", "Two")];

        let updated = store.save(&make_checklist("3", "Three"), &existing);

        assert_eq!(updated.len(), existing.len() + 1);
        assert_eq!(ids(&updated), vec!["1", "2", "3"]);
        assert_eq!(store.load(), updated);
    }

    #[test]
    fn test_save_replaces_in_place() {
        let store = memory_store();
        let existing = vec![make_checklist("1", "One"), make_checklist("2", "Two"), make_checklist("3", "Three")];

        let updated = store.save(&make_checklist("2", "Second"), &existing);

        assert_eq!(updated.len(), 3);
        assert_eq!(ids(&updated), vec!["1", "2", "3"]);
        assert_eq!(updated[1].title, "Second");
    }

    #[test]
    fn test_save_never_persists_empty_items() {
        let store = memory_store();
        let mut empty = make_checklist("e", "Empty");
        empty.items.clear();

        let updated = store.save(&empty, &[]);

        assert_eq!(updated[0].items, vec![ChecklistItem::placeholder()]);
        let raw = store.port().load(STORAGE_KEY).unwrap().unwrap();
        let persisted: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(persisted[0]["items"][0]["text"], "New item");
        assert_eq!(store.load(), updated);
    }

    #[test]
    fn test_delete_absent_is_noop() {
        let store = memory_store();
        let existing = vec![make_checklist("1", "One")];

        assert_eq!(store.delete("missing", &existing), existing);
    }

    #[test]
    fn test_delete_removes_record() {
        let store = memory_store();
        let existing = store.save(&make_checklist("1", "One"), &[]);
        let existing = store.save(&make_checklist("2", "Two"), &existing);

        let updated = store.delete("1", &existing);

        assert_eq!(ids(&updated), vec!["2"]);
        assert_eq!(ids(&store.load()), vec!["2"]);
    }

    #[test]
    fn test_write_failure_returns_original() {
        let store = ChecklistStore::new(MemoryStorage::with_quota(10));
        let existing = vec![make_checklist("1", "One"), make_checklist("2", "Two")];

        let updated = store.save(&make_checklist("3", "Three"), &existing);
        assert_eq!(updated, existing);

        let result = store.try_save(&make_checklist("3", "Three"), &existing);
        assert!(matches!(result, Err(StorageError::Write(_))));

        assert_eq!(store.delete("1", &existing), existing);
        // An empty collection fits
        assert!(store.try_delete("1", &[make_checklist("1", "One")]).unwrap().is_empty());
    }

    #[test]
    fn test_round_trip_preserves_checked() {
        let store = memory_store();
        let mut checklist = make_checklist("1", "One");
        checklist.items[0].checked = true;

        store.save(&checklist, &[]);

        assert_eq!(store.load(), vec![checklist]);
    }

    #[test]
    fn test_boxed_port() {
        let store: ChecklistStore<Box<dyn StoragePort>> = ChecklistStore::new(Box::new(MemoryStorage::new()));
        let saved = store.save(&make_checklist("1", "One"), &[]);
        assert_eq!(store.load(), saved);
    }

    #[test]
    fn test_cleared_slot_loads_empty() {
        let store = memory_store();
        store.save(&make_checklist("1", "One"), &[]);
        store.port().delete(STORAGE_KEY).unwrap();
        assert!(store.load().is_empty());
    }
}

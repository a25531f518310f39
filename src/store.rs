//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::{timestamp_id, Checklist};

/// Edit / Preview tab
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Edit,
    Preview,
}

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Store)]
pub struct AppState {
    /// Saved checklists, in storage order
    pub checklists: Vec<Checklist>,
    /// Checklist the toolbar and selector point at
    pub current_id: Option<String>,
    /// Working copy edited by the form and shown in the preview
    pub draft: Checklist,
    pub active_tab: Tab,
}

impl AppState {
    /// Open the first saved checklist, or start a new one
    pub fn from_saved(checklists: Vec<Checklist>) -> Self {
        let draft = checklists
            .first()
            .cloned()
            .unwrap_or_else(|| Checklist::new(timestamp_id()));
        Self {
            current_id: Some(draft.id.clone()),
            checklists,
            draft,
            active_tab: Tab::Edit,
        }
    }
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Make `checklist` the current checklist and edit it
pub fn store_open_checklist(store: &AppStore, checklist: Checklist) {
    store.current_id().set(Some(checklist.id.clone()));
    store.draft().set(checklist);
    store.active_tab().set(Tab::Edit);
}

/// Open the saved checklist with `id`, if any
pub fn store_select_checklist(store: &AppStore, id: &str) {
    let selected = store.checklists().read().iter().find(|c| c.id == id).cloned();
    if let Some(checklist) = selected {
        store_open_checklist(store, checklist);
    }
}

/// Start a fresh, unsaved checklist
pub fn store_new_checklist(store: &AppStore) {
    store_open_checklist(store, Checklist::new(timestamp_id()));
}

/// Edit the draft in place
pub fn store_edit_draft<R>(store: &AppStore, edit: impl FnOnce(&mut Checklist) -> R) -> R {
    edit(&mut store.draft().write())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_saved_opens_first() {
        let saved = vec![Checklist::new("1"), Checklist::new("2")];
        let state = AppState::from_saved(saved.clone());
        assert_eq!(state.draft, saved[0]);
        assert_eq!(state.current_id.as_deref(), Some("1"));
        assert_eq!(state.active_tab, Tab::Edit);
    }

    #[test]
    fn test_from_saved_empty_starts_new() {
        let state = AppState::from_saved(Vec::new());
        assert!(state.checklists.is_empty());
        assert_eq!(state.draft.title, "New Checklist");
        assert_eq!(state.current_id.as_ref(), Some(&state.draft.id));
    }
}

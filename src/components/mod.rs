//! UI Components
//!
//! Reusable Leptos components.

mod checklist_form;
mod checklist_preview;
mod checklist_selector;
mod delete_confirm_button;
mod header;
mod install_help;
mod toaster;
mod toolbar;

pub use checklist_form::ChecklistForm;
pub use checklist_preview::ChecklistPreview;
pub use checklist_selector::ChecklistSelector;
pub use delete_confirm_button::DeleteConfirmButton;
pub use header::Header;
pub use install_help::InstallHelp;
pub use toaster::Toaster;
pub use toolbar::Toolbar;

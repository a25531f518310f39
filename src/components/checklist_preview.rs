//! Checklist Preview Component
//!
//! Printable rendering of the draft: title, empty boxes, optional notes.

use leptos::prelude::*;

use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn ChecklistPreview() -> impl IntoView {
    let store = use_app_store();

    let title = move || store.draft().read().title.clone();
    let description = move || store.draft().read().description.clone();
    let items = move || store.draft().read().items.clone();

    view! {
        <div class="card print-container">
            <h2 class="preview-title">{title}</h2>
            <ul class="preview-items">
                <For
                    each=items
                    key=|item| (item.id.clone(), item.text.clone())
                    children=move |item| {
                        view! {
                            <li class="preview-item">
                                <span class="preview-box" />
                                <span class="preview-text">{item.text}</span>
                            </li>
                        }
                    }
                />
            </ul>
            <Show when=move || !description().is_empty()>
                <div class="preview-notes">
                    <h3>"Notes:"</h3>
                    <p class="preview-description">{description}</p>
                </div>
            </Show>
        </div>
    }
}

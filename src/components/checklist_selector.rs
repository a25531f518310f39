//! Checklist Selector Component
//!
//! Dropdown of saved checklists.

use leptos::prelude::*;

use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn ChecklistSelector(
    #[prop(into)] on_select: Callback<String>,
) -> impl IntoView {
    let store = use_app_store();

    let options = move || {
        store
            .checklists()
            .read()
            .iter()
            .map(|c| (c.id.clone(), c.title.clone()))
            .collect::<Vec<_>>()
    };

    view! {
        <div class="selector-group">
            <label for="checklist-selector">"Saved checklists"</label>
            <select
                id="checklist-selector"
                class="checklist-selector"
                prop:value=move || store.current_id().get().unwrap_or_default()
                on:change=move |ev| on_select.run(event_target_value(&ev))
            >
                <option value="" disabled=true>"Select a checklist"</option>
                <For
                    each=options
                    key=|(id, title)| (id.clone(), title.clone())
                    children=move |(id, title)| {
                        view! { <option value=id>{title}</option> }
                    }
                />
            </select>
        </div>
    }
}

//! Checklist Form Component
//!
//! Edits the draft: title, reorderable items, description, save.

use leptos::html;
use leptos::prelude::*;
use leptos_dragdrop::{
    bind_global_mouseup, create_dnd_signals, make_on_mousedown, make_on_mouseleave, make_on_slot_mouseenter,
    DndSignals,
};

use crate::store::{store_edit_draft, use_app_store, AppStateStoreFields};

#[component]
pub fn ChecklistForm(#[prop(into)] on_save: Callback<()>) -> impl IntoView {
    let store = use_app_store();

    let dnd = create_dnd_signals();
    // Item whose input should take focus once rendered
    let focus_request = RwSignal::new(None::<String>);

    bind_global_mouseup(dnd, move |from, to| {
        log::debug!("Reorder item {} -> {}", from, to);
        store_edit_draft(&store, |draft| draft.move_item(from, to));
    });

    let add_item = Callback::new(move |_: ()| {
        let id = store_edit_draft(&store, |draft| draft.add_item());
        focus_request.set(Some(id));
    });

    let rows = move || {
        store
            .draft()
            .read()
            .items
            .iter()
            .enumerate()
            .map(|(index, item)| (index, item.id.clone()))
            .collect::<Vec<_>>()
    };
    let item_count = move || store.draft().read().items.len();

    view! {
        <div class="card checklist-form">
            <input
                type="text"
                class="title-input"
                placeholder="Checklist Title"
                prop:value=move || store.draft().read().title.clone()
                on:input=move |ev| {
                    let raw = event_target_value(&ev);
                    store_edit_draft(&store, |draft| draft.set_title(&raw));
                }
            />

            <div class="form-section">
                <h3>"Items"</h3>
                <div
                    class=move || {
                        if dnd.dragging_read.get().is_some() { "item-list dragging-active" } else { "item-list" }
                    }
                >
                    <For
                        each=rows
                        key=|row| row.clone()
                        children=move |(index, id)| {
                            view! {
                                <DropSlot dnd=dnd gap=index />
                                <ItemRow
                                    dnd=dnd
                                    index=index
                                    id=id
                                    focus_request=focus_request
                                    on_enter=add_item
                                />
                            }
                        }
                    />
                    {move || view! { <DropSlot dnd=dnd gap=item_count() /> }}
                </div>
                <button class="btn btn-outline full-width" on:click=move |_| add_item.run(())>
                    "+ Add Item"
                </button>
            </div>

            <div class="form-section">
                <h3>"Description (Optional)"</h3>
                <textarea
                    rows="3"
                    placeholder="Add a description for your checklist"
                    prop:value=move || store.draft().read().description.clone()
                    on:input=move |ev| {
                        let raw = event_target_value(&ev);
                        store_edit_draft(&store, |draft| draft.set_description(&raw));
                    }
                />
            </div>

            <div class="form-footer">
                <button
                    class="btn btn-primary"
                    disabled=move || !store.draft().read().is_valid()
                    on:click=move |_| on_save.run(())
                >
                    "Save Checklist"
                </button>
            </div>
        </div>
    }
}

/// One editable item with its drag handle
#[component]
fn ItemRow(
    dnd: DndSignals,
    index: usize,
    id: String,
    focus_request: RwSignal<Option<String>>,
    on_enter: Callback<()>,
) -> impl IntoView {
    let store = use_app_store();
    let input_ref = NodeRef::<html::Input>::new();

    let text = {
        let id = id.clone();
        move || {
            store
                .draft()
                .read()
                .items
                .iter()
                .find(|item| item.id == id)
                .map(|item| item.text.clone())
                .unwrap_or_default()
        }
    };

    {
        let id = id.clone();
        Effect::new(move |_| {
            let Some(input) = input_ref.get() else {
                return;
            };
            if focus_request.get().as_deref() == Some(id.as_str()) {
                let _ = input.focus();
                focus_request.set(None);
            }
        });
    }

    let on_mousedown = make_on_mousedown(dnd, index);
    let is_dragging = move || dnd.dragging_read.get() == Some(index);
    let only_item = move || store.draft().read().items.len() <= 1;

    let id_for_input = id.clone();
    let id_for_remove = id;

    view! {
        <div class=move || if is_dragging() { "item-row dragging" } else { "item-row" }>
            <span class="drag-handle" title="Drag to reorder" on:mousedown=on_mousedown>"⠿"</span>
            <input
                type="text"
                class="item-input"
                node_ref=input_ref
                placeholder="Item text"
                prop:value=text
                on:input=move |ev| {
                    let raw = event_target_value(&ev);
                    store_edit_draft(&store, |draft| draft.set_item_text(&id_for_input, &raw));
                }
                on:keydown=move |ev: web_sys::KeyboardEvent| {
                    if ev.key() == "Enter" {
                        ev.prevent_default();
                        on_enter.run(());
                    }
                }
            />
            <button
                class="icon-btn"
                title="Remove item"
                disabled=only_item
                on:click=move |_| {
                    store_edit_draft(&store, |draft| draft.remove_item(&id_for_remove));
                }
            >
                "🗑"
            </button>
        </div>
    }
}

/// Gap between rows that accepts a dragged item
#[component]
fn DropSlot(dnd: DndSignals, gap: usize) -> impl IntoView {
    let on_mouseenter = make_on_slot_mouseenter(dnd, gap);
    let on_mouseleave = make_on_mouseleave(dnd);

    let slot_class = move || {
        drop_slot_class(
            dnd.dragging_read.get().is_some(),
            dnd.drop_slot_read.get(),
            gap,
        )
    };

    view! {
        <div
            class=slot_class
            on:mouseenter=on_mouseenter
            on:mouseleave=on_mouseleave
        />
    }
}

/// CSS class of the gap at index `gap`
fn drop_slot_class(dragging: bool, hovered: Option<usize>, gap: usize) -> String {
    let mut c = String::from("drop-slot");
    if !dragging {
        c.push_str(" hidden");
    }
    if hovered == Some(gap) {
        c.push_str(" active");
    }
    c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_slot_hidden_until_drag() {
        assert_eq!(drop_slot_class(false, None, 0), "drop-slot hidden");
        assert_eq!(drop_slot_class(true, None, 0), "drop-slot");
    }

    #[test]
    fn test_drop_slot_highlights_hovered_gap() {
        assert_eq!(drop_slot_class(true, Some(2), 2), "drop-slot active");
        assert_eq!(drop_slot_class(true, Some(2), 3), "drop-slot");
        // Trailing gap after the last row
        assert_eq!(drop_slot_class(true, Some(4), 4), "drop-slot active");
    }
}

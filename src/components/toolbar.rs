//! Toolbar Component
//!
//! Selector plus the New / Install / Print / Share / Delete actions.

use leptos::prelude::*;

use crate::browser::can_share;
use crate::components::{ChecklistSelector, DeleteConfirmButton};
use crate::context::use_app_context;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn Toolbar(
    #[prop(into)] on_select: Callback<String>,
    #[prop(into)] on_new: Callback<()>,
    #[prop(into)] on_install: Callback<()>,
    #[prop(into)] on_print: Callback<()>,
    #[prop(into)] on_share: Callback<()>,
    #[prop(into)] on_delete: Callback<()>,
) -> impl IntoView {
    let store = use_app_store();
    let ctx = use_app_context();
    let share_supported = can_share();

    // Only a checklist that has been saved can be deleted
    let is_saved = move || {
        let current = store.current_id().get();
        store
            .checklists()
            .read()
            .iter()
            .any(|c| Some(&c.id) == current.as_ref())
    };

    view! {
        <div class="toolbar no-print">
            <ChecklistSelector on_select=on_select />
            <div class="toolbar-actions">
                <button class="btn btn-outline" on:click=move |_| on_new.run(())>"+ New"</button>
                <button
                    class=move || install_button_class(ctx.can_install.get())
                    on:click=move |_| on_install.run(())
                >
                    "Install"
                </button>
                <button class="btn btn-primary" on:click=move |_| on_print.run(())>"Print"</button>
                <Show when=move || share_supported>
                    <button class="btn btn-outline" on:click=move |_| on_share.run(())>"Share"</button>
                </Show>
                <Show when=is_saved>
                    <DeleteConfirmButton label="Delete" on_confirm=on_delete />
                </Show>
            </div>
        </div>
    }
}

/// The Install button is highlighted once the browser offers a prompt
fn install_button_class(can_install: bool) -> &'static str {
    if can_install {
        "btn btn-primary"
    } else {
        "btn btn-outline"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_button_class() {
        assert_eq!(install_button_class(true), "btn btn-primary");
        assert_eq!(install_button_class(false), "btn btn-outline");
    }
}

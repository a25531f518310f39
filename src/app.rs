//! Checklist Creator App
//!
//! Root component: wires storage, the toolbar actions and the Edit/Preview tabs.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::browser;
use crate::components::{ChecklistForm, ChecklistPreview, Header, InstallHelp, Toaster, Toolbar};
use crate::context::AppContext;
use crate::install::{listen_for_install_prompt, InstallHandle, InstallOutcome};
use crate::storage::with_store;
use crate::store::{
    store_new_checklist, store_open_checklist, store_select_checklist, AppState, AppStateStoreFields, AppStore, Tab,
};

/// Delay between switching to the preview tab and printing/sharing
const PREVIEW_RENDER_DELAY_MS: u32 = 100;

#[component]
pub fn App() -> impl IntoView {
    let saved = with_store(|s| s.load());
    log::info!("Loaded {} saved checklists", saved.len());

    let store: AppStore = Store::new(AppState::from_saved(saved));
    provide_context(store);
    let ctx = AppContext::new();
    provide_context(ctx);

    let (show_install_help, set_show_install_help) = signal(false);

    if browser::is_standalone() {
        log::info!("Running as standalone app");
    } else {
        listen_for_install_prompt(move |handle| ctx.offer_install(handle));
    }

    let on_save = Callback::new(move |_: ()| save_draft(store, ctx));
    let on_delete = Callback::new(move |_: ()| delete_current(store, ctx));
    let on_select = Callback::new(move |id: String| store_select_checklist(&store, &id));
    let on_new = Callback::new(move |_: ()| store_new_checklist(&store));
    let on_print = Callback::new(move |_: ()| {
        store.active_tab().set(Tab::Preview);
        spawn_local(async move {
            TimeoutFuture::new(PREVIEW_RENDER_DELAY_MS).await;
            browser::print_page();
        });
    });
    let on_share = Callback::new(move |_: ()| {
        store.active_tab().set(Tab::Preview);
        let title = store.draft().read_untracked().title.clone();
        spawn_local(async move {
            TimeoutFuture::new(PREVIEW_RENDER_DELAY_MS).await;
            share_checklist(ctx, &title).await;
        });
    });
    let on_install = Callback::new(move |_: ()| match ctx.take_install() {
        Some(handle) => spawn_local(async move { run_install_prompt(ctx, handle).await }),
        None => {
            log::info!("No install prompt available");
            set_show_install_help.set(true);
        }
    });

    let tab_class = move |tab: Tab| {
        move || if store.active_tab().get() == tab { "tab active" } else { "tab" }
    };
    let panel_class = move |tab: Tab| {
        move || if store.active_tab().get() == tab { "tab-panel" } else { "tab-panel inactive" }
    };

    view! {
        <Header />
        <main class="container">
            <Toolbar
                on_select=on_select
                on_new=on_new
                on_install=on_install
                on_print=on_print
                on_share=on_share
                on_delete=on_delete
            />

            <Show when=move || show_install_help.get()>
                <InstallHelp on_close=move |_| set_show_install_help.set(false) />
            </Show>

            <div class="tabs">
                <div class="tab-list no-print">
                    <button class=tab_class(Tab::Edit) on:click=move |_| store.active_tab().set(Tab::Edit)>
                        "Edit"
                    </button>
                    <button class=tab_class(Tab::Preview) on:click=move |_| store.active_tab().set(Tab::Preview)>
                        "Preview"
                    </button>
                </div>
                // Both panels stay mounted; only the active one is displayed
                <div class=panel_class(Tab::Edit)>
                    <ChecklistForm on_save=on_save />
                </div>
                <div class=panel_class(Tab::Preview)>
                    <ChecklistPreview />
                </div>
            </div>
        </main>
        <Toaster />
    }
}

// ========================
// Actions
// ========================

fn save_draft(store: AppStore, ctx: AppContext) {
    let draft = store.draft().get_untracked();
    if !draft.is_valid() {
        return;
    }
    let checklist = draft.finalized();
    let existing = store.checklists().get_untracked();

    match with_store(|s| s.try_save(&checklist, &existing)) {
        Ok(updated) => {
            log::info!("Saved checklist {}", checklist.id);
            store.checklists().set(updated);
            store.current_id().set(Some(checklist.id.clone()));
            store.draft().set(checklist);
            ctx.notify("Checklist saved", "Your checklist has been saved successfully.");
        }
        Err(e) => {
            log::error!("Failed to save checklist: {}", e);
            ctx.notify_error("Save failed", "Your checklist could not be saved on this device.");
        }
    }
}

fn delete_current(store: AppStore, ctx: AppContext) {
    let Some(id) = store.current_id().get_untracked() else {
        return;
    };
    let existing = store.checklists().get_untracked();

    match with_store(|s| s.try_delete(&id, &existing)) {
        Ok(updated) => {
            log::info!("Deleted checklist {}", id);
            let next = updated.first().cloned();
            store.checklists().set(updated);
            match next {
                Some(checklist) => store_open_checklist(&store, checklist),
                None => store_new_checklist(&store),
            }
            ctx.notify("Checklist deleted", "The checklist has been removed.");
        }
        Err(e) => {
            log::error!("Failed to delete checklist: {}", e);
            ctx.notify_error("Delete failed", "The checklist could not be removed.");
        }
    }
}

async fn share_checklist(ctx: AppContext, title: &str) {
    if !browser::can_share() {
        ctx.notify_error("Sharing not supported", "Your browser doesn't support sharing.");
        return;
    }

    let name = share_title(title);
    let text = format!("{} - Checklist", name);
    match browser::share(&name, &text, &browser::current_url()).await {
        Ok(()) => ctx.notify("Shared successfully", "Your checklist has been shared."),
        Err(e) => {
            log::error!("Error sharing: {}", e);
            ctx.notify_error("Sharing failed", "There was an error sharing your checklist.");
        }
    }
}

async fn run_install_prompt(ctx: AppContext, handle: InstallHandle) {
    match handle.prompt().await {
        Ok(InstallOutcome::Accepted) => {
            ctx.notify("Installation started", "The app is being installed on your device.")
        }
        Ok(_) => ctx.notify("Installation cancelled", "You can install the app later from the menu."),
        Err(e) => {
            log::error!("Error during installation: {}", e);
            ctx.notify_error("Installation error", "There was a problem installing the app.");
        }
    }
}

/// Title used for sharing; blank drafts share as "Checklist"
fn share_title(title: &str) -> String {
    if title.is_empty() {
        "Checklist".to_string()
    } else {
        title.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_title_defaults() {
        assert_eq!(share_title(""), "Checklist");
        assert_eq!(share_title("Groceries"), "Groceries");
    }
}

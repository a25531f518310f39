//! Header Component

use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    view! {
        <header class="app-header no-print">
            <div class="header-inner">
                <span class="header-icon">"☰"</span>
                <h1>"Checklist Creator"</h1>
            </div>
        </header>
    }
}

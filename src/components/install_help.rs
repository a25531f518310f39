//! Install Help Component
//!
//! Manual "add to home screen" instructions, shown when the browser never
//! offered an install prompt.

use leptos::prelude::*;

use crate::browser::{is_standalone, user_agent};
use crate::install::Platform;

#[component]
pub fn InstallHelp(#[prop(into)] on_close: Callback<()>) -> impl IntoView {
    if is_standalone() {
        return view! {
            <div class="card install-help no-print">
                <div class="card-header">
                    <h2>"App Installed"</h2>
                    <button class="icon-btn" on:click=move |_| on_close.run(())>"×"</button>
                </div>
                <p>"The Checklist Creator app is already installed on your device."</p>
                <button class="btn btn-primary full-width" on:click=move |_| on_close.run(())>"Close"</button>
            </div>
        }
        .into_any();
    }

    let platform = Platform::detect(&user_agent());
    let steps = platform.install_steps();

    view! {
        <div class="card install-help no-print">
            <div class="card-header">
                <h2>"Install Checklist Creator"</h2>
                <button class="icon-btn" on:click=move |_| on_close.run(())>"×"</button>
            </div>
            <p class="muted">
                "Install this app on your device for a better experience. "
                "You can use it offline and it will look and feel like a native app."
            </p>
            {(!steps.is_empty()).then(|| view! {
                <div class="install-steps">
                    <h3>{format!("{} Installation Steps:", platform.label())}</h3>
                    <ol>
                        {steps.iter().map(|step| view! { <li>{*step}</li> }).collect_view()}
                    </ol>
                </div>
            })}
            <button class="btn btn-primary full-width" on:click=move |_| on_close.run(())>"Got it"</button>
        </div>
    }
    .into_any()
}

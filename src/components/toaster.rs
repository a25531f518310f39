//! Toaster Component
//!
//! Renders the toast stack from `AppContext`.

use leptos::prelude::*;

use crate::context::{use_app_context, ToastVariant};

#[component]
pub fn Toaster() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <div class="toaster no-print">
            <For
                each=move || ctx.toasts.get()
                key=|toast| toast.id
                children=move |toast| {
                    let id = toast.id;
                    let class = match toast.variant {
                        ToastVariant::Default => "toast",
                        ToastVariant::Destructive => "toast destructive",
                    };
                    view! {
                        <div class=class role="status">
                            <div class="toast-body">
                                <div class="toast-title">{toast.title}</div>
                                <div class="toast-description">{toast.description}</div>
                            </div>
                            <button class="toast-close" on:click=move |_| ctx.dismiss(id)>"×"</button>
                        </div>
                    }
                }
            />
        </div>
    }
}

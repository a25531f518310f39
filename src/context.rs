//! Application Context
//!
//! Shared state provided via Leptos Context API: toast notifications and
//! the install capability.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::install::{InstallHandle, InstallSlot};

/// How long a toast stays on screen
const TOAST_DURATION_MS: u32 = 4_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastVariant {
    Default,
    Destructive,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Visible toasts - read
    pub toasts: ReadSignal<Vec<Toast>>,
    /// Visible toasts - write
    set_toasts: WriteSignal<Vec<Toast>>,
    next_toast_id: StoredValue<u32>,
    /// Deferred install prompt, single use
    install_slot: StoredValue<InstallSlot<InstallHandle>, LocalStorage>,
    /// Whether an install prompt can be shown - read
    pub can_install: ReadSignal<bool>,
    /// Whether an install prompt can be shown - write
    set_can_install: WriteSignal<bool>,
}

impl AppContext {
    pub fn new() -> Self {
        let (toasts, set_toasts) = signal(Vec::new());
        let (can_install, set_can_install) = signal(false);
        Self {
            toasts,
            set_toasts,
            next_toast_id: StoredValue::new(0),
            install_slot: StoredValue::new_local(InstallSlot::default()),
            can_install,
            set_can_install,
        }
    }

    /// Show a toast
    pub fn notify(&self, title: &str, description: &str) {
        self.push_toast(title, description, ToastVariant::Default);
    }

    /// Show an error toast
    pub fn notify_error(&self, title: &str, description: &str) {
        self.push_toast(title, description, ToastVariant::Destructive);
    }

    fn push_toast(&self, title: &str, description: &str, variant: ToastVariant) {
        let id = self.next_toast_id.get_value();
        self.next_toast_id.set_value(id.wrapping_add(1));
        self.set_toasts.update(|toasts| {
            toasts.push(Toast {
                id,
                title: title.to_string(),
                description: description.to_string(),
                variant,
            })
        });

        let ctx = *self;
        spawn_local(async move {
            TimeoutFuture::new(TOAST_DURATION_MS).await;
            ctx.dismiss(id);
        });
    }

    pub fn dismiss(&self, id: u32) {
        self.set_toasts.update(|toasts| toasts.retain(|toast| toast.id != id));
    }

    /// Keep a freshly captured install handle
    pub fn offer_install(&self, handle: InstallHandle) {
        self.install_slot.update_value(|slot| slot.offer(handle));
        self.set_can_install.set(true);
    }

    /// Consume the install handle, if one was captured
    pub fn take_install(&self) -> Option<InstallHandle> {
        let handle = self.install_slot.try_update_value(|slot| slot.take()).flatten();
        self.set_can_install.set(false);
        handle
    }
}

/// Get the app context
pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}

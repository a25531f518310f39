//! Installation Handle
//!
//! The browser hands out a deferred `beforeinstallprompt` event at most
//! once per page load. It is kept as a single-use capability: holding an
//! `InstallHandle` is the only way to show the install prompt, and
//! prompting consumes it.

use js_sys::{Function, Promise, Reflect};
use thiserror::Error;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

/// User's answer to the install prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    Accepted,
    Dismissed,
}

impl InstallOutcome {
    /// `userChoice.outcome` is `"accepted"` or `"dismissed"`
    pub fn from_choice(outcome: &str) -> Self {
        if outcome == "accepted" {
            InstallOutcome::Accepted
        } else {
            InstallOutcome::Dismissed
        }
    }
}

#[derive(Error, Debug)]
pub enum InstallError {
    #[error("Install prompt failed: {0}")]
    Prompt(String),
}

fn prompt_error(value: JsValue) -> InstallError {
    InstallError::Prompt(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}

/// Deferred `beforeinstallprompt` event
pub struct InstallHandle {
    event: JsValue,
}

impl InstallHandle {
    pub fn from_event(event: JsValue) -> Self {
        Self { event }
    }

    /// Show the platform prompt and wait for the user's choice
    pub async fn prompt(self) -> Result<InstallOutcome, InstallError> {
        let prompt: Function = Reflect::get(&self.event, &JsValue::from_str("prompt"))
            .map_err(prompt_error)?
            .dyn_into()
            .map_err(prompt_error)?;
        prompt.call0(&self.event).map_err(prompt_error)?;

        let choice: Promise = Reflect::get(&self.event, &JsValue::from_str("userChoice"))
            .map_err(prompt_error)?
            .dyn_into()
            .map_err(prompt_error)?;
        let choice = JsFuture::from(choice).await.map_err(prompt_error)?;
        let outcome = Reflect::get(&choice, &JsValue::from_str("outcome"))
            .map_err(prompt_error)?
            .as_string()
            .unwrap_or_default();

        log::info!("User response to the install prompt: {}", outcome);
        Ok(InstallOutcome::from_choice(&outcome))
    }
}

/// Holds at most one pending handle
#[derive(Debug)]
pub struct InstallSlot<H> {
    handle: Option<H>,
}

impl<H> Default for InstallSlot<H> {
    fn default() -> Self {
        Self { handle: None }
    }
}

impl<H> InstallSlot<H> {
    /// Keep the newest handle; an older unused one is dropped
    pub fn offer(&mut self, handle: H) {
        self.handle = Some(handle);
    }

    pub fn is_available(&self) -> bool {
        self.handle.is_some()
    }

    pub fn take(&mut self) -> Option<H> {
        self.handle.take()
    }
}

/// Capture `beforeinstallprompt` so the app can show the prompt later
pub fn listen_for_install_prompt(on_handle: impl Fn(InstallHandle) + 'static) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let listener = Closure::<dyn FnMut(web_sys::Event)>::new(move |ev: web_sys::Event| {
        // Suppress the mini-infobar; the toolbar's Install button is used instead
        ev.prevent_default();
        log::info!("Install prompt detected");
        on_handle(InstallHandle::from_event(ev.into()));
    });
    if let Err(e) = window.add_event_listener_with_callback("beforeinstallprompt", listener.as_ref().unchecked_ref()) {
        log::warn!("Could not listen for install prompt: {:?}", e);
    }
    listener.forget();
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// Platform family, for the manual install instructions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Ios,
    Android { chrome: bool },
    Desktop,
}

impl Platform {
    pub fn detect(user_agent: &str) -> Self {
        let ua = user_agent.to_lowercase();

        if contains_any(&ua, &["iphone", "ipad", "ipod"]) {
            Platform::Ios
        } else if ua.contains("android") {
            let chrome = contains_any(&ua, &["chrome", "chromium", "crios"]) && !contains_any(&ua, &["edge", "edg"]);
            Platform::Android { chrome }
        } else {
            Platform::Desktop
        }
    }

    /// Manual steps for adding the app to the home screen
    pub fn install_steps(&self) -> &'static [&'static str] {
        match self {
            Platform::Ios => &[
                "Tap the Share button at the bottom of the screen",
                "Scroll down and tap Add to Home Screen",
                "Tap Add in the top right corner",
            ],
            Platform::Android { chrome: true } => &[
                "Tap the menu button (three dots) in the top right",
                "Tap Install app or Add to Home screen",
                "Follow the on-screen instructions",
            ],
            Platform::Android { chrome: false } => &[],
            Platform::Desktop => &[
                "Click the install icon in the address bar",
                "Click Install in the prompt that appears",
            ],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Platform::Ios => "iOS",
            Platform::Android { .. } => "Android",
            Platform::Desktop => "Desktop",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IPHONE: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.0 Mobile/15E148 Safari/604.1";
    const ANDROID_CHROME: &str = "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Mobile Safari/537.36";
    const ANDROID_EDGE: &str = "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Mobile Safari/537.36 EdgA/120.0.0.0";
    const ANDROID_FIREFOX: &str = "Mozilla/5.0 (Android 14; Mobile; rv:121.0) Gecko/121.0 Firefox/121.0";
    const DESKTOP: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

    #[test]
    fn test_detect_platform() {
        assert_eq!(Platform::detect(IPHONE), Platform::Ios);
        assert_eq!(Platform::detect(ANDROID_CHROME), Platform::Android { chrome: true });
        assert_eq!(Platform::detect(ANDROID_EDGE), Platform::Android { chrome: false });
        assert_eq!(Platform::detect(ANDROID_FIREFOX), Platform::Android { chrome: false });
        assert_eq!(Platform::detect(DESKTOP), Platform::Desktop);
    }

    #[test]
    fn test_install_steps() {
        assert_eq!(Platform::Ios.install_steps().len(), 3);
        assert!(Platform::Android { chrome: false }.install_steps().is_empty());
        assert_eq!(Platform::Desktop.install_steps()[1], "Click Install in the prompt that appears");
    }

    #[test]
    fn test_outcome_from_choice() {
        assert_eq!(InstallOutcome::from_choice("accepted"), InstallOutcome::Accepted);
        assert_eq!(InstallOutcome::from_choice("dismissed"), InstallOutcome::Dismissed);
        assert_eq!(InstallOutcome::from_choice(""), InstallOutcome::Dismissed);
    }

    #[test]
    fn test_slot_is_single_use() {
        let mut slot = InstallSlot::default();
        assert!(!slot.is_available());

        slot.offer("first");
        slot.offer("second");
        assert!(slot.is_available());

        assert_eq!(slot.take(), Some("second"));
        assert_eq!(slot.take(), None);
        assert!(!slot.is_available());
    }
}

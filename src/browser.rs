//! Browser Helpers
//!
//! Thin wrappers over window/navigator APIs used by the toolbar.

use js_sys::{Function, Object, Promise, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;

fn js_message(value: JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

/// Open the print dialog for the current page
pub fn print_page() {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.print() {
            log::error!("Print failed: {}", js_message(e));
        }
    }
}

/// Whether the app runs from the home screen rather than a browser tab
pub fn is_standalone() -> bool {
    web_sys::window()
        .and_then(|window| window.match_media("(display-mode: standalone)").ok().flatten())
        .map(|query| query.matches())
        .unwrap_or(false)
}

pub fn user_agent() -> String {
    web_sys::window()
        .and_then(|window| window.navigator().user_agent().ok())
        .unwrap_or_default()
}

pub fn current_url() -> String {
    web_sys::window()
        .and_then(|window| window.location().href().ok())
        .unwrap_or_default()
}

fn share_function() -> Option<(JsValue, Function)> {
    let navigator: JsValue = web_sys::window()?.navigator().into();
    let share = Reflect::get(&navigator, &JsValue::from_str("share")).ok()?;
    let share = share.dyn_into::<Function>().ok()?;
    Some((navigator, share))
}

/// `navigator.share` exists (mostly mobile browsers)
pub fn can_share() -> bool {
    share_function().is_some()
}

/// Open the platform share sheet
pub async fn share(title: &str, text: &str, url: &str) -> Result<(), String> {
    let (navigator, share) = share_function().ok_or_else(|| "Sharing not supported".to_string())?;

    let data = Object::new();
    for (key, value) in [("title", title), ("text", text), ("url", url)] {
        Reflect::set(&data, &JsValue::from_str(key), &JsValue::from_str(value)).map_err(js_message)?;
    }

    let promise: Promise = share.call1(&navigator, &data).map_err(js_message)?.dyn_into().map_err(js_message)?;
    JsFuture::from(promise).await.map_err(js_message)?;
    Ok(())
}

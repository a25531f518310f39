//! Service Worker Registration
//!
//! Registers `/sw.js` and nudges a waiting worker to activate.

use offline_cache::ControlMessage;
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{ServiceWorker, ServiceWorkerRegistration};

/// Path of the worker loader script
const SW_SCRIPT: &str = "/sw.js";

/// Post a control message to a worker
pub fn post_control(worker: &ServiceWorker, message: ControlMessage) -> Result<(), JsValue> {
    // Plain object, not a JS Map
    let value = message
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(JsValue::from)?;
    worker.post_message(&value)
}

pub fn register_service_worker() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let navigator = window.navigator();
    if !js_sys::Reflect::has(&navigator, &JsValue::from_str("serviceWorker")).unwrap_or(false) {
        log::info!("Service workers not supported, running online only");
        return;
    }

    let container = navigator.service_worker();
    spawn_local(async move {
        let registration = match JsFuture::from(container.register(SW_SCRIPT)).await {
            Ok(value) => value.unchecked_into::<ServiceWorkerRegistration>(),
            Err(e) => {
                log::warn!("ServiceWorker registration failed: {:?}", e);
                return;
            }
        };
        log::info!("ServiceWorker registration successful with scope: {}", registration.scope());

        // An updated worker is waiting for old tabs to close; activate it now
        if let Some(waiting) = registration.waiting() {
            match post_control(&waiting, ControlMessage::SkipWaiting) {
                Ok(()) => log::info!("Asked waiting service worker to activate"),
                Err(e) => log::warn!("Could not message waiting worker: {:?}", e),
            }
        }
    });
}

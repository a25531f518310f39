//! Checklist Creator Service Worker
//!
//! Binds the `offline-cache` core to `ServiceWorkerGlobalScope`.
//! `public/sw.js` registers the event listeners synchronously and forwards
//! each event to the exports below once the module is initialised.

mod host;

use std::cell::RefCell;
use std::rc::Rc;

use offline_cache::{control_channel, ControlMessage, ControlSender, OfflineWorker};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{future_to_promise, spawn_local};

use host::{BrowserHost, SwRequest};

thread_local! {
    static WORKER: RefCell<Option<Rc<OfflineWorker<BrowserHost>>>> = RefCell::new(None);
    static CONTROL: RefCell<Option<ControlSender>> = RefCell::new(None);
}

fn worker() -> Result<Rc<OfflineWorker<BrowserHost>>, JsValue> {
    WORKER
        .with(|cell| cell.borrow().clone())
        .ok_or_else(|| JsValue::from_str("service worker not started"))
}

fn to_js(err: offline_cache::WorkerError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    if let Err(e) = console_logger::init(log::LevelFilter::Info) {
        web_sys::console::error_1(&format!("Logger already installed: {}", e).into());
    }

    let worker = Rc::new(OfflineWorker::new(BrowserHost::from_global()?));
    let (tx, rx) = control_channel();

    // Control messages are handled on their own task
    let control_worker = worker.clone();
    spawn_local(async move {
        control_worker.serve_control(rx).await;
    });

    WORKER.with(|cell| *cell.borrow_mut() = Some(worker));
    CONTROL.with(|cell| *cell.borrow_mut() = Some(tx));
    log::info!("Service worker module ready");
    Ok(())
}

/// `install` event body, passed to `event.waitUntil`
#[wasm_bindgen]
pub fn on_install() -> js_sys::Promise {
    future_to_promise(async move {
        worker()?.install().await.map_err(to_js)?;
        Ok(JsValue::UNDEFINED)
    })
}

/// `activate` event body, passed to `event.waitUntil`
#[wasm_bindgen]
pub fn on_activate() -> js_sys::Promise {
    future_to_promise(async move {
        let evicted = worker()?.activate().await.map_err(to_js)?;
        log::info!("Activated, evicted {} stale cache(s)", evicted.len());
        Ok(JsValue::UNDEFINED)
    })
}

/// `fetch` event body, passed to `event.respondWith`
#[wasm_bindgen]
pub fn on_fetch(request: web_sys::Request) -> js_sys::Promise {
    future_to_promise(async move {
        let response = worker()?.handle_fetch(&SwRequest(request)).await.map_err(to_js)?;
        Ok(response.0.into())
    })
}

/// `message` event data from a page
#[wasm_bindgen]
pub fn on_message(data: JsValue) {
    let message: ControlMessage = match serde_wasm_bindgen::from_value(data) {
        Ok(message) => message,
        Err(err) => {
            log::debug!("Ignoring unknown message: {}", err);
            return;
        }
    };

    CONTROL.with(|cell| match cell.borrow().as_ref() {
        Some(tx) => {
            if let Err(err) = tx.send(message) {
                log::warn!("{}", err);
            }
        }
        None => log::warn!("Message {:?} arrived before start", message),
    });
}

//! Checklist Creator Entry Point

mod app;
mod browser;
mod components;
mod context;
mod draft;
mod install;
mod models;
mod sanitize;
mod storage;
mod store;
mod sw;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_logger::init(log::LevelFilter::Info) {
        web_sys::console::error_1(&format!("Logger already installed: {}", e).into());
    }
    sw::register_service_worker();
    mount_to_body(App);
}

#![allow(warnings)]
//! New-Tab Dashboard Entry Point

mod app;
mod bookmark_import;
mod collection;
mod components;
mod config;
mod context;
mod dashboard;
mod error;
mod feeds;
mod ids;
mod models;
mod navigation;
mod preview;
mod settings;
mod storage;
mod store;
mod view;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    init_logging();
    mount_to_body(App);
}

#[cfg(target_arch = "wasm32")]
fn init_logging() {
    let level = if cfg!(debug_assertions) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    if let Err(e) = console_log::init_with_level(level) {
        web_sys::console::error_1(&format!("[APP] Logger already set: {}", e).into());
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn init_logging() {}

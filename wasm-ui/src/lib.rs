//! Web UI for playground-rs
//!
//! A Yew-based live playground: three editor panels (HTML, CSS,
//! JS/TS), a debounced sandboxed preview, and Ctrl+S to format all
//! panes and copy a shareable URL.

pub mod app;
pub mod collab;
pub mod components;
pub mod scheduler;

use wasm_bindgen::prelude::*;

/// Entry point for the WASM application.
#[wasm_bindgen(start)]
pub fn run_app() {
    // Initialize panic hook for better error messages
    console_error_panic_hook::set_once();

    // Mount the Yew app
    yew::Renderer::<app::App>::new().render();
}

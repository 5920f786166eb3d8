//! Page Builder WASM Module
//!
//! Core of a visual page builder: pages are laid out as a recursive binary
//! grid of cells, leaf cells hold ordered content blocks, and every edit is a
//! pure tree transformation recorded in a snapshot undo history.

pub mod error;
pub mod config;
pub mod models;
pub mod layout;
pub mod undo;
pub mod session;
pub mod persistence;
pub mod api;

// Re-export commonly used types
pub use config::BuilderConfig;
pub use error::{BuilderError, Result};
pub use layout::{Orientation, ResizeGesture};
pub use models::*;
pub use persistence::{decode_page, encode_page, MemoryPageStore, PageStore};
pub use session::{BuilderSession, Shortcut, ShortcutEffect};
pub use undo::History;

use wasm_bindgen::prelude::*;

// Runs once when the WASM module is instantiated.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    if console_log::init_with_level(log::Level::Debug).is_err() {
        wasm_warn!("Logger already initialized");
    }

    log::info!("Page builder WASM module initialized");
}

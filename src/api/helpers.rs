//! Shared helpers for the WASM API
//!
//! Console logging macros, JS value conversion, and access to the single
//! mounted builder session.

use std::sync::Mutex;

use lazy_static::lazy_static;
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::error::BuilderError;
use crate::session::BuilderSession;

// The mounted builder, if any. Mount/unmount are the only writers of the slot.
lazy_static! {
    static ref BUILDER: Mutex<Option<BuilderSession>> = Mutex::new(None);
}

// ============================================================================
// Console Logging Functions
// ============================================================================

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);

    #[wasm_bindgen(js_namespace = console)]
    fn info(s: &str);

    #[wasm_bindgen(js_namespace = console)]
    fn warn(s: &str);

    #[wasm_bindgen(js_namespace = console)]
    fn error(s: &str);
}

// ============================================================================
// Logging Macros
// ============================================================================

/// Log a debug message with [WASM] prefix
#[macro_export]
macro_rules! wasm_log {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_debug(&format!($($arg)*))
    };
}

/// Log an info message with [WASM] prefix
#[macro_export]
macro_rules! wasm_info {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_info(&format!($($arg)*))
    };
}

/// Log a warning message with [WASM] ⚠️ prefix
#[macro_export]
macro_rules! wasm_warn {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_warn(&format!($($arg)*))
    };
}

/// Log an error message with [WASM] ❌ prefix
#[macro_export]
macro_rules! wasm_error {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_error(&format!($($arg)*))
    };
}

pub fn log_debug(msg: &str) {
    log(&format!("[WASM] {}", msg));
}

pub fn log_info(msg: &str) {
    info(&format!("[WASM] {}", msg));
}

pub fn log_warn(msg: &str) {
    warn(&format!("[WASM] ⚠️ {}", msg));
}

pub fn log_error(msg: &str) {
    error(&format!("[WASM] ❌ {}", msg));
}

// ============================================================================
// Serialization/Deserialization Helpers
// ============================================================================

/// Deserialize a value from JavaScript with automatic error handling
pub fn deserialize<T: DeserializeOwned>(value: JsValue, error_context: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| {
        let msg = format!("{}: {}", error_context, e);
        log_error(&msg);
        JsValue::from_str(&msg)
    })
}

/// Serialize a value to JavaScript; maps become plain objects
pub fn serialize<T: Serialize>(value: &T, error_context: &str) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| {
            let msg = format!("{}: {}", error_context, e);
            log_error(&msg);
            JsValue::from_str(&msg)
        })
}

// ============================================================================
// Error Conversion
// ============================================================================

/// Convert a builder error into a JS exception value
pub fn builder_error(err: BuilderError) -> JsValue {
    let msg = err.to_string();
    log_error(&msg);
    JsValue::from_str(&msg)
}

/// Convert a validation error to a JsValue
pub fn validation_error(msg: impl Into<String>) -> JsValue {
    let msg = msg.into();
    log_error(&msg);
    JsValue::from_str(&msg)
}

// ============================================================================
// Session Access
// ============================================================================

fn lock_builder() -> Result<std::sync::MutexGuard<'static, Option<BuilderSession>>, JsValue> {
    BUILDER
        .lock()
        .map_err(|_| validation_error("Builder state lock poisoned"))
}

/// Install a session, returning whether one was replaced
pub fn mount(session: BuilderSession) -> Result<bool, JsValue> {
    Ok(lock_builder()?.replace(session).is_some())
}

/// Drop the mounted session, returning whether there was one
pub fn unmount() -> Result<bool, JsValue> {
    Ok(lock_builder()?.take().is_some())
}

/// Run `f` against the mounted session
pub fn with_session<T>(f: impl FnOnce(&mut BuilderSession) -> Result<T, BuilderError>) -> Result<T, JsValue> {
    let mut guard = lock_builder()?;
    let session = guard.as_mut().ok_or_else(|| builder_error(BuilderError::NotMounted))?;
    f(session).map_err(builder_error)
}

/// Run `f` if a session is mounted; `None` otherwise
pub fn with_mounted<T>(f: impl FnOnce(&mut BuilderSession) -> T) -> Result<Option<T>, JsValue> {
    let mut guard = lock_builder()?;
    Ok(guard.as_mut().map(f))
}
